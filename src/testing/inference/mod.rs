use crate::error::{StatsError, StatsResult};
use crate::testing::{Alternative, TestResult};
use ndarray::Array2;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use single_utilities::traits::FloatOpsTS;

pub mod parametric;

pub mod students_t;

/// Column-wise group comparisons on a score matrix (observations × score columns).
pub trait MatrixStatTests<T>
where
    T: FloatOpsTS,
{
    /// Run Welch's t-test on every column, comparing the rows in
    /// `group1_indices` against the rows in `group2_indices`.
    fn welch_t_test(
        &self,
        group1_indices: &[usize],
        group2_indices: &[usize],
        alternative: Alternative,
    ) -> StatsResult<Vec<TestResult<f64>>>;
}

impl<T> MatrixStatTests<T> for Array2<T>
where
    T: FloatOpsTS,
{
    fn welch_t_test(
        &self,
        group1_indices: &[usize],
        group2_indices: &[usize],
        alternative: Alternative,
    ) -> StatsResult<Vec<TestResult<f64>>> {
        let nrows = self.nrows();
        if let Some(&row) = group1_indices
            .iter()
            .chain(group2_indices)
            .find(|&&row| row >= nrows)
        {
            return Err(StatsError::InvalidInput(format!(
                "row index {} out of bounds for {} observations",
                row, nrows
            )));
        }

        (0..self.ncols())
            .into_par_iter()
            .map(|col| {
                let column = self.column(col);
                let group1_values: Vec<T> = group1_indices.iter().map(|&row| column[row]).collect();
                let group2_values: Vec<T> = group2_indices.iter().map(|&row| column[row]).collect();
                parametric::welch_t_test(&group1_values, &group2_values, alternative)
            })
            .collect()
    }
}
