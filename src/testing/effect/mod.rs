use crate::error::{StatsError, StatsResult};
use crate::testing::utils::summarize;
use single_utilities::traits::FloatOps;

/// Calculate Cohen's d between two samples.
///
/// Positive when the first sample has the larger mean. Uses the pooled
/// standard deviation, so both samples must hold at least two observations.
pub fn cohens_d<T>(sample1: &[T], sample2: &[T]) -> StatsResult<f64>
where
    T: FloatOps,
{
    let first = summarize(sample1)?;
    let second = summarize(sample2)?;

    let n1 = first.n_f64();
    let n2 = second.n_f64();
    let pooled_sd =
        (((n1 - 1.0) * first.variance + (n2 - 1.0) * second.variance) / (n1 + n2 - 2.0)).sqrt();

    if pooled_sd == 0.0 {
        return Err(StatsError::DegenerateInput(
            "pooled standard deviation is zero".to_string(),
        ));
    }

    Ok((first.mean - second.mean) / pooled_sd)
}

/// Calculate Hedges' g (small-sample bias-corrected Cohen's d)
pub fn hedges_g<T>(sample1: &[T], sample2: &[T]) -> StatsResult<f64>
where
    T: FloatOps,
{
    let d = cohens_d(sample1, sample2)?;

    let n = (sample1.len() + sample2.len()) as f64;
    let j = 1.0 - 3.0 / (4.0 * (n - 2.0) - 1.0);

    Ok(j * d)
}
