use crate::error::{StatsError, StatsResult};
use single_utilities::traits::FloatOps;

/// Mean, unbiased variance and size of a single sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSummary {
    pub mean: f64,
    pub variance: f64,
    pub n: usize,
}

impl SampleSummary {
    pub fn n_f64(&self) -> f64 {
        self.n as f64
    }
}

/// Summarize a sample of at least two finite observations.
///
/// Uses a two-pass computation so that the variance does not suffer from the
/// cancellation of the sum-of-squares formula on tightly clustered scores.
pub fn summarize<T>(values: &[T]) -> StatsResult<SampleSummary>
where
    T: FloatOps,
{
    let n = values.len();
    if n < 2 {
        return Err(StatsError::InvalidInput(format!(
            "sample needs at least 2 observations, got {}",
            n
        )));
    }

    let mut widened = Vec::with_capacity(n);
    for (i, value) in values.iter().enumerate() {
        match value.to_f64() {
            Some(v) if v.is_finite() => widened.push(v),
            _ => {
                return Err(StatsError::InvalidInput(format!(
                    "observation at index {} is not a finite number",
                    i
                )));
            }
        }
    }

    let n_f = n as f64;
    let mean = widened.iter().sum::<f64>() / n_f;
    let variance = widened.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n_f - 1.0);

    Ok(SampleSummary { mean, variance, n })
}

/// Indices of every label equal to `group`.
pub fn group_indices<L: PartialEq>(labels: &[L], group: &L) -> Vec<usize> {
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, l)| if l == group { Some(i) } else { None })
        .collect()
}
