//! Welch's unequal-variance two-sample t-test.
//!
//! All functions here are pure: they read the input samples, never mutate
//! them, and keep no state between calls, so they can be called from any
//! number of threads at once.

use crate::error::{StatsError, StatsResult};
use crate::testing::inference::students_t::StudentsTCdf;
use crate::testing::utils::{SampleSummary, summarize};
use crate::testing::{Alternative, SignificanceLevel, TestResult};
use single_utilities::traits::FloatOps;
use tracing::debug;

/// Two-sided p-value of Welch's t-test comparing the means of two samples.
///
/// The returned value is the smallest significance level at which the null
/// hypothesis of equal means can be rejected in favour of the two-sided
/// alternative. For a one-sided test, divide the returned value by 2 (after
/// checking that the observed difference points in the hypothesised
/// direction), or use [`welch_t_test`] with [`Alternative::Less`] /
/// [`Alternative::Greater`].
///
/// # Errors
///
/// * [`StatsError::InvalidInput`] if either sample has fewer than 2
///   observations or contains a non-finite value
/// * [`StatsError::DegenerateInput`] if the Welch–Satterthwaite degrees of
///   freedom are not strictly positive and finite (e.g. both samples constant)
/// * [`StatsError::NumericalConvergence`] if the t-distribution CDF fails to converge
pub fn compute_p_value<T>(sample1: &[T], sample2: &[T]) -> StatsResult<f64>
where
    T: FloatOps,
{
    Ok(welch_t_test(sample1, sample2, Alternative::TwoSided)?.p_value)
}

/// Decide whether the null hypothesis of equal means is rejected at `alpha`.
///
/// Returns `true` iff the two-sided p-value is strictly below `alpha`.
/// `alpha` must lie in `(0, 0.5]`, otherwise [`StatsError::OutOfRange`] is
/// returned before any sample is inspected.
///
/// To test the one-sided hypothesis `mean1 < mean2` at the 99% level, first
/// verify that the observed mean of `sample1` is below that of `sample2`, then
/// call `reject(sample1, sample2, 0.02)`.
pub fn reject<T>(sample1: &[T], sample2: &[T], alpha: f64) -> StatsResult<bool>
where
    T: FloatOps,
{
    let alpha = SignificanceLevel::new(alpha)?;
    let p_value = compute_p_value(sample1, sample2)?;
    Ok(p_value < alpha.value())
}

/// Full Welch's t-test: statistic, degrees of freedom, standard error and the
/// p-value for the requested alternative.
pub fn welch_t_test<T>(
    sample1: &[T],
    sample2: &[T],
    alternative: Alternative,
) -> StatsResult<TestResult<f64>>
where
    T: FloatOps,
{
    let first = summarize(sample1)?;
    let second = summarize(sample2)?;
    welch_t_test_from_summaries(&first, &second, alternative)
}

/// Welch's t-test on precomputed sample summaries.
pub fn welch_t_test_from_summaries(
    first: &SampleSummary,
    second: &SampleSummary,
    alternative: Alternative,
) -> StatsResult<TestResult<f64>> {
    welch_t_test_from_moments(
        first.mean,
        second.mean,
        first.variance,
        second.variance,
        first.n_f64(),
        second.n_f64(),
        alternative,
    )
}

/// Welch's t-test from means `m1, m2`, unbiased variances `v1, v2` and sample
/// sizes `n1, n2`.
pub fn welch_t_test_from_moments(
    m1: f64,
    m2: f64,
    v1: f64,
    v2: f64,
    n1: f64,
    n2: f64,
    alternative: Alternative,
) -> StatsResult<TestResult<f64>> {
    if n1 < 2.0 || n2 < 2.0 {
        return Err(StatsError::InvalidInput(format!(
            "each sample needs at least 2 observations, got {} and {}",
            n1, n2
        )));
    }
    if v1 < 0.0 || v2 < 0.0 {
        return Err(StatsError::InvalidInput(format!(
            "variances must be non-negative, got {:e} and {:e}",
            v1, v2
        )));
    }

    let df = welch_satterthwaite_df(v1, v2, n1, n2);
    if !(df > 0.0 && df.is_finite()) {
        return Err(StatsError::DegenerateInput(format!(
            "Welch-Satterthwaite degrees of freedom evaluated to {:e} (v1={:e}, v2={:e})",
            df, v1, v2
        )));
    }

    let standard_error = (v1 / n1 + v2 / n2).sqrt();
    let t = t_statistic(m1, m2, v1, v2, n1, n2);
    if !t.is_finite() {
        return Err(StatsError::DegenerateInput(format!(
            "t-statistic evaluated to {:e} (standard error {:e})",
            t, standard_error
        )));
    }

    let distribution = StudentsTCdf::new(df)?;
    let p_value = match alternative {
        Alternative::TwoSided => 2.0 * distribution.cdf(-t.abs())?,
        Alternative::Less => distribution.cdf(t)?,
        Alternative::Greater => distribution.sf(t)?,
    }
    .clamp(0.0, 1.0);

    debug!(t, df, p_value, ?alternative, "welch t-test");

    Ok(TestResult::new(t, p_value)
        .with_degrees_of_freedom(df)
        .with_standard_error(standard_error)
        .with_metadata("mean_difference", m1 - m2))
}

/// t-statistic for two samples without assuming equal variances.
pub fn t_statistic(m1: f64, m2: f64, v1: f64, v2: f64, n1: f64, n2: f64) -> f64 {
    (m1 - m2) / (v1 / n1 + v2 / n2).sqrt()
}

/// Welch–Satterthwaite approximation of the degrees of freedom.
///
/// May be NaN or infinite for degenerate input; callers must check.
pub fn welch_satterthwaite_df(v1: f64, v2: f64, n1: f64, n2: f64) -> f64 {
    let term1 = v1 / n1;
    let term2 = v2 / n2;
    let combined = term1 + term2;
    combined * combined / ((v1 * v1) / (n1 * n1 * (n1 - 1.0)) + (v2 * v2) / (n2 * n2 * (n2 - 1.0)))
}
