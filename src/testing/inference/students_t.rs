//! Cumulative distribution function of Student's t-distribution.
//!
//! The CDF is expressed through the regularized incomplete beta function
//!
//! ```text
//! P(T <= x) = 1 - 0.5 * I_z(df/2, 1/2)   for x >= 0,  z = df / (df + x^2)
//! P(T <= x) =     0.5 * I_z(df/2, 1/2)   for x <  0
//! ```
//!
//! and `I_z` is evaluated with the modified Lentz continued fraction. Unlike
//! most implementations, running out of iterations is reported as
//! [`StatsError::NumericalConvergence`] instead of returning the last partial
//! value.

use crate::error::{StatsError, StatsResult};
use statrs::function::gamma::ln_gamma;
use tracing::debug;

/// Upper bound on continued fraction iterations. The number of terms needed
/// grows with `sqrt(max(a, b))`, so this covers degrees of freedom far beyond
/// anything a two-sample test produces.
pub const MAX_ITERATIONS: usize = 10_000;

/// Relative change of the continued fraction below which it is considered converged.
pub const TOLERANCE: f64 = 1e-15;

const FPMIN: f64 = 1e-300;

/// Student's t-distribution with a fixed, strictly positive number of degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentsTCdf {
    df: f64,
    max_iterations: usize,
}

impl StudentsTCdf {
    pub fn new(df: f64) -> StatsResult<Self> {
        if !(df > 0.0 && df.is_finite()) {
            return Err(StatsError::DegenerateInput(format!(
                "degrees of freedom must be strictly positive and finite, got {:e}",
                df
            )));
        }
        Ok(StudentsTCdf {
            df,
            max_iterations: MAX_ITERATIONS,
        })
    }

    /// Override the iteration budget of the continued fraction.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn degrees_of_freedom(&self) -> f64 {
        self.df
    }

    /// `P(T <= x)`
    pub fn cdf(&self, x: f64) -> StatsResult<f64> {
        if x.is_nan() {
            return Err(StatsError::InvalidInput(
                "cannot evaluate the t-distribution at NaN".to_string(),
            ));
        }
        if x == f64::NEG_INFINITY {
            return Ok(0.0);
        }
        if x == f64::INFINITY {
            return Ok(1.0);
        }

        let z = self.df / (self.df + x * x);
        let tail = 0.5 * incomplete_beta_with_budget(self.df / 2.0, 0.5, z, self.max_iterations)?;

        let p = if x < 0.0 { tail } else { 1.0 - tail };
        Ok(p.clamp(0.0, 1.0))
    }

    /// `P(T > x)`, computed without the cancellation of `1 - cdf(x)` in the upper tail.
    pub fn sf(&self, x: f64) -> StatsResult<f64> {
        if x.is_nan() {
            return Err(StatsError::InvalidInput(
                "cannot evaluate the t-distribution at NaN".to_string(),
            ));
        }
        self.cdf(-x)
    }
}

/// Regularized incomplete beta function `I_x(a, b)` for `a, b > 0`, `0 <= x <= 1`.
pub fn regularized_incomplete_beta(a: f64, b: f64, x: f64) -> StatsResult<f64> {
    incomplete_beta_with_budget(a, b, x, MAX_ITERATIONS)
}

fn incomplete_beta_with_budget(a: f64, b: f64, x: f64, max_iterations: usize) -> StatsResult<f64> {
    if !(a > 0.0 && b > 0.0) || !a.is_finite() || !b.is_finite() {
        return Err(StatsError::InvalidInput(format!(
            "incomplete beta shape parameters must be positive and finite, got a={:e}, b={:e}",
            a, b
        )));
    }
    if !(0.0..=1.0).contains(&x) {
        return Err(StatsError::InvalidInput(format!(
            "incomplete beta argument must lie in [0, 1], got {:e}",
            x
        )));
    }
    if x == 0.0 {
        return Ok(0.0);
    }
    if x == 1.0 {
        return Ok(1.0);
    }

    let ln_front = ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (-x).ln_1p();
    let front = ln_front.exp();

    // The fraction converges quickly only left of the mean of the beta distribution
    let value = if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_continued_fraction(a, b, x, max_iterations)? / a
    } else {
        1.0 - front * beta_continued_fraction(b, a, 1.0 - x, max_iterations)? / b
    };

    Ok(value.clamp(0.0, 1.0))
}

fn beta_continued_fraction(a: f64, b: f64, x: f64, max_iterations: usize) -> StatsResult<f64> {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=max_iterations {
        let m_f = m as f64;
        let m2 = 2.0 * m_f;

        // even step
        let aa = m_f * (b - m_f) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        // odd step
        let aa = -(a + m_f) * (qab + m_f) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < TOLERANCE {
            debug!(a, b, x, iterations = m, "incomplete beta converged");
            return Ok(h);
        }
    }

    Err(StatsError::NumericalConvergence {
        iterations: max_iterations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use statrs::distribution::{ContinuousCDF, StudentsT};

    #[test]
    fn test_cauchy_closed_form() {
        // df = 1 is the standard Cauchy distribution
        let dist = StudentsTCdf::new(1.0).unwrap();
        for &x in &[-3.0, -1.0, 0.5, 2.0, 10.0] {
            let expected = 0.5 + f64::atan(x) / std::f64::consts::PI;
            assert_relative_eq!(dist.cdf(x).unwrap(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_two_degrees_of_freedom_closed_form() {
        let dist = StudentsTCdf::new(2.0).unwrap();
        for &x in &[-3.0_f64, -1.0, 0.5, 2.0] {
            let expected = 0.5 + x / (2.0 * (2.0 + x * x).sqrt());
            assert_relative_eq!(dist.cdf(x).unwrap(), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_known_quantile() {
        let dist = StudentsTCdf::new(10.0).unwrap();
        assert_abs_diff_eq!(dist.cdf(2.0).unwrap(), 0.9633059826146297, epsilon = 1e-10);
    }

    #[test]
    fn test_symmetry_and_center() {
        let dist = StudentsTCdf::new(3.5).unwrap();
        assert_relative_eq!(dist.cdf(0.0).unwrap(), 0.5, epsilon = 1e-15);
        for &x in &[0.1, 0.7, 1.5, 4.0, 25.0] {
            let lower = dist.cdf(-x).unwrap();
            let upper = dist.cdf(x).unwrap();
            assert_relative_eq!(lower + upper, 1.0, epsilon = 1e-12);
            assert_relative_eq!(dist.sf(x).unwrap(), lower, epsilon = 1e-15);
        }
    }

    #[test]
    fn test_matches_statrs_reference() {
        for &df in &[1.5, 4.0, 7.94, 24.5, 120.0, 5000.0] {
            let reference = StudentsT::new(0.0, 1.0, df).unwrap();
            let dist = StudentsTCdf::new(df).unwrap();
            for &x in &[-6.0, -2.2, -0.3, 0.0, 1.1, 3.0] {
                assert_abs_diff_eq!(dist.cdf(x).unwrap(), reference.cdf(x), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_infinite_arguments() {
        let dist = StudentsTCdf::new(5.0).unwrap();
        assert_eq!(dist.cdf(f64::NEG_INFINITY).unwrap(), 0.0);
        assert_eq!(dist.cdf(f64::INFINITY).unwrap(), 1.0);
        assert!(matches!(dist.cdf(f64::NAN), Err(StatsError::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_degrees_of_freedom() {
        for &df in &[0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                StudentsTCdf::new(df),
                Err(StatsError::DegenerateInput(_))
            ));
        }

        let message = StudentsTCdf::new(-1e-300).unwrap_err().to_string();
        assert!(message.ends_with("got -1e-300"), "{}", message);
    }

    #[test]
    fn test_convergence_failure_is_reported() {
        let dist = StudentsTCdf::new(50.0).unwrap().with_max_iterations(1);
        assert_eq!(
            dist.cdf(-1.3),
            Err(StatsError::NumericalConvergence { iterations: 1 })
        );
    }

    #[test]
    fn test_incomplete_beta_edges() {
        assert_eq!(regularized_incomplete_beta(2.0, 3.0, 0.0).unwrap(), 0.0);
        assert_eq!(regularized_incomplete_beta(2.0, 3.0, 1.0).unwrap(), 1.0);
        // I_x(1, 1) is the uniform CDF
        assert_relative_eq!(regularized_incomplete_beta(1.0, 1.0, 0.3).unwrap(), 0.3, epsilon = 1e-14);
        assert!(regularized_incomplete_beta(0.0, 1.0, 0.5).is_err());
        assert!(regularized_incomplete_beta(1.0, 1.0, 1.5).is_err());
    }
}
