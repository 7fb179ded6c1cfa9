use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use single_utilities::traits::FloatOps;
use std::collections::HashMap;

pub mod correction;
pub mod effect;
pub mod inference;

pub mod utils;

/// Tail(s) of the t-distribution used to turn a statistic into a p-value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alternative {
    #[default]
    TwoSided,
    /// Mean of the first sample is less than the mean of the second.
    Less,
    /// Mean of the first sample is greater than the mean of the second.
    Greater,
}

/// Significance level of a test, restricted to `(0, 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SignificanceLevel(f64);

impl SignificanceLevel {
    pub const LOWER: f64 = 0.0;
    pub const UPPER: f64 = 0.5;

    pub fn new(alpha: f64) -> StatsResult<Self> {
        // NaN fails both comparisons, so test for the valid range instead
        if alpha > Self::LOWER && alpha <= Self::UPPER {
            Ok(SignificanceLevel(alpha))
        } else {
            Err(StatsError::OutOfRange {
                value: alpha,
                lower: Self::LOWER,
                upper: Self::UPPER,
            })
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for SignificanceLevel {
    fn default() -> Self {
        SignificanceLevel(0.10)
    }
}

impl TryFrom<f64> for SignificanceLevel {
    type Error = StatsError;

    fn try_from(alpha: f64) -> StatsResult<Self> {
        SignificanceLevel::new(alpha)
    }
}

impl From<SignificanceLevel> for f64 {
    fn from(alpha: SignificanceLevel) -> f64 {
        alpha.0
    }
}

#[derive(Debug, Clone)]
pub struct TestResult<T> {
    /// The t-statistic
    pub statistic: T,
    /// The p-value of the test
    pub p_value: T,
    /// Welch–Satterthwaite degrees of freedom
    pub degrees_of_freedom: Option<T>,
    /// Effect size measurement
    pub effect_size: Option<T>,
    /// Standard error of the difference in means
    pub standard_error: Option<T>,
    /// Additional test-specific information
    pub metadata: HashMap<String, T>,
}

impl<T> TestResult<T>
where
    T: FloatOps,
{
    /// Create a new test result with minimal information
    pub fn new(statistic: T, p_value: T) -> Self {
        TestResult {
            statistic,
            p_value,
            degrees_of_freedom: None,
            effect_size: None,
            standard_error: None,
            metadata: HashMap::new(),
        }
    }

    /// Add degrees of freedom to the result
    pub fn with_degrees_of_freedom(mut self, df: T) -> Self {
        self.degrees_of_freedom = Some(df);
        self
    }

    /// Add an effect size to the result
    pub fn with_effect_size(mut self, effect_size: T) -> Self {
        self.effect_size = Some(effect_size);
        self
    }

    /// Add standard error to the result
    pub fn with_standard_error(mut self, se: T) -> Self {
        self.standard_error = Some(se);
        self
    }

    /// Add additional metadata
    pub fn with_metadata(mut self, key: &str, value: T) -> Self {
        self.metadata.insert(key.to_string(), value);
        self
    }

    /// Whether the null hypothesis is rejected at `alpha`
    pub fn is_significant(&self, alpha: T) -> bool {
        self.p_value < alpha
    }
}

/// Results of a family of comparisons run on the same data.
#[derive(Debug, Clone)]
pub struct MultipleTestResults<T> {
    /// Human readable label of each comparison
    pub labels: Vec<String>,
    /// Test statistics for each comparison
    pub statistics: Vec<T>,
    /// Raw (unadjusted) p-values
    pub p_values: Vec<T>,
    /// Adjusted p-values (after multiple testing correction)
    pub adjusted_p_values: Option<Vec<T>>,
    /// Effect sizes (if calculated)
    pub effect_sizes: Option<Vec<T>>,
    /// Global metadata about the run
    pub global_metadata: HashMap<String, String>,
}

impl<T> MultipleTestResults<T>
where
    T: FloatOps,
{
    pub fn new(labels: Vec<String>, statistics: Vec<T>, p_values: Vec<T>) -> Self {
        MultipleTestResults {
            labels,
            statistics,
            p_values,
            adjusted_p_values: None,
            effect_sizes: None,
            global_metadata: HashMap::new(),
        }
    }

    pub fn with_adjusted_p_values(mut self, adjusted_p_values: Vec<T>) -> Self {
        self.adjusted_p_values = Some(adjusted_p_values);
        self
    }

    pub fn with_effect_sizes(mut self, effect_sizes: Vec<T>) -> Self {
        self.effect_sizes = Some(effect_sizes);
        self
    }

    pub fn with_global_metadata(mut self, key: &str, value: &str) -> Self {
        self.global_metadata
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.p_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.p_values.is_empty()
    }

    /// p-values used for decisions: adjusted when a correction was applied
    pub fn decision_p_values(&self) -> &[T] {
        match &self.adjusted_p_values {
            Some(adj_p) => adj_p,
            None => &self.p_values,
        }
    }

    /// Get indices of significant comparisons at the given threshold
    pub fn significant_indices(&self, alpha: T) -> Vec<usize> {
        self.decision_p_values()
            .iter()
            .enumerate()
            .filter_map(|(i, &p)| if p < alpha { Some(i) } else { None })
            .collect()
    }

    pub fn num_significant(&self, alpha: T) -> usize {
        self.significant_indices(alpha).len()
    }

    /// Indices of the `n` comparisons with the smallest p-values
    pub fn top_comparisons(&self, n: usize) -> Vec<usize> {
        let p_values = self.decision_p_values();

        let mut indices: Vec<usize> = (0..p_values.len()).collect();
        indices.sort_by(|&a, &b| {
            p_values[a]
                .partial_cmp(&p_values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        indices.truncate(n);
        indices
    }
}
