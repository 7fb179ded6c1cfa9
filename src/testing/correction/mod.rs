use crate::error::{StatsError, StatsResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Multiple testing correction applied when several group comparisons are
/// run against the same sentiment data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correction {
    /// Report raw p-values
    None,
    Bonferroni,
    Holm,
    #[default]
    BenjaminiHochberg,
}

impl Correction {
    pub fn apply(self, p_values: &[f64]) -> StatsResult<Vec<f64>> {
        match self {
            Correction::None => {
                validate_p_values(p_values)?;
                Ok(p_values.to_vec())
            }
            Correction::Bonferroni => bonferroni_correction(p_values),
            Correction::Holm => holm_bonferroni_correction(p_values),
            Correction::BenjaminiHochberg => benjamini_hochberg_correction(p_values),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Correction::None => "none",
            Correction::Bonferroni => "bonferroni",
            Correction::Holm => "holm",
            Correction::BenjaminiHochberg => "benjamini_hochberg",
        }
    }
}

impl FromStr for Correction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Correction::None),
            "bonferroni" => Ok(Correction::Bonferroni),
            "holm" => Ok(Correction::Holm),
            "benjamini_hochberg" | "bh" | "fdr" => Ok(Correction::BenjaminiHochberg),
            _ => Err(format!("unknown correction {:?}", s)),
        }
    }
}

fn validate_p_values(p_values: &[f64]) -> StatsResult<()> {
    if p_values.is_empty() {
        return Err(StatsError::InvalidInput("Empty p-value array".to_string()));
    }

    for (i, &p) in p_values.iter().enumerate() {
        if !(0.0..=1.0).contains(&p) {
            return Err(StatsError::InvalidInput(format!(
                "Invalid p-value at index {}: {}",
                i, p
            )));
        }
    }
    Ok(())
}

/// Indices of `p_values` in ascending p-value order.
fn ascending_order(p_values: &[f64]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..p_values.len()).collect();
    indices.sort_by(|&a, &b| {
        p_values[a]
            .partial_cmp(&p_values[b])
            .unwrap_or(Ordering::Equal)
    });
    indices
}

/// Apply Bonferroni correction to p-values
///
/// Multiplies each p-value by the number of tests, capping at 1.
pub fn bonferroni_correction(p_values: &[f64]) -> StatsResult<Vec<f64>> {
    validate_p_values(p_values)?;
    let n = p_values.len() as f64;

    Ok(p_values.iter().map(|&p| (p * n).min(1.0)).collect())
}

/// Apply the Holm-Bonferroni step-down procedure
///
/// Controls the family-wise error rate and is uniformly more powerful than
/// plain Bonferroni. Adjusted values are made monotone in the p-value order.
pub fn holm_bonferroni_correction(p_values: &[f64]) -> StatsResult<Vec<f64>> {
    validate_p_values(p_values)?;
    let n = p_values.len();

    let mut adjusted_p_values = vec![0.0; n];
    let mut running_max: f64 = 0.0;

    for (rank, &idx) in ascending_order(p_values).iter().enumerate() {
        let adjustment = (p_values[idx] * (n - rank) as f64).min(1.0);
        running_max = running_max.max(adjustment);
        adjusted_p_values[idx] = running_max;
    }

    Ok(adjusted_p_values)
}

/// Apply the Benjamini-Hochberg procedure controlling the false discovery rate
pub fn benjamini_hochberg_correction(p_values: &[f64]) -> StatsResult<Vec<f64>> {
    validate_p_values(p_values)?;
    let n = p_values.len();
    let order = ascending_order(p_values);

    let mut adjusted_p_values = vec![0.0; n];
    let mut current_min: f64 = 1.0;

    // Process from largest to smallest p-value
    for i in (0..n).rev() {
        let idx = order[i];
        let rank = i + 1;

        let adjustment = (p_values[idx] * n as f64 / rank as f64).min(1.0);
        current_min = adjustment.min(current_min);
        adjusted_p_values[idx] = current_min;
    }

    Ok(adjusted_p_values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_relative_eq(a: &[f64], b: &[f64], epsilon: f64) {
        assert_eq!(a.len(), b.len(), "Vectors have different lengths");
        for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
            if (x - y).abs() > epsilon {
                panic!("Vectors differ at index {}: {} != {}", i, x, y);
            }
        }
    }

    #[test]
    fn test_bonferroni() {
        let p_values = vec![0.01, 0.02, 0.03, 0.1, 0.2];
        let expected = vec![0.05, 0.1, 0.15, 0.5, 1.0];
        let adjusted = bonferroni_correction(&p_values).unwrap();
        assert_vec_relative_eq(&adjusted, &expected, 1e-10);
    }

    #[test]
    fn test_benjamini_hochberg_empty_input() {
        let result = benjamini_hochberg_correction(&[]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Invalid input: Empty p-value array"
        );
    }

    #[test]
    fn test_benjamini_hochberg_invalid_pvalues() {
        let result = benjamini_hochberg_correction(&[0.01, -0.5, 0.03]);
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Invalid p-value at index 1")
        );

        let result = benjamini_hochberg_correction(&[0.01, f64::NAN, 0.03]);
        assert!(result.is_err());
    }

    #[test]
    fn test_benjamini_hochberg_unordered_pvalues() {
        let p_values = vec![0.05, 0.01, 0.1, 0.04, 0.02];
        let expected = vec![0.0625, 0.05, 0.1, 0.0625, 0.05];
        let adjusted = benjamini_hochberg_correction(&p_values).unwrap();
        assert_vec_relative_eq(&adjusted, &expected, 1e-10);
    }

    #[test]
    fn test_benjamini_hochberg_ties() {
        let pvalues = vec![0.1, 0.2, 0.3, 0.4, 0.1];
        let expected = [0.25, 0.3333333333333333, 0.375, 0.4, 0.25];
        let adjusted = benjamini_hochberg_correction(&pvalues).unwrap();
        for (a, e) in adjusted.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *e, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_holm_bonferroni_is_monotone() {
        let p_values = vec![0.01, 0.02, 0.03];
        let expected = vec![0.03, 0.04, 0.04];
        let adjusted = holm_bonferroni_correction(&p_values).unwrap();
        assert_vec_relative_eq(&adjusted, &expected, 1e-10);

        let p_values = vec![0.04, 0.001, 0.5, 0.02];
        let expected = vec![0.08, 0.004, 0.5, 0.06];
        let adjusted = holm_bonferroni_correction(&p_values).unwrap();
        assert_vec_relative_eq(&adjusted, &expected, 1e-10);
    }

    #[test]
    fn test_correction_dispatch() {
        let p_values = [0.01, 0.04];
        assert_eq!(Correction::None.apply(&p_values).unwrap(), vec![0.01, 0.04]);
        assert_vec_relative_eq(
            &Correction::Bonferroni.apply(&p_values).unwrap(),
            &[0.02, 0.08],
            1e-12,
        );
        assert_vec_relative_eq(
            &Correction::BenjaminiHochberg.apply(&p_values).unwrap(),
            &[0.02, 0.04],
            1e-12,
        );
        assert!(Correction::None.apply(&[]).is_err());
        assert_eq!(Correction::default(), Correction::BenjaminiHochberg);
        assert_eq!(Correction::Holm.name(), "holm");
    }

    #[test]
    fn test_correction_from_str() {
        assert_eq!("Holm".parse::<Correction>().unwrap(), Correction::Holm);
        assert_eq!(
            "benjamini-hochberg".parse::<Correction>().unwrap(),
            Correction::BenjaminiHochberg
        );
        assert_eq!("bh".parse::<Correction>().unwrap(), Correction::BenjaminiHochberg);
        assert!("sidak".parse::<Correction>().is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(bonferroni_correction(&[]).is_err());
        assert!(holm_bonferroni_correction(&[]).is_err());

        let invalid_p = vec![-0.1, 0.5, 1.1];
        assert!(bonferroni_correction(&invalid_p).is_err());
        assert!(holm_bonferroni_correction(&invalid_p).is_err());
    }
}
