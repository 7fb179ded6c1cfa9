//! Demographic comparisons over a [`SentimentTable`].

use crate::dataset::demographics::Demographic;
use crate::dataset::sentiment::{GroupSamples, ScoreColumn, SentimentTable};
use crate::error::Result;
use crate::testing::correction::Correction;
use crate::testing::effect::hedges_g;
use crate::testing::inference::MatrixStatTests;
use crate::testing::inference::parametric::welch_t_test;
use crate::testing::{Alternative, MultipleTestResults, SignificanceLevel, TestResult};
use rayon::prelude::*;
use tracing::{info, warn};

/// Outcome of one Welch's t-test between the two groups of a demographic.
#[derive(Debug, Clone)]
pub struct GroupComparison {
    pub samples: GroupSamples,
    pub result: TestResult<f64>,
    pub alpha: SignificanceLevel,
    /// Whether the hypothesis of equal means is rejected at `alpha`
    pub reject: bool,
}

impl GroupComparison {
    fn new(samples: GroupSamples, result: TestResult<f64>, alpha: SignificanceLevel) -> Self {
        let reject = result.is_significant(alpha.value());
        GroupComparison {
            samples,
            result,
            alpha,
            reject,
        }
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.samples.demographic, self.samples.column)
    }

    /// The decision phrased as the question it answers.
    pub fn summary(&self) -> String {
        let group_names = match self.samples.demographic {
            Demographic::Race => "black names and white names",
            Demographic::Gender => "male names and female names",
        };
        format!(
            "At an alpha level of {}, can we reject the hypothesis that {} have the same mean {} sentiment score: {}",
            self.alpha.value(),
            group_names,
            self.samples.column,
            self.reject
        )
    }
}

/// Compare one score column between the two groups of `demographic`.
pub fn compare_groups(
    table: &SentimentTable,
    demographic: Demographic,
    column: ScoreColumn,
    alpha: SignificanceLevel,
) -> Result<GroupComparison> {
    let samples = table.partition(demographic, column);

    let outcome = welch_t_test(&samples.first, &samples.second, Alternative::TwoSided)
        .and_then(|result| {
            let g = hedges_g(&samples.first, &samples.second)?;
            Ok(result.with_effect_size(g))
        });

    let result = match outcome {
        Ok(result) => result,
        Err(e) => {
            warn!(%demographic, %column, error = %e, "group comparison failed");
            return Err(e.into());
        }
    };

    let comparison = GroupComparison::new(samples, result, alpha);
    info!(
        %demographic,
        %column,
        first = comparison.samples.first.len(),
        second = comparison.samples.second.len(),
        t = comparison.result.statistic,
        p_value = comparison.result.p_value,
        reject = comparison.reject,
        "compared groups"
    );
    Ok(comparison)
}

/// Compare every score column between the two groups of `demographic`.
pub fn compare_demographic(
    table: &SentimentTable,
    demographic: Demographic,
    alpha: SignificanceLevel,
) -> Result<Vec<GroupComparison>> {
    let (first_rows, second_rows) = table.group_indices(demographic);
    let results = match table
        .scores
        .welch_t_test(&first_rows, &second_rows, Alternative::TwoSided)
    {
        Ok(results) => results,
        Err(e) => {
            warn!(
                %demographic,
                first = first_rows.len(),
                second = second_rows.len(),
                error = %e,
                "column-wise group comparison failed"
            );
            return Err(e.into());
        }
    };

    ScoreColumn::ALL
        .into_iter()
        .zip(results)
        .map(|(column, result)| -> Result<GroupComparison> {
            let samples = table.partition(demographic, column);
            let g = match hedges_g(&samples.first, &samples.second) {
                Ok(g) => g,
                Err(e) => {
                    warn!(%demographic, %column, error = %e, "effect size failed");
                    return Err(e.into());
                }
            };
            Ok(GroupComparison::new(samples, result.with_effect_size(g), alpha))
        })
        .collect()
}

/// Compare every (demographic, score column) pair and adjust the resulting
/// family of p-values with `correction`.
pub fn compare_all(
    table: &SentimentTable,
    alpha: SignificanceLevel,
    correction: Correction,
) -> Result<MultipleTestResults<f64>> {
    let per_demographic: Vec<Vec<GroupComparison>> = Demographic::ALL
        .par_iter()
        .map(|&demographic| compare_demographic(table, demographic, alpha))
        .collect::<Result<_>>()?;
    let comparisons: Vec<GroupComparison> = per_demographic.into_iter().flatten().collect();

    let labels = comparisons.iter().map(GroupComparison::label).collect();
    let statistics = comparisons.iter().map(|c| c.result.statistic).collect();
    let p_values: Vec<f64> = comparisons.iter().map(|c| c.result.p_value).collect();
    let effect_sizes = comparisons
        .iter()
        .map(|c| c.result.effect_size.unwrap_or(f64::NAN))
        .collect();

    let adjusted = correction.apply(&p_values)?;

    let results = MultipleTestResults::new(labels, statistics, p_values)
        .with_adjusted_p_values(adjusted)
        .with_effect_sizes(effect_sizes)
        .with_global_metadata("test_type", "welch_t_test")
        .with_global_metadata("correction", correction.name())
        .with_global_metadata("alpha", &alpha.value().to_string());

    info!(
        comparisons = results.len(),
        significant = results.num_significant(alpha.value()),
        correction = correction.name(),
        "compared all demographic groups"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatasetError;
    use crate::error::StatsError;

    // Black names score clearly lower on `positive`; gender makes no difference.
    const SCORED: &str = "\
t,DeShawn,MALE,BLACK,POSITIVE,0.50,0.02,0.10,0.38
t,Jamal,MALE,BLACK,POSITIVE,0.55,0.03,0.12,0.30
t,Imani,FEMALE,BLACK,POSITIVE,0.45,0.01,0.09,0.45
t,Ebony,FEMALE,BLACK,POSITIVE,0.52,0.02,0.11,0.35
t,Jake,MALE,WHITE,POSITIVE,0.90,0.02,0.10,0.38
t,Connor,MALE,WHITE,POSITIVE,0.85,0.03,0.12,0.30
t,Molly,FEMALE,WHITE,POSITIVE,0.95,0.01,0.09,0.45
t,Amy,FEMALE,WHITE,POSITIVE,0.88,0.02,0.11,0.35
";

    fn table() -> SentimentTable {
        SentimentTable::from_reader(SCORED.as_bytes(), false).unwrap()
    }

    #[test]
    fn test_compare_race_rejects() {
        let comparison = compare_groups(
            &table(),
            Demographic::Race,
            ScoreColumn::Positive,
            SignificanceLevel::default(),
        )
        .unwrap();

        assert!(comparison.reject);
        assert!(comparison.result.statistic < 0.0);
        assert!(comparison.result.effect_size.unwrap() < 0.0);
        assert_eq!(comparison.label(), "race/positive");
        assert!(comparison.summary().ends_with(
            "black names and white names have the same mean positive sentiment score: true"
        ));
    }

    #[test]
    fn test_compare_gender_does_not_reject() {
        let comparison = compare_groups(
            &table(),
            Demographic::Gender,
            ScoreColumn::Positive,
            SignificanceLevel::default(),
        )
        .unwrap();

        assert!(!comparison.reject);
        assert!(comparison.summary().contains("At an alpha level of 0.1,"));
    }

    #[test]
    fn test_compare_demographic_covers_all_columns() {
        let comparisons =
            compare_demographic(&table(), Demographic::Race, SignificanceLevel::default()).unwrap();
        assert_eq!(comparisons.len(), 4);
        assert!(comparisons[0].reject);
        // the other columns are identical between the race groups
        for comparison in &comparisons[1..] {
            assert!(!comparison.reject);
            assert!(comparison.result.p_value > 0.99);
        }
    }

    #[test]
    fn test_compare_all_applies_correction() {
        let results = compare_all(&table(), SignificanceLevel::default(), Correction::Bonferroni).unwrap();

        assert_eq!(results.len(), 8);
        assert_eq!(results.labels[0], "race/positive");
        assert_eq!(results.labels[4], "gender/positive");
        assert_eq!(results.significant_indices(0.10), vec![0]);

        let adjusted = results.adjusted_p_values.as_ref().unwrap();
        assert!((adjusted[0] - (results.p_values[0] * 8.0).min(1.0)).abs() < 1e-15);
        assert_eq!(results.global_metadata["correction"], "bonferroni");
    }

    #[test]
    fn test_compare_all_fails_without_partial_family() {
        // a single black row cannot form a sample
        let scored = "\
t,Imani,FEMALE,BLACK,POSITIVE,0.50,0.02,0.10,0.38
t,Jake,MALE,WHITE,POSITIVE,0.90,0.03,0.12,0.30
t,Molly,FEMALE,WHITE,POSITIVE,0.85,0.01,0.09,0.45
";
        let table = SentimentTable::from_reader(scored.as_bytes(), false).unwrap();

        assert!(matches!(
            compare_demographic(&table, Demographic::Race, SignificanceLevel::default()),
            Err(DatasetError::Stats(StatsError::InvalidInput(_)))
        ));
        assert!(matches!(
            compare_all(&table, SignificanceLevel::default(), Correction::Holm),
            Err(DatasetError::Stats(StatsError::InvalidInput(_)))
        ));
    }

    #[test]
    fn test_too_few_rows_is_an_error() {
        let single = "t,Jake,MALE,WHITE,POSITIVE,0.9,0.02,0.1,0.38\nt,Imani,FEMALE,BLACK,POSITIVE,0.5,0.02,0.1,0.38\n";
        let table = SentimentTable::from_reader(single.as_bytes(), false).unwrap();
        let err = compare_groups(
            &table,
            Demographic::Race,
            ScoreColumn::Positive,
            SignificanceLevel::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Stats(StatsError::InvalidInput(_))
        ));
    }
}
