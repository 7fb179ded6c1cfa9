//! Scored sentiment rows and their partition into two comparison samples.
//!
//! Rows come back from the external sentiment scorer with the layout
//!
//! ```text
//! text, name, gender, race, sentimentScore, positive, mixed, negative, neutral
//! ```
//!
//! where `sentimentScore` is the scorer's overall label and the last four
//! fields are the per-class confidences.

use crate::dataset::demographics::{Demographic, Gender, Race};
use crate::error::{DatasetError, Result};
use crate::testing::utils::group_indices;
use csv::{ReaderBuilder, StringRecord};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

pub const NAME_COLUMN: usize = 1;
pub const LABEL_COLUMN: usize = 4;
/// Index of the first numeric confidence column (`positive`).
pub const FIRST_SCORE_COLUMN: usize = 5;
pub const EXPECTED_FIELDS: usize = 9;

/// Per-class confidence column of a scored row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreColumn {
    #[default]
    Positive,
    Mixed,
    Negative,
    Neutral,
}

impl ScoreColumn {
    pub const ALL: [ScoreColumn; 4] = [
        ScoreColumn::Positive,
        ScoreColumn::Mixed,
        ScoreColumn::Negative,
        ScoreColumn::Neutral,
    ];

    /// Position within the score matrix.
    pub fn offset(self) -> usize {
        match self {
            ScoreColumn::Positive => 0,
            ScoreColumn::Mixed => 1,
            ScoreColumn::Negative => 2,
            ScoreColumn::Neutral => 3,
        }
    }

    /// Index of the column in a scored CSV row.
    pub fn csv_index(self) -> usize {
        FIRST_SCORE_COLUMN + self.offset()
    }

    pub fn name(self) -> &'static str {
        match self {
            ScoreColumn::Positive => "positive",
            ScoreColumn::Mixed => "mixed",
            ScoreColumn::Negative => "negative",
            ScoreColumn::Neutral => "neutral",
        }
    }
}

impl fmt::Display for ScoreColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScoreColumn {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ScoreColumn::ALL
            .into_iter()
            .find(|column| column.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown score column {:?}", s))
    }
}

/// Scores of the two groups of one demographic split.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSamples {
    pub demographic: Demographic,
    pub column: ScoreColumn,
    pub first_label: &'static str,
    pub second_label: &'static str,
    pub first: Vec<f64>,
    pub second: Vec<f64>,
}

/// Parsed scored rows. Scores are stored as an `n × 4` matrix whose columns
/// follow [`ScoreColumn::offset`].
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentTable {
    pub names: Vec<String>,
    pub genders: Vec<Gender>,
    pub races: Vec<Race>,
    pub labels: Vec<String>,
    pub scores: Array2<f64>,
}

impl SentimentTable {
    /// Read scored rows from CSV. When `has_headers` is set the first record
    /// is skipped.
    pub fn from_reader<R: Read>(reader: R, has_headers: bool) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .from_reader(reader);

        let mut names = Vec::new();
        let mut genders = Vec::new();
        let mut races = Vec::new();
        let mut labels = Vec::new();
        let mut flat_scores = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            parse_record(&record, line, &mut flat_scores, &mut genders, &mut races)?;
            names.push(record[NAME_COLUMN].to_string());
            labels.push(record[LABEL_COLUMN].trim().to_string());
        }

        let scores = Array2::from_shape_vec((names.len(), ScoreColumn::ALL.len()), flat_scores)?;

        debug!(rows = names.len(), "parsed sentiment table");

        Ok(SentimentTable {
            names,
            genders,
            races,
            labels,
            scores,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P, has_headers: bool) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let table = Self::from_reader(std::io::BufReader::new(file), has_headers)?;
        info!(rows = table.len(), path = %path.display(), "loaded sentiment scores");
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Row indices of the (first, second) groups of `demographic`.
    pub fn group_indices(&self, demographic: Demographic) -> (Vec<usize>, Vec<usize>) {
        match demographic {
            Demographic::Race => (
                group_indices(&self.races, &Race::Black),
                group_indices(&self.races, &Race::White),
            ),
            Demographic::Gender => (
                group_indices(&self.genders, &Gender::Male),
                group_indices(&self.genders, &Gender::Female),
            ),
        }
    }

    /// Split one score column into the two samples of `demographic`.
    pub fn partition(&self, demographic: Demographic, column: ScoreColumn) -> GroupSamples {
        let (first_rows, second_rows) = self.group_indices(demographic);
        let scores = self.scores.column(column.offset());
        let (first_label, second_label) = demographic.group_labels();

        GroupSamples {
            demographic,
            column,
            first_label,
            second_label,
            first: first_rows.iter().map(|&row| scores[row]).collect(),
            second: second_rows.iter().map(|&row| scores[row]).collect(),
        }
    }

    /// Scores of black-sounding names (first) and white-sounding names (second).
    pub fn black_vs_white(&self, column: ScoreColumn) -> GroupSamples {
        self.partition(Demographic::Race, column)
    }

    /// Scores of male names (first) and female names (second).
    pub fn male_vs_female(&self, column: ScoreColumn) -> GroupSamples {
        self.partition(Demographic::Gender, column)
    }
}

fn parse_record(
    record: &StringRecord,
    line: u64,
    flat_scores: &mut Vec<f64>,
    genders: &mut Vec<Gender>,
    races: &mut Vec<Race>,
) -> Result<()> {
    if record.len() < EXPECTED_FIELDS {
        return Err(DatasetError::MalformedRow {
            line,
            expected: EXPECTED_FIELDS,
            actual: record.len(),
        });
    }

    let gender = record[Demographic::Gender.label_column()]
        .parse::<Gender>()
        .map_err(|e| DatasetError::UnknownLabel {
            line,
            kind: e.kind,
            value: e.value,
        })?;
    let race = record[Demographic::Race.label_column()]
        .parse::<Race>()
        .map_err(|e| DatasetError::UnknownLabel {
            line,
            kind: e.kind,
            value: e.value,
        })?;

    for column in ScoreColumn::ALL {
        let index = column.csv_index();
        let raw = record[index].trim();
        let value = raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DatasetError::InvalidScore {
                line,
                column: index,
                value: raw.to_string(),
            })?;
        flat_scores.push(value);
    }

    genders.push(gender);
    races.push(race);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCORED: &str = "\
Jamal lived here.,Jamal,MALE,BLACK,POSITIVE,0.61,0.01,0.08,0.30
Emma lived here.,Emma,FEMALE,WHITE,NEUTRAL,0.42,0.02,0.06,0.50
Imani lived here.,Imani,FEMALE,BLACK,POSITIVE,0.55,0.03,0.02,0.40
Jake lived here.,Jake,MALE,WHITE,POSITIVE,0.70,0.01,0.04,0.25
";

    #[test]
    fn test_parse_without_headers() {
        let table = SentimentTable::from_reader(SCORED.as_bytes(), false).unwrap();
        assert_eq!(table.len(), 4);
        assert_eq!(table.names[2], "Imani");
        assert_eq!(table.labels[1], "NEUTRAL");
        assert_eq!(table.scores.dim(), (4, 4));
        assert_eq!(table.scores[[3, ScoreColumn::Neutral.offset()]], 0.25);
    }

    #[test]
    fn test_parse_with_headers() {
        let with_header = format!(
            "text,name,gender,race,sentimentScore,positive,mixed,negative,neutral\n{}",
            SCORED
        );
        let table = SentimentTable::from_reader(with_header.as_bytes(), true).unwrap();
        assert_eq!(table.len(), 4);

        // without the flag the header row is a label error
        let err = SentimentTable::from_reader(with_header.as_bytes(), false).unwrap_err();
        assert!(matches!(err, DatasetError::UnknownLabel { line: 1, .. }));
    }

    #[test]
    fn test_partition_by_race_and_gender() {
        let table = SentimentTable::from_reader(SCORED.as_bytes(), false).unwrap();

        let race = table.black_vs_white(ScoreColumn::Positive);
        assert_eq!(race.first_label, "BLACK");
        assert_eq!(race.first, vec![0.61, 0.55]);
        assert_eq!(race.second, vec![0.42, 0.70]);

        let gender = table.male_vs_female(ScoreColumn::Neutral);
        assert_eq!(gender.first_label, "MALE");
        assert_eq!(gender.first, vec![0.30, 0.25]);
        assert_eq!(gender.second, vec![0.50, 0.40]);
    }

    #[test]
    fn test_malformed_rows() {
        let short = "Jamal lived here.,Jamal,MALE,BLACK,POSITIVE,0.61\n";
        assert!(matches!(
            SentimentTable::from_reader(short.as_bytes(), false),
            Err(DatasetError::MalformedRow { expected: 9, actual: 6, .. })
        ));

        let bad_score = "a,b,MALE,BLACK,POSITIVE,high,0.1,0.1,0.1\n";
        assert!(matches!(
            SentimentTable::from_reader(bad_score.as_bytes(), false),
            Err(DatasetError::InvalidScore { column: 5, .. })
        ));

        let bad_label = "a,b,MALE,PURPLE,POSITIVE,0.5,0.1,0.1,0.1\n";
        assert!(matches!(
            SentimentTable::from_reader(bad_label.as_bytes(), false),
            Err(DatasetError::UnknownLabel { kind: "race", .. })
        ));
    }

    #[test]
    fn test_score_column_names() {
        assert_eq!("Negative".parse::<ScoreColumn>().unwrap(), ScoreColumn::Negative);
        assert!("sentiment".parse::<ScoreColumn>().is_err());
        assert_eq!(ScoreColumn::Positive.csv_index(), 5);
        assert_eq!(ScoreColumn::Neutral.csv_index(), 8);
    }

    #[test]
    fn test_empty_input() {
        let table = SentimentTable::from_reader("".as_bytes(), false).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.scores.dim(), (0, 4));
    }
}
