//! Closed demographic label sets.
//!
//! Only the categories present in the source name lists are represented:
//! two races and two genders. Non-binary genders and other races are not
//! expressed in the data, and parsing any other label is an error rather
//! than a silent fallback.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Race {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Male,
    Female,
}

/// Label that does not name a known category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} label {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseLabelError {}

impl Race {
    pub const ALL: [Race; 2] = [Race::White, Race::Black];

    pub fn as_str(self) -> &'static str {
        match self {
            Race::White => "WHITE",
            Race::Black => "BLACK",
        }
    }
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Race {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WHITE" => Ok(Race::White),
            "BLACK" => Ok(Race::Black),
            _ => Err(ParseLabelError {
                kind: "race",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for Gender {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            _ => Err(ParseLabelError {
                kind: "gender",
                value: s.to_string(),
            }),
        }
    }
}

/// Demographic axis along which scores are split into two samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Demographic {
    /// Black-sounding names (first sample) vs white-sounding names (second sample)
    Race,
    /// Male names (first sample) vs female names (second sample)
    Gender,
}

impl Demographic {
    pub const ALL: [Demographic; 2] = [Demographic::Race, Demographic::Gender];

    /// Index of the label column in a scored sentiment row.
    pub fn label_column(self) -> usize {
        match self {
            Demographic::Race => 3,
            Demographic::Gender => 2,
        }
    }

    /// Labels of the (first, second) groups, in comparison order.
    pub fn group_labels(self) -> (&'static str, &'static str) {
        match self {
            Demographic::Race => (Race::Black.as_str(), Race::White.as_str()),
            Demographic::Gender => (Gender::Male.as_str(), Gender::Female.as_str()),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Demographic::Race => "race",
            Demographic::Gender => "gender",
        }
    }
}

impl fmt::Display for Demographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
