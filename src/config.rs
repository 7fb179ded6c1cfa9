//! Run configuration, loadable from TOML.
//!
//! ```toml
//! alpha = 0.05
//! column = "positive"
//! correction = "holm"
//! has_headers = true
//!
//! [passage]
//! placeholder = "Arthur"
//!
//! [passage.names]
//! white_men = ["Jake", "Connor"]
//! ```
//!
//! Every key is optional; missing keys fall back to [`AnalysisConfig::default`].

use crate::dataset::passage::PassageConfig;
use crate::dataset::sentiment::ScoreColumn;
use crate::error::Result;
use crate::testing::SignificanceLevel;
use crate::testing::correction::Correction;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance level of every decision, in `(0, 0.5]`
    pub alpha: SignificanceLevel,
    /// Score column compared by the single-column analysis
    pub column: ScoreColumn,
    /// Correction applied when all columns are compared at once
    pub correction: Correction,
    /// Whether the scored CSV starts with a header row
    pub has_headers: bool,
    pub passage: PassageConfig,
}

impl AnalysisConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
