//! # sentiment-bias-statistics
//!
//! Statistical comparison of sentiment scores across demographic groups.
//!
//! A fixed passage is personalized with names that are strongly associated
//! with a race and gender, scored by an external sentiment service, and the
//! resulting confidences are compared between groups with Welch's
//! unequal-variance t-test.
//!
//! ## Core Features
//!
//! - **Welch's t-test**: two-sided p-values and reject decisions without
//!   assuming equal variances, with Welch–Satterthwaite degrees of freedom
//! - **Student's t CDF**: regularized incomplete beta evaluation that reports
//!   non-convergence instead of returning a wrong value
//! - **Multiple Testing Correction**: Bonferroni, Holm and Benjamini-Hochberg
//!   for running every demographic/score combination at once
//! - **Effect Size**: Cohen's d and Hedges' g
//!
//! ## Quick Start
//!
//! ```
//! use sentiment_bias_statistics::testing::inference::parametric::{compute_p_value, reject};
//!
//! let white = [0.9, 0.85, 0.95, 0.88, 0.92];
//! let black = [0.5, 0.55, 0.45, 0.52, 0.48];
//!
//! let p = compute_p_value(&white, &black).unwrap();
//! assert!(p < 0.01);
//! assert!(reject(&white, &black, 0.10).unwrap());
//! ```
//!
//! ## Module Organization
//!
//! - **[`testing`]**: Welch's t-test, the t-distribution, correction and effect sizes
//! - **[`dataset`]**: passage generation, report export and scored-row parsing
//! - **[`analysis`]**: demographic comparisons over a parsed table
//! - **[`config`]**: TOML run configuration

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod testing;

pub use error::{DatasetError, StatsError};
