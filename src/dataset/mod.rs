//! Synthetic sample generation and scored-sample parsing.
//!
//! ## Workflow
//!
//! 1. [`passage::PassageConfig::generate_rows`] personalizes the starter passage
//!    for every name, and [`report::write_report`] exports the rows for an
//!    external sentiment scorer.
//! 2. The scorer's output is read back with
//!    [`sentiment::SentimentTable::from_reader`] and split into two samples per
//!    demographic with [`sentiment::SentimentTable::partition`].

pub mod demographics;
pub mod passage;
pub mod report;
pub mod sentiment;

pub use demographics::{Demographic, Gender, Race};
pub use passage::{PassageConfig, SampleRow};
pub use sentiment::{GroupSamples, ScoreColumn, SentimentTable};
