use anyhow::Context;
use clap::{Parser, Subcommand};
use sentiment_bias_statistics::analysis::{compare_all, compare_groups};
use sentiment_bias_statistics::config::AnalysisConfig;
use sentiment_bias_statistics::dataset::report::write_report_file;
use sentiment_bias_statistics::dataset::{Demographic, ScoreColumn, SentimentTable};
use sentiment_bias_statistics::testing::SignificanceLevel;
use sentiment_bias_statistics::testing::correction::Correction;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "sentiment-bias")]
#[command(about = "Generate name-substituted passages and test sentiment scores for demographic bias")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the personalized passages as CSV for sentiment scoring
    Generate {
        /// Destination CSV file
        #[arg(short, long, default_value = "text_and_identifiers.csv")]
        output: PathBuf,
    },
    /// Compare scored sentiment between demographic groups
    Analyze {
        /// Scored CSV file
        #[arg(short, long, default_value = "final.csv")]
        input: PathBuf,
        /// Significance level in (0, 0.5]
        #[arg(short, long)]
        alpha: Option<f64>,
        /// Score column to compare (positive, mixed, negative, neutral)
        #[arg(long)]
        column: Option<ScoreColumn>,
        /// The scored CSV starts with a header row
        #[arg(long)]
        headers: bool,
        /// Compare every score column and apply multiple testing correction
        #[arg(long)]
        all: bool,
        /// Correction used with --all (none, bonferroni, holm, benjamini_hochberg)
        #[arg(long)]
        correction: Option<Correction>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    match cli.command {
        Commands::Generate { output } => generate(&config, &output),
        Commands::Analyze {
            input,
            alpha,
            column,
            headers,
            all,
            correction,
        } => {
            let mut config = config;
            if let Some(alpha) = alpha {
                config.alpha = SignificanceLevel::new(alpha)?;
            }
            if let Some(column) = column {
                config.column = column;
            }
            if let Some(correction) = correction {
                config.correction = correction;
            }
            config.has_headers |= headers;
            analyze(&config, &input, all)
        }
    }
}

fn generate(config: &AnalysisConfig, output: &Path) -> anyhow::Result<()> {
    let rows = config.passage.generate_rows();
    write_report_file(&rows, output)
        .with_context(|| format!("failed to write report {}", output.display()))?;
    println!("Wrote {} samples to {}", rows.len(), output.display());
    Ok(())
}

fn analyze(config: &AnalysisConfig, input: &Path, all: bool) -> anyhow::Result<()> {
    let table = SentimentTable::from_path(input, config.has_headers)
        .with_context(|| format!("failed to read scores from {}", input.display()))?;
    info!(rows = table.len(), alpha = config.alpha.value(), "analyzing sentiment scores");

    if all {
        let results = compare_all(&table, config.alpha, config.correction)?;
        let adjusted = results.decision_p_values();
        println!(
            "{:<18} {:>10} {:>12} {:>12} {:>8}",
            "comparison", "t", "p", "adjusted p", "reject"
        );
        for i in 0..results.len() {
            println!(
                "{:<18} {:>10.4} {:>12.3e} {:>12.3e} {:>8}",
                results.labels[i],
                results.statistics[i],
                results.p_values[i],
                adjusted[i],
                adjusted[i] < config.alpha.value()
            );
        }
        return Ok(());
    }

    for demographic in Demographic::ALL {
        let comparison = compare_groups(&table, demographic, config.column, config.alpha)?;
        println!("{}", comparison.summary());
        println!();
    }
    Ok(())
}
