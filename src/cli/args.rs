//! Command line argument parsing for the textcluster CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pipeline::PipelineConfig;

/// textcluster - group the rows of a table by their free-text column
#[derive(Parser, Debug, Clone)]
#[command(name = "textcluster")]
#[command(about = "Group the rows of a CSV/TSV/JSONL file into clusters by a text column")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TextClusterArgs {
    /// Verbosity level (-v warn, -vv info, -vvv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl TextClusterArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cluster the rows of a dataset and write the report
    Cluster(ClusterArgs),

    /// Show the vocabulary built from a dataset's text column
    Vocabulary(VocabularyArgs),
}

/// Arguments for clustering a dataset
#[derive(Parser, Debug, Clone)]
pub struct ClusterArgs {
    /// Input file (.csv, .tsv, .jsonl or .ndjson)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column holding the free text
    #[arg(short, long, env = "TEXTCLUSTER_COLUMN")]
    pub column: Option<String>,

    /// Number of clusters
    #[arg(short = 'k', long, env = "TEXTCLUSTER_CLUSTERS")]
    pub clusters: Option<usize>,

    /// Keywords reported per cluster
    #[arg(short, long)]
    pub top_keywords: Option<usize>,

    /// Random seed for reproducible clustering
    #[arg(short, long, env = "TEXTCLUSTER_SEED")]
    pub seed: Option<u64>,

    /// Pipeline configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Directory for Clusters.csv, Top_Keywords.csv and Cluster_Report.csv
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write the full report as a JSON file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,

    /// Write the missing-value sentinel into the output instead of empty cells
    #[arg(long)]
    pub fill_missing: bool,

    /// Infer numbers and booleans from CSV cells
    #[arg(long)]
    pub infer_types: bool,

    /// Read common NA spellings in CSV cells (NA, N/A, NaN, None, NULL, ...) as missing
    #[arg(long)]
    pub na_values: bool,
}

impl ClusterArgs {
    /// The pipeline configuration: config file (or defaults) overlaid with
    /// the command line flags.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = load_config(self.config.as_ref())?;
        if let Some(column) = &self.column {
            config.text_field = column.clone();
        }
        if let Some(clusters) = self.clusters {
            config.cluster_count = clusters;
        }
        if let Some(top_keywords) = self.top_keywords {
            config.top_k_keywords = top_keywords;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.fill_missing {
            config.fill_missing_in_output = true;
        }
        Ok(config)
    }
}

/// Arguments for showing the vocabulary
#[derive(Parser, Debug, Clone)]
pub struct VocabularyArgs {
    /// Input file (.csv, .tsv, .jsonl or .ndjson)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Column holding the free text
    #[arg(short, long, env = "TEXTCLUSTER_COLUMN")]
    pub column: Option<String>,

    /// Pipeline configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Maximum number of terms to print
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Read common NA spellings in CSV cells (NA, N/A, NaN, None, NULL, ...) as missing
    #[arg(long)]
    pub na_values: bool,
}

impl VocabularyArgs {
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = load_config(self.config.as_ref())?;
        if let Some(column) = &self.column {
            config.text_field = column.clone();
        }
        // The vocabulary does not depend on the cluster count.
        config.cluster_count = 1;
        Ok(config)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_json_file(path),
        None => Ok(PipelineConfig::default()),
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_command() {
        let args = TextClusterArgs::try_parse_from([
            "textcluster",
            "cluster",
            "reviews.csv",
            "--column",
            "review",
            "-k",
            "4",
            "--seed",
            "42",
            "--output",
            "out",
        ])
        .unwrap();

        let Command::Cluster(cluster_args) = args.command else {
            panic!("Expected Cluster command");
        };
        assert_eq!(cluster_args.input, PathBuf::from("reviews.csv"));
        assert_eq!(cluster_args.output, Some(PathBuf::from("out")));

        let config = cluster_args.pipeline_config().unwrap();
        assert_eq!(config.text_field, "review");
        assert_eq!(config.cluster_count, 4);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.top_k_keywords, 10);
    }

    #[test]
    fn test_config_file_is_overlaid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"text_field": "body", "cluster_count": 5, "top_k_keywords": 3}"#)
            .unwrap();

        let args = TextClusterArgs::try_parse_from([
            "textcluster",
            "cluster",
            "data.jsonl",
            "--config",
            path.to_str().unwrap(),
            "--top-keywords",
            "7",
        ])
        .unwrap();

        let Command::Cluster(cluster_args) = args.command else {
            panic!("Expected Cluster command");
        };
        let config = cluster_args.pipeline_config().unwrap();
        assert_eq!(config.text_field, "body");
        assert_eq!(config.cluster_count, 5);
        assert_eq!(config.top_k_keywords, 7);
    }

    #[test]
    fn test_vocabulary_command() {
        let args = TextClusterArgs::try_parse_from([
            "textcluster",
            "-f",
            "json",
            "vocabulary",
            "data.csv",
            "--limit",
            "20",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Json);
        let Command::Vocabulary(vocab_args) = args.command else {
            panic!("Expected Vocabulary command");
        };
        assert_eq!(vocab_args.limit, Some(20));
        assert_eq!(vocab_args.pipeline_config().unwrap().cluster_count, 1);
    }

    #[test]
    fn test_verbosity() {
        let args = TextClusterArgs::try_parse_from(["textcluster", "-q", "cluster", "a.csv"]).unwrap();
        assert_eq!(args.verbosity(), 0);

        let args = TextClusterArgs::try_parse_from(["textcluster", "-vv", "cluster", "a.csv"]).unwrap();
        assert_eq!(args.verbosity(), 2);
    }
}
