//! Command implementations for the textcluster CLI.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::debug;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::document::Dataset;
use crate::document::converter::{CsvDatasetReader, read_dataset_with};
use crate::error::Result;
use crate::pipeline::ClusteringPipeline;
use crate::report::{ReportFormat, ReportWriter};

/// Execute a CLI command.
pub fn execute_command(args: TextClusterArgs) -> Result<()> {
    match &args.command {
        Command::Cluster(cluster_args) => cluster_dataset(cluster_args, &args),
        Command::Vocabulary(vocab_args) => show_vocabulary(vocab_args, &args),
    }
}

/// Cluster a dataset file and write the requested outputs.
fn cluster_dataset(args: &ClusterArgs, cli_args: &TextClusterArgs) -> Result<()> {
    let start = Instant::now();
    let config = args.pipeline_config()?;
    let pipeline = ClusteringPipeline::new(config)?;

    let dataset = load_dataset(&args.input, args.infer_types, args.na_values)?;
    debug!(
        "read {} rows with columns {:?} from {}",
        dataset.len(),
        dataset.columns(),
        args.input.display()
    );

    let report = pipeline.run(&dataset)?;

    let mut written_files = Vec::new();
    if let Some(dir) = &args.output {
        let files = ReportWriter::new(ReportFormat::CsvDirectory)
            .write(&report, dir)
            .with_context(|| format!("failed to write report to {}", dir.display()))?;
        written_files.extend(files);
    }
    if let Some(path) = &args.json_output {
        let files = ReportWriter::new(ReportFormat::Json)
            .write(&report, path)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        written_files.extend(files);
    }

    let summary = ClusterSummary::new(
        &args.input,
        &pipeline.config().text_field,
        &report,
        written_files,
        start.elapsed().as_millis() as u64,
    );
    output_result("Clustering completed", &summary, cli_args)
}

/// Print the vocabulary of a dataset's text column.
fn show_vocabulary(args: &VocabularyArgs, cli_args: &TextClusterArgs) -> Result<()> {
    let config = args.pipeline_config()?;
    let pipeline = ClusteringPipeline::new(config)?;

    let dataset = load_dataset(&args.input, false, args.na_values)?;
    let (vocabulary, matrix) = pipeline.vectorize(&dataset)?;

    let summary = VocabularySummary {
        input: args.input.display().to_string(),
        column: pipeline.config().text_field.clone(),
        documents: matrix.rows(),
        size: vocabulary.len(),
        non_zero_entries: matrix.nnz(),
        terms: vocabulary
            .iter()
            .take(args.limit.unwrap_or(usize::MAX))
            .map(str::to_string)
            .collect(),
    };
    output_result("Vocabulary", &summary, cli_args)
}

fn load_dataset(path: &Path, infer_types: bool, na_values: bool) -> Result<Dataset> {
    let mut delimited = CsvDatasetReader::new().with_type_inference(infer_types);
    if na_values {
        delimited = delimited.with_default_na_values();
    }

    // An unsupported extension is a request error and keeps its kind.
    match read_dataset_with(path, &delimited) {
        Err(e) if e.is_config() => Err(e),
        result => Ok(result.with_context(|| format!("failed to read {}", path.display()))?),
    }
}
