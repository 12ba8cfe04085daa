//! Output formatting for CLI commands.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, TextClusterArgs};
use crate::error::Result;
use crate::report::ClusterReport;

/// Per-cluster line of a clustering summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterLine {
    pub cluster: usize,
    pub size: usize,
    pub keywords: Vec<String>,
}

/// Result structure for a clustering run.
#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub input: String,
    pub column: String,
    pub documents: usize,
    pub clusters: Vec<ClusterLine>,
    pub inertia: f64,
    pub iterations: usize,
    pub written_files: Vec<String>,
    pub duration_ms: u64,
    pub generated_at: DateTime<Utc>,
}

impl ClusterSummary {
    pub fn new(
        input: &Path,
        column: &str,
        report: &ClusterReport,
        written_files: Vec<PathBuf>,
        duration_ms: u64,
    ) -> Self {
        let clusters = report
            .sizes_by_cluster
            .iter()
            .map(|size| ClusterLine {
                cluster: size.cluster,
                size: size.size,
                keywords: report.keywords(size.cluster).map(<[String]>::to_vec).unwrap_or_default(),
            })
            .collect();

        ClusterSummary {
            input: input.display().to_string(),
            column: column.to_string(),
            documents: report.assignments.len(),
            clusters,
            inertia: report.inertia,
            iterations: report.iterations,
            written_files: written_files.iter().map(|p| p.display().to_string()).collect(),
            duration_ms,
            generated_at: Utc::now(),
        }
    }
}

/// Result structure for the vocabulary command.
#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularySummary {
    pub input: String,
    pub column: String,
    pub documents: usize,
    pub size: usize,
    pub non_zero_entries: usize,
    pub terms: Vec<String>,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self) -> String;
}

impl HumanOutput for ClusterSummary {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str("Cluster Report:\n");
        out.push_str("═══════════════\n");
        out.push_str(&format!("Input: {} (column '{}')\n", self.input, self.column));
        out.push_str(&format!("Documents: {}\n", self.documents));
        out.push_str(&format!(
            "Inertia: {:.4} after {} iterations\n",
            self.inertia, self.iterations
        ));

        for line in &self.clusters {
            out.push('\n');
            out.push_str(&format!("Cluster {} ({} documents)\n", line.cluster, line.size));
            out.push_str("─────────────\n");
            out.push_str(&format!("Keywords: {}\n", line.keywords.join(", ")));
        }

        if !self.written_files.is_empty() {
            out.push_str("\nWritten files:\n");
            for file in &self.written_files {
                out.push_str(&format!("  {file}\n"));
            }
        }
        out.push_str(&format!(
            "\nTime: {}ms (generated {})\n",
            self.duration_ms,
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        out
    }
}

impl HumanOutput for VocabularySummary {
    fn render_human(&self) -> String {
        let mut out = String::new();
        out.push_str("Vocabulary:\n");
        out.push_str("═══════════\n");
        out.push_str(&format!("Input: {} (column '{}')\n", self.input, self.column));
        out.push_str(&format!("Documents: {}\n", self.documents));
        out.push_str(&format!("Terms: {}\n", self.size));
        out.push_str(&format!("Non-zero entries: {}\n", self.non_zero_entries));
        if !self.terms.is_empty() {
            out.push('\n');
            out.push_str(&self.terms.join("\n"));
            out.push('\n');
        }
        out
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &TextClusterArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            print!("{}", result.render_human());
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            println!("{json}");
        }
    }
    Ok(())
}
