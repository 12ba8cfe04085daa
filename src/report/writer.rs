//! Report output: a directory of three CSV files, or one JSON document.
//!
//! The CSV files mirror the three report views:
//!
//! | File | Content |
//! |---|---|
//! | `Clusters.csv` | every input row plus its label column |
//! | `Top_Keywords.csv` | one row of keywords per cluster |
//! | `Cluster_Report.csv` | member count per cluster |

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::assembler::ClusterReport;

pub const CLUSTERS_FILE: &str = "Clusters.csv";
pub const TOP_KEYWORDS_FILE: &str = "Top_Keywords.csv";
pub const CLUSTER_REPORT_FILE: &str = "Cluster_Report.csv";

/// Output container for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// A directory holding the three CSV files.
    #[default]
    CsvDirectory,
    /// A single pretty-printed JSON file.
    Json,
}

/// Writes a [`ClusterReport`] to disk or to any writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    format: ReportFormat,
}

impl ReportWriter {
    pub fn new(format: ReportFormat) -> Self {
        ReportWriter { format }
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Write the report to `path` (a directory or a file, by format).
    /// Returns the files written.
    pub fn write<P: AsRef<Path>>(&self, report: &ClusterReport, path: P) -> Result<Vec<PathBuf>> {
        match self.format {
            ReportFormat::CsvDirectory => Self::write_csv_dir(report, path),
            ReportFormat::Json => {
                Self::write_json_file(report, path.as_ref())?;
                Ok(vec![path.as_ref().to_path_buf()])
            }
        }
    }

    /// Write the three CSV files into `dir`, creating it if needed.
    pub fn write_csv_dir<P: AsRef<Path>>(report: &ClusterReport, dir: P) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let clusters = dir.join(CLUSTERS_FILE);
        Self::write_clusters(report, BufWriter::new(File::create(&clusters)?))?;

        let keywords = dir.join(TOP_KEYWORDS_FILE);
        Self::write_keywords(report, BufWriter::new(File::create(&keywords)?))?;

        let sizes = dir.join(CLUSTER_REPORT_FILE);
        Self::write_sizes(report, BufWriter::new(File::create(&sizes)?))?;

        info!("wrote cluster report to {}", dir.display());
        Ok(vec![clusters, keywords, sizes])
    }

    /// Write the report as pretty-printed JSON.
    pub fn write_json_file(report: &ClusterReport, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        info!("wrote cluster report to {}", path.display());
        Ok(())
    }

    /// Input rows plus the label column. Missing values are empty cells.
    pub fn write_clusters<W: Write>(report: &ClusterReport, output: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(output);
        writer.write_record(report.output_columns())?;

        for assignment in &report.assignments {
            let mut record: Vec<String> = assignment
                .values
                .iter()
                .map(|v| v.as_ref().map(ToString::to_string).unwrap_or_default())
                .collect();
            record.push(assignment.cluster.to_string());
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// One row per cluster: label then keywords, padded to equal width.
    pub fn write_keywords<W: Write>(report: &ClusterReport, output: W) -> Result<()> {
        let width = report
            .keywords_by_cluster
            .iter()
            .map(|k| k.keywords.len())
            .max()
            .unwrap_or(0);

        let mut writer = csv::Writer::from_writer(output);
        let header: Vec<String> = std::iter::once(report.label_field.clone())
            .chain((1..=width).map(|i| format!("keyword_{i}")))
            .collect();
        writer.write_record(&header)?;

        for list in &report.keywords_by_cluster {
            let mut record = Vec::with_capacity(width + 1);
            record.push(list.cluster.to_string());
            record.extend(list.keywords.iter().cloned());
            record.resize(width + 1, String::new());
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Member count per cluster.
    pub fn write_sizes<W: Write>(report: &ClusterReport, output: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(output);
        writer.write_record([report.label_field.as_str(), "size"])?;
        for size in &report.sizes_by_cluster {
            writer.write_record([size.cluster.to_string(), size.size.to_string()])?;
        }
        writer.flush()?;
        Ok(())
    }
}
