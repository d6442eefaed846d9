use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::eval::{CorpusMetrics, MetricsSummary};

/// Display settings for text reports
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Digits after the decimal point for scores
    pub decimals: usize,
    /// List the false negatives and false positives instead of only counting them
    pub show_differences: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            decimals: 2,
            show_differences: false,
        }
    }
}

/// Machine-readable evaluation output
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub ground_truth: PathBuf,
    pub evaluated: PathBuf,
    pub granularity: String,
    pub generated_at: String,
    pub summary: MetricsSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CorpusMetrics>,
}

impl EvaluationReport {
    /// Wrap `metrics`; the difference sets are kept only when requested
    pub fn new(
        ground_truth: &Path,
        evaluated: &Path,
        granularity: &str,
        metrics: CorpusMetrics,
        keep_differences: bool,
    ) -> Self {
        Self {
            ground_truth: ground_truth.to_path_buf(),
            evaluated: evaluated.to_path_buf(),
            granularity: granularity.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary: metrics.summary(),
            metrics: keep_differences.then_some(metrics),
        }
    }
}

/// Write any serializable value as pretty JSON
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    serde_json::to_writer_pretty(file, value).context("Failed to write JSON")?;
    Ok(())
}

/// Write a text report
pub fn write_text(text: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create file: {:?}", path))?;
    writeln!(file, "{}", text)?;
    Ok(())
}

/// Format metrics as a short text report
pub fn render_metrics(metrics: &CorpusMetrics, config: &ReportConfig) -> String {
    let summary = metrics.summary();
    let digits = config.decimals;
    let mut output = String::new();

    output.push_str(&format!("Precision\t\t: {:.*}\n", digits, summary.precision));
    output.push_str(&format!("Recall\t\t\t: {:.*}\n", digits, summary.recall));
    output.push_str(&format!("F1 Score\t\t: {:.*}\n", digits, summary.f1));

    if config.show_differences {
        let (false_negatives, false_positives) = metrics.differences();
        output.push_str("\nFalse Negatives:\n");
        for item in &false_negatives {
            output.push_str(&format!("  {}\n", item));
        }
        output.push_str("\nFalse Positives:\n");
        for item in &false_positives {
            output.push_str(&format!("  {}\n", item));
        }
    } else {
        output.push_str(&format!("\nFalse Negatives: {}\n", summary.false_negatives));
        output.push_str(&format!("False Positives: {}\n", summary.false_positives));
    }

    output
}
