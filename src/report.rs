use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;

use crate::metrics::MetricsReport;

/// Rendering of the metrics report.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum OutputFormat {
    Json,
    Text,
}

pub(crate) fn write_report<W: Write>(
    mut writer: W,
    report: &MetricsReport,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report)
                .context("failed to serialize metrics report")?;
            writer
                .write_all(b"\n")
                .context("failed to write metrics report")?;
        }
        OutputFormat::Text => writer
            .write_all(render_text(report).as_bytes())
            .context("failed to write metrics report")?,
    }
    writer.flush().context("failed to flush metrics report")
}

fn render_text(report: &MetricsReport) -> String {
    format!(
        "Average inheritance depth: {}\n\
         Max inheritance depth: {}\n\
         Average override count: {}\n\
         Average field count: {}\n\
         Complexity score: {}\n",
        report.average_inheritance_depth,
        report.max_inheritance_depth,
        report.average_override_count,
        report.average_field_count,
        report.complexity_score,
    )
}
