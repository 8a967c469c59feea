//! Report writer implementation

use std::io::Write;

use tracing::debug;

use crate::error::AomKfResult;
use crate::output::{OutputFormat, PredictionReport};

/// Renders a prediction report in the configured format
pub struct ReportWriter {
    format: OutputFormat,
}

impl ReportWriter {
    /// Create a new report writer
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Render the report to a string
    pub fn render(&self, report: &PredictionReport) -> AomKfResult<String> {
        let mut rendered = match self.format {
            OutputFormat::List => format_list(&report.keyframes),
            OutputFormat::Lines => report
                .keyframes
                .iter()
                .map(|k| k.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Flags => format_list(report.flags.as_deref().unwrap_or_default()),
            OutputFormat::Json => {
                return Ok(serde_json::to_string_pretty(report)?);
            }
        };

        if let Some(summary) = &report.summary {
            rendered.push('\n');
            rendered.push_str(summary.generate_summary().trim_end());
        }
        Ok(rendered)
    }

    /// Write the rendered report followed by a newline
    pub fn write_to<W: Write>(&self, report: &PredictionReport, mut out: W) -> AomKfResult<()> {
        debug!("Writing report as {:?}", self.format);
        let rendered = self.render(report)?;
        writeln!(out, "{}", rendered)?;
        out.flush()?;
        Ok(())
    }
}

/// Format values as `[a, b, c]`
fn format_list<T: ToString>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}
