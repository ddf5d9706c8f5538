//! Report format implementations
//!
//! Provides exporters for different report formats: Markdown, HTML, and JSON.

pub mod html;
pub mod json;
pub mod markdown;

pub use html::HtmlReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;

use std::fmt;
use std::str::FromStr;

/// Supported report formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Markdown with charts as fenced JSON blocks
    Markdown,
    /// HTML page with Plotly.js charts
    Html,
    /// Rendered block list as JSON
    Json,
}

impl ReportFormat {
    /// Get the file extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "md" | "markdown" => Ok(Self::Markdown),
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown report format: {s}")),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Markdown => write!(f, "markdown"),
            Self::Html => write!(f, "html"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_aliases() {
        assert_eq!("MD".parse::<ReportFormat>(), Ok(ReportFormat::Markdown));
        assert_eq!("htm".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert!("pdf".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Markdown.to_string(), "markdown");
    }
}
