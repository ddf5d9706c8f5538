//! Report generation for rendered assistant messages
//!
//! A report is the ordered list of rendered blocks for one message, written
//! out as Markdown, a self-contained HTML page with Plotly.js charts, or JSON.

pub mod formats;

use crate::core::render::RenderedBlock;
use std::error::Error;
use std::path::Path;

pub use formats::{HtmlReporter, JsonReporter, MarkdownReporter, ReportFormat};

/// Data context for report generation
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    /// Report heading
    pub title: &'a str,
    /// Where the message came from (file path or `stdin`)
    pub source: &'a str,
    /// Rendered blocks in message order
    pub blocks: &'a [RenderedBlock],
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(title: &'a str, source: &'a str, blocks: &'a [RenderedBlock]) -> Self {
        Self {
            title,
            source,
            blocks,
        }
    }

    /// Number of chart blocks
    #[must_use]
    pub fn chart_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, RenderedBlock::Chart(_)))
            .count()
    }

    /// Number of diagnostic blocks
    #[must_use]
    pub fn diagnostic_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, RenderedBlock::Diagnostic(_)))
            .count()
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate a report to a file
    ///
    /// # Errors
    /// Returns an error if report generation or file writing fails
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>>;

    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if report generation fails
    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>>;
}

/// Reporter for a format
#[must_use]
pub fn reporter_for(format: ReportFormat) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
        ReportFormat::Html => Box::new(HtmlReporter::new()),
        ReportFormat::Json => Box::new(JsonReporter::new()),
    }
}
