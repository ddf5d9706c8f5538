//! HTML report generator
//!
//! Produces a single page from the `report.html` askama template. Charts are
//! drawn client-side with Plotly.js; narrative and diagnostics are escaped by
//! the template engine.

use crate::core::render::RenderedBlock;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;
use std::error::Error;
use std::fs;
use std::path::Path;

/// One block, flattened for the template
struct BlockView {
    kind: &'static str,
    text: String,
    figure_json: String,
    severity: String,
    raw: String,
}

impl BlockView {
    fn from_block(block: &RenderedBlock) -> Result<Self, serde_json::Error> {
        let view = match block {
            RenderedBlock::Narrative(text) => Self {
                kind: "narrative",
                text: text.clone(),
                figure_json: String::new(),
                severity: String::new(),
                raw: String::new(),
            },
            RenderedBlock::Chart(figure) => Self {
                kind: "chart",
                text: String::new(),
                figure_json: figure.to_script_json()?,
                severity: String::new(),
                raw: String::new(),
            },
            RenderedBlock::Diagnostic(diagnostic) => Self {
                kind: "diagnostic",
                text: diagnostic.message(),
                figure_json: String::new(),
                severity: diagnostic.severity.to_string(),
                raw: diagnostic.raw.clone().unwrap_or_default(),
            },
        };
        Ok(view)
    }
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportPage<'a> {
    title: &'a str,
    source: &'a str,
    chart_count: usize,
    diagnostic_count: usize,
    blocks: Vec<BlockView>,
}

/// HTML report generator with interactive charts
pub struct HtmlReporter;

impl HtmlReporter {
    /// Create a new HTML reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let html = self.render(ctx)?;
        fs::write(output_path, html)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let blocks = ctx
            .blocks
            .iter()
            .map(BlockView::from_block)
            .collect::<Result<Vec<_>, _>>()?;
        let page = ReportPage {
            title: ctx.title,
            source: ctx.source,
            chart_count: ctx.chart_count(),
            diagnostic_count: ctx.diagnostic_count(),
            blocks,
        };
        Ok(page.render()?)
    }
}
