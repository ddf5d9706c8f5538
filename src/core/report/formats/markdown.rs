//! Markdown report generator
//!
//! Narrative passes through verbatim. Charts become fenced `json` blocks
//! holding the Plotly figure, and diagnostics become block quotes followed by
//! the offending markup when there is any.

use crate::core::render::{Diagnostic, RenderedBlock, Severity};
use crate::core::report::{ReportContext, ReportGenerator};
use std::error::Error;
use std::fmt::Write;
use std::fs;
use std::path::Path;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/report.md");

/// Markdown report generator
pub struct MarkdownReporter;

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report using template substitution
    fn render_template(ctx: &ReportContext) -> Result<String, serde_json::Error> {
        let body = Self::generate_body(ctx)?;
        Ok(MARKDOWN_TEMPLATE
            .replace("{{title}}", ctx.title)
            .replace("{{source}}", ctx.source)
            .replace("{{chart_count}}", &ctx.chart_count().to_string())
            .replace("{{diagnostic_count}}", &ctx.diagnostic_count().to_string())
            .replace("{{body}}", body.trim_end()))
    }

    fn generate_body(ctx: &ReportContext) -> Result<String, serde_json::Error> {
        let mut body = String::new();
        for block in ctx.blocks {
            match block {
                RenderedBlock::Narrative(text) => {
                    let _ = writeln!(body, "{text}\n");
                }
                RenderedBlock::Chart(figure) => {
                    let json = serde_json::to_string_pretty(figure)?;
                    let fence = fence_for(&json);
                    let _ = writeln!(body, "{fence}json\n{json}\n{fence}\n");
                }
                RenderedBlock::Diagnostic(diagnostic) => {
                    body.push_str(&Self::generate_diagnostic(diagnostic));
                }
            }
        }
        Ok(body)
    }

    fn generate_diagnostic(diagnostic: &Diagnostic) -> String {
        let icon = match diagnostic.severity {
            Severity::Warning => "⚠️",
            Severity::Error => "❌",
        };
        let mut out = format!("> {icon} {}\n\n", diagnostic.message());
        if let Some(raw) = &diagnostic.raw {
            let fence = fence_for(raw);
            let _ = writeln!(out, "{fence}xml\n{raw}\n{fence}\n");
        }
        out
    }
}

/// Backtick fence longer than any backtick run inside `content`
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        let report_content = self.render(ctx)?;
        fs::write(output_path, report_content)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        Ok(Self::render_template(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{process_content, RenderError, Renderer};

    #[test]
    fn test_chart_is_fenced_json() {
        let blocks = process_content(
            "Sales:\n<visualization type=\"bar\"><data><item><x>A</x><y>1</y></item></data></visualization>",
            &Renderer::default(),
        );
        let ctx = ReportContext::new("Report", "stdin", &blocks);
        let md = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(md.starts_with("# Report"));
        assert!(md.contains("Sales:"));
        assert!(md.contains("```json\n{"));
        assert!(md.contains("\"type\": \"bar\""));
        assert!(md.contains("1 chart(s), 0 diagnostic(s)"));
    }

    #[test]
    fn test_diagnostic_quotes_raw_markup() {
        let blocks = vec![RenderedBlock::Diagnostic(
            Diagnostic::new(RenderError::MalformedBlock).with_raw("<visualization type=\"x\">"),
        )];
        let ctx = ReportContext::new("R", "stdin", &blocks);
        let md = MarkdownReporter::new().render(&ctx).unwrap();

        assert!(md.contains("> ⚠️ Malformed visualization XML block detected."));
        assert!(md.contains("```xml\n<visualization type=\"x\">\n```"));
    }

    #[test]
    fn test_fence_outgrows_inner_backticks() {
        assert_eq!(fence_for("plain"), "```");
        assert_eq!(fence_for("a ``` b"), "````");
        assert_eq!(fence_for("`````"), "``````");
    }

    #[test]
    fn test_raw_with_code_fence_stays_enclosed() {
        let blocks = process_content(
            "intro <visualization type=\"bar\"><data>\n```python\nprint(1)\n```\nafter text",
            &Renderer::default(),
        );
        let ctx = ReportContext::new("R", "stdin", &blocks);
        let md = MarkdownReporter::new().render(&ctx).unwrap();

        let fences: Vec<&str> = md
            .lines()
            .filter(|line| line.starts_with("````"))
            .collect();
        assert_eq!(fences, ["````xml", "````"]);
        let closing = md.rfind("\n````").unwrap();
        assert!(md.find("after text").unwrap() < closing);
        assert!(md.trim_end().ends_with("````"));
    }
}
