//! JSON report generator

use crate::core::render::RenderedBlock;
use crate::core::report::{ReportContext, ReportGenerator};
use serde::Serialize;
use std::error::Error;
use std::fs;
use std::path::Path;

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    source: &'a str,
    blocks: &'a [RenderedBlock],
}

/// Writes the rendered block list as pretty-printed JSON
pub struct JsonReporter;

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<(), Box<dyn Error>> {
        fs::write(output_path, self.render(ctx)?)?;
        Ok(())
    }

    fn render(&self, ctx: &ReportContext) -> Result<String, Box<dyn Error>> {
        let report = JsonReport {
            title: ctx.title,
            source: ctx.source,
            blocks: ctx.blocks,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::{process_content, Renderer};
    use serde_json::Value;

    #[test]
    fn test_blocks_are_tagged() {
        let blocks = process_content(
            "Intro <visualization type=\"nope\"><data><item><a>1</a></item></data></visualization> end",
            &Renderer::default(),
        );
        let ctx = ReportContext::new("T", "msg.txt", &blocks);
        let json: Value = serde_json::from_str(&JsonReporter::new().render(&ctx).unwrap()).unwrap();

        assert_eq!(json["source"], "msg.txt");
        let kinds: Vec<_> = json["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|block| block["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, ["narrative", "diagnostic", "narrative"]);
        assert_eq!(
            json["blocks"][1]["content"]["error"],
            "Unsupported visualization type: nope"
        );
    }
}
