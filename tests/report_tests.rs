//! Integration tests for report generation

use chat_viz::core::render::{process_content, Renderer};
use chat_viz::core::report::{reporter_for, ReportContext, ReportFormat, ReportGenerator};
use std::fs;
use tempfile::TempDir;

const MESSAGE: &str = r#"Here are the regional sales.

<visualization type="bar">
  <data>
    <item><region>North</region><sales>120</sales></item>
    <item><region>South</region><sales>80</sales></item>
  </data>
  <options><title>Sales by region</title></options>
</visualization>

And one the model got wrong:

<visualization type="sparkline"><data><item><a>1</a></item></data></visualization>"#;

fn blocks() -> Vec<chat_viz::core::render::RenderedBlock> {
    process_content(MESSAGE, &Renderer::default())
}

#[test]
fn every_format_writes_a_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let blocks = blocks();
    let ctx = ReportContext::new("Sales", "message.txt", &blocks);

    for format in [ReportFormat::Markdown, ReportFormat::Html, ReportFormat::Json] {
        let path = dir.path().join(format!("message_report.{}", format.extension()));
        reporter_for(format)
            .generate(&ctx, &path)
            .unwrap_or_else(|e| panic!("{format} report failed: {e}"));

        let content = fs::read_to_string(&path).expect("report written");
        assert!(content.contains("Sales by region"), "{format} lost the chart title");
        assert!(
            content.contains("Unsupported visualization type: sparkline"),
            "{format} lost the diagnostic"
        );
    }
}

#[test]
fn markdown_report_keeps_message_order() {
    let blocks = blocks();
    let ctx = ReportContext::new("Sales", "message.txt", &blocks);
    let md = reporter_for(ReportFormat::Markdown).render(&ctx).unwrap();

    let narrative = md.find("Here are the regional sales.").unwrap();
    let chart = md.find("```json").unwrap();
    let second = md.find("And one the model got wrong:").unwrap();
    let warning = md.find("> ⚠️").unwrap();
    assert!(narrative < chart && chart < second && second < warning);
    assert!(md.contains("1 chart(s), 1 diagnostic(s)"));
}

#[test]
fn html_report_is_self_contained_page() {
    let blocks = blocks();
    let ctx = ReportContext::new("Sales", "message.txt", &blocks);
    let html = reporter_for(ReportFormat::Html).render(&ctx).unwrap();

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("cdn.plot.ly"));
    assert_eq!(html.matches("Plotly.newPlot(").count(), 1);
    assert!(html.contains("class=\"diagnostic warning\""));
}

#[test]
fn json_report_round_trips_through_serde() {
    let blocks = blocks();
    let ctx = ReportContext::new("Sales", "message.txt", &blocks);
    let json = reporter_for(ReportFormat::Json).render(&ctx).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["title"], "Sales");
    assert_eq!(value["blocks"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["blocks"][1]["kind"], "chart");
    assert_eq!(value["blocks"][1]["content"]["data"][0]["x"][0], "North");
}

#[test]
fn empty_message_still_produces_a_report() {
    let blocks = process_content("   ", &Renderer::default());
    assert!(blocks.is_empty());

    let ctx = ReportContext::new("Empty", "stdin", &blocks);
    let md = reporter_for(ReportFormat::Markdown).render(&ctx).unwrap();
    assert!(md.contains("0 chart(s), 0 diagnostic(s)"));
}
