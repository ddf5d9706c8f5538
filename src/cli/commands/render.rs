//! Render command handler
//!
//! Reads assistant messages from files or stdin, renders every visualization
//! block and writes one report per message.

use chat_viz::config::Config;
use chat_viz::core::render::{process_content, Renderer};
use chat_viz::core::report::{reporter_for, ReportContext, ReportFormat, ReportGenerator};
use chat_viz::{error, info, verbose};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const STDIN_NAME: &str = "-";

/// Per-invocation options of the render command
pub struct RenderOptions<'a> {
    /// Explicit output path
    pub output: Option<&'a Path>,
    /// Report format name
    pub format: &'a str,
    /// Explicit report title
    pub title: Option<&'a str>,
}

/// Run the render command; returns false if any input failed.
pub fn run(input_files: &[PathBuf], options: &RenderOptions, config: &Config) -> bool {
    let stdin_only = [PathBuf::from(STDIN_NAME)];
    let inputs = if input_files.is_empty() {
        &stdin_only[..]
    } else {
        input_files
    };

    if options.output.is_some() && inputs.len() > 1 {
        eprintln!("✗ --output can only be used with a single input");
        return false;
    }

    let format = match options.format.parse::<ReportFormat>() {
        Ok(format) => format,
        Err(e) => {
            eprintln!("✗ {e}. Use: markdown, html, or json");
            return false;
        }
    };

    let renderer = Renderer::from_config(&config.render);
    let mut ok = true;
    for input in inputs {
        if let Err(err) = render_one(input, format, options, &renderer, config) {
            error!("Render failed for {}: {err}", input.display());
            eprintln!("{err}");
            ok = false;
        }
    }
    ok
}

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == STDIN_NAME
}

fn read_input(input: &Path) -> Result<String, String> {
    if is_stdin(input) {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| format!("✗ Failed to read stdin: {e}"))?;
        Ok(text)
    } else {
        std::fs::read_to_string(input)
            .map_err(|e| format!("✗ Failed to read {}: {e}", input.display()))
    }
}

fn render_one(
    input: &Path,
    format: ReportFormat,
    options: &RenderOptions,
    renderer: &Renderer,
    config: &Config,
) -> Result<(), String> {
    let text = read_input(input)?;
    let blocks = process_content(&text, renderer);

    let stem = if is_stdin(input) {
        None
    } else {
        input.file_stem().and_then(|stem| stem.to_str())
    };
    let title = options.title.or(stem).unwrap_or("Chat message");
    let source = if is_stdin(input) {
        "stdin".to_string()
    } else {
        input.display().to_string()
    };

    let ctx = ReportContext::new(title, &source, &blocks);
    let reporter = reporter_for(format);
    verbose!(
        "{source}: {} block(s), {} chart(s), {} diagnostic(s)",
        blocks.len(),
        ctx.chart_count(),
        ctx.diagnostic_count()
    );

    let output_path = match (options.output, stem) {
        (Some(output), _) => output.to_path_buf(),
        (None, Some(stem)) => {
            let reports_dir = PathBuf::from(&config.paths.reports_dir);
            std::fs::create_dir_all(&reports_dir).map_err(|e| {
                format!(
                    "✗ Failed to create reports directory {}: {e}",
                    reports_dir.display()
                )
            })?;
            reports_dir.join(format!("{stem}_report.{}", format.extension()))
        }
        (None, None) => {
            let content = reporter
                .render(&ctx)
                .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;
            print!("{content}");
            return Ok(());
        }
    };

    reporter
        .generate(&ctx, &output_path)
        .map_err(|e| format!("✗ Failed to generate {format} report: {e}"))?;

    println!("✓ Report generated: {}", output_path.display());
    info!("Report exported to: {}", output_path.display());
    Ok(())
}
