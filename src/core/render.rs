//! Visualization renderer and the per-message rendering pipeline
//!
//! [`Renderer::render`] turns one directive payload into a [`Figure`] or a
//! [`Diagnostic`]. [`process_content`] runs the splitter and the renderer over
//! a whole assistant message. Nothing here is fatal: every failure becomes a
//! diagnostic reported in place of the block that caused it.

use crate::core::chart::{self, ChartError, Figure};
use crate::core::config::RenderConfig;
use crate::core::markup::VisualizationSpec;
use crate::core::splitter::{split_blocks, ContentBlock};
use crate::core::table::DataTable;
use crate::{debug, warn};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a block could not be rendered as a chart
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Opening tag without a closing tag
    #[error("Malformed visualization XML block detected.")]
    MalformedBlock,
    /// Payload is not well-formed XML
    #[error("Invalid XML format for visualization data: {0}")]
    InvalidMarkup(String),
    /// File directive without a filename, or pointing at a missing path
    #[error("File not found: {0}")]
    MissingFile(String),
    /// File directive pointing at a path that cannot be read
    #[error("File not readable: {path} ({reason})")]
    UnreadableFile {
        /// Path as resolved
        path: String,
        /// I/O error text
        reason: String,
    },
    /// Chain of file directives is deeper than allowed
    #[error("File references nested deeper than {0} level(s)")]
    FileDepthExceeded(usize),
    /// File directive chain loops back onto a file already being rendered
    #[error("File reference cycle detected at: {0}")]
    FileCycle(String),
    /// File directives are turned off in the configuration
    #[error("File visualizations are disabled")]
    FileDirectivesDisabled,
    /// No `data` element or no rows in it
    #[error("No data provided for visualization.")]
    EmptyData,
    /// `type` is not a known chart kind
    #[error("Unsupported visualization type: {0}")]
    UnsupportedType(String),
    /// The chart kind could not be built from the data
    #[error("Error rendering visualization: {0}")]
    Construction(String),
}

impl From<ChartError> for RenderError {
    fn from(err: ChartError) -> Self {
        Self::Construction(err.to_string())
    }
}

impl RenderError {
    /// Severity shown to the user for this error
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Construction(_) => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

/// How prominently a diagnostic is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Recoverable problem with the model's markup
    Warning,
    /// Chart construction failed
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A rendering problem reported in place of a chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// What went wrong
    #[serde(serialize_with = "serialize_display")]
    pub error: RenderError,
    /// Display severity
    pub severity: Severity,
    /// Offending raw text, for operator debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}

fn serialize_display<S: serde::Serializer>(
    error: &RenderError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl Diagnostic {
    /// Diagnostic without raw text
    #[must_use]
    pub fn new(error: RenderError) -> Self {
        let severity = error.severity();
        Self {
            error,
            severity,
            raw: None,
        }
    }

    /// Attach the raw offending text
    #[must_use]
    pub fn with_raw(mut self, raw: &str) -> Self {
        self.raw = Some(raw.to_string());
        self
    }

    /// User-facing message
    #[must_use]
    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.error)
    }
}

/// Outcome of rendering one directive payload
#[derive(Debug, Clone, PartialEq)]
pub enum RenderResult {
    /// Chart ready for display
    Chart(Figure),
    /// Problem to display instead of a chart
    Diagnostic(Diagnostic),
}

impl RenderResult {
    /// The figure, if rendering succeeded
    #[must_use]
    pub const fn figure(&self) -> Option<&Figure> {
        match self {
            Self::Chart(figure) => Some(figure),
            Self::Diagnostic(_) => None,
        }
    }

    /// The diagnostic, if rendering failed
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Self::Chart(_) => None,
            Self::Diagnostic(diagnostic) => Some(diagnostic),
        }
    }
}

impl From<Diagnostic> for RenderResult {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::Diagnostic(diagnostic)
    }
}

/// One displayable block of a rendered message
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum RenderedBlock {
    /// Markdown narrative text
    Narrative(String),
    /// Chart object
    Chart(Figure),
    /// Problem reported in place
    Diagnostic(Diagnostic),
}

impl From<RenderResult> for RenderedBlock {
    fn from(result: RenderResult) -> Self {
        match result {
            RenderResult::Chart(figure) => Self::Chart(figure),
            RenderResult::Diagnostic(diagnostic) => Self::Diagnostic(diagnostic),
        }
    }
}

/// Files being rendered along the current chain of file directives
#[derive(Debug, Default)]
struct FileChain {
    visited: Vec<PathBuf>,
    base_dir: Option<PathBuf>,
}

/// Directive renderer
#[derive(Debug, Clone)]
pub struct Renderer {
    max_file_depth: usize,
    allow_file_directives: bool,
    file_root: Option<PathBuf>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl Renderer {
    /// Renderer with the given settings
    #[must_use]
    pub fn from_config(config: &RenderConfig) -> Self {
        Self {
            max_file_depth: config.max_file_depth,
            allow_file_directives: config.allow_file_directives,
            file_root: (!config.file_root.is_empty()).then(|| PathBuf::from(&config.file_root)),
        }
    }

    /// Set the directory relative file directive paths resolve against
    #[must_use]
    pub fn with_file_root(mut self, root: &Path) -> Self {
        self.file_root = Some(root.to_path_buf());
        self
    }

    /// Set the maximum number of chained file directives
    #[must_use]
    pub const fn with_max_file_depth(mut self, depth: usize) -> Self {
        self.max_file_depth = depth;
        self
    }

    /// Render one directive payload
    ///
    /// # Examples
    /// ```
    /// use chat_viz::core::render::Renderer;
    ///
    /// let payload = r#"<visualization type="bar">
    ///   <data><item><x>A</x><y>10</y></item></data>
    ///   <options><title>T</title></options>
    /// </visualization>"#;
    /// let result = Renderer::default().render(payload);
    /// assert_eq!(result.figure().unwrap().layout.title.text, "T");
    /// ```
    #[must_use]
    pub fn render(&self, payload: &str) -> RenderResult {
        let mut chain = FileChain {
            visited: Vec::new(),
            base_dir: self.file_root.clone(),
        };
        self.render_in(payload, &mut chain)
    }

    fn render_in(&self, payload: &str, chain: &mut FileChain) -> RenderResult {
        let spec = match VisualizationSpec::parse(payload) {
            Ok(spec) => spec,
            Err(err) => return Diagnostic::new(RenderError::InvalidMarkup(err.to_string())).into(),
        };

        if spec.is_file_reference() {
            return self.render_file(&spec, chain);
        }

        let rows = match spec.rows.as_deref() {
            Some(rows) if !rows.is_empty() => rows,
            _ => return Diagnostic::new(RenderError::EmptyData).into(),
        };

        let Some(kind) = chart::lookup(&spec.kind) else {
            return Diagnostic::new(RenderError::UnsupportedType(spec.kind.clone())).into();
        };

        let table = DataTable::from_rows(rows);
        debug!(
            "Building '{}' chart from {} row(s) x {} column(s)",
            kind.name,
            table.len(),
            table.columns().len()
        );

        match chart::build(kind, &table) {
            Ok(mut figure) => {
                figure.set_title(spec.options.title());
                RenderResult::Chart(figure)
            }
            Err(err) => Diagnostic::new(err.into()).with_raw(payload).into(),
        }
    }

    fn render_file(&self, spec: &VisualizationSpec, chain: &mut FileChain) -> RenderResult {
        if !self.allow_file_directives {
            return Diagnostic::new(RenderError::FileDirectivesDisabled).into();
        }
        let Some(filename) = spec.filename() else {
            return Diagnostic::new(RenderError::MissingFile("no filename given".to_string()))
                .into();
        };
        if chain.visited.len() >= self.max_file_depth {
            return Diagnostic::new(RenderError::FileDepthExceeded(self.max_file_depth)).into();
        }

        let path = match &chain.base_dir {
            Some(base) => base.join(filename),
            None => PathBuf::from(filename),
        };
        if !path.exists() {
            return Diagnostic::new(RenderError::MissingFile(path.display().to_string())).into();
        }

        let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if chain.visited.contains(&canonical) {
            return Diagnostic::new(RenderError::FileCycle(path.display().to_string())).into();
        }

        let content = match read_directive_file(&path) {
            Ok(content) => content,
            Err(err) => {
                return Diagnostic::new(RenderError::UnreadableFile {
                    path: path.display().to_string(),
                    reason: err.to_string(),
                })
                .into()
            }
        };
        debug!("Following file visualization: {}", path.display());

        let parent_base = chain.base_dir.replace(
            canonical
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        );
        chain.visited.push(canonical);
        let result = self.render_in(&content, chain);
        chain.visited.pop();
        chain.base_dir = parent_base;

        result
    }
}

fn read_directive_file(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Split an assistant message and render every directive in order
///
/// Narrative text passes through; each directive becomes a chart or a
/// diagnostic; unterminated directives become a malformed-block warning that
/// carries the raw text.
#[must_use]
pub fn process_content(text: &str, renderer: &Renderer) -> Vec<RenderedBlock> {
    split_blocks(text)
        .into_iter()
        .enumerate()
        .map(|(index, block)| {
            let rendered = match block {
                ContentBlock::Narrative(text) => RenderedBlock::Narrative(text),
                ContentBlock::Directive(payload) => renderer.render(&payload).into(),
                ContentBlock::Malformed(raw) => RenderedBlock::Diagnostic(
                    Diagnostic::new(RenderError::MalformedBlock).with_raw(&raw),
                ),
            };
            match &rendered {
                RenderedBlock::Diagnostic(diagnostic) => {
                    warn!("Block {index}: {diagnostic}");
                }
                RenderedBlock::Chart(figure) => debug!("Block {index}: '{}' chart", figure.kind),
                RenderedBlock::Narrative(text) => {
                    debug!("Block {index}: narrative ({} bytes)", text.len());
                }
            }
            rendered
        })
        .collect()
}
