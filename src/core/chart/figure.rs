//! Plotly-compatible chart object

use serde::Serialize;
use serde_json::{Map, Value};

/// Vertical position of the centered title, in paper coordinates.
const TITLE_Y: f64 = 0.9;

/// Centered chart title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    /// Title text
    pub text: String,
    /// Horizontal position (paper coordinates)
    pub x: f64,
    /// Vertical position (paper coordinates)
    pub y: f64,
    /// Horizontal anchor
    pub xanchor: &'static str,
    /// Vertical anchor
    pub yanchor: &'static str,
}

impl Title {
    /// Title centered horizontally near the top of the plot
    #[must_use]
    pub fn centered(text: &str) -> Self {
        Self {
            text: text.to_string(),
            x: 0.5,
            y: TITLE_Y,
            xanchor: "center",
            yanchor: "top",
        }
    }
}

/// Figure layout: the title plus any kind-specific layout attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Chart title
    pub title: Title,
    /// Remaining layout attributes (axes, map settings, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A renderable chart: traces and layout, serializable for Plotly.js
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    /// Chart kind identifier this figure was built for
    pub kind: String,
    /// Plotly traces
    pub data: Vec<Value>,
    /// Plotly layout
    pub layout: Layout,
}

impl Figure {
    /// Figure with the given traces and an empty centered title
    #[must_use]
    pub fn new(kind: &str, data: Vec<Value>) -> Self {
        Self {
            kind: kind.to_string(),
            data,
            layout: Layout {
                title: Title::centered(""),
                extra: Map::new(),
            },
        }
    }

    /// Add a layout attribute
    #[must_use]
    pub fn with_layout(mut self, key: &str, value: Value) -> Self {
        self.layout.extra.insert(key.to_string(), value);
        self
    }

    /// Replace the title with a centered one
    pub fn set_title(&mut self, text: &str) {
        self.layout.title = Title::centered(text);
    }

    /// Serialize to compact JSON
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to JSON that is safe to embed inside an HTML `<script>` element
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_script_json(&self) -> Result<String, serde_json::Error> {
        Ok(self.to_json()?.replace('<', "\\u003c"))
    }
}
