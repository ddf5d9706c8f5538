//! Parsing of visualization directive payloads
//!
//! A payload is a small XML document:
//!
//! ```xml
//! <visualization type="bar">
//!   <data>
//!     <item><x>A</x><y>10</y></item>
//!   </data>
//!   <options><title>Sales</title></options>
//! </visualization>
//! ```

use roxmltree::{Document, Node};

/// Kind identifier that redirects rendering to another file.
pub const FILE_KIND: &str = "file";

/// One data row: `(column, value)` pairs in document order
pub type Row = Vec<(String, String)>;

/// Flat `options` section, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options(Vec<(String, String)>);

impl Options {
    /// Look up an option value by tag name
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Chart title, empty when not given
    #[must_use]
    pub fn title(&self) -> &str {
        self.get("title").unwrap_or_default()
    }

    /// Whether no options were given
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, key: &str, value: String) {
        insert_ordered(&mut self.0, key, value);
    }
}

/// Parsed directive payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualizationSpec {
    /// Lower-cased `type` attribute; empty when the attribute is missing
    pub kind: String,
    /// Rows from the `data` section; `None` when there is no `data` element
    pub rows: Option<Vec<Row>>,
    /// Contents of the `options` section
    pub options: Options,
}

impl VisualizationSpec {
    /// Parse a directive payload
    ///
    /// The root element name is not checked; the splitter only hands over
    /// payloads that start with the opening tag, and file directives may point
    /// at any single-root document.
    ///
    /// # Errors
    /// Returns the XML parser's error when the payload is not well-formed.
    pub fn parse(payload: &str) -> Result<Self, roxmltree::Error> {
        let doc = Document::parse(payload)?;
        let root = doc.root_element();

        let kind = root
            .attribute("type")
            .map(str::to_lowercase)
            .unwrap_or_default();

        let rows = child_element(root, "data").map(|data| {
            elements(data)
                .map(|item| {
                    let mut row = Row::new();
                    for cell in elements(item) {
                        insert_ordered(&mut row, cell.tag_name().name(), text_of(cell));
                    }
                    row
                })
                .collect()
        });

        let mut options = Options::default();
        if let Some(section) = child_element(root, "options") {
            for option in elements(section) {
                options.insert(option.tag_name().name(), text_of(option));
            }
        }

        Ok(Self {
            kind,
            rows,
            options,
        })
    }

    /// Whether this directive points at another file
    #[must_use]
    pub fn is_file_reference(&self) -> bool {
        self.kind == FILE_KIND
    }

    /// `options/filename` of a file directive, if non-empty
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.options.get("filename").filter(|name| !name.is_empty())
    }
}

fn elements<'a, 'input>(node: Node<'a, 'input>) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(Node::is_element)
}

fn child_element<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    elements(node).find(|child| child.tag_name().name() == name)
}

fn text_of(node: Node) -> String {
    node.text().map(str::trim).unwrap_or_default().to_string()
}

/// Insert keeping the first position of a repeated key and its last value
fn insert_ordered(pairs: &mut Vec<(String, String)>, key: &str, value: String) {
    if let Some(slot) = pairs.iter_mut().find(|(k, _)| k == key) {
        slot.1 = value;
    } else {
        pairs.push((key.to_string(), value));
    }
}
