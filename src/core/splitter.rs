//! Block splitter for assistant messages
//!
//! Separates narrative text from `<visualization>` directive payloads while
//! preserving their order in the message.

/// Opening tag prefix of a visualization directive (attributes follow).
pub const OPEN_TAG: &str = "<visualization";

/// Closing tag of a visualization directive.
pub const CLOSE_TAG: &str = "</visualization>";

/// One piece of an assistant message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentBlock {
    /// Markdown-capable narrative text, trimmed and never empty
    Narrative(String),
    /// A complete directive payload, opening and closing tags included
    Directive(String),
    /// An opening tag with no closing tag; holds the raw remainder of its segment
    Malformed(String),
}

impl ContentBlock {
    /// Source text of this block as it appeared in the message (modulo trimming)
    #[must_use]
    pub fn to_source(&self) -> &str {
        match self {
            Self::Narrative(text) | Self::Directive(text) | Self::Malformed(text) => text,
        }
    }

    /// Whether this block is a directive payload
    #[must_use]
    pub const fn is_directive(&self) -> bool {
        matches!(self, Self::Directive(_))
    }
}

/// Split one assistant message into ordered content blocks
///
/// Text before the first opening tag and text after each closing tag become
/// [`ContentBlock::Narrative`] blocks when non-empty after trimming. A segment
/// whose closing tag is missing becomes a single [`ContentBlock::Malformed`]
/// block and nothing else is recovered from it.
///
/// # Examples
/// ```
/// use chat_viz::core::splitter::{split_blocks, ContentBlock};
///
/// let blocks = split_blocks("Intro <visualization type=\"bar\"></visualization> outro");
/// assert_eq!(blocks.len(), 3);
/// assert_eq!(blocks[0], ContentBlock::Narrative("Intro".to_string()));
/// assert!(blocks[1].is_directive());
/// ```
#[must_use]
pub fn split_blocks(text: &str) -> Vec<ContentBlock> {
    let mut blocks = Vec::new();
    let mut parts = text.split(OPEN_TAG);

    if let Some(leading) = parts.next() {
        push_narrative(&mut blocks, leading);
    }

    for part in parts {
        match part.split_once(CLOSE_TAG) {
            Some((inner, trailing)) => {
                blocks.push(ContentBlock::Directive(format!(
                    "{OPEN_TAG}{inner}{CLOSE_TAG}"
                )));
                push_narrative(&mut blocks, trailing);
            }
            None => blocks.push(ContentBlock::Malformed(format!("{OPEN_TAG}{part}"))),
        }
    }

    blocks
}

fn push_narrative(blocks: &mut Vec<ContentBlock>, text: &str) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        blocks.push(ContentBlock::Narrative(trimmed.to_string()));
    }
}
