//! The document root: parse entry point, rendering, and the configuration
//! options both sides understand.

use markdown_arbor_engine as engine;
use markdown_arbor_engine::flags;

pub use markdown_arbor_engine::RenderFormat;

use crate::tree::node::{Node, TypedNode, node_kind};

node_kind! {
    /// The root of a document tree.
    ///
    /// Every node in a parsed tree is transitively owned by exactly one
    /// `Document`; dropping it releases the whole tree. Wrappers observed
    /// through traversal become inert views at that point.
    Document => Document
}

/// Error when creating a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    /// A document couldn't be constructed from the provided source.
    #[error("a document could not be constructed from the provided source")]
    Invalid,
}

/// Options for parsing CommonMark text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Convert ASCII punctuation to "smart" typographic punctuation:
    /// straight quotes become curly quotes, `--` and `---` become en and
    /// em dashes, and `...` becomes an ellipsis.
    pub smart: bool,
}

impl ParseOptions {
    fn option_flags(self) -> u32 {
        let mut word = flags::DEFAULT;
        if self.smart {
            word |= flags::SMART;
        }
        word
    }
}

/// Options for rendering a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    /// Render raw HTML and unsafe links verbatim.
    ///
    /// A link is unsafe if its scheme is `javascript:`, `vbscript:`, or
    /// `file:`, or if it is a `data:` URL of anything but a PNG, GIF,
    /// JPEG, or WebP image. By default raw HTML is replaced by a
    /// placeholder comment and unsafe link destinations by empty strings.
    /// HTML output only.
    pub allow_unsafe: bool,
    /// Render soft line breaks as spaces. No effect on XML output.
    pub soft_breaks_as_spaces: bool,
    /// Render soft line breaks as hard line breaks. No effect on XML
    /// output.
    pub hard_breaks: bool,
    /// Annotate block elements with their source position. HTML and XML
    /// output only.
    pub source_positions: bool,
}

impl RenderOptions {
    fn option_flags(self) -> u32 {
        let mut word = flags::DEFAULT;
        if self.allow_unsafe {
            word |= flags::UNSAFE;
        }
        if self.soft_breaks_as_spaces {
            word |= flags::NO_BREAKS;
        }
        if self.hard_breaks {
            word |= flags::HARD_BREAKS;
        }
        if self.source_positions {
            word |= flags::SOURCE_POS;
        }
        word
    }
}

impl Document {
    /// An empty document, for building trees programmatically.
    pub fn new() -> Self {
        Document(Node::detached(crate::tree::node::NodeType::Document))
    }

    /// Parse CommonMark source into a document tree.
    ///
    /// Never partially succeeds: either the engine produces a whole tree,
    /// or this returns [`DocumentError::Invalid`].
    pub fn parse(source: &str, options: ParseOptions) -> Result<Self, DocumentError> {
        let root = engine::parse_document(source, options.option_flags())
            .ok_or(DocumentError::Invalid)?;
        let node = Node::acquire(root).ok_or(DocumentError::Invalid)?;
        node.set_owned(true);
        Ok(Document(node))
    }

    /// Serialize the tree to the given target format.
    pub fn render(&self, format: RenderFormat, options: RenderOptions) -> String {
        engine::render(self.as_node().handle(), format, options.option_flags())
            .unwrap_or_default()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_structs_lower_to_flag_words() {
        assert_eq!(ParseOptions::default().option_flags(), flags::DEFAULT);
        assert_eq!(ParseOptions { smart: true }.option_flags(), flags::SMART);

        let all = RenderOptions {
            allow_unsafe: true,
            soft_breaks_as_spaces: true,
            hard_breaks: true,
            source_positions: true,
        };
        assert_eq!(
            all.option_flags(),
            flags::UNSAFE | flags::NO_BREAKS | flags::HARD_BREAKS | flags::SOURCE_POS
        );
    }
}
