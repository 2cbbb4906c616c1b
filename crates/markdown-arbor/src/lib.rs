//! Mutable, strongly-typed CommonMark document trees.
//!
//! Parsing and rendering are delegated to the `markdown-arbor-engine`
//! crate, which owns the canonical node storage; this crate layers typed,
//! ownership-aware wrappers on top. A wrapper for a detached node owns its
//! engine node and frees it on drop; linking the node into a container
//! transfers ownership to the tree (ultimately to its [`Document`]), and
//! removing it transfers ownership back.
//!
//! Node equality is identity, not content: two wrappers are equal exactly
//! when they refer to the same underlying node.
//!
//! ```
//! use markdown_arbor::{
//!     Block, Container, Document, Inline, ParseOptions, Paragraph, RenderFormat,
//!     RenderOptions, Text, TypedNode,
//! };
//!
//! let doc = Document::parse("# Hello\n", ParseOptions::default()).unwrap();
//! assert_eq!(doc.children().count(), 1);
//!
//! let paragraph = Paragraph::new();
//! paragraph.append(&Inline::Text(Text::new("world")));
//! let paragraph = Block::Paragraph(paragraph);
//! assert!(doc.append(&paragraph));
//! assert!(!paragraph.as_node().is_owned()); // the tree owns it now
//!
//! let html = doc.render(RenderFormat::Html, RenderOptions::default());
//! assert_eq!(html, "<h1>Hello</h1>\n<p>world</p>\n");
//! ```

pub mod document;
pub mod position;
pub mod tree;

pub use document::{Document, DocumentError, ParseOptions, RenderFormat, RenderOptions};
pub use position::Position;
pub use tree::{
    Block, BlockQuote, Children, Code, CodeBlock, Container, Emphasis, Heading, HtmlBlock,
    HtmlInline, Image, Inline, Item, LineBreak, Link, List, ListKind, Node, NodeType, Paragraph,
    SoftBreak, Strong, Text, ThematicBreak, TypedNode,
};
