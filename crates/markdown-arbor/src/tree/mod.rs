//! The node wrapper layer: ownership-aware wrappers over engine handles,
//! typed node kinds, and the generic container capability.

pub mod blocks;
pub mod container;
pub mod inlines;
pub mod node;

pub use blocks::{
    Block, BlockQuote, CodeBlock, Heading, HtmlBlock, Item, List, ListKind, Paragraph,
    ThematicBreak,
};
pub use container::{Children, Container};
pub use inlines::{
    Code, Emphasis, HtmlInline, Image, Inline, LineBreak, Link, SoftBreak, Strong, Text,
};
pub use node::{Node, NodeType, TypedNode};
