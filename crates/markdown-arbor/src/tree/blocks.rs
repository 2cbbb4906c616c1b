//! Block-level node kinds.

use markdown_arbor_engine as engine;

pub use markdown_arbor_engine::ListKind;

use crate::tree::container::Container;
use crate::tree::inlines::{Inline, Text};
use crate::tree::node::{Node, NodeType, TypedNode, node_kind};

node_kind! {
    /// A block quote.
    BlockQuote => BlockQuote
}

node_kind! {
    /// A code block, fenced or indented.
    CodeBlock => CodeBlock
}

node_kind! {
    /// A section heading, level 1 through 6.
    Heading => Heading
}

node_kind! {
    /// A block of raw HTML, emitted verbatim or replaced by a placeholder
    /// depending on rendering options.
    HtmlBlock => HtmlBlock
}

node_kind! {
    /// A bullet or ordered list of items.
    List => List
}

node_kind! {
    /// One list item.
    Item => Item
}

node_kind! {
    /// A paragraph of inline content.
    Paragraph => Paragraph
}

node_kind! {
    /// A thematic break (horizontal rule).
    ThematicBreak => ThematicBreak
}

impl BlockQuote {
    pub fn new() -> Self {
        BlockQuote(Node::detached(NodeType::BlockQuote))
    }
}

impl Default for BlockQuote {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBlock {
    pub fn new(literal: &str) -> Self {
        let block = CodeBlock(Node::detached(NodeType::CodeBlock));
        engine::set_literal(block.0.handle(), literal);
        block
    }

    /// A fenced code block with an info string (typically the language).
    pub fn with_fence_info(info: &str, literal: &str) -> Self {
        let block = Self::new(literal);
        engine::set_fence_info(block.0.handle(), info);
        block
    }

    pub fn literal(&self) -> String {
        engine::literal(self.0.handle()).unwrap_or_default()
    }

    pub fn set_literal(&self, literal: &str) -> bool {
        engine::set_literal(self.0.handle(), literal)
    }

    pub fn fence_info(&self) -> String {
        engine::fence_info(self.0.handle()).unwrap_or_default()
    }

    pub fn set_fence_info(&self, info: &str) -> bool {
        engine::set_fence_info(self.0.handle(), info)
    }
}

impl Heading {
    /// A heading of the given level; levels are clamped to 1...6.
    pub fn new(level: u32) -> Self {
        let heading = Heading(Node::detached(NodeType::Heading));
        engine::set_heading_level(heading.0.handle(), level.clamp(1, 6));
        heading
    }

    pub fn with_text(level: u32, text: &str) -> Self {
        let heading = Self::new(level);
        heading.append(&Inline::Text(Text::new(text)));
        heading
    }

    pub fn level(&self) -> u32 {
        engine::heading_level(self.0.handle()).unwrap_or(1)
    }

    /// Change the heading level. `false` for levels outside 1...6.
    pub fn set_level(&self, level: u32) -> bool {
        engine::set_heading_level(self.0.handle(), level)
    }
}

impl HtmlBlock {
    pub fn new(literal: &str) -> Self {
        let block = HtmlBlock(Node::detached(NodeType::HtmlBlock));
        engine::set_literal(block.0.handle(), literal);
        block
    }

    pub fn literal(&self) -> String {
        engine::literal(self.0.handle()).unwrap_or_default()
    }

    pub fn set_literal(&self, literal: &str) -> bool {
        engine::set_literal(self.0.handle(), literal)
    }
}

impl List {
    pub fn new(kind: ListKind) -> Self {
        let list = List(Node::detached(NodeType::List));
        engine::set_list_kind(list.0.handle(), kind);
        list
    }

    pub fn kind(&self) -> ListKind {
        engine::list_kind(self.0.handle()).unwrap_or_default()
    }

    /// The starting number of an ordered list.
    pub fn start_number(&self) -> u64 {
        engine::list_start(self.0.handle()).unwrap_or(1)
    }

    pub fn set_start_number(&self, start: u64) -> bool {
        engine::set_list_start(self.0.handle(), start)
    }

    /// Whether the list is tight (no blank lines between items).
    pub fn is_tight(&self) -> bool {
        engine::list_tight(self.0.handle()).unwrap_or(true)
    }

    pub fn set_tight(&self, tight: bool) -> bool {
        engine::set_list_tight(self.0.handle(), tight)
    }
}

impl Item {
    pub fn new() -> Self {
        Item(Node::detached(NodeType::Item))
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new()
    }
}

impl Paragraph {
    pub fn new() -> Self {
        Paragraph(Node::detached(NodeType::Paragraph))
    }

    /// A paragraph holding a single text run.
    pub fn with_text(text: &str) -> Self {
        let paragraph = Self::new();
        paragraph.append(&Inline::Text(Text::new(text)));
        paragraph
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ThematicBreak {
    pub fn new() -> Self {
        ThematicBreak(Node::detached(NodeType::ThematicBreak))
    }
}

impl Default for ThematicBreak {
    fn default() -> Self {
        Self::new()
    }
}

/// The block category: what block containers (documents, block quotes)
/// accept as children.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Block {
    BlockQuote(BlockQuote),
    CodeBlock(CodeBlock),
    Heading(Heading),
    HtmlBlock(HtmlBlock),
    List(List),
    Paragraph(Paragraph),
    ThematicBreak(ThematicBreak),
}

impl TypedNode for Block {
    fn from_node(node: Node) -> Option<Self> {
        match node.kind()? {
            NodeType::BlockQuote => BlockQuote::from_node(node).map(Block::BlockQuote),
            NodeType::CodeBlock => CodeBlock::from_node(node).map(Block::CodeBlock),
            NodeType::Heading => Heading::from_node(node).map(Block::Heading),
            NodeType::HtmlBlock => HtmlBlock::from_node(node).map(Block::HtmlBlock),
            NodeType::List => List::from_node(node).map(Block::List),
            NodeType::Paragraph => Paragraph::from_node(node).map(Block::Paragraph),
            NodeType::ThematicBreak => ThematicBreak::from_node(node).map(Block::ThematicBreak),
            _ => None,
        }
    }

    fn as_node(&self) -> &Node {
        match self {
            Block::BlockQuote(n) => n.as_node(),
            Block::CodeBlock(n) => n.as_node(),
            Block::Heading(n) => n.as_node(),
            Block::HtmlBlock(n) => n.as_node(),
            Block::List(n) => n.as_node(),
            Block::Paragraph(n) => n.as_node(),
            Block::ThematicBreak(n) => n.as_node(),
        }
    }

    fn into_node(self) -> Node {
        match self {
            Block::BlockQuote(n) => n.into_node(),
            Block::CodeBlock(n) => n.into_node(),
            Block::Heading(n) => n.into_node(),
            Block::HtmlBlock(n) => n.into_node(),
            Block::List(n) => n.into_node(),
            Block::Paragraph(n) => n.into_node(),
            Block::ThematicBreak(n) => n.into_node(),
        }
    }
}

macro_rules! block_from {
    ($kind:ident) => {
        impl From<$kind> for Block {
            fn from(value: $kind) -> Block {
                Block::$kind(value)
            }
        }
    };
}

block_from!(BlockQuote);
block_from!(CodeBlock);
block_from!(Heading);
block_from!(HtmlBlock);
block_from!(List);
block_from!(Paragraph);
block_from!(ThematicBreak);
