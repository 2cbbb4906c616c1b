//! Inline node kinds.

use markdown_arbor_engine as engine;

use crate::tree::node::{Node, NodeType, TypedNode, node_kind};

node_kind! {
    /// A run of literal text.
    Text => Text
}

node_kind! {
    /// An inline code span.
    Code => Code
}

node_kind! {
    /// Emphasized content.
    Emphasis => Emphasis
}

node_kind! {
    /// Strongly emphasized content.
    Strong => Strong
}

node_kind! {
    /// A hyperlink with a destination and optional title.
    Link => Link
}

node_kind! {
    /// An image reference; child inlines form the alt text.
    Image => Image
}

node_kind! {
    /// A fragment of raw inline HTML.
    HtmlInline => HtmlInline
}

node_kind! {
    /// A soft line break.
    SoftBreak => SoftBreak
}

node_kind! {
    /// A hard line break.
    LineBreak => LineBreak
}

impl Text {
    pub fn new(literal: &str) -> Self {
        let text = Text(Node::detached(NodeType::Text));
        engine::set_literal(text.0.handle(), literal);
        text
    }

    pub fn literal(&self) -> String {
        engine::literal(self.0.handle()).unwrap_or_default()
    }

    pub fn set_literal(&self, literal: &str) -> bool {
        engine::set_literal(self.0.handle(), literal)
    }
}

impl Code {
    pub fn new(literal: &str) -> Self {
        let code = Code(Node::detached(NodeType::Code));
        engine::set_literal(code.0.handle(), literal);
        code
    }

    pub fn literal(&self) -> String {
        engine::literal(self.0.handle()).unwrap_or_default()
    }
}

impl Emphasis {
    pub fn new() -> Self {
        Emphasis(Node::detached(NodeType::Emphasis))
    }
}

impl Default for Emphasis {
    fn default() -> Self {
        Self::new()
    }
}

impl Strong {
    pub fn new() -> Self {
        Strong(Node::detached(NodeType::Strong))
    }
}

impl Default for Strong {
    fn default() -> Self {
        Self::new()
    }
}

impl Link {
    pub fn new(url: &str, title: &str) -> Self {
        let link = Link(Node::detached(NodeType::Link));
        engine::set_url(link.0.handle(), url);
        engine::set_title(link.0.handle(), title);
        link
    }

    pub fn url(&self) -> String {
        engine::url(self.0.handle()).unwrap_or_default()
    }

    pub fn set_url(&self, url: &str) -> bool {
        engine::set_url(self.0.handle(), url)
    }

    pub fn title(&self) -> String {
        engine::title(self.0.handle()).unwrap_or_default()
    }

    pub fn set_title(&self, title: &str) -> bool {
        engine::set_title(self.0.handle(), title)
    }
}

impl Image {
    pub fn new(url: &str, title: &str) -> Self {
        let image = Image(Node::detached(NodeType::Image));
        engine::set_url(image.0.handle(), url);
        engine::set_title(image.0.handle(), title);
        image
    }

    pub fn url(&self) -> String {
        engine::url(self.0.handle()).unwrap_or_default()
    }

    pub fn title(&self) -> String {
        engine::title(self.0.handle()).unwrap_or_default()
    }
}

impl HtmlInline {
    pub fn new(literal: &str) -> Self {
        let html = HtmlInline(Node::detached(NodeType::HtmlInline));
        engine::set_literal(html.0.handle(), literal);
        html
    }

    pub fn literal(&self) -> String {
        engine::literal(self.0.handle()).unwrap_or_default()
    }
}

impl SoftBreak {
    pub fn new() -> Self {
        SoftBreak(Node::detached(NodeType::SoftBreak))
    }
}

impl Default for SoftBreak {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBreak {
    pub fn new() -> Self {
        LineBreak(Node::detached(NodeType::LineBreak))
    }
}

impl Default for LineBreak {
    fn default() -> Self {
        Self::new()
    }
}

/// The inline category: what inline containers (paragraphs, headings,
/// emphasis spans, links) accept as children.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum Inline {
    Text(Text),
    Code(Code),
    Emphasis(Emphasis),
    Strong(Strong),
    Link(Link),
    Image(Image),
    HtmlInline(HtmlInline),
    SoftBreak(SoftBreak),
    LineBreak(LineBreak),
}

impl TypedNode for Inline {
    fn from_node(node: Node) -> Option<Self> {
        match node.kind()? {
            NodeType::Text => Text::from_node(node).map(Inline::Text),
            NodeType::Code => Code::from_node(node).map(Inline::Code),
            NodeType::Emphasis => Emphasis::from_node(node).map(Inline::Emphasis),
            NodeType::Strong => Strong::from_node(node).map(Inline::Strong),
            NodeType::Link => Link::from_node(node).map(Inline::Link),
            NodeType::Image => Image::from_node(node).map(Inline::Image),
            NodeType::HtmlInline => HtmlInline::from_node(node).map(Inline::HtmlInline),
            NodeType::SoftBreak => SoftBreak::from_node(node).map(Inline::SoftBreak),
            NodeType::LineBreak => LineBreak::from_node(node).map(Inline::LineBreak),
            _ => None,
        }
    }

    fn as_node(&self) -> &Node {
        match self {
            Inline::Text(n) => n.as_node(),
            Inline::Code(n) => n.as_node(),
            Inline::Emphasis(n) => n.as_node(),
            Inline::Strong(n) => n.as_node(),
            Inline::Link(n) => n.as_node(),
            Inline::Image(n) => n.as_node(),
            Inline::HtmlInline(n) => n.as_node(),
            Inline::SoftBreak(n) => n.as_node(),
            Inline::LineBreak(n) => n.as_node(),
        }
    }

    fn into_node(self) -> Node {
        match self {
            Inline::Text(n) => n.into_node(),
            Inline::Code(n) => n.into_node(),
            Inline::Emphasis(n) => n.into_node(),
            Inline::Strong(n) => n.into_node(),
            Inline::Link(n) => n.into_node(),
            Inline::Image(n) => n.into_node(),
            Inline::HtmlInline(n) => n.into_node(),
            Inline::SoftBreak(n) => n.into_node(),
            Inline::LineBreak(n) => n.into_node(),
        }
    }
}

macro_rules! inline_from {
    ($kind:ident) => {
        impl From<$kind> for Inline {
            fn from(value: $kind) -> Inline {
                Inline::$kind(value)
            }
        }
    };
}

inline_from!(Text);
inline_from!(Code);
inline_from!(Emphasis);
inline_from!(Strong);
inline_from!(Link);
inline_from!(Image);
inline_from!(HtmlInline);
inline_from!(SoftBreak);
inline_from!(LineBreak);
