//! Tree-to-text conversion, one walker per target format.

mod commonmark;
mod html;
mod latex;
mod man;
mod xml;

use crate::store::{self, NodeHandle};

/// Output format for [`render`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RenderFormat {
    CommonMark,
    Html,
    Xml,
    Latex,
    Man,
}

/// Serialize the tree rooted at `root`. `None` for a dead handle.
pub fn render(root: NodeHandle, format: RenderFormat, option_flags: u32) -> Option<String> {
    store::node_type(root)?;
    Some(match format {
        RenderFormat::CommonMark => commonmark::render(root),
        RenderFormat::Html => html::render(root, option_flags),
        RenderFormat::Xml => xml::render(root, option_flags),
        RenderFormat::Latex => latex::render(root),
        RenderFormat::Man => man::render(root),
    })
}

/// Forward traversal over a node's direct children.
pub(crate) fn children(node: NodeHandle) -> impl Iterator<Item = NodeHandle> {
    std::iter::successors(store::first_child(node), |&handle| {
        store::next_sibling(handle)
    })
}

/// Concatenated text content of a subtree, for plain-text contexts such as
/// image alt text.
pub(crate) fn plain_text(node: NodeHandle) -> String {
    let mut out = String::new();
    collect_plain_text(node, &mut out);
    out
}

fn collect_plain_text(node: NodeHandle, out: &mut String) {
    use crate::store::NodeType;
    match store::node_type(node) {
        Some(NodeType::Text | NodeType::Code) => {
            if let Some(literal) = store::literal(node) {
                out.push_str(&literal);
            }
        }
        Some(NodeType::SoftBreak | NodeType::LineBreak) => out.push(' '),
        _ => {
            for child in children(node) {
                collect_plain_text(child, out);
            }
        }
    }
}
