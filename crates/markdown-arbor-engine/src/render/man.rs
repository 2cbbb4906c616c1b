//! Groff manpage target.

use crate::render::children;
use crate::store::{self, ListKind, NodeHandle, NodeType};

pub(crate) fn render(root: NodeHandle) -> String {
    let mut out = String::new();
    walk(root, &mut out);
    out
}

fn walk(node: NodeHandle, out: &mut String) {
    let Some(node_type) = store::node_type(node) else {
        return;
    };
    match node_type {
        NodeType::Document => {
            for child in children(node) {
                walk(child, out);
            }
        }
        NodeType::Heading => {
            let macro_name = if store::heading_level(node).unwrap_or(1) == 1 {
                ".SH"
            } else {
                ".SS"
            };
            out.push_str(macro_name);
            out.push(' ');
            for child in children(node) {
                walk(child, out);
            }
            out.push('\n');
        }
        NodeType::Paragraph => {
            out.push_str(".PP\n");
            for child in children(node) {
                walk(child, out);
            }
            out.push('\n');
        }
        NodeType::BlockQuote => {
            out.push_str(".RS\n");
            for child in children(node) {
                walk(child, out);
            }
            out.push_str(".RE\n");
        }
        NodeType::List => {
            let ordered = store::list_kind(node) == Some(ListKind::Ordered);
            let mut number = store::list_start(node).unwrap_or(1);
            for child in children(node) {
                if ordered {
                    out.push_str(&format!(".IP \"{number}.\" 4\n"));
                    number += 1;
                } else {
                    out.push_str(".IP \\[bu] 2\n");
                }
                walk(child, out);
            }
        }
        NodeType::Item => {
            for child in children(node) {
                walk(child, out);
            }
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }
        NodeType::CodeBlock => {
            out.push_str(".IP\n.nf\n\\f[C]\n");
            out.push_str(&escape(&store::literal(node).unwrap_or_default()));
            out.push_str("\\f[]\n.fi\n");
        }
        // Raw HTML has no manpage form.
        NodeType::HtmlBlock | NodeType::HtmlInline => {}
        NodeType::ThematicBreak => {
            out.push_str(".PP\n  *  *  *  *  *\n");
        }
        NodeType::Text => out.push_str(&escape(&store::literal(node).unwrap_or_default())),
        NodeType::SoftBreak => out.push('\n'),
        NodeType::LineBreak => out.push_str("\n.br\n"),
        NodeType::Code => {
            out.push_str(&format!(
                "\\f[C]{}\\f[]",
                escape(&store::literal(node).unwrap_or_default())
            ));
        }
        NodeType::Emphasis => {
            out.push_str("\\f[I]");
            for child in children(node) {
                walk(child, out);
            }
            out.push_str("\\f[]");
        }
        NodeType::Strong => {
            out.push_str("\\f[B]");
            for child in children(node) {
                walk(child, out);
            }
            out.push_str("\\f[]");
        }
        NodeType::Link => {
            for child in children(node) {
                walk(child, out);
            }
            let url = store::url(node).unwrap_or_default();
            if !url.is_empty() {
                out.push_str(&format!(" ({})", escape(&url)));
            }
        }
        NodeType::Image => {
            out.push_str("[IMAGE: ");
            for child in children(node) {
                walk(child, out);
            }
            out.push(']');
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\[rs]"),
            // A leading dot would be read as a macro invocation.
            '.' if i == 0 => out.push_str("\\&."),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags;
    use crate::parse::parse_document;

    fn to_man(source: &str) -> String {
        let root = parse_document(source, flags::DEFAULT).expect("parse");
        let man = render(root);
        store::free(root);
        man
    }

    #[test]
    fn headings_use_section_macros() {
        assert!(to_man("# NAME\n").starts_with(".SH NAME\n"));
        assert!(to_man("## Sub\n").starts_with(".SS Sub\n"));
    }

    #[test]
    fn paragraphs_use_pp() {
        assert_eq!(to_man("hello\n"), ".PP\nhello\n");
    }

    #[test]
    fn bullets_are_indented_paragraphs() {
        let man = to_man("- a\n- b\n");
        assert_eq!(man.matches(".IP \\[bu] 2\n").count(), 2);
    }
}
