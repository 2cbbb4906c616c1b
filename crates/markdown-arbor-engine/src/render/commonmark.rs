//! CommonMark (source markup) target.
//!
//! Output is normalized source, not a byte round-trip of the input: fences
//! are backticks, emphasis uses asterisks, blocks are separated by one blank
//! line.

use crate::render::children;
use crate::store::{self, ListKind, NodeHandle, NodeType};

pub(crate) fn render(root: NodeHandle) -> String {
    match store::node_type(root) {
        Some(NodeType::Document) => {
            let blocks: Vec<String> = children(root).map(block_string).collect();
            if blocks.is_empty() {
                String::new()
            } else {
                blocks.join("\n\n") + "\n"
            }
        }
        Some(t) if t.is_block() => block_string(root) + "\n",
        Some(_) => inline_string(root),
        None => String::new(),
    }
}

fn block_string(node: NodeHandle) -> String {
    match store::node_type(node) {
        Some(NodeType::Paragraph) => inlines_string(node),
        Some(NodeType::Heading) => {
            let level = store::heading_level(node).unwrap_or(1) as usize;
            format!("{} {}", "#".repeat(level), inlines_string(node))
        }
        Some(NodeType::BlockQuote) => {
            let inner: Vec<String> = children(node).map(block_string).collect();
            prefix_lines(&inner.join("\n\n"), "> ", "> ")
        }
        Some(NodeType::List) => list_string(node),
        Some(NodeType::CodeBlock) => {
            let info = store::fence_info(node).unwrap_or_default();
            let mut literal = store::literal(node).unwrap_or_default();
            if !literal.is_empty() && !literal.ends_with('\n') {
                literal.push('\n');
            }
            format!("```{info}\n{literal}```")
        }
        Some(NodeType::HtmlBlock) => {
            let literal = store::literal(node).unwrap_or_default();
            literal.trim_end_matches('\n').to_owned()
        }
        Some(NodeType::ThematicBreak) => "***".to_owned(),
        // Stray inline under a block container; render it as-is.
        Some(_) => inline_string(node),
        None => String::new(),
    }
}

fn list_string(list: NodeHandle) -> String {
    let ordered = store::list_kind(list) == Some(ListKind::Ordered);
    let tight = store::list_tight(list).unwrap_or(true);
    let mut number = store::list_start(list).unwrap_or(1);

    let mut items = vec![];
    for item in children(list) {
        let marker = if ordered {
            format!("{number}. ")
        } else {
            "- ".to_owned()
        };
        number += 1;
        let indent = " ".repeat(marker.len());
        items.push(prefix_lines(&item_string(item, tight), &marker, &indent));
    }
    items.join(if tight { "\n" } else { "\n\n" })
}

/// An item may hold bare inlines (tight lists), blocks (loose lists), or a
/// mix; consecutive inlines collapse into one paragraph-like segment.
fn item_string(item: NodeHandle, tight: bool) -> String {
    let mut segments: Vec<String> = vec![];
    let mut run = String::new();
    for child in children(item) {
        let is_inline = store::node_type(child).is_some_and(|t| t.is_inline());
        if is_inline {
            run.push_str(&inline_string(child));
        } else {
            if !run.is_empty() {
                segments.push(std::mem::take(&mut run));
            }
            segments.push(block_string(child));
        }
    }
    if !run.is_empty() {
        segments.push(run);
    }
    segments.join(if tight { "\n" } else { "\n\n" })
}

fn inlines_string(node: NodeHandle) -> String {
    children(node).map(inline_string).collect()
}

fn inline_string(node: NodeHandle) -> String {
    match store::node_type(node) {
        Some(NodeType::Text) => escape_text(&store::literal(node).unwrap_or_default()),
        Some(NodeType::SoftBreak) => "\n".to_owned(),
        Some(NodeType::LineBreak) => "\\\n".to_owned(),
        Some(NodeType::Code) => {
            let literal = store::literal(node).unwrap_or_default();
            if literal.contains('`') {
                format!("`` {literal} ``")
            } else {
                format!("`{literal}`")
            }
        }
        Some(NodeType::HtmlInline) => store::literal(node).unwrap_or_default(),
        Some(NodeType::Emphasis) => format!("*{}*", inlines_string(node)),
        Some(NodeType::Strong) => format!("**{}**", inlines_string(node)),
        Some(NodeType::Link) => {
            format!(
                "[{}]({})",
                inlines_string(node),
                destination_string(node)
            )
        }
        Some(NodeType::Image) => {
            format!(
                "![{}]({})",
                inlines_string(node),
                destination_string(node)
            )
        }
        // Block node in inline position; fall back to its block form.
        Some(_) => block_string(node),
        None => String::new(),
    }
}

fn destination_string(node: NodeHandle) -> String {
    let url = store::url(node).unwrap_or_default();
    let title = store::title(node).unwrap_or_default();
    if title.is_empty() {
        url
    } else {
        format!("{url} \"{title}\"")
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn prefix_lines(text: &str, first: &str, rest: &str) -> String {
    let mut out = String::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let prefix = if i == 0 { first } else { rest };
        if line.is_empty() {
            out.push_str(prefix.trim_end());
        } else {
            out.push_str(prefix);
            out.push_str(line);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags;
    use crate::parse::parse_document;
    use pretty_assertions::assert_eq;

    fn round_trip(source: &str) -> String {
        let root = parse_document(source, flags::DEFAULT).expect("parse");
        let out = render(root);
        store::free(root);
        out
    }

    #[test]
    fn heading() {
        assert_eq!(round_trip("## Hello\n"), "## Hello\n");
    }

    #[test]
    fn paragraphs_are_blank_line_separated() {
        assert_eq!(round_trip("one\n\ntwo\n"), "one\n\ntwo\n");
    }

    #[test]
    fn tight_bullet_list() {
        assert_eq!(round_trip("- a\n- b\n"), "- a\n- b\n");
    }

    #[test]
    fn ordered_list_keeps_numbering() {
        assert_eq!(round_trip("3. three\n4. four\n"), "3. three\n4. four\n");
    }

    #[test]
    fn block_quote_prefixes_every_line() {
        assert_eq!(round_trip("> quoted\n> words\n"), "> quoted\n> words\n");
    }

    #[test]
    fn fenced_code_block() {
        assert_eq!(
            round_trip("```rust\nlet x = 1;\n```\n"),
            "```rust\nlet x = 1;\n```\n"
        );
    }

    #[test]
    fn inline_markup() {
        assert_eq!(
            round_trip("*em* **strong** `code`\n"),
            "*em* **strong** `code`\n"
        );
    }

    #[test]
    fn link_with_title() {
        assert_eq!(
            round_trip("[text](https://example.com \"the title\")\n"),
            "[text](https://example.com \"the title\")\n"
        );
    }

    #[test]
    fn empty_document_renders_empty() {
        assert_eq!(round_trip(""), "");
    }

    #[test]
    fn reparsing_output_preserves_structure() {
        let source = "# Title\n\n> quote\n\n- a\n- b\n";
        let once = round_trip(source);
        let twice = round_trip(&once);
        assert_eq!(once, twice);
    }
}
