//! HTML target.

use crate::flags;
use crate::render::{children, plain_text};
use crate::store::{self, ListKind, NodeHandle, NodeType};

const RAW_HTML_PLACEHOLDER: &str = "<!-- raw HTML omitted -->";

pub(crate) fn render(root: NodeHandle, option_flags: u32) -> String {
    let mut out = String::new();
    walk(root, option_flags, &mut out);
    out
}

fn walk(node: NodeHandle, option_flags: u32, out: &mut String) {
    let Some(node_type) = store::node_type(node) else {
        return;
    };
    match node_type {
        NodeType::Document => {
            for child in children(node) {
                walk(child, option_flags, out);
            }
        }
        NodeType::BlockQuote => {
            out.push_str("<blockquote");
            out.push_str(&pos_attr(node, option_flags));
            out.push_str(">\n");
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str("</blockquote>\n");
        }
        NodeType::List => {
            let ordered = store::list_kind(node) == Some(ListKind::Ordered);
            if ordered {
                out.push_str("<ol");
                let start = store::list_start(node).unwrap_or(1);
                if start != 1 {
                    out.push_str(&format!(" start=\"{start}\""));
                }
            } else {
                out.push_str("<ul");
            }
            out.push_str(&pos_attr(node, option_flags));
            out.push_str(">\n");
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
        }
        NodeType::Item => {
            out.push_str("<li");
            out.push_str(&pos_attr(node, option_flags));
            out.push('>');
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str("</li>\n");
        }
        NodeType::Heading => {
            let level = store::heading_level(node).unwrap_or(1);
            out.push_str(&format!("<h{level}"));
            out.push_str(&pos_attr(node, option_flags));
            out.push('>');
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str(&format!("</h{level}>\n"));
        }
        NodeType::Paragraph => {
            out.push_str("<p");
            out.push_str(&pos_attr(node, option_flags));
            out.push('>');
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str("</p>\n");
        }
        NodeType::CodeBlock => {
            out.push_str("<pre");
            out.push_str(&pos_attr(node, option_flags));
            out.push_str("><code");
            let info = store::fence_info(node).unwrap_or_default();
            if let Some(language) = info.split_whitespace().next() {
                out.push_str(&format!(
                    " class=\"language-{}\"",
                    html_escape::encode_double_quoted_attribute(language)
                ));
            }
            out.push('>');
            let literal = store::literal(node).unwrap_or_default();
            out.push_str(&html_escape::encode_text(&literal));
            out.push_str("</code></pre>\n");
        }
        NodeType::HtmlBlock => {
            if option_flags & flags::UNSAFE != 0 {
                let literal = store::literal(node).unwrap_or_default();
                out.push_str(&literal);
                if !literal.ends_with('\n') {
                    out.push('\n');
                }
            } else {
                out.push_str(RAW_HTML_PLACEHOLDER);
                out.push('\n');
            }
        }
        NodeType::ThematicBreak => {
            out.push_str("<hr");
            out.push_str(&pos_attr(node, option_flags));
            out.push_str(" />\n");
        }
        NodeType::Text => {
            let literal = store::literal(node).unwrap_or_default();
            out.push_str(&html_escape::encode_text(&literal));
        }
        NodeType::SoftBreak => {
            if option_flags & flags::HARD_BREAKS != 0 {
                out.push_str("<br />\n");
            } else if option_flags & flags::NO_BREAKS != 0 {
                out.push(' ');
            } else {
                out.push('\n');
            }
        }
        NodeType::LineBreak => out.push_str("<br />\n"),
        NodeType::Code => {
            let literal = store::literal(node).unwrap_or_default();
            out.push_str("<code>");
            out.push_str(&html_escape::encode_text(&literal));
            out.push_str("</code>");
        }
        NodeType::HtmlInline => {
            if option_flags & flags::UNSAFE != 0 {
                out.push_str(&store::literal(node).unwrap_or_default());
            } else {
                out.push_str(RAW_HTML_PLACEHOLDER);
            }
        }
        NodeType::Emphasis => {
            out.push_str("<em>");
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str("</em>");
        }
        NodeType::Strong => {
            out.push_str("<strong>");
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str("</strong>");
        }
        NodeType::Link => {
            out.push_str(&format!(
                "<a href=\"{}\"",
                html_escape::encode_double_quoted_attribute(&safe_url(node, option_flags))
            ));
            let title = store::title(node).unwrap_or_default();
            if !title.is_empty() {
                out.push_str(&format!(
                    " title=\"{}\"",
                    html_escape::encode_double_quoted_attribute(&title)
                ));
            }
            out.push('>');
            for child in children(node) {
                walk(child, option_flags, out);
            }
            out.push_str("</a>");
        }
        NodeType::Image => {
            out.push_str(&format!(
                "<img src=\"{}\" alt=\"{}\"",
                html_escape::encode_double_quoted_attribute(&safe_url(node, option_flags)),
                html_escape::encode_double_quoted_attribute(&plain_text(node))
            ));
            let title = store::title(node).unwrap_or_default();
            if !title.is_empty() {
                out.push_str(&format!(
                    " title=\"{}\"",
                    html_escape::encode_double_quoted_attribute(&title)
                ));
            }
            out.push_str(" />");
        }
    }
}

fn pos_attr(node: NodeHandle, option_flags: u32) -> String {
    if option_flags & flags::SOURCE_POS == 0 {
        return String::new();
    }
    match store::extent(node) {
        Some(e) => format!(
            " data-sourcepos=\"{}:{}-{}:{}\"",
            e.start_line, e.start_column, e.end_line, e.end_column
        ),
        None => String::new(),
    }
}

/// Link destinations with dangerous schemes are replaced by the empty
/// string unless the unsafe flag is set.
fn safe_url(node: NodeHandle, option_flags: u32) -> String {
    let url = store::url(node).unwrap_or_default();
    if option_flags & flags::UNSAFE != 0 || !is_unsafe_url(&url) {
        url
    } else {
        String::new()
    }
}

fn is_unsafe_url(url: &str) -> bool {
    const SAFE_DATA_PREFIXES: [&str; 4] = [
        "data:image/png",
        "data:image/gif",
        "data:image/jpeg",
        "data:image/webp",
    ];
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("vbscript:")
        || lower.starts_with("file:")
    {
        return true;
    }
    lower.starts_with("data:") && !SAFE_DATA_PREFIXES.iter().any(|p| lower.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_document;
    use pretty_assertions::assert_eq;

    fn to_html(source: &str, option_flags: u32) -> String {
        let root = parse_document(source, flags::DEFAULT).expect("parse");
        let html = render(root, option_flags);
        store::free(root);
        html
    }

    #[test]
    fn heading_and_paragraph() {
        assert_eq!(
            to_html("# Hi\n\ntext\n", flags::DEFAULT),
            "<h1>Hi</h1>\n<p>text</p>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(to_html("a < b & c\n", flags::DEFAULT), "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn raw_html_is_replaced_unless_unsafe() {
        let source = "<div>boo</div>\n";
        assert_eq!(to_html(source, flags::DEFAULT), "<!-- raw HTML omitted -->\n");
        assert_eq!(to_html(source, flags::UNSAFE), "<div>boo</div>\n");
    }

    #[test]
    fn unsafe_links_are_emptied() {
        let source = "[x](javascript:alert(1))\n";
        assert_eq!(to_html(source, flags::DEFAULT), "<p><a href=\"\">x</a></p>\n");
        assert!(to_html(source, flags::UNSAFE).contains("javascript:alert(1)"));
    }

    #[test]
    fn data_image_urls_stay() {
        let source = "[x](data:image/png;base64,AAAA)\n";
        assert!(to_html(source, flags::DEFAULT).contains("data:image/png"));
    }

    #[test]
    fn soft_break_flags() {
        let source = "one\ntwo\n";
        assert_eq!(to_html(source, flags::DEFAULT), "<p>one\ntwo</p>\n");
        assert_eq!(to_html(source, flags::NO_BREAKS), "<p>one two</p>\n");
        assert_eq!(to_html(source, flags::HARD_BREAKS), "<p>one<br />\ntwo</p>\n");
    }

    #[test]
    fn source_positions_annotate_blocks() {
        let html = to_html("# Hi\n", flags::SOURCE_POS);
        assert!(html.starts_with("<h1 data-sourcepos=\"1:1-"));
    }

    #[test]
    fn ordered_list_with_start() {
        let html = to_html("3. a\n4. b\n", flags::DEFAULT);
        assert!(html.starts_with("<ol start=\"3\">"));
        assert_eq!(html.matches("<li>").count(), 2);
    }
}
