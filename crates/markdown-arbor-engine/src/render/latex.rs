//! LaTeX (typeset) target.

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
            let command = match store::heading_level(node).unwrap_or(1) {
                1 => "section",
                2 => "subsection",
                3 => "subsubsection",
                4 => "paragraph",
                _ => "subparagraph",
            };
            out.push_str(&format!("\\{command}{{"));
            for child in children(node) {
                walk(child, out);
            }
            out.push_str("}\n\n");
        }
        NodeType::Paragraph => {
            for child in children(node) {
                walk(child, out);
            }
            out.push_str("\n\n");
        }
        NodeType::BlockQuote => {
            out.push_str("\\begin{quote}\n");
            for child in children(node) {
                walk(child, out);
            }
            out.push_str("\\end{quote}\n\n");
        }
        NodeType::List => {
            let environment = match store::list_kind(node) {
                Some(ListKind::Ordered) => "enumerate",
                _ => "itemize",
            };
            out.push_str(&format!("\\begin{{{environment}}}\n"));
            for child in children(node) {
                walk(child, out);
            }
            out.push_str(&format!("\\end{{{environment}}}\n\n"));
        }
        NodeType::Item => {
            out.push_str("\\item ");
            for child in children(node) {
                walk(child, out);
            }
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }
        NodeType::CodeBlock => {
            out.push_str("\\begin{verbatim}\n");
            out.push_str(&store::literal(node).unwrap_or_default());
            out.push_str("\\end{verbatim}\n\n");
        }
        // Raw HTML has no typeset form.
        NodeType::HtmlBlock | NodeType::HtmlInline => {}
        NodeType::ThematicBreak => {
            out.push_str("\\begin{center}\\rule{0.5\\linewidth}{0.5pt}\\end{center}\n\n");
        }
        NodeType::Text => out.push_str(&escape(&store::literal(node).unwrap_or_default())),
        NodeType::SoftBreak => out.push('\n'),
        NodeType::LineBreak => out.push_str("\\\\\n"),
        NodeType::Code => {
            out.push_str(&format!(
                "\\texttt{{{}}}",
                escape(&store::literal(node).unwrap_or_default())
            ));
        }
        NodeType::Emphasis => {
            out.push_str("\\emph{");
            for child in children(node) {
                walk(child, out);
            }
            out.push('}');
        }
        NodeType::Strong => {
            out.push_str("\\textbf{");
            for child in children(node) {
                walk(child, out);
            }
            out.push('}');
        }
        NodeType::Link => {
            out.push_str(&format!(
                "\\href{{{}}}{{",
                escape(&store::url(node).unwrap_or_default())
            ));
            for child in children(node) {
                walk(child, out);
            }
            out.push('}');
        }
        NodeType::Image => {
            out.push_str(&format!(
                "\\includegraphics{{{}}}",
                escape(&store::url(node).unwrap_or_default())
            ));
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' | '%' | '$' | '#' | '_' | '{' | '}' => {
                out.push('\\');
                out.push(c);
            }
            '~' => out.push_str("\\textasciitilde{}"),
            '^' => out.push_str("\\textasciicircum{}"),
            '\\' => out.push_str("\\textbackslash{}"),
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

    fn to_latex(source: &str) -> String {
        let root = parse_document(source, flags::DEFAULT).expect("parse");
        let latex = render(root);
        store::free(root);
        latex
    }

    #[test]
    fn sections_by_heading_level() {
        assert!(to_latex("# One\n").contains("\\section{One}"));
        assert!(to_latex("## Two\n").contains("\\subsection{Two}"));
    }

    #[test]
    fn special_characters_are_escaped() {
        assert!(to_latex("100% & more\n").contains("100\\% \\& more"));
    }

    #[test]
    fn lists_use_environments() {
        let latex = to_latex("- a\n- b\n");
        assert!(latex.contains("\\begin{itemize}"));
        assert_eq!(latex.matches("\\item ").count(), 2);
    }
}
