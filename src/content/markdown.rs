//! Markdown rendering for the small dialect used in post content
//!
//! The renderer is a fixed, line-oriented pipeline of substitutions. Each stage
//! works on the output of the previous one, so the order below is part of the
//! output format:
//!
//! 1. headings (`#`, `##`, `###`)
//! 2. bold, then italics
//! 3. inline code
//! 4. list items, with each contiguous run wrapped in `<ul>` or `<ol>`
//! 5. paragraphs, then unwrapping of headings and list containers
//!
//! Nested blocks, blockquotes, links, images and fenced code are not
//! recognised. Embedded HTML is passed through untouched.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref H3: Regex = Regex::new(r"(?m)^### (.*)$").unwrap();
    static ref H2: Regex = Regex::new(r"(?m)^## (.*)$").unwrap();
    static ref H1: Regex = Regex::new(r"(?m)^# (.*)$").unwrap();
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
    static ref ITALIC: Regex = Regex::new(r"\*(.+?)\*").unwrap();
    static ref CODE: Regex = Regex::new(r"`(.+?)`").unwrap();
    static ref UNORDERED_ITEM: Regex = Regex::new(r"^- (.*)$").unwrap();
    static ref ORDERED_ITEM: Regex = Regex::new(r"^\d+\. (.*)$").unwrap();
    static ref WRAPPED_HEADING: Regex =
        Regex::new(r"(?m)^<p>(<h[1-6]>.*</h[1-6]>)</p>$").unwrap();
    static ref WRAPPED_LIST: Regex =
        Regex::new(r"(?m)^<p>(<(?:ul|ol)>.*</(?:ul|ol)>)</p>$").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    fn tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

/// Render markdown to HTML.
///
/// Identical input always yields byte-identical output.
pub fn render_markdown(markdown: &str) -> String {
    let text = markdown.replace("\r\n", "\n");

    let text = H3.replace_all(&text, "<h3>$1</h3>");
    let text = H2.replace_all(&text, "<h2>$1</h2>");
    let text = H1.replace_all(&text, "<h1>$1</h1>");

    let text = BOLD.replace_all(&text, "<strong>$1</strong>");
    let text = ITALIC.replace_all(&text, "<em>$1</em>");

    let text = CODE.replace_all(&text, "<code>$1</code>");

    let text = wrap_lists(&text);

    wrap_paragraphs(&text)
}

/// Turn list lines into `<li>` items and join each run into one container line
fn wrap_lists(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut run: Option<(ListKind, String)> = None;

    for line in text.split('\n') {
        let item = if let Some(caps) = UNORDERED_ITEM.captures(line) {
            Some((ListKind::Unordered, caps[1].to_string()))
        } else {
            ORDERED_ITEM
                .captures(line)
                .map(|caps| (ListKind::Ordered, caps[1].to_string()))
        };

        match item {
            Some((kind, body)) => match run.as_mut() {
                Some((current, items)) if *current == kind => {
                    items.push_str(&format!("<li>{}</li>", body));
                }
                _ => {
                    if let Some(finished) = run.take() {
                        lines.push(close_list(finished));
                    }
                    run = Some((kind, format!("<li>{}</li>", body)));
                }
            },
            None => {
                if let Some(finished) = run.take() {
                    lines.push(close_list(finished));
                }
                lines.push(line.to_string());
            }
        }
    }

    if let Some(finished) = run.take() {
        lines.push(close_list(finished));
    }

    lines.join("\n")
}

fn close_list((kind, items): (ListKind, String)) -> String {
    format!("<{tag}>{items}</{tag}>", tag = kind.tag(), items = items)
}

/// Wrap every non-blank line in a paragraph, then unwrap block-level lines
fn wrap_paragraphs(text: &str) -> String {
    let wrapped = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(|line| format!("<p>{}</p>", line))
        .collect::<Vec<_>>()
        .join("\n");

    let cleaned = WRAPPED_HEADING.replace_all(&wrapped, "$1");
    WRAPPED_LIST.replace_all(&cleaned, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_heading_without_paragraph() {
        let html = render_markdown("# Hi");
        assert_eq!(html, "<h1>Hi</h1>");
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_render_heading_levels() {
        let html = render_markdown("# One\n## Two\n### Three\n#### Four");
        assert_eq!(
            html,
            "<h1>One</h1>\n<h2>Two</h2>\n<h3>Three</h3>\n<p>#### Four</p>"
        );
    }

    #[test]
    fn test_render_emphasis() {
        let html = render_markdown("**bold** and *italic*");
        assert_eq!(html, "<p><strong>bold</strong> and <em>italic</em></p>");
        assert!(!html.contains('*'));
    }

    #[test]
    fn test_render_inline_code() {
        let html = render_markdown("Name it `user.github.io` today");
        assert_eq!(html, "<p>Name it <code>user.github.io</code> today</p>");
    }

    #[test]
    fn test_render_unordered_list() {
        let html = render_markdown("## Features\n\n- **Fast**: yes\n- Simple\n\nDone!");
        assert_eq!(
            html,
            "<h2>Features</h2>\n<ul><li><strong>Fast</strong>: yes</li><li>Simple</li></ul>\n<p>Done!</p>"
        );
    }

    #[test]
    fn test_render_ordered_list() {
        let html = render_markdown("1. First\n2. Second\n10. Tenth");
        assert_eq!(html, "<ol><li>First</li><li>Second</li><li>Tenth</li></ol>");
    }

    #[test]
    fn test_render_separate_list_runs() {
        let html = render_markdown("- a\n- b\n\nbetween\n\n- c\n1. d");
        assert_eq!(
            html,
            "<ul><li>a</li><li>b</li></ul>\n<p>between</p>\n<ul><li>c</li></ul>\n<ol><li>d</li></ol>"
        );
    }

    #[test]
    fn test_render_paragraphs() {
        let html = render_markdown("First line\nSecond line\n\n\nThird");
        assert_eq!(html, "<p>First line</p>\n<p>Second line</p>\n<p>Third</p>");
    }

    #[test]
    fn test_render_crlf_input() {
        assert_eq!(
            render_markdown("# Title\r\n\r\nBody"),
            render_markdown("# Title\n\nBody")
        );
    }

    #[test]
    fn test_render_empty_input() {
        assert_eq!(render_markdown(""), "");
        assert_eq!(render_markdown("\n\n  \n"), "");
    }

    #[test]
    fn test_render_is_deterministic() {
        let input = crate::content::sample_posts()
            .into_iter()
            .map(|p| p.content)
            .collect::<Vec<_>>()
            .join("\n\n");
        assert_eq!(render_markdown(&input), render_markdown(&input));
    }

    #[test]
    fn test_render_sample_post() {
        let post = &crate::content::sample_posts()[2];
        let html = render_markdown(&post.content);
        assert!(html.starts_with("<h1>Getting Started with GitHub Pages</h1>"));
        assert!(html.contains("<li>Name it <code>your-username.github.io</code> for a personal site</li>"));
        assert!(!html.contains("<p><h"));
        assert!(!html.contains("<p><ol>"));
    }
}
