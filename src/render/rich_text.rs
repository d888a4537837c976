// src/render/rich_text.rs

//! Rich-text to HTML.
//!
//! One construct per block. Consecutive list items are grouped into
//! `<ul>`/`<ol>` elements nested by level. Headings get `heading-{n}`
//! anchors, numbered in document order, which the table of contents links
//! to.

use std::fmt::Write;

use super::html::{escape, image};
use crate::models::{Block, Document, ListKind, Mark, Span};
use crate::utils::url::is_safe_href;

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

fn anchor(index: usize) -> String {
    format!("heading-{index}")
}

/// Headings of `document` with their anchors.
pub fn toc(document: &Document) -> Vec<TocEntry> {
    document
        .headings()
        .into_iter()
        .enumerate()
        .map(|(i, (level, text))| TocEntry {
            level,
            text,
            anchor: anchor(i),
        })
        .collect()
}

/// Table of contents as a nav list; empty when there are no headings.
pub fn render_toc(entries: &[TocEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut out = String::from("<nav class=\"toc\"><ul>");
    for entry in entries {
        let _ = write!(
            out,
            "<li class=\"toc-level-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level,
            entry.anchor,
            escape(&entry.text)
        );
    }
    out.push_str("</ul></nav>");
    out
}

/// Render a whole document.
pub fn render_document(document: &Document) -> String {
    let mut out = String::new();
    let mut lists = ListStack::default();
    let mut headings = 0usize;

    for block in &document.blocks {
        if let Block::ListItem { kind, level, spans } = block {
            lists.item(&mut out, *kind, *level);
            out.push_str(&render_spans(spans));
            continue;
        }
        lists.close_all(&mut out);

        match block {
            Block::Paragraph(spans) => {
                if spans.iter().any(|s| !s.text.is_empty()) {
                    let _ = write!(out, "<p>{}</p>", render_spans(spans));
                }
            }
            Block::Heading { level, spans } => {
                let _ = write!(
                    out,
                    "<h{level} id=\"{}\">{}</h{level}>",
                    anchor(headings),
                    render_spans(spans)
                );
                headings += 1;
            }
            Block::Blockquote(spans) => {
                let _ = write!(out, "<blockquote>{}</blockquote>", render_spans(spans));
            }
            Block::Image { url, alt, caption } => {
                let img = image(url, alt.as_deref().unwrap_or_default());
                if img.is_empty() {
                    log::debug!("Dropping image with unsafe source");
                    continue;
                }
                out.push_str("<figure>");
                out.push_str(&img);
                if let Some(caption) = caption.as_deref().filter(|c| !c.trim().is_empty()) {
                    let _ = write!(out, "<figcaption>{}</figcaption>", escape(caption));
                }
                out.push_str("</figure>");
            }
            Block::Code { language, code } => {
                match language {
                    Some(lang) => {
                        let _ = write!(out, "<pre><code class=\"language-{}\">", escape(lang));
                    }
                    None => out.push_str("<pre><code>"),
                }
                out.push_str(&escape(code));
                out.push_str("</code></pre>");
            }
            Block::Unknown { kind, text } => match text {
                Some(text) => {
                    let _ = write!(out, "<p>{}</p>", escape(text));
                }
                None => log::debug!("Skipping empty '{kind}' block"),
            },
            Block::ListItem { .. } => {}
        }
    }
    lists.close_all(&mut out);
    out
}

/// Open list elements while walking consecutive list items.
#[derive(Default)]
struct ListStack {
    open: Vec<(ListKind, u8)>,
}

impl ListStack {
    fn item(&mut self, out: &mut String, kind: ListKind, level: u8) {
        while let Some(&(top_kind, top_level)) = self.open.last() {
            if top_level > level || (top_level == level && top_kind != kind) {
                self.pop(out);
            } else {
                break;
            }
        }
        match self.open.last() {
            Some(&(_, top_level)) if top_level == level => out.push_str("</li>"),
            _ => {
                out.push_str(list_tag(kind, true));
                self.open.push((kind, level));
            }
        }
        out.push_str("<li>");
    }

    fn pop(&mut self, out: &mut String) {
        if let Some((kind, _)) = self.open.pop() {
            out.push_str("</li>");
            out.push_str(list_tag(kind, false));
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while !self.open.is_empty() {
            self.pop(out);
        }
    }
}

fn list_tag(kind: ListKind, open: bool) -> &'static str {
    match (kind, open) {
        (ListKind::Bullet, true) => "<ul>",
        (ListKind::Bullet, false) => "</ul>",
        (ListKind::Number, true) => "<ol>",
        (ListKind::Number, false) => "</ol>",
    }
}

fn render_spans(spans: &[Span]) -> String {
    spans.iter().map(render_span).collect()
}

fn render_span(span: &Span) -> String {
    let mut open = String::new();
    let mut close: Vec<String> = Vec::new();

    for mark in &span.marks {
        let tags = match mark {
            Mark::Emphasis => Some(("<em>".to_string(), "</em>")),
            Mark::Strong => Some(("<strong>".to_string(), "</strong>")),
            Mark::Code => Some(("<code>".to_string(), "</code>")),
            Mark::Underline => Some(("<u>".to_string(), "</u>")),
            Mark::StrikeThrough => Some(("<s>".to_string(), "</s>")),
            Mark::Link { href } if is_safe_href(href) => {
                Some((format!("<a href=\"{}\">", escape(href.trim())), "</a>"))
            }
            Mark::Link { href } => {
                log::debug!("Dropping unsafe link '{href}'");
                None
            }
            Mark::Unknown(_) => None,
        };
        if let Some((start, end)) = tags {
            open.push_str(&start);
            close.push(end.to_string());
        }
    }

    let mut out = open;
    out.push_str(&escape(&span.text));
    for end in close.iter().rev() {
        out.push_str(end);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};
    use serde_json::json;

    fn select<'a>(html: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
        let selector = Selector::parse(css).unwrap();
        html.select(&selector).collect()
    }

    fn item(kind: ListKind, level: u8, text: &str) -> Block {
        Block::ListItem {
            kind,
            level,
            spans: vec![Span::plain(text)],
        }
    }

    #[test]
    fn test_block_constructs() {
        let doc = Document::new(vec![
            Block::Heading {
                level: 2,
                spans: vec![Span::plain("Intro")],
            },
            Block::Paragraph(vec![
                Span::plain("Hello "),
                Span::marked("world", vec![Mark::Strong, Mark::Emphasis]),
            ]),
            Block::Blockquote(vec![Span::plain("Quoted")]),
            Block::Image {
                url: "/a.png".into(),
                alt: Some("A".into()),
                caption: Some("Caption".into()),
            },
            Block::Code {
                language: Some("rust".into()),
                code: "fn main() { a < b }".into(),
            },
        ]);
        let out = render_document(&doc);
        assert!(out.starts_with("<h2 id=\"heading-0\">Intro</h2>"));
        assert!(out.contains("<p>Hello <strong><em>world</em></strong></p>"));
        assert!(out.contains("<blockquote>Quoted</blockquote>"));
        assert!(out.contains("<figcaption>Caption</figcaption>"));
        assert!(out.contains("<pre><code class=\"language-rust\">fn main() { a &lt; b }</code></pre>"));
    }

    #[test]
    fn test_lists_grouped_and_nested() {
        let doc = Document::new(vec![
            item(ListKind::Bullet, 1, "a"),
            item(ListKind::Bullet, 2, "a.1"),
            item(ListKind::Bullet, 2, "a.2"),
            item(ListKind::Bullet, 1, "b"),
            Block::Paragraph(vec![Span::plain("between")]),
            item(ListKind::Number, 1, "one"),
            item(ListKind::Number, 1, "two"),
        ]);
        let out = render_document(&doc);
        assert_eq!(
            out,
            "<ul><li>a<ul><li>a.1</li><li>a.2</li></ul></li><li>b</li></ul>\
             <p>between</p><ol><li>one</li><li>two</li></ol>"
        );

        let html = Html::parse_fragment(&out);
        assert_eq!(select(&html, "ul > li > ul > li").len(), 2);
        assert_eq!(select(&html, "ol > li").len(), 2);
    }

    #[test]
    fn test_list_kind_change_starts_new_list() {
        let doc = Document::new(vec![
            item(ListKind::Bullet, 1, "x"),
            item(ListKind::Number, 1, "y"),
        ]);
        assert_eq!(
            render_document(&doc),
            "<ul><li>x</li></ul><ol><li>y</li></ol>"
        );
    }

    #[test]
    fn test_unknown_blocks_do_not_abort_siblings() {
        let doc = Document::from_value(&json!([
            {"_type": "block", "children": [{"_type": "span", "text": "before"}]},
            {"_type": "youtube", "url": "https://youtu.be/x"},
            {"_type": "callout", "text": "Heads up"},
            {"_type": "block", "children": "not a list"},
            {"_type": "block", "children": [{"_type": "span", "text": "after"}]}
        ]));
        let out = render_document(&doc);
        assert_eq!(out, "<p>before</p><p>Heads up</p><p>after</p>");
    }

    #[test]
    fn test_unknown_mark_renders_plain_text() {
        let doc = Document::new(vec![Block::Paragraph(vec![Span::marked(
            "glossary",
            vec![Mark::Unknown("abc123".into())],
        )])]);
        assert_eq!(render_document(&doc), "<p>glossary</p>");
    }

    #[test]
    fn test_text_and_links_are_escaped() {
        let doc = Document::new(vec![Block::Paragraph(vec![
            Span::plain("<script>alert(1)</script>"),
            Span::marked(
                "bad",
                vec![Mark::Link {
                    href: "javascript:alert(1)".into(),
                }],
            ),
            Span::marked(
                "good",
                vec![Mark::Link {
                    href: "https://example.com/?a=1&b=\"2\"".into(),
                }],
            ),
        ])]);
        let out = render_document(&doc);
        assert!(!out.contains("<script>"));
        assert!(!out.contains("javascript:"));
        assert!(out.contains("bad"));
        assert!(out.contains("href=\"https://example.com/?a=1&amp;b=&quot;2&quot;\""));

        let html = Html::parse_fragment(&out);
        assert_eq!(select(&html, "a").len(), 1);
        assert!(select(&html, "script").is_empty());
    }

    #[test]
    fn test_toc_matches_heading_anchors() {
        let doc = Document::new(vec![
            Block::Heading {
                level: 2,
                spans: vec![Span::plain("First")],
            },
            Block::Paragraph(vec![Span::plain("text")]),
            Block::Heading {
                level: 3,
                spans: vec![Span::plain("Second & more")],
            },
        ]);
        let entries = toc(&doc);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].anchor, "heading-1");
        assert_eq!(entries[1].level, 3);

        let body = render_document(&doc);
        for entry in &entries {
            assert!(body.contains(&format!("id=\"{}\"", entry.anchor)));
        }
        let nav = render_toc(&entries);
        assert!(nav.contains("<a href=\"#heading-1\">Second &amp; more</a>"));
        assert_eq!(render_toc(&[]), "");
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(render_document(&Document::default()), "");
    }
}
