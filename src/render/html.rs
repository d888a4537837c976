// src/render/html.rs

//! Markup primitives shared by the templates.

use std::fmt::Write;

use crate::utils::url::is_safe_href;

/// Escape text for element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Anchor element, or the bare text when the href is unsafe.
pub fn link(href: &str, text: &str) -> String {
    if is_safe_href(href) {
        format!("<a href=\"{}\">{}</a>", escape(href), escape(text))
    } else {
        escape(text)
    }
}

/// Anchor that opens in a new tab, for off-site links.
pub fn external_link(href: &str, text: &str) -> String {
    if is_safe_href(href) {
        format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape(href),
            escape(text)
        )
    } else {
        escape(text)
    }
}

/// `<ul>` of pill-style labels; empty input renders nothing.
pub fn tag_list(class: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let mut out = format!("<ul class=\"{}\">", escape(class));
    for tag in tags {
        let _ = write!(out, "<li>{}</li>", escape(tag));
    }
    out.push_str("</ul>");
    out
}

/// Paragraphs separated by blank lines.
pub fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", escape(p)))
        .collect()
}

/// `<img>` element; unsafe sources render nothing.
pub fn image(src: &str, alt: &str) -> String {
    if is_safe_href(src) {
        format!(
            "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
            escape(src),
            escape(alt)
        )
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_link_drops_script_scheme() {
        assert_eq!(link("/projects", "All"), "<a href=\"/projects\">All</a>");
        assert_eq!(link("javascript:alert(1)", "<b>"), "&lt;b&gt;");
    }

    #[test]
    fn test_tag_list_and_paragraphs() {
        assert_eq!(tag_list("tags", &[]), "");
        assert_eq!(
            tag_list("tags", &["Rust".into(), "C&C".into()]),
            "<ul class=\"tags\"><li>Rust</li><li>C&amp;C</li></ul>"
        );
        assert_eq!(paragraphs("one\n\n\n\ntwo "), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_image() {
        assert!(image("/a.png", "A \"quote\"").contains("alt=\"A &quot;quote&quot;\""));
        assert_eq!(image("javascript:x", "a"), "");
    }
}
