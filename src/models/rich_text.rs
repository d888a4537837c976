// src/models/rich_text.rs

//! Structured rich-text documents (article bodies).
//!
//! The content store delivers Portable Text: an array of typed JSON blocks.
//! Each block is decoded on its own into the [`Block`] sum type, so a block
//! of an unknown or malformed shape becomes [`Block::Unknown`] instead of
//! failing the whole document.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use unicode_segmentation::UnicodeSegmentation;

use super::de::nullable;

/// An ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// One typed unit of rich-text content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Vec<Span>),
    Heading {
        level: u8,
        spans: Vec<Span>,
    },
    ListItem {
        kind: ListKind,
        level: u8,
        spans: Vec<Span>,
    },
    Blockquote(Vec<Span>),
    Image {
        url: String,
        alt: Option<String>,
        caption: Option<String>,
    },
    Code {
        language: Option<String>,
        code: String,
    },
    /// A block type this renderer does not know; `text` is whatever plain
    /// text could be salvaged from it.
    Unknown {
        kind: String,
        text: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

/// A run of text with inline marks.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub marks: Vec<Mark>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Emphasis,
    Strong,
    Code,
    Underline,
    StrikeThrough,
    Link { href: String },
    Unknown(String),
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            marks: Vec::new(),
        }
    }

    pub fn marked(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            text: text.into(),
            marks,
        }
    }
}

impl Block {
    /// Plain text carried by this block, without markup.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Paragraph(spans)
            | Block::Heading { spans, .. }
            | Block::ListItem { spans, .. }
            | Block::Blockquote(spans) => spans_text(spans),
            Block::Image { alt, caption, .. } => {
                caption.clone().or_else(|| alt.clone()).unwrap_or_default()
            }
            Block::Code { code, .. } => code.clone(),
            Block::Unknown { text, .. } => text.clone().unwrap_or_default(),
        }
    }
}

fn spans_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Decode a Portable Text array. Non-array input yields an empty document.
    pub fn from_value(value: &Value) -> Self {
        let blocks = match value {
            Value::Array(items) => items.iter().map(decode_block).collect(),
            _ => Vec::new(),
        };
        Self { blocks }
    }

    /// Headings in document order as `(level, text)`.
    pub fn headings(&self) -> Vec<(u8, String)> {
        self.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Heading { level, spans } => Some((*level, spans_text(spans))),
                _ => None,
            })
            .collect()
    }

    /// Plain text of the whole document, one block per line.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn word_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| !matches!(b, Block::Code { .. } | Block::Image { .. }))
            .map(|b| b.plain_text().unicode_words().count())
            .sum()
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(d)?.unwrap_or(Value::Null);
        Ok(Self::from_value(&value))
    }
}

// --- Portable Text wire shapes ---

#[derive(Deserialize)]
struct RawBlock {
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    kind: String,
    #[serde(default, deserialize_with = "nullable")]
    style: String,
    #[serde(rename = "listItem", default, deserialize_with = "nullable")]
    list_item: String,
    #[serde(default)]
    level: Option<u8>,
    #[serde(default, deserialize_with = "nullable")]
    children: Vec<RawSpan>,
    #[serde(rename = "markDefs", default, deserialize_with = "nullable")]
    mark_defs: Vec<RawMarkDef>,
    #[serde(default)]
    asset: Option<RawAsset>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    caption: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct RawSpan {
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    kind: String,
    #[serde(default, deserialize_with = "nullable")]
    text: String,
    #[serde(default, deserialize_with = "nullable")]
    marks: Vec<String>,
}

#[derive(Deserialize)]
struct RawMarkDef {
    #[serde(rename = "_key", default, deserialize_with = "nullable")]
    key: String,
    #[serde(rename = "_type", default, deserialize_with = "nullable")]
    kind: String,
    #[serde(default)]
    href: Option<String>,
}

#[derive(Deserialize)]
struct RawAsset {
    #[serde(default)]
    url: Option<String>,
}

fn decode_block(value: &Value) -> Block {
    match RawBlock::deserialize(value) {
        Ok(raw) => raw.into_block(),
        Err(e) => {
            let kind = value
                .get("_type")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            log::debug!("Undecodable {} block: {}", kind, e);
            Block::Unknown { kind, text: None }
        }
    }
}

impl RawBlock {
    fn into_block(self) -> Block {
        let kind = self.kind.clone();
        match kind.as_str() {
            "block" => self.into_text_block(),
            "image" => {
                let url = self.asset.and_then(|a| a.url).or(self.url);
                match url.filter(|u| !u.trim().is_empty()) {
                    Some(url) => Block::Image {
                        url,
                        alt: self.alt,
                        caption: self.caption,
                    },
                    None => Block::Unknown {
                        kind: self.kind,
                        text: self.caption,
                    },
                }
            }
            "code" => Block::Code {
                language: self.language.filter(|l| !l.trim().is_empty()),
                code: self.code.or(self.text).unwrap_or_default(),
            },
            _ => {
                let salvaged = if self.children.is_empty() {
                    self.text.unwrap_or_default()
                } else {
                    self.children.iter().map(|c| c.text.as_str()).collect()
                };
                Block::Unknown {
                    kind: self.kind,
                    text: (!salvaged.trim().is_empty()).then_some(salvaged),
                }
            }
        }
    }

    fn into_text_block(self) -> Block {
        let spans: Vec<Span> = self
            .children
            .iter()
            .filter(|c| c.kind.is_empty() || c.kind == "span")
            .map(|c| Span {
                text: c.text.clone(),
                marks: c.marks.iter().map(|m| self.resolve_mark(m)).collect(),
            })
            .collect();

        if !self.list_item.is_empty() {
            let kind = match self.list_item.as_str() {
                "number" => ListKind::Number,
                _ => ListKind::Bullet,
            };
            return Block::ListItem {
                kind,
                level: self.level.unwrap_or(1).max(1),
                spans,
            };
        }

        match self.style.as_str() {
            "blockquote" => Block::Blockquote(spans),
            style => match heading_level(style) {
                Some(level) => Block::Heading { level, spans },
                None => Block::Paragraph(spans),
            },
        }
    }

    fn resolve_mark(&self, name: &str) -> Mark {
        match name {
            "em" => Mark::Emphasis,
            "strong" => Mark::Strong,
            "code" => Mark::Code,
            "underline" => Mark::Underline,
            "strike-through" => Mark::StrikeThrough,
            key => self
                .mark_defs
                .iter()
                .find(|def| def.key == key)
                .and_then(|def| match (def.kind.as_str(), &def.href) {
                    ("link", Some(href)) => Some(Mark::Link { href: href.clone() }),
                    _ => None,
                })
                .unwrap_or_else(|| Mark::Unknown(key.to_string())),
        }
    }
}

/// `h1`..`h6`; larger numbers clamp to 6, `h0` to 1.
fn heading_level(style: &str) -> Option<u8> {
    let digits = style.strip_prefix('h')?;
    let level: u8 = digits.parse().ok()?;
    Some(level.clamp(1, 6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_heading_and_paragraph() {
        let doc = Document::from_value(&json!([
            {"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Intro"}]},
            {"_type": "block", "style": "normal", "markDefs": [], "children": [
                {"_type": "span", "text": "Hello ", "marks": []},
                {"_type": "span", "text": "world", "marks": ["strong", "em"]}
            ]}
        ]));

        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(
            doc.blocks[0],
            Block::Heading {
                level: 2,
                spans: vec![Span::plain("Intro")]
            }
        );
        assert_eq!(
            doc.blocks[1],
            Block::Paragraph(vec![
                Span::plain("Hello "),
                Span::marked("world", vec![Mark::Strong, Mark::Emphasis]),
            ])
        );
    }

    #[test]
    fn test_decode_link_mark_def() {
        let doc = Document::from_value(&json!([
            {"_type": "block", "markDefs": [{"_key": "k1", "_type": "link", "href": "https://example.com"}],
             "children": [{"_type": "span", "text": "site", "marks": ["k1", "mystery"]}]}
        ]));

        let Block::Paragraph(spans) = &doc.blocks[0] else {
            panic!("expected paragraph, got {:?}", doc.blocks[0]);
        };
        assert_eq!(
            spans[0].marks,
            vec![
                Mark::Link {
                    href: "https://example.com".into()
                },
                Mark::Unknown("mystery".into())
            ]
        );
    }

    #[test]
    fn test_decode_list_items() {
        let doc = Document::from_value(&json!([
            {"_type": "block", "listItem": "bullet", "level": 1, "children": [{"_type": "span", "text": "one"}]},
            {"_type": "block", "listItem": "number", "level": 2, "children": [{"_type": "span", "text": "two"}]},
            {"_type": "block", "listItem": "checkbox", "children": [{"_type": "span", "text": "three"}]}
        ]));

        assert!(matches!(
            doc.blocks[0],
            Block::ListItem { kind: ListKind::Bullet, level: 1, .. }
        ));
        assert!(matches!(
            doc.blocks[1],
            Block::ListItem { kind: ListKind::Number, level: 2, .. }
        ));
        assert!(matches!(
            doc.blocks[2],
            Block::ListItem { kind: ListKind::Bullet, level: 1, .. }
        ));
    }

    #[test]
    fn test_unknown_and_malformed_blocks_do_not_abort() {
        let doc = Document::from_value(&json!([
            {"_type": "youtube", "url": "https://youtu.be/x"},
            {"_type": "block", "children": "not-a-list"},
            {"_type": "callout", "children": [{"_type": "span", "text": "Heads up"}]},
            {"_type": "block", "children": [{"_type": "span", "text": "still here"}]}
        ]));

        assert_eq!(doc.blocks.len(), 4);
        assert_eq!(
            doc.blocks[0],
            Block::Unknown {
                kind: "youtube".into(),
                text: None
            }
        );
        assert!(matches!(&doc.blocks[1], Block::Unknown { kind, .. } if kind == "block"));
        assert_eq!(
            doc.blocks[2],
            Block::Unknown {
                kind: "callout".into(),
                text: Some("Heads up".into())
            }
        );
        assert_eq!(doc.blocks[3].plain_text(), "still here");
    }

    #[test]
    fn test_image_and_code_blocks() {
        let doc = Document::from_value(&json!([
            {"_type": "image", "asset": {"url": "https://cdn.example.com/a.png"}, "alt": "diagram"},
            {"_type": "image", "alt": "no source"},
            {"_type": "code", "language": "rust", "code": "fn main() {}"}
        ]));

        assert_eq!(
            doc.blocks[0],
            Block::Image {
                url: "https://cdn.example.com/a.png".into(),
                alt: Some("diagram".into()),
                caption: None
            }
        );
        assert!(matches!(doc.blocks[1], Block::Unknown { .. }));
        assert_eq!(
            doc.blocks[2],
            Block::Code {
                language: Some("rust".into()),
                code: "fn main() {}".into()
            }
        );
    }

    #[test]
    fn test_heading_level_clamps() {
        assert_eq!(heading_level("h1"), Some(1));
        assert_eq!(heading_level("h9"), Some(6));
        assert_eq!(heading_level("h0"), Some(1));
        assert_eq!(heading_level("normal"), None);
    }

    #[test]
    fn test_null_and_non_array_bodies() {
        let doc: Document = serde_json::from_value(json!(null)).unwrap();
        assert!(doc.is_empty());
        let doc: Document = serde_json::from_value(json!({"oops": true})).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_word_count_skips_code() {
        let doc = Document::new(vec![
            Block::Paragraph(vec![Span::plain("three little words")]),
            Block::Code {
                language: None,
                code: "let ignored = true;".into(),
            },
        ]);
        assert_eq!(doc.word_count(), 3);
    }
}
