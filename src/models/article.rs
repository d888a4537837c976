//! Blog-style article records.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::de::{date, nullable, slug, string_list};
use super::rich_text::Document;
use crate::error::{AppError, Result};

/// Reading speed used to estimate read time.
const WORDS_PER_MINUTE: usize = 200;

/// An article with a structured rich-text body.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,

    /// Stable identifier, unique within the article set
    #[serde(default, deserialize_with = "slug")]
    pub slug: String,

    #[serde(default, deserialize_with = "nullable")]
    pub title: String,

    #[serde(default, deserialize_with = "nullable")]
    pub excerpt: String,

    #[serde(default, deserialize_with = "author")]
    pub author: Author,

    #[serde(default, deserialize_with = "date")]
    pub published_at: Option<NaiveDate>,

    /// Read time as authored ("5 min read"); estimated when absent
    #[serde(default, deserialize_with = "read_time")]
    pub read_time: Option<String>,

    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,

    /// Canonical location when the article was first published elsewhere
    #[serde(default)]
    pub external_url: Option<String>,

    #[serde(default, alias = "content")]
    pub body: Document,
}

/// Article author.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub avatar: Option<String>,
}

impl Article {
    /// Path of the detail page.
    pub fn href(&self) -> String {
        format!("/articles/{}", self.slug)
    }

    /// Authored read time, or an estimate from the body word count.
    pub fn read_time_label(&self) -> String {
        match self.read_time.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => format!("{} min read", estimate_minutes(self.body.word_count())),
        }
    }

    /// Publish date formatted for display, e.g. "December 1, 2024".
    pub fn display_date(&self) -> Option<String> {
        self.published_at
            .map(|d| d.format("%B %-d, %Y").to_string())
    }

    /// Check the record-level invariants.
    pub fn validate(&self) -> Result<()> {
        if self.slug.trim().is_empty() {
            return Err(AppError::validation(format!(
                "article '{}' has no slug",
                self.title
            )));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::validation(format!(
                "article '{}' has no title",
                self.slug
            )));
        }
        Ok(())
    }
}

/// Minutes to read `words`, never less than one.
pub fn estimate_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AuthorRepr {
    Name(String),
    Full {
        #[serde(default)]
        name: Option<String>,
        #[serde(default, alias = "image")]
        avatar: Option<String>,
    },
}

/// Accept `"Name"` as well as `{ "name": .., "avatar": .. }`.
fn author<'de, D>(d: D) -> std::result::Result<Author, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<AuthorRepr>::deserialize(d)? {
        Some(AuthorRepr::Name(name)) => Author { name, avatar: None },
        Some(AuthorRepr::Full { name, avatar }) => Author {
            name: name.unwrap_or_default(),
            avatar,
        },
        None => Author::default(),
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ReadTimeRepr {
    Label(String),
    Minutes(f64),
}

/// Accept `"5 min read"` or a bare number of minutes.
fn read_time<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<ReadTimeRepr>::deserialize(d)? {
        Some(ReadTimeRepr::Label(label)) => Some(label),
        Some(ReadTimeRepr::Minutes(m)) if m > 0.0 => {
            Some(format!("{} min read", m.round() as u64))
        }
        _ => None,
    })
}
