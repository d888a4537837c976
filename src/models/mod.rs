// src/models/mod.rs

//! Domain models for the portfolio.
//!
//! Records are owned by the content store; the site only holds read-only
//! copies for the duration of a render.

mod article;
mod config;
mod profile;
mod project;
pub mod rich_text;

// Re-export all public types
pub use article::{Article, Author};
pub use config::{CacheConfig, CmsConfig, Config, HttpConfig, SiteConfig, TOKEN_ENV};
pub use profile::{Experience, Profile, SocialLink};
pub use project::{Project, ProjectStats, ProjectStatus, check_unique_slugs};
pub use rich_text::{Block, Document, ListKind, Mark, Span};

/// Lenient field decoders shared by the CMS-facing models.
///
/// GROQ projections return `null` for missing fields, and a few fields have
/// more than one wire shape depending on the schema revision.
pub(crate) mod de {
    use chrono::{DateTime, NaiveDate};
    use serde::{Deserialize, Deserializer};

    /// Treat `null` like a missing field.
    pub fn nullable<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
    }

    /// A list of strings where `null` entries and blanks are dropped.
    ///
    /// Dereferenced assets that were never uploaded come back as `null`.
    pub fn string_list<'de, D>(d: D) -> std::result::Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Vec<Option<String>>>::deserialize(d)?
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect())
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SlugRepr {
        Plain(String),
        Object { current: Option<String> },
    }

    /// Accept `"slug"` as well as `{ "current": "slug" }`.
    pub fn slug<'de, D>(d: D) -> std::result::Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<SlugRepr>::deserialize(d)? {
            Some(SlugRepr::Plain(s)) => s,
            Some(SlugRepr::Object { current }) => current.unwrap_or_default(),
            None => String::new(),
        })
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextRepr {
        Text(String),
        List(Vec<String>),
    }

    /// Accept a text field or a list of paragraphs (joined by blank lines).
    pub fn text_or_list<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = match Option::<TextRepr>::deserialize(d)? {
            Some(TextRepr::Text(s)) => s,
            Some(TextRepr::List(items)) => items.join("\n\n"),
            None => String::new(),
        };
        let text = text.trim();
        Ok((!text.is_empty()).then(|| text.to_string()))
    }

    /// Parse a plain date or an RFC 3339 timestamp; anything else is dropped.
    pub fn date<'de, D>(d: D) -> std::result::Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(d)?.and_then(|s| parse_date(&s)))
    }

    pub fn parse_date(s: &str) -> Option<NaiveDate> {
        let s = s.trim();
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::de::parse_date;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 12, 1);
        assert_eq!(parse_date("2024-12-01"), expected);
        assert_eq!(parse_date("2024-12-01T08:30:00Z"), expected);
        assert_eq!(parse_date("December 1st"), None);
    }
}
