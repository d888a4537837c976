//! Project showcase records.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::de::{nullable, slug, string_list, text_or_list};
use crate::error::{AppError, Result};

/// A project from the showcase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Content store document id
    #[serde(rename = "_id", default, deserialize_with = "nullable")]
    pub id: String,

    /// Creation timestamp as delivered by the store
    #[serde(
        rename = "_createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    /// Stable identifier, unique within the project set
    #[serde(default, deserialize_with = "slug")]
    pub slug: String,

    #[serde(default, deserialize_with = "nullable")]
    pub title: String,

    /// Short description shown on cards
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,

    /// Long description for the detail page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,

    /// Ordered list of technologies
    #[serde(default, deserialize_with = "string_list")]
    pub technologies: Vec<String>,

    /// Enum-like category value (e.g. "fullstack", "Mobile")
    #[serde(default, deserialize_with = "nullable")]
    pub category: String,

    #[serde(default)]
    pub status: ProjectStatus,

    /// Four-digit year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub featured: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_rank: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,

    /// Additional screenshots
    #[serde(default, alias = "images", deserialize_with = "string_list")]
    pub gallery: Vec<String>,

    #[serde(default, deserialize_with = "string_list")]
    pub features: Vec<String>,

    /// Technical challenges and how they were solved
    #[serde(
        default,
        deserialize_with = "text_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub challenges: Option<String>,

    #[serde(
        default,
        deserialize_with = "text_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub learnings: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,

    /// Same-category siblings, only populated by the detail query
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub related_projects: Vec<Project>,
}

impl Project {
    /// Year to display, falling back to the creation timestamp.
    pub fn display_year(&self) -> Option<&str> {
        self.year
            .as_deref()
            .filter(|y| !y.trim().is_empty())
            .or_else(|| self.created_at.as_deref().and_then(|c| c.get(..4)))
    }

    /// Path of the detail page.
    pub fn href(&self) -> String {
        format!("/projects/{}", self.slug)
    }

    /// Link to a live deployment, preferring the live URL over the demo.
    pub fn primary_link(&self) -> Option<&str> {
        self.live_url
            .as_deref()
            .or(self.demo_url.as_deref())
            .filter(|u| !u.trim().is_empty())
    }

    /// Check the record-level invariants.
    pub fn validate(&self) -> Result<()> {
        if self.slug.trim().is_empty() {
            return Err(AppError::validation(format!(
                "project '{}' has no slug",
                self.title
            )));
        }
        if self.title.trim().is_empty() {
            return Err(AppError::validation(format!(
                "project '{}' has no title",
                self.slug
            )));
        }
        if self.technologies.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::validation(format!(
                "project '{}' lists an empty technology",
                self.slug
            )));
        }
        if let Some(year) = self.year.as_deref() {
            if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
                return Err(AppError::validation(format!(
                    "project '{}' has an invalid year '{}'",
                    self.slug, year
                )));
            }
        }
        Ok(())
    }
}

/// Reject a set of records whose slugs are not unique.
pub fn check_unique_slugs<'a>(kind: &str, slugs: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !seen.insert(slug) {
            return Err(AppError::validation(format!(
                "duplicate {kind} slug '{slug}'"
            )));
        }
    }
    Ok(())
}

/// Lifecycle status of a project.
///
/// Values outside the three canonical ones are preserved and displayed
/// verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planned,
    Other(String),
}

impl ProjectStatus {
    /// Normalize a stored value. Display labels ("In Progress") are
    /// accepted as well as wire values.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_ascii_lowercase().replace(' ', "-").as_str() {
            "completed" => Self::Completed,
            "in-progress" => Self::InProgress,
            "planned" => Self::Planned,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// The stored (wire) value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "completed",
            Self::InProgress => "in-progress",
            Self::Planned => "planned",
            Self::Other(raw) => raw,
        }
    }

    /// Human-readable label used by the status facet.
    pub fn label(&self) -> &str {
        match self {
            Self::Completed => "Completed",
            Self::InProgress => "In Progress",
            Self::Planned => "Planned",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Other(raw) if raw.is_empty())
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        Ok(Option::<String>::deserialize(d)?
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default())
    }
}

/// Project counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub planned: usize,
    pub featured: usize,
}
