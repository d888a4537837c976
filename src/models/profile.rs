//! Biography and work history shown on the home page.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The site owner's profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub name: String,

    /// One-line role description (e.g. "Frontend Developer")
    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub location: String,

    /// Biography paragraphs
    #[serde(default)]
    pub bio: Vec<String>,

    /// Short availability note shown in the intro
    #[serde(default)]
    pub availability: Option<String>,

    #[serde(default)]
    pub skills: Vec<String>,

    /// Work history, most recent first
    #[serde(default)]
    pub experience: Vec<Experience>,

    #[serde(default)]
    pub education: Vec<Experience>,

    #[serde(default)]
    pub links: Vec<SocialLink>,

    #[serde(default)]
    pub email: Option<String>,
}

/// One position (or degree) in the work history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    /// Free-form period, e.g. "2021 - Present"
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

impl Profile {
    /// Load a profile from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load a profile or return the placeholder if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Profile load failed from {:?}: {}. Using placeholder profile.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Given name and the rest, split for the two-line intro heading.
    pub fn name_parts(&self) -> (&str, &str) {
        let name = self.name.trim();
        match name.split_once(' ') {
            Some((first, rest)) => (first, rest.trim()),
            None => (name, ""),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Your Name".to_string(),
            headline: "Software Developer".to_string(),
            location: String::new(),
            bio: vec!["Add a biography in data/profile.toml.".to_string()],
            availability: None,
            skills: Vec::new(),
            experience: Vec::new(),
            education: Vec::new(),
            links: Vec::new(),
            email: None,
        }
    }
}
