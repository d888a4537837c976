//! Static sample content.
//!
//! Used for offline rendering and as a stand-in store in tests.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::ContentSource;
use crate::error::Result;
use crate::models::{Article, Project};

const SAMPLE: &str = include_str!("../../data/fixture.json");

/// Content held in memory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FixtureSource {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl FixtureSource {
    pub fn new(projects: Vec<Project>, articles: Vec<Article>) -> Self {
        Self { projects, articles }
    }

    /// Load a fixture file shaped like `{ "projects": [..], "articles": [..] }`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The bundled sample portfolio.
    pub fn sample() -> Self {
        Self::from_json(SAMPLE).unwrap_or_else(|e| {
            log::error!("Bundled sample content is invalid: {e}");
            Self::default()
        })
    }
}

#[async_trait]
impl ContentSource for FixtureSource {
    async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.clone())
    }

    async fn articles(&self) -> Result<Vec<Article>> {
        let mut articles = self.articles.clone();
        // Newest first, undated last; stable for equal dates.
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(articles)
    }
}
