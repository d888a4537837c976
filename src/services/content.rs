// src/services/content.rs

//! Infallible content access for the renderer.
//!
//! Every fetch failure is logged and replaced by an empty list or `None`,
//! so a page renders its empty or not-found state instead of an error.

use std::sync::Arc;

use super::ContentSource;
use crate::error::Result;
use crate::models::{Article, Project, ProjectStats};

/// Content facade used by routes and the site build.
#[derive(Clone)]
pub struct ContentService {
    source: Arc<dyn ContentSource>,
}

impl ContentService {
    pub fn new(source: Arc<dyn ContentSource>) -> Self {
        Self { source }
    }

    pub fn from_source(source: impl ContentSource + 'static) -> Self {
        Self::new(Arc::new(source))
    }

    pub async fn projects(&self) -> Vec<Project> {
        or_empty("projects", self.source.projects().await)
    }

    pub async fn featured_projects(&self) -> Vec<Project> {
        or_empty("featured projects", self.source.featured_projects().await)
    }

    /// One project with related projects attached.
    pub async fn project(&self, slug: &str) -> Option<Project> {
        or_none("project", slug, self.source.project_by_slug(slug).await)
    }

    pub async fn projects_in_category(&self, category: &str) -> Vec<Project> {
        or_empty(
            "projects by category",
            self.source.projects_by_category(category).await,
        )
    }

    pub async fn project_categories(&self) -> Vec<String> {
        or_empty("project categories", self.source.project_categories().await)
    }

    pub async fn project_stats(&self) -> ProjectStats {
        match self.source.project_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                log::error!("Failed to fetch project stats: {e}");
                ProjectStats::default()
            }
        }
    }

    pub async fn search_projects(&self, term: &str) -> Vec<Project> {
        or_empty("project search", self.source.search_projects(term).await)
    }

    pub async fn articles(&self) -> Vec<Article> {
        or_empty("articles", self.source.articles().await)
    }

    pub async fn article(&self, slug: &str) -> Option<Article> {
        or_none("article", slug, self.source.article_by_slug(slug).await)
    }
}

fn or_empty<T>(what: &str, result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        log::error!("Failed to fetch {what}: {e}");
        Vec::new()
    })
}

fn or_none<T>(what: &str, slug: &str, result: Result<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|e| {
        log::error!("Failed to fetch {what} '{slug}': {e}");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::services::FixtureSource;
    use async_trait::async_trait;

    /// Source whose every call fails like an unreachable store.
    struct Unreachable;

    #[async_trait]
    impl ContentSource for Unreachable {
        async fn projects(&self) -> Result<Vec<Project>> {
            Err(AppError::cms(503, "service unavailable"))
        }

        async fn articles(&self) -> Result<Vec<Article>> {
            Err(AppError::cms(503, "service unavailable"))
        }
    }

    #[tokio::test]
    async fn test_failures_degrade_to_empty() {
        let service = ContentService::from_source(Unreachable);

        assert!(service.projects().await.is_empty());
        assert!(service.featured_projects().await.is_empty());
        assert!(service.project("fitness-app").await.is_none());
        assert!(service.projects_in_category("Mobile").await.is_empty());
        assert!(service.project_categories().await.is_empty());
        assert_eq!(service.project_stats().await, ProjectStats::default());
        assert!(service.search_projects("react").await.is_empty());
        assert!(service.articles().await.is_empty());
        assert!(service.article("hello").await.is_none());
    }

    #[tokio::test]
    async fn test_detail_carries_related_projects() {
        let service = ContentService::from_source(FixtureSource::sample());
        let projects = service.projects().await;
        let first = &projects[0];

        let detail = service.project(&first.slug).await.unwrap();
        assert!(detail.related_projects.len() <= crate::services::RELATED_LIMIT);
        assert!(
            detail
                .related_projects
                .iter()
                .all(|r| r.category == first.category && r.slug != first.slug)
        );
    }

    #[tokio::test]
    async fn test_unknown_slug_is_none() {
        let service = ContentService::from_source(FixtureSource::sample());
        assert!(service.project("does-not-exist").await.is_none());
        assert!(service.article("does-not-exist").await.is_none());
    }

    #[tokio::test]
    async fn test_failures_over_http_degrade_to_empty() {
        let (addr, _) = crate::services::sanity::tests::fake_cms(502, "bad gateway".into()).await;
        let source = crate::services::SanitySource::with_endpoint(
            &crate::models::Config::default(),
            &format!("http://{addr}/v1/data/query/production"),
        )
        .unwrap();
        let service = ContentService::from_source(source);

        assert!(service.projects().await.is_empty());
        assert!(service.article("x").await.is_none());
    }
}
