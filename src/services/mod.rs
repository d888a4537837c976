//! Content fetching layer.
//!
//! - `ContentSource`: fallible access to the content store
//! - `SanitySource`: the CMS-backed source (canonical)
//! - `FixtureSource`: static sample content (offline mode and tests)
//! - `ContentService`: infallible facade that degrades failures to empty
//!   results

mod cache;
mod content;
mod fixture;
pub mod queries;
mod sanity;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Article, Project, ProjectStats};
use crate::pipeline::{ListingQuery, filter_items, project_stats, related_projects, unique_categories};

pub use cache::{CachePolicy, QueryCache};
pub use content::ContentService;
pub use fixture::FixtureSource;
pub use sanity::SanitySource;

/// Number of related projects attached to a detail record.
pub const RELATED_LIMIT: usize = 3;

/// Read access to projects and articles.
///
/// Only the two list methods are required; the selectors default to
/// filtering those lists, and a backend overrides them when it can answer
/// the narrower query itself.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// All projects in display order.
    async fn projects(&self) -> Result<Vec<Project>>;

    /// All articles, newest first.
    async fn articles(&self) -> Result<Vec<Article>>;

    async fn featured_projects(&self) -> Result<Vec<Project>> {
        Ok(self
            .projects()
            .await?
            .into_iter()
            .filter(|p| p.featured)
            .collect())
    }

    /// One project with its related projects attached, or `None`.
    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        let projects = self.projects().await?;
        Ok(projects.iter().find(|p| p.slug == slug).map(|p| {
            let mut project = p.clone();
            project.related_projects = related_projects(&projects, p, RELATED_LIMIT);
            project
        }))
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        Ok(self
            .projects()
            .await?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Distinct categories in first-seen order.
    async fn project_categories(&self) -> Result<Vec<String>> {
        Ok(unique_categories(&self.projects().await?))
    }

    async fn project_stats(&self) -> Result<ProjectStats> {
        Ok(project_stats(&self.projects().await?))
    }

    async fn search_projects(&self, term: &str) -> Result<Vec<Project>> {
        let projects = self.projects().await?;
        Ok(filter_items(&projects, &ListingQuery::search_only(term)))
    }

    async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        Ok(self
            .articles()
            .await?
            .into_iter()
            .find(|a| a.slug == slug))
    }
}
