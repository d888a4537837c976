// src/pipeline/route.rs

//! Route surface of the site and per-route rendering.
//!
//! Every path renders to a page. Unknown paths and unknown slugs produce
//! the not-found page rather than an error.

use std::sync::Arc;

use percent_encoding::percent_decode_str;

use crate::models::{Config, Profile, Project};
use crate::pipeline::filter::ListingQuery;
use crate::pipeline::view_state::SectionTracker;
use crate::render::PageContext;
use crate::render::pages;
use crate::services::ContentService;
use crate::utils::url::{slugify, split_query};

/// A parsed request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects(ListingQuery),
    /// `/projects/category/{slug}`, matched against slugified categories
    ProjectCategory(String),
    Project(String),
    Articles(ListingQuery),
    Article(String),
    NotFound(String),
}

impl Route {
    /// Parse a path with optional query string.
    pub fn parse(target: &str) -> Self {
        let (path, params) = split_query(target);
        let decoded: Vec<String> = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = decoded.iter().map(String::as_str).collect();

        match segments.as_slice() {
            [] => Self::Home,
            ["projects"] => Self::Projects(ListingQuery::from_params(&params)),
            ["projects", "category", category] => Self::ProjectCategory(category.to_string()),
            ["projects", slug] => Self::Project(slug.to_string()),
            ["articles"] => Self::Articles(ListingQuery::from_params(&params)),
            ["articles", slug] => Self::Article(slug.to_string()),
            _ => Self::NotFound(path.clone()),
        }
    }

    /// Canonical path of this route, without query parameters.
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Projects(_) => "/projects".to_string(),
            Self::ProjectCategory(category) => format!("/projects/category/{category}"),
            Self::Project(slug) => format!("/projects/{slug}"),
            Self::Articles(_) => "/articles".to_string(),
            Self::Article(slug) => format!("/articles/{slug}"),
            Self::NotFound(path) => path.clone(),
        }
    }
}

/// Result of rendering one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Found(String),
    NotFound(String),
}

impl RenderOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn html(&self) -> &str {
        match self {
            Self::Found(html) | Self::NotFound(html) => html,
        }
    }

    pub fn into_html(self) -> String {
        match self {
            Self::Found(html) | Self::NotFound(html) => html,
        }
    }
}

/// Renders routes from live content.
#[derive(Clone)]
pub struct Site {
    content: ContentService,
    config: Arc<Config>,
    profile: Arc<Profile>,
}

impl Site {
    pub fn new(content: ContentService, config: Arc<Config>, profile: Profile) -> Self {
        Self {
            content,
            config,
            profile: Arc::new(profile),
        }
    }

    pub fn content(&self) -> &ContentService {
        &self.content
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn context(&self) -> PageContext<'_> {
        PageContext::new(&self.config.site)
    }

    /// Render a request target such as `/projects?category=Mobile`.
    pub async fn render(&self, target: &str) -> RenderOutcome {
        self.render_route(&Route::parse(target)).await
    }

    pub async fn render_route(&self, route: &Route) -> RenderOutcome {
        let ctx = self.context();
        match route {
            Route::Home => {
                let (featured, articles) =
                    futures::join!(self.home_projects(), self.content.articles());
                RenderOutcome::Found(pages::home_page(
                    &ctx,
                    &self.profile,
                    &featured,
                    &articles,
                    &SectionTracker::default(),
                ))
            }
            Route::Projects(query) => {
                let projects = self.content.projects().await;
                RenderOutcome::Found(pages::projects_page(&ctx, &projects, query))
            }
            Route::ProjectCategory(slug) => {
                let projects = self.content.projects().await;
                let category = projects
                    .iter()
                    .map(|p| p.category.as_str())
                    .find(|c| !c.is_empty() && slugify(c) == *slug);
                match category {
                    Some(category) => {
                        let query = ListingQuery::new(category, "", "");
                        RenderOutcome::Found(pages::projects_page(&ctx, &projects, &query))
                    }
                    None => self.not_found(route),
                }
            }
            Route::Project(slug) => match self.content.project(slug).await {
                Some(project) => RenderOutcome::Found(pages::project_page(&ctx, &project)),
                None => self.not_found(route),
            },
            Route::Articles(query) => {
                let articles = self.content.articles().await;
                RenderOutcome::Found(pages::articles_page(&ctx, &articles, query))
            }
            Route::Article(slug) => match self.content.article(slug).await {
                Some(article) => RenderOutcome::Found(pages::article_page(&ctx, &article)),
                None => self.not_found(route),
            },
            Route::NotFound(_) => self.not_found(route),
        }
    }

    async fn home_projects(&self) -> Vec<Project> {
        let featured = self.content.featured_projects().await;
        if featured.is_empty() {
            self.content.projects().await
        } else {
            featured
        }
    }

    /// Not-found page pointing back at the listing the route belongs to.
    pub fn not_found(&self, route: &Route) -> RenderOutcome {
        log::debug!("No page for {}", route.path());
        let ctx = self.context();
        let html = match route {
            Route::Project(_) | Route::ProjectCategory(_) | Route::Projects(_) => pages::not_found_page(
                &ctx,
                "The project you're looking for doesn't exist.",
                "/projects",
                "Back to Projects",
            ),
            Route::Article(_) | Route::Articles(_) => pages::not_found_page(
                &ctx,
                "The article you're looking for doesn't exist.",
                "/articles",
                "Back to Articles",
            ),
            Route::Home | Route::NotFound(_) => pages::not_found_page(
                &ctx,
                "The page you're looking for doesn't exist.",
                "/",
                "Back to Home",
            ),
        };
        RenderOutcome::NotFound(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FixtureSource;

    fn site() -> Site {
        Site::new(
            ContentService::from_source(FixtureSource::sample()),
            Arc::new(Config::default()),
            Profile::default(),
        )
    }

    #[test]
    fn test_parse_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/projects/"), Route::Projects(ListingQuery::default()));
        assert_eq!(
            Route::parse("/projects?category=Mobile&status=In%20Progress&q=react"),
            Route::Projects(ListingQuery::new("Mobile", "In Progress", "react"))
        );
        assert_eq!(Route::parse("/projects/fitness-app"), Route::Project("fitness-app".into()));
        assert_eq!(
            Route::parse("/projects/category/full-stack"),
            Route::ProjectCategory("full-stack".into())
        );
        assert_eq!(Route::parse("/articles/x/"), Route::Article("x".into()));
        assert_eq!(Route::parse("/about"), Route::NotFound("/about".into()));
        assert_eq!(Route::parse("/projects/a/b"), Route::NotFound("/projects/a/b".into()));
    }

    #[test]
    fn test_route_path() {
        assert_eq!(Route::parse("/projects?q=x").path(), "/projects");
        assert_eq!(Route::Article("a".into()).path(), "/articles/a");
    }

    #[tokio::test]
    async fn test_unknown_slug_is_not_found_page() {
        let site = site();
        let outcome = site.render("/projects/no-such-project").await;
        assert!(!outcome.is_found());
        assert!(outcome.html().contains("Back to Projects"));

        let outcome = site.render("/articles/no-such-article").await;
        assert!(!outcome.is_found());
        assert!(outcome.html().contains("href=\"/articles\""));

        assert!(!site.render("/nowhere").await.is_found());
        assert!(!site.render("/projects/category/nope").await.is_found());
    }

    #[tokio::test]
    async fn test_known_routes_render() {
        let site = site();
        for target in [
            "/",
            "/projects",
            "/projects?category=Mobile",
            "/projects/fitness-app",
            "/projects/category/full-stack",
            "/articles",
            "/articles/future-of-web-development",
        ] {
            let outcome = site.render(target).await;
            assert!(outcome.is_found(), "{target} should render");
        }
    }

    #[tokio::test]
    async fn test_non_ascii_slugs_resolve() {
        assert_eq!(Route::parse("/projects/caf%C3%A9"), Route::Project("café".into()));
        assert_eq!(Route::parse("/projects/café"), Route::Project("café".into()));

        let fixture = FixtureSource::from_json(
            r#"{
                "projects": [
                    {"slug": "café", "title": "Café", "category": "Données"},
                    {"slug": "plain", "title": "Plain", "category": "Web App"}
                ],
                "articles": []
            }"#,
        )
        .unwrap();
        let site = Site::new(
            ContentService::from_source(fixture),
            Arc::new(Config::default()),
            Profile::default(),
        );

        assert!(site.render("/projects/café").await.is_found());
        assert!(site.render("/projects/caf%C3%A9").await.is_found());
        let outcome = site.render("/projects/category/données").await;
        assert!(outcome.is_found());
        assert!(outcome.html().contains("data-slug=\"café\""));
        assert!(!outcome.html().contains("data-slug=\"plain\""));
    }

    #[tokio::test]
    async fn test_query_params_drive_facets() {
        let site = site();
        let html = site.render("/projects?category=Mobile").await.into_html();
        assert!(html.contains("Fitness App"));
        assert!(!html.contains("data-slug=\"e-commerce-platform\""));

        let html = site.render("/projects?q=zzz").await.into_html();
        assert!(html.contains("Clear all filters"));
    }
}
