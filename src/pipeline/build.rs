// src/pipeline/build.rs

//! Static site build.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};

use crate::error::Result;
use crate::models::{Article, Project, check_unique_slugs};
use crate::pipeline::filter::{ListingQuery, unique_categories};
use crate::pipeline::guard::ContentGuard;
use crate::pipeline::related::related_projects;
use crate::pipeline::route::Site;
use crate::pipeline::view_state::SectionTracker;
use crate::render::pages;
use crate::services::RELATED_LIMIT;
use crate::storage::{Manifest, SiteStorage, WriteStatus};
use crate::utils::report;
use crate::utils::url::slugify;

/// Article detail fetches in flight at once.
const DETAIL_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Write even when the content guard trips
    pub force: bool,
}

/// Counts from a finished build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub written: usize,
    pub unchanged: usize,
    pub removed: usize,
    pub projects: usize,
    pub articles: usize,
}

/// Render every route and write the site through `storage`.
pub async fn run_build(
    site: &Site,
    storage: &dyn SiteStorage,
    options: &BuildOptions,
) -> Result<BuildSummary> {
    report::header("Building site");
    let content = site.content();

    report::step(1, 4, "Fetching content");
    let (projects, listed_articles, featured) = futures::join!(
        content.projects(),
        content.articles(),
        content.featured_projects()
    );
    // List projections carry no body; fetch each article in full.
    let articles: Vec<Article> = stream::iter(listed_articles)
        .map(|listed| async move {
            match content.article(&listed.slug).await {
                Some(full) => full,
                None => {
                    log::warn!("Article '{}' has no detail record", listed.slug);
                    listed
                }
            }
        })
        .buffered(DETAIL_CONCURRENCY)
        .collect()
        .await;
    report::sub_item(&format!(
        "{} projects, {} articles",
        projects.len(),
        articles.len()
    ));

    if let Err(e) = check_unique_slugs("project", projects.iter().map(|p| p.slug.as_str())) {
        log::warn!("{e}");
    }
    if let Err(e) = check_unique_slugs("article", articles.iter().map(|a| a.slug.as_str())) {
        log::warn!("{e}");
    }

    let previous = storage.load_manifest().await?;
    let records = projects.len() + articles.len();
    if options.force {
        log::warn!("Content guard skipped (--force)");
    } else {
        ContentGuard::new().validate(records, previous.as_ref().map(|m| m.records))?;
    }

    report::step(2, 4, "Rendering pages");
    let showcase = if featured.is_empty() {
        projects.clone()
    } else {
        featured
    };
    let rendered = render_pages(site, &projects, &showcase, &articles);
    report::sub_item(&format!("{} pages", rendered.len()));

    report::step(3, 4, "Writing pages");
    let mut manifest = Manifest::new(records);
    let mut summary = BuildSummary {
        pages: rendered.len(),
        projects: projects.len(),
        articles: articles.len(),
        ..BuildSummary::default()
    };
    for (key, html) in &rendered {
        match storage.write_page(key, html.as_bytes()).await? {
            WriteStatus::Written => summary.written += 1,
            WriteStatus::Unchanged => summary.unchanged += 1,
        }
        manifest.insert(key.as_str(), html.as_bytes());
    }

    report::step(4, 4, "Removing stale pages");
    if let Some(previous) = &previous {
        for key in manifest.stale_keys(previous) {
            storage.remove_page(key).await?;
            summary.removed += 1;
        }
    }
    storage.save_manifest(&manifest).await?;

    report::success("Build complete");
    report::summary(
        "Build",
        &[
            ("Pages", summary.pages.to_string()),
            ("Written", summary.written.to_string()),
            ("Unchanged", summary.unchanged.to_string()),
            ("Removed", summary.removed.to_string()),
        ],
    );
    Ok(summary)
}

fn has_usable_slug(slug: &str) -> bool {
    !slug.trim().is_empty() && !slug.contains('/') && slug != "." && slug != ".."
}

/// Output key and markup of every page.
fn render_pages(
    site: &Site,
    projects: &[Project],
    showcase: &[Project],
    articles: &[Article],
) -> Vec<(String, String)> {
    let ctx = site.context();
    let mut out = Vec::new();

    out.push((
        "index.html".to_string(),
        pages::home_page(
            &ctx,
            site.profile(),
            showcase,
            articles,
            &SectionTracker::default(),
        ),
    ));
    out.push((
        "projects/index.html".to_string(),
        pages::projects_page(&ctx, projects, &ListingQuery::default()),
    ));

    for category in unique_categories(projects) {
        let slug = slugify(&category);
        if slug.is_empty() {
            continue;
        }
        out.push((
            format!("projects/category/{slug}/index.html"),
            pages::projects_page(&ctx, projects, &ListingQuery::new(&category, "", "")),
        ));
    }

    let mut seen = HashSet::new();
    for project in projects {
        if !has_usable_slug(&project.slug) || !seen.insert(project.slug.as_str()) {
            log::warn!("Skipping project '{}' with unusable or duplicate slug", project.title);
            continue;
        }
        let detail = Project {
            related_projects: related_projects(projects, project, RELATED_LIMIT),
            ..project.clone()
        };
        out.push((
            format!("projects/{}/index.html", project.slug),
            pages::project_page(&ctx, &detail),
        ));
    }

    out.push((
        "articles/index.html".to_string(),
        pages::articles_page(&ctx, articles, &ListingQuery::default()),
    ));
    let mut seen = HashSet::new();
    for article in articles {
        if !has_usable_slug(&article.slug) || !seen.insert(article.slug.as_str()) {
            log::warn!("Skipping article '{}' with unusable or duplicate slug", article.title);
            continue;
        }
        out.push((
            format!("articles/{}/index.html", article.slug),
            pages::article_page(&ctx, article),
        ));
    }

    out.push((
        "404.html".to_string(),
        pages::not_found_page(
            &ctx,
            "The page you're looking for doesn't exist.",
            "/",
            "Back to Home",
        ),
    ));
    out
}
