// src/pipeline/validate.rs

use crate::error::Result;
use crate::models::{Article, Config, Project, check_unique_slugs};
use crate::utils::report;

/// Counts from a passing validation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub projects: usize,
    pub articles: usize,
}

/// Validate configuration and every content record.
///
/// Stops at the first failing check and returns its error.
pub fn run_validate(
    config: &Config,
    projects: &[Project],
    articles: &[Article],
) -> Result<ValidationReport> {
    report::header("Validating configuration and content");

    let result = check(config, projects, articles);
    match &result {
        Ok(counts) => report::summary(
            "Validation",
            &[
                ("Projects", counts.projects.to_string()),
                ("Articles", counts.articles.to_string()),
            ],
        ),
        Err(e) => report::error(&format!("Validation failed: {e}")),
    }
    result
}

fn check(config: &Config, projects: &[Project], articles: &[Article]) -> Result<ValidationReport> {
    config.validate()?;
    report::success("Config OK");
    report::sub_item(&format!(
        "CMS: {}/{} (api {})",
        config.cms.project_id, config.cms.dataset, config.cms.api_version
    ));
    report::sub_item(&format!("Timeout: {}s", config.http.timeout_secs));

    for project in projects {
        project.validate()?;
    }
    check_unique_slugs("project", projects.iter().map(|p| p.slug.as_str()))?;
    report::success(&format!("{} projects OK", projects.len()));

    for article in articles {
        article.validate()?;
    }
    check_unique_slugs("article", articles.iter().map(|a| a.slug.as_str()))?;
    report::success(&format!("{} articles OK", articles.len()));

    if projects.is_empty() && articles.is_empty() {
        report::warning("No content records found");
    }

    Ok(ValidationReport {
        projects: projects.len(),
        articles: articles.len(),
    })
}
