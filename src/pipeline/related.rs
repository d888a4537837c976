//! Related projects for the detail page.

use crate::models::Project;

/// Same-category siblings of `project`, excluding itself, in source order.
pub fn related_projects(projects: &[Project], project: &Project, limit: usize) -> Vec<Project> {
    if project.category.trim().is_empty() {
        return Vec::new();
    }
    projects
        .iter()
        .filter(|p| p.category == project.category && p.slug != project.slug)
        .take(limit)
        .map(|p| Project {
            related_projects: Vec::new(),
            ..p.clone()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(slug: &str, category: &str) -> Project {
        Project {
            slug: slug.into(),
            title: slug.to_uppercase(),
            category: category.into(),
            ..Project::default()
        }
    }

    #[test]
    fn test_same_category_excluding_self() {
        let projects = vec![
            project("a", "Web"),
            project("b", "Mobile"),
            project("c", "Web"),
            project("d", "Web"),
            project("e", "Web"),
            project("f", "Web"),
        ];

        let related = related_projects(&projects, &projects[0], 3);
        let slugs: Vec<&str> = related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["c", "d", "e"]);
    }

    #[test]
    fn test_no_siblings() {
        let projects = vec![project("a", "Web"), project("b", "Mobile")];
        assert!(related_projects(&projects, &projects[1], 3).is_empty());
    }

    #[test]
    fn test_uncategorized_has_no_related() {
        let projects = vec![project("a", ""), project("b", "")];
        assert!(related_projects(&projects, &projects[0], 3).is_empty());
    }
}
