//! Project counts by status.

use crate::models::{Project, ProjectStats, ProjectStatus};

pub fn project_stats(projects: &[Project]) -> ProjectStats {
    projects
        .iter()
        .fold(ProjectStats::default(), |mut stats, project| {
            stats.total += 1;
            match project.status {
                ProjectStatus::Completed => stats.completed += 1,
                ProjectStatus::InProgress => stats.in_progress += 1,
                ProjectStatus::Planned => stats.planned += 1,
                ProjectStatus::Other(_) => {}
            }
            if project.featured {
                stats.featured += 1;
            }
            stats
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let projects: Vec<Project> = ["completed", "in-progress", "completed", "Live", "planned"]
            .iter()
            .enumerate()
            .map(|(i, status)| Project {
                slug: format!("p{i}"),
                status: ProjectStatus::parse(status),
                featured: i == 0,
                ..Project::default()
            })
            .collect();

        assert_eq!(
            project_stats(&projects),
            ProjectStats {
                total: 5,
                completed: 2,
                in_progress: 1,
                planned: 1,
                featured: 1,
            }
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(project_stats(&[]), ProjectStats::default());
    }
}
