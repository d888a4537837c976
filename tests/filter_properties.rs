use portfolio::models::{Project, ProjectStatus};
use portfolio::pipeline::{ALL, filter};
use proptest::prelude::*;
use proptest::test_runner::Config;

const CATEGORIES: [&str; 4] = ["Web App", "Mobile", "AI/ML", "Full Stack"];
const STATUSES: [&str; 5] = ["completed", "in-progress", "planned", "Archived", ""];
const STATUS_FACETS: [&str; 6] = [ALL, "Completed", "In Progress", "Planned", "Archived", ""];

fn project() -> impl Strategy<Value = Project> {
    (
        "[a-z]{1,8}",
        "[A-Za-z ]{0,16}",
        "[A-Za-z ]{0,24}",
        prop::sample::select(CATEGORIES.to_vec()),
        prop::sample::select(STATUSES.to_vec()),
        prop::collection::vec("[A-Za-z.]{1,10}", 0..4),
    )
        .prop_map(|(slug, title, description, category, status, technologies)| Project {
            slug,
            title,
            description,
            category: category.to_string(),
            status: ProjectStatus::parse(status),
            technologies,
            ..Project::default()
        })
}

fn category_facet() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(ALL.to_string()),
        Just(String::new()),
        prop::sample::select(CATEGORIES.to_vec()).prop_map(str::to_string),
    ]
}

fn status_facet() -> impl Strategy<Value = String> {
    prop::sample::select(STATUS_FACETS.to_vec()).prop_map(str::to_string)
}

/// The facet predicate written out directly against the record fields.
fn satisfies(project: &Project, category: &str, status: &str, term: &str) -> bool {
    let category_ok = category.is_empty() || category == ALL || project.category == category;
    let status_ok = status.is_empty() || status == ALL || project.status.label() == status;
    let needle = term.trim().to_lowercase();
    let term_ok = needle.is_empty()
        || project.title.to_lowercase().contains(&needle)
        || project.description.to_lowercase().contains(&needle)
        || project
            .technologies
            .iter()
            .any(|t| t.to_lowercase().contains(&needle));
    category_ok && status_ok && term_ok
}

fn is_subsequence(shown: &[Project], source: &[Project]) -> bool {
    let mut rest = source.iter();
    shown.iter().all(|item| rest.any(|candidate| candidate == item))
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn filter_keeps_exactly_the_matching_items_in_order(
        source in prop::collection::vec(project(), 0..12),
        category in category_facet(),
        status in status_facet(),
        term in "[A-Za-z]{0,3}",
    ) {
        let shown = filter(&source, &category, &status, &term);

        prop_assert!(is_subsequence(&shown, &source));
        for item in &shown {
            prop_assert!(satisfies(item, &category, &status, &term));
        }
        let expected: Vec<Project> = source
            .iter()
            .filter(|p| satisfies(p, &category, &status, &term))
            .cloned()
            .collect();
        prop_assert_eq!(&shown, &expected);
    }

    #[test]
    fn filter_is_idempotent(
        source in prop::collection::vec(project(), 0..12),
        category in category_facet(),
        status in status_facet(),
        term in "[A-Za-z]{0,3}",
    ) {
        let once = filter(&source, &category, &status, &term);
        let twice = filter(&once, &category, &status, &term);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn unconstrained_filter_is_identity(source in prop::collection::vec(project(), 0..12)) {
        prop_assert_eq!(filter(&source, ALL, ALL, ""), source);
    }

    #[test]
    fn search_ignores_case(
        source in prop::collection::vec(project(), 0..12),
        term in "[A-Za-z]{1,3}",
    ) {
        prop_assert_eq!(
            filter(&source, ALL, ALL, &term.to_uppercase()),
            filter(&source, ALL, ALL, &term.to_lowercase())
        );
    }
}
