// src/pipeline/filter.rs

//! Listing filter: category, status and free-text search.
//!
//! The three facets are independent and combined with AND. Filtering is
//! pure: the result is an order-preserving subsequence of the input, and
//! applying the same query twice changes nothing.

use std::fmt;

use crate::models::{Article, Project};

/// Label of the "no constraint" facet value.
pub const ALL: &str = "All";

/// One facet selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Facet {
    #[default]
    All,
    Only(String),
}

impl Facet {
    /// Parse a facet value; `"All"` and blank input mean no constraint.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw == ALL {
            Self::All
        } else {
            Self::Only(raw.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether `value` satisfies this facet.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    fn accepts_any<'a>(&self, mut values: impl Iterator<Item = &'a str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => values.any(|v| v == wanted),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL,
            Self::Only(value) => value,
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current listing filter state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingQuery {
    pub category: Facet,
    /// Matches the display label of a status ("In Progress")
    pub status: Facet,
    pub search: String,
}

impl ListingQuery {
    pub fn new(category: &str, status: &str, search: &str) -> Self {
        Self {
            category: Facet::parse(category),
            status: Facet::parse(status),
            search: search.to_string(),
        }
    }

    /// Query that only searches.
    pub fn search_only(term: &str) -> Self {
        Self {
            search: term.to_string(),
            ..Self::default()
        }
    }

    /// Build from request parameters (`category`, `status`, `q`).
    /// Unknown parameters are ignored; the last occurrence wins.
    pub fn from_params<K, V>(params: &[(K, V)]) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                "category" => query.category = Facet::parse(value),
                "status" => query.status = Facet::parse(value),
                "q" | "search" => query.search = value.to_string(),
                _ => {}
            }
        }
        query
    }

    /// Clear every facet.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether no facet constrains the listing.
    pub fn is_default(&self) -> bool {
        self.category.is_all() && self.status.is_all() && self.needle().is_none()
    }

    /// Lower-cased search term, or `None` when it is blank.
    fn needle(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// Encode as a query string, omitting unconstrained facets.
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Facet::Only(category) = &self.category {
            serializer.append_pair("category", category);
        }
        if let Facet::Only(status) = &self.status {
            serializer.append_pair("status", status);
        }
        let term = self.search.trim();
        if !term.is_empty() {
            serializer.append_pair("q", term);
        }
        let encoded = serializer.finish();
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }

    /// Copy of this query with a different category.
    pub fn with_category(&self, category: &str) -> Self {
        Self {
            category: Facet::parse(category),
            ..self.clone()
        }
    }

    /// Copy of this query with a different status.
    pub fn with_status(&self, status: &str) -> Self {
        Self {
            status: Facet::parse(status),
            ..self.clone()
        }
    }

    pub fn matches<T: Filterable + ?Sized>(&self, item: &T) -> bool {
        let needle = self.needle();
        self.matches_with(item, needle.as_deref())
    }

    fn matches_with<T: Filterable + ?Sized>(&self, item: &T, needle: Option<&str>) -> bool {
        self.category.accepts_any(item.categories())
            && match item.status_label() {
                Some(label) => self.status.accepts(label),
                None => self.status.is_all(),
            }
            && needle.is_none_or(|n| item.haystack().any(|h| h.to_lowercase().contains(n)))
    }
}

/// A record the listing filter understands.
pub trait Filterable {
    /// Category values the category facet compares against.
    fn categories(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// Display label for the status facet; `None` when the record has no
    /// status.
    fn status_label(&self) -> Option<&str>;

    /// Fields searched by the free-text term.
    fn haystack(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

impl Filterable for Project {
    fn categories(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(std::iter::once(self.category.as_str()))
    }

    fn status_label(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn haystack(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(
            [self.title.as_str(), self.description.as_str()]
                .into_iter()
                .chain(self.technologies.iter().map(String::as_str)),
        )
    }
}

impl Filterable for Article {
    fn categories(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.tags.iter().map(String::as_str))
    }

    fn status_label(&self) -> Option<&str> {
        None
    }

    fn haystack(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(
            [self.title.as_str(), self.excerpt.as_str()]
                .into_iter()
                .chain(self.tags.iter().map(String::as_str)),
        )
    }
}

/// Items matching every facet of `query`, in source order.
pub fn filter_items<T: Filterable + Clone>(items: &[T], query: &ListingQuery) -> Vec<T> {
    let needle = query.needle();
    items
        .iter()
        .filter(|item| query.matches_with(*item, needle.as_deref()))
        .cloned()
        .collect()
}

/// Convenience form taking raw facet values.
pub fn filter<T: Filterable + Clone>(items: &[T], category: &str, status: &str, term: &str) -> Vec<T> {
    filter_items(items, &ListingQuery::new(category, status, term))
}

/// Distinct project categories in first-seen order.
pub fn unique_categories(projects: &[Project]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for project in projects {
        let category = project.category.trim();
        if !category.is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// Category facet options: "All" followed by the distinct categories.
pub fn category_options<T: Filterable>(items: &[T]) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for category in items.iter().flat_map(|i| i.categories()) {
        let category = category.trim();
        if !category.is_empty() && !options.iter().any(|o| o == category) {
            options.push(category.to_string());
        }
    }
    options
}

/// Status facet options: "All" followed by the distinct status labels.
pub fn status_options<T: Filterable>(items: &[T]) -> Vec<String> {
    let mut options = vec![ALL.to_string()];
    for label in items.iter().filter_map(|i| i.status_label()) {
        if !label.is_empty() && !options.iter().any(|o| o == label) {
            options.push(label.to_string());
        }
    }
    options
}
