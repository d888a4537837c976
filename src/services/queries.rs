//! GROQ queries sent to the content store.
//!
//! Projections are kept in step with the `Project` and `Article` models;
//! fields a projection leaves out simply decode to their defaults.

/// All projects in display order.
pub const PROJECTS: &str = r#"*[_type == "project"] | order(orderRank) {
  _id, _createdAt, title, slug, description, longDescription,
  "image": image.asset->url, "imageAlt": image.alt,
  "gallery": gallery[defined(asset)].asset->url,
  category, status, year, featured, orderRank,
  technologies[], features[], challenges, learnings,
  liveUrl, githubUrl, demoUrl, tags[]
}"#;

/// Featured projects for the home page.
pub const FEATURED_PROJECTS: &str = r#"*[_type == "project" && featured == true] | order(orderRank) {
  _id, _createdAt, title, slug, description,
  "image": image.asset->url, "imageAlt": image.alt,
  category, status, year, featured, technologies[], liveUrl, githubUrl
}"#;

/// One project by slug, with up to three same-category siblings.
pub const PROJECT_BY_SLUG: &str = r#"*[_type == "project" && slug.current == $slug][0] {
  _id, _createdAt, title, slug, description, longDescription,
  "image": image.asset->url, "imageAlt": image.alt,
  "gallery": gallery[defined(asset)].asset->url,
  category, status, year, featured, orderRank,
  technologies[], features[], challenges, learnings,
  liveUrl, githubUrl, demoUrl, tags[],
  "relatedProjects": *[_type == "project" && slug.current != $slug && category == ^.category] | order(orderRank) [0...3] {
    _id, title, slug, description, "image": image.asset->url,
    category, status, year, technologies[]
  }
}"#;

/// Projects in one category.
pub const PROJECTS_BY_CATEGORY: &str = r#"*[_type == "project" && category == $category] | order(orderRank) {
  _id, _createdAt, title, slug, description,
  "image": image.asset->url, "imageAlt": image.alt,
  category, status, year, technologies[], liveUrl, githubUrl
}"#;

/// Category of every project that has one.
pub const PROJECT_CATEGORIES: &str =
    r#"*[_type == "project" && defined(category)] | order(orderRank) { category }"#;

/// Project counts by status.
pub const PROJECT_STATS: &str = r#"{
  "total": count(*[_type == "project"]),
  "completed": count(*[_type == "project" && status == "completed"]),
  "inProgress": count(*[_type == "project" && status == "in-progress"]),
  "planned": count(*[_type == "project" && status == "planned"]),
  "featured": count(*[_type == "project" && featured == true])
}"#;

/// Prefix search over title and description, exact match on technologies.
pub const SEARCH_PROJECTS: &str = r#"*[_type == "project" && (
  title match $searchTerm + "*" ||
  description match $searchTerm + "*" ||
  $searchTerm in technologies[]
)] | order(orderRank) {
  _id, _createdAt, title, slug, description,
  "image": image.asset->url, "imageAlt": image.alt,
  category, status, year, technologies[], liveUrl, githubUrl
}"#;

/// All articles, newest first.
pub const ARTICLES: &str = r#"*[_type == "article"] | order(publishedAt desc) {
  _id, title, slug, excerpt, publishedAt, readTime, tags[], externalUrl,
  "author": { "name": author.name, "avatar": author.image.asset->url }
}"#;

/// One article by slug, including its body.
pub const ARTICLE_BY_SLUG: &str = r#"*[_type == "article" && slug.current == $slug][0] {
  _id, title, slug, excerpt, publishedAt, readTime, tags[], externalUrl,
  "author": { "name": author.name, "avatar": author.image.asset->url },
  body[] {
    ...,
    _type == "image" => { ..., "asset": { "url": asset->url } }
  }
}"#;
