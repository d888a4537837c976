// src/services/sanity.rs

//! Content source backed by the Sanity HTTP query API.
//!
//! Queries are sent as `GET {endpoint}?query=<GROQ>&$name=<json>` and the
//! answer arrives wrapped in `{ "ms": .., "query": .., "result": .. }`.

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::cache::{CachePolicy, QueryCache};
use super::{ContentSource, queries};
use crate::error::Result;
use crate::models::{Article, Config, Project, ProjectStats};
use crate::utils::http;

/// Response envelope of the query endpoint.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    #[serde(default)]
    category: Option<String>,
}

/// CMS-backed content source.
pub struct SanitySource {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<String>,
    cache: Option<QueryCache>,
    list_policy: CachePolicy,
    categories_policy: CachePolicy,
}

impl SanitySource {
    /// Create a source for the project and dataset in `config`.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_endpoint(config, &config.cms.query_endpoint())
    }

    /// Create a source that queries an explicit endpoint URL.
    pub fn with_endpoint(config: &Config, endpoint: &str) -> Result<Self> {
        let client = http::create_async_client(&config.http)?;
        let cache = config.cache.enabled.then(QueryCache::new);

        Ok(Self {
            client,
            endpoint: Url::parse(endpoint)?,
            token: config.cms.token.clone(),
            cache,
            list_policy: CachePolicy::Revalidate(config.cache.list_ttl()),
            categories_policy: CachePolicy::Revalidate(config.cache.categories_ttl()),
        })
    }

    /// Full request URL for a query. Parameter values are JSON-encoded.
    pub fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("query", query);
            for (name, value) in params {
                let encoded = serde_json::to_string(value)?;
                pairs.append_pair(&format!("${name}"), &encoded);
            }
        }
        Ok(url)
    }

    /// Run a query and return its raw `result`, consulting the cache.
    async fn run(&self, query: &str, params: &[(&str, &str)], policy: CachePolicy) -> Result<Value> {
        let key = QueryCache::key(query, params);
        if let Some(cached) = self.cache.as_ref().and_then(|c| c.get(&key, policy)) {
            log::debug!("Query cache hit {}", &key[..12]);
            return Ok(cached);
        }

        let url = self.query_url(query, params)?;
        log::debug!("Querying {}", self.endpoint);
        let body = http::fetch_text(&self.client, url, self.token.as_deref()).await?;
        let response: QueryResponse = serde_json::from_str(&body)?;

        if let Some(cache) = &self.cache {
            cache.put(key, response.result.clone(), policy);
        }
        Ok(response.result)
    }

    /// Run a query and decode its result; `null` becomes `None`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
        policy: CachePolicy,
    ) -> Result<Option<T>> {
        match self.run(query, params, policy).await? {
            Value::Null => Ok(None),
            value => Ok(Some(serde_json::from_value(value)?)),
        }
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
        policy: CachePolicy,
    ) -> Result<Vec<T>> {
        Ok(self
            .fetch::<Vec<T>>(query, params, policy)
            .await?
            .unwrap_or_default())
    }
}

#[async_trait]
impl ContentSource for SanitySource {
    async fn projects(&self) -> Result<Vec<Project>> {
        self.fetch_list(queries::PROJECTS, &[], self.list_policy).await
    }

    async fn articles(&self) -> Result<Vec<Article>> {
        self.fetch_list(queries::ARTICLES, &[], self.list_policy).await
    }

    async fn featured_projects(&self) -> Result<Vec<Project>> {
        self.fetch_list(queries::FEATURED_PROJECTS, &[], self.list_policy)
            .await
    }

    async fn project_by_slug(&self, slug: &str) -> Result<Option<Project>> {
        self.fetch(queries::PROJECT_BY_SLUG, &[("slug", slug)], self.list_policy)
            .await
    }

    async fn projects_by_category(&self, category: &str) -> Result<Vec<Project>> {
        self.fetch_list(
            queries::PROJECTS_BY_CATEGORY,
            &[("category", category)],
            self.list_policy,
        )
        .await
    }

    async fn project_categories(&self) -> Result<Vec<String>> {
        let rows: Vec<CategoryRow> = self
            .fetch_list(queries::PROJECT_CATEGORIES, &[], self.categories_policy)
            .await?;

        let mut categories: Vec<String> = Vec::new();
        for category in rows.into_iter().filter_map(|r| r.category) {
            if !category.is_empty() && !categories.contains(&category) {
                categories.push(category);
            }
        }
        Ok(categories)
    }

    async fn project_stats(&self) -> Result<ProjectStats> {
        Ok(self
            .fetch(queries::PROJECT_STATS, &[], self.list_policy)
            .await?
            .unwrap_or_default())
    }

    async fn search_projects(&self, term: &str) -> Result<Vec<Project>> {
        self.fetch_list(
            queries::SEARCH_PROJECTS,
            &[("searchTerm", term)],
            CachePolicy::NoStore,
        )
        .await
    }

    async fn article_by_slug(&self, slug: &str) -> Result<Option<Article>> {
        self.fetch(queries::ARTICLE_BY_SLUG, &[("slug", slug)], self.list_policy)
            .await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::AppError;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve `body` with `status` to every connection; returns the address
    /// and a counter of requests served.
    pub(crate) async fn fake_cms(status: u16, body: String) -> (SocketAddr, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);

        tokio::spawn(async move {
            loop {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                counter.fetch_add(1, Ordering::SeqCst);
                let body = body.clone();
                tokio::spawn(async move {
                    let mut buf = vec![0u8; 8192];
                    let _ = stream.read(&mut buf).await;
                    let response = format!(
                        "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        body.len(),
                        body
                    );
                    let _ = stream.write_all(response.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (addr, hits)
    }

    fn source_for(addr: SocketAddr) -> SanitySource {
        let config = Config::default();
        SanitySource::with_endpoint(&config, &format!("http://{addr}/v2024-01-01/data/query/production"))
            .unwrap()
    }

    #[test]
    fn test_query_url_encodes_params_as_json() {
        let config = Config::default();
        let source = SanitySource::new(&config).unwrap();
        let url = source
            .query_url("*[slug.current == $slug][0]", &[("slug", "fitness-app")])
            .unwrap();

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(pairs[0].0, "query");
        assert_eq!(pairs[1], ("$slug".to_string(), "\"fitness-app\"".to_string()));
        assert!(url.as_str().starts_with("https://portfolio.apicdn.sanity.io/"));
    }

    #[tokio::test]
    async fn test_fetch_projects_from_envelope() {
        let body = serde_json::json!({
            "ms": 3,
            "query": "...",
            "result": [
                {"_id": "1", "title": "E-commerce Platform", "slug": {"current": "e-commerce-platform"},
                 "category": "Full Stack", "status": "completed", "technologies": ["Next.js", "Stripe"]},
                {"_id": "2", "title": "Fitness App", "slug": {"current": "fitness-app"},
                 "category": "Mobile", "status": "in-progress", "technologies": ["React Native"]}
            ]
        })
        .to_string();
        let (addr, hits) = fake_cms(200, body).await;
        let source = source_for(addr);

        let projects = source.projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].slug, "fitness-app");

        // Second call is served from the cache.
        let again = source.projects().await.unwrap();
        assert_eq!(again, projects);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_null_result_is_none() {
        let (addr, _) = fake_cms(200, r#"{"ms":1,"result":null}"#.to_string()).await;
        let source = source_for(addr);

        assert!(source.project_by_slug("missing").await.unwrap().is_none());
        assert!(source.articles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_status_is_cms_error() {
        let (addr, _) = fake_cms(500, r#"{"error":"boom"}"#.to_string()).await;
        let source = source_for(addr);

        let err = source.projects().await.unwrap_err();
        assert!(matches!(err, AppError::Cms { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let (addr, _) = fake_cms(200, "<html>not json</html>".to_string()).await;
        let source = source_for(addr);

        let err = source.projects().await.unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[tokio::test]
    async fn test_categories_are_unique() {
        let body = r#"{"result":[{"category":"Mobile"},{"category":null},{"category":"Web"},{"category":"Mobile"}]}"#;
        let (addr, _) = fake_cms(200, body.to_string()).await;
        let source = source_for(addr);

        assert_eq!(
            source.project_categories().await.unwrap(),
            vec!["Mobile".to_string(), "Web".to_string()]
        );
    }
}
