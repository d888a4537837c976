//! Storage for the rendered site.
//!
//! ## Output layout
//!
//! ```text
//! {output_dir}/
//! ├── index.html
//! ├── 404.html
//! ├── manifest.json              # page -> sha256, record count, build time
//! ├── projects/
//! │   ├── index.html
//! │   ├── {slug}/index.html
//! │   └── category/{category}/index.html
//! └── articles/
//!     ├── index.html
//!     └── {slug}/index.html
//! ```

pub mod local;

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::Result;

pub use local::LocalStorage;

/// Key of the manifest file within the output directory.
pub const MANIFEST_KEY: &str = "manifest.json";

/// What happened to one page on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    /// Content hash matched the file on disk
    Unchanged,
}

/// Record of a completed build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    pub generated_at: DateTime<Utc>,
    /// Projects plus articles rendered by the build
    #[serde(default)]
    pub records: usize,
    /// Output key -> sha256 hex of its content
    pub pages: BTreeMap<String, String>,
}

impl Manifest {
    pub fn new(records: usize) -> Self {
        Self {
            generated_at: Utc::now(),
            records,
            pages: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, content: &[u8]) {
        self.pages.insert(key.into(), content_hash(content));
    }

    /// Keys present in `previous` but not in this manifest.
    pub fn stale_keys<'a>(&self, previous: &'a Manifest) -> Vec<&'a str> {
        previous
            .pages
            .keys()
            .filter(|k| !self.pages.contains_key(*k))
            .map(String::as_str)
            .collect()
    }
}

/// SHA-256 hex digest of page content.
pub fn content_hash(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Trait for site output backends.
#[async_trait]
pub trait SiteStorage: Send + Sync {
    /// Write a page unless identical content is already stored.
    async fn write_page(&self, key: &str, content: &[u8]) -> Result<WriteStatus>;

    /// Delete a page; missing pages are not an error.
    async fn remove_page(&self, key: &str) -> Result<()>;

    /// Manifest of the previous build, if any.
    async fn load_manifest(&self) -> Result<Option<Manifest>>;

    async fn save_manifest(&self, manifest: &Manifest) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash() {
        assert_eq!(
            content_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_stale_keys() {
        let mut previous = Manifest::new(2);
        previous.insert("index.html", b"a");
        previous.insert("projects/old/index.html", b"b");

        let mut current = Manifest::new(1);
        current.insert("index.html", b"a2");

        assert_eq!(current.stale_keys(&previous), ["projects/old/index.html"]);
    }
}
