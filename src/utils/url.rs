// src/utils/url.rs

//! URL and slug utilities.

use url::Url;

/// Resolve a site-relative path against the public base URL.
///
/// # Examples
/// ```
/// use portfolio::utils::url::absolute;
///
/// assert_eq!(
///     absolute("https://example.com/", "/projects/breeg"),
///     "https://example.com/projects/breeg"
/// );
/// ```
pub fn absolute(base: &str, path: &str) -> String {
    Url::parse(base)
        .and_then(|b| b.join(path))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| format!("{}{}", base.trim_end_matches('/'), path))
}

/// Turn free text into a URL-safe slug.
///
/// # Examples
/// ```
/// use portfolio::utils::url::slugify;
///
/// assert_eq!(slugify("Full Stack"), "full-stack");
/// assert_eq!(slugify("AI/ML"), "ai-ml");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Whether an authored href is safe to emit into markup.
///
/// Relative links, fragments, `http(s)`, `mailto` and `tel` pass; script
/// and data schemes do not.
pub fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() {
        return false;
    }
    match href.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') && !scheme.contains('?') && !scheme.contains('#') => {
            matches!(
                scheme.to_ascii_lowercase().as_str(),
                "http" | "https" | "mailto" | "tel"
            )
        }
        _ => true,
    }
}

/// Split a request path into its path and query parameters.
pub fn split_query(target: &str) -> (String, Vec<(String, String)>) {
    // Any base works; only the path and query are read back.
    match Url::parse("http://site.invalid").and_then(|b| b.join(target)) {
        Ok(url) => {
            let params = url
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            (url.path().to_string(), params)
        }
        Err(_) => (target.to_string(), Vec::new()),
    }
}
