//! Query-string parsing and rendering.
//!
//! [`QueryParams`] holds *decoded* parameter values. Percent-encoding only
//! happens at the edges: [`QueryParams::parse`] decodes an incoming query
//! string the way a browser's `URLSearchParams` does, and
//! [`QueryParams::to_query_string`] encodes for transport.
//!
//! Parsing rules:
//!
//! - pairs are separated by `&`, empty pairs are ignored
//! - `+` decodes to a space, then `%XX` escapes are decoded as UTF-8
//!   (invalid sequences are replaced, never rejected)
//! - a key without `=` has an empty value
//! - the first occurrence of a repeated key wins

use std::collections::BTreeMap;

/// Decoded query parameters, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: BTreeMap<String, String>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = BTreeMap::new();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params
                .entry(form_decode(key))
                .or_insert_with(|| form_decode(value));
        }
        Self { params }
    }

    /// Parse the query part of a full URL, a `?query`, or a bare query string.
    ///
    /// Anything after `#` is dropped. A string without `?` that contains
    /// `://` is a URL with no query at all.
    pub fn from_url(url: &str) -> Self {
        let url = url.split_once('#').map_or(url, |(before, _)| before);
        match url.split_once('?') {
            Some((_, query)) => Self::parse(query),
            None if url.contains("://") || url.starts_with('/') => Self::new(),
            None => Self::parse(url),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Set a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as `k=v&k=v` with every key and value percent-encoded.
    ///
    /// Everything except ASCII alphanumerics and `-_.~` is escaped, so a
    /// space becomes `%20` and never `+`.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

/// `application/x-www-form-urlencoded` value decoding.
fn form_decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    String::from_utf8_lossy(&urlencoding::decode_binary(spaced.as_bytes())).into_owned()
}
