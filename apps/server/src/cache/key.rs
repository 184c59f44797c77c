//! Cache key construction.

use std::fmt;

/// Canonical cache key for a query against one entity kind.
///
/// Keys look like `Film:query:page_number=1&page_size=10`. Bindings are
/// sorted by name and their values urlencoded, so two call sites binding the
/// same parameters in different order produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn new(kind: &str, bindings: &[(&str, String)]) -> Self {
        let mut pairs: Vec<(&str, &str)> = bindings
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let query = pairs
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        Self(format!("{kind}:query:{query}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
