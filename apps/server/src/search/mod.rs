//! Search backend access.
//!
//! [`DocumentIndex`] is the read-only gateway the services talk to; the
//! production implementation is [`ElasticIndex`]. Query bodies live in
//! [`query`].

pub mod elastic;
pub mod query;

pub use elastic::ElasticIndex;
pub use query::{Page, SortSpec};

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Index names in the search backend.
pub mod collections {
    pub const MOVIES: &str = "movies";
    pub const GENRES: &str = "genres";
    pub const PERSONS: &str = "persons";
}

/// Read-only document store addressed by collection name.
#[async_trait]
pub trait DocumentIndex: Send + Sync {
    /// Fetch one document by id. `None` when the document does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;

    /// Run a query document and return the matching sources in ranking
    /// order. No matches is an empty vec.
    async fn search(&self, collection: &str, body: Value) -> Result<Vec<Value>>;
}

pub fn decode_document<T: DeserializeOwned>(collection: &str, source: Value) -> Result<T> {
    serde_json::from_value(source)
        .map_err(|err| Error::MalformedDocument(format!("{collection}: {err}")))
}

pub fn decode_documents<T: DeserializeOwned>(
    collection: &str,
    sources: Vec<Value>,
) -> Result<Vec<T>> {
    sources
        .into_iter()
        .map(|source| decode_document(collection, source))
        .collect()
}
