//! HTTP client for an Elasticsearch-compatible document store.

use super::DocumentIndex;
use crate::error::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin client for the `_doc` and `_search` endpoints.
pub struct ElasticIndex {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GetResponse {
    #[serde(rename = "_source")]
    source: Value,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Value,
}

impl ElasticIndex {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn doc_url(&self, collection: &str, id: &str) -> String {
        format!(
            "{}/{}/_doc/{}",
            self.base_url,
            collection,
            urlencoding::encode(id)
        )
    }

    fn search_url(&self, collection: &str) -> String {
        format!("{}/{}/_search", self.base_url, collection)
    }
}

#[async_trait]
impl DocumentIndex for ElasticIndex {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let response = self.client.get(self.doc_url(collection, id)).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: GetResponse = response.error_for_status()?.json().await?;
        Ok(Some(body.source))
    }

    async fn search(&self, collection: &str, body: Value) -> Result<Vec<Value>> {
        let response = self
            .client
            .post(self.search_url(collection))
            .json(&body)
            .send()
            .await?;
        // A missing index reads as an empty result, same as a miss.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        let body: SearchResponse = response.error_for_status()?.json().await?;
        Ok(body.hits.hits.into_iter().map(|hit| hit.source).collect())
    }
}
