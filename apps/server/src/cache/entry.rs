//! Cache entry codec.
//!
//! A single record is stored as its JSON document. A list is stored as a
//! JSON array of strings, each element holding one record's JSON.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode_one<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(record).map_err(|err| Error::MalformedDocument(err.to_string()))
}

pub fn encode_list<T: Serialize>(records: &[T]) -> Result<Vec<u8>> {
    let mut elements = Vec::with_capacity(records.len());
    for record in records {
        let json = serde_json::to_string(record)
            .map_err(|err| Error::MalformedDocument(err.to_string()))?;
        elements.push(json);
    }
    serde_json::to_vec(&elements).map_err(|err| Error::MalformedDocument(err.to_string()))
}

pub fn decode_one<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|err| Error::MalformedDocument(format!("cache entry: {err}")))
}

pub fn decode_list<T: DeserializeOwned>(bytes: &[u8]) -> Result<Vec<T>> {
    let elements: Vec<String> = serde_json::from_slice(bytes)
        .map_err(|err| Error::MalformedDocument(format!("cache list: {err}")))?;
    elements
        .iter()
        .map(|element| {
            serde_json::from_str(element)
                .map_err(|err| Error::MalformedDocument(format!("cache list element: {err}")))
        })
        .collect()
}
