//! In-memory stand-ins for the search and cache backends.

use async_trait::async_trait;
use kinoteka::cache::CacheBackend;
use kinoteka::error::Result;
use kinoteka::search::DocumentIndex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;
use std::time::Duration;

/// Document store that understands the subset of the query DSL the service
/// issues: `match`, `multi_match`, `match_all`, `bool` and `nested`
/// clauses, plus `sort`, `from` and `size`.
#[derive(Default)]
pub struct MemoryIndex {
    collections: Mutex<HashMap<String, Vec<Value>>>,
    get_calls: AtomicUsize,
    search_calls: AtomicUsize,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, collection: &str, doc: Value) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(doc);
    }

    pub fn remove(&self, collection: &str, id: &str) {
        if let Some(docs) = self.collections.lock().unwrap().get_mut(collection) {
            docs.retain(|doc| doc["id"] != id);
        }
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn search_calls(&self) -> usize {
        self.search_calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl DocumentIndex for MemoryIndex {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        self.get_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| doc["id"] == id))
            .cloned())
    }

    async fn search(&self, collection: &str, body: Value) -> Result<Vec<Value>> {
        self.search_calls.fetch_add(1, AtomicOrdering::SeqCst);
        let collections = self.collections.lock().unwrap();
        let mut matches: Vec<Value> = collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| match body.get("query") {
                        Some(query) => eval_query(query, doc, None),
                        None => true,
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        if let Some(sort) = body.get("sort") {
            apply_sort(&mut matches, sort);
        }

        let from = body.get("from").and_then(Value::as_u64).unwrap_or(0) as usize;
        let size = body.get("size").and_then(Value::as_u64).unwrap_or(10) as usize;
        Ok(matches.into_iter().skip(from).take(size).collect())
    }
}

fn eval_query(query: &Value, doc: &Value, scope: Option<&str>) -> bool {
    if let Some(bool_query) = query.get("bool") {
        return eval_bool(bool_query, doc, scope);
    }
    if let Some(nested) = query.get("nested") {
        return eval_nested(nested, doc);
    }
    if let Some(clause) = query.get("match") {
        return eval_match(clause, doc, scope);
    }
    if let Some(multi) = query.get("multi_match") {
        return eval_multi_match(multi, doc);
    }
    query.get("match_all").is_some()
}

fn eval_bool(bool_query: &Value, doc: &Value, scope: Option<&str>) -> bool {
    let all_of = |name: &str| -> bool {
        bool_query
            .get(name)
            .and_then(Value::as_array)
            .map(|clauses| clauses.iter().all(|clause| eval_query(clause, doc, scope)))
            .unwrap_or(true)
    };

    let any_of = bool_query
        .get("should")
        .and_then(Value::as_array)
        .map(|clauses| clauses.iter().any(|clause| eval_query(clause, doc, scope)))
        .unwrap_or(true);

    all_of("must") && all_of("filter") && any_of
}

fn eval_nested(nested: &Value, doc: &Value) -> bool {
    let Some(path) = nested.get("path").and_then(Value::as_str) else {
        return false;
    };
    let Some(query) = nested.get("query") else {
        return false;
    };
    doc.get(path)
        .and_then(Value::as_array)
        .map(|elements| {
            elements
                .iter()
                .any(|element| eval_query(query, element, Some(path)))
        })
        .unwrap_or(false)
}

fn eval_match(clause: &Value, doc: &Value, scope: Option<&str>) -> bool {
    let Some(object) = clause.as_object() else {
        return false;
    };
    object.iter().all(|(field, needle)| {
        let needle = match needle {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        field_text(doc, field, scope)
            .map(|text| text_matches(&text, &needle))
            .unwrap_or(false)
    })
}

fn eval_multi_match(multi: &Value, doc: &Value) -> bool {
    let Some(needle) = multi.get("query").and_then(Value::as_str) else {
        return false;
    };
    multi
        .get("fields")
        .and_then(Value::as_array)
        .map(|fields| {
            fields.iter().filter_map(Value::as_str).any(|field| {
                field_text(doc, field, None)
                    .map(|text| text_matches(&text, needle))
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false)
}

/// Field lookup, stripping the nested-path prefix when evaluating inside a
/// nested element.
fn field_text(doc: &Value, field: &str, scope: Option<&str>) -> Option<String> {
    let local = scope
        .and_then(|prefix| field.strip_prefix(&format!("{prefix}.")))
        .unwrap_or(field);
    match doc.get(local)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Word-level match: any query token equals any document token.
fn text_matches(haystack: &str, needle: &str) -> bool {
    let haystack = tokens(haystack);
    tokens(needle).iter().any(|token| haystack.contains(token))
}

fn tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric() && c != '-')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn apply_sort(docs: &mut [Value], sort: &Value) {
    let Some(entries) = sort.as_array() else {
        return;
    };
    for entry in entries.iter().rev() {
        let Some(object) = entry.as_object() else {
            continue;
        };
        for (field, spec) in object {
            let descending = match spec {
                Value::String(direction) => direction == "desc",
                Value::Object(spec) => spec.get("order").and_then(Value::as_str) == Some("desc"),
                _ => false,
            };
            docs.sort_by(|a, b| compare_field(a, b, field, descending));
        }
    }
}

fn compare_field(a: &Value, b: &Value, field: &str, descending: bool) -> Ordering {
    let ordering = match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => Ordering::Equal,
    };
    if descending {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Cache store with inspectable entries and call counters.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    counters: Mutex<HashMap<String, i64>>,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(AtomicOrdering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(AtomicOrdering::SeqCst)
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get_calls.fetch_add(1, AtomicOrdering::SeqCst);
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Vec<u8>, _ttl: Duration) -> Result<()> {
        self.set_calls.fetch_add(1, AtomicOrdering::SeqCst);
        self.entries.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }

    async fn incr(&self, key: &str, _ttl: Duration) -> Result<i64> {
        let mut counters = self.counters.lock().unwrap();
        let count = counters.entry(key.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }
}
