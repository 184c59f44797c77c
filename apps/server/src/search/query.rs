//! Query documents for the search backend.
//!
//! Builders here produce the JSON bodies posted to `_search`. They are kept
//! together so the shape of every query the service can issue is visible in
//! one place.

use serde_json::{json, Map, Value};
use std::fmt;

/// 1-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub size: u32,
}

impl Page {
    /// Offset of the first record in the window.
    pub fn offset(&self) -> u64 {
        u64::from(self.number.saturating_sub(1)) * u64::from(self.size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: 10,
        }
    }
}

/// Sort order parsed from the `sort` query parameter. A leading `-` selects
/// descending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub descending: bool,
}

impl SortSpec {
    pub fn parse(raw: &str) -> Self {
        match raw.strip_prefix('-') {
            Some(field) => Self {
                field: field.to_string(),
                descending: true,
            },
            None => Self {
                field: raw.to_string(),
                descending: false,
            },
        }
    }

    pub fn ascending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: false,
        }
    }

    pub fn descending(field: &str) -> Self {
        Self {
            field: field.to_string(),
            descending: true,
        }
    }

    fn order(&self) -> &'static str {
        if self.descending {
            "desc"
        } else {
            "asc"
        }
    }

    /// `[{field: {"order": direction}}]`
    fn clause(&self) -> Value {
        let mut entry = Map::new();
        entry.insert(self.field.clone(), json!({ "order": self.order() }));
        Value::Array(vec![Value::Object(entry)])
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "-{}", self.field)
        } else {
            f.write_str(&self.field)
        }
    }
}

/// Listing ordered by `sort`, optionally narrowed to films tagged with
/// `genre_id` through the nested `genres_list` field.
pub fn film_listing(sort: &SortSpec, genre_id: Option<&str>, page: Page) -> Value {
    let mut body = Map::new();
    body.insert("size".to_string(), json!(page.size));
    body.insert("from".to_string(), json!(page.offset()));
    body.insert("sort".to_string(), sort.clause());

    if let Some(genre_id) = genre_id {
        body.insert(
            "query".to_string(),
            json!({
                "bool": {
                    "filter": [{
                        "nested": {
                            "path": "genres_list",
                            "query": {
                                "bool": {
                                    "must": [{ "match": { "genres_list.id": genre_id } }]
                                }
                            }
                        }
                    }]
                }
            }),
        );
    }

    Value::Object(body)
}

/// Full-text relevance search over titles and descriptions.
pub fn film_search(text: &str, page: Page) -> Value {
    json!({
        "size": page.size,
        "from": page.offset(),
        "query": {
            "multi_match": {
                "query": text,
                "fields": ["title", "description"]
            }
        }
    })
}

pub fn genre_listing(sort: &SortSpec, page: Page) -> Value {
    let mut body = Map::new();
    body.insert("size".to_string(), json!(page.size));
    body.insert("from".to_string(), json!(page.offset()));
    body.insert("sort".to_string(), sort.clause());
    body.insert("query".to_string(), json!({ "match_all": {} }));
    Value::Object(body)
}

pub fn person_search(name: &str, page: Page) -> Value {
    json!({
        "size": page.size,
        "from": page.offset(),
        "query": {
            "bool": {
                "must": [{ "match": { "full_name": name } }]
            }
        }
    })
}

/// Films a person worked on in any role, best rated first.
pub fn films_by_person(person_id: &str, page: Page) -> Value {
    json!({
        "size": page.size,
        "from": page.offset(),
        "sort": [{ "imdb_rating": "desc" }],
        "query": {
            "bool": {
                "should": [
                    role_match("actors", person_id),
                    role_match("writers", person_id),
                    role_match("directors", person_id),
                ]
            }
        }
    })
}

fn role_match(path: &str, person_id: &str) -> Value {
    let mut fields = Map::new();
    fields.insert(format!("{path}.id"), json!(person_id));
    json!({
        "nested": {
            "path": path,
            "query": { "match": Value::Object(fields) }
        }
    })
}
