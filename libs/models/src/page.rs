//! Pagination envelope

use serde::{Deserialize, Serialize};

/// One page of results together with the window that produced it.
///
/// `page` and `page_size` echo the request so clients can drive iteration
/// without tracking the request themselves. An empty `results` vector is a
/// valid page; the service layer decides whether that maps to a 404 or an
/// empty 200 for a given endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Paginated<T> {
    pub fn new(results: Vec<T>, page: u32, page_size: u32) -> Self {
        Self {
            results,
            page,
            page_size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
