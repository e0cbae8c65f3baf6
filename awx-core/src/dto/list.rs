//! Collection listing envelope

use serde::{Deserialize, Serialize};

/// One page of a collection listing
///
/// Every collection endpoint wraps its results this way. `next` and
/// `previous` are relative URLs of neighbouring pages, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.count == 0 || self.results.is_empty()
    }

    /// First result of the page, consuming the envelope
    pub fn into_first(self) -> Option<T> {
        self.results.into_iter().next()
    }
}
