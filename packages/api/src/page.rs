//! # Pagination — one decoding layer for every list endpoint
//!
//! List endpoints of the backend do not agree on an envelope. Observed shapes:
//!
//! ```json
//! { "data":  [...], "totalPages": 2, "totalCount": 11 }
//! { "items": [...], "totalCount": 11 }
//! { "data": { "items": [...], "total": 11 } }
//! [ ... ]
//! ```
//!
//! [`Page::decode`] accepts all of them and fills in whatever the server left
//! out: a missing `totalPages` is computed with [`total_pages`], a missing
//! count falls back to the number of items returned.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::{Map, Value};

const ITEM_KEYS: [&str; 3] = ["data", "items", "results"];
const COUNT_KEYS: [&str; 4] = ["totalCount", "total", "count", "totalItems"];
const PAGES_KEYS: [&str; 2] = ["totalPages", "pageCount"];

/// A 1-based page request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    /// Page and size are clamped to at least 1.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Query string fragment: `page=2&pageSize=10`.
    pub fn query(&self) -> String {
        format!("page={}&pageSize={}", self.page, self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of a server-side list.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            page: request.page,
            page_size: request.page_size,
            total_pages: 0,
            total_count: 0,
        }
    }

    /// Convert the items while keeping the page counters.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
            total_count: self.total_count,
        }
    }
}

/// `ceil(total_count / page_size)`. A page size of 0 is treated as 1.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    let pages = total_count.div_ceil(size);
    u32::try_from(pages).unwrap_or(u32::MAX)
}

impl<T: DeserializeOwned> Page<T> {
    /// Decode any of the known list envelopes.
    pub fn decode(value: Value, request: PageRequest) -> Result<Self, serde_json::Error> {
        let (items, count, pages) = match value {
            items @ Value::Array(_) => (items, None, None),
            Value::Object(map) => split_envelope(map),
            other => {
                return Err(serde_json::Error::custom(format!(
                    "expected a list envelope, got {other}"
                )))
            }
        };

        let items: Vec<T> = serde_json::from_value(items)?;
        let total_count = count.unwrap_or(items.len() as u64);
        let total_pages = pages
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or_else(|| total_pages(total_count, request.page_size));

        Ok(Page {
            items,
            page: request.page,
            page_size: request.page_size,
            total_pages,
            total_count,
        })
    }
}

fn split_envelope(mut map: Map<String, Value>) -> (Value, Option<u64>, Option<u64>) {
    let count = find_u64(&map, &COUNT_KEYS);
    let pages = find_u64(&map, &PAGES_KEYS);

    for key in ITEM_KEYS {
        match map.remove(key) {
            Some(items @ Value::Array(_)) => return (items, count, pages),
            // `{ "data": { "items": [...], "total": n } }`
            Some(Value::Object(inner)) => {
                let (items, inner_count, inner_pages) = split_envelope(inner);
                return (items, inner_count.or(count), inner_pages.or(pages));
            }
            _ => {}
        }
    }

    (Value::Array(Vec::new()), count, pages)
}

fn find_u64(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|k| map.get(*k).and_then(Value::as_u64))
}
