//! Offset pagination over a queryable collection.
//!
//! A [`Pager`] counts the collection, materializes one page of it, and keeps
//! the request's other query parameters so templates can build
//! previous/next links that preserve filters and sorting.

use std::num::ParseIntError;
use std::ops::Range;

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::query::{QueryParams, encode_pairs};

/// Page size used when the request does not ask for one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Query parameter holding the 1-based page number.
pub const PAGE_PARAM: &str = "page";

/// Query parameter holding the page size.
pub const SIZE_PARAM: &str = "size";

/// Errors from building a pager out of request parameters.
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("query parameter `{param}` must be an integer, got `{value}`")]
    NotAnInteger {
        param: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("page must be 1 or greater, got {0}")]
    InvalidPage(i64),

    #[error("page size must be 1 or greater, got {0}")]
    InvalidSize(i64),
}

/// A collection that can be counted and sliced.
///
/// The count and the slice are two separate calls; nothing guarantees the
/// collection does not change in between.
pub trait Queryable {
    type Item;

    /// Total number of items.
    fn count(&self) -> u64;

    /// Items in the half-open range `start..end`, clamped to the collection.
    fn slice(&self, start: u64, end: u64) -> Vec<Self::Item>;
}

impl<T: Clone> Queryable for [T] {
    type Item = T;

    fn count(&self) -> u64 {
        self.len() as u64
    }

    fn slice(&self, start: u64, end: u64) -> Vec<T> {
        let len = self.len();
        let start = usize::try_from(start).unwrap_or(usize::MAX).min(len);
        let end = usize::try_from(end).unwrap_or(usize::MAX).clamp(start, len);
        self.get(start..end).map(<[T]>::to_vec).unwrap_or_default()
    }
}

impl<T: Clone> Queryable for Vec<T> {
    type Item = T;

    fn count(&self) -> u64 {
        self.as_slice().count()
    }

    fn slice(&self, start: u64, end: u64) -> Vec<T> {
        self.as_slice().slice(start, end)
    }
}

impl Queryable for Range<u64> {
    type Item = u64;

    fn count(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    fn slice(&self, start: u64, end: u64) -> Vec<u64> {
        let from = self.start.saturating_add(start).min(self.end);
        let to = self.start.saturating_add(end).clamp(from, self.end);
        (from..to).collect()
    }
}

/// One page of a query result.
#[derive(Debug, Clone)]
pub struct Pager<T> {
    /// Total number of items in the collection.
    pub count: u64,
    /// Items on this page.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: u64,
    /// Items per page.
    pub size: u64,
    /// Query parameters to carry into pagination links.
    pub params: Vec<(String, String)>,
}

impl<T> Pager<T> {
    /// Count `query` and materialize page `page` of size `size`.
    ///
    /// A page past the end yields an empty item list, not an error.
    pub fn new<Q>(
        query: &Q,
        page: u64,
        size: u64,
        params: Vec<(String, String)>,
    ) -> Result<Self, PagerError>
    where
        Q: Queryable<Item = T> + ?Sized,
    {
        if page < 1 {
            return Err(PagerError::InvalidPage(0));
        }
        if size < 1 {
            return Err(PagerError::InvalidSize(0));
        }

        let count = query.count();
        let start = (page - 1).saturating_mul(size);
        let end = start.saturating_add(size);
        let items = query.slice(start, end);

        Ok(Self {
            count,
            items,
            page,
            size,
            params,
        })
    }

    /// Build a pager from `page` and `size` query parameters.
    ///
    /// Every other parameter is kept (first value only) and `size` is
    /// appended so links keep the page size. A repeated `page` or `size`
    /// also uses its first value.
    pub fn from_request<Q>(query: &Q, request: &QueryParams) -> Result<Self, PagerError>
    where
        Q: Queryable<Item = T> + ?Sized,
    {
        Self::from_request_with_default_size(query, request, DEFAULT_PAGE_SIZE)
    }

    /// Like [`Pager::from_request`] with a custom default page size.
    pub fn from_request_with_default_size<Q>(
        query: &Q,
        request: &QueryParams,
        default_size: u64,
    ) -> Result<Self, PagerError>
    where
        Q: Queryable<Item = T> + ?Sized,
    {
        let page = parse_param(request, PAGE_PARAM)?.unwrap_or(1);
        let size = match parse_param(request, SIZE_PARAM)? {
            Some(size) => size,
            None => i64::try_from(default_size).unwrap_or(i64::MAX),
        };

        let page = u64::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(PagerError::InvalidPage(page))?;
        let size = u64::try_from(size)
            .ok()
            .filter(|s| *s >= 1)
            .ok_or(PagerError::InvalidSize(size))?;

        let mut params: Vec<(String, String)> = request
            .first_values()
            .into_iter()
            .filter(|(k, _)| k != PAGE_PARAM && k != SIZE_PARAM)
            .collect();
        params.push((SIZE_PARAM.to_string(), size.to_string()));

        Self::new(query, page, size, params)
    }

    /// More items after this page.
    pub fn has_next(&self) -> bool {
        self.count > self.page.saturating_mul(self.size)
    }

    /// More items after the next page.
    pub fn has_next_two(&self) -> bool {
        self.count > self.page.saturating_add(1).saturating_mul(self.size)
    }

    /// Whether a previous page exists.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Number of the last page; 0 for an empty collection.
    pub fn last_page(&self) -> u64 {
        self.count.div_ceil(self.size)
    }

    /// Preserved parameters as a query string, e.g. `sort=name&size=10`.
    pub fn url_params(&self) -> String {
        encode_pairs(&self.params)
    }
}

impl<T: Serialize> Serialize for Pager<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Pager", 10)?;
        s.serialize_field("count", &self.count)?;
        s.serialize_field("items", &self.items)?;
        s.serialize_field("page", &self.page)?;
        s.serialize_field("size", &self.size)?;
        s.serialize_field("has_prev", &self.has_prev())?;
        s.serialize_field("has_next", &self.has_next())?;
        s.serialize_field("has_next_two", &self.has_next_two())?;
        s.serialize_field("last_page", &self.last_page())?;
        s.serialize_field("url_params", &self.url_params())?;
        s.serialize_field("params", &self.params)?;
        s.end()
    }
}

fn parse_param(request: &QueryParams, param: &'static str) -> Result<Option<i64>, PagerError> {
    request
        .get(param)
        .map(|value| {
            value
                .trim()
                .parse::<i64>()
                .map_err(|source| PagerError::NotAnInteger {
                    param,
                    value: value.to_string(),
                    source,
                })
        })
        .transpose()
}
