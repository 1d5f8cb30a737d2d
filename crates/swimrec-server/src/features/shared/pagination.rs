//! Shared pagination utilities
//!
//! Query strings are never rejected for bad paging values. `page` and
//! `limit` are read with leading-integer semantics (`"3abc"` is 3) and fall
//! back to their defaults when that fails:
//!
//! - `page` defaults to 1 and is always at least 1
//! - `limit` is optional; a missing, non-numeric or non-positive limit means
//!   "return every match on a single page"
//!
//! # Examples
//!
//! ```rust,ignore
//! use swimrec_server::features::shared::pagination::PaginationParams;
//!
//! let params = PaginationParams::from_raw(Some("2"), Some("10"));
//! assert_eq!(params.offset(), 10);
//! assert_eq!(params.total_pages(25), 3);
//! ```

use serde::Serialize;

use crate::store::FindWindow;

/// Parse the leading integer of `raw`
///
/// Leading whitespace and one sign are allowed; parsing stops at the first
/// non-digit. Returns `None` when no digit is found or the value overflows.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Positive integer or nothing
fn parse_positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(parse_int_prefix)
        .filter(|n| *n > 0)
        .and_then(|n| u64::try_from(n).ok())
}

/// Page number and optional page size for a list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    page: u64,
    limit: Option<u64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
        }
    }
}

impl PaginationParams {
    pub fn new(page: u64, limit: Option<u64>) -> Self {
        Self {
            page: page.max(1),
            limit: limit.filter(|l| *l > 0),
        }
    }

    /// Build from raw query string values, defaulting anything unusable
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(1),
            limit: parse_positive(limit),
        }
    }

    /// Page number (1-indexed)
    pub fn page(&self) -> u64 {
        self.page
    }

    /// Page size, `None` when unbounded
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Number of matching records to skip before this page
    pub fn offset(&self) -> u64 {
        self.limit
            .map_or(0, |limit| (self.page - 1).saturating_mul(limit))
    }

    /// Store window for this page
    pub fn window(&self) -> FindWindow {
        match self.limit {
            Some(limit) => FindWindow::Slice {
                skip: self.offset(),
                limit,
            },
            None => FindWindow::All,
        }
    }

    /// `max(1, ceil(total_items / limit))`, or 1 when unbounded
    pub fn total_pages(&self, total_items: u64) -> u64 {
        match self.limit {
            Some(limit) => total_items.div_ceil(limit).max(1),
            None => 1,
        }
    }

    /// A previous page exists only for bounded pages past the first
    pub fn has_previous(&self) -> bool {
        self.limit.is_some() && self.page > 1
    }

    pub fn has_next(&self, total_pages: u64) -> bool {
        self.limit.is_some() && self.page < total_pages
    }
}

/// Pagination block of a list response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata<L> {
    pub current_page: u64,
    pub current_items: usize,
    pub total_pages: u64,
    pub total_items: u64,
    #[serde(rename = "_links")]
    pub links: L,
}
