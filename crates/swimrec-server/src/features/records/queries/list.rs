//! List records query
//!
//! Filters on exact `stroke` / `distance` matches and optionally paginates.
//! The response mirrors the client's query string in its `self` link and
//! derives `first`, `last`, `previous` and `next` links from it.

use serde::Serialize;

use crate::features::records::types::{RecordSummary, ResourceLinks};
use crate::features::shared::{
    build_link, parse_query, Link, PageLink, PaginationMetadata, PaginationParams, QueryPairs,
    ResourceUrls,
};
use crate::store::{DynRecordStore, RecordFilter, StoreError};

/// Query parameters of `GET /records`, kept as the raw ordered pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRecordsQuery {
    params: QueryPairs,
}

/// Navigation links of a page
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    pub first: PageLink,
    pub last: PageLink,
    pub previous: Option<PageLink>,
    pub next: Option<PageLink>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListRecordsResponse {
    pub items: Vec<RecordSummary>,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
    pub pagination: PaginationMetadata<PageLinks>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListRecordsError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ListRecordsQuery {
    /// Build from a raw query string such as `stroke=freestyle&limit=10`
    pub fn from_raw(raw: Option<&str>) -> Self {
        Self {
            params: parse_query(raw),
        }
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// First value supplied for `key`
    fn first(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn filter(&self) -> RecordFilter {
        RecordFilter::new(self.first("stroke"), self.first("distance"))
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams::from_raw(self.first("page"), self.first("limit"))
    }
}

/// Navigation links; without a limit every boundary link is the self link
fn page_links(
    collection: &str,
    query: &ListRecordsQuery,
    params: &PaginationParams,
    total_pages: u64,
    self_href: &str,
) -> PageLinks {
    let Some(limit) = params.limit() else {
        return PageLinks {
            first: PageLink {
                page: 1,
                href: self_href.to_string(),
            },
            last: PageLink {
                page: total_pages,
                href: self_href.to_string(),
            },
            previous: None,
            next: None,
        };
    };

    let link = |page: u64| PageLink {
        page,
        href: build_link(
            collection,
            query.params(),
            &[("page", page.to_string()), ("limit", limit.to_string())],
        ),
    };

    PageLinks {
        first: link(1),
        last: link(total_pages),
        previous: params.has_previous().then(|| link(params.page() - 1)),
        next: params.has_next(total_pages).then(|| link(params.page() + 1)),
    }
}

/// Handler function for listing records
///
/// Counts all matches first, then fetches the requested window. The two
/// calls are not atomic.
///
/// # Errors
///
/// Any store failure; no partial response is produced.
#[tracing::instrument(skip(store, urls))]
pub async fn handle(
    store: DynRecordStore,
    query: ListRecordsQuery,
    urls: &ResourceUrls,
) -> Result<ListRecordsResponse, ListRecordsError> {
    let filter = query.filter();
    let params = query.pagination();

    let total_items = store.count(&filter).await?;
    let records = store.find(&filter, params.window()).await?;
    let total_pages = params.total_pages(total_items);

    let items: Vec<RecordSummary> = records
        .into_iter()
        .map(|r| RecordSummary::new(r, urls))
        .collect();

    tracing::debug!(
        total_items,
        total_pages,
        returned = items.len(),
        "Records listed"
    );

    let collection = urls.collection();
    let self_href = build_link(&collection, query.params(), &[]);
    let nav = page_links(&collection, &query, &params, total_pages, &self_href);

    Ok(ListRecordsResponse {
        pagination: PaginationMetadata {
            current_page: params.page(),
            current_items: items.len(),
            total_pages,
            total_items,
            links: nav,
        },
        links: ResourceLinks {
            self_link: Link::new(self_href),
            collection: Link::new(collection),
        },
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{
        numbered_records, seeded_store, test_urls, FailingStore, TestRecord,
    };
    use serde_json::json;
    use std::sync::Arc;

    async fn list(store: DynRecordStore, raw: &str) -> ListRecordsResponse {
        let raw = (!raw.is_empty()).then_some(raw);
        handle(store, ListRecordsQuery::from_raw(raw), &test_urls())
            .await
            .unwrap()
    }

    #[test]
    fn test_first_value_wins() {
        let query = ListRecordsQuery::from_raw(Some("stroke=fly&stroke=back&page=2&page=5"));
        assert_eq!(query.filter().stroke.as_deref(), Some("fly"));
        assert_eq!(query.pagination().page(), 2);
    }

    #[test]
    fn test_empty_filter_values_are_dropped() {
        let query = ListRecordsQuery::from_raw(Some("stroke=&distance=50m"));
        assert_eq!(query.filter(), RecordFilter::new(None, Some("50m")));
    }

    #[tokio::test]
    async fn test_empty_store_with_limit() {
        let response = list(seeded_store(vec![]), "limit=10").await;
        let p = &response.pagination;

        assert!(response.items.is_empty());
        assert_eq!(
            (p.current_page, p.current_items, p.total_pages, p.total_items),
            (1, 0, 1, 0)
        );
        assert!(p.links.previous.is_none());
        assert!(p.links.next.is_none());
        assert_eq!(
            p.links.first.href,
            "http://localhost:8000/records?limit=10&page=1"
        );
    }

    #[tokio::test]
    async fn test_middle_page() {
        let response = list(seeded_store(numbered_records(25)), "limit=10&page=2").await;
        let p = &response.pagination;

        assert_eq!(response.items.len(), 10);
        assert_eq!(response.items[0].name, "Swimmer 10");
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.current_page, 2);

        let previous = p.links.previous.as_ref().unwrap();
        assert_eq!(previous.page, 1);
        assert_eq!(previous.href, "http://localhost:8000/records?limit=10&page=1");

        let next = p.links.next.as_ref().unwrap();
        assert_eq!(next.page, 3);
        assert_eq!(next.href, "http://localhost:8000/records?limit=10&page=3");
        assert_eq!(p.links.last.page, 3);
    }

    #[tokio::test]
    async fn test_last_page() {
        let response = list(seeded_store(numbered_records(25)), "limit=10&page=3").await;
        assert_eq!(response.items.len(), 5);
        assert_eq!(response.pagination.current_items, 5);
        assert!(response.pagination.links.next.is_none());
        assert_eq!(response.pagination.links.previous.as_ref().unwrap().page, 2);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let response = list(seeded_store(numbered_records(5)), "limit=10&page=4").await;
        assert!(response.items.is_empty());
        assert_eq!(response.pagination.current_page, 4);
        assert_eq!(response.pagination.links.previous.as_ref().unwrap().page, 3);
        assert!(response.pagination.links.next.is_none());
    }

    #[tokio::test]
    async fn test_no_limit_returns_everything() {
        let response = list(seeded_store(numbered_records(25)), "page=2&stroke=freestyle").await;
        let p = &response.pagination;
        let self_href = "http://localhost:8000/records?page=2&stroke=freestyle";

        assert_eq!(response.items.len(), 25);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.current_page, 2);
        assert_eq!(response.links.self_link.href, self_href);
        assert_eq!(p.links.first.href, self_href);
        assert_eq!(p.links.last.href, self_href);
        assert_eq!(p.links.last.page, 1);
        assert!(p.links.previous.is_none() && p.links.next.is_none());
    }

    #[tokio::test]
    async fn test_filter_by_stroke() {
        let store = seeded_store(vec![
            TestRecord::new("freestyle", "100m").build(),
            TestRecord::new("butterfly", "100m").build(),
            TestRecord::new("butterfly", "200m").build(),
        ]);

        let response = list(store.clone(), "stroke=butterfly").await;
        assert_eq!(response.pagination.total_items, 2);
        assert!(response.items.iter().all(|i| i.stroke == "butterfly"));

        let response = list(store.clone(), "stroke=butterfly&distance=200m").await;
        assert_eq!(response.items.len(), 1);

        let response = list(store, "").await;
        assert_eq!(response.items.len(), 3);
        assert_eq!(response.links.self_link.href, "http://localhost:8000/records");
    }

    #[tokio::test]
    async fn test_non_numeric_page_defaults_to_first() {
        let response = list(seeded_store(numbered_records(12)), "page=abc&limit=5").await;
        assert_eq!(response.pagination.current_page, 1);
        assert_eq!(response.items[0].name, "Swimmer 0");
        assert_eq!(
            response.pagination.links.next.as_ref().unwrap().href,
            "http://localhost:8000/records?page=2&limit=5"
        );
    }

    #[tokio::test]
    async fn test_links_keep_filters() {
        let response = list(
            seeded_store(numbered_records(3)),
            "stroke=freestyle&limit=1&page=2&distance=100m",
        )
        .await;
        assert_eq!(
            response.pagination.links.next.as_ref().unwrap().href,
            "http://localhost:8000/records?stroke=freestyle&limit=1&page=3&distance=100m"
        );
    }

    #[tokio::test]
    async fn test_response_shape() {
        let record = TestRecord::new("freestyle", "50m").build();
        let id = record.id;
        let response = list(seeded_store(vec![record]), "limit=5").await;
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(
            value["items"][0]["_links"]["self"]["href"],
            json!(format!("http://localhost:8000/records/{}", id))
        );
        assert_eq!(value["_links"]["collection"]["href"], "http://localhost:8000/records");
        assert_eq!(value["pagination"]["currentItems"], 1);
        assert_eq!(value["pagination"]["_links"]["previous"], json!(null));
        assert_eq!(value["pagination"]["_links"]["first"]["page"], 1);
    }

    #[tokio::test]
    async fn test_store_failure() {
        let err = handle(
            Arc::new(FailingStore),
            ListRecordsQuery::default(),
            &test_urls(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "store unavailable");
    }
}
