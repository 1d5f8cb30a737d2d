//! Response views of a record
//!
//! Single-record endpoints answer with a [`RecordView`]; the listing uses the
//! slimmer [`RecordSummary`]. Both are camelCase and carry `_links`.

use serde::Serialize;
use uuid::Uuid;

use crate::features::shared::{Link, ResourceUrls};
use crate::store::Record;

/// Parse a path segment into a record id; anything else is an unknown record
pub fn parse_record_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
}

/// `self` plus `collection` links
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: Link,
    pub collection: Link,
}

/// Full record representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: Uuid,
    pub stroke: String,
    pub distance: String,
    pub time: String,
    pub name: String,
    pub gender: String,
    pub country: String,
    pub image_url: String,
    pub favorite: bool,
    #[serde(rename = "_links")]
    pub links: ResourceLinks,
}

impl RecordView {
    pub fn new(record: Record, urls: &ResourceUrls) -> Self {
        Self {
            links: ResourceLinks {
                self_link: Link::new(urls.record(record.id)),
                collection: Link::new(urls.collection()),
            },
            id: record.id,
            stroke: record.stroke,
            distance: record.distance,
            time: record.time,
            name: record.name,
            gender: record.gender,
            country: record.country,
            image_url: record.image_url,
            favorite: record.favorite,
        }
    }
}

/// Listing item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSummary {
    pub stroke: String,
    pub distance: String,
    pub name: String,
    pub image_url: String,
    pub favorite: bool,
    pub id: Uuid,
    #[serde(rename = "_links")]
    pub links: SelfLinks,
}

impl RecordSummary {
    pub fn new(record: Record, urls: &ResourceUrls) -> Self {
        Self {
            links: SelfLinks {
                self_link: Link::new(urls.record(record.id)),
            },
            stroke: record.stroke,
            distance: record.distance,
            name: record.name,
            image_url: record.image_url,
            favorite: record.favorite,
            id: record.id,
        }
    }
}
