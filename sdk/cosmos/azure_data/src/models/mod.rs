// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Model types sent to and received from the service.

mod collection;
mod database;
mod document;
mod indexing_policy;
mod offer;
mod partition_key_range;

pub use collection::*;
pub use database::*;
pub use document::*;
pub use indexing_policy::*;
pub use offer::*;
pub use partition_key_range::*;

use serde::{Deserialize, Serialize};

/// Properties the service assigns to every resource.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SystemProperties {
    /// The unique, server-generated resource id (`_rid`).
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "_rid")]
    pub resource_id: Option<String>,

    /// The rid-based link of the resource (`_self`).
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "_self")]
    pub self_link: Option<String>,

    /// The entity tag, which changes on every write (`_etag`).
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "_etag")]
    pub etag: Option<String>,

    /// The last-modified time, in seconds since the Unix epoch (`_ts`).
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "_ts")]
    pub last_modified: Option<u64>,
}

/// Common accessors of server resources.
pub trait Resource {
    fn id(&self) -> &str;

    fn system_properties(&self) -> &SystemProperties;

    fn etag(&self) -> Option<&str> {
        self.system_properties().etag.as_deref()
    }
}

/// The body of a feed (list or query) response.
///
/// The service names the array after the resource type (`Databases`, `DocumentCollections`,
/// `Documents`, `PartitionKeyRanges`, `Offers`); all of them deserialize into `items`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ResourceList<T> {
    #[serde(rename = "_rid", default, skip_serializing_if = "Option::is_none")]
    pub(crate) resource_id: Option<String>,

    #[serde(
        rename = "Documents",
        alias = "Databases",
        alias = "DocumentCollections",
        alias = "PartitionKeyRanges",
        alias = "Offers"
    )]
    pub(crate) items: Vec<T>,

    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub(crate) count: Option<usize>,
}

impl<T> ResourceList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            resource_id: None,
            count: Some(items.len()),
            items,
        }
    }

    /// The number of resources in this list, as reported by the service.
    pub fn count(&self) -> usize {
        self.count.unwrap_or(self.items.len())
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for ResourceList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
