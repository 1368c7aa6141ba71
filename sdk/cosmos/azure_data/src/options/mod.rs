// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

mod create_collection_options;

pub use create_collection_options::*;

use crate::http::HttpClient;
use crate::PartitionKey;
use std::fmt;
use std::sync::Arc;

/// Options used when creating a [`CosmosClient`](crate::CosmosClient).
#[derive(Clone, Debug, Default)]
pub struct CosmosClientOptions {
    /// Overrides the account's default consistency for every request. Can only weaken it.
    pub consistency_level: Option<ConsistencyLevel>,

    /// Appended to the `user-agent` header.
    pub user_agent_suffix: Option<String>,

    /// Overrides `x-ms-version`. Defaults to [`API_VERSION`](crate::constants::API_VERSION).
    pub api_version: Option<String>,

    /// The transport used to send requests. Defaults to [`new_http_client()`](crate::http::new_http_client).
    pub http_client: Option<Arc<dyn HttpClient>>,
}

/// The consistency levels offered by the service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConsistencyLevel {
    Strong,
    BoundedStaleness,
    Session,
    ConsistentPrefix,
    Eventual,
}

impl ConsistencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyLevel::Strong => "Strong",
            ConsistencyLevel::BoundedStaleness => "BoundedStaleness",
            ConsistencyLevel::Session => "Session",
            ConsistencyLevel::ConsistentPrefix => "ConsistentPrefix",
            ConsistencyLevel::Eventual => "Eventual",
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for reading a feed (list) of resources one page at a time.
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    /// The most resources to return in one page. The service picks when unset.
    pub max_item_count: Option<u32>,

    /// The continuation token of the page to read, as returned with the previous page.
    pub continuation: Option<String>,
}

/// Options for querying documents.
#[derive(Clone, Debug, Default)]
pub struct QueryOptions {
    /// Restricts the query to one partition.
    pub partition_key: Option<PartitionKey>,

    /// Lets the query fan out to every partition. Required when no partition key is given
    /// and the collection is partitioned.
    pub enable_cross_partition: bool,

    /// The most documents to return in one page.
    pub max_item_count: Option<u32>,
}

/// Options for replacing a document.
#[derive(Clone, Debug, Default)]
pub struct ReplaceDocumentOptions {
    /// Only replace when the stored document still has this etag.
    pub if_match_etag: Option<String>,
}
