// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Header names and well-known values used by the REST API.

/// The REST API version sent in `x-ms-version`.
pub const API_VERSION: &str = "2018-12-31";

/// The smallest throughput (in RU/s) the service provisions by default.
pub const MIN_THROUGHPUT: u32 = 400;

/// The largest throughput (in RU/s) an account can provision without a quota increase.
pub const MAX_THROUGHPUT: u32 = 1_000_000;

/// Provisioned throughput must be a multiple of this.
pub const THROUGHPUT_INCREMENT: u32 = 100;

pub const AUTHORIZATION: &str = "authorization";
pub const CONTENT_TYPE: &str = "content-type";
pub const ETAG: &str = "etag";
pub const IF_MATCH: &str = "if-match";
pub const IF_NONE_MATCH: &str = "if-none-match";
pub const USER_AGENT: &str = "user-agent";

pub const ACTIVITY_ID: &str = "x-ms-activity-id";
pub const CONSISTENCY_LEVEL: &str = "x-ms-consistency-level";
pub const CONTINUATION: &str = "x-ms-continuation";
pub const DATE: &str = "x-ms-date";
pub const ENABLE_CROSS_PARTITION_QUERY: &str = "x-ms-documentdb-query-enablecrosspartition";
pub const IS_QUERY: &str = "x-ms-documentdb-isquery";
pub const IS_UPSERT: &str = "x-ms-documentdb-is-upsert";
pub const ITEM_COUNT: &str = "x-ms-item-count";
pub const MAX_ITEM_COUNT: &str = "x-ms-max-item-count";
pub const OFFER_THROUGHPUT: &str = "x-ms-offer-throughput";
pub const PARTITION_KEY: &str = "x-ms-documentdb-partitionkey";
pub const REQUEST_CHARGE: &str = "x-ms-request-charge";
pub const RESOURCE_QUOTA: &str = "x-ms-resource-quota";
pub const RESOURCE_USAGE: &str = "x-ms-resource-usage";
pub const SESSION_TOKEN: &str = "x-ms-session-token";
pub const VERSION: &str = "x-ms-version";

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_QUERY_JSON: &str = "application/query+json";
