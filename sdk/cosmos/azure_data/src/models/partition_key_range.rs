// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use super::SystemProperties;
use serde::{Deserialize, Serialize};

/// A server-assigned shard of a collection's partition key space. Read-only.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PartitionKeyRange {
    pub id: String,

    /// The inclusive lower bound of the hashed key range.
    #[serde(default)]
    pub min_inclusive: String,

    /// The exclusive upper bound of the hashed key range.
    #[serde(default)]
    pub max_exclusive: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rid_prefix: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_fraction: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Ids of the ranges this one was split from.
    #[serde(default)]
    pub parents: Vec<String>,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}
