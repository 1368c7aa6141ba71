// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use super::SystemProperties;
use serde::{Deserialize, Serialize};

/// The throughput provisioned for a database or collection.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: String,

    /// The `_self` link of the resource the offer applies to.
    #[serde(default)]
    pub resource: String,

    /// The `_rid` of the resource the offer applies to.
    #[serde(default)]
    pub offer_resource_id: String,

    #[serde(default)]
    pub offer_type: String,

    #[serde(default)]
    pub offer_version: String,

    #[serde(default)]
    pub content: OfferContent,

    #[serde(flatten)]
    pub system_properties: SystemProperties,
}

impl Offer {
    /// The provisioned throughput in RU/s.
    pub fn throughput(&self) -> u32 {
        self.content.offer_throughput
    }
}

#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OfferContent {
    pub offer_throughput: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_autopilot_settings: Option<AutoscaleSettings>,
}

#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoscaleSettings {
    pub max_throughput: u32,
}
