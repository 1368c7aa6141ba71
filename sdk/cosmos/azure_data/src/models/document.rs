// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use super::SystemProperties;
use serde::{Deserialize, Serialize};

/// A document as returned by the service: the user's content plus the system properties.
///
/// `T` is the user's type. It must carry the document's `id`; any property it doesn't declare
/// (including the system ones) is ignored when deserializing.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Document<T> {
    #[serde(flatten)]
    pub document: T,

    #[serde(flatten)]
    pub system_properties: SystemProperties,

    /// The link of the document's attachment feed (`_attachments`).
    #[serde(rename = "_attachments", default, skip_serializing_if = "Option::is_none")]
    pub attachments_link: Option<String>,
}

impl<T> Document<T> {
    pub fn into_inner(self) -> T {
        self.document
    }

    pub fn etag(&self) -> Option<&str> {
        self.system_properties.etag.as_deref()
    }
}

impl<T> AsRef<T> for Document<T> {
    fn as_ref(&self) -> &T {
        &self.document
    }
}
