// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use super::{Resource, SystemProperties};
use serde::{Deserialize, Serialize};

/// A database: a named container of collections.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Database {
    pub id: String,

    #[serde(flatten)]
    pub system_properties: SystemProperties,

    /// The link of the database's collection feed (`_colls`).
    #[serde(rename = "_colls", default, skip_serializing_if = "Option::is_none")]
    pub collections_link: Option<String>,

    /// The link of the database's user feed (`_users`).
    #[serde(rename = "_users", default, skip_serializing_if = "Option::is_none")]
    pub users_link: Option<String>,
}

impl Resource for Database {
    fn id(&self) -> &str {
        &self.id
    }

    fn system_properties(&self) -> &SystemProperties {
        &self.system_properties
    }
}

impl AsRef<str> for Database {
    fn as_ref(&self) -> &str {
        &self.id
    }
}
