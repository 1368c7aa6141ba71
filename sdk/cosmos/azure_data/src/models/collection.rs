// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use super::{IndexingPolicy, Resource, SystemProperties};
use crate::PartitionKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A document collection.
#[derive(Clone, Default, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentCollection {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing_policy: Option<IndexingPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<PartitionKeyDefinition>,

    #[serde(flatten)]
    pub system_properties: SystemProperties,

    #[serde(rename = "_docs", default, skip_serializing_if = "Option::is_none")]
    pub documents_link: Option<String>,

    #[serde(rename = "_sprocs", default, skip_serializing_if = "Option::is_none")]
    pub stored_procedures_link: Option<String>,

    #[serde(rename = "_triggers", default, skip_serializing_if = "Option::is_none")]
    pub triggers_link: Option<String>,

    #[serde(rename = "_udfs", default, skip_serializing_if = "Option::is_none")]
    pub user_defined_functions_link: Option<String>,

    #[serde(rename = "_conflicts", default, skip_serializing_if = "Option::is_none")]
    pub conflicts_link: Option<String>,
}

impl DocumentCollection {
    /// Creates the definition of a new collection, partitioned on `partition_key`.
    pub fn new(id: impl Into<String>, partition_key: impl Into<PartitionKeyDefinition>) -> Self {
        Self {
            id: id.into(),
            partition_key: Some(partition_key.into()),
            ..Default::default()
        }
    }

    pub fn with_indexing_policy(mut self, indexing_policy: IndexingPolicy) -> Self {
        self.indexing_policy = Some(indexing_policy);
        self
    }
}

impl Resource for DocumentCollection {
    fn id(&self) -> &str {
        &self.id
    }

    fn system_properties(&self) -> &SystemProperties {
        &self.system_properties
    }
}

impl AsRef<str> for DocumentCollection {
    fn as_ref(&self) -> &str {
        &self.id
    }
}

/// How the partition key hashes onto partitions.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum PartitionKind {
    #[default]
    Hash,
    Range,
}

/// The document path a collection is partitioned on.
///
/// Converts from a path string:
///
/// ```rust
/// # use azure_data::models::PartitionKeyDefinition;
/// let definition = PartitionKeyDefinition::from("/testKey");
/// assert_eq!(definition.paths, vec!["/testKey".to_string()]);
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PartitionKeyDefinition {
    pub paths: Vec<String>,

    #[serde(default)]
    pub kind: PartitionKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
}

impl PartitionKeyDefinition {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            paths: vec![path.into()],
            kind: PartitionKind::Hash,
            version: None,
        }
    }

    /// Reads the partition key value out of a document.
    ///
    /// Returns `None` when the document has no value at the path, or the value is an array or object.
    pub fn extract(&self, document: &Value) -> Option<PartitionKey> {
        let path = self.paths.first()?;
        let mut current = document;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            let segment = segment.trim_matches('"');
            current = current.get(segment)?;
        }
        PartitionKey::from_value(current.clone())
    }
}

impl From<&str> for PartitionKeyDefinition {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for PartitionKeyDefinition {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}
