// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use serde::{Deserialize, Serialize};

/// Controls which document paths a collection indexes, and how.
///
/// Policies can be written out directly, or assembled with [`IndexingPolicy::builder()`]:
///
/// ```rust
/// use azure_data::models::{DataType, IncludedPath, Index, IndexKind, IndexingMode, IndexingPolicy};
///
/// let policy = IndexingPolicy::builder()
///     .automatic(true)
///     .mode(IndexingMode::Lazy)
///     .included_path(
///         IncludedPath::new("/*")
///             .with_index(Index::range(DataType::Number, -1))
///             .with_index(Index {
///                 kind: IndexKind::Hash,
///                 data_type: DataType::String,
///                 precision: Some(3),
///             })
///             .with_index(Index::spatial(DataType::Point)),
///     )
///     .excluded_path("/test/*")
///     .build();
///
/// assert_eq!(policy.included_paths[0].indexes.len(), 3);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IndexingPolicy {
    #[serde(default = "default_automatic")]
    pub automatic: bool,

    #[serde(default)]
    pub indexing_mode: IndexingMode,

    #[serde(default)]
    pub included_paths: Vec<IncludedPath>,

    #[serde(default)]
    pub excluded_paths: Vec<ExcludedPath>,
}

fn default_automatic() -> bool {
    true
}

impl Default for IndexingPolicy {
    fn default() -> Self {
        Self {
            automatic: true,
            indexing_mode: IndexingMode::default(),
            included_paths: Vec::new(),
            excluded_paths: Vec::new(),
        }
    }
}

/// When the index is updated relative to writes.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexingMode {
    #[default]
    Consistent,
    Lazy,
    None,
}

/// A path included in the index, with the indexes to maintain for it.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct IncludedPath {
    pub path: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indexes: Vec<Index>,
}

impl IncludedPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            indexes: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }
}

/// A path excluded from the index.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ExcludedPath {
    pub path: String,
}

impl ExcludedPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl From<&str> for ExcludedPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for ExcludedPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

/// One index maintained for an [`IncludedPath`].
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub kind: IndexKind,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i8>,
}

impl Index {
    /// A hash index, for equality queries. `-1` means maximum precision.
    pub fn hash(data_type: DataType, precision: i8) -> Self {
        Self {
            kind: IndexKind::Hash,
            data_type,
            precision: Some(precision),
        }
    }

    /// A range index, for equality, range and order-by queries. `-1` means maximum precision.
    pub fn range(data_type: DataType, precision: i8) -> Self {
        Self {
            kind: IndexKind::Range,
            data_type,
            precision: Some(precision),
        }
    }

    /// A spatial index, for geospatial queries.
    pub fn spatial(data_type: DataType) -> Self {
        Self {
            kind: IndexKind::Spatial,
            data_type,
            precision: None,
        }
    }

    /// Whether `other` describes the same index as `self`.
    ///
    /// Kind and data type must be equal; precision is only compared when both sides specify it,
    /// since the service may fill in or drop precisions it doesn't use.
    pub fn matches(&self, other: &Index) -> bool {
        self.kind == other.kind
            && self.data_type == other.data_type
            && match (self.precision, other.precision) {
                (Some(a), Some(b)) => a == b,
                _ => true,
            }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Hash,
    Range,
    Spatial,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum DataType {
    String,
    Number,
    Point,
    Polygon,
    LineString,
    MultiPolygon,
}

/// The first difference found between an expected policy and one returned by the service.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PolicyMismatch {
    #[error("automatic indexing differs: expected {expected}, found {actual}")]
    Automatic { expected: bool, actual: bool },

    #[error("indexing mode differs: expected {expected:?}, found {actual:?}")]
    IndexingMode {
        expected: IndexingMode,
        actual: IndexingMode,
    },

    #[error("expected {expected} included paths, found {actual}")]
    IncludedPathCount { expected: usize, actual: usize },

    #[error("included path '{0}' not found in indexing policy")]
    IncludedPathMissing(String),

    #[error("included path '{path}' has {actual} indexes, expected {expected}")]
    IndexCount {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("index {index:?} not found in included path '{path}'")]
    IndexMissing { path: String, index: Index },

    #[error("expected {expected} excluded paths, found {actual}")]
    ExcludedPathCount { expected: usize, actual: usize },

    #[error("excluded path '{0}' not found in indexing policy")]
    ExcludedPathMissing(String),
}

impl IndexingPolicy {
    pub fn builder() -> IndexingPolicyBuilder {
        IndexingPolicyBuilder::default()
    }

    /// Compares this (expected) policy with one returned by the service.
    ///
    /// Path and index order is not significant. Included paths are matched by path string and
    /// their indexes with [`Index::matches`]; excluded paths are matched by path string only.
    /// An expected included path without indexes accepts whatever indexes the service reports.
    pub fn mismatch(&self, returned: &IndexingPolicy) -> Option<PolicyMismatch> {
        if self.automatic != returned.automatic {
            return Some(PolicyMismatch::Automatic {
                expected: self.automatic,
                actual: returned.automatic,
            });
        }
        if self.indexing_mode != returned.indexing_mode {
            return Some(PolicyMismatch::IndexingMode {
                expected: self.indexing_mode,
                actual: returned.indexing_mode,
            });
        }

        if self.included_paths.len() != returned.included_paths.len() {
            return Some(PolicyMismatch::IncludedPathCount {
                expected: self.included_paths.len(),
                actual: returned.included_paths.len(),
            });
        }
        for expected in &self.included_paths {
            let Some(found) = returned
                .included_paths
                .iter()
                .find(|p| p.path == expected.path)
            else {
                return Some(PolicyMismatch::IncludedPathMissing(expected.path.clone()));
            };

            if expected.indexes.is_empty() {
                continue;
            }
            if expected.indexes.len() != found.indexes.len() {
                return Some(PolicyMismatch::IndexCount {
                    path: expected.path.clone(),
                    expected: expected.indexes.len(),
                    actual: found.indexes.len(),
                });
            }
            if let Some(index) = expected
                .indexes
                .iter()
                .find(|index| !found.indexes.iter().any(|i| index.matches(i)))
            {
                return Some(PolicyMismatch::IndexMissing {
                    path: expected.path.clone(),
                    index: *index,
                });
            }
        }

        if self.excluded_paths.len() != returned.excluded_paths.len() {
            return Some(PolicyMismatch::ExcludedPathCount {
                expected: self.excluded_paths.len(),
                actual: returned.excluded_paths.len(),
            });
        }
        self.excluded_paths
            .iter()
            .find(|expected| !returned.excluded_paths.iter().any(|p| p.path == expected.path))
            .map(|missing| PolicyMismatch::ExcludedPathMissing(missing.path.clone()))
    }

    /// Whether the two policies describe the same indexing, ignoring order.
    pub fn is_equivalent(&self, returned: &IndexingPolicy) -> bool {
        self.mismatch(returned).is_none()
    }
}

/// Builder used to construct an [`IndexingPolicy`].
///
/// Obtain an [`IndexingPolicyBuilder`] by calling [`IndexingPolicy::builder()`].
#[derive(Default)]
pub struct IndexingPolicyBuilder(IndexingPolicy);

impl IndexingPolicyBuilder {
    pub fn automatic(mut self, automatic: bool) -> Self {
        self.0.automatic = automatic;
        self
    }

    pub fn mode(mut self, mode: IndexingMode) -> Self {
        self.0.indexing_mode = mode;
        self
    }

    pub fn included_path(mut self, path: IncludedPath) -> Self {
        self.0.included_paths.push(path);
        self
    }

    /// Omit if no paths should be excluded.
    pub fn excluded_path(mut self, path: impl Into<ExcludedPath>) -> Self {
        self.0.excluded_paths.push(path.into());
        self
    }

    /// Builds an [`IndexingPolicy`] from the builder.
    ///
    /// This does not consume the builder, and can be called multiple times.
    pub fn build(&self) -> IndexingPolicy {
        self.0.clone()
    }
}
