// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::models::IndexingPolicy;

/// Options to be passed when creating a collection.
#[derive(Clone, Debug, Default)]
pub struct CreateCollectionOptions {
    /// Throughput to provision for the collection, in RU/s.
    pub throughput: Option<u32>,

    /// The indexing policy. The service applies its default policy when unset.
    pub indexing_policy: Option<IndexingPolicy>,
}

impl CreateCollectionOptions {
    /// Creates a new [`CreateCollectionOptionsBuilder`] that can be used to construct a [`CreateCollectionOptions`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// let options = azure_data::CreateCollectionOptions::builder()
    ///     .with_throughput(400)
    ///     .build();
    /// assert_eq!(options.throughput, Some(400));
    /// ```
    pub fn builder() -> CreateCollectionOptionsBuilder {
        CreateCollectionOptionsBuilder::default()
    }
}

/// Builder used to construct a [`CreateCollectionOptions`].
///
/// Obtain a [`CreateCollectionOptionsBuilder`] by calling [`CreateCollectionOptions::builder()`]
#[derive(Default)]
pub struct CreateCollectionOptionsBuilder(CreateCollectionOptions);

impl CreateCollectionOptionsBuilder {
    pub fn with_throughput(mut self, throughput: u32) -> Self {
        self.0.throughput = Some(throughput);
        self
    }

    pub fn with_indexing_policy(mut self, indexing_policy: IndexingPolicy) -> Self {
        self.0.indexing_policy = Some(indexing_policy);
        self
    }

    /// Builds a [`CreateCollectionOptions`] from the builder.
    ///
    /// This does not consume the builder, and can be called multiple times.
    pub fn build(&self) -> CreateCollectionOptions {
        self.0.clone()
    }
}
