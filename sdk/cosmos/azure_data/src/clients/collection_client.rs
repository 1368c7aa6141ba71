// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::clients::DocumentClient;
use crate::constants;
use crate::error::{Error, ErrorKind};
use crate::feed::FeedPager;
use crate::http::Method;
use crate::models::{
    Document, DocumentCollection, IndexingPolicy, Offer, PartitionKeyDefinition, PartitionKeyRange,
};
use crate::pipeline::CosmosPipeline;
use crate::resource_context::{ResourceLink, ResourceType};
use crate::{
    DataResponse, ListOptions, ListResponse, PartitionKey, Query, QueryOptions, Response,
};
use futures::TryStreamExt;
use serde::{de::DeserializeOwned, Serialize};

/// A client for working with a specific collection.
///
/// You can get a `CollectionClient` by calling [`DatabaseClient::collection_client()`](crate::clients::DatabaseClient::collection_client()).
#[derive(Debug, Clone)]
pub struct CollectionClient {
    collection_id: String,
    link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl CollectionClient {
    pub(crate) fn new(pipeline: CosmosPipeline, database_link: &ResourceLink, collection_id: &str) -> Self {
        let collection_id = collection_id.to_string();
        let link = database_link
            .feed(ResourceType::Collections)
            .item(&collection_id);

        Self {
            collection_id,
            link,
            pipeline,
        }
    }

    pub fn id(&self) -> &str {
        &self.collection_id
    }

    /// Gets a [`DocumentClient`] for the document with the given id and partition key. Nothing is sent.
    pub fn document_client(
        &self,
        document_id: impl AsRef<str>,
        partition_key: impl Into<PartitionKey>,
    ) -> DocumentClient {
        DocumentClient::new(
            self.pipeline.clone(),
            &self.link,
            document_id.as_ref(),
            partition_key.into(),
        )
    }

    pub async fn read(&self) -> crate::Result<Response<DocumentCollection>> {
        let request = self.pipeline.request(&self.link, Method::Get);
        self.pipeline.send_typed(request, &self.link).await
    }

    /// Re-reads the collection if it changed since `collection` was read.
    pub async fn refresh(
        &self,
        collection: &DocumentCollection,
    ) -> crate::Result<Response<DocumentCollection>> {
        self.pipeline.refresh(&self.link, collection.clone()).await
    }

    /// Deletes the collection and forgets its session state.
    pub async fn delete(&self) -> crate::Result<DataResponse> {
        let request = self.pipeline.request(&self.link, Method::Delete);
        let response = self.pipeline.send_data(request, &self.link).await?;
        self.pipeline.clear_session(&self.link);
        Ok(response)
    }

    /// Replaces the collection's indexing policy.
    ///
    /// The partition key of a collection can't change, but the service expects it to be
    /// restated on replace.
    ///
    /// The service may normalize the policy it stores (adding precisions, reordering paths);
    /// compare what it returns with [`IndexingPolicy::mismatch`].
    pub async fn replace(
        &self,
        indexing_policy: IndexingPolicy,
        partition_key: Option<PartitionKeyDefinition>,
    ) -> crate::Result<Response<DocumentCollection>> {
        let collection = DocumentCollection {
            id: self.collection_id.clone(),
            indexing_policy: Some(indexing_policy),
            partition_key,
            ..Default::default()
        };

        let mut request = self.pipeline.request(&self.link, Method::Put);
        request.set_json(&collection)?;
        self.pipeline.send_typed(request, &self.link).await
    }

    /// Reads the partition key ranges the collection is currently split into.
    pub async fn get_partition_key_ranges(
        &self,
    ) -> crate::Result<ListResponse<PartitionKeyRange>> {
        self.pipeline
            .read_feed(
                &self.link.feed(ResourceType::PartitionKeyRanges),
                ListOptions::default(),
            )
            .await
    }

    fn documents_link(&self) -> ResourceLink {
        self.link.feed(ResourceType::Documents)
    }

    async fn post_document<T>(
        &self,
        document: &T,
        partition_key: PartitionKey,
        upsert: bool,
    ) -> crate::Result<Response<Document<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        let link = self.documents_link();
        let mut request = self.pipeline.request(&link, Method::Post);
        request.insert_header(constants::PARTITION_KEY, partition_key.to_header_value()?);
        if upsert {
            request.insert_header(constants::IS_UPSERT, "True");
        }
        request.set_json(document)?;
        self.pipeline.send_typed(request, &link).await
    }

    /// Creates a document. `partition_key` must equal the document's value at the collection's
    /// partition key path, or the service rejects the request.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn doc(collection: azure_data::clients::CollectionClient) -> azure_data::Result<()> {
    /// use serde_json::json;
    ///
    /// let document = json!({ "id": "doc1", "testKey": "PartitionKeyValue", "customNumber": 1 });
    /// let created = collection.create_document(&document, "PartitionKeyValue").await?;
    /// println!("charge: {:?}", created.request_charge());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_document<T>(
        &self,
        document: &T,
        partition_key: impl Into<PartitionKey>,
    ) -> crate::Result<Response<Document<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.post_document(document, partition_key.into(), false)
            .await
    }

    /// Creates the document, or replaces it if one with the same id already exists.
    pub async fn create_or_update_document<T>(
        &self,
        document: &T,
        partition_key: impl Into<PartitionKey>,
    ) -> crate::Result<Response<Document<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.post_document(document, partition_key.into(), true)
            .await
    }

    /// Reads one page of the collection's documents.
    pub async fn get_documents<T: DeserializeOwned>(
        &self,
        options: Option<ListOptions>,
    ) -> crate::Result<ListResponse<Document<T>>> {
        self.pipeline
            .read_feed(&self.documents_link(), options.unwrap_or_default())
            .await
    }

    /// Streams every document in the collection.
    pub fn list_documents<T>(&self, max_item_count: Option<u32>) -> FeedPager<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.pipeline.list(self.documents_link(), max_item_count)
    }

    /// Runs a SQL query over the collection's documents.
    ///
    /// Without a partition key in `options`, the query must be allowed to span partitions with
    /// [`QueryOptions::enable_cross_partition`].
    pub fn query_documents<T>(
        &self,
        query: impl Into<Query>,
        options: Option<QueryOptions>,
    ) -> FeedPager<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.pipeline
            .query(self.documents_link(), query.into(), options.unwrap_or_default())
    }

    /// Reads the throughput offer of the collection.
    ///
    /// Returns `None` if the collection has no dedicated throughput, e.g. when it shares its
    /// database's.
    pub async fn read_throughput(&self) -> crate::Result<Option<Offer>> {
        let collection = self.read().await?.into_resource();
        let rid = collection.system_properties.resource_id.ok_or_else(|| {
            Error::message(
                ErrorKind::DataConversion,
                "the service returned a collection without a '_rid'",
            )
        })?;

        let query = Query::from("SELECT * FROM root r WHERE r.offerResourceId = @rid")
            .with_parameter("@rid", rid)?;
        let mut offers = self.pipeline.query::<Offer>(
            ResourceLink::root(ResourceType::Offers),
            query,
            QueryOptions::default(),
        );
        while let Some(page) = offers.try_next().await? {
            if let Some(offer) = page.into_items().into_iter().next() {
                return Ok(Some(offer));
            }
        }
        Ok(None)
    }
}
