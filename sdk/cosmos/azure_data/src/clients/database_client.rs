// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::clients::CollectionClient;
use crate::constants;
use crate::feed::FeedPager;
use crate::http::Method;
use crate::models::{Database, DocumentCollection, PartitionKeyDefinition};
use crate::pipeline::CosmosPipeline;
use crate::resource_context::{ResourceLink, ResourceType};
use crate::{CreateCollectionOptions, DataResponse, ListOptions, ListResponse, Response};

/// A client for working with a specific database in a Cosmos DB account.
///
/// You can get a `DatabaseClient` by calling [`CosmosClient::database_client()`](crate::CosmosClient::database_client()).
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    database_id: String,
    link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl DatabaseClient {
    pub(crate) fn new(pipeline: CosmosPipeline, database_id: &str) -> Self {
        let database_id = database_id.to_string();
        let link = ResourceLink::root(ResourceType::Databases).item(&database_id);

        Self {
            database_id,
            link,
            pipeline,
        }
    }

    /// Returns the identifier of the Cosmos database.
    pub fn id(&self) -> &str {
        &self.database_id
    }

    /// Gets a [`CollectionClient`] for the collection with the given id. Nothing is sent.
    pub fn collection_client(&self, collection_id: impl AsRef<str>) -> CollectionClient {
        CollectionClient::new(self.pipeline.clone(), &self.link, collection_id.as_ref())
    }

    /// Reads the properties of the database.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # async fn doc(client: azure_data::CosmosClient) -> azure_data::Result<()> {
    /// let database = client.database_client("ToDoList").read().await?.into_resource();
    /// println!("{}", database.id);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read(&self) -> crate::Result<Response<Database>> {
        let request = self.pipeline.request(&self.link, Method::Get);
        self.pipeline.send_typed(request, &self.link).await
    }

    /// Re-reads the database if it changed since `database` was read.
    pub async fn refresh(&self, database: &Database) -> crate::Result<Response<Database>> {
        self.pipeline.refresh(&self.link, database.clone()).await
    }

    /// Deletes the database and forgets the session state of its collections.
    pub async fn delete(&self) -> crate::Result<DataResponse> {
        let request = self.pipeline.request(&self.link, Method::Delete);
        let response = self.pipeline.send_data(request, &self.link).await?;
        self.pipeline.clear_database_sessions(&self.link);
        Ok(response)
    }

    fn collections_link(&self) -> ResourceLink {
        self.link.feed(ResourceType::Collections)
    }

    /// Creates a collection partitioned on `partition_key_path`, with the service's default
    /// indexing policy and throughput.
    pub async fn create_collection(
        &self,
        id: impl Into<String>,
        partition_key_path: impl Into<String>,
    ) -> crate::Result<Response<DocumentCollection>> {
        self.create_collection_with_options(id, partition_key_path, CreateCollectionOptions::default())
            .await
    }

    /// Creates a collection, provisioning the throughput and indexing policy in `options`.
    ///
    /// The throughput is sent as given; the service rejects values it can't provision.
    pub async fn create_collection_with_options(
        &self,
        id: impl Into<String>,
        partition_key_path: impl Into<String>,
        options: CreateCollectionOptions,
    ) -> crate::Result<Response<DocumentCollection>> {
        let link = self.collections_link();
        let mut request = self.pipeline.request(&link, Method::Post);
        if let Some(throughput) = options.throughput {
            request.insert_header(constants::OFFER_THROUGHPUT, throughput.to_string());
        }

        let mut collection =
            DocumentCollection::new(id, PartitionKeyDefinition::new(partition_key_path));
        collection.indexing_policy = options.indexing_policy;
        request.set_json(&collection)?;

        self.pipeline.send_typed(request, &link).await
    }

    /// Reads one page of the database's collections.
    pub async fn get_collections(
        &self,
        options: Option<ListOptions>,
    ) -> crate::Result<ListResponse<DocumentCollection>> {
        self.pipeline
            .read_feed(&self.collections_link(), options.unwrap_or_default())
            .await
    }

    /// Streams every collection in the database.
    pub fn list_collections(&self, max_item_count: Option<u32>) -> FeedPager<DocumentCollection> {
        self.pipeline.list(self.collections_link(), max_item_count)
    }

    pub async fn get_collection(
        &self,
        collection_id: impl AsRef<str>,
    ) -> crate::Result<Response<DocumentCollection>> {
        self.collection_client(collection_id).read().await
    }

    /// Deletes a collection, given its id or the [`DocumentCollection`] itself.
    pub async fn delete_collection(
        &self,
        collection: impl AsRef<str>,
    ) -> crate::Result<DataResponse> {
        self.collection_client(collection).delete().await
    }
}
