// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::clients::{CollectionClient, DatabaseClient};
use crate::constants;
use crate::error::{Error, ErrorKind, ResultExt};
use crate::feed::FeedPager;
use crate::http::Method;
use crate::models::{
    Database, Document, DocumentCollection, IndexingPolicy, PartitionKeyRange,
};
use crate::pipeline::CosmosPipeline;
use crate::resource_context::{ResourceLink, ResourceType};
use crate::{
    AuthorizationToken, ConnectionString, CosmosClientOptions, CreateCollectionOptions,
    DataResponse, ListOptions, ListResponse, PartitionKey, Response,
};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

/// Environment variable holding a full connection string.
const CONNECTION_STRING_ENV: &str = "AZURE_COSMOS_CONNECTION_STRING";
/// Environment variable holding the account name, used with [`ACCOUNT_KEY_ENV`].
const ACCOUNT_ENV: &str = "AZURE_COSMOS_ACCOUNT";
/// Environment variable holding the base64 account key.
const ACCOUNT_KEY_ENV: &str = "AZURE_COSMOS_KEY";

/// Client for an Azure Cosmos DB account.
///
/// Besides handing out [`DatabaseClient`]s, it offers id-based shortcuts for the common
/// collection and document operations.
#[derive(Debug, Clone)]
pub struct CosmosClient {
    pipeline: CosmosPipeline,
}

impl CosmosClient {
    /// Creates a client for `https://{account}.documents.azure.com/`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use azure_data::{AuthorizationToken, CosmosClient};
    ///
    /// # fn doc() -> azure_data::Result<()> {
    /// let key = AuthorizationToken::primary_key("bXkgc2VjcmV0IGtleQ==")?;
    /// let client = CosmosClient::new("myaccount", key, None)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        account: impl AsRef<str>,
        auth: AuthorizationToken,
        options: Option<CosmosClientOptions>,
    ) -> crate::Result<Self> {
        let endpoint = format!("https://{}.documents.azure.com/", account.as_ref());
        Self::with_endpoint(&endpoint, auth, options)
    }

    /// Creates a client for an explicit endpoint, such as the local emulator's `https://localhost:8081/`.
    pub fn with_endpoint(
        endpoint: impl AsRef<str>,
        auth: AuthorizationToken,
        options: Option<CosmosClientOptions>,
    ) -> crate::Result<Self> {
        let endpoint: Url = endpoint.as_ref().parse()?;
        if endpoint.cannot_be_a_base() {
            return Err(Error::message(
                ErrorKind::DataConversion,
                format!("'{endpoint}' cannot be used as an account endpoint"),
            ));
        }
        Ok(Self {
            pipeline: CosmosPipeline::new(endpoint, auth, options.unwrap_or_default()),
        })
    }

    /// Creates a client from an `AccountEndpoint=...;AccountKey=...` connection string.
    pub fn with_connection_string(
        connection_string: &str,
        options: Option<CosmosClientOptions>,
    ) -> crate::Result<Self> {
        let connection_string: ConnectionString = connection_string.parse()?;
        Self::with_endpoint(
            connection_string.account_endpoint().as_str(),
            connection_string.authorization_token()?,
            options,
        )
    }

    /// Creates a client from the environment.
    ///
    /// Reads `AZURE_COSMOS_CONNECTION_STRING` if set, otherwise `AZURE_COSMOS_ACCOUNT`
    /// and `AZURE_COSMOS_KEY`.
    pub fn from_env(options: Option<CosmosClientOptions>) -> crate::Result<Self> {
        if let Ok(connection_string) = std::env::var(CONNECTION_STRING_ENV) {
            return Self::with_connection_string(&connection_string, options);
        }
        let account = std::env::var(ACCOUNT_ENV)
            .with_context(ErrorKind::Credential, || format!("{ACCOUNT_ENV} is not set"))?;
        let key = std::env::var(ACCOUNT_KEY_ENV)
            .with_context(ErrorKind::Credential, || format!("{ACCOUNT_KEY_ENV} is not set"))?;
        Self::new(account, AuthorizationToken::primary_key(key)?, options)
    }

    pub fn endpoint(&self) -> &Url {
        self.pipeline.endpoint()
    }

    /// Gets a [`DatabaseClient`] for the database with the given id. Nothing is sent.
    pub fn database_client(&self, database_id: impl AsRef<str>) -> DatabaseClient {
        DatabaseClient::new(self.pipeline.clone(), database_id.as_ref())
    }

    fn databases_link() -> ResourceLink {
        ResourceLink::root(ResourceType::Databases)
    }

    /// Creates a database, optionally provisioning throughput shared by its collections.
    pub async fn create_database(
        &self,
        id: impl Into<String>,
        throughput: Option<u32>,
    ) -> crate::Result<Response<Database>> {
        let link = Self::databases_link();
        let mut request = self.pipeline.request(&link, Method::Post);
        if let Some(throughput) = throughput {
            request.insert_header(constants::OFFER_THROUGHPUT, throughput.to_string());
        }
        request.set_json(&Database {
            id: id.into(),
            ..Default::default()
        })?;
        self.pipeline.send_typed(request, &link).await
    }

    /// Reads one page of the account's databases.
    pub async fn get_databases(
        &self,
        options: Option<ListOptions>,
    ) -> crate::Result<ListResponse<Database>> {
        self.pipeline
            .read_feed(&Self::databases_link(), options.unwrap_or_default())
            .await
    }

    /// Streams every database in the account, `max_item_count` per page.
    pub fn list_databases(&self, max_item_count: Option<u32>) -> FeedPager<Database> {
        self.pipeline.list(Self::databases_link(), max_item_count)
    }

    pub async fn get_database(&self, id: impl AsRef<str>) -> crate::Result<Response<Database>> {
        self.database_client(id).read().await
    }

    pub async fn delete_database(&self, id: impl AsRef<str>) -> crate::Result<DataResponse> {
        self.database_client(id).delete().await
    }

    fn collection_client(
        &self,
        collection_id: impl AsRef<str>,
        database_id: impl AsRef<str>,
    ) -> CollectionClient {
        self.database_client(database_id)
            .collection_client(collection_id)
    }

    /// Creates a collection partitioned on `partition_key_path` (e.g. `/testKey`).
    pub async fn create_collection(
        &self,
        id: impl Into<String>,
        partition_key_path: impl Into<String>,
        database_id: impl AsRef<str>,
        options: Option<CreateCollectionOptions>,
    ) -> crate::Result<Response<DocumentCollection>> {
        self.database_client(database_id)
            .create_collection_with_options(id, partition_key_path, options.unwrap_or_default())
            .await
    }

    /// Reads the first page of the database's collections.
    pub async fn get_collections(
        &self,
        database_id: impl AsRef<str>,
    ) -> crate::Result<ListResponse<DocumentCollection>> {
        self.database_client(database_id).get_collections(None).await
    }

    pub async fn get_collection(
        &self,
        id: impl AsRef<str>,
        database_id: impl AsRef<str>,
    ) -> crate::Result<Response<DocumentCollection>> {
        self.collection_client(id, database_id).read().await
    }

    pub async fn delete_collection(
        &self,
        id: impl AsRef<str>,
        database_id: impl AsRef<str>,
    ) -> crate::Result<DataResponse> {
        self.collection_client(id, database_id).delete().await
    }

    /// Replaces the indexing policy of `collection`, keeping its partition key.
    pub async fn replace_collection(
        &self,
        collection: &DocumentCollection,
        database_id: impl AsRef<str>,
        indexing_policy: IndexingPolicy,
    ) -> crate::Result<Response<DocumentCollection>> {
        self.collection_client(&collection.id, database_id)
            .replace(indexing_policy, collection.partition_key.clone())
            .await
    }

    pub async fn get_collection_partition_key_ranges(
        &self,
        id: impl AsRef<str>,
        database_id: impl AsRef<str>,
    ) -> crate::Result<ListResponse<PartitionKeyRange>> {
        self.collection_client(id, database_id)
            .get_partition_key_ranges()
            .await
    }

    pub async fn create_document<T>(
        &self,
        document: &T,
        partition_key: impl Into<PartitionKey>,
        collection_id: impl AsRef<str>,
        database_id: impl AsRef<str>,
    ) -> crate::Result<Response<Document<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.collection_client(collection_id, database_id)
            .create_document(document, partition_key)
            .await
    }

    pub async fn create_or_update_document<T>(
        &self,
        document: &T,
        partition_key: impl Into<PartitionKey>,
        collection_id: impl AsRef<str>,
        database_id: impl AsRef<str>,
    ) -> crate::Result<Response<Document<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        self.collection_client(collection_id, database_id)
            .create_or_update_document(document, partition_key)
            .await
    }
}
