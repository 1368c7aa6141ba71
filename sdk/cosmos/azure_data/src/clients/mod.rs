// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Clients used to communicate with Azure Cosmos DB.
//!
//! Each client addresses one resource and is cheap to clone; all clients created from the same
//! [`CosmosClient`] share its transport, credential and session state.

mod collection_client;
mod cosmos_client;
mod database_client;
mod document_client;

pub use collection_client::CollectionClient;
pub use cosmos_client::CosmosClient;
pub use database_client::DatabaseClient;
pub use document_client::DocumentClient;
