// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use azure_data::models::{DataType, Index, IncludedPath, IndexingMode, IndexingPolicy};
use azure_data::{AuthorizationToken, CosmosClient, CreateCollectionOptions};
use clap::Parser;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Creates a collection, stores a document in it, and lists what the account holds.
#[derive(Debug, Parser)]
struct Args {
    /// The cosmos account you're using
    #[clap(env = "AZURE_COSMOS_ACCOUNT")]
    account: String,

    /// The key to use to authenticate with the account
    #[clap(short, long, env = "AZURE_COSMOS_KEY")]
    key: String,

    /// The database to create the collection in; created if missing
    #[clap(long, default_value = "ToDoList")]
    database: String,

    /// The collection to create
    #[clap(long, default_value = "Items")]
    collection: String,

    /// Throughput to provision for the collection, in RU/s
    #[clap(long)]
    throughput: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct Item {
    id: String,
    test_key: String,
    description: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = CosmosClient::new(
        &args.account,
        AuthorizationToken::primary_key(&args.key)?,
        None,
    )?;

    match client.create_database(&args.database, None).await {
        Ok(_) => println!("created database {}", args.database),
        Err(e) if e.is_conflict() => println!("using existing database {}", args.database),
        Err(e) => return Err(e.into()),
    }
    let database = client.database_client(&args.database);

    let policy = IndexingPolicy::builder()
        .mode(IndexingMode::Consistent)
        .included_path(
            IncludedPath::new("/*")
                .with_index(Index::range(DataType::Number, -1))
                .with_index(Index::range(DataType::String, -1)),
        )
        .excluded_path("/description/?")
        .build();
    let mut options = CreateCollectionOptions::builder().with_indexing_policy(policy.clone());
    if let Some(throughput) = args.throughput {
        options = options.with_throughput(throughput);
    }

    let created = database
        .create_collection_with_options(&args.collection, "/testKey", options.build())
        .await?;
    println!(
        "created collection {} ({:?} RU)",
        created.resource().id,
        created.request_charge()
    );
    if let Some(mismatch) = created
        .resource()
        .indexing_policy
        .as_ref()
        .and_then(|returned| policy.mismatch(returned))
    {
        println!("the service adjusted the indexing policy: {mismatch}");
    }

    let collection = database.collection_client(&args.collection);
    let item = Item {
        id: "item1".into(),
        test_key: "PartitionKeyValue".into(),
        description: "created by the cosmos_collections example".into(),
    };
    collection
        .create_or_update_document(&item, item.test_key.as_str())
        .await?;

    let mut pages = database.list_collections(None);
    while let Some(page) = pages.try_next().await? {
        for collection in page.items() {
            println!("\tcollection {}", collection.id);
        }
    }

    if let Some(offer) = collection.read_throughput().await? {
        println!("collection throughput: {} RU/s", offer.throughput());
    }

    Ok(())
}
