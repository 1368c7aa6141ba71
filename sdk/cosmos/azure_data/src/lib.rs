// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod authorization;
pub mod clients;
mod connection_string;
pub mod constants;
mod error;
mod feed;
pub mod http;
pub mod models;
mod options;
mod partition_key;
pub(crate) mod pipeline;
mod query;
pub(crate) mod resource_context;
mod response;
mod session;
pub(crate) mod utils;

#[doc(inline)]
pub use clients::CosmosClient;

pub use authorization::AuthorizationToken;
pub use connection_string::ConnectionString;
pub use error::{Error, ErrorKind, Result, ResultExt};
pub use feed::{FeedPage, FeedPager};
pub use options::*;
pub use partition_key::PartitionKey;
pub use query::{Query, QueryParameter};
pub use response::{DataResponse, ListResponse, Response};
