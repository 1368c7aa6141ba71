// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::constants;
use crate::http::{Method, Request};
use crate::models::Document;
use crate::pipeline::CosmosPipeline;
use crate::resource_context::{ResourceLink, ResourceType};
use crate::{DataResponse, PartitionKey, ReplaceDocumentOptions, Response};
use serde::{de::DeserializeOwned, Serialize};

/// A client for a single document, bound to its partition key.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    document_id: String,
    partition_key: PartitionKey,
    link: ResourceLink,
    pipeline: CosmosPipeline,
}

impl DocumentClient {
    pub(crate) fn new(
        pipeline: CosmosPipeline,
        collection_link: &ResourceLink,
        document_id: &str,
        partition_key: PartitionKey,
    ) -> Self {
        let document_id = document_id.to_string();
        let link = collection_link
            .feed(ResourceType::Documents)
            .item(&document_id);

        Self {
            document_id,
            partition_key,
            link,
            pipeline,
        }
    }

    pub fn id(&self) -> &str {
        &self.document_id
    }

    pub fn partition_key(&self) -> &PartitionKey {
        &self.partition_key
    }

    fn request(&self, method: Method) -> crate::Result<Request> {
        let mut request = self.pipeline.request(&self.link, method);
        request.insert_header(constants::PARTITION_KEY, self.partition_key.to_header_value()?);
        Ok(request)
    }

    pub async fn read<T: DeserializeOwned>(&self) -> crate::Result<Response<Document<T>>> {
        let request = self.request(Method::Get)?;
        self.pipeline.send_typed(request, &self.link).await
    }

    /// Replaces the document's content.
    ///
    /// With [`ReplaceDocumentOptions::if_match_etag`] set, the replace fails with
    /// `412 Precondition Failed` if the document changed since that etag was read.
    pub async fn replace<T>(
        &self,
        document: &T,
        options: Option<ReplaceDocumentOptions>,
    ) -> crate::Result<Response<Document<T>>>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut request = self.request(Method::Put)?;
        if let Some(etag) = options.and_then(|o| o.if_match_etag) {
            request.insert_header(constants::IF_MATCH, etag);
        }
        request.set_json(document)?;
        self.pipeline.send_typed(request, &self.link).await
    }

    pub async fn delete(&self) -> crate::Result<DataResponse> {
        let request = self.request(Method::Delete)?;
        self.pipeline.send_data(request, &self.link).await
    }
}
