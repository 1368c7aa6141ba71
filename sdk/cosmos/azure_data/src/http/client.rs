// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use super::{Headers, Method, RawResponse, Request, StatusCode};
use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

/// Sends a [`Request`] and returns the service's [`RawResponse`].
///
/// Implementations must return `Ok` for every response the service produced, whatever its status;
/// `Err` is reserved for failures to deliver the request or read the response.
#[async_trait]
pub trait HttpClient: Send + Sync + Debug {
    async fn execute_request(&self, request: &Request) -> crate::Result<RawResponse>;
}

/// Creates the default transport.
pub fn new_http_client() -> Arc<dyn HttpClient> {
    Arc::new(reqwest::Client::new())
}

#[async_trait]
impl HttpClient for reqwest::Client {
    async fn execute_request(&self, request: &Request) -> crate::Result<RawResponse> {
        let method = match request.method() {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.request(method, request.url().clone());
        for (name, value) in request.headers().iter() {
            builder = builder.header(name, value);
        }
        let response = builder.body(request.body().clone()).send().await?;

        let status = StatusCode::from(response.status().as_u16());
        let mut headers = Headers::new();
        for (name, value) in response.headers() {
            match value.to_str() {
                Ok(value) => headers.insert(name.as_str(), value),
                Err(_) => tracing::debug!(header = %name, "skipping non-ASCII response header"),
            }
        }
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, headers, body))
    }
}
