// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use super::{Headers, Method, StatusCode};
use bytes::Bytes;
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

/// An outgoing HTTP request.
#[derive(Clone, Debug)]
pub struct Request {
    url: Url,
    method: Method,
    headers: Headers,
    body: Bytes,
}

impl Request {
    pub fn new(url: Url, method: Method) -> Self {
        Self {
            url,
            method,
            headers: Headers::new(),
            body: Bytes::new(),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn insert_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.headers.insert(name, value);
    }

    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }

    /// Serializes `value` as the JSON body of the request.
    pub fn set_json<T: Serialize + ?Sized>(&mut self, value: &T) -> crate::Result<()> {
        self.body = serde_json::to_vec(value)?.into();
        Ok(())
    }
}

/// A response as it came off the wire, before any deserialization.
#[derive(Clone, Debug)]
pub struct RawResponse {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: Headers, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn deconstruct(self) -> (StatusCode, Headers, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Deserializes the JSON body into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> crate::Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
