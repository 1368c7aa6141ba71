// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! The envelopes every successful operation returns.
//!
//! A failed operation returns [`Error`](crate::Error) instead, carrying the status and message
//! the service sent.

use crate::constants;
use crate::http::{Headers, RawResponse, StatusCode};
use crate::models::ResourceList;
use serde::de::DeserializeOwned;
use std::fmt;

/// A successful response carrying a single resource.
pub struct Response<T> {
    status: StatusCode,
    headers: Headers,
    resource: T,
}

/// A successful response carrying one page of a resource feed.
pub type ListResponse<T> = Response<ResourceList<T>>;

impl<T> Response<T> {
    pub fn new(status: StatusCode, headers: Headers, resource: T) -> Self {
        Self {
            status,
            headers,
            resource,
        }
    }

    /// Deserializes the body of `raw` as `T`.
    pub(crate) fn from_raw(raw: RawResponse) -> crate::Result<Self>
    where
        T: DeserializeOwned,
    {
        let resource = raw.json()?;
        let (status, headers, _) = raw.deconstruct();
        Ok(Self::new(status, headers, resource))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn resource(&self) -> &T {
        &self.resource
    }

    pub fn into_resource(self) -> T {
        self.resource
    }

    pub fn deconstruct(self) -> (StatusCode, Headers, T) {
        (self.status, self.headers, self.resource)
    }

    /// The request units the operation consumed.
    pub fn request_charge(&self) -> Option<f64> {
        request_charge(&self.headers)
    }

    pub fn activity_id(&self) -> Option<&str> {
        self.headers.get_optional_str(constants::ACTIVITY_ID)
    }

    pub fn session_token(&self) -> Option<&str> {
        self.headers.get_optional_str(constants::SESSION_TOKEN)
    }

    pub fn etag(&self) -> Option<&str> {
        self.headers.get_optional_str(constants::ETAG)
    }

    pub fn resource_quota(&self) -> Option<&str> {
        self.headers.get_optional_str(constants::RESOURCE_QUOTA)
    }

    pub fn resource_usage(&self) -> Option<&str> {
        self.headers.get_optional_str(constants::RESOURCE_USAGE)
    }
}

impl<T> Response<ResourceList<T>> {
    /// The number of resources in this page.
    pub fn count(&self) -> usize {
        self.resource.count()
    }

    /// The token to pass as [`ListOptions::continuation`](crate::ListOptions::continuation)
    /// to read the next page. `None` on the last page.
    pub fn continuation(&self) -> Option<&str> {
        continuation(&self.headers)
    }
}

impl<T: fmt::Debug> fmt::Debug for Response<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("request_charge", &self.request_charge())
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

/// A successful response without a body, such as the result of a delete.
#[derive(Debug)]
pub struct DataResponse {
    status: StatusCode,
    headers: Headers,
}

impl DataResponse {
    pub(crate) fn from_raw(raw: RawResponse) -> Self {
        let (status, headers, _) = raw.deconstruct();
        Self { status, headers }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn request_charge(&self) -> Option<f64> {
        request_charge(&self.headers)
    }

    pub fn activity_id(&self) -> Option<&str> {
        self.headers.get_optional_str(constants::ACTIVITY_ID)
    }
}

fn request_charge(headers: &Headers) -> Option<f64> {
    headers.get_optional_as(constants::REQUEST_CHARGE)
}

pub(crate) fn continuation(headers: &Headers) -> Option<&str> {
    headers
        .get_optional_str(constants::CONTINUATION)
        .filter(|c| !c.is_empty())
}
