// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::authorization::{format_date, generate_authorization};
use crate::constants;
use crate::error::{Error, ErrorKind};
use crate::feed::{feed_pager, FeedPage, FeedPager};
use crate::http::{HttpClient, Method, RawResponse, Request, StatusCode};
use crate::models::Resource;
use crate::resource_context::ResourceLink;
use crate::session::SessionContainer;
use crate::{
    AuthorizationToken, ConsistencyLevel, CosmosClientOptions, DataResponse, ListOptions,
    ListResponse, Query, QueryOptions, Response,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use time::OffsetDateTime;
use url::Url;

/// Everything needed to send a signed request, shared by every client created from one [`CosmosClient`](crate::CosmosClient).
#[derive(Debug, Clone)]
pub(crate) struct CosmosPipeline {
    endpoint: Url,
    auth: Arc<AuthorizationToken>,
    http_client: Arc<dyn HttpClient>,
    consistency_level: Option<ConsistencyLevel>,
    api_version: String,
    user_agent: String,
    session: Arc<SessionContainer>,
}

/// The error body the service sends with failed requests.
#[derive(Deserialize)]
struct ServiceError {
    code: Option<String>,
    message: Option<String>,
}

impl CosmosPipeline {
    pub fn new(endpoint: Url, auth: AuthorizationToken, options: CosmosClientOptions) -> Self {
        let mut user_agent = format!(
            "azsdk-rust-{}/{}",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        );
        if let Some(suffix) = options.user_agent_suffix.as_deref() {
            user_agent.push(' ');
            user_agent.push_str(suffix);
        }

        CosmosPipeline {
            endpoint,
            auth: Arc::new(auth),
            http_client: options
                .http_client
                .unwrap_or_else(crate::http::new_http_client),
            consistency_level: options.consistency_level,
            api_version: options
                .api_version
                .unwrap_or_else(|| constants::API_VERSION.to_string()),
            user_agent,
            session: Arc::new(SessionContainer::new()),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Creates a request addressed to `link`.
    pub fn request(&self, link: &ResourceLink, method: Method) -> Request {
        Request::new(link.url(&self.endpoint), method)
    }

    /// Signs and sends `request`, returning the response if the service reported success.
    ///
    /// `304 Not Modified` counts as success so conditional reads can be answered.
    pub async fn send(&self, request: &mut Request, link: &ResourceLink) -> crate::Result<RawResponse> {
        let date = format_date(OffsetDateTime::now_utc())?;
        let authorization = generate_authorization(
            &self.auth,
            request.method(),
            link.resource_type().path_segment(),
            &link.link_for_signing(),
            &date,
        )?;

        request.insert_header(constants::DATE, date);
        request.insert_header(constants::VERSION, self.api_version.as_str());
        request.insert_header(constants::USER_AGENT, self.user_agent.as_str());
        request.insert_header(constants::AUTHORIZATION, authorization);
        if !request.body().is_empty() && !request.headers().contains(constants::CONTENT_TYPE) {
            request.insert_header(constants::CONTENT_TYPE, constants::APPLICATION_JSON);
        }
        if let Some(level) = self.consistency_level {
            request.insert_header(constants::CONSISTENCY_LEVEL, level.as_str());
        }

        let collection_link = link.collection_link();
        if let Some(collection_link) = &collection_link {
            let uses_session =
                matches!(self.consistency_level, None | Some(ConsistencyLevel::Session));
            if uses_session {
                if let Some(token) = self.session.get_session_token(collection_link) {
                    request.insert_header(constants::SESSION_TOKEN, token);
                }
            }
        }

        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            resource_type = link.resource_type().path_segment(),
            "sending request"
        );
        let response = self.http_client.execute_request(request).await?;
        let status = response.status();
        tracing::debug!(
            %status,
            request_charge = response.headers().get_optional_str(constants::REQUEST_CHARGE),
            activity_id = response.headers().get_optional_str(constants::ACTIVITY_ID),
            "received response"
        );

        if let (Some(collection_link), Some(token)) = (
            &collection_link,
            response.headers().get_optional_str(constants::SESSION_TOKEN),
        ) {
            if let Err(error) = self.session.set_session_token(collection_link, token) {
                tracing::warn!(%error, collection = %collection_link, "ignoring session token");
            }
        }

        if status.is_success() || status == StatusCode::NOT_MODIFIED {
            Ok(response)
        } else {
            Err(into_error(response))
        }
    }

    /// Sends `request` and deserializes the resource in the response.
    pub async fn send_typed<T: DeserializeOwned>(
        &self,
        mut request: Request,
        link: &ResourceLink,
    ) -> crate::Result<Response<T>> {
        let response = self.send(&mut request, link).await?;
        Response::from_raw(response)
    }

    /// Sends `request`, ignoring any body in the response.
    pub async fn send_data(
        &self,
        mut request: Request,
        link: &ResourceLink,
    ) -> crate::Result<DataResponse> {
        let response = self.send(&mut request, link).await?;
        Ok(DataResponse::from_raw(response))
    }

    /// Re-reads `current` only if it changed on the service, returning it unchanged otherwise.
    pub async fn refresh<T>(&self, link: &ResourceLink, current: T) -> crate::Result<Response<T>>
    where
        T: Resource + DeserializeOwned,
    {
        let mut request = self.request(link, Method::Get);
        if let Some(etag) = current.etag() {
            request.insert_header(constants::IF_NONE_MATCH, etag);
        }

        let response = self.send(&mut request, link).await?;
        if response.status() == StatusCode::NOT_MODIFIED {
            tracing::debug!(link = %link.path(), "resource not modified");
            let (status, headers, _) = response.deconstruct();
            return Ok(Response::new(status, headers, current));
        }
        Response::from_raw(response)
    }

    /// Reads one page of the feed at `link`.
    pub async fn read_feed<T: DeserializeOwned>(
        &self,
        link: &ResourceLink,
        options: ListOptions,
    ) -> crate::Result<ListResponse<T>> {
        let mut request = self.request(link, Method::Get);
        apply_list_options(&mut request, options.max_item_count, options.continuation);
        self.send_typed(request, link).await
    }

    /// Reads every page of the feed at `link`.
    pub fn list<T>(&self, link: ResourceLink, max_item_count: Option<u32>) -> FeedPager<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let pipeline = self.clone();
        feed_pager(move |continuation| {
            let pipeline = pipeline.clone();
            let link = link.clone();
            async move {
                let mut request = pipeline.request(&link, Method::Get);
                apply_list_options(&mut request, max_item_count, continuation);
                let response = pipeline.send(&mut request, &link).await?;
                FeedPage::from_raw(response)
            }
        })
    }

    /// Runs `query` against the feed at `link`, one page per item of the returned stream.
    pub fn query<T>(&self, link: ResourceLink, query: Query, options: QueryOptions) -> FeedPager<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let pipeline = self.clone();
        let query = Arc::new(query);
        feed_pager(move |continuation| {
            let pipeline = pipeline.clone();
            let link = link.clone();
            let query = query.clone();
            let options = options.clone();
            async move {
                let mut request = pipeline.request(&link, Method::Post);
                request.insert_header(constants::IS_QUERY, "True");
                request.insert_header(constants::CONTENT_TYPE, constants::APPLICATION_QUERY_JSON);
                if options.enable_cross_partition {
                    request.insert_header(constants::ENABLE_CROSS_PARTITION_QUERY, "True");
                }
                if let Some(partition_key) = &options.partition_key {
                    request.insert_header(
                        constants::PARTITION_KEY,
                        partition_key.to_header_value()?,
                    );
                }
                apply_list_options(&mut request, options.max_item_count, continuation);
                request.set_json(query.as_ref())?;

                let response = pipeline.send(&mut request, &link).await?;
                FeedPage::from_raw(response)
            }
        })
    }

    /// Forgets the session state of a collection.
    pub fn clear_session(&self, link: &ResourceLink) {
        if let Some(collection_link) = link.collection_link() {
            self.session.clear_session(&collection_link);
        }
    }

    /// Forgets the session state of every collection in a database.
    pub fn clear_database_sessions(&self, database_link: &ResourceLink) {
        self.session.clear_database(&database_link.path());
    }
}

fn apply_list_options(request: &mut Request, max_item_count: Option<u32>, continuation: Option<String>) {
    if let Some(max_item_count) = max_item_count {
        request.insert_header(constants::MAX_ITEM_COUNT, max_item_count.to_string());
    }
    if let Some(continuation) = continuation {
        request.insert_header(constants::CONTINUATION, continuation);
    }
}

/// Converts a failed response into an [`ErrorKind::HttpResponse`] error carrying the service's code and message.
fn into_error(response: RawResponse) -> Error {
    let status = response.status();
    let (error_code, message) = match response.json::<ServiceError>() {
        Ok(body) => (body.code, body.message),
        Err(_) => (None, None),
    };
    let message = message.unwrap_or_else(|| {
        let body = String::from_utf8_lossy(response.body());
        if body.is_empty() {
            format!("the service returned status {status}")
        } else {
            body.into_owned()
        }
    });

    tracing::warn!(
        %status,
        error_code = error_code.as_deref(),
        activity_id = response.headers().get_optional_str(constants::ACTIVITY_ID),
        "request failed"
    );
    Error::message(ErrorKind::HttpResponse { status, error_code }, message)
}
