// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::http::{Headers, RawResponse};
use crate::models::ResourceList;
use futures::Stream;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;

/// One page of a feed or query.
#[derive(Debug)]
pub struct FeedPage<T> {
    items: Vec<T>,
    continuation: Option<String>,
    headers: Headers,
}

impl<T> FeedPage<T> {
    pub(crate) fn from_raw(raw: RawResponse) -> crate::Result<Self>
    where
        T: DeserializeOwned,
    {
        let list: ResourceList<T> = raw.json()?;
        let (_, headers, _) = raw.deconstruct();
        let continuation = crate::response::continuation(&headers).map(ToOwned::to_owned);
        Ok(Self {
            items: list.into_items(),
            continuation,
            headers,
        })
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The token of the next page, `None` on the last one.
    pub fn continuation(&self) -> Option<&str> {
        self.continuation.as_deref()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// A stream of pages that follows continuation tokens until the feed is exhausted.
///
/// ```rust,no_run
/// # async fn doc(collection: azure_data::clients::CollectionClient) -> azure_data::Result<()> {
/// use futures::TryStreamExt;
///
/// let mut pages = collection.list_documents::<serde_json::Value>(None);
/// while let Some(page) = pages.try_next().await? {
///     for document in page.into_items() {
///         println!("{document:?}");
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub type FeedPager<T> = Pin<Box<dyn Stream<Item = crate::Result<FeedPage<T>>> + Send>>;

/// Builds a pager from a function fetching the page for a continuation token (`None` for the first page).
///
/// The stream ends after the first page without a continuation, or after the first error.
pub(crate) fn feed_pager<T, F, Fut>(fetch: F) -> FeedPager<T>
where
    T: Send + 'static,
    F: Fn(Option<String>) -> Fut + Send + 'static,
    Fut: Future<Output = crate::Result<FeedPage<T>>> + Send + 'static,
{
    // `None` once done; otherwise the continuation of the page to fetch.
    let initial: Option<Option<String>> = Some(None);
    Box::pin(futures::stream::unfold(initial, move |state| {
        let next = state.map(&fetch);
        async move {
            match next?.await {
                Ok(page) => {
                    let state = page.continuation.clone().map(Some);
                    Some((Ok(page), state))
                }
                Err(error) => Some((Err(error), None)),
            }
        }
    }))
}
