// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use url::Url;

pub(crate) trait AppendPathSegments {
    /// Appends percent-encoded segments to the path.
    fn append_path_segments<'a>(&mut self, segments: impl IntoIterator<Item = &'a str>);

    fn with_path_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Self;
}

impl AppendPathSegments for Url {
    fn append_path_segments<'a>(&mut self, segments: impl IntoIterator<Item = &'a str>) {
        // Endpoints are checked with `cannot_be_a_base` when a client is constructed.
        let mut path_segments = self
            .path_segments_mut()
            .expect("the endpoint must be a valid base URL");
        path_segments.pop_if_empty().extend(segments);
    }

    fn with_path_segments<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Self {
        let mut url = self.clone();
        url.append_path_segments(segments);
        url
    }
}
