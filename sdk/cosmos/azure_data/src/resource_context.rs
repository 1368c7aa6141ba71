// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::utils::AppendPathSegments;
use url::Url;

/// The kinds of resources the client addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Databases,
    Collections,
    Documents,
    PartitionKeyRanges,
    Offers,
}

impl ResourceType {
    /// The path segment naming this kind of resource, which is also the type used when signing.
    pub fn path_segment(self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Collections => "colls",
            ResourceType::Documents => "docs",
            ResourceType::PartitionKeyRanges => "pkranges",
            ResourceType::Offers => "offers",
        }
    }
}

/// The id-based address of a resource, or of a feed of resources.
///
/// A feed link (`dbs/db1/colls`) addresses every resource of one type under a parent;
/// an item link (`dbs/db1/colls/coll1`) addresses one of them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLink {
    parent: Vec<String>,
    resource_type: ResourceType,
    item_id: Option<String>,
}

impl ResourceLink {
    /// A top-level feed, such as `dbs`.
    pub fn root(resource_type: ResourceType) -> Self {
        Self {
            parent: Vec::new(),
            resource_type,
            item_id: None,
        }
    }

    /// A feed of `resource_type` under this link.
    pub fn feed(&self, resource_type: ResourceType) -> Self {
        Self {
            parent: self.segments(),
            resource_type,
            item_id: None,
        }
    }

    /// An item in the same feed as this link.
    pub fn item(&self, id: impl Into<String>) -> Self {
        Self {
            parent: self.parent.clone(),
            resource_type: self.resource_type,
            item_id: Some(id.into()),
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    pub fn is_feed(&self) -> bool {
        self.item_id.is_none()
    }

    fn segments(&self) -> Vec<String> {
        let mut segments = self.parent.clone();
        segments.push(self.resource_type.path_segment().to_string());
        if let Some(id) = &self.item_id {
            segments.push(id.clone());
        }
        segments
    }

    /// The full path, such as `dbs/db1/colls/coll1`.
    pub fn path(&self) -> String {
        self.segments().join("/")
    }

    /// The link that goes into the request signature.
    ///
    /// Items sign their own path; feeds sign their parent's path (empty for top-level feeds).
    pub fn link_for_signing(&self) -> String {
        match self.item_id {
            Some(_) => self.path(),
            None => self.parent.join("/"),
        }
    }

    /// The link of the collection this resource belongs to, if it is (or lives in) a collection.
    pub fn collection_link(&self) -> Option<String> {
        let segments = self.segments();
        match segments.as_slice() {
            [dbs, db, colls, coll, ..] if dbs == "dbs" && colls == "colls" => {
                Some(format!("{dbs}/{db}/{colls}/{coll}"))
            }
            _ => None,
        }
    }

    pub fn url(&self, endpoint: &Url) -> Url {
        let segments = self.segments();
        endpoint.with_path_segments(segments.iter().map(String::as_str))
    }
}
