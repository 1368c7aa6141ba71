// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Session-consistency bookkeeping.
//!
//! Every response from a collection carries an `x-ms-session-token` listing, per partition key
//! range, how far the client has observed the collection. Sending the merged tokens back on later
//! requests gives read-your-writes under session consistency.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum SessionTokenError {
    #[error("session token is empty")]
    EmptyInput,
    #[error("session token '{0}' has no partition key range id")]
    MissingRangeId(String),
    #[error("session token '{0}' has an invalid version or LSN")]
    InvalidProgress(String),
}

/// The token of a single partition key range: `{range}:{version}#{globalLsn}[#{region}={lsn}...]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PartitionSessionToken {
    range_id: String,
    version: u64,
    global_lsn: u64,
    raw: String,
}

impl PartitionSessionToken {
    /// Whether this token reflects at least as much progress as `other`.
    fn is_at_least(&self, other: &PartitionSessionToken) -> bool {
        (self.version, self.global_lsn) >= (other.version, other.global_lsn)
    }
}

impl FromStr for PartitionSessionToken {
    type Err = SessionTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SessionTokenError::EmptyInput);
        }
        let (range_id, progress) = s
            .split_once(':')
            .filter(|(range, progress)| !range.is_empty() && !progress.is_empty())
            .ok_or_else(|| SessionTokenError::MissingRangeId(s.to_string()))?;

        let mut parts = progress.split('#');
        let invalid = || SessionTokenError::InvalidProgress(s.to_string());
        let first = parts.next().ok_or_else(invalid)?;
        let (version, global_lsn) = match parts.next() {
            Some(lsn) => (
                first.parse().map_err(|_| invalid())?,
                lsn.parse().map_err(|_| invalid())?,
            ),
            // Older services send a bare LSN.
            None => (0, first.parse().map_err(|_| invalid())?),
        };

        Ok(Self {
            range_id: range_id.to_string(),
            version,
            global_lsn,
            raw: s.to_string(),
        })
    }
}

/// Session tokens for every collection the client has talked to, keyed by collection link.
#[derive(Debug, Default)]
pub(crate) struct SessionContainer {
    collections: RwLock<HashMap<String, HashMap<String, PartitionSessionToken>>>,
}

impl SessionContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a (comma-separated) session token header into the collection's state,
    /// keeping the most advanced token per partition key range.
    pub fn set_session_token(
        &self,
        collection_link: &str,
        token: &str,
    ) -> Result<(), SessionTokenError> {
        let parsed = token
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(PartitionSessionToken::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if parsed.is_empty() {
            return Err(SessionTokenError::EmptyInput);
        }

        let mut collections = self.collections.write().unwrap();
        let ranges = collections.entry(collection_link.to_string()).or_default();
        for token in parsed {
            match ranges.get(&token.range_id) {
                Some(existing) if existing.is_at_least(&token) => {}
                _ => {
                    ranges.insert(token.range_id.clone(), token);
                }
            }
        }
        Ok(())
    }

    /// The merged token to send for the collection, if any has been observed.
    pub fn get_session_token(&self, collection_link: &str) -> Option<String> {
        let collections = self.collections.read().unwrap();
        let ranges = collections.get(collection_link)?;
        if ranges.is_empty() {
            return None;
        }
        let mut tokens: Vec<&str> = ranges.values().map(|t| t.raw.as_str()).collect();
        tokens.sort_unstable();
        Some(tokens.join(","))
    }

    /// Forgets everything about the collection, e.g. once it has been deleted.
    pub fn clear_session(&self, collection_link: &str) {
        self.collections.write().unwrap().remove(collection_link);
    }

    /// Forgets every collection of the database at `database_link` (`dbs/{db}`).
    pub fn clear_database(&self, database_link: &str) {
        let prefix = format!("{database_link}/colls/");
        self.collections
            .write()
            .unwrap()
            .retain(|collection_link, _| !collection_link.starts_with(&prefix));
    }
}
