// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::error::{Error, ErrorKind};
use crate::AuthorizationToken;
use std::str::FromStr;
use url::Url;

const ACCOUNT_ENDPOINT: &str = "AccountEndpoint";
const ACCOUNT_KEY: &str = "AccountKey";

/// A parsed account connection string, as shown in the portal:
/// `AccountEndpoint=https://myaccount.documents.azure.com:443/;AccountKey=...;`
///
/// ```rust
/// use azure_data::ConnectionString;
///
/// let cs: ConnectionString = "AccountEndpoint=https://myaccount.documents.azure.com:443/;AccountKey=a2V5;"
///     .parse()
///     .unwrap();
/// assert_eq!(cs.account_endpoint().host_str(), Some("myaccount.documents.azure.com"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionString {
    account_endpoint: Url,
    account_key: String,
}

impl ConnectionString {
    pub fn account_endpoint(&self) -> &Url {
        &self.account_endpoint
    }

    /// The base64-encoded account key.
    pub fn account_key(&self) -> &str {
        &self.account_key
    }

    /// Decodes the account key into a credential.
    pub fn authorization_token(&self) -> crate::Result<AuthorizationToken> {
        AuthorizationToken::primary_key(&self.account_key)
    }
}

impl std::fmt::Debug for ConnectionString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionString")
            .field("account_endpoint", &self.account_endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl FromStr for ConnectionString {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let mut endpoint = None;
        let mut key = None;

        for pair in s.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            // Keys are base64, so the value itself may contain '='.
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                Error::message(
                    ErrorKind::DataConversion,
                    format!("malformed connection string segment '{pair}'"),
                )
            })?;
            match name.trim() {
                n if n.eq_ignore_ascii_case(ACCOUNT_ENDPOINT) => endpoint = Some(value.trim()),
                n if n.eq_ignore_ascii_case(ACCOUNT_KEY) => key = Some(value.trim()),
                _ => {}
            }
        }

        let missing = |name: &str| {
            Error::message(
                ErrorKind::DataConversion,
                format!("connection string is missing {name}"),
            )
        };
        let account_endpoint: Url = endpoint.ok_or_else(|| missing(ACCOUNT_ENDPOINT))?.parse()?;
        let account_key = key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| missing(ACCOUNT_KEY))?
            .to_string();

        Ok(Self {
            account_endpoint,
            account_key,
        })
    }
}
