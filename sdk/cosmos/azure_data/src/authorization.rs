// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

use crate::error::{Error, ErrorKind, ResultExt};
use crate::http::Method;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::Sha256;
use std::fmt;
use time::{macros::format_description, OffsetDateTime};

/// Characters left as-is when encoding the `authorization` header.
const AUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

const AUTH_TOKEN_VERSION: &str = "1.0";

/// The credential used to sign requests.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthorizationToken {
    /// The decoded bytes of an account (master) key.
    PrimaryKey(Vec<u8>),
    /// A resource token issued for a permission, sent unchanged.
    Resource(String),
}

impl AuthorizationToken {
    /// Creates a token from a base64-encoded account key.
    pub fn primary_key(key: impl AsRef<str>) -> crate::Result<Self> {
        let bytes = STANDARD
            .decode(key.as_ref())
            .context(ErrorKind::Credential, "the account key is not valid base64")?;
        Ok(AuthorizationToken::PrimaryKey(bytes))
    }

    /// Creates a token from a resource (permission) token.
    pub fn resource(token: impl Into<String>) -> Self {
        AuthorizationToken::Resource(token.into())
    }
}

impl fmt::Debug for AuthorizationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorizationToken::PrimaryKey(_) => f.write_str("PrimaryKey(<redacted>)"),
            AuthorizationToken::Resource(_) => f.write_str("Resource(<redacted>)"),
        }
    }
}

/// Formats a timestamp the way `x-ms-date` expects it: `Thu, 27 Apr 2017 00:51:12 GMT`.
pub(crate) fn format_date(date: OffsetDateTime) -> crate::Result<String> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    date.format(&format)
        .context(ErrorKind::DataConversion, "failed to format the request date")
}

/// Builds the URL-encoded value of the `authorization` header.
///
/// `resource_type` is the path segment of the resource kind (`dbs`, `colls`, `docs`...),
/// `resource_link` the id-based link of the addressed resource (or, for feeds, of its parent).
pub(crate) fn generate_authorization(
    token: &AuthorizationToken,
    method: Method,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> crate::Result<String> {
    let value = match token {
        AuthorizationToken::PrimaryKey(key) => {
            let signature = sign(
                key,
                &string_to_sign(method, resource_type, resource_link, date),
            )?;
            format!("type=master&ver={AUTH_TOKEN_VERSION}&sig={signature}")
        }
        AuthorizationToken::Resource(token) => token.clone(),
    };
    Ok(utf8_percent_encode(&value, AUTH_ENCODE_SET).to_string())
}

fn string_to_sign(method: Method, resource_type: &str, resource_link: &str, date: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}\n\n",
        method.as_str().to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase()
    )
}

fn sign(key: &[u8], data: &str) -> crate::Result<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).map_err(|_| {
        Error::message(
            ErrorKind::Credential,
            "the account key cannot be used as an HMAC key",
        )
    })?;
    mac.update(data.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
