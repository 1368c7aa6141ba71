// Copyright (c) Microsoft Corporation. All rights reserved.
// Licensed under the MIT License.

//! Error types returned by every operation in this crate.

use crate::http::StatusCode;
use std::borrow::Cow;
use std::fmt;

/// A convenience alias for `Result` where the error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The kind of an [`Error`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The service answered with a non-success status.
    ///
    /// The status and the service's error code are passed through unmodified.
    HttpResponse {
        status: StatusCode,
        error_code: Option<String>,
    },
    /// The credential could not be used to sign a request.
    Credential,
    /// A value could not be converted to or from its wire representation.
    DataConversion,
    /// The request could not be delivered, or the response could not be read.
    Io,
    /// Anything else.
    Other,
}

impl ErrorKind {
    /// Creates an [`ErrorKind::HttpResponse`] without an error code.
    pub fn http_response(status: StatusCode) -> Self {
        ErrorKind::HttpResponse {
            status,
            error_code: None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::HttpResponse {
                status,
                error_code: Some(code),
            } => write!(f, "HttpResponse({status}, {code})"),
            ErrorKind::HttpResponse {
                status,
                error_code: None,
            } => write!(f, "HttpResponse({status})"),
            ErrorKind::Credential => f.write_str("Credential"),
            ErrorKind::DataConversion => f.write_str("DataConversion"),
            ErrorKind::Io => f.write_str("Io"),
            ErrorKind::Other => f.write_str("Other"),
        }
    }
}

/// An error encountered while talking to the service.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Creates an error of the given kind caused by another error.
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let source = error.into();
        Self {
            kind,
            message: Cow::Owned(source.to_string()),
            source: Some(source),
        }
    }

    /// Creates an error of the given kind with only a message.
    pub fn message<C>(kind: ErrorKind, message: C) -> Self
    where
        C: Into<Cow<'static, str>>,
    {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error of the given kind with a message and an underlying cause.
    pub fn full<E, C>(kind: ErrorKind, error: E, message: C) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
        C: Into<Cow<'static, str>>,
    {
        Self {
            kind,
            message: message.into(),
            source: Some(error.into()),
        }
    }

    /// Gets the [`ErrorKind`] of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Gets the error message, which for service failures is the `message` from the response body.
    pub fn error_message(&self) -> &str {
        &self.message
    }

    /// Gets the HTTP status returned by the service, if this error came from a response.
    pub fn http_status(&self) -> Option<StatusCode> {
        match &self.kind {
            ErrorKind::HttpResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Gets the service error code (e.g. `"Conflict"`), if any.
    pub fn error_code(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::HttpResponse { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(StatusCode::NOT_FOUND)
    }

    pub fn is_conflict(&self) -> bool {
        self.http_status() == Some(StatusCode::CONFLICT)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::new(ErrorKind::DataConversion, error)
    }
}

impl From<url::ParseError> for Error {
    fn from(error: url::ParseError) -> Self {
        Error::new(ErrorKind::DataConversion, error)
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::new(ErrorKind::Io, error)
    }
}

/// Adds context to the error arm of a `Result`.
pub trait ResultExt<T> {
    /// Wraps the error in an [`Error`] of the given kind with a fixed message.
    fn context<C>(self, kind: ErrorKind, message: C) -> Result<T>
    where
        C: Into<Cow<'static, str>>;

    /// Like [`ResultExt::context`], building the message lazily.
    fn with_context<F, C>(self, kind: ErrorKind, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<Cow<'static, str>>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, kind: ErrorKind, message: C) -> Result<T>
    where
        C: Into<Cow<'static, str>>,
    {
        self.map_err(|e| Error::full(kind, e, message))
    }

    fn with_context<F, C>(self, kind: ErrorKind, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<Cow<'static, str>>,
    {
        self.map_err(|e| Error::full(kind, e, f()))
    }
}
