//
//  cloudflare-client
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Error types for every client operation.
//!
//! # Overview
//!
//! All fallible operations return [`Result<T>`], whose error is the [`Error`]
//! enum. API failures carry an [`ApiError`] payload and are split into one
//! variant per [`ErrorType`] so callers can pattern-match on the kind:
//!
//! | Variant | Trigger |
//! |---------|---------|
//! | `Authorization` | HTTP 401 |
//! | `Authentication` | HTTP 403 |
//! | `NotFound` | HTTP 404 |
//! | `RateLimit` | HTTP 429 |
//! | `Request` | Any other 4xx, or an envelope with `success: false` |
//! | `Service` | HTTP 5xx |
//!
//! # Example
//!
//! ```rust
//! use cloudflare_client::{ApiError, Error, ErrorType};
//!
//! fn describe(err: &Error) -> &'static str {
//!     match err {
//!         Error::RateLimit(_) => "slow down",
//!         Error::NotFound(_) => "missing",
//!         Error::MissingCredentials => "configure a token",
//!         _ => "something else",
//!     }
//! }
//!
//! let err = Error::from(ApiError::new(429, ErrorType::RateLimit));
//! assert_eq!(describe(&err), "slow down");
//! ```

use std::fmt;

use thiserror::Error;

use crate::api::common::ResponseInfo;
use crate::auth::StsError;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Message used for synthesized 5xx errors.
pub const INTERNAL_SERVICE_ERROR: &str = "Internal Service Error";

/// Classification of an API failure, derived from the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// HTTP 401: the credential was rejected.
    Authorization,
    /// HTTP 403: the credential is valid but not allowed to do this.
    Authentication,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    RateLimit,
    /// Any other client-side failure.
    Request,
    /// HTTP 5xx.
    Service,
}

impl ErrorType {
    /// Maps an HTTP status code to its error type.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Authorization,
            403 => Self::Authentication,
            404 => Self::NotFound,
            429 => Self::RateLimit,
            s if s >= 500 => Self::Service,
            _ => Self::Request,
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Authorization => "authorization",
            Self::Authentication => "authentication",
            Self::NotFound => "not found",
            Self::RateLimit => "rate limit",
            Self::Request => "request",
            Self::Service => "service",
        };
        f.write_str(name)
    }
}

/// Normalized failure returned by the API.
///
/// `error_codes` and `error_messages` are flattened views of `errors`, kept in
/// the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status_code: u16,
    /// Value of the `cf-ray` response header, verbatim.
    pub ray_id: String,
    /// Errors as reported in the envelope.
    pub errors: Vec<ResponseInfo>,
    /// Codes of `errors`, in order.
    pub error_codes: Vec<i64>,
    /// Messages of `errors`, in order.
    pub error_messages: Vec<String>,
    /// Kind of failure.
    pub error_type: ErrorType,
}

impl ApiError {
    /// Creates an error with no envelope detail.
    pub fn new(status_code: u16, error_type: ErrorType) -> Self {
        Self {
            status_code,
            ray_id: String::new(),
            errors: Vec::new(),
            error_codes: Vec::new(),
            error_messages: Vec::new(),
            error_type,
        }
    }

    /// Sets the ray ID.
    pub fn with_ray_id(mut self, ray_id: impl Into<String>) -> Self {
        self.ray_id = ray_id.into();
        self
    }

    /// Replaces the envelope errors, refreshing the flattened code and message lists.
    pub fn with_errors(mut self, errors: Vec<ResponseInfo>) -> Self {
        self.error_codes = errors.iter().map(|e| e.code).collect();
        self.error_messages = errors.iter().map(|e| e.message.clone()).collect();
        self.errors = errors;
        self
    }

    /// Returns true if any reported error carries `code`.
    pub fn has_error_code(&self, code: i64) -> bool {
        self.error_codes.contains(&code)
    }

    /// Returns true if any reported message contains `needle`.
    pub fn has_error_message(&self, needle: &str) -> bool {
        self.error_messages.iter().any(|m| m.contains(needle))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(primary) => write!(f, "{} ({})", primary.message, primary.code)?,
            None => write!(f, "HTTP status {}", self.status_code)?,
        }
        if self.errors.len() > 1 {
            write!(f, " and {} more", self.errors.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Caller-input problems detected before anything is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required missing zone ID")]
    MissingZoneId,

    #[error("required missing account ID")]
    MissingAccountId,

    #[error("required missing tunnel ID")]
    MissingTunnelId,

    #[error("required DNS record ID missing")]
    MissingDnsRecordId,

    #[error("required BIND config contents missing")]
    MissingBindContents,

    #[error("required certificate ID missing")]
    MissingCertificateId,

    #[error("required image ID missing")]
    MissingImageId,

    #[error("video ID missing")]
    MissingVideoId,

    #[error("required site tag missing")]
    MissingSiteTag,

    #[error("invalid IP {0}: contains CIDR, expected a single address")]
    InvalidIpContainsCidr(String),

    #[error("unsupported membership kind: {0}")]
    UnsupportedMembershipKind(String),

    #[error("upload URL and file are mutually exclusive and can not be used together")]
    UploadUrlAndFileMutuallyExclusive,

    #[error("an image file or upload URL is required")]
    MissingUploadSource,

    #[error("zone could not be found: {0}")]
    ZoneNotFound(String),

    #[error("ambiguous zone name {0}; an account ID might help")]
    AmbiguousZoneName(String),

    #[error("this method requires an account level resource container")]
    RequiredAccountLevel,

    #[error("this method requires a zone level resource container")]
    RequiredZoneLevel,

    #[error("required upload URL missing")]
    MissingUploadUrl,

    #[error("required schema ID missing")]
    MissingSchemaId,

    #[error("required access group ID missing")]
    MissingAccessGroupId,
}

/// Every error the client can produce.
#[derive(Error, Debug)]
pub enum Error {
    /// A request was attempted with no credential configured.
    #[error("invalid credentials: key & email, user service key or token must not be empty")]
    MissingCredentials,

    /// Both an API key and an API token were supplied at construction.
    #[error("API keys and tokens are mutually exclusive")]
    ApiKeysAndTokensMutuallyExclusive,

    /// The Security Token Service exchange failed.
    #[error(transparent)]
    Sts(#[from] StsError),

    /// HTTP 401.
    #[error("{0}")]
    Authorization(ApiError),

    /// HTTP 403.
    #[error("{0}")]
    Authentication(ApiError),

    /// HTTP 404.
    #[error("{0}")]
    NotFound(ApiError),

    /// HTTP 429.
    #[error("{0}")]
    RateLimit(ApiError),

    /// Other 4xx responses and unsuccessful envelopes.
    #[error("{0}")]
    Request(ApiError),

    /// HTTP 5xx.
    #[error("{0}")]
    Service(ApiError),

    /// Non-enveloped error body returned by the filter expression validator.
    #[error("{0}")]
    RawApi(String),

    /// The request could not be assembled.
    #[error("error creating request: {0}")]
    BuildRequest(String),

    /// The underlying HTTP client could not be constructed.
    #[error("error creating HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Network or transport failure, after retries.
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest_middleware::Error),

    /// The response body could not be read.
    #[error("could not read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The request payload could not be encoded as JSON.
    #[error("error marshalling params to JSON: {0}")]
    Marshal(#[source] serde_json::Error),

    /// The response envelope could not be decoded.
    #[error("failed to unmarshal response body: {0}")]
    Unmarshal(#[source] serde_json::Error),

    /// Caller input was rejected before sending.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// `Tus-Resumable` must be `1.0.0`.
    #[error("invalid Tus-Resumable header value, only 1.0.0 is supported")]
    InvalidTusResumable,

    /// A response arrived with a status the operation does not accept.
    #[error("invalid status code: {0}")]
    InvalidStatusCode(u16),

    /// A header name or value could not be represented.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl Error {
    /// Returns the API error payload for API failures.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Authorization(e)
            | Self::Authentication(e)
            | Self::NotFound(e)
            | Self::RateLimit(e)
            | Self::Request(e)
            | Self::Service(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the API error type for API failures.
    pub fn error_type(&self) -> Option<ErrorType> {
        self.api_error().map(|e| e.error_type)
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimit(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service(_))
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        match err.error_type {
            ErrorType::Authorization => Self::Authorization(err),
            ErrorType::Authentication => Self::Authentication(err),
            ErrorType::NotFound => Self::NotFound(err),
            ErrorType::RateLimit => Self::RateLimit(err),
            ErrorType::Request => Self::Request(err),
            ErrorType::Service => Self::Service(err),
        }
    }
}
