//
//  cloudflare-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! The request pipeline shared by every resource, and the resources themselves.
//!
//! ## Architecture
//!
//! - [`client`]: [`Client`], request assembly and the pagination driver
//! - [`transport`]: Retrying HTTP transport
//! - [`response`]: Response decoding and error mapping
//! - [`common`]: Envelope, resource containers, pagination and query encoding
//! - [`multipart`]: `multipart/form-data` body writer
//! - [`resources`]: Typed wrappers for individual API resources
//!
//! ## Error Handling
//!
//! API failures surface as [`Error`] variants carrying an [`ApiError`]:
//!
//! - `Authorization`: 401 Unauthorized
//! - `Authentication`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `RateLimit`: 429 Too Many Requests
//! - `Request`: other 4xx
//! - `Service`: 5xx Server Errors

/// Core HTTP client.
///
/// Provides the [`Client`] struct which handles:
/// - Credential and default header injection
/// - Body encoding
/// - Debug dumps with credential redaction
/// - Auto-pagination
pub mod client;

/// Types shared by every resource.
pub mod common;

/// Error taxonomy.
pub mod error;

/// Multipart body writer used by uploads and BIND import.
pub mod multipart;

/// Per-resource wrappers.
pub mod resources;

/// Response decoder and error mapper.
pub mod response;

/// Retrying HTTP transport.
pub mod transport;

pub use client::{Client, Payload, RawResponse};
pub use common::{ResourceContainer, ResourceLevel, Response, ResponseInfo, ResultInfo};
pub use error::{ApiError, Error, ErrorType, Result, ValidationError};
pub use resources::*;
