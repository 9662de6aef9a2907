//
//  cloudflare-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Cloudflare Client Library
//!
//! A typed client SDK for the Cloudflare v4 REST API.
//!
//! ## Overview
//!
//! Every resource method funnels through one request pipeline that takes care of
//! credential headers, retries, body encoding, the standard response envelope,
//! error mapping and auto-pagination. Resource methods are thin wrappers that
//! build a URI and a payload and hand them to that pipeline.
//!
//! ## Module Structure
//!
//! - [`api`]: The request pipeline, envelope types, pagination and resources
//! - [`auth`]: Credentials and the Security Token Service exchange
//! - [`config`]: Client construction options and retry policy
//! - [`logger`]: Leveled logger used for debug dumps and retry reporting
//! - [`util`]: Hostname normalization and credential redaction
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cloudflare_client::api::{ListDnsRecordsParams, ResourceContainer};
//! use cloudflare_client::Client;
//!
//! # async fn example() -> cloudflare_client::Result<()> {
//! let client = Client::builder().api_token("my-token").build().await?;
//!
//! let zone = ResourceContainer::zone_identifier("023e105f4ecef8ad9ca31a8372d0c353");
//! let (records, info) = client
//!     .list_dns_records(&zone, ListDnsRecordsParams::default())
//!     .await?;
//! println!("{} of {} records", records.len(), info.total);
//! # Ok(())
//! # }
//! ```

/// HTTP request pipeline and resource methods.
///
/// Contains the [`Client`](api::Client), the response envelope, the error
/// taxonomy, query-string encoding, pagination and the per-resource wrappers.
pub mod api;

/// Credentials and the Security Token Service exchange.
pub mod auth;

/// Client construction options.
///
/// Holds the builder, the immutable resolved configuration, and the retry policy.
pub mod config;

/// Leveled logger.
pub mod logger;

/// Hostname normalization and credential redaction helpers.
pub mod util;

pub use api::{ApiError, Client, Error, ErrorType, Result};
pub use config::{ClientBuilder, RetryPolicy};

/// Library version, derived from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
