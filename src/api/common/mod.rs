//
//  cloudflare-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types shared by every resource
//!
//! # Overview
//!
//! - [`Response`] - The `{success, errors, messages, result, result_info}` envelope
//! - [`ResponseInfo`] - One `{code, message}` entry of `errors` or `messages`
//! - [`ResourceContainer`] - An account, zone or user scope rendered into URLs
//! - Pagination types (re-exported from [`pagination`] submodule)
//! - Query-string encoding (re-exported from [`query`] submodule)
//!
//! # Example
//!
//! ```rust
//! use cloudflare_client::api::common::{ResourceContainer, Response};
//!
//! let json = r#"{"success":true,"errors":[],"messages":[],"result":{"id":"abc"}}"#;
//! let response: Response<serde_json::Value> = serde_json::from_str(json).unwrap();
//! assert!(response.success);
//!
//! let zone = ResourceContainer::zone_identifier("abc");
//! assert_eq!(zone.url_fragment(), "zones/abc");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod pagination;
mod query;

pub use pagination::*;
pub use query::*;

/// One entry of the envelope's `errors` or `messages` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseInfo {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl ResponseInfo {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The standard response envelope.
///
/// `result` is opaque to the pipeline; callers choose `T`. Endpoints that may
/// return `null` should use `Option<_>` for `T`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response<T> {
    /// True iff the operation succeeded at the application level.
    pub success: bool,

    #[serde(default)]
    pub errors: Vec<ResponseInfo>,

    #[serde(default)]
    pub messages: Vec<ResponseInfo>,

    pub result: T,

    /// Present on list operations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_info: Option<ResultInfo>,
}

/// Scope level of a [`ResourceContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceLevel {
    Account,
    Zone,
    User,
}

impl ResourceLevel {
    /// Path segment used for this level.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Account => "accounts",
            Self::Zone => "zones",
            Self::User => "user",
        }
    }
}

/// Identifies the remote scope a request operates on.
///
/// Renders into a URL fragment:
///
/// | Level | Fragment |
/// |-------|----------|
/// | account | `accounts/{id}` |
/// | zone | `zones/{id}` |
/// | user | `user` |
/// | none | `{id}` |
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceContainer {
    pub level: Option<ResourceLevel>,
    pub identifier: String,
}

impl ResourceContainer {
    pub fn account_identifier(id: impl Into<String>) -> Self {
        Self {
            level: Some(ResourceLevel::Account),
            identifier: id.into(),
        }
    }

    pub fn zone_identifier(id: impl Into<String>) -> Self {
        Self {
            level: Some(ResourceLevel::Zone),
            identifier: id.into(),
        }
    }

    /// The identifier is kept but never rendered.
    pub fn user_identifier(id: impl Into<String>) -> Self {
        Self {
            level: Some(ResourceLevel::User),
            identifier: id.into(),
        }
    }

    /// A container without a level; renders as the bare identifier.
    pub fn raw(id: impl Into<String>) -> Self {
        Self {
            level: None,
            identifier: id.into(),
        }
    }

    pub fn url_fragment(&self) -> String {
        match self.level {
            Some(ResourceLevel::User) => ResourceLevel::User.as_str().to_string(),
            Some(level) => format!("{}/{}", level.as_str(), self.identifier),
            None => self.identifier.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.identifier.is_empty()
    }
}

impl fmt::Display for ResourceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url_fragment())
    }
}
