//
//  cloudflare-client
//  api/resources/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Typed wrappers for individual API resources.
//!
//! Each submodule adds methods to [`Client`](crate::Client) and defines the
//! parameter and result types for one resource. Methods validate their inputs
//! before anything is sent, build a URI, and hand it to the pipeline.
//!
//! # Module Organization
//!
//! - [`zones`] - Zone listing and lookup by name
//! - [`dns`] - DNS records, including BIND import and export
//! - [`tunnels`] - Cloudflare Tunnels and their configuration
//! - [`tunnel_routes`] - Private network routes through tunnels
//! - [`web_analytics`] - Web Analytics sites
//! - [`images`] - Cloudflare Images uploads
//! - [`api_shield`] - API Shield schema uploads
//! - [`stream`] - Stream videos and resumable uploads
//! - [`filters`] - Firewall filter expression validation
//! - [`origin_ca`] - Origin CA certificates
//! - [`access_groups`] - Zero Trust Access groups

pub mod access_groups;
pub mod api_shield;
pub mod dns;
pub mod filters;
pub mod images;
pub mod origin_ca;
pub mod stream;
pub mod tunnel_routes;
pub mod tunnels;
pub mod web_analytics;
pub mod zones;

pub use access_groups::*;
pub use api_shield::*;
pub use dns::*;
pub use filters::*;
pub use images::*;
pub use origin_ca::*;
pub use stream::*;
pub use tunnel_routes::*;
pub use tunnels::*;
pub use web_analytics::*;
pub use zones::*;

use serde::Deserialize;
use url::form_urlencoded;

use crate::api::common::{ResourceContainer, ResourceLevel};
use crate::api::{Result, ValidationError};

/// `{"id": ...}` result returned by most delete endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IdResult {
    #[serde(default)]
    pub id: String,
}

/// Identifier of an account-level container.
pub(crate) fn require_account(rc: &ResourceContainer) -> Result<&str> {
    if rc.level != Some(ResourceLevel::Account) {
        return Err(ValidationError::RequiredAccountLevel.into());
    }
    if rc.is_empty() {
        return Err(ValidationError::MissingAccountId.into());
    }
    Ok(&rc.identifier)
}

/// Identifier of a zone-level container.
pub(crate) fn require_zone(rc: &ResourceContainer) -> Result<&str> {
    if rc.level != Some(ResourceLevel::Zone) {
        return Err(ValidationError::RequiredZoneLevel.into());
    }
    if rc.is_empty() {
        return Err(ValidationError::MissingZoneId.into());
    }
    Ok(&rc.identifier)
}

/// URL fragment of an account- or zone-level container.
pub(crate) fn require_scope(rc: &ResourceContainer) -> Result<String> {
    match rc.level {
        Some(ResourceLevel::Account) if rc.is_empty() => Err(ValidationError::MissingAccountId.into()),
        Some(ResourceLevel::Zone) if rc.is_empty() => Err(ValidationError::MissingZoneId.into()),
        Some(ResourceLevel::Account) | Some(ResourceLevel::Zone) => Ok(rc.url_fragment()),
        _ => Err(ValidationError::RequiredAccountLevel.into()),
    }
}

pub(crate) fn require_id(id: &str, missing: ValidationError) -> Result<()> {
    if id.is_empty() {
        return Err(missing.into());
    }
    Ok(())
}

/// Percent-encodes a single path segment.
pub(crate) fn path_escape(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Error;

    #[test]
    fn test_require_account() {
        let rc = ResourceContainer::account_identifier("a1");
        assert_eq!(require_account(&rc).unwrap(), "a1");

        let err = require_account(&ResourceContainer::account_identifier("")).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingAccountId)));

        let err = require_account(&ResourceContainer::zone_identifier("z1")).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::RequiredAccountLevel)));
    }

    #[test]
    fn test_require_scope() {
        assert_eq!(
            require_scope(&ResourceContainer::zone_identifier("z1")).unwrap(),
            "zones/z1"
        );
        let err = require_scope(&ResourceContainer::zone_identifier("")).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingZoneId)));
        assert!(require_scope(&ResourceContainer::user_identifier("")).is_err());
    }

    #[test]
    fn test_path_escape() {
        assert_eq!(path_escape("10.0.0.0/16"), "10.0.0.0%2F16");
        assert_eq!(path_escape("a b"), "a%20b");
        assert_eq!(path_escape("plain-id_1.2"), "plain-id_1.2");
    }
}
