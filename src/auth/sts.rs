//
//  cloudflare-client
//  auth/sts.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Security Token Service Exchange
//!
//! Trades a service tag and shared secret for a short-lived bearer token.
//!
//! ## Flow
//!
//! 1. `GET https://{issuer_hostname}{issuer_path}` with
//!    `Authorization: Bearer {service_tag}{secret}`, through a retrying client
//!    allowing 3 retries.
//! 2. The issuer answers with the standard envelope whose `result` carries
//!    `json_web_token`.
//! 3. The token is returned when `success` is true.
//!
//! The client runs this once, at construction. The token is never refreshed;
//! a process that outlives it has to build a new client.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cloudflare_client::auth::{fetch_sts_token, StsConfig};
//!
//! # async fn example() -> Result<(), cloudflare_client::auth::StsError> {
//! let config = StsConfig::new("sts.example.com", "/issue", "service-tag", "secret");
//! let token = fetch_sts_token(&config).await?;
//! println!("token has {} characters", token.len());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use thiserror::Error;

use crate::api::common::Response;
use crate::api::transport;
use crate::config::RetryPolicy;
use crate::logger::silent_logger;

/// Retries allowed for the token exchange.
pub const STS_MAX_RETRIES: u32 = 3;

/// Failures of the token exchange.
#[derive(Error, Debug)]
pub enum StsError {
    #[error("service secret missing but is required")]
    MissingServiceSecret,

    #[error("service tag missing but is required")]
    MissingServiceTag,

    #[error("issuer hostname missing but is required")]
    MissingIssuerHostname,

    #[error("issuer path missing but is required")]
    MissingIssuerPath,

    #[error("failed to make HTTP request to issue STS token: {0}")]
    HttpFailure(#[source] reqwest_middleware::Error),

    #[error("failed to get successful response from STS issuer")]
    ResponseError,

    #[error("failed to unmarshal STS response: {0}")]
    Failure(#[source] serde_json::Error),
}

/// Where and how to obtain an STS token.
#[derive(Clone, Default)]
pub struct StsConfig {
    /// Issuer host, e.g. `sts.example.com`. An explicit `http://` or `https://`
    /// prefix is honored; otherwise HTTPS is used.
    pub issuer_hostname: String,
    /// Path on the issuer, including the leading slash.
    pub issuer_path: String,
    pub service_tag: String,
    pub secret: String,
}

impl StsConfig {
    pub fn new(
        issuer_hostname: impl Into<String>,
        issuer_path: impl Into<String>,
        service_tag: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            issuer_hostname: issuer_hostname.into(),
            issuer_path: issuer_path.into(),
            service_tag: service_tag.into(),
            secret: secret.into(),
        }
    }

    fn validate(&self) -> Result<(), StsError> {
        if self.secret.is_empty() {
            return Err(StsError::MissingServiceSecret);
        }
        if self.service_tag.is_empty() {
            return Err(StsError::MissingServiceTag);
        }
        if self.issuer_hostname.is_empty() {
            return Err(StsError::MissingIssuerHostname);
        }
        if self.issuer_path.is_empty() {
            return Err(StsError::MissingIssuerPath);
        }
        Ok(())
    }

    /// Full issuer URL.
    pub fn issuer_url(&self) -> String {
        if self.issuer_hostname.starts_with("https://") || self.issuer_hostname.starts_with("http://")
        {
            format!("{}{}", self.issuer_hostname, self.issuer_path)
        } else {
            format!("https://{}{}", self.issuer_hostname, self.issuer_path)
        }
    }
}

impl fmt::Debug for StsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StsConfig")
            .field("issuer_hostname", &self.issuer_hostname)
            .field("issuer_path", &self.issuer_path)
            .field("service_tag", &"***")
            .field("secret", &"***")
            .finish()
    }
}

#[derive(Deserialize)]
struct StsTokenResult {
    json_web_token: String,
}

/// Exchanges the configured service tag and secret for a bearer token.
pub async fn fetch_sts_token(config: &StsConfig) -> Result<String, StsError> {
    config.validate()?;

    let policy = RetryPolicy {
        max_retries: STS_MAX_RETRIES,
        ..RetryPolicy::default()
    };
    let http = reqwest::Client::builder()
        .build()
        .map_err(|e| StsError::HttpFailure(reqwest_middleware::Error::Reqwest(e)))?;
    let client = transport::with_retries(http, &policy, silent_logger());

    let response = client
        .get(config.issuer_url())
        .header(
            AUTHORIZATION,
            format!("Bearer {}{}", config.service_tag, config.secret),
        )
        .send()
        .await
        .map_err(StsError::HttpFailure)?;

    let body = response
        .bytes()
        .await
        .map_err(|e| StsError::HttpFailure(reqwest_middleware::Error::Reqwest(e)))?;

    let envelope: Response<Option<StsTokenResult>> =
        serde_json::from_slice(&body).map_err(StsError::Failure)?;

    match envelope.result {
        Some(result) if envelope.success => {
            tracing::debug!("obtained STS token from {}", config.issuer_hostname);
            Ok(result.json_web_token)
        }
        _ => Err(StsError::ResponseError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> StsConfig {
        StsConfig::new("sts.example.com", "/issue", "tag", "secret")
    }

    #[test]
    fn test_each_missing_input_has_its_own_error() {
        let mut config = complete();
        config.secret.clear();
        let err = tokio_test::block_on(fetch_sts_token(&config)).unwrap_err();
        assert!(matches!(err, StsError::MissingServiceSecret));

        let mut config = complete();
        config.service_tag.clear();
        let err = tokio_test::block_on(fetch_sts_token(&config)).unwrap_err();
        assert!(matches!(err, StsError::MissingServiceTag));

        let mut config = complete();
        config.issuer_hostname.clear();
        let err = tokio_test::block_on(fetch_sts_token(&config)).unwrap_err();
        assert!(matches!(err, StsError::MissingIssuerHostname));

        let mut config = complete();
        config.issuer_path.clear();
        let err = tokio_test::block_on(fetch_sts_token(&config)).unwrap_err();
        assert!(matches!(err, StsError::MissingIssuerPath));
    }

    #[test]
    fn test_issuer_url() {
        assert_eq!(complete().issuer_url(), "https://sts.example.com/issue");

        let local = StsConfig::new("http://127.0.0.1:1234", "/issue", "t", "s");
        assert_eq!(local.issuer_url(), "http://127.0.0.1:1234/issue");
    }

    #[test]
    fn test_debug_hides_secret() {
        let rendered = format!("{:?}", complete());
        assert!(!rendered.contains("\"secret\""));
        assert!(!rendered.contains("\"tag\""));
        assert!(rendered.contains("sts.example.com"));
    }
}
