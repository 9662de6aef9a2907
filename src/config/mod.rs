//
//  cloudflare-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Construction options for [`Client`](crate::Client).
//!
//! ## Overview
//!
//! A [`ClientBuilder`] collects options and merges them with defaults into an
//! immutable [`ClientConfig`]. Nothing here is global: two clients in the same
//! process can point at different endpoints with different credentials.
//!
//! | Option | Default |
//! |--------|---------|
//! | base URL | `https://api.cloudflare.com/client/v4` |
//! | user agent | `cloudflare-go/<version>` |
//! | headers | none |
//! | retry policy | 4 retries, 1s to 30s backoff |
//! | debug | off |
//! | logger | `Error` level, or `Debug` when debug is on |
//!
//! ## Environment
//!
//! [`ClientBuilder::from_env`] reads:
//!
//! - `CLOUDFLARE_API_TOKEN`
//! - `CLOUDFLARE_API_KEY` and `CLOUDFLARE_EMAIL`
//! - `CLOUDFLARE_API_USER_SERVICE_KEY`
//! - `CLOUDFLARE_BASE_URL`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use cloudflare_client::{Client, RetryPolicy};
//!
//! # async fn example() -> cloudflare_client::Result<()> {
//! let client = Client::builder()
//!     .api_token("token")
//!     .retry_policy(RetryPolicy {
//!         max_retries: 2,
//!         min_delay: Duration::from_millis(200),
//!         max_delay: Duration::from_secs(5),
//!     })
//!     .debug(true)
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest_middleware::ClientWithMiddleware;

use crate::api::{Client, Error, Result};
use crate::auth::{fetch_sts_token, CredentialSet, Credentials, StsConfig};
use crate::logger::Logger;

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Default `User-Agent` value.
pub fn default_user_agent() -> String {
    format!("cloudflare-go/{}", crate::VERSION)
}

/// Bounds for the retrying transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub min_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 4,
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

/// Resolved, immutable client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Sent with every request; per-call headers win on conflict.
    pub headers: HeaderMap,
    pub credentials: CredentialSet,
    pub retry_policy: RetryPolicy,
    pub debug: bool,
}

/// Fluent builder for [`Client`].
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    headers: HeaderMap,
    credentials: Vec<Credentials>,
    http_client: Option<ClientWithMiddleware>,
    retry_policy: RetryPolicy,
    debug: bool,
    logger: Option<Arc<dyn Logger>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            headers: HeaderMap::new(),
            credentials: Vec::new(),
            http_client: None,
            retry_policy: RetryPolicy::default(),
            debug: false,
            logger: None,
        }
    }

    /// Starts from credentials and base URL found in the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Starts from credentials and base URL found through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let mut builder = Self::new();

        if let Some(token) = get("CLOUDFLARE_API_TOKEN") {
            builder = builder.api_token(token);
        }
        if let Some(key) = get("CLOUDFLARE_API_KEY") {
            builder = builder.api_key(key, get("CLOUDFLARE_EMAIL").unwrap_or_default());
        }
        if let Some(key) = get("CLOUDFLARE_API_USER_SERVICE_KEY") {
            builder = builder.user_service_key(key);
        }
        if let Some(url) = get("CLOUDFLARE_BASE_URL") {
            builder = builder.base_url(url);
        }
        builder
    }

    /// Overrides the API endpoint. A trailing slash is dropped.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = Some(url.trim_end_matches('/').to_string());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds default headers sent with every request.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials.push(credentials);
        self
    }

    /// Legacy global API key and account email.
    pub fn api_key(self, key: impl Into<String>, email: impl Into<String>) -> Self {
        self.credentials(Credentials::KeyEmail {
            key: key.into(),
            email: email.into(),
        })
    }

    pub fn api_token(self, token: impl Into<String>) -> Self {
        self.credentials(Credentials::Token {
            token: token.into(),
        })
    }

    pub fn user_service_key(self, key: impl Into<String>) -> Self {
        self.credentials(Credentials::UserServiceKey { key: key.into() })
    }

    /// Obtains a bearer token from a Security Token Service during `build`.
    pub fn sts(self, config: StsConfig) -> Self {
        self.credentials(Credentials::Sts(config))
    }

    /// Uses a pre-built retrying client instead of building one from the
    /// retry policy.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Dumps requests and responses to the logger, with credentials redacted.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the client, running the STS exchange if one was configured.
    ///
    /// # Errors
    ///
    /// - [`Error::ApiKeysAndTokensMutuallyExclusive`] when both an API key and
    ///   a token (directly or via STS) were supplied
    /// - [`Error::Sts`] when the token exchange fails
    /// - [`Error::HttpClient`] when the HTTP client cannot be created
    pub async fn build(self) -> Result<Client> {
        let mut credentials = CredentialSet::default();
        let mut sts = None;
        for credential in self.credentials {
            match credential {
                Credentials::Sts(config) => sts = Some(config),
                other => credentials.add(other),
            }
        }

        if credentials.has_api_key() && (credentials.has_api_token() || sts.is_some()) {
            return Err(Error::ApiKeysAndTokensMutuallyExclusive);
        }

        if let Some(config) = sts {
            let token = fetch_sts_token(&config).await?;
            credentials.add(Credentials::Token { token });
        }

        let config = ClientConfig {
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
            headers: self.headers,
            credentials,
            retry_policy: self.retry_policy,
            debug: self.debug,
        };

        Client::from_parts(config, self.http_client, self.logger)
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("credentials", &self.credentials)
            .field("retry_policy", &self.retry_policy)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}
