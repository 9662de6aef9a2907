//
//  cloudflare-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credential types accepted by the client and the headers they produce.
//!
//! ## Supported Authentication Methods
//!
//! - **API Token**: `Authorization: Bearer <token>`. Recommended.
//! - **API Key + Email**: legacy global key, sent as `X-Auth-Key` and `X-Auth-Email`.
//! - **User Service Key**: `X-Auth-User-Service-Key`, used by the Origin CA endpoints.
//!   May be sent alongside either of the above.
//! - **Security Token Service**: a service tag and shared secret exchanged once, at
//!   client construction, for a short-lived bearer token (see [`sts`]).
//!
//! API keys and API tokens are mutually exclusive.
//!
//! ## Example
//!
//! ```rust
//! use cloudflare_client::auth::{CredentialSet, Credentials};
//! use reqwest::header::HeaderMap;
//!
//! let mut set = CredentialSet::default();
//! set.add(Credentials::Token { token: "abc".to_string() });
//!
//! let mut headers = HeaderMap::new();
//! set.apply(&mut headers).unwrap();
//! assert_eq!(headers["authorization"], "Bearer abc");
//! ```

pub mod sts;

pub use sts::{fetch_sts_token, StsConfig, StsError};

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use crate::api::{Error, Result};

/// Legacy API key header.
pub const X_AUTH_KEY: &str = "x-auth-key";
/// Email paired with the legacy API key.
pub const X_AUTH_EMAIL: &str = "x-auth-email";
/// User service key header.
pub const X_AUTH_USER_SERVICE_KEY: &str = "x-auth-user-service-key";

/// A credential supplied at construction.
#[derive(Clone)]
pub enum Credentials {
    /// Legacy global API key and the account email.
    KeyEmail { key: String, email: String },
    /// Scoped API token.
    Token { token: String },
    /// Origin CA user service key.
    UserServiceKey { key: String },
    /// Exchanged for a [`Credentials::Token`] when the client is built.
    Sts(StsConfig),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyEmail { email, .. } => f
                .debug_struct("KeyEmail")
                .field("key", &"***")
                .field("email", email)
                .finish(),
            Self::Token { .. } => f.debug_struct("Token").field("token", &"***").finish(),
            Self::UserServiceKey { .. } => {
                f.debug_struct("UserServiceKey").field("key", &"***").finish()
            }
            Self::Sts(config) => f.debug_tuple("Sts").field(config).finish(),
        }
    }
}

/// The resolved credentials a client signs requests with.
///
/// Empty strings count as absent.
#[derive(Clone, Default)]
pub struct CredentialSet {
    api_key: Option<String>,
    api_email: Option<String>,
    api_token: Option<String>,
    user_service_key: Option<String>,
}

impl CredentialSet {
    /// Folds a credential into the set. STS configurations are ignored here;
    /// they are resolved by the builder.
    pub fn add(&mut self, credentials: Credentials) {
        match credentials {
            Credentials::KeyEmail { key, email } => {
                self.api_key = non_empty(key);
                self.api_email = non_empty(email);
            }
            Credentials::Token { token } => self.api_token = non_empty(token),
            Credentials::UserServiceKey { key } => self.user_service_key = non_empty(key),
            Credentials::Sts(_) => {}
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn has_api_token(&self) -> bool {
        self.api_token.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.is_none() && self.api_token.is_none() && self.user_service_key.is_none()
    }

    /// Writes the credential headers.
    ///
    /// The API key pair takes precedence over a token; the user service key is
    /// added on top of either.
    pub fn apply(&self, headers: &mut HeaderMap) -> Result<()> {
        if self.is_empty() {
            return Err(Error::MissingCredentials);
        }

        if let Some(key) = &self.api_key {
            insert_sensitive(headers, HeaderName::from_static(X_AUTH_KEY), key)?;
            let email = self.api_email.as_deref().unwrap_or_default();
            insert_sensitive(headers, HeaderName::from_static(X_AUTH_EMAIL), email)?;
        } else if let Some(token) = &self.api_token {
            insert_sensitive(headers, AUTHORIZATION, &format!("Bearer {}", token))?;
        }

        if let Some(key) = &self.user_service_key {
            insert_sensitive(headers, HeaderName::from_static(X_AUTH_USER_SERVICE_KEY), key)?;
        }

        Ok(())
    }

    /// Every configured secret value, for log redaction.
    pub fn secrets(&self) -> Vec<&str> {
        [
            self.api_key.as_deref(),
            self.api_email.as_deref(),
            self.api_token.as_deref(),
            self.user_service_key.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("api_key", &self.api_key.is_some())
            .field("api_email", &self.api_email)
            .field("api_token", &self.api_token.is_some())
            .field("user_service_key", &self.user_service_key.is_some())
            .finish()
    }
}

/// Header names whose values are credentials.
pub fn is_credential_header(name: &HeaderName) -> bool {
    *name == AUTHORIZATION
        || name.as_str() == X_AUTH_KEY
        || name.as_str() == X_AUTH_EMAIL
        || name.as_str() == X_AUTH_USER_SERVICE_KEY
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn insert_sensitive(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| Error::InvalidHeader(format!("{} contains invalid characters", name)))?;
    value.set_sensitive(true);
    headers.insert(name, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(set: &CredentialSet) -> HeaderMap {
        let mut headers = HeaderMap::new();
        set.apply(&mut headers).unwrap();
        headers
    }

    #[test]
    fn test_empty_set_is_missing_credentials() {
        let mut headers = HeaderMap::new();
        let err = CredentialSet::default().apply(&mut headers).unwrap_err();
        assert!(matches!(err, Error::MissingCredentials));
        assert!(headers.is_empty());
    }

    #[test]
    fn test_key_email_headers() {
        let mut set = CredentialSet::default();
        set.add(Credentials::KeyEmail {
            key: "deadbeef".to_string(),
            email: "cloudflare@example.org".to_string(),
        });
        let headers = applied(&set);
        assert_eq!(headers[X_AUTH_KEY], "deadbeef");
        assert_eq!(headers[X_AUTH_EMAIL], "cloudflare@example.org");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_token_with_user_service_key() {
        let mut set = CredentialSet::default();
        set.add(Credentials::Token {
            token: "tok".to_string(),
        });
        set.add(Credentials::UserServiceKey {
            key: "v1.0-usk".to_string(),
        });
        let headers = applied(&set);
        assert_eq!(headers[AUTHORIZATION], "Bearer tok");
        assert_eq!(headers[X_AUTH_USER_SERVICE_KEY], "v1.0-usk");
        assert!(headers[AUTHORIZATION].is_sensitive());
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let mut set = CredentialSet::default();
        set.add(Credentials::Token {
            token: String::new(),
        });
        assert!(set.is_empty());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let creds = Credentials::Token {
            token: "super-secret".to_string(),
        };
        assert!(!format!("{:?}", creds).contains("super-secret"));

        let mut set = CredentialSet::default();
        set.add(creds);
        assert!(!format!("{:?}", set).contains("super-secret"));
        assert_eq!(set.secrets(), vec!["super-secret"]);
    }
}
