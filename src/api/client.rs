//
//  cloudflare-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Cloudflare API
//!
//! [`Client`] owns the request pipeline every resource method goes through.
//!
//! ## Pipeline
//!
//! 1. **URL**: `base_url + uri`, where `uri` is an already-encoded path plus
//!    optional query string (see [`build_uri`]).
//! 2. **Body**: [`Payload::Empty`] sends nothing, [`Payload::Bytes`] is sent
//!    verbatim with a caller-set content type, [`Payload::Json`] is an encoded
//!    JSON document.
//! 3. **Headers**: client defaults, overlaid by per-call headers, then the
//!    credential headers, `User-Agent`, and `Content-Type: application/json`
//!    for JSON bodies that did not set one.
//! 4. **Dispatch** through the retrying transport; the body is read in full.
//! 5. **Decode** with [`decode_response`].
//!
//! With debug enabled, the request and the response are dumped to the logger
//! with every credential replaced by `[redacted]`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cloudflare_client::Client;
//! use reqwest::Method;
//!
//! # async fn example() -> cloudflare_client::Result<()> {
//! let client = Client::builder().api_token("token").build().await?;
//! let user = client.raw(Method::GET, "/user", None).await?;
//! println!("{}", user.result);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::common::{build_uri, Paginated, QueryParams, Response, ResultInfo};
use crate::api::multipart::MultipartForm;
use crate::api::response::{decode_envelope, decode_response};
use crate::api::transport;
use crate::api::{Error, Result};
use crate::auth::is_credential_header;
use crate::config::{ClientBuilder, ClientConfig};
use crate::logger::{default_logger, silent_logger, Logger};
use crate::util::{redact, REDACTED};

/// Request body handed to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Payload {
    /// No body.
    #[default]
    Empty,
    /// Sent as-is. The caller sets the content type.
    Bytes(Vec<u8>),
    /// An encoded JSON document.
    Json(Vec<u8>),
}

impl Payload {
    /// Encodes `value` as JSON.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        serde_json::to_vec(value).map(Self::Json).map_err(Error::Marshal)
    }

    fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Empty => None,
            Self::Bytes(b) | Self::Json(b) => Some(b),
        }
    }
}

/// A response read in full.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Cloudflare API client.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Client {
    config: ClientConfig,
    http: Mutex<ClientWithMiddleware>,
    logger: Arc<dyn Logger>,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub(crate) fn from_parts(
        config: ClientConfig,
        http: Option<ClientWithMiddleware>,
        logger: Option<Arc<dyn Logger>>,
    ) -> Result<Self> {
        let logger = logger.unwrap_or_else(|| default_logger(config.debug));
        let http = match http {
            Some(http) => http,
            None => {
                let attempt_logger = if config.debug {
                    logger.clone()
                } else {
                    silent_logger()
                };
                transport::retrying_client(&config.retry_policy, attempt_logger)?
            }
        };

        Ok(Self {
            config,
            http: Mutex::new(http),
            logger,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// A copy of the underlying retrying HTTP client.
    pub fn http_client(&self) -> ClientWithMiddleware {
        self.http
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sends a request and returns the response without interpreting its
    /// status.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingCredentials`] when the client has no credential; nothing is sent
    /// - [`Error::BuildRequest`] when `base_url + uri` is not a valid URL
    /// - [`Error::Transport`] when the request fails after retries
    /// - [`Error::ReadBody`] when the response body cannot be read
    pub async fn execute(
        &self,
        method: Method,
        uri: &str,
        payload: Payload,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<RawResponse> {
        let headers = self.assemble_headers(&payload, extra_headers)?;

        let url = format!("{}{}", self.config.base_url, uri);
        let url = Url::parse(&url).map_err(|e| Error::BuildRequest(format!("{}: {}", url, e)))?;

        if self.config.debug {
            self.dump(&format!("{} {}", method, url), &headers, payload.body());
        }

        tracing::debug!("{} {}", method, url.path());

        let mut request = self.http_client().request(method, url).headers(headers);
        if let Some(body) = payload.body() {
            request = request.body(body.to_vec());
        }

        let response = request.send().await.map_err(Error::Transport)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(Error::ReadBody)?.to_vec();

        if self.config.debug {
            self.dump(&format!("HTTP {}", status), &headers, Some(&body));
        }

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }

    /// Sends a request and maps failures through the response decoder.
    ///
    /// The returned response always has a 2xx status.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        payload: Payload,
        extra_headers: Option<&HeaderMap>,
    ) -> Result<RawResponse> {
        let raw = self.execute(method, uri, payload, extra_headers).await?;
        let body = decode_response(uri, raw.status, &raw.headers, raw.body)?;
        Ok(RawResponse { body, ..raw })
    }

    /// Sends a request and returns the body of a successful response.
    pub async fn request(&self, method: Method, uri: &str, payload: Payload) -> Result<Vec<u8>> {
        Ok(self.send(method, uri, payload, None).await?.body)
    }

    /// Sends a request and decodes the response envelope.
    pub async fn request_envelope<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: &str,
        payload: Payload,
    ) -> Result<Response<T>> {
        let raw = self.send(method, uri, payload, None).await?;
        decode_envelope(raw.status, &raw.headers, &raw.body)
    }

    /// Sends a request and returns the envelope's `result`.
    pub async fn request_result<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: &str,
        payload: Payload,
    ) -> Result<T> {
        Ok(self.request_envelope(method, uri, payload).await?.result)
    }

    /// Sends a `multipart/form-data` body and returns the envelope's `result`.
    pub async fn request_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        uri: &str,
        form: MultipartForm,
    ) -> Result<T> {
        let content_type = form.content_type();
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&content_type).map_err(|_| Error::InvalidHeader(content_type.clone()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let raw = self
            .send(method, uri, Payload::Bytes(form.finish()), Some(&headers))
            .await?;
        Ok(decode_envelope(raw.status, &raw.headers, &raw.body)?.result)
    }

    /// Calls an arbitrary endpoint, returning its envelope with an untyped
    /// `result`.
    pub async fn raw(
        &self,
        method: Method,
        uri: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<Response<serde_json::Value>> {
        let payload = match body {
            Some(value) => Payload::json(value)?,
            None => Payload::Empty,
        };
        self.request_envelope(method, uri, payload).await
    }

    /// Fetches every page of a list endpoint.
    ///
    /// Unless the caller picked `page` or `per_page`, starts at page 1 with
    /// `default_per_page` and follows pages until the last one or an empty
    /// one. Otherwise exactly one request is made. Returns the concatenated
    /// results and the last observed `result_info`. An error on any page
    /// discards the pages already fetched.
    pub async fn paginate<T, P>(
        &self,
        path: &str,
        mut params: P,
        default_per_page: u32,
    ) -> Result<(Vec<T>, ResultInfo)>
    where
        T: DeserializeOwned,
        P: QueryParams + Paginated,
    {
        let auto = !params.result_info().is_caller_controlled();
        if auto {
            *params.result_info_mut() = ResultInfo::page(1, default_per_page);
        }

        let mut items = Vec::new();
        loop {
            let requested = *params.result_info();
            let uri = build_uri(path, &params);
            let envelope: Response<Option<Vec<T>>> =
                self.request_envelope(Method::GET, &uri, Payload::Empty).await?;

            // A null result is an empty page.
            let page = envelope.result.unwrap_or_default();
            let page_len = page.len();
            items.extend(page);

            let reported = envelope.result_info.is_some();
            let mut info = envelope.result_info.unwrap_or(requested);
            if info.page == 0 {
                info.page = requested.page;
            }
            if info.per_page == 0 {
                info.per_page = requested.per_page;
            }

            tracing::debug!(
                "fetched page {} of {} from {} ({} items)",
                info.page,
                info.total_pages,
                path,
                page_len
            );

            let next = info.next();
            if !auto || !reported || page_len == 0 || next.done() || next.page == info.page {
                return Ok((items, info));
            }
            *params.result_info_mut() = next;
        }
    }

    fn assemble_headers(&self, payload: &Payload, extra: Option<&HeaderMap>) -> Result<HeaderMap> {
        let mut headers = self.config.headers.clone();
        if let Some(extra) = extra {
            for name in extra.keys() {
                headers.remove(name);
            }
            for (name, value) in extra {
                headers.append(name.clone(), value.clone());
            }
        }

        self.config.credentials.apply(&mut headers)?;

        if !self.config.user_agent.is_empty() {
            let value = HeaderValue::from_str(&self.config.user_agent)
                .map_err(|_| Error::InvalidHeader("user agent contains invalid characters".to_string()))?;
            headers.insert(USER_AGENT, value);
        }

        if matches!(payload, Payload::Json(_)) && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        Ok(headers)
    }

    fn dump(&self, start_line: &str, headers: &HeaderMap, body: Option<&[u8]>) {
        let mut text = String::from(start_line);
        for (name, value) in headers {
            let value = if is_credential_header(name) {
                REDACTED.to_string()
            } else {
                String::from_utf8_lossy(value.as_bytes()).into_owned()
            };
            text.push_str(&format!("\n{}: {}", name, value));
        }
        if let Some(body) = body {
            text.push_str("\n\n");
            text.push_str(&String::from_utf8_lossy(body));
        }

        let secrets = self.config.credentials.secrets();
        self.logger.debug(format_args!("{}", redact(&text, &secrets)));
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
