//
//  cloudflare-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Retrying HTTP transport.
//!
//! A `reqwest` client wrapped in two middlewares:
//!
//! 1. [`RetryTransientMiddleware`] retries connection failures, timeouts, 5xx
//!    and 429 responses with exponential backoff bounded by the
//!    [`RetryPolicy`].
//! 2. [`AttemptLogger`] sits inside the retry layer and reports every attempt
//!    to a [`Logger`]. Clients hand it the silent logger unless debug output
//!    was requested, so retries never show up in caller logs by default.
//!
//! Any other 4xx response comes back untouched on the first attempt.

use std::sync::Arc;

use async_trait::async_trait;
use http::Extensions;
use reqwest::{Request, Response, StatusCode};
use reqwest_middleware::{ClientBuilder as MiddlewareBuilder, ClientWithMiddleware, Middleware, Next};
use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::RetryTransientMiddleware;

use crate::api::{Error, Result};
use crate::config::RetryPolicy;
use crate::logger::Logger;

/// Builds the retrying client used by the request pipeline.
pub fn retrying_client(policy: &RetryPolicy, logger: Arc<dyn Logger>) -> Result<ClientWithMiddleware> {
    let http = reqwest::Client::builder()
        .build()
        .map_err(Error::HttpClient)?;
    Ok(with_retries(http, policy, logger))
}

/// Wraps an existing `reqwest` client in the retry and attempt-logging layers.
pub fn with_retries(
    http: reqwest::Client,
    policy: &RetryPolicy,
    logger: Arc<dyn Logger>,
) -> ClientWithMiddleware {
    MiddlewareBuilder::new(http)
        .with(RetryTransientMiddleware::new_with_policy(backoff(policy)))
        .with(AttemptLogger::new(logger))
        .build()
}

/// Exponential backoff honoring the policy's bounds.
///
/// A minimum above the maximum is clamped down to it.
pub fn backoff(policy: &RetryPolicy) -> ExponentialBackoff {
    let min = policy.min_delay.min(policy.max_delay);
    ExponentialBackoff::builder()
        .retry_bounds(min, policy.max_delay)
        .build_with_max_retries(policy.max_retries)
}

/// Reports each transport attempt to a [`Logger`].
pub struct AttemptLogger {
    logger: Arc<dyn Logger>,
}

impl AttemptLogger {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

#[async_trait]
impl Middleware for AttemptLogger {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        let method = req.method().clone();
        let url = req.url().path().to_string();
        self.logger.debug(format_args!("[http] {} {}", method, url));

        let result = next.run(req, extensions).await;
        match &result {
            Ok(response) if is_retryable_status(response.status()) => {
                self.logger.warn(format_args!(
                    "[http] {} {} returned {}",
                    method,
                    url,
                    response.status()
                ));
            }
            Err(err) => {
                self.logger
                    .warn(format_args!("[http] {} {} failed: {}", method, url, err));
            }
            Ok(_) => {}
        }
        result
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retryable_status(StatusCode::TOO_MANY_REQUESTS));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::OK));
    }

    #[test]
    fn test_backoff_clamps_inverted_bounds() {
        let policy = RetryPolicy {
            max_retries: 2,
            min_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(1),
        };
        // retry_bounds panics on inverted bounds; clamping must avoid that.
        let _ = backoff(&policy);
    }
}
