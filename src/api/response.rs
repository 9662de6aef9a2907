//
//  cloudflare-client
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response decoding and error mapping.
//!
//! | Status | Outcome |
//! |--------|---------|
//! | 2xx | Body handed back unchanged |
//! | 4xx/5xx on `/filters/validate-expr` | [`Error::RawApi`] with the body text |
//! | 5xx | [`Error::Service`] with a synthetic "Internal Service Error"; body not parsed |
//! | other 4xx | Envelope decoded; variant picked by status |
//!
//! Every [`ApiError`] carries the `cf-ray` header verbatim.

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::api::common::{Response, ResponseInfo};
use crate::api::error::INTERNAL_SERVICE_ERROR;
use crate::api::{ApiError, Error, ErrorType, Result};

/// Response header carrying the request's ray ID.
pub const CF_RAY: &str = "cf-ray";

/// Filter validation path whose failures bypass envelope decoding.
pub const VALIDATE_EXPR_PATH: &str = "/filters/validate-expr";

/// The part of a failed response that matters; `success` and `result` are
/// often absent.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ResponseInfo>,
}

/// Maps a completed response to its body or an error.
pub fn decode_response(uri: &str, status: u16, headers: &HeaderMap, body: Vec<u8>) -> Result<Vec<u8>> {
    if (200..300).contains(&status) {
        return Ok(body);
    }

    if uri.contains(VALIDATE_EXPR_PATH) {
        return Err(Error::RawApi(String::from_utf8_lossy(&body).into_owned()));
    }

    let ray_id = ray_id(headers);

    if status >= 500 {
        let err = ApiError::new(status, ErrorType::Service)
            .with_ray_id(ray_id)
            .with_errors(vec![ResponseInfo::new(0, INTERNAL_SERVICE_ERROR)]);
        return Err(err.into());
    }

    let envelope: ErrorEnvelope = serde_json::from_slice(&body).map_err(Error::Unmarshal)?;

    let err = ApiError::new(status, ErrorType::from_status(status))
        .with_ray_id(ray_id)
        .with_errors(envelope.errors);
    Err(err.into())
}

/// Decodes a successful body into its envelope.
///
/// An envelope reporting `success: false` becomes an [`Error::Request`].
pub fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Response<T>> {
    let envelope: Response<T> = serde_json::from_slice(body).map_err(Error::Unmarshal)?;
    if !envelope.success {
        let err = ApiError::new(status, ErrorType::Request)
            .with_ray_id(ray_id(headers))
            .with_errors(envelope.errors);
        return Err(err.into());
    }
    Ok(envelope)
}

fn ray_id(headers: &HeaderMap) -> String {
    headers
        .get(CF_RAY)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
