//
//  cloudflare-client
//  api/resources/filters.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Firewall filter expressions.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::response::VALIDATE_EXPR_PATH;
use crate::api::{Client, Error, Payload, Result};

#[derive(Debug, Serialize)]
struct ValidateExpression<'a> {
    expression: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ValidationFailure {
    #[serde(default)]
    errors: Vec<ValidationFailureMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct ValidationFailureMessage {
    #[serde(default)]
    message: String,
}

impl Client {
    /// Checks a filter expression.
    ///
    /// A rejected expression comes back as [`Error::RawApi`] holding the
    /// first message the service reported.
    pub async fn validate_filter_expression(&self, expression: &str) -> Result<()> {
        let payload = Payload::json(&ValidateExpression { expression })?;
        match self.request(Method::POST, VALIDATE_EXPR_PATH, payload).await {
            Ok(_) => Ok(()),
            Err(Error::RawApi(body)) => Err(Error::RawApi(failure_message(&body)?)),
            Err(err) => Err(err),
        }
    }
}

fn failure_message(body: &str) -> Result<String> {
    let failure: ValidationFailure = serde_json::from_str(body).map_err(Error::Unmarshal)?;
    Ok(failure
        .errors
        .into_iter()
        .next()
        .map(|e| e.message)
        .unwrap_or_else(|| body.to_string()))
}
