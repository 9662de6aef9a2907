//
//  cloudflare-client
//  tests/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

#![allow(dead_code)]

use std::time::Duration;

use cloudflare_client::{Client, ClientBuilder, RetryPolicy};
use mockito::ServerGuard;

pub const TOKEN: &str = "deadbeef-token";
pub const ZONE_ID: &str = "023e105f4ecef8ad9ca31a8372d0c353";
pub const ACCOUNT_ID: &str = "01a7362d577a6c3019a474fd6f485823";

/// Retries off so 429 and 5xx responses surface on the first attempt.
pub fn no_retries() -> RetryPolicy {
    RetryPolicy {
        max_retries: 0,
        min_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(1),
    }
}

/// `max_retries` retries with millisecond backoff.
pub fn quick_retries(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        ..no_retries()
    }
}

pub fn builder(server: &ServerGuard) -> ClientBuilder {
    Client::builder()
        .base_url(server.url())
        .retry_policy(no_retries())
}

pub async fn client(server: &ServerGuard) -> Client {
    builder(server).api_token(TOKEN).build().await.unwrap()
}

/// A successful envelope around `result`.
pub fn envelope(result: serde_json::Value) -> String {
    serde_json::json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result
    })
    .to_string()
}

/// A successful list envelope with pagination info.
pub fn page(result: serde_json::Value, page: u32, per_page: u32, total_pages: u32) -> String {
    let count = result.as_array().map(|a| a.len()).unwrap_or_default();
    serde_json::json!({
        "success": true,
        "errors": [],
        "messages": [],
        "result": result,
        "result_info": {
            "page": page,
            "per_page": per_page,
            "count": count,
            "total_count": count as u32 * total_pages,
            "total_pages": total_pages
        }
    })
    .to_string()
}

/// A failed envelope with a single error.
pub fn failure(code: i64, message: &str) -> String {
    serde_json::json!({
        "success": false,
        "errors": [{"code": code, "message": message}],
        "messages": [],
        "result": null
    })
    .to_string()
}

pub fn dns_record(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "type": "A",
        "name": name,
        "content": "192.0.2.1",
        "proxiable": true,
        "proxied": false,
        "ttl": 1,
        "zone_id": ZONE_ID,
        "zone_name": "example.com",
        "created_on": "2024-01-01T05:20:00.12345Z",
        "modified_on": "2024-01-01T05:20:00.12345Z"
    })
}
