//
//  cloudflare-client
//  api/resources/dns.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! DNS records.
//!
//! Record names, on create, update and list, are converted to their ASCII
//! form before they leave the client, so `😺.example.com` is sent as
//! `xn--138h.example.com`.
//!
//! # BIND Import
//!
//! [`Client::import_dns_records`] sanitizes the zone file, splits it into
//! proxied and non-proxied halves, and posts each half separately:
//!
//! ```text
//! www.example.com. 300 IN A 192.0.2.1        -> first request
//! app.example.com. 1 IN CNAME origin.net.    -> second request, proxied=true
//! ```
//!
//! A CNAME with a TTL of 1 marks a proxied record. The import endpoint cannot
//! infer that on its own, so each half is annotated by the client. Both
//! requests are always sent, non-proxied first.
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudflare_client::api::{CreateDnsRecordParams, ResourceContainer};
//! use cloudflare_client::Client;
//!
//! # async fn example() -> cloudflare_client::Result<()> {
//! let client = Client::builder().api_token("token").build().await?;
//! let zone = ResourceContainer::zone_identifier("023e105f4ecef8ad9ca31a8372d0c353");
//!
//! let record = client
//!     .create_dns_record(&zone, CreateDnsRecordParams {
//!         record_type: "A".to_string(),
//!         name: "www.example.com".to_string(),
//!         content: "192.0.2.1".to_string(),
//!         proxied: Some(true),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("created {}", record.id);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{
    Paginated, Query, QueryParams, ResourceContainer, ResultInfo, DNS_RECORDS_PER_PAGE,
};
use crate::api::multipart::{MultipartForm, BIND_IMPORT_BOUNDARY};
use crate::api::resources::{require_id, require_zone, IdResult};
use crate::api::{Client, Payload, Result, ValidationError};
use crate::util::to_ascii;

static SOA_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"IN\s+SOA").unwrap());

static PROXIED_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*\.\s+1\s+IN\s+CNAME.*$").unwrap());

/// A DNS record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default)]
    pub id: String,

    #[serde(rename = "type", default)]
    pub record_type: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub proxiable: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// Seconds; 1 means automatic.
    #[serde(default)]
    pub ttl: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub zone_name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub comment: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Structured content for SRV, LOC, CAA and similar types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Body of [`Client::create_dns_record`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CreateDnsRecordParams {
    #[serde(rename = "type")]
    pub record_type: String,

    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Body of [`Client::update_dns_record`]. Unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateDnsRecordParams {
    #[serde(skip)]
    pub id: String,

    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub record_type: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,

    #[serde(skip_serializing_if = "is_zero")]
    pub ttl: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// `Some("")` clears the comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Filters for [`Client::list_dns_records`].
#[derive(Debug, Clone, Default)]
pub struct ListDnsRecordsParams {
    pub record_type: String,
    /// Exact record name. Converted to ASCII before sending.
    pub name: String,
    pub content: String,
    pub proxied: Option<bool>,
    pub comment: String,
    pub tags: Vec<String>,
    /// `Some(true)` requires every filter to match, `Some(false)` any.
    pub match_all: Option<bool>,
    pub order: String,
    pub direction: String,
    pub result_info: ResultInfo,
}

impl QueryParams for ListDnsRecordsParams {
    fn append_query(&self, query: &mut Query) {
        query
            .push("type", &self.record_type)
            .push("name", &self.name)
            .push("content", &self.content)
            .push_opt("proxied", &self.proxied)
            .push("comment", &self.comment)
            .push_all("tag", &self.tags);
        if let Some(all) = self.match_all {
            query.push("match", &if all { "all" } else { "any" });
        }
        query
            .push("order", &self.order)
            .push("direction", &self.direction)
            .push_pagination(&self.result_info);
    }
}

impl Paginated for ListDnsRecordsParams {
    fn result_info(&self) -> &ResultInfo {
        &self.result_info
    }

    fn result_info_mut(&mut self) -> &mut ResultInfo {
        &mut self.result_info
    }
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl Client {
    /// Creates a DNS record.
    ///
    /// API reference: https://developers.cloudflare.com/api/resources/dns/subresources/records/methods/create/
    pub async fn create_dns_record(
        &self,
        rc: &ResourceContainer,
        mut params: CreateDnsRecordParams,
    ) -> Result<DnsRecord> {
        let zone_id = require_zone(rc)?;
        params.name = to_ascii(&params.name);

        let uri = format!("/zones/{}/dns_records", zone_id);
        self.request_result(Method::POST, &uri, Payload::json(&params)?).await
    }

    /// Fetches a single DNS record.
    pub async fn get_dns_record(&self, rc: &ResourceContainer, record_id: &str) -> Result<DnsRecord> {
        let zone_id = require_zone(rc)?;
        require_id(record_id, ValidationError::MissingDnsRecordId)?;

        let uri = format!("/zones/{}/dns_records/{}", zone_id, record_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    /// Patches a DNS record, sending only the fields that are set.
    pub async fn update_dns_record(
        &self,
        rc: &ResourceContainer,
        mut params: UpdateDnsRecordParams,
    ) -> Result<DnsRecord> {
        let zone_id = require_zone(rc)?;
        require_id(&params.id, ValidationError::MissingDnsRecordId)?;
        params.name = to_ascii(&params.name);

        let uri = format!("/zones/{}/dns_records/{}", zone_id, params.id);
        self.request_result(Method::PATCH, &uri, Payload::json(&params)?).await
    }

    /// Deletes a DNS record.
    pub async fn delete_dns_record(&self, rc: &ResourceContainer, record_id: &str) -> Result<()> {
        let zone_id = require_zone(rc)?;
        require_id(record_id, ValidationError::MissingDnsRecordId)?;

        let uri = format!("/zones/{}/dns_records/{}", zone_id, record_id);
        let _: IdResult = self.request_result(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(())
    }

    /// Lists DNS records, following every page unless the caller picked one.
    pub async fn list_dns_records(
        &self,
        rc: &ResourceContainer,
        mut params: ListDnsRecordsParams,
    ) -> Result<(Vec<DnsRecord>, ResultInfo)> {
        let zone_id = require_zone(rc)?;
        params.name = to_ascii(&params.name);

        let path = format!("/zones/{}/dns_records", zone_id);
        self.paginate(&path, params, DNS_RECORDS_PER_PAGE).await
    }

    /// Downloads the zone's records as a BIND zone file.
    pub async fn export_dns_records(&self, rc: &ResourceContainer) -> Result<String> {
        let zone_id = require_zone(rc)?;

        let uri = format!("/zones/{}/dns_records/export", zone_id);
        let body = self.request(Method::GET, &uri, Payload::Empty).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Imports a BIND zone file.
    ///
    /// Sends the non-proxied records, then the proxied records with
    /// `proxied=true`. Stops at the first failure.
    pub async fn import_dns_records(&self, rc: &ResourceContainer, contents: &str) -> Result<()> {
        let zone_id = require_zone(rc)?;
        if contents.is_empty() {
            return Err(ValidationError::MissingBindContents.into());
        }

        let sanitized = sanitize_bind(contents);
        let (proxied, non_proxied) = split_proxied(&sanitized);
        let uri = format!("/zones/{}/dns_records/import", zone_id);

        let mut form = MultipartForm::with_boundary(BIND_IMPORT_BOUNDARY);
        form.file("file", "bind.txt", non_proxied.as_bytes());
        let _: Option<serde_json::Value> = self.request_multipart(Method::POST, &uri, form).await?;

        let mut form = MultipartForm::with_boundary(BIND_IMPORT_BOUNDARY);
        form.file("file", "bind.txt", proxied.as_bytes())
            .text("proxied", "true");
        let _: Option<serde_json::Value> = self.request_multipart(Method::POST, &uri, form).await?;
        Ok(())
    }
}

/// Cleans a BIND zone file for import.
///
/// Drops SOA records and `;;` comment lines, turns tabs into spaces, trims
/// trailing whitespace, collapses runs of blank lines and trims the result.
pub fn sanitize_bind(contents: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in contents.lines() {
        if SOA_LINE.is_match(line) || line.trim_start().starts_with(";;") {
            continue;
        }
        let line = line.replace('\t', " ").trim_end().to_string();
        if line.is_empty() && lines.last().is_some_and(|prev| prev.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    lines.join("\n").trim().to_string()
}

/// Splits sanitized BIND text into `(proxied, non_proxied)` record lines.
pub fn split_proxied(contents: &str) -> (String, String) {
    let (proxied, non_proxied): (Vec<&str>, Vec<&str>) =
        contents.lines().partition(|line| PROXIED_LINE.is_match(line));
    (proxied.join("\n"), non_proxied.join("\n"))
}
