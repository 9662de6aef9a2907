//
//  cloudflare-client
//  api/resources/origin_ca.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Origin CA certificates.
//!
//! The service reports `expires_on` as `2032-08-27 15:12:00 +0000 UTC` on
//! some endpoints and as RFC 3339 on others; both are accepted.

use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::api::common::{build_uri, Query, QueryParams};
use crate::api::resources::{require_id, IdResult};
use crate::api::{Client, Payload, Result, ValidationError};

/// An Origin CA certificate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginCaCertificate {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub certificate: String,

    #[serde(default)]
    pub hostnames: Vec<String>,

    #[serde(serialize_with = "serialize_expiry", deserialize_with = "deserialize_expiry")]
    pub expires_on: DateTime<Utc>,

    /// `origin-rsa`, `origin-ecc` or `keyless-certificate`.
    #[serde(default)]
    pub request_type: String,

    /// Days.
    #[serde(default)]
    pub requested_validity: u32,

    #[serde(default)]
    pub csr: String,
}

/// Parses `YYYY-MM-DD HH:MM:SS +ZZZZ`, ignoring a trailing zone name, then RFC 3339.
pub fn parse_expiry(value: &str) -> Option<DateTime<Utc>> {
    // Only the first three fields matter; a zone abbreviation may follow.
    let head: Vec<&str> = value.split_whitespace().take(3).collect();
    if head.len() == 3 {
        if let Ok(at) = DateTime::<FixedOffset>::parse_from_str(&head.join(" "), "%Y-%m-%d %H:%M:%S %z") {
            return Some(at.with_timezone(&Utc));
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|at| at.with_timezone(&Utc))
}

fn deserialize_expiry<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_expiry(&value).ok_or_else(|| serde::de::Error::custom(format!("invalid expires_on: {}", value)))
}

fn serialize_expiry<S>(value: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

/// Parameters for [`Client::list_origin_ca_certificates`].
#[derive(Debug, Clone, Default)]
pub struct ListOriginCertificatesParams {
    pub zone_id: String,
}

impl QueryParams for ListOriginCertificatesParams {
    fn append_query(&self, query: &mut Query) {
        query.push("zone_id", &self.zone_id);
    }
}

/// Body of [`Client::create_origin_ca_certificate`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOriginCaCertificateParams {
    pub csr: String,
    pub hostnames: Vec<String>,
    pub request_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_validity: Option<u32>,
}

impl Client {
    /// Lists certificates issued for a zone.
    ///
    /// Origin CA endpoints reject API tokens; use a user service key or API
    /// key when building the client.
    pub async fn list_origin_ca_certificates(
        &self,
        params: ListOriginCertificatesParams,
    ) -> Result<Vec<OriginCaCertificate>> {
        require_id(&params.zone_id, ValidationError::MissingZoneId)?;

        let uri = build_uri("/certificates", &params);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    pub async fn get_origin_ca_certificate(&self, certificate_id: &str) -> Result<OriginCaCertificate> {
        require_id(certificate_id, ValidationError::MissingCertificateId)?;

        let uri = format!("/certificates/{}", certificate_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    pub async fn create_origin_ca_certificate(
        &self,
        params: CreateOriginCaCertificateParams,
    ) -> Result<OriginCaCertificate> {
        self.request_result(Method::POST, "/certificates", Payload::json(&params)?).await
    }

    /// Revokes a certificate, returning its ID.
    pub async fn revoke_origin_ca_certificate(&self, certificate_id: &str) -> Result<String> {
        require_id(certificate_id, ValidationError::MissingCertificateId)?;

        let uri = format!("/certificates/{}", certificate_id);
        let result: IdResult = self.request_result(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(result.id)
    }
}
