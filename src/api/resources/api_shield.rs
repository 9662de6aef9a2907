//
//  cloudflare-client
//  api/resources/api_shield.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! API Shield schema validation (`api_gateway/user_schemas`).

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::ResourceContainer;
use crate::api::multipart::MultipartForm;
use crate::api::resources::{require_id, require_zone};
use crate::api::{Client, Payload, Result, ValidationError};

/// Schema format accepted by [`Client::upload_api_shield_schema`].
pub const SCHEMA_KIND_OPENAPI_V3: &str = "openapi_v3";

/// An uploaded schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiShieldSchema {
    pub schema_id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub kind: String,

    /// Raw schema document, present when requested.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source: String,

    #[serde(default)]
    pub validation_enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Parameters for [`Client::upload_api_shield_schema`].
#[derive(Debug, Clone, Default)]
pub struct UploadApiShieldSchemaParams {
    /// Schema document.
    pub source: Vec<u8>,
    /// Also used as the uploaded filename.
    pub name: String,
    /// Defaults to [`SCHEMA_KIND_OPENAPI_V3`] when empty.
    pub kind: String,
    pub validation_enabled: Option<bool>,
}

/// Result of a schema upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiShieldCreateSchemaResult {
    pub schema: ApiShieldSchema,

    #[serde(rename = "upload_details", default)]
    pub events: ApiShieldCreateSchemaEvents,
}

/// Problems found while parsing an uploaded schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiShieldCreateSchemaEvents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<ApiShieldCreateSchemaEvent>,

    #[serde(default)]
    pub errors: Vec<ApiShieldCreateSchemaEvent>,

    #[serde(default)]
    pub warnings: Vec<ApiShieldCreateSchemaEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiShieldCreateSchemaEvent {
    #[serde(default)]
    pub code: i64,

    #[serde(default)]
    pub message: String,

    /// JSON paths into the schema the event refers to.
    #[serde(default)]
    pub locations: Vec<String>,
}

impl UploadApiShieldSchemaParams {
    fn into_form(self) -> MultipartForm {
        let kind = if self.kind.is_empty() {
            SCHEMA_KIND_OPENAPI_V3
        } else {
            self.kind.as_str()
        };

        let mut form = MultipartForm::new();
        form.file("file", &self.name, &self.source)
            .text("kind", kind)
            .text("name", &self.name);
        if let Some(enabled) = self.validation_enabled {
            form.text("validation_enabled", if enabled { "true" } else { "false" });
        }
        form
    }
}

impl Client {
    /// Uploads a schema for validation.
    ///
    /// API reference: https://developers.cloudflare.com/api/resources/api_gateway/subresources/user_schemas/methods/create/
    pub async fn upload_api_shield_schema(
        &self,
        rc: &ResourceContainer,
        params: UploadApiShieldSchemaParams,
    ) -> Result<ApiShieldCreateSchemaResult> {
        let zone_id = require_zone(rc)?;

        let uri = format!("/zones/{}/api_gateway/user_schemas", zone_id);
        self.request_multipart(Method::POST, &uri, params.into_form()).await
    }

    pub async fn get_api_shield_schema(&self, rc: &ResourceContainer, schema_id: &str) -> Result<ApiShieldSchema> {
        let zone_id = require_zone(rc)?;
        require_id(schema_id, ValidationError::MissingSchemaId)?;

        let uri = format!("/zones/{}/api_gateway/user_schemas/{}", zone_id, schema_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    pub async fn delete_api_shield_schema(&self, rc: &ResourceContainer, schema_id: &str) -> Result<()> {
        let zone_id = require_zone(rc)?;
        require_id(schema_id, ValidationError::MissingSchemaId)?;

        let uri = format!("/zones/{}/api_gateway/user_schemas/{}", zone_id, schema_id);
        let _: serde_json::Value = self.request_result(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(())
    }
}
