//
//  cloudflare-client
//  api/resources/stream.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloudflare Stream.
//!
//! # Resumable Uploads
//!
//! [`Client::stream_initiate_tus_video_upload`] starts a tus upload. The
//! request has no body; everything travels in headers:
//!
//! | Header | Value |
//! |--------|-------|
//! | `Tus-Resumable` | `1.0.0`, the only supported version |
//! | `Upload-Length` | total size in bytes |
//! | `Upload-Creator` | optional creator ID |
//! | `Upload-Metadata` | comma-separated `key base64(value)` pairs |
//!
//! The service answers `201 Created` with no envelope. The upload URL is in
//! the `Location` header of the returned [`TusUploadResponse`].
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudflare_client::api::{ResourceContainer, TusUploadMetadata, TusUploadParams};
//! use cloudflare_client::Client;
//!
//! # async fn example() -> cloudflare_client::Result<()> {
//! let client = Client::builder().api_token("token").build().await?;
//! let account = ResourceContainer::account_identifier("01a7362d577a6c3019a474fd6f485823");
//!
//! let upload = client
//!     .stream_initiate_tus_video_upload(&account, TusUploadParams {
//!         upload_length: 16384,
//!         metadata: TusUploadMetadata {
//!             name: "v.mp4".to_string(),
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("upload to {:?}", upload.location());
//! # Ok(())
//! # }
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{build_uri, Query, ResourceContainer};
use crate::api::resources::{require_account, require_id};
use crate::api::{Client, Error, Payload, Result, ValidationError};

/// The only tus protocol version the service accepts.
pub const TUS_PROTOCOL_VERSION: &str = "1.0.0";

/// Header carrying the new video's UID on tus responses.
pub const STREAM_MEDIA_ID: &str = "stream-media-id";

/// A video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamVideo {
    pub uid: String,

    #[serde(default)]
    pub creator: String,

    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub thumbnail_timestamp_pct: f64,

    #[serde(default)]
    pub ready_to_stream: bool,

    #[serde(default)]
    pub status: StreamVideoStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_deletion: Option<DateTime<Utc>>,

    /// Bytes.
    #[serde(default)]
    pub size: i64,

    /// Seconds; -1 while unknown.
    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub preview: String,

    #[serde(default)]
    pub allowed_origins: Vec<String>,

    #[serde(rename = "requireSignedURLs", default)]
    pub require_signed_urls: bool,

    #[serde(default)]
    pub playback: StreamVideoPlayback,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamVideoStatus {
    #[serde(default)]
    pub state: String,

    #[serde(default)]
    pub pct_complete: String,

    #[serde(default)]
    pub error_reason_code: String,

    #[serde(default)]
    pub error_reason_text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamVideoPlayback {
    #[serde(default)]
    pub hls: String,

    #[serde(default)]
    pub dash: String,
}

/// Body of [`Client::stream_upload_from_url`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamUploadFromUrlParams {
    pub url: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub creator: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_timestamp_pct: Option<f64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_origins: Vec<String>,

    #[serde(rename = "requireSignedURLs", skip_serializing_if = "Option::is_none")]
    pub require_signed_urls: Option<bool>,

    /// UID of a watermark profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<StreamWatermarkRef>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_deletion: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamWatermarkRef {
    pub uid: String,
}

/// Parameters for [`Client::stream_initiate_tus_video_upload`].
#[derive(Debug, Clone, PartialEq)]
pub struct TusUploadParams {
    /// Must be [`TUS_PROTOCOL_VERSION`].
    pub tus_resumable: String,
    pub upload_length: u64,
    pub upload_creator: String,
    /// Adds `direct_user=true` to the query string.
    pub direct_user: bool,
    pub metadata: TusUploadMetadata,
}

impl Default for TusUploadParams {
    fn default() -> Self {
        Self {
            tus_resumable: TUS_PROTOCOL_VERSION.to_string(),
            upload_length: 0,
            upload_creator: String::new(),
            direct_user: false,
            metadata: TusUploadMetadata::default(),
        }
    }
}

/// Values carried in the `Upload-Metadata` header. Zero values are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TusUploadMetadata {
    pub name: String,
    pub max_duration_seconds: u32,
    pub require_signed_urls: bool,
    /// Comma-separated origins.
    pub allowed_origins: String,
    pub thumbnail_timestamp_pct: f64,
    pub scheduled_deletion: Option<DateTime<Utc>>,
    pub expiry: Option<DateTime<Utc>>,
    /// Watermark profile UID.
    pub watermark: String,
}

impl TusUploadMetadata {
    /// Renders the `Upload-Metadata` value.
    ///
    /// Flags appear as a bare key; every other value is base64-encoded.
    pub fn to_header_value(&self) -> String {
        fn pair(key: &str, value: &str) -> String {
            format!("{} {}", key, STANDARD.encode(value))
        }

        let mut pairs = Vec::new();
        if !self.name.is_empty() {
            pairs.push(pair("name", &self.name));
        }
        if self.max_duration_seconds != 0 {
            pairs.push(pair("maxDurationSeconds", &self.max_duration_seconds.to_string()));
        }
        if self.require_signed_urls {
            pairs.push("requiresignedurls".to_string());
        }
        if !self.allowed_origins.is_empty() {
            pairs.push(pair("allowedorigins", &self.allowed_origins));
        }
        if self.thumbnail_timestamp_pct != 0.0 {
            pairs.push(pair("thumbnailtimestamppct", &self.thumbnail_timestamp_pct.to_string()));
        }
        if let Some(at) = self.scheduled_deletion {
            pairs.push(pair("scheduledDeletion", &at.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if let Some(at) = self.expiry {
            pairs.push(pair("expiry", &at.to_rfc3339_opts(SecondsFormat::Secs, true)));
        }
        if !self.watermark.is_empty() {
            pairs.push(pair("watermark", &self.watermark));
        }
        pairs.join(",")
    }
}

/// Headers of a successful tus initiation.
#[derive(Debug, Clone)]
pub struct TusUploadResponse {
    pub headers: HeaderMap,
}

impl TusUploadResponse {
    /// URL to send the video bytes to.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// UID the video will have once uploaded.
    pub fn stream_media_id(&self) -> Option<&str> {
        self.headers.get(STREAM_MEDIA_ID).and_then(|v| v.to_str().ok())
    }
}

impl TusUploadParams {
    fn headers(&self) -> Result<HeaderMap> {
        if self.tus_resumable != TUS_PROTOCOL_VERSION {
            return Err(Error::InvalidTusResumable);
        }

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("tus-resumable"),
            HeaderValue::from_static(TUS_PROTOCOL_VERSION),
        );
        headers.insert(HeaderName::from_static("upload-length"), HeaderValue::from(self.upload_length));
        if !self.upload_creator.is_empty() {
            let creator = HeaderValue::from_str(&self.upload_creator)
                .map_err(|_| Error::InvalidHeader("Upload-Creator contains invalid characters".to_string()))?;
            headers.insert(HeaderName::from_static("upload-creator"), creator);
        }
        let metadata = self.metadata.to_header_value();
        if !metadata.is_empty() {
            let metadata = HeaderValue::from_str(&metadata)
                .map_err(|_| Error::InvalidHeader("Upload-Metadata contains invalid characters".to_string()))?;
            headers.insert(HeaderName::from_static("upload-metadata"), metadata);
        }
        Ok(headers)
    }
}

impl Client {
    /// Starts a resumable upload.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidTusResumable`] when the protocol version is not `1.0.0`
    /// - [`Error::InvalidStatusCode`] when the service answers anything but 201
    pub async fn stream_initiate_tus_video_upload(
        &self,
        rc: &ResourceContainer,
        params: TusUploadParams,
    ) -> Result<TusUploadResponse> {
        let account_id = require_account(rc)?;
        let headers = params.headers()?;

        let mut query = Query::new();
        query.push("direct_user", &params.direct_user);
        let uri = build_uri(&format!("/accounts/{}/stream", account_id), &query);

        let raw = self.send(Method::POST, &uri, Payload::Empty, Some(&headers)).await?;
        if raw.status != 201 {
            return Err(Error::InvalidStatusCode(raw.status));
        }
        Ok(TusUploadResponse { headers: raw.headers })
    }

    /// Asks the service to fetch a video from a URL.
    pub async fn stream_upload_from_url(
        &self,
        rc: &ResourceContainer,
        params: StreamUploadFromUrlParams,
    ) -> Result<StreamVideo> {
        let account_id = require_account(rc)?;
        require_id(&params.url, ValidationError::MissingUploadUrl)?;

        let uri = format!("/accounts/{}/stream/copy", account_id);
        self.request_result(Method::POST, &uri, Payload::json(&params)?).await
    }

    pub async fn stream_get_video(&self, rc: &ResourceContainer, video_id: &str) -> Result<StreamVideo> {
        let account_id = require_account(rc)?;
        require_id(video_id, ValidationError::MissingVideoId)?;

        let uri = format!("/accounts/{}/stream/{}", account_id, video_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    /// Returns the HTML snippet that embeds the player.
    pub async fn stream_embed_html(&self, rc: &ResourceContainer, video_id: &str) -> Result<String> {
        let account_id = require_account(rc)?;
        require_id(video_id, ValidationError::MissingVideoId)?;

        let uri = format!("/accounts/{}/stream/{}/embed", account_id, video_id);
        let body = self.request(Method::GET, &uri, Payload::Empty).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    pub async fn stream_delete_video(&self, rc: &ResourceContainer, video_id: &str) -> Result<()> {
        let account_id = require_account(rc)?;
        require_id(video_id, ValidationError::MissingVideoId)?;

        let uri = format!("/accounts/{}/stream/{}", account_id, video_id);
        self.request(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(())
    }
}
