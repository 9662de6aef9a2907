//
//  cloudflare-client
//  api/resources/images.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloudflare Images.
//!
//! Uploads are sent as `multipart/form-data` with either an image file or a
//! URL for the service to fetch, never both.
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudflare_client::api::{ImageFile, ResourceContainer, UploadImageParams};
//! use cloudflare_client::Client;
//!
//! # async fn example() -> cloudflare_client::Result<()> {
//! let client = Client::builder().api_token("token").build().await?;
//! let account = ResourceContainer::account_identifier("01a7362d577a6c3019a474fd6f485823");
//!
//! let image = client
//!     .upload_image(&account, UploadImageParams {
//!         file: Some(ImageFile {
//!             name: "logo.png".to_string(),
//!             content: std::fs::read("logo.png").unwrap_or_default(),
//!         }),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("variants: {:?}", image.variants);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::ResourceContainer;
use crate::api::multipart::MultipartForm;
use crate::api::resources::{require_account, require_id};
use crate::api::{Client, Error, Payload, Result, ValidationError};

/// An uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: String,

    #[serde(default)]
    pub filename: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,

    #[serde(rename = "requireSignedURLs", default)]
    pub require_signed_urls: bool,

    /// Delivery URLs, one per variant.
    #[serde(default)]
    pub variants: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded: Option<DateTime<Utc>>,
}

/// Image bytes and the filename to upload them under.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content: Vec<u8>,
}

/// Parameters for [`Client::upload_image`].
#[derive(Debug, Clone, Default)]
pub struct UploadImageParams {
    pub file: Option<ImageFile>,
    /// URL the service fetches the image from.
    pub url: String,
    /// Custom ID; the service picks one when empty.
    pub id: String,
    pub require_signed_urls: bool,
    pub metadata: Option<serde_json::Value>,
}

impl UploadImageParams {
    fn into_form(self) -> Result<MultipartForm> {
        let mut form = MultipartForm::new();
        match (self.file, self.url.is_empty()) {
            (Some(_), false) => return Err(ValidationError::UploadUrlAndFileMutuallyExclusive.into()),
            (None, true) => return Err(ValidationError::MissingUploadSource.into()),
            (Some(file), true) => {
                form.file("file", &file.name, &file.content);
            }
            (None, false) => {
                form.text("url", &self.url);
            }
        }

        if !self.id.is_empty() {
            form.text("id", &self.id);
        }
        if self.require_signed_urls {
            form.text("requireSignedURLs", "true");
        }
        if let Some(metadata) = &self.metadata {
            let encoded = serde_json::to_string(metadata).map_err(Error::Marshal)?;
            form.text("metadata", &encoded);
        }
        Ok(form)
    }
}

impl Client {
    /// Uploads an image from bytes or from a URL.
    ///
    /// API reference: https://developers.cloudflare.com/api/resources/images/subresources/v1/methods/create/
    pub async fn upload_image(&self, rc: &ResourceContainer, params: UploadImageParams) -> Result<Image> {
        let account_id = require_account(rc)?;
        let form = params.into_form()?;

        let uri = format!("/accounts/{}/images/v1", account_id);
        self.request_multipart(Method::POST, &uri, form).await
    }

    pub async fn get_image(&self, rc: &ResourceContainer, image_id: &str) -> Result<Image> {
        let account_id = require_account(rc)?;
        require_id(image_id, ValidationError::MissingImageId)?;

        let uri = format!("/accounts/{}/images/v1/{}", account_id, image_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    /// Downloads the original image bytes.
    pub async fn get_base_image(&self, rc: &ResourceContainer, image_id: &str) -> Result<Vec<u8>> {
        let account_id = require_account(rc)?;
        require_id(image_id, ValidationError::MissingImageId)?;

        let uri = format!("/accounts/{}/images/v1/{}/blob", account_id, image_id);
        self.request(Method::GET, &uri, Payload::Empty).await
    }

    pub async fn delete_image(&self, rc: &ResourceContainer, image_id: &str) -> Result<()> {
        let account_id = require_account(rc)?;
        require_id(image_id, ValidationError::MissingImageId)?;

        let uri = format!("/accounts/{}/images/v1/{}", account_id, image_id);
        let _: serde_json::Value = self.request_result(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(())
    }
}
