//
//  cloudflare-client
//  api/resources/zones.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Zones.
//!
//! # Example
//!
//! ```rust,no_run
//! use cloudflare_client::Client;
//!
//! # async fn example() -> cloudflare_client::Result<()> {
//! let client = Client::builder().api_token("token").build().await?;
//! let zone_id = client.zone_id_by_name("example.com").await?;
//! println!("example.com is {}", zone_id);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{Paginated, Query, QueryParams, ResultInfo, DEFAULT_PER_PAGE};
use crate::api::resources::require_id;
use crate::api::{Client, Payload, Result, ValidationError};
use crate::util::to_ascii;

/// A zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,

    /// `active`, `pending`, `initializing`, `moved`, `deleted` or `deactivated`.
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub paused: bool,

    /// `full`, `partial` or `secondary`.
    #[serde(rename = "type", default)]
    pub zone_type: String,

    #[serde(default)]
    pub development_mode: i64,

    #[serde(default)]
    pub name_servers: Vec<String>,

    #[serde(default)]
    pub original_name_servers: Vec<String>,

    #[serde(default)]
    pub account: ZoneAccount,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Account owning a zone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneAccount {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Filters for [`Client::list_zones`].
#[derive(Debug, Clone, Default)]
pub struct ListZonesParams {
    /// Exact zone name. Converted to ASCII before sending.
    pub name: String,
    pub status: String,
    pub account_id: String,
    pub account_name: String,
    pub order: String,
    pub direction: String,
    pub result_info: ResultInfo,
}

impl QueryParams for ListZonesParams {
    fn append_query(&self, query: &mut Query) {
        query
            .push("name", &self.name)
            .push("status", &self.status)
            .push("account.id", &self.account_id)
            .push("account.name", &self.account_name)
            .push("order", &self.order)
            .push("direction", &self.direction)
            .push_pagination(&self.result_info);
    }
}

impl Paginated for ListZonesParams {
    fn result_info(&self) -> &ResultInfo {
        &self.result_info
    }

    fn result_info_mut(&mut self) -> &mut ResultInfo {
        &mut self.result_info
    }
}

impl Client {
    /// Lists zones, following every page unless the caller picked one.
    ///
    /// API reference: https://developers.cloudflare.com/api/resources/zones/methods/list/
    pub async fn list_zones(&self, mut params: ListZonesParams) -> Result<(Vec<Zone>, ResultInfo)> {
        params.name = to_ascii(&params.name);
        self.paginate("/zones", params, DEFAULT_PER_PAGE).await
    }

    /// Fetches a single zone.
    pub async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        require_id(zone_id, ValidationError::MissingZoneId)?;
        let uri = format!("/zones/{}", zone_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    /// Resolves a zone name to its ID.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ZoneNotFound`] when no zone has this name
    /// - [`ValidationError::AmbiguousZoneName`] when several accounts hold it
    pub async fn zone_id_by_name(&self, zone_name: &str) -> Result<String> {
        let params = ListZonesParams {
            name: zone_name.to_string(),
            ..Default::default()
        };
        let (zones, _) = self.list_zones(params).await?;

        match zones.as_slice() {
            [] => Err(ValidationError::ZoneNotFound(zone_name.to_string()).into()),
            [zone] => Ok(zone.id.clone()),
            _ => Err(ValidationError::AmbiguousZoneName(zone_name.to_string()).into()),
        }
    }
}
