//
//  cloudflare-client
//  api/resources/tunnels.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Cloudflare Tunnels (`cfd_tunnel`).
//!
//! Covers tunnel listing and lookup, creation and deletion, and the remotely
//! managed ingress configuration. Durations inside the configuration travel
//! as whole seconds; see [`TunnelDuration`].

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::api::common::{Paginated, Query, QueryParams, ResourceContainer, ResultInfo, TUNNELS_PER_PAGE};
use crate::api::resources::{require_account, require_id};
use crate::api::{Client, Payload, Result, ValidationError};

/// A duration encoded in JSON as integer seconds.
///
/// Sub-second precision is dropped on encode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TunnelDuration(pub Duration);

impl TunnelDuration {
    pub fn from_secs(secs: u64) -> Self {
        Self(Duration::from_secs(secs))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl From<Duration> for TunnelDuration {
    fn from(duration: Duration) -> Self {
        Self(duration)
    }
}

impl fmt::Display for TunnelDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0.as_secs())
    }
}

impl Serialize for TunnelDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.0.as_secs())
    }
}

impl<'de> Deserialize<'de> for TunnelDuration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        u64::deserialize(deserializer).map(Self::from_secs)
    }
}

/// A tunnel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tunnel {
    pub id: String,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub connections: Vec<TunnelConnection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conns_active_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conns_inactive_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tun_type: String,

    /// `inactive`, `degraded`, `healthy` or `down`.
    #[serde(default)]
    pub status: String,

    /// True when the configuration is managed through the API.
    #[serde(default)]
    pub remote_config: bool,
}

/// One edge connection of a tunnel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TunnelConnection {
    #[serde(default)]
    pub colo_name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub is_pending_reconnect: bool,
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub origin_ip: String,
}

/// Filters for [`Client::list_tunnels`].
#[derive(Debug, Clone, Default)]
pub struct ListTunnelsParams {
    pub name: String,
    pub uuid: String,
    pub is_deleted: Option<bool>,
    pub existed_at: Option<DateTime<Utc>>,
    pub include_prefix: String,
    pub exclude_prefix: String,
    pub result_info: ResultInfo,
}

impl QueryParams for ListTunnelsParams {
    fn append_query(&self, query: &mut Query) {
        query
            .push("name", &self.name)
            .push("uuid", &self.uuid)
            .push_opt("is_deleted", &self.is_deleted)
            .push_opt("existed_at", &self.existed_at)
            .push("include_prefix", &self.include_prefix)
            .push("exclude_prefix", &self.exclude_prefix)
            .push_pagination(&self.result_info);
    }
}

impl Paginated for ListTunnelsParams {
    fn result_info(&self) -> &ResultInfo {
        &self.result_info
    }

    fn result_info_mut(&mut self) -> &mut ResultInfo {
        &mut self.result_info
    }
}

/// Body of [`Client::create_tunnel`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTunnelParams {
    pub name: String,

    /// Base64-encoded 32+ byte secret. Omitted for remotely managed tunnels
    /// created with `config_src: "cloudflare"`.
    #[serde(rename = "tunnel_secret", skip_serializing_if = "String::is_empty")]
    pub secret: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub config_src: String,
}

/// Remotely managed tunnel configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TunnelConfiguration {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ingress: Vec<IngressRule>,

    #[serde(rename = "warp-routing", default, skip_serializing_if = "Option::is_none")]
    pub warp_routing: Option<WarpRoutingConfig>,

    #[serde(rename = "originRequest", default)]
    pub origin_request: OriginRequestConfig,
}

/// Maps a hostname and path to a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngressRule {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,

    /// e.g. `http://localhost:8080` or `http_status:404`.
    pub service: String,

    #[serde(rename = "originRequest", default, skip_serializing_if = "Option::is_none")]
    pub origin_request: Option<OriginRequestConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarpRoutingConfig {
    #[serde(default)]
    pub enabled: bool,
}

/// How the connector reaches an origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginRequestConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<TunnelDuration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_timeout: Option<TunnelDuration>,

    #[serde(rename = "tcpKeepAlive", default, skip_serializing_if = "Option::is_none")]
    pub tcp_keep_alive: Option<TunnelDuration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_happy_eyeballs: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive_connections: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keep_alive_timeout: Option<TunnelDuration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_host_header: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_server_name: Option<String>,

    #[serde(rename = "caPool", default, skip_serializing_if = "Option::is_none")]
    pub ca_pool: Option<String>,

    #[serde(rename = "noTLSVerify", default, skip_serializing_if = "Option::is_none")]
    pub no_tls_verify: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_chunked_encoding: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_type: Option<String>,

    #[serde(rename = "http2Origin", default, skip_serializing_if = "Option::is_none")]
    pub http2_origin: Option<bool>,
}

/// Configuration as stored remotely, with its version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TunnelConfigurationResult {
    #[serde(default)]
    pub tunnel_id: String,

    #[serde(default)]
    pub config: TunnelConfiguration,

    #[serde(default)]
    pub version: u64,
}

#[derive(Serialize)]
struct UpdateConfigurationBody<'a> {
    config: &'a TunnelConfiguration,
}

impl Client {
    /// Lists tunnels, following every page unless the caller picked one.
    ///
    /// API reference: https://developers.cloudflare.com/api/resources/zero_trust/subresources/tunnels/methods/list/
    pub async fn list_tunnels(
        &self,
        rc: &ResourceContainer,
        params: ListTunnelsParams,
    ) -> Result<(Vec<Tunnel>, ResultInfo)> {
        let account_id = require_account(rc)?;
        let path = format!("/accounts/{}/cfd_tunnel", account_id);
        self.paginate(&path, params, TUNNELS_PER_PAGE).await
    }

    pub async fn get_tunnel(&self, rc: &ResourceContainer, tunnel_id: &str) -> Result<Tunnel> {
        let account_id = require_account(rc)?;
        require_id(tunnel_id, ValidationError::MissingTunnelId)?;

        let uri = format!("/accounts/{}/cfd_tunnel/{}", account_id, tunnel_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    pub async fn create_tunnel(&self, rc: &ResourceContainer, params: CreateTunnelParams) -> Result<Tunnel> {
        let account_id = require_account(rc)?;

        let uri = format!("/accounts/{}/cfd_tunnel", account_id);
        self.request_result(Method::POST, &uri, Payload::json(&params)?).await
    }

    /// Deletes a tunnel. Active connections must be cleaned up first.
    pub async fn delete_tunnel(&self, rc: &ResourceContainer, tunnel_id: &str) -> Result<()> {
        let account_id = require_account(rc)?;
        require_id(tunnel_id, ValidationError::MissingTunnelId)?;

        let uri = format!("/accounts/{}/cfd_tunnel/{}", account_id, tunnel_id);
        let _: serde_json::Value = self.request_result(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(())
    }

    pub async fn get_tunnel_configuration(
        &self,
        rc: &ResourceContainer,
        tunnel_id: &str,
    ) -> Result<TunnelConfigurationResult> {
        let account_id = require_account(rc)?;
        require_id(tunnel_id, ValidationError::MissingTunnelId)?;

        let uri = format!("/accounts/{}/cfd_tunnel/{}/configurations", account_id, tunnel_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    /// Replaces the remotely managed configuration.
    pub async fn update_tunnel_configuration(
        &self,
        rc: &ResourceContainer,
        tunnel_id: &str,
        config: &TunnelConfiguration,
    ) -> Result<TunnelConfigurationResult> {
        let account_id = require_account(rc)?;
        require_id(tunnel_id, ValidationError::MissingTunnelId)?;

        let uri = format!("/accounts/{}/cfd_tunnel/{}/configurations", account_id, tunnel_id);
        let body = Payload::json(&UpdateConfigurationBody { config })?;
        self.request_result(Method::PUT, &uri, body).await
    }
}
