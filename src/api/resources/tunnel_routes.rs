//
//  cloudflare-client
//  api/resources/tunnel_routes.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Private network routes through tunnels (`teamnet/routes`).

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{build_uri, Query, QueryParams, ResourceContainer};
use crate::api::resources::{path_escape, require_account, require_id};
use crate::api::{Client, Payload, Result, ValidationError};

/// A route from a network to a tunnel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TunnelRoute {
    /// CIDR, e.g. `10.0.0.0/16`.
    pub network: String,

    #[serde(default)]
    pub tunnel_id: String,

    #[serde(default)]
    pub tunnel_name: String,

    #[serde(default)]
    pub comment: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub virtual_network_id: String,
}

/// Filters for [`Client::list_tunnel_routes`].
#[derive(Debug, Clone, Default)]
pub struct ListTunnelRoutesParams {
    pub tunnel_id: String,
    pub comment: String,
    pub is_deleted: Option<bool>,
    pub network_subset: String,
    pub network_superset: String,
    pub existed_at: Option<DateTime<Utc>>,
    pub virtual_network_id: String,
}

impl QueryParams for ListTunnelRoutesParams {
    fn append_query(&self, query: &mut Query) {
        query
            .push("tunnel_id", &self.tunnel_id)
            .push("comment", &self.comment)
            .push_opt("is_deleted", &self.is_deleted)
            .push("network_subset", &self.network_subset)
            .push("network_superset", &self.network_superset)
            .push_opt("existed_at", &self.existed_at)
            .push("virtual_network_id", &self.virtual_network_id);
    }
}

/// Body of [`Client::create_tunnel_route`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateTunnelRouteParams {
    #[serde(skip)]
    pub network: String,

    pub tunnel_id: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub virtual_network_id: String,
}

impl Client {
    pub async fn list_tunnel_routes(
        &self,
        rc: &ResourceContainer,
        params: &ListTunnelRoutesParams,
    ) -> Result<Vec<TunnelRoute>> {
        let account_id = require_account(rc)?;
        let uri = build_uri(&format!("/accounts/{}/teamnet/routes", account_id), params);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    /// Finds the route that matches a single IP address.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidIpContainsCidr`] when `ip` is a network
    /// rather than an address.
    pub async fn get_tunnel_route_for_ip(
        &self,
        rc: &ResourceContainer,
        ip: &str,
        virtual_network_id: &str,
    ) -> Result<TunnelRoute> {
        let account_id = require_account(rc)?;
        if ip.contains('/') {
            return Err(ValidationError::InvalidIpContainsCidr(ip.to_string()).into());
        }

        let mut query = Query::new();
        query.push("virtual_network_id", &virtual_network_id);
        let path = format!("/accounts/{}/teamnet/routes/ip/{}", account_id, path_escape(ip));
        self.request_result(Method::GET, &build_uri(&path, &query), Payload::Empty)
            .await
    }

    pub async fn create_tunnel_route(
        &self,
        rc: &ResourceContainer,
        params: CreateTunnelRouteParams,
    ) -> Result<TunnelRoute> {
        let account_id = require_account(rc)?;
        require_id(&params.tunnel_id, ValidationError::MissingTunnelId)?;

        let uri = format!(
            "/accounts/{}/teamnet/routes/network/{}",
            account_id,
            path_escape(&params.network)
        );
        self.request_result(Method::POST, &uri, Payload::json(&params)?).await
    }

    pub async fn delete_tunnel_route(
        &self,
        rc: &ResourceContainer,
        network: &str,
        virtual_network_id: &str,
    ) -> Result<()> {
        let account_id = require_account(rc)?;

        let mut query = Query::new();
        query.push("virtual_network_id", &virtual_network_id);
        let path = format!(
            "/accounts/{}/teamnet/routes/network/{}",
            account_id,
            path_escape(network)
        );
        let _: serde_json::Value = self
            .request_result(Method::DELETE, &build_uri(&path, &query), Payload::Empty)
            .await?;
        Ok(())
    }
}
