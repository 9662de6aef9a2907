//
//  cloudflare-client
//  api/resources/web_analytics.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Web Analytics sites (`rum/site_info`).

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{
    Paginated, Query, QueryParams, ResourceContainer, ResultInfo, WEB_ANALYTICS_PER_PAGE,
};
use crate::api::resources::{require_account, require_id};
use crate::api::{Client, Payload, Result, ValidationError};

/// A Web Analytics site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebAnalyticsSite {
    pub site_tag: String,

    #[serde(default)]
    pub site_token: String,

    /// Set for sites that are not proxied through a Cloudflare zone.
    #[serde(default)]
    pub host: String,

    #[serde(default)]
    pub auto_install: bool,

    /// JavaScript snippet to embed.
    #[serde(default)]
    pub snippet: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,

    #[serde(default)]
    pub rules: Vec<WebAnalyticsRule>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ruleset: Option<WebAnalyticsRuleset>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAnalyticsRule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub paths: Vec<String>,
    #[serde(default)]
    pub inclusive: bool,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(default)]
    pub priority: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAnalyticsRuleset {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub zone_tag: String,
    #[serde(default)]
    pub zone_name: String,
    #[serde(default)]
    pub enabled: bool,
}

/// Parameters for [`Client::list_web_analytics_sites`].
#[derive(Debug, Clone, Default)]
pub struct ListWebAnalyticsSitesParams {
    /// `host` or `created`.
    pub order_by: String,
    pub result_info: ResultInfo,
}

impl QueryParams for ListWebAnalyticsSitesParams {
    fn append_query(&self, query: &mut Query) {
        query
            .push("order_by", &self.order_by)
            .push_pagination(&self.result_info);
    }
}

impl Paginated for ListWebAnalyticsSitesParams {
    fn result_info(&self) -> &ResultInfo {
        &self.result_info
    }

    fn result_info_mut(&mut self) -> &mut ResultInfo {
        &mut self.result_info
    }
}

/// Body of [`Client::create_web_analytics_site`]. Give either a host or a
/// zone tag.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateWebAnalyticsSiteParams {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub zone_tag: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_install: Option<bool>,
}

#[derive(Deserialize)]
struct SiteTagResult {
    site_tag: String,
}

impl Client {
    /// Lists sites, following every page unless the caller picked one.
    pub async fn list_web_analytics_sites(
        &self,
        rc: &ResourceContainer,
        params: ListWebAnalyticsSitesParams,
    ) -> Result<(Vec<WebAnalyticsSite>, ResultInfo)> {
        let account_id = require_account(rc)?;
        let path = format!("/accounts/{}/rum/site_info/list", account_id);
        self.paginate(&path, params, WEB_ANALYTICS_PER_PAGE).await
    }

    pub async fn get_web_analytics_site(
        &self,
        rc: &ResourceContainer,
        site_tag: &str,
    ) -> Result<WebAnalyticsSite> {
        let account_id = require_account(rc)?;
        require_id(site_tag, ValidationError::MissingSiteTag)?;

        let uri = format!("/accounts/{}/rum/site_info/{}", account_id, site_tag);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    pub async fn create_web_analytics_site(
        &self,
        rc: &ResourceContainer,
        params: CreateWebAnalyticsSiteParams,
    ) -> Result<WebAnalyticsSite> {
        let account_id = require_account(rc)?;

        let uri = format!("/accounts/{}/rum/site_info", account_id);
        self.request_result(Method::POST, &uri, Payload::json(&params)?).await
    }

    /// Deletes a site, returning the deleted site tag.
    pub async fn delete_web_analytics_site(&self, rc: &ResourceContainer, site_tag: &str) -> Result<String> {
        let account_id = require_account(rc)?;
        require_id(site_tag, ValidationError::MissingSiteTag)?;

        let uri = format!("/accounts/{}/rum/site_info/{}", account_id, site_tag);
        let result: SiteTagResult = self.request_result(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(result.site_tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_deserialize() {
        let site: WebAnalyticsSite = serde_json::from_str(
            r#"{
                "site_tag": "023e105f4ecef8ad9ca31a8372d0c353",
                "site_token": "023e105f4ecef8ad9ca31a8372d0c353",
                "auto_install": true,
                "created": "2014-01-01T05:20:00.12345Z",
                "rules": [{"id": "r1", "host": "example.com", "paths": ["*"], "inclusive": true, "is_paused": false, "priority": 1000}],
                "ruleset": {"id": "rs1", "zone_tag": "z1", "zone_name": "example.com", "enabled": true}
            }"#,
        )
        .unwrap();
        assert!(site.auto_install);
        assert_eq!(site.rules[0].paths, vec!["*".to_string()]);
        assert_eq!(site.ruleset.unwrap().zone_name, "example.com");
    }

    #[test]
    fn test_create_body() {
        let params = CreateWebAnalyticsSiteParams {
            host: "example.com".to_string(),
            auto_install: Some(false),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"host":"example.com","auto_install":false}"#
        );
    }
}
