//
//  cloudflare-client
//  api/resources/access_groups.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Zero Trust Access groups.
//!
//! Groups are available at both account and zone level; every method takes
//! either kind of [`ResourceContainer`].
//!
//! # Membership Rules
//!
//! | Kind | Value |
//! |------|-------|
//! | `email` | address |
//! | `email_domain` | domain |
//! | `everyone` | ignored |
//! | `ip` | address or CIDR |
//! | `group` | Access group ID |
//! | `service_token` | service token ID |
//! | `any_valid_service_token` | ignored |
//! | `geo` | country code |
//! | `certificate` | ignored |
//! | `common_name` | certificate common name |
//! | `auth_method` | AMR method, e.g. `mfa` |

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::common::{Paginated, Query, QueryParams, ResourceContainer, ResultInfo, DEFAULT_PER_PAGE};
use crate::api::resources::{require_id, require_scope, IdResult};
use crate::api::{Client, Payload, Result, ValidationError};

/// A single membership rule, encoded as `{"<kind>": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessRule {
    Email { email: String },
    EmailDomain { domain: String },
    Everyone {},
    Ip { ip: String },
    Group { id: String },
    ServiceToken { token_id: String },
    AnyValidServiceToken {},
    Geo { country_code: String },
    Certificate {},
    CommonName { common_name: String },
    AuthMethod { auth_method: String },
}

impl AccessRule {
    /// Builds a rule from its kind name and value.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnsupportedMembershipKind`] for an unknown kind.
    pub fn from_kind(kind: &str, value: &str) -> Result<Self> {
        let value = value.to_string();
        let rule = match kind {
            "email" => Self::Email { email: value },
            "email_domain" => Self::EmailDomain { domain: value },
            "everyone" => Self::Everyone {},
            "ip" => Self::Ip { ip: value },
            "group" => Self::Group { id: value },
            "service_token" => Self::ServiceToken { token_id: value },
            "any_valid_service_token" => Self::AnyValidServiceToken {},
            "geo" => Self::Geo { country_code: value },
            "certificate" => Self::Certificate {},
            "common_name" => Self::CommonName { common_name: value },
            "auth_method" => Self::AuthMethod { auth_method: value },
            other => return Err(ValidationError::UnsupportedMembershipKind(other.to_string()).into()),
        };
        Ok(rule)
    }
}

/// An Access group.
///
/// Rules are kept untyped on the way back because the service returns kinds
/// this crate does not model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccessGroup {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub include: Vec<serde_json::Value>,

    #[serde(default)]
    pub exclude: Vec<serde_json::Value>,

    #[serde(default)]
    pub require: Vec<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of [`Client::create_access_group`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAccessGroupParams {
    pub name: String,

    pub include: Vec<AccessRule>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<AccessRule>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub require: Vec<AccessRule>,
}

/// Parameters for [`Client::list_access_groups`].
#[derive(Debug, Clone, Default)]
pub struct ListAccessGroupsParams {
    pub result_info: ResultInfo,
}

impl QueryParams for ListAccessGroupsParams {
    fn append_query(&self, query: &mut Query) {
        query.push_pagination(&self.result_info);
    }
}

impl Paginated for ListAccessGroupsParams {
    fn result_info(&self) -> &ResultInfo {
        &self.result_info
    }

    fn result_info_mut(&mut self) -> &mut ResultInfo {
        &mut self.result_info
    }
}

impl Client {
    pub async fn list_access_groups(
        &self,
        rc: &ResourceContainer,
        params: ListAccessGroupsParams,
    ) -> Result<(Vec<AccessGroup>, ResultInfo)> {
        let scope = require_scope(rc)?;
        let path = format!("/{}/access/groups", scope);
        self.paginate(&path, params, DEFAULT_PER_PAGE).await
    }

    pub async fn get_access_group(&self, rc: &ResourceContainer, group_id: &str) -> Result<AccessGroup> {
        let scope = require_scope(rc)?;
        require_id(group_id, ValidationError::MissingAccessGroupId)?;

        let uri = format!("/{}/access/groups/{}", scope, group_id);
        self.request_result(Method::GET, &uri, Payload::Empty).await
    }

    pub async fn create_access_group(
        &self,
        rc: &ResourceContainer,
        params: CreateAccessGroupParams,
    ) -> Result<AccessGroup> {
        let scope = require_scope(rc)?;

        let uri = format!("/{}/access/groups", scope);
        self.request_result(Method::POST, &uri, Payload::json(&params)?).await
    }

    pub async fn delete_access_group(&self, rc: &ResourceContainer, group_id: &str) -> Result<()> {
        let scope = require_scope(rc)?;
        require_id(group_id, ValidationError::MissingAccessGroupId)?;

        let uri = format!("/{}/access/groups/{}", scope, group_id);
        let _: IdResult = self.request_result(Method::DELETE, &uri, Payload::Empty).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Error;

    #[test]
    fn test_rule_encoding() {
        let rules = vec![
            AccessRule::from_kind("email", "test@example.com").unwrap(),
            AccessRule::from_kind("everyone", "").unwrap(),
            AccessRule::from_kind("auth_method", "mfa").unwrap(),
        ];
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            serde_json::json!([
                {"email": {"email": "test@example.com"}},
                {"everyone": {}},
                {"auth_method": {"auth_method": "mfa"}}
            ])
        );
    }

    #[test]
    fn test_unsupported_kind() {
        let err = AccessRule::from_kind("okta", "group-a").unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnsupportedMembershipKind(ref kind)) if kind == "okta"
        ));
        assert_eq!(err.to_string(), "unsupported membership kind: okta");
    }

    #[test]
    fn test_create_body() {
        let params = CreateAccessGroupParams {
            name: "engineers".to_string(),
            include: vec![AccessRule::from_kind("email_domain", "example.com").unwrap()],
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_string(&params).unwrap(),
            r#"{"name":"engineers","include":[{"email_domain":{"domain":"example.com"}}]}"#
        );
    }
}
