//
//  cloudflare-client
//  tests/resources.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

mod common;

use cloudflare_client::api::{
    AccessRule, CreateAccessGroupParams, CreateTunnelRouteParams, ListAccessGroupsParams,
    ListOriginCertificatesParams, ListTunnelRoutesParams, ListTunnelsParams, ListWebAnalyticsSitesParams,
    ResourceContainer, ValidationError,
};
use cloudflare_client::Error;
use mockito::{Matcher, Server};

use common::{client, envelope, page, ACCOUNT_ID, ZONE_ID};

fn account() -> ResourceContainer {
    ResourceContainer::account_identifier(ACCOUNT_ID)
}

#[tokio::test]
async fn test_list_tunnels_uses_account_page_size() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/accounts/{}/cfd_tunnel", ACCOUNT_ID).as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("is_deleted".into(), "false".into()),
            Matcher::UrlEncoded("per_page".into(), "100".into()),
        ]))
        .with_body(page(
            serde_json::json!([{
                "id": "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415",
                "name": "blog",
                "tun_type": "cfd_tunnel",
                "status": "healthy",
                "connections": [{"colo_name": "DFW", "id": "1bedc50d", "is_pending_reconnect": false}]
            }]),
            1,
            100,
            1,
        ))
        .expect(1)
        .create_async()
        .await;

    let (tunnels, _) = client(&server)
        .await
        .list_tunnels(&account(), ListTunnelsParams {
            is_deleted: Some(false),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(tunnels[0].connections[0].colo_name, "DFW");
}

#[tokio::test]
async fn test_tunnels_require_an_account() {
    let server = Server::new_async().await;
    let err = client(&server)
        .await
        .list_tunnels(&ResourceContainer::zone_identifier(ZONE_ID), ListTunnelsParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::RequiredAccountLevel)));
}

#[tokio::test]
async fn test_tunnel_route_for_ip() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "GET",
            format!("/accounts/{}/teamnet/routes/ip/10.1.0.137", ACCOUNT_ID).as_str(),
        )
        .match_query(Matcher::UrlEncoded("virtual_network_id".into(), "vnet-1".into()))
        .with_body(envelope(serde_json::json!({
            "network": "10.1.0.0/16",
            "tunnel_id": "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415",
            "virtual_network_id": "vnet-1"
        })))
        .expect(1)
        .create_async()
        .await;

    let route = client(&server)
        .await
        .get_tunnel_route_for_ip(&account(), "10.1.0.137", "vnet-1")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(route.network, "10.1.0.0/16");
}

#[tokio::test]
async fn test_create_tunnel_route_escapes_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            format!("/accounts/{}/teamnet/routes/network/10.1.0.0%2F16", ACCOUNT_ID).as_str(),
        )
        .match_body(Matcher::JsonString(
            r#"{"tunnel_id": "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415"}"#.to_string(),
        ))
        .with_body(envelope(serde_json::json!({
            "network": "10.1.0.0/16",
            "tunnel_id": "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415"
        })))
        .expect(1)
        .create_async()
        .await;

    client(&server)
        .await
        .create_tunnel_route(&account(), CreateTunnelRouteParams {
            network: "10.1.0.0/16".to_string(),
            tunnel_id: "f70ff985-a4ef-4643-bbbc-4a0ed4fc8415".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_tunnel_routes() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/accounts/{}/teamnet/routes", ACCOUNT_ID).as_str())
        .match_query(Matcher::UrlEncoded("tunnel_id".into(), "t1".into()))
        .with_body(envelope(serde_json::json!([
            {"network": "10.1.0.0/16", "tunnel_id": "t1"},
            {"network": "10.2.0.0/16", "tunnel_id": "t1"}
        ])))
        .create_async()
        .await;

    let routes = client(&server)
        .await
        .list_tunnel_routes(&account(), &ListTunnelRoutesParams {
            tunnel_id: "t1".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(routes.len(), 2);
}

#[tokio::test]
async fn test_list_web_analytics_sites_page_size() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", format!("/accounts/{}/rum/site_info/list", ACCOUNT_ID).as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("per_page".into(), "10".into()),
        ]))
        .with_body(page(
            serde_json::json!([{"site_tag": "023e105f4ecef8ad9ca31a8372d0c353", "host": "example.com"}]),
            1,
            10,
            1,
        ))
        .expect(1)
        .create_async()
        .await;

    let (sites, _) = client(&server)
        .await
        .list_web_analytics_sites(&account(), ListWebAnalyticsSitesParams::default())
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(sites[0].host, "example.com");
}

#[tokio::test]
async fn test_list_origin_ca_certificates() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/certificates")
        .match_query(Matcher::UrlEncoded("zone_id".into(), ZONE_ID.into()))
        .with_body(envelope(serde_json::json!([{
            "id": "328578533902268680",
            "certificate": "-----BEGIN CERTIFICATE-----",
            "hostnames": ["example.com"],
            "expires_on": "2032-08-27 15:12:00 +0000 UTC",
            "request_type": "origin-rsa",
            "requested_validity": 5475
        }])))
        .expect(1)
        .create_async()
        .await;

    let certs = client(&server)
        .await
        .list_origin_ca_certificates(ListOriginCertificatesParams {
            zone_id: ZONE_ID.to_string(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(certs[0].expires_on.to_rfc3339(), "2032-08-27T15:12:00+00:00");
}

#[tokio::test]
async fn test_origin_ca_requires_zone() {
    let server = Server::new_async().await;
    let err = client(&server)
        .await
        .list_origin_ca_certificates(ListOriginCertificatesParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::MissingZoneId)));
}

#[tokio::test]
async fn test_access_groups_at_zone_level() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", format!("/zones/{}/access/groups", ZONE_ID).as_str())
        .match_query(Matcher::UrlEncoded("per_page".into(), "20".into()))
        .with_body(page(
            serde_json::json!([{"id": "g1", "name": "engineers", "include": [{"email_domain": {"domain": "example.com"}}]}]),
            1,
            20,
            1,
        ))
        .expect(1)
        .create_async()
        .await;
    let create = server
        .mock("POST", format!("/zones/{}/access/groups", ZONE_ID).as_str())
        .match_body(Matcher::PartialJsonString(
            r#"{"name": "admins", "include": [{"group": {"id": "g1"}}]}"#.to_string(),
        ))
        .with_body(envelope(serde_json::json!({"id": "g2", "name": "admins"})))
        .expect(1)
        .create_async()
        .await;

    let client = client(&server).await;
    let zone = ResourceContainer::zone_identifier(ZONE_ID);

    let (groups, _) = client
        .list_access_groups(&zone, ListAccessGroupsParams::default())
        .await
        .unwrap();
    assert_eq!(groups[0].include.len(), 1);

    let group = client
        .create_access_group(&zone, CreateAccessGroupParams {
            name: "admins".to_string(),
            include: vec![AccessRule::from_kind("group", "g1").unwrap()],
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(group.id, "g2");

    list.assert_async().await;
    create.assert_async().await;
}
