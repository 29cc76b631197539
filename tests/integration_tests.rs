//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: operations → resolver → pagination →
//! HTTP requests, asserting exactly which calls reach the server.

use cf_ops::config::Config;
use cf_ops::http::{HttpClient, HttpClientConfig};
use cf_ops::operations::{GetQuotaRequest, OrganizationAdmin, SetQuotaRequest, ServiceInstances};
use cf_ops::pagination::paginate;
use cf_ops::resolve::{AmbiguityPolicy, Resolution, Resolver};
use cf_ops::types::BackoffType;
use cf_ops::v2::ListOrganizationsRequest;
use cf_ops::Error;
use futures::{StreamExt, TryStreamExt};
use serde_json::{json, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpClient {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .bearer_token("test-token")
        .backoff(
            BackoffType::Constant,
            Duration::from_millis(1),
            Duration::from_millis(1),
        )
        .no_rate_limit()
        .build();
    HttpClient::with_config(config).unwrap()
}

fn resource(id: &str, entity: Value) -> Value {
    json!({
        "metadata": {
            "guid": id,
            "url": format!("/v2/resources/{id}"),
            "created_at": "2016-01-26T22:20:04Z",
            "updated_at": null
        },
        "entity": entity
    })
}

fn page(resources: Vec<Value>, total_pages: u32, total_results: u64) -> Value {
    json!({
        "total_results": total_results,
        "total_pages": total_pages,
        "prev_url": null,
        "next_url": null,
        "resources": resources
    })
}

fn quota(id: &str, name: &str) -> Value {
    resource(
        id,
        json!({
            "name": name,
            "non_basic_services_allowed": true,
            "total_services": 100,
            "total_routes": 1000,
            "memory_limit": 10240,
            "instance_memory_limit": -1,
            "app_instance_limit": -1
        }),
    )
}

fn organization(id: &str, name: &str) -> Value {
    resource(id, json!({ "name": name, "status": "active" }))
}

async fn mount_quota_lookup(server: &MockServer, name: &str, resources: Vec<Value>) {
    let total = resources.len() as u64;
    Mock::given(method("GET"))
        .and(path("/v2/quota_definitions"))
        .and(query_param("q", format!("name:{name}")))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(resources, 1, total)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_organization_lookup(server: &MockServer, name: &str, resources: Vec<Value>) {
    let total = resources.len() as u64;
    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("q", format!("name:{name}")))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(resources, 1, total)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_update(server: &MockServer, expected_calls: u64) {
    Mock::given(method("PUT"))
        .and(path("/v2/organizations/test-organization-id"))
        .and(body_json(json!({ "quota_definition_guid": "test-quota-id" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(resource(
            "test-organization-id",
            json!({
                "name": "test-organization",
                "quota_definition_guid": "test-quota-id"
            }),
        )))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ============================================================================
// Organization Admin
// ============================================================================

#[tokio::test]
async fn test_get_quota_end_to_end() {
    let server = MockServer::start().await;
    mount_quota_lookup(&server, "test-quota", vec![quota("test-quota-id", "test-quota")]).await;

    let admin = OrganizationAdmin::new(client(&server));
    let quota = admin
        .get_quota(&GetQuotaRequest::new("test-quota"))
        .await
        .unwrap();

    assert_eq!(quota.id, "test-quota-id");
    assert_eq!(quota.name, "test-quota");
    assert!(quota.allow_paid_service_plans);
    assert_eq!(quota.application_instance_limit, -1);
}

#[tokio::test]
async fn test_get_quota_not_found_end_to_end() {
    let server = MockServer::start().await;
    mount_quota_lookup(&server, "test-quota-not-found", vec![]).await;

    let admin = OrganizationAdmin::new(client(&server));
    let err = admin
        .get_quota(&GetQuotaRequest::new("test-quota-not-found"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Quota test-quota-not-found does not exist");
}

#[tokio::test]
async fn test_set_quota_end_to_end() {
    let server = MockServer::start().await;
    mount_quota_lookup(&server, "test-quota", vec![quota("test-quota-id", "test-quota")]).await;
    mount_organization_lookup(
        &server,
        "test-organization",
        vec![organization("test-organization-id", "test-organization")],
    )
    .await;
    mount_update(&server, 1).await;

    let admin = OrganizationAdmin::new(client(&server));
    let updated = admin
        .set_quota(&SetQuotaRequest::new("test-organization", "test-quota"))
        .await
        .unwrap();

    assert_eq!(updated.entity.name, "test-organization");
}

#[tokio::test]
async fn test_set_quota_organization_not_found_never_updates() {
    let server = MockServer::start().await;
    mount_quota_lookup(&server, "test-quota", vec![quota("test-quota-id", "test-quota")]).await;
    mount_organization_lookup(&server, "test-organization-not-found", vec![]).await;
    mount_update(&server, 0).await;

    let admin = OrganizationAdmin::new(client(&server));
    let err = admin
        .set_quota(&SetQuotaRequest::new(
            "test-organization-not-found",
            "test-quota",
        ))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Organization test-organization-not-found does not exist"
    );
}

#[tokio::test]
async fn test_set_quota_quota_not_found_stops_first() {
    let server = MockServer::start().await;
    mount_quota_lookup(&server, "test-quota-not-found", vec![]).await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], 1, 0)))
        .expect(0)
        .mount(&server)
        .await;
    mount_update(&server, 0).await;

    let admin = OrganizationAdmin::new(client(&server));
    let err = admin
        .set_quota(&SetQuotaRequest::new(
            "test-organization",
            "test-quota-not-found",
        ))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Quota test-quota-not-found does not exist");
}

#[tokio::test]
async fn test_list_quotas_walks_pages() {
    let server = MockServer::start().await;

    for (number, name) in [(1, "small"), (2, "medium"), (3, "large")] {
        Mock::given(method("GET"))
            .and(path("/v2/quota_definitions"))
            .and(query_param("page", number.to_string()))
            .and(query_param_is_missing("q"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                vec![quota(&format!("{name}-id"), name)],
                3,
                3,
            )))
            .expect(1)
            .mount(&server)
            .await;
    }

    let admin = OrganizationAdmin::new(client(&server));
    let names: Vec<String> = admin
        .list_quotas()
        .map_ok(|quota| quota.name)
        .try_collect()
        .await
        .unwrap();

    assert_eq!(names, vec!["small", "medium", "large"]);
}

// ============================================================================
// Resolver
// ============================================================================

async fn mount_three_org_pages(server: &MockServer, pages: [Vec<Value>; 3]) {
    for (index, resources) in pages.into_iter().enumerate() {
        Mock::given(method("GET"))
            .and(path("/v2/organizations"))
            .and(query_param("page", (index + 1).to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(resources, 3, 3)))
            .expect(1)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_client_scan_fetches_every_page_for_single_match() {
    let server = MockServer::start().await;
    mount_three_org_pages(
        &server,
        [
            vec![organization("o-1", "alpha")],
            vec![organization("o-2", "target")],
            vec![organization("o-3", "omega")],
        ],
    )
    .await;

    let org = Resolver::client_scan()
        .resolve(&client(&server), &ListOrganizationsRequest::new(), "target")
        .await
        .unwrap()
        .found()
        .unwrap();

    assert_eq!(org.id(), "o-2");
}

#[tokio::test]
async fn test_client_scan_exhaust_counts_all_matches() {
    let server = MockServer::start().await;
    mount_three_org_pages(
        &server,
        [
            vec![organization("o-1", "dup")],
            vec![organization("o-2", "dup")],
            vec![organization("o-3", "dup")],
        ],
    )
    .await;

    let resolution = Resolver::client_scan()
        .with_policy(AmbiguityPolicy::Exhaust)
        .resolve(&client(&server), &ListOrganizationsRequest::new(), "dup")
        .await
        .unwrap();

    assert_eq!(resolution.map(|org| org.metadata.id), Resolution::Ambiguous(3));
}

#[tokio::test]
async fn test_server_filter_issues_one_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("q", "name:test-organization"))
        .and(header("Authorization", "bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![organization("test-organization-id", "test-organization")],
            1,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let resolution = Resolver::new()
        .resolve(
            &client(&server),
            &ListOrganizationsRequest::new(),
            "test-organization",
        )
        .await
        .unwrap();

    assert!(resolution.is_found());
}

#[tokio::test]
async fn test_server_error_surfaces_as_transport_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "code": 10003,
            "error_code": "CF-NotAuthorized"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = Resolver::new()
        .resolve(&client(&server), &ListOrganizationsRequest::new(), "any")
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(matches!(err, Error::HttpStatus { status: 403, .. }));
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_paginate_stops_when_consumer_stops() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![organization("o-1", "a"), organization("o-2", "b")],
            5,
            10,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/organizations"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], 5, 10)))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let request = ListOrganizationsRequest::new();
    let first: Vec<_> = paginate(&client, &request).take(2).collect().await;

    assert_eq!(first.len(), 2);
}

#[tokio::test]
async fn test_cancelled_resolution_issues_no_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], 1, 0)))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    token.cancel();
    let instances = ServiceInstances::new(client(&server)).with_cancellation(token);

    let err = instances.get("db").await.unwrap_err();

    assert!(matches!(err, Error::Cancelled));
}

// ============================================================================
// Configuration
// ============================================================================

#[tokio::test]
async fn test_config_drives_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/service_instances"))
        .and(query_param("q", "name:db"))
        .and(query_param("results-per-page", "7"))
        .and(header("Authorization", "bearer from-config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![resource("si-1", json!({ "name": "db", "tags": [] }))],
            1,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let yaml = format!(
        "api_url: {}\ntoken: from-config\nresults_per_page: 7\nhttp:\n  rate_limit: null\n",
        server.uri()
    );
    let config = Config::from_yaml_str(&yaml).unwrap();
    let client = HttpClient::with_config(config.to_http_config()).unwrap();

    let instance = ServiceInstances::new(client).get("db").await.unwrap();

    assert_eq!(instance.id, "si-1");
}
