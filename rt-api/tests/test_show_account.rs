//! Integration tests for show catalogue and account endpoints, and for the
//! root client's startup authorization.

mod common;

use common::{ScriptedGateway, TEST_TOKEN};
use rt_api::{Method, Rutube};
use rt_core::error::ErrorKind;
use rt_models::{Model, Paginated};
use serde_json::json;

// ---- Shows ----

#[test]
fn list_show_sends_paging_and_hydrates_results() {
    let gateway = ScriptedGateway::new();
    let client = common::client(&gateway);
    gateway.respond_json(
        200,
        json!({
            "has_next": true,
            "next": "https://rutube.ru/api/metainfo/tv/?limit=2&page=2",
            "previous": null,
            "page": 1,
            "per_page": 2,
            "results": [
                {"id": 7, "name": "Comedy Woman", "countries": [], "genres": [{"id": 3, "name": "Comedy"}]},
                {"id": 8, "name": "Quiz", "isActive": 1}
            ]
        }),
    );

    let shows = client.show().list_show(1, 2).unwrap();
    let request = gateway.last_request();
    assert_eq!(request.method, Method::Get);
    assert_eq!(request.url, "https://rutube.ru/api/metainfo/tv/");
    assert_eq!(request.query_param("page"), Some("1"));
    assert_eq!(request.query_param("limit"), Some("2"));
    assert_eq!(request.query_param("search"), None);

    assert!(shows.has_next());
    assert_eq!(shows.page(), Some(1));
    assert_eq!(shows.result_count(), 2);
    let results = shows.results();
    assert_eq!(results[0].name(), Some("Comedy Woman"));
    assert_eq!(results[0].genres().len(), 1);
    assert!(!results[0].is_active());
    assert!(results[1].is_active());

    let projected = shows.to_json();
    assert!(projected["results"][0].get("countries").is_none());
    assert!(projected["results"][0].get("genres").is_some());
}

#[test]
fn search_show_adds_search_query() {
    let gateway = ScriptedGateway::new();
    let client = common::client(&gateway);
    gateway.respond_json(200, json!({"has_next": 0, "results": []}));

    let shows = client.show().search_show("comedy", 3, 10).unwrap();
    let request = gateway.last_request();
    assert_eq!(request.query_param("search"), Some("comedy"));
    assert_eq!(request.query_param("page"), Some("3"));
    assert_eq!(request.query_param("limit"), Some("10"));
    assert!(!shows.has_next());
    assert!(shows.results().is_empty());
}

#[test]
fn first_page_uses_default_limit() {
    let gateway = ScriptedGateway::new();
    let client = common::client(&gateway);
    gateway.respond_json(200, json!({}));

    let shows = client.show().first_page().unwrap();
    assert_eq!(gateway.last_request().query_param("limit"), Some("20"));
    assert_eq!(shows.result_count(), 0);
}

// ---- Account ----

#[test]
fn change_password_sends_confirmation() {
    let gateway = ScriptedGateway::new();
    let client = common::authorized_client(&gateway);
    gateway.respond_json(200, json!({"status": "ok"}));

    let result = client.account().change_password("old-secret", "new-secret").unwrap();
    assert_eq!(result, json!({"status": "ok"}));

    let request = gateway.last_request();
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.url, "https://rutube.ru/api/accounts/edit/password/");
    assert_eq!(
        serde_json::Value::Object(request.body),
        json!({"current_pass": "old-secret", "new_pass": "new-secret", "again_pass": "new-secret"})
    );
}

#[test]
fn change_password_unauthorized() {
    let gateway = ScriptedGateway::new();
    let client = common::client(&gateway);
    gateway.respond(401, r#"{"detail":"Authentication credentials were not provided."}"#);

    let err = client.account().change_password("a", "b").unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Unauthorized));
}

// ---- Root client ----

#[test]
fn connect_with_credentials_authorizes() {
    let gateway = ScriptedGateway::new();
    gateway.respond_json(200, json!({"token": TEST_TOKEN}));

    let client = Rutube::connect(common::transport(&gateway), Some(("editor", "secret"))).unwrap();
    assert!(client.is_authorized());
    assert!(client.is_secure());
    assert_eq!(gateway.request_count(), 1);
}

#[test]
fn connect_with_bad_credentials_fails() {
    let gateway = ScriptedGateway::new();
    gateway.respond(400, r#"{"non_field_errors":["Unable to log in."]}"#);

    let err = Rutube::connect(common::transport(&gateway), Some(("editor", "wrong")))
        .err()
        .unwrap();
    assert_eq!(err.kind(), Some(ErrorKind::BadRequest));
}

#[test]
fn connect_without_credentials_sends_nothing() {
    let gateway = ScriptedGateway::new();
    let client = Rutube::connect(common::transport(&gateway), None).unwrap();
    assert!(!client.is_authorized());
    assert_eq!(gateway.request_count(), 0);
}
