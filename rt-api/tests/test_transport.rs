//! Integration tests for the transport.
//!
//! Tests status-to-error mapping, error messages, token handling,
//! status-only calls, body decoding, gateway failures and raw calls.

mod common;

use common::{ScriptedGateway, TEST_TOKEN};
use rt_api::{ApiCall, GatewayError, Method, RawOptions, Reply};
use rt_core::error::{ErrorKind, RtError};
use serde_json::{json, Value};

// ---- Status mapping ----

#[test]
fn non_success_statuses_map_to_error_kinds() {
    let cases = [
        (400, ErrorKind::BadRequest),
        (401, ErrorKind::Unauthorized),
        (403, ErrorKind::Forbidden),
        (404, ErrorKind::NotFound),
        (405, ErrorKind::MethodNotAllowed),
        (500, ErrorKind::ServerError),
        (502, ErrorKind::ServerError),
        (503, ErrorKind::ServerError),
        (302, ErrorKind::ServerError),
        (409, ErrorKind::ServerError),
    ];

    for (status, kind) in cases {
        let gateway = ScriptedGateway::new();
        gateway.respond(status, "");
        let transport = common::transport(&gateway);

        let err = transport.call(ApiCall::get("api/video/x/")).unwrap_err();
        assert_eq!(err.kind(), Some(kind), "status {status}");
        assert_eq!(err.status(), Some(status), "status {status}");
    }
}

#[test]
fn success_statuses_decode_body() {
    for status in [200, 201, 202] {
        let gateway = ScriptedGateway::new();
        gateway.respond_json(status, json!({"id": "abc"}));
        let transport = common::transport(&gateway);
        assert_eq!(
            transport.call(ApiCall::get("api/video/abc/")).unwrap(),
            json!({"id": "abc"})
        );
    }
}

#[test]
fn status_only_mode_still_raises_on_errors() {
    let gateway = ScriptedGateway::new();
    gateway.respond(404, r#"{"detail":"Not found."}"#);
    let transport = common::transport(&gateway);

    let err = transport.call_status(ApiCall::delete("api/video/missing")).unwrap_err();
    assert!(err.is_not_found());
}

// ---- Error messages ----

#[test]
fn error_message_prefers_body_message() {
    let gateway = ScriptedGateway::new();
    gateway.respond(400, r#"{"message":"url is invalid"}"#);
    gateway.respond(403, r#"{"detail":"You do not have permission."}"#);
    gateway.respond(500, "upstream exploded");
    gateway.respond(404, "");
    let transport = common::transport(&gateway);

    let messages: Vec<String> = (0..4)
        .map(|_| match transport.call(ApiCall::get("api/video/")).unwrap_err() {
            RtError::BadRequest { message, .. }
            | RtError::Forbidden { message, .. }
            | RtError::ServerError { message, .. }
            | RtError::NotFound { message, .. } => message,
            other => panic!("unexpected error: {other}"),
        })
        .collect();

    assert_eq!(
        messages,
        vec![
            "url is invalid".to_string(),
            "You do not have permission.".to_string(),
            "upstream exploded".to_string(),
            "Not Found".to_string(),
        ]
    );
}

// ---- Decoding ----

#[test]
fn invalid_json_on_success_is_decoding_error() {
    let gateway = ScriptedGateway::new();
    gateway.respond(200, "<html>maintenance</html>");
    let transport = common::transport(&gateway);

    let err = transport.call(ApiCall::get("api/video/x/")).unwrap_err();
    assert_eq!(err.kind(), Some(ErrorKind::Decoding));
    assert_eq!(err.status(), Some(200));
}

#[test]
fn empty_success_body_decodes_to_null() {
    let gateway = ScriptedGateway::new();
    gateway.respond(204, "");
    let transport = common::transport(&gateway);

    assert_eq!(
        transport.call(ApiCall::delete("api/video/publication/x/")).unwrap(),
        Value::Null
    );
}

#[test]
fn status_only_returns_code_without_decoding() {
    let gateway = ScriptedGateway::new();
    gateway.respond(204, "this is not json");
    gateway.respond(200, "");
    let transport = common::transport(&gateway);

    assert_eq!(transport.call_status(ApiCall::delete("api/video/a")).unwrap(), 204);
    assert_eq!(
        transport.execute(&ApiCall::delete("api/video/b").status_only()).unwrap(),
        Reply::Status(200)
    );
}

// ---- Gateway failures ----

#[test]
fn gateway_failures_are_connection_errors() {
    let gateway = ScriptedGateway::new();
    gateway.fail(GatewayError::Timeout("30s elapsed".into()));
    gateway.fail(GatewayError::Connect("connection refused".into()));
    let transport = common::transport(&gateway);

    for _ in 0..2 {
        let err = transport.call(ApiCall::get("api/video/x/")).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::Connection));
        assert_eq!(err.status(), None);
    }
}

// ---- Authorization ----

#[test]
fn authorize_stores_token_and_sends_it() {
    let gateway = ScriptedGateway::new();
    gateway.respond_json(200, json!({"token": TEST_TOKEN}));
    gateway.respond_json(200, json!({}));
    let mut transport = common::transport(&gateway);

    assert!(!transport.has_token());
    transport.authorize("editor", "secret").unwrap();
    assert!(transport.has_token());

    let auth_request = &gateway.requests()[0];
    assert_eq!(auth_request.method, Method::Post);
    assert_eq!(auth_request.url, "https://rutube.ru/api/accounts/token_auth/");
    assert_eq!(auth_request.body.get("username"), Some(&json!("editor")));
    assert_eq!(auth_request.body.get("password"), Some(&json!("secret")));
    assert!(auth_request.header("Authorization").is_none());

    transport.call(ApiCall::get("api/video/x/")).unwrap();
    assert_eq!(
        gateway.last_request().header("Authorization"),
        Some(format!("Token {TEST_TOKEN}").as_str())
    );
}

#[test]
fn failed_authorize_leaves_no_token() {
    let gateway = ScriptedGateway::new();
    gateway.respond(400, r#"{"non_field_errors":["Unable to log in."]}"#);
    let mut transport = common::transport(&gateway);

    let err = transport.authorize("editor", "wrong").err().unwrap();
    assert_eq!(err.kind(), Some(ErrorKind::BadRequest));
    assert!(!transport.has_token());
}

#[test]
fn failed_reauthorize_keeps_previous_token() {
    let gateway = ScriptedGateway::new();
    gateway.respond_json(200, json!({"token": TEST_TOKEN}));
    gateway.respond(401, "");
    gateway.respond_json(200, json!({}));
    let mut transport = common::transport(&gateway);

    transport.authorize("editor", "secret").unwrap();
    assert!(transport.authorize("editor", "expired").is_err());
    assert!(transport.has_token());

    transport.call(ApiCall::get("api/video/x/")).unwrap();
    assert_eq!(
        gateway.last_request().header("Authorization"),
        Some(format!("Token {TEST_TOKEN}").as_str())
    );
}

#[test]
fn anonymous_requests_carry_no_token() {
    let gateway = ScriptedGateway::new();
    gateway.respond_json(200, json!({}));
    let transport = common::transport(&gateway);

    transport.call(ApiCall::get("api/metainfo/tv/")).unwrap();
    assert!(gateway.last_request().header("Authorization").is_none());
}

// ---- Gateway defaults ----

#[test]
fn transport_forwards_default_headers_to_gateway() {
    let gateway = ScriptedGateway::new();
    let mut transport = common::transport(&gateway);

    transport.set_user_agent("player/2.0");
    transport.set_header("X-Real-IP", "10.0.0.1");
    assert_eq!(gateway.default_header("user-agent").as_deref(), Some("player/2.0"));
    assert_eq!(gateway.default_header("x-real-ip").as_deref(), Some("10.0.0.1"));
}

// ---- Raw calls ----

#[test]
fn raw_call_passes_options_through() {
    let gateway = ScriptedGateway::new();
    gateway.respond_json(200, json!({"results": []}));
    gateway.respond(204, "");
    let client = common::client(&gateway);

    let options = RawOptions {
        query: vec![("page".into(), "2".into())],
        ..RawOptions::default()
    };
    let reply = client.raw().call(Method::Get, "api/video/person/", options).unwrap();
    assert_eq!(reply, Reply::Json(json!({"results": []})));
    let request = gateway.last_request();
    assert_eq!(request.url, "https://rutube.ru/api/video/person/");
    assert_eq!(request.query_param("page"), Some("2"));

    let mut params = serde_json::Map::new();
    params.insert("title".into(), json!("New"));
    let options = RawOptions {
        params,
        return_code: true,
        ..RawOptions::default()
    };
    let reply = client.raw().call(Method::Patch, "api/video/abc", options).unwrap();
    assert_eq!(reply.status(), Some(204));
    assert_eq!(gateway.last_request().body.get("title"), Some(&json!("New")));
}
