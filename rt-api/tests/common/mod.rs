//! Shared test utilities for integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rt_api::{GatewayError, GatewayRequest, GatewayResponse, HttpGateway, Rutube, Transport};
use serde_json::{json, Value};

pub const TEST_TOKEN: &str = "3f2a9c0d5e";

#[derive(Default)]
struct State {
    responses: VecDeque<Result<GatewayResponse, GatewayError>>,
    requests: Vec<GatewayRequest>,
    defaults: Vec<(String, String)>,
}

/// In-memory gateway that replays queued responses and records every
/// request it receives. Clones share state, so a test keeps one handle
/// while the transport owns another.
#[derive(Clone, Default)]
pub struct ScriptedGateway {
    state: Arc<Mutex<State>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn respond(&self, status: u16, body: &str) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(GatewayResponse::new(status, body)));
        self
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(status, &body.to_string())
    }

    /// Queue a gateway failure.
    pub fn fail(&self, err: GatewayError) -> &Self {
        self.state.lock().unwrap().responses.push_back(Err(err));
        self
    }

    pub fn requests(&self) -> Vec<GatewayRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn last_request(&self) -> GatewayRequest {
        self.requests().pop().expect("no request was sent")
    }

    pub fn default_header(&self, name: &str) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .defaults
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }
}

impl HttpGateway for ScriptedGateway {
    fn send(&self, request: &GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        state
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Connect("no scripted response".into())))
    }

    fn set_user_agent(&mut self, value: &str) {
        self.set_header("User-Agent", value);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        state.defaults.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        state.defaults.push((name.to_string(), value.to_string()));
    }
}

/// Transport against `https://rutube.ru/` over the scripted gateway.
pub fn transport(gateway: &ScriptedGateway) -> Transport {
    Transport::new(Box::new(gateway.clone()), "rutube.ru", true)
}

pub fn client(gateway: &ScriptedGateway) -> Rutube {
    Rutube::with_transport(transport(gateway))
}

/// Client that has already exchanged credentials for `TEST_TOKEN`.
pub fn authorized_client(gateway: &ScriptedGateway) -> Rutube {
    gateway.respond_json(200, json!({"token": TEST_TOKEN}));
    let mut client = client(gateway);
    client.authorize("editor", "secret").expect("authorize failed");
    client
}

/// Video payload as returned by `api/video/{id}/`.
pub fn video_payload() -> Value {
    json!({
        "id": "9a4b1c2d",
        "title": "Evening news",
        "description": "Daily digest",
        "is_hidden": false,
        "video_url": "https://rutube.ru/video/9a4b1c2d/",
        "author": {"id": 12, "name": "Channel One", "avatar_url": "https://pic.rutube.ru/a.jpg"},
        "category": {"id": 13, "name": "News", "category_url": "https://rutube.ru/news/"},
        "pg_rating": {"age": 16, "logo": "16+"},
        "all_tags": []
    })
}
