//! The single request path shared by every resource wrapper.
//!
//! `Transport` resolves an `ApiCall` against the configured host, attaches
//! the session token once `authorize` has succeeded, sends it through the
//! `HttpGateway`, and turns the raw response into either decoded JSON, the
//! bare status code, or an `RtError` chosen by status.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use rt_core::config::{ClientConfig, ServerConfig};
use rt_core::constants::{self, endpoints};
use rt_core::error::{extract_message, ErrorKind, RtError, RtResult};

use crate::gateway::{GatewayRequest, GatewayResponse, HttpGateway, Method, ReqwestGateway};

/// One API request, relative to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    pub method: Method,
    pub path: String,
    pub body: Map<String, Value>,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub files: Vec<(String, PathBuf)>,
    /// Return the status code instead of decoding the body.
    pub status_only: bool,
}

impl ApiCall {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Map::new(),
            query: Vec::new(),
            headers: Vec::new(),
            files: Vec::new(),
            status_only: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Add one body parameter.
    pub fn param(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.body.insert(key.to_string(), value.into());
        self
    }

    /// Merge a parameter map into the body.
    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body.extend(body);
        self
    }

    /// Merge a serializable struct into the body. It must serialize to a
    /// JSON object.
    pub fn json_body<T: Serialize>(self, value: &T) -> RtResult<Self> {
        match serde_json::to_value(value)? {
            Value::Object(map) => Ok(self.body(map)),
            other => Err(RtError::Serialization(format!(
                "request body must be an object, got {other}"
            ))),
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Header sent with this request only, overriding the gateway default.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    /// Attach a local file as a multipart field.
    pub fn file(mut self, field: &str, path: impl Into<PathBuf>) -> Self {
        self.files.push((field.to_string(), path.into()));
        self
    }

    pub fn status_only(mut self) -> Self {
        self.status_only = true;
        self
    }
}

/// Successful outcome of a call.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Decoded body; `Null` for an empty body.
    Json(Value),
    /// Status code of a status-only call.
    Status(u16),
}

impl Reply {
    /// The decoded body; a status-only reply becomes its status as a number.
    pub fn into_json(self) -> Value {
        match self {
            Reply::Json(value) => value,
            Reply::Status(status) => Value::from(status),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Reply::Status(status) => Some(*status),
            Reply::Json(_) => None,
        }
    }
}

/// Owns the gateway and the session token.
pub struct Transport {
    gateway: Box<dyn HttpGateway>,
    /// `{scheme}://{host}/`.
    base_url: String,
    secure: bool,
    /// Set only by a successful `authorize`.
    token: Option<String>,
}

impl Transport {
    /// Transport over an existing gateway.
    pub fn new(gateway: Box<dyn HttpGateway>, host: &str, secure: bool) -> Self {
        let scheme = if secure { "https" } else { "http" };
        Self {
            gateway,
            base_url: format!("{scheme}://{}/", ClientConfig::sanitize_host(host)),
            secure,
            token: None,
        }
    }

    /// Transport over a reqwest gateway built from `config`.
    pub fn from_config(config: &ServerConfig) -> RtResult<Self> {
        let gateway = ReqwestGateway::new(config)?;
        Ok(Self::new(Box::new(gateway), &config.host, config.secure))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub fn gateway_mut(&mut self) -> &mut dyn HttpGateway {
        self.gateway.as_mut()
    }

    /// Replace the user agent for all later requests.
    pub fn set_user_agent(&mut self, value: &str) {
        self.gateway.set_user_agent(value);
    }

    /// Set a header for all later requests.
    pub fn set_header(&mut self, name: &str, value: &str) {
        self.gateway.set_header(name, value);
    }

    /// Exchange credentials for a session token.
    ///
    /// On failure the previous token, if any, is kept.
    pub fn authorize(&mut self, username: &str, password: &str) -> RtResult<&mut Self> {
        let call = ApiCall::post(endpoints::TOKEN_AUTH)
            .param("username", username)
            .param("password", password);
        let response = self.exchange(&call)?;
        let body = decode(&response)?;

        let token = body
            .get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RtError::Decoding {
                status: response.status,
                message: "authorization response carries no token".into(),
            })?;

        self.token = Some(token.to_string());
        info!(user = username, "authorized");
        Ok(self)
    }

    /// Perform a call: decoded body, or the status for status-only calls.
    pub fn execute(&self, call: &ApiCall) -> RtResult<Reply> {
        let response = self.exchange(call)?;
        if call.status_only {
            return Ok(Reply::Status(response.status));
        }
        decode(&response).map(Reply::Json)
    }

    /// Perform a call and return its decoded body.
    pub fn call(&self, call: ApiCall) -> RtResult<Value> {
        self.execute(&call).map(Reply::into_json)
    }

    /// Perform a call and return only its status code.
    pub fn call_status(&self, call: ApiCall) -> RtResult<u16> {
        let response = self.exchange(&call.status_only())?;
        Ok(response.status)
    }

    /// Send the request; any non-2xx status becomes an error.
    fn exchange(&self, call: &ApiCall) -> RtResult<GatewayResponse> {
        let request = self.request(call);
        debug!("{} {}", call.method, call.path);

        let response = self.gateway.send(&request).map_err(|e| {
            warn!("{} {} failed: {e}", call.method, call.path);
            RtError::from(e)
        })?;

        if ErrorKind::from_status(response.status).is_some() {
            let err = RtError::from_status(response.status, extract_message(&response.body));
            warn!(status = response.status, "{} {}: {err}", call.method, call.path);
            return Err(err);
        }
        Ok(response)
    }

    fn request(&self, call: &ApiCall) -> GatewayRequest {
        let mut headers = call.headers.clone();
        if let Some(token) = &self.token {
            headers.push((
                "Authorization".to_string(),
                format!("{} {token}", constants::TOKEN_SCHEME),
            ));
        }
        GatewayRequest {
            method: call.method,
            url: self.url(&call.path),
            headers,
            query: call.query.clone(),
            body: call.body.clone(),
            files: call.files.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Decode a 2xx body. An empty body decodes to `Null`.
fn decode(response: &GatewayResponse) -> RtResult<Value> {
    let body = response.body.trim();
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| RtError::Decoding {
        status: response.status,
        message: e.to_string(),
    })
}
