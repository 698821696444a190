//! HTTP gateway abstraction and its reqwest implementation.
//!
//! The transport never talks to reqwest directly. It hands a fully
//! resolved `GatewayRequest` to an `HttpGateway` and gets back the raw
//! status and body, so tests can swap in a scripted gateway.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::blocking::{multipart, Client};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use rt_core::config::ServerConfig;
use rt_core::constants;
use rt_core::error::{RtError, RtResult};

/// HTTP verbs accepted by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(RtError::InvalidArgument(format!("unsupported HTTP method: {other}"))),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One fully resolved outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayRequest {
    pub method: Method,
    /// Absolute URL without the query string.
    pub url: String,
    /// Per-request headers; they override the gateway's defaults.
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// Body parameters. Sent as JSON, or as multipart text fields when
    /// `files` is non-empty.
    pub body: Map<String, Value>,
    /// Multipart file fields: (field name, local path).
    pub files: Vec<(String, PathBuf)>,
}

impl GatewayRequest {
    /// Value of a per-request header, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Value of a query parameter.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw outcome of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

impl GatewayResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failure to obtain any response at all.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("cannot read upload file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<GatewayError> for RtError {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::File { path, source } => RtError::Io(std::io::Error::new(
                source.kind(),
                format!("{}: {source}", path.display()),
            )),
            other => RtError::Connection(other.to_string()),
        }
    }
}

/// Performs HTTP exchanges on behalf of the transport.
pub trait HttpGateway: Send + Sync {
    /// Perform one exchange. Any status counts as a response; only a
    /// failure to get one is an error.
    fn send(&self, request: &GatewayRequest) -> Result<GatewayResponse, GatewayError>;

    /// Replace the default user agent.
    fn set_user_agent(&mut self, value: &str);

    /// Set a default header sent with every request, replacing any previous
    /// value for the same name.
    fn set_header(&mut self, name: &str, value: &str);
}

/// Blocking reqwest gateway.
pub struct ReqwestGateway {
    inner: Client,
    timeout: Duration,
    /// Default headers, user agent included.
    headers: Vec<(String, String)>,
}

impl ReqwestGateway {
    /// Build a gateway from server configuration.
    pub fn new(config: &ServerConfig) -> RtResult<Self> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let inner = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(15))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| RtError::Config(format!("failed to build HTTP client: {e}")))?;

        let mut gateway = Self {
            inner,
            timeout,
            headers: Vec::new(),
        };
        gateway.set_user_agent(
            &config
                .user_agent
                .clone()
                .unwrap_or_else(constants::default_user_agent),
        );
        if let Some(ip) = &config.real_ip {
            gateway.set_header(constants::REAL_IP_HEADER, ip);
        }
        for (k, v) in config.custom_headers.iter() {
            gateway.set_header(k, v);
        }
        Ok(gateway)
    }

    /// Current default value of a header.
    pub fn default_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Defaults overlaid with the request's own headers.
    fn header_map(&self, request: &GatewayRequest) -> Result<HeaderMap, GatewayError> {
        let mut map = HeaderMap::new();
        for (key, value) in self.headers.iter().chain(request.headers.iter()) {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| GatewayError::Request(format!("invalid header name {key}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| GatewayError::Request(format!("invalid value for header {key}: {e}")))?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

impl HttpGateway for ReqwestGateway {
    fn send(&self, request: &GatewayRequest) -> Result<GatewayResponse, GatewayError> {
        let mut builder = self
            .inner
            .request(request.method.into(), &request.url)
            .timeout(self.timeout)
            .headers(self.header_map(request)?);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if !request.files.is_empty() {
            debug!("{} {} (multipart, {} file(s))", request.method, request.url, request.files.len());
            builder = builder.multipart(multipart_form(request)?);
        } else if !request.body.is_empty() {
            builder = builder.json(&request.body);
        }

        let response = builder.send().map_err(classify_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(classify_error)?;
        Ok(GatewayResponse { status, body })
    }

    fn set_user_agent(&mut self, value: &str) {
        self.set_header(USER_AGENT.as_str(), value);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
            Some(slot) => slot.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }
}

/// Body parameters as text fields plus one part per file.
fn multipart_form(request: &GatewayRequest) -> Result<multipart::Form, GatewayError> {
    let mut form = multipart::Form::new();
    for (key, value) in request.body.iter() {
        form = form.text(key.clone(), form_text(value));
    }
    for (field, path) in request.files.iter() {
        form = form.file(field.clone(), path).map_err(|source| GatewayError::File {
            path: path.clone(),
            source,
        })?;
    }
    Ok(form)
}

/// Text encoding of a body parameter inside a multipart form.
fn form_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => String::from(if *b { "1" } else { "0" }),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Classify a reqwest error into a GatewayError variant.
fn classify_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout(e.to_string())
    } else if e.is_connect() {
        GatewayError::Connect(e.to_string())
    } else {
        GatewayError::Request(e.to_string())
    }
}
