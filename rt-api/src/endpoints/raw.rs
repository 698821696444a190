//! Direct access to any API path.

use std::path::PathBuf;

use serde_json::{Map, Value};

use rt_core::error::RtResult;

use crate::gateway::Method;
use crate::transport::{ApiCall, Reply, Transport};

/// Options for a raw call.
#[derive(Debug, Clone, Default)]
pub struct RawOptions {
    /// Body parameters.
    pub params: Map<String, Value>,
    pub query: Vec<(String, String)>,
    /// Multipart files: (field name, local path).
    pub files: Vec<(String, PathBuf)>,
    /// Return the status code instead of the decoded body.
    pub return_code: bool,
}

/// Unwrapped calls for endpoints without a typed wrapper.
pub struct Raw<'a> {
    transport: &'a Transport,
}

impl<'a> Raw<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Call `path` (e.g. `api/video/person/`) with the given options.
    pub fn call(&self, method: Method, path: &str, options: RawOptions) -> RtResult<Reply> {
        let mut call = ApiCall::new(method, path).body(options.params);
        call.query = options.query;
        call.files = options.files;
        call.status_only = options.return_code;
        self.transport.execute(&call)
    }
}
