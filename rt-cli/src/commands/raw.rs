//! Raw API calls.

use std::path::PathBuf;

use serde_json::Value;

use rt_api::{Method, RawOptions, Reply};
use rt_core::config::ClientConfig;
use rt_core::error::{RtError, RtResult};

use crate::OutputFormat;

/// Arguments of the `raw` command.
pub struct RawRequest {
    pub method: String,
    pub path: String,
    /// JSON object for the body.
    pub data: Option<String>,
    /// `key=value` pairs.
    pub query: Vec<String>,
    /// `field=path` pairs.
    pub files: Vec<String>,
    pub status: bool,
}

impl RawRequest {
    fn options(&self) -> RtResult<RawOptions> {
        let params = match self.data.as_deref() {
            None => serde_json::Map::new(),
            Some(raw) => match serde_json::from_str::<Value>(raw)? {
                Value::Object(map) => map,
                _ => return Err(RtError::InvalidArgument("--data must be a JSON object".into())),
            },
        };

        let query = self
            .query
            .iter()
            .map(|arg| {
                super::split_pair(arg)
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .ok_or_else(|| RtError::InvalidArgument(format!("expected key=value, got {arg}")))
            })
            .collect::<RtResult<Vec<_>>>()?;

        let files = self
            .files
            .iter()
            .map(|arg| {
                super::split_pair(arg)
                    .map(|(field, path)| (field.to_string(), PathBuf::from(path)))
                    .ok_or_else(|| RtError::InvalidArgument(format!("expected field=path, got {arg}")))
            })
            .collect::<RtResult<Vec<_>>>()?;

        Ok(RawOptions {
            params,
            query,
            files,
            return_code: self.status,
        })
    }
}

pub fn run(config: &ClientConfig, request: RawRequest, format: OutputFormat) -> RtResult<()> {
    let method: Method = request.method.parse()?;
    let options = request.options()?;
    let client = super::create_client(config)?;

    match client.raw().call(method, &request.path, options)? {
        Reply::Status(status) => match format {
            OutputFormat::Json => super::print_json(&serde_json::json!({ "status": status })),
            OutputFormat::Text => println!("{status}"),
        },
        Reply::Json(value) => super::print_json(&value),
    }
    Ok(())
}
