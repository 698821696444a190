//! CLI command implementations.

pub mod auth;
pub mod raw;
pub mod show;
pub mod video;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

use rt_api::Rutube;
use rt_core::config::ClientConfig;
use rt_core::error::RtResult;

/// Helper to create an API client from config. Authorizes when credentials
/// are configured.
pub fn create_client(config: &ClientConfig) -> RtResult<Rutube> {
    Rutube::new(config)
}

/// Spinner shown while a slow request is in flight.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("  {spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_json(value: &Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

/// Truncate a string to a maximum number of characters, appending an
/// ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

/// Split a `key=value` argument.
pub fn split_pair(arg: &str) -> Option<(&str, &str)> {
    arg.split_once('=').filter(|(k, _)| !k.is_empty())
}
