//! Account endpoints.

use serde_json::Value;

use rt_core::constants::endpoints;
use rt_core::error::RtResult;

use crate::endpoints::require;
use crate::transport::{ApiCall, Transport};

/// Account operations. All of them need an authorized transport.
pub struct Account<'a> {
    transport: &'a Transport,
}

impl<'a> Account<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Change the password of the authorized user.
    pub fn change_password(&self, current: &str, new: &str) -> RtResult<Value> {
        require("new_pass", new)?;
        let call = ApiCall::put(endpoints::CHANGE_PASSWORD)
            .param("current_pass", current)
            .param("new_pass", new)
            .param("again_pass", new);
        self.transport.call(call)
    }
}
