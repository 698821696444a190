//! Root client.

use tracing::info;

use rt_core::config::ClientConfig;
use rt_core::error::RtResult;

use crate::endpoints::{Account, Raw, Show, Video};
use crate::transport::Transport;

/// Entry point to the API. Owns the transport and hands out resource
/// wrappers borrowing it.
pub struct Rutube {
    transport: Transport,
}

impl Rutube {
    /// Build a client from configuration, authorizing right away when
    /// credentials are configured.
    pub fn new(config: &ClientConfig) -> RtResult<Self> {
        let transport = Transport::from_config(&config.server)?;
        info!(base_url = transport.base_url(), "client created");
        Self::connect(transport, config.auth.credentials())
    }

    /// Client over an existing transport, authorizing when `credentials`
    /// are given.
    pub fn connect(transport: Transport, credentials: Option<(&str, &str)>) -> RtResult<Self> {
        let mut client = Self::with_transport(transport);
        if let Some((username, password)) = credentials {
            client.authorize(username, password)?;
        }
        Ok(client)
    }

    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn authorize(&mut self, username: &str, password: &str) -> RtResult<()> {
        self.transport.authorize(username, password)?;
        Ok(())
    }

    pub fn is_authorized(&self) -> bool {
        self.transport.has_token()
    }

    pub fn is_secure(&self) -> bool {
        self.transport.is_secure()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn video(&self) -> Video<'_> {
        Video::new(&self.transport)
    }

    pub fn show(&self) -> Show<'_> {
        Show::new(&self.transport)
    }

    pub fn account(&self) -> Account<'_> {
        Account::new(&self.transport)
    }

    pub fn raw(&self) -> Raw<'_> {
        Raw::new(&self.transport)
    }
}
