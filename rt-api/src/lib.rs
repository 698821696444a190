//! Rutube API - blocking HTTP client for the Rutube REST API.
//!
//! The `Transport` turns an `ApiCall` into one gateway exchange, attaches
//! the session token, maps non-2xx statuses onto `RtError` and decodes the
//! body. Resource wrappers (`Video`, `Show`, `Account`, `Raw`) borrow a
//! transport and hydrate responses into `rt-models` types. `Rutube` ties it
//! together from a `ClientConfig`.

pub mod client;
pub mod endpoints;
pub mod gateway;
pub mod transport;

// Re-export key types
pub use client::Rutube;
pub use endpoints::{Account, PlayOptions, Raw, RawOptions, Show, UploadParams, Video, VideoUpdate};
pub use gateway::{GatewayError, GatewayRequest, GatewayResponse, HttpGateway, Method, ReqwestGateway};
pub use transport::{ApiCall, Reply, Transport};
