//! Wire-level constants for the Rutube REST API.

/// Client name reported in the default user agent.
pub const CLIENT_NAME: &str = "rutube-rs";

/// Client version.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "rutube";

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default API host.
pub const DEFAULT_HOST: &str = "rutube.ru";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Authorization scheme prefixed to the session token.
pub const TOKEN_SCHEME: &str = "Token";

/// Header used to override the client IP seen by the API.
pub const REAL_IP_HEADER: &str = "X-Real-IP";

/// Status returned by delete-style endpoints on success.
pub const STATUS_NO_CONTENT: u16 = 204;

/// Default category for uploaded videos.
pub const DEFAULT_UPLOAD_CATEGORY: i64 = 13;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Endpoint paths, relative to the host.
pub mod endpoints {
    pub const TOKEN_AUTH: &str = "api/accounts/token_auth/";
    pub const CHANGE_PASSWORD: &str = "api/accounts/edit/password/";
    pub const VIDEO: &str = "api/video/";
    pub const PUBLICATION: &str = "api/video/publication/";
    pub const CONTENT_TVS: &str = "api/metainfo/contenttvs/";
    pub const METAINFO_TV: &str = "api/metainfo/tv/";
    pub const PLAY_OPTIONS: &str = "api/play/options/";
}

/// Default user agent sent by the reqwest gateway.
pub fn default_user_agent() -> String {
    format!("{CLIENT_NAME}/{CLIENT_VERSION}")
}
