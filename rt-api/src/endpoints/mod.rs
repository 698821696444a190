//! Resource wrappers organized by API area.
//!
//! Each wrapper borrows the transport and exposes typed methods for a group
//! of related endpoints.

pub mod account;
pub mod raw;
pub mod show;
pub mod video;

pub use account::Account;
pub use raw::{Raw, RawOptions};
pub use show::Show;
pub use video::{PlayOptions, UploadParams, Video, VideoUpdate};

use rt_core::error::{RtError, RtResult};

/// Reject an empty identifier before any request is made.
pub(crate) fn require(name: &str, value: &str) -> RtResult<()> {
    if value.trim().is_empty() {
        return Err(RtError::InvalidArgument(format!("'{name}' must be specified")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        assert!(require("video_id", "abc").is_ok());
        let err = require("video_id", " ").unwrap_err();
        assert_eq!(err.to_string(), "invalid argument: 'video_id' must be specified");
    }
}
