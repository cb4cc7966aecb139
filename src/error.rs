//! Crate-level error types.

use std::fmt;

/// Errors produced by the followcam crate.
#[derive(Debug)]
pub enum CameraError {
    /// The rig was activated without a subject to follow.
    MissingSubject,
    /// A configuration value violates its documented range or ordering.
    InvalidConfig(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSubject => {
                write!(f, "camera activated without a subject to follow")
            }
            Self::InvalidConfig(msg) => {
                write!(f, "invalid camera configuration: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for CameraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CameraError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
