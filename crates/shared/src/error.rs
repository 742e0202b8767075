use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    EnvironmentUnavailable,
    InvalidInput,
    NoPendingCoordinate,
    MapNotReady,
}

/// A user-facing notice, shown by the front-end as a blocking alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub code: ErrorCode,
    pub message: String,
}

impl Notice {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported in this environment")]
    Unsupported,
    #[error("permission to read the current position was denied")]
    PermissionDenied,
    #[error("current position unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("Could not get current position")]
    EnvironmentUnavailable(#[source] GeolocationError),
    #[error("Inputs must be positive numbers")]
    InvalidInput,
    #[error("no map location has been selected yet")]
    NoPendingCoordinate,
    #[error("map is not ready")]
    MapNotReady,
}

impl TrackerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::EnvironmentUnavailable(_) => ErrorCode::EnvironmentUnavailable,
            Self::InvalidInput => ErrorCode::InvalidInput,
            Self::NoPendingCoordinate => ErrorCode::NoPendingCoordinate,
            Self::MapNotReady => ErrorCode::MapNotReady,
        }
    }
}

impl From<&TrackerError> for Notice {
    fn from(value: &TrackerError) -> Self {
        Self::new(value.code(), value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_carry_user_facing_messages() {
        let notice = Notice::from(&TrackerError::InvalidInput);
        assert_eq!(notice.code, ErrorCode::InvalidInput);
        assert_eq!(notice.message, "Inputs must be positive numbers");

        let notice = Notice::from(&TrackerError::EnvironmentUnavailable(
            GeolocationError::PermissionDenied,
        ));
        assert_eq!(notice.code, ErrorCode::EnvironmentUnavailable);
        assert_eq!(notice.message, "Could not get current position");
    }

    #[test]
    fn environment_error_keeps_geolocation_cause() {
        use std::error::Error as _;

        let err = TrackerError::EnvironmentUnavailable(GeolocationError::Unavailable(
            "timeout".into(),
        ));
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "current position unavailable: timeout");
    }
}
