//! Error taxonomy for the wave engine.
//!
//! Only construction and configuration parsing can fail. Geometry operations
//! clamp or clip to the grid instead of returning errors.

use thiserror::Error;

/// Result type for fallible engine operations.
pub type Result<T> = std::result::Result<T, TankError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TankError {
    /// Width or height was zero.
    #[error("invalid grid dimensions {width}x{height}: both sides must be positive")]
    InvalidDimensions { width: u32, height: u32 },

    /// The cell count does not fit in the address space.
    #[error("grid {width}x{height} is too large to allocate")]
    GridTooLarge { width: u32, height: u32 },

    /// Tank configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Scenario key did not match any known setup.
    #[error("unknown scenario: {0}")]
    UnknownScenario(String),
}

impl From<serde_json::Error> for TankError {
    fn from(err: serde_json::Error) -> Self {
        TankError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = TankError::InvalidDimensions { width: 0, height: 160 };
        assert!(err.to_string().contains("0x160"));

        let err = TankError::UnknownScenario("tsunami".into());
        assert_eq!(err.to_string(), "unknown scenario: tsunami");
    }

    #[test]
    fn json_errors_become_config_errors() {
        let parse = serde_json::from_str::<u32>("not json").unwrap_err();
        assert!(matches!(TankError::from(parse), TankError::Config(_)));
    }
}
