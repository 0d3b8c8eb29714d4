use thiserror::Error;

/// All errors produced by cf-insight.
#[derive(Error, Debug)]
pub enum InsightError {
    /// A network request could not be completed (DNS, connect, timeout, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered but reported a failure instead of a result payload.
    #[error("API request failed: {0}")]
    Api(String),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A handle string does not look like a valid Codeforces handle.
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    /// An epoch-seconds value could not be converted to a timestamp.
    #[error("Invalid timestamp value: {0}")]
    Timestamp(i64),

    /// Difficulty imputation was required but no rated row exists to
    /// compute the mean from.
    #[error("Cannot impute difficulty: table has no rated submissions")]
    DifficultyMeanUndefined,

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Pass-through for raw I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the cf-insight crates.
pub type Result<T> = std::result::Result<T, InsightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_network() {
        let err = InsightError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_error_display_api() {
        let err = InsightError::Api("handle not found".to_string());
        assert_eq!(err.to_string(), "API request failed: handle not found");
    }

    #[test]
    fn test_error_display_invalid_handle() {
        let err = InsightError::InvalidHandle("x".to_string());
        assert_eq!(err.to_string(), "Invalid handle: x");
    }

    #[test]
    fn test_error_display_timestamp() {
        let err = InsightError::Timestamp(-9_999_999_999_999);
        assert_eq!(
            err.to_string(),
            "Invalid timestamp value: -9999999999999"
        );
    }

    #[test]
    fn test_error_display_mean_undefined() {
        let err = InsightError::DifficultyMeanUndefined;
        let msg = err.to_string();
        assert!(msg.contains("no rated submissions"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops}").unwrap_err();
        let err: InsightError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: InsightError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
