//! CLI-specific error types and exit code mapping

use depscribe_core::error::{DepscribeError, ExtractError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// Tracing subscriber could not be installed.
    #[error("logging error: {0}")]
    Logging(String),

    /// Wrapped domain error from depscribe-core.
    ///
    /// Handler failures arrive here through `From<HandlerError> for DepscribeError`.
    #[error("{0}")]
    Core(#[from] DepscribeError),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                               |
    /// |------|---------------------------------------|
    /// | 0    | Success                               |
    /// | 1    | General failure (output, logging)     |
    /// | 2    | Configuration or usage error          |
    /// | 3    | Input file not found                  |
    /// | 4    | Input file could not be parsed        |
    /// | 5    | Required field missing or mistyped    |
    /// | 6    | Input file exceeds `max_file_size`    |
    /// | 10   | IO error                              |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Core(e) => match e {
                DepscribeError::Config(_) => 2,
                DepscribeError::Extract(ExtractError::FileNotFound { .. }) => 3,
                DepscribeError::Extract(ExtractError::ParseFailed { .. }) => 4,
                DepscribeError::Extract(ExtractError::SchemaMismatch { .. }) => 5,
                DepscribeError::Extract(ExtractError::TooLarge { .. }) => 6,
                DepscribeError::Io(_) => 10,
            },
            Self::Io(_) => 10,
            Self::JsonSerialize(_) | Self::Logging(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depscribe_core::error::ConfigError;
    use depscribe_go_handler::HandlerError;

    fn handler_err(kind: &str) -> HandlerError {
        let path = "Gopkg.lock".to_owned();
        match kind {
            "file_not_found" => HandlerError::FileNotFound {
                path,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            },
            "parse" => HandlerError::Parse {
                path,
                reason: "expected `]`".to_owned(),
            },
            "schema_mismatch" => HandlerError::SchemaMismatch {
                path,
                field: "projects[0].revision".to_owned(),
                reason: "required string field is missing".to_owned(),
            },
            _ => HandlerError::FileTooBig {
                path,
                size: 20,
                max: 10,
            },
        }
    }

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("test error".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_handler_errors() {
        let cases = [
            ("file_not_found", 3),
            ("parse", 4),
            ("schema_mismatch", 5),
            ("file_too_big", 6),
        ];
        for (kind, code) in cases {
            let err = CliError::from(DepscribeError::from(handler_err(kind)));
            assert!(matches!(err, CliError::Core(DepscribeError::Extract(_))));
            assert_eq!(err.exit_code(), code, "{kind} should return exit code {code}");
        }
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err = CliError::from(DepscribeError::Config(ConfigError::FileNotFound {
            path: "depscribe.toml".to_owned(),
        }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_json_serialize_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid json")
            .expect_err("should fail parsing");
        let err = CliError::JsonSerialize(json_err);
        assert_eq!(err.exit_code(), 1, "json error should return exit code 1");
    }

    #[test]
    fn test_error_display_names_file_and_kind() {
        let err = CliError::from(DepscribeError::from(handler_err("parse")));
        let display_str = err.to_string();
        assert!(display_str.contains("parse failed"), "should include error kind");
        assert!(display_str.contains("Gopkg.lock"), "should include file path");
    }

    #[test]
    fn test_error_display_config() {
        let err = CliError::Config("invalid TOML syntax".to_owned());
        let display_str = format!("{}", err);
        assert!(display_str.contains("configuration error"));
        assert!(display_str.contains("invalid TOML syntax"));
    }
}
