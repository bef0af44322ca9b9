//! CLI error types.

use std::fmt;

use error_stack::Report;
use ondc_auth_common::error::AuthError;

#[derive(Debug)]
pub enum CliError {
    /// Configuration file error
    Config(String),
    /// Signing or key handling error
    Auth(Report<AuthError>),
    /// IO error
    Io(std::io::Error),
    /// JSON parsing error
    Json(serde_json::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Auth(report) => write!(f, "{:?}", report),
            CliError::Io(err) => write!(f, "IO error: {}", err),
            CliError::Json(err) => write!(f, "JSON error: {}", err),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

impl From<Report<AuthError>> for CliError {
    fn from(report: Report<AuthError>) -> Self {
        CliError::Auth(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_cli_error_display() {
        assert_eq!(
            format!("{}", CliError::Config("test".into())),
            "Configuration error: test"
        );
        let report = Report::new(AuthError::InvalidKey {
            message: "short".into(),
        });
        assert!(format!("{}", CliError::from(report)).contains("Invalid key: short"));
    }

    #[test]
    fn test_cli_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json")
            .expect_err("malformed body must not parse");
        let cli_err: CliError = json_err.into();
        assert!(matches!(cli_err, CliError::Json(_)));
        assert!(cli_err.to_string().starts_with("JSON error: "));
    }

    #[test]
    fn test_cli_error_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("[1,")
            .expect_err("truncated body must not parse");
        assert!(CliError::from(json_err).source().is_some());

        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "body.json");
        assert!(CliError::from(missing).source().is_some());

        let auth_err = CliError::from(Report::new(AuthError::Configuration {
            message: "no identity for role".into(),
        }));
        assert!(auth_err.source().is_none());
    }
}
