// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
}

/// Specific error types for the signal API.
/// Categorized so the UI can show a useful failure message next to the drawer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request was malformed before it left the client (e.g. empty signal id).
    InvalidRequest(String),

    /// Could not reach the server (connect failure, DNS, timeout).
    Unreachable(String),

    /// The server answered with a non-success status.
    Status { code: u16, message: String },

    /// The response body could not be decoded as the expected shape.
    Decode(String),

    /// Generic error with raw message.
    Other(String),
}

impl ApiError {
    /// Categorizes a `reqwest` failure into the variants above.
    pub fn from_request_error(err: &reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return ApiError::Status {
                code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            };
        }

        if err.is_connect() || err.is_timeout() {
            return ApiError::Unreachable(err.to_string());
        }

        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }

        ApiError::Other(err.to_string())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ApiError::Unreachable(msg) => write!(f, "Server unreachable: {}", msg),
            ApiError::Status { code, message } => {
                write!(f, "Server rejected the request ({}): {}", code, message)
            }
            ApiError::Decode(msg) => write!(f, "Unexpected response: {}", msg),
            ApiError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn status_error_display_includes_code() {
        let err = ApiError::Status {
            code: 409,
            message: "Conflict".to_string(),
        };
        let rendered = format!("{}", err);
        assert!(rendered.contains("409"));
        assert!(rendered.contains("Conflict"));
    }
}
