//! Client error types.

use std::fmt;

use nextslot_core::ScheduleError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur in the client.
#[derive(Debug)]
pub enum ClientError {
    /// Configuration error.
    Config(String),
    /// IO error.
    Io(std::io::Error),
    /// Malformed input (records file, reference instant).
    Parse(String),
    /// A value rejected by the scheduling engine.
    Schedule(ScheduleError),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
            Self::Io(err) => write!(f, "IO error: {}", err),
            Self::Parse(msg) => write!(f, "parse error: {}", msg),
            Self::Schedule(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Schedule(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ScheduleError> for ClientError {
    fn from(err: ScheduleError) -> Self {
        Self::Schedule(err)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ClientError::Config("bad margin".to_string()).to_string(),
            "configuration error: bad margin"
        );
        assert_eq!(
            ClientError::from(ScheduleError::InvalidPattern(3)).to_string(),
            "invalid hold pattern: expected 7 weekdays, got 3"
        );
    }

    #[test]
    fn io_error_has_source() {
        let err = ClientError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "IO error: gone");
    }
}
