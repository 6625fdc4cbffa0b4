use std::fmt;

#[derive(Debug)]
pub enum ParkError {
    ApiError {
        status: u16,
        message: Option<String>,
    },
    NotFound(String),
    Validation(String),
    ConfigError(String),
    NetworkError(reqwest::Error),
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    YamlError(serde_yaml::Error),
    Other(String),
}

impl ParkError {
    /// Message supplied by the backend, if the failure carried one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ParkError::ApiError {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ParkError::ApiError { status, .. } => Some(*status),
            ParkError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

impl fmt::Display for ParkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParkError::ApiError {
                status,
                message: Some(message),
            } => write!(f, "API error (status {}): {}", status, message),
            ParkError::ApiError {
                status,
                message: None,
            } => write!(f, "API error (status {})", status),
            ParkError::NotFound(id) => write!(f, "Parking log not found: {}", id),
            ParkError::Validation(msg) => write!(f, "{}", msg),
            ParkError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ParkError::NetworkError(e) => write!(f, "Network error: {}", e),
            ParkError::IoError(e) => write!(f, "IO error: {}", e),
            ParkError::JsonError(e) => write!(f, "JSON error: {}", e),
            ParkError::YamlError(e) => write!(f, "YAML error: {}", e),
            ParkError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ParkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParkError::NetworkError(e) => Some(e),
            ParkError::IoError(e) => Some(e),
            ParkError::JsonError(e) => Some(e),
            ParkError::YamlError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ParkError {
    fn from(err: reqwest::Error) -> Self {
        ParkError::NetworkError(err)
    }
}

impl From<std::io::Error> for ParkError {
    fn from(err: std::io::Error) -> Self {
        ParkError::IoError(err)
    }
}

impl From<serde_json::Error> for ParkError {
    fn from(err: serde_json::Error) -> Self {
        ParkError::JsonError(err)
    }
}

impl From<serde_yaml::Error> for ParkError {
    fn from(err: serde_yaml::Error) -> Self {
        ParkError::YamlError(err)
    }
}

impl From<anyhow::Error> for ParkError {
    fn from(err: anyhow::Error) -> Self {
        ParkError::Other(err.to_string())
    }
}

impl From<String> for ParkError {
    fn from(msg: String) -> Self {
        ParkError::Other(msg)
    }
}

impl From<&str> for ParkError {
    fn from(msg: &str) -> Self {
        ParkError::Other(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ParkError>;
