use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid request")]
    InvalidRequest,

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    /// 對應到 HTTP 狀態碼
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest | Self::ValidationError { .. } => 400,
            _ => 500,
        }
    }

    /// 可以回給客戶端的訊息；內部細節只寫進日誌
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidRequest => "Invalid request".to_string(),
            Self::ValidationError { message } => message.clone(),
            _ => "Internal server error".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        let err = TrackerError::validation("Maximum 20 tracking IDs allowed");
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Maximum 20 tracking IDs allowed");

        assert_eq!(TrackerError::InvalidRequest.status_code(), 400);
        assert_eq!(TrackerError::InvalidRequest.public_message(), "Invalid request");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = TrackerError::InternalError {
            message: "worker pool exploded".to_string(),
        };
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.public_message(), "Internal server error");

        let io = TrackerError::from(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk on fire",
        ));
        assert_eq!(io.public_message(), "Internal server error");
    }
}
