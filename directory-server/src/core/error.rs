use shared::AppError;
use thiserror::Error;

use super::ConfigError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Startup failed: {0}")]
    Startup(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<AppError> for ServerError {
    fn from(err: AppError) -> Self {
        match err.details {
            Some(details) => ServerError::Startup(format!("{}: {}", err.message, details)),
            None => ServerError::Startup(err.message),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_keeps_details() {
        let err: ServerError = AppError::database("unable to open database file").into();
        assert_eq!(
            err.to_string(),
            "Startup failed: Database error: unable to open database file"
        );
    }
}
