use thiserror::Error;

/// Failure taxonomy for the dashboard client.
///
/// `Validation` is caught before any request leaves the machine. `Transport`
/// and `Backend` are deliberately distinct: the first means the server could
/// not be reached (or returned something unreadable), the second is an error
/// the server itself reported through the uniform `{error}` shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not reach server: {0}")]
    Transport(String),

    #[error("Server error: {0}")]
    Backend(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(err.to_string())
    }
}
