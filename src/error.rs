use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpinnerError {
    #[error("Invalid spinner definition: {0}")]
    InvalidDefinition(String),

    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    #[error("Spinner task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, SpinnerError>;
