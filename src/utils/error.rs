use thiserror::Error;

#[derive(Error, Debug)]
pub enum PodupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment error: {0}")]
    Env(String),

    #[error("Secrets error: {0}")]
    Secrets(String),

    #[error("Podman error: {0}")]
    Podman(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, PodupError>;
