use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Rule index {index} out of range ({len} rules configured)")]
    RuleIndex { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
