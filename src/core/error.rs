use thiserror::Error;

/// Errors raised while loading templates or configuration
///
/// Damage, healing and capacity queries never fail; they clamp or fall back instead.
#[derive(Error, Debug)]
pub enum AnatomyError {
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AnatomyError>;
