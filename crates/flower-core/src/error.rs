use thiserror::Error;

/// Errors raised while loading project state or configuration.
#[derive(Debug, Error)]
pub enum FlowerError {
    #[error("project state is not valid JSON: {0}")]
    StateParse(#[from] serde_json::Error),
    #[error("unknown parameter path `{0}`")]
    UnknownParameter(String),
    #[error("non-finite value on `{path}` at position {position}")]
    NonFiniteValue { path: String, position: f32 },
    #[error("sequence length must be non-negative, got {0}")]
    NegativeLength(f32),
    #[error("invalid config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FlowerError>;
