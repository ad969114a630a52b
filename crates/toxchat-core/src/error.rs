//! Error types for toxchat

/// Result type alias using toxchat's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for toxchat operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The classifier has not finished loading, or loading failed
    #[error("model is not ready")]
    ModelNotReady,

    /// A classification is already in flight
    #[error("a classification is already in flight")]
    Busy,

    /// Empty or whitespace-only submission
    #[error("message is empty")]
    EmptyMessage,

    /// Model loading or inference errors
    #[error("model error: {0}")]
    Model(String),

    /// The backend returned a prediction set that violates its contract
    #[error("prediction contract violation: {0}")]
    Contract(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new contract-violation error
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
