//! Error types for optimizer and scheduler construction

/// Result type alias for ajustar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or driving optimizers and schedulers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown optimizer: {name}. Supported: {known}")]
    UnknownOptimizer { name: String, known: String },

    #[error("Unknown LR scheduler: {name}. Supported: {known}")]
    UnknownScheduler { name: String, known: String },

    #[error("Invalid parameters for {component}: {message}")]
    InvalidParam { component: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Parameter appears in more than one parameter group: {0}")]
    DuplicateParameter(String),

    #[error("Optimizer override given for unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Gradient length {grad} does not match parameter length {param}")]
    ShapeMismatch { param: usize, grad: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build an `InvalidParam` error for the named component
    pub fn invalid_param(component: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::InvalidParam { component: component.into(), message: message.to_string() }
    }

    /// Whether the error comes from a failed name lookup
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::UnknownOptimizer { .. } | Self::UnknownScheduler { .. })
    }
}
