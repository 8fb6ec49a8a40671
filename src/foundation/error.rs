/// Convenience result type used across exprchain.
pub type ExprResult<T> = Result<T, ExprError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum ExprError {
    /// A caller-supplied argument was rejected (for example a lambda that is not a member path).
    #[error("invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: String,
        /// Human-readable reason, including a rendering of the rejected value.
        message: String,
    },

    /// Lambda source text could not be tokenized or parsed.
    #[error("parse error at byte {offset}: {message}")]
    Parse {
        /// Byte offset into the source text.
        offset: usize,
        /// Description of what was expected.
        message: String,
    },

    /// Parsed lambda text referenced names the type model cannot resolve.
    #[error("bind error: {0}")]
    Bind(String),

    /// Inconsistent type model configuration.
    #[error("model error: {0}")]
    Model(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExprError {
    /// Build an [`ExprError::InvalidArgument`] value.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Build an [`ExprError::Parse`] value.
    pub fn parse(offset: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            offset,
            message: message.into(),
        }
    }

    /// Build an [`ExprError::Bind`] value.
    pub fn bind(msg: impl Into<String>) -> Self {
        Self::Bind(msg.into())
    }

    /// Build an [`ExprError::Model`] value.
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Build an [`ExprError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
