use crate::pattern::PatternError;
use thiserror::Error;

/// Errors raised while compiling a [`crate::PolicyBuilder`] into a [`crate::CompiledPolicy`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid origin pattern `{pattern}`: {source}")]
    InvalidOriginPattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}
