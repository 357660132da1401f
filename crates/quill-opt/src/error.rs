//! Error types for the optimizer crate.

use thiserror::Error;

/// Errors that can occur during optimization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] quill_ir::IrError),

    /// A gate kind the requested optimization cannot handle.
    #[error("Unsupported gate '{gate}' in {context}")]
    UnsupportedGateKind {
        /// The offending gate, formatted.
        gate: String,
        /// Which stage rejected it.
        context: String,
    },

    /// Internal consistency check failed.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Invalid optimizer configuration.
    #[error("Invalid optimizer configuration: {0}")]
    InvalidConfiguration(String),
}

impl OptError {
    pub(crate) fn unsupported(gate: &quill_ir::Gate, context: &str) -> Self {
        OptError::UnsupportedGateKind {
            gate: gate.to_string(),
            context: context.to_string(),
        }
    }
}

/// Result type for optimization operations.
pub type OptResult<T> = Result<T, OptError>;
