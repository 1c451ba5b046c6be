use crate::types::Tag;
use thiserror::Error;

/// Host-side contract violations. The emulated language has no exceptions;
/// these surface misuse of the runtime by generated code.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("wrong-variant access: expected {expected}, found {found}")]
    WrongVariant { expected: Tag, found: Tag },
    #[error("missing argument {index}: only {supplied} supplied")]
    MissingArgument { index: usize, supplied: usize },
    #[error("arity mismatch calling {callee}: expected at least {expected}, got {supplied}")]
    ArityMismatch {
        callee: String,
        expected: usize,
        supplied: usize,
    },
    #[error("property '{0}' is not defined")]
    MissingProperty(String),
    #[error("stale {kind} handle #{index}")]
    StaleHandle { kind: &'static str, index: usize },
    #[error("object #{index} is still the prototype of {delegators} object(s)")]
    PrototypeInUse { index: usize, delegators: usize },
    #[error("runtime globals are not bootstrapped")]
    NotBootstrapped,
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
