use thiserror::Error;

/// Errors surfaced by the kernel layer.
///
/// `CutStatus` is ordinary control flow and is never wrapped in this type;
/// `KernelError` is reserved for precondition violations at the call site.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// [`crate::Ldlt::witness`] was called without a preceding failed factorization.
    #[error("witness() called before a failed factorization")]
    WitnessBeforeFailure,
}
