use thiserror::Error;

/// Why a conversion failed.
///
/// Failures are plain values: no allocation, no pending host error, so a
/// speculative conversion attempt that fails costs nothing to discard.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CastError {
    #[error("object is not mapping-like")]
    NotMappingLike,
    #[error("object is not a sequence")]
    NotSequence,
    #[error("object has an incompatible type")]
    TypeMismatch,
    #[error("integer out of range")]
    OutOfRange,
    #[error("dict key could not be decoded")]
    KeyDecodeFailed,
    #[error("dict element could not be decoded")]
    ElementDecodeFailed,
    #[error("list item could not be decoded")]
    ItemDecodeFailed,
    #[error("host allocation failed")]
    AllocationFailed,
    #[error("dict key could not be encoded")]
    KeyEncodeFailed,
    #[error("dict element could not be encoded")]
    ElementEncodeFailed,
    #[error("list item could not be encoded")]
    ItemEncodeFailed,
    #[error("host rejected the dict insertion")]
    InsertionRejected,
    #[error("return value policy cannot be honored for this type")]
    PolicyRejected,
}
