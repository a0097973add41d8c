//! Host error indicator.
//!
//! The host reports failures the way an embedded interpreter does: the
//! failing operation records a pending error in a per-thread slot and
//! returns an invalid result. Rust callers additionally receive a copy of
//! the error through [`HostResult`].

use std::cell::RefCell;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostErrorKind {
    TypeError,
    ValueError,
    OverflowError,
    MemoryError,
}

impl HostErrorKind {
    pub fn name(self) -> &'static str {
        match self {
            HostErrorKind::TypeError => "TypeError",
            HostErrorKind::ValueError => "ValueError",
            HostErrorKind::OverflowError => "OverflowError",
            HostErrorKind::MemoryError => "MemoryError",
        }
    }
}

/// An error raised by a host operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{}: {message}", kind.name())]
pub struct HostError {
    pub kind: HostErrorKind,
    pub message: String,
}

pub type HostResult<T> = Result<T, HostError>;

thread_local! {
    static PENDING: RefCell<Option<HostError>> = const { RefCell::new(None) };
}

/// Sets the pending error for the current thread and returns a copy of it.
///
/// A previously pending error is replaced.
pub fn raise(kind: HostErrorKind, message: impl Into<String>) -> HostError {
    let err = HostError {
        kind,
        message: message.into(),
    };
    tracing::debug!(kind = kind.name(), message = %err.message, "host error raised");
    PENDING.with(|slot| *slot.borrow_mut() = Some(err.clone()));
    err
}

/// Returns true if an error is pending on the current thread.
pub fn occurred() -> bool {
    PENDING.with(|slot| slot.borrow().is_some())
}

/// Discards the pending error, if any.
pub fn clear() {
    PENDING.with(|slot| slot.borrow_mut().take());
}

/// Removes and returns the pending error.
pub fn take() -> Option<HostError> {
    PENDING.with(|slot| slot.borrow_mut().take())
}
