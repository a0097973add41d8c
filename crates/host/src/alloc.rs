//! Per-thread object allocator accounting.
//!
//! Every host object passes through [`acquire`] when it is created and
//! [`release`] when its last reference is dropped. The live count lets tests
//! assert that a conversion did not leak temporaries, and [`limit`] injects
//! allocation failures.

use std::cell::Cell;

use crate::error::{raise, HostErrorKind, HostResult};

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

pub(crate) fn acquire() -> HostResult<()> {
    BUDGET.with(|budget| match budget.get() {
        Some(0) => Err(raise(HostErrorKind::MemoryError, "allocation limit reached")),
        Some(n) => {
            budget.set(Some(n - 1));
            Ok(())
        }
        None => Ok(()),
    })?;
    LIVE.with(|live| live.set(live.get() + 1));
    Ok(())
}

pub(crate) fn release() {
    LIVE.with(|live| live.set(live.get().saturating_sub(1)));
}

/// Number of host objects currently alive on this thread.
pub fn live_objects() -> usize {
    LIVE.with(Cell::get)
}

/// Guard returned by [`limit`]. Restores the previous budget on drop.
#[must_use = "the allocation limit is lifted as soon as the guard is dropped"]
pub struct AllocLimit {
    previous: Option<usize>,
}

impl AllocLimit {
    /// Allocations still permitted under this guard.
    pub fn remaining(&self) -> Option<usize> {
        BUDGET.with(Cell::get)
    }
}

impl Drop for AllocLimit {
    fn drop(&mut self) {
        BUDGET.with(|budget| budget.set(self.previous));
    }
}

/// Permits `allocations` more allocations on the current thread; the next
/// one after that raises `MemoryError`.
pub fn limit(allocations: usize) -> AllocLimit {
    let previous = BUDGET.with(|budget| budget.replace(Some(allocations)));
    AllocLimit { previous }
}
