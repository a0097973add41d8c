//! Deferred release of conversion temporaries.
//!
//! A conversion may create host objects that must outlive the caster that
//! created them, e.g. the instance produced by an implicit conversion. Such
//! temporaries go into the [`CleanupList`] owned by the outermost call and are
//! released together once that call has finished. Nested conversions only
//! ever append.

use dictcast_host::Object;

#[derive(Default)]
pub struct CleanupList {
    items: Vec<Object>,
}

impl CleanupList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps `obj` alive until the list is released.
    pub fn append(&mut self, obj: Object) {
        self.items.push(obj);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Releases every temporary in append order. Consuming `self` makes a
    /// second release impossible; dropping an unreleased list releases it.
    pub fn release(mut self) {
        self.drain();
    }

    fn drain(&mut self) {
        if self.items.is_empty() {
            return;
        }
        tracing::trace!(count = self.items.len(), "releasing conversion temporaries");
        for obj in self.items.drain(..) {
            drop(obj);
        }
    }
}

impl Drop for CleanupList {
    fn drop(&mut self) {
        self.drain();
    }
}

/// Runs one outermost conversion with a fresh cleanup list, releasing it
/// after `f` returns.
pub fn with_cleanup<R>(f: impl FnOnce(&mut CleanupList) -> R) -> R {
    let mut cleanup = CleanupList::new();
    let result = f(&mut cleanup);
    cleanup.release();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use dictcast_host::alloc::live_objects;

    #[test]
    fn release_drops_all_temporaries() {
        let base = live_objects();
        let mut cleanup = CleanupList::new();
        cleanup.append(Object::str("a").unwrap());
        cleanup.append(Object::str("b").unwrap());
        assert_eq!(cleanup.len(), 2);
        assert_eq!(live_objects(), base + 2);
        cleanup.release();
        assert_eq!(live_objects(), base);
    }

    #[test]
    fn drop_releases_unreleased_list() {
        let base = live_objects();
        {
            let mut cleanup = CleanupList::new();
            cleanup.append(Object::int(1).unwrap());
        }
        assert_eq!(live_objects(), base);
    }

    #[test]
    fn temporaries_outlive_the_appending_scope() {
        let base = live_objects();
        let seen = with_cleanup(|cleanup| {
            {
                let temp = Object::int(5).unwrap();
                cleanup.append(temp);
            }
            live_objects()
        });
        assert_eq!(seen, base + 1);
        assert_eq!(live_objects(), base);
    }

    #[test]
    fn release_only_drops_the_list_reference() {
        let shared = Object::str("kept").unwrap();
        let mut cleanup = CleanupList::new();
        cleanup.append(shared.clone());
        assert_eq!(shared.ref_count(), 2);
        cleanup.release();
        assert_eq!(shared.ref_count(), 1);
    }
}
