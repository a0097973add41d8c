//! Bound native instances living inside host objects.

use std::any::Any;
use std::fmt;

/// An opaque native value owned by a host object, tagged with the qualified
/// name of the class it was bound under.
pub struct Instance {
    class: &'static str,
    value: Box<dyn Any>,
}

impl Instance {
    pub(crate) fn new<T: Any>(class: &'static str, value: T) -> Self {
        Self {
            class,
            value: Box::new(value),
        }
    }

    /// Qualified class name, e.g. `"pkg.Movable"`.
    pub fn class(&self) -> &'static str {
        self.class
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object>", self.class)
    }
}
