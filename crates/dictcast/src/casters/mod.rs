//! Built-in entry casters.

mod instance;
mod list;
mod optional;
mod scalar;
mod string;

pub use instance::{HostClass, InstanceCaster};
pub use list::ListCaster;
pub use optional::OptionalCaster;
pub use scalar::{BoolCaster, FloatCaster, IntCaster};
pub use string::StrCaster;
