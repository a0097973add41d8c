//! dictcast-host - reference-counted host object model.
//!
//! Stands in for the embedding runtime on the dynamic side of a conversion.
//! It supplies exactly what the caster core consumes:
//!
//! - **Objects**: [`Object`], a cloneable reference with per-thread
//!   allocation accounting ([`alloc`]).
//! - **Mapping protocols**: dict construction, insertion and enumeration
//!   ([`dict`]).
//! - **Error indicator**: a pending-error slot cleared or inspected by
//!   callers ([`error`]).

pub mod alloc;
pub mod dict;
pub mod error;
pub mod hash;
pub mod instance;
mod json;
pub mod object;

pub use dict::DictObject;
pub use error::{HostError, HostErrorKind, HostResult};
pub use hash::HashKey;
pub use instance::Instance;
pub use object::{Object, ObjectKind};
