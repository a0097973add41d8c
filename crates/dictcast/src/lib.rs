//! dictcast - bidirectional casters between host dicts and native Rust maps.
//!
//! A conversion is composed statically from per-type strategies:
//!
//! - **Entry casters** ([`TypeCaster`]): convert one value of a fixed native
//!   type in either direction. Built-in casters live in [`casters`].
//! - **Cleanup list** ([`CleanupList`]): host temporaries created anywhere in
//!   a nested conversion, released once by the outermost call.
//! - **Dict caster** ([`DictCaster`]): drives key/element casters over a host
//!   dict or a [`NativeMap`].
//!
//! Failures never unwind and never leave a pending host error behind on
//! decode; they come back as a [`CastError`] value.
//!
//! ```
//! use std::collections::HashMap;
//! use dictcast::{cast, into_host, CastFlags, RvPolicy};
//!
//! let native = HashMap::from([(1_i64, "a".to_string()), (2, "b".to_string())]);
//! let obj = into_host(native.clone(), RvPolicy::Automatic).unwrap();
//! let back: HashMap<i64, String> = cast(&obj, CastFlags::NONE).unwrap();
//! assert_eq!(back, native);
//! ```

pub mod caster;
pub mod casters;
pub mod cleanup;
pub mod convert;
pub mod descr;
pub mod dict;
pub mod error;
pub mod flags;
pub mod policy;

pub use caster::{descr_of, Castable, CasterOf, TypeCaster};
pub use cleanup::{with_cleanup, CleanupList};
pub use convert::{cast, into_host, to_host};
pub use descr::{Descr, Signature};
pub use dict::{DictCaster, NativeMap};
pub use error::CastError;
pub use flags::CastFlags;
pub use policy::{RvPolicy, Transfer};

pub use dictcast_host as host;
