//! Outermost conversion entry points.
//!
//! Each call owns one [`CleanupList`](crate::cleanup::CleanupList) for the
//! whole conversion, however deeply it nests, and releases it exactly once
//! when the conversion has finished.

use dictcast_host::Object;

use crate::caster::{Castable, CasterOf, TypeCaster};
use crate::cleanup::with_cleanup;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::RvPolicy;

/// Decodes `src` as a `T`.
pub fn cast<T: Castable>(src: &Object, flags: CastFlags) -> Result<T, CastError> {
    with_cleanup(|cleanup| <CasterOf<T> as TypeCaster>::from_host(src, flags, cleanup))
}

/// Encodes a borrowed `T` as a new host object.
pub fn to_host<T: Castable>(value: &T, policy: RvPolicy) -> Result<Object, CastError> {
    with_cleanup(|cleanup| <CasterOf<T> as TypeCaster>::from_native(value, policy, cleanup))
}

/// Encodes an owned `T` as a new host object, moving where `policy` allows.
pub fn into_host<T: Castable>(value: T, policy: RvPolicy) -> Result<Object, CastError> {
    with_cleanup(|cleanup| <CasterOf<T> as TypeCaster>::from_native_owned(value, policy, cleanup))
}
