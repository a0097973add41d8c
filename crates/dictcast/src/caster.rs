//! The entry caster contract.
//!
//! A caster is a zero-sized strategy type bound to one native type at
//! compile time. Composite casters (dicts, lists, optionals) are generic over
//! the casters of their parts, so a nested conversion is a chain of static
//! calls sharing the caller's [`CleanupList`].

use dictcast_host::{HostResult, Object};

use crate::cleanup::CleanupList;
use crate::descr::Descr;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::RvPolicy;

pub trait TypeCaster {
    /// The native type this caster produces and consumes.
    type Value;

    fn descr() -> Descr;

    /// Interprets `src` as [`Self::Value`].
    ///
    /// The returned value is staged: the caller owns it exclusively and moves
    /// it into its destination. Host temporaries that must outlive this call
    /// are appended to `cleanup`, never released here.
    fn from_host(
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> Result<Self::Value, CastError>;

    /// Produces a host representation of a borrowed value.
    fn from_native(
        src: &Self::Value,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError>;

    /// Produces a host representation of an owned value, which may be moved
    /// into the host instead of copied.
    fn from_native_owned(
        src: Self::Value,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        Self::from_native(&src, policy, cleanup)
    }
}

/// Binds a native type to its caster.
pub trait Castable: Sized {
    type Caster: TypeCaster<Value = Self>;
}

pub type CasterOf<T> = <T as Castable>::Caster;

/// Descriptor of `T` as its caster names it.
pub fn descr_of<T: Castable>() -> Descr {
    <CasterOf<T> as TypeCaster>::descr()
}

/// Maps a failed host allocation to [`CastError::AllocationFailed`]. The
/// host's `MemoryError` stays pending for the encode caller.
pub(crate) fn allocated(result: HostResult<Object>) -> Result<Object, CastError> {
    result.map_err(|_| CastError::AllocationFailed)
}
