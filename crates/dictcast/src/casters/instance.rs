//! Caster for native types bound as host classes.

use std::marker::PhantomData;

use dictcast_host::{error, Object};

use crate::caster::{allocated, TypeCaster};
use crate::cleanup::CleanupList;
use crate::descr::Descr;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::{RvPolicy, Transfer};

/// A native type exposed to the host as a class.
///
/// Bind it with `impl Castable for T { type Caster = InstanceCaster<T>; }`.
pub trait HostClass: Clone + 'static {
    /// Qualified class name, e.g. `"pkg.Movable"`.
    const NAME: &'static str;

    /// Implicit conversion from another host object, tried under
    /// [`CastFlags::CONVERT`] when `src` is not an instance of this class.
    fn implicit_from(_src: &Object) -> Option<Self> {
        None
    }
}

pub struct InstanceCaster<T>(PhantomData<T>);

impl<T: HostClass> InstanceCaster<T> {
    fn wrap(value: T) -> Result<Object, CastError> {
        allocated(Object::instance(T::NAME, value))
    }
}

impl<T: HostClass> TypeCaster for InstanceCaster<T> {
    type Value = T;

    fn descr() -> Descr {
        Descr::name(T::NAME)
    }

    fn from_host(
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> Result<T, CastError> {
        if let Some(value) = src.as_instance().and_then(|inst| inst.downcast_ref::<T>()) {
            return Ok(value.clone());
        }
        if !flags.contains(CastFlags::CONVERT) {
            return Err(CastError::TypeMismatch);
        }
        let converted = T::implicit_from(src).ok_or(CastError::TypeMismatch)?;
        let temp = Object::instance(T::NAME, converted).map_err(|_| {
            error::clear();
            CastError::AllocationFailed
        })?;
        let value = temp
            .as_instance()
            .and_then(|inst| inst.downcast_ref::<T>())
            .cloned()
            .ok_or(CastError::TypeMismatch)?;
        // The converted instance lives until the outermost conversion ends.
        cleanup.append(temp);
        Ok(value)
    }

    fn from_native(
        src: &T,
        policy: RvPolicy,
        _cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        match policy.for_borrowed() {
            Some(_) => Self::wrap(src.clone()),
            None => Err(CastError::PolicyRejected),
        }
    }

    fn from_native_owned(
        src: T,
        policy: RvPolicy,
        _cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        match policy.for_owned() {
            Some(Transfer::Move) => Self::wrap(src),
            Some(Transfer::Copy) => Self::wrap(src.clone()),
            None => Err(CastError::PolicyRejected),
        }
    }
}
