use std::marker::PhantomData;

use dictcast_host::Object;

use crate::caster::{allocated, Castable, TypeCaster};
use crate::cleanup::CleanupList;
use crate::descr::Descr;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::RvPolicy;

/// Maps host `None` to `Option::None` and everything else through `C`.
pub struct OptionalCaster<C>(PhantomData<C>);

impl<C: TypeCaster> TypeCaster for OptionalCaster<C> {
    type Value = Option<C::Value>;

    fn descr() -> Descr {
        Descr::optional(C::descr())
    }

    fn from_host(
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> Result<Option<C::Value>, CastError> {
        if src.is_none() {
            return Ok(None);
        }
        C::from_host(src, flags, cleanup).map(Some)
    }

    fn from_native(
        src: &Option<C::Value>,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        match src {
            Some(value) => C::from_native(value, policy, cleanup),
            None => allocated(Object::none()),
        }
    }

    fn from_native_owned(
        src: Option<C::Value>,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        match src {
            Some(value) => C::from_native_owned(value, policy, cleanup),
            None => allocated(Object::none()),
        }
    }
}

impl<T: Castable> Castable for Option<T> {
    type Caster = OptionalCaster<T::Caster>;
}
