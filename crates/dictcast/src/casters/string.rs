use dictcast_host::Object;

use crate::caster::{allocated, Castable, TypeCaster};
use crate::cleanup::CleanupList;
use crate::descr::Descr;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::RvPolicy;

pub struct StrCaster;

impl TypeCaster for StrCaster {
    type Value = String;

    fn descr() -> Descr {
        Descr::name("str")
    }

    fn from_host(
        src: &Object,
        _flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> Result<String, CastError> {
        src.as_str().map(str::to_string).ok_or(CastError::TypeMismatch)
    }

    fn from_native(
        src: &String,
        _policy: RvPolicy,
        _cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        allocated(Object::str(src))
    }
}

impl Castable for String {
    type Caster = StrCaster;
}
