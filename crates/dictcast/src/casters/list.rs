use std::marker::PhantomData;

use dictcast_host::{Object, ObjectKind};

use crate::caster::{allocated, Castable, TypeCaster};
use crate::cleanup::CleanupList;
use crate::descr::Descr;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::RvPolicy;

/// Decodes a host list or tuple into a `Vec`, encodes to a host list.
/// Strings are not treated as sequences.
pub struct ListCaster<C>(PhantomData<C>);

impl<C: TypeCaster> ListCaster<C> {
    fn decode_items(
        items: &[Object],
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> Result<Vec<C::Value>, CastError> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let value = C::from_host(item, flags, cleanup).map_err(|err| {
                tracing::trace!(index, %err, "list item rejected");
                CastError::ItemDecodeFailed
            })?;
            out.push(value);
        }
        Ok(out)
    }
}

impl<C: TypeCaster> TypeCaster for ListCaster<C> {
    type Value = Vec<C::Value>;

    fn descr() -> Descr {
        Descr::generic("list", [C::descr()])
    }

    fn from_host(
        src: &Object,
        flags: CastFlags,
        cleanup: &mut CleanupList,
    ) -> Result<Vec<C::Value>, CastError> {
        match src.kind() {
            ObjectKind::List(_) => match src.as_list() {
                Some(items) => Self::decode_items(&items, flags, cleanup),
                None => Err(CastError::NotSequence),
            },
            ObjectKind::Tuple(items) => Self::decode_items(items, flags, cleanup),
            _ => Err(CastError::NotSequence),
        }
    }

    fn from_native(
        src: &Vec<C::Value>,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        let list = allocated(Object::list(Vec::with_capacity(src.len())))?;
        for item in src {
            let item = C::from_native(item, policy, cleanup)
                .map_err(|_| CastError::ItemEncodeFailed)?;
            list.list_append(item).map_err(|_| CastError::ItemEncodeFailed)?;
        }
        Ok(list)
    }

    fn from_native_owned(
        src: Vec<C::Value>,
        policy: RvPolicy,
        cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        let list = allocated(Object::list(Vec::with_capacity(src.len())))?;
        for item in src {
            let item = C::from_native_owned(item, policy, cleanup)
                .map_err(|_| CastError::ItemEncodeFailed)?;
            list.list_append(item).map_err(|_| CastError::ItemEncodeFailed)?;
        }
        Ok(list)
    }
}

impl<T: Castable> Castable for Vec<T> {
    type Caster = ListCaster<T::Caster>;
}
