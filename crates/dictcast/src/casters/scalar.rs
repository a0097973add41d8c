//! Casters for `bool`, integers and floats.

use std::marker::PhantomData;

use dictcast_host::{Object, ObjectKind};

use crate::caster::{allocated, Castable, TypeCaster};
use crate::cleanup::CleanupList;
use crate::descr::Descr;
use crate::error::CastError;
use crate::flags::CastFlags;
use crate::policy::RvPolicy;

pub struct BoolCaster;

impl TypeCaster for BoolCaster {
    type Value = bool;

    fn descr() -> Descr {
        Descr::name("bool")
    }

    fn from_host(
        src: &Object,
        _flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> Result<bool, CastError> {
        src.as_bool().ok_or(CastError::TypeMismatch)
    }

    fn from_native(
        src: &bool,
        _policy: RvPolicy,
        _cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        allocated(Object::bool(*src))
    }
}

impl Castable for bool {
    type Caster = BoolCaster;
}

/// Range-checked caster for the integer type `T`. `bool` is accepted only
/// under [`CastFlags::CONVERT`].
pub struct IntCaster<T>(PhantomData<T>);

impl<T> TypeCaster for IntCaster<T>
where
    T: TryFrom<i64> + Copy,
    i64: TryFrom<T>,
{
    type Value = T;

    fn descr() -> Descr {
        Descr::name("int")
    }

    fn from_host(
        src: &Object,
        flags: CastFlags,
        _cleanup: &mut CleanupList,
    ) -> Result<T, CastError> {
        let wide = match src.kind() {
            ObjectKind::Int(i) => *i,
            ObjectKind::Bool(b) if flags.contains(CastFlags::CONVERT) => i64::from(*b),
            _ => return Err(CastError::TypeMismatch),
        };
        T::try_from(wide).map_err(|_| CastError::OutOfRange)
    }

    fn from_native(
        src: &T,
        _policy: RvPolicy,
        _cleanup: &mut CleanupList,
    ) -> Result<Object, CastError> {
        let wide = i64::try_from(*src).map_err(|_| CastError::OutOfRange)?;
        allocated(Object::int(wide))
    }
}

macro_rules! int_castable {
    ($($ty:ty),*) => {
        $(
            impl Castable for $ty {
                type Caster = IntCaster<$ty>;
            }
        )*
    };
}

int_castable!(i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);

/// Caster for `f32` and `f64`. Integers, and floats that do not fit the
/// target exactly, are accepted only under [`CastFlags::CONVERT`].
pub struct FloatCaster<T>(PhantomData<T>);

macro_rules! float_castable {
    ($($ty:ty),*) => {
        $(
            impl TypeCaster for FloatCaster<$ty> {
                type Value = $ty;

                fn descr() -> Descr {
                    Descr::name("float")
                }

                fn from_host(
                    src: &Object,
                    flags: CastFlags,
                    _cleanup: &mut CleanupList,
                ) -> Result<$ty, CastError> {
                    let convert = flags.contains(CastFlags::CONVERT);
                    match src.kind() {
                        ObjectKind::Float(x) => {
                            let narrowed = *x as $ty;
                            // Inexact narrowing (lost precision, overflow to inf) needs CONVERT.
                            if !convert && !x.is_nan() && f64::from(narrowed) != *x {
                                return Err(CastError::TypeMismatch);
                            }
                            Ok(narrowed)
                        }
                        ObjectKind::Int(i) if convert => Ok(*i as $ty),
                        _ => Err(CastError::TypeMismatch),
                    }
                }

                fn from_native(
                    src: &$ty,
                    _policy: RvPolicy,
                    _cleanup: &mut CleanupList,
                ) -> Result<Object, CastError> {
                    allocated(Object::float(f64::from(*src)))
                }
            }

            impl Castable for $ty {
                type Caster = FloatCaster<$ty>;
            }
        )*
    };
}

float_castable!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    fn decode<T: Castable>(src: &Object, flags: CastFlags) -> Result<T, CastError> {
        let mut cleanup = CleanupList::new();
        <T::Caster as TypeCaster>::from_host(src, flags, &mut cleanup)
    }

    #[test]
    fn int_range_is_checked() {
        let big = Object::int(300).unwrap();
        assert_eq!(decode::<i64>(&big, CastFlags::NONE), Ok(300));
        assert_eq!(decode::<u8>(&big, CastFlags::NONE), Err(CastError::OutOfRange));
        let neg = Object::int(-1).unwrap();
        assert_eq!(decode::<u32>(&neg, CastFlags::CONVERT), Err(CastError::OutOfRange));
    }

    #[test]
    fn bool_to_int_needs_convert() {
        let t = Object::bool(true).unwrap();
        assert_eq!(decode::<i32>(&t, CastFlags::NONE), Err(CastError::TypeMismatch));
        assert_eq!(decode::<i32>(&t, CastFlags::CONVERT), Ok(1));
        assert_eq!(decode::<bool>(&t, CastFlags::NONE), Ok(true));
    }

    #[test]
    fn int_to_float_needs_convert() {
        let three = Object::int(3).unwrap();
        assert_eq!(decode::<f64>(&three, CastFlags::NONE), Err(CastError::TypeMismatch));
        assert_eq!(decode::<f64>(&three, CastFlags::CONVERT), Ok(3.0));
        let half = Object::float(0.5).unwrap();
        assert_eq!(decode::<f32>(&half, CastFlags::NONE), Ok(0.5));
        assert_eq!(decode::<i64>(&half, CastFlags::CONVERT), Err(CastError::TypeMismatch));
    }

    #[test]
    fn inexact_f32_narrowing_needs_convert() {
        let huge = Object::float(1e300).unwrap();
        assert_eq!(decode::<f32>(&huge, CastFlags::NONE), Err(CastError::TypeMismatch));
        assert_eq!(decode::<f32>(&huge, CastFlags::CONVERT), Ok(f32::INFINITY));
        assert_eq!(decode::<f64>(&huge, CastFlags::NONE), Ok(1e300));

        let exact = Object::float(0.25).unwrap();
        assert_eq!(decode::<f32>(&exact, CastFlags::NONE), Ok(0.25));
        let nan = Object::float(f64::NAN).unwrap();
        assert!(decode::<f32>(&nan, CastFlags::NONE).unwrap().is_nan());
    }

    #[test]
    fn oversized_unsigned_fails_to_encode() {
        let mut cleanup = CleanupList::new();
        let err = IntCaster::<u64>::from_native(&u64::MAX, RvPolicy::Automatic, &mut cleanup)
            .unwrap_err();
        assert_eq!(err, CastError::OutOfRange);
    }
}
