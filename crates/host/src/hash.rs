//! Key identity for host dicts.

use crate::error::{raise, HostErrorKind, HostResult};
use crate::object::{Object, ObjectKind};

/// Hashable projection of a host object.
///
/// Numeric kinds that compare equal in the host (`True`, `1`, `1.0`) project
/// to the same key. Instances hash by identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashKey {
    None,
    Int(i64),
    Float(u64),
    Str(Box<str>),
    Tuple(Box<[HashKey]>),
    Identity(usize),
}

impl HashKey {
    pub fn of(obj: &Object) -> HostResult<HashKey> {
        let key = match obj.kind() {
            ObjectKind::None => HashKey::None,
            ObjectKind::Bool(b) => HashKey::Int(i64::from(*b)),
            ObjectKind::Int(i) => HashKey::Int(*i),
            ObjectKind::Float(x) => float_key(*x),
            ObjectKind::Str(s) => HashKey::Str(s.clone()),
            ObjectKind::Tuple(items) => HashKey::Tuple(
                items
                    .iter()
                    .map(HashKey::of)
                    .collect::<HostResult<Vec<_>>>()?
                    .into_boxed_slice(),
            ),
            ObjectKind::Instance(_) => HashKey::Identity(obj.id()),
            ObjectKind::List(_) | ObjectKind::Dict(_) => {
                return Err(raise(
                    HostErrorKind::TypeError,
                    format!("unhashable type: '{}'", obj.type_name()),
                ));
            }
        };
        Ok(key)
    }
}

fn float_key(x: f64) -> HashKey {
    // 2^63 is exactly representable; anything below it with no fraction fits i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if x.fract() == 0.0 && (-LIMIT..LIMIT).contains(&x) {
        HashKey::Int(x as i64)
    } else {
        HashKey::Float(x.to_bits())
    }
}
