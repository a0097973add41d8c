//! JSON bridge for building and inspecting host objects.

use serde_json::{Map, Number, Value};

use crate::dict;
use crate::error::{raise, HostErrorKind, HostResult};
use crate::object::{Object, ObjectKind, Visit};

impl Object {
    /// Builds a host object from a JSON value. Objects become dicts with
    /// string keys in document order.
    pub fn from_json(value: &Value) -> HostResult<Object> {
        match value {
            Value::Null => Object::none(),
            Value::Bool(b) => Object::bool(*b),
            Value::Number(n) => number_to_object(n),
            Value::String(s) => Object::str(s),
            Value::Array(items) => {
                let items = items
                    .iter()
                    .map(Object::from_json)
                    .collect::<HostResult<Vec<_>>>()?;
                Object::list(items)
            }
            Value::Object(map) => {
                let out = dict::new()?;
                for (key, value) in map {
                    dict::set_item(&out, Object::str(key)?, Object::from_json(value)?)?;
                }
                Ok(out)
            }
        }
    }

    /// Renders a host object as JSON. Tuples become arrays; dict keys must be
    /// strings; instances are not representable.
    pub fn to_json(&self) -> HostResult<Value> {
        let _visit = match self.kind() {
            ObjectKind::List(_) | ObjectKind::Dict(_) => Some(Visit::enter(self).ok_or_else(|| {
                raise(HostErrorKind::ValueError, "Circular reference detected")
            })?),
            _ => None,
        };
        let value = match self.kind() {
            ObjectKind::None => Value::Null,
            ObjectKind::Bool(b) => Value::Bool(*b),
            ObjectKind::Int(i) => Value::from(*i),
            ObjectKind::Float(x) => Number::from_f64(*x).map(Value::Number).ok_or_else(|| {
                raise(HostErrorKind::ValueError, format!("{x} is not JSON-representable"))
            })?,
            ObjectKind::Str(s) => Value::String(s.to_string()),
            ObjectKind::Tuple(items) => {
                Value::Array(items.iter().map(Object::to_json).collect::<HostResult<_>>()?)
            }
            ObjectKind::List(items) => Value::Array(
                items
                    .borrow()
                    .iter()
                    .map(Object::to_json)
                    .collect::<HostResult<_>>()?,
            ),
            ObjectKind::Dict(cell) => {
                let dict = cell.borrow();
                let mut map = Map::with_capacity(dict.len());
                for (key, value) in dict.iter() {
                    let Some(key) = key.as_str() else {
                        return Err(raise(
                            HostErrorKind::TypeError,
                            format!("keys must be str, not {}", key.type_name()),
                        ));
                    };
                    map.insert(key.to_string(), value.to_json()?);
                }
                Value::Object(map)
            }
            ObjectKind::Instance(inst) => {
                return Err(raise(
                    HostErrorKind::TypeError,
                    format!("Object of type {} is not JSON serializable", inst.class()),
                ));
            }
        };
        Ok(value)
    }
}

fn number_to_object(n: &Number) -> HostResult<Object> {
    if let Some(i) = n.as_i64() {
        Object::int(i)
    } else if n.is_u64() {
        Err(raise(
            HostErrorKind::OverflowError,
            format!("integer {n} out of range"),
        ))
    } else {
        Object::float(n.as_f64().unwrap_or(f64::NAN))
    }
}
