//! Reference-counted host objects.
//!
//! [`Object`] is an owning reference: cloning it adds a reference, dropping
//! it removes one, and the underlying storage is released when the last
//! reference goes away. A borrowed `&Object` plays the role of a non-owning
//! handle.

use std::any::Any;
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::alloc;
use crate::dict::DictObject;
use crate::error::{raise, HostErrorKind, HostResult};
use crate::instance::Instance;

pub enum ObjectKind {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Box<str>),
    Tuple(Box<[Object]>),
    List(RefCell<Vec<Object>>),
    Dict(RefCell<DictObject>),
    Instance(Instance),
}

struct ObjectData {
    kind: ObjectKind,
}

impl Drop for ObjectData {
    fn drop(&mut self) {
        alloc::release();
    }
}

#[derive(Clone)]
pub struct Object(Rc<ObjectData>);

thread_local! {
    static VISITING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// Marks a container as being traversed by a recursive renderer. Entering a
/// container that is already on the stack yields `None`.
pub(crate) struct Visit(usize);

impl Visit {
    pub(crate) fn enter(obj: &Object) -> Option<Visit> {
        let id = obj.id();
        VISITING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if stack.contains(&id) {
                return None;
            }
            stack.push(id);
            Some(Visit(id))
        })
    }
}

impl Drop for Visit {
    fn drop(&mut self) {
        VISITING.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|id| *id == self.0) {
                stack.remove(pos);
            }
        });
    }
}

impl Object {
    pub(crate) fn alloc(kind: ObjectKind) -> HostResult<Object> {
        alloc::acquire()?;
        Ok(Object(Rc::new(ObjectData { kind })))
    }

    pub fn none() -> HostResult<Object> {
        Self::alloc(ObjectKind::None)
    }

    pub fn bool(value: bool) -> HostResult<Object> {
        Self::alloc(ObjectKind::Bool(value))
    }

    pub fn int(value: i64) -> HostResult<Object> {
        Self::alloc(ObjectKind::Int(value))
    }

    pub fn float(value: f64) -> HostResult<Object> {
        Self::alloc(ObjectKind::Float(value))
    }

    pub fn str(value: &str) -> HostResult<Object> {
        Self::alloc(ObjectKind::Str(value.into()))
    }

    pub fn tuple(items: Vec<Object>) -> HostResult<Object> {
        Self::alloc(ObjectKind::Tuple(items.into_boxed_slice()))
    }

    pub fn list(items: Vec<Object>) -> HostResult<Object> {
        Self::alloc(ObjectKind::List(RefCell::new(items)))
    }

    /// Wraps a native value as an instance of the bound class `class`.
    pub fn instance<T: Any>(class: &'static str, value: T) -> HostResult<Object> {
        Self::alloc(ObjectKind::Instance(Instance::new(class, value)))
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.0.kind
    }

    /// Host-level type name, as shown in error messages.
    pub fn type_name(&self) -> &'static str {
        match self.kind() {
            ObjectKind::None => "NoneType",
            ObjectKind::Bool(_) => "bool",
            ObjectKind::Int(_) => "int",
            ObjectKind::Float(_) => "float",
            ObjectKind::Str(_) => "str",
            ObjectKind::Tuple(_) => "tuple",
            ObjectKind::List(_) => "list",
            ObjectKind::Dict(_) => "dict",
            ObjectKind::Instance(inst) => inst.class(),
        }
    }

    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Identity comparison.
    pub fn is(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }

    pub fn is_none(&self) -> bool {
        matches!(self.kind(), ObjectKind::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.kind() {
            ObjectKind::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self.kind() {
            ObjectKind::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self.kind() {
            ObjectKind::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.kind() {
            ObjectKind::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Object]> {
        match self.kind() {
            ObjectKind::Tuple(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<Ref<'_, Vec<Object>>> {
        match self.kind() {
            ObjectKind::List(items) => Some(items.borrow()),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<Ref<'_, DictObject>> {
        match self.kind() {
            ObjectKind::Dict(dict) => Some(dict.borrow()),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self.kind() {
            ObjectKind::Instance(inst) => Some(inst),
            _ => None,
        }
    }

    /// Length of sized kinds; `None` for scalars and instances.
    pub fn len(&self) -> Option<usize> {
        match self.kind() {
            ObjectKind::Str(s) => Some(s.chars().count()),
            ObjectKind::Tuple(items) => Some(items.len()),
            ObjectKind::List(items) => Some(items.borrow().len()),
            ObjectKind::Dict(dict) => Some(dict.borrow().len()),
            _ => None,
        }
    }

    pub fn list_append(&self, item: Object) -> HostResult<()> {
        match self.kind() {
            ObjectKind::List(items) => {
                items.borrow_mut().push(item);
                Ok(())
            }
            _ => Err(raise(
                HostErrorKind::TypeError,
                format!("'{}' object has no attribute 'append'", self.type_name()),
            )),
        }
    }
}

fn write_seq(f: &mut fmt::Formatter<'_>, items: &[Object]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item:?}")?;
    }
    Ok(())
}

/// Renders the host-level representation, e.g. `{'a': [1, 2.5]}`.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            ObjectKind::None => f.write_str("None"),
            ObjectKind::Bool(true) => f.write_str("True"),
            ObjectKind::Bool(false) => f.write_str("False"),
            ObjectKind::Int(i) => write!(f, "{i}"),
            ObjectKind::Float(x) => write!(f, "{x:?}"),
            ObjectKind::Str(s) => write!(f, "'{s}'"),
            ObjectKind::Tuple(items) => {
                f.write_str("(")?;
                write_seq(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            ObjectKind::List(items) => {
                let Some(_visit) = Visit::enter(self) else {
                    return f.write_str("[...]");
                };
                f.write_str("[")?;
                write_seq(f, &items.borrow())?;
                f.write_str("]")
            }
            ObjectKind::Dict(dict) => {
                let Some(_visit) = Visit::enter(self) else {
                    return f.write_str("{...}");
                };
                f.write_str("{")?;
                for (i, (key, value)) in dict.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value:?}")?;
                }
                f.write_str("}")
            }
            ObjectKind::Instance(inst) => write!(f, "{inst:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_accessors_are_kind_strict() {
        let one = Object::int(1).unwrap();
        assert_eq!(one.as_int(), Some(1));
        assert_eq!(one.as_float(), None);
        assert_eq!(one.as_bool(), None);

        let flag = Object::bool(true).unwrap();
        assert_eq!(flag.as_bool(), Some(true));
        assert_eq!(flag.as_int(), None);
        assert_eq!(flag.type_name(), "bool");
    }

    #[test]
    fn clone_shares_identity() {
        let a = Object::str("x").unwrap();
        let b = a.clone();
        assert!(a.is(&b));
        assert_eq!(a.ref_count(), 2);
        let c = Object::str("x").unwrap();
        assert!(!a.is(&c));
    }

    #[test]
    fn list_append_rejects_non_lists() {
        let list = Object::list(Vec::new()).unwrap();
        list.list_append(Object::int(3).unwrap()).unwrap();
        assert_eq!(list.len(), Some(1));

        let tuple = Object::tuple(Vec::new()).unwrap();
        let err = tuple.list_append(Object::int(3).unwrap()).unwrap_err();
        assert_eq!(err.kind, HostErrorKind::TypeError);
        crate::error::clear();
    }

    #[test]
    fn debug_renders_host_repr() {
        let items = vec![
            Object::int(1).unwrap(),
            Object::float(2.5).unwrap(),
            Object::str("s").unwrap(),
            Object::none().unwrap(),
        ];
        let list = Object::list(items).unwrap();
        assert_eq!(format!("{list:?}"), "[1, 2.5, 's', None]");

        let single = Object::tuple(vec![Object::bool(false).unwrap()]).unwrap();
        assert_eq!(format!("{single:?}"), "(False,)");

        let inst = Object::instance("pkg.Point", (1, 2)).unwrap();
        assert_eq!(format!("{inst:?}"), "<pkg.Point object>");
    }

    #[test]
    fn self_referencing_containers_render_ellipsis() {
        let list = Object::list(Vec::new()).unwrap();
        list.list_append(list.clone()).unwrap();
        list.list_append(Object::int(1).unwrap()).unwrap();
        assert_eq!(format!("{list:?}"), "[[...], 1]");

        let dict = crate::dict::new().unwrap();
        crate::dict::set_item(&dict, Object::int(1).unwrap(), dict.clone()).unwrap();
        crate::dict::set_item(&dict, Object::int(2).unwrap(), list.clone()).unwrap();
        assert_eq!(format!("{dict:?}"), "{1: {...}, 2: [[...], 1]}");

        // Siblings sharing one container are not cycles.
        let shared = Object::list(vec![Object::int(7).unwrap()]).unwrap();
        let pair = Object::tuple(vec![shared.clone(), shared]).unwrap();
        assert_eq!(format!("{pair:?}"), "([7], [7])");
    }

    #[test]
    fn instances_report_their_native_type() {
        let obj = Object::instance("pkg.Point", (1_i32, 2_i32)).unwrap();
        let inst = obj.as_instance().unwrap();
        assert!(inst.is::<(i32, i32)>());
        assert!(!inst.is::<i32>());
        assert_eq!(inst.downcast_ref::<(i32, i32)>(), Some(&(1, 2)));
    }

    #[test]
    fn len_is_defined_for_sized_kinds_only() {
        assert_eq!(Object::str("héllo").unwrap().len(), Some(5));
        assert_eq!(Object::int(5).unwrap().len(), None);
        assert_eq!(Object::none().unwrap().len(), None);
    }
}
