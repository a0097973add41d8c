//! Type descriptors for diagnostics.
//!
//! Each caster contributes a [`Descr`]; composite casters combine their
//! parts' descriptors, so `HashMap<String, Vec<i64>>` renders as
//! `dict[str, list[int]]`. Descriptors never influence conversion behavior.

use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Descr {
    Name(Cow<'static, str>),
    Generic {
        name: &'static str,
        args: Vec<Descr>,
    },
    Optional(Box<Descr>),
}

impl Descr {
    pub fn name(name: impl Into<Cow<'static, str>>) -> Descr {
        Descr::Name(name.into())
    }

    pub fn generic(name: &'static str, args: impl IntoIterator<Item = Descr>) -> Descr {
        Descr::Generic {
            name,
            args: args.into_iter().collect(),
        }
    }

    pub fn optional(inner: Descr) -> Descr {
        Descr::Optional(Box::new(inner))
    }
}

impl fmt::Display for Descr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descr::Name(name) => f.write_str(name),
            Descr::Generic { name, args } => {
                write!(f, "{name}[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str("]")
            }
            Descr::Optional(inner) => write!(f, "Optional[{inner}]"),
        }
    }
}

/// Function signature text, e.g. `f(x: dict[str, int]) -> None`.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    args: Vec<(String, Descr)>,
    ret: Option<Descr>,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            ret: None,
        }
    }

    pub fn arg(mut self, name: impl Into<String>, descr: Descr) -> Self {
        self.args.push((name.into(), descr));
        self
    }

    pub fn returns(mut self, descr: Descr) -> Self {
        self.ret = Some(descr);
        self
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (name, descr)) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {descr}")?;
        }
        f.write_str(") -> ")?;
        match &self.ret {
            Some(ret) => write!(f, "{ret}"),
            None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_generics_render() {
        let d = Descr::generic(
            "dict",
            [
                Descr::name("str"),
                Descr::generic("list", [Descr::optional(Descr::name("int"))]),
            ],
        );
        assert_eq!(d.to_string(), "dict[str, list[Optional[int]]]");
    }

    #[test]
    fn signature_defaults_to_none_return() {
        let sig = Signature::new("take").arg("x", Descr::name("pkg.Movable"));
        assert_eq!(sig.to_string(), "take(x: pkg.Movable) -> None");

        let sig = Signature::new("make").returns(Descr::name("int"));
        assert_eq!(sig.to_string(), "make() -> int");
    }
}
