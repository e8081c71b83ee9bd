//! Immutable scalar payloads carried by value wrappers.

use std::fmt::{self, Formatter};
use std::sync::Arc;

/// An immutable scalar.
///
/// Every variant is immutable once built; text and tuples share their
/// storage instead of copying it.
///
/// Equality is numeric across `Int` and `Float` (`1 == 1.0`, `1 != 1.5`),
/// and a `Char` equals the one-character `Str` holding it. Tuples compare
/// item by item under the same rules.
#[derive(Clone, Debug)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Char(char),
    Str(Arc<str>),
    Tuple(Arc<[Scalar]>),
}

impl Scalar {
    pub fn tuple(items: impl IntoIterator<Item = impl Into<Scalar>>) -> Self {
        Scalar::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Returns `false` if the scalar contains a NaN anywhere.
    ///
    /// A NaN is not equal to itself, so it can never take part in
    /// unification.
    pub fn is_comparable(&self) -> bool {
        match self {
            Scalar::Float(x) => !x.is_nan(),
            Scalar::Tuple(items) => items.iter().all(Scalar::is_comparable),
            _ => true,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn fmt_nested(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Scalar::Str(s) => write!(f, "{:?}", s),
            Scalar::Char(c) => write!(f, "{:?}", c),
            other => write!(f, "{}", other),
        }
    }
}

/// `true` if the float `x` is exactly the integer `i`.
fn int_eq_float(i: i64, x: f64) -> bool {
    // i64::MIN as f64 is exact; 2^63 is the first float above i64::MAX
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    x.fract() == 0.0 && (-BOUND..BOUND).contains(&x) && x as i64 == i
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Scalar) -> bool {
        use Scalar::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(i), Float(x)) | (Float(x), Int(i)) => int_eq_float(*i, *x),
            (Char(a), Char(b)) => a == b,
            (Str(a), Str(b)) => a == b,
            (Char(c), Str(s)) | (Str(s), Char(c)) => {
                let mut chars = s.chars();
                chars.next() == Some(*c) && chars.next().is_none()
            }
            (Tuple(a), Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Char(c) => write!(f, "{}", c),
            Scalar::Str(s) => write!(f, "{}", s),
            Scalar::Tuple(items) => {
                write!(f, "(")?;
                let mut iter = items.iter();
                if let Some(first) = iter.next() {
                    first.fmt_nested(f)?;
                }
                for item in iter {
                    write!(f, ", ")?;
                    item.fmt_nested(f)?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}

macro_rules! scalar_from {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for Scalar {
                fn from(x: $t) -> Self {
                    Scalar::$variant(x.into())
                }
            }
        )*
    };
}

scalar_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    char => Char,
    &str => Str,
    String => Str,
    Arc<str> => Str,
}

impl From<Vec<Scalar>> for Scalar {
    fn from(items: Vec<Scalar>) -> Self {
        Scalar::Tuple(items.into())
    }
}

impl<A: Into<Scalar>, B: Into<Scalar>> From<(A, B)> for Scalar {
    fn from((a, b): (A, B)) -> Self {
        Scalar::Tuple(vec![a.into(), b.into()].into())
    }
}

impl<A: Into<Scalar>, B: Into<Scalar>, C: Into<Scalar>> From<(A, B, C)> for Scalar {
    fn from((a, b, c): (A, B, C)) -> Self {
        Scalar::Tuple(vec![a.into(), b.into(), c.into()].into())
    }
}

impl PartialEq<i64> for Scalar {
    fn eq(&self, other: &i64) -> bool {
        *self == Scalar::Int(*other)
    }
}

impl PartialEq<i32> for Scalar {
    fn eq(&self, other: &i32) -> bool {
        *self == Scalar::Int(i64::from(*other))
    }
}

impl PartialEq<&str> for Scalar {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<bool> for Scalar {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}
