use crate::core::term::Term;
use crate::core::value::Scalar;
use std::fmt;
use std::sync::Arc;

/// The label of a structure.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Functor(Arc<str>);

impl Functor {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Functor(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Functor {
    fn from(name: &str) -> Self {
        Functor::new(name)
    }
}

impl From<String> for Functor {
    fn from(name: String) -> Self {
        Functor::new(name)
    }
}

impl fmt::Debug for Functor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for Functor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Functor together with the number of arguments it expects.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Signature {
    pub functor: Functor,
    pub arity: usize,
}

impl Signature {
    pub fn new(functor: impl Into<Functor>, arity: usize) -> Self {
        Signature {
            functor: functor.into(),
            arity,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.functor, self.arity)
    }
}

/// A compound term. Functor and arity never change; only the
/// arguments may become more bound through unification.
#[derive(Clone, Debug)]
pub struct Structure {
    pub(crate) functor: Functor,
    pub(crate) args: Arc<[Term]>,
}

impl Structure {
    pub fn functor(&self) -> &Functor {
        &self.functor
    }

    pub fn args(&self) -> &[Term] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Same functor and same arity.
    pub fn matches(&self, other: &Structure) -> bool {
        self.arity() == other.arity() && self.functor == other.functor
    }
}

/// Anything that can stand where a term is expected.
///
/// Raw scalars get wrapped in a value wrapper, and `Fresh` (or `None`)
/// becomes a new unbound variable.
#[derive(Clone, Debug)]
pub enum Arg {
    Term(Term),
    Scalar(Scalar),
    Fresh,
}

impl From<Term> for Arg {
    fn from(t: Term) -> Self {
        Arg::Term(t)
    }
}

impl From<&Term> for Arg {
    fn from(t: &Term) -> Self {
        Arg::Term(*t)
    }
}

impl From<Scalar> for Arg {
    fn from(x: Scalar) -> Self {
        Arg::Scalar(x)
    }
}

impl From<Option<Term>> for Arg {
    fn from(t: Option<Term>) -> Self {
        t.map(Arg::Term).unwrap_or(Arg::Fresh)
    }
}

macro_rules! arg_from_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Arg {
                fn from(x: $t) -> Self {
                    Arg::Scalar(x.into())
                }
            }
        )*
    };
}

arg_from_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, char, &str, String);
