//! Macros for building terms

/// Bind fresh unbound variables of a store.
///
/// `fresh!(store; x, y, z);` declares `x`, `y` and `z` in the current scope.
#[macro_export]
macro_rules! fresh {
    ($store:expr; $($x:ident),+ $(,)?) => {
        $( let $x = $store.var(); )+
    };
}

/// Build a structure in a store.
///
/// `structure!(store, point(1, x, _))` creates the structure `point` with
/// the value 1, the term `x` and a fresh variable as arguments. Arguments
/// must be single tokens; use [`Store::structure`](crate::core::store::Store::structure)
/// for anything more involved. Evaluates to a `Result<Term, TermError>`.
#[macro_export]
macro_rules! structure {
    (@arg _) => {
        $crate::prelude::Arg::Fresh
    };

    (@arg $arg:expr) => {
        $crate::prelude::Arg::from($arg)
    };

    ($store:expr, $functor:ident($($arg:tt),* $(,)?)) => {{
        let args: ::std::vec::Vec<$crate::prelude::Arg> =
            ::std::vec![$($crate::structure!(@arg $arg)),*];
        $store.structure(stringify!($functor), args)
    }};
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn fresh_declares_unbound_variables() {
        let mut store = Store::new();
        fresh!(store; x, y);
        assert!(store.is_unbound(x));
        assert!(store.is_unbound(y));
        assert_ne!(x, y);
    }

    #[test]
    fn structure_wraps_literals_and_terms() {
        let mut store = Store::new();
        fresh!(store; x);
        let s = structure!(store, point(1, x, "label")).unwrap();
        assert_eq!(store.functor(s).unwrap().name(), "point");
        assert_eq!(store.arg(s, 1).unwrap(), x);
        let expected = format!("point(1, {}, label)", store.id(x));
        assert_eq!(store.display(s), expected);
    }

    #[test]
    fn underscore_is_a_fresh_variable() {
        let mut store = Store::new();
        let s = structure!(store, pair(_, _)).unwrap();
        let args = store.args(s).unwrap().to_vec();
        assert!(store.is_unbound(args[0]));
        assert_ne!(args[0], args[1]);
    }

    #[test]
    fn structure_without_arguments() {
        let mut store = Store::new();
        let s = structure!(store, nil()).unwrap();
        assert_eq!(store.arity(s).unwrap(), 0);
        assert_eq!(store.display(s), "nil()");
    }
}
