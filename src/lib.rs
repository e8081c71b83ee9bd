//! Reversible unification of logic variables.
//!
//! Terms (variables, immutable values and structures) live in a
//! [`Store`](core::store::Store). Unifying two terms either fails and
//! changes nothing, or succeeds and hands out a
//! [`Choice`](core::choice::Choice). Retracting the choice undoes exactly
//! the bindings the unification made, which is all a backtracking search
//! needs to try the next alternative.
//!
//! ```
//! use trail_unify::prelude::*;
//!
//! let mut store = Store::new();
//! let x = store.var();
//! let abc = store.value("abc").unwrap();
//!
//! let choice = store.unify(x, abc).unwrap();
//! assert_eq!(store.display(x), "abc");
//!
//! store.retract(choice).unwrap();
//! assert!(store.is_unbound(x));
//! ```

#[macro_use]
pub mod macros;
pub mod config;
pub mod core;
pub mod error;
pub mod prelude;
pub mod unification;

#[cfg(test)]
mod testing;
