//! Unification and its conjunctive combinators.
//!
//! Every entry point follows the same contract: `None` means the terms
//! cannot be made equal and nothing was changed; `Some(choice)` means they
//! now are, and retracting `choice` undoes exactly the bindings that made
//! them so.

pub mod combinators;
pub mod primitive;
