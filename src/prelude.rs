pub use crate::{
    config::Config,
    core::{
        choice::Choice,
        store::{Show, Store},
        structure::{Arg, Functor, Signature, Structure},
        term::{Term, TermId, TermKind},
        value::Scalar,
    },
    error::{Result, TermError},
};
