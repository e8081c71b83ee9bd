//! Errors raised when terms are built or inspected incorrectly.
//!
//! A failed unification is *not* an error. It is reported as `None` by
//! the unification functions.

use crate::core::structure::Signature;
use crate::core::term::TermId;
use crate::core::value::Scalar;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TermError {
    #[error("{value:?} cannot be stored in a value wrapper: it is not equal to itself")]
    NonComparable { value: Scalar },

    #[error("{signature} expects {} arguments, got {found}", .signature.arity)]
    ArityMismatch { signature: Signature, found: usize },

    #[error("term {term} has no concrete value")]
    NoValue { term: TermId },

    #[error("term {term} is not a structure")]
    NotAStructure { term: TermId },

    #[error("argument {index} is out of range for term {term} of arity {arity}")]
    ArgumentOutOfRange {
        term: TermId,
        index: usize,
        arity: usize,
    },

    #[error("choice point was already retracted")]
    StaleChoice,

    #[error("term handle #{index} does not belong to this store")]
    ForeignTerm { index: usize },
}

pub type Result<T> = std::result::Result<T, TermError>;
