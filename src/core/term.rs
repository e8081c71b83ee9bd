use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

static TERM_COUNTER: AtomicUsize = AtomicUsize::new(0);
static STORE_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Process-wide identity of a term.
///
/// Every term created by any store receives a fresh id, so ids keep
/// increasing across stores. The id is what an unbound variable shows
/// when it is displayed.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TermId(usize);

impl TermId {
    /// Draw the next unused id.
    pub(crate) fn fresh() -> Self {
        // The C++ reference says: "typical use for relaxed memory is incrementing counters"
        TermId(TERM_COUNTER.fetch_add(1, Ordering::Relaxed) + 1)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "_{}", self.0)
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "_{}", self.0)
    }
}

/// Identity of a [`Store`](crate::core::store::Store), carried by every
/// handle it gives out.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub(crate) struct StoreId(u32);

impl StoreId {
    pub(crate) fn fresh() -> Self {
        StoreId(STORE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to a term owned by a [`Store`](crate::core::store::Store).
///
/// Handles are cheap to copy. Two handles are equal only if they refer
/// to the very same term; whether two terms are *unified* is answered by
/// [`Store::equal`](crate::core::store::Store::equal).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Term {
    pub(crate) store: StoreId,
    pub(crate) index: u32,
}

impl Term {
    pub(crate) fn index(self) -> usize {
        self.index as usize
    }
}

/// The closed set of term variants.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TermKind {
    Var,
    Value,
    Structure,
}
