//! Choice points.
//!
//! A successful unification hands out a [`Choice`]. As long as the choice
//! is live, the bindings made for it stay visible. Retracting it is the
//! same as asking for another alternative: every binding recorded since
//! the choice was made is undone, newest first, and no alternative is
//! ever produced.

/// Proof of one successful unification.
///
/// Choices nest like the calls that produced them. Retracting an older
/// choice also retracts every newer one, and their handles become stale.
#[must_use = "dropping a choice keeps its bindings forever; retract it to undo them"]
#[derive(Debug, PartialEq, Eq)]
pub struct Choice {
    pub(crate) depth: usize,
    pub(crate) serial: u64,
}

impl Choice {
    /// Position of this choice in the stack of live choices (0 = outermost).
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// What the store remembers about a live choice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) serial: u64,
    /// Trail length when the choice was made.
    pub(crate) mark: usize,
}

/// One reversible mutation recorded on the trail.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Binding {
    /// A variable was linked to another term.
    Link(crate::core::term::Term),
    /// An absent value wrapper received a payload.
    Fill(crate::core::term::Term),
}
