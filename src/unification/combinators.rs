//! Unify several pairs of terms as one conjunction.
//!
//! Later pairs are unified within the scope of the earlier ones. If any
//! pair fails, the bindings made for the pairs before it are undone,
//! newest first, and the whole conjunction fails.

use crate::core::choice::Choice;
use crate::core::store::Store;
use crate::core::structure::Arg;
use crate::core::term::Term;
use crate::error::Result;
use tracing::debug;

impl Store {
    /// Unify every `(left, right)` pair. An empty list succeeds without
    /// binding anything.
    pub fn unify_pairs(&mut self, pairs: impl IntoIterator<Item = (Term, Term)>) -> Option<Choice> {
        let mut pairs = pairs.into_iter();
        self.attempt(move |store, assumed| pairs.all(|(l, r)| store.unify_terms(l, r, assumed)))
    }

    /// Like [`Store::unify_pairs`], but raw scalars are wrapped first.
    pub fn unify_pairs_with<A: Into<Arg>, B: Into<Arg>>(
        &mut self,
        pairs: impl IntoIterator<Item = (A, B)>,
    ) -> Result<Option<Choice>> {
        let pairs = pairs
            .into_iter()
            .map(|(a, b)| -> Result<(Term, Term)> { Ok((self.term(a)?, self.term(b)?)) })
            .collect::<Result<Vec<_>>>()?;
        Ok(self.unify_pairs(pairs))
    }

    /// Unify two sequences element by element.
    ///
    /// Sequences of different length fail without looking at their
    /// elements; two empty sequences succeed.
    pub fn unify_sequences(&mut self, left: &[Term], right: &[Term]) -> Option<Choice> {
        if left.len() != right.len() {
            return None;
        }
        self.attempt(|store, assumed| store.unify_all(left, right, assumed))
    }

    /// Run `body` within the scope of `choice`, then retract it.
    pub fn within<R>(&mut self, choice: Choice, body: impl FnOnce(&mut Store) -> R) -> R {
        let result = body(self);
        if let Err(err) = self.retract(choice) {
            // body backtracked past our choice point; its bindings are already gone
            debug!(%err, "scope ended after its choice was retracted");
        }
        result
    }

    /// Unify `left` and `right`, run `body` while they are unified, and
    /// undo the unification afterwards.
    ///
    /// Returns `None` without running `body` if they do not unify.
    pub fn unify_then<R>(
        &mut self,
        left: Term,
        right: Term,
        body: impl FnOnce(&mut Store) -> R,
    ) -> Option<R> {
        let choice = self.unify(left, right)?;
        Some(self.within(choice, body))
    }

    /// [`Store::unify_then`] for a list of pairs.
    pub fn unify_pairs_then<R>(
        &mut self,
        pairs: impl IntoIterator<Item = (Term, Term)>,
        body: impl FnOnce(&mut Store) -> R,
    ) -> Option<R> {
        let choice = self.unify_pairs(pairs)?;
        Some(self.within(choice, body))
    }
}
