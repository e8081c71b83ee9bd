use crate::core::choice::Choice;
use crate::core::store::{Node, Store};
use crate::core::structure::Arg;
use crate::core::term::Term;
use crate::core::value::Scalar;
use crate::error::Result;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

/// Structure pairs currently being unified. Meeting one of them again
/// means the terms are cyclic, and the pair is taken as unified.
pub(crate) type Assumed = HashSet<(Term, Term)>;

/// What it takes to unify two trail ends.
enum Step {
    Done(bool),
    Fill { wrapper: Term, value: Scalar },
    Link { var: Term, target: Term },
    Args { left: Arc<[Term]>, right: Arc<[Term]> },
}

impl Store {
    /// Attempt to make `left` and `right` equal.
    ///
    /// # Panics
    ///
    /// If either handle was not created by this store.
    pub fn unify(&mut self, left: Term, right: Term) -> Option<Choice> {
        self.attempt(|store, assumed| store.unify_terms(left, right, assumed))
    }

    /// Like [`Store::unify`], but raw scalars are wrapped first.
    ///
    /// Fails with an error only if an argument cannot become a term.
    pub fn unify_with(
        &mut self,
        left: impl Into<Arg>,
        right: impl Into<Arg>,
    ) -> Result<Option<Choice>> {
        let left = self.term(left)?;
        let right = self.term(right)?;
        Ok(self.unify(left, right))
    }

    /// Run `f`. If it succeeds, everything it bound belongs to a new
    /// choice; otherwise its partial bindings are undone on the spot.
    pub(crate) fn attempt(
        &mut self,
        f: impl FnOnce(&mut Store, &mut Assumed) -> bool,
    ) -> Option<Choice> {
        let mark = self.trail_len();
        if f(self, &mut Assumed::new()) {
            Some(self.push_choice(mark))
        } else {
            let undone = self.undo_to(mark);
            if undone > 0 && self.config().trace_bindings {
                trace!(undone, "unification failed");
            }
            None
        }
    }

    pub(crate) fn unify_terms(&mut self, left: Term, right: Term, assumed: &mut Assumed) -> bool {
        match self.step(left, right, assumed) {
            Step::Done(unified) => unified,
            Step::Fill { wrapper, value } => {
                self.fill(wrapper, value);
                true
            }
            Step::Link { var, target } => {
                if self.config().occurs_check && self.occurs(var, target) {
                    return false;
                }
                self.link(var, target);
                true
            }
            Step::Args { left, right } => self.unify_all(&left, &right, assumed),
        }
    }

    pub(crate) fn unify_all(&mut self, left: &[Term], right: &[Term], assumed: &mut Assumed) -> bool {
        left.len() == right.len()
            && left
                .iter()
                .zip(right)
                .all(|(&l, &r)| self.unify_terms(l, r, assumed))
    }

    fn step(&self, left: Term, right: Term, assumed: &mut Assumed) -> Step {
        let left = self.dereference(left);
        let right = self.dereference(right);
        if left == right {
            return Step::Done(true);
        }

        match (self.node(left), self.node(right)) {
            (Node::Value { payload: Some(x) }, Node::Value { payload: Some(y) }) => {
                Step::Done(x == y)
            }
            (Node::Value { payload: Some(x) }, Node::Value { payload: None }) => Step::Fill {
                wrapper: right,
                value: x.clone(),
            },
            (Node::Value { payload: None }, Node::Value { payload: Some(y) }) => Step::Fill {
                wrapper: left,
                value: y.clone(),
            },
            (Node::Var { .. }, _) => Step::Link {
                var: left,
                target: right,
            },
            (_, Node::Var { .. }) => Step::Link {
                var: right,
                target: left,
            },
            (Node::Structure(s), Node::Structure(t)) if s.matches(t) => {
                if assumed.insert((left, right)) {
                    Step::Args {
                        left: s.args.clone(),
                        right: t.args.clone(),
                    }
                } else {
                    Step::Done(true)
                }
            }
            _ => Step::Done(false),
        }
    }
}
