//! The term store owns every term and the trail of bindings.
//!
//! Terms live in an arena and refer to each other by [`Term`] handle. A
//! variable's link and a value wrapper's payload are the only mutable
//! parts, and they are only written through [`Store::link`] and
//! [`Store::fill`], which record the change on the trail so that
//! [`Store::retract`] can undo it.

use crate::config::Config;
use crate::core::choice::{Binding, Choice, Frame};
use crate::core::structure::{Arg, Functor, Signature, Structure};
use crate::core::term::{StoreId, Term, TermId, TermKind};
use crate::core::value::Scalar;
use crate::error::{Result, TermError};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

#[derive(Clone, Debug)]
pub(crate) enum Node {
    Var { next: Option<Term> },
    Value { payload: Option<Scalar> },
    Structure(Structure),
}

#[derive(Clone, Debug)]
struct Slot {
    id: TermId,
    node: Node,
}

/// Arena of terms plus the trail that makes bindings reversible.
///
/// Handles carry the identity of the store that made them. Accessors that
/// return a `Result` report a handle from another store as
/// [`TermError::ForeignTerm`]; the others panic on it.
#[derive(Debug)]
pub struct Store {
    ident: StoreId,
    slots: Vec<Slot>,
    trail: Vec<Binding>,
    choices: Vec<Frame>,
    next_serial: u64,
    config: Config,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Store {
            ident: StoreId::fresh(),
            slots: Vec::new(),
            trail: Vec::new(),
            choices: Vec::new(),
            next_serial: 0,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of terms created so far.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns `true` if `term` was created by this store.
    pub fn contains(&self, term: Term) -> bool {
        term.store == self.ident && term.index() < self.slots.len()
    }

    fn check(&self, term: Term) -> Result<Term> {
        if self.contains(term) {
            Ok(term)
        } else {
            Err(TermError::ForeignTerm {
                index: term.index(),
            })
        }
    }

    /// # Panics
    ///
    /// If the store already holds more than `u32::MAX` terms.
    fn alloc(&mut self, node: Node) -> Term {
        let Some(index) = next_index(self.slots.len()) else {
            panic!("term store is full");
        };
        self.slots.push(Slot {
            id: TermId::fresh(),
            node,
        });
        Term {
            store: self.ident,
            index,
        }
    }

    fn slot(&self, term: Term) -> &Slot {
        assert!(
            term.store == self.ident,
            "term handle #{} belongs to another store",
            term.index()
        );
        &self.slots[term.index()]
    }

    fn slot_mut(&mut self, term: Term) -> &mut Slot {
        assert!(
            term.store == self.ident,
            "term handle #{} belongs to another store",
            term.index()
        );
        &mut self.slots[term.index()]
    }

    pub(crate) fn node(&self, term: Term) -> &Node {
        &self.slot(term).node
    }

    /// Create a fresh unbound variable.
    pub fn var(&mut self) -> Term {
        self.alloc(Node::Var { next: None })
    }

    /// Create `n` fresh unbound variables.
    pub fn vars(&mut self, n: usize) -> Vec<Term> {
        (0..n).map(|_| self.var()).collect()
    }

    /// Create a value wrapper without a payload.
    pub fn absent_value(&mut self) -> Term {
        self.alloc(Node::Value { payload: None })
    }

    /// Create a value wrapper holding `value`.
    pub fn value(&mut self, value: impl Into<Scalar>) -> Result<Term> {
        self.make_value(Some(value.into()))
    }

    /// Create a value wrapper; `None` leaves it uninstantiated.
    pub fn make_value(&mut self, payload: Option<Scalar>) -> Result<Term> {
        if let Some(value) = &payload {
            if !value.is_comparable() {
                return Err(TermError::NonComparable {
                    value: value.clone(),
                });
            }
        }
        Ok(self.alloc(Node::Value { payload }))
    }

    /// Turn an argument into a term, wrapping scalars and creating
    /// variables for fresh slots.
    pub fn term(&mut self, arg: impl Into<Arg>) -> Result<Term> {
        match arg.into() {
            Arg::Term(t) => self.check(t),
            Arg::Scalar(x) => self.value(x),
            Arg::Fresh => Ok(self.var()),
        }
    }

    /// Create a structure `functor(args...)`.
    pub fn structure<A: Into<Arg>>(
        &mut self,
        functor: impl Into<Functor>,
        args: impl IntoIterator<Item = A>,
    ) -> Result<Term> {
        let args = args
            .into_iter()
            .map(|a| self.term(a))
            .collect::<Result<Vec<_>>>()?;
        Ok(self.alloc(Node::Structure(Structure {
            functor: functor.into(),
            args: args.into(),
        })))
    }

    /// Like [`Store::structure`], but rejects an argument count that
    /// differs from the signature's arity.
    pub fn structure_of<A: Into<Arg>>(
        &mut self,
        signature: &Signature,
        args: impl IntoIterator<Item = A>,
    ) -> Result<Term> {
        let args: Vec<Arg> = args.into_iter().map(Into::into).collect();
        if args.len() != signature.arity {
            return Err(TermError::ArityMismatch {
                signature: signature.clone(),
                found: args.len(),
            });
        }
        self.structure(signature.functor.clone(), args)
    }

    pub fn id(&self, term: Term) -> TermId {
        self.slot(term).id
    }

    /// Follow variable links to the end of the trail.
    ///
    /// The end is either an unbound variable or a non-variable term.
    pub fn dereference(&self, term: Term) -> Term {
        let mut term = term;
        while let Node::Var { next: Some(next) } = self.node(term) {
            term = *next;
        }
        term
    }

    /// Variant of the term at the end of the trail.
    pub fn kind(&self, term: Term) -> TermKind {
        match self.node(self.dereference(term)) {
            Node::Var { .. } => TermKind::Var,
            Node::Value { .. } => TermKind::Value,
            Node::Structure(_) => TermKind::Structure,
        }
    }

    /// `true` if `term` is a variable without a link.
    pub fn is_unbound(&self, term: Term) -> bool {
        matches!(self.node(term), Node::Var { next: None })
    }

    pub fn has_value(&self, term: Term) -> bool {
        self.try_value(term).is_some()
    }

    pub fn try_value(&self, term: Term) -> Option<&Scalar> {
        match self.node(self.dereference(term)) {
            Node::Value { payload } => payload.as_ref(),
            _ => None,
        }
    }

    pub fn value_of(&self, term: Term) -> Result<&Scalar> {
        self.try_value(term).ok_or_else(|| TermError::NoValue {
            term: self.id(self.dereference(term)),
        })
    }

    pub fn values_of(&self, terms: &[Term]) -> Result<Vec<Scalar>> {
        terms.iter().map(|&t| self.value_of(t).cloned()).collect()
    }

    /// Structure at the end of the trail.
    pub fn structure_at(&self, term: Term) -> Result<&Structure> {
        let end = self.dereference(term);
        match self.node(end) {
            Node::Structure(s) => Ok(s),
            _ => Err(TermError::NotAStructure { term: self.id(end) }),
        }
    }

    pub fn functor(&self, term: Term) -> Result<&Functor> {
        self.structure_at(term).map(Structure::functor)
    }

    pub fn arity(&self, term: Term) -> Result<usize> {
        self.structure_at(term).map(Structure::arity)
    }

    pub fn args(&self, term: Term) -> Result<&[Term]> {
        self.structure_at(term).map(Structure::args)
    }

    pub fn arg(&self, term: Term, index: usize) -> Result<Term> {
        let s = self.structure_at(term)?;
        s.args()
            .get(index)
            .copied()
            .ok_or_else(|| TermError::ArgumentOutOfRange {
                term: self.id(self.dereference(term)),
                index,
                arity: s.arity(),
            })
    }

    /// `true` if no unbound variable or absent value is reachable from `term`.
    pub fn is_ground(&self, term: Term) -> bool {
        self.is_ground_in(term, &mut Vec::new())
    }

    fn is_ground_in(&self, term: Term, path: &mut Vec<Term>) -> bool {
        let end = self.dereference(term);
        match self.node(end) {
            Node::Var { .. } => false,
            Node::Value { payload } => payload.is_some(),
            Node::Structure(s) => {
                if path.contains(&end) {
                    return true;
                }
                path.push(end);
                let ground = s.args().iter().all(|&a| self.is_ground_in(a, path));
                path.pop();
                ground
            }
        }
    }

    /// Two terms are equal if their trail ends are the same term, or
    /// hold equal values, or are structures with the same functor and
    /// pairwise equal arguments.
    pub fn equal(&self, a: Term, b: Term) -> bool {
        self.equal_in(a, b, &mut HashSet::new())
    }

    fn equal_in(&self, a: Term, b: Term, assumed: &mut HashSet<(Term, Term)>) -> bool {
        let a = self.dereference(a);
        let b = self.dereference(b);
        if a == b {
            return true;
        }
        match (self.node(a), self.node(b)) {
            (Node::Value { payload: Some(x) }, Node::Value { payload: Some(y) }) => x == y,
            (Node::Structure(s), Node::Structure(t)) => {
                if !s.matches(t) {
                    return false;
                }
                // a pair already under comparison is equal unless shown otherwise
                if !assumed.insert((a, b)) {
                    return true;
                }
                s.args()
                    .iter()
                    .zip(t.args())
                    .all(|(&x, &y)| self.equal_in(x, y, assumed))
            }
            _ => false,
        }
    }

    /// Returns `true` if the unbound variable `var` is reachable from `term`.
    pub fn occurs(&self, var: Term, term: Term) -> bool {
        self.occurs_in(var, term, &mut HashSet::new())
    }

    fn occurs_in(&self, var: Term, term: Term, seen: &mut HashSet<Term>) -> bool {
        let end = self.dereference(term);
        if end == var {
            return true;
        }
        match self.node(end) {
            Node::Structure(s) if seen.insert(end) => {
                s.args().iter().any(|&a| self.occurs_in(var, a, seen))
            }
            _ => false,
        }
    }

    /// Textual form of a term as it currently stands.
    pub fn display(&self, term: Term) -> String {
        self.show(term).to_string()
    }

    /// Lazily formatted view of a term.
    pub fn show(&self, term: Term) -> Show<'_> {
        Show { store: self, term }
    }

    fn write_term(&self, f: &mut fmt::Formatter, term: Term, path: &mut Vec<Term>) -> fmt::Result {
        let end = self.dereference(term);
        match self.node(end) {
            Node::Value { payload: Some(x) } => write!(f, "{}", x),
            Node::Structure(s) => {
                if path.contains(&end) {
                    return write!(f, "...");
                }
                path.push(end);
                write!(f, "{}(", s.functor())?;
                let mut args = s.args().iter();
                if let Some(&first) = args.next() {
                    self.write_term(f, first, path)?;
                }
                for &arg in args {
                    write!(f, ", ")?;
                    self.write_term(f, arg, path)?;
                }
                path.pop();
                write!(f, ")")
            }
            _ => write!(f, "{}", self.id(end)),
        }
    }

    /// Number of bindings currently on the trail.
    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Number of live choice points.
    pub fn depth(&self) -> usize {
        self.choices.len()
    }

    /// Link the unbound variable `var` to `target` and record it.
    pub(crate) fn link(&mut self, var: Term, target: Term) {
        debug_assert!(self.is_unbound(var));
        if self.config.trace_bindings {
            trace!(var = %self.id(var), target = %self.id(target), "link");
        }
        self.slot_mut(var).node = Node::Var { next: Some(target) };
        self.trail.push(Binding::Link(var));
    }

    /// Give the absent value wrapper `wrapper` a payload and record it.
    pub(crate) fn fill(&mut self, wrapper: Term, value: Scalar) {
        if self.config.trace_bindings {
            trace!(wrapper = %self.id(wrapper), value = %&value, "fill");
        }
        self.slot_mut(wrapper).node = Node::Value {
            payload: Some(value),
        };
        self.trail.push(Binding::Fill(wrapper));
    }

    /// Undo bindings, newest first, until the trail is `mark` long.
    pub(crate) fn undo_to(&mut self, mark: usize) -> usize {
        let undone = self.trail.split_off(mark.min(self.trail.len()));
        for &binding in undone.iter().rev() {
            let term = match binding {
                Binding::Link(var) => {
                    self.slot_mut(var).node = Node::Var { next: None };
                    var
                }
                Binding::Fill(wrapper) => {
                    self.slot_mut(wrapper).node = Node::Value { payload: None };
                    wrapper
                }
            };
            if self.config.trace_bindings {
                trace!(term = %self.id(term), ?binding, "undo");
            }
        }
        undone.len()
    }

    /// Open a choice point covering every binding made after `mark`.
    pub(crate) fn push_choice(&mut self, mark: usize) -> Choice {
        let serial = self.next_serial;
        self.next_serial += 1;
        let depth = self.choices.len();
        self.choices.push(Frame { serial, mark });
        Choice { depth, serial }
    }

    /// Ask for another alternative.
    ///
    /// Undoes every binding made since `choice` was produced (including
    /// those of newer choices, which become stale) and returns how many
    /// bindings were undone. There never is another alternative.
    pub fn retract(&mut self, choice: Choice) -> Result<usize> {
        match self.choices.get(choice.depth) {
            Some(frame) if frame.serial == choice.serial => {
                let mark = frame.mark;
                let nested = self.choices.len() - choice.depth - 1;
                self.choices.truncate(choice.depth);
                let undone = self.undo_to(mark);
                debug!(depth = choice.depth, nested, undone, "retracted choice");
                Ok(undone)
            }
            _ => Err(TermError::StaleChoice),
        }
    }
}

/// Index of the next term in a store that holds `len` terms.
fn next_index(len: usize) -> Option<u32> {
    u32::try_from(len).ok()
}

impl Default for Store {
    fn default() -> Self {
        Store::with_config(Config::default())
    }
}

/// See [`Store::show`].
pub struct Show<'a> {
    store: &'a Store,
    term: Term,
}

impl fmt::Display for Show<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.store.write_term(f, self.term, &mut Vec::new())
    }
}

impl fmt::Debug for Show<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dereferencing_unbound_variable_returns_itself() {
        let mut store = Store::new();
        let x = store.var();
        assert_eq!(store.dereference(x), x);
    }

    #[test]
    fn dereferencing_non_variables_returns_themselves() {
        let mut store = Store::new();
        let v = store.value(1).unwrap();
        let s = store.structure("f", vec![v]).unwrap();
        assert_eq!(store.dereference(v), v);
        assert_eq!(store.dereference(s), s);
    }

    #[test]
    fn dereferencing_follows_links_transitively() {
        let mut store = Store::new();
        let x = store.var();
        let y = store.var();
        let v = store.value("a").unwrap();
        store.link(x, y);
        store.link(y, v);
        assert_eq!(store.dereference(x), v);
        assert_eq!(store.value_of(x).unwrap(), &"a");
    }

    #[test]
    fn undo_restores_in_reverse_order() {
        let mut store = Store::new();
        let x = store.var();
        let y = store.var();
        let w = store.absent_value();
        store.link(x, y);
        store.fill(w, Scalar::from(3));
        assert_eq!(store.trail_len(), 2);
        assert_eq!(store.undo_to(5), 0);

        assert_eq!(store.undo_to(1), 1);
        assert!(!store.has_value(w));
        assert!(!store.is_unbound(x));

        assert_eq!(store.undo_to(0), 1);
        assert!(store.is_unbound(x));
    }

    #[test]
    fn raw_scalars_become_value_wrappers() {
        let mut store = Store::new();
        let s = store.structure("t", vec![Arg::from(1), Arg::from("b")]).unwrap();
        let first = store.arg(s, 0).unwrap();
        assert_eq!(store.kind(first), TermKind::Value);
        assert_eq!(store.value_of(first).unwrap(), &1);
    }

    #[test]
    fn absent_arguments_become_fresh_variables() {
        let mut store = Store::new();
        let s = store.structure("t", vec![Arg::Fresh, Arg::Fresh]).unwrap();
        let args = store.args(s).unwrap().to_vec();
        assert!(args.iter().all(|&a| store.is_unbound(a)));
        assert_ne!(args[0], args[1]);
    }

    #[test]
    fn nan_is_rejected_as_a_value() {
        let mut store = Store::new();
        let err = store.value(f64::NAN).unwrap_err();
        assert!(matches!(err, TermError::NonComparable { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn signatures_check_arity() {
        let mut store = Store::new();
        let point = Signature::new("point", 2);
        assert!(store.structure_of(&point, vec![1, 2]).is_ok());
        let err = store.structure_of(&point, vec![1]).unwrap_err();
        assert_eq!(
            err,
            TermError::ArityMismatch {
                signature: point,
                found: 1
            }
        );
    }

    #[test]
    fn foreign_handles_are_rejected() {
        let mut store = Store::new();
        let out_of_range = Term {
            store: store.ident,
            index: 99,
        };
        let err = store.structure("f", vec![out_of_range]).unwrap_err();
        assert_eq!(err, TermError::ForeignTerm { index: 99 });
    }

    #[test]
    fn undo_to_the_current_length_changes_nothing() {
        let mut store = Store::new();
        let x = store.var();
        let v = store.value(1).unwrap();
        store.link(x, v);
        assert_eq!(store.undo_to(1), 0);
        assert_eq!(store.dereference(x), v);
        assert_eq!(store.undo_to(0), 1);
        assert_eq!(store.undo_to(0), 0);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn indices_stop_at_the_handle_width() {
        assert_eq!(next_index(0), Some(0));
        assert_eq!(next_index(u32::MAX as usize), Some(u32::MAX));
        assert_eq!(next_index(u32::MAX as usize + 1), None);
    }

    #[test]
    fn handles_from_another_store_are_rejected() {
        let mut other = Store::new();
        let _ = other.var();
        let seven = other.value(7).unwrap();

        let mut store = Store::new();
        let x = store.var();
        let _y = store.var();
        assert!(!store.contains(seven));
        assert!(other.contains(seven));
        assert_eq!(
            store.structure("f", vec![seven]).unwrap_err(),
            TermError::ForeignTerm { index: 1 }
        );
        assert!(store.unify_with(x, seven).is_err());
        assert!(store.is_unbound(x));
        assert_eq!(store.len(), 2);
    }

    #[test]
    #[should_panic(expected = "belongs to another store")]
    fn unifying_with_a_handle_from_another_store_panics() {
        let mut other = Store::new();
        let _ = other.var();
        let seven = other.value(7).unwrap();

        let mut store = Store::new();
        let x = store.var();
        let _y = store.var();
        let _ = store.unify(x, seven);
    }

    #[test]
    fn value_of_term_without_value_is_an_error() {
        let mut store = Store::new();
        let x = store.var();
        let w = store.absent_value();
        assert_eq!(
            store.value_of(x),
            Err(TermError::NoValue { term: store.id(x) })
        );
        assert!(store.value_of(w).is_err());
        assert_eq!(store.try_value(x), None);
    }

    #[test]
    fn argument_access_is_bounds_checked() {
        let mut store = Store::new();
        let s = store.structure("g", vec![1, 2, 3]).unwrap();
        assert!(store.arg(s, 2).is_ok());
        assert_eq!(
            store.arg(s, 3),
            Err(TermError::ArgumentOutOfRange {
                term: store.id(s),
                index: 3,
                arity: 3
            })
        );
        let v = store.value(1).unwrap();
        assert!(matches!(
            store.arg(v, 0),
            Err(TermError::NotAStructure { .. })
        ));
    }

    #[test]
    fn structure_access_goes_through_variables() {
        let mut store = Store::new();
        let s = store.structure("g", vec![1, 2, 3]).unwrap();
        let x = store.var();
        store.link(x, s);
        assert_eq!(store.arity(x).unwrap(), 3);
        assert_eq!(store.functor(x).unwrap().name(), "g");
        let second = store.arg(x, 1).unwrap();
        assert_eq!(store.value_of(second).unwrap(), &2);
    }

    #[test]
    fn display_renders_values_structures_and_variables() {
        let mut store = Store::new();
        let inner = store.structure("g", vec![1, 2, 3]).unwrap();
        let x = store.var();
        let s = store
            .structure("t", vec![Arg::from(0), Arg::from(inner), Arg::from(x)])
            .unwrap();
        let expected = format!("t(0, g(1, 2, 3), _{})", store.id(x).get());
        assert_eq!(store.display(s), expected);
        assert_eq!(store.display(x), format!("{}", store.id(x)));
    }

    #[test]
    fn display_of_bound_variable_shows_its_end() {
        let mut store = Store::new();
        let x = store.var();
        let y = store.var();
        store.link(x, y);
        assert_eq!(store.display(x), store.display(y));
    }

    #[test]
    fn values_of_collects_payloads() {
        let mut store = Store::new();
        let a = store.value(2).unwrap();
        let b = store.value(3).unwrap();
        assert_eq!(
            store.values_of(&[a, b]).unwrap(),
            vec![Scalar::from(2), Scalar::from(3)]
        );
        let x = store.var();
        assert!(store.values_of(&[a, x]).is_err());
    }

    #[test]
    fn ground_terms_have_no_open_leaves() {
        let mut store = Store::new();
        let closed = store.structure("f", vec![1, 2]).unwrap();
        let open = store.structure("f", vec![Arg::from(1), Arg::Fresh]).unwrap();
        assert!(store.is_ground(closed));
        assert!(!store.is_ground(open));
        let w = store.absent_value();
        assert!(!store.is_ground(w));
    }

    #[test]
    fn equality_is_structural() {
        let mut store = Store::new();
        let a = store.structure("f", vec![1, 2]).unwrap();
        let b = store.structure("f", vec![1, 2]).unwrap();
        let c = store.structure("f", vec![1, 3]).unwrap();
        let d = store.structure("g", vec![1, 2]).unwrap();
        assert!(store.equal(a, b));
        assert!(!store.equal(a, c));
        assert!(!store.equal(a, d));
    }

    #[test]
    fn distinct_unbound_variables_are_not_equal() {
        let mut store = Store::new();
        let x = store.var();
        let y = store.var();
        assert!(store.equal(x, x));
        assert!(!store.equal(x, y));
    }

    #[test]
    fn cyclic_terms_can_be_displayed_and_compared() {
        let mut store = Store::new();
        let x = store.var();
        let y = store.var();
        let tx = store.structure("t", vec![Arg::from(1), Arg::from(x)]).unwrap();
        let ty = store.structure("t", vec![Arg::from(1), Arg::from(y)]).unwrap();
        store.link(x, tx);
        store.link(y, ty);

        assert_eq!(store.display(x), "t(1, ...)");
        assert!(store.equal(x, y));
        assert!(store.is_ground(x));
    }

    #[test]
    fn occurs_finds_nested_variables() {
        let mut store = Store::new();
        let x = store.var();
        let inner = store.structure("g", vec![x]).unwrap();
        let outer = store.structure("f", vec![Arg::from(1), Arg::from(inner)]).unwrap();
        let y = store.var();
        assert!(store.occurs(x, outer));
        assert!(!store.occurs(y, outer));
    }
}
