use crate::core::store::Store;
use crate::core::structure::Arg;
use crate::core::term::Term;

/// Assert that two terms do not unify and that the attempt left no bindings.
pub fn fails(store: &mut Store, a: impl Into<Arg>, b: impl Into<Arg>) {
    let before = store.trail_len();
    let result = store.unify_with(a, b).expect("arguments must be valid terms");
    assert!(result.is_none());
    assert_eq!(store.trail_len(), before);
}

/// Assert that two terms unify, then retract the unification.
pub fn succeeds(store: &mut Store, a: impl Into<Arg>, b: impl Into<Arg>) {
    let before = store.trail_len();
    let choice = store
        .unify_with(a, b)
        .expect("arguments must be valid terms")
        .expect("terms should unify");
    store.retract(choice).expect("choice is live");
    assert_eq!(store.trail_len(), before);
}

/// Assert that `term` is a variable without a link.
pub fn assert_unbound(store: &Store, term: Term) {
    assert!(
        store.is_unbound(term),
        "expected an unbound variable, found {}",
        store.display(term)
    );
}
