use super::*;

#[test]
fn flag_starts_live() {
    assert!(!CancelFlag::new().is_cancelled());
}

#[test]
fn cancel_is_seen_by_clones() {
    let flag = CancelFlag::new();
    let task_copy = flag.clone();
    flag.cancel();
    assert!(task_copy.is_cancelled());
}

#[test]
fn cancel_twice_is_harmless() {
    let flag = CancelFlag::new();
    flag.cancel();
    flag.cancel();
    assert!(flag.is_cancelled());
}

#[cfg(not(feature = "csr"))]
#[test]
fn host_run_after_never_fires() {
    use std::cell::Cell;
    use std::rc::Rc;

    let fired = Rc::new(Cell::new(false));
    let seen = Rc::clone(&fired);
    run_after(CancelFlag::new(), Duration::ZERO, move || seen.set(true));
    assert!(!fired.get());
}
