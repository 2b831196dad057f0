use super::*;
use crate::doc::FrameSpec;

/// Snapshot with `n` default frames and an empty path.
fn snap(n: usize) -> Snapshot {
    let mut store = FrameStore::new();
    for _ in 0..n {
        store.add_frame(FrameSpec::default());
    }
    Snapshot { store, path: Path::new() }
}

#[test]
fn empty_history_cannot_step() {
    let mut h = History::new(50);
    assert!(!h.can_undo());
    assert!(!h.can_redo());
    assert!(h.undo(snap(0)).is_none());
    assert!(h.redo(snap(0)).is_none());
}

#[test]
fn undo_then_redo_restores_states() {
    let mut h = History::new(50);
    let s0 = snap(0);
    let s1 = snap(1);
    h.push(s0.clone());

    let restored = h.undo(s1.clone()).unwrap();
    assert_eq!(restored, s0);
    assert!(h.can_redo());

    let again = h.redo(restored).unwrap();
    assert_eq!(again, s1);
    assert!(h.can_undo());
    assert!(!h.can_redo());
}

#[test]
fn push_clears_redo() {
    let mut h = History::new(50);
    h.push(snap(0));
    h.undo(snap(1));
    assert!(h.can_redo());
    h.push(snap(2));
    assert!(!h.can_redo());
}

#[test]
fn limit_drops_oldest() {
    let mut h = History::new(3);
    for n in 0..5 {
        h.push(snap(n));
    }
    assert_eq!(h.undo_len(), 3);
    // Oldest surviving snapshot holds two frames.
    let mut last = None;
    let mut current = snap(5);
    while let Some(prev) = h.undo(current) {
        current = prev.clone();
        last = Some(prev);
    }
    assert_eq!(last.unwrap().store.len(), 2);
}

#[test]
fn zero_limit_disables_undo() {
    let mut h = History::new(0);
    h.push(snap(1));
    assert!(!h.can_undo());
}

#[test]
fn clear_empties_both_stacks() {
    let mut h = History::new(50);
    h.push(snap(0));
    h.push(snap(1));
    h.undo(snap(2));
    h.clear();
    assert!(!h.can_undo());
    assert!(!h.can_redo());
}
