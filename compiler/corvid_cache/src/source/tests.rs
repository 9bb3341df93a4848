use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::*;

#[test]
fn strong_sources_never_go_empty() {
    let source = StrongSource::new(Arc::new(7));
    assert_eq!(source.get().as_deref(), Some(&7));
    assert_eq!(source.get().as_deref(), Some(&7));
}

#[test]
fn weak_sources_follow_their_owner() {
    let value = Arc::new(String::from("meta"));
    let source = WeakSource::new(&value);
    assert_eq!(source.get().as_deref().map(String::as_str), Some("meta"));
    drop(value);
    assert!(source.get().is_none());
}

#[test]
fn recoverable_sources_reload_after_drop() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let source = RecoverableSource::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(42)
    });

    let first = source.get();
    let again = source.get();
    assert_eq!(first.as_deref(), Some(&42));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    drop((first, again));

    assert_eq!(source.get().as_deref(), Some(&42));
    assert_eq!(loads.load(Ordering::SeqCst), 2);
}

#[test]
fn recoverable_sources_are_empty_when_loading_fails() {
    let source = RecoverableSource::<u32>::new(|| None);
    assert!(source.get().is_none());
}

#[test]
fn liveness_checks_never_load() {
    let loads = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&loads);
    let source = RecoverableSource::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(1)
    });
    assert!(!source.is_alive());

    let value = source.get();
    assert!(source.is_alive());
    drop(value);
    assert!(!source.is_alive());
    assert_eq!(loads.load(Ordering::SeqCst), 1);

    let value = Arc::new(2);
    let weak = WeakSource::new(&value);
    assert!(weak.is_alive());
    assert!(StrongSource::new(Arc::clone(&value)).is_alive());
    drop(value);
    assert!(!weak.is_alive());
}
