use rustc_hash::FxHashSet;

use super::*;

#[test]
fn returned_objects_are_cleared_and_reused() {
    let pool: ObjectPool<Vec<u32>> = ObjectPool::new(4);
    {
        let mut scratch = pool.take();
        scratch.extend([1, 2, 3]);
    }
    assert_eq!(pool.idle(), 1);

    let scratch = pool.take();
    assert!(scratch.is_empty());
    assert!(scratch.capacity() >= 3);
    assert_eq!(pool.idle(), 0);
}

#[test]
fn pool_keeps_at_most_capacity_idle_objects() {
    let pool: ObjectPool<FxHashSet<u32>> = ObjectPool::new(2);
    let loans: Vec<_> = (0..5).map(|_| pool.take()).collect();
    drop(loans);
    assert_eq!(pool.idle(), 2);
}

static SHARED: ObjectPool<String> = ObjectPool::new(1);

#[test]
fn pools_can_be_statics() {
    let mut text = SHARED.take();
    text.push_str("scratch");
    drop(text);
    assert!(SHARED.take().is_empty());
}
