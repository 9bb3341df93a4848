//! Pools of reusable scratch collections.
//!
//! Classification runs on every keystroke; recycling the dedup set and the
//! scratch vectors keeps their allocations warm across runs. Pools are
//! `const`-constructible so they can live in statics.

use std::collections::HashSet;
use std::hash::BuildHasher;
use std::ops::{Deref, DerefMut};

use parking_lot::Mutex;

/// Returns a value to its freshly constructed state, keeping allocations.
pub trait Reset {
    fn reset(&mut self);
}

impl<T> Reset for Vec<T> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl<T, S: BuildHasher> Reset for HashSet<T, S> {
    fn reset(&mut self) {
        self.clear();
    }
}

impl Reset for String {
    fn reset(&mut self) {
        self.clear();
    }
}

/// A bounded free list of `T`.
pub struct ObjectPool<T> {
    free: Mutex<Vec<T>>,
    capacity: usize,
}

impl<T: Reset + Default> ObjectPool<T> {
    /// A pool keeping at most `capacity` idle objects.
    pub const fn new(capacity: usize) -> Self {
        ObjectPool {
            free: parking_lot::const_mutex(Vec::new()),
            capacity,
        }
    }

    /// An idle object, or a new one if the pool is empty.
    pub fn take(&self) -> Pooled<'_, T> {
        let value = self.free.lock().pop().unwrap_or_default();
        Pooled { pool: self, value }
    }

    /// Number of idle objects.
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }

    fn give_back(&self, mut value: T) {
        value.reset();
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            free.push(value);
        }
    }
}

/// An object on loan from an [`ObjectPool`]; reset and returned on drop.
pub struct Pooled<'p, T: Reset + Default> {
    pool: &'p ObjectPool<T>,
    value: T,
}

impl<T: Reset + Default> Deref for Pooled<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Reset + Default> DerefMut for Pooled<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Reset + Default> Drop for Pooled<'_, T> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.value));
    }
}

#[cfg(test)]
mod tests;
