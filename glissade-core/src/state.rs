//! Shared mutable state handles.
//!
//! ## Usage
//!
//! Wrap a controller in [`State`] and give collaborators [`WeakState`]
//! back-references that never extend the controller's lifetime.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

/// Cheaply clonable handle to shared mutable state.
///
/// `State<T>` provides `with`, `with_mut`, `get`, and `set` to read or update
/// the stored value. Clones share the same underlying value and compare equal
/// by identity.
#[derive(Debug)]
pub struct State<T> {
    inner: Arc<RwLock<T>>,
}

impl<T> State<T> {
    /// Creates a new handle owning `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(RwLock::new(value)),
        }
    }

    /// Execute a closure with a shared reference to the stored value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.inner.read();
        f(&guard)
    }

    /// Execute a closure with a mutable reference to the stored value.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.write();
        f(&mut guard)
    }

    /// Get a cloned value. Requires `T: Clone`.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(Clone::clone)
    }

    /// Replace the stored value.
    pub fn set(&self, value: T) {
        self.with_mut(|slot| *slot = value);
    }

    /// Create a non-owning handle to the same value.
    pub fn downgrade(&self) -> WeakState<T> {
        WeakState {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for State<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for State<T> {}

/// Non-owning counterpart of [`State`].
///
/// Upgrading fails once every owning handle has been dropped, which is how
/// late callbacks notice that the instance they point at is gone.
pub struct WeakState<T> {
    inner: Weak<RwLock<T>>,
}

impl<T> WeakState<T> {
    /// Attempts to recover an owning handle.
    pub fn upgrade(&self) -> Option<State<T>> {
        self.inner.upgrade().map(|inner| State { inner })
    }
}

impl<T> Clone for WeakState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> PartialEq for WeakState<T> {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Eq for WeakState<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_and_with_mut() {
        let state = State::new(1usize);
        state.with_mut(|value| *value += 2);
        assert_eq!(state.with(|value| *value), 3);
    }

    #[test]
    fn test_get_and_set() {
        let state = State::new(String::from("a"));
        state.set(String::from("b"));
        assert_eq!(state.get(), "b");
    }

    #[test]
    fn test_clones_share_value() {
        let state = State::new(0i32);
        let alias = state.clone();
        alias.set(7);
        assert_eq!(state.get(), 7);
        assert_eq!(state, alias);
        assert_ne!(state, State::new(7));
    }

    #[test]
    fn test_weak_upgrade_fails_after_drop() {
        let state = State::new(5u8);
        let weak = state.downgrade();
        assert_eq!(weak.upgrade().map(|s| s.get()), Some(5));

        drop(state);
        assert!(weak.upgrade().is_none());
    }
}
