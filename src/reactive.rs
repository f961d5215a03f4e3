//! Pull-based reactive values.
//!
//! - [`Signal`]: an input value with a version that bumps on every change.
//! - [`Memo`]: a cached derivation keyed on the versions it was computed
//!   from. Recomputation happens lazily inside [`Memo::get`].
//!
//! # Invariants
//!
//! 1. A signal's version increments exactly once per `set` that changes the
//!    value. Setting an equal value is a no-op.
//! 2. `Memo::get` never returns a value computed for a different key.
//! 3. A memo's generation increments exactly once per recomputation, so it
//!    can serve as the key of a downstream memo.

// ---------------------------------------------------------------------------
// Signal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Signal<T> {
    value: T,
    version: u64,
}

impl<T: PartialEq> Signal<T> {
    pub fn new(value: T) -> Self {
        Signal { value, version: 0 }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the value. Returns `true` if it changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.version += 1;
        true
    }
}

impl<T: PartialEq + Clone> Signal<T> {
    /// Mutate a copy of the value and store it if it differs.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) -> bool {
        let mut next = self.value.clone();
        f(&mut next);
        self.set(next)
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    key: Option<K>,
    value: Option<V>,
    generation: u64,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Memo {
            key: None,
            value: None,
            generation: 0,
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` if `get(key, ..)` would recompute.
    pub fn is_stale(&self, key: &K) -> bool {
        self.value.is_none() || self.key.as_ref() != Some(key)
    }

    /// The value for `key`, recomputing only if the key changed since the
    /// last call.
    pub fn get(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.is_stale(&key) {
            self.key = Some(key);
            self.generation += 1;
            self.value = None;
        }
        self.value.get_or_insert_with(compute)
    }

    /// Number of recomputations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_set_equal_value_is_noop() {
        let mut s = Signal::new(3);
        assert!(!s.set(3));
        assert_eq!(s.version(), 0);
        assert!(s.set(4));
        assert_eq!(s.version(), 1);
        assert_eq!(*s.get(), 4);
    }

    #[test]
    fn signal_update_bumps_only_on_change() {
        let mut s = Signal::new(vec![1, 2]);
        assert!(!s.update(|v| v.sort()));
        assert!(s.update(|v| v.push(3)));
        assert_eq!(s.version(), 1);
    }

    #[test]
    fn memo_recomputes_only_when_key_changes() {
        let mut memo = Memo::new();
        let mut calls = 0;

        assert_eq!(*memo.get(1u64, || { calls += 1; "a" }), "a");
        assert_eq!(*memo.get(1u64, || { calls += 1; "b" }), "a");
        assert_eq!(calls, 1);
        assert_eq!(memo.generation(), 1);

        assert_eq!(*memo.get(2u64, || { calls += 1; "c" }), "c");
        assert_eq!(calls, 2);
        assert_eq!(memo.generation(), 2);
    }

    #[test]
    fn staleness_tracks_the_key() {
        let mut memo = Memo::new();
        assert!(memo.is_stale(&7u64));
        memo.get(7u64, || 1);
        assert!(!memo.is_stale(&7));
        assert!(memo.is_stale(&8));
        assert_eq!(*memo.get(8u64, || 2), 2);
        assert_eq!(memo.generation(), 2);
    }

    #[test]
    fn downstream_memo_keys_on_upstream_generation() {
        let mut input = Signal::new(10);
        let mut doubled: Memo<u64, i32> = Memo::new();
        let mut label: Memo<u64, String> = Memo::new();

        let v = *doubled.get(input.version(), || input.get() * 2);
        label.get(doubled.generation(), || format!("{v}"));
        assert_eq!(label.generation(), 1);

        // Pulling again without a change leaves both caches alone.
        let v = *doubled.get(input.version(), || input.get() * 2);
        assert_eq!(label.get(doubled.generation(), || format!("{v}")), "20");
        assert_eq!(label.generation(), 1);

        input.set(11);
        let v = *doubled.get(input.version(), || input.get() * 2);
        assert_eq!(label.get(doubled.generation(), || format!("{v}")), "22");
        assert_eq!(label.generation(), 2);
    }
}
