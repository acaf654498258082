//! Hash collections used throughout the engine.

/// FxHashMap from rustc-hash: faster than SipHash for short string keys.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// FxHashSet from rustc-hash.
pub type FxHashSet<T> = rustc_hash::FxHashSet<T>;
