//! `PropertySet` for sharing analysis results between passes.
//!
//! The [`PropertySet`] is a typed any-map: an analysis pass stores its
//! result under the result's type, and later passes retrieve it by type.
//!
//! # Example
//!
//! ```
//! use alsvid_compile::PropertySet;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct RewriteStats {
//!     swaps_removed: usize,
//! }
//!
//! let mut props = PropertySet::new();
//! props.insert(RewriteStats { swaps_removed: 3 });
//!
//! let stats = props.get::<RewriteStats>().unwrap();
//! assert_eq!(stats.swaps_removed, 3);
//! ```

use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};

/// A set of properties shared between compilation passes.
#[derive(Debug, Default)]
pub struct PropertySet {
    properties: FxHashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl PropertySet {
    /// Create a new empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, replacing any previous value of the same type.
    pub fn insert<T: Any + Send + Sync>(&mut self, value: T) {
        self.properties.insert(TypeId::of::<T>(), Box::new(value));
    }

    /// Get a property by type.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.properties
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref::<T>())
    }

    /// Remove and return a property by type.
    pub fn take<T: Any + Send + Sync>(&mut self) -> Option<T> {
        self.properties
            .remove(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
    }

    /// Check whether a property of the given type is present.
    pub fn contains<T: Any + Send + Sync>(&self) -> bool {
        self.properties.contains_key(&TypeId::of::<T>())
    }

    /// Get the number of stored properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}
