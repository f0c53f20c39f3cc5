//! Immutable, cheaply shareable values.
//!
//! A [`Frozen`] value can only be read. Producing a changed version means
//! taking a copy with [`Frozen::thaw`], editing the copy and freezing it again,
//! so every previously published value keeps its content for as long as
//! anyone holds it. Cloning a `Frozen` shares the allocation instead of
//! copying the data, which is what lets undo/redo stacks hold many snapshots
//! without duplicating them.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Read-only handle to a value that can never change after construction.
pub struct Frozen<T>(Arc<T>);

impl<T> Frozen<T> {
    /// Freeze a value.
    pub fn new(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Returns true if both handles point at the same published value.
    ///
    /// Two distinct allocations with equal content are not `ptr_eq`.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Copy the value out so a new version can be built from it.
    pub fn thaw(&self) -> T
    where
        T: Clone,
    {
        T::clone(&self.0)
    }

    /// Take the value out, copying only when other handles still share it.
    pub fn into_inner(self) -> T
    where
        T: Clone,
    {
        Arc::unwrap_or_clone(self.0)
    }
}

impl<T> Clone for Frozen<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Deref for Frozen<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> AsRef<T> for Frozen<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T> From<T> for Frozen<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Default> Default for Frozen<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: PartialEq> PartialEq for Frozen<T> {
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl<T: Eq> Eq for Frozen<T> {}

impl<T: fmt::Debug> fmt::Debug for Frozen<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T: Serialize> Serialize for Frozen<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Frozen<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}
