use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A shared, mutable handle to a record instance.
///
/// Cloning the handle shares the record. The same instance can be the target
/// of several rules; every successful match overwrites it in place.
pub struct RecordHandle<R> {
    inner: Arc<Mutex<R>>,
}

impl<R> RecordHandle<R> {
    #[must_use]
    pub fn new(record: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(record)),
        }
    }

    /// Lock the record for reading or writing.
    ///
    /// A lock poisoned by a panicking holder is recovered.
    pub fn lock(&self) -> MutexGuard<'_, R> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with shared access to the record.
    pub fn with<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&*self.lock())
    }

    /// Replace the record, returning the previous value.
    pub fn replace(&self, record: R) -> R {
        std::mem::replace(&mut *self.lock(), record)
    }

    /// Whether both handles point at the same record instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<R: Clone> RecordHandle<R> {
    /// A copy of the record's current value.
    #[must_use]
    pub fn get(&self) -> R {
        self.lock().clone()
    }
}

impl<R: Default> Default for RecordHandle<R> {
    fn default() -> Self {
        Self::new(R::default())
    }
}

impl<R> Clone for RecordHandle<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: fmt::Debug> fmt::Debug for RecordHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordHandle").field(&*self.lock()).finish()
    }
}

impl<R> From<R> for RecordHandle<R> {
    fn from(record: R) -> Self {
        Self::new(record)
    }
}
