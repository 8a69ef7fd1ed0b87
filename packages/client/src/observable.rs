//! A current-value publish/subscribe slot.
//!
//! [`Observable`] keeps the latest value and a list of observer callbacks.
//! Subscribing delivers the current value immediately, then every value
//! published afterwards. Delivery is synchronous, in the publishing call, and
//! happens after the internal lock is released, so observers may read the
//! observable (or publish to another one) without deadlocking.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Handle returned by [`Observable::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner<T> {
    value: T,
    next_id: u64,
    observers: Vec<(SubscriptionId, Observer<T>)>,
}

pub struct Observable<T> {
    inner: Mutex<Inner<T>>,
}

impl<T: Clone> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value,
                next_id: 0,
                observers: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The latest published value.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Read the latest value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock().value)
    }

    /// Register `observer`; it is called with the current value before this
    /// returns.
    pub fn subscribe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> SubscriptionId {
        let observer: Observer<T> = Arc::new(observer);
        let (id, value) = {
            let mut inner = self.lock();
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            inner.observers.push((id, observer.clone()));
            (id, inner.value.clone())
        };
        observer(&value);
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(sid, _)| *sid != id);
        inner.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Replace the value and notify every observer.
    pub fn set(&self, value: T) {
        self.update(|current| *current = value);
    }

    /// Mutate the value in place and notify every observer with the result.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, value, observers) = {
            let mut inner = self.lock();
            let result = f(&mut inner.value);
            let observers: Vec<Observer<T>> =
                inner.observers.iter().map(|(_, o)| o.clone()).collect();
            (result, inner.value.clone(), observers)
        };
        for observer in observers {
            observer(&value);
        }
        result
    }

    /// Like [`update`](Self::update), but observers are only notified when `f`
    /// returns `Some`. `f` runs under the internal lock, so a check and the
    /// mutation it guards cannot be interleaved with another update.
    pub fn update_if<R>(&self, f: impl FnOnce(&mut T) -> Option<R>) -> Option<R> {
        let (result, value, observers) = {
            let mut inner = self.lock();
            let result = f(&mut inner.value)?;
            let observers: Vec<Observer<T>> =
                inner.observers.iter().map(|(_, o)| o.clone()).collect();
            (result, inner.value.clone(), observers)
        };
        for observer in observers {
            observer(&value);
        }
        Some(result)
    }
}

impl<T: Clone + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("observers", &inner.observers.len())
            .finish()
    }
}
