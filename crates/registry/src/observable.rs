//! Push-based observable values.
//!
//! [`Observable<T>`] holds a value and a list of subscriber callbacks. Every
//! write notifies all live subscribers with the new value, and a new
//! subscriber is immediately called with the current value. [`Stream<T>`] is
//! the read-only half handed out to consumers.
//!
//! # Architecture
//!
//! Shared state lives in `Rc<RefCell<..>>`: these types are single-threaded
//! and deliberately `!Send`. The observable keeps only `Weak` references to
//! callbacks; the strong reference lives in the [`Subscription`] guard, so
//! dropping the guard is what unsubscribes. Dead entries are pruned lazily on
//! the next notification.
//!
//! # Invariants
//!
//! 1. Every write bumps the version by one and notifies, even when the new
//!    value equals the old one.
//! 2. Subscribers are notified in registration order.
//! 3. No internal borrow is held while a callback runs, so callbacks may read
//!    or write the observable (or any other) re-entrantly.
//! 4. A write made while subscribers are being notified is delivered after
//!    the current pass finishes, so every subscriber sees values in write
//!    order and ends on the current value. Several such writes collapse into
//!    one further pass carrying the latest value.
//! 5. A dropped [`Subscription`] is never called again.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = dyn Fn(&T);

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<Callback<T>>>,
    notifying: bool,
    pending: bool,
}

/// A shared value that notifies subscribers whenever it is written.
///
/// Cloning an `Observable` yields another handle to the same value.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T: Clone + 'static> Observable<T> {
    /// Create an observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                version: 0,
                subscribers: Vec::new(),
                notifying: false,
                pending: false,
            })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Run `f` against the current value without cloning it.
    ///
    /// `f` must not write to this observable.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of writes since creation.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.borrow_mut().value);
        self.notify();
        result
    }

    /// Register `callback`, calling it right away with the current value.
    ///
    /// The callback stays registered until the returned [`Subscription`] is
    /// dropped.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<Callback<T>> = Rc::new(callback);
        let current = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.push(Rc::downgrade(&callback));
            inner.value.clone()
        };
        callback(&current);
        Subscription::new(callback)
    }

    /// Number of subscribers whose guard is still alive.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    /// Read-only handle to this observable.
    #[must_use]
    pub fn stream(&self) -> Stream<T> {
        Stream {
            source: self.clone(),
        }
    }

    fn notify(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.version += 1;
            if inner.notifying {
                inner.pending = true;
                return;
            }
            inner.notifying = true;
        }

        loop {
            let (value, callbacks) = {
                let mut inner = self.inner.borrow_mut();
                inner.pending = false;
                inner.subscribers.retain(|weak| weak.strong_count() > 0);
                let callbacks: Vec<Rc<Callback<T>>> =
                    inner.subscribers.iter().filter_map(Weak::upgrade).collect();
                (inner.value.clone(), callbacks)
            };

            for callback in callbacks {
                callback(&value);
            }

            let mut inner = self.inner.borrow_mut();
            if !inner.pending {
                inner.notifying = false;
                return;
            }
        }
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

/// Read-only view of an [`Observable`].
pub struct Stream<T> {
    source: Observable<T>,
}

impl<T: Clone + 'static> Stream<T> {
    /// Clone of the latest value.
    #[must_use]
    pub fn latest(&self) -> T {
        self.source.get()
    }

    /// Number of values emitted so far, not counting the initial one.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.source.version()
    }

    /// See [`Observable::subscribe`].
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(callback)
    }
}

impl<T> Clone for Stream<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Stream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stream").field(&self.source).finish()
    }
}

/// Guard that keeps a subscriber callback registered.
///
/// Dropping the guard (or calling [`Subscription::unsubscribe`]) releases the
/// callback; it will not be invoked again.
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl Subscription {
    fn new<T: 'static>(callback: Rc<Callback<T>>) -> Self {
        Self {
            _callback: Box::new(callback),
        }
    }

    /// Release the callback now.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
