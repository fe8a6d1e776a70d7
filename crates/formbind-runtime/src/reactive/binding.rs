#![forbid(unsafe_code)]

//! Read-only access to state owned elsewhere.
//!
//! An owner keeps its [`Observable`] cells private and hands out
//! [`Binding`]s, which can be read but never written. A binding re-reads
//! its sources on every [`get`](Binding::get); there is no cache to go
//! stale.
//!
//! ```
//! use formbind_runtime::reactive::{Binding, Observable};
//!
//! let value = Observable::new(0_i64);
//! let shown = Binding::project(&value, |v| format!("value: {v}"));
//! value.set(3);
//! assert_eq!(shown.get(), "value: 3");
//! ```
//!
//! [`Subscriptions`] keeps a component's callbacks registered for exactly
//! as long as the component lives.

use std::fmt;
use std::rc::Rc;

use super::observable::{Observable, Subscription};

pub struct Binding<T> {
    read: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            read: Rc::clone(&self.read),
        }
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

impl<T: 'static> Binding<T> {
    /// Read through an arbitrary closure.
    pub fn from_fn(read: impl Fn() -> T + 'static) -> Self {
        Self {
            read: Rc::new(read),
        }
    }

    pub fn constant(value: T) -> Self
    where
        T: Clone,
    {
        Self::from_fn(move || value.clone())
    }

    /// The current value of `source`.
    pub fn of(source: &Observable<T>) -> Self
    where
        T: Clone + PartialEq,
    {
        let source = source.clone();
        Self::from_fn(move || source.get())
    }

    /// `source` seen through `f`. The source value is borrowed, not cloned.
    pub fn project<S>(source: &Observable<S>, f: impl Fn(&S) -> T + 'static) -> Self
    where
        S: Clone + PartialEq + 'static,
    {
        let source = source.clone();
        Self::from_fn(move || source.with(&f))
    }

    /// Two sources read together, e.g. a value and its validation message.
    pub fn combine<A, B>(
        a: &Observable<A>,
        b: &Observable<B>,
        f: impl Fn(&A, &B) -> T + 'static,
    ) -> Self
    where
        A: Clone + PartialEq + 'static,
        B: Clone + PartialEq + 'static,
    {
        let (a, b) = (a.clone(), b.clone());
        Self::from_fn(move || a.with(|a| b.with(|b| f(a, b))))
    }

    #[must_use]
    pub fn get(&self) -> T {
        (self.read)()
    }

    #[must_use]
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Binding<U> {
        let read = self.read;
        Binding::from_fn(move || f(read()))
    }
}

/// The subscriptions a component holds on state it does not own.
///
/// Dropping the set, or calling [`release`](Self::release), unsubscribes
/// every callback registered through it.
#[derive(Default)]
pub struct Subscriptions {
    held: Vec<Subscription>,
}

impl Subscriptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(&mut self, subscription: Subscription) -> &mut Self {
        self.held.push(subscription);
        self
    }

    /// Run `callback` on every change of `source` while this set lives.
    pub fn watch<T: Clone + PartialEq + 'static>(
        &mut self,
        source: &Observable<T>,
        callback: impl Fn(&T) + 'static,
    ) -> &mut Self {
        self.keep(source.subscribe(callback))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    pub fn release(&mut self) {
        self.held.clear();
    }
}

impl fmt::Debug for Subscriptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriptions")
            .field("len", &self.held.len())
            .finish()
    }
}
