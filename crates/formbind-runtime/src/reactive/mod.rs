#![forbid(unsafe_code)]

//! Change-tracking state cells.
//!
//! - [`Observable`]: a shared, version-tracked value with subscriber
//!   callbacks.
//! - [`Subscription`]: RAII guard; dropping it unsubscribes.
//! - [`Binding`]: a read-only view of one or more observables, handed to
//!   presentational components instead of the cells themselves.
//! - [`Subscriptions`]: the callbacks a component keeps registered while it
//!   lives.
//! - [`BatchScope`]: defers notifications until the outermost scope exits,
//!   so a multi-cell transition is observed as one change.
//!
//! # Invariants
//!
//! 1. Version increments exactly once per mutation that changes the value.
//! 2. Subscribers are notified in registration order.
//! 3. Setting a value equal to the current one is a no-op.
//! 4. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 5. Within a `BatchScope`, values update immediately; each changed
//!    observable notifies once, with its final value, when the outermost
//!    scope exits.

pub mod batch;
pub mod binding;
pub mod observable;

pub use batch::BatchScope;
pub use binding::{Binding, Subscriptions};
pub use observable::{Observable, Subscription};
