#![forbid(unsafe_code)]

//! Deferred notification scopes.
//!
//! While any [`BatchScope`] is alive on the current thread, observables
//! still update their values immediately but queue their notifications.
//! When the outermost scope drops, the queue is drained in the order the
//! observables first changed. Notifications raised *while* draining are
//! delivered in the same drain, so flush never leaves work behind.

use std::cell::RefCell;

type Deferred = Box<dyn FnOnce()>;

#[derive(Default)]
struct BatchState {
    depth: usize,
    queue: Vec<Deferred>,
}

thread_local! {
    static BATCH: RefCell<BatchState> = RefCell::new(BatchState::default());
}

pub(crate) fn is_active() -> bool {
    BATCH.with(|b| b.borrow().depth > 0)
}

pub(crate) fn defer(task: Deferred) {
    BATCH.with(|b| b.borrow_mut().queue.push(task));
}

/// RAII guard that defers observable notifications until dropped.
///
/// Scopes nest; only the outermost one flushes.
///
/// ```
/// use formbind_runtime::reactive::{BatchScope, Observable};
///
/// let a = Observable::new(0);
/// let b = Observable::new(0);
/// {
///     let _batch = BatchScope::new();
///     a.set(1);
///     b.set(2);
///     // Subscribers of `a` and `b` have not run yet.
/// }
/// // Both notified here.
/// ```
#[derive(Debug)]
pub struct BatchScope {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl BatchScope {
    #[must_use = "the batch flushes as soon as the scope is dropped"]
    pub fn new() -> Self {
        BATCH.with(|b| b.borrow_mut().depth += 1);
        Self {
            _not_send: std::marker::PhantomData,
        }
    }

    /// Nesting depth on this thread (0 when no scope is alive).
    #[must_use]
    pub fn depth() -> usize {
        BATCH.with(|b| b.borrow().depth)
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let outermost = BATCH.with(|b| {
            let mut state = b.borrow_mut();
            state.depth -= 1;
            state.depth == 0
        });
        if !outermost {
            return;
        }
        // Keep depth > 0 while draining so notifications raised by
        // callbacks are queued here rather than delivered re-entrantly.
        BATCH.with(|b| b.borrow_mut().depth += 1);
        loop {
            let tasks = BATCH.with(|b| std::mem::take(&mut b.borrow_mut().queue));
            if tasks.is_empty() {
                break;
            }
            tracing::trace!(target: "formbind::reactive", count = tasks.len(), "flushing batch");
            for task in tasks {
                task();
            }
        }
        BATCH.with(|b| b.borrow_mut().depth -= 1);
    }
}
