//! Bounded fan-out / ordered fan-in
//!
//! Nothing in here knows about HTTP: `fan_out` runs one task per item with
//! at most `limit` in flight, `OrderedCollector` puts the results back in
//! input order.

use futures::future;
use futures::{Stream, StreamExt, stream};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Notify;
use tokio::task::JoinError;

/// Cloneable abort flag shared between a batch and whoever may stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    inner: Arc<CancelState>,
}

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag and wake everyone waiting in `cancelled`. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::SeqCst);
        self.inner.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once the flag is raised.
    pub async fn cancelled(&self) {
        loop {
            // Register before checking so a concurrent cancel is not missed
            let notified = self.inner.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Run `task` for every item, at most `limit` at a time.
///
/// Items are started in input order as slots free up. Each task runs on
/// its own tokio task, so a panic surfaces as a `JoinError` for that index
/// only. Once `cancel` is raised nothing new starts and the stream ends
/// right away; tasks still running are detached, not awaited.
pub fn fan_out<T, F, Fut>(
    items: Vec<T>,
    limit: usize,
    cancel: CancelSignal,
    task: F,
) -> impl Stream<Item = (usize, Result<Fut::Output, JoinError>)>
where
    T: Send + 'static,
    F: Fn(usize, T) -> Fut,
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    let dispatch_cancel = cancel.clone();

    stream::iter(items.into_iter().enumerate())
        .take_while(move |_| future::ready(!dispatch_cancel.is_cancelled()))
        .map(move |(index, item)| {
            let handle = tokio::spawn(task(index, item));
            async move { (index, handle.await) }
        })
        .buffer_unordered(limit.max(1))
        .take_until(async move { cancel.cancelled().await })
}

/// Why a value could not be placed or the collection is incomplete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectError {
    OutOfRange { index: usize, total: usize },
    Duplicate { index: usize },
    Missing { first: usize, count: usize },
}

impl fmt::Display for CollectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::OutOfRange { index, total } => {
                write!(f, "index {index} is outside 0..{total}")
            }
            CollectError::Duplicate { index } => write!(f, "index {index} delivered twice"),
            CollectError::Missing { first, count } => {
                write!(f, "{count} index(es) never delivered, first is {first}")
            }
        }
    }
}

impl std::error::Error for CollectError {}

/// Write-once-per-index slots, read back in index order.
#[derive(Debug)]
pub struct OrderedCollector<T> {
    slots: Vec<Option<T>>,
    filled: usize,
}

impl<T> OrderedCollector<T> {
    pub fn new(total: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(total).collect(),
            filled: 0,
        }
    }

    pub fn insert(&mut self, index: usize, value: T) -> Result<(), CollectError> {
        let total = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(CollectError::OutOfRange { index, total })?;

        if slot.is_some() {
            return Err(CollectError::Duplicate { index });
        }

        *slot = Some(value);
        self.filled += 1;
        Ok(())
    }

    pub fn filled(&self) -> usize {
        self.filled
    }

    pub fn is_complete(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// All values in index order, or which indices are missing.
    pub fn into_ordered(self) -> Result<Vec<T>, CollectError> {
        if !self.is_complete() {
            let first = self
                .slots
                .iter()
                .position(Option::is_none)
                .unwrap_or_default();
            return Err(CollectError::Missing {
                first,
                count: self.slots.len() - self.filled,
            });
        }

        Ok(self.slots.into_iter().flatten().collect())
    }
}
