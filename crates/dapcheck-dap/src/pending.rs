//! Single-assignment pending results.
//!
//! Every server operation and every correlated event hands back a
//! [`PendingResult`]. Its producer side, [`Completer`], is consumed on
//! completion, so a result can never be assigned twice.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::sync::oneshot;

use crate::error::DapError;

/// Producer half of a [`PendingResult`].
#[derive(Debug)]
pub struct Completer<T> {
    tx: oneshot::Sender<Result<T, DapError>>,
}

impl<T> Completer<T> {
    /// Assign the outcome. A consumer that already went away is ignored.
    pub fn complete(self, result: Result<T, DapError>) {
        let _ = self.tx.send(result);
    }

    /// Assign a successful value.
    pub fn succeed(self, value: T) {
        self.complete(Ok(value));
    }

    /// Assign a failure.
    pub fn fail(self, err: DapError) {
        self.complete(Err(err));
    }
}

/// A value that will be produced later, exactly once.
///
/// Awaiting yields the outcome. If the [`Completer`] is dropped without
/// assigning anything, the result stays pending forever; bound the wait
/// with [`PendingResult::timeout`] when that matters.
#[derive(Debug)]
#[must_use = "a pending result does nothing unless awaited or inspected"]
pub struct PendingResult<T> {
    rx: oneshot::Receiver<Result<T, DapError>>,
    starved: bool,
}

impl<T> PendingResult<T> {
    /// Create a linked completer/result pair.
    pub fn channel() -> (Completer<T>, PendingResult<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Completer { tx },
            PendingResult { rx, starved: false },
        )
    }

    /// A result that has already failed with `err`.
    pub fn failed(err: DapError) -> Self {
        let (completer, pending) = Self::channel();
        completer.fail(err);
        pending
    }

    /// Take the outcome without waiting.
    ///
    /// Returns `None` while the result is still pending, including when it
    /// can no longer complete.
    pub fn try_take(&mut self) -> Option<Result<T, DapError>> {
        if self.starved {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.starved = true;
                None
            }
        }
    }

    /// Await the outcome, failing with [`DapError::Timeout`] after `limit`.
    ///
    /// `what` names the awaited command or event in the error.
    pub async fn timeout(self, limit: Duration, what: &str) -> Result<T, DapError> {
        tokio::time::timeout(limit, self)
            .await
            .map_err(|_| DapError::Timeout {
                command: what.to_string(),
            })?
    }
}

impl<T> Future for PendingResult<T> {
    type Output = Result<T, DapError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.starved {
            return Poll::Pending;
        }
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            // Producer gone without an outcome: never completes.
            Poll::Ready(Err(_)) => {
                self.starved = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
