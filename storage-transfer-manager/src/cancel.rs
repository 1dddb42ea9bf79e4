/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::types::CancelledBy;

/// A cooperative, broadcast cancellation signal.
///
/// Every long-running operation observes the token at its own I/O boundaries:
/// an in-flight stream is torn down at the next chunk boundary after the
/// token fires and the operation fails with
/// [`ErrorKind::OperationCancelled`](crate::error::ErrorKind::OperationCancelled).
///
/// Tokens are cheaply cloneable; all clones observe the same signal. The
/// first cancellation wins, later calls are ignored.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    sender: Arc<watch::Sender<Option<CancelledBy>>>,
    receiver: watch::Receiver<Option<CancelledBy>>,
}

impl CancellationToken {
    /// Create a new token that never fires unless [`cancel`](Self::cancel) is called.
    pub fn new() -> Self {
        let (sender, receiver) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
            receiver,
        }
    }

    /// Create a token armed with a deadline.
    ///
    /// When `timeout` elapses the token cancels itself with
    /// [`CancelledBy::Timeout`] carrying `id`, so timeout-initiated aborts
    /// remain distinguishable from user-initiated ones in any error surface.
    ///
    /// NOTE: must be called from within a tokio runtime.
    pub fn with_timeout(timeout: Duration, id: impl Into<String>) -> Self {
        let token = Self::new();
        let armed = token.clone();
        let id = id.into();
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            tracing::debug!("cancellation timeout '{id}' elapsed");
            armed.cancel(CancelledBy::Timeout(id));
        });
        token
    }

    /// Fire the cancellation signal.
    ///
    /// The first signal wins; if the token was already cancelled the original
    /// agent is retained.
    pub fn cancel(&self, by: CancelledBy) {
        self.sender.send_if_modified(|state| {
            if state.is_some() {
                return false;
            }
            *state = Some(by);
            true
        });
    }

    /// Whether the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.receiver.borrow().is_some()
    }

    /// The agent that cancelled this token, if any.
    pub fn cancelled_by(&self) -> Option<CancelledBy> {
        self.receiver.borrow().clone()
    }

    /// Wait for the token to be cancelled.
    ///
    /// Intended for use in `select!` arms guarding suspendable work.
    pub async fn cancelled(&self) -> CancelledBy {
        let mut receiver = self.receiver.clone();
        let signalled = receiver
            .wait_for(|state| state.is_some())
            .await
            // the channel cannot close while this token holds the sender
            .expect("cancellation channel open");
        signalled.as_ref().cloned().expect("signal observed")
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_broadcasts_to_clones() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());

        token.cancel(CancelledBy::User);

        assert!(observer.is_cancelled());
        assert_eq!(Some(CancelledBy::User), observer.cancelled_by());
        assert_eq!(CancelledBy::User, observer.cancelled().await);
    }

    #[tokio::test]
    async fn test_first_cancellation_wins() {
        let token = CancellationToken::new();
        token.cancel(CancelledBy::Timeout("t1".to_owned()));
        token.cancel(CancelledBy::User);

        assert_eq!(
            Some(CancelledBy::Timeout("t1".to_owned())),
            token.cancelled_by()
        );
    }

    #[tokio::test]
    async fn test_timeout_fires_with_identity() {
        let token = CancellationToken::with_timeout(Duration::from_millis(5), "status-poll");
        let by = token.cancelled().await;
        assert_eq!(CancelledBy::Timeout("status-poll".to_owned()), by);
    }
}
