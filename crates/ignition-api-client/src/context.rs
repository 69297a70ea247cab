//! Caller-side cancellation and deadlines.
//!
//! Every public operation takes a [`CallContext`]. Cancelling its token or
//! passing its deadline aborts in-flight I/O, retry backoff sleeps and the
//! project wait loop. Dropping the operation's future has the same effect.

use crate::error::ClientError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation handle plus optional deadline for one or more operations.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CallContext {
    /// A context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// A context that expires at `deadline`.
    #[must_use]
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// A context that expires `timeout` from now.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A context driven by an existing cancellation token.
    #[must_use]
    pub fn with_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Cancel every operation running under this context.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// The cancellation token, for wiring into other tasks.
    #[must_use]
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Caller deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail fast if the context is already spent.
    pub(crate) fn check(&self) -> Result<(), ClientError> {
        if self.token.is_cancelled() {
            return Err(ClientError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ClientError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Resolve with the context's error once it is cancelled or expired.
    pub(crate) async fn done(&self) -> ClientError {
        tokio::select! {
            () = self.token.cancelled() => ClientError::Cancelled,
            () = sleep_until_opt(self.deadline) => ClientError::DeadlineExceeded,
        }
    }

    /// Run `fut` under this context and an additional `ceiling` budget.
    ///
    /// The earlier of the caller deadline and `now + ceiling` wins; hitting the
    /// ceiling reports [`ClientError::Timeout`].
    pub(crate) async fn run<T, F>(&self, ceiling: Duration, fut: F) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        self.check()?;
        let ceiling_at = Instant::now() + ceiling;

        tokio::select! {
            biased;
            err = self.done() => Err(err),
            () = tokio::time::sleep_until(ceiling_at) => Err(ClientError::Timeout(ceiling)),
            result = fut => result,
        }
    }
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
