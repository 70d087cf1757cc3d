use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextError {
    #[error("context deadline exceeded")]
    DeadlineExceeded,
    #[error("context cancelled")]
    Cancelled,
}

/// Deadline and cancellation signal carried by a single request.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancelled: Option<watch::Receiver<bool>>,
}

/// Cancels every clone of the context it was created with.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    /// Keeps the earliest of the existing deadline and `now + timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        self.cancelled = Some(receiver);
        (self, CancelHandle { sender })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }

    /// Drives `fut` until it completes, the deadline passes or the context is cancelled.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, ContextError>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        if matches!(self.deadline, Some(deadline) if deadline <= Instant::now()) {
            return Err(ContextError::DeadlineExceeded);
        }

        tokio::select! {
            biased;
            _ = wait_cancelled(self.cancelled.clone()) => Err(ContextError::Cancelled),
            _ = wait_deadline(self.deadline) => Err(ContextError::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}

async fn wait_cancelled(receiver: Option<watch::Receiver<bool>>) {
    let Some(mut rx) = receiver else {
        return std::future::pending().await;
    };

    while !*rx.borrow_and_update() {
        if rx.changed().await.is_err() {
            // Handle dropped without cancelling: this context can no longer be cancelled.
            return std::future::pending().await;
        }
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
