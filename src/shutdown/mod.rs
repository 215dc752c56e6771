// Graceful shutdown signal wait
// Suspends until SIGINT/SIGTERM, then hands back a deadline-bound cancellation context

use std::fmt;
use std::io;
use std::time::Duration;

use futures::stream::{BoxStream, Stream, StreamExt};
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Which termination signal ended the wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGINT (Ctrl+C).
    Interrupt,
    /// SIGTERM (default kill signal, used by systemd/Kubernetes).
    Terminate,
}

impl fmt::Display for ShutdownSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShutdownSignal::Interrupt => write!(f, "SIGINT"),
            ShutdownSignal::Terminate => write!(f, "SIGTERM"),
        }
    }
}

/// One-shot wait for a process termination signal.
///
/// Signal interest is registered when the waiter is constructed, so a
/// signal delivered between [`bind`](Self::bind) and [`wait`](Self::wait)
/// is queued rather than lost. Intended to be used once near process
/// entry; signal delivery is not multiplexed across concurrent waiters.
pub struct ShutdownWaiter {
    signals: BoxStream<'static, ShutdownSignal>,
}

impl ShutdownWaiter {
    /// Register interest in SIGINT and SIGTERM with the OS.
    pub fn bind() -> io::Result<Self> {
        let signals = Signals::new([SIGINT, SIGTERM])?;
        Ok(Self::from_source(signals.filter_map(|raw| async move {
            match raw {
                SIGINT => Some(ShutdownSignal::Interrupt),
                SIGTERM => Some(ShutdownSignal::Terminate),
                other => {
                    debug!(signal = other, "ignoring unexpected signal");
                    None
                }
            }
        })))
    }

    /// Build a waiter over an arbitrary signal source.
    ///
    /// This is the seam tests use instead of the OS signal table: any
    /// stream of [`ShutdownSignal`] values works, e.g. a channel receiver.
    pub fn from_source<S>(source: S) -> Self
    where
        S: Stream<Item = ShutdownSignal> + Send + 'static,
    {
        Self {
            signals: source.boxed(),
        }
    }

    /// Suspend until a termination signal arrives, then return a
    /// cancellable context whose deadline is `now + timeout`.
    ///
    /// No timeout applies to the wait itself; a source that never yields a
    /// signal suspends the caller indefinitely. Logs the triggering signal
    /// before returning. The returned context owns a fresh cancellation
    /// root, never a child of some caller token.
    pub async fn wait(mut self, timeout: Duration) -> ShutdownContext {
        let signal = match self.signals.next().await {
            Some(signal) => signal,
            // An exhausted source means no signal will ever arrive; the
            // contract for "no signal" is to keep waiting.
            None => futures::future::pending::<ShutdownSignal>().await,
        };

        info!(signal = %signal, "received shutdown signal, initiating graceful shutdown");

        ShutdownContext::with_timeout(timeout)
    }
}

/// Register for SIGINT/SIGTERM and suspend until one arrives.
///
/// The one-call form of [`ShutdownWaiter::bind`] + [`ShutdownWaiter::wait`]:
/// invoke once from the orchestration task, then drive cleanup off the
/// returned [`ShutdownContext`].
pub async fn wait_for_shutdown(timeout: Duration) -> io::Result<ShutdownContext> {
    Ok(ShutdownWaiter::bind()?.wait(timeout).await)
}

/// Deadline-bound cancellation handle for shutdown work.
///
/// Hand clones to teardown routines (close listeners, flush buffers, drain
/// queues); clones share cancellation state. The context is cancelled by
/// its deadline or by an explicit [`cancel`](Self::cancel), whichever
/// comes first, and cancelling an already-cancelled context is a no-op.
#[derive(Debug, Clone)]
pub struct ShutdownContext {
    token: CancellationToken,
    deadline: Instant,
}

impl ShutdownContext {
    /// Fresh root context with deadline `now + timeout`.
    ///
    /// Spawns the watcher task that cancels the context when the deadline
    /// passes, so this must be called within a Tokio runtime.
    /// [`ShutdownWaiter::wait`] builds one at signal receipt; constructing
    /// one directly is mainly useful for exercising teardown code.
    pub fn with_timeout(timeout: Duration) -> Self {
        let token = CancellationToken::new();
        // Thirty years out stands in for "no deadline" when the addition
        // would overflow.
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .unwrap_or_else(|| now + Duration::from_secs(86_400 * 365 * 30));

        // Watcher: the deadline becomes observable through the token. An
        // explicit cancel just ends the watch early; cancelling again after
        // expiry is a safe no-op.
        let watcher = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = watcher.cancelled() => {}
                _ = tokio::time::sleep_until(deadline) => watcher.cancel(),
            }
        });

        Self { token, deadline }
    }

    /// Cancel the context now. Idempotent.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Completes once the context is cancelled, by deadline or explicitly.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }

    /// Whether the context has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Instant at which the watcher cancels the context.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until the deadline; zero once it has passed.
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
