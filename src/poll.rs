//! Single-flight, timer-driven refresh of one dashboard panel.
//!
//! The controller never blocks the loop that owns it. Requests run as tasks
//! on a tokio runtime and hand their result back over a oneshot channel;
//! the owner calls [`PollingController::tick`] from its event loop, which
//! harvests a finished request and issues the next one when it is due.

use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::task::JoinHandle;

use crate::error::ConsoleError;

pub type FetchFuture<T> = Pin<Box<dyn Future<Output = Result<T, ConsoleError>> + Send>>;

type Fetch<T> = Box<dyn Fn() -> FetchFuture<T> + Send>;

struct InFlight<T> {
    rx: oneshot::Receiver<Result<T, ConsoleError>>,
    task: JoinHandle<()>,
}

pub struct PollingController<T> {
    name: &'static str,
    runtime: Handle,
    timeout: Duration,
    fetch: Fetch<T>,
    interval: Option<Duration>,
    next_due: Option<Instant>,
    in_flight: Option<InFlight<T>>,
}

impl<T: Send + 'static> PollingController<T> {
    pub fn new<F, Fut>(name: &'static str, runtime: Handle, timeout: Duration, fetch: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, ConsoleError>> + Send + 'static,
    {
        Self {
            name,
            runtime,
            timeout,
            fetch: Box::new(move || Box::pin(fetch())),
            interval: None,
            next_due: None,
            in_flight: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Issue one request unless one is already outstanding.
    ///
    /// Returns whether a request was issued.
    pub fn refresh(&mut self) -> bool {
        if self.in_flight.is_some() {
            tracing::debug!(panel = self.name, "refresh skipped, request in flight");
            return false;
        }
        let fut = (self.fetch)();
        let timeout = self.timeout;
        let name = self.name;
        let (tx, rx) = oneshot::channel();
        let task = self.runtime.spawn(async move {
            let result = match tokio::time::timeout(timeout, fut).await {
                Ok(result) => result,
                Err(_) => Err(ConsoleError::timeout(name)),
            };
            let _ = tx.send(result);
        });
        self.in_flight = Some(InFlight { rx, task });
        true
    }

    /// Begin periodic refreshing; the first request goes out on the next
    /// [`tick`](Self::tick). Does nothing when already running.
    pub fn start(&mut self, interval: Duration, now: Instant) {
        if self.interval.is_some() {
            return;
        }
        tracing::debug!(panel = self.name, ?interval, "polling started");
        self.interval = Some(interval);
        self.next_due = Some(now);
    }

    /// Cancel periodic refreshing. A request already in flight still
    /// completes and is reported by the next tick.
    pub fn stop(&mut self) {
        if self.interval.take().is_some() {
            tracing::debug!(panel = self.name, "polling stopped");
        }
        self.next_due = None;
    }

    /// Refresh immediately and restart the period from `now`.
    pub fn trigger_now(&mut self, now: Instant) -> bool {
        let issued = self.refresh();
        if let Some(interval) = self.interval {
            self.next_due = Some(now + interval);
        }
        issued
    }

    /// Harvest a finished request, then issue the next scheduled one if due.
    ///
    /// The in-flight slot is always released before the result is returned,
    /// so the caller's completion handler may call `refresh` again.
    pub fn tick(&mut self, now: Instant) -> Option<Result<T, ConsoleError>> {
        let completed = self.harvest();

        if let (Some(interval), Some(due)) = (self.interval, self.next_due) {
            if now >= due {
                self.refresh();
                self.next_due = Some(now + interval);
            }
        }
        completed
    }

    fn harvest(&mut self) -> Option<Result<T, ConsoleError>> {
        let in_flight = self.in_flight.as_mut()?;
        let result = match in_flight.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => {
                Err(ConsoleError::network(self.name, "request task ended without a result"))
            }
        };
        self.in_flight = None;
        if let Err(err) = &result {
            tracing::warn!(panel = self.name, error = %err, "poll failed");
        }
        Some(result)
    }
}

impl<T> Drop for PollingController<T> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }
}

#[cfg(test)]
#[path = "tests/poll_tests.rs"]
mod tests;
