//! Background polling for the live watch views.
//!
//! A poller re-fetches on a fixed period and delivers snapshots over a
//! channel. Failures after the initial load are logged and swallowed; the
//! consumer keeps its last-known-good snapshot (silent-refresh contract).
//!
//! Cancellation is deterministic: dropping or cancelling the handle stops
//! the timer, and every snapshot carries the generation token of the
//! subscription that produced it. A consumer that has moved on (new watched
//! ticket, view change) bumps its current generation and discards anything
//! tagged with an older one, so an in-flight fetch from a dead subscription
//! can never overwrite fresh state. In-flight requests are not aborted at
//! the transport level.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::api::ApiClient;
use crate::error::Result;
use crate::types::{Ticket, TicketDetails};

/// Refresh period of the ticket list view
pub const LIST_POLL_PERIOD: Duration = Duration::from_millis(5000);

/// Refresh period of the single-ticket detail view
pub const DETAIL_POLL_PERIOD: Duration = Duration::from_millis(4000);

/// A fetched snapshot tagged with its subscription generation
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub generation: u64,
    pub data: T,
}

/// Handle to a running poller. Cancelling (or dropping the handle) stops
/// the timer; a fetch already in flight runs to completion and its result
/// is discarded by the generation guard.
pub struct PollHandle {
    cancel: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Cancel and wait for the poll task to finish
    pub async fn shutdown(mut self) {
        self.cancel();
        // Await through a borrow; Drop prevents moving the handle out
        let _ = (&mut self.task).await;
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawn a poller that runs `fetch` every `period` and sends successful
/// results to `tx`. The first fetch happens one full period after spawn;
/// the initial load is the caller's job so its failure can be surfaced
/// instead of swallowed.
pub fn spawn<T, F, Fut>(
    period: Duration,
    generation: u64,
    tx: mpsc::Sender<Snapshot<T>>,
    fetch: F,
) -> PollHandle
where
    T: Send + 'static,
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<T>> + Send,
{
    let (cancel_tx, mut cancel_rx) = watch::channel(false);

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel_rx.changed() => break,
                _ = ticker.tick() => {
                    let result = fetch().await;
                    if *cancel_rx.borrow() {
                        break;
                    }
                    match result {
                        Ok(data) => {
                            if tx.send(Snapshot { generation, data }).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(generation, "background refresh failed: {e}");
                        }
                    }
                }
            }
        }
    });

    PollHandle {
        cancel: cancel_tx,
        task,
    }
}

/// Poll the full ticket collection (list view, 5 s period)
pub fn spawn_list_poll(
    client: ApiClient,
    generation: u64,
    tx: mpsc::Sender<Snapshot<Vec<Ticket>>>,
) -> PollHandle {
    spawn(LIST_POLL_PERIOD, generation, tx, move || {
        let client = client.clone();
        async move { client.list_tickets(None).await }
    })
}

/// Poll a single ticket with its thread (detail view, 4 s period)
pub fn spawn_detail_poll(
    client: ApiClient,
    ticket_id: u64,
    generation: u64,
    tx: mpsc::Sender<Snapshot<TicketDetails>>,
) -> PollHandle {
    spawn(DETAIL_POLL_PERIOD, generation, tx, move || {
        let client = client.clone();
        async move { client.get_ticket(ticket_id).await }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_poller_delivers_snapshots() {
        let (tx, mut rx) = mpsc::channel(4);
        let counter = Arc::new(AtomicU32::new(0));
        let fetch_counter = counter.clone();

        let handle = spawn(Duration::from_millis(10), 1, tx, move || {
            let counter = fetch_counter.clone();
            async move { Ok(counter.fetch_add(1, Ordering::SeqCst)) }
        });

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.generation, 1);
        assert_eq!(first.data, 0);
        assert_eq!(second.data, 1);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_poller_swallows_failures() {
        let (tx, mut rx) = mpsc::channel(4);
        let counter = Arc::new(AtomicU32::new(0));
        let fetch_counter = counter.clone();

        // Every other fetch fails; only successes reach the channel
        let handle = spawn(Duration::from_millis(10), 7, tx, move || {
            let counter = fetch_counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                if n % 2 == 0 {
                    Err(crate::error::DeskError::Other("boom".to_string()))
                } else {
                    Ok(n)
                }
            }
        });

        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.data, 1);
        assert_eq!(second.data, 3);

        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_cancel_stops_delivery() {
        let (tx, mut rx) = mpsc::channel(4);
        let handle = spawn(Duration::from_millis(10), 1, tx, move || async move {
            Ok(42u32)
        });

        let _ = rx.recv().await.unwrap();
        handle.shutdown().await;

        // Sender side is gone once the task exits
        assert!(rx.recv().await.is_none());
    }
}
