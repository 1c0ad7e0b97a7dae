//! Heartbeat generation and confirmation tracking.
//!
//! The engine spawns one heartbeat task per open session. Every tick it
//! checks the outstanding count, trips the liveness failure at three
//! unconfirmed heartbeats, and otherwise sends the next HEARTBEAT_REQ
//! through the shared write path. Confirmations arrive from the dispatch
//! loop over a small bounded channel.
//!
//! Accounting is count-only, not per-invoke-id: confirmations decrement
//! the outstanding tally regardless of which request they answer. The
//! only observable signal is the tally itself, so strict matching would
//! add bookkeeping without improving liveness detection. When the
//! confirmation queue saturates, [`HeartbeatTrack::confirm`] takes the
//! fast path of zeroing the tally — the session is clearly alive, only
//! the precise count is lost.

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::ClientError;

/// Unconfirmed heartbeats that trip the liveness failure.
pub(crate) const LIVENESS_LIMIT: u32 = 3;

/// Capacity of the confirmation channel.
const CONFIRM_CAPACITY: usize = 10;

/// Why the heartbeat task stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HeartbeatOutcome {
    /// The session scope was cancelled.
    Cancelled,
    /// Three heartbeats went unconfirmed.
    LivenessFailure,
}

/// Outstanding-heartbeat counter plus the confirmation queue.
///
/// Lives on the client for the whole process; the tally and any queued
/// confirmations are drained each time a session starts.
#[derive(Debug)]
pub(crate) struct HeartbeatTrack {
    unconfirmed: Mutex<u32>,
    confirmed_tx: mpsc::Sender<u32>,
    confirmed_rx: tokio::sync::Mutex<mpsc::Receiver<u32>>,
}

impl HeartbeatTrack {
    pub(crate) fn new() -> Self {
        let (confirmed_tx, confirmed_rx) = mpsc::channel(CONFIRM_CAPACITY);
        Self {
            unconfirmed: Mutex::new(0),
            confirmed_tx,
            confirmed_rx: tokio::sync::Mutex::new(confirmed_rx),
        }
    }

    /// Records a HEARTBEAT_CONF observed by the dispatch loop.
    ///
    /// Never blocks: a full queue means confirmations are outpacing the
    /// task, so the tally is simply reset to zero.
    pub(crate) fn confirm(&self, invoke_id: u32) {
        if self.confirmed_tx.try_send(invoke_id).is_err() {
            *self.lock_unconfirmed() = 0;
        }
    }

    /// Current outstanding count.
    pub(crate) fn unconfirmed(&self) -> u32 {
        *self.lock_unconfirmed()
    }

    fn lock_unconfirmed(&self) -> std::sync::MutexGuard<'_, u32> {
        self.unconfirmed.lock().expect("heartbeat tally lock poisoned")
    }
}

/// Runs the per-session heartbeat loop.
///
/// `send` transmits one HEARTBEAT_REQ and returns the invoke id it used.
/// A local send failure is logged and not counted — the request never
/// left. The task responds to `cancel` within one tick boundary.
pub(crate) async fn run<S, Fut>(
    track: &HeartbeatTrack,
    interval: Duration,
    mut send: S,
    cancel: CancellationToken,
) -> HeartbeatOutcome
where
    S: FnMut() -> Fut,
    Fut: Future<Output = Result<u32, ClientError>>,
{
    let mut confirmed = track.confirmed_rx.lock().await;

    // A previous session's confirmations mean nothing to this one.
    while confirmed.try_recv().is_ok() {}
    *track.lock_unconfirmed() = 0;

    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    debug!(interval_secs = interval.as_secs_f64(), "heartbeat started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("heartbeat stopped");
                return HeartbeatOutcome::Cancelled;
            }

            _ = ticker.tick() => {
                let outstanding = track.unconfirmed();
                if outstanding >= LIVENESS_LIMIT {
                    warn!(outstanding, "heartbeat liveness failure");
                    return HeartbeatOutcome::LivenessFailure;
                }

                match send().await {
                    Ok(invoke_id) => {
                        debug!(invoke_id, "heartbeat sent");
                        *track.lock_unconfirmed() += 1;
                    }
                    Err(err) => {
                        warn!(error = %err, "heartbeat send failed");
                    }
                }
            }

            Some(invoke_id) = confirmed.recv() => {
                debug!(invoke_id, "heartbeat confirmed");
                let mut tally = track.lock_unconfirmed();
                *tally = tally.saturating_sub(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    const TICK: Duration = Duration::from_millis(100);

    #[tokio::test(start_paused = true)]
    async fn liveness_trips_after_three_unconfirmed_ticks() {
        let track = HeartbeatTrack::new();
        let sent = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&sent);

        let outcome = run(
            &track,
            TICK,
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move { Ok(n) }
            },
            CancellationToken::new(),
        )
        .await;

        assert_eq!(outcome, HeartbeatOutcome::LivenessFailure);
        // Three requests went out unanswered; the fourth tick tripped.
        assert_eq!(sent.load(Ordering::SeqCst), 3);
        assert_eq!(track.unconfirmed(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn confirmed_heartbeats_keep_the_session_alive() {
        let track = Arc::new(HeartbeatTrack::new());
        let sent = Arc::new(AtomicU32::new(0));
        let cancel = CancellationToken::new();

        let task = {
            let track = Arc::clone(&track);
            let sent = Arc::clone(&sent);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                let confirm_track = Arc::clone(&track);
                run(
                    &track,
                    TICK,
                    move || {
                        let n = sent.fetch_add(1, Ordering::SeqCst) + 1;
                        // Confirmation arrives as if the server answered
                        // immediately.
                        confirm_track.confirm(n);
                        async move { Ok(n) }
                    },
                    cancel,
                )
                .await
            })
        };

        tokio::time::sleep(TICK * 5 + Duration::from_millis(10)).await;
        cancel.cancel();
        let outcome = task.await.unwrap();

        assert_eq!(outcome, HeartbeatOutcome::Cancelled);
        assert_eq!(sent.load(Ordering::SeqCst), 5);
        assert_eq!(track.unconfirmed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn send_failure_does_not_count_as_outstanding() {
        let track = HeartbeatTrack::new();
        let cancel = CancellationToken::new();
        let stopper = cancel.clone();

        let attempts = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&attempts);

        let outcome = run(
            &track,
            TICK,
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n >= 5 {
                    stopper.cancel();
                }
                async move { Err(ClientError::NotConnected) }
            },
            cancel,
        )
        .await;

        // Five failed sends and the tally never moved, so the liveness
        // limit was never reached.
        assert_eq!(outcome, HeartbeatOutcome::Cancelled);
        assert_eq!(track.unconfirmed(), 0);
    }

    #[tokio::test]
    async fn saturated_confirm_queue_resets_the_tally() {
        let track = HeartbeatTrack::new();
        *track.lock_unconfirmed() = 2;

        // Fill the queue without a consumer, then one more.
        for i in 0..10 {
            track.confirm(i);
        }
        assert_eq!(track.unconfirmed(), 2);
        track.confirm(10);
        assert_eq!(track.unconfirmed(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_confirmations_are_drained_at_session_start() {
        let track = HeartbeatTrack::new();
        track.confirm(1);
        track.confirm(2);
        *track.lock_unconfirmed() = 1;

        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = run(
            &track,
            TICK,
            || async { Ok(1) },
            cancel,
        )
        .await;

        assert_eq!(outcome, HeartbeatOutcome::Cancelled);
        assert_eq!(track.unconfirmed(), 0);
    }
}
