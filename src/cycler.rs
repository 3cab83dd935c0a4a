//! Headline cycler driver
//!
//! Runs a [`TitleCycler`] on a tokio task: sleep for
//! [`TitleCycler::next_delay`], tick, publish the new frame on a `watch`
//! channel, repeat. The task is acquired when the handle is created and
//! released on [`TitleCyclerHandle::dispose`], on handle drop, and on
//! shutdown of the parent token.

use std::sync::{Arc, Mutex, PoisonError};

use folio_core::content::CycleTiming;
use folio_core::cycle::{TitleCycler, TitleFrame};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::observability::metrics::record_title_frame;

/// Publishing side of the frame channel. `None` once closed.
type Publisher = Arc<Mutex<Option<watch::Sender<TitleFrame>>>>;

/// Starts a cycler task for `titles`.
///
/// Returns `None` for an empty title list; nothing is spawned. Must be
/// called from within a tokio runtime.
#[must_use]
pub fn spawn_title_cycler(
    titles: impl Into<Arc<[String]>>,
    timing: CycleTiming,
) -> Option<TitleCyclerHandle> {
    spawn_title_cycler_until(titles, timing, &CancellationToken::new())
}

/// Like [`spawn_title_cycler`], but also stops when `shutdown` is cancelled.
#[must_use]
pub fn spawn_title_cycler_until(
    titles: impl Into<Arc<[String]>>,
    timing: CycleTiming,
    shutdown: &CancellationToken,
) -> Option<TitleCyclerHandle> {
    let Some(cycler) = TitleCycler::new(titles, timing) else {
        debug!("no titles; headline cycler not started");
        return None;
    };

    let (sender, frames) = watch::channel(cycler.frame());
    let publisher: Publisher = Arc::new(Mutex::new(Some(sender)));
    let cancel = shutdown.child_token();

    debug!(
        titles = cycler.titles().len(),
        interval_ms = timing.interval.as_millis(),
        pause_ms = timing.pause.as_millis(),
        "headline cycler started"
    );
    tokio::spawn(drive(cycler, Arc::clone(&publisher), cancel.clone()));

    Some(TitleCyclerHandle {
        frames,
        publisher,
        cancel,
    })
}

async fn drive(mut cycler: TitleCycler, publisher: Publisher, cancel: CancellationToken) {
    while let Some(delay) = cycler.next_delay() {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(delay) => {}
        }
        if !publish(&publisher, &mut cycler) {
            break;
        }
    }
    cycler.dispose();
    close(&publisher);
    debug!("headline cycler stopped");
}

/// Ticks and publishes under the publisher lock. Returns `false` once the
/// channel is closed, leaving the cycler untouched.
fn publish(publisher: &Publisher, cycler: &mut TitleCycler) -> bool {
    let guard = publisher.lock().unwrap_or_else(PoisonError::into_inner);
    let Some(sender) = guard.as_ref() else {
        return false;
    };
    let step = cycler.tick();
    trace!(?step, "headline tick");
    if sender.send(cycler.frame()).is_err() {
        return false;
    }
    record_title_frame();
    true
}

fn close(publisher: &Publisher) {
    publisher
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
}

/// Owner of a running cycler task.
///
/// Dropping the handle disposes the cycler.
#[derive(Debug)]
pub struct TitleCyclerHandle {
    frames: watch::Receiver<TitleFrame>,
    publisher: Publisher,
    cancel: CancellationToken,
}

impl TitleCyclerHandle {
    /// A receiver for published frames.
    ///
    /// The receiver sees the channel close once the cycler is disposed.
    #[must_use]
    pub fn frames(&self) -> watch::Receiver<TitleFrame> {
        self.frames.clone()
    }

    /// The most recently published frame.
    #[must_use]
    pub fn current(&self) -> TitleFrame {
        self.frames.borrow().clone()
    }

    /// Whether the cycler has been disposed or shut down.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stops the cycler. Idempotent.
    ///
    /// No frame is published after this returns.
    pub fn dispose(&self) {
        self.cancel.cancel();
        close(&self.publisher);
    }
}

impl Drop for TitleCyclerHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}
