//! Headline title cycle state machine
//!
//! Reveals a fixed list of titles one character at a time, pauses once a
//! title is complete, then moves on to the next title (wrapping around).
//!
//! The machine owns no timer. A host scheduler asks [`TitleCycler::next_delay`]
//! how long to wait, waits, and calls [`TitleCycler::tick`]. Rendering is a
//! pure projection of [`TitleCycler::frame`].
//!
//! Lengths are counted in `char`s so every revealed prefix ends on a
//! character boundary.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::content::CycleTiming;

/// Position of the cycle: which title, and how many of its characters show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TitleCycleState {
    /// Index into the title list, always `< titles.len()`
    pub word_index: usize,
    /// Number of characters of the current title that are visible
    pub revealed: usize,
}

/// Outcome of a single [`TitleCycler::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStep {
    /// One more character of the current title became visible.
    Revealed {
        /// Title being typed
        word_index: usize,
        /// Characters visible after this tick
        revealed: usize,
        /// Whether the title is now fully visible (a pause follows)
        complete: bool,
    },
    /// The pause elapsed and the next title started with nothing visible.
    Advanced {
        /// Title that was just shown in full
        from: usize,
        /// Title now being typed
        to: usize,
    },
}

/// Snapshot handed to renderers and subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TitleFrame {
    /// Index of the current title
    pub word_index: usize,
    /// Characters visible
    pub revealed: usize,
    /// The visible prefix
    pub text: String,
}

/// A frame together with its offset from the start of the cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedFrame {
    /// Time since the cycler started
    pub at: Duration,
    /// State after the tick that fired at `at`
    pub frame: TitleFrame,
}

/// The typing state machine.
#[derive(Debug, Clone)]
pub struct TitleCycler {
    titles: Arc<[String]>,
    /// Character count of each title, parallel to `titles`
    lengths: Arc<[usize]>,
    timing: CycleTiming,
    state: TitleCycleState,
    disposed: bool,
}

impl TitleCycler {
    /// Creates a cycler positioned at the start of the first title.
    ///
    /// Returns `None` for an empty title list: there is nothing to animate
    /// and the cycler must never start.
    #[must_use]
    pub fn new(titles: impl Into<Arc<[String]>>, timing: CycleTiming) -> Option<Self> {
        let titles: Arc<[String]> = titles.into();
        if titles.is_empty() {
            return None;
        }
        let lengths = titles.iter().map(|t| t.chars().count()).collect();
        Some(Self {
            titles,
            lengths,
            timing,
            state: TitleCycleState::default(),
            disposed: false,
        })
    }

    /// Current position.
    #[must_use]
    pub const fn state(&self) -> TitleCycleState {
        self.state
    }

    /// Cadence this cycler was built with.
    #[must_use]
    pub const fn timing(&self) -> CycleTiming {
        self.timing
    }

    /// The titles being cycled.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// The title currently being typed.
    #[must_use]
    pub fn current_word(&self) -> &str {
        &self.titles[self.state.word_index]
    }

    /// The visible prefix of the current title.
    #[must_use]
    pub fn revealed_text(&self) -> &str {
        let word = self.current_word();
        let end = word
            .char_indices()
            .nth(self.state.revealed)
            .map_or(word.len(), |(i, _)| i);
        &word[..end]
    }

    /// Whether every character of the current title is visible.
    #[must_use]
    pub fn is_word_complete(&self) -> bool {
        self.state.revealed >= self.lengths[self.state.word_index]
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// How long the host should wait before the next [`tick`](Self::tick).
    ///
    /// The reveal interval while typing, the pause once the title is
    /// complete, and `None` after disposal.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        if self.disposed {
            None
        } else if self.is_word_complete() {
            Some(self.timing.pause)
        } else {
            Some(self.timing.interval)
        }
    }

    /// Applies one transition.
    ///
    /// Returns `None` once disposed; the state is left untouched.
    pub fn tick(&mut self) -> Option<CycleStep> {
        if self.disposed {
            return None;
        }

        let word_index = self.state.word_index;
        if self.is_word_complete() {
            let to = (word_index + 1) % self.titles.len();
            self.state = TitleCycleState {
                word_index: to,
                revealed: 0,
            };
            return Some(CycleStep::Advanced {
                from: word_index,
                to,
            });
        }

        self.state.revealed += 1;
        Some(CycleStep::Revealed {
            word_index,
            revealed: self.state.revealed,
            complete: self.is_word_complete(),
        })
    }

    /// Stops the cycler for good. Later ticks are no-ops.
    pub const fn dispose(&mut self) {
        self.disposed = true;
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn frame(&self) -> TitleFrame {
        TitleFrame {
            word_index: self.state.word_index,
            revealed: self.state.revealed,
            text: self.revealed_text().to_string(),
        }
    }

    /// Length of one full cycle: every character of every title plus one
    /// pause per title.
    #[must_use]
    pub fn cycle_duration(&self) -> Duration {
        let chars: usize = self.lengths.iter().sum();
        let chars = u32::try_from(chars).unwrap_or(u32::MAX);
        let words = u32::try_from(self.titles.len()).unwrap_or(u32::MAX);
        self.timing.interval.saturating_mul(chars) + self.timing.pause.saturating_mul(words)
    }

    /// Frames of one full cycle starting from `(0, 0)`, ending with the
    /// wrap back to the first title.
    #[must_use]
    pub fn timeline(&self) -> Vec<TimedFrame> {
        let mut cycler = Self {
            titles: Arc::clone(&self.titles),
            lengths: Arc::clone(&self.lengths),
            timing: self.timing,
            state: TitleCycleState::default(),
            disposed: false,
        };

        let mut at = Duration::ZERO;
        let mut frames = Vec::with_capacity(self.lengths.iter().sum::<usize>() + self.titles.len());
        while let Some(delay) = cycler.next_delay() {
            at += delay;
            let step = cycler.tick();
            frames.push(TimedFrame {
                at,
                frame: cycler.frame(),
            });
            if matches!(step, Some(CycleStep::Advanced { to: 0, .. })) {
                break;
            }
        }
        frames
    }
}
