//! Timed animation of sorting steps.
//!
//! A [`Timeline`] is a virtual clock plus an ordered queue of [`Task`]s. Each
//! task carries its own parameters and a due time of `now + k * step_delay`
//! computed when it is scheduled. The owner advances the clock with
//! [`Timeline::advance`] and fires whatever [`Timeline::pop_due`] hands back,
//! all on one thread.
//!
//! Tasks live on independent [`Track`]s (sort, highlight, chart) that share
//! the clock. Tasks due at the same instant fire in the order they were
//! scheduled, so a full run schedules its sort track before its highlight and
//! chart tracks and each offset resolves as sort → highlight → chart.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::engine::{self, StepSink};
use crate::sequence::Sequence;

/// Delay between consecutive animation frames.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(750);

/// Which stream of work a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Sort,
    Highlight,
    Chart,
}

/// The work a task performs when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Bubble compare-swap with no notification (full-run sort track).
    CompareSwap { index: usize },
    /// Bubble compare-swap followed by a step notification.
    BubbleStep { index: usize },
    /// The entire recursive merge sort, one notification per placement.
    MergeSort,
    /// Highlight two indices.
    Highlight { first: usize, second: usize },
    /// Rebuild the chart from the current sequence.
    RefreshChart,
}

impl Action {
    /// Execute against `seq`, notifying `sink` as the action requires.
    pub fn apply<S: StepSink + ?Sized>(self, seq: &mut Sequence, sink: &mut S) {
        match self {
            Self::CompareSwap { index } => {
                engine::compare_swap_at(seq, index);
            }
            Self::BubbleStep { index } => {
                engine::bubble_step(seq, index, sink);
            }
            Self::MergeSort => {
                engine::merge_sort(seq, sink);
            }
            Self::Highlight { first, second } => sink.highlight(first, second),
            Self::RefreshChart => sink.refresh_chart(seq),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    pub due: Duration,
    pub track: Track,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub struct Timeline {
    now: Duration,
    step_delay: Duration,
    next_seq: u64,
    queue: BTreeMap<(Duration, u64), Task>,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}

impl Timeline {
    pub fn new(step_delay: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            step_delay,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Due time of the last queued task, if any.
    pub fn last_due(&self) -> Option<Duration> {
        self.queue.last_key_value().map(|(&(due, _), _)| due)
    }

    /// Queue `action` on `track` to fire `frame * step_delay` from now.
    pub fn schedule(&mut self, frame: u32, track: Track, action: Action) {
        let due = self.now + self.step_delay * frame;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.insert((due, seq), Task { due, track, action });
    }

    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
    }

    /// Remove and return the earliest task whose due time has been reached.
    pub fn pop_due(&mut self) -> Option<Task> {
        let (&(due, _), _) = self.queue.first_key_value()?;
        if due > self.now {
            return None;
        }
        self.queue.pop_first().map(|(_, task)| task)
    }

    /// Drop every pending task. Returns how many were dropped.
    pub fn cancel_all(&mut self) -> usize {
        let dropped = self.queue.len();
        self.queue.clear();
        dropped
    }

    /// Queue one compare step per index of a single bubble pass.
    /// Returns the number of tasks queued.
    pub fn schedule_bubble_pass(&mut self, len: usize) -> usize {
        let mut frame = 0;
        for index in 1..len {
            frame += 1;
            self.schedule(frame, Track::Sort, Action::BubbleStep { index });
        }
        frame as usize
    }

    /// Queue a full bubble sort: `len - 1` passes on the sort track, with
    /// highlight and chart tracks at matching offsets.
    /// Returns the number of tasks queued.
    pub fn schedule_bubble_run_all(&mut self, len: usize) -> usize {
        let width = len.saturating_sub(1);
        let units = width * width;
        let frames = || (1..=units).map(move |k| (k as u32, (k - 1) % width + 1));

        for (frame, index) in frames() {
            self.schedule(frame, Track::Sort, Action::CompareSwap { index });
        }
        for (frame, index) in frames() {
            let action = Action::Highlight {
                first: index - 1,
                second: index,
            };
            self.schedule(frame, Track::Highlight, action);
        }
        for (frame, _) in frames() {
            self.schedule(frame, Track::Chart, Action::RefreshChart);
        }
        units * 3
    }

    /// Queue the whole merge sort as a single task one frame from now.
    pub fn schedule_merge_pass(&mut self) -> usize {
        self.schedule(1, Track::Sort, Action::MergeSort);
        1
    }
}
