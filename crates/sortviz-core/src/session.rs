//! The interactive sorting session.
//!
//! [`Session`] owns all mutable state of one sorter view: the chosen
//! [`SortMode`], the bubble step cursor, the [`Sequence`], the
//! [`Presentation`] and the [`Timeline`]. Every user action is a method here;
//! the terminal shell only translates keys into calls and draws the result.
//!
//! Resetting the list (new count, randomize, auto sort) or switching mode
//! cancels every pending animation task, so stale frames never fire against a
//! regenerated list.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::engine::{self, StepSink};
use crate::error::InputError;
use crate::presentation::{Presentation, StepEvent};
use crate::scheduler::{DEFAULT_STEP_DELAY, Timeline};
use crate::sequence::{DEFAULT_VALUE_CEILING, Sequence};

// ---------------------------------------------------------------------------
// SortMode
// ---------------------------------------------------------------------------

/// Which algorithm the session animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortMode {
    /// Nothing chosen yet; generation and stepping are blocked.
    #[default]
    Unset,
    Bubble,
    Merge,
}

impl SortMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unset => "Choose Sort",
            Self::Bubble => "Bubble Sort",
            Self::Merge => "Merge Sort",
        }
    }

    /// Only bubble sort has a single-step granularity.
    pub fn supports_step(self) -> bool {
        self == Self::Bubble
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "unset"),
            Self::Bubble => write!(f, "bubble"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Tunables for a [`Session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Gap between animation frames.
    pub step_delay: Duration,
    /// Generated values fall in `[0, value_ceiling)`.
    pub value_ceiling: u32,
    /// Largest accepted list size.
    pub max_count: usize,
    /// Fixed RNG seed for reproducible lists; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            value_ceiling: DEFAULT_VALUE_CEILING,
            max_count: 500,
            seed: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Serializable picture of a session for export.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub mode: SortMode,
    pub values: Vec<u32>,
    pub highlighted: Vec<usize>,
    pub step_cursor: usize,
    pub pending_tasks: usize,
    pub frames: u64,
    pub sorted: bool,
    pub recent: Vec<StepEvent>,
    pub config: SessionConfig,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session {
    config: SessionConfig,
    mode: SortMode,
    cursor: usize,
    sequence: Sequence,
    presentation: Presentation,
    timeline: Timeline,
    rng: StdRng,
    prompt: Option<InputError>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            timeline: Timeline::new(config.step_delay),
            config,
            mode: SortMode::Unset,
            cursor: 1,
            sequence: Sequence::new(),
            presentation: Presentation::new(),
            rng,
            prompt: None,
        }
    }

    /// Switch algorithm. Pending animation from the previous mode is dropped.
    pub fn set_mode(&mut self, mode: SortMode) {
        if mode != self.mode {
            log::info!("sort mode {} -> {}", self.mode, mode);
            self.cancel_pending();
        }
        self.mode = mode;
    }

    /// Validate `text` as a list size and, if valid, generate a fresh list.
    ///
    /// Nothing is mutated on rejection except the prompt.
    pub fn submit_count(&mut self, text: &str) -> Result<usize, InputError> {
        match self.validate_count(text) {
            Ok(n) => {
                self.prompt = None;
                self.generate(n);
                Ok(n)
            }
            Err(e) => {
                log::warn!("rejected count {text:?}: {e}");
                self.prompt = Some(e);
                Err(e)
            }
        }
    }

    fn validate_count(&self, text: &str) -> Result<usize, InputError> {
        if self.mode == SortMode::Unset {
            return Err(InputError::NoAlgorithm);
        }
        let n: i64 = text.trim().parse().map_err(|_| InputError::NotInteger)?;
        if n <= 0 {
            return Err(InputError::NotNatural);
        }
        let n = usize::try_from(n).map_err(|_| InputError::NotInteger)?;
        if n > self.config.max_count {
            return Err(InputError::TooLarge {
                max: self.config.max_count,
            });
        }
        Ok(n)
    }

    fn generate(&mut self, n: usize) {
        self.cancel_pending();
        self.cursor = 1;
        self.sequence
            .generate(n, self.config.value_ceiling, &mut self.rng);
        self.presentation.reset(&self.sequence);
        log::info!("generated {n} values: {:?}", self.sequence.values());
    }

    /// Replace the list with explicit values, as if freshly generated.
    pub fn load_values(&mut self, values: Vec<u32>) {
        self.cancel_pending();
        self.cursor = 1;
        self.sequence = Sequence::from(values);
        self.presentation.reset(&self.sequence);
    }

    /// One bubble compare-swap at the cursor, applied immediately.
    ///
    /// The cursor advances and wraps back to 1 after the last index,
    /// regardless of whether the list is already sorted. Returns `false`
    /// when not in bubble mode or the list is too short to compare.
    pub fn step(&mut self) -> bool {
        let n = self.sequence.len();
        if !self.mode.supports_step() || n < 2 {
            return false;
        }
        let index = self.cursor.clamp(1, n - 1);
        engine::bubble_step(&mut self.sequence, index, &mut self.presentation);
        self.cursor = if index < n - 1 { index + 1 } else { 1 };
        log::debug!("step at {index}, cursor now {}", self.cursor);
        true
    }

    /// Schedule one pass. For merge sort the single task runs the whole sort.
    /// Returns the number of tasks queued.
    pub fn pass(&mut self) -> usize {
        let queued = match self.mode {
            SortMode::Unset => 0,
            SortMode::Bubble => self.timeline.schedule_bubble_pass(self.sequence.len()),
            SortMode::Merge if self.sequence.is_empty() => 0,
            SortMode::Merge => self.timeline.schedule_merge_pass(),
        };
        log::debug!("pass: {queued} tasks queued");
        queued
    }

    /// Full run. Bubble sort is scheduled frame by frame; merge sort runs to
    /// completion right away. Returns the number of tasks queued.
    pub fn run_all(&mut self) -> usize {
        match self.mode {
            SortMode::Unset => 0,
            SortMode::Bubble => {
                let queued = self.timeline.schedule_bubble_run_all(self.sequence.len());
                log::debug!("run all: {queued} tasks queued");
                queued
            }
            SortMode::Merge => {
                let steps = engine::merge_sort(&mut self.sequence, &mut self.presentation);
                log::debug!("merge sort finished in {steps} placements");
                0
            }
        }
    }

    /// Shuffle the current values, clear highlights, rewind the cursor.
    pub fn randomize(&mut self) {
        self.cancel_pending();
        self.sequence.shuffle(&mut self.rng);
        self.presentation.reset_highlight();
        self.presentation.refresh_chart(&self.sequence);
        self.cursor = 1;
    }

    /// Sort immediately without animation.
    pub fn auto_sort(&mut self) {
        self.cancel_pending();
        self.sequence.sort_instant();
        self.presentation.refresh_chart(&self.sequence);
    }

    /// Move the clock forward and fire everything now due.
    /// Returns the number of tasks fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.timeline.advance(elapsed);
        let mut fired = 0;
        while let Some(task) = self.timeline.pop_due() {
            task.action.apply(&mut self.sequence, &mut self.presentation);
            fired += 1;
        }
        fired
    }

    /// Fire every pending task regardless of its due time.
    pub fn finish(&mut self) -> usize {
        let remaining = self
            .timeline
            .last_due()
            .map(|due| due.saturating_sub(self.timeline.now()))
            .unwrap_or_default();
        self.advance(remaining)
    }

    fn cancel_pending(&mut self) {
        let dropped = self.timeline.cancel_all();
        if dropped > 0 {
            log::debug!("cancelled {dropped} pending tasks");
        }
    }

    // --- Accessors ---

    pub fn mode(&self) -> SortMode {
        self.mode
    }

    pub fn step_cursor(&self) -> usize {
        self.cursor
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn pending_tasks(&self) -> usize {
        self.timeline.pending()
    }

    pub fn is_animating(&self) -> bool {
        !self.timeline.is_idle()
    }

    pub fn prompt(&self) -> Option<InputError> {
        self.prompt
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode,
            values: self.sequence.values(),
            highlighted: self.presentation.highlighted().iter().copied().collect(),
            step_cursor: self.cursor,
            pending_tasks: self.timeline.pending(),
            frames: self.presentation.frames(),
            sorted: self.sequence.is_sorted(),
            recent: self.presentation.events().iter().cloned().collect(),
            config: self.config.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Session {
        Session::new(SessionConfig {
            seed: Some(42),
            step_delay: Duration::from_millis(10),
            ..Default::default()
        })
    }

    fn bubble_with(values: &[u32]) -> Session {
        let mut s = seeded();
        s.set_mode(SortMode::Bubble);
        s.load_values(values.to_vec());
        s
    }

    #[test]
    fn count_rejected_without_algorithm() {
        let mut s = seeded();
        assert_eq!(s.submit_count("7"), Err(InputError::NoAlgorithm));
        assert!(s.sequence().is_empty());
        assert_eq!(s.prompt(), Some(InputError::NoAlgorithm));
    }

    #[test]
    fn negative_and_zero_counts_rejected() {
        let mut s = bubble_with(&[3, 2, 1]);
        assert_eq!(s.submit_count("-5"), Err(InputError::NotNatural));
        assert_eq!(s.submit_count("0"), Err(InputError::NotNatural));
        assert_eq!(s.sequence().values(), vec![3, 2, 1]);
    }

    #[test]
    fn non_integer_counts_rejected() {
        let mut s = bubble_with(&[3, 2, 1]);
        assert_eq!(s.submit_count("abc"), Err(InputError::NotInteger));
        assert_eq!(s.submit_count("2.5"), Err(InputError::NotInteger));
        assert_eq!(s.submit_count(""), Err(InputError::NotInteger));
        assert_eq!(s.sequence().values(), vec![3, 2, 1]);
    }

    #[test]
    fn oversized_count_rejected() {
        let mut s = bubble_with(&[1]);
        let max = s.config().max_count;
        assert_eq!(
            s.submit_count(&(max + 1).to_string()),
            Err(InputError::TooLarge { max })
        );
        assert_eq!(s.submit_count("99999999999999999999"), Err(InputError::NotInteger));
    }

    #[test]
    fn valid_count_generates_and_resets() {
        let mut s = bubble_with(&[5, 1, 4, 2]);
        s.step();
        s.submit_count("abc").unwrap_err();
        assert_eq!(s.submit_count(" 7 "), Ok(7));
        assert_eq!(s.sequence().len(), 7);
        assert_eq!(s.step_cursor(), 1);
        assert!(s.presentation().highlighted().is_empty());
        assert_eq!(s.presentation().chart(), s.sequence().values().as_slice());
        assert_eq!(s.prompt(), None);
    }

    #[test]
    fn step_advances_and_wraps_cursor() {
        let mut s = bubble_with(&[5, 1, 4, 2]);
        assert!(s.step());
        assert_eq!(s.sequence().values(), vec![1, 5, 4, 2]);
        assert_eq!(s.step_cursor(), 2);
        s.step();
        s.step();
        assert_eq!(s.step_cursor(), 1);
        assert_eq!(s.sequence().values(), vec![1, 4, 2, 5]);
        assert!(s.presentation().is_highlighted(2) && s.presentation().is_highlighted(3));
    }

    #[test]
    fn step_round_robins_even_when_sorted() {
        let mut s = bubble_with(&[1, 2, 3]);
        for _ in 0..5 {
            assert!(s.step());
        }
        assert_eq!(s.step_cursor(), 2);
        assert_eq!(s.sequence().values(), vec![1, 2, 3]);
    }

    #[test]
    fn step_ignored_for_merge_and_short_lists() {
        let mut s = bubble_with(&[9]);
        assert!(!s.step());
        s.set_mode(SortMode::Merge);
        s.load_values(vec![3, 1]);
        assert!(!s.step());
        assert_eq!(s.sequence().values(), vec![3, 1]);
    }

    #[test]
    fn pass_animates_over_time() {
        let mut s = bubble_with(&[5, 1, 4, 2]);
        assert_eq!(s.pass(), 3);
        assert_eq!(s.advance(Duration::from_millis(10)), 1);
        assert_eq!(s.sequence().values(), vec![1, 5, 4, 2]);
        assert_eq!(s.finish(), 2);
        assert_eq!(s.sequence().values(), vec![1, 4, 2, 5]);
        assert!(!s.is_animating());
    }

    #[test]
    fn run_all_bubble_sorts_after_finish() {
        let mut s = bubble_with(&[5, 1, 4, 2]);
        s.run_all();
        assert_eq!(s.sequence().values(), vec![5, 1, 4, 2]);
        s.finish();
        assert_eq!(s.sequence().values(), vec![1, 2, 4, 5]);
        assert_eq!(s.presentation().chart(), &[1, 2, 4, 5]);
    }

    #[test]
    fn merge_pass_runs_whole_sort_in_one_task() {
        let mut s = seeded();
        s.set_mode(SortMode::Merge);
        s.load_values(vec![5, 1, 4, 2]);
        assert_eq!(s.pass(), 1);
        assert_eq!(s.advance(Duration::from_millis(10)), 1);
        assert_eq!(s.sequence().values(), vec![1, 2, 4, 5]);
        assert_eq!(s.presentation().frames(), 8);
    }

    #[test]
    fn merge_run_all_is_immediate() {
        let mut s = seeded();
        s.set_mode(SortMode::Merge);
        s.load_values(vec![5, 1, 4, 2]);
        assert_eq!(s.run_all(), 0);
        assert_eq!(s.sequence().values(), vec![1, 2, 4, 5]);
    }

    #[test]
    fn unset_mode_does_nothing() {
        let mut s = seeded();
        s.load_values(vec![2, 1]);
        assert!(!s.step());
        assert_eq!(s.pass(), 0);
        assert_eq!(s.run_all(), 0);
        assert_eq!(s.sequence().values(), vec![2, 1]);
    }

    #[test]
    fn regenerate_cancels_pending_animation() {
        let mut s = bubble_with(&[5, 1, 4, 2]);
        s.run_all();
        s.advance(Duration::from_millis(10));
        assert!(s.is_animating());
        s.submit_count("3").unwrap();
        assert!(!s.is_animating());
        let fresh = s.sequence().values();
        assert_eq!(s.finish(), 0);
        assert_eq!(s.sequence().values(), fresh);
    }

    #[test]
    fn mode_switch_cancels_pending_animation() {
        let mut s = bubble_with(&[5, 1, 4, 2]);
        s.pass();
        s.set_mode(SortMode::Merge);
        assert_eq!(s.pending_tasks(), 0);
    }

    #[test]
    fn randomize_keeps_values_and_clears_highlight() {
        let mut s = bubble_with(&[8, 3, 3, 1, 0, 7]);
        s.step();
        s.step();
        s.randomize();
        let mut values = s.sequence().values();
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 3, 3, 7, 8]);
        assert!(s.presentation().highlighted().is_empty());
        assert_eq!(s.step_cursor(), 1);
        assert_eq!(s.presentation().chart(), s.sequence().values().as_slice());
    }

    #[test]
    fn auto_sort_sorts_instantly() {
        let mut s = bubble_with(&[4, 2, 9, 1]);
        s.pass();
        s.auto_sort();
        assert_eq!(s.sequence().values(), vec![1, 2, 4, 9]);
        assert_eq!(s.presentation().chart(), &[1, 2, 4, 9]);
        assert_eq!(s.pending_tasks(), 0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut s = bubble_with(&[2, 1, 3]);
        s.step();
        let snap = s.snapshot();
        assert_eq!(snap.mode, SortMode::Bubble);
        assert_eq!(snap.values, vec![1, 2, 3]);
        assert_eq!(snap.highlighted, vec![0, 1]);
        assert_eq!(snap.step_cursor, 2);
        assert!(snap.sorted);
        assert_eq!(snap.recent.len(), 1);
    }

    #[test]
    fn seeded_sessions_generate_identical_lists() {
        let mut a = seeded();
        let mut b = seeded();
        a.set_mode(SortMode::Bubble);
        b.set_mode(SortMode::Merge);
        a.submit_count("12").unwrap();
        b.submit_count("12").unwrap();
        assert_eq!(a.sequence(), b.sequence());
    }
}
