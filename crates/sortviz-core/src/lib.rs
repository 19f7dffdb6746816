//! # sortviz-core
//!
//! Step-timed sorting engine behind the `sortviz` terminal visualizer.
//!
//! Two textbook algorithms, bubble sort and merge sort, run through a timed
//! animation scheduler instead of a plain loop. After every step the
//! [`Presentation`] holds the rows to highlight and a chart series rebuilt
//! from the list, so any front end can redraw from it.
//!
//! ## Quick Start
//!
//! ```
//! use std::time::Duration;
//! use sortviz_core::{Session, SessionConfig, SortMode};
//!
//! let mut session = Session::new(SessionConfig {
//!     seed: Some(7),
//!     ..Default::default()
//! });
//! session.set_mode(SortMode::Bubble);
//! session.submit_count("8").unwrap();
//!
//! session.run_all();
//! while session.is_animating() {
//!     session.advance(Duration::from_millis(750));
//! }
//! assert!(session.sequence().is_sorted());
//! ```
//!
//! ## Architecture
//!
//! Input → Session → Timeline (sort / highlight / chart tracks) → Engine →
//! Sequence → Presentation

pub mod cell;
pub mod engine;
pub mod error;
pub mod presentation;
pub mod scheduler;
pub mod sequence;
pub mod session;

pub use cell::Cell;
pub use engine::{
    NullSink, StepSink, bubble_pass, bubble_sort, bubble_step, compare_swap_at, merge, merge_sort,
};
pub use error::InputError;
pub use presentation::{Presentation, StepEvent};
pub use scheduler::{Action, DEFAULT_STEP_DELAY, Task, Timeline, Track};
pub use sequence::{DEFAULT_VALUE_CEILING, Sequence};
pub use session::{Session, SessionConfig, SessionSnapshot, SortMode};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
