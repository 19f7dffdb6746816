//! What the table and chart should currently show.
//!
//! [`Presentation`] is the [`StepSink`] the session hands to the engine and
//! scheduler. It holds a recomputed highlight set and a chart series rebuilt
//! from the full sequence on every refresh, plus a bounded log of the most
//! recent frames.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use crate::engine::StepSink;
use crate::sequence::Sequence;

/// Maximum frames retained in the log.
const MAX_EVENTS: usize = 120;

/// One rendered frame: what was highlighted and the chart at that moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEvent {
    /// 1-based frame counter since the last reset.
    pub frame: u64,
    pub highlighted: Vec<usize>,
    pub chart: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct Presentation {
    highlighted: BTreeSet<usize>,
    chart: Vec<u32>,
    frames: u64,
    events: VecDeque<StepEvent>,
}

impl Presentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every highlight. Idempotent.
    pub fn reset_highlight(&mut self) {
        self.highlighted.clear();
    }

    /// Clear highlight, frame counter and log, then chart `seq`.
    pub fn reset(&mut self, seq: &Sequence) {
        self.reset_highlight();
        self.frames = 0;
        self.events.clear();
        self.chart = seq.values();
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted.contains(&index)
    }

    pub fn highlighted(&self) -> &BTreeSet<usize> {
        &self.highlighted
    }

    /// Chart series in index order, one point per cell.
    pub fn chart(&self) -> &[u32] {
        &self.chart
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Most recent frames, oldest first.
    pub fn events(&self) -> &VecDeque<StepEvent> {
        &self.events
    }
}

impl StepSink for Presentation {
    fn highlight(&mut self, first: usize, second: usize) {
        self.highlighted.clear();
        self.highlighted.insert(first);
        self.highlighted.insert(second);
    }

    fn refresh_chart(&mut self, seq: &Sequence) {
        self.chart = seq.values();
        self.frames += 1;
        if self.events.len() >= MAX_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(StepEvent {
            frame: self.frames,
            highlighted: self.highlighted.iter().copied().collect(),
            chart: self.chart.clone(),
        });
    }
}
