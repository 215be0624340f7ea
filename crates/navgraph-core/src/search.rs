use glam::Vec3;
use rand::Rng;
use std::collections::HashSet;

use crate::field::NodeField;
use crate::graph::NeighborGraph;
use crate::path::greedy_path;
use crate::schedule::{Phase, PhasePoint, PhaseTable};

/// Seconds at the end of the searching window during which the marker rests
/// on the final node.
pub const SEARCH_END_DWELL: f32 = 0.5;

/// What the renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub phase: Phase,
    pub marker: Vec3,
    /// Segment currently being traveled, if a hop is in flight.
    pub active_edge: Option<(Vec3, Vec3)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    Target,
    Visited,
    Level(u8),
}

/// Mutable search animation state, re-evaluated every frame.
#[derive(Debug, Clone)]
pub struct SearchState {
    current: usize,
    target: usize,
    phase: Phase,
    path: Vec<usize>,
    visited: HashSet<usize>,
    prefix_len: usize,
    hops_begun: usize,
}

impl SearchState {
    pub fn new<R: Rng + ?Sized>(node_count: usize, rng: &mut R) -> Self {
        Self {
            current: 0,
            target: random_index(node_count, rng),
            phase: Phase::Waiting,
            path: Vec::new(),
            visited: HashSet::new(),
            prefix_len: 0,
            hops_begun: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn visited(&self) -> &HashSet<usize> {
        &self.visited
    }

    pub fn active_prefix(&self) -> &[usize] {
        &self.path[..self.prefix_len]
    }

    /// Consecutive pairs of the active prefix.
    pub fn traveled_edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.active_prefix().windows(2).map(|w| (w[0], w[1]))
    }

    pub fn style_of(&self, i: usize, level: u8) -> NodeStyle {
        if i == self.target {
            NodeStyle::Target
        } else if self.visited.contains(&i) {
            NodeStyle::Visited
        } else {
            NodeStyle::Level(level)
        }
    }

    /// Previous target becomes the new start; a fresh target is drawn.
    pub fn enter_waiting<R: Rng + ?Sized>(&mut self, node_count: usize, rng: &mut R) {
        self.phase = Phase::Waiting;
        self.current = self.target;
        self.target = if node_count > 1 {
            // draw from the other n-1 slots so the target never equals current
            let pick = rng.gen_range(0..node_count - 1);
            if pick >= self.current {
                pick + 1
            } else {
                pick
            }
        } else {
            0
        };
        self.path.clear();
        self.visited.clear();
        self.prefix_len = 0;
        self.hops_begun = 0;
    }

    pub fn enter_embedding(&mut self) {
        self.phase = Phase::Embedding;
    }

    pub fn enter_searching(&mut self, field: &NodeField, graph: &NeighborGraph, cap: usize) {
        self.phase = Phase::Searching;
        self.path = greedy_path(field, graph, self.current, self.target, cap);
        self.prefix_len = 0;
        self.hops_begun = 0;
    }

    pub fn advance(
        &mut self,
        t: f32,
        point: &PhasePoint,
        table: &PhaseTable,
        field: &NodeField,
    ) -> FrameView {
        if self.phase != Phase::Searching || self.path.is_empty() {
            return FrameView {
                phase: self.phase,
                marker: position_or_origin(field, self.current),
                active_edge: None,
            };
        }

        let start = point.cycle_start + table.offset_of(Phase::Searching).unwrap_or(0.0);
        let window = table.duration_of(Phase::Searching).unwrap_or(0.0);
        let animated = (window - SEARCH_END_DWELL).max(f32::EPSILON);

        let len = self.path.len();
        let step_duration = animated / len as f32;
        let progress = ((t - start) / step_duration).max(0.0);
        let step = progress.floor() as usize;

        if step + 1 < len {
            self.begin_hops_through(step);
            let a = position_or_origin(field, self.path[step]);
            let b = position_or_origin(field, self.path[step + 1]);
            FrameView {
                phase: self.phase,
                marker: a.lerp(b, progress.fract()),
                active_edge: Some((a, b)),
            }
        } else {
            self.finish();
            FrameView {
                phase: self.phase,
                marker: position_or_origin(field, self.path[len - 1]),
                active_edge: None,
            }
        }
    }

    // hop k leaves path[k]; hops skipped by a slow frame are caught up here
    fn begin_hops_through(&mut self, step: usize) {
        while self.hops_begun <= step {
            let k = self.hops_begun;
            self.visited.insert(self.path[k]);
            self.prefix_len = k + 2;
            self.hops_begun += 1;
        }
    }

    fn finish(&mut self) {
        for &i in &self.path {
            self.visited.insert(i);
        }
        self.hops_begun = self.path.len();
        self.prefix_len = self.path.len();
    }
}

fn random_index<R: Rng + ?Sized>(n: usize, rng: &mut R) -> usize {
    if n == 0 {
        0
    } else {
        rng.gen_range(0..n)
    }
}

fn position_or_origin(field: &NodeField, i: usize) -> Vec3 {
    field.get(i).map(|n| n.position).unwrap_or(Vec3::ZERO)
}
