use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::beat::{Beat, DEFAULT_BEAT_GLOW, DEFAULT_BEAT_INTERVAL};
use crate::field::{FieldParams, NodeField};
use crate::graph::NeighborGraph;
use crate::log::LifecycleLog;
use crate::path::DEFAULT_STEP_CAP;
use crate::schedule::{Phase, PhaseTable, Scheduler};
use crate::search::{FrameView, NodeStyle, SearchState};

/// Construction-time values for one backdrop instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropParams {
    pub node_count: usize,
    pub extent: f32,
    pub step_cap: usize,
    pub beat_interval_secs: f32,
    pub beat_glow_secs: f32,
    /// Fixed seed for a reproducible layout; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for BackdropParams {
    fn default() -> Self {
        let field = FieldParams::default();
        Self {
            node_count: field.node_count,
            extent: field.extent,
            step_cap: DEFAULT_STEP_CAP,
            beat_interval_secs: DEFAULT_BEAT_INTERVAL,
            beat_glow_secs: DEFAULT_BEAT_GLOW,
            seed: None,
        }
    }
}

impl BackdropParams {
    pub fn field(&self) -> FieldParams {
        FieldParams {
            node_count: self.node_count,
            extent: self.extent,
        }
    }
}

/// The graph-search animation as one owned unit: mount, drive per frame,
/// tear down. After teardown every call is a no-op.
pub struct Backdrop {
    field: NodeField,
    graph: NeighborGraph,
    scheduler: Scheduler,
    search: SearchState,
    beat: Beat,
    rng: ChaCha8Rng,
    log: LifecycleLog,
    step_cap: usize,
    frames: u64,
    torn_down: bool,
}

impl Backdrop {
    pub fn mount(params: &BackdropParams, log: LifecycleLog) -> Self {
        let rng = match params.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::mount_with_rng(params, PhaseTable::default(), rng, log)
    }

    pub fn mount_with_rng(
        params: &BackdropParams,
        table: PhaseTable,
        mut rng: ChaCha8Rng,
        log: LifecycleLog,
    ) -> Self {
        let field = NodeField::generate(&params.field(), &mut rng);
        let graph = NeighborGraph::build(&field, &mut rng);
        let search = SearchState::new(field.len(), &mut rng);
        log.mounted(field.len(), graph.edge_count());

        Self {
            field,
            graph,
            scheduler: Scheduler::new(table),
            search,
            beat: Beat::new(params.beat_interval_secs, params.beat_glow_secs),
            rng,
            log,
            step_cap: params.step_cap,
            frames: 0,
            torn_down: false,
        }
    }

    /// Advances everything to animation time `t`. `None` once torn down.
    pub fn frame(&mut self, t: f32) -> Option<FrameView> {
        if self.torn_down {
            return None;
        }
        self.frames += 1;

        let tr = self.scheduler.evaluate(t);
        for phase in tr.entered.iter().copied() {
            self.enter(phase, tr.point.cycle);
        }

        let view = self
            .search
            .advance(t, &tr.point, self.scheduler.table(), &self.field);
        self.beat.tick(t, self.field.len(), &mut self.rng);
        Some(view)
    }

    fn enter(&mut self, phase: Phase, cycle: u64) {
        match phase {
            Phase::Waiting => self.search.enter_waiting(self.field.len(), &mut self.rng),
            Phase::Embedding => self.search.enter_embedding(),
            Phase::Searching => {
                self.search
                    .enter_searching(&self.field, &self.graph, self.step_cap);
                let path = self.search.path();
                self.log.path_computed(
                    path.len(),
                    path.last() == Some(&self.search.target()),
                );
            }
        }
        self.log
            .phase_entered(cycle, phase, self.search.current(), self.search.target());
    }

    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.beat.cancel();
        self.torn_down = true;
        self.log.torn_down(self.frames);
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn pending_tasks(&self) -> usize {
        usize::from(self.beat.is_pending())
    }

    pub fn node_style(&self, i: usize) -> NodeStyle {
        self.search.style_of(i, self.field.level(i))
    }

    pub fn is_pulsing(&self, i: usize) -> bool {
        self.beat.is_glowing(i)
    }

    pub fn field(&self) -> &NodeField {
        &self.field
    }

    pub fn graph(&self) -> &NeighborGraph {
        &self.graph
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn beat(&self) -> &Beat {
        &self.beat
    }

    pub fn phase_table(&self) -> &PhaseTable {
        self.scheduler.table()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::tests::count_events;

    fn params(n: usize, seed: u64) -> BackdropParams {
        BackdropParams {
            node_count: n,
            extent: 8.0,
            step_cap: 20,
            seed: Some(seed),
            ..BackdropParams::default()
        }
    }

    #[test]
    fn end_to_end_cycle() {
        let mut bd = Backdrop::mount(&params(60, 2024), LifecycleLog::disabled());
        let initial_target = bd.search().target();

        let view = bd.frame(0.5).expect("live");
        assert_eq!(view.phase, Phase::Waiting);
        assert_eq!(bd.search().current(), initial_target);
        assert_ne!(bd.search().target(), bd.search().current());
        let fresh_target = bd.search().target();

        let mut t = 0.5;
        while t < 5.0 {
            t += 1.0 / 60.0;
            bd.frame(t);
        }
        let view = bd.frame(5.0).expect("live");
        assert_eq!(view.phase, Phase::Searching);
        assert!(!bd.search().path().is_empty());
        assert_eq!(bd.search().target(), fresh_target);

        let view = bd.frame(9.9).expect("live");
        let last = *bd.search().path().last().expect("non-empty path");
        assert_eq!(view.marker, bd.field().position(last));
        assert!(view.active_edge.is_none());
    }

    #[test]
    fn phase_check_is_idempotent_within_window() {
        let mut bd = Backdrop::mount(&params(60, 7), LifecycleLog::disabled());
        bd.frame(4.5);
        let path = bd.search().path().to_vec();
        let target = bd.search().target();
        for i in 0..100 {
            bd.frame(4.5 + i as f32 * 0.05);
            assert_eq!(bd.search().path(), path.as_slice());
            assert_eq!(bd.search().target(), target);
        }
    }

    #[test]
    fn each_cycle_rerandomizes_once() {
        let mut bd = Backdrop::mount(&params(60, 8), LifecycleLog::disabled());
        let mut starts = Vec::new();
        let mut t = 0.0;
        while t < 40.0 {
            bd.frame(t);
            if bd.search().phase() == Phase::Searching && starts.len() as f32 <= t / 10.0 {
                starts.push((bd.search().path()[0], bd.search().target()));
            }
            t += 0.25;
        }
        assert_eq!(starts.len(), 4);
        // each search starts where the previous target was
        for w in starts.windows(2) {
            assert_eq!(w[1].0, w[0].1);
        }
    }

    #[test]
    fn teardown_stops_timers_and_updates() {
        let mut bd = Backdrop::mount(&params(40, 9), LifecycleLog::disabled());
        for i in 0..200 {
            bd.frame(i as f32 * 0.05);
        }
        assert!(bd.beat().fired() > 0);
        assert_eq!(bd.pending_tasks(), 1);

        bd.teardown();
        assert_eq!(bd.pending_tasks(), 0);
        let fired = bd.beat().fired();
        let frames = bd.frames();
        let search = (
            bd.search().current(),
            bd.search().target(),
            bd.search().path().to_vec(),
        );

        for i in 200..400 {
            assert!(bd.frame(i as f32 * 0.05).is_none());
        }
        assert_eq!(bd.beat().fired(), fired);
        assert_eq!(bd.frames(), frames);
        assert_eq!(
            (
                bd.search().current(),
                bd.search().target(),
                bd.search().path().to_vec()
            ),
            search
        );
    }

    #[test]
    fn remount_is_a_fresh_instance() {
        let mut first = Backdrop::mount(&params(40, 10), LifecycleLog::disabled());
        first.frame(5.0);
        first.teardown();
        let mut second = Backdrop::mount(&params(40, 10), LifecycleLog::disabled());
        assert_eq!(second.frames(), 0);
        assert_eq!(second.pending_tasks(), 1);
        assert!(second.frame(0.1).is_some());
    }

    #[test]
    fn lifecycle_is_logged_only_when_enabled() {
        let quiet = count_events(|| {
            let mut bd = Backdrop::mount(&params(40, 11), LifecycleLog::disabled());
            bd.frame(5.0);
            bd.teardown();
        });
        assert_eq!(quiet, 0);

        let loud = count_events(|| {
            let mut bd = Backdrop::mount(&params(40, 11), LifecycleLog::new(true, 1));
            bd.frame(5.0);
            bd.teardown();
            // second teardown (and drop) must not log again
            bd.teardown();
        });
        // mounted, waiting entered, path computed, searching entered, torn down
        assert_eq!(loud, 5);
    }

    #[test]
    fn node_styles_cover_every_node() {
        let mut bd = Backdrop::mount(&params(40, 12), LifecycleLog::disabled());
        bd.frame(9.9);
        let targets = (0..40)
            .filter(|&i| bd.node_style(i) == NodeStyle::Target)
            .count();
        assert_eq!(targets, 1);
    }
}
