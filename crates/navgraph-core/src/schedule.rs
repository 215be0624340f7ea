use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Waiting,
    Embedding,
    Searching,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Embedding => "embedding",
            Self::Searching => "searching",
        }
    }
}

/// Ordered (phase, seconds) pairs making up one cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTable {
    entries: Vec<(Phase, f32)>,
    cycle: f32,
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self::new(vec![
            (Phase::Waiting, 2.0),
            (Phase::Embedding, 2.0),
            (Phase::Searching, 6.0),
        ])
    }
}

/// Where a clock value falls inside the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePoint {
    pub cycle: u64,
    pub phase: Phase,
    pub cycle_start: f32,
    pub phase_start: f32,
}

impl PhaseTable {
    /// Entries with non-positive durations are dropped.
    pub fn new(entries: Vec<(Phase, f32)>) -> Self {
        let entries: Vec<(Phase, f32)> = entries
            .into_iter()
            .filter(|(_, secs)| secs.is_finite() && *secs > 0.0)
            .collect();
        let cycle = entries.iter().map(|(_, secs)| secs).sum();
        Self { entries, cycle }
    }

    pub fn cycle_len(&self) -> f32 {
        self.cycle
    }

    pub fn entries(&self) -> &[(Phase, f32)] {
        &self.entries
    }

    pub fn first_phase(&self) -> Phase {
        self.entries
            .first()
            .map(|(phase, _)| *phase)
            .unwrap_or(Phase::Waiting)
    }

    /// Offset of `phase` from the start of its cycle.
    pub fn offset_of(&self, phase: Phase) -> Option<f32> {
        let mut acc = 0.0;
        for (p, secs) in &self.entries {
            if *p == phase {
                return Some(acc);
            }
            acc += secs;
        }
        None
    }

    pub fn duration_of(&self, phase: Phase) -> Option<f32> {
        self.entries
            .iter()
            .find(|(p, _)| *p == phase)
            .map(|(_, secs)| *secs)
    }

    pub fn locate(&self, t: f32) -> PhasePoint {
        let t = if t.is_finite() { t.max(0.0) } else { 0.0 };
        if self.entries.is_empty() {
            return PhasePoint {
                cycle: 0,
                phase: Phase::Waiting,
                cycle_start: 0.0,
                phase_start: 0.0,
            };
        }

        let cycle = (t / self.cycle).floor();
        let cycle_start = cycle * self.cycle;
        let offset = t - cycle_start;

        let mut acc = 0.0;
        for (phase, secs) in &self.entries {
            if offset < acc + secs {
                return PhasePoint {
                    cycle: cycle as u64,
                    phase: *phase,
                    cycle_start,
                    phase_start: cycle_start + acc,
                };
            }
            acc += secs;
        }

        // rounding put us on the cycle boundary
        let (phase, secs) = self.entries[self.entries.len() - 1];
        PhasePoint {
            cycle: cycle as u64,
            phase,
            cycle_start,
            phase_start: cycle_start + self.cycle - secs,
        }
    }
}

/// Result of one scheduler evaluation: the located point plus the phases
/// whose entry actions must run this frame, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub point: PhasePoint,
    pub entered: SmallVec<[Phase; 2]>,
}

impl Transition {
    pub fn is_quiet(&self) -> bool {
        self.entered.is_empty()
    }
}

/// Edge-triggered phase machine over a [`PhaseTable`].
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    table: PhaseTable,
    stored: Option<(u64, Phase)>,
}

impl Scheduler {
    pub fn new(table: PhaseTable) -> Self {
        Self {
            table,
            stored: None,
        }
    }

    pub fn table(&self) -> &PhaseTable {
        &self.table
    }

    pub fn stored(&self) -> Option<(u64, Phase)> {
        self.stored
    }

    pub fn evaluate(&mut self, t: f32) -> Transition {
        let point = self.table.locate(t);
        let key = (point.cycle, point.phase);
        if self.stored == Some(key) {
            return Transition {
                point,
                entered: SmallVec::new(),
            };
        }

        let new_cycle = self.stored.map_or(true, |(cycle, _)| cycle != point.cycle);
        let first = self.table.first_phase();
        let mut entered: SmallVec<[Phase; 2]> = smallvec![];
        // a cycle always opens with its first phase, even if a stall skipped it
        if new_cycle && point.phase != first {
            entered.push(first);
        }
        entered.push(point.phase);

        self.stored = Some(key);
        Transition { point, entered }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_ten_seconds() {
        let table = PhaseTable::default();
        assert_eq!(table.cycle_len(), 10.0);
        assert_eq!(table.offset_of(Phase::Searching), Some(4.0));
        assert_eq!(table.duration_of(Phase::Searching), Some(6.0));
    }

    #[test]
    fn locate_boundaries() {
        let table = PhaseTable::default();
        assert_eq!(table.locate(0.0).phase, Phase::Waiting);
        assert_eq!(table.locate(1.99).phase, Phase::Waiting);
        assert_eq!(table.locate(2.0).phase, Phase::Embedding);
        assert_eq!(table.locate(4.0).phase, Phase::Searching);
        assert_eq!(table.locate(9.99).phase, Phase::Searching);

        let p = table.locate(23.0);
        assert_eq!(p.cycle, 2);
        assert_eq!(p.phase, Phase::Embedding);
        assert_eq!(p.cycle_start, 20.0);
        assert_eq!(p.phase_start, 22.0);
    }

    #[test]
    fn negative_and_nan_clock_clamp_to_zero() {
        let table = PhaseTable::default();
        assert_eq!(table.locate(-3.0).cycle, 0);
        assert_eq!(table.locate(f32::NAN).phase, Phase::Waiting);
    }

    #[test]
    fn zero_durations_dropped() {
        let table = PhaseTable::new(vec![
            (Phase::Waiting, 1.0),
            (Phase::Embedding, 0.0),
            (Phase::Searching, 3.0),
        ]);
        assert_eq!(table.entries().len(), 2);
        assert_eq!(table.locate(1.5).phase, Phase::Searching);
    }

    #[test]
    fn repeated_evaluation_within_window_is_quiet() {
        let mut s = Scheduler::default();
        let first = s.evaluate(0.1);
        assert_eq!(first.entered.as_slice(), &[Phase::Waiting]);
        for t in [0.2, 0.5, 1.0, 1.9] {
            assert!(s.evaluate(t).is_quiet());
        }
        assert_eq!(s.evaluate(2.5).entered.as_slice(), &[Phase::Embedding]);
        assert!(s.evaluate(3.0).is_quiet());
        assert_eq!(s.evaluate(4.1).entered.as_slice(), &[Phase::Searching]);
        assert!(s.evaluate(8.0).is_quiet());
        assert_eq!(s.evaluate(10.2).entered.as_slice(), &[Phase::Waiting]);
    }

    #[test]
    fn stall_across_cycle_still_enters_waiting() {
        let mut s = Scheduler::default();
        s.evaluate(5.0);
        let tr = s.evaluate(15.0);
        assert_eq!(tr.point.cycle, 1);
        assert_eq!(tr.entered.as_slice(), &[Phase::Waiting, Phase::Searching]);
    }

    #[test]
    fn first_frame_mid_cycle() {
        let mut s = Scheduler::default();
        let tr = s.evaluate(5.0);
        assert_eq!(tr.entered.as_slice(), &[Phase::Waiting, Phase::Searching]);
    }
}
