use rand::Rng;
use std::collections::HashMap;

pub const DEFAULT_BEAT_INTERVAL: f32 = 1.5;
pub const DEFAULT_BEAT_GLOW: f32 = 0.6;

/// Repeating task on the animation clock. Once cancelled it never fires again.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    interval: f32,
    next_due: Option<f32>,
    cancelled: bool,
}

impl ScheduledTask {
    pub fn every(interval: f32) -> Self {
        Self {
            interval: interval.max(f32::EPSILON),
            next_due: None,
            cancelled: false,
        }
    }

    /// Returns true when the task fires at `t`. The first poll only arms it.
    pub fn poll(&mut self, t: f32) -> bool {
        if self.cancelled {
            return false;
        }
        match self.next_due {
            None => {
                self.next_due = Some(t + self.interval);
                false
            }
            Some(due) if t >= due => {
                self.next_due = Some(t + self.interval);
                true
            }
            Some(_) => false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_due = None;
    }

    pub fn is_pending(&self) -> bool {
        !self.cancelled
    }
}

/// Periodic random node pulse.
#[derive(Debug, Clone)]
pub struct Beat {
    task: ScheduledTask,
    glow: f32,
    pulses: HashMap<usize, f32>,
    fired: u64,
}

impl Beat {
    pub fn new(interval: f32, glow: f32) -> Self {
        Self {
            task: ScheduledTask::every(interval),
            glow,
            pulses: HashMap::new(),
            fired: 0,
        }
    }

    /// Picks a node when the task fires, and drops pulses that have faded.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        t: f32,
        node_count: usize,
        rng: &mut R,
    ) -> Option<usize> {
        if !self.task.is_pending() {
            return None;
        }
        self.pulses.retain(|_, until| *until > t);
        if node_count == 0 || !self.task.poll(t) {
            return None;
        }
        let picked = rng.gen_range(0..node_count);
        self.pulses.insert(picked, t + self.glow);
        self.fired += 1;
        Some(picked)
    }

    pub fn is_glowing(&self, i: usize) -> bool {
        self.pulses.contains_key(&i)
    }

    pub fn glowing(&self) -> impl Iterator<Item = usize> + '_ {
        self.pulses.keys().copied()
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }

    pub fn cancel(&mut self) {
        self.task.cancel();
        self.pulses.clear();
    }

    pub fn is_pending(&self) -> bool {
        self.task.is_pending()
    }
}

impl Default for Beat {
    fn default() -> Self {
        Self::new(DEFAULT_BEAT_INTERVAL, DEFAULT_BEAT_GLOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn task_arms_then_fires_on_interval() {
        let mut task = ScheduledTask::every(1.0);
        assert!(!task.poll(0.0));
        assert!(!task.poll(0.5));
        assert!(task.poll(1.0));
        assert!(!task.poll(1.5));
        assert!(task.poll(2.2));
        assert!(!task.poll(3.1));
        assert!(task.poll(3.3));
    }

    #[test]
    fn cancelled_task_never_fires() {
        let mut task = ScheduledTask::every(0.1);
        task.poll(0.0);
        task.cancel();
        assert!(!task.is_pending());
        for i in 0..100 {
            assert!(!task.poll(i as f32));
        }
    }

    #[test]
    fn pulses_fade_after_glow() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut beat = Beat::new(1.0, 0.4);
        beat.tick(0.0, 10, &mut rng);
        let picked = beat.tick(1.0, 10, &mut rng).expect("fires at 1.0");
        assert!(beat.is_glowing(picked));
        beat.tick(1.3, 10, &mut rng);
        assert!(beat.is_glowing(picked));
        beat.tick(1.5, 10, &mut rng);
        assert!(!beat.is_glowing(picked));
    }

    #[test]
    fn cancel_stops_all_updates() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut beat = Beat::new(0.5, 10.0);
        beat.tick(0.0, 10, &mut rng);
        beat.tick(0.5, 10, &mut rng);
        let fired = beat.fired();
        beat.cancel();
        for i in 1..50 {
            assert_eq!(beat.tick(i as f32, 10, &mut rng), None);
        }
        assert_eq!(beat.fired(), fired);
        assert_eq!(beat.glowing().count(), 0);
    }

    #[test]
    fn empty_field_never_pulses() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut beat = Beat::new(0.1, 0.1);
        for i in 0..10 {
            assert_eq!(beat.tick(i as f32, 0, &mut rng), None);
        }
    }
}
