use rand::Rng;
use std::collections::VecDeque;

pub const CELL_PX: f32 = 20.0;
pub const TICK_SECS: f32 = 1.0 / 30.0;
pub const TRAIL_LEN: usize = 14;
const RESET_CHANCE: f64 = 0.025;

#[derive(Debug, Clone, Default)]
pub struct RainColumn {
    /// Row of the leading glyph.
    pub drop: u32,
    /// Most recent glyph first.
    pub trail: VecDeque<char>,
}

/// Falling columns of '0'/'1' glyphs over the whole viewport.
#[derive(Debug, Clone, Default)]
pub struct DigitalRain {
    height: f32,
    columns: Vec<RainColumn>,
    acc: f32,
}

impl DigitalRain {
    pub fn new(width: f32, height: f32) -> Self {
        let mut rain = Self::default();
        rain.resize(width, height);
        rain
    }

    /// Keeps existing columns, adds or drops at the right edge.
    pub fn resize(&mut self, width: f32, height: f32) {
        let count = (width.max(0.0) / CELL_PX).floor() as usize;
        self.columns.resize_with(count, RainColumn::default);
        self.height = height.max(0.0);
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        self.acc += dt.max(0.0);
        // cap catch-up after long stalls
        self.acc = self.acc.min(TICK_SECS * 8.0);
        while self.acc >= TICK_SECS {
            self.acc -= TICK_SECS;
            self.tick(rng);
        }
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for col in &mut self.columns {
            let glyph = if rng.gen_bool(0.5) { '1' } else { '0' };
            col.trail.push_front(glyph);
            col.trail.truncate(TRAIL_LEN);

            if col.drop as f32 * CELL_PX > self.height && rng.gen_bool(RESET_CHANCE) {
                col.drop = 0;
                col.trail.clear();
            }
            col.drop += 1;
        }
    }

    pub fn columns(&self) -> &[RainColumn] {
        &self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn column_count_follows_width() {
        let mut rain = DigitalRain::new(1280.0, 720.0);
        assert_eq!(rain.columns().len(), 64);
        rain.resize(100.0, 720.0);
        assert_eq!(rain.columns().len(), 5);
        rain.resize(0.0, 0.0);
        assert!(rain.columns().is_empty());
    }

    #[test]
    fn drops_fall_and_eventually_reset() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut rain = DigitalRain::new(200.0, 100.0);
        for _ in 0..5 {
            rain.tick(&mut rng);
        }
        assert!(rain.columns().iter().all(|c| c.drop == 5));
        assert!(rain.columns().iter().all(|c| c.trail.len() == 5));

        let mut reset_seen = false;
        for _ in 0..2000 {
            rain.tick(&mut rng);
            reset_seen |= rain.columns().iter().any(|c| c.drop == 1);
            assert!(rain.columns().iter().all(|c| c.trail.len() <= TRAIL_LEN));
        }
        assert!(reset_seen);
    }

    #[test]
    fn advance_ticks_at_fixed_rate() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut rain = DigitalRain::new(40.0, 10_000.0);
        rain.advance(TICK_SECS * 3.5, &mut rng);
        assert!(rain.columns().iter().all(|c| c.drop == 3));
        // a long stall only catches up a bounded number of ticks
        rain.advance(10.0, &mut rng);
        assert!(rain.columns().iter().all(|c| (10..=11).contains(&c.drop)));
    }
}
