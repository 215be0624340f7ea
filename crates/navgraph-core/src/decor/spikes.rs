use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

pub const DEFAULT_SPIKE_COUNT: usize = 20;
/// Number of palette slots a spike may pick from; the viewer owns the colors.
pub const SPIKE_PALETTE_LEN: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Spike {
    pub dir: Vec3,
    pub palette: usize,
    pub speed: f32,
    pub length: f32,
    pub offset: f32,
    pub scale: f32,
    pub visible: bool,
}

impl Spike {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let dir = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        )
        .try_normalize()
        .unwrap_or(Vec3::Y);
        Self {
            dir,
            palette: rng.gen_range(0..SPIKE_PALETTE_LEN),
            speed: rng.gen_range(0.5..2.5),
            length: rng.gen_range(2.0..6.0),
            offset: rng.gen_range(0.0..TAU),
            scale: 0.0,
            visible: true,
        }
    }

    pub fn pulse(&self, t: f32) -> f32 {
        (t * self.speed + self.offset).sin() * 0.5 + 0.5
    }
}

/// Light spikes that pulse in length and flicker at the bottom of the pulse.
#[derive(Debug, Clone, Default)]
pub struct Spikes {
    spikes: Vec<Spike>,
}

impl Spikes {
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        Self {
            spikes: (0..count).map(|_| Spike::random(rng)).collect(),
        }
    }

    pub fn update<R: Rng + ?Sized>(&mut self, t: f32, rng: &mut R) {
        for spike in &mut self.spikes {
            let scale = spike.pulse(t);
            spike.scale = scale;
            if scale > 0.9 {
                spike.visible = true;
            } else if scale < 0.1 {
                spike.visible = rng.gen_bool(0.7);
            }
        }
    }

    /// Shared spin of every spike group at time `t`, radians about x and y.
    pub fn spin(t: f32) -> Vec2 {
        Vec2::new((t * 0.3).sin() * 0.5, t * 0.5)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spike> {
        self.spikes.iter()
    }

    pub fn len(&self) -> usize {
        self.spikes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spikes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generated_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let spikes = Spikes::generate(DEFAULT_SPIKE_COUNT, &mut rng);
        assert_eq!(spikes.len(), DEFAULT_SPIKE_COUNT);
        for s in spikes.iter() {
            assert!((s.dir.length() - 1.0).abs() < 1e-4);
            assert!(s.palette < SPIKE_PALETTE_LEN);
            assert!((0.5..2.5).contains(&s.speed));
            assert!((2.0..6.0).contains(&s.length));
        }
    }

    #[test]
    fn peak_always_shows_mid_keeps_state() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let mut spikes = Spikes::generate(50, &mut rng);
        for t in 0..400 {
            let t = t as f32 * 0.05;
            let before: Vec<bool> = spikes.iter().map(|s| s.visible).collect();
            spikes.update(t, &mut rng);
            for (s, was) in spikes.iter().zip(before) {
                assert!((0.0..=1.0).contains(&s.scale));
                if s.scale > 0.9 {
                    assert!(s.visible);
                } else if s.scale >= 0.1 {
                    assert_eq!(s.visible, was);
                }
            }
        }
    }
}
