use glam::{Vec2, Vec3};
use rand::Rng;

pub const DEFAULT_STAR_COUNT: usize = 666;
pub const STAR_BOX_SIDE: f32 = 15.0;

/// Static point cloud in a cube that slowly tumbles.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    points: Vec<Vec3>,
    /// Accumulated rotation about x and y, radians.
    rotation: Vec2,
}

impl Starfield {
    pub fn generate<R: Rng + ?Sized>(count: usize, side: f32, rng: &mut R) -> Self {
        let half = (side * 0.5).max(f32::EPSILON);
        let points = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                )
            })
            .collect();
        Self {
            points,
            rotation: Vec2::ZERO,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.rotation.x -= dt / 30.0;
        self.rotation.y -= dt / 40.0;
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }
}
