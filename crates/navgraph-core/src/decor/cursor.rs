use glam::Vec2;

/// Damped spring constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl Spring {
    pub const DOT: Spring = Spring {
        stiffness: 200.0,
        damping: 30.0,
        mass: 0.5,
    };
    pub const RING: Spring = Spring {
        stiffness: 100.0,
        damping: 20.0,
        mass: 0.8,
    };
}

const MAX_SUBSTEP: f32 = 1.0 / 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringFollower {
    pub pos: Vec2,
    pub vel: Vec2,
    pub scale: f32,
    scale_vel: f32,
    spring: Spring,
}

impl SpringFollower {
    pub fn new(spring: Spring, at: Vec2) -> Self {
        Self {
            pos: at,
            vel: Vec2::ZERO,
            scale: 1.0,
            scale_vel: 0.0,
            spring,
        }
    }

    /// Semi-implicit Euler, substepped so large frame gaps stay stable.
    pub fn step(&mut self, target: Vec2, target_scale: f32, dt: f32) {
        let mut left = dt.clamp(0.0, 0.25);
        let s = self.spring;
        while left > 0.0 {
            let h = left.min(MAX_SUBSTEP);
            left -= h;

            let acc = (s.stiffness * (target - self.pos) - s.damping * self.vel) / s.mass;
            self.vel += acc * h;
            self.pos += self.vel * h;

            let sacc =
                (s.stiffness * (target_scale - self.scale) - s.damping * self.scale_vel) / s.mass;
            self.scale_vel += sacc * h;
            self.scale += self.scale_vel * h;
        }
    }
}

/// Two-part custom cursor: a small dot and a looser ring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CursorTrail {
    pub dot: SpringFollower,
    pub ring: SpringFollower,
}

impl CursorTrail {
    pub const DOT_HOVER_SCALE: f32 = 2.5;
    pub const RING_HOVER_SCALE: f32 = 1.5;

    pub fn new(at: Vec2) -> Self {
        Self {
            dot: SpringFollower::new(Spring::DOT, at),
            ring: SpringFollower::new(Spring::RING, at),
        }
    }

    pub fn step(&mut self, pointer: Vec2, hovering: bool, dt: f32) {
        let (dot_scale, ring_scale) = if hovering {
            (Self::DOT_HOVER_SCALE, Self::RING_HOVER_SCALE)
        } else {
            (1.0, 1.0)
        };
        self.dot.step(pointer, dot_scale, dt);
        self.ring.step(pointer, ring_scale, dt);
    }
}

impl Default for CursorTrail {
    fn default() -> Self {
        Self::new(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settles_on_pointer() {
        let mut c = CursorTrail::default();
        let target = Vec2::new(300.0, 200.0);
        for _ in 0..240 {
            c.step(target, false, 1.0 / 60.0);
        }
        assert!(c.dot.pos.distance(target) < 0.5);
        assert!(c.ring.pos.distance(target) < 0.5);
        assert!((c.dot.scale - 1.0).abs() < 1e-3);
    }

    #[test]
    fn ring_lags_dot() {
        let mut c = CursorTrail::default();
        let target = Vec2::new(100.0, 0.0);
        for _ in 0..6 {
            c.step(target, false, 1.0 / 60.0);
        }
        assert!(c.dot.pos.x > c.ring.pos.x);
    }

    #[test]
    fn hover_grows_scale() {
        let mut c = CursorTrail::default();
        for _ in 0..240 {
            c.step(Vec2::ZERO, true, 1.0 / 60.0);
        }
        assert!((c.dot.scale - CursorTrail::DOT_HOVER_SCALE).abs() < 1e-2);
        assert!((c.ring.scale - CursorTrail::RING_HOVER_SCALE).abs() < 1e-2);
    }

    #[test]
    fn huge_dt_is_stable() {
        let mut c = CursorTrail::default();
        c.step(Vec2::new(50.0, 50.0), false, 10.0);
        assert!(c.dot.pos.is_finite());
        assert!(c.dot.pos.length() < 200.0);
    }
}
