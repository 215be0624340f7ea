use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Indices below this are level 2.
pub const TOP_BAND_END: usize = 5;
/// Indices below this (and at or above `TOP_BAND_END`) are level 1.
pub const MID_BAND_END: usize = 15;

pub const DEFAULT_NODE_COUNT: usize = 40;
pub const DEFAULT_EXTENT: f32 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub node_count: usize,
    /// Edge length of the cube the nodes are sampled in, centered on the origin.
    pub extent: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            extent: DEFAULT_EXTENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub position: Vec3,
    pub level: u8,
}

pub fn level_for_index(i: usize) -> u8 {
    if i < TOP_BAND_END {
        2
    } else if i < MID_BAND_END {
        1
    } else {
        0
    }
}

/// Fixed set of points; nothing moves after generation.
#[derive(Debug, Clone, Default)]
pub struct NodeField {
    nodes: Vec<Node>,
}

impl NodeField {
    pub fn generate<R: Rng + ?Sized>(params: &FieldParams, rng: &mut R) -> Self {
        let half = params.extent * 0.5;
        let nodes = (0..params.node_count)
            .map(|i| Node {
                position: Vec3::new(
                    sample_axis(rng, half),
                    sample_axis(rng, half),
                    sample_axis(rng, half),
                ),
                level: level_for_index(i),
            })
            .collect();
        Self { nodes }
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&Node> {
        self.nodes.get(i)
    }

    pub fn position(&self, i: usize) -> Vec3 {
        self.nodes[i].position
    }

    pub fn level(&self, i: usize) -> u8 {
        self.nodes[i].level
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter().enumerate()
    }

    pub fn distance(&self, a: usize, b: usize) -> f32 {
        self.position(a).distance(self.position(b))
    }
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    if half <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half..half)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn levels_are_banded_and_non_increasing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for n in [1, 5, 6, 15, 16, 40, 60, 200] {
            let field = NodeField::generate(
                &FieldParams {
                    node_count: n,
                    extent: 8.0,
                },
                &mut rng,
            );
            assert_eq!(field.len(), n);
            let levels: Vec<u8> = field.iter().map(|(_, node)| node.level).collect();
            assert!(levels.iter().all(|l| *l <= 2));
            assert!(levels.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn band_edges() {
        assert_eq!(level_for_index(0), 2);
        assert_eq!(level_for_index(4), 2);
        assert_eq!(level_for_index(5), 1);
        assert_eq!(level_for_index(14), 1);
        assert_eq!(level_for_index(15), 0);
    }

    #[test]
    fn positions_stay_inside_extent() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let field = NodeField::generate(
            &FieldParams {
                node_count: 500,
                extent: 8.0,
            },
            &mut rng,
        );
        for (_, node) in field.iter() {
            let p = node.position;
            assert!(p.x.abs() <= 4.0 && p.y.abs() <= 4.0 && p.z.abs() <= 4.0);
        }
    }

    #[test]
    fn same_seed_same_field() {
        let params = FieldParams::default();
        let a = NodeField::generate(&params, &mut ChaCha8Rng::seed_from_u64(42));
        let b = NodeField::generate(&params, &mut ChaCha8Rng::seed_from_u64(42));
        for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
            assert_eq!(x, y);
        }
    }
}
