use rand::Rng;
use smallvec::SmallVec;

use crate::field::NodeField;

pub const MIN_DEGREE: usize = 2;
pub const MAX_DEGREE: usize = 4;

pub type Neighbors = SmallVec<[usize; MAX_DEGREE]>;

/// Directed adjacency over a [`NodeField`]. Built once, never mutated.
///
/// Each node links to its nearest nodes at the same or a lower level, which
/// gives the layered look of a navigable-small-world index without any query
/// capability. Upper-level nodes additionally keep one link down a level.
#[derive(Debug, Clone, Default)]
pub struct NeighborGraph {
    adjacency: Vec<Neighbors>,
}

impl NeighborGraph {
    pub fn build<R: Rng + ?Sized>(field: &NodeField, rng: &mut R) -> Self {
        let adjacency = (0..field.len())
            .map(|i| {
                let degree = rng.gen_range(MIN_DEGREE..=MAX_DEGREE);
                select_neighbors(field, i, degree)
            })
            .collect();
        Self { adjacency }
    }

    pub fn neighbors(&self, i: usize) -> &[usize] {
        self.adjacency.get(i).map(|n| n.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|n| n.len()).sum()
    }

    /// Every stored edge once, in (from, to) order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, ns)| ns.iter().map(move |&to| (from, to)))
    }
}

fn select_neighbors(field: &NodeField, i: usize, degree: usize) -> Neighbors {
    let level = field.level(i);

    let mut pool = ranked_by_distance(field, i, |j| field.level(j) <= level);
    if pool.len() < degree {
        pool = ranked_by_distance(field, i, |_| true);
    }

    let mut chosen: Neighbors = pool.iter().take(degree).map(|&(j, _)| j).collect();

    // keep upper layers wired into the one below
    if level > 0 && chosen.iter().all(|&j| field.level(j) >= level) {
        let lower = ranked_by_distance(field, i, |j| field.level(j) < level);
        if let (Some(&(down, _)), Some(last)) = (lower.first(), chosen.last_mut()) {
            *last = down;
        }
    }

    chosen
}

fn ranked_by_distance(
    field: &NodeField,
    i: usize,
    keep: impl Fn(usize) -> bool,
) -> Vec<(usize, f32)> {
    let mut out: Vec<(usize, f32)> = (0..field.len())
        .filter(|&j| j != i && keep(j))
        .map(|j| (j, field.distance(i, j)))
        .collect();
    out.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    out
}
