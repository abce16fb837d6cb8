//! Bounded nearest-neighbour collection with deterministic ordering.

use crate::util::math::asc_then_index;
use std::cmp::Ordering;

/// A model image and its distance to some query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbor {
    /// Row of the model in the distance matrix.
    pub model: usize,
    /// Distance between the model and the query.
    pub distance: f32,
}

fn neighbor_cmp_asc(a: &Neighbor, b: &Neighbor) -> Ordering {
    asc_then_index((a.model, a.distance), (b.model, b.distance))
}

/// Keeps the `k` closest neighbours seen so far, with O(k) insertion.
pub(crate) struct NearestK {
    k: usize,
    items: Vec<Neighbor>,
}

impl NearestK {
    pub(crate) fn new(k: usize) -> Self {
        Self {
            k,
            items: Vec::with_capacity(k),
        }
    }

    /// Pushes a neighbour, evicting the farthest one when full.
    pub(crate) fn push(&mut self, neighbor: Neighbor) {
        if self.k == 0 {
            return;
        }
        if self.items.len() < self.k {
            self.items.push(neighbor);
            return;
        }

        let mut worst_idx = 0usize;
        for (idx, item) in self.items.iter().enumerate().skip(1) {
            if neighbor_cmp_asc(item, &self.items[worst_idx]) == Ordering::Greater {
                worst_idx = idx;
            }
        }

        if neighbor_cmp_asc(&neighbor, &self.items[worst_idx]) == Ordering::Less {
            self.items[worst_idx] = neighbor;
        }
    }

    /// Returns neighbours by ascending distance, ties by ascending model index.
    pub(crate) fn into_sorted_asc(mut self) -> Vec<Neighbor> {
        self.items.sort_by(neighbor_cmp_asc);
        self.items
    }
}
