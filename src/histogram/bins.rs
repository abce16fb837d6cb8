//! Equal-width bin edges with a closed top bin.

use crate::util::math::linspace;
use crate::util::{HistMatchError, HistMatchResult};

/// `num_bins + 1` ascending boundaries splitting `[lo, hi]` into equal bins.
///
/// A value `v` falls in bin `k` when `edge[k] <= v < edge[k + 1]`, except
/// that `v == hi` belongs to the last bin. Values below `lo` are assigned to
/// the first bin and values above `hi` to the last.
#[derive(Clone, Debug, PartialEq)]
pub struct BinEdges {
    edges: Vec<f32>,
}

impl BinEdges {
    /// Builds `num_bins` equal-width bins over `[lo, hi]`.
    pub fn uniform(lo: f32, hi: f32, num_bins: usize) -> HistMatchResult<Self> {
        if num_bins == 0 {
            return Err(HistMatchError::InvalidBinCount { num_bins });
        }
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(HistMatchError::InvalidInput("bin range must be finite with lo < hi"));
        }
        Ok(Self {
            edges: linspace(lo, hi, num_bins + 1),
        })
    }

    pub fn num_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Returns all `num_bins + 1` boundaries.
    pub fn edges(&self) -> &[f32] {
        &self.edges
    }

    pub fn lo(&self) -> f32 {
        self.edges[0]
    }

    pub fn hi(&self) -> f32 {
        self.edges[self.edges.len() - 1]
    }

    /// Bin index for `value`, or `None` when it is not finite.
    pub fn bin_index(&self, value: f32) -> Option<usize> {
        if !value.is_finite() {
            return None;
        }
        let n = self.num_bins();
        if value <= self.lo() {
            return Some(0);
        }
        if value >= self.hi() {
            return Some(n - 1);
        }

        // Arithmetic guess, then settle against the stored edges so the
        // half-open rule holds exactly at every boundary.
        let width = (self.hi() - self.lo()) / n as f32;
        let mut k = (((value - self.lo()) / width) as usize).min(n - 1);
        while k > 0 && value < self.edges[k] {
            k -= 1;
        }
        while k + 1 < n && value >= self.edges[k + 1] {
            k += 1;
        }
        Some(k)
    }
}
