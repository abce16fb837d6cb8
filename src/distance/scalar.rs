//! Baseline scalar distance kernels.

use crate::distance::{DistanceKernel, IntersectionSums};

/// Straight-line loops over both slices.
pub struct ScalarKernel;

impl DistanceKernel for ScalarKernel {
    fn intersection_sums(x: &[f32], y: &[f32]) -> IntersectionSums {
        let mut sums = IntersectionSums::default();
        for (&a, &b) in x.iter().zip(y) {
            sums.min += a.min(b);
            sums.x += a;
            sums.y += b;
        }
        sums
    }

    fn squared_l2(x: &[f32], y: &[f32]) -> f32 {
        x.iter()
            .zip(y)
            .map(|(&a, &b)| {
                let diff = a - b;
                diff * diff
            })
            .sum()
    }

    fn chi2_smoothed(x: &[f32], y: &[f32], offset: f32) -> f32 {
        x.iter()
            .zip(y)
            .map(|(&a, &b)| {
                let (a, b) = (a + offset, b + offset);
                let diff = a - b;
                diff * diff / (a + b)
            })
            .sum()
    }
}
