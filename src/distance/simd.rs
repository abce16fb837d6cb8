//! SIMD distance kernels using the `wide` crate.
//!
//! Eight bins are processed per step with `f32x8`; the tail that does not
//! fill a full lane group is handled with scalar code.

use crate::distance::{DistanceKernel, IntersectionSums};
use wide::f32x8;

const LANES: usize = 8;

#[inline]
fn load_f32x8(slice: &[f32]) -> f32x8 {
    f32x8::from([
        slice[0], slice[1], slice[2], slice[3], slice[4], slice[5], slice[6], slice[7],
    ])
}

#[inline]
fn hsum(v: f32x8) -> f32 {
    v.to_array().iter().sum()
}

/// Lane-parallel kernels over `f32x8`.
pub struct SimdKernel;

impl DistanceKernel for SimdKernel {
    fn intersection_sums(x: &[f32], y: &[f32]) -> IntersectionSums {
        let simd_end = x.len() / LANES * LANES;
        let mut min_vec = f32x8::ZERO;
        let mut x_vec = f32x8::ZERO;
        let mut y_vec = f32x8::ZERO;
        let mut i = 0;
        while i < simd_end {
            let a = load_f32x8(&x[i..]);
            let b = load_f32x8(&y[i..]);
            min_vec += a.min(b);
            x_vec += a;
            y_vec += b;
            i += LANES;
        }

        let mut sums = IntersectionSums {
            min: hsum(min_vec),
            x: hsum(x_vec),
            y: hsum(y_vec),
        };
        for (&a, &b) in x[simd_end..].iter().zip(&y[simd_end..]) {
            sums.min += a.min(b);
            sums.x += a;
            sums.y += b;
        }
        sums
    }

    fn squared_l2(x: &[f32], y: &[f32]) -> f32 {
        let simd_end = x.len() / LANES * LANES;
        let mut acc = f32x8::ZERO;
        let mut i = 0;
        while i < simd_end {
            let diff = load_f32x8(&x[i..]) - load_f32x8(&y[i..]);
            acc += diff * diff;
            i += LANES;
        }
        let mut total = hsum(acc);
        for (&a, &b) in x[simd_end..].iter().zip(&y[simd_end..]) {
            let diff = a - b;
            total += diff * diff;
        }
        total
    }

    fn chi2_smoothed(x: &[f32], y: &[f32], offset: f32) -> f32 {
        let simd_end = x.len() / LANES * LANES;
        let off = f32x8::splat(offset);
        let mut acc = f32x8::ZERO;
        let mut i = 0;
        while i < simd_end {
            let a = load_f32x8(&x[i..]) + off;
            let b = load_f32x8(&y[i..]) + off;
            let diff = a - b;
            acc += diff * diff / (a + b);
            i += LANES;
        }
        let mut total = hsum(acc);
        for (&a, &b) in x[simd_end..].iter().zip(&y[simd_end..]) {
            let (a, b) = (a + offset, b + offset);
            let diff = a - b;
            total += diff * diff / (a + b);
        }
        total
    }
}
