//! Sampled Gaussian kernels and separable "same"-size convolution.
//!
//! Kernels are sampled at `2 * trunc(3 * sigma) + 1` points evenly spread
//! over `[-3 sigma, 3 sigma]` (integer offsets when `3 * sigma` is whole).
//! They are not renormalized after truncation. Convolution zero-pads the
//! borders and keeps the input size, centring the kernel on each sample.

use crate::util::math::linspace;
use std::f32::consts::PI;

fn sample_points(sigma: f32) -> Vec<f32> {
    let half = (3.0 * sigma).trunc() as usize;
    linspace(-3.0 * sigma, 3.0 * sigma, 2 * half + 1)
}

/// Gaussian `exp(-x^2 / 2 sigma^2) / (sqrt(2 pi) sigma)` at the sample points.
pub(crate) fn gauss(sigma: f32) -> Vec<f32> {
    let norm = 1.0 / ((2.0 * PI).sqrt() * sigma);
    sample_points(sigma)
        .into_iter()
        .map(|x| norm * (-(x * x) / (2.0 * sigma * sigma)).exp())
        .collect()
}

/// First derivative of [`gauss`] with respect to `x`.
pub(crate) fn gauss_dx(sigma: f32) -> Vec<f32> {
    let norm = 1.0 / ((2.0 * PI).sqrt() * sigma.powi(3));
    sample_points(sigma)
        .into_iter()
        .map(|x| -norm * x * (-(x * x) / (2.0 * sigma * sigma)).exp())
        .collect()
}

/// Convolves every row of a packed `width x height` plane with `kernel`.
pub(crate) fn convolve_rows(src: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
    let half = (kernel.len() / 2) as isize;
    let w = width as isize;
    let mut out = vec![0.0f32; src.len()];
    for y in 0..height {
        let row = &src[y * width..(y + 1) * width];
        let out_row = &mut out[y * width..(y + 1) * width];
        for (x, dst) in out_row.iter_mut().enumerate() {
            let mut acc = 0.0f32;
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = x as isize + half - k as isize;
                if (0..w).contains(&sx) {
                    acc += row[sx as usize] * weight;
                }
            }
            *dst = acc;
        }
    }
    out
}

/// Convolves every column of a packed `width x height` plane with `kernel`.
pub(crate) fn convolve_cols(src: &[f32], width: usize, height: usize, kernel: &[f32]) -> Vec<f32> {
    let half = (kernel.len() / 2) as isize;
    let h = height as isize;
    let mut out = vec![0.0f32; src.len()];
    for y in 0..height {
        for (k, &weight) in kernel.iter().enumerate() {
            let sy = y as isize + half - k as isize;
            if !(0..h).contains(&sy) {
                continue;
            }
            let src_row = &src[sy as usize * width..(sy as usize + 1) * width];
            let out_row = &mut out[y * width..(y + 1) * width];
            for (dst, &value) in out_row.iter_mut().zip(src_row) {
                *dst += value * weight;
            }
        }
    }
    out
}
