//! The four binning strategies.
//!
//! Every extractor counts pixels into a flat row-major array, then divides
//! by the pixel count of the actual image. Joint indices are built
//! most-significant channel first, e.g. `(r * n + g) * n + b`.

use crate::gradient::GradientOperator;
use crate::histogram::{BinEdges, Histogram};
use crate::image::ImageView;
use crate::util::math::round_to;
use crate::util::{HistMatchError, HistMatchResult};

/// Lower bound of the intensity range.
pub const INTENSITY_MIN: f32 = 0.0;
/// Upper bound of the intensity range; this value lands in the last bin.
pub const INTENSITY_MAX: f32 = 255.0;
/// Smoothing scale for the gradient histogram.
pub const DXDY_SIGMA: f32 = 3.0;
/// Derivatives are clipped to `[-DXDY_CLIP, DXDY_CLIP]` before binning.
pub const DXDY_CLIP: f32 = 6.0;
/// The gradient bins span `[-DXDY_CLIP, DXDY_CLIP + DXDY_HEADROOM]`.
pub const DXDY_HEADROOM: f32 = 1.0;

/// Normalized intensity histogram of a single-channel image.
///
/// Entries are rounded to two decimals, so the sum is 1 only up to
/// `num_bins * 0.005`. The bin edges are returned alongside the vector.
pub fn gray_histogram(
    image: ImageView<'_, f32>,
    num_bins: usize,
) -> HistMatchResult<(Histogram, BinEdges)> {
    image.require_channels(1)?;
    let edges = BinEdges::uniform(INTENSITY_MIN, INTENSITY_MAX, num_bins)?;
    let mut counts = vec![0u32; num_bins];
    for (index, px) in image.pixels().enumerate() {
        let bin = edges.bin_index(px[0]).ok_or(HistMatchError::InvalidValue {
            index,
            value: px[0],
            context: "gray image",
        })?;
        counts[bin] += 1;
    }
    let total = image.pixel_count() as f32;
    let bins = counts
        .iter()
        .map(|&c| round_to(c as f32 / total, 2))
        .collect();
    Ok((Histogram::from_raw(bins), edges))
}

/// Joint R, G, B histogram with `num_bins^3` entries.
pub fn rgb_histogram(image: ImageView<'_, f32>, num_bins: usize) -> HistMatchResult<Histogram> {
    image.require_channels(3)?;
    joint_color_histogram(image, &[0, 1, 2], num_bins)
}

/// Joint R, G histogram with `num_bins^2` entries; blue is ignored.
pub fn rg_histogram(image: ImageView<'_, f32>, num_bins: usize) -> HistMatchResult<Histogram> {
    image.require_channels(3)?;
    joint_color_histogram(image, &[0, 1], num_bins)
}

fn joint_color_histogram(
    image: ImageView<'_, f32>,
    channels: &[usize],
    num_bins: usize,
) -> HistMatchResult<Histogram> {
    let edges = BinEdges::uniform(INTENSITY_MIN, INTENSITY_MAX, num_bins)?;
    let len = num_bins
        .checked_pow(channels.len() as u32)
        .ok_or(HistMatchError::InvalidBinCount { num_bins })?;
    let mut counts = vec![0u32; len];
    for (index, px) in image.pixels().enumerate() {
        let mut flat = 0usize;
        for &c in channels {
            let bin = edges.bin_index(px[c]).ok_or(HistMatchError::InvalidValue {
                index,
                value: px[c],
                context: "color image",
            })?;
            flat = flat * num_bins + bin;
        }
        counts[flat] += 1;
    }
    Ok(normalize_counts(&counts, image.pixel_count()))
}

/// Joint histogram of Gaussian x/y derivatives with `num_bins^2` entries.
///
/// Derivatives come from `gradient` at [`DXDY_SIGMA`], are clipped to
/// `[-6, 6]` and binned over `[-6, 7]`; index is `bin(dx) * n + bin(dy)`.
pub fn dxdy_histogram<G: GradientOperator + ?Sized>(
    image: ImageView<'_, f32>,
    num_bins: usize,
    gradient: &G,
) -> HistMatchResult<Histogram> {
    image.require_channels(1)?;
    let edges = BinEdges::uniform(-DXDY_CLIP, DXDY_CLIP + DXDY_HEADROOM, num_bins)?;
    let grads = gradient.derivatives(image, DXDY_SIGMA)?;
    let expected = image.pixel_count();
    for field in [&grads.dx, &grads.dy] {
        let got = field.data().len();
        if got != expected || !field.is_gray() {
            return Err(HistMatchError::BufferLengthMismatch { expected, got });
        }
    }

    let mut counts = vec![0u32; num_bins * num_bins];
    for (index, (&dx, &dy)) in grads.dx.data().iter().zip(grads.dy.data()).enumerate() {
        let bin_of = |value: f32| {
            edges
                .bin_index(value.clamp(-DXDY_CLIP, DXDY_CLIP))
                .ok_or(HistMatchError::InvalidValue {
                    index,
                    value,
                    context: "gradient field",
                })
        };
        counts[bin_of(dx)? * num_bins + bin_of(dy)?] += 1;
    }
    Ok(normalize_counts(&counts, expected))
}

fn normalize_counts(counts: &[u32], total: usize) -> Histogram {
    let total = total as f32;
    Histogram::from_raw(counts.iter().map(|&c| c as f32 / total).collect())
}

#[cfg(test)]
mod tests {
    use super::{dxdy_histogram, gray_histogram, rg_histogram, rgb_histogram};
    use crate::gradient::{GaussianDerivative, GradientOperator, Gradients};
    use crate::image::{Image, ImageView};
    use crate::util::{HistMatchError, HistMatchResult};

    /// Returns fixed derivative fields regardless of the input.
    struct FixedGradient {
        dx: f32,
        dy: f32,
    }

    impl GradientOperator for FixedGradient {
        fn derivatives(
            &self,
            image: ImageView<'_, f32>,
            _sigma: f32,
        ) -> HistMatchResult<Gradients> {
            let (w, h) = (image.width(), image.height());
            Ok(Gradients {
                dx: Image::filled(w, h, 1, self.dx)?,
                dy: Image::filled(w, h, 1, self.dy)?,
            })
        }
    }

    #[test]
    fn uniform_gray_image_fills_one_bin() {
        let img = Image::filled(128, 128, 1, 200.0).unwrap();
        let (hist, edges) = gray_histogram(img.view(), 4).unwrap();
        assert_eq!(edges.edges(), &[0.0, 63.75, 127.5, 191.25, 255.0]);
        assert_eq!(hist.as_slice(), &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn gray_histogram_counts_the_top_value() {
        let img = Image::gray(vec![0.0, 255.0, 255.0, 100.0], 2, 2).unwrap();
        let (hist, _) = gray_histogram(img.view(), 2).unwrap();
        assert_eq!(hist.as_slice(), &[0.5, 0.5]);
    }

    #[test]
    fn gray_histogram_rounds_halves_to_even() {
        // Shares 1/8, 3/8 and 4/8 over three bins.
        let values = vec![10.0, 100.0, 100.0, 100.0, 200.0, 200.0, 200.0, 200.0];
        let img = Image::gray(values, 4, 2).unwrap();
        let (hist, _) = gray_histogram(img.view(), 3).unwrap();
        assert_eq!(hist.as_slice(), &[0.12, 0.38, 0.5]);
    }

    #[test]
    fn gray_histogram_uses_actual_dimensions() {
        let img = Image::filled(7, 3, 1, 10.0).unwrap();
        let (hist, _) = gray_histogram(img.view(), 5).unwrap();
        assert_eq!(hist.as_slice()[0], 1.0);
    }

    #[test]
    fn gray_histogram_rejects_color_and_nan() {
        let color = Image::filled(2, 2, 3, 0.0).unwrap();
        assert_eq!(
            gray_histogram(color.view(), 4).unwrap_err(),
            HistMatchError::ChannelMismatch {
                expected: 1,
                got: 3
            }
        );
        let img = Image::gray(vec![0.0, f32::NAN], 2, 1).unwrap();
        assert!(matches!(
            gray_histogram(img.view(), 4),
            Err(HistMatchError::InvalidValue { index: 1, .. })
        ));
    }

    #[test]
    fn rgb_histogram_indexes_red_major() {
        // Pixel (R=255, G=0, B=130) with two bins lands at (1, 0, 1).
        let img = Image::rgb(vec![255.0, 0.0, 130.0], 1, 1).unwrap();
        let hist = rgb_histogram(img.view(), 2).unwrap();
        assert_eq!(hist.len(), 8);
        assert_eq!(hist.as_slice()[4 + 1], 1.0);
    }

    #[test]
    fn rg_histogram_ignores_blue() {
        let a = Image::rgb(vec![10.0, 240.0, 0.0, 10.0, 240.0, 0.0], 2, 1).unwrap();
        let b = Image::rgb(vec![10.0, 240.0, 255.0, 10.0, 240.0, 90.0], 2, 1).unwrap();
        let ha = rg_histogram(a.view(), 4).unwrap();
        let hb = rg_histogram(b.view(), 4).unwrap();
        assert_eq!(ha, hb);
        assert_eq!(ha.len(), 16);
        assert_eq!(ha.as_slice()[3], 1.0);
    }

    #[test]
    fn dxdy_histogram_clips_to_the_last_occupied_bin() {
        let img = Image::filled(4, 4, 1, 0.0).unwrap();
        let grad = FixedGradient { dx: 50.0, dy: -50.0 };
        let hist = dxdy_histogram(img.view(), 13, &grad).unwrap();
        // Bins are 1 wide over [-6, 7]: dx -> 6 lands in bin 12, dy -> -6 in bin 0.
        assert_eq!(hist.as_slice()[12 * 13], 1.0);
    }

    #[test]
    fn dxdy_histogram_of_flat_image_sums_to_one() {
        let img = Image::filled(32, 32, 1, 90.0).unwrap();
        let hist = dxdy_histogram(img.view(), 8, &GaussianDerivative).unwrap();
        assert_eq!(hist.len(), 64);
        assert!((hist.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn dxdy_histogram_rejects_nan_gradients() {
        let img = Image::filled(2, 2, 1, 0.0).unwrap();
        let grad = FixedGradient {
            dx: f32::NAN,
            dy: 0.0,
        };
        assert!(matches!(
            dxdy_histogram(img.view(), 4, &grad),
            Err(HistMatchError::InvalidValue {
                context: "gradient field",
                ..
            })
        ));
    }
}
