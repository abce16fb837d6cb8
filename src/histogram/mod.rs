//! Histogram types and the extractor that binds a kind to its parameters.
//!
//! A [`HistogramKind`] is chosen once (from a name or directly) and carried
//! by a [`HistogramExtractor`], which knows whether the kind wants a gray or
//! a color image, how long its output is, and which gradient operator the
//! `dxdy` kind uses.

mod bins;
mod extract;

pub use bins::BinEdges;
pub use extract::{
    dxdy_histogram, gray_histogram, rg_histogram, rgb_histogram, DXDY_CLIP, DXDY_HEADROOM,
    DXDY_SIGMA, INTENSITY_MAX, INTENSITY_MIN,
};

use crate::gradient::{GaussianDerivative, GradientOperator};
use crate::image::{Image, ImageView};
use crate::util::{HistMatchError, HistMatchResult};
use std::fmt;
use std::str::FromStr;

/// The closed set of histogram types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HistogramKind {
    /// Intensity histogram of the luma image (`grayvalue`).
    GrayValue,
    /// Joint red/green/blue histogram (`rgb`).
    Rgb,
    /// Joint red/green histogram (`rg`).
    Rg,
    /// Joint histogram of Gaussian x/y derivatives (`dxdy`).
    DxDy,
}

impl HistogramKind {
    pub const ALL: [HistogramKind; 4] = [
        HistogramKind::GrayValue,
        HistogramKind::Rgb,
        HistogramKind::Rg,
        HistogramKind::DxDy,
    ];

    /// Configuration name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            HistogramKind::GrayValue => "grayvalue",
            HistogramKind::Rgb => "rgb",
            HistogramKind::Rg => "rg",
            HistogramKind::DxDy => "dxdy",
        }
    }

    /// True when the kind is computed from a grayscale image.
    pub fn is_grayvalue(self) -> bool {
        matches!(self, HistogramKind::GrayValue | HistogramKind::DxDy)
    }

    /// Number of binned dimensions.
    pub fn dims(self) -> u32 {
        match self {
            HistogramKind::GrayValue => 1,
            HistogramKind::Rg | HistogramKind::DxDy => 2,
            HistogramKind::Rgb => 3,
        }
    }

    /// Length of the flattened histogram for `num_bins` bins per dimension.
    pub fn histogram_len(self, num_bins: usize) -> Option<usize> {
        num_bins.checked_pow(self.dims())
    }
}

impl fmt::Display for HistogramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HistogramKind {
    type Err = HistMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HistogramKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HistMatchError::UnknownHistogram { name: s.to_string() })
    }
}

/// Reports whether the named histogram type expects a grayscale image.
pub fn is_grayvalue_hist(name: &str) -> HistMatchResult<bool> {
    name.parse::<HistogramKind>().map(HistogramKind::is_grayvalue)
}

/// Immutable normalized histogram vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    bins: Vec<f32>,
}

impl Histogram {
    /// Wraps an existing vector after checking it is non-empty, finite and
    /// non-negative. Normalization is not enforced.
    pub fn from_vec(bins: Vec<f32>) -> HistMatchResult<Self> {
        if bins.is_empty() {
            return Err(HistMatchError::InvalidInput("histogram has no bins"));
        }
        if let Some((index, &value)) = bins
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(HistMatchError::InvalidValue {
                index,
                value,
                context: "histogram",
            });
        }
        Ok(Self { bins })
    }

    pub(crate) fn from_raw(bins: Vec<f32>) -> Self {
        Self { bins }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Total mass; 1 for extractor output up to rounding.
    pub fn sum(&self) -> f32 {
        self.bins.iter().sum()
    }
}

impl AsRef<[f32]> for Histogram {
    fn as_ref(&self) -> &[f32] {
        &self.bins
    }
}

/// Flat index of `(row, col)` in a row-major `n x n` histogram.
pub fn flat_index_2d(row: usize, col: usize, num_bins: usize) -> usize {
    row * num_bins + col
}

/// Inverse of [`flat_index_2d`].
pub fn unflatten_2d(index: usize, num_bins: usize) -> (usize, usize) {
    (index / num_bins, index % num_bins)
}

/// Inverse of the `(r * n + g) * n + b` layout used by the RGB histogram.
pub fn unflatten_3d(index: usize, num_bins: usize) -> (usize, usize, usize) {
    let (rg, b) = unflatten_2d(index, num_bins);
    let (r, g) = unflatten_2d(rg, num_bins);
    (r, g, b)
}

/// Histogram kind, bin count and gradient operator bundled for reuse.
#[derive(Clone, Debug)]
pub struct HistogramExtractor<G = GaussianDerivative> {
    kind: HistogramKind,
    num_bins: usize,
    gradient: G,
}

impl HistogramExtractor<GaussianDerivative> {
    /// Creates an extractor with the default Gaussian derivative operator.
    pub fn new(kind: HistogramKind, num_bins: usize) -> HistMatchResult<Self> {
        Self::with_gradient(kind, num_bins, GaussianDerivative)
    }
}

impl<G: GradientOperator> HistogramExtractor<G> {
    /// Creates an extractor that uses `gradient` for the `dxdy` kind.
    pub fn with_gradient(kind: HistogramKind, num_bins: usize, gradient: G) -> HistMatchResult<Self> {
        if num_bins == 0 || kind.histogram_len(num_bins).is_none() {
            return Err(HistMatchError::InvalidBinCount { num_bins });
        }
        Ok(Self {
            kind,
            num_bins,
            gradient,
        })
    }

    pub fn kind(&self) -> HistogramKind {
        self.kind
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Length of every histogram this extractor produces.
    pub fn histogram_len(&self) -> usize {
        self.kind.histogram_len(self.num_bins).unwrap_or(usize::MAX)
    }

    /// Brings a loaded image into the layout the kind expects.
    ///
    /// Gray kinds convert RGB input through the luma weights; color kinds
    /// require three channels.
    pub fn prepare(&self, image: Image) -> HistMatchResult<Image> {
        if self.kind.is_grayvalue() {
            if image.is_gray() {
                Ok(image)
            } else {
                image.to_gray()
            }
        } else {
            image.view().require_channels(3)?;
            Ok(image)
        }
    }

    /// Computes the histogram of an already prepared view.
    ///
    /// The bin edges of the gray kind are dropped; use [`gray_histogram`]
    /// to keep them.
    pub fn extract(&self, image: ImageView<'_, f32>) -> HistMatchResult<Histogram> {
        match self.kind {
            HistogramKind::GrayValue => gray_histogram(image, self.num_bins).map(|(hist, _)| hist),
            HistogramKind::Rgb => rgb_histogram(image, self.num_bins),
            HistogramKind::Rg => rg_histogram(image, self.num_bins),
            HistogramKind::DxDy => dxdy_histogram(image, self.num_bins, &self.gradient),
        }
    }

    /// [`prepare`](Self::prepare) followed by [`extract`](Self::extract).
    pub fn extract_image(&self, image: Image) -> HistMatchResult<Histogram> {
        let prepared = self.prepare(image)?;
        self.extract(prepared.view())
    }
}
