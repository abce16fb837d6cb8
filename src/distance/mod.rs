//! Histogram distances.
//!
//! All three metrics take two equal-length, non-negative, finite vectors and
//! return a dissimilarity where 0 means identical. Inputs are validated up
//! front; a result outside the metric's guaranteed range is reported as
//! [`HistMatchError::RangeViolation`] because it can only come from
//! malformed histograms.
//!
//! Chi-squared smooths both inputs by adding [`CHI2_SMOOTHING`] to every
//! bin. The smoothing happens on the fly; caller buffers are never modified.

use crate::util::{HistMatchError, HistMatchResult};
use std::fmt;
use std::str::FromStr;

pub mod scalar;
#[cfg(feature = "simd")]
pub mod simd;

#[cfg(not(feature = "simd"))]
use scalar::ScalarKernel as ActiveKernel;
#[cfg(feature = "simd")]
use simd::SimdKernel as ActiveKernel;

/// Offset added to every bin before the chi-squared ratio.
pub const CHI2_SMOOTHING: f32 = 1.0;
/// Supremum of the squared L2 distance between two probability vectors.
pub const L2_MAX: f32 = 2.0;
const RANGE_TOLERANCE: f32 = 1e-5;

/// Partial sums needed by the intersection distance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntersectionSums {
    /// `sum(min(x_i, y_i))`
    pub min: f32,
    /// `sum(x_i)`
    pub x: f32,
    /// `sum(y_i)`
    pub y: f32,
}

/// Raw reductions behind the metrics; inputs are already validated.
pub trait DistanceKernel {
    fn intersection_sums(x: &[f32], y: &[f32]) -> IntersectionSums;

    /// `sum((x_i - y_i)^2)`
    fn squared_l2(x: &[f32], y: &[f32]) -> f32;

    /// `sum((x'_i - y'_i)^2 / (x'_i + y'_i))` with `x' = x + offset`.
    fn chi2_smoothed(x: &[f32], y: &[f32], offset: f32) -> f32;
}

/// The closed set of distance types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistanceKind {
    /// Chi-squared with +1 smoothing (`chi2`).
    Chi2,
    /// One minus symmetric histogram intersection (`intersect`).
    Intersect,
    /// Squared Euclidean distance (`l2`).
    L2,
}

impl DistanceKind {
    pub const ALL: [DistanceKind; 3] = [DistanceKind::Chi2, DistanceKind::Intersect, DistanceKind::L2];

    /// Configuration name of the metric.
    pub fn name(self) -> &'static str {
        match self {
            DistanceKind::Chi2 => "chi2",
            DistanceKind::Intersect => "intersect",
            DistanceKind::L2 => "l2",
        }
    }

    /// Evaluates the metric.
    pub fn distance(self, x: &[f32], y: &[f32]) -> HistMatchResult<f32> {
        match self {
            DistanceKind::Chi2 => dist_chi2(x, y),
            DistanceKind::Intersect => dist_intersect(x, y),
            DistanceKind::L2 => dist_l2(x, y),
        }
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceKind {
    type Err = HistMatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistanceKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| HistMatchError::UnknownDistance { name: s.to_string() })
    }
}

/// Evaluates the metric called `name`; unknown names fail before any work.
pub fn distance_by_name(x: &[f32], y: &[f32], name: &str) -> HistMatchResult<f32> {
    name.parse::<DistanceKind>()?.distance(x, y)
}

fn validate(x: &[f32], y: &[f32]) -> HistMatchResult<()> {
    if x.len() != y.len() {
        return Err(HistMatchError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.is_empty() {
        return Err(HistMatchError::InvalidInput("histograms must not be empty"));
    }
    for values in [x, y] {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(HistMatchError::InvalidValue {
                index,
                value,
                context: "distance input",
            });
        }
    }
    Ok(())
}

/// `1 - (S / sum(x) + S / sum(y)) / 2` with `S = sum(min(x_i, y_i))`.
///
/// Lies in `[0, 1]`. Either input having zero mass is an error.
pub fn dist_intersect(x: &[f32], y: &[f32]) -> HistMatchResult<f32> {
    validate(x, y)?;
    let sums = ActiveKernel::intersection_sums(x, y);
    if sums.x <= 0.0 || sums.y <= 0.0 {
        return Err(HistMatchError::ZeroMass {
            context: "intersection distance",
        });
    }
    let sim = (sums.min / sums.x + sums.min / sums.y) / 2.0;
    if !(-RANGE_TOLERANCE..=1.0 + RANGE_TOLERANCE).contains(&sim) {
        return Err(HistMatchError::RangeViolation {
            metric: "intersection",
            value: 1.0 - sim,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(1.0 - sim.clamp(0.0, 1.0))
}

/// Squared Euclidean distance `sum((x_i - y_i)^2)`; no square root is taken.
///
/// For two histograms that each sum to 1 the value lies in `[0, 2]`.
pub fn dist_l2(x: &[f32], y: &[f32]) -> HistMatchResult<f32> {
    validate(x, y)?;
    let value = ActiveKernel::squared_l2(x, y);
    if value > L2_MAX + RANGE_TOLERANCE {
        return Err(HistMatchError::RangeViolation {
            metric: "l2",
            value,
            min: 0.0,
            max: L2_MAX,
        });
    }
    Ok(value)
}

/// Chi-squared distance on `x + 1` and `y + 1`; non-negative and unbounded.
pub fn dist_chi2(x: &[f32], y: &[f32]) -> HistMatchResult<f32> {
    validate(x, y)?;
    let value = ActiveKernel::chi2_smoothed(x, y, CHI2_SMOOTHING);
    if !value.is_finite() || value < 0.0 {
        return Err(HistMatchError::RangeViolation {
            metric: "chi2",
            value,
            min: 0.0,
            max: f32::INFINITY,
        });
    }
    Ok(value)
}
