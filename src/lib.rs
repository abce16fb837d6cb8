//! HistMatch is a histogram-based image retrieval library.
//!
//! Images are summarised by normalised histograms (grayvalue, RGB, RG
//! chromaticity or gradient `dx/dy`), compared with chi-squared,
//! intersection or L2 distances, and matched against a model set by
//! exhaustive nearest-neighbour search. The [`eval`] module sweeps distance
//! thresholds to produce recall/precision curves.
//!
//! Optional features: `rayon` (parallel extraction and matrix fill), `simd`
//! (vectorised distance kernels), `image-io` (PNG/JPEG loading) and
//! `tracing` (spans around batch operations).

pub mod distance;
pub mod eval;
pub mod gradient;
pub mod histogram;
pub mod image;
pub mod search;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use image::io;

pub use distance::{dist_chi2, dist_intersect, dist_l2, distance_by_name, DistanceKind};
pub use eval::{
    compare_distances, recall_precision_curve, DistanceComparison, RpcConfig, RpcCurve, RpcPoint,
};
pub use gradient::{GaussianDerivative, GradientOperator, Gradients};
pub use histogram::{is_grayvalue_hist, BinEdges, Histogram, HistogramExtractor, HistogramKind};
pub use image::{Image, ImageSource, ImageView, MemoryImageSource, LUMA_WEIGHTS};
pub use search::{
    DistanceMatrix, LabelExtractor, MatchConfig, MatchOutcome, Matcher, Neighbor, ObjectIdLabel,
};
pub use util::{HistMatchError, HistMatchResult};
