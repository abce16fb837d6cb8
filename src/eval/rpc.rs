//! Recall/precision sweep over a square distance matrix.
//!
//! Model `i` is taken to be the correct answer for query `i`, so the
//! diagonal holds the positives and every other entry is a negative. For a
//! threshold `t`, an entry counts as retrieved when its distance is `<= t`.

use crate::search::DistanceMatrix;
use crate::trace::{trace_event, trace_span};
use crate::util::math::linspace;
use crate::util::{HistMatchError, HistMatchResult};

/// Threshold sweep settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcConfig {
    /// Number of thresholds, spaced evenly from `min(D)` to `max(D)`.
    pub num_thresholds: usize,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            num_thresholds: 200,
        }
    }
}

/// Retrieval counts and rates at one threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RpcPoint {
    pub threshold: f32,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    /// `tp / (tp + fp)`; NaN when nothing is retrieved.
    pub precision: f32,
    /// `tp / (tp + fn)`.
    pub recall: f32,
}

impl RpcPoint {
    /// False when nothing was retrieved and precision is undefined.
    pub fn is_defined(&self) -> bool {
        self.precision.is_finite() && self.recall.is_finite()
    }
}

/// Ordered sweep results, one point per threshold.
#[derive(Clone, Debug, PartialEq)]
pub struct RpcCurve {
    points: Vec<RpcPoint>,
}

impl RpcCurve {
    pub fn points(&self) -> &[RpcPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(1 - precision, recall)` pairs for plotting, skipping undefined points.
    pub fn plot_series(&self) -> (Vec<f32>, Vec<f32>) {
        self.points
            .iter()
            .filter(|p| p.is_defined())
            .map(|p| (1.0 - p.precision, p.recall))
            .unzip()
    }
}

/// Sweeps thresholds over `distances` and returns the recall/precision curve.
pub fn recall_precision_curve(
    distances: &DistanceMatrix,
    cfg: &RpcConfig,
) -> HistMatchResult<RpcCurve> {
    if !distances.is_square() {
        return Err(HistMatchError::NonSquareMatrix {
            rows: distances.num_models(),
            cols: distances.num_queries(),
        });
    }
    if cfg.num_thresholds == 0 {
        return Err(HistMatchError::InvalidInput("num_thresholds must be at least 1"));
    }
    let n = distances.num_models();
    let _span = trace_span!("recall_precision_curve", n = n, thresholds = cfg.num_thresholds)
        .entered();

    let mut positives = Vec::with_capacity(n);
    let mut negatives = Vec::with_capacity(n * n - n);
    for (idx, &value) in distances.as_slice().iter().enumerate() {
        if idx / n == idx % n {
            positives.push(value);
        } else {
            negatives.push(value);
        }
    }
    positives.sort_by(f32::total_cmp);
    negatives.sort_by(f32::total_cmp);

    let points: Vec<RpcPoint> = linspace(distances.min(), distances.max(), cfg.num_thresholds)
        .into_iter()
        .map(|threshold| {
            let tp = positives.partition_point(|&v| v <= threshold);
            let fp = negatives.partition_point(|&v| v <= threshold);
            let fn_ = n - tp;
            let precision = if tp + fp == 0 {
                f32::NAN
            } else {
                tp as f32 / (tp + fp) as f32
            };
            RpcPoint {
                threshold,
                true_positives: tp,
                false_positives: fp,
                false_negatives: fn_,
                precision,
                recall: tp as f32 / (tp + fn_) as f32,
            }
        })
        .collect();

    trace_event!(
        "rpc",
        undefined = points.iter().filter(|p| !p.is_defined()).count()
    );
    Ok(RpcCurve { points })
}

#[cfg(test)]
mod tests {
    use super::{recall_precision_curve, RpcConfig};
    use crate::search::DistanceMatrix;
    use crate::util::HistMatchError;

    #[test]
    fn perfect_diagonal_reaches_full_precision_and_recall() {
        let d = DistanceMatrix::from_rows(&[[0.0f32, 5.0], [5.0, 0.0]]).unwrap();
        let curve = recall_precision_curve(&d, &RpcConfig::default()).unwrap();
        assert_eq!(curve.len(), 200);
        let first = curve.points()[0];
        assert_eq!(first.threshold, 0.0);
        assert_eq!(first.precision, 1.0);
        assert_eq!(first.recall, 1.0);
        let last = curve.points()[199];
        assert_eq!(last.threshold, 5.0);
        assert_eq!(last.false_positives, 2);
        assert_eq!(last.precision, 0.5);
    }

    #[test]
    fn counts_split_the_diagonal_from_the_rest() {
        // Positives all sit at the maximum distance.
        let d = DistanceMatrix::from_rows(&[[1.0f32, 0.0], [0.5, 1.0]]).unwrap();
        let curve = recall_precision_curve(&d, &RpcConfig { num_thresholds: 3 }).unwrap();
        let thresholds: Vec<f32> = curve.points().iter().map(|p| p.threshold).collect();
        assert_eq!(thresholds, vec![0.0, 0.5, 1.0]);
        let p0 = curve.points()[0];
        assert_eq!((p0.true_positives, p0.false_positives), (0, 1));
        assert_eq!(p0.precision, 0.0);
        assert_eq!(p0.recall, 0.0);
        let p2 = curve.points()[2];
        assert_eq!(p2.true_positives, 2);
        assert_eq!(p2.false_negatives, 0);
        assert_eq!(p2.precision, 0.5);

        let d = DistanceMatrix::from_rows(&[[1.0f32, 2.0], [2.0, 1.0]]).unwrap();
        let curve = recall_precision_curve(&d, &RpcConfig { num_thresholds: 2 }).unwrap();
        assert!(curve.points().iter().all(|p| p.is_defined()));
    }

    #[test]
    fn single_entry_matrix_repeats_one_threshold() {
        let d = DistanceMatrix::from_rows(&[[2.0f32]]).unwrap();
        let curve = recall_precision_curve(&d, &RpcConfig { num_thresholds: 4 }).unwrap();
        let (x, y) = curve.plot_series();
        assert_eq!(x, vec![0.0; 4]);
        assert_eq!(y, vec![1.0; 4]);
    }

    #[test]
    fn plot_series_skips_undefined_points() {
        let d = DistanceMatrix::from_rows(&[[1.0f32, 4.0], [4.0, 2.0]]).unwrap();
        let mut curve = recall_precision_curve(&d, &RpcConfig { num_thresholds: 2 }).unwrap();
        // Force an empty retrieval to exercise the skip path.
        curve.points[0].precision = f32::NAN;
        let (x, _) = curve.plot_series();
        assert_eq!(x.len(), 1);
    }

    #[test]
    fn rejects_non_square_matrices() {
        let d = DistanceMatrix::from_rows(&[[0.0f32, 1.0, 2.0], [1.0, 0.0, 2.0]]).unwrap();
        assert_eq!(
            recall_precision_curve(&d, &RpcConfig::default()).unwrap_err(),
            HistMatchError::NonSquareMatrix { rows: 2, cols: 3 }
        );
    }
}
