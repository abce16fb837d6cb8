//! Retrieval evaluation: recall/precision sweeps and distance comparison.

mod rpc;

pub use rpc::{recall_precision_curve, RpcConfig, RpcCurve, RpcPoint};

use crate::distance::DistanceKind;
use crate::gradient::GradientOperator;
use crate::image::ImageSource;
use crate::search::{LabelExtractor, MatchOutcome, Matcher};
use crate::trace::{trace_event, trace_span};
use crate::util::{HistMatchError, HistMatchResult};
use std::path::Path;

/// Matching result and recall/precision curve for one distance.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceComparison {
    pub dist: DistanceKind,
    pub outcome: MatchOutcome,
    pub curve: RpcCurve,
}

/// Runs the same model/query sets through several distances.
///
/// Histograms are extracted once with the matcher's histogram settings; the
/// matcher's own distance is ignored in favour of `dists`. Model `i` must be
/// the correct answer for query `i`, so both sets need the same length.
pub fn compare_distances<G, S, P, L>(
    matcher: &Matcher<G>,
    source: &S,
    model_paths: &[P],
    query_paths: &[P],
    dists: &[DistanceKind],
    rpc: &RpcConfig,
    labeler: &L,
) -> HistMatchResult<Vec<DistanceComparison>>
where
    G: GradientOperator,
    S: ImageSource + ?Sized,
    P: AsRef<Path> + Sync,
    L: LabelExtractor + ?Sized,
{
    if dists.is_empty() {
        return Err(HistMatchError::InvalidInput("no distances to compare"));
    }
    if model_paths.len() != query_paths.len() {
        return Err(HistMatchError::LengthMismatch {
            left: model_paths.len(),
            right: query_paths.len(),
        });
    }
    let _span = trace_span!(
        "compare_distances",
        hist = matcher.config().hist.name(),
        num_bins = matcher.config().num_bins,
        dists = dists.len()
    )
    .entered();

    let models = matcher.compute_histograms(source, model_paths)?;
    let queries = matcher.compute_histograms(source, query_paths)?;

    dists
        .iter()
        .map(|&dist| {
            let distances = matcher.distance_matrix_for(dist, &models, &queries)?;
            let curve = recall_precision_curve(&distances, rpc)?;
            let outcome = MatchOutcome::resolve(distances, model_paths, labeler)?;
            trace_event!(
                "distance_done",
                dist = dist.name(),
                recognition_rate = outcome.recognition_rate()
            );
            Ok(DistanceComparison {
                dist,
                outcome,
                curve,
            })
        })
        .collect()
}
