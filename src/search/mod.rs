//! Best-match search over model and query image sets.
//!
//! Every query histogram is compared with every model histogram; there is
//! no approximate indexing. The resulting [`DistanceMatrix`] is kept in the
//! [`MatchOutcome`] so that evaluation and neighbour listing can reuse it.

mod label;
mod matrix;
mod neighbors;
pub(crate) mod parallel;

pub use label::{LabelExtractor, ObjectIdLabel};
pub use matrix::DistanceMatrix;
pub use neighbors::Neighbor;

use crate::distance::DistanceKind;
use crate::gradient::{GaussianDerivative, GradientOperator};
use crate::histogram::{Histogram, HistogramExtractor, HistogramKind};
use crate::image::{Image, ImageSource};
use crate::search::parallel::try_map_range;
use crate::trace::{trace_debug, trace_event, trace_span};
use crate::util::{HistMatchError, HistMatchResult};
use std::path::Path;

/// Configuration for histogram matching.
#[derive(Clone, Debug, PartialEq)]
pub struct MatchConfig {
    /// Histogram type extracted from every image.
    pub hist: HistogramKind,
    /// Distance used to compare histograms.
    pub dist: DistanceKind,
    /// Bins per histogram dimension.
    pub num_bins: usize,
    /// Extract histograms and fill matrix columns on the rayon pool.
    /// Ignored unless the `rayon` feature is enabled.
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            hist: HistogramKind::Rgb,
            dist: DistanceKind::Intersect,
            num_bins: 8,
            parallel: false,
        }
    }
}

/// Result of [`Matcher::find_best_match`].
#[derive(Clone, Debug, PartialEq)]
pub struct MatchOutcome {
    best_index: Vec<usize>,
    labels: Vec<u32>,
    distances: DistanceMatrix,
}

impl MatchOutcome {
    /// Resolves the best model per query and its label.
    pub fn resolve<P, L>(
        distances: DistanceMatrix,
        model_paths: &[P],
        labeler: &L,
    ) -> HistMatchResult<Self>
    where
        P: AsRef<Path>,
        L: LabelExtractor + ?Sized,
    {
        if model_paths.len() != distances.num_models() {
            return Err(HistMatchError::LengthMismatch {
                left: distances.num_models(),
                right: model_paths.len(),
            });
        }
        let best_index = distances.best_matches();
        let labels = best_index
            .iter()
            .map(|&model| labeler.label(model_paths[model].as_ref()))
            .collect::<HistMatchResult<Vec<_>>>()?;
        Ok(Self {
            best_index,
            labels,
            distances,
        })
    }

    /// Best model row per query.
    pub fn best_index(&self) -> &[usize] {
        &self.best_index
    }

    /// Object label of the best model per query.
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// The `k` closest models to `query`, nearest first.
    pub fn neighbors(&self, query: usize, k: usize) -> HistMatchResult<Vec<Neighbor>> {
        self.distances.nearest(query, k)
    }

    /// Number of queries `i` whose best match is model `i`.
    pub fn correct_count(&self) -> usize {
        self.best_index
            .iter()
            .enumerate()
            .filter(|(query, &model)| *query == model)
            .count()
    }

    /// Fraction of queries matched to the model with the same index.
    pub fn recognition_rate(&self) -> f32 {
        if self.best_index.is_empty() {
            return 0.0;
        }
        self.correct_count() as f32 / self.best_index.len() as f32
    }
}

/// Histogram matcher for a fixed histogram kind, bin count and distance.
#[derive(Clone, Debug)]
pub struct Matcher<G = GaussianDerivative> {
    extractor: HistogramExtractor<G>,
    cfg: MatchConfig,
}

impl Matcher<GaussianDerivative> {
    /// Creates a matcher with the default Gaussian derivative operator.
    pub fn new(cfg: MatchConfig) -> HistMatchResult<Self> {
        Self::with_gradient(cfg, GaussianDerivative)
    }
}

impl<G: GradientOperator> Matcher<G> {
    /// Creates a matcher using `gradient` for the `dxdy` histogram.
    pub fn with_gradient(cfg: MatchConfig, gradient: G) -> HistMatchResult<Self> {
        let extractor = HistogramExtractor::with_gradient(cfg.hist, cfg.num_bins, gradient)?;
        Ok(Self { extractor, cfg })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    pub fn extractor(&self) -> &HistogramExtractor<G> {
        &self.extractor
    }

    /// Loads every image and extracts its histogram, preserving input order.
    pub fn compute_histograms<S, P>(&self, source: &S, paths: &[P]) -> HistMatchResult<Vec<Histogram>>
    where
        S: ImageSource + ?Sized,
        P: AsRef<Path> + Sync,
    {
        let _span = trace_span!(
            "compute_histograms",
            images = paths.len(),
            hist = self.cfg.hist.name(),
            num_bins = self.cfg.num_bins
        )
        .entered();

        try_map_range(self.cfg.parallel, paths.len(), |idx| {
            let path = paths[idx].as_ref();
            let image = source.load(path)?;
            let hist = self.extractor.extract_image(image)?;
            trace_debug!("histogram", index = idx, bins = hist.len());
            Ok(hist)
        })
    }

    /// Extracts histograms from images that are already in memory.
    pub fn histograms_from_images(&self, images: &[Image]) -> HistMatchResult<Vec<Histogram>> {
        try_map_range(self.cfg.parallel, images.len(), |idx| {
            let prepared = self.extractor.prepare(images[idx].clone())?;
            self.extractor.extract(prepared.view())
        })
    }

    /// Pairwise distances with the configured metric.
    pub fn distance_matrix(
        &self,
        models: &[Histogram],
        queries: &[Histogram],
    ) -> HistMatchResult<DistanceMatrix> {
        self.distance_matrix_for(self.cfg.dist, models, queries)
    }

    /// Pairwise distances with an explicit metric.
    pub fn distance_matrix_for(
        &self,
        dist: DistanceKind,
        models: &[Histogram],
        queries: &[Histogram],
    ) -> HistMatchResult<DistanceMatrix> {
        if models.is_empty() {
            return Err(HistMatchError::InvalidInput("model set is empty"));
        }
        if queries.is_empty() {
            return Err(HistMatchError::InvalidInput("query set is empty"));
        }
        let _span = trace_span!(
            "distance_matrix",
            models = models.len(),
            queries = queries.len(),
            dist = dist.name()
        )
        .entered();

        let columns = try_map_range(self.cfg.parallel, queries.len(), |i| {
            let query = queries[i].as_slice();
            models
                .iter()
                .map(|model| dist.distance(model.as_slice(), query))
                .collect::<HistMatchResult<Vec<f32>>>()
        })?;
        DistanceMatrix::from_columns(columns, models.len())
    }

    /// Finds the closest model for every query, labelling matches with
    /// [`ObjectIdLabel`].
    pub fn find_best_match<S, P>(
        &self,
        source: &S,
        model_paths: &[P],
        query_paths: &[P],
    ) -> HistMatchResult<MatchOutcome>
    where
        S: ImageSource + ?Sized,
        P: AsRef<Path> + Sync,
    {
        self.find_best_match_with(source, model_paths, query_paths, &ObjectIdLabel)
    }

    /// Finds the closest model for every query with a custom labeller.
    pub fn find_best_match_with<S, P, L>(
        &self,
        source: &S,
        model_paths: &[P],
        query_paths: &[P],
        labeler: &L,
    ) -> HistMatchResult<MatchOutcome>
    where
        S: ImageSource + ?Sized,
        P: AsRef<Path> + Sync,
        L: LabelExtractor + ?Sized,
    {
        if model_paths.is_empty() {
            return Err(HistMatchError::InvalidInput("model set is empty"));
        }
        if query_paths.is_empty() {
            return Err(HistMatchError::InvalidInput("query set is empty"));
        }
        let _span = trace_span!(
            "find_best_match",
            models = model_paths.len(),
            queries = query_paths.len()
        )
        .entered();

        let models = self.compute_histograms(source, model_paths)?;
        let queries = self.compute_histograms(source, query_paths)?;
        let distances = self.distance_matrix(&models, &queries)?;
        let outcome = MatchOutcome::resolve(distances, model_paths, labeler)?;

        trace_event!(
            "best_match",
            correct = outcome.correct_count(),
            queries = query_paths.len()
        );
        Ok(outcome)
    }
}
