//! Model-by-query distance matrix.

use crate::search::neighbors::{NearestK, Neighbor};
use crate::util::math::argmin_first;
use crate::util::{HistMatchError, HistMatchResult};

/// Row-major `num_models x num_queries` matrix; `D[j, i]` compares model `j`
/// with query `i`. Every entry is finite.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl DistanceMatrix {
    /// Wraps a row-major buffer of exactly `num_models * num_queries` finite
    /// values.
    pub fn from_vec(data: Vec<f32>, num_models: usize, num_queries: usize) -> HistMatchResult<Self> {
        if num_models == 0 || num_queries == 0 {
            return Err(HistMatchError::InvalidDimensions {
                width: num_queries,
                height: num_models,
            });
        }
        let expected = num_models
            .checked_mul(num_queries)
            .ok_or(HistMatchError::InvalidDimensions {
                width: num_queries,
                height: num_models,
            })?;
        if data.len() != expected {
            return Err(HistMatchError::BufferLengthMismatch {
                expected,
                got: data.len(),
            });
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(HistMatchError::InvalidValue {
                index,
                value,
                context: "distance matrix",
            });
        }
        Ok(Self {
            data,
            rows: num_models,
            cols: num_queries,
        })
    }

    /// Builds a matrix from one slice per model row.
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> HistMatchResult<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(HistMatchError::LengthMismatch {
                    left: cols,
                    right: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_vec(data, rows.len(), cols)
    }

    /// Builds a matrix from one vector per query column.
    pub(crate) fn from_columns(columns: Vec<Vec<f32>>, num_models: usize) -> HistMatchResult<Self> {
        let num_queries = columns.len();
        let mut data = vec![0.0f32; num_models * num_queries];
        for (i, column) in columns.into_iter().enumerate() {
            if column.len() != num_models {
                return Err(HistMatchError::LengthMismatch {
                    left: num_models,
                    right: column.len(),
                });
            }
            for (j, value) in column.into_iter().enumerate() {
                data[j * num_queries + i] = value;
            }
        }
        Self::from_vec(data, num_models, num_queries)
    }

    pub fn num_models(&self) -> usize {
        self.rows
    }

    pub fn num_queries(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Returns the row-major backing buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Distance between `model` and `query`.
    pub fn get(&self, model: usize, query: usize) -> Option<f32> {
        if model >= self.rows || query >= self.cols {
            return None;
        }
        self.data.get(model * self.cols + query).copied()
    }

    /// Distances from every model to `query`, in model order.
    pub fn column(&self, query: usize) -> impl Iterator<Item = f32> + '_ {
        let cols = self.cols;
        let len = if query < cols { self.rows } else { 0 };
        (0..len).map(move |j| self.data[j * cols + query])
    }

    /// Model minimizing the distance to `query`; the lowest index wins ties.
    pub fn best_match(&self, query: usize) -> Option<usize> {
        argmin_first(self.column(query))
    }

    /// [`best_match`](Self::best_match) for every query.
    pub fn best_matches(&self) -> Vec<usize> {
        (0..self.cols)
            .filter_map(|query| self.best_match(query))
            .collect()
    }

    /// Up to `k` closest models to `query`, nearest first.
    pub fn nearest(&self, query: usize, k: usize) -> HistMatchResult<Vec<Neighbor>> {
        if query >= self.cols {
            return Err(HistMatchError::IndexOutOfBounds {
                index: query,
                len: self.cols,
                context: "query",
            });
        }
        let mut nearest = NearestK::new(k.min(self.rows));
        for (model, distance) in self.column(query).enumerate() {
            nearest.push(Neighbor { model, distance });
        }
        Ok(nearest.into_sorted_asc())
    }

    /// Smallest entry.
    pub fn min(&self) -> f32 {
        self.data.iter().copied().fold(f32::INFINITY, f32::min)
    }

    /// Largest entry.
    pub fn max(&self) -> f32 {
        self.data.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }
}
