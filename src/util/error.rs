//! Error types for histmatch.

use thiserror::Error;

/// Result alias for histmatch operations.
pub type HistMatchResult<T> = std::result::Result<T, HistMatchError>;

/// Errors that can occur when building histograms, scoring them, or
/// evaluating retrieval runs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HistMatchError {
    /// The input data or parameters are invalid.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// A histogram type name did not match any known extractor.
    #[error("unknown histogram type: {name}")]
    UnknownHistogram { name: String },
    /// A distance type name did not match any known metric.
    #[error("unknown distance type: {name}")]
    UnknownDistance { name: String },
    /// Histograms need at least one bin per dimension.
    #[error("invalid bin count: {num_bins}")]
    InvalidBinCount { num_bins: usize },
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than a packed row.
    #[error("invalid stride {stride} for row of {row_len} elements")]
    InvalidStride { row_len: usize, stride: usize },
    /// Buffer does not hold enough elements for the declared shape.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Buffer length does not match the declared shape exactly.
    #[error("buffer length mismatch: expected {expected}, got {got}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// The image has the wrong number of channels for the requested operation.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch { expected: usize, got: usize },
    /// Two vectors that must be compared element-wise differ in length.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
    /// A histogram or distance buffer contains a negative or non-finite value.
    #[error("invalid value {value} at index {index} in {context}")]
    InvalidValue {
        index: usize,
        value: f32,
        context: &'static str,
    },
    /// A histogram has no mass, so it cannot be normalized against.
    #[error("zero-mass histogram in {context}")]
    ZeroMass { context: &'static str },
    /// A metric produced a value outside its guaranteed range.
    #[error("{metric} distance {value} outside [{min}, {max}]")]
    RangeViolation {
        metric: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// The evaluator needs one model per query.
    #[error("distance matrix must be square, got {rows}x{cols}")]
    NonSquareMatrix { rows: usize, cols: usize },
    /// An index is outside the valid range.
    #[error("{context} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// An object label could not be parsed from an image path.
    #[error("cannot extract label from {path}: {reason}")]
    Label { path: String, reason: &'static str },
    /// The requested image is not available from the source.
    #[error("image not found: {path}")]
    ImageNotFound { path: String },
    /// Image decoding or file access failed.
    #[error("image I/O error: {reason}")]
    ImageIo { reason: String },
}
