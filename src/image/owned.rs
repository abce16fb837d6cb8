//! Owned contiguous float images and color conversion.

use crate::image::ImageView;
use crate::util::{HistMatchError, HistMatchResult};

/// Luma weights applied to (R, G, B) when converting to grayscale.
pub const LUMA_WEIGHTS: [f32; 3] = [0.2989, 0.5870, 0.1140];

/// Owned row-major image with interleaved `f32` channels.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    data: Vec<f32>,
    width: usize,
    height: usize,
    channels: usize,
}

impl Image {
    /// Wraps a packed buffer of exactly `width * height * channels` values.
    pub fn new(
        data: Vec<f32>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> HistMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(HistMatchError::InvalidDimensions { width, height });
        }
        if channels == 0 {
            return Err(HistMatchError::InvalidInput("image needs at least one channel"));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(HistMatchError::InvalidDimensions { width, height })?;
        if data.len() != expected {
            return Err(HistMatchError::BufferLengthMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Creates a single-channel image.
    pub fn gray(data: Vec<f32>, width: usize, height: usize) -> HistMatchResult<Self> {
        Self::new(data, width, height, 1)
    }

    /// Creates an interleaved RGB image.
    pub fn rgb(data: Vec<f32>, width: usize, height: usize) -> HistMatchResult<Self> {
        Self::new(data, width, height, 3)
    }

    /// Converts an 8-bit buffer to floating point without rescaling.
    pub fn from_u8(
        data: &[u8],
        width: usize,
        height: usize,
        channels: usize,
    ) -> HistMatchResult<Self> {
        Self::new(
            data.iter().map(|&v| f32::from(v)).collect(),
            width,
            height,
            channels,
        )
    }

    /// Creates an image with every element set to `value`.
    pub fn filled(
        width: usize,
        height: usize,
        channels: usize,
        value: f32,
    ) -> HistMatchResult<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(channels))
            .ok_or(HistMatchError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height, channels)
    }

    /// Copies a view into a packed owned image.
    pub fn from_view(view: ImageView<'_, f32>) -> HistMatchResult<Self> {
        let mut data = Vec::with_capacity(view.pixel_count() * view.channels());
        for pixel in view.pixels() {
            data.extend_from_slice(pixel);
        }
        Self::new(data, view.width(), view.height(), view.channels())
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, f32> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            channels: self.channels,
            stride: self.width * self.channels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn is_gray(&self) -> bool {
        self.channels == 1
    }

    /// Returns the packed interleaved buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Converts to a single-channel image.
    ///
    /// Gray images are copied unchanged; RGB images use [`LUMA_WEIGHTS`].
    pub fn to_gray(&self) -> HistMatchResult<Image> {
        match self.channels {
            1 => Ok(self.clone()),
            3 => {
                let [wr, wg, wb] = LUMA_WEIGHTS;
                let data = self
                    .data
                    .chunks_exact(3)
                    .map(|px| wr * px[0] + wg * px[1] + wb * px[2])
                    .collect();
                Image::gray(data, self.width, self.height)
            }
            got => Err(HistMatchError::ChannelMismatch { expected: 3, got }),
        }
    }
}
