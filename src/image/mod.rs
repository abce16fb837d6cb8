//! Float image views, owned images and image sources.
//!
//! `ImageView` is a borrowed 2D view into a 1D buffer of interleaved
//! channels. The stride counts elements between the starts of consecutive
//! rows, so a stride larger than `width * channels` represents padded rows.
//! Grayscale images have one channel, color images three (R, G, B).

use crate::util::{HistMatchError, HistMatchResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;
mod source;

pub use owned::{Image, LUMA_WEIGHTS};
pub use source::{ImageSource, MemoryImageSource};

/// Borrowed 2D image view with interleaved channels and an explicit stride.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T = f32> {
    data: &'a [T],
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width * channels`.
    pub fn from_slice(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> HistMatchResult<Self> {
        let row_len = width
            .checked_mul(channels)
            .ok_or(HistMatchError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, channels, row_len)
    }

    /// Creates a view with an explicit stride.
    pub fn new(
        data: &'a [T],
        width: usize,
        height: usize,
        channels: usize,
        stride: usize,
    ) -> HistMatchResult<Self> {
        if channels == 0 {
            return Err(HistMatchError::InvalidInput("image needs at least one channel"));
        }
        let needed = required_len(width, height, channels, stride)?;
        if data.len() < needed {
            return Err(HistMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of interleaved channels per pixel.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns `width * height`.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns channel `c` of pixel `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize, c: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return None;
        }
        let idx = y
            .checked_mul(self.stride)?
            .checked_add(x * self.channels + c)?;
        self.data.get(idx)
    }

    /// Returns the packed elements of row `y` (`width * channels` values).
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width * self.channels)?;
        self.data.get(start..end)
    }

    /// Iterates pixels in row-major order; each item holds `channels` values.
    pub fn pixels(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        let data = self.data;
        let stride = self.stride;
        let row_len = self.width * self.channels;
        let channels = self.channels;
        (0..self.height).flat_map(move |y| {
            let start = y * stride;
            data[start..start + row_len].chunks_exact(channels)
        })
    }

    /// Fails unless the view has exactly `expected` channels.
    pub fn require_channels(&self, expected: usize) -> HistMatchResult<()> {
        if self.channels != expected {
            return Err(HistMatchError::ChannelMismatch {
                expected,
                got: self.channels,
            });
        }
        Ok(())
    }
}

fn required_len(
    width: usize,
    height: usize,
    channels: usize,
    stride: usize,
) -> HistMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(HistMatchError::InvalidDimensions { width, height });
    }
    let row_len = width
        .checked_mul(channels)
        .ok_or(HistMatchError::InvalidDimensions { width, height })?;
    if stride < row_len {
        return Err(HistMatchError::InvalidStride { row_len, stride });
    }
    (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_len))
        .ok_or(HistMatchError::InvalidDimensions { width, height })
}
