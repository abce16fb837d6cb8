//! Image sources resolve a path to a decoded float image.

use crate::image::Image;
use crate::util::{HistMatchError, HistMatchResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Anything that can turn an image path into pixels.
///
/// Color sources return three interleaved channels; grayscale sources may
/// return one. Conversion to the layout a histogram needs happens later in
/// [`crate::HistogramExtractor::prepare`]. Sources are shared across
/// worker threads when parallel extraction is enabled.
pub trait ImageSource: Sync {
    fn load(&self, path: &Path) -> HistMatchResult<Image>;
}

impl<S: ImageSource + ?Sized> ImageSource for &S {
    fn load(&self, path: &Path) -> HistMatchResult<Image> {
        (**self).load(path)
    }
}

/// Images held in memory and keyed by path.
#[derive(Clone, Debug, Default)]
pub struct MemoryImageSource {
    images: HashMap<PathBuf, Image>,
}

impl MemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `image` under `path`, replacing any previous entry.
    pub fn insert<P: Into<PathBuf>>(&mut self, path: P, image: Image) {
        self.images.insert(path.into(), image);
    }

    /// Builder form of [`MemoryImageSource::insert`].
    pub fn with<P: Into<PathBuf>>(mut self, path: P, image: Image) -> Self {
        self.insert(path, image);
        self
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageSource for MemoryImageSource {
    fn load(&self, path: &Path) -> HistMatchResult<Image> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| HistMatchError::ImageNotFound {
                path: path.display().to_string(),
            })
    }
}
