//! Loading images from disk via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{Image, ImageSource};
use crate::util::{HistMatchError, HistMatchResult};
use std::path::{Path, PathBuf};

/// Converts a decoded RGB buffer to a float image on the 0..=255 scale.
pub fn owned_from_rgb_image(img: &image::RgbImage) -> HistMatchResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    Image::from_u8(img.as_raw(), width, height, 3)
}

/// Converts a decoded 8-bit grayscale buffer to a float image.
pub fn owned_from_gray_image(img: &image::GrayImage) -> HistMatchResult<Image> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    Image::from_u8(img.as_raw(), width, height, 1)
}

/// Converts any decoded image to three-channel RGB floats.
pub fn owned_from_dynamic_image(img: &image::DynamicImage) -> HistMatchResult<Image> {
    owned_from_rgb_image(&img.to_rgb8())
}

/// Loads an image from disk as RGB floats.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> HistMatchResult<Image> {
    let img = image::open(path.as_ref()).map_err(|err| HistMatchError::ImageIo {
        reason: format!("{}: {err}", path.as_ref().display()),
    })?;
    owned_from_dynamic_image(&img)
}

/// Reads images from the filesystem, optionally relative to a root directory.
#[derive(Clone, Debug, Default)]
pub struct FsImageSource {
    root: Option<PathBuf>,
}

impl FsImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves relative paths against `root`.
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl ImageSource for FsImageSource {
    fn load(&self, path: &Path) -> HistMatchResult<Image> {
        load_rgb_image(self.resolve(path))
    }
}

#[cfg(test)]
mod tests {
    use super::{owned_from_dynamic_image, owned_from_gray_image, FsImageSource};
    use std::path::Path;

    #[test]
    fn gray_buffers_become_single_channel() {
        let img = image::GrayImage::from_raw(2, 1, vec![7, 250]).unwrap();
        let owned = owned_from_gray_image(&img).unwrap();
        assert_eq!(owned.channels(), 1);
        assert_eq!(owned.data(), &[7.0, 250.0]);
    }

    #[test]
    fn dynamic_gray_images_are_expanded_to_rgb() {
        let gray = image::GrayImage::from_raw(1, 1, vec![42]).unwrap();
        let owned = owned_from_dynamic_image(&image::DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!(owned.channels(), 3);
        assert_eq!(owned.data(), &[42.0, 42.0, 42.0]);
    }

    #[test]
    fn root_only_applies_to_relative_paths() {
        let source = FsImageSource::with_root("/data");
        assert_eq!(
            source.resolve(Path::new("model/obj1__0.png")),
            Path::new("/data/model/obj1__0.png")
        );
        assert_eq!(
            source.resolve(Path::new("/abs/obj1__0.png")),
            Path::new("/abs/obj1__0.png")
        );
    }
}
