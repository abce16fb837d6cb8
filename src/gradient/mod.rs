//! Gaussian-smoothed image derivatives.
//!
//! The gradient histogram only needs a pair of derivative fields. Producing
//! them is delegated to a [`GradientOperator`] so callers can swap in their
//! own filtering; [`GaussianDerivative`] is the separable default:
//!
//! - `dx = image * G(y) * G'(x)`
//! - `dy = image * G(x) * G'(y)`
//!
//! with sampled kernels truncated at three sigma and zero-padded borders.

mod kernel;

use crate::image::{Image, ImageView};
use crate::util::{HistMatchError, HistMatchResult};

/// Derivative fields of a grayscale image, both with the input's size.
#[derive(Clone, Debug, PartialEq)]
pub struct Gradients {
    pub dx: Image,
    pub dy: Image,
}

/// Produces x/y derivatives of a grayscale image smoothed at scale `sigma`.
pub trait GradientOperator: Send + Sync {
    fn derivatives(&self, image: ImageView<'_, f32>, sigma: f32) -> HistMatchResult<Gradients>;
}

impl<G: GradientOperator + ?Sized> GradientOperator for &G {
    fn derivatives(&self, image: ImageView<'_, f32>, sigma: f32) -> HistMatchResult<Gradients> {
        (**self).derivatives(image, sigma)
    }
}

/// Separable sampled-Gaussian derivative filter.
#[derive(Clone, Copy, Debug, Default)]
pub struct GaussianDerivative;

impl GradientOperator for GaussianDerivative {
    fn derivatives(&self, image: ImageView<'_, f32>, sigma: f32) -> HistMatchResult<Gradients> {
        image.require_channels(1)?;
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(HistMatchError::InvalidInput("sigma must be positive and finite"));
        }

        let width = image.width();
        let height = image.height();
        let plane: Vec<f32> = image.pixels().map(|px| px[0]).collect();
        let g = kernel::gauss(sigma);
        let d = kernel::gauss_dx(sigma);

        let dx = kernel::convolve_cols(
            &kernel::convolve_rows(&plane, width, height, &d),
            width,
            height,
            &g,
        );
        let dy = kernel::convolve_rows(
            &kernel::convolve_cols(&plane, width, height, &d),
            width,
            height,
            &g,
        );

        Ok(Gradients {
            dx: Image::gray(dx, width, height)?,
            dy: Image::gray(dy, width, height)?,
        })
    }
}
