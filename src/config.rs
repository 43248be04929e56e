// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The fixed parameters of a render.  A `Config` is built once,
//! validated, and then shared read-only by every worker.

use num::Complex;

use crate::error::{Error, Result};

/// Default image width in pixels.
pub const WIDTH: usize = 800;
/// Default image height in pixels.
pub const HEIGHT: usize = 800;
/// Default iteration ceiling; a point that survives this many
/// iterations is considered inside the set.
pub const MAX_ITER: u32 = 1000;
/// Default width and height of the view window on the complex plane.
pub const VIEW_SIZE: f64 = 4.0;

/// Image dimensions, iteration ceiling, and the window of the complex
/// plane the image covers.  The window is described by its center and
/// its extent along each axis.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Config {
    /// Columns in the raster.
    pub width: usize,
    /// Rows in the raster.
    pub height: usize,
    /// Iteration ceiling for the escape-time test.
    pub iterations: u32,
    /// The point on the complex plane at the center of the image.
    pub center: Complex<f64>,
    /// Extent of the window along the real axis.
    pub view_width: f64,
    /// Extent of the window along the imaginary axis.
    pub view_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: WIDTH,
            height: HEIGHT,
            iterations: MAX_ITER,
            center: Complex::new(0.0, 0.0),
            view_width: VIEW_SIZE,
            view_height: VIEW_SIZE,
        }
    }
}

impl Config {
    /// A configuration with the default ±2.0 window around the origin.
    pub fn new(width: usize, height: usize, iterations: u32) -> Result<Config> {
        Config {
            width,
            height,
            iterations,
            ..Config::default()
        }
        .validated()
    }

    /// Replaces the view window.
    pub fn with_view(self, center: Complex<f64>, view_width: f64, view_height: f64) -> Result<Config> {
        Config {
            center,
            view_width,
            view_height,
            ..self
        }
        .validated()
    }

    /// Checks that the configuration can be rendered.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config(format!(
                "image must have at least one pixel, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(Error::Config(format!(
                "a {}x{} image has more pixels than memory can address",
                self.width, self.height
            )));
        }
        if self.iterations == 0 {
            return Err(Error::Config("iteration ceiling must be positive".to_string()));
        }
        if !(self.view_width.is_finite() && self.view_width > 0.0)
            || !(self.view_height.is_finite() && self.view_height > 0.0)
        {
            return Err(Error::Config(format!(
                "view window must be finite and positive, got {}x{}",
                self.view_width, self.view_height
            )));
        }
        if !(self.center.re.is_finite() && self.center.im.is_finite()) {
            return Err(Error::Config("view center must be finite".to_string()));
        }
        Ok(())
    }

    fn validated(self) -> Result<Config> {
        self.validate()?;
        Ok(self)
    }

    /// The number of samples in the full raster.  Validation
    /// guarantees the product fits.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the raster would have no samples.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_the_reference_program() {
        let config = Config::default();
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 800);
        assert_eq!(config.iterations, 1000);
        assert_eq!(config.center, Complex::new(0.0, 0.0));
        assert_eq!(config.view_width, 4.0);
        assert_eq!(config.view_height, 4.0);
        assert_eq!(config.len(), 640_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_images() {
        assert!(Config::new(0, 10, 100).is_err());
        assert!(Config::new(10, 0, 100).is_err());
    }

    #[test]
    fn rejects_images_too_large_to_address() {
        match Config::new(usize::MAX, 2, 1) {
            Err(Error::Config(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert!(Config::new(2, usize::MAX / 2 + 1, 1).is_err());
        assert_eq!(Config::new(usize::MAX, 1, 1).unwrap().len(), usize::MAX);
    }

    #[test]
    fn rejects_zero_iterations() {
        assert!(Config::new(10, 10, 0).is_err());
    }

    #[test]
    fn rejects_degenerate_windows() {
        let config = Config::new(10, 10, 100).unwrap();
        assert!(config.with_view(Complex::new(0.0, 0.0), 0.0, 1.0).is_err());
        assert!(config.with_view(Complex::new(0.0, 0.0), 1.0, -1.0).is_err());
        assert!(config
            .with_view(Complex::new(0.0, 0.0), std::f64::NAN, 1.0)
            .is_err());
        assert!(config
            .with_view(Complex::new(std::f64::INFINITY, 0.0), 1.0, 1.0)
            .is_err());
        assert!(config.with_view(Complex::new(-0.5, 0.0), 3.0, 2.0).is_ok());
    }
}
