// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which maps a rectangle on the
//! integral plane with an origin at 0,0 onto a window of the complex
//! plane centered on an arbitrary point.
use num::Complex;

use crate::config::Config;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// Describes the x, y of a pixel on the integral plane.  x is the
/// column, y is the row.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels to points on the complex plane.  The middle of the
/// integral plane lands on `center`, and the integral plane is
/// stretched to cover `view` units along each axis.
#[derive(Debug, Clone)]
pub struct PlaneMapper {
    /// The right-lower hand corner of the integral cartesian plane.
    /// The left-upper is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The point of the complex plane under the middle of the image.
    pub center: Complex<f64>,
    // Extent of the window along the real and imaginary axes.
    view: (f64, f64),
    // Half the integral plane, in floating point so odd sizes stay
    // symmetric.
    half: (f64, f64),
}

impl PlaneMapper {
    /// Builds the mapper for a validated configuration.
    pub fn new(config: &Config) -> PlaneMapper {
        PlaneMapper {
            integral_plane: IntegralPlane(config.width, config.height),
            center: config.center,
            view: (config.view_width, config.view_height),
            half: (config.width as f64 / 2.0, config.height as f64 / 2.0),
        }
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The real part of every pixel in column `x`.
    #[inline]
    pub fn column_to_re(&self, x: usize) -> f64 {
        (x as f64 - self.half.0) * self.view.0 / (self.integral_plane.0 as f64) + self.center.re
    }

    /// The imaginary part of every pixel in row `y`.  Rows grow
    /// downward and so does the imaginary part; the set is symmetric
    /// about the real axis, so the picture is the same either way.
    #[inline]
    pub fn row_to_im(&self, y: usize) -> f64 {
        (y as f64 - self.half.1) * self.view.1 / (self.integral_plane.1 as f64) + self.center.im
    }

    /// Given a pixel on the integral cartesian plane, map that to the
    /// equivalent point on the complex cartesian plane.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(self.column_to_re(pixel.0), self.row_to_im(pixel.1))
    }
}
