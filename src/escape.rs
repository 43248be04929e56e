// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time test for the Mandelbrot set, and the mapping from
//! an iteration count to a shade of gray.

use num::Complex;

/// Iterates z -> z² + c, starting at z = c, and returns the number of
/// completed iterations before |z| exceeds 2.  A point that never
/// escapes returns `limit`.
///
/// The real and imaginary parts are tracked as two scalars, and the
/// escape test compares squared magnitudes, so the loop needs neither
/// a square root nor a complex multiply.
#[inline]
pub fn escape_time(c_re: f64, c_im: f64, limit: u32) -> u32 {
    let mut re = c_re;
    let mut im = c_im;
    for n in 0..limit {
        let r2 = re * re;
        let i2 = im * im;
        if r2 + i2 > 4.0 {
            return n;
        }
        im = 2.0 * re * im + c_im;
        re = r2 - i2 + c_re;
    }
    limit
}

/// `escape_time` for a point already on the complex plane.
#[inline]
pub fn escape_point(c: Complex<f64>, limit: u32) -> u32 {
    escape_time(c.re, c.im, limit)
}

/// Folds an iteration count into a byte.  The mapping is periodic:
/// counts that differ by 256 share a shade, which bands the image
/// but keeps it identical to the reference renderer's output.
#[inline]
pub fn gray(value: u32) -> u8 {
    (value % 256) as u8
}
