// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a raster as a binary graymap: a three-line ASCII header
//! (`P5`, the dimensions, the maximum sample value) followed by the
//! raw samples.
//!
//! The `image` crate's PNM encoder puts the dimensions and the
//! maximum value on one line, so the header is written by hand.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::render::Raster;

/// The largest sample value a graymap of bytes can hold.
pub const MAX_VALUE: u8 = 255;

/// The header that precedes the samples.
pub fn header(width: usize, height: usize) -> String {
    format!("P5\n{} {}\n{}\n", width, height, MAX_VALUE)
}

/// Serializes `raster` into any writer.
pub fn write_pgm<W: Write>(writer: &mut W, raster: &Raster) -> Result<()> {
    writer.write_all(header(raster.width(), raster.height()).as_bytes())?;
    writer.write_all(raster.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes `raster` to it.
pub fn save_pgm<P: AsRef<Path>>(path: P, raster: &Raster) -> Result<()> {
    let path = path.as_ref();
    let output = File::create(path).map_err(|e| Error::create(path, e))?;
    let mut writer = BufWriter::new(output);
    write_pgm(&mut writer, raster)?;
    debug!(
        "wrote {}x{} graymap to {}",
        raster.width(),
        raster.height(),
        path.display()
    );
    Ok(())
}
