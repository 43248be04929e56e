// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong while rendering, gathering, or
//! writing an image.  None of these are recoverable; the binaries
//! print the chain of causes and exit with a nonzero status.

use std::io;
use std::path::Path;

use failure::Fail;

/// The error type shared by the whole crate.
#[derive(Debug, Fail)]
pub enum Error {
    /// The configuration describes an image that cannot be rendered.
    #[fail(display = "invalid configuration: {}", _0)]
    Config(String),

    /// A process group must contain at least one worker.
    #[fail(display = "the worker count must be at least 1")]
    NoWorkers,

    /// More workers than rows would leave some workers with nothing
    /// to render.
    #[fail(display = "{} workers requested but the image only has {} rows", workers, rows)]
    TooManyWorkers {
        /// Requested worker count.
        workers: usize,
        /// Rows in the image.
        rows: usize,
    },

    /// The buffer handed to the renderer does not match the band.
    #[fail(display = "buffer holds {} bytes, band needs {}", actual, expected)]
    BufferSize {
        /// Bytes the band needs.
        expected: usize,
        /// Bytes the buffer holds.
        actual: usize,
    },

    /// The output file could not be opened for writing.
    #[fail(display = "could not create {}", path)]
    Create {
        /// Where we tried to write.
        path: String,
        /// Why the operating system refused.
        #[cause]
        cause: io::Error,
    },

    /// Writing the image failed after the file was opened.
    #[fail(display = "I/O error: {}", _0)]
    Io(#[cause] io::Error),

    /// The collective gather could not complete.
    #[fail(display = "gather failed: {}", _0)]
    Gather(String),

    /// A worker thread panicked before it could finish.
    #[fail(display = "worker {} panicked", _0)]
    WorkerPanicked(usize),
}

impl Error {
    pub(crate) fn create(path: &Path, cause: io::Error) -> Error {
        Error::Create {
            path: path.display().to_string(),
            cause,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Error {
        Error::Io(e)
    }
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_error_names_the_path_and_keeps_the_cause() {
        let e = Error::create(
            Path::new("/nowhere/out.pgm"),
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        assert_eq!(e.to_string(), "could not create /nowhere/out.pgm");
        assert!(Fail::cause(&e).is_some());
    }

    #[test]
    fn partition_errors_read_well() {
        let e = Error::TooManyWorkers {
            workers: 9,
            rows: 4,
        };
        assert_eq!(e.to_string(), "9 workers requested but the image only has 4 rows");
    }
}
