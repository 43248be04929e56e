// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Splits the rows of an image into one contiguous band per worker.
//!
//! Every worker gets `height / workers` rows, in rank order.  When the
//! division leaves a remainder, the last worker takes the leftover
//! rows as well, so the bands always cover the whole image.

use std::ops::Range;

use log::warn;

use crate::error::{Error, Result};

/// The rows `[start, end)` a single worker renders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowBand {
    /// The worker that owns the band.
    pub rank: usize,
    /// First row of the band.
    pub start: usize,
    /// One past the last row of the band.
    pub end: usize,
}

impl RowBand {
    /// Number of rows in the band.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a band with no rows.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The band as a range of rows.
    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }
}

fn check(height: usize, workers: usize) -> Result<usize> {
    if workers == 0 {
        return Err(Error::NoWorkers);
    }
    if workers > height {
        return Err(Error::TooManyWorkers {
            workers,
            rows: height,
        });
    }
    Ok(height / workers)
}

/// The band owned by `rank` in a group of `workers`.
pub fn band(height: usize, workers: usize, rank: usize) -> Result<RowBand> {
    let rows_per_worker = check(height, workers)?;
    if rank >= workers {
        return Err(Error::Gather(format!(
            "rank {} is outside a group of {}",
            rank, workers
        )));
    }
    let start = rank * rows_per_worker;
    let end = if rank == workers - 1 {
        height
    } else {
        start + rows_per_worker
    };
    Ok(RowBand { rank, start, end })
}

/// Every worker's band, in rank order.
pub fn partition(height: usize, workers: usize) -> Result<Vec<RowBand>> {
    check(height, workers)?;
    let leftover = height % workers;
    if leftover != 0 {
        warn!(
            "{} rows do not divide among {} workers; worker {} renders {} extra",
            height,
            workers,
            workers - 1,
            leftover
        );
    }
    (0..workers).map(|rank| band(height, workers, rank)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_covers(height: usize, bands: &[RowBand]) {
        let mut next = 0;
        for (rank, band) in bands.iter().enumerate() {
            assert_eq!(band.rank, rank);
            assert_eq!(band.start, next, "gap or overlap before band {}", rank);
            next = band.end;
        }
        assert_eq!(next, height);
    }

    #[test]
    fn even_split_gives_equal_bands() {
        let bands = partition(800, 4).unwrap();
        assert_eq!(bands.len(), 4);
        assert_covers(800, &bands);
        for (k, band) in bands.iter().enumerate() {
            assert_eq!(band.rows(), k * 200..(k + 1) * 200);
        }
    }

    #[test]
    fn every_divisor_covers_the_image() {
        for workers in (1..=800).filter(|w| 800 % w == 0) {
            let bands = partition(800, workers).unwrap();
            assert_covers(800, &bands);
            assert!(bands.iter().all(|b| b.len() == 800 / workers));
        }
    }

    #[test]
    fn leftover_rows_go_to_the_last_worker() {
        let bands = partition(10, 3).unwrap();
        assert_covers(10, &bands);
        assert_eq!(bands[0].rows(), 0..3);
        assert_eq!(bands[1].rows(), 3..6);
        assert_eq!(bands[2].rows(), 6..10);
    }

    #[test]
    fn single_worker_owns_everything() {
        assert_eq!(
            band(800, 1, 0).unwrap(),
            RowBand {
                rank: 0,
                start: 0,
                end: 800
            }
        );
    }

    #[test]
    fn one_row_per_worker() {
        let bands = partition(7, 7).unwrap();
        assert_covers(7, &bands);
        assert!(bands.iter().all(|b| b.len() == 1 && !b.is_empty()));
    }

    #[test]
    fn rejects_bad_worker_counts() {
        match partition(800, 0) {
            Err(Error::NoWorkers) => (),
            other => panic!("unexpected {:?}", other),
        }
        match partition(4, 5) {
            Err(Error::TooManyWorkers { workers: 5, rows: 4 }) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert!(band(800, 4, 4).is_err());
    }
}
