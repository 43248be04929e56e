// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Wall-clock timing of the render step, and the one-line report
//! each run prints.

use std::fmt;
use std::time::{Duration, Instant};

use log::info;

/// How long a render took, and which worker did it.  Sequential runs
/// have no rank.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Timing {
    /// The worker that rendered, if the run was parallel.
    pub rank: Option<usize>,
    /// Elapsed wall-clock time.
    pub elapsed: Duration,
}

impl Timing {
    /// Elapsed time in seconds.
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(rank) = self.rank {
            write!(f, "Process {}: ", rank)?;
        }
        write!(f, "Execution Time: {:.2} seconds", self.seconds())
    }
}

/// Runs `work` and measures it.
pub fn timed<F, R>(rank: Option<usize>, work: F) -> (R, Timing)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = work();
    let elapsed = Instant::now() - start;
    (result, Timing { rank, elapsed })
}

/// Logs the timing, and prints it on stdout when `console` is set.
/// Each call writes one whole line, so parallel workers never
/// interleave their reports.
pub fn report(timing: &Timing, console: bool) {
    info!("{}", timing);
    if console {
        println!("{}", timing);
    }
}
