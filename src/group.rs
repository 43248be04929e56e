// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A process group in miniature.  Each member is a scoped thread that
//! knows its rank and the size of the group, and the members meet in
//! a collective gather: everybody contributes a slice of bytes, and
//! one member (the root) receives all of the slices concatenated in
//! rank order.
//!
//! Members share nothing but channels.  Every member has an inbox and
//! a sender into every other member's inbox, but none into its own.
//! A gather sends each contribution to the root's inbox, the root
//! keeps its own slice and collects one contribution from every peer,
//! and then the whole group waits on a barrier, so nobody leaves a
//! gather until the root holds the full result.  Once every peer has
//! left, the root's inbox disconnects, and a gather still waiting on
//! it fails instead of blocking.

use std::sync::{Arc, Barrier};

use crossbeam::channel::{unbounded, Receiver, Sender};
use log::debug;

use crate::error::{Error, Result};

struct Contribution {
    rank: usize,
    bytes: Vec<u8>,
}

/// A fixed number of workers that run together and can gather.
#[derive(Debug)]
pub struct ProcessGroup {
    size: usize,
}

impl ProcessGroup {
    /// A group of `size` workers.
    pub fn new(size: usize) -> Result<ProcessGroup> {
        if size == 0 {
            return Err(Error::NoWorkers);
        }
        Ok(ProcessGroup { size })
    }

    /// Starts one thread per rank, hands each its `Communicator`, and
    /// waits for all of them to return.  Results come back in rank
    /// order.
    ///
    /// Every member that calls `gather` must be matched by every other
    /// member calling it too.  If every peer of the root returns
    /// without contributing, the root's gather fails with
    /// `Error::Gather`; a member that skips a gather while others are
    /// still in it leaves them waiting.
    pub fn run<F, R>(&self, work: F) -> Result<Vec<R>>
    where
        F: Fn(Communicator) -> R + Sync,
        R: Send,
    {
        let size = self.size;
        let (outboxes, inboxes): (Vec<Sender<Contribution>>, Vec<Receiver<Contribution>>) =
            (0..size).map(|_| unbounded()).unzip();
        let barrier = Arc::new(Barrier::new(size));
        let members: Vec<Communicator> = inboxes
            .into_iter()
            .enumerate()
            .map(|(rank, inbox)| Communicator {
                rank,
                size,
                outboxes: outboxes
                    .iter()
                    .enumerate()
                    .map(|(peer, outbox)| if peer == rank { None } else { Some(outbox.clone()) })
                    .collect(),
                inbox,
                barrier: barrier.clone(),
            })
            .collect();
        // From here on the members hold the only senders.
        drop(outboxes);
        let work = &work;

        let joined = crossbeam::scope(|spawner| {
            let handles: Vec<_> = members
                .into_iter()
                .map(|comm| {
                    debug!("worker {} of {} joined", comm.rank, size);
                    spawner.spawn(move |_| work(comm))
                })
                .collect();

            handles
                .into_iter()
                .enumerate()
                .map(|(rank, handle)| handle.join().map_err(|_| Error::WorkerPanicked(rank)))
                .collect::<Result<Vec<R>>>()
        });

        match joined {
            Ok(results) => results,
            Err(_) => Err(Error::Gather("the process group was torn down".to_string())),
        }
    }
}

/// One member's view of its group: who it is, how many peers it has,
/// and the plumbing for collective operations.
pub struct Communicator {
    rank: usize,
    size: usize,
    // Indexed by rank; a member's own slot is empty.
    outboxes: Vec<Option<Sender<Contribution>>>,
    inbox: Receiver<Contribution>,
    barrier: Arc<Barrier>,
}

impl Communicator {
    /// This member's 0-based ordinal.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Number of members in the group.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Contributes `local` to a gather onto `root`.  The root gets
    /// `Some` of every member's contribution concatenated in rank
    /// order; everyone else gets `None`.  Returns only after every
    /// member has contributed.
    pub fn gather(&self, local: Vec<u8>, root: usize) -> Result<Option<Vec<u8>>> {
        if root >= self.size {
            return Err(Error::Gather(format!(
                "root {} is outside a group of {}",
                root, self.size
            )));
        }
        debug!(
            "worker {} contributes {} bytes to root {}",
            self.rank,
            local.len(),
            root
        );
        if self.rank == root {
            let gathered = self.collect(local)?;
            self.barrier.wait();
            return Ok(Some(gathered));
        }

        self.outboxes[root]
            .as_ref()
            .ok_or_else(|| {
                Error::Gather(format!("worker {} has no route to root {}", self.rank, root))
            })?
            .send(Contribution {
                rank: self.rank,
                bytes: local,
            })
            .map_err(|_| Error::Gather(format!("root {} has left the group", root)))?;
        self.barrier.wait();
        Ok(None)
    }

    // A failure here means the inbox disconnected, so every peer has
    // already left and nobody is left to meet at the barrier.
    fn collect(&self, local: Vec<u8>) -> Result<Vec<u8>> {
        let mut parts: Vec<Option<Vec<u8>>> = vec![None; self.size];
        parts[self.rank] = Some(local);
        for _ in 1..self.size {
            let contribution = self.inbox.recv().map_err(|_| {
                Error::Gather(format!(
                    "root {} lost its peers before they contributed",
                    self.rank
                ))
            })?;
            let rank = contribution.rank;
            let slot = parts.get_mut(rank).ok_or_else(|| {
                Error::Gather(format!("rank {} is outside a group of {}", rank, self.size))
            })?;
            if slot.is_some() {
                return Err(Error::Gather(format!("rank {} contributed twice", rank)));
            }
            *slot = Some(contribution.bytes);
        }
        // One contribution per rank and no duplicates, so every slot is full.
        let parts: Vec<Vec<u8>> = parts.into_iter().flatten().collect();
        debug!("root {} gathered {} slices", self.rank, parts.len());
        Ok(parts.concat())
    }

    /// Leaves the group.  Consumes the communicator and drops its
    /// senders and its inbox, so a root still collecting sees this
    /// member as gone.  A worker that returns without calling `leave`
    /// leaves the same way when its communicator is dropped.
    pub fn leave(self) {
        let Communicator {
            rank,
            size,
            outboxes,
            inbox,
            ..
        } = self;
        drop(outboxes);
        drop(inbox);
        debug!("worker {} of {} left", rank, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_unique_and_ordered() {
        let group = ProcessGroup::new(5).unwrap();
        let ranks = group.run(|comm| (comm.rank(), comm.size())).unwrap();
        assert_eq!(ranks, vec![(0, 5), (1, 5), (2, 5), (3, 5), (4, 5)]);
    }

    #[test]
    fn gather_concatenates_in_rank_order() {
        let group = ProcessGroup::new(4).unwrap();
        let results = group
            .run(|comm| {
                let local = vec![comm.rank() as u8; comm.rank() + 1];
                comm.gather(local, 0).unwrap()
            })
            .unwrap();
        assert_eq!(results[0], Some(vec![0, 1, 1, 2, 2, 2, 3, 3, 3, 3]));
        assert!(results[1..].iter().all(Option::is_none));
    }

    #[test]
    fn gather_can_target_any_root() {
        let group = ProcessGroup::new(3).unwrap();
        let results = group
            .run(|comm| comm.gather(vec![10 + comm.rank() as u8], 2).unwrap())
            .unwrap();
        assert_eq!(results, vec![None, None, Some(vec![10, 11, 12])]);
    }

    #[test]
    fn gathers_can_repeat() {
        let group = ProcessGroup::new(3).unwrap();
        let results = group
            .run(|comm| {
                let first = comm.gather(vec![comm.rank() as u8], 0).unwrap();
                let second = comm.gather(vec![comm.rank() as u8 * 2], 0).unwrap();
                (first, second)
            })
            .unwrap();
        assert_eq!(results[0], (Some(vec![0, 1, 2]), Some(vec![0, 2, 4])));
    }

    #[test]
    fn single_member_gathers_to_itself() {
        let group = ProcessGroup::new(1).unwrap();
        let results = group.run(|comm| comm.gather(vec![7, 8, 9], 0).unwrap()).unwrap();
        assert_eq!(results, vec![Some(vec![7, 8, 9])]);
    }

    #[test]
    fn out_of_range_root_is_refused() {
        let group = ProcessGroup::new(1).unwrap();
        let results = group.run(|comm| comm.gather(vec![], 1).is_err()).unwrap();
        assert_eq!(results, vec![true]);
    }

    #[test]
    fn gather_fails_once_every_peer_has_left() {
        let group = ProcessGroup::new(3).unwrap();
        let results = group
            .run(|comm| match comm.rank() {
                0 => comm.gather(vec![0], 0).map(|_| ()),
                1 => {
                    comm.leave();
                    Ok(())
                }
                _ => Ok(()),
            })
            .unwrap();
        match &results[0] {
            Err(Error::Gather(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert!(results[1].is_ok() && results[2].is_ok());
    }

    #[test]
    fn empty_groups_are_refused() {
        assert!(ProcessGroup::new(0).is_err());
    }

    #[test]
    fn panicking_worker_is_reported() {
        let group = ProcessGroup::new(3).unwrap();
        let result = group.run(|comm| {
            if comm.rank() == 1 {
                panic!("worker fell over");
            }
            comm.rank()
        });
        match result {
            Err(Error::WorkerPanicked(1)) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}
