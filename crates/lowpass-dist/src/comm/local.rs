use crossbeam_channel::{unbounded, Receiver, Sender};

use super::{Communicator, Tag};
use crate::error::{CommError, DistError};

struct Message {
    tag: Tag,
    payload: Vec<u8>,
}

/// A participant of a group whose members are threads of the current process.
///
/// The group is a full mesh of unbounded channels, one per ordered pair of participants.
/// When a participant is dropped its sending ends close, and every peer waiting on it fails
/// with [`CommError::Disconnected`] instead of blocking forever.
pub struct ThreadComm {
    rank: usize,
    // indexed by destination rank
    senders: Vec<Sender<Message>>,
    // indexed by source rank
    receivers: Vec<Receiver<Message>>,
}

impl ThreadComm {
    /// Create the handles of a group of `size` participants, in rank order.
    ///
    /// # Example
    ///
    /// ```
    /// use lowpass_dist::comm::{Communicator, Tag, ThreadComm};
    ///
    /// let world = ThreadComm::world(2);
    /// world[0].send(1, Tag::Scatter, vec![1, 2, 3]).unwrap();
    /// assert_eq!(world[1].recv(0, Tag::Scatter).unwrap(), vec![1, 2, 3]);
    /// ```
    pub fn world(size: usize) -> Vec<ThreadComm> {
        let mut senders = (0..size)
            .map(|_| Vec::with_capacity(size))
            .collect::<Vec<Vec<_>>>();
        let mut receivers = (0..size)
            .map(|_| Vec::with_capacity(size))
            .collect::<Vec<Vec<_>>>();

        for src_senders in senders.iter_mut() {
            for dst_receivers in receivers.iter_mut() {
                let (tx, rx) = unbounded();
                src_senders.push(tx);
                dst_receivers.push(rx);
            }
        }

        senders
            .into_iter()
            .zip(receivers)
            .enumerate()
            .map(|(rank, (senders, receivers))| ThreadComm {
                rank,
                senders,
                receivers,
            })
            .collect()
    }

    fn check_rank(&self, rank: usize) -> Result<(), CommError> {
        if rank >= self.size() {
            return Err(CommError::InvalidRank(rank, self.size()));
        }
        Ok(())
    }
}

impl Communicator for ThreadComm {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.senders.len()
    }

    fn send(&self, dst: usize, tag: Tag, payload: Vec<u8>) -> Result<(), CommError> {
        self.check_rank(dst)?;
        log::trace!(
            "[rank {}] send {:?} to {} ({} bytes)",
            self.rank,
            tag,
            dst,
            payload.len()
        );
        self.senders[dst]
            .send(Message { tag, payload })
            .map_err(|_| CommError::Disconnected(dst))
    }

    fn recv(&self, src: usize, tag: Tag) -> Result<Vec<u8>, CommError> {
        self.check_rank(src)?;
        let message = self.receivers[src]
            .recv()
            .map_err(|_| CommError::Disconnected(src))?;
        if message.tag != tag {
            return Err(CommError::UnexpectedTag {
                src,
                expected: tag,
                actual: message.tag,
            });
        }
        log::trace!(
            "[rank {}] recv {:?} from {} ({} bytes)",
            self.rank,
            tag,
            src,
            message.payload.len()
        );
        Ok(message.payload)
    }
}

/// Run `f` once per participant of a group of `size`, each on its own thread.
///
/// Returns the results in rank order. If any participant fails the whole run fails: the
/// reported error is the first one that is not merely a consequence of a peer going away.
///
/// # Example
///
/// ```
/// use lowpass_dist::comm::{run_local, Communicator};
///
/// let ranks = run_local(3, |comm| Ok(comm.rank())).unwrap();
/// assert_eq!(ranks, vec![0, 1, 2]);
/// ```
pub fn run_local<R, F>(size: usize, f: F) -> Result<Vec<R>, DistError>
where
    R: Send,
    F: Fn(ThreadComm) -> Result<R, DistError> + Sync,
{
    if size == 0 {
        return Err(DistError::InvalidGroupSize(size));
    }

    let f = &f;
    std::thread::scope(|s| {
        let handles = ThreadComm::world(size)
            .into_iter()
            .map(|comm| s.spawn(move || f(comm)))
            .collect::<Vec<_>>();

        let mut results = Vec::with_capacity(size);
        let mut errors = Vec::new();
        for (rank, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Ok(result)) => results.push(result),
                Ok(Err(err)) => {
                    log::error!("participant {} failed: {}", rank, err);
                    errors.push(err);
                }
                Err(_) => {
                    log::error!("participant {} panicked", rank);
                    errors.push(DistError::ParticipantPanicked(rank));
                }
            }
        }

        match errors.iter().position(|e| !e.is_disconnect()) {
            Some(idx) => Err(errors.swap_remove(idx)),
            None => match errors.into_iter().next() {
                Some(err) => Err(err),
                None => Ok(results),
            },
        }
    })
}
