//! Point-to-point message passing between the participants of a group.
//!
//! A group is a fixed set of `size` participants identified by their rank in `[0, size)`.
//! Every participant runs the same program and only differs by its rank.

/// In-process backend running every participant on its own thread.
mod local;
pub use local::{run_local, ThreadComm};

use crate::error::CommError;

/// The kind of a message, checked by the receiver against the protocol step it is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// A row block sent from the root to its owner.
    Scatter,
    /// Halo rows travelling to the next (lower on screen, higher rank) participant.
    HaloDown,
    /// Halo rows travelling to the previous (higher on screen, lower rank) participant.
    HaloUp,
    /// A filtered row block sent from its owner to the root.
    Gather,
}

/// A handle on a group of participants.
///
/// Messages between an ordered pair of participants are delivered in the order they were
/// sent. Payloads are moved into the message: the receiver gets its own copy of the data and
/// never aliases the sender's buffers.
pub trait Communicator {
    /// The rank of this participant.
    fn rank(&self) -> usize;

    /// The number of participants in the group.
    fn size(&self) -> usize;

    /// Post a message to `dst`.
    ///
    /// Never waits for the receiver, so two participants can send to each other before
    /// either of them receives.
    fn send(&self, dst: usize, tag: Tag, payload: Vec<u8>) -> Result<(), CommError>;

    /// Wait for the next message from `src`.
    ///
    /// Fails if the message carries a different tag or if `src` terminated without sending.
    fn recv(&self, src: usize, tag: Tag) -> Result<Vec<u8>, CommError>;
}
