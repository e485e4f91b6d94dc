use lowpass_image::ImageError;
use lowpass_imgproc::{filter::FilterError, parallel::ParallelError};

use crate::comm::Tag;

/// An error raised by the message passing layer.
///
/// Any communication error is fatal to the whole group.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum CommError {
    /// The peer rank is not part of the group.
    #[error("participant {0} is out of range for a group of {1}")]
    InvalidRank(usize, usize),

    /// The peer terminated before the message could be delivered.
    #[error("participant {0} disconnected")]
    Disconnected(usize),

    /// A message arrived out of protocol order.
    #[error("expected a {expected:?} message from participant {src}, got {actual:?}")]
    UnexpectedTag {
        /// The sending participant.
        src: usize,
        /// The tag the receiver was waiting for.
        expected: Tag,
        /// The tag of the message that arrived.
        actual: Tag,
    },

    /// A message does not carry the number of samples the plan assigns to it.
    #[error("expected {expected} samples from participant {src}, got {actual}")]
    PayloadSizeMismatch {
        /// The sending participant.
        src: usize,
        /// The number of samples given by the plan.
        expected: usize,
        /// The number of samples received.
        actual: usize,
    },
}

/// An error type for the distributed filter.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DistError {
    /// A group needs at least one participant.
    #[error("a group needs at least one participant, got {0}")]
    InvalidGroupSize(usize),

    /// The root identity is not part of the group.
    #[error("root {0} is out of range for a group of {1}")]
    InvalidRoot(usize, usize),

    /// The root was asked to distribute without a source image.
    #[error("the root participant has no image to distribute")]
    MissingSource,

    /// The root produced no output.
    #[error("participant {0} returned no output")]
    MissingOutput(usize),

    /// A buffer does not have the shape given by the partition plan.
    #[error("buffer of {actual_rows}x{actual_width} does not match the planned {rows}x{width}")]
    PlanMismatch {
        /// Planned number of rows.
        rows: usize,
        /// Planned width.
        width: usize,
        /// Actual number of rows.
        actual_rows: usize,
        /// Actual width.
        actual_width: usize,
    },

    /// A participant panicked while running.
    #[error("participant {0} panicked")]
    ParticipantPanicked(usize),

    /// Error raised by the message passing layer.
    #[error(transparent)]
    Comm(#[from] CommError),

    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error raised by a filter operation.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Error raised by the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}

impl DistError {
    /// Whether this error only reflects the failure of another participant.
    pub fn is_disconnect(&self) -> bool {
        matches!(self, DistError::Comm(CommError::Disconnected(_)))
    }
}
