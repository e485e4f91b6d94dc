use crate::comm::Communicator;
use crate::error::DistError;

/// The identity of a participant within its group.
///
/// Carries the communicator together with the group size, the participant's own rank and the
/// rank of the root that distributes the input and assembles the output. Every core operation
/// takes it explicitly.
pub struct DistContext<'a, C: Communicator + ?Sized> {
    comm: &'a C,
    root: usize,
}

impl<'a, C: Communicator + ?Sized> DistContext<'a, C> {
    /// Create a context, checking that `root` belongs to the group.
    pub fn new(comm: &'a C, root: usize) -> Result<Self, DistError> {
        if comm.size() == 0 {
            return Err(DistError::InvalidGroupSize(0));
        }
        if root >= comm.size() {
            return Err(DistError::InvalidRoot(root, comm.size()));
        }
        Ok(Self { comm, root })
    }

    /// The underlying communicator.
    pub fn comm(&self) -> &C {
        self.comm
    }

    /// The rank of this participant.
    pub fn rank(&self) -> usize {
        self.comm.rank()
    }

    /// The number of participants.
    pub fn size(&self) -> usize {
        self.comm.size()
    }

    /// The rank of the root participant.
    pub fn root(&self) -> usize {
        self.root
    }

    /// Whether this participant is the root.
    pub fn is_root(&self) -> bool {
        self.rank() == self.root
    }

    /// The participant owning the rows right above ours, if any.
    pub fn prev(&self) -> Option<usize> {
        self.rank().checked_sub(1)
    }

    /// The participant owning the rows right below ours, if any.
    pub fn next(&self) -> Option<usize> {
        let next = self.rank() + 1;
        (next < self.size()).then_some(next)
    }
}
