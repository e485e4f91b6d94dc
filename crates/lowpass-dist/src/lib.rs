#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// removal of the padding border at the root.
pub mod assemble;

/// owned row buffers exchanged between participants.
pub mod block;

/// message passing between the participants of a group.
pub mod comm;

/// the identity of a participant within its group.
pub mod context;

/// box filtering of a row block with its halo rows.
pub mod convolve;

/// scatter and gather of row blocks.
pub mod distributor;

/// Error types for the distributed filter.
pub mod error;

/// exchange of boundary rows between vertical neighbors.
pub mod halo;

/// the end to end distributed filter.
pub mod pipeline;

/// row decomposition of an image among participants.
pub mod plan;

pub use crate::context::DistContext;
pub use crate::error::{CommError, DistError};
pub use crate::pipeline::{box_blur_distributed, process};
pub use crate::plan::PartitionPlan;
