use crate::block::RowBlock;
use crate::comm::{Communicator, Tag};
use crate::context::DistContext;
use crate::error::{CommError, DistError};

/// The rows bordering a participant's block, copied from its neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Halos {
    /// The rows right above the block, zero if the block is at the top of the image.
    pub above: RowBlock,
    /// The rows right below the block, zero if the block is at the bottom of the image.
    pub below: RowBlock,
}

fn recv_halo<C: Communicator + ?Sized>(
    ctx: &DistContext<C>,
    src: usize,
    tag: Tag,
    rows: usize,
    width: usize,
) -> Result<RowBlock, DistError> {
    let data = ctx.comm().recv(src, tag)?;
    if data.len() != rows * width {
        return Err(CommError::PayloadSizeMismatch {
            src,
            expected: rows * width,
            actual: data.len(),
        }
        .into());
    }
    Ok(RowBlock::from_vec(rows, width, data)?)
}

/// Exchange `half` boundary rows with the vertical neighbors.
///
/// Collective between neighbors: every participant of the group must call it after the
/// scatter. Each participant sends its first rows to the previous participant and its last
/// rows to the next one, and receives the matching rows from them. At the top and bottom of
/// the image the halo stays zero, like the padding border.
///
/// Every message carries exactly `half` rows, even when `half` is zero. A block shorter than
/// `half` cannot provide that many rows by itself: it completes them with the halo it received
/// from the other side and forwards the result, so the halos always hold the rows of the full
/// image right above and below the block.
///
/// Sends never wait. Rows travelling down are all exchanged before any participant waits for
/// rows travelling up, and a forwarded send only waits for the receive it depends on, so the
/// exchange cannot deadlock.
pub fn exchange_halos<C: Communicator + ?Sized>(
    ctx: &DistContext<C>,
    block: &RowBlock,
    half: usize,
) -> Result<Halos, DistError> {
    let width = block.width();
    let relays = block.rows() < half;

    if !relays {
        if let Some(next) = ctx.next() {
            ctx.comm()
                .send(next, Tag::HaloDown, block.last_rows(half).into_vec())?;
        }
        if let Some(prev) = ctx.prev() {
            ctx.comm()
                .send(prev, Tag::HaloUp, block.first_rows(half).into_vec())?;
        }
    }

    let above = match ctx.prev() {
        Some(prev) => recv_halo(ctx, prev, Tag::HaloDown, half, width)?,
        None => RowBlock::zeros(half, width),
    };
    if relays {
        if let Some(next) = ctx.next() {
            let rows = above.concat(block).last_rows(half);
            ctx.comm().send(next, Tag::HaloDown, rows.into_vec())?;
        }
    }

    let below = match ctx.next() {
        Some(next) => recv_halo(ctx, next, Tag::HaloUp, half, width)?,
        None => RowBlock::zeros(half, width),
    };
    if relays {
        if let Some(prev) = ctx.prev() {
            let rows = block.concat(&below).first_rows(half);
            ctx.comm().send(prev, Tag::HaloUp, rows.into_vec())?;
        }
    }

    log::trace!(
        "[rank {}] halo exchange done ({} rows, relayed: {})",
        ctx.rank(),
        half,
        relays
    );

    Ok(Halos { above, below })
}
