use lowpass_image::{Image, ImageSize};

use crate::block::RowBlock;
use crate::comm::{Communicator, Tag};
use crate::context::DistContext;
use crate::error::{CommError, DistError};
use crate::plan::PartitionPlan;

fn check_payload(src: usize, expected: usize, payload: &[u8]) -> Result<(), CommError> {
    if payload.len() != expected {
        return Err(CommError::PayloadSizeMismatch {
            src,
            expected,
            actual: payload.len(),
        });
    }
    Ok(())
}

/// Deliver to every participant the rows the plan assigns to it.
///
/// Collective: every participant of the group must call it. The root reads the rows from
/// `image`, which the other participants do not need and may leave as `None`. Every
/// participant, root included, returns its own copy of its rows.
///
/// # Errors
///
/// Fails if the root has no image, if the image does not have the planned shape, or if a
/// block cannot be delivered.
pub fn scatter<C: Communicator + ?Sized>(
    ctx: &DistContext<C>,
    image: Option<&Image<u8, 1>>,
    plan: &PartitionPlan,
) -> Result<RowBlock, DistError> {
    let width = plan.width();
    let own = *plan
        .part(ctx.rank())
        .ok_or(DistError::InvalidGroupSize(plan.num_participants()))?;

    if !ctx.is_root() {
        let data = ctx.comm().recv(ctx.root(), Tag::Scatter)?;
        check_payload(ctx.root(), own.rows * width, &data)?;
        return Ok(RowBlock::from_vec(own.rows, width, data)?);
    }

    let image = image.ok_or(DistError::MissingSource)?;
    if image.width() != width || image.height() != plan.total_rows() {
        return Err(DistError::PlanMismatch {
            rows: plan.total_rows(),
            width,
            actual_rows: image.height(),
            actual_width: image.width(),
        });
    }

    let data = image.as_slice();
    let mut own_block = None;
    for (rank, part) in plan.parts().iter().enumerate() {
        let chunk = data[part.offset * width..part.end() * width].to_vec();
        if rank == ctx.rank() {
            own_block = Some(RowBlock::from_vec(part.rows, width, chunk)?);
        } else {
            ctx.comm().send(rank, Tag::Scatter, chunk)?;
        }
    }

    log::debug!(
        "[rank {}] scattered {} rows to {} participants",
        ctx.rank(),
        plan.total_rows(),
        plan.num_participants()
    );

    own_block.ok_or(DistError::MissingOutput(ctx.rank()))
}

/// Collect the filtered blocks of every participant into one image at the root.
///
/// Collective: every participant of the group must call it. The root returns an image of
/// the planned size where each block sits at its planned rows; the other participants send
/// their block and return `None`.
pub fn gather<C: Communicator + ?Sized>(
    ctx: &DistContext<C>,
    block: RowBlock,
    plan: &PartitionPlan,
) -> Result<Option<Image<u8, 1>>, DistError> {
    let width = plan.width();
    let own = *plan
        .part(ctx.rank())
        .ok_or(DistError::InvalidGroupSize(plan.num_participants()))?;

    if block.rows() != own.rows || block.width() != width {
        return Err(DistError::PlanMismatch {
            rows: own.rows,
            width,
            actual_rows: block.rows(),
            actual_width: block.width(),
        });
    }

    if !ctx.is_root() {
        ctx.comm().send(ctx.root(), Tag::Gather, block.into_vec())?;
        return Ok(None);
    }

    let size = ImageSize {
        width,
        height: plan.total_rows(),
    };
    let mut output = Image::from_size_val(size, 0u8)?;

    let mut own_data = Some(block.into_vec());
    for (rank, part) in plan.parts().iter().enumerate() {
        let data = if rank == ctx.rank() {
            own_data.take().unwrap_or_default()
        } else {
            ctx.comm().recv(rank, Tag::Gather)?
        };
        check_payload(rank, part.rows * width, &data)?;
        output.as_slice_mut()[part.offset * width..part.end() * width].copy_from_slice(&data);
    }

    log::debug!(
        "[rank {}] gathered {} rows from {} participants",
        ctx.rank(),
        plan.total_rows(),
        plan.num_participants()
    );

    Ok(Some(output))
}
