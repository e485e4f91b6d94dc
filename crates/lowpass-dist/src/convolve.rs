use lowpass_imgproc::{
    filter::kernels::{box_response, box_weight, KernelSize},
    parallel::{for_each_row, ExecutionStrategy},
};

use crate::block::RowBlock;
use crate::error::DistError;
use crate::halo::Halos;

/// Box filter a block of padded rows using the halo rows of its neighbors.
///
/// For output row `i` the kernel row at `i + k`, `k` in `[-half, half]`, is read from the
/// block when it lies inside it, from the above halo when it lies before the first row and
/// from the below halo when it lies after the last row. The columns of the left and right
/// padding border are not computed and stay zero.
///
/// Runs without any communication. Every pixel uses the same arithmetic as the single
/// process filter, so the result matches it bit for bit.
///
/// # Errors
///
/// Fails if the halos do not hold `half` rows of the block width.
pub fn convolve_block(
    block: &RowBlock,
    halos: &Halos,
    kernel_size: KernelSize,
) -> Result<RowBlock, DistError> {
    let half = kernel_size.half();
    let width = block.width();
    let local_rows = block.rows();

    for halo in [&halos.above, &halos.below] {
        if halo.rows() != half || halo.width() != width {
            return Err(DistError::PlanMismatch {
                rows: half,
                width,
                actual_rows: halo.rows(),
                actual_width: halo.width(),
            });
        }
    }

    let mut output = RowBlock::zeros(local_rows, width);
    if width < kernel_size.get() {
        return Ok(output);
    }

    let weight = box_weight(kernel_size);

    for_each_row(
        output.as_slice_mut(),
        width,
        ExecutionStrategy::ParallelRows,
        |i, out_row| {
            let center = i as isize;
            let rows = (center - half as isize..=center + half as isize)
                .map(|y| source_row(block, halos, half, y))
                .collect::<Vec<_>>();

            for (x, out) in out_row
                .iter_mut()
                .enumerate()
                .take(width - half)
                .skip(half)
            {
                *out = box_response(&rows, x, half, weight);
            }
        },
    )?;

    Ok(output)
}

/// Selects the row at local index `y`, which may fall up to `half` rows outside the block.
fn source_row<'a>(block: &'a RowBlock, halos: &'a Halos, half: usize, y: isize) -> &'a [u8] {
    if y < 0 {
        // y + half lies in [0, half)
        halos.above.row((y + half as isize) as usize)
    } else if (y as usize) < block.rows() {
        block.row(y as usize)
    } else {
        halos.below.row(y as usize - block.rows())
    }
}
