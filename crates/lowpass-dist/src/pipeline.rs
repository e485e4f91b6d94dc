use lowpass_image::Image;
use lowpass_imgproc::{filter::kernels::KernelSize, padding::zero_padding, padding::Padding2D};

use crate::assemble::assemble;
use crate::comm::{run_local, Communicator};
use crate::context::DistContext;
use crate::convolve::convolve_block;
use crate::distributor::{gather, scatter};
use crate::error::DistError;
use crate::halo::exchange_halos;
use crate::plan::PartitionPlan;

/// Box filter an image cooperatively across the participants of a group.
///
/// Collective: every participant of the group calls it with the same image and kernel size.
/// The root pads the image and scatters its rows, the participants exchange halo rows and
/// filter their own rows, and the root gathers the filtered rows and crops the padding.
/// Only the root reads the samples of `image`; the other participants use its size to build
/// the same partition plan.
///
/// # Arguments
///
/// * `ctx` - The participant's identity within its group.
/// * `image` - The source image.
/// * `kernel_size` - The size of the box kernel.
///
/// # Returns
///
/// The filtered image, with the size of the source, at the root, and `None` elsewhere. The
/// result is identical to the single process [`lowpass_imgproc::filter::box_blur`] for any
/// number of participants.
///
/// # Errors
///
/// Any failure is fatal to the whole group: a participant that returns an error stops
/// answering its peers, which then fail too.
pub fn process<C: Communicator + ?Sized>(
    ctx: &DistContext<C>,
    image: &Image<u8, 1>,
    kernel_size: KernelSize,
) -> Result<Option<Image<u8, 1>>, DistError> {
    let half = kernel_size.half();
    let padded_size = Padding2D::uniform(half).padded_size(image.size());
    let plan = PartitionPlan::new(padded_size.height, padded_size.width, ctx.size())?;

    let padded = if ctx.is_root() {
        Some(zero_padding(image, half)?)
    } else {
        None
    };

    let block = scatter(ctx, padded.as_ref(), &plan)?;
    drop(padded);

    let halos = exchange_halos(ctx, &block, half)?;
    let filtered = convolve_block(&block, &halos, kernel_size)?;

    log::debug!(
        "[rank {}] filtered {} rows with a {} kernel",
        ctx.rank(),
        filtered.rows(),
        kernel_size
    );

    match gather(ctx, filtered, &plan)? {
        Some(gathered) => Ok(Some(assemble(&gathered, image.size(), half)?)),
        None => Ok(None),
    }
}

/// Box filter an image with a group of `participants` threads of the current process.
///
/// Launches the group with [`run_local`], runs [`process`] on every participant and returns
/// the image assembled by `root`.
///
/// # Example
///
/// ```
/// use lowpass_dist::box_blur_distributed;
/// use lowpass_image::{Image, ImageSize};
/// use lowpass_imgproc::filter::kernels::KernelSize;
///
/// let size = ImageSize { width: 6, height: 6 };
/// let image = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// let filtered = box_blur_distributed(&image, KernelSize::new(3).unwrap(), 3, 0).unwrap();
/// assert_eq!(filtered, image);
/// ```
pub fn box_blur_distributed(
    image: &Image<u8, 1>,
    kernel_size: KernelSize,
    participants: usize,
    root: usize,
) -> Result<Image<u8, 1>, DistError> {
    if participants == 0 {
        return Err(DistError::InvalidGroupSize(participants));
    }
    if root >= participants {
        return Err(DistError::InvalidRoot(root, participants));
    }

    let outputs = run_local(participants, |comm| {
        let ctx = DistContext::new(&comm, root)?;
        process(&ctx, image, kernel_size)
    })?;

    outputs
        .into_iter()
        .nth(root)
        .flatten()
        .ok_or(DistError::MissingOutput(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comm::ThreadComm;
    use lowpass_image::ImageSize;

    #[test]
    fn test_process_single_participant() -> Result<(), DistError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![0, 0, 0, 0, 9, 0, 0, 0, 0],
        )?;
        let world = ThreadComm::world(1);
        let ctx = DistContext::new(&world[0], 0)?;
        let filtered = process(&ctx, &image, KernelSize::new(3)?)?;
        assert_eq!(filtered.map(Image::into_vec), Some(vec![1; 9]));
        Ok(())
    }

    #[test]
    fn test_process_output_only_at_root() -> Result<(), DistError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 5,
                height: 4,
            },
            7,
        )?;
        let outputs = run_local(3, |comm| {
            let ctx = DistContext::new(&comm, 1)?;
            process(&ctx, &image, KernelSize::new(1)?)
        })?;
        assert!(outputs[0].is_none());
        assert_eq!(outputs[1].as_ref(), Some(&image));
        assert!(outputs[2].is_none());
        Ok(())
    }

    #[test]
    fn test_box_blur_distributed_invalid_group() -> Result<(), DistError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        let kernel_size = KernelSize::new(3)?;
        assert_eq!(
            box_blur_distributed(&image, kernel_size, 0, 0),
            Err(DistError::InvalidGroupSize(0))
        );
        assert_eq!(
            box_blur_distributed(&image, kernel_size, 2, 2),
            Err(DistError::InvalidRoot(2, 2))
        );
        Ok(())
    }
}
