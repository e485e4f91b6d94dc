use lowpass_dist::{
    box_blur_distributed,
    comm::{run_local, Communicator},
    process, DistContext, DistError,
};
use lowpass_image::{Image, ImageSize};
use lowpass_imgproc::filter::{box_blur, kernels::KernelSize};
use rand::Rng;

fn random_image(width: usize, height: usize) -> Result<Image<u8, 1>, DistError> {
    let mut rng = rand::rng();
    let data = (0..width * height).map(|_| rng.random::<u8>()).collect();
    Ok(Image::new(ImageSize { width, height }, data)?)
}

fn reference(image: &Image<u8, 1>, kernel_size: KernelSize) -> Result<Image<u8, 1>, DistError> {
    let mut dst = Image::from_size_val(image.size(), 0u8)?;
    box_blur(image, &mut dst, kernel_size)?;
    Ok(dst)
}

#[test]
fn distributed_matches_single_process() -> Result<(), DistError> {
    let _ = env_logger::builder().is_test(true).try_init();

    let image = random_image(17, 11)?;
    for k in [1, 3, 5, 7] {
        let kernel_size = KernelSize::new(k)?;
        let expected = reference(&image, kernel_size)?;

        // up to more participants than padded rows
        for participants in 1..=20 {
            let filtered = box_blur_distributed(&image, kernel_size, participants, 0)?;
            assert_eq!(
                filtered, expected,
                "kernel {kernel_size} with {participants} participants"
            );
        }
    }
    Ok(())
}

#[test]
fn distributed_matches_row_by_row() -> Result<(), DistError> {
    let image = random_image(23, 19)?;
    let kernel_size = KernelSize::new(5)?;
    let single = box_blur_distributed(&image, kernel_size, 1, 0)?;

    for participants in [2, 3, 4, 7] {
        let filtered = box_blur_distributed(&image, kernel_size, participants, 0)?;
        for y in 0..image.height() {
            assert_eq!(
                filtered.row(y),
                single.row(y),
                "row {y} with {participants} participants"
            );
        }
    }
    Ok(())
}

#[test]
fn distributed_with_any_root() -> Result<(), DistError> {
    let image = random_image(8, 9)?;
    let kernel_size = KernelSize::new(3)?;
    let expected = reference(&image, kernel_size)?;

    for root in 0..5 {
        assert_eq!(box_blur_distributed(&image, kernel_size, 5, root)?, expected);
    }
    Ok(())
}

#[test]
fn zero_image_with_three_participants() -> Result<(), DistError> {
    let size = ImageSize {
        width: 6,
        height: 6,
    };
    let image = Image::<u8, 1>::from_size_val(size, 0)?;
    let filtered = box_blur_distributed(&image, KernelSize::new(3)?, 3, 0)?;
    assert_eq!(filtered.size(), size);
    assert!(filtered.as_slice().iter().all(|&v| v == 0));
    Ok(())
}

#[test]
fn identity_kernel() -> Result<(), DistError> {
    let image = random_image(10, 6)?;
    for participants in [1, 4, 9] {
        let filtered = box_blur_distributed(&image, KernelSize::new(1)?, participants, 0)?;
        assert_eq!(filtered, image);
    }
    Ok(())
}

#[test]
fn uniform_image_interior_is_unchanged() -> Result<(), DistError> {
    let size = ImageSize {
        width: 20,
        height: 18,
    };
    for value in [1u8, 3, 128, 200, 254, 255] {
        let image = Image::<u8, 1>::from_size_val(size, value)?;
        for k in (1..=15).step_by(2) {
            let kernel_size = KernelSize::new(k)?;
            let half = kernel_size.half();
            let filtered = box_blur_distributed(&image, kernel_size, 4, 0)?;
            for y in half..size.height - half {
                for x in half..size.width - half {
                    assert_eq!(
                        filtered.get_pixel(x, y, 0)?,
                        &value,
                        "({x}, {y}) with kernel {k} and value {value}"
                    );
                }
            }
        }
    }
    Ok(())
}

#[test]
fn process_rejects_invalid_root() {
    let result = run_local(2, |comm| {
        let ctx = DistContext::new(&comm, 5)?;
        Ok(ctx.rank())
    });
    assert_eq!(result, Err(DistError::InvalidRoot(5, 2)));
}

#[test]
fn failing_participant_aborts_group() -> Result<(), DistError> {
    let image = random_image(6, 6)?;
    let kernel_size = KernelSize::new(3)?;
    let result = run_local(3, |comm| {
        if comm.rank() == 2 {
            return Err(DistError::MissingSource);
        }
        let ctx = DistContext::new(&comm, 0)?;
        process(&ctx, &image, kernel_size)
    });
    assert_eq!(result, Err(DistError::MissingSource));
    Ok(())
}
