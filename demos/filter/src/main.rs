use argh::FromArgs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use lowpass::dist::box_blur_distributed;
use lowpass::image::Image;
use lowpass::imgproc::filter::{box_blur, box_blur_with, kernels::KernelSize};
use lowpass::imgproc::metrics;
use lowpass::imgproc::parallel::ExecutionStrategy;
use lowpass::io::functional as F;

/// The filter implementations to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Sequential,
    Threads,
    Distributed,
    All,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sequential" => Ok(Method::Sequential),
            "threads" => Ok(Method::Threads),
            "distributed" => Ok(Method::Distributed),
            "all" => Ok(Method::All),
            _ => Err(format!(
                "unknown method `{s}`, expected sequential, threads, distributed or all"
            )),
        }
    }
}

#[derive(FromArgs)]
/// Apply a box low-pass filter to a grayscale image
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// the side length of the box kernel, a positive odd number
    #[argh(option, short = 'k', default = "3")]
    kernel_size: usize,

    /// the number of threads or participants
    #[argh(option, short = 'w', default = "4")]
    workers: usize,

    /// the filter to run: sequential, threads, distributed or all
    #[argh(option, short = 'm', default = "Method::All")]
    method: Method,

    /// directory where the filtered images are written
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,
}

struct Filtered {
    name: &'static str,
    file_name: &'static str,
    image: Image<u8, 1>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    // validate the configuration before reading anything
    let kernel_size = KernelSize::new(args.kernel_size)?;
    if args.workers == 0 {
        return Err("the number of workers must be positive".into());
    }

    // read the image
    let image = F::read_image_mono8(&args.image_path)?;
    log::info!(
        "Filtering a {}x{} image with a {} kernel",
        image.width(),
        image.height(),
        kernel_size
    );

    let mut results = Vec::new();

    if matches!(args.method, Method::Sequential | Method::All) {
        let now = std::time::Instant::now();
        let mut filtered = Image::from_size_val(image.size(), 0u8)?;
        box_blur(&image, &mut filtered, kernel_size)?;
        log::info!("Sequential filter took {:?}", now.elapsed());
        results.push(Filtered {
            name: "sequential",
            file_name: "seqImage.png",
            image: filtered,
        });
    }

    if matches!(args.method, Method::Threads | Method::All) {
        let now = std::time::Instant::now();
        let mut filtered = Image::from_size_val(image.size(), 0u8)?;
        box_blur_with(
            &image,
            &mut filtered,
            kernel_size,
            ExecutionStrategy::Fixed(args.workers),
        )?;
        log::info!(
            "Multi-threaded filter with {} threads took {:?}",
            args.workers,
            now.elapsed()
        );
        results.push(Filtered {
            name: "threads",
            file_name: "threadsImage.png",
            image: filtered,
        });
    }

    if matches!(args.method, Method::Distributed | Method::All) {
        let now = std::time::Instant::now();
        let filtered = box_blur_distributed(&image, kernel_size, args.workers, 0)?;
        log::info!(
            "Distributed filter with {} participants took {:?}",
            args.workers,
            now.elapsed()
        );
        results.push(Filtered {
            name: "distributed",
            file_name: "distImage.png",
            image: filtered,
        });
    }

    // compare every pair of results
    for (i, a) in results.iter().enumerate() {
        for b in results.iter().skip(i + 1) {
            let mse = metrics::mse(&a.image, &b.image)?;
            if mse == 0.0 {
                log::info!("{} and {} images are the same", a.name, b.name);
            } else {
                let psnr = metrics::psnr(&a.image, &b.image, 255.0)?;
                log::info!(
                    "{} and {} images are different (MSE = {}, PSNR = {:.2} dB)",
                    a.name,
                    b.name,
                    mse,
                    psnr
                );
            }
        }
    }

    if let Some(output_dir) = args.output_dir {
        write_outputs(&output_dir, &results)?;
    }

    Ok(())
}

/// Write every filtered image, and the absolute difference of every pair as `diff_<a>_<b>.png`.
fn write_outputs(output_dir: &Path, results: &[Filtered]) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(output_dir)?;
    for result in results.iter() {
        let file_path = output_dir.join(result.file_name);
        F::write_image_mono8(&file_path, &result.image)?;
        log::info!("Wrote {}", file_path.display());
    }

    for (i, a) in results.iter().enumerate() {
        for b in results.iter().skip(i + 1) {
            let mut diff = Image::from_size_val(a.image.size(), 0u8)?;
            metrics::abs_diff(&a.image, &b.image, &mut diff)?;

            let file_path = output_dir.join(format!("diff_{}_{}.png", a.name, b.name));
            F::write_image_mono8(&file_path, &diff)?;
            log::info!("Wrote {}", file_path.display());
        }
    }

    Ok(())
}
