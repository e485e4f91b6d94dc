use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride must be valid for a non empty buffer.
    #[error("row stride must be > 0 for a non empty buffer")]
    InvalidRowStride(usize),
}

/// Controls how row-wise operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// Apply a function to every row of a row-major buffer with the given strategy.
///
/// The function receives the row index and the mutable row.
///
/// # Arguments
///
/// * `dst` - The buffer to process, `row_stride` samples per row.
/// * `row_stride` - The number of samples in a row (width * channels).
/// * `strategy` - The execution strategy.
/// * `op` - The operation applied to each row.
///
/// # Example
///
/// ```
/// use lowpass_imgproc::parallel::{for_each_row, ExecutionStrategy};
///
/// let mut buf = vec![0u8; 6];
/// for_each_row(&mut buf, 3, ExecutionStrategy::Serial, |y, row| row.fill(y as u8)).unwrap();
/// assert_eq!(buf, vec![0, 0, 0, 1, 1, 1]);
/// ```
pub fn for_each_row<T, F>(
    dst: &mut [T],
    row_stride: usize,
    strategy: ExecutionStrategy,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if row_stride == 0 {
        if dst.is_empty() {
            return Ok(());
        }
        return Err(ParallelError::InvalidRowStride(row_stride));
    }

    match strategy {
        ExecutionStrategy::Serial => {
            dst.chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| op(y, row));
        }
        ExecutionStrategy::ParallelRows => {
            dst.par_chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(y, row)| op(y, row));
        }
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n));
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| {
                dst.par_chunks_exact_mut(row_stride)
                    .enumerate()
                    .for_each(|(y, row)| op(y, row));
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_rows(strategy: ExecutionStrategy) -> Result<Vec<usize>, ParallelError> {
        let mut dst = vec![0; 8];
        for_each_row(&mut dst, 2, strategy, |y, row| {
            row.iter_mut().for_each(|v| *v = y * 10)
        })?;
        Ok(dst)
    }

    #[test]
    fn test_execute_serial() -> Result<(), ParallelError> {
        assert_eq!(
            fill_rows(ExecutionStrategy::Serial)?,
            vec![0, 0, 10, 10, 20, 20, 30, 30]
        );
        Ok(())
    }

    #[test]
    fn test_execute_parallel_rows() -> Result<(), ParallelError> {
        assert_eq!(
            fill_rows(ExecutionStrategy::ParallelRows)?,
            vec![0, 0, 10, 10, 20, 20, 30, 30]
        );
        Ok(())
    }

    #[test]
    fn test_execute_fixed_success() -> Result<(), ParallelError> {
        assert_eq!(
            fill_rows(ExecutionStrategy::Fixed(2))?,
            vec![0, 0, 10, 10, 20, 20, 30, 30]
        );
        Ok(())
    }

    #[test]
    fn test_execute_fixed_error() {
        assert_eq!(
            fill_rows(ExecutionStrategy::Fixed(0)),
            Err(ParallelError::InvalidThreadCount(0))
        );
    }

    #[test]
    fn test_zero_stride() {
        let mut empty: Vec<u8> = vec![];
        assert_eq!(
            for_each_row(&mut empty, 0, ExecutionStrategy::Serial, |_, _| {}),
            Ok(())
        );
        let mut buf = vec![1u8];
        assert_eq!(
            for_each_row(&mut buf, 0, ExecutionStrategy::Serial, |_, _| {}),
            Err(ParallelError::InvalidRowStride(0))
        );
    }
}
