//! Buffer executor: one full-image pass per operation.
//!
//! Each pass allocates a fresh destination buffer, so the source image is
//! never written to. Passes run strictly in order; inside a pass rows are
//! independent and are split across the rayon pool when
//! [`ExecutorOptions::runs_in_parallel`] allows it.

use log::trace;
use rayon::prelude::*;

use super::operation::{PixelOperation, SharedOperation};
use super::options::ExecutorOptions;
use crate::buffer::{allocate_pixels, PixelBuffer};
use crate::error::PipelineResult;

/// Run `operations` over `source`, returning the final buffer.
///
/// With no operations the result is a pixel-equal copy in new storage.
/// An allocation failure aborts the run; no partial result is returned.
pub fn execute(
    source: &PixelBuffer,
    operations: &[SharedOperation],
    options: &ExecutorOptions,
) -> PipelineResult<PixelBuffer> {
    let Some((first, rest)) = operations.split_first() else {
        options.check_pass_size(source.len())?;
        return source.try_clone();
    };

    let mut current = apply_pass(source, first.as_ref(), options)?;
    for operation in rest {
        current = apply_pass(&current, operation.as_ref(), options)?;
    }
    Ok(current)
}

/// Apply one operation to every pixel of `input`.
pub fn apply_pass(
    input: &PixelBuffer,
    operation: &dyn PixelOperation,
    options: &ExecutorOptions,
) -> PipelineResult<PixelBuffer> {
    let (width, height) = (input.width(), input.height());
    options.check_pass_size(input.len())?;
    let mut output = allocate_pixels(input.len())?;
    let parallel = options.runs_in_parallel(input.len());

    trace!(
        "apply_pass: {}x{} stages={} parallel={}",
        width,
        height,
        operation.stages(),
        parallel
    );

    let process_row = |(y, row): (usize, &mut [u32])| {
        for (dst, &src) in row.iter_mut().zip(input.row(y).iter()) {
            *dst = operation.apply(src);
        }
    };

    if parallel {
        output.par_chunks_mut(width).enumerate().for_each(process_row);
    } else {
        output.chunks_mut(width).enumerate().for_each(process_row);
    }

    PixelBuffer::new(width, height, output)
}
