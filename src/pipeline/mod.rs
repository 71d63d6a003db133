//! The filter pipeline: map filters to operations, fuse, execute.
//!
//! ## Data Flow
//!
//! ```text
//! &[Filter] --map--> Vec<SharedOperation> --optimize--> passes --execute--> PixelBuffer
//! ```
//!
//! The pipeline keeps no state between calls. Callers that run it off their
//! interactive thread only need to move the source buffer and the filter
//! list; the result is a new buffer.

pub mod operation;
pub mod optimizer;
pub mod executor;
pub mod options;

use std::sync::Arc;

use log::debug;

use crate::buffer::PixelBuffer;
use crate::error::PipelineResult;
use crate::filters::catalog::Filter;

pub use executor::{apply_pass, execute};
pub use operation::{fuse, ColorOperation, Fused, PixelOperation, SharedOperation};
pub use optimizer::optimize;
pub use options::ExecutorOptions;

/// The pixel operation a filter stands for.
pub fn map_filter_to_operation(filter: &Filter) -> SharedOperation {
    Arc::new(filter.operation())
}

/// Apply `filters` in order to `source` with default options.
pub fn run_pipeline(source: &PixelBuffer, filters: &[Filter]) -> PipelineResult<PixelBuffer> {
    run_pipeline_with(source, filters, &ExecutorOptions::default())
}

/// Apply `filters` in order to `source`.
///
/// `source` is only read; the returned buffer has the same dimensions.
pub fn run_pipeline_with(
    source: &PixelBuffer,
    filters: &[Filter],
    options: &ExecutorOptions,
) -> PipelineResult<PixelBuffer> {
    let operations: Vec<SharedOperation> = filters.iter().map(map_filter_to_operation).collect();
    let passes = if options.optimize {
        optimize(operations)
    } else {
        operations
    };

    debug!(
        "run_pipeline: {}x{} image, {} filters in {} passes",
        source.width(),
        source.height(),
        filters.len(),
        passes.len()
    );

    execute(source, &passes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::catalog::default_catalog;
    use crate::filters::pixel::{opaque_rgb, Channel};

    fn sample_image() -> PixelBuffer {
        let pixels = (0..64u32)
            .map(|i| opaque_rgb((i * 4) as u8, (255 - i * 3) as u8, (i * 7 % 256) as u8))
            .collect();
        PixelBuffer::new(8, 8, pixels).unwrap()
    }

    #[test]
    fn test_mapping_is_deterministic() {
        for filter in default_catalog() {
            let a = map_filter_to_operation(&filter);
            let b = map_filter_to_operation(&filter);
            for r in (0..=255u32).step_by(17) {
                for g in (0..=255u32).step_by(17) {
                    for b_val in (0..=255u32).step_by(17) {
                        let p = opaque_rgb(r as u8, g as u8, b_val as u8);
                        assert_eq!(a.apply(p), b.apply(p), "{:?}", filter);
                    }
                }
            }
        }
    }

    #[test]
    fn test_fused_and_unfused_agree() {
        let source = sample_image();
        let filters = [
            Filter::increase(Channel::Red, 50),
            Filter::Negative,
            Filter::leave_alone(Channel::Blue),
            Filter::decrease(Channel::Green, 50),
            Filter::HardBlackAndWhite,
        ];
        let unfused = ExecutorOptions {
            optimize: false,
            ..ExecutorOptions::sequential()
        };

        let fused = run_pipeline(&source, &filters).unwrap();
        let stepwise = run_pipeline_with(&source, &filters, &unfused).unwrap();
        assert_eq!(fused, stepwise);
    }

    #[test]
    fn test_empty_filter_list() {
        let source = sample_image();
        let result = run_pipeline(&source, &[]).unwrap();
        assert_eq!(result, source);
    }
}
