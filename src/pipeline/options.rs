//! Executor configuration.
//!
//! Every field has a default, so a partial JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// Tuning knobs for pipeline execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorOptions {
    /// Split each pass across the rayon thread pool.
    pub parallel: bool,
    /// Buffers with fewer pixels than this run single-threaded.
    pub min_parallel_pixels: usize,
    /// Fuse consecutive pointwise operations before executing.
    ///
    /// With fusion off every filter costs one full pass.
    pub optimize: bool,
    /// Largest destination buffer a pass may allocate, in pixels.
    ///
    /// Larger passes fail with [`PipelineError::AllocationFailure`] before
    /// anything is allocated. `None` leaves the limit to the allocator.
    pub max_pass_pixels: Option<usize>,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self {
            parallel: cfg!(not(target_arch = "wasm32")),
            min_parallel_pixels: 16_384,
            optimize: true,
            max_pass_pixels: None,
        }
    }
}

impl ExecutorOptions {
    /// Single-threaded execution, fusion on.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    pub(crate) fn runs_in_parallel(&self, pixels: usize) -> bool {
        self.parallel && pixels >= self.min_parallel_pixels
    }

    /// Reject a pass over `pixels` that exceeds `max_pass_pixels`.
    pub(crate) fn check_pass_size(&self, pixels: usize) -> PipelineResult<()> {
        match self.max_pass_pixels {
            Some(max) if pixels > max => Err(PipelineError::AllocationFailure { pixels }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let options: ExecutorOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, ExecutorOptions::default());
        assert!(options.optimize);
        assert_eq!(options.min_parallel_pixels, 16_384);
        assert_eq!(options.max_pass_pixels, None);
    }

    #[test]
    fn test_partial_json_override() {
        let options: ExecutorOptions = serde_json::from_str(r#"{"optimize": false}"#).unwrap();
        assert!(!options.optimize);
        assert_eq!(options.min_parallel_pixels, 16_384);
    }

    #[test]
    fn test_parallel_threshold() {
        let options = ExecutorOptions {
            parallel: true,
            min_parallel_pixels: 100,
            ..ExecutorOptions::default()
        };
        assert!(!options.runs_in_parallel(99));
        assert!(options.runs_in_parallel(100));
        assert!(!ExecutorOptions::sequential().runs_in_parallel(usize::MAX));
    }

    #[test]
    fn test_pass_size_limit() {
        let options: ExecutorOptions = serde_json::from_str(r#"{"max_pass_pixels": 64}"#).unwrap();
        assert!(options.check_pass_size(64).is_ok());
        assert!(matches!(
            options.check_pass_size(65),
            Err(PipelineError::AllocationFailure { pixels: 65 })
        ));
        assert!(ExecutorOptions::default().check_pass_size(usize::MAX).is_ok());
    }
}
