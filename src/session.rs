//! Editing session state for a host application.
//!
//! Holds the loaded image, the user's filter sequence and the image currently
//! on display. Processing can run inline with [`EditSession::apply_filters`]
//! or on a worker thread: [`EditSession::begin_apply`] snapshots everything
//! a run needs into an [`ApplyJob`], and [`EditSession::complete`] accepts the
//! outcome only if no newer job or image has superseded it.

use std::sync::Arc;

use log::{debug, warn};

use crate::buffer::PixelBuffer;
use crate::error::PipelineResult;
use crate::filters::catalog::Filter;
use crate::filters::sequence::FilterSequence;
use crate::pipeline::{run_pipeline_with, ExecutorOptions};
use crate::preview::downscale_to_fit;

/// Self-contained pipeline run, safe to move to another thread.
#[derive(Debug, Clone)]
pub struct ApplyJob {
    generation: u64,
    source: Arc<PixelBuffer>,
    filters: Vec<Filter>,
    options: ExecutorOptions,
}

impl ApplyJob {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Run the pipeline for this job.
    pub fn run(self) -> ApplyOutcome {
        let result = run_pipeline_with(&self.source, &self.filters, &self.options);
        ApplyOutcome {
            generation: self.generation,
            result,
        }
    }
}

/// Result of an [`ApplyJob`], tagged with the job's generation.
#[derive(Debug)]
pub struct ApplyOutcome {
    generation: u64,
    result: PipelineResult<PixelBuffer>,
}

impl ApplyOutcome {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Mutable editing state: source image, filter sequence, displayed image.
#[derive(Debug, Default)]
pub struct EditSession {
    options: ExecutorOptions,
    source: Option<Arc<PixelBuffer>>,
    current: Option<Arc<PixelBuffer>>,
    sequence: FilterSequence,
    generation: u64,
    pending: Option<u64>,
}

impl EditSession {
    pub fn new(options: ExecutorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the source image.
    ///
    /// Clears the filter sequence, shows the new image as-is and invalidates
    /// any job still running against the previous image.
    pub fn load_image(&mut self, image: PixelBuffer) {
        let image = Arc::new(image);
        self.sequence.clear();
        self.current = Some(Arc::clone(&image));
        self.source = Some(image);
        self.generation += 1;
        self.pending = None;
    }

    /// Append a filter to the sequence.
    pub fn select_filter(&mut self, filter: Filter) {
        self.sequence.push(filter);
    }

    /// Empty the filter sequence. The displayed image is left as is.
    pub fn reset_filters(&mut self) {
        self.sequence.clear();
    }

    pub fn filter_sequence(&self) -> &FilterSequence {
        &self.sequence
    }

    pub fn source_image(&self) -> Option<&PixelBuffer> {
        self.source.as_deref()
    }

    /// The image that should be on display.
    pub fn current_image(&self) -> Option<&PixelBuffer> {
        self.current.as_deref()
    }

    /// Whether a job has been started and not yet completed.
    pub fn is_processing(&self) -> bool {
        self.pending.is_some()
    }

    /// Snapshot a run of the current sequence over the source image.
    ///
    /// Returns `None` when no image is loaded. Starting a job supersedes any
    /// job started before it.
    pub fn begin_apply(&mut self) -> Option<ApplyJob> {
        let source = Arc::clone(self.source.as_ref()?);
        self.generation += 1;
        self.pending = Some(self.generation);
        debug!(
            "begin_apply: generation {} with {} filters",
            self.generation,
            self.sequence.len()
        );
        Some(ApplyJob {
            generation: self.generation,
            source,
            filters: self.sequence.as_slice().to_vec(),
            options: self.options.clone(),
        })
    }

    /// Accept a finished job.
    ///
    /// Returns `Ok(true)` when the result was displayed and `Ok(false)` when
    /// the outcome was stale and dropped. A failed run of the latest job keeps
    /// the previously displayed image and returns the error.
    pub fn complete(&mut self, outcome: ApplyOutcome) -> PipelineResult<bool> {
        if self.pending != Some(outcome.generation) {
            debug!(
                "complete: dropping stale generation {} (latest {})",
                outcome.generation, self.generation
            );
            return Ok(false);
        }
        self.pending = None;

        match outcome.result {
            Ok(image) => {
                self.current = Some(Arc::new(image));
                Ok(true)
            }
            Err(err) => {
                warn!("filter pipeline failed, keeping previous image: {}", err);
                Err(err)
            }
        }
    }

    /// Run the current sequence inline and display the result.
    ///
    /// Returns `Ok(None)` when no image is loaded.
    pub fn apply_filters(&mut self) -> PipelineResult<Option<&PixelBuffer>> {
        let Some(job) = self.begin_apply() else {
            return Ok(None);
        };
        self.complete(job.run())?;
        Ok(self.current_image())
    }

    /// Downscaled copy of the displayed image for a `max_side` viewport.
    pub fn preview(&self, max_side: usize) -> PipelineResult<Option<PixelBuffer>> {
        self.current
            .as_deref()
            .map(|image| downscale_to_fit(image, max_side))
            .transpose()
    }
}
