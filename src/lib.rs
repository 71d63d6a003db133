//! Color filter pipeline engine.
//!
//! Turns an ordered list of color filters into per-pixel operations, fuses
//! consecutive operations so the whole list costs as few image passes as
//! possible, and runs the result over an image buffer.
//!
//! ## Image Format
//! Buffers are `(height, width)` grids of packed `0xAARRGGBB` pixels
//! ([`PixelBuffer`]). RGBA u8 arrays of shape `(height, width, channels)`
//! convert in and out with [`PixelBuffer::from_rgba_u8`] and
//! [`PixelBuffer::to_rgba_u8`].
//!
//! ## Example
//! ```
//! use imageprocessor_rust::{run_pipeline, Channel, Filter, PixelBuffer};
//!
//! let image = PixelBuffer::filled(2, 2, 0xFFC8_0A0A).unwrap();
//! let result = run_pipeline(&image, &[Filter::increase(Channel::Red, 50)]).unwrap();
//! assert_eq!(result.get(0, 0), Some(0xFFFA_0A0A));
//! ```
//!
//! Python bindings are built with the `python` feature, WebAssembly exports
//! with the `wasm` feature.

pub mod error;
pub mod buffer;
pub mod filters;
pub mod pipeline;
pub mod preview;
pub mod session;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::PixelBuffer;
pub use error::{PipelineError, PipelineResult};
pub use filters::catalog::{default_catalog, filters_from_json, filters_to_json, Filter};
pub use filters::pixel::Channel;
pub use filters::sequence::FilterSequence;
pub use pipeline::{map_filter_to_operation, run_pipeline, run_pipeline_with, ExecutorOptions};
pub use session::EditSession;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyMemoryError, PyValueError};
    use pyo3::prelude::*;

    use crate::buffer::PixelBuffer;
    use crate::error::PipelineError;
    use crate::filters::catalog::{default_catalog, filters_from_json, filters_to_json};
    use crate::filters::pixel::{opaque_rgb, rgb_components};
    use crate::pipeline::run_pipeline;
    use crate::preview::fit_dimensions;

    fn to_py_err(err: PipelineError) -> PyErr {
        match err {
            PipelineError::AllocationFailure { .. } => PyMemoryError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    /// Apply a JSON filter list to an image.
    ///
    /// # Arguments
    /// * `image` - (H, W, C) u8 array with 1, 3 or 4 channels
    /// * `filters_json` - JSON array of filters, e.g. `[{"kind": "negative"}]`
    ///
    /// # Returns
    /// (H, W, 4) u8 RGBA array, alpha always 255
    #[pyfunction]
    pub fn run_pipeline_rgba<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        filters_json: &str,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let filters = filters_from_json(filters_json).map_err(to_py_err)?;
        let source = PixelBuffer::from_rgba_u8(image.as_array()).map_err(to_py_err)?;
        let result = run_pipeline(&source, &filters).map_err(to_py_err)?;
        Ok(result.to_rgba_u8().into_pyarray(py))
    }

    /// The default filter catalog as a JSON array.
    #[pyfunction]
    pub fn default_catalog_json() -> PyResult<String> {
        filters_to_json(&default_catalog()).map_err(to_py_err)
    }

    // ========================================================================
    // Pixel helpers
    // ========================================================================

    /// Pack r, g, b into an opaque 0xAARRGGBB value.
    #[pyfunction]
    pub fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
        opaque_rgb(r, g, b)
    }

    /// Unpack a 0xAARRGGBB value into (r, g, b).
    #[pyfunction]
    pub fn unpack_rgb(pixel: u32) -> (u8, u8, u8) {
        rgb_components(pixel)
    }

    /// Preview size for an image fitted inside a `max_side` square.
    #[pyfunction]
    pub fn preview_size(width: usize, height: usize, max_side: usize) -> (usize, usize) {
        fit_dimensions(width, height, max_side)
    }

    /// Image processor Rust extension module
    #[pymodule]
    pub fn imageprocessor_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(run_pipeline_rgba, m)?)?;
        m.add_function(wrap_pyfunction!(default_catalog_json, m)?)?;

        m.add_function(wrap_pyfunction!(pack_rgb, m)?)?;
        m.add_function(wrap_pyfunction!(unpack_rgb, m)?)?;
        m.add_function(wrap_pyfunction!(preview_size, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::imageprocessor_rust;
