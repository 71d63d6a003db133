//! WebAssembly exports for the filter pipeline.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Filters are
//! passed as a JSON array (see [`crate::filters::catalog`]). Errors are
//! returned as JavaScript strings instead of panicking.
//!
//! Execution is single-threaded here; the rayon pool is not available in a
//! plain wasm32 module.

use ndarray::ArrayView3;
use wasm_bindgen::prelude::*;

use crate::buffer::PixelBuffer;
use crate::error::PipelineError;
use crate::filters::catalog::{default_catalog, filters_from_json, filters_to_json};
use crate::pipeline::{run_pipeline_with, ExecutorOptions};

fn to_js_err(err: PipelineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

// ============================================================================
// Pipeline - packed pixels
// ============================================================================

/// Apply a JSON filter list to packed 0xAARRGGBB pixels.
///
/// # Arguments
/// * `data` - Row-major pixels (length = width * height)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `filters_json` - JSON array of filters
///
/// # Returns
/// Row-major result pixels of the same length
#[wasm_bindgen]
pub fn run_pipeline_wasm(
    data: &[u32],
    width: usize,
    height: usize,
    filters_json: &str,
) -> Result<Vec<u32>, JsValue> {
    let filters = filters_from_json(filters_json).map_err(to_js_err)?;
    let source = PixelBuffer::new(width, height, data.to_vec()).map_err(to_js_err)?;
    let result = run_pipeline_with(&source, &filters, &ExecutorOptions::sequential()).map_err(to_js_err)?;
    Ok(result.into_pixels())
}

// ============================================================================
// Pipeline - RGBA bytes
// ============================================================================

/// Apply a JSON filter list to RGBA bytes (e.g. canvas `ImageData`).
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `filters_json` - JSON array of filters
///
/// # Returns
/// Flat array of RGBA bytes, alpha always 255
#[wasm_bindgen]
pub fn run_pipeline_rgba_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    filters_json: &str,
) -> Result<Vec<u8>, JsValue> {
    let filters = filters_from_json(filters_json).map_err(to_js_err)?;
    let input = ArrayView3::from_shape((height, width, 4), data)
        .map_err(|_| to_js_err(PipelineError::dimension(width, height, data.len() / 4)))?;
    let source = PixelBuffer::from_rgba_u8(input).map_err(to_js_err)?;
    let result = run_pipeline_with(&source, &filters, &ExecutorOptions::sequential()).map_err(to_js_err)?;
    Ok(result.to_rgba_u8().into_raw_vec_and_offset().0)
}

/// The default filter catalog as a JSON array.
#[wasm_bindgen]
pub fn default_catalog_wasm() -> Result<String, JsValue> {
    filters_to_json(&default_catalog()).map_err(to_js_err)
}
