//! Pass fusion.
//!
//! Every entry the executor receives costs one full traversal of the image.
//! Consecutive operations that can be fused are collapsed so a run of `n`
//! pointwise filters costs a single traversal instead of `n`.

use std::sync::Arc;

use log::debug;

use super::operation::{fuse, SharedOperation};

/// Collapse consecutive fusible operations, preserving order.
///
/// Greedy left-to-right walk: when the last kept entry can fuse with the
/// next operation, it is replaced by their composition; otherwise the
/// operation starts a new entry. Empty input gives empty output.
pub fn optimize(operations: Vec<SharedOperation>) -> Vec<SharedOperation> {
    let input_len = operations.len();
    let mut passes: Vec<SharedOperation> = Vec::with_capacity(input_len.min(1));

    for operation in operations {
        match passes.last_mut() {
            Some(last) if last.can_fuse_with(operation.as_ref()) => {
                *last = fuse(Arc::clone(last), operation);
            }
            _ => passes.push(operation),
        }
    }

    debug!("optimize: {} operations -> {} passes", input_len, passes.len());
    passes
}
