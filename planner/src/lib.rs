pub mod blocks;
pub mod error;
pub mod frame;
pub mod io;
pub mod order;
pub mod passes;
pub mod sanitizer;
pub mod transform;

pub use error::PlanError;

use grbl::{Sequence, Settings};

/// Normalize a whole program: extract its blocks, sanitize each into
/// travel-plunge-path shape, order them per `Settings::sort_blocks`, and
/// assemble a fresh program with header, per-block evacuations and footer.
///
/// The input sequence is never mutated; the result is built entirely from
/// sanitized clones and synthesized framing.
pub fn sanitize(sequence: &Sequence, settings: &Settings) -> Result<Sequence, PlanError> {
    assemble_with(sequence, settings, settings.sort_blocks, false)
}

/// [`sanitize`] with nearest-neighbor ordering regardless of settings.
pub fn reorder_and_sanitize(
    sequence: &Sequence,
    settings: &Settings,
) -> Result<Sequence, PlanError> {
    assemble_with(sequence, settings, true, false)
}

/// [`sanitize`] visiting the blocks in reverse extraction order.
pub fn sanitize_reversed(
    sequence: &Sequence,
    settings: &Settings,
) -> Result<Sequence, PlanError> {
    assemble_with(sequence, settings, false, true)
}

fn assemble_with(
    sequence: &Sequence,
    settings: &Settings,
    sort: bool,
    reverse: bool,
) -> Result<Sequence, PlanError> {
    let mut list = blocks::extract_blocks(sequence);
    if list.is_empty() {
        return Err(PlanError::NoBlocks);
    }
    for block in &mut list {
        sanitizer::sanitize_block(block, settings)?;
    }
    if sort {
        list = order::order_blocks(list)?;
    }
    if reverse {
        list = order::reverse_blocks(list)?;
    }
    Ok(frame::assemble(&list, settings))
}
