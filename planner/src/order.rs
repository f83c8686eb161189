use grbl::Sequence;

use crate::error::PlanError;

/// Start point of a block: the X/Y its first instruction carries.
fn start_point(block: &Sequence) -> Result<(f64, f64), PlanError> {
    let first = block.first().ok_or(PlanError::BlockWithoutStart)?;
    match (first.x(), first.y()) {
        (Some(x), Some(y)) => Ok((x, y)),
        _ => Err(PlanError::BlockWithoutStart),
    }
}

/// Index of the block whose start point lies closest to `from`. Ties keep
/// the earliest candidate.
pub fn nearest(from: (f64, f64), blocks: &[Sequence]) -> Result<usize, PlanError> {
    if blocks.is_empty() {
        return Err(PlanError::NoBlocks);
    }
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (index, block) in blocks.iter().enumerate() {
        let (x, y) = start_point(block)?;
        let distance = ((from.0 - x).powi(2) + (from.1 - y).powi(2)).sqrt();
        if distance < best_distance {
            best_distance = distance;
            best = index;
        }
    }
    Ok(best)
}

/// Order blocks as a greedy nearest-neighbor tour from the origin.
///
/// Repeatedly pick the remaining block whose start is closest to the
/// current position, then advance the position to that block's end point
/// (modally estimated when its last move omits coordinates). No
/// backtracking or lookahead; the result is a permutation of the input.
pub fn order_blocks(mut blocks: Vec<Sequence>) -> Result<Vec<Sequence>, PlanError> {
    if blocks.is_empty() {
        return Err(PlanError::NoBlocks);
    }
    let mut ordered = Vec::with_capacity(blocks.len());
    let mut position = (0.0, 0.0);

    while !blocks.is_empty() {
        let pick = nearest(position, &blocks)?;
        let block = blocks.remove(pick);
        position = block.end_position();
        ordered.push(block);
    }
    Ok(ordered)
}

/// Reverse the visiting order of the given blocks.
pub fn reverse_blocks(mut blocks: Vec<Sequence>) -> Result<Vec<Sequence>, PlanError> {
    if blocks.is_empty() {
        return Err(PlanError::NoBlocks);
    }
    blocks.reverse();
    Ok(blocks)
}
