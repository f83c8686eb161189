use grbl::sequence::classify;
use grbl::sequence::modal::ModalState;
use grbl::{Instruction, Sequence, Settings};

use crate::error::PlanError;
use crate::{blocks, frame, order, sanitizer};

fn check(value: f64, name: &'static str) -> Result<(), PlanError> {
    if value == 0.0 || !value.is_finite() {
        return Err(PlanError::InvalidParameter(name));
    }
    Ok(())
}

/// Set the feed of every command operating at or below the work zero,
/// plunges excepted.
pub fn set_cut_speed(sequence: &mut Sequence, speed: f64) -> Result<(), PlanError> {
    check(speed, "cut speed")?;
    let mut modal = ModalState::new();
    for node in sequence.iter_mut() {
        let depth = node.z().unwrap_or(modal.z());
        if !classify::is_penetrate(node, modal.z()) && depth <= 0.0 {
            node.set_feed(Some(speed));
        }
        modal.absorb(node);
    }
    Ok(())
}

/// Set the feed of every command operating at or above the work zero.
pub fn set_fast_travel_speed(sequence: &mut Sequence, speed: f64) -> Result<(), PlanError> {
    check(speed, "travel speed")?;
    let mut modal = ModalState::new();
    for node in sequence.iter_mut() {
        if node.z().unwrap_or(modal.z()) >= 0.0 {
            node.set_feed(Some(speed));
        }
        modal.absorb(node);
    }
    Ok(())
}

/// Lift every evacuation move to the given height.
pub fn set_evacuation_height(sequence: &mut Sequence, height: f64) -> Result<(), PlanError> {
    check(height, "height")?;
    let mut modal = ModalState::new();
    for node in sequence.iter_mut() {
        if classify::is_evacuation(node, modal.z()) {
            node.set_z(Some(height));
        }
        modal.absorb(node);
    }
    Ok(())
}

/// Set the feed of every plunge.
pub fn set_penetrate_speed(sequence: &mut Sequence, speed: f64) -> Result<(), PlanError> {
    check(speed, "penetrate speed")?;
    let mut modal = ModalState::new();
    for node in sequence.iter_mut() {
        if classify::is_penetrate(node, modal.z()) {
            node.set_feed(Some(speed));
        }
        modal.absorb(node);
    }
    Ok(())
}

/// Drive every plunge to the given depth. A positive depth is negated:
/// zero is where the job starts, cutting happens below it.
pub fn set_penetrate_depth(sequence: &mut Sequence, depth: f64) -> Result<(), PlanError> {
    check(depth, "depth")?;
    let depth = if depth >= 0.0 { -depth } else { depth };
    let mut modal = ModalState::new();
    for node in sequence.iter_mut() {
        if classify::is_penetrate(node, modal.z()) {
            node.set_z(Some(depth));
        }
        modal.absorb(node);
    }
    Ok(())
}

/// Expand the program into `iterations` cutting passes, stepping the
/// plunge depth down by `Settings::depth_step` each pass.
///
/// With `by_block` false every pass visits all blocks before deepening;
/// with it true each block is cut to full depth before moving on.
pub fn multipass(
    sequence: &Sequence,
    settings: &Settings,
    iterations: usize,
    by_block: bool,
) -> Result<Sequence, PlanError> {
    if iterations == 0 {
        return Err(PlanError::InvalidParameter("iterations count"));
    }
    let mut list = blocks::extract_blocks(sequence);
    if list.is_empty() {
        return Err(PlanError::NoBlocks);
    }
    for block in &mut list {
        sanitizer::sanitize_block(block, settings)?;
    }
    if settings.sort_blocks {
        list = order::order_blocks(list)?;
    }

    let mut program = Sequence::new();
    for instruction in frame::header(settings) {
        program.push(instruction);
    }

    if by_block {
        for block in &list {
            for instruction in frame::evacuation(settings) {
                program.push(instruction);
            }
            let mut depth = 0.0;
            for _ in 0..iterations {
                depth += settings.depth_step;
                let mut pass = block.clone();
                set_penetrate_depth(&mut pass, depth)?;
                program.push(Instruction::blank());
                program.extend(pass);
            }
        }
    } else {
        let mut depth = 0.0;
        for _ in 0..iterations {
            depth += settings.depth_step;
            for block in &list {
                for instruction in frame::evacuation(settings) {
                    program.push(instruction);
                }
                let mut pass = block.clone();
                set_penetrate_depth(&mut pass, depth)?;
                program.push(Instruction::blank());
                program.extend(pass);
            }
        }
    }

    program.push(Instruction::blank());
    for instruction in frame::evacuation(settings) {
        program.push(instruction);
    }
    for instruction in frame::footer(settings) {
        program.push(instruction);
    }
    program.reclassify();
    Ok(program)
}
