use grbl::sequence::classify;
use grbl::{Command, Instruction, Sequence, Settings, Word};

use crate::error::PlanError;

/// Rewrite one extracted block into canonical shape:
///
/// - position 0 is the travel-in: must carry X and Y, forced to a rapid at
///   the fast-travel feed;
/// - position 1 is the plunge: synthesized if missing, its depth always the
///   configured step;
/// - everything after cuts at a fixed depth: Z-only echoes are deleted,
///   stray Z words cleared, the first cut move gets the cut feed and later
///   ones inherit it modally.
///
/// Blank and comment-only lines are dropped before the positional rules
/// apply. Fails without touching anything useful if the block has no start
/// position; the caller discards the block on error.
pub fn sanitize_block(block: &mut Sequence, settings: &Settings) -> Result<(), PlanError> {
    let mut position = 0;
    while position < block.len() {
        if block[position].is_blank() || block[position].is_comment() {
            block.remove(position);
            continue;
        }
        position += 1;
    }

    let start = block.get_mut(0).ok_or(PlanError::BlockWithoutStart)?;
    if start.x().is_none() || start.y().is_none() {
        return Err(PlanError::BlockWithoutStart);
    }
    start.set_command(Some(Command::rapid()));
    start.set_feed(Some(settings.fast_travel_speed));

    if block.len() > 1 {
        let modal_z = block.modal_at(1).z().unwrap_or(0.0);
        if classify::is_penetrate(&block[1], modal_z) {
            block.get_mut(1).expect("position 1 exists").set_z(Some(settings.depth_step));
        } else {
            let mut plunge = Instruction::with_command(Command::linear());
            plunge.set_z(Some(settings.depth_step));
            plunge.set_feed(Some(settings.penetrate_speed));
            block.insert(1, plunge);
        }
    }

    let mut cut_speed_set = false;
    let mut position = 2;
    while position < block.len() {
        let node = &block[position];
        // Redundant plunge/evacuate echo: depth change with no travel.
        if node.z().is_some() && node.x().is_none() && node.y().is_none() {
            block.remove(position);
            continue;
        }
        if settings.decurve && node.is_arc() {
            if node.i().is_none() && node.j().is_none() {
                return Err(PlanError::MissingArcCenter);
            }
            decurve(block.get_mut(position).expect("position exists"));
        }
        let node = block.get_mut(position).expect("position exists");
        node.set_z(None);
        if node.is_cut_command() {
            if !cut_speed_set {
                node.set_feed(Some(settings.cut_speed));
                cut_speed_set = true;
            } else {
                node.set_feed(None);
            }
        }
        position += 1;
    }

    block.reclassify();
    Ok(())
}

/// Replace a circular move with a straight one, discarding its arc-center
/// offsets.
pub fn decurve(instruction: &mut Instruction) {
    instruction.set_command(Some(Command::linear()));
    instruction.set(Word::I, None);
    instruction.set(Word::J, None);
    instruction.set(Word::K, None);
    instruction.set(Word::R, None);
}
