use crate::instruction::{BlockSlot, Instruction};
use crate::sequence::modal::ModalState;

/// A plunge: either annotated by name, or a Z move that sits at or below
/// the modal depth and below the work zero. Holding the modal depth counts
/// as plunging, so cut lines that repeat their Z stay inside the block.
pub fn is_penetrate(instruction: &Instruction, modal_z: f64) -> bool {
    if instruction.names_penetrate() {
        return true;
    }
    match instruction.z() {
        Some(z) => z <= modal_z && z < 0.0,
        None => false,
    }
}

/// A lift: any Z-carrying move that is not a plunge.
pub fn is_evacuation(instruction: &Instruction, modal_z: f64) -> bool {
    !is_penetrate(instruction, modal_z) && instruction.z().is_some()
}

/// Recompute block membership for the whole arena in one forward pass.
///
/// Each node consumes its predecessor's settled state:
/// - start: carries X and Y, and is a rapid or has no in-block predecessor;
/// - interior: predecessor in-block, index advances;
/// - end: in-block node that is a rapid, a spindle stop, or an evacuation;
///   the node itself drops out of the block.
///
/// The pass is idempotent and is the only writer of block state; running it
/// once after any batch of structural edits keeps every node consistent.
pub(crate) fn reclassify(nodes: &mut [Instruction]) {
    let mut modal = ModalState::new();
    let mut previous: Option<BlockSlot> = None;
    let mut next_id = 0;

    for position in 0..nodes.len() {
        let node = &nodes[position];
        let evacuation = is_evacuation(node, modal.z());

        let mut slot = previous.map(|p| BlockSlot {
            id: p.id,
            index: p.index + 1,
        });

        let starts = node.x().is_some()
            && node.y().is_some()
            && (node.is_rapid() || previous.is_none());
        let ends = slot.is_some()
            && !starts
            && (node.is_rapid() || node.is_spindle_stop() || evacuation);

        if ends {
            slot = None;
        }
        if starts {
            slot = Some(BlockSlot {
                id: next_id,
                index: 0,
            });
            next_id += 1;
        }

        nodes[position].set_block(slot);
        modal.absorb(&nodes[position]);
        previous = slot;
    }
}
