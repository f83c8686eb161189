use grbl::{Instruction, Sequence};

/// Extract every block as an independent cloned sequence.
///
/// A block is a maximal run of in-block instructions; the clones own their
/// nodes outright, so sanitizing them cannot touch the source sequence.
pub fn extract_blocks(sequence: &Sequence) -> Vec<Sequence> {
    let mut blocks = Vec::new();
    let mut current: Vec<Instruction> = Vec::new();
    let mut current_id = None;

    for node in sequence {
        match node.block() {
            Some(slot) => {
                if current_id != Some(slot.id) && !current.is_empty() {
                    blocks.push(Sequence::from_instructions(std::mem::take(&mut current)));
                }
                current_id = Some(slot.id);
                current.push(node.clone());
            }
            None => {
                if !current.is_empty() {
                    blocks.push(Sequence::from_instructions(std::mem::take(&mut current)));
                }
                current_id = None;
            }
        }
    }
    if !current.is_empty() {
        blocks.push(Sequence::from_instructions(current));
    }
    blocks
}

/// The nth extracted block, if there are that many.
pub fn block(sequence: &Sequence, number: usize) -> Option<Sequence> {
    extract_blocks(sequence).into_iter().nth(number)
}

/// Delete every instruction outside a block, leaving one blank line ahead
/// of each surviving block.
pub fn drop_non_block(sequence: &mut Sequence) {
    let mut position = 0;
    while position < sequence.len() {
        if !sequence[position].in_block() {
            sequence.remove(position);
            continue;
        }
        if sequence[position].is_block_start() {
            sequence.insert(position, Instruction::blank());
            position += 1;
        }
        position += 1;
    }
    sequence.reclassify();
}
