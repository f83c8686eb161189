pub mod classify;
pub mod modal;

use std::ops::{Index, Range};

use crate::instruction::Instruction;
use crate::sequence::modal::ModalState;

/// An ordered program of instructions.
///
/// Storage is a plain arena in chain order: positions are the links, the
/// head and tail are the ends of the arena, and cloning a block is copying
/// a sub-range into a fresh `Sequence`. Block membership on each node is
/// derived state; after any batch of structural edits, run
/// [`Sequence::reclassify`] once to settle it.
#[derive(Debug, Clone)]
pub struct Sequence {
    nodes: Vec<Instruction>,
}

impl Sequence {
    pub fn new() -> Sequence {
        Sequence { nodes: Vec::new() }
    }

    /// Build from instructions and classify their blocks.
    pub fn from_instructions(nodes: Vec<Instruction>) -> Sequence {
        let mut sequence = Sequence { nodes };
        sequence.reclassify();
        sequence
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Instruction> {
        self.nodes.get(position)
    }

    pub fn get_mut(&mut self, position: usize) -> Option<&mut Instruction> {
        self.nodes.get_mut(position)
    }

    pub fn first(&self) -> Option<&Instruction> {
        self.nodes.first()
    }

    pub fn last(&self) -> Option<&Instruction> {
        self.nodes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.nodes.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Instruction> {
        self.nodes.iter_mut()
    }

    pub fn push(&mut self, instruction: Instruction) {
        self.nodes.push(instruction);
    }

    pub fn insert(&mut self, position: usize, instruction: Instruction) {
        self.nodes.insert(position, instruction);
    }

    /// Remove the node at `position`, splicing its neighbors together.
    pub fn remove(&mut self, position: usize) -> Instruction {
        self.nodes.remove(position)
    }

    /// Append every node of `other`, consuming it.
    pub fn extend(&mut self, other: Sequence) {
        self.nodes.extend(other.nodes);
    }

    /// Copy a sub-range into an independent sequence and classify it.
    pub fn clone_range(&self, range: Range<usize>) -> Sequence {
        Sequence::from_instructions(self.nodes[range].to_vec())
    }

    /// Recompute every node's block membership. Idempotent; see
    /// [`classify::reclassify`] for the rules.
    pub fn reclassify(&mut self) {
        classify::reclassify(&mut self.nodes);
    }

    /// Reconstruct the modal parameter state just before `position` as a
    /// synthetic instruction (values strictly before that node).
    pub fn modal_at(&self, position: usize) -> Instruction {
        self.modal_state_at(position).to_instruction()
    }

    fn modal_state_at(&self, position: usize) -> ModalState {
        let mut modal = ModalState::new();
        for node in &self.nodes[..position.min(self.nodes.len())] {
            modal.absorb(node);
        }
        modal
    }

    /// Whether the node at `position` is a plunge, given the modal depth
    /// at that point.
    pub fn is_penetrate(&self, position: usize) -> bool {
        classify::is_penetrate(&self.nodes[position], self.modal_state_at(position).z())
    }

    /// Whether the node at `position` lifts the tool.
    pub fn is_evacuation(&self, position: usize) -> bool {
        classify::is_evacuation(&self.nodes[position], self.modal_state_at(position).z())
    }

    /// Whether the node at `position` closed a block: it sits outside any
    /// block directly after an in-block node.
    pub fn is_block_end(&self, position: usize) -> bool {
        position > 0
            && !self.nodes[position].in_block()
            && self.nodes[position - 1].in_block()
    }

    /// Number of distinct blocks in the sequence.
    pub fn block_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| node.is_block_start())
            .count()
    }

    /// The position the tool holds after the last node: its X/Y if present,
    /// otherwise the modal estimate over the whole sequence.
    pub fn end_position(&self) -> (f64, f64) {
        if let Some(last) = self.last() {
            if let (Some(x), Some(y)) = (last.x(), last.y()) {
                return (x, y);
            }
        }
        let modal = self.modal_state_at(self.nodes.len());
        (modal.x(), modal.y())
    }
}

impl Default for Sequence {
    fn default() -> Sequence {
        Sequence::new()
    }
}

impl Index<usize> for Sequence {
    type Output = Instruction;

    fn index(&self, position: usize) -> &Instruction {
        &self.nodes[position]
    }
}

impl PartialEq for Sequence {
    fn eq(&self, other: &Sequence) -> bool {
        self.nodes == other.nodes
    }
}

impl FromIterator<Instruction> for Sequence {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Sequence {
        Sequence::from_instructions(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
