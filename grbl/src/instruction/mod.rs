pub mod command;
pub mod word;

pub use command::{Command, Mnemonic};
pub use word::{WORD_COUNT, Word};

use crate::render;

/// Block membership of an instruction: which block it belongs to and its
/// zero-based position inside that block. An instruction outside any block
/// carries no slot at all, so "index without a block" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSlot {
    pub id: usize,
    pub index: usize,
}

/// One line of a motion program in structured form.
///
/// Holds the optional `G`/`M` command, one optional numeric value per word
/// of the closed alphabet, the comment text stripped from the line, a
/// visibility flag (invisible instructions render as nothing), and the
/// block membership derived by [`crate::sequence::Sequence::reclassify`].
#[derive(Debug, Clone)]
pub struct Instruction {
    command: Option<Command>,
    words: [Option<f64>; WORD_COUNT],
    comment: Option<String>,
    visible: bool,
    block: Option<BlockSlot>,
}

impl Default for Instruction {
    fn default() -> Instruction {
        Instruction {
            command: None,
            words: [None; WORD_COUNT],
            comment: None,
            visible: true,
            block: None,
        }
    }
}

impl Instruction {
    /// A blank instruction: no command, no words, no comment.
    pub fn blank() -> Instruction {
        Instruction::default()
    }

    pub fn with_command(command: Command) -> Instruction {
        Instruction {
            command: Some(command),
            ..Instruction::default()
        }
    }

    pub fn command(&self) -> Option<&Command> {
        self.command.as_ref()
    }

    pub fn set_command(&mut self, command: Option<Command>) {
        self.command = command;
    }

    pub fn get(&self, word: Word) -> Option<f64> {
        self.words[word.slot()]
    }

    pub fn set(&mut self, word: Word, value: Option<f64>) {
        self.words[word.slot()] = value;
    }

    /// The word value formatted per the renderer's numeric rules.
    pub fn get_text(&self, word: Word, decimal_places: u32) -> Option<String> {
        self.get(word).map(|v| {
            if word == Word::F {
                render::format_feed(v)
            } else {
                render::format_fixed(v, decimal_places)
            }
        })
    }

    pub fn x(&self) -> Option<f64> {
        self.get(Word::X)
    }

    pub fn y(&self) -> Option<f64> {
        self.get(Word::Y)
    }

    pub fn z(&self) -> Option<f64> {
        self.get(Word::Z)
    }

    pub fn i(&self) -> Option<f64> {
        self.get(Word::I)
    }

    pub fn j(&self) -> Option<f64> {
        self.get(Word::J)
    }

    pub fn feed(&self) -> Option<f64> {
        self.get(Word::F)
    }

    pub fn set_x(&mut self, value: Option<f64>) {
        self.set(Word::X, value);
    }

    pub fn set_y(&mut self, value: Option<f64>) {
        self.set(Word::Y, value);
    }

    pub fn set_z(&mut self, value: Option<f64>) {
        self.set(Word::Z, value);
    }

    pub fn set_feed(&mut self, value: Option<f64>) {
        self.set(Word::F, value);
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn set_comment(&mut self, comment: Option<String>) {
        self.comment = comment;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn block(&self) -> Option<BlockSlot> {
        self.block
    }

    pub(crate) fn set_block(&mut self, block: Option<BlockSlot>) {
        self.block = block;
    }

    pub fn in_block(&self) -> bool {
        self.block.is_some()
    }

    /// True for the instruction that opens its block.
    pub fn is_block_start(&self) -> bool {
        matches!(self.block, Some(slot) if slot.index == 0)
    }

    /// No command, no comment, no words.
    pub fn is_blank(&self) -> bool {
        self.command.is_none() && self.comment.is_none() && self.words.iter().all(Option::is_none)
    }

    /// Comment text with no command.
    pub fn is_comment(&self) -> bool {
        self.command.is_none() && self.comment.is_some()
    }

    pub fn is_rapid(&self) -> bool {
        self.command.as_ref().is_some_and(Command::is_rapid)
    }

    pub fn is_arc(&self) -> bool {
        self.command.as_ref().is_some_and(Command::is_arc)
    }

    pub fn is_cut_command(&self) -> bool {
        self.command.as_ref().is_some_and(Command::is_cut)
    }

    pub fn is_spindle_stop(&self) -> bool {
        self.command.as_ref().is_some_and(Command::is_spindle_stop)
    }

    /// The producer annotates plunges by name; honor that over the depth
    /// heuristic.
    pub fn names_penetrate(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| c.contains("Penetrate"))
    }

    pub(crate) fn words(&self) -> &[Option<f64>; WORD_COUNT] {
        &self.words
    }
}

/// Equality covers the command, the full word record, and block membership.
/// Comment text and visibility are presentation state and do not
/// participate.
impl PartialEq for Instruction {
    fn eq(&self, other: &Instruction) -> bool {
        self.command == other.command && self.words == other.words && self.block == other.block
    }
}
