use std::io::{self, Write};

use crate::instruction::{Instruction, Word};
use crate::sequence::classify;
use crate::sequence::modal::ModalState;
use crate::sequence::Sequence;
use crate::settings::Settings;

/// Fixed-point text for a numeric parameter: rounded to `decimal_places`,
/// never scientific notation, decimal point always present. Rounding a tiny
/// magnitude collapses to a signed zero: `-0.000001` at four places renders
/// `-0.0`.
pub fn format_fixed(value: f64, decimal_places: u32) -> String {
    let factor = 10f64.powi(decimal_places as i32);
    let rounded = (value * factor).round() / factor;
    let mut text = format!("{}", rounded);
    if !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Feed renders as a plain integer.
pub fn format_feed(value: f64) -> String {
    format!("{}", value as i64)
}

/// Canonical text of one instruction: the command as written, then every
/// present word in canonical order. Invisible instructions render empty;
/// an instruction with no command renders its comment verbatim.
pub fn render_instruction(instruction: &Instruction, decimal_places: u32) -> String {
    if !instruction.visible() {
        return String::new();
    }
    let Some(command) = instruction.command() else {
        return instruction.comment().unwrap_or_default().to_string();
    };

    let mut line = command.raw().to_string();
    for word in Word::ORDER {
        if let Some(text) = instruction.get_text(word, decimal_places) {
            line.push(' ');
            line.push(word.letter());
            line.push_str(&text);
        }
    }
    line
}

/// Render a whole sequence, one line per visible instruction, to `out`.
///
/// Under `Settings::diagnostics` each line is prefixed with
/// `position block-id block-index` markers and suffixed with
/// `(Penetrate)` / `(Evacuate)` / `(block start)` / `(block end)` tags.
/// `Settings::number_lines` and `Settings::number_blocks` add `N`/`O`
/// prefixes to non-blank lines and block starts.
pub fn render_program(
    sequence: &Sequence,
    settings: &Settings,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut modal = ModalState::new();
    let mut previous_in_block = false;

    for (position, node) in sequence.iter().enumerate() {
        let penetrate = classify::is_penetrate(node, modal.z());
        let evacuation = classify::is_evacuation(node, modal.z());
        modal.absorb(node);

        let block_end = previous_in_block && !node.in_block();
        previous_in_block = node.in_block();

        if !node.visible() {
            continue;
        }

        let mut line = String::new();
        if settings.diagnostics {
            let (id, index) = match node.block() {
                Some(slot) => (slot.id as i64, slot.index as i64),
                None => (-1, -1),
            };
            line.push_str(&format!("{} {} {} ", position, id, index));
        }
        if settings.number_lines && !node.is_blank() {
            line.push_str(&format!("N{} ", position));
        }
        if let Some(slot) = node.block() {
            if settings.number_blocks && slot.index == 0 {
                line.push_str(&format!("O{} ", slot.id));
            }
        }

        line.push_str(&render_instruction(node, settings.decimal_places));

        if settings.diagnostics {
            if penetrate {
                line.push_str(" (Penetrate)");
            }
            if evacuation {
                line.push_str(" (Evacuate)");
            }
            if node.is_block_start() {
                line.push_str(" (block start)");
            }
            if block_end {
                line.push_str(" (block end)");
            }
        }

        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Convenience wrapper rendering into a `String`.
pub fn render_to_string(sequence: &Sequence, settings: &Settings) -> String {
    let mut buffer = Vec::new();
    render_program(sequence, settings, &mut buffer).expect("write to Vec cannot fail");
    String::from_utf8(buffer).expect("rendered program is UTF-8")
}
