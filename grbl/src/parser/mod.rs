pub mod error;

pub use error::ParseError;

use crate::instruction::{Command, Instruction, Mnemonic, Word};
use crate::sequence::Sequence;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parses a full program, one instruction per line.
pub struct Parser {
    source: String,
    file_id: usize,
}

impl Parser {
    pub fn new(source: String, file_id: usize) -> Self {
        Parser { source, file_id }
    }

    /// Parse every line into a [`Sequence`] and classify its blocks.
    /// All offending lines are reported, not just the first.
    pub fn parse(self) -> Result<Sequence, Vec<ParseError>> {
        let mut sequence = Sequence::new();
        let mut errors = Vec::new();
        let mut offset = 0;

        // A trailing newline terminates the last line rather than opening a
        // blank one.
        let mut lines: Vec<&str> = self.source.split('\n').collect();
        if lines.last() == Some(&"") {
            lines.pop();
        }

        for line in lines {
            match parse_line_at(line, self.file_id, offset) {
                Ok(instruction) => sequence.push(instruction),
                Err(error) => errors.push(error),
            }
            offset += line.len() + 1;
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        sequence.reclassify();
        Ok(sequence)
    }
}

/// Parse a single line of program text into an [`Instruction`].
pub fn parse_line(line: &str, file_id: usize) -> Result<Instruction, ParseError> {
    parse_line_at(line, file_id, 0)
}

// ---------------------------------------------------------------------------
// Line grammar
// ---------------------------------------------------------------------------

fn parse_line_at(line: &str, file_id: usize, base: usize) -> Result<Instruction, ParseError> {
    let mut instruction = Instruction::blank();

    // `%` marker lines are opaque; keep the whole line as the comment.
    if line.trim_start().starts_with('%') {
        instruction.set_comment(Some(line.trim_end().to_string()));
        return Ok(instruction);
    }

    let (kept, comment) = strip_comments(line);
    instruction.set_comment(comment);

    for (start, token) in tokens(&kept) {
        // Stray bracket closers survive stripping; tolerate them.
        let token_text = token.trim_matches(|c| c == ')' || c == ']');
        if token_text.is_empty() {
            continue;
        }
        let span = base + start..base + start + token.len();

        let mut chars = token_text.chars();
        let letter = chars.next().expect("token is non-empty");
        let number = chars.as_str();

        if let Some(mnemonic) = Mnemonic::from_letter(letter) {
            let code = parse_number(number, token_text, &span, file_id)?;
            instruction.set_command(Some(Command::with_raw(mnemonic, code, token_text)));
        } else if let Some(word) = Word::from_letter(letter) {
            let value = parse_number(number, token_text, &span, file_id)?;
            instruction.set(word, Some(value));
        } else {
            return Err(ParseError::new(
                format!("unrecognized word '{}'", token_text),
                span,
                file_id,
            )
            .with_note("a word is a letter followed by a number, such as G01, X12.5 or F200"));
        }
    }

    Ok(instruction)
}

fn parse_number(
    number: &str,
    token_text: &str,
    span: &std::ops::Range<usize>,
    file_id: usize,
) -> Result<f64, ParseError> {
    number.parse::<f64>().map_err(|_| {
        ParseError::new(
            format!("malformed number in '{}'", token_text),
            span.clone(),
            file_id,
        )
    })
}

/// Split the retained characters into whitespace-separated tokens, keeping
/// each token's starting byte offset in the original line.
fn tokens(kept: &[(usize, char)]) -> Vec<(usize, String)> {
    let mut out = Vec::new();
    let mut current: Option<(usize, String)> = None;

    for &(idx, ch) in kept {
        if ch.is_whitespace() {
            if let Some(token) = current.take() {
                out.push(token);
            }
        } else {
            match current.as_mut() {
                Some((_, text)) => text.push(ch),
                None => current = Some((idx, String::from(ch))),
            }
        }
    }
    if let Some(token) = current.take() {
        out.push(token);
    }
    out
}

/// Remove balanced `()`/`[]` regions, returning the surviving characters
/// (with their original byte offsets) and the stripped text. Unbalanced
/// closers are left in place; unclosed openers swallow to end of line.
fn strip_comments(line: &str) -> (Vec<(usize, char)>, Option<String>) {
    let mut kept = Vec::new();
    let mut stripped = String::new();
    let mut paren = 0u32;
    let mut square = 0u32;

    for (idx, ch) in line.char_indices() {
        match ch {
            '(' => {
                paren += 1;
                stripped.push(ch);
            }
            '[' => {
                square += 1;
                stripped.push(ch);
            }
            ')' if paren > 0 => {
                paren -= 1;
                stripped.push(ch);
            }
            ']' if square > 0 => {
                square -= 1;
                stripped.push(ch);
            }
            _ => {
                if paren > 0 || square > 0 {
                    stripped.push(ch);
                } else {
                    kept.push((idx, ch));
                }
            }
        }
    }

    let comment = match stripped.trim() {
        "" => None,
        text => Some(text.to_string()),
    };
    (kept, comment)
}
