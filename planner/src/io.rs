use std::fs;
use std::path::Path;

use grbl::{Parser, Sequence, Settings, render};

use crate::error::PlanError;

/// Read a program file and parse every line into a sequence.
pub fn read_program(path: impl AsRef<Path>) -> Result<Sequence, PlanError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .map_err(|e| PlanError::Io(format!("cannot read '{}': {}", path.display(), e)))?;

    Parser::new(source, 0).parse().map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
        PlanError::Syntax(format!("in '{}': {}", path.display(), messages.join(", ")))
    })
}

/// Render a sequence and write it out, replacing any existing file.
pub fn write_program(
    path: impl AsRef<Path>,
    sequence: &Sequence,
    settings: &Settings,
) -> Result<(), PlanError> {
    let path = path.as_ref();
    let text = render::render_to_string(sequence, settings);
    fs::write(path, text)
        .map_err(|e| PlanError::Io(format!("cannot write '{}': {}", path.display(), e)))
}
