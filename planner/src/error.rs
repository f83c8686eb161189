use std::fmt;

/// Errors raised by the planning pipeline. All are fatal to the enclosing
/// call; no partially processed program is ever produced.
#[derive(Debug)]
pub enum PlanError {
    /// A block's first instruction does not carry both X and Y.
    BlockWithoutStart,
    /// A nearest-block search or assembly was invoked with no blocks.
    NoBlocks,
    /// A circular move carries neither I nor J.
    MissingArcCenter,
    /// A setter was handed a zero or non-finite value; names the parameter.
    InvalidParameter(&'static str),
    /// Reading or writing a program file failed.
    Io(String),
    /// A program file failed to parse; carries the joined messages.
    Syntax(String),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::BlockWithoutStart => {
                write!(f, "block has no start position: first instruction must carry X and Y")
            }
            PlanError::NoBlocks => write!(f, "no blocks to work with"),
            PlanError::MissingArcCenter => {
                write!(f, "circular move carries neither I nor J")
            }
            PlanError::InvalidParameter(name) => {
                write!(f, "must pass a valid {}", name)
            }
            PlanError::Io(message) => write!(f, "I/O error: {}", message),
            PlanError::Syntax(message) => write!(f, "parse errors: {}", message),
        }
    }
}

impl std::error::Error for PlanError {}
