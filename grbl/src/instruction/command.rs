use std::fmt;

/// Command letter. The dialect's executable codes are all `G` (motion,
/// dwell, units) or `M` (spindle, program control) words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    G,
    M,
}

impl Mnemonic {
    pub fn from_letter(letter: char) -> Option<Mnemonic> {
        match letter.to_ascii_uppercase() {
            'G' => Some(Mnemonic::G),
            'M' => Some(Mnemonic::M),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Mnemonic::G => 'G',
            Mnemonic::M => 'M',
        }
    }
}

/// A `G` or `M` command word.
///
/// The numeric code carries the semantics (codes such as `38.2` exist, hence
/// f64); the token text as originally written is kept alongside so that
/// `G00` renders back as `G00` and `G0` as `G0`. Equality compares mnemonic
/// and code only.
#[derive(Debug, Clone)]
pub struct Command {
    mnemonic: Mnemonic,
    code: f64,
    raw: String,
}

impl Command {
    /// Build a command with canonical two-digit text (`G00`, `M03`, ...).
    pub fn new(mnemonic: Mnemonic, code: f64) -> Command {
        let raw = if code.fract() == 0.0 {
            format!("{}{:02}", mnemonic.letter(), code as i64)
        } else {
            format!("{}{}", mnemonic.letter(), code)
        };
        Command { mnemonic, code, raw }
    }

    /// Build a command preserving the token text as written.
    pub fn with_raw(mnemonic: Mnemonic, code: f64, raw: impl Into<String>) -> Command {
        Command {
            mnemonic,
            code,
            raw: raw.into(),
        }
    }

    pub fn rapid() -> Command {
        Command::new(Mnemonic::G, 0.0)
    }

    pub fn linear() -> Command {
        Command::new(Mnemonic::G, 1.0)
    }

    pub fn dwell() -> Command {
        Command::new(Mnemonic::G, 4.0)
    }

    pub fn metric_units() -> Command {
        Command::with_raw(Mnemonic::G, 21.0, "G21")
    }

    pub fn spindle_on() -> Command {
        Command::new(Mnemonic::M, 3.0)
    }

    pub fn spindle_off() -> Command {
        Command::with_raw(Mnemonic::M, 5.0, "M5")
    }

    pub fn program_end() -> Command {
        Command::with_raw(Mnemonic::M, 2.0, "M2")
    }

    pub fn mnemonic(&self) -> Mnemonic {
        self.mnemonic
    }

    pub fn code(&self) -> f64 {
        self.code
    }

    /// The token text as written in the source line.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `G0` fast positioning.
    pub fn is_rapid(&self) -> bool {
        self.mnemonic == Mnemonic::G && self.code == 0.0
    }

    /// `G1` straight cut.
    pub fn is_linear(&self) -> bool {
        self.mnemonic == Mnemonic::G && self.code == 1.0
    }

    /// `G2`/`G3` circular interpolation.
    pub fn is_arc(&self) -> bool {
        self.mnemonic == Mnemonic::G && (self.code == 2.0 || self.code == 3.0)
    }

    /// `G1`, `G2` or `G3`: a move that cuts material.
    pub fn is_cut(&self) -> bool {
        self.is_linear() || self.is_arc()
    }

    /// `M5` spindle stop.
    pub fn is_spindle_stop(&self) -> bool {
        self.mnemonic == Mnemonic::M && self.code == 5.0
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Command) -> bool {
        self.mnemonic == other.mnemonic && self.code == other.code
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
