use grbl::{Command, Instruction, Sequence, Settings, Word};

/// Milliseconds to pause at the origin in dwell mode.
const DWELL_MS: f64 = 10000.0;

fn rapid_to_origin(feed: f64) -> Instruction {
    let mut rapid = Instruction::with_command(Command::rapid());
    rapid.set_x(Some(0.0));
    rapid.set_y(Some(0.0));
    rapid.set_feed(Some(feed));
    rapid
}

fn rapid_to_height(height: f64) -> Instruction {
    let mut rapid = Instruction::with_command(Command::rapid());
    rapid.set_z(Some(height));
    rapid
}

/// Program header: spindle on at the configured rpm, then metric units.
pub fn header(settings: &Settings) -> Vec<Instruction> {
    let mut spindle_on = Instruction::with_command(Command::spindle_on());
    spindle_on.set(Word::S, Some(settings.spindle_rpm));
    vec![
        spindle_on,
        Instruction::blank(),
        Instruction::with_command(Command::metric_units()),
    ]
}

/// Program footer: spindle off, return to origin, return to zero height,
/// program end.
pub fn footer(settings: &Settings) -> Vec<Instruction> {
    vec![
        Instruction::blank(),
        Instruction::with_command(Command::spindle_off()),
        rapid_to_origin(settings.fast_travel_speed),
        rapid_to_height(0.0),
        Instruction::with_command(Command::program_end()),
    ]
}

/// The lift inserted ahead of each block body: a rapid to the safe height,
/// or in dwell mode a return to origin followed by a pause.
pub fn evacuation(settings: &Settings) -> Vec<Instruction> {
    if settings.dwell_after_block {
        let mut dwell = Instruction::with_command(Command::dwell());
        dwell.set(Word::P, Some(DWELL_MS));
        return vec![
            rapid_to_origin(settings.fast_travel_speed),
            rapid_to_height(0.0),
            dwell,
        ];
    }

    let mut lift = rapid_to_height(settings.evacuation_height);
    lift.set_feed(Some(settings.fast_travel_speed));
    vec![lift]
}

/// Assemble sanitized blocks into a complete program: header, then per
/// block an evacuation and the body, a final evacuation, and the footer.
pub fn assemble(blocks: &[Sequence], settings: &Settings) -> Sequence {
    let mut program = Sequence::new();
    for instruction in header(settings) {
        program.push(instruction);
    }
    for block in blocks {
        for instruction in evacuation(settings) {
            program.push(instruction);
        }
        program.push(Instruction::blank());
        for instruction in block {
            program.push(instruction.clone());
        }
    }
    program.push(Instruction::blank());
    for instruction in evacuation(settings) {
        program.push(instruction);
    }
    for instruction in footer(settings) {
        program.push(instruction);
    }
    program.reclassify();
    program
}
