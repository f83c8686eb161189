use grbl::{Instruction, Sequence, Word};

use crate::error::PlanError;
use crate::sanitizer::decurve;

/// Shift every X/Y in the sequence. I/J arc-center offsets are relative
/// and stay untouched.
pub fn translate(sequence: &mut Sequence, dx: f64, dy: f64) {
    for node in sequence.iter_mut() {
        translate_instruction(node, dx, dy);
    }
}

pub fn translate_instruction(instruction: &mut Instruction, dx: f64, dy: f64) {
    if let Some(x) = instruction.x() {
        instruction.set_x(Some(x + dx));
    }
    if let Some(y) = instruction.y() {
        instruction.set_y(Some(y + dy));
    }
}

/// Rotate every positioned point about `(cx, cy)` by `angle` degrees,
/// counterclockwise.
pub fn rotate(sequence: &mut Sequence, angle: f64, cx: f64, cy: f64) {
    for node in sequence.iter_mut() {
        rotate_instruction(node, angle, cx, cy);
    }
}

/// Rotate one instruction's point. When I/J are present the absolute arc
/// center is reconstructed, rotated the same way, and the new relative
/// offsets re-derived from the rotated point.
pub fn rotate_instruction(instruction: &mut Instruction, angle: f64, cx: f64, cy: f64) {
    let (Some(x), Some(y)) = (instruction.x(), instruction.y()) else {
        return;
    };
    let (sin, cos) = angle.to_radians().sin_cos();
    let rx = cx + cos * (x - cx) - sin * (y - cy);
    let ry = cy + sin * (x - cx) + cos * (y - cy);

    if let (Some(i), Some(j)) = (instruction.i(), instruction.j()) {
        let (ax, ay) = (x + i, y + j);
        let rcx = cx + cos * (ax - cx) - sin * (ay - cy);
        let rcy = cy + sin * (ax - cx) + cos * (ay - cy);
        instruction.set(Word::I, Some(rcx - rx));
        instruction.set(Word::J, Some(rcy - ry));
    }

    instruction.set_x(Some(rx));
    instruction.set_y(Some(ry));
}

/// Scale every X/Y about the origin.
pub fn scale(sequence: &mut Sequence, factor: f64) {
    for node in sequence.iter_mut() {
        scale_instruction(node, factor);
    }
}

pub fn scale_instruction(instruction: &mut Instruction, factor: f64) {
    if let (Some(x), Some(y), Some(i), Some(j)) = (
        instruction.x(),
        instruction.y(),
        instruction.i(),
        instruction.j(),
    ) {
        let (ax, ay) = (x + i, y + j);
        instruction.set(Word::I, Some(ax * factor - x * factor));
        instruction.set(Word::J, Some(ay * factor - y * factor));
    }
    if let Some(x) = instruction.x() {
        instruction.set_x(Some(x * factor));
    }
    if let Some(y) = instruction.y() {
        instruction.set_y(Some(y * factor));
    }
}

/// Push every positioned point `units` further out along the ray from
/// `(cx, cy)` (negative pulls inward). Points sitting on the center stay.
pub fn dilate(sequence: &mut Sequence, units: f64, cx: f64, cy: f64) {
    for node in sequence.iter_mut() {
        dilate_instruction(node, units, cx, cy);
    }
}

pub fn dilate_instruction(instruction: &mut Instruction, units: f64, cx: f64, cy: f64) {
    let (Some(x), Some(y)) = (instruction.x(), instruction.y()) else {
        return;
    };
    let (px, py) = displace(x, y, units, cx, cy);

    if let (Some(i), Some(j)) = (instruction.i(), instruction.j()) {
        let (ax, ay) = displace(x + i, y + j, units, cx, cy);
        instruction.set(Word::I, Some(ax - px));
        instruction.set(Word::J, Some(ay - py));
    }

    instruction.set_x(Some(px));
    instruction.set_y(Some(py));
}

fn displace(x: f64, y: f64, units: f64, cx: f64, cy: f64) -> (f64, f64) {
    let (dx, dy) = (x - cx, y - cy);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f64::EPSILON {
        return (x, y);
    }
    (x + units * dx / length, y + units * dy / length)
}

/// Offset the path sideways by `distance`, working on a clone.
///
/// Arcs are flattened to straight moves first (arc offsetting is not
/// attempted). For each consecutive point pair the local tangent's
/// perpendicular shifts the segment midpoint; the first positioned point
/// has no incoming segment and stays where it is.
pub fn offset(sequence: &Sequence, distance: f64) -> Result<Sequence, PlanError> {
    let mut out = sequence.clone();

    for node in out.iter_mut() {
        if node.is_arc() {
            if node.i().is_none() && node.j().is_none() {
                return Err(PlanError::MissingArcCenter);
            }
            decurve(node);
        } else if node.i().is_some() || node.j().is_some() {
            node.set(Word::I, None);
            node.set(Word::J, None);
        }
    }

    let mut previous: Option<(f64, f64)> = None;
    for node in out.iter_mut() {
        let (Some(x), Some(y)) = (node.x(), node.y()) else {
            continue;
        };
        if let Some((px, py)) = previous {
            let (tx, ty) = (x - px, y - py);
            let length = (tx * tx + ty * ty).sqrt();
            if length > f64::EPSILON {
                let (nx, ny) = (-ty / length, tx / length);
                let (mx, my) = ((px + x) / 2.0, (py + y) / 2.0);
                node.set_x(Some(mx + distance * nx));
                node.set_y(Some(my + distance * ny));
            }
        }
        previous = Some((x, y));
    }

    out.reclassify();
    Ok(out)
}
