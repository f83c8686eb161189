use grbl::render::render_to_string;
use grbl::{Parser, Sequence, Settings};
use planner::error::PlanError;
use planner::{blocks, order, passes, sanitizer};

fn parse(source: &str) -> Sequence {
    Parser::new(source.to_string(), 0).parse().expect("parse failed")
}

fn first_block(source: &str) -> Sequence {
    blocks::extract_blocks(&parse(source))
        .into_iter()
        .next()
        .expect("program has a block")
}

#[test]
fn sanitize_gives_travel_plunge_path_shape() {
    let settings = Settings::default();
    let mut block = first_block("G00 X0 Y0\nG01 X10 Y0\nG01 X10 Y10");
    sanitizer::sanitize_block(&mut block, &settings).expect("sanitize failed");

    assert_eq!(block.len(), 4);
    assert!(block[0].is_rapid());
    assert_eq!(block[0].feed(), Some(settings.fast_travel_speed));

    // Synthesized plunge.
    assert!(block[1].command().unwrap().is_linear());
    assert_eq!(block[1].z(), Some(settings.depth_step));
    assert_eq!(block[1].feed(), Some(settings.penetrate_speed));

    // First cut carries the feed, the rest inherit modally.
    assert_eq!(block[2].feed(), Some(settings.cut_speed));
    assert_eq!(block[3].feed(), None);
    assert_eq!(block[2].z(), None);
}

#[test]
fn sanitize_keeps_an_existing_plunge() {
    let settings = Settings::default();
    let mut block = first_block("G00 X0 Y0\nG01 Z-0.9 F30\nG01 X3 Y4");
    sanitizer::sanitize_block(&mut block, &settings).expect("sanitize failed");

    assert_eq!(block.len(), 3);
    assert_eq!(block[1].z(), Some(settings.depth_step), "depth is overwritten");
    assert_eq!(block[1].feed(), Some(30.0), "existing plunge feed survives");
}

#[test]
fn sanitize_removes_depth_echoes_and_stray_depths() {
    let settings = Settings::default();
    let mut block = first_block("G00 X0 Y0\nG01 Z-0.5\nG01 X1 Y1 Z-0.5\nG01 Z-0.5\nG01 X2 Y2");
    sanitizer::sanitize_block(&mut block, &settings).expect("sanitize failed");

    assert_eq!(block.len(), 4, "the bare depth echo is deleted");
    assert!(block.iter().skip(2).all(|node| node.z().is_none()));
}

#[test]
fn sanitize_drops_blanks_and_comments() {
    let settings = Settings::default();
    let mut block = first_block("G00 X0 Y0\nG01 Z-0.5\n(note)\nG01 X5 Y5");
    sanitizer::sanitize_block(&mut block, &settings).expect("sanitize failed");
    assert!(block.iter().all(|node| !node.is_comment() && !node.is_blank()));
}

#[test]
fn block_without_start_position_fails() {
    let settings = Settings::default();
    let mut block = Sequence::from_instructions(vec![
        grbl::parser::parse_line("G01 Y5", 0).expect("parse failed"),
    ]);
    let err = sanitizer::sanitize_block(&mut block, &settings).unwrap_err();
    assert!(matches!(err, PlanError::BlockWithoutStart));
}

#[test]
fn sanitize_is_idempotent() {
    let settings = Settings::default();
    let mut block = first_block("G00 X0 Y0\nG01 X10 Y0\nG02 X10 Y10 I0 J5\nG01 X0 Y0");
    sanitizer::sanitize_block(&mut block, &settings).expect("first pass failed");
    let once = block.clone();
    sanitizer::sanitize_block(&mut block, &settings).expect("second pass failed");
    assert_eq!(block, once);
}

#[test]
fn decurve_rewrites_arcs_to_lines() {
    let settings = Settings {
        decurve: true,
        ..Settings::default()
    };
    let mut block = first_block("G00 X0 Y0\nG01 Z-1\nG02 X2 Y0 I1 J0");
    sanitizer::sanitize_block(&mut block, &settings).expect("sanitize failed");

    let cut = &block[2];
    assert!(cut.command().unwrap().is_linear());
    assert_eq!(cut.i(), None);
    assert_eq!(cut.j(), None);
}

#[test]
fn decurve_requires_an_arc_center() {
    let settings = Settings {
        decurve: true,
        ..Settings::default()
    };
    let mut block = first_block("G00 X0 Y0\nG01 Z-1\nG02 X2 Y0");
    let err = sanitizer::sanitize_block(&mut block, &settings).unwrap_err();
    assert!(matches!(err, PlanError::MissingArcCenter));
}

#[test]
fn nearest_neighbor_order_from_origin() {
    let list = blocks::extract_blocks(&parse(
        "G00 X0 Y10\nM05\nG00 X5 Y5\nM05\nG00 X100 Y100\nM05",
    ));
    assert_eq!(list.len(), 3);

    let ordered = order::order_blocks(list).expect("ordering failed");
    let starts: Vec<(f64, f64)> = ordered
        .iter()
        .map(|block| (block[0].x().unwrap(), block[0].y().unwrap()))
        .collect();
    assert_eq!(starts, vec![(5.0, 5.0), (0.0, 10.0), (100.0, 100.0)]);
}

#[test]
fn ordering_is_a_permutation() {
    let list = blocks::extract_blocks(&parse(
        "G00 X9 Y9\nG01 X9 Y8\nG00 X2 Y2\nG01 X2 Y3\nG00 X5 Y5\nG01 X5 Y6",
    ));
    let mut before: Vec<(i64, i64)> = list
        .iter()
        .map(|block| (block[0].x().unwrap() as i64, block[0].y().unwrap() as i64))
        .collect();
    let ordered = order::order_blocks(list).expect("ordering failed");
    let mut after: Vec<(i64, i64)> = ordered
        .iter()
        .map(|block| (block[0].x().unwrap() as i64, block[0].y().unwrap() as i64))
        .collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);
}

#[test]
fn ordering_nothing_fails() {
    let err = order::order_blocks(Vec::new()).unwrap_err();
    assert!(matches!(err, PlanError::NoBlocks));
}

#[test]
fn sanitize_program_with_no_blocks_fails() {
    let seq = parse("M05\nG04 P10");
    let err = planner::sanitize(&seq, &Settings::default()).unwrap_err();
    assert!(matches!(err, PlanError::NoBlocks));
}

#[test]
fn full_pipeline_frames_and_orders_the_program() {
    let settings = Settings::default();
    let seq = parse("G00 X10 Y10\nG01 X20 Y10\nG00 X1 Y1\nG01 X2 Y1");
    let original = seq.clone();

    let out = planner::sanitize(&seq, &settings).expect("pipeline failed");
    assert_eq!(seq, original, "input sequence is never mutated");

    let expected = "\
M03 S1000.0

G21
G00 Z1.0 F800

G00 X1.0 Y1.0 F800
G01 Z-0.25 F50
G01 X2.0 Y1.0 F50
G00 Z1.0 F800

G00 X10.0 Y10.0 F800
G01 Z-0.25 F50
G01 X20.0 Y10.0 F50

G00 Z1.0 F800

M5
G00 X0.0 Y0.0 F800
G00 Z0.0
M2
";
    assert_eq!(render_to_string(&out, &settings), expected);
}

#[test]
fn dwell_mode_returns_to_origin_between_blocks() {
    let settings = Settings {
        dwell_after_block: true,
        ..Settings::default()
    };
    let seq = parse("G00 X1 Y1\nG01 X2 Y1");
    let out = planner::sanitize(&seq, &settings).expect("pipeline failed");
    let text = render_to_string(&out, &settings);
    assert!(text.contains("G04 P10000.0"));
    assert!(!text.contains("G00 Z1.0 F800"));
}

#[test]
fn reversed_assembly_flips_block_order() {
    let settings = Settings::default();
    let seq = parse("G00 X1 Y1\nG01 X2 Y1\nG00 X9 Y9\nG01 X9 Y8");
    let out = planner::sanitize_reversed(&seq, &settings).expect("pipeline failed");
    let text = render_to_string(&out, &settings);
    let first = text.find("X9.0 Y9.0").expect("second block present");
    let second = text.find("X1.0 Y1.0").expect("first block present");
    assert!(first < second);
}

#[test]
fn multipass_steps_the_depth_down() {
    let settings = Settings::default();
    let seq = parse("G00 X0 Y0\nG01 X5 Y0");
    let out = passes::multipass(&seq, &settings, 2, false).expect("multipass failed");
    let text = render_to_string(&out, &settings);

    assert_eq!(text.matches("Z-0.25 F50").count(), 1);
    assert_eq!(text.matches("Z-0.5 F50").count(), 1);
}

#[test]
fn multipass_by_block_cuts_each_block_to_depth() {
    let settings = Settings::default();
    let seq = parse("G00 X0 Y0\nG01 X5 Y0\nG00 X9 Y9\nG01 X9 Y8");
    let out = passes::multipass(&seq, &settings, 3, true).expect("multipass failed");
    let text = render_to_string(&out, &settings);
    assert_eq!(text.matches("Z-0.75 F50").count(), 2, "both blocks reach full depth");
}

#[test]
fn multipass_needs_iterations() {
    let seq = parse("G00 X0 Y0\nG01 X5 Y0");
    let err = passes::multipass(&seq, &Settings::default(), 0, false).unwrap_err();
    assert!(matches!(err, PlanError::InvalidParameter(_)));
}

#[test]
fn penetrate_depth_setter_forces_negative() {
    let mut seq = parse("G00 X0 Y0\nG01 Z-0.3\nG01 X5 Y5");
    passes::set_penetrate_depth(&mut seq, 2.0).expect("setter failed");
    assert_eq!(seq[1].z(), Some(-2.0));
}

#[test]
fn evacuation_height_setter_lifts_every_lift() {
    let mut seq = parse("G00 X0 Y0\nG01 Z-0.3\nG01 X5 Y5\nG00 Z5");
    passes::set_evacuation_height(&mut seq, 9.0).expect("setter failed");
    assert_eq!(seq[3].z(), Some(9.0));
    assert_eq!(seq[1].z(), Some(-0.3), "plunge depth untouched");
}

#[test]
fn setters_reject_zero() {
    let mut seq = parse("G00 X0 Y0\nG01 X5 Y0");
    assert!(matches!(
        passes::set_cut_speed(&mut seq, 0.0),
        Err(PlanError::InvalidParameter(_))
    ));
    assert!(matches!(
        passes::set_penetrate_depth(&mut seq, f64::NAN),
        Err(PlanError::InvalidParameter(_))
    ));
}

#[test]
fn cut_speed_setter_touches_only_cutting_depth_moves() {
    let mut seq = parse("G00 X0 Y0\nG01 Z-0.3\nG01 X5 Y5\nG00 Z5\nG00 X9 Y9");
    passes::set_cut_speed(&mut seq, 75.0).expect("setter failed");
    assert_eq!(seq[2].feed(), Some(75.0), "move at depth gets the feed");
    assert_eq!(seq[1].feed(), None, "plunge is skipped");
    assert_eq!(seq[3].feed(), None, "lift is above depth");
}

#[test]
fn drop_non_block_keeps_only_paths() {
    let mut seq = parse("(setup)\nG00 X0 Y0\nG01 X1 Y0\nM05\nG04 P10");
    blocks::drop_non_block(&mut seq);

    assert_eq!(seq.len(), 3);
    assert!(seq[0].is_blank());
    assert!(seq[1].in_block());
    assert!(seq[2].in_block());
}

#[test]
fn nth_block_accessor() {
    let seq = parse("G00 X1 Y1\nG01 X2 Y1\nG00 X9 Y9\nG01 X9 Y8");
    let second = blocks::block(&seq, 1).expect("two blocks exist");
    assert_eq!(second[0].x(), Some(9.0));
    assert!(blocks::block(&seq, 2).is_none());
}

#[test]
fn program_files_round_trip() {
    let settings = Settings::default();
    let dir = tempfile::tempdir().expect("tempdir");
    let raw = dir.path().join("part.nc");
    let cooked = dir.path().join("part_clean.nc");

    std::fs::write(&raw, "G00 X1 Y1\nG01 X2 Y1\n").expect("write raw");

    let seq = planner::io::read_program(&raw).expect("read failed");
    let out = planner::sanitize(&seq, &settings).expect("pipeline failed");
    planner::io::write_program(&cooked, &out, &settings).expect("write failed");

    let back = planner::io::read_program(&cooked).expect("re-read failed");
    assert_eq!(back.block_count(), out.block_count());
    assert_eq!(back.len(), out.len());
}

#[test]
fn read_missing_file_is_an_io_error() {
    let err = planner::io::read_program("/nonexistent/path.nc").unwrap_err();
    assert!(matches!(err, PlanError::Io(_)));
}
