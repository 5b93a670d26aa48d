//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// OpenDRIVE document (positional, "-" for stdin).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("OpenDRIVE file (.xodr), or - for stdin")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

pub fn road_arg() -> Arg {
    Arg::new("road")
        .long("road")
        .value_name("ID")
        .required(true)
        .value_parser(value_parser!(u32))
        .help("Road id")
}

pub fn lane_arg() -> Arg {
    Arg::new("lane")
        .long("lane")
        .value_name("ID")
        .required(true)
        .allow_negative_numbers(true)
        .value_parser(value_parser!(i32))
        .help("Lane id (negative ids are right of the reference line)")
}

pub fn s_arg() -> Arg {
    Arg::new("s")
        .long("s")
        .value_name("S")
        .default_value("0")
        .value_parser(value_parser!(f64))
        .help("Road coordinate along the reference line, in metres")
}

/// Log filter level (--log-level), global.
pub fn log_level_arg() -> Arg {
    Arg::new("log_level")
        .long("log-level")
        .value_name("LEVEL")
        .global(true)
        .value_parser(["error", "warn", "info", "debug", "trace"])
        .help("Log level for odrive crates (overrides RUST_LOG)")
}

/// Conflict distance (--conflict-tolerance).
pub fn conflict_tolerance_arg() -> Arg {
    Arg::new("conflict_tolerance")
        .long("conflict-tolerance")
        .value_name("METRES")
        .value_parser(value_parser!(f64))
        .help("Distance under which junction lanes conflict")
}

/// Conflict sampling step (--conflict-step).
pub fn conflict_step_arg() -> Arg {
    Arg::new("conflict_step")
        .long("conflict-step")
        .value_name("METRES")
        .value_parser(value_parser!(f64))
        .help("Arc-length step used to sample lanes for conflicts")
}
