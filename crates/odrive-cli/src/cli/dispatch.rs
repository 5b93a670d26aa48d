//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;
use odrive_lib::LoadConfig;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::lane::LaneArgs;

#[derive(Debug)]
pub struct CheckParams {
    pub input: PathBuf,
    pub strict: bool,
    pub color: ColorChoice,
    pub config: LoadConfig,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: parse_input(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
            config: parse_load_config(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input,
            strict: p.strict,
            color: p.color.should_colorize(),
            config: p.config,
        }
    }
}

#[derive(Debug)]
pub struct DumpParams {
    pub input: PathBuf,
    pub compact: bool,
    pub config: LoadConfig,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: parse_input(m),
            compact: m.get_flag("compact"),
            config: parse_load_config(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input,
            compact: p.compact,
            config: p.config,
        }
    }
}

#[derive(Debug)]
pub struct LaneParams {
    pub input: PathBuf,
    pub road: u32,
    pub lane: i32,
    pub s: f64,
    pub config: LoadConfig,
}

impl LaneParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: parse_input(m),
            road: m.get_one::<u32>("road").copied().unwrap_or_default(),
            lane: m.get_one::<i32>("lane").copied().unwrap_or_default(),
            s: m.get_one::<f64>("s").copied().unwrap_or_default(),
            config: parse_load_config(m),
        }
    }
}

impl From<LaneParams> for LaneArgs {
    fn from(p: LaneParams) -> Self {
        Self {
            input: p.input,
            road: p.road,
            lane: p.lane,
            s: p.s,
            config: p.config,
        }
    }
}

fn parse_input(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("input").cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Defaults, overridden by whichever tunables were passed.
fn parse_load_config(m: &ArgMatches) -> LoadConfig {
    let mut config = LoadConfig::default();
    if let Some(&tolerance) = m.get_one::<f64>("conflict_tolerance") {
        config = config.with_conflict_tolerance(tolerance);
    }
    if let Some(&step) = m.get_one::<f64>("conflict_step") {
        config = config.with_conflict_sample_step(step);
    }
    config
}
