use std::fmt::Write;
use std::path::PathBuf;

use odrive_lib::map::Map;
use odrive_lib::{LoadConfig, QueryError};

use super::input::load_or_exit;

pub struct LaneArgs {
    pub input: PathBuf,
    pub road: u32,
    pub lane: i32,
    pub s: f64,
    pub config: LoadConfig,
}

pub fn run(args: LaneArgs) {
    let (_, map, _) = load_or_exit(&args.input, args.config);

    match describe(&map, args.road, args.lane, args.s) {
        Ok(text) => print!("{}", text),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

/// Human-readable summary of one lane at `s`.
pub fn describe(map: &Map, road: u32, lane: i32, s: f64) -> Result<String, QueryError> {
    let found = map.lane(road, lane, s)?;
    let section_s = map
        .road(road)?
        .section(found.section())
        .map_or(0.0, |section| section.s());
    let width = map.lane_width(road, lane, s)?;
    let transform = map.lane_transform(road, lane, s)?;
    let (location, rotation) = (transform.location, transform.rotation);

    let mut out = String::new();
    let _ = writeln!(out, "road {road} lane {lane} at s={s}");
    let _ = writeln!(out, "  type:     {}", found.lane_type());
    let _ = writeln!(out, "  section:  {} (s={})", found.section(), section_s);
    let _ = writeln!(out, "  width:    {:.3}", width);
    let _ = writeln!(
        out,
        "  location: {:.3}, {:.3}, {:.3}",
        location.x, location.y, location.z
    );
    let _ = writeln!(
        out,
        "  rotation: yaw={:.3} pitch={:.3} roll={:.3}",
        rotation.yaw, rotation.pitch, rotation.roll
    );
    Ok(out)
}
