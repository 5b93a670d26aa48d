//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("odrive")
        .about("Compile OpenDRIVE documents into a queryable road network")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(log_level_arg())
        .subcommand(check_command())
        .subcommand(dump_command())
        .subcommand(lane_command())
}

/// Resolution tunables shared by every command that loads a map.
fn with_load_args(cmd: Command) -> Command {
    cmd.arg(conflict_tolerance_arg()).arg(conflict_step_arg())
}

/// Load a document and report its diagnostics.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Load a document and report diagnostics")
        .after_help(
            r#"EXAMPLES:
  odrive check Town01.xodr              # errors only fail the run
  odrive check Town01.xodr --strict     # warnings fail too
  cat Town01.xodr | odrive check -      # read from stdin"#,
        )
        .arg(input_arg())
        .arg(strict_arg())
        .arg(color_arg());

    with_load_args(cmd)
}

/// Print the compiled network as JSON.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Print a JSON summary of the road network")
        .after_help(
            r#"EXAMPLES:
  odrive dump Town01.xodr
  odrive dump Town01.xodr --compact | jq '.junctions'"#,
        )
        .arg(input_arg())
        .arg(compact_arg());

    with_load_args(cmd)
}

/// Look up one lane.
pub fn lane_command() -> Command {
    let cmd = Command::new("lane")
        .about("Show a lane's type, width and world pose at s")
        .after_help(
            r#"EXAMPLES:
  odrive lane Town01.xodr --road 5 --lane -1 --s 12.5"#,
        )
        .arg(input_arg())
        .arg(road_arg())
        .arg(lane_arg())
        .arg(s_arg());

    with_load_args(cmd)
}
