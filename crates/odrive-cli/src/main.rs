mod cli;
mod commands;

use cli::{CheckParams, DumpParams, LaneParams, build_cli};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "odrive=warn";

fn main() {
    let matches = build_cli().get_matches();
    let Some((name, m)) = matches.subcommand() else {
        unreachable!("clap should have caught this")
    };
    init_logging(m.get_one::<String>("log_level").map(String::as_str));

    match name {
        "check" => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        "dump" => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        "lane" => {
            let params = LaneParams::from_matches(m);
            commands::lane::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}

/// `--log-level` wins over `RUST_LOG`, which wins over the default.
fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("odrive={level}")),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
