mod cli;
mod commands;

use cli::{BuildParams, CheckParams, DumpParams, QrParams, RunParams, TraceParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("run", m)) => {
            let params = RunParams::from_matches(m);
            commands::run::run(params.into());
        }
        Some(("trace", m)) => {
            let params = TraceParams::from_matches(m);
            commands::trace::run(params.into());
        }
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("build", m)) => {
            let params = BuildParams::from_matches(m);
            commands::build::run(params.into());
        }
        Some(("qr", m)) => {
            let params = QrParams::from_matches(m);
            commands::qr::run(params.into());
        }
        // `chrysalis <FILE>` is shorthand for `chrysalis run <FILE>`.
        None => {
            let params = RunParams::from_matches(&matches);
            commands::run::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
