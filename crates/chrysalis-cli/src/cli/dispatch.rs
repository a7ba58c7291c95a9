//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! - `*Params` structs mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors pull the relevant fields
//! - `Into<*Args>` impls bridge dispatch and command handlers

use std::path::PathBuf;
use std::time::Duration;

use chrysalis_lib::{MineLimits, Verbosity};
use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::build::BuildArgs;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::qr::QrArgs;
use crate::commands::run::RunArgs;
use crate::commands::trace::TraceArgs;

pub struct RunParams {
    pub file: Option<PathBuf>,
    pub strict: bool,
    pub max_attempts: Option<u64>,
    pub timeout: Option<u64>,
    pub color: ColorChoice,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned(),
            strict: m.get_flag("strict"),
            max_attempts: m.get_one::<u64>("max_attempts").copied(),
            timeout: m.get_one::<u64>("timeout").copied(),
            color: parse_color(m),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            file: p.file.unwrap_or_default(),
            strict: p.strict,
            limits: mine_limits(p.max_attempts, p.timeout),
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub file: Option<PathBuf>,
    pub strict: bool,
    pub verbose: u8,
    pub max_attempts: Option<u64>,
    pub timeout: Option<u64>,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned(),
            strict: m.get_flag("strict"),
            verbose: m.get_count("verbose"),
            max_attempts: m.get_one::<u64>("max_attempts").copied(),
            timeout: m.get_one::<u64>("timeout").copied(),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        let verbosity = match p.verbose {
            0 => Verbosity::Default,
            1 => Verbosity::Verbose,
            _ => Verbosity::VeryVerbose,
        };

        Self {
            file: p.file.unwrap_or_default(),
            strict: p.strict,
            verbosity,
            limits: mine_limits(p.max_attempts, p.timeout),
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub file: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            file: p.file.unwrap_or_default(),
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub file: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            file: p.file.unwrap_or_default(),
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct BuildParams {
    pub file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl BuildParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            file: m.get_one::<PathBuf>("file").cloned(),
            output: m.get_one::<PathBuf>("output").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<BuildParams> for BuildArgs {
    fn from(p: BuildParams) -> Self {
        Self {
            file: p.file.unwrap_or_default(),
            output: p.output.unwrap_or_default(),
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct QrParams {
    pub text: String,
    pub ecc: String,
    pub target: Option<String>,
    pub json: bool,
    pub color: ColorChoice,
}

impl QrParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            text: m.get_one::<String>("text").cloned().unwrap_or_default(),
            ecc: m
                .get_one::<String>("ecc")
                .cloned()
                .unwrap_or_else(|| "h".to_string()),
            target: m.get_one::<String>("target").cloned(),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<QrParams> for QrArgs {
    fn from(p: QrParams) -> Self {
        Self {
            text: p.text,
            ecc: p.ecc,
            target: p.target,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn mine_limits(max_attempts: Option<u64>, timeout: Option<u64>) -> MineLimits {
    let mut limits = MineLimits::new();
    if let Some(attempts) = max_attempts {
        limits = limits.max_attempts(attempts);
    }
    if let Some(secs) = timeout {
        limits = limits.timeout(Duration::from_secs(secs));
    }
    limits
}
