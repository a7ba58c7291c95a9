//! Tests for CLI dispatch logic.
//!
//! These tests verify:
//! 1. The bare `chrysalis <FILE>` form runs the file
//! 2. Mining limits and verbosity reach the command args
//! 3. Required arguments and value sets are enforced by clap

use std::path::PathBuf;
use std::time::Duration;

use chrysalis_lib::Verbosity;

use super::*;
use crate::cli::commands::{build_command, check_command, qr_command, trace_command};
use crate::commands::build::BuildArgs;
use crate::commands::qr::QrArgs;
use crate::commands::run::RunArgs;
use crate::commands::trace::TraceArgs;

#[test]
fn bare_file_runs() {
    let m = build_cli()
        .try_get_matches_from(["chrysalis", "hello.chr", "--max-attempts", "10"])
        .unwrap();
    assert!(m.subcommand().is_none());

    let args: RunArgs = RunParams::from_matches(&m).into();
    assert_eq!(args.file, PathBuf::from("hello.chr"));
    assert_eq!(args.limits.get_max_attempts(), Some(10));
    assert_eq!(args.limits.get_timeout(), None);
    assert!(!args.strict);
}

#[test]
fn run_subcommand() {
    let m = build_cli()
        .try_get_matches_from(["chrysalis", "run", "mine.chb", "--timeout", "3", "--strict"])
        .unwrap();
    let (name, sub) = m.subcommand().unwrap();
    assert_eq!(name, "run");

    let args: RunArgs = RunParams::from_matches(sub).into();
    assert_eq!(args.file, PathBuf::from("mine.chb"));
    assert_eq!(args.limits.get_timeout(), Some(Duration::from_secs(3)));
    assert_eq!(args.limits.get_max_attempts(), None);
    assert!(args.strict);
}

#[test]
fn no_arguments_is_an_error() {
    assert!(build_cli().try_get_matches_from(["chrysalis"]).is_err());
}

#[test]
fn trace_verbosity_levels() {
    let levels = [
        (vec!["trace", "a.chr"], Verbosity::Default),
        (vec!["trace", "a.chr", "-v"], Verbosity::Verbose),
        (vec!["trace", "a.chr", "-vv"], Verbosity::VeryVerbose),
        (vec!["trace", "a.chr", "-vvv"], Verbosity::VeryVerbose),
    ];

    for (argv, expected) in levels {
        let m = trace_command().try_get_matches_from(argv.clone()).unwrap();
        let args: TraceArgs = TraceParams::from_matches(&m).into();
        assert_eq!(args.verbosity, expected, "{argv:?}");
    }
}

#[test]
fn color_flag() {
    let m = check_command()
        .try_get_matches_from(["check", "a.chr", "--color", "always"])
        .unwrap();
    assert_eq!(CheckParams::from_matches(&m).color, ColorChoice::Always);

    let m = check_command()
        .try_get_matches_from(["check", "a.chr", "--color", "never"])
        .unwrap();
    assert_eq!(CheckParams::from_matches(&m).color, ColorChoice::Never);

    let m = check_command().try_get_matches_from(["check", "a.chr"]).unwrap();
    assert_eq!(CheckParams::from_matches(&m).color, ColorChoice::Auto);

    assert!(
        check_command()
            .try_get_matches_from(["check", "a.chr", "--color", "sometimes"])
            .is_err()
    );
}

#[test]
fn build_requires_output() {
    assert!(build_command().try_get_matches_from(["build", "a.chr"]).is_err());

    let m = build_command()
        .try_get_matches_from(["build", "a.chr", "-o", "a.chb"])
        .unwrap();
    let args: BuildArgs = BuildParams::from_matches(&m).into();
    assert_eq!(args.file, PathBuf::from("a.chr"));
    assert_eq!(args.output, PathBuf::from("a.chb"));
}

#[test]
fn qr_defaults_and_overrides() {
    let m = qr_command().try_get_matches_from(["qr", "hello"]).unwrap();
    let args: QrArgs = QrParams::from_matches(&m).into();
    assert_eq!(args.text, "hello");
    assert_eq!(args.ecc, "h");
    assert_eq!(args.target, None);
    assert!(!args.json);

    let target = "0f".repeat(32);
    let m = qr_command()
        .try_get_matches_from(["qr", "hello", "--ecc", "L", "--target", &target, "--json"])
        .unwrap();
    let args: QrArgs = QrParams::from_matches(&m).into();
    assert_eq!(args.ecc, "L");
    assert_eq!(args.target.as_deref(), Some(target.as_str()));
    assert!(args.json);

    assert!(
        qr_command()
            .try_get_matches_from(["qr", "hello", "--ecc", "z"])
            .is_err()
    );
}

#[test]
fn dump_rejects_run_flags() {
    let result = crate::cli::commands::dump_command().try_get_matches_from([
        "dump",
        "a.chr",
        "--timeout",
        "5",
    ]);
    assert!(result.is_err());
}
