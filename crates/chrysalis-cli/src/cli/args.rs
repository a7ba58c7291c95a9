//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Program file, assembly text or `.chb` image (positional).
pub fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Assembly source or .chb program image")
}

/// Same as [`file_arg`] but mandatory.
pub fn required_file_arg() -> Arg {
    file_arg().required(true)
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

/// Mining attempt budget per qr_mine call (--max-attempts).
pub fn max_attempts_arg() -> Arg {
    Arg::new("max_attempts")
        .long("max-attempts")
        .value_name("N")
        .value_parser(value_parser!(u64))
        .help("Give up a qr_mine call after N attempts")
}

/// Mining deadline per qr_mine call (--timeout).
pub fn timeout_arg() -> Arg {
    Arg::new("timeout")
        .long("timeout")
        .value_name("SECS")
        .value_parser(value_parser!(u64))
        .help("Give up a qr_mine call after SECS seconds")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for values and output, -vv adds mining progress)")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("OUT")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Where to write the program image")
}

/// Payload text for the bitmap (positional).
pub fn text_arg() -> Arg {
    Arg::new("text")
        .value_name("TEXT")
        .required(true)
        .help("Payload to encode")
}

/// Error correction class (--ecc).
pub fn ecc_arg() -> Arg {
    Arg::new("ecc")
        .long("ecc")
        .value_name("LEVEL")
        .default_value("h")
        .ignore_case(true)
        .value_parser(["l", "m", "q", "h"])
        .help("Error correction class")
}

/// Proof-of-work target (--target).
pub fn target_arg() -> Arg {
    Arg::new("target")
        .long("target")
        .value_name("HEX")
        .help("32-byte target as 64 hex digits (default: all ones)")
}

/// Machine-readable report (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print the report as JSON")
}
