//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! `run` and `trace` share the mining limit flags; everything that loads a
//! program accepts `--strict` and `--color`.

use clap::Command;

use super::args::*;

/// Add the flags every program-loading command accepts.
fn with_load_args(cmd: Command) -> Command {
    cmd.arg(strict_arg()).arg(color_arg())
}

/// Add the mining limit flags.
fn with_mine_args(cmd: Command) -> Command {
    cmd.arg(max_attempts_arg()).arg(timeout_arg())
}

/// Build the complete CLI with all subcommands.
///
/// A bare `chrysalis <FILE>` runs the file, so the top-level command also
/// carries the `run` arguments.
pub fn build_cli() -> Command {
    let cmd = Command::new("chrysalis")
        .about("Stack bytecode language with a bitmap proof-of-work machine")
        .override_usage(
            "\
  chrysalis <FILE>
  chrysalis <COMMAND> [ARGS]",
        )
        .arg_required_else_help(true)
        .args_conflicts_with_subcommands(true)
        .arg(file_arg())
        .subcommand(run_command())
        .subcommand(trace_command())
        .subcommand(dump_command())
        .subcommand(check_command())
        .subcommand(build_command())
        .subcommand(qr_command());

    with_mine_args(with_load_args(cmd))
}

/// Compile and execute a program.
pub fn run_command() -> Command {
    let cmd = Command::new("run")
        .about("Compile and execute a program")
        .after_help(
            r#"EXAMPLES:
  chrysalis run hello.chr                  # assembly source
  chrysalis run hello.chb                  # program image
  chrysalis run mine.chr --timeout 10      # bound each qr_mine call"#,
        )
        .arg(required_file_arg());

    with_mine_args(with_load_args(cmd))
}

/// Execute with an instruction trace.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Execute a program and print an instruction trace")
        .after_help(
            r#"EXAMPLES:
  chrysalis trace hello.chr                # instructions and faults
  chrysalis trace hello.chr -v             # plus pushed values and output
  chrysalis trace mine.chr -vv             # plus mining progress"#,
        )
        .arg(required_file_arg())
        .arg(verbose_arg());

    with_mine_args(with_load_args(cmd))
}

/// Disassemble a program.
pub fn dump_command() -> Command {
    let cmd = Command::new("dump")
        .about("Show compiled bytecode and string pool")
        .arg(required_file_arg());

    with_load_args(cmd)
}

/// Compile without running.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Compile a program and report diagnostics")
        .after_help(
            r#"EXAMPLES:
  chrysalis check hello.chr                # errors fail, warnings are shown
  chrysalis check hello.chr --strict       # warnings fail too"#,
        )
        .arg(required_file_arg());

    with_load_args(cmd)
}

/// Write a program image.
pub fn build_command() -> Command {
    let cmd = Command::new("build")
        .about("Compile a program into a .chb image")
        .arg(required_file_arg())
        .arg(output_file_arg());

    with_load_args(cmd)
}

/// Build and inspect a single bitmap.
pub fn qr_command() -> Command {
    Command::new("qr")
        .about("Build a bitmap from text and report its metrics")
        .after_help(
            r#"EXAMPLES:
  chrysalis qr hello                       # render with ECC H
  chrysalis qr hello --ecc l --json        # metrics as JSON
  chrysalis qr hello --target 00ff...ff    # check against a target"#,
        )
        .arg(text_arg())
        .arg(ecc_arg())
        .arg(target_arg())
        .arg(json_arg())
        .arg(color_arg())
}
