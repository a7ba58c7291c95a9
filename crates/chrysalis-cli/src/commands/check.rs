use std::path::PathBuf;

use super::loader::load_program;

pub struct CheckArgs {
    pub file: PathBuf,
    pub strict: bool,
    pub color: bool,
}

/// Silent on success; diagnostics go to stderr.
pub fn run(args: CheckArgs) {
    load_program(&args.file, args.strict, args.color);
}
