use std::fs;
use std::path::PathBuf;

use super::loader::load_program;

pub struct BuildArgs {
    pub file: PathBuf,
    pub output: PathBuf,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: BuildArgs) {
    let program = load_program(&args.file, args.strict, args.color);

    if let Err(e) = fs::write(&args.output, program.to_bytes()) {
        eprintln!("error: cannot write {}: {}", args.output.display(), e);
        std::process::exit(1);
    }
}
