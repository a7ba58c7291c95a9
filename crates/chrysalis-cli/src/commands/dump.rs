use std::path::PathBuf;

use chrysalis_lib::Colors;
use chrysalis_lib::bytecode::dump;

use super::loader::load_program;

pub struct DumpArgs {
    pub file: PathBuf,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let program = load_program(&args.file, args.strict, args.color);
    print!("{}", dump(&program, Colors::new(args.color)));
}
