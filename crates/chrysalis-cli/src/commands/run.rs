use std::io::{self, Write};
use std::path::PathBuf;

use chrysalis_lib::{MineLimits, Vm};

use super::loader::load_program;

pub struct RunArgs {
    pub file: PathBuf,
    pub strict: bool,
    pub limits: MineLimits,
    pub color: bool,
}

pub fn run(args: RunArgs) {
    let program = load_program(&args.file, args.strict, args.color);

    let mut vm = Vm::builder().mine_limits(args.limits).build();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = vm.execute(&program, &mut out) {
        let _ = out.flush();
        eprintln!("error: {}", e);
        std::process::exit(2);
    }
}
