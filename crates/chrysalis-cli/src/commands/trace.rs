use std::io::{self, Write};
use std::path::PathBuf;

use chrysalis_lib::{Colors, MineLimits, PrintTracer, Verbosity, Vm};

use super::loader::load_program;

pub struct TraceArgs {
    pub file: PathBuf,
    pub strict: bool,
    pub verbosity: Verbosity,
    pub limits: MineLimits,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let program = load_program(&args.file, args.strict, args.color);

    let mut vm = Vm::builder().mine_limits(args.limits).build();
    let mut tracer =
        PrintTracer::new(args.verbosity, Colors::new(args.color)).pc_width(program.code().len());

    // Program output is held back so it does not interleave with the trace.
    let mut output = Vec::new();
    let result = vm.execute_with(&program, &mut output, &mut tracer);

    tracer.print();
    if !output.is_empty() {
        println!();
        let _ = io::stdout().write_all(&output);
    }

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(2);
    }
}
