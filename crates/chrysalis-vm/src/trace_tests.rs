use chrysalis_compiler::compile;
use chrysalis_core::Colors;

use crate::{PrintTracer, Verbosity, Vm};

fn trace(source: &str, verbosity: Verbosity) -> Vec<String> {
    let program = compile(source).unwrap().program;
    let mut tracer = PrintTracer::new(verbosity, Colors::OFF).pc_width(program.code().len());
    let mut out = Vec::new();
    Vm::new()
        .execute_with(&program, &mut out, &mut tracer)
        .unwrap();
    tracer.into_lines()
}

#[test]
fn default_shows_instructions_only() {
    let lines = trace("PUSH 2 PUSH 3 ADD PRINT", Verbosity::Default);

    assert_eq!(
        lines,
        ["  0000  PUSH 2", "  0009  PUSH 3", "  0012  ADD", "  0013  PRINT"]
    );
}

#[test]
fn verbose_shows_values_and_output() {
    let lines = trace("PUSH 2 PUSH 3 ADD PRINT", Verbosity::Verbose);

    assert_eq!(
        lines,
        [
            "  0000  PUSH 2",
            "        ↳ 2",
            "  0009  PUSH 3",
            "        ↳ 3",
            "  0012  ADD",
            "        ↳ 5",
            "  0013  PRINT",
            "        » 5",
        ]
    );
}

#[test]
fn faults_are_always_shown() {
    let lines = trace("PUSH 1 PUSH 0 DIV", Verbosity::Default);

    assert_eq!(
        lines,
        [
            "  0000  PUSH 1",
            "  0009  PUSH 0",
            "  0012  DIV",
            "        ✗ division by zero",
        ]
    );
}

#[test]
fn builtin_call_and_return() {
    let lines = trace("CALL qr_print", Verbosity::Default);

    assert_eq!(
        lines,
        [
            "  0000  CALL qr_print",
            "        → qr_print [1]",
            "        ← qr_print [1]",
            "        ✗ stack underflow",
        ]
    );
}

#[test]
fn string_push_shows_reference() {
    let lines = trace(r#"PUSH "hi""#, Verbosity::Verbose);

    assert_eq!(lines, ["  0000  PUSH_STR 0x10000 2", "        ↳ str@0x10000+2"]);
}

#[test]
fn colors_wrap_mnemonic() {
    let program = compile("POP").unwrap().program;
    let mut tracer = PrintTracer::new(Verbosity::Default, Colors::ON);
    Vm::new()
        .execute_with(&program, &mut Vec::<u8>::new(), &mut tracer)
        .unwrap();

    assert_eq!(
        tracer.lines(),
        ["  \x1b[2m0000\x1b[0m  \x1b[34mPOP\x1b[0m"]
    );
}
