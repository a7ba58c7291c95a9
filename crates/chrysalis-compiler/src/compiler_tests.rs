use chrysalis_bytecode::{Builtin, Instruction};
use chrysalis_core::{DATA_END, POOL_SIZE, POOL_START};
use indoc::indoc;

use crate::{CompileError, Compiler, DiagnosticKind, Severity, compile};

fn code_of(instrs: &[Instruction]) -> Vec<u8> {
    let mut code = Vec::new();
    for instr in instrs {
        instr.write_to(&mut code);
    }
    code
}

fn kinds(source: &str) -> Vec<DiagnosticKind> {
    let diagnostics = match compile(source) {
        Ok(compiled) => compiled.diagnostics,
        Err(e) => e.diagnostics().cloned().unwrap_or_default(),
    };
    diagnostics.iter().map(|d| d.kind()).collect()
}

#[test]
fn arithmetic_program() {
    let compiled = compile("PUSH 2\nPUSH 3\nADD\nPRINT").unwrap();

    assert_eq!(
        compiled.program.code(),
        code_of(&[
            Instruction::Push(2),
            Instruction::Push(3),
            Instruction::Add,
            Instruction::Print,
        ])
    );
    assert!(compiled.program.pool().is_empty());
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn string_literals_go_to_pool() {
    let compiled = compile(indoc! {r#"
    PUSH "hi"
    PUSH "two words"
    PUSH ""
    "#})
    .unwrap();
    let base = POOL_START as u32;

    assert_eq!(compiled.program.pool(), b"hi\0two words\0\0");
    assert_eq!(compiled.program.literal_count(), 3);
    assert_eq!(
        compiled.program.code(),
        code_of(&[
            Instruction::PushStr { offset: base, len: 2 },
            Instruction::PushStr { offset: base + 3, len: 9 },
            Instruction::PushStr { offset: base + 13, len: 0 },
        ])
    );
}

#[test]
fn negative_and_extreme_integers() {
    let compiled = compile("PUSH -7 PUSH 9223372036854775807 PUSH -9223372036854775808").unwrap();
    assert_eq!(
        compiled.program.code(),
        code_of(&[
            Instruction::Push(-7),
            Instruction::Push(i64::MAX),
            Instruction::Push(i64::MIN),
        ])
    );
}

#[test]
fn integer_overflow_is_skipped_with_a_warning() {
    let compiled = compile("PUSH 2\nPRINT\nPUSH 9223372036854775808\nPUSH 3\nPRINT").unwrap();
    assert_eq!(
        compiled.program.code(),
        code_of(&[
            Instruction::Push(2),
            Instruction::Print,
            Instruction::Push(3),
            Instruction::Print,
        ])
    );
    assert_eq!(compiled.diagnostics.warning_count(), 1);
    assert!(!compiled.diagnostics.has_errors());
    assert_eq!(kinds("PUSH 9223372036854775808"), [DiagnosticKind::IntegerOutOfRange]);

    let err = Compiler::new("PUSH -9223372036854775809")
        .strict(true)
        .compile()
        .unwrap_err();
    assert!(matches!(err, CompileError::Strict(ref d) if d.warning_count() == 1));
}

#[test]
fn every_mnemonic() {
    let compiled = compile(indoc! {"
    POP ADD SUB MUL DIV STORE LOAD CONCAT DUP SWAP PRINT HASH HASH160 VERIFY
    CALL qr_mine CALL qr_generate CALL qr_print CALL qr_verify
    "})
    .unwrap();

    let mut expected = vec![
        Instruction::Pop,
        Instruction::Add,
        Instruction::Sub,
        Instruction::Mul,
        Instruction::Div,
        Instruction::Store,
        Instruction::Load,
        Instruction::Concat,
        Instruction::Dup,
        Instruction::Swap,
        Instruction::Print,
        Instruction::Hash,
        Instruction::Hash160,
        Instruction::Verify,
    ];
    expected.extend(Builtin::ALL.map(Instruction::Call));
    assert_eq!(compiled.program.code(), code_of(&expected));
}

#[test]
fn unknown_tokens_warn_without_changing_output() {
    let clean = compile("PUSH 1\nPRINT").unwrap();
    let noisy = compile("PUSH 1\nFROB\nprint\nPRINT").unwrap();

    assert_eq!(clean.program, noisy.program);
    assert_eq!(noisy.diagnostics.warning_count(), 2);
    assert!(!noisy.diagnostics.has_errors());
    assert_eq!(
        kinds("PUSH 1\nFROB\nprint\nPRINT"),
        [DiagnosticKind::UnknownMnemonic, DiagnosticKind::UnknownMnemonic]
    );
}

#[test]
fn strict_mode_rejects_warnings() {
    let err = Compiler::new("FROB").strict(true).compile().unwrap_err();
    assert!(matches!(err, CompileError::Strict(ref d) if d.warning_count() == 1));

    assert!(Compiler::new("PUSH 1").strict(true).compile().is_ok());
}

#[test]
fn push_without_literal_leaves_next_token() {
    let compiled = compile("PUSH PRINT").unwrap();

    assert_eq!(compiled.program.code(), code_of(&[Instruction::Print]));
    assert_eq!(kinds("PUSH PRINT"), [DiagnosticKind::MissingPushOperand]);
    assert_eq!(kinds("PUSH"), [DiagnosticKind::MissingPushOperand]);
    assert_eq!(
        kinds("PUSH 12abc"),
        [DiagnosticKind::MissingPushOperand, DiagnosticKind::UnknownMnemonic]
    );
}

#[test]
fn call_targets() {
    assert!(kinds("CALL qr_mine").is_empty());
    assert_eq!(kinds("CALL qr_steal"), [DiagnosticKind::UnknownCallTarget]);
    assert_eq!(kinds("CALL"), [DiagnosticKind::MissingCallTarget]);

    let compiled = compile("CALL PRINT").unwrap();
    assert_eq!(compiled.program.code(), code_of(&[Instruction::Print]));
    assert_eq!(kinds("CALL PRINT"), [DiagnosticKind::MissingCallTarget]);
}

#[test]
fn strings_outside_push() {
    assert_eq!(kinds(r#""loose" PRINT"#), [DiagnosticKind::StrayString]);
}

#[test]
fn unterminated_string_is_kept() {
    let compiled = compile("PUSH \"to the end").unwrap();

    assert_eq!(compiled.program.pool(), b"to the end\0");
    assert_eq!(kinds("PUSH \"to the end"), [DiagnosticKind::UnterminatedString]);
}

#[test]
fn comments_are_ignored() {
    let compiled = compile(indoc! {"
    # leading comment
    PUSH 5 # trailing
    PRINT#glued
    "})
    .unwrap();

    assert_eq!(
        compiled.program.code(),
        code_of(&[Instruction::Push(5), Instruction::Print])
    );
    assert!(compiled.diagnostics.is_empty());
}

#[test]
fn pool_overflow_is_an_error() {
    let big = "x".repeat(POOL_SIZE - 1);
    let fits = compile(&format!("PUSH \"{big}\"")).unwrap();
    assert_eq!(fits.program.pool().len(), POOL_SIZE);

    let source = format!("PUSH \"{big}\" PUSH \"y\"");
    let err = compile(&source).unwrap_err();
    let diagnostics = err.diagnostics().unwrap();
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(
        diagnostics.iter().next().map(|d| d.message().to_string()),
        Some("string pool is full: 2 bytes needed, 0 left".to_string())
    );
}

#[test]
fn code_overflow_is_an_error() {
    let fitting = DATA_END / 9;
    let source = "PUSH 1\n".repeat(fitting);
    assert_eq!(compile(&source).unwrap().program.code().len(), fitting * 9);

    let source = "PUSH 1\n".repeat(fitting + 1);
    let err = compile(&source).unwrap_err();
    assert_eq!(err.diagnostics().map(|d| d.error_count()), Some(1));
}

#[test]
fn compilation_is_deterministic() {
    let source = indoc! {r#"
    PUSH "a" PUSH "b" CONCAT PRINT
    PUSH "header" PUSH "target" CALL qr_mine PRINT
    "#};

    let first = compile(source).unwrap();
    let second = compile(source).unwrap();
    assert_eq!(first.program, second.program);
    assert_eq!(first.program.to_bytes(), second.program.to_bytes());
}

#[test]
fn rendered_diagnostics() {
    let source = "PUSH 1\nFROB\n";
    let compiled = compile(source).unwrap();
    let d = compiled.diagnostics.iter().next().unwrap();
    assert_eq!(d.severity(), Severity::Warning);
    assert_eq!(d.range(), 7..11);

    insta::assert_snapshot!(compiled.diagnostics.render(source), @r"
    warning: unknown mnemonic: `FROB`
      |
    2 | FROB
      | ^^^^
    ");
}
