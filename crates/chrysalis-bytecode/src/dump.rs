//! Human-readable program dump.

use std::fmt::Write as _;

use chrysalis_core::Colors;
use chrysalis_core::utils::{truncate_text, width_for_count};

use crate::instructions::Instruction;
use crate::program::Program;

/// Longest literal preview shown next to `PUSH_STR`.
const PREVIEW_LEN: usize = 32;

/// Render the pool literals followed by the disassembled code.
pub fn dump(program: &Program, colors: Colors) -> String {
    let mut out = String::new();
    dump_pool(&mut out, program, colors);
    dump_code(&mut out, program, colors);
    out
}

fn dump_pool(out: &mut String, program: &Program, c: Colors) {
    let w = width_for_count(program.literal_count() as usize);

    writeln!(out, "{}[pool]{}", c.blue, c.reset).unwrap();
    for (i, (addr, bytes)) in program.literals().enumerate() {
        writeln!(
            out,
            "L{i:0w$} {}0x{addr:05X}{} {}{:?}{}",
            c.dim,
            c.reset,
            c.green,
            String::from_utf8_lossy(bytes),
            c.reset
        )
        .unwrap();
    }
}

fn dump_code(out: &mut String, program: &Program, c: Colors) {
    writeln!(out, "{}[code]{}", c.blue, c.reset).unwrap();
    for (pc, decoded) in program.instructions() {
        write!(out, "{}{pc:04X}{}  ", c.dim, c.reset).unwrap();
        match decoded {
            Ok(instr) => {
                write!(out, "{instr}").unwrap();
                if let Some(preview) = literal_preview(program, &instr) {
                    write!(out, "  {}{preview:?}{}", c.green, c.reset).unwrap();
                }
            }
            Err(e) => write!(out, "{}?? {e}{}", c.red, c.reset).unwrap(),
        }
        out.push('\n');
    }
}

fn literal_preview(program: &Program, instr: &Instruction) -> Option<String> {
    let Instruction::PushStr { offset, len } = *instr else {
        return None;
    };
    let start = (offset as usize).checked_sub(chrysalis_core::POOL_START)?;
    let bytes = program.pool().get(start..start.checked_add(len as usize)?)?;
    Some(truncate_text(&String::from_utf8_lossy(bytes), PREVIEW_LEN))
}
