//! Shared program loading for the program-consuming commands.

use std::path::Path;

use chrysalis_lib::{Artifact, Diagnostics, Program};

/// Read `path` and compile it if it holds assembly text.
///
/// Diagnostics are rendered to stderr, warnings included. On failure the
/// returned message is what the caller prints after `error: `.
pub fn try_load_program(path: &Path, strict: bool, color: bool) -> Result<Program, String> {
    let artifact = Artifact::read(path).map_err(|e| e.to_string())?;
    let path_str = path.to_string_lossy();
    let render = |diagnostics: &Diagnostics| {
        if let Some(source) = artifact.source() {
            eprint!(
                "{}",
                diagnostics
                    .printer(source)
                    .path(&path_str)
                    .colored(color)
                    .render()
            );
        }
    };

    match artifact.compile(strict) {
        Ok(compiled) => {
            if !compiled.diagnostics.is_empty() {
                render(&compiled.diagnostics);
            }
            Ok(compiled.program)
        }
        Err(e) => {
            if let Some(diagnostics) = e.diagnostics() {
                render(diagnostics);
            }
            Err(e.to_string())
        }
    }
}

/// Like [`try_load_program`] but exits with status 1 on failure.
pub fn load_program(path: &Path, strict: bool, color: bool) -> Program {
    try_load_program(path, strict, color).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    })
}
