use std::fs;
use std::path::Path;

use chrysalis_bytecode::Program;
use chrysalis_compiler::{Compiled, Compiler, Diagnostics};

use crate::{Error, Result};

/// What a file on disk turned out to hold.
#[derive(Clone, Debug)]
pub enum Artifact {
    /// A `.chb` program image.
    Image(Program),
    /// Assembly text.
    Source(String),
}

impl Artifact {
    /// Read `path`, sniffing the image magic.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if Program::is_image(&bytes) {
            return Ok(Self::Image(Program::from_bytes(&bytes)?));
        }
        String::from_utf8(bytes)
            .map(Self::Source)
            .map_err(|_| Error::NotText {
                path: path.to_path_buf(),
            })
    }

    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Source(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    /// The program to run: images as-is, text compiled.
    pub fn compile(&self, strict: bool) -> Result<Compiled> {
        match self {
            Self::Image(program) => Ok(Compiled {
                program: program.clone(),
                diagnostics: Diagnostics::new(),
            }),
            Self::Source(text) => Ok(Compiler::new(text).strict(strict).compile()?),
        }
    }
}
