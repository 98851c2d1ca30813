//! Jack-to-VM compiler library.
//!
//! A single pass turns Jack source into VM instruction text: tokenize,
//! then recursive-descent parse with code generation interleaved, no
//! intermediate syntax tree.

pub mod compilation_engine;
pub mod config;
pub mod error;
pub mod symbol_table;
pub mod token;
pub mod tokenizer;
pub mod vm_emitter;

pub use compilation_engine::CompilationEngine;
pub use config::CompilerConfig;
pub use error::{JackError, JackResult, Location};
pub use symbol_table::{Kind, SymbolTable};
pub use token::{Keyword, Token};
pub use tokenizer::{JackTokenizer, TokenType};
pub use vm_emitter::{segment_of_kind, Segment, VmEmitter};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Compiles a single `.jack` file's source text, returning the generated
/// VM instruction text.
pub fn compile_source(source: &str, file: Option<PathBuf>) -> JackResult<String> {
    let mut buf = Vec::new();
    let mut engine = CompilationEngine::new(source, &mut buf, file)?;
    engine.compile_class()?;
    Ok(String::from_utf8(buf).expect("generated VM text is always valid UTF-8"))
}

/// Compiles one `.jack` file to a sibling `.vm` file with the same stem.
fn compile_file(path: &Path, config: &CompilerConfig) -> JackResult<PathBuf> {
    if config.trace {
        tracing::debug!(file = %path.display(), "compiling");
    }
    let source = fs::read_to_string(path).map_err(|e| JackError::Io {
        file: Some(path.to_path_buf()),
        source: e,
    })?;
    let vm_text = compile_source(&source, Some(path.to_path_buf()))?;
    let out_path = path.with_extension("vm");
    let mut out = fs::File::create(&out_path).map_err(|e| JackError::Io {
        file: Some(out_path.clone()),
        source: e,
    })?;
    out.write_all(vm_text.as_bytes()).map_err(|e| JackError::Io {
        file: Some(out_path.clone()),
        source: e,
    })?;
    Ok(out_path)
}

/// Compiles a single `.jack` file, or every `.jack` file in a directory
/// (non-recursively), writing one `.vm` output per input. Returns the
/// paths written.
pub fn compile_path(path: &Path, config: &CompilerConfig) -> JackResult<Vec<PathBuf>> {
    if path.is_dir() {
        let mut written = Vec::new();
        let mut entries: Vec<PathBuf> = fs::read_dir(path)
            .map_err(|e| JackError::Io {
                file: Some(path.to_path_buf()),
                source: e,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("jack"))
            .collect();
        entries.sort();
        for jack_file in entries {
            written.push(compile_file(&jack_file, config)?);
        }
        Ok(written)
    } else {
        Ok(vec![compile_file(path, config)?])
    }
}
