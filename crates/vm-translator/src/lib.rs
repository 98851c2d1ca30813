//! VM-to-Hack-assembly translator library.

pub mod code_writer;
pub mod command;
pub mod config;
pub mod error;
pub mod parser;

pub use code_writer::CodeWriter;
pub use command::{Command, CommandKind};
pub use config::TranslatorConfig;
pub use error::{Location, VmError, VmResult};
pub use parser::VmParser;

use std::fs;
use std::path::{Path, PathBuf};

/// Translates a single `.vm` file's source text against an already-primed
/// `CodeWriter`, driving it command by command via a [`VmParser`] cursor.
fn translate_into<W: std::io::Write>(
    source: &str,
    file: Option<PathBuf>,
    writer: &mut CodeWriter<W>,
) -> VmResult<()> {
    let mut parser = VmParser::new(source, file.as_ref())?;
    while parser.has_more_commands() {
        parser.advance();
        let at = Location {
            file: file.clone(),
            line: parser.line_number(),
        };
        writer.dispatch(parser.command(), &at)?;
    }
    Ok(())
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Translates a single `.vm` file to a sibling `.asm` file.
pub fn translate_file(path: &Path, config: &TranslatorConfig) -> VmResult<PathBuf> {
    if config.trace {
        tracing::debug!(file = %path.display(), "translating");
    }
    let source = fs::read_to_string(path).map_err(|e| VmError::Io {
        file: Some(path.to_path_buf()),
        source: e,
    })?;
    let out_path = path.with_extension("asm");
    let mut buf = Vec::new();
    let mut writer = CodeWriter::new(&mut buf)?;
    writer.set_file_name(&stem_of(path));
    translate_into(&source, Some(path.to_path_buf()), &mut writer)?;
    fs::write(&out_path, buf).map_err(|e| VmError::Io {
        file: Some(out_path.clone()),
        source: e,
    })?;
    Ok(out_path)
}

/// Translates every `.vm` file in a directory (non-recursive) into a
/// single `<dirname>/<dirname>.asm`, sharing one `CodeWriter` across files
/// so call-site counters stay unique across the whole directory.
pub fn translate_directory(dir: &Path, config: &TranslatorConfig) -> VmResult<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| VmError::Io {
            file: Some(dir.to_path_buf()),
            source: e,
        })?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("vm"))
        .collect();
    entries.sort();

    let dir_name = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("out")
        .to_string();
    let out_path = dir.join(format!("{}.asm", dir_name));

    let mut buf = Vec::new();
    let mut writer = CodeWriter::new(&mut buf)?;
    for vm_file in &entries {
        if config.trace {
            tracing::debug!(file = %vm_file.display(), "translating");
        }
        writer.set_file_name(&stem_of(vm_file));
        let source = fs::read_to_string(vm_file).map_err(|e| VmError::Io {
            file: Some(vm_file.clone()),
            source: e,
        })?;
        translate_into(&source, Some(vm_file.clone()), &mut writer)?;
    }
    fs::write(&out_path, buf).map_err(|e| VmError::Io {
        file: Some(out_path.clone()),
        source: e,
    })?;
    Ok(out_path)
}

/// Translates a single `.vm` file, or a directory of them, to assembly.
pub fn translate_path(path: &Path, config: &TranslatorConfig) -> VmResult<PathBuf> {
    if path.is_dir() {
        translate_directory(path, config)
    } else {
        translate_file(path, config)
    }
}
