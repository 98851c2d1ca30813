//! Error types for the VM-to-assembly translator.

use std::fmt;
use std::path::PathBuf;

/// A single line position within a `.vm` file, used to locate a bad
/// command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub file: Option<PathBuf>,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(p) => write!(f, "{}:{}", p.display(), self.line),
            None => write!(f, "line {}", self.line),
        }
    }
}

#[derive(Debug)]
pub enum VmError {
    /// A non-blank, non-comment line did not match any of the ten command
    /// kinds.
    InvalidCommand { text: String, at: Location },
    /// A `push`/`pop` named a segment outside the known eight.
    InvalidSegment { segment: String, at: Location },
    /// Any failure reading VM source or writing generated assembly.
    Io {
        file: Option<PathBuf>,
        source: std::io::Error,
    },
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmError::InvalidCommand { text, at } => {
                write!(f, "{}: unrecognized VM command '{}'", at, text)
            }
            VmError::InvalidSegment { segment, at } => {
                write!(f, "{}: unknown segment '{}'", at, segment)
            }
            VmError::Io { file, source } => match file {
                Some(p) => write!(f, "{}: {}", p.display(), source),
                None => write!(f, "{}", source),
            },
        }
    }
}

impl std::error::Error for VmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VmError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for VmError {
    fn from(source: std::io::Error) -> Self {
        VmError::Io { file: None, source }
    }
}

pub type VmResult<T> = Result<T, VmError>;
