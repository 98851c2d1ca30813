//! Error types for the Jack compiler pipeline.
//!
//! A small closed set of error kinds: lexical, syntactic, and semantic
//! (undefined-symbol) failures each carry enough context for one
//! actionable diagnostic line, and I/O failures wrap `std::io::Error`.

use std::fmt;
use std::path::PathBuf;

/// A single source position, used to locate the offending lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Errors produced anywhere in the tokenizer / symbol table / parser-codegen
/// pipeline.
#[derive(Debug)]
pub enum JackError {
    /// An integer literal fell outside `[0, 32767]`.
    LexOverflow {
        file: Option<PathBuf>,
        lexeme: String,
        at: Location,
    },
    /// A chunk of source text could not be classified as any token variant
    /// (e.g. an unterminated string literal).
    LexMalformed {
        file: Option<PathBuf>,
        lexeme: String,
        at: Location,
    },
    /// The parser expected a token of one grammatical class but found
    /// another.
    ParseUnexpectedToken {
        file: Option<PathBuf>,
        expected: String,
        found: String,
        at: Location,
    },
    /// An lvalue or rvalue identifier resolved in neither the subroutine
    /// nor the class symbol table.
    UndefinedVariable {
        file: Option<PathBuf>,
        name: String,
        at: Location,
    },
    /// Any failure reading source or writing generated VM text.
    Io {
        file: Option<PathBuf>,
        source: std::io::Error,
    },
}

impl fmt::Display for JackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file_prefix = |file: &Option<PathBuf>| match file {
            Some(p) => format!("{}: ", p.display()),
            None => String::new(),
        };
        match self {
            JackError::LexOverflow { file, lexeme, at } => write!(
                f,
                "{}{}: integer literal '{}' out of range [0, 32767]",
                file_prefix(file),
                at,
                lexeme
            ),
            JackError::LexMalformed { file, lexeme, at } => write!(
                f,
                "{}{}: unrecognized token '{}'",
                file_prefix(file),
                at,
                lexeme
            ),
            JackError::ParseUnexpectedToken {
                file,
                expected,
                found,
                at,
            } => write!(
                f,
                "{}{}: expected {}, found '{}'",
                file_prefix(file),
                at,
                expected,
                found
            ),
            JackError::UndefinedVariable { file, name, at } => write!(
                f,
                "{}{}: undefined variable '{}'",
                file_prefix(file),
                at,
                name
            ),
            JackError::Io { file, source } => match file {
                Some(p) => write!(f, "{}: {}", p.display(), source),
                None => write!(f, "{}", source),
            },
        }
    }
}

impl std::error::Error for JackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            JackError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for JackError {
    fn from(source: std::io::Error) -> Self {
        JackError::Io { file: None, source }
    }
}

pub type JackResult<T> = Result<T, JackError>;
