//! Thin VM-instruction emitter.
//!
//! Writes directly to an output stream rather than building an in-memory
//! tree — the only artifact this crate produces is the flat `.vm` text
//! directly as a stream.

use crate::error::JackError;
use crate::symbol_table::Kind;
use std::io::Write;

/// One of the eight VM segments addressable by push/pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl Segment {
    fn as_str(self) -> &'static str {
        match self {
            Segment::Constant => "constant",
            Segment::Argument => "argument",
            Segment::Local => "local",
            Segment::Static => "static",
            Segment::This => "this",
            Segment::That => "that",
            Segment::Pointer => "pointer",
            Segment::Temp => "temp",
        }
    }
}

/// Maps a variable's storage [`Kind`] to its VM segment.
pub fn segment_of_kind(kind: Kind) -> Segment {
    match kind {
        Kind::Static => Segment::Static,
        Kind::Field => Segment::This,
        Kind::Arg => Segment::Argument,
        Kind::Var => Segment::Local,
        Kind::None => unreachable!("segment_of_kind called with Kind::None"),
    }
}

pub struct VmEmitter<W: Write> {
    out: W,
}

impl<W: Write> VmEmitter<W> {
    pub fn new(out: W) -> Self {
        VmEmitter { out }
    }

    fn line(&mut self, s: &str) -> Result<(), JackError> {
        writeln!(self.out, "{}", s).map_err(JackError::from)
    }

    pub fn write_push(&mut self, segment: Segment, index: usize) -> Result<(), JackError> {
        self.line(&format!("push {} {}", segment.as_str(), index))
    }

    pub fn write_pop(&mut self, segment: Segment, index: usize) -> Result<(), JackError> {
        self.line(&format!("pop {} {}", segment.as_str(), index))
    }

    pub fn write_arithmetic(&mut self, command: &str) -> Result<(), JackError> {
        self.line(command)
    }

    pub fn write_label(&mut self, label: &str) -> Result<(), JackError> {
        self.line(&format!("label {}", label))
    }

    pub fn write_goto(&mut self, label: &str) -> Result<(), JackError> {
        self.line(&format!("goto {}", label))
    }

    pub fn write_if(&mut self, label: &str) -> Result<(), JackError> {
        self.line(&format!("if-goto {}", label))
    }

    pub fn write_call(&mut self, name: &str, n_args: usize) -> Result<(), JackError> {
        self.line(&format!("call {} {}", name, n_args))
    }

    pub fn write_function(&mut self, name: &str, n_locals: usize) -> Result<(), JackError> {
        self.line(&format!("function {} {}", name, n_locals))
    }

    pub fn write_return(&mut self) -> Result<(), JackError> {
        self.line("return")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_expected_push_pop_text() {
        let mut buf = Vec::new();
        {
            let mut w = VmEmitter::new(&mut buf);
            w.write_push(Segment::Local, 0).unwrap();
            w.write_pop(Segment::Argument, 2).unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "push local 0\npop argument 2\n");
    }
}
