//! Hack assembly emission.
//!
//! One `CodeWriter` can process several VM files in sequence — directory
//! mode shares a single instance across every `.vm` file so that call-site
//! counters stay unique within the whole translation unit, not just within
//! one file.

use crate::command::{Command, CommandKind};
use crate::error::{Location, VmError, VmResult};
use std::collections::HashMap;
use std::io::Write;

const POINTER_REGS: [&str; 2] = ["THIS", "THAT"];

fn segment_register(segment: &str) -> Option<&'static str> {
    match segment {
        "argument" => Some("ARG"),
        "local" => Some("LCL"),
        "this" => Some("THIS"),
        "that" => Some("THAT"),
        _ => None,
    }
}

pub struct CodeWriter<W: Write> {
    out: W,
    /// Stem of the `.vm` file currently being translated, used to mangle
    /// static variable names. Reset by [`Self::set_file_name`].
    vm_file_stem: String,
    /// The most recently declared function, used to scope `label`/`goto`/
    /// `if-goto` and to key the call-site counter. Reset by
    /// [`Self::set_file_name`], unlike the counters below.
    current_function: String,
    /// Call-site counters, keyed by the *calling* function's name. These
    /// persist across `set_file_name` calls so labels stay unique across
    /// an entire directory translation.
    call_counters: HashMap<String, usize>,
    comparison_counter: usize,
}

impl<W: Write> CodeWriter<W> {
    /// Writes the bootstrap sequence (`SP = 256` then `call Sys.init 0`)
    /// immediately.
    pub fn new(out: W) -> VmResult<Self> {
        tracing::debug!("emitting bootstrap");
        let mut writer = CodeWriter {
            out,
            vm_file_stem: String::new(),
            current_function: "Bootstrap".to_string(),
            call_counters: HashMap::new(),
            comparison_counter: 0,
        };
        writer.raw("@256")?;
        writer.raw("D=A")?;
        writer.raw("@SP")?;
        writer.raw("M=D")?;
        writer.write_call("Sys.init", 0, &loc(None, 0))?;
        Ok(writer)
    }

    fn raw(&mut self, line: &str) -> VmResult<()> {
        writeln!(self.out, "{}", line).map_err(VmError::from)
    }

    /// Switches the static-mangling prefix to a new VM file's stem and
    /// clears the current function scope. Call-site counters are
    /// untouched.
    pub fn set_file_name(&mut self, stem: &str) {
        self.vm_file_stem = stem.to_string();
        self.current_function = String::new();
    }

    pub fn dispatch(&mut self, command: &Command, at: &Location) -> VmResult<()> {
        match command.kind {
            CommandKind::Arithmetic => {
                self.write_arithmetic(command.arg1.as_deref().unwrap())
            }
            CommandKind::Push => self.write_push_pop(true, command, at),
            CommandKind::Pop => self.write_push_pop(false, command, at),
            CommandKind::Label => self.write_label(command.arg1.as_deref().unwrap()),
            CommandKind::Goto => self.write_goto(command.arg1.as_deref().unwrap()),
            CommandKind::If => self.write_if(command.arg1.as_deref().unwrap()),
            CommandKind::Function => self.write_function(
                command.arg1.as_deref().unwrap(),
                command.arg2.unwrap() as usize,
            ),
            CommandKind::Call => self.write_call(
                command.arg1.as_deref().unwrap(),
                command.arg2.unwrap() as usize,
                at,
            ),
            CommandKind::Return => self.write_return(),
        }
    }

    fn write_push_pop(&mut self, is_push: bool, command: &Command, at: &Location) -> VmResult<()> {
        let segment = command.arg1.as_deref().unwrap();
        let index = command.arg2.unwrap();
        let known = [
            "constant", "argument", "local", "static", "this", "that", "pointer", "temp",
        ];
        if !known.contains(&segment) {
            return Err(VmError::InvalidSegment {
                segment: segment.to_string(),
                at: at.clone(),
            });
        }
        if is_push {
            self.write_push(segment, index)
        } else {
            self.write_pop(segment, index)
        }
    }

    fn push_d(&mut self) -> VmResult<()> {
        self.raw("@SP")?;
        self.raw("A=M")?;
        self.raw("M=D")?;
        self.raw("@SP")?;
        self.raw("M=M+1")
    }

    fn write_push(&mut self, segment: &str, index: i64) -> VmResult<()> {
        match segment {
            "constant" => {
                self.raw(&format!("@{}", index))?;
                self.raw("D=A")?;
            }
            "temp" => {
                self.raw(&format!("@{}", 5 + index))?;
                self.raw("D=M")?;
            }
            "pointer" => {
                self.raw(&format!("@{}", POINTER_REGS[index as usize]))?;
                self.raw("D=M")?;
            }
            "static" => {
                self.raw(&format!("@{}.{}", self.vm_file_stem, index))?;
                self.raw("D=M")?;
            }
            _ => {
                let reg = segment_register(segment).expect("segment already validated");
                self.raw(&format!("@{}", index))?;
                self.raw("D=A")?;
                self.raw(&format!("@{}", reg))?;
                self.raw("A=D+M")?;
                self.raw("D=M")?;
            }
        }
        self.push_d()
    }

    fn pop_d_into(&mut self) -> VmResult<()> {
        self.raw("@SP")?;
        self.raw("AM=M-1")?;
        self.raw("D=M")
    }

    fn write_pop(&mut self, segment: &str, index: i64) -> VmResult<()> {
        match segment {
            "temp" => {
                self.pop_d_into()?;
                self.raw(&format!("@{}", 5 + index))?;
                self.raw("M=D")
            }
            "pointer" => {
                self.pop_d_into()?;
                self.raw(&format!("@{}", POINTER_REGS[index as usize]))?;
                self.raw("M=D")
            }
            "static" => {
                self.pop_d_into()?;
                self.raw(&format!("@{}.{}", self.vm_file_stem, index))?;
                self.raw("M=D")
            }
            _ => {
                let reg = segment_register(segment).expect("segment already validated");
                if index == 0 {
                    self.pop_d_into()?;
                    self.raw(&format!("@{}", reg))?;
                    self.raw("A=M")?;
                    self.raw("M=D")
                } else {
                    self.raw(&format!("@{}", index))?;
                    self.raw("D=A")?;
                    self.raw(&format!("@{}", reg))?;
                    self.raw("D=D+M")?;
                    self.raw("@R13")?;
                    self.raw("M=D")?;
                    self.pop_d_into()?;
                    self.raw("@R13")?;
                    self.raw("A=M")?;
                    self.raw("M=D")
                }
            }
        }
    }

    fn write_arithmetic(&mut self, op: &str) -> VmResult<()> {
        match op {
            "add" | "sub" | "and" | "or" => {
                self.raw("@SP")?;
                self.raw("AM=M-1")?;
                self.raw("D=M")?;
                self.raw("A=A-1")?;
                let expr = match op {
                    "add" => "M=M+D",
                    "sub" => "M=M-D",
                    "and" => "M=M&D",
                    "or" => "M=M|D",
                    _ => unreachable!(),
                };
                self.raw(expr)
            }
            "neg" | "not" => {
                self.raw("@SP")?;
                self.raw("A=M-1")?;
                self.raw(if op == "neg" { "M=-M" } else { "M=!M" })
            }
            "eq" | "gt" | "lt" => {
                let k = self.comparison_counter;
                self.comparison_counter += 1;
                let jump = match op {
                    "eq" => "JEQ",
                    "gt" => "JGT",
                    "lt" => "JLT",
                    _ => unreachable!(),
                };
                self.raw("@SP")?;
                self.raw("AM=M-1")?;
                self.raw("D=M")?;
                self.raw("A=A-1")?;
                self.raw("D=M-D")?;
                self.raw(&format!("@COMP_TRUE{}", k))?;
                self.raw(&format!("D;{}", jump))?;
                self.raw("@SP")?;
                self.raw("A=M-1")?;
                self.raw("M=0")?;
                self.raw(&format!("@COMP_END{}", k))?;
                self.raw("0;JMP")?;
                self.raw(&format!("(COMP_TRUE{})", k))?;
                self.raw("@SP")?;
                self.raw("A=M-1")?;
                self.raw("M=-1")?;
                self.raw(&format!("(COMP_END{})", k))
            }
            other => unreachable!("arithmetic mnemonic already validated by the parser: {other}"),
        }
    }

    fn scoped(&self, label: &str) -> String {
        format!("{}${}", self.current_function, label)
    }

    fn write_label(&mut self, label: &str) -> VmResult<()> {
        let scoped = self.scoped(label);
        self.raw(&format!("({})", scoped))
    }

    fn write_goto(&mut self, label: &str) -> VmResult<()> {
        let scoped = self.scoped(label);
        self.raw(&format!("@{}", scoped))?;
        self.raw("0;JMP")
    }

    fn write_if(&mut self, label: &str) -> VmResult<()> {
        let scoped = self.scoped(label);
        self.pop_d_into()?;
        self.raw(&format!("@{}", scoped))?;
        self.raw("D;JNE")
    }

    fn write_function(&mut self, name: &str, n_locals: usize) -> VmResult<()> {
        tracing::debug!(function = %name, n_locals, "emitting function label");
        self.current_function = name.to_string();
        self.raw(&format!("({})", name))?;
        for _ in 0..n_locals {
            self.write_push("constant", 0)?;
        }
        Ok(())
    }

    fn write_call(&mut self, name: &str, n_args: usize, _at: &Location) -> VmResult<()> {
        let counter = self.call_counters.entry(self.current_function.clone()).or_insert(0);
        let site = *counter;
        *counter += 1;
        let return_label = format!("{}$ret.{}", self.current_function, site);

        self.raw(&format!("@{}", return_label))?;
        self.raw("D=A")?;
        self.push_d()?;
        for reg in ["LCL", "ARG", "THIS", "THAT"] {
            self.raw(&format!("@{}", reg))?;
            self.raw("D=M")?;
            self.push_d()?;
        }
        self.raw("@SP")?;
        self.raw("D=M")?;
        self.raw(&format!("@{}", 5 + n_args))?;
        self.raw("D=D-A")?;
        self.raw("@ARG")?;
        self.raw("M=D")?;
        self.raw("@SP")?;
        self.raw("D=M")?;
        self.raw("@LCL")?;
        self.raw("M=D")?;
        self.raw(&format!("@{}", name))?;
        self.raw("0;JMP")?;
        self.raw(&format!("({})", return_label))
    }

    fn write_return(&mut self) -> VmResult<()> {
        // R14 = frame (LCL), R15 = saved return address
        self.raw("@LCL")?;
        self.raw("D=M")?;
        self.raw("@R14")?;
        self.raw("M=D")?;
        self.raw("@5")?;
        self.raw("A=D-A")?;
        self.raw("D=M")?;
        self.raw("@R15")?;
        self.raw("M=D")?;

        // *ARG = pop()
        self.pop_d_into()?;
        self.raw("@ARG")?;
        self.raw("A=M")?;
        self.raw("M=D")?;

        // SP = ARG + 1
        self.raw("@ARG")?;
        self.raw("D=M+1")?;
        self.raw("@SP")?;
        self.raw("M=D")?;

        for (offset, reg) in [(1, "THAT"), (2, "THIS"), (3, "ARG"), (4, "LCL")] {
            self.raw("@R14")?;
            self.raw("D=M")?;
            self.raw(&format!("@{}", offset))?;
            self.raw("A=D-A")?;
            self.raw("D=M")?;
            self.raw(&format!("@{}", reg))?;
            self.raw("M=D")?;
        }

        self.raw("@R15")?;
        self.raw("A=M")?;
        self.raw("0;JMP")
    }
}

fn loc(file: Option<&std::path::PathBuf>, line: usize) -> Location {
    Location {
        file: file.cloned(),
        line,
    }
}
