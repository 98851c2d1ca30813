//! The VM command parser.
//!
//! Comments and blank lines are stripped in one pass, each surviving line
//! is classified, then [`VmParser`] walks the resulting sequence one
//! command at a time — single-pass and non-restartable, matching the
//! Jack tokenizer's shape.

use crate::command::{Command, CommandKind, ARITHMETIC_COMMANDS};
use crate::error::{Location, VmError, VmResult};
use std::path::PathBuf;

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn classify(text: &str, at: &Location) -> VmResult<Command> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let invalid = || VmError::InvalidCommand {
        text: text.to_string(),
        at: at.clone(),
    };

    match parts.as_slice() {
        [op] if ARITHMETIC_COMMANDS.contains(op) => Ok(Command::arithmetic(op)),
        ["return"] => Ok(Command::ret()),
        ["push", segment, index] => Ok(Command::push(segment, parse_index(index, at)?)),
        ["pop", segment, index] => Ok(Command::pop(segment, parse_index(index, at)?)),
        ["label", name] => Ok(Command::label(name)),
        ["goto", name] => Ok(Command::goto(name)),
        ["if-goto", name] => Ok(Command::if_goto(name)),
        ["function", name, n] => Ok(Command::function(name, parse_index(n, at)?)),
        ["call", name, n] => Ok(Command::call(name, parse_index(n, at)?)),
        _ => Err(invalid()),
    }
}

fn parse_index(s: &str, at: &Location) -> VmResult<i64> {
    s.parse::<i64>().map_err(|_| VmError::InvalidCommand {
        text: s.to_string(),
        at: at.clone(),
    })
}

/// Strips comments/whitespace from a whole `.vm` source and classifies
/// every surviving line.
pub fn parse(source: &str, file: Option<&PathBuf>) -> VmResult<Vec<(Command, usize)>> {
    let mut commands = Vec::new();
    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;
        let text = strip_comment(raw_line).trim();
        if text.is_empty() {
            continue;
        }
        let at = Location {
            file: file.cloned(),
            line: line_no,
        };
        commands.push((classify(text, &at)?, line_no));
    }
    Ok(commands)
}

/// Single-pass, non-restartable cursor over a pre-parsed command sequence.
pub struct VmParser {
    commands: Vec<(Command, usize)>,
    current: Option<usize>,
}

impl VmParser {
    pub fn new(source: &str, file: Option<&PathBuf>) -> VmResult<Self> {
        Ok(VmParser {
            commands: parse(source, file)?,
            current: None,
        })
    }

    pub fn has_more_commands(&self) -> bool {
        let next = self.current.map_or(0, |i| i + 1);
        next < self.commands.len()
    }

    pub fn advance(&mut self) {
        let next = self.current.map_or(0, |i| i + 1);
        assert!(next < self.commands.len(), "advance() with no commands left");
        self.current = Some(next);
    }

    pub fn command(&self) -> &Command {
        let i = self.current.expect("command() called before advance()");
        &self.commands[i].0
    }

    pub fn line_number(&self) -> usize {
        let i = self.current.expect("command() called before advance()");
        self.commands[i].1
    }

    pub fn command_type(&self) -> CommandKind {
        self.command().kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_comments_and_blank_lines() {
        let parsed = parse("// header\npush constant 7 // comment\n\nadd\n", None).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].0, Command::push("constant", 7));
        assert_eq!(parsed[1].0, Command::arithmetic("add"));
    }

    #[test]
    fn classifies_all_nine_arithmetic_mnemonics() {
        for op in ARITHMETIC_COMMANDS {
            let parsed = parse(op, None).unwrap();
            assert_eq!(parsed[0].0, Command::arithmetic(op));
        }
    }

    #[test]
    fn classifies_function_and_call_and_return() {
        let parsed = parse("function Foo.bar 2\ncall Foo.bar 3\nreturn\n", None).unwrap();
        assert_eq!(parsed[0].0, Command::function("Foo.bar", 2));
        assert_eq!(parsed[1].0, Command::call("Foo.bar", 3));
        assert_eq!(parsed[2].0, Command::ret());
    }

    #[test]
    fn rejects_unrecognized_lines() {
        let err = parse("frobnicate", None).unwrap_err();
        assert!(matches!(err, VmError::InvalidCommand { .. }));
    }

    #[test]
    fn cursor_walks_commands_in_order() {
        let mut p = VmParser::new("push constant 1\nadd\n", None).unwrap();
        assert!(p.has_more_commands());
        p.advance();
        assert_eq!(p.command(), &Command::push("constant", 1));
        p.advance();
        assert_eq!(p.command(), &Command::arithmetic("add"));
        assert!(!p.has_more_commands());
    }
}
