//! VM command classification.

/// The nine command kinds the parser can classify a line into. (The nine
/// arithmetic/logical operators share one kind, giving the "ten commands"
/// read about in the calling convention their informal count.)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Arithmetic,
    Push,
    Pop,
    Label,
    Goto,
    If,
    Function,
    Call,
    Return,
}

pub const ARITHMETIC_COMMANDS: &[&str] = &[
    "add", "sub", "neg", "eq", "gt", "lt", "and", "or", "not",
];

/// One classified VM command, with `arg1`/`arg2` populated per
/// `CommandKind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// The arithmetic mnemonic, segment name, or label/function name.
    /// Absent only for `Return`.
    pub arg1: Option<String>,
    /// The segment index, local count, or argument count. Present only
    /// for `Push`, `Pop`, `Function`, and `Call`.
    pub arg2: Option<i64>,
}

impl Command {
    pub fn arithmetic(op: &str) -> Self {
        Command {
            kind: CommandKind::Arithmetic,
            arg1: Some(op.to_string()),
            arg2: None,
        }
    }

    pub fn push(segment: &str, index: i64) -> Self {
        Command {
            kind: CommandKind::Push,
            arg1: Some(segment.to_string()),
            arg2: Some(index),
        }
    }

    pub fn pop(segment: &str, index: i64) -> Self {
        Command {
            kind: CommandKind::Pop,
            arg1: Some(segment.to_string()),
            arg2: Some(index),
        }
    }

    pub fn label(name: &str) -> Self {
        Command {
            kind: CommandKind::Label,
            arg1: Some(name.to_string()),
            arg2: None,
        }
    }

    pub fn goto(name: &str) -> Self {
        Command {
            kind: CommandKind::Goto,
            arg1: Some(name.to_string()),
            arg2: None,
        }
    }

    pub fn if_goto(name: &str) -> Self {
        Command {
            kind: CommandKind::If,
            arg1: Some(name.to_string()),
            arg2: None,
        }
    }

    pub fn function(name: &str, n_locals: i64) -> Self {
        Command {
            kind: CommandKind::Function,
            arg1: Some(name.to_string()),
            arg2: Some(n_locals),
        }
    }

    pub fn call(name: &str, n_args: i64) -> Self {
        Command {
            kind: CommandKind::Call,
            arg1: Some(name.to_string()),
            arg2: Some(n_args),
        }
    }

    pub fn ret() -> Self {
        Command {
            kind: CommandKind::Return,
            arg1: None,
            arg2: None,
        }
    }
}
