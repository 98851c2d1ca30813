//! The Jack lexical analyzer.
//!
//! The source is read whole, then scanned once to produce the full token
//! stream up front (comments stripped, strings preserved verbatim), in a
//! single quote-aware pass so a `//` or `/*` that appears inside a string
//! literal is never mistaken for a comment marker. [`JackTokenizer`] then
//! walks that pre-built stream with one-token lookahead; it is
//! single-pass and non-restartable.

use crate::error::{JackError, Location};
use crate::token::{Keyword, Token};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Keyword,
    Symbol,
    IntConst,
    StringConst,
    Identifier,
    /// The cursor has advanced past the last real token. Every kind check
    /// in the parser compares `token_type()` against a specific variant,
    /// so this flows naturally into a "found end of input" diagnostic
    /// instead of panicking on an out-of-bounds token.
    Eof,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Scanner<'a> {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    file: Option<&'a PathBuf>,
}

impl<'a> Scanner<'a> {
    fn new(source: &str, file: Option<&'a PathBuf>) -> Self {
        Scanner {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            file,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn loc(&self) -> Location {
        Location {
            line: self.line,
            column: self.column,
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), JackError> {
        let start = self.loc();
        self.bump(); // '/'
        self.bump(); // '*'
        loop {
            match self.peek() {
                None => {
                    return Err(JackError::LexMalformed {
                        file: self.file.cloned(),
                        lexeme: "/*".to_string(),
                        at: start,
                    });
                }
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.bump();
                    self.bump();
                    return Ok(());
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn scan_string(&mut self) -> Result<(Token, Location), JackError> {
        let start = self.loc();
        self.bump(); // opening quote
        let mut s = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(JackError::LexMalformed {
                        file: self.file.cloned(),
                        lexeme: format!("\"{}", s),
                        at: start,
                    });
                }
                Some('"') => {
                    self.bump();
                    return Ok((Token::StringConst(s), start));
                }
                Some(c) => {
                    s.push(c);
                    self.bump();
                }
            }
        }
    }

    fn scan_word(&mut self) -> Result<(Token, Location), JackError> {
        let start = self.loc();
        let mut s = String::new();
        while let Some(c) = self.peek() {
            if c.is_whitespace() || crate::token::is_symbol_char(c) || c == '"' {
                break;
            }
            s.push(c);
            self.bump();
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            match s.parse::<u32>() {
                Ok(n) if n <= 32767 => Ok((Token::IntConst(n as u16), start)),
                _ => Err(JackError::LexOverflow {
                    file: self.file.cloned(),
                    lexeme: s,
                    at: start,
                }),
            }
        } else if is_ident_start(s.chars().next().unwrap_or(' ')) && s.chars().all(is_ident_continue)
        {
            match Keyword::from_str(&s) {
                Some(k) => Ok((Token::Keyword(k), start)),
                None => Ok((Token::Identifier(s), start)),
            }
        } else {
            Err(JackError::LexMalformed {
                file: self.file.cloned(),
                lexeme: s,
                at: start,
            })
        }
    }
}

/// Tokenize a complete Jack source file.
pub fn tokenize(source: &str, file: Option<&PathBuf>) -> Result<Vec<(Token, Location)>, JackError> {
    let mut scanner = Scanner::new(source, file);
    let mut tokens = Vec::new();
    loop {
        while let Some(c) = scanner.peek() {
            if c.is_whitespace() {
                scanner.bump();
            } else if c == '/' && scanner.peek_at(1) == Some('/') {
                scanner.skip_line_comment();
            } else if c == '/' && scanner.peek_at(1) == Some('*') {
                scanner.skip_block_comment()?;
            } else {
                break;
            }
        }
        let Some(c) = scanner.peek() else {
            break;
        };
        if c == '"' {
            tokens.push(scanner.scan_string()?);
        } else if crate::token::is_symbol_char(c) {
            let loc = scanner.loc();
            scanner.bump();
            tokens.push((Token::Symbol(c), loc));
        } else {
            tokens.push(scanner.scan_word()?);
        }
    }
    Ok(tokens)
}

/// Single-pass, non-restartable cursor over a pre-tokenized Jack source
/// file, with one-token lookahead.
pub struct JackTokenizer {
    tokens: Vec<(Token, Location)>,
    /// Index of the current token; `None` before the first `advance`.
    /// May equal `tokens.len()` once the stream is exhausted — that state
    /// is not an error by itself, only `token_type() == Eof`.
    current: Option<usize>,
}

impl JackTokenizer {
    pub fn new(source: &str, file: Option<&PathBuf>) -> Result<Self, JackError> {
        let tokens = tokenize(source, file)?;
        Ok(JackTokenizer {
            tokens,
            current: None,
        })
    }

    /// Whether a *real* token follows the current one — used only by
    /// [`Self::peek`]-adjacent lookahead, not by `advance` itself (which
    /// may move past the last real token into the end-of-stream state).
    pub fn has_more_tokens(&self) -> bool {
        let next = self.current.map_or(0, |i| i + 1);
        next < self.tokens.len()
    }

    /// Makes the next token current, or moves one step past the last real
    /// token into the end-of-stream state (`token_type() == Eof`) if none
    /// remain. Panics only if called again after that state is already
    /// reached, which no parse routine does: every routine inspects
    /// `token_type()` before requesting another token, and `Eof` never
    /// compares equal to the kind it is checking for.
    pub fn advance(&mut self) {
        let next = self.current.map_or(0, |i| i + 1);
        assert!(next <= self.tokens.len(), "advance() past end of stream");
        self.current = Some(next);
    }

    /// The raw lexeme of the token after the current one, without
    /// advancing. Used to disambiguate `varName`, `varName[...]`,
    /// `subName(...)`, and `cls.sub(...)`.
    pub fn peek(&self) -> Option<String> {
        let next = self.current.map_or(0, |i| i + 1);
        self.tokens.get(next).map(|(t, _)| t.to_string())
    }

    /// `None` before the first `advance()` (a programming error) or past
    /// the end of the stream (a legitimate parse-time condition).
    fn current_token(&self) -> Option<&Token> {
        let i = self
            .current
            .expect("token accessor called before advance()");
        self.tokens.get(i).map(|(t, _)| t)
    }

    /// The display form of the current token, for diagnostics. Unlike the
    /// kind-specific accessors below, this never panics: at end of stream
    /// it reads `<eof>`.
    pub fn current_lexeme(&self) -> String {
        match self.current_token() {
            Some(t) => t.to_string(),
            None => "<eof>".to_string(),
        }
    }

    /// The location of the current token, for diagnostics. Before the
    /// first `advance()` (e.g. reporting an empty source file) this
    /// falls back to the start of the file; past the end of the stream it
    /// reuses the last real token's location.
    pub fn current_location(&self) -> Location {
        match self.current {
            Some(i) if i < self.tokens.len() => self.tokens[i].1.clone(),
            Some(_) => self
                .tokens
                .last()
                .map(|(_, loc)| loc.clone())
                .unwrap_or(Location { line: 1, column: 1 }),
            None => Location { line: 1, column: 1 },
        }
    }

    pub fn token_type(&self) -> TokenType {
        match self.current_token() {
            Some(Token::Keyword(_)) => TokenType::Keyword,
            Some(Token::Symbol(_)) => TokenType::Symbol,
            Some(Token::IntConst(_)) => TokenType::IntConst,
            Some(Token::StringConst(_)) => TokenType::StringConst,
            Some(Token::Identifier(_)) => TokenType::Identifier,
            None => TokenType::Eof,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self.current_token() {
            Some(Token::Keyword(k)) => *k,
            other => panic!("keyword() called on non-keyword token {:?}", other),
        }
    }

    pub fn symbol(&self) -> char {
        match self.current_token() {
            Some(Token::Symbol(c)) => *c,
            other => panic!("symbol() called on non-symbol token {:?}", other),
        }
    }

    pub fn identifier(&self) -> &str {
        match self.current_token() {
            Some(Token::Identifier(s)) => s,
            other => panic!("identifier() called on non-identifier token {:?}", other),
        }
    }

    pub fn int_val(&self) -> u16 {
        match self.current_token() {
            Some(Token::IntConst(n)) => *n,
            other => panic!("int_val() called on non-integer token {:?}", other),
        }
    }

    pub fn string_val(&self) -> &str {
        match self.current_token() {
            Some(Token::StringConst(s)) => s,
            other => panic!("string_val() called on non-string token {:?}", other),
        }
    }
}
