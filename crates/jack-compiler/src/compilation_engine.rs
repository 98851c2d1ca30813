//! Recursive-descent parser interleaved with VM code generation.
//!
//! A single pass over the token stream: every `compile_*` routine both
//! enforces one grammar production and emits the VM instructions for it as
//! a side effect, consulting and updating the class/subroutine symbol
//! tables along the way.

use crate::error::JackError;
use crate::symbol_table::{Kind, SymbolTable};
use crate::token::Keyword;
use crate::tokenizer::{JackTokenizer, TokenType};
use crate::vm_emitter::{segment_of_kind, Segment, VmEmitter};
use std::io::Write;
use std::path::PathBuf;

type JResult<T> = Result<T, JackError>;

const TYPE_KEYWORDS: [Keyword; 3] = [Keyword::Int, Keyword::Char, Keyword::Boolean];

pub struct CompilationEngine<'a, W: Write> {
    tokenizer: JackTokenizer,
    emitter: VmEmitter<&'a mut W>,
    class_table: SymbolTable,
    subroutine_table: SymbolTable,
    class_name: String,
    file: Option<PathBuf>,
    if_counter: usize,
    while_counter: usize,
    in_method: bool,
}

impl<'a, W: Write> CompilationEngine<'a, W> {
    pub fn new(source: &str, out: &'a mut W, file: Option<PathBuf>) -> JResult<Self> {
        let tokenizer = JackTokenizer::new(source, file.as_ref())?;
        Ok(CompilationEngine {
            tokenizer,
            emitter: VmEmitter::new(out),
            class_table: SymbolTable::new(),
            subroutine_table: SymbolTable::new(),
            class_name: String::new(),
            file,
            if_counter: 0,
            while_counter: 0,
            in_method: false,
        })
    }

    // -- token-stream plumbing -------------------------------------------------

    /// Moves the cursor past the token just consumed. The tokenizer may
    /// land past the last real token (`token_type() == Eof`) rather than
    /// erroring here — the class's closing `}` is itself the last token
    /// of any valid file, so eagerly requiring a token to *follow* it
    /// would reject every well-formed program. Kind checks compare
    /// `token_type()` against the production's expected kind, so `Eof`
    /// falls through to the same "expected X, found ..." diagnostic as
    /// any other mismatch, just lazily, at the point a token is next
    /// inspected rather than the moment the stream is exhausted.
    fn advance(&mut self) -> JResult<()> {
        self.tokenizer.advance();
        Ok(())
    }

    fn unexpected(&self, expected: impl Into<String>, found: impl Into<String>) -> JackError {
        JackError::ParseUnexpectedToken {
            file: self.file.clone(),
            expected: expected.into(),
            found: found.into(),
            at: self.tokenizer.current_location(),
        }
    }

    fn expect_keyword(&mut self, allowed: &[Keyword]) -> JResult<Keyword> {
        if self.tokenizer.token_type() != TokenType::Keyword {
            return Err(self.unexpected(
                format!("one of {:?}", allowed),
                self.tokenizer.current_lexeme(),
            ));
        }
        let kw = self.tokenizer.keyword();
        if !allowed.contains(&kw) {
            return Err(self.unexpected(format!("one of {:?}", allowed), kw.as_str().to_string()));
        }
        self.advance()?;
        Ok(kw)
    }

    fn expect_symbol(&mut self, allowed: &[char]) -> JResult<char> {
        if self.tokenizer.token_type() != TokenType::Symbol {
            return Err(self.unexpected(
                format!("one of {:?}", allowed),
                self.tokenizer.current_lexeme(),
            ));
        }
        let c = self.tokenizer.symbol();
        if !allowed.contains(&c) {
            return Err(self.unexpected(format!("one of {:?}", allowed), c.to_string()));
        }
        self.advance()?;
        Ok(c)
    }

    fn expect_identifier(&mut self) -> JResult<String> {
        if self.tokenizer.token_type() != TokenType::Identifier {
            return Err(self.unexpected("an identifier", self.tokenizer.current_lexeme()));
        }
        let name = self.tokenizer.identifier().to_string();
        self.advance()?;
        Ok(name)
    }

    /// `int | char | boolean | className`. Consumes the token (advancing
    /// past it), returning its name.
    fn expect_type(&mut self) -> JResult<String> {
        if self.tokenizer.token_type() == TokenType::Keyword
            && TYPE_KEYWORDS.contains(&self.tokenizer.keyword())
        {
            let kw = self.tokenizer.keyword();
            self.advance()?;
            Ok(kw.as_str().to_string())
        } else {
            self.expect_identifier()
        }
    }

    fn lookup(&self, name: &str) -> JResult<(Kind, String, usize)> {
        if let Some(e) = self.subroutine_table.get(name) {
            Ok((e.kind, e.var_type.clone(), e.index))
        } else if let Some(e) = self.class_table.get(name) {
            Ok((e.kind, e.var_type.clone(), e.index))
        } else {
            Err(JackError::UndefinedVariable {
                file: self.file.clone(),
                name: name.to_string(),
                at: self.tokenizer.current_location(),
            })
        }
    }

    // -- grammar ----------------------------------------------------------------

    /// `class := 'class' Id '{' classVarDec* subroutineDec* '}'`
    pub fn compile_class(&mut self) -> JResult<()> {
        self.advance()?;
        self.class_table.reset(false, "");
        self.expect_keyword(&[Keyword::Class])?;
        self.class_name = self.expect_identifier()?;
        self.expect_symbol(&['{'])?;
        while self.tokenizer.token_type() == TokenType::Keyword
            && matches!(self.tokenizer.keyword(), Keyword::Static | Keyword::Field)
        {
            self.compile_class_var_dec()?;
        }
        while self.tokenizer.token_type() == TokenType::Keyword
            && matches!(
                self.tokenizer.keyword(),
                Keyword::Constructor | Keyword::Function | Keyword::Method
            )
        {
            self.compile_subroutine()?;
        }
        self.expect_symbol(&['}'])?;
        Ok(())
    }

    /// `classVarDec := ('static'|'field') type Id (',' Id)* ';'`
    fn compile_class_var_dec(&mut self) -> JResult<()> {
        let kw = self.expect_keyword(&[Keyword::Static, Keyword::Field])?;
        let kind = if kw == Keyword::Static {
            Kind::Static
        } else {
            Kind::Field
        };
        let var_type = self.expect_type()?;
        loop {
            let name = self.expect_identifier()?;
            self.class_table.define(&name, &var_type, kind);
            if self.tokenizer.token_type() == TokenType::Symbol && self.tokenizer.symbol() == ',' {
                self.expect_symbol(&[','])?;
            } else {
                break;
            }
        }
        self.expect_symbol(&[';'])?;
        Ok(())
    }

    /// `subroutineDec := ('constructor'|'function'|'method') ('void'|type) Id
    ///                    '(' paramList ')' subroutineBody`
    fn compile_subroutine(&mut self) -> JResult<()> {
        let kw = self.expect_keyword(&[Keyword::Constructor, Keyword::Function, Keyword::Method])?;
        self.subroutine_table
            .reset(kw == Keyword::Method, &self.class_name);
        self.if_counter = 0;
        self.while_counter = 0;
        self.in_method = matches!(kw, Keyword::Method | Keyword::Constructor);

        if self.tokenizer.token_type() == TokenType::Keyword
            && self.tokenizer.keyword() == Keyword::Void
        {
            self.advance()?;
        } else {
            self.expect_type()?;
        }
        let sub_name = self.expect_identifier()?;
        self.expect_symbol(&['('])?;
        self.compile_parameter_list()?;
        self.expect_symbol(&[')'])?;
        self.compile_subroutine_body(kw, &sub_name)?;
        Ok(())
    }

    /// `paramList := ((type Id) (',' type Id)*)?`
    fn compile_parameter_list(&mut self) -> JResult<()> {
        if self.tokenizer.token_type() == TokenType::Symbol {
            return Ok(());
        }
        loop {
            let var_type = self.expect_type()?;
            let name = self.expect_identifier()?;
            self.subroutine_table.define(&name, &var_type, Kind::Arg);
            if self.tokenizer.token_type() == TokenType::Symbol && self.tokenizer.symbol() == ',' {
                self.expect_symbol(&[','])?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `subroutineBody := '{' varDec* statements '}'`. Emits the prologue
    /// described below once `nLocals` is known.
    fn compile_subroutine_body(&mut self, kw: Keyword, sub_name: &str) -> JResult<()> {
        self.expect_symbol(&['{'])?;
        while self.tokenizer.token_type() == TokenType::Keyword
            && self.tokenizer.keyword() == Keyword::Var
        {
            self.compile_var_dec()?;
        }

        let n_locals = self.subroutine_table.var_count(Kind::Var);
        let full_name = format!("{}.{}", self.class_name, sub_name);
        tracing::debug!(function = %full_name, n_locals, "emitting prologue");
        self.emitter.write_function(&full_name, n_locals)?;

        match kw {
            Keyword::Constructor => {
                let n_fields = self.class_table.var_count(Kind::Field);
                self.emitter.write_push(Segment::Constant, n_fields)?;
                self.emitter.write_call("Memory.alloc", 1)?;
                self.emitter.write_pop(Segment::Pointer, 0)?;
            }
            Keyword::Method => {
                self.emitter.write_push(Segment::Argument, 0)?;
                self.emitter.write_pop(Segment::Pointer, 0)?;
            }
            Keyword::Function => {}
            _ => unreachable!(),
        }

        self.compile_statements()?;
        self.expect_symbol(&['}'])?;
        Ok(())
    }

    /// `varDec := 'var' type Id (',' Id)* ';'`
    fn compile_var_dec(&mut self) -> JResult<()> {
        self.expect_keyword(&[Keyword::Var])?;
        let var_type = self.expect_type()?;
        loop {
            let name = self.expect_identifier()?;
            self.subroutine_table.define(&name, &var_type, Kind::Var);
            if self.tokenizer.token_type() == TokenType::Symbol && self.tokenizer.symbol() == ',' {
                self.expect_symbol(&[','])?;
            } else {
                break;
            }
        }
        self.expect_symbol(&[';'])?;
        Ok(())
    }

    /// `statements := statement*`
    fn compile_statements(&mut self) -> JResult<()> {
        loop {
            if self.tokenizer.token_type() != TokenType::Keyword {
                break;
            }
            match self.tokenizer.keyword() {
                Keyword::Let => self.compile_let()?,
                Keyword::If => self.compile_if()?,
                Keyword::While => self.compile_while()?,
                Keyword::Do => self.compile_do()?,
                Keyword::Return => self.compile_return()?,
                _ => break,
            }
        }
        Ok(())
    }

    /// `letStatement := 'let' varName ('['expression']')? '=' expression ';'`
    fn compile_let(&mut self) -> JResult<()> {
        self.expect_keyword(&[Keyword::Let])?;
        let var_name = self.expect_identifier()?;
        let (kind, _ty, index) = self.lookup(&var_name)?;

        if self.tokenizer.token_type() == TokenType::Symbol && self.tokenizer.symbol() == '[' {
            self.expect_symbol(&['['])?;
            self.compile_expression()?;
            self.expect_symbol(&[']'])?;
            self.emitter.write_push(segment_of_kind(kind), index)?;
            self.emitter.write_arithmetic("add")?;
            self.expect_symbol(&['='])?;
            self.compile_expression()?;
            self.emitter.write_pop(Segment::Temp, 0)?;
            self.emitter.write_pop(Segment::Pointer, 1)?;
            self.emitter.write_push(Segment::Temp, 0)?;
            self.emitter.write_pop(Segment::That, 0)?;
        } else {
            self.expect_symbol(&['='])?;
            self.compile_expression()?;
            self.emitter.write_pop(segment_of_kind(kind), index)?;
        }
        self.expect_symbol(&[';'])?;
        Ok(())
    }

    /// `ifStatement := 'if' '(' expression ')' '{' statements '}'
    ///                 ('else' '{' statements '}')?`
    fn compile_if(&mut self) -> JResult<()> {
        let k = self.if_counter;
        self.if_counter += 1;

        self.expect_keyword(&[Keyword::If])?;
        self.expect_symbol(&['('])?;
        self.compile_expression()?;
        self.expect_symbol(&[')'])?;

        let label_true = format!("IF_TRUE{}", k);
        let label_false = format!("IF_FALSE{}", k);
        let label_end = format!("IF_END{}", k);

        self.emitter.write_if(&label_true)?;
        self.emitter.write_goto(&label_false)?;
        self.emitter.write_label(&label_true)?;
        self.expect_symbol(&['{'])?;
        self.compile_statements()?;
        self.expect_symbol(&['}'])?;

        let has_else =
            self.tokenizer.token_type() == TokenType::Keyword && self.tokenizer.keyword() == Keyword::Else;
        if has_else {
            self.emitter.write_goto(&label_end)?;
        }
        self.emitter.write_label(&label_false)?;
        if has_else {
            self.expect_keyword(&[Keyword::Else])?;
            self.expect_symbol(&['{'])?;
            self.compile_statements()?;
            self.expect_symbol(&['}'])?;
            self.emitter.write_label(&label_end)?;
        }
        Ok(())
    }

    /// `whileStatement := 'while' '(' expression ')' '{' statements '}'`
    fn compile_while(&mut self) -> JResult<()> {
        let k = self.while_counter;
        self.while_counter += 1;

        let label_exp = format!("WHILE_EXP{}", k);
        let label_end = format!("WHILE_END{}", k);

        self.expect_keyword(&[Keyword::While])?;
        self.emitter.write_label(&label_exp)?;
        self.expect_symbol(&['('])?;
        self.compile_expression()?;
        self.expect_symbol(&[')'])?;
        self.emitter.write_arithmetic("not")?;
        self.emitter.write_if(&label_end)?;
        self.expect_symbol(&['{'])?;
        self.compile_statements()?;
        self.emitter.write_goto(&label_exp)?;
        self.expect_symbol(&['}'])?;
        self.emitter.write_label(&label_end)?;
        Ok(())
    }

    /// `doStatement := 'do' subroutineCall ';'`
    fn compile_do(&mut self) -> JResult<()> {
        self.expect_keyword(&[Keyword::Do])?;
        self.compile_subroutine_call()?;
        self.expect_symbol(&[';'])?;
        self.emitter.write_pop(Segment::Temp, 0)?;
        Ok(())
    }

    /// `returnStatement := 'return' expression? ';'`
    fn compile_return(&mut self) -> JResult<()> {
        self.expect_keyword(&[Keyword::Return])?;
        if self.tokenizer.token_type() == TokenType::Symbol && self.tokenizer.symbol() == ';' {
            self.emitter.write_push(Segment::Constant, 0)?;
        } else {
            self.compile_expression()?;
        }
        self.emitter.write_return()?;
        self.expect_symbol(&[';'])?;
        Ok(())
    }

    /// `expression := term (op term)*` (no operator precedence)
    fn compile_expression(&mut self) -> JResult<()> {
        self.compile_term()?;
        while self.tokenizer.token_type() == TokenType::Symbol
            && "+-*/&|<>=".contains(self.tokenizer.symbol())
        {
            let op = self.tokenizer.symbol();
            self.advance()?;
            self.compile_term()?;
            match op {
                '+' => self.emitter.write_arithmetic("add")?,
                '-' => self.emitter.write_arithmetic("sub")?,
                '&' => self.emitter.write_arithmetic("and")?,
                '|' => self.emitter.write_arithmetic("or")?,
                '<' => self.emitter.write_arithmetic("lt")?,
                '>' => self.emitter.write_arithmetic("gt")?,
                '=' => self.emitter.write_arithmetic("eq")?,
                '*' => self.emitter.write_call("Math.multiply", 2)?,
                '/' => self.emitter.write_call("Math.divide", 2)?,
                _ => unreachable!(),
            }
        }
        Ok(())
    }

    /// `term`
    fn compile_term(&mut self) -> JResult<()> {
        match self.tokenizer.token_type() {
            TokenType::IntConst => {
                let n = self.tokenizer.int_val();
                self.advance()?;
                self.emitter.write_push(Segment::Constant, n as usize)?;
            }
            TokenType::StringConst => {
                // Assumes ASCII string literals: `len()`/`bytes()` count
                // UTF-8 bytes, which only matches character count and
                // code-unit value for the 7-bit range the spec exercises.
                let s = self.tokenizer.string_val().to_string();
                self.advance()?;
                self.emitter.write_push(Segment::Constant, s.len())?;
                self.emitter.write_call("String.new", 1)?;
                for c in s.bytes() {
                    self.emitter.write_push(Segment::Constant, c as usize)?;
                    self.emitter.write_call("String.appendChar", 2)?;
                }
            }
            TokenType::Keyword => {
                let kw = self.expect_keyword(&[
                    Keyword::True,
                    Keyword::False,
                    Keyword::Null,
                    Keyword::This,
                ])?;
                match kw {
                    Keyword::True => {
                        self.emitter.write_push(Segment::Constant, 0)?;
                        self.emitter.write_arithmetic("not")?;
                    }
                    Keyword::False | Keyword::Null => {
                        self.emitter.write_push(Segment::Constant, 0)?;
                    }
                    Keyword::This => {
                        if !self.in_method {
                            tracing::warn!(
                                class = %self.class_name,
                                "'this' referenced outside a method or constructor; \
                                 emitted code will read an unbound pointer 0 at runtime"
                            );
                        }
                        self.emitter.write_push(Segment::Pointer, 0)?;
                    }
                    _ => unreachable!(),
                }
            }
            TokenType::Identifier => {
                let lookahead = self.tokenizer.peek();
                match lookahead.as_deref() {
                    Some("[") => {
                        let name = self.expect_identifier()?;
                        let (kind, _ty, index) = self.lookup(&name)?;
                        self.expect_symbol(&['['])?;
                        self.compile_expression()?;
                        self.expect_symbol(&[']'])?;
                        self.emitter.write_push(segment_of_kind(kind), index)?;
                        self.emitter.write_arithmetic("add")?;
                        self.emitter.write_pop(Segment::Pointer, 1)?;
                        self.emitter.write_push(Segment::That, 0)?;
                    }
                    Some("(") | Some(".") => {
                        self.compile_subroutine_call()?;
                    }
                    _ => {
                        let name = self.expect_identifier()?;
                        let (kind, _ty, index) = self.lookup(&name)?;
                        self.emitter.write_push(segment_of_kind(kind), index)?;
                    }
                }
            }
            TokenType::Symbol => {
                let c = self.tokenizer.symbol();
                if c == '(' {
                    self.expect_symbol(&['('])?;
                    self.compile_expression()?;
                    self.expect_symbol(&[')'])?;
                } else {
                    let op = self.expect_symbol(&['-', '~'])?;
                    self.compile_term()?;
                    match op {
                        '-' => self.emitter.write_arithmetic("neg")?,
                        '~' => self.emitter.write_arithmetic("not")?,
                        _ => unreachable!(),
                    }
                }
            }
            TokenType::Eof => return Err(self.unexpected("a term", "<eof>")),
        }
        Ok(())
    }

    /// `(expression (',' expression)*)?`. Returns the argument count.
    fn compile_expression_list(&mut self) -> JResult<usize> {
        let mut n = 0;
        if self.tokenizer.token_type() == TokenType::Symbol && self.tokenizer.symbol() == ')' {
            return Ok(0);
        }
        loop {
            self.compile_expression()?;
            n += 1;
            if self.tokenizer.token_type() == TokenType::Symbol && self.tokenizer.symbol() == ',' {
                self.expect_symbol(&[','])?;
            } else {
                break;
            }
        }
        Ok(n)
    }

    /// The three call shapes, disambiguated by symbol-table
    /// membership of the identifier preceding `.` (or its absence).
    fn compile_subroutine_call(&mut self) -> JResult<()> {
        let lookahead = self.tokenizer.peek();
        if lookahead.as_deref() == Some(".") {
            let first = self.expect_identifier()?;
            self.expect_symbol(&['.'])?;
            let (callee, extra_arg) = if let Ok((kind, ty, index)) = self.lookup(&first) {
                self.emitter.write_push(segment_of_kind(kind), index)?;
                (ty, 1)
            } else {
                (first, 0)
            };
            let method_name = self.expect_identifier()?;
            self.expect_symbol(&['('])?;
            let n_args = self.compile_expression_list()?;
            self.expect_symbol(&[')'])?;
            self.emitter
                .write_call(&format!("{}.{}", callee, method_name), n_args + extra_arg)?;
        } else {
            // implicit-this method call: name(args)
            self.emitter.write_push(Segment::Pointer, 0)?;
            let method_name = self.expect_identifier()?;
            self.expect_symbol(&['('])?;
            let n_args = self.compile_expression_list()?;
            self.expect_symbol(&[')'])?;
            self.emitter
                .write_call(&format!("{}.{}", self.class_name, method_name), n_args + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(src: &str) -> String {
        let mut buf = Vec::new();
        let mut engine = CompilationEngine::new(src, &mut buf, None).unwrap();
        engine.compile_class().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn minimal_empty_class() {
        let vm = compile("class A { function void main() { return; } }");
        assert_eq!(vm, "function A.main 0\npush constant 0\nreturn\n");
    }

    #[test]
    fn method_returning_a_field() {
        let vm = compile("class P { field int x; method int get() { return x; } }");
        assert_eq!(
            vm,
            "function P.get 0\npush argument 0\npop pointer 0\npush this 0\nreturn\n"
        );
    }

    #[test]
    fn array_write() {
        let vm = compile(
            "class A { function void main() { var Array a; var int i; let a[i+1] = 42; return; } }",
        );
        let lines: Vec<&str> = vm.lines().collect();
        let array_write_start = lines.iter().position(|l| *l == "push local 1").unwrap();
        assert_eq!(
            &lines[array_write_start..array_write_start + 9],
            [
                "push local 1",
                "push constant 1",
                "add",
                "push local 0",
                "add",
                "push constant 42",
                "pop temp 0",
                "pop pointer 1",
                "push temp 0",
            ]
        );
        assert_eq!(lines[array_write_start + 9], "pop that 0");
    }

    #[test]
    fn string_literal() {
        let vm = compile("class A { function void main() { do Output.printString(\"Hi\"); return; } }");
        let expected = "\
push constant 2
call String.new 1
push constant 72
call String.appendChar 2
push constant 105
call String.appendChar 2
";
        assert!(vm.contains(expected));
    }

    #[test]
    fn if_else_labels() {
        let vm = compile(
            "class A { function void main() { var int x, y; if (x) { let y = 1; } else { let y = 2; } return; } }",
        );
        let expected = "\
push local 0
if-goto IF_TRUE0
goto IF_FALSE0
label IF_TRUE0
push constant 1
pop local 1
goto IF_END0
label IF_FALSE0
push constant 2
pop local 1
label IF_END0
";
        assert!(vm.contains(expected));
    }

    #[test]
    fn while_labels() {
        let vm = compile(
            "class A { function void main() { var int x; while (x) { let x = 0; } return; } }",
        );
        assert!(vm.contains("label WHILE_EXP0\n"));
        assert!(vm.contains("not\nif-goto WHILE_END0\n"));
        assert!(vm.contains("goto WHILE_EXP0\n"));
        assert!(vm.contains("label WHILE_END0\n"));
    }

    #[test]
    fn constructor_prologue() {
        let vm = compile("class Point { field int x, y; constructor Point new() { return this; } }");
        assert!(vm.starts_with("function Point.new 0\npush constant 2\ncall Memory.alloc 1\npop pointer 0\n"));
    }

    #[test]
    fn do_statement_discards_return_value() {
        let vm = compile("class A { function void main() { do Memory.alloc(1); return; } }");
        assert!(vm.contains("call Memory.alloc 1\npop temp 0\n"));
    }

    #[test]
    fn function_call_on_class_vs_method_on_variable() {
        let vm = compile(
            "class A { function void main() { var A a; do a.foo(); do A.bar(); return; } }",
        );
        assert!(vm.contains("push local 0\ncall A.foo 1\n"));
        assert!(vm.contains("call A.bar 0\n"));
    }

    #[test]
    fn undefined_variable_is_fatal() {
        let mut buf = Vec::new();
        let mut engine =
            CompilationEngine::new("class A { function void main() { let x = 1; return; } }", &mut buf, None)
                .unwrap();
        let err = engine.compile_class().unwrap_err();
        assert!(matches!(err, JackError::UndefinedVariable { .. }));
    }

    #[test]
    fn this_is_permitted_even_inside_a_function() {
        // Permissive by design: this compiles to an unbound pointer 0
        // read at runtime rather than a compile-time error.
        let vm = compile("class A { function void main() { return this; } }");
        assert!(vm.contains("push pointer 0\n"));
    }

    #[test]
    fn if_counters_reset_per_subroutine() {
        let vm = compile(
            "class A { \
             function void one() { if (true) { let x = 1; } return; } \
             function void two() { if (true) { let x = 1; } return; } \
             }",
        );
        assert!(vm.contains("IF_TRUE0"));
        assert!(!vm.contains("IF_TRUE1"));
    }

    #[test]
    fn empty_source_reports_a_parse_error_without_panicking() {
        let mut buf = Vec::new();
        let mut engine = CompilationEngine::new("", &mut buf, None).unwrap();
        let err = engine.compile_class().unwrap_err();
        assert!(matches!(err, JackError::ParseUnexpectedToken { .. }));
    }

    #[test]
    fn consuming_the_class_closing_brace_does_not_require_a_following_token() {
        // The closing `}` is the last token of any valid class; compiling
        // it must succeed without treating "no token follows" as an error.
        let vm = compile("class A {}");
        assert_eq!(vm, "");
    }

    #[test]
    fn missing_class_closing_brace_reports_eof_instead_of_panicking() {
        let mut buf = Vec::new();
        let mut engine = CompilationEngine::new("class A {", &mut buf, None).unwrap();
        let err = engine.compile_class().unwrap_err();
        assert!(matches!(err, JackError::ParseUnexpectedToken { .. }));
        assert!(err.to_string().contains("<eof>"));
    }
}
