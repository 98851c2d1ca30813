//! End-to-end compilation scenarios, run through the public API rather
//! than against the parser internals.

#[test]
fn minimal_empty_class() {
    let vm = jackc::compile_source("class A { function void main() { return; } }", None).unwrap();
    assert_eq!(vm, "function A.main 0\npush constant 0\nreturn\n");
}

#[test]
fn method_returning_a_field() {
    let vm = jackc::compile_source(
        "class P { field int x; method int get() { return x; } }",
        None,
    )
    .unwrap();
    assert_eq!(
        vm,
        "function P.get 0\npush argument 0\npop pointer 0\npush this 0\nreturn\n"
    );
}

#[test]
fn array_write() {
    let vm = jackc::compile_source(
        "class A { function void main() { var Array a; var int i; let a[i+1] = 42; return; } }",
        None,
    )
    .unwrap();
    let expected = "\
push local 1
push constant 1
add
push local 0
add
push constant 42
pop temp 0
pop pointer 1
push temp 0
pop that 0
";
    assert!(vm.contains(expected));
}

#[test]
fn string_literal() {
    let vm = jackc::compile_source(
        "class A { function void main() { do Output.printString(\"Hi\"); return; } }",
        None,
    )
    .unwrap();
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
fn if_else() {
    let vm = jackc::compile_source(
        "class A { function void main() { var int x, y; if (x) { let y = 1; } else { let y = 2; } return; } }",
        None,
    )
    .unwrap();
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
fn undefined_variable_reports_the_offending_name() {
    let err =
        jackc::compile_source("class A { function void main() { let x = 1; return; } }", None)
            .unwrap_err();
    assert!(err.to_string().contains("x"));
}

#[test]
fn malformed_source_reports_a_parse_error() {
    let err = jackc::compile_source("class A { function }", None).unwrap_err();
    assert!(matches!(err, jackc::JackError::ParseUnexpectedToken { .. }));
}
