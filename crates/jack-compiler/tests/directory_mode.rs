//! Directory input compiles every `.jack` file non-recursively, each to
//! its own sibling `.vm` file.

use jackc::config::CompilerConfig;
use std::fs;

#[test]
fn compiles_every_jack_file_in_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("A.jack"),
        "class A { function void main() { return; } }",
    )
    .unwrap();
    fs::write(
        dir.path().join("B.jack"),
        "class B { function void main() { return; } }",
    )
    .unwrap();
    fs::write(dir.path().join("notes.txt"), "not jack source").unwrap();

    let written = jackc::compile_path(dir.path(), &CompilerConfig::new()).unwrap();
    assert_eq!(written.len(), 2);

    let a_vm = fs::read_to_string(dir.path().join("A.vm")).unwrap();
    assert_eq!(a_vm, "function A.main 0\npush constant 0\nreturn\n");
    let b_vm = fs::read_to_string(dir.path().join("B.vm")).unwrap();
    assert_eq!(b_vm, "function B.main 0\npush constant 0\nreturn\n");
}
