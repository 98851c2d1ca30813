//! End-to-end translation scenarios driven through the public API.

use std::fs;
use vmtranslate::config::TranslatorConfig;

#[test]
fn bootstrap_precedes_every_translated_program() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Sys.vm"),
        "function Sys.init 0\ncall Sys.init 0\nreturn\n",
    )
    .unwrap();
    let asm_path = vmtranslate::translate_path(&dir.path().join("Sys.vm"), &TranslatorConfig::new())
        .unwrap();
    let asm = fs::read_to_string(asm_path).unwrap();
    assert!(asm.starts_with("@256\nD=A\n@SP\nM=D\n"));
    assert!(asm.contains("@Sys.init\n0;JMP\n"));
}

#[test]
fn call_site_emits_five_saved_frame_pushes_then_jumps() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Foo.vm"),
        "function Foo.bar 0\ncall Foo.baz 2\nreturn\n",
    )
    .unwrap();
    let asm_path = vmtranslate::translate_path(&dir.path().join("Foo.vm"), &TranslatorConfig::new())
        .unwrap();
    let asm = fs::read_to_string(asm_path).unwrap();
    assert!(asm.contains("(Foo.bar)\n"));
    assert!(asm.contains("@Foo.bar$ret.0\nD=A\n@SP\nA=M\nM=D\n@SP\nM=M+1\n"));
    assert!(asm.contains("@ARG\nM=D\n@SP\nD=M\n@LCL\nM=D\n@Foo.baz\n0;JMP\n(Foo.bar$ret.0)\n"));
}

#[test]
fn directory_mode_shares_counters_across_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("A.vm"),
        "function A.one 0\ncall Lib.helper 0\nreturn\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("B.vm"),
        "function B.two 0\ncall Lib.helper 0\nreturn\n",
    )
    .unwrap();

    let asm_path = vmtranslate::translate_path(dir.path(), &TranslatorConfig::new()).unwrap();
    let dir_name = dir.path().file_name().unwrap().to_str().unwrap();
    assert_eq!(asm_path.file_name().unwrap().to_str().unwrap(), format!("{}.asm", dir_name));

    let asm = fs::read_to_string(asm_path).unwrap();
    assert!(asm.contains("A.one$ret.0"));
    assert!(asm.contains("B.two$ret.0"));
    assert!(asm.contains("A.one") && asm.contains("B.two"));
}

#[test]
fn return_restores_the_caller_frame() {
    let source = "function Foo.id 0\npush argument 0\nreturn\n";
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("Foo.vm");
    fs::write(&file, source).unwrap();
    let asm = fs::read_to_string(vmtranslate::translate_path(&file, &TranslatorConfig::new()).unwrap())
        .unwrap();
    assert!(asm.contains("@LCL\nD=M\n@R14\nM=D\n"));
    assert!(asm.contains("@R15\nA=M\n0;JMP\n"));
}

#[test]
fn unknown_command_is_reported_with_its_location() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("Bad.vm");
    fs::write(&file, "frobnicate\n").unwrap();
    let err = vmtranslate::translate_path(&file, &TranslatorConfig::new()).unwrap_err();
    assert!(matches!(err, vmtranslate::VmError::InvalidCommand { .. }));
}
