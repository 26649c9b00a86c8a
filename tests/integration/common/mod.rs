#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

use ceres::parser::ast::Program;
use ceres::pretty::pretty_print;

pub fn ceresc() -> Command {
    Command::new(env!("CARGO_BIN_EXE_ceresc"))
}

/// Run the full pipeline and return the lowered program.
pub fn lower(source: &str) -> Program {
    match ceres::lower_source(source) {
        Ok(p) => p,
        Err(e) => panic!("lowering failed: {e}\nsource:\n{source}"),
    }
}

/// Run the full pipeline and pretty-print the lowered program.
pub fn lower_pretty(source: &str) -> String {
    pretty_print(&lower(source))
}

/// Pretty-print the parse tree without lowering it.
pub fn parse_pretty(source: &str) -> String {
    pretty_print(&ceres::parse_source(source).unwrap())
}

/// Assert that checking fails with a message containing `expected`.
pub fn check_should_fail_with(source: &str, expected: &str) {
    match ceres::check_source(source) {
        Ok(_) => panic!("expected check to fail with '{expected}', but it passed:\n{source}"),
        Err(err) => {
            let msg = err.to_string();
            assert!(
                msg.contains(expected),
                "expected error containing '{expected}', got '{msg}'"
            );
        }
    }
}

/// Drive the `ceresc lower` subcommand on a source file written to a
/// temp dir; returns stdout.
pub fn lower_via_cli(source: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let src_path = dir.path().join("test.crs");
    std::fs::write(&src_path, source).unwrap();
    let output = run_lower(&src_path);
    assert!(
        output.status.success(),
        "lowering failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

pub fn run_lower(path: &Path) -> std::process::Output {
    ceresc().arg("lower").arg(path).output().unwrap()
}
