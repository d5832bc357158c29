#![allow(non_snake_case)]

use std::fs;
use std::process::{Command, Output};

use tempfile::tempdir;

const TABLE: &str = "\
Code coverage report
|Lines
Total| 60.0% 6/10
src| 60.0% 6/10
tests| 60.0% 6/10
src/net/Socket.cpp| 12.5% 1/8
src/core/Parser.cpp| 88.0% 22/25
src/core/Lexer.cpp| 60.0% 6/10
";

fn run_binary(dir: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_coverage_graph"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run coverage_graph")
}

#[test]
fn coverage_graph_binary__default_paths__then_writes_html_in_cwd() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("coverage_table.txt"), TABLE).expect("write table");

    let output = run_binary(dir.path(), &[]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let html = fs::read_to_string(dir.path().join("coverage_graph.html")).expect("html output");
    assert!(html.contains("src/core/Lexer.cpp"));
}

#[test]
fn coverage_graph_binary__legacy_short_flags__then_static_png() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("table.txt"), TABLE).expect("write table");

    let output = run_binary(
        dir.path(),
        &["-f", "table.txt", "-ni", "-ns", "-cl", "-p", "core", "-nc", "-sr", "1"],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let bytes = fs::read(dir.path().join("coverage_graph.png")).expect("png output");
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn coverage_graph_binary__package_filters__then_package_charts() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("coverage_table.txt"), TABLE).expect("write table");

    let output = run_binary(
        dir.path(),
        &["--plot_package", "core,net", "--ratio", "--descending", "-o", "out.html"],
    );

    assert!(output.status.success());
    let html = fs::read_to_string(dir.path().join("out.html")).expect("html output");
    assert!(html.contains("Code coverage ratio by file"));
    assert!(html.contains("Code coverage ratio for package core"));
    assert!(html.contains("Code coverage ratio for package net"));
    assert!(html.contains(
        "[\"src/core/Parser.cpp\",\"src/core/Lexer.cpp\",\"src/net/Socket.cpp\"]"
    ));
}

#[test]
fn coverage_graph_binary__missing_input__then_nonzero_exit() {
    let dir = tempdir().expect("tempdir");

    let output = run_binary(dir.path(), &["-f", "absent.txt"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("absent.txt"));
    assert!(!dir.path().join("coverage_graph.html").exists());
}

#[test]
fn coverage_graph_binary__malformed_ratio__then_nonzero_exit() {
    let dir = tempdir().expect("tempdir");
    let table = TABLE.replace("12.5%", "12.5");
    fs::write(dir.path().join("coverage_table.txt"), table).expect("write table");

    let output = run_binary(dir.path(), &[]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid coverage ratio"));
    assert!(!dir.path().join("coverage_graph.html").exists());
}

#[test]
fn coverage_graph_binary__invalid_flag_value__then_usage_error() {
    let dir = tempdir().expect("tempdir");

    let output = run_binary(dir.path(), &["--skip_rows", "lots"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value"));
}
