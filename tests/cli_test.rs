use clap::Parser;
use dotforge::cli::{Args, Command};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("dotforge")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_import_args() {
    let args = make_args(&["import", "./chezmoi", "./out"]);
    let parsed = Args::try_parse_from(args).unwrap();

    let Command::Import(import) = parsed.command;
    assert_eq!(import.source_dir, PathBuf::from("./chezmoi"));
    assert_eq!(import.output_dir, PathBuf::from("./out"));
    assert_eq!(import.data, None);
    assert!(!import.dry_run);
    assert!(!import.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "import",
        "--dry-run",
        "--verbose",
        "--data",
        "./data.toml",
        "./chezmoi",
        "./out",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    let Command::Import(import) = parsed.command;
    assert!(import.dry_run);
    assert!(import.verbose);
    assert_eq!(import.data, Some(PathBuf::from("./data.toml")));
}

#[test]
fn test_short_flags() {
    let args = make_args(&["import", "-n", "-v", "./chezmoi", "./out"]);
    let parsed = Args::try_parse_from(args).unwrap();

    let Command::Import(import) = parsed.command;
    assert!(import.dry_run);
    assert!(import.verbose);
}

#[test]
fn test_missing_args() {
    let args = make_args(&["import", "./chezmoi"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["import", "./chezmoi", "./out", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
