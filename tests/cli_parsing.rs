use clap::Parser;
use std::path::PathBuf;

use javac_worker::cli::{Cli, Commands};

#[test]
fn test_no_subcommand_defaults_to_serve() {
    let cli = Cli::try_parse_from(["javac-worker"]).unwrap();
    assert!(cli.command.is_none());
    assert!(matches!(cli.command(), Commands::Serve(_)));
    assert!(!cli.json);
}

#[test]
fn test_parse_compile() {
    let cli = Cli::try_parse_from([
        "javac-worker",
        "compile",
        "--label",
        "proto",
        "-l",
        "fast",
        "--classpath",
        "lib/a.jar",
        "--cp",
        "lib/b.jar",
        "-d",
        "out",
        "--rule",
        "//pkg:lib",
        "src/A.java",
        "src/B.java",
    ])
    .unwrap();

    match cli.command() {
        Commands::Compile(args) => {
            assert_eq!(args.sources, vec!["src/A.java", "src/B.java"]);
            assert_eq!(args.labels, vec!["proto", "fast"]);
            assert_eq!(args.classpath, vec!["lib/a.jar", "lib/b.jar"]);
            assert_eq!(args.output_dir, Some(PathBuf::from("out")));
            assert_eq!(args.rule, "//pkg:lib");

            let request = args.to_request();
            assert!(request.has_label("proto"));
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_compile_requires_sources() {
    assert!(Cli::try_parse_from(["javac-worker", "compile", "--label", "proto"]).is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "javac-worker",
        "probe",
        "--json",
        "--config",
        "/etc/javac-worker.yaml",
    ])
    .unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/javac-worker.yaml")));
    assert!(matches!(cli.command(), Commands::Probe(_)));
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["javac-worker", "daemonize"]).is_err());
}
