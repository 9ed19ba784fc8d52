#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Unit tests for CLI commands

use crate::cli::{map_only_to_scope, Cli, Commands, OnlyPart};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_generate_defaults() {
    let cli = Cli::try_parse_from(["endpointgen", "generate"]).unwrap();
    assert!(!cli.verbose);
    match cli.command {
        Commands::Generate {
            project,
            dry_run,
            only,
            format,
        } => {
            assert_eq!(project.root, PathBuf::from("."));
            assert!(project.schema.is_none());
            assert!(project.config.is_none());
            assert!(!dry_run);
            assert!(!format);
            assert!(only.is_none());
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_generate_with_flags() {
    let cli = Cli::try_parse_from([
        "endpointgen",
        "-v",
        "generate",
        "--root",
        "backend",
        "--schema",
        "backend/api/endpoints.yaml",
        "--config",
        "endpointgen.toml",
        "--only",
        "routes,infra",
        "--dry-run",
        "--format",
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Generate {
            project,
            dry_run,
            only,
            format,
        } => {
            assert_eq!(project.root, PathBuf::from("backend"));
            assert_eq!(project.schema, Some(PathBuf::from("backend/api/endpoints.yaml")));
            assert_eq!(project.config, Some(PathBuf::from("endpointgen.toml")));
            assert!(dry_run);
            assert!(format);
            assert_eq!(only, Some(vec![OnlyPart::Routes, OnlyPart::Infra]));
        }
        _ => panic!("Expected Generate command"),
    }
}

#[test]
fn test_only_maps_to_scope() {
    let all = map_only_to_scope(None);
    assert!(all.scaffold && all.routes && all.infrastructure);

    let infra = map_only_to_scope(Some(&[OnlyPart::Infra][..]));
    assert!(!infra.scaffold);
    assert!(!infra.routes);
    assert!(infra.infrastructure);
}

#[test]
fn test_check_command_with_flags() {
    let cli = Cli::try_parse_from([
        "endpointgen",
        "check",
        "--root",
        "backend",
        "--fail-on-warning",
    ])
    .unwrap();
    match cli.command {
        Commands::Check {
            project,
            fail_on_warning,
            json,
        } => {
            assert_eq!(project.root, PathBuf::from("backend"));
            assert!(fail_on_warning);
            assert!(!json);
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn test_rewrite_decimal_requires_files() {
    assert!(Cli::try_parse_from(["endpointgen", "rewrite-decimal", "--dir", "gen/model"]).is_err());

    let cli = Cli::try_parse_from([
        "endpointgen",
        "rewrite-decimal",
        "--dir",
        "gen/model",
        "--file",
        "trade",
        "--file",
        "price",
    ])
    .unwrap();
    match cli.command {
        Commands::RewriteDecimal { dir, files, .. } => {
            assert_eq!(dir, PathBuf::from("gen/model"));
            assert_eq!(files, vec!["trade".to_string(), "price".to_string()]);
        }
        _ => panic!("Expected RewriteDecimal command"),
    }
}

#[test]
fn test_unknown_only_part_is_rejected() {
    assert!(Cli::try_parse_from(["endpointgen", "generate", "--only", "handlers"]).is_err());
}
