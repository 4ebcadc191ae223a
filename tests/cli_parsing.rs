use clap::Parser;
use reactive_people::cli::{Cli, Commands};
use reactive_people::PersonId;

#[test]
fn test_parse_get() {
    let cli = Cli::try_parse_from(vec!["reactive-people", "get", "3"]).unwrap();

    match cli.command {
        Commands::Get(args) => assert_eq!(args.id, PersonId(3)),
        _ => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_get_negative_id() {
    let cli = Cli::try_parse_from(vec!["reactive-people", "get", "-1"]).unwrap();

    match cli.command {
        Commands::Get(args) => assert_eq!(args.id, PersonId(-1)),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_get_rejects_non_numeric_id() {
    assert!(Cli::try_parse_from(vec!["reactive-people", "get", "three"]).is_err());
}

#[test]
fn test_parse_get_requires_id() {
    assert!(Cli::try_parse_from(vec!["reactive-people", "get"]).is_err());
}

#[test]
fn test_parse_list_defaults() {
    let cli = Cli::try_parse_from(vec!["reactive-people", "list"]).unwrap();

    match cli.command {
        Commands::List(args) => assert!(args.limit.is_none()),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_list_with_limit_and_json() {
    let cli = Cli::try_parse_from(vec!["reactive-people", "list", "--limit", "2", "--json"]).unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::List(args) => assert_eq!(args.limit, Some(2)),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_find_strict_by_id() {
    let cli = Cli::try_parse_from(vec![
        "reactive-people",
        "find",
        "--id",
        "3",
        "--strict",
        "--json",
    ])
    .unwrap();

    assert!(cli.json);
    match cli.command {
        Commands::Find(args) => {
            assert_eq!(args.id, Some(PersonId(3)));
            assert!(args.last_name.is_none());
            assert!(args.strict);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_find_by_last_name() {
    let cli =
        Cli::try_parse_from(vec!["reactive-people", "find", "--last-name", "Glenanne"]).unwrap();

    match cli.command {
        Commands::Find(args) => {
            assert!(args.id.is_none());
            assert_eq!(args.last_name.as_deref(), Some("Glenanne"));
            assert!(!args.strict);
        }
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_global_config_before_subcommand() {
    let cli = Cli::try_parse_from(vec![
        "reactive-people",
        "--config",
        "/tmp/people.yaml",
        "list",
    ])
    .unwrap();

    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/people.yaml"))
    );
}

#[test]
fn test_parse_unknown_command_fails() {
    assert!(Cli::try_parse_from(vec!["reactive-people", "delete", "1"]).is_err());
}
