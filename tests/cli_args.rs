//! CLI argument parsing tests.

use clap::Parser;
use updown::cli::{Cli, Command, Entity};
use updown::MetricGroup;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["updown", "get", "check", "ngg8"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id, alias } => {
            assert_eq!(entity, Entity::Check);
            assert_eq!(id, "ngg8");
            assert!(!alias);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_get_by_alias() {
    let cli = Cli::parse_from(["updown", "get", "checks", "Main site", "--alias"]);

    match cli.command {
        Command::Get { id, alias, .. } => {
            assert_eq!(id, "Main site");
            assert!(alias);
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_with_plural_entity() {
    let cli = Cli::parse_from(["updown", "list", "checks"]);

    match cli.command {
        Command::List { entity, check, page, .. } => {
            assert_eq!(entity, Entity::Check);
            assert!(check.is_none());
            assert!(page.is_none());
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_downtimes_page() {
    let cli = Cli::parse_from(["updown", "list", "downtimes", "--check", "4b3c", "--page", "2"]);

    match cli.command {
        Command::List {
            entity,
            check,
            page,
            ..
        } => {
            assert_eq!(entity, Entity::Downtime);
            assert_eq!(check.as_deref(), Some("4b3c"));
            assert_eq!(page, Some(2));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_grouped_metrics() {
    let cli = Cli::parse_from([
        "updown", "list", "metrics", "--check", "ngg8", "--from", "2024-05-01", "--group", "host",
    ]);

    match cli.command {
        Command::List {
            entity,
            from,
            to,
            group,
            ..
        } => {
            assert_eq!(entity, Entity::Metric);
            assert_eq!(from.as_deref(), Some("2024-05-01"));
            assert!(to.is_none());
            assert_eq!(group, Some(MetricGroup::Host));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_status_pages_alias() {
    let cli = Cli::parse_from(["updown", "list", "status-pages"]);

    match cli.command {
        Command::List { entity, .. } => assert_eq!(entity, Entity::StatusPage),
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_add_check() {
    let cli = Cli::parse_from([
        "updown",
        "add",
        "check",
        "--url",
        "https://example.com",
        "--alias",
        "Example",
        "--period",
        "300",
    ]);

    match cli.command {
        Command::Add {
            entity,
            url,
            alias,
            period,
            ..
        } => {
            assert_eq!(entity, Entity::Check);
            assert_eq!(url.as_deref(), Some("https://example.com"));
            assert_eq!(alias.as_deref(), Some("Example"));
            assert_eq!(period, Some(300));
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn test_cli_parses_add_recipient() {
    let cli = Cli::parse_from([
        "updown",
        "add",
        "recipient",
        "--kind",
        "email",
        "--value",
        "ops@example.com",
    ]);

    match cli.command {
        Command::Add {
            entity, kind, value, ..
        } => {
            assert_eq!(entity, Entity::Recipient);
            assert_eq!(kind.as_deref(), Some("email"));
            assert_eq!(value.as_deref(), Some("ops@example.com"));
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn test_cli_parses_update_subcommand() {
    let cli = Cli::parse_from([
        "updown",
        "update",
        "check",
        "ngg8",
        "--enabled",
        "false",
        "--alias",
        "Renamed",
    ]);

    match cli.command {
        Command::Update {
            entity,
            id,
            alias,
            enabled,
            url,
            ..
        } => {
            assert_eq!(entity, Entity::Check);
            assert_eq!(id, "ngg8");
            assert_eq!(alias.as_deref(), Some("Renamed"));
            assert_eq!(enabled, Some(false));
            assert!(url.is_none());
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_cli_parses_remove_subcommand() {
    let cli = Cli::parse_from(["updown", "remove", "recipient", "email:1"]);

    match cli.command {
        Command::Remove { entity, id } => {
            assert_eq!(entity, Entity::Recipient);
            assert_eq!(id, "email:1");
        }
        _ => panic!("Expected Remove command"),
    }
}

#[test]
fn test_cli_parses_token_subcommand() {
    let cli = Cli::parse_from(["updown", "token", "Main site"]);

    match cli.command {
        Command::Token { alias } => assert_eq!(alias, "Main site"),
        _ => panic!("Expected Token command"),
    }
}

#[test]
fn test_json_flag_is_global() {
    let cli = Cli::parse_from(["updown", "list", "nodes", "--json"]);
    assert!(cli.json);

    let cli = Cli::parse_from(["updown", "--json", "token", "API"]);
    assert!(cli.json);
}

#[test]
fn test_cli_rejects_unknown_entity() {
    let result = Cli::try_parse_from(["updown", "list", "projects"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_unknown_metric_group() {
    let result = Cli::try_parse_from(["updown", "list", "metrics", "--group", "day"]);
    assert!(result.is_err());
}
