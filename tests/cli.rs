use clap::Parser;
use contactme::cli::{Cli, Command, ConfigCommand, HandleCommand, ProfileCommand};

#[test]
fn parses_route() {
    let cli = Cli::try_parse_from(["contactme", "route", "/p/alice"]).expect("cli parse should work");
    match cli.command {
        Command::Route(route) => assert_eq!(route.url, "/p/alice"),
        _ => panic!("expected route command"),
    }
}

#[test]
fn parses_show_with_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "contactme",
        "show",
        "https://example.com/alice",
        "--no-track",
        "--json",
        "--env",
        "staging",
        "-vv",
    ])
    .expect("cli parse should work");

    assert!(cli.json);
    assert_eq!(cli.env, "staging");
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Command::Show(show) => assert!(show.no_track),
        _ => panic!("expected show command"),
    }
}

#[test]
fn parses_handle_check_with_exclusion() {
    let cli = Cli::try_parse_from(["contactme", "handle", "check", "alice", "--exclude-id", "p-1"])
        .expect("cli parse should work");
    match cli.command {
        Command::Handle(handle) => match handle.command {
            HandleCommand::Check(check) => {
                assert_eq!(check.candidate, "alice");
                assert_eq!(check.exclude_id.as_deref(), Some("p-1"));
            }
            _ => panic!("expected handle check"),
        },
        _ => panic!("expected handle command"),
    }
}

#[test]
fn handle_set_requires_profile_id() {
    assert!(Cli::try_parse_from(["contactme", "handle", "set", "alice"]).is_err());
}

#[test]
fn parses_profile_create() {
    let cli = Cli::try_parse_from([
        "contactme",
        "profile",
        "create",
        "--user-id",
        "u-1",
        "--name",
        "Ann Lee",
        "--email",
        "ann@example.com",
    ])
    .expect("cli parse should work");
    match cli.command {
        Command::Profile(profile) => match profile.command {
            ProfileCommand::Create(create) => {
                assert_eq!(create.user_id, "u-1");
                assert_eq!(create.name, "Ann Lee");
                assert!(create.handle.is_none());
            }
        },
        _ => panic!("expected profile command"),
    }
}

#[test]
fn parses_config_set() {
    let cli = Cli::try_parse_from([
        "contactme",
        "config",
        "set",
        "availability_policy",
        "fail-closed",
    ])
    .expect("cli parse should work");
    match cli.command {
        Command::Config(config) => match config.command {
            ConfigCommand::Set(set) => {
                assert_eq!(set.key, "availability_policy");
                assert_eq!(set.value, "fail-closed");
            }
            ConfigCommand::Show => panic!("expected config set"),
        },
        _ => panic!("expected config command"),
    }
}
