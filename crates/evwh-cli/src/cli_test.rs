use super::*;
use clap::CommandFactory;

#[test]
fn verify_cli_args() {
    // Validates the entire command tree: short flag conflicts,
    // duplicate args, and other clap definition errors.
    Cli::command().debug_assert();
}

#[test]
fn test_run_args() {
    let cli = Cli::parse_from([
        "evwh",
        "run",
        "--input",
        "ev.csv",
        "--database",
        ":memory:",
        "-v",
    ]);
    assert!(cli.global.verbose);
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.input.as_deref(), Some("ev.csv"));
            assert_eq!(args.database.as_deref(), Some(":memory:"));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_profile_default_top() {
    let cli = Cli::parse_from(["evwh", "profile"]);
    match cli.command {
        Commands::Profile(args) => {
            assert_eq!(args.top, 10);
            assert!(args.input.is_none());
            assert_eq!(args.output, ProfileOutput::Text);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_global_args_after_subcommand() {
    let cli = Cli::parse_from(["evwh", "init", "--force", "--project-dir", "proj"]);
    assert_eq!(cli.global.project_dir, "proj");
    assert!(matches!(cli.command, Commands::Init(InitArgs { force: true, .. })));
}
