// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HSMS - Health Services Management System.
//!
//! This is the binary entry point: an interactive clinic shell plus a few
//! one-shot commands for inspecting routes, menus, and access decisions.

mod render;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use hsms_config::HsmsConfig;
use hsms_core::{AuthContext, HsmsError, Role, Session, UserId};
use hsms_router::{Navigator, project_menu};

/// HSMS - Health Services Management System.
#[derive(Parser, Debug)]
#[command(name = "hsms", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch the interactive clinic shell (default).
    Shell,
    /// Print the route table.
    Routes,
    /// Print the navigation menu for a role.
    Menu {
        #[arg(long)]
        role: Role,
    },
    /// Show what a path resolves to for a role, or for nobody signed in.
    Check {
        path: String,
        #[arg(long)]
        role: Option<Role>,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => hsms_config::load_and_validate_path(path),
        None => hsms_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            hsms_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);
    tracing::debug!(app = %config.app.name, "config loaded");

    if let Err(e) = run(cli.command.unwrap_or(Commands::Shell), &config) {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &HsmsConfig) -> Result<(), HsmsError> {
    match command {
        Commands::Shell => shell::run_shell(config),
        Commands::Routes => {
            print!("{}", render::route_table(standard_navigator()?.table()));
            Ok(())
        }
        Commands::Menu { role } => {
            print!("{}", render::menu(&project_menu(Some(role))));
            Ok(())
        }
        Commands::Check { path, role } => {
            let navigator = standard_navigator()?;
            let session =
                role.map(|r| Session::new(UserId("cli".into()), "CLI User", "cli@localhost", r));
            let ctx = AuthContext::new(session.as_ref(), true);
            println!("{}", render::outcome(&path, &navigator.navigate(&path, &ctx)));
            Ok(())
        }
    }
}

fn standard_navigator() -> Result<Navigator, HsmsError> {
    Ok(Navigator::standard()?)
}

/// Log to stderr so command output on stdout stays clean.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let crates = ["hsms", "hsms_auth", "hsms_router", "hsms_config"];
        let directives: Vec<String> = crates.iter().map(|c| format!("{c}={log_level}")).collect();
        EnvFilter::new(format!("{},warn", directives.join(",")))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn shell_is_the_default_command() {
        let cli = Cli::try_parse_from(["hsms"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn roles_parse_case_insensitively() {
        let cli = Cli::try_parse_from(["hsms", "menu", "--role", "Doctor"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Menu { role: Role::Doctor })));
        assert!(Cli::try_parse_from(["hsms", "menu", "--role", "janitor"]).is_err());
    }

    #[test]
    fn check_takes_optional_role_and_global_config() {
        let cli = Cli::try_parse_from([
            "hsms",
            "check",
            "/patient/42",
            "--role",
            "doctor",
            "--config",
            "x.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        let Some(Commands::Check { path, role }) = cli.command else {
            panic!("expected check");
        };
        assert_eq!(path, "/patient/42");
        assert_eq!(role, Some(Role::Doctor));
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config =
            hsms_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.app.name, "hsms");
    }
}
