// SPDX-FileCopyrightText: 2026 HSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hsms shell` command implementation.
//!
//! An interactive REPL over the session store and navigator. The session
//! saved by an earlier run is restored on start, and every sign-in or
//! sign-out writes through to the configured slot.

use colored::Colorize;
use hsms_auth::SessionStore;
use hsms_config::HsmsConfig;
use hsms_core::HsmsError;
use hsms_router::{Navigation, Navigator, landing_page};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::render;

/// Redirect hops followed before giving up on a path.
const MAX_REDIRECTS: usize = 4;

const HELP: &str = "\
commands:
  login <email> <password>                sign in
  signup <email> <password> <full name>   create a patient account
  logout                                  sign out
  go <path>                               navigate to a path
  menu                                    show your navigation menu
  whoami                                  show the signed-in user
  complete-profile                        finish your patient profile
  routes                                  list every route
  help                                    show this help
  quit                                    leave the shell
";

/// What a shell command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    Quit,
}

pub struct Shell {
    store: SessionStore,
    navigator: Navigator,
}

impl Shell {
    pub fn new(store: SessionStore, navigator: Navigator) -> Self {
        Self { store, navigator }
    }

    /// Navigate to `path`, following redirects, and render the final page.
    pub fn visit(&self, path: &str) -> String {
        let ctx = self.store.context();
        let mut out = String::new();
        let mut current = path.to_string();
        for _ in 0..MAX_REDIRECTS {
            let navigation = self.navigator.navigate(&current, &ctx);
            out.push_str(&render::outcome(&current, &navigation));
            out.push('\n');
            match navigation {
                Navigation::Render { page, params } => {
                    out.push_str(&render::page(page, &params, &self.navigator.menu(&ctx)));
                    return out;
                }
                Navigation::Redirect { to, .. } => current = to.path().to_string(),
                Navigation::NotFound { .. } => {
                    out.push_str(&render::page(
                        hsms_router::Page::NotFound,
                        &Default::default(),
                        &self.navigator.menu(&ctx),
                    ));
                    return out;
                }
            }
        }
        debug!(path, "redirect limit reached");
        out
    }

    /// Render the viewer's landing page.
    pub fn visit_home(&self) -> String {
        let home = landing_page(&self.store.context());
        self.visit(home.path())
    }

    /// Run one command line.
    ///
    /// Sign-in problems come back as [`HsmsError::Auth`]; the caller shows
    /// them as notices and keeps going.
    pub fn execute(&mut self, line: &str) -> Result<Reply, HsmsError> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Ok(Reply::Output(String::new()));
        };
        let args: Vec<&str> = words.collect();

        let output = match command {
            "login" => {
                let email = args.first().copied().unwrap_or_default();
                let password = args.get(1).copied().unwrap_or_default();
                let session = self.store.login(email, password)?;
                format!(
                    "signed in as {} ({})\n{}",
                    session.display_name(),
                    session.role(),
                    self.visit_home()
                )
            }
            "signup" => {
                let email = args.first().copied().unwrap_or_default();
                let password = args.get(1).copied().unwrap_or_default();
                let name = args.get(2..).map(|rest| rest.join(" ")).unwrap_or_default();
                let session = self.store.signup(&name, email, password)?;
                format!(
                    "account created for {}\n{}",
                    session.display_name(),
                    self.visit_home()
                )
            }
            "logout" => {
                self.store.logout()?;
                format!("signed out\n{}", self.visit_home())
            }
            "go" => match args.first() {
                Some(path) => self.visit(path),
                None => "usage: go <path>\n".to_string(),
            },
            "menu" => render::menu(&self.navigator.menu(&self.store.context())),
            "whoami" => match self.store.current() {
                Some(s) => {
                    let profile = if self.store.context().profile_complete() {
                        "complete"
                    } else {
                        "incomplete"
                    };
                    format!(
                        "{} <{}> {} (profile {profile})\n",
                        s.display_name(),
                        s.email(),
                        s.role()
                    )
                }
                None => "not signed in\n".to_string(),
            },
            "complete-profile" => {
                self.store.complete_profile()?;
                format!("profile saved\n{}", self.visit_home())
            }
            "routes" => render::route_table(self.navigator.table()),
            "help" => HELP.to_string(),
            "quit" | "exit" => return Ok(Reply::Quit),
            other => format!("unknown command: {other} (try help)\n"),
        };
        Ok(Reply::Output(output))
    }
}

/// Runs the `hsms shell` interactive REPL.
pub fn run_shell(config: &HsmsConfig) -> Result<(), HsmsError> {
    let mut store = SessionStore::from_config(config)?;
    if let Some(session) = store.restore_session()? {
        info!(user = %session.display_name(), "resuming saved session");
    }
    let navigator = Navigator::standard()?;
    let mut shell = Shell::new(store, navigator);

    let mut rl = DefaultEditor::new()
        .map_err(|e| HsmsError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", config.app.name.bold().green());
    println!("Type {} for commands, {} to exit.\n", "help".yellow(), "quit".yellow());
    print!("{}", shell.visit_home());

    let prompt = format!("{}> ", config.app.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match shell.execute(trimmed) {
                    Ok(Reply::Output(text)) => print!("{text}"),
                    Ok(Reply::Quit) => break,
                    Err(HsmsError::Auth(failure)) => eprintln!("{}", failure.to_string().yellow()),
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }
    Ok(())
}
