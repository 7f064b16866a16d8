// SPDX-FileCopyrightText: 2026 Coach Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coach - a mock-interview practice partner.
//!
//! This is the binary entry point: it loads configuration, initializes
//! tracing and dispatches to the subcommands.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod adapters;
mod doctor;
mod personas;
mod shell;

use clap::{Parser, Subcommand};

/// Coach - practice job interviews with simulated interviewers.
#[derive(Parser, Debug)]
#[command(name = "coach", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start an interactive interview.
    Shell {
        /// Interviewer persona id (see `coach personas`).
        #[arg(long, default_value = "1")]
        persona: String,
        /// Position being interviewed for.
        #[arg(long)]
        job_title: String,
        /// Name the interviewer greets you with.
        #[arg(long)]
        name: Option<String>,
    },
    /// List the available interviewer personas.
    Personas,
    /// Manage Coach configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Check that every enabled external service can be reached.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Load and validate the configuration, then exit.
    Check,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match coach_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            coach_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.session.log_level);

    let result = match cli.command {
        Some(Commands::Shell {
            persona,
            job_title,
            name,
        }) => {
            let start = adapters::SessionStart {
                persona: persona.as_str().into(),
                job_title,
                candidate_name: name,
            };
            shell::run_shell(config, start).await
        }
        Some(Commands::Personas) => personas::run_personas(&config),
        Some(Commands::Config {
            action: ConfigCommands::Check,
        }) => {
            println!(
                "coach: configuration is valid ({} custom persona(s), max_questions={})",
                config.personas.len(),
                config.session.max_questions
            );
            Ok(())
        }
        Some(Commands::Doctor { plain }) => doctor::run_doctor(&config, plain).await,
        None => {
            println!("coach: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so they never interleave with the interview transcript.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coach={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc can advance the stats epoch.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = coach_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.session.max_questions, 10);
    }

    #[test]
    fn shell_requires_a_job_title() {
        assert!(Cli::try_parse_from(["coach", "shell"]).is_err());

        let cli = Cli::try_parse_from(["coach", "shell", "--job-title", "Backend Engineer"])
            .expect("job title alone is enough");
        match cli.command {
            Some(Commands::Shell {
                persona,
                job_title,
                name,
            }) => {
                assert_eq!(persona, "1");
                assert_eq!(job_title, "Backend Engineer");
                assert!(name.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_check_parses() {
        let cli = Cli::try_parse_from(["coach", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Check
            })
        ));
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
