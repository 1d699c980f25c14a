use crate::challenge::{registry, Challenge};
use crate::challenge::names::NameGenerator;
use crate::config::types::{QuestConfig, QuestError};
use crate::quest::{Quest, SubmitOutcome};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::ExitCode;

const USAGE: &str = "Usage: bashquest start | submit FLAG | reset";

#[derive(Parser)]
#[command(name = "bashquest", author, version, about = "Learn shell navigation by solving directory puzzles", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start (or restart) the quest from the first challenge
    Start,
    /// Submit a flag for the active challenge
    Submit {
        /// Name of the directory you found
        flag: Option<String>,
    },
    /// Delete all progress and the workspace
    Reset,
    /// List all challenges
    List,
    /// Show the active challenge
    Current,
    /// Jump to a challenge by number or id (rebuilds the workspace)
    Goto {
        /// Challenge number (1-based) or id
        target: String,
    },
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

fn print_challenge(number: u32, challenge: &dyn Challenge) {
    println!("Challenge {} ({}):", number, challenge.title());
    for line in challenge.description() {
        println!("{}", line);
    }
}

fn print_workspace(quest: &Quest) {
    if let Some(ws) = quest.workspace() {
        println!("Workspace: {}", ws.display());
    }
}

pub fn run() -> Result<ExitCode> {
    env_logger::init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("{}", USAGE);
        return Ok(ExitCode::SUCCESS);
    };

    if let Commands::Unknown(args) = &command {
        log::debug!("Unrecognised command: {:?}", args);
        println!("Unknown command.");
        return Ok(ExitCode::SUCCESS);
    }

    let config = QuestConfig::from_env()?;
    let mut quest = Quest::open(config, NameGenerator::from_clock())?;

    match command {
        Commands::Start => {
            let challenge = quest.start()?;
            print_challenge(1, challenge);
            print_workspace(&quest);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Submit { flag } => {
            let Some(flag) = flag else {
                println!("Missing flag.");
                return Ok(ExitCode::FAILURE);
            };

            match quest.submit(&flag)? {
                SubmitOutcome::Advanced { number, challenge } => {
                    println!("Correct!");
                    print_challenge(number, challenge);
                    print_workspace(&quest);
                    Ok(ExitCode::SUCCESS)
                }
                SubmitOutcome::Finished => {
                    println!("Correct!");
                    println!("You completed all challenges.");
                    Ok(ExitCode::SUCCESS)
                }
                SubmitOutcome::Wrong => {
                    println!("Wrong flag.");
                    Ok(ExitCode::FAILURE)
                }
                SubmitOutcome::AlreadyComplete => {
                    println!("All challenges completed.");
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
        Commands::Reset => {
            quest.reset()?;
            println!("Progress reset.");
            Ok(ExitCode::SUCCESS)
        }
        Commands::List => {
            for (index, challenge) in registry::all().iter().enumerate() {
                let number = index as u32 + 1;
                let marker = if number == quest.number() { ">" } else { " " };
                println!("{} {}. {} [{}]", marker, number, challenge.title(), challenge.id());
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Current => {
            match quest.current() {
                Some(challenge) => {
                    print_challenge(quest.number(), challenge);
                    print_workspace(&quest);
                }
                None => println!("All challenges completed."),
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Goto { target } => match quest.goto(&target) {
            Ok((number, challenge)) => {
                println!("Jumped to challenge {}", number);
                print_challenge(number, challenge);
                print_workspace(&quest);
                Ok(ExitCode::SUCCESS)
            }
            Err(QuestError::UnknownChallenge(_)) => {
                println!("Invalid challenge.");
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        },
        Commands::Unknown(_) => Ok(ExitCode::SUCCESS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_submit_flag_is_optional() {
        let cli = Cli::try_parse_from(["bashquest", "submit"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Submit { flag: None })));
    }

    #[test]
    fn test_unknown_command_is_captured() {
        let cli = Cli::try_parse_from(["bashquest", "dance", "now"]).unwrap();
        match cli.command {
            Some(Commands::Unknown(args)) => assert_eq!(args, ["dance", "now"]),
            _ => panic!("expected unknown command"),
        }
    }
}
