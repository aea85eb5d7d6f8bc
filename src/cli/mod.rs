//! The `minigit` command-line front end

pub mod render;

use crate::areas::repository::Repository;
use crate::artifacts::core::{page_or_print, stdout_is_terminal};
use crate::commands::porcelain::log::DEFAULT_LOG_LIMIT;
use crate::server::MinigitServer;
use crate::server::config::{DEFAULT_BIND_ADDR, ServerConfig};
use chrono::{DateTime, FixedOffset};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "minigit",
    version,
    about = "A small single-user version control system",
    long_about = "minigit records snapshots of a working directory: stage files, \
    commit them, and browse the history from the command line or a web dashboard.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
pub struct Cli {
    #[arg(
        short = 'C',
        long = "repo",
        global = true,
        env = "MINIGIT_REPO",
        default_value = ".",
        help = "Working directory of the repository"
    )]
    pub repo: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create an empty repository")]
    Init,
    #[command(about = "Stage files or directories for the next commit")]
    Add {
        #[arg(required = true, help = "Files or directories to stage ('.' for everything)")]
        paths: Vec<String>,
    },
    #[command(about = "Remove files from staging")]
    Unstage {
        #[arg(required = true)]
        paths: Vec<String>,
    },
    #[command(about = "Record the staged files as a new commit")]
    Commit {
        #[arg(short, long, value_parser = NonEmptyStringValueParser::new(), help = "The commit message")]
        message: String,
        #[arg(
            long,
            env = "MINIGIT_COMMIT_DATE",
            value_parser = parse_commit_date,
            hide = true
        )]
        date: Option<DateTime<FixedOffset>>,
    },
    #[command(about = "Show the working tree status")]
    Status,
    #[command(about = "Show commit history, newest first")]
    Log {
        #[arg(short = 'n', long = "max-count", default_value_t = DEFAULT_LOG_LIMIT)]
        limit: usize,
        #[arg(long, help = "One line per commit")]
        oneline: bool,
    },
    #[command(about = "Show a commit (head by default)")]
    Show {
        #[arg(help = "Full or abbreviated commit id")]
        id: Option<String>,
    },
    #[command(about = "Compare a working-directory file against head")]
    Diff { path: String },
    #[command(name = "ls-files", about = "List working-directory files")]
    LsFiles,
    #[command(about = "Serve the REST API and dashboard")]
    Serve {
        #[arg(long, env = "MINIGIT_BIND", default_value = DEFAULT_BIND_ADDR)]
        bind: SocketAddr,
    },
}

/// Accepts RFC 3339 or `%Y-%m-%d %H:%M:%S %z`
pub fn parse_commit_date(raw: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .map_err(|error| format!("invalid commit date '{raw}': {error}"))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    colored::control::set_override(stdout_is_terminal());

    let mut repository = Repository::new(&cli.repo)?;

    match cli.command {
        Commands::Init => {
            repository.init()?;
            println!(
                "Initialized empty minigit repository in {}",
                repository.metadata_path().display()
            );
        }
        Commands::Add { paths } => {
            for path in repository.add(paths.as_slice())? {
                println!("staged {path}");
            }
        }
        Commands::Unstage { paths } => {
            for path in paths {
                if repository.unstage(&path)? {
                    println!("unstaged {path}");
                } else {
                    println!("{path} was not staged");
                }
            }
        }
        Commands::Commit { message, date } => {
            let summary = match date {
                Some(date) => repository.commit_at(&message, date)?,
                None => repository.commit(&message)?,
            };
            print!("{}", render::commit_created(&summary));
        }
        Commands::Status => {
            let status = repository.status()?;
            print!("{}", render::status(&status));
        }
        Commands::Log { limit, oneline } => {
            let commits = repository.log(limit)?;
            let output = if oneline {
                render::log_oneline(&commits)
            } else {
                render::log_medium(&commits)
            };
            page_or_print(&output)?;
        }
        Commands::Show { id } => {
            let details = repository.show(id.as_deref())?;
            page_or_print(&render::show(&details))?;
        }
        Commands::Diff { path } => {
            let file_diff = repository.diff(&path)?;
            print!("{}", render::diff(&file_diff));
        }
        Commands::LsFiles => {
            for path in repository.list_files()? {
                println!("{path}");
            }
        }
        Commands::Serve { bind } => {
            let config = ServerConfig::new(bind, repository.path());
            MinigitServer::new(config).serve().await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("2023-01-01T12:00:00+02:00")]
    #[case("2023-01-01 12:00:00 +0200")]
    fn commit_dates_in_either_format(#[case] raw: &str) {
        let date = parse_commit_date(raw).unwrap();

        assert_eq!(date.to_rfc3339(), "2023-01-01T12:00:00+02:00");
    }

    #[test]
    fn garbage_commit_date_is_rejected() {
        assert!(parse_commit_date("yesterday").is_err());
    }

    #[test]
    fn log_defaults() {
        let cli = Cli::try_parse_from(["minigit", "log"]).unwrap();

        match cli.command {
            Commands::Log { limit, oneline } => {
                assert_eq!(limit, DEFAULT_LOG_LIMIT);
                assert!(!oneline);
            }
            _ => panic!("expected log"),
        }
    }

    #[test]
    fn commit_requires_a_message() {
        assert!(Cli::try_parse_from(["minigit", "commit"]).is_err());
        assert!(Cli::try_parse_from(["minigit", "commit", "-m", ""]).is_err());
    }

    #[test]
    fn repository_flag_is_global() {
        let cli = Cli::try_parse_from(["minigit", "status", "-C", "/tmp/repo"]).unwrap();

        assert_eq!(cli.repo, PathBuf::from("/tmp/repo"));
    }
}
