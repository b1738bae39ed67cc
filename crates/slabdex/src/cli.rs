//! Command-line interface for slabdex.
//!
//! The CLI talks to the same services the handlers do, straight against
//! the configured snapshot directory. It is an operator's tool: no
//! bearer token is involved, the operator already has the files.

use crate::app::App;
use crate::config::CONFIG_FILE_NAME;
use crate::engine::SearchQuery;
use crate::error::Result;
use crate::users::NewUser;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Spreadsheet-backed slab inventory search.
#[derive(Debug, Parser)]
#[command(name = "slabdex", version, about)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the inventory by block number.
    Search {
        /// Block number to match (case-insensitive).
        #[arg(long)]
        block_no: String,

        /// Narrow by part number.
        #[arg(long)]
        part_no: Option<String>,

        /// Narrow by thickness.
        #[arg(long)]
        thickness: Option<String>,
    },

    /// Manage users stored on the user tab.
    #[command(subcommand)]
    User(UserCommand),
}

/// User management commands.
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// Register a new user.
    Add {
        /// Login name.
        #[arg(long)]
        username: String,

        /// Contact email.
        #[arg(long)]
        email: String,

        /// Password (digested before storage).
        #[arg(long)]
        password: String,
    },
}

impl Cli {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Execute the parsed command.
    ///
    /// # Errors
    ///
    /// Propagates configuration, sheet, and query errors.
    pub async fn execute(self) -> Result<()> {
        let app = App::from_config(&self.config).await?;

        match self.command {
            Command::Search {
                block_no,
                part_no,
                thickness,
            } => {
                let mut query = SearchQuery::new(block_no);
                query.part_no = part_no;
                query.thickness = thickness;

                let results = app.search().search(&query).await?;
                println!("{}", serde_json::to_string_pretty(&results)?);
            }
            Command::User(UserCommand::Add {
                username,
                email,
                password,
            }) => {
                let user = app
                    .users()
                    .create(NewUser {
                        username,
                        email,
                        password,
                    })
                    .await?;
                println!("Created user {} (id {})", user.username, user.id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_search_with_optional_keys() {
        let cli = Cli::try_parse_from([
            "slabdex",
            "search",
            "--block-no",
            "B1",
            "--thickness",
            "10",
        ])
        .unwrap();
        match cli.command {
            Command::Search {
                block_no,
                part_no,
                thickness,
            } => {
                assert_eq!(block_no, "B1");
                assert_eq!(part_no, None);
                assert_eq!(thickness.as_deref(), Some("10"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn search_requires_a_block_number() {
        assert!(Cli::try_parse_from(["slabdex", "search"]).is_err());
    }
}
