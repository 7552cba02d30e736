//! Command-line interface for recipebox.
//!
//! This module provides the CLI structure for the `recipebox` binary and the
//! plain-text rendering its commands print.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, DeleteCommand, EditCommand, ListCommand, RandomCommand,
    RecipeFields, ServeCommand, ShowCommand, StatsCommand,
};

use crate::logging::Verbosity;

/// recipebox - A personal recipe catalog
///
/// Add, edit and browse recipes, pick one at random, and see how many you
/// added each day. `serve` starts the web interface over the same catalog.
#[derive(Debug, Parser)]
#[command(name = "recipebox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a recipe
    Add(AddCommand),

    /// Replace a recipe's title, ingredients, steps and tags
    Edit(EditCommand),

    /// Delete a recipe
    Delete(DeleteCommand),

    /// Show one recipe
    Show(ShowCommand),

    /// List recipes, newest first
    List(ListCommand),

    /// Pick a random recipe
    Random(RandomCommand),

    /// Show how many recipes were added per day
    Stats(StatsCommand),

    /// Start the web interface
    Serve(ServeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "recipebox");
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(parse(&["recipebox", "-q", "list"]).verbosity(), Verbosity::Quiet);
        assert_eq!(parse(&["recipebox", "list"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["recipebox", "-v", "list"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["recipebox", "-vv", "list"]).verbosity(), Verbosity::Trace);
    }

    #[test]
    fn test_parse_add() {
        let cli = parse(&[
            "recipebox",
            "add",
            "Pancakes",
            "--ingredients",
            "flour, milk",
            "--tags",
            "breakfast",
        ]);
        let Command::Add(cmd) = cli.command else {
            panic!("expected add command");
        };
        assert_eq!(cmd.fields.title, "Pancakes");
        assert_eq!(cmd.fields.ingredients, "flour, milk");
        assert_eq!(cmd.fields.steps, "");
        assert_eq!(cmd.fields.tags, "breakfast");
    }

    #[test]
    fn test_parse_edit() {
        let cli = parse(&["recipebox", "edit", "3", "Soup", "-s", "boil"]);
        let Command::Edit(cmd) = cli.command else {
            panic!("expected edit command");
        };
        assert_eq!(cmd.id, 3);
        assert_eq!(cmd.fields.title, "Soup");
        assert_eq!(cmd.fields.steps, "boil");
    }

    #[test]
    fn test_parse_delete_requires_id() {
        assert!(Cli::try_parse_from(["recipebox", "delete"]).is_err());
        assert!(Cli::try_parse_from(["recipebox", "delete", "abc"]).is_err());
        assert!(matches!(
            parse(&["recipebox", "delete", "7"]).command,
            Command::Delete(DeleteCommand { id: 7 })
        ));
    }

    #[test]
    fn test_parse_list_options() {
        let cli = parse(&["recipebox", "list", "--limit", "5", "--tag", "dessert", "--json"]);
        let Command::List(cmd) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(cmd.limit, Some(5));
        assert_eq!(cmd.tag.as_deref(), Some("dessert"));
        assert!(cmd.json);
    }

    #[test]
    fn test_parse_random() {
        let cli = parse(&["recipebox", "random", "-t", "lunch"]);
        let Command::Random(cmd) = cli.command else {
            panic!("expected random command");
        };
        assert_eq!(cmd.tag.as_deref(), Some("lunch"));
    }

    #[test]
    fn test_parse_serve_bind() {
        let cli = parse(&["recipebox", "serve", "--bind", "0.0.0.0:9000"]);
        let Command::Serve(cmd) = cli.command else {
            panic!("expected serve command");
        };
        assert_eq!(cmd.bind.as_deref(), Some("0.0.0.0:9000"));
    }

    #[test]
    fn test_parse_stats_and_config() {
        assert!(matches!(
            parse(&["recipebox", "stats"]).command,
            Command::Stats(_)
        ));
        assert!(matches!(
            parse(&["recipebox", "config", "path"]).command,
            Command::Config(ConfigCommand::Path)
        ));
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["recipebox", "-c", "/custom/config.toml", "list"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }
}
