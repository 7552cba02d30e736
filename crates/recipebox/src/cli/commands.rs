//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Fields shared by `add` and `edit`.
#[derive(Debug, Clone, Default, Args)]
pub struct RecipeFields {
    /// Recipe title
    pub title: String,

    /// Ingredients (free text or JSON)
    #[arg(short, long, default_value = "")]
    pub ingredients: String,

    /// Preparation steps
    #[arg(short, long, default_value = "")]
    pub steps: String,

    /// Comma-separated tags
    #[arg(short, long, default_value = "")]
    pub tags: String,
}

/// Add command arguments.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Fields of the new recipe.
    #[command(flatten)]
    pub fields: RecipeFields,
}

/// Edit command arguments.
#[derive(Debug, Args)]
pub struct EditCommand {
    /// Id of the recipe to edit
    pub id: i64,

    /// Replacement fields.
    #[command(flatten)]
    pub fields: RecipeFields,
}

/// Delete command arguments.
#[derive(Debug, Args)]
pub struct DeleteCommand {
    /// Id of the recipe to delete
    pub id: i64,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Id of the recipe to show
    pub id: i64,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Maximum number of recipes to show
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only show recipes whose tags contain this text
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Random command arguments.
#[derive(Debug, Args)]
pub struct RandomCommand {
    /// Only pick among recipes whose tags contain this text
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Stats command arguments.
#[derive(Debug, Args)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Serve command arguments.
#[derive(Debug, Args)]
pub struct ServeCommand {
    /// Address to listen on (overrides `web.bind`)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}
