//! `recipebox` - CLI for the recipe catalog
//!
//! Opens the configured database, wires a [`RecipeController`] to it and runs
//! the requested command, or serves the web interface.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use recipebox::cli::{
    render, AddCommand, Cli, Command, ConfigCommand, EditCommand, ListCommand, RecipeFields,
    ServeCommand, StatsCommand,
};
use recipebox::web::{self, AppState};
use recipebox::{init_logging, Config, Error, Recipe, RecipeController, Storage, TracingSink};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbosity());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<Error>() {
            // Rejected input or a missing recipe: a message, not a failure trace.
            Some(domain) if domain.is_domain() => {
                eprintln!("{domain}");
                ExitCode::from(1)
            }
            _ => {
                eprintln!("Error: {err:#}");
                ExitCode::from(2)
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Config(cmd) => handle_config(&config, cmd),
        Command::Serve(cmd) => handle_serve(&config, cmd),
        Command::Add(cmd) => handle_add(&open_controller(&config)?, cmd),
        Command::Edit(cmd) => handle_edit(&open_controller(&config)?, cmd),
        Command::Delete(cmd) => {
            open_controller(&config)?.delete_recipe(cmd.id)?;
            println!("Deleted recipe #{}", cmd.id);
            Ok(())
        }
        Command::Show(cmd) => {
            let recipe = open_controller(&config)?.get_recipe(cmd.id)?;
            print_recipe(&recipe, cmd.json)
        }
        Command::List(cmd) => handle_list(&open_controller(&config)?, cmd),
        Command::Random(cmd) => {
            let recipe = open_controller(&config)?.random_recipe(cmd.tag.as_deref())?;
            print_recipe(&recipe, cmd.json)
        }
        Command::Stats(cmd) => handle_stats(&open_controller(&config)?, &cmd),
    }
}

fn open_controller(config: &Config) -> anyhow::Result<RecipeController> {
    let storage = Storage::open(config.database_path())?;
    Ok(RecipeController::new(storage).with_sink(TracingSink))
}

fn print_recipe(recipe: &Recipe, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(recipe)?);
    } else {
        println!("{}", render::recipe_details(recipe));
    }
    Ok(())
}

fn handle_serve(config: &Config, cmd: ServeCommand) -> anyhow::Result<()> {
    let addr = match cmd.bind {
        Some(bind) => bind
            .parse()
            .with_context(|| format!("invalid bind address: {bind}"))?,
        None => config.bind_addr()?,
    };
    let state = AppState::new(open_controller(config)?, config.web.list_limit);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(web::serve(state, addr))?;
    Ok(())
}

fn handle_add(controller: &RecipeController, cmd: AddCommand) -> anyhow::Result<()> {
    let RecipeFields {
        title,
        ingredients,
        steps,
        tags,
    } = cmd.fields;
    let id = controller.add_recipe(&title, &ingredients, &steps, &tags)?;
    println!("Added recipe #{id}");
    Ok(())
}

fn handle_edit(controller: &RecipeController, cmd: EditCommand) -> anyhow::Result<()> {
    let RecipeFields {
        title,
        ingredients,
        steps,
        tags,
    } = cmd.fields;
    controller.edit_recipe(cmd.id, &title, &ingredients, &steps, &tags)?;
    println!("Updated recipe #{}", cmd.id);
    Ok(())
}

fn handle_list(controller: &RecipeController, cmd: ListCommand) -> anyhow::Result<()> {
    let recipes = match cmd.tag.as_deref().filter(|tag| !tag.is_empty()) {
        Some(tag) => controller.find_by_tag(tag, cmd.limit)?,
        None => controller.list_recipes(cmd.limit)?,
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
    } else {
        println!("{}", render::recipe_table(&recipes));
    }
    Ok(())
}

fn handle_stats(controller: &RecipeController, cmd: &StatsCommand) -> anyhow::Result<()> {
    let stats = controller.activity_stats()?;
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", render::activity_chart(&stats));
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!();
                println!("[Web]");
                println!("  Bind address:       {}", config.web.bind);
                match config.web.list_limit {
                    Some(limit) => println!("  List limit:         {limit}"),
                    None => println!("  List limit:         none"),
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
