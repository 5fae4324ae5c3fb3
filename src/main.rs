use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use todostore::config::Config;
use todostore::storage::{FileStore, TodoStore};
use todostore::Todo;

mod cli;

use cli::Cli;
use cli::commands::Commands;

fn setup_logging(default_level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("todostore")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("todostore.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!("  data dir: {}", config.storage.data_dir.display());
        println!("  counter:  {}", config.storage.counter_file.display());
    }

    let store = FileStore::open(&config.storage)
        .await
        .context("Failed to open todo store")?;

    match &cli.command {
        Commands::Add { text } => handle_add_command(&store, text).await,
        Commands::List { json } => handle_list_command(&store, *json).await,
        Commands::Show { id, json } => handle_show_command(&store, id, *json).await,
        Commands::Edit { id, text } => handle_edit_command(&store, id, text).await,
        Commands::Remove { id } => handle_remove_command(&store, id).await,
    }
}

async fn handle_add_command(store: &impl TodoStore, text: &str) -> Result<()> {
    let todo = store.create(text).await.context("Failed to create todo")?;
    info!("Created todo {}", todo.id);
    println!("{} {}", "Created:".green(), todo.id);
    Ok(())
}

async fn handle_list_command(store: &impl TodoStore, json: bool) -> Result<()> {
    let todos = store.read_all().await.context("Failed to list todos")?;
    info!("Listing {} todos", todos.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&todos)?);
        return Ok(());
    }

    if todos.is_empty() {
        println!("{}", "No todos".dimmed());
    }
    for todo in &todos {
        println!("{}  {}", todo.id.cyan(), todo.title());
    }
    Ok(())
}

async fn handle_show_command(store: &impl TodoStore, id: &str, json: bool) -> Result<()> {
    let todo = store.read_one(id).await.with_context(|| format!("Failed to read todo {}", id))?;
    print_todo(&todo, json)
}

async fn handle_edit_command(store: &impl TodoStore, id: &str, text: &str) -> Result<()> {
    let todo = store
        .update(id, text)
        .await
        .with_context(|| format!("Failed to update todo {}", id))?;
    info!("Updated todo {}", todo.id);
    println!("{} {}", "Updated:".green(), todo.id);
    Ok(())
}

async fn handle_remove_command(store: &impl TodoStore, id: &str) -> Result<()> {
    store.delete(id).await.with_context(|| format!("Failed to delete todo {}", id))?;
    info!("Deleted todo {}", id);
    println!("{} {}", "Deleted:".red(), id);
    Ok(())
}

fn print_todo(todo: &Todo, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(todo)?);
    } else {
        println!("{}", todo.id.cyan().bold());
        println!("{}", todo.text);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Config first: its log level seeds the filter
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(config.log_level.as_deref().unwrap_or("info")).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
