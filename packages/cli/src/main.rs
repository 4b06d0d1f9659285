mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{edit, format, locate, tree, EditArgs, FormatArgs, LocateArgs, TreeArgs};
use tracing_subscriber::EnvFilter;

/// NodeFlow CLI - Edit JSON documents as node trees
#[derive(Parser, Debug)]
#[command(name = "nodeflow")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log applied and rejected edits (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the node tree of a JSON file
    Tree(TreeArgs),

    /// Rewrite a JSON file in canonical 2-space form
    Format(FormatArgs),

    /// Show where a node's text lives in the formatted file
    Locate(LocateArgs),

    /// Apply a script of edits to a JSON file
    Edit(EditArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Tree(args) => tree(args, &cwd),
                Command::Format(args) => format(args, &cwd),
                Command::Locate(args) => locate(args, &cwd),
                Command::Edit(args) => edit(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
