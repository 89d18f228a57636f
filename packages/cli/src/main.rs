mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{apply, create, relations, show, ApplyArgs, NewArgs, RelationsArgs, ShowArgs};
use tracing_subscriber::EnvFilter;

/// HermeneutiX CLI - Syntactical and semantic analysis of texts
#[derive(Parser, Debug)]
#[command(name = "hermeneutix")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new analysis from a text file
    New(NewArgs),

    /// Print the structure of a document
    Show(ShowArgs),

    /// Apply a JSON mutation script to a document
    Apply(ApplyArgs),

    /// List the available relation templates
    Relations(RelationsArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::New(args) => create(args, &cwd),
            Command::Show(args) => show(args, &cwd),
            Command::Apply(args) => apply(args, &cwd),
            Command::Relations(args) => relations(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
