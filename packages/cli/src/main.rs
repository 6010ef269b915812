mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{fields, init, issue, preview, validate, FieldsArgs, InitArgs, IssueArgs, PreviewArgs, ValidateArgs};
use tracing_subscriber::EnvFilter;

/// Certkit CLI - certificate templates bound to data records
#[derive(Parser, Debug)]
#[command(name = "certkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a project with a config, a sample template and records
    Init(InitArgs),

    /// List the data fields a template binds, or the standard catalog
    Fields(FieldsArgs),

    /// Render a template against one record
    Preview(PreviewArgs),

    /// Render one certificate per record into the output directory
    Issue(IssueArgs),

    /// Check records for required fields without rendering
    Validate(ValidateArgs),
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;

    match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Fields(args) => fields(args, &cwd),
        Command::Preview(args) => preview(args, &cwd),
        Command::Issue(args) => issue(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
