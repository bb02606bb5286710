//! Baseliner CLI - command-line interface for the compatibility analyzer
//!
//! Analyzes JavaScript, TypeScript, CSS and HTML sources for browser
//! compatibility issues against baseline support data.

mod commands;
mod output;

use clap::Parser;
use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "baseliner",
    author,
    version,
    about = "Browser compatibility analyzer for web source code",
    long_about = "Baseliner detects uses of modern web-platform features in JavaScript,\n\
                  TypeScript, CSS and HTML, checks each against baseline browser support\n\
                  data, and reports issues with severity, affected browsers and\n\
                  suggested fixes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Check(args) => args.run()?,
        Commands::Explain(args) => {
            args.run()?;
            0
        }
        Commands::Features(args) => {
            args.run()?;
            0
        }
        Commands::Init(args) => {
            args.run()?;
            0
        }
    };

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}
