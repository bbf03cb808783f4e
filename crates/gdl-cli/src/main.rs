//! # gdl CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// Digital Link resolver toolchain.
///
/// Resolves identifiers against a record corpus, prints linkset
/// documents, and normalises default-selection flags.
#[derive(Parser, Debug)]
#[command(name = "gdl", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve one identifier and print the resolution result.
    Resolve(gdl_cli::resolve::ResolveArgs),
    /// Print linkset documents for a record corpus.
    Linkset(gdl_cli::linkset::LinksetArgs),
    /// Normalise default-selection flags in a record corpus.
    Defaults(gdl_cli::defaults::DefaultsArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => gdl_cli::resolve::run(args).await,
        Commands::Linkset(args) => gdl_cli::linkset::run(args),
        Commands::Defaults(args) => gdl_cli::defaults::run(args),
    }
}
