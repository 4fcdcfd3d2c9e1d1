//! vite-info CLI - runs the vite-info plugin inside a minimal bundler host.

mod commands;
mod discovery;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vite-info")]
#[command(
    author,
    version,
    about = "Build and environment metadata for bundled applications"
)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (searched upwards for vite-info.json if not specified)
    #[arg(short, long, global = true)]
    root: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project and list the emitted files
    Build {
        /// Mode override
        #[arg(short, long)]
        mode: Option<String>,

        /// Write the bundle to the output directory
        #[arg(long)]
        write: bool,
    },

    /// Start a dev session and report file changes
    Serve {
        /// Mode override
        #[arg(short, long)]
        mode: Option<String>,
    },

    /// Print the generated virtual module
    Inspect {
        /// Host command to configure with (serve, build)
        #[arg(short, long, default_value = "serve")]
        command: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{:?}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let root = discovery::project_root(cli.root.as_deref())?;

    match cli.command {
        Commands::Build { mode, write } => commands::build::execute(&root, mode, write),
        Commands::Serve { mode } => commands::serve::execute(&root, mode).await,
        Commands::Inspect { command } => commands::inspect::execute(&root, &command),
    }
}

/// Sends diagnostics to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "vite_info_engine=debug,vite_info_cli=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
