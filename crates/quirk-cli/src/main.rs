//! Quirk Command-Line Interface
//!
//! Compiles Quirk circuit URLs into quantum operations.
//!
//! ```text
//! quirk compile --url 'https://algassert.com/quirk#circuit={"cols":[["H"],["•","X"]]}'
//! quirk compile --format json --time 0.25 --url "$URL"
//! quirk cells --filter QFT
//! ```

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{cells, compile, version};

/// Quirk - compile Quirk circuit URLs into quantum operations
#[derive(Parser)]
#[command(name = "quirk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a Quirk URL and print its operations
    Compile {
        /// Quirk URL (https://algassert.com/quirk#circuit=...)
        #[arg(short, long, env = "QUIRK_URL")]
        url: String,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Bind the time variable `t` to this value
        #[arg(short, long)]
        time: Option<f64>,
    },

    /// List the cell identifiers the compiler understands
    Cells {
        /// Only show identifiers containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Compile { url, format, time } => compile::execute(&url, &format, time),

        Commands::Cells { filter } => {
            cells::execute(filter.as_deref());
            Ok(())
        }

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
