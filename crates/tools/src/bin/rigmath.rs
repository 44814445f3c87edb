//! rigmath CLI
//!
//! Usage: `rigmath [--config engine.yaml] <frame|transport> <input.yaml>`

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::error;

use rigmath_tools::commands::{frame, transport};

#[derive(Parser, Debug)]
#[command(name = "rigmath")]
#[command(about = "Curve framing and parallel transport")]
struct Cli {
    /// Engine configuration YAML
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Frame a polyline by cross products.
    Frame {
        /// Request YAML with `points` and optional `upHints`, `aimAxis`, `upAxis`
        input: PathBuf,
    },

    /// Parallel-transport normals along tangents.
    Transport {
        /// Request YAML with `tangents`, `direction` and start/end normals
        input: PathBuf,
    },
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let config = rigmath_tools::load_config(cli.config.as_deref())?;
    let report = match &cli.command {
        Commands::Frame { input } => {
            let request: frame::FrameRequest = rigmath_tools::read_request(input)?;
            serde_json::to_value(frame::run(&request, &config)?)?
        }
        Commands::Transport { input } => {
            let request: transport::TransportRequest = rigmath_tools::read_request(input)?;
            serde_json::to_value(transport::run(&request, &config)?)?
        }
    };
    let text = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    Ok(text)
}

fn main() {
    rigmath_tools::init_logging();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            error!("{e:#}");
            process::exit(1);
        }
    }
}
