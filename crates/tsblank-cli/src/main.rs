//! Command-line driver: read TypeScript, write position-preserving
//! JavaScript.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tsblank::transform_collecting;

#[derive(Parser, Debug)]
#[command(
    name = "tsblank",
    about = "Erase TypeScript type syntax, preserving every byte offset",
    version
)]
struct Args {
    /// Input file, or `-` for stdin.
    input: PathBuf,

    /// Write output here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print diagnostics as JSON on stderr.
    #[arg(long)]
    json: bool,

    /// Exit non-zero when unsupported syntax is found.
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("reading stdin")?;
        Ok(source)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn run(args: &Args) -> Result<ExitCode> {
    let source = read_input(&args.input)?;
    let result = transform_collecting(&source);
    info!(
        bytes = source.len(),
        diagnostics = result.diagnostics.len(),
        "transformed"
    );

    if args.json {
        let rendered =
            serde_json::to_string(&result.diagnostics).context("serializing diagnostics")?;
        eprintln!("{rendered}");
    } else {
        for diagnostic in &result.diagnostics {
            eprintln!(
                "tsblank: {} at {}..{}",
                diagnostic.message, diagnostic.pos, diagnostic.end
            );
        }
    }

    match &args.output {
        Some(path) => {
            std::fs::write(path, &result.output)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        None => print!("{}", result.output),
    }

    if args.check && !result.diagnostics.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);
    match run(&args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("tsblank: {error:#}");
            ExitCode::from(2)
        }
    }
}
