use anyhow::Context;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use huffpack::config::CompressionConfig;
use huffpack::{CompressionStats, Compressor};

#[derive(Parser)]
#[command(name = "huffpack", version, about = "Static Huffman file compressor")]
#[command(group(ArgGroup::new("mode").required(true).args(["compress", "decompress"])))]
struct Cli {
    /// Compress the input file
    #[arg(short = 'c', long)]
    compress: bool,

    /// Decompress the input file
    #[arg(short = 'd', long)]
    decompress: bool,

    input: PathBuf,

    output: PathBuf,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print operation statistics as JSON
    #[arg(long)]
    stats: bool,

    #[arg(short, long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => CompressionConfig::from_json_file(path).context("Invalid configuration")?,
        None => CompressionConfig::default(),
    };
    let compressor = Compressor::new(config);

    let stats: CompressionStats = if cli.compress {
        let stats = compressor
            .compress_file(&cli.input, &cli.output)
            .context("Compression failed")?;
        println!("File compressed successfully.");
        stats
    } else {
        let stats = compressor
            .decompress_file(&cli.input, &cli.output)
            .context("Decompression failed")?;
        println!("File decompressed successfully.");
        stats
    };

    if cli.stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
