//! trajvec - Main Entry Point

use clap::Parser;
use std::io::Write;
use tracing::info;
use trajectory::JsonFileSource;
use trajvec_cli::{init_logging, load_config, run, write_output, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level)?;

    info!("=== trajvec v{} ===", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;
    let source = JsonFileSource::new(&args.input);
    let vectors = run(&source, &config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_output(&mut out, &vectors, args.format)?;
    out.flush()?;

    Ok(())
}
