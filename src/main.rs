use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use xjview2csv::cli::{Cli, USAGE};
use xjview2csv::convert::ConversionJob;

/// Initialize tracing subscriber; RUST_LOG overrides the default `warn` level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing();

    let Some(input) = args.input else {
        println!("{}", USAGE);
        return Ok(());
    };

    println!("Working on {}", input.display());

    let job = ConversionJob::from_input(input);
    job.run()
        .with_context(|| format!("converting {}", job.input.display()))?;

    Ok(())
}
