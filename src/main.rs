//! trace-intel - Main Entry Point
//!
//! Usage: `trace-intel <analysis_dir> [--config <file>] [--no-dns]`

use std::path::PathBuf;

use anyhow::{bail, Context};

use trace_intel::constants::{APP_NAME, APP_VERSION};
use trace_intel::ScanConfig;

struct Args {
    analysis_dir: PathBuf,
    config: Option<PathBuf>,
    no_dns: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut analysis_dir = None;
    let mut config = None;
    let mut no_dns = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config needs a file path")?;
                config = Some(PathBuf::from(path));
            }
            "--no-dns" => no_dns = true,
            "-h" | "--help" => {
                println!("Usage: {} <analysis_dir> [--config <file>] [--no-dns]", APP_NAME);
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("unknown option {}", other),
            other => {
                if analysis_dir.replace(PathBuf::from(other)).is_some() {
                    bail!("only one analysis directory may be given");
                }
            }
        }
    }

    Ok(Args {
        analysis_dir: analysis_dir.context("missing <analysis_dir>")?,
        config,
        no_dns,
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    let args = parse_args()?;

    let mut config = match &args.config {
        Some(path) => ScanConfig::load(path)?,
        None => ScanConfig::from_env()?,
    };
    if args.no_dns {
        config.resolve_domains = false;
    }

    let summary = trace_intel::run(&args.analysis_dir, &config)
        .with_context(|| format!("processing {}", args.analysis_dir.display()))?;

    for (category, count) in &summary.counts {
        log::info!("   {}: {}", category, count);
    }
    println!("{}", summary.output_path.display());
    Ok(())
}
