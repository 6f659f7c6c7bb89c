//! Zoombox CLI
//!
//! Compute fit factors and replay resize timelines without a host.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use zoombox_core::{compute_scale, FitPolicy, ScaleRatios};
use zoombox_platform::Size;

mod config;
mod replay;

use config::{load_settings, parse_size, ReplayScript};

#[derive(Parser)]
#[command(name = "zoombox")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fit-to-boundary scaling toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the zoomfactor that fits a guide into a boundary
    Fit {
        /// Boundary size (WIDTHxHEIGHT)
        #[arg(short, long, value_parser = parse_size)]
        boundary: Size,

        /// Guide size (WIDTHxHEIGHT)
        #[arg(short, long, value_parser = parse_size)]
        guide: Size,

        /// Fit policy (longest, width, height, shortest, 0-3, or all)
        #[arg(short, long, default_value = "longest")]
        policy: String,
    },

    /// Replay a scripted resize timeline against headless regions
    Replay {
        /// Replay script (TOML)
        script: PathBuf,

        /// Coordinator settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Fit {
            boundary,
            guide,
            policy,
        } => cmd_fit(boundary, guide, &policy),

        Commands::Replay { script, config } => cmd_replay(&script, config.as_deref()),
    }
}

fn cmd_fit(boundary: Size, guide: Size, policy: &str) -> Result<()> {
    let policies: Vec<FitPolicy> = if policy.eq_ignore_ascii_case("all") {
        FitPolicy::ALL.to_vec()
    } else {
        vec![policy.parse()?]
    };

    let ratios = ScaleRatios::between(boundary, guide);
    println!("boundary {}  guide {}", boundary, guide);
    println!("ratios   width={:.4}  height={:.4}", ratios.width, ratios.height);

    if let [single] = policies.as_slice() {
        let factor = compute_scale(*single, boundary, guide)?;
        println!("{:<9}{:.4}", single.name(), factor);
        return Ok(());
    }

    for policy in policies {
        match compute_scale(policy, boundary, guide) {
            Ok(factor) => println!("{:<9}{:.4}", policy.name(), factor),
            Err(err) => println!("{:<9}{}", policy.name(), err),
        }
    }
    Ok(())
}

fn cmd_replay(script_path: &std::path::Path, config: Option<&std::path::Path>) -> Result<()> {
    let settings = load_settings(config)?;
    let script = ReplayScript::load(script_path)?;

    info!(
        "Replaying {} ({} steps, settle delay {}ms)",
        script_path.display(),
        script.steps.len(),
        settings.settle_delay_ms
    );

    let lines = replay::run(&script, &settings);
    for line in &lines {
        println!("{}", line);
    }

    let settles = lines
        .iter()
        .filter(|line| line.burst_len.is_some())
        .count();
    info!("{} dispatches, {} settles", lines.len(), settles);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fit_args() {
        let cli = Cli::try_parse_from([
            "zoombox", "fit", "--boundary", "800x600", "--guide", "400x100", "-p", "all",
        ])
        .unwrap();
        match cli.command {
            Commands::Fit {
                boundary,
                guide,
                policy,
            } => {
                assert_eq!(boundary, Size::new(800.0, 600.0));
                assert_eq!(guide, Size::new(400.0, 100.0));
                assert_eq!(policy, "all");
            }
            Commands::Replay { .. } => panic!("expected fit"),
        }
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        assert!(Cli::try_parse_from(["zoombox", "fit", "-b", "800", "-g", "1x1"]).is_err());
        assert!(cmd_fit(Size::new(800.0, 600.0), Size::new(400.0, 300.0), "diagonal").is_err());
        assert!(cmd_fit(Size::new(800.0, 600.0), Size::new(400.0, 0.0), "height").is_err());
        assert!(cmd_fit(Size::new(800.0, 600.0), Size::new(400.0, 0.0), "all").is_ok());
    }
}
