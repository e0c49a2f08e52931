use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use project_dealer::config::{read_config, DealerConfig};
use project_dealer::io::render_allocation;

/// Deals projects to teams of students, honouring the initial distribution.
#[derive(Parser, Debug)]
#[command(name = "project-dealer", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// YAML file with defaults for the options below.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Members per team.
    #[arg(short, long)]
    team_size: Option<usize>,

    /// Directory holding the input lists and receiving the outputs.
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Seed for the random source, to replay a previous run.
    #[arg(long)]
    seed: Option<u64>,

    /// Also print the allocation to stdout.
    #[arg(long)]
    print: bool,
}

impl Cli {
    fn resolve(&self) -> Result<DealerConfig> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => DealerConfig::default(),
        };
        if let Some(team_size) = self.team_size {
            config.team_size = team_size;
        }
        if let Some(dir) = &self.dir {
            config.storage = dir.clone();
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match deal(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn deal(cli: &Cli) -> Result<()> {
    let config = cli.resolve()?;
    let dealt = project_dealer::run(&config)
        .with_context(|| format!("dealing in {} failed", config.storage.display()))?;
    if cli.print {
        print!("{}", render_allocation(&dealt.allocation));
    }
    Ok(())
}
