use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use twenty48::config::CliConfig;
use twenty48::{Config, GameInterface, VERSION};

#[derive(Parser)]
#[command(name = "twenty48")]
#[command(about = "Play 2048 in the terminal")]
#[command(version = VERSION)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible tile sequence
    #[arg(short, long)]
    seed: Option<u64>,

    /// Colour theme: default or plain
    #[arg(short, long)]
    theme: Option<String>,

    /// Write the effective configuration as TOML to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(config_path) => Config::load(config_path)?,
        None => Config::default(),
    };
    config.merge_with_cli(CliConfig {
        seed: cli.seed,
        log_level: None,
        debug: cli.debug,
        theme: cli.theme,
    });
    config.validate()?;

    // Logs go to stderr so they never interleave with the board.
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter())
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &cli.write_config {
        config.save_to_file(path)?;
        info!(path = %path.display(), "Wrote configuration");
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    info!("Starting twenty48 v{}", VERSION);

    let mut game_interface = GameInterface::new(config)?;

    if let Err(e) = game_interface.run() {
        error!("Game error: {}", e);
        eprintln!("An error occurred: {}", e);
        std::process::exit(1);
    }

    info!("Game session ended");
    Ok(())
}
