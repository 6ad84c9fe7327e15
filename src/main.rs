use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tick_snake::game::GameConfig;
use tick_snake::logging::init_file_logging;
use tick_snake::modes::HumanMode;
use tracing::info;

#[derive(Parser)]
#[command(name = "tick_snake")]
#[command(version, about = "Fixed-tick Snake in the terminal")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in units (10 units per cell)
    #[arg(long)]
    width: Option<i32>,

    /// Field height in units (10 units per cell)
    #[arg(long)]
    height: Option<i32>,

    /// Milliseconds between ticks
    #[arg(long)]
    speed: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Quit as soon as the game ends
    #[arg(long)]
    exit_on_game_over: bool,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.field_width = width;
        }
        if let Some(height) = self.height {
            config.field_height = height;
        }
        if let Some(speed) = self.speed {
            config.tick_ms = speed;
        }
        config.exit_on_game_over |= self.exit_on_game_over;

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logging(path)?;
    }

    let config = cli.game_config()?;
    info!(?config, seed = ?cli.seed, "configuration loaded");

    let mut human_mode = HumanMode::new(config, cli.seed);
    human_mode.run().await?;

    Ok(())
}
