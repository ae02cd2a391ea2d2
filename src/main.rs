//! Gomoku
//!
//! ## Usage
//!
//! - `gomoku` - Open the graphical board
//! - `gomoku text` - Play over stdin/stdout
//! - `gomoku stats` - Print the recorded game statistics
//! - `gomoku init-config` - Write a default `gomoku.toml`

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gomoku::config::DEFAULT_CONFIG_FILE;
use gomoku::ui::GomokuApp;
use gomoku::{GameConfig, GameStatistics, TextFrontEnd};

/// Classic Gomoku against the computer or a second player
#[derive(Parser)]
#[command(name = "gomoku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the graphical board (default)
    Gui,
    /// Play with line commands on stdin/stdout
    Text,
    /// Print the statistics summary
    Stats {
        /// Zero the counters afterwards
        #[arg(long)]
        reset: bool,
    },
    /// Write the default settings to the config path
    InitConfig {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
        /// Print the settings instead of writing them
        #[arg(long)]
        print: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(Commands::InitConfig { force, print }) = cli.command {
        if print {
            print!("{}", GameConfig::default_toml()?);
            return Ok(());
        }
        return init_config(&cli.config, force);
    }

    let config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Some(Commands::Text) => {
            let mut front_end = TextFrontEnd::stdio(&config)?;
            front_end.run()?;
        }
        Some(Commands::Stats { reset }) => {
            let path = config.storage.stats_file.as_path();
            let mut stats = GameStatistics::load_or_default(path);
            print!("{}", stats.summary());
            if reset {
                stats.reset();
                stats.save(path)?;
                println!("Statistics reset");
            }
        }
        Some(Commands::Gui) | None => run_gui(config)?,
        Some(Commands::InitConfig { .. }) => {}
    }

    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    GameConfig::default().save(path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn run_gui(config: GameConfig) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(move |cc| Ok(Box::new(GomokuApp::new(cc, config)?))),
    )
    .map_err(|e| anyhow!("GUI failed: {e}"))
}
