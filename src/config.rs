/// Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dino_runner::entities::Variant;

const DEFAULT_FPS: u32 = 60;
const STORE_FILE_NAME: &str = ".dino_runner.json";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Jump over palm trees
    Classic,
    /// Also collect power-ups and shoot obstacles (Z)
    Shooter,
}

impl From<VariantArg> for Variant {
    fn from(arg: VariantArg) -> Self {
        match arg {
            VariantArg::Classic => Variant::Classic,
            VariantArg::Shooter => Variant::Shooter,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "dino_runner")]
#[command(about = "Side-scrolling dinosaur runner for the terminal")]
pub struct Args {
    /// Which rule set to play
    #[arg(long, value_enum, default_value_t = VariantArg::Shooter)]
    pub variant: VariantArg,

    /// JSON file holding the high score (default: ~/.dino_runner.json)
    #[arg(long, env = "DINO_STORE")]
    pub store: Option<PathBuf>,

    /// Seed for clouds, obstacle heights and power-up drops
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target frames per second
    #[arg(
        long,
        env = "DINO_FPS",
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u32).range(1..=240)
    )]
    pub fps: u32,

    /// Write logs here (filtered by RUST_LOG); logging is off without it
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn variant(&self) -> Variant {
        self.variant.into()
    }

    pub fn store_path(&self) -> PathBuf {
        self.store.clone().unwrap_or_else(default_store_path)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }
}

fn default_store_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(STORE_FILE_NAME)
}
