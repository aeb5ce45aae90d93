//! Skyhop: a 2D coin-collecting platformer
//!
//! Run, jump and wall-jump through short timed levels:
//! - Collect enough items to open the exit
//! - Beat the clock and dodge the slimes
//! - Earn up to three stars per level and unlock the next one

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod world;
mod game;
mod storage;
mod progress;
mod input;
mod ui;
mod app;

use macroquad::prelude::*;
use app::{App, Assets};
use config::{WORLD_HEIGHT, WORLD_WIDTH};
use progress::ProgressStore;

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use clap::Parser;
    use std::path::PathBuf;
    use crate::config::MAX_LEVELS;

    #[derive(Parser, Debug)]
    #[command(author, version, about)]
    pub struct Args {
        /// Jump straight into a level, skipping the menus
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=(MAX_LEVELS as i64)))]
        pub level: Option<u32>,
        /// Directory for saved progress (default: the platform data directory)
        #[arg(long)]
        pub data_dir: Option<PathBuf>,
        /// Seed for particle and animation randomness
        #[arg(long)]
        pub seed: Option<u64>,
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Skyhop v{}", VERSION),
        window_width: WORLD_WIDTH as i32,
        window_height: WORLD_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Seed from the wall clock when none is given
fn clock_seed() -> u64 {
    (macroquad::miniquad::date::now() * 1000.0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn init_native() -> (Box<dyn ProgressStore>, Option<u32>, u64) {
    use clap::Parser;
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};
    use progress::StorageProgressStore;
    use storage::LocalStorage;

    let args = cli::Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skyhop=info"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    tracing::info!("Starting Skyhop v{} (native)", VERSION);

    let data_dir = args
        .data_dir
        .or_else(|| dirs::data_dir().map(|dir| dir.join("skyhop")))
        .unwrap_or_else(|| std::path::PathBuf::from("."));
    let storage = LocalStorage::with_base_dir(data_dir);
    tracing::info!(path = %storage.base_dir().display(), "progress directory");

    let seed = args.seed.unwrap_or_else(clock_seed);
    (Box::new(StorageProgressStore::new(storage)), args.level, seed)
}

#[cfg(target_arch = "wasm32")]
fn init_web() -> (Box<dyn ProgressStore>, Option<u32>, u64) {
    tracing::warn!("No persistent storage on the web build, progress lasts for this page only");
    (Box::new(progress::MemoryProgressStore::in_memory()), None, clock_seed())
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    #[cfg(not(target_arch = "wasm32"))]
    let (store, start_level, seed) = init_native();
    #[cfg(target_arch = "wasm32")]
    let (store, start_level, seed) = init_web();

    let assets = Assets::load().await;
    let mut app = App::new(store, assets, seed, start_level);

    loop {
        app.frame().await;
        next_frame().await;
    }
}
