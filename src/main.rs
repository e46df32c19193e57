//! # D&D Sweeper Main Entry Point
//!
//! Parses the command line, sets up logging, and either prints a board to the
//! terminal or opens the macroquad window.

use clap::Parser;
use dnd_sweeper::{
    config, Dungeon, GenerationConfig, InputHandler, MacroquadDisplay, SceneManager,
    SweeperResult,
};
use log::{error, info};
use macroquad::window::Conf;
use std::path::PathBuf;

/// Command line arguments for D&D Sweeper.
#[derive(Parser, Debug)]
#[command(name = "dnd_sweeper")]
#[command(about = "Minesweeper played on a procedurally generated dungeon")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// JSON file with generation settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print a generated board to stdout instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting D&D Sweeper v{}", dnd_sweeper::VERSION);

    let generation = match build_config(&args) {
        Ok(generation) => generation,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    if args.headless {
        if let Err(e) = run_headless(&generation) {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
        return;
    }

    info!("Starting in windowed mode");
    macroquad::Window::from_config(window_conf(), async move {
        if let Err(e) = run_game(generation).await {
            error!("Game exited with error: {}", e);
        }
    });
}

/// Initializes `env_logger`, letting `RUST_LOG` override the command line.
fn initialize_logging(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "error" | "warn" | "info" | "debug" | "trace" => log_level.to_lowercase(),
        _ => "info".to_string(),
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_target(false)
        .init();
}

/// Loads the config file, if any, and applies command line overrides.
fn build_config(args: &Args) -> SweeperResult<GenerationConfig> {
    let mut generation = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::default(),
    };

    match args.seed {
        Some(seed) => generation.seed = seed,
        // Without a seed from either source every run gets a fresh board.
        None if args.config.is_none() => generation.seed = rand::random(),
        None => {}
    }
    info!("Using seed {}", generation.seed);
    if let Some(width) = args.width {
        generation.width = width;
    }
    if let Some(height) = args.height {
        generation.height = height;
    }

    generation.validate()?;
    Ok(generation)
}

fn run_headless(generation: &GenerationConfig) -> SweeperResult<()> {
    let dungeon = Dungeon::generate(generation)?;
    let summary = dungeon.summary();

    print!("{}", dungeon.grid().to_ascii());
    println!(
        "seed {} | {}x{} | {} monster rooms, {} treasure rooms ({} targeted) | {} corridors | {} attempts",
        dungeon.seed(),
        dungeon.width(),
        dungeon.height(),
        summary.monster_rooms,
        summary.treasure_rooms,
        summary.target_rooms,
        summary.corridors,
        summary.attempts
    );
    if summary.is_partial() {
        println!("note: placement budget ran out before the target room count");
    }
    Ok(())
}

fn window_conf() -> Conf {
    Conf {
        window_title: config::WINDOW_TITLE.to_string(),
        window_width: config::WINDOW_WIDTH,
        window_height: config::WINDOW_HEIGHT,
        ..Default::default()
    }
}

/// Runs the scene loop inside the macroquad window.
async fn run_game(generation: GenerationConfig) -> SweeperResult<()> {
    let display = MacroquadDisplay::new(
        config::WINDOW_WIDTH as f32,
        config::WINDOW_HEIGHT as f32,
    );
    let mut scenes = SceneManager::new(generation, display, InputHandler::new());
    scenes.run().await
}
