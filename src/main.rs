//! Tile Swap Puzzle
//!
//! Picks a random picture from a directory, cuts it into a grid, shuffles the
//! tiles, and opens a window where the picture is restored by clicking pairs
//! of tiles to swap them.

mod visualization;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::{error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tileswap::assets::{DirectoryPicker, PicturePicker};
use tileswap::config::{self, Config};
use tileswap::session::Session;

/// Restore a shuffled picture by swapping tiles.
#[derive(Parser)]
#[command(name = "tileswap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Directory holding the frame image and puzzle pictures.
    #[arg(long, default_value = config::DEFAULT_PICTURES_DIR)]
    pictures: PathBuf,
    /// Frame image file name inside the pictures directory.
    #[arg(long, default_value = config::DEFAULT_FRAME_FILE)]
    frame: String,
    #[arg(long, default_value_t = config::DEFAULT_SCREEN_WIDTH)]
    width: u32,
    #[arg(long, default_value_t = config::DEFAULT_SCREEN_HEIGHT)]
    height: u32,
    #[arg(long, default_value_t = config::DEFAULT_ROWS)]
    rows: u32,
    #[arg(long, default_value_t = config::DEFAULT_COLS)]
    cols: u32,
    /// Gap between tiles, in pixels.
    #[arg(long, default_value_t = config::DEFAULT_MARGIN)]
    margin: u32,
    /// Pictures larger than this square are scaled down to fit.
    #[arg(long, default_value_t = config::DEFAULT_MAX_PUZZLE_SIZE)]
    max_puzzle_size: u32,
    /// Seed for picture choice and shuffling.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the puzzle window (the default).
    Play,
    /// List the puzzle pictures that would be chosen from.
    List,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            screen_width: self.width,
            screen_height: self.height,
            rows: self.rows,
            cols: self.cols,
            margin: self.margin,
            max_puzzle_size: self.max_puzzle_size,
            pictures_dir: self.pictures.clone(),
            frame_file: self.frame.clone(),
            seed: self.seed,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.config();
    let picker = DirectoryPicker::new(&config.pictures_dir, &config.frame_file);

    let result = match cli.command {
        Some(Command::List) => run_list(&picker),
        Some(Command::Play) | None => run_play(&config, &picker),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Starts a session and runs the window until it is closed.
fn run_play(config: &Config, picker: &DirectoryPicker) -> Result<(), tileswap::error::Error> {
    let mut rng = match config.seed {
        Some(seed) => {
            info!("Seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let session = Session::start(config, picker, &mut rng)?;
    visualization::play(session);
    Ok(())
}

/// Prints every puzzle candidate in the pictures directory.
fn run_list(picker: &DirectoryPicker) -> Result<(), tileswap::error::Error> {
    let candidates = picker.candidates()?;
    if candidates.is_empty() {
        return Err(tileswap::error::AssetError::NoCandidates(picker.location()).into());
    }
    for path in &candidates {
        println!("{}", path.display());
    }
    println!("{} pictures in {}", candidates.len(), picker.dir().display());
    Ok(())
}
