//! Cryptgen - Entry Point
//!
//! Generates a dungeon floor from a seed and prints it, optionally
//! saving the seed or rebuilding a floor from a save file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use cryptgen::data::{load_procgen_or_default, DataManager, ProcgenData};
use cryptgen::save::{load_from_path, save_to_path, SaveData};
use cryptgen::world::generation::{MapGenConfig, DEFAULT_MAX_ATTEMPTS};
use cryptgen::{generate_map, level_seed, GameRng, Map};

/// Starting hit points written into new saves
const NEW_GAME_HP: i32 = 30;

#[derive(Parser, Debug)]
#[command(name = "cryptgen", version, about = "Generate a connected dungeon floor from a seed")]
struct Args {
    /// RNG seed (random when omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Map width in tiles
    #[arg(long, default_value_t = 80)]
    width: i32,

    /// Map height in tiles
    #[arg(long, default_value_t = 45)]
    height: i32,

    /// Room placement iterations
    #[arg(long, default_value_t = 30)]
    max_rooms: i32,

    /// Smallest room outline
    #[arg(long, default_value_t = 6)]
    room_min: i32,

    /// Largest room outline
    #[arg(long, default_value_t = 10)]
    room_max: i32,

    /// Full regeneration attempts before giving up [default: 5, or the data file's value]
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Directory holding procgen and content data [default: assets/data]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Procgen data file (.ron or .json); replaces the data directory's procgen
    /// settings and, like --data-dir, overrides the room and size flags
    #[arg(long)]
    procgen: Option<PathBuf>,

    /// Dungeon depth for the depth table and for enemy rolls
    #[arg(long, default_value_t = 1)]
    depth: u32,

    /// Write a save file for the generated floor
    #[arg(long, conflicts_with = "load")]
    save: Option<PathBuf>,

    /// Rebuild the floor stored in a save file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Only print the summary
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Cryptgen v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let map = match &args.load {
        Some(path) => {
            let loaded = load_from_path(path).with_context(|| format!("loading {}", path.display()))?;
            println!(
                "Loaded save: depth {}, player at ({}, {}), {} hp",
                loaded.save.depth,
                loaded.save.player.position.x,
                loaded.save.player.position.y,
                loaded.save.player.hp
            );
            loaded.map
        }
        None => {
            let mut data = match &args.data_dir {
                Some(dir) => DataManager::load_from_dir(dir),
                None => DataManager::new(),
            };
            if let Some(path) = &args.procgen {
                data.procgen = load_procgen_or_default(path);
            }
            new_floor(&args, &data)?
        }
    };

    if !args.quiet {
        print!("{}", map);
    }
    print_summary(&map);

    Ok(())
}

/// Generate a floor from the command line settings, saving it if asked
fn new_floor(args: &Args, data: &DataManager) -> Result<Map> {
    let run_seed = args.seed.unwrap_or_else(|| GameRng::from_entropy().seed());
    let (seed, config) = floor_config(args, &data.procgen, run_seed);

    let map = generate_map(seed, &config).context("map generation failed")?;

    if let Some(path) = &args.save {
        let mut save = SaveData::new_game(&map, args.depth, config, NEW_GAME_HP);
        save.populate_enemies(&map, &data.content);
        save_to_path(&save, path).with_context(|| format!("saving {}", path.display()))?;
        println!("Saved seed {} to {}", map.seed(), path.display());
    }

    Ok(map)
}

/// Seed and generation record for a new floor
///
/// With `--procgen` or `--data-dir` the room parameters come from the
/// depth table, otherwise from the size flags. `--max-attempts` applies
/// to both.
fn floor_config(args: &Args, procgen: &ProcgenData, run_seed: u64) -> (u64, MapGenConfig) {
    let (seed, mut config) = if args.procgen.is_some() || args.data_dir.is_some() {
        (level_seed(run_seed, args.depth), procgen.config_for_depth(args.depth))
    } else {
        let config = MapGenConfig {
            map_width: args.width,
            map_height: args.height,
            max_rooms: args.max_rooms,
            room_min_size: args.room_min,
            room_max_size: args.room_max,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        };
        (run_seed, config)
    };
    if let Some(max_attempts) = args.max_attempts {
        config.max_attempts = max_attempts;
    }
    (seed, config)
}

fn print_summary(map: &Map) {
    println!(
        "seed {} | {}x{} | {} rooms | {} attempt(s)",
        map.seed(),
        map.width(),
        map.height(),
        map.rooms().len(),
        map.attempts()
    );
    if let Some(start) = map.start_pos() {
        println!("start ({}, {}) | {} spawn points", start.x, start.y, map.spawn_points().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(flags: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cryptgen").chain(flags.iter().copied())).unwrap()
    }

    #[test]
    fn test_flags_build_the_config() {
        let (seed, config) = floor_config(&parse(&["--width", "40", "--height", "30"]), &ProcgenData::default(), 9);
        assert_eq!(seed, 9);
        assert_eq!((config.map_width, config.map_height), (40, 30));
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_max_attempts_overrides_procgen() {
        let procgen = ProcgenData::default();
        let args = parse(&["--procgen", "procgen.ron", "--depth", "4", "--max-attempts", "2"]);
        let (seed, config) = floor_config(&args, &procgen, 9);

        assert_eq!(seed, level_seed(9, 4));
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.max_rooms, procgen.config_for_depth(4).max_rooms);

        let (_, config) = floor_config(&parse(&["--data-dir", "data"]), &procgen, 9);
        assert_eq!(config.max_attempts, procgen.map.max_attempts);

        let (_, config) = floor_config(&parse(&["--max-attempts", "7"]), &procgen, 9);
        assert_eq!(config.max_attempts, 7);
    }
}
