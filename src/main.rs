#![warn(non_snake_case)]
//! # maze_bsp Entry Point
//!
//! Loads a maze's wall population (the exported `<field>Seg_<number>_<id>`
//! JSON written by [`MazeDocument::to_json`]), builds its BSP tree and prints
//! the resulting walls, now split and flagged, in the same format.
//!
//! ```text
//! maze_bsp <walls.json> [config.json]
//! maze_bsp --demo [config.json]
//! ```
//!
//! Set `RUST_LOG=debug` to follow the build.

use log::{error, info};
use maze_bsp::bsp::BspConfig;
use maze_bsp::document::MazeDocument;
use maze_bsp::map::{WallSegment, MAP_UNIT};
use maze_bsp::MazeError;
use std::env;
use std::process::ExitCode;

/// A 4x4-cell maze with two interior walls, for trying the builder out.
fn demo_document() -> Result<MazeDocument, MazeError> {
    let size = 4 * MAP_UNIT;
    let half = 2 * MAP_UNIT;
    let mut doc = MazeDocument::new(size, size);
    for (x, y, dx, dy, dist) in [
        (0, 0, size, 0, 24),
        (size, 0, 0, size, 16),
        (size, size, -size, 0, 8),
        (0, size, 0, -size, 20),
        (0, half, half, 0, 12),
        (3 * MAP_UNIT, MAP_UNIT, 0, half, 4),
    ] {
        doc.add_wall(WallSegment::new(x, y, dx, dy, dist, 0)?);
    }
    Ok(doc)
}

fn run(args: &[String]) -> Result<(), MazeError> {
    let config = match args.get(1) {
        Some(path) => BspConfig::from_json_file(path)?,
        None => BspConfig::default(),
    };
    let doc = match args.first().map(String::as_str) {
        Some("--demo") | None => demo_document()?,
        Some(path) => MazeDocument::from_json_file(path)?,
    };
    info!(
        "Building BSP for {} walls ({}x{})",
        doc.num_walls(),
        doc.width(),
        doc.height()
    );

    let tree = doc.build_bsp(config)?;
    let stats = tree.stats();
    info!(
        "{} leaves, depth {}, {:.2} walls per leaf",
        stats.leaves,
        tree.depth(),
        stats.average_leaf_size()
    );

    println!("{}", serde_json::to_string_pretty(&doc.to_json())?);
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logging.
    env_logger::init();
    info!("maze_bsp starting...");

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
