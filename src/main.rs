//! Brick Builder native entry point
//!
//! Headless: checks save files given on the command line, or builds a small
//! demo stack when run without arguments. The interactive editor is driven
//! by the rendering layer through `brick_builder::sim::Controller`.

use std::path::Path;
use std::process::ExitCode;

use brick_builder::Settings;
use brick_builder::persistence;
use brick_builder::sim::{BrickKind, BuildState};

/// Settings file looked up in the working directory
const SETTINGS_FILE: &str = "brick-builder.json";

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brick Builder (native) starting...");

    let settings = Settings::load(Path::new(SETTINGS_FILE));
    let paths: Vec<String> = std::env::args().skip(1).collect();

    if paths.is_empty() {
        run_demo(&settings);
        return ExitCode::SUCCESS;
    }

    let mut failed = 0;
    for path in &paths {
        if !check_save(Path::new(path), &settings) {
            failed += 1;
        }
    }

    if failed > 0 {
        log::error!("{} of {} save files rejected", failed, paths.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Load one save file into a fresh build and report on it
fn check_save(path: &Path, settings: &Settings) -> bool {
    let bricks = match persistence::load_from_path(path) {
        Ok(bricks) => bricks,
        Err(e) => {
            log::error!("{}: {}", path.display(), e);
            return false;
        }
    };

    let mut state = BuildState::with_settings(0, settings);
    state.load_game(bricks);

    let top = state
        .bricks()
        .iter()
        .map(|b| b.top())
        .fold(0.0_f32, f32::max);
    let overlaps = state.overlapping_pairs();
    log::info!(
        "{}: {} bricks, top surface at y={:.2}, {} overlapping pairs",
        path.display(),
        state.len(),
        top,
        overlaps.len()
    );
    for (a, b) in &overlaps {
        log::warn!("{}: bricks {} and {} overlap", path.display(), a, b);
    }
    true
}

fn run_demo(settings: &Settings) {
    let mut state = BuildState::with_settings(0, settings);
    for kind in [BrickKind::TwoByFour, BrickKind::TwoByTwo, BrickKind::OneByOne] {
        let id = state.add_brick(kind);
        if let Some(brick) = state.brick(&id) {
            log::info!("{} brick rests at {}", kind, brick.position);
        }
    }

    match persistence::to_json(state.bricks()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not encode demo build: {}", e),
    }
}
