//! Last Light entry point
//!
//! Headless autopilot run: loads settings and high scores, plays one run
//! with a simple keeper bot and prints the summary.

use std::path::Path;

use last_light::consts::REFERENCE_FRAME_MS;
use last_light::persistence::JsonFileStore;
use last_light::sim::events::GameEvent;
use last_light::sim::state::{GameState, RunPhase, ShipStatus};
use last_light::sim::ship_illuminated;
use last_light::{FrameInput, Game, Settings};

const SETTINGS_PATH: &str = "last-light-settings.json";
const SCORES_PATH: &str = "last-light-scores.json";
/// Give up after an hour of play
const MAX_FRAMES: u32 = 60 * 60 * 60;

/// Shop priorities for the bot
const SHOPPING_LIST: [&str; 6] = [
    "fuelEfficiency",
    "fuelTank",
    "autoBeacon",
    "lightRange",
    "shipScanner",
    "emergencyFuel",
];

/// Hold the light only while a ship is in the beam
fn keeper_wants_light(state: &GameState) -> bool {
    state.ships.iter().any(|ship| {
        ship.status == ShipStatus::Sailing
            && ship_illuminated(ship, &state.lighthouse, state.upgrades.range_multiplier)
    })
}

fn go_shopping(game: &mut Game<JsonFileStore>) {
    for item in SHOPPING_LIST {
        while game.purchase(item) {
            // emergencyFuel is only worth it when the tank is low
            if item == "emergencyFuel" && game.state().fuel > game.state().max_fuel * 0.5 {
                break;
            }
        }
    }
    game.exit_shop();
}

fn main() {
    env_logger::init();
    log::info!("Last Light (headless) starting...");

    let mut settings = Settings::load(Path::new(SETTINGS_PATH));
    if let Some(seed) = std::env::args().nth(1).and_then(|s| s.parse().ok()) {
        settings.seed = Some(seed);
    }

    let mut game = Game::new(settings, JsonFileStore::new(SCORES_PATH));
    game.start_run();

    let mut summary = None;
    for _ in 0..MAX_FRAMES {
        if game.state().phase == RunPhase::Shop {
            go_shopping(&mut game);
        }

        let input = FrameInput {
            light_on: keeper_wants_light(game.state()),
            pause_requested: false,
        };
        game.advance(REFERENCE_FRAME_MS, input);

        for event in game.take_events() {
            match event {
                GameEvent::MilestoneReached { message, .. } => println!("* {message}"),
                GameEvent::StormStarted { duration_ms } => {
                    println!("~ storm for {:.0}s", duration_ms / 1000.0)
                }
                GameEvent::GameOver(s) => summary = Some(s),
                _ => {}
            }
        }
        if summary.is_some() {
            break;
        }
    }

    let Some(summary) = summary else {
        println!("The keeper is still going strong at score {}", game.state().score);
        return;
    };

    println!();
    println!("Final score:   {}", summary.score);
    println!("Ships saved:   {}", summary.ships_saved);
    println!("Survived:      {}s", summary.survival_secs);
    println!("Difficulty:    {}", summary.difficulty_level);
    println!("Best combo:    {}", summary.peak_combo);
    for record in &summary.new_records {
        println!("{}", record.label());
    }
    println!();
    println!("{}", summary.epitaph());
}
