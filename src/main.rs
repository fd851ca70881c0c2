//! Rockfall entry point
//!
//! Headless native driver: runs the simulation on its fixed timestep with an
//! autopilot at the controls and reports the outcome through the logger.
//!
//! Usage: `rockfall [settings.json] [difficulty] [players]`

mod headless {
    use std::f32::consts::PI;
    use std::fmt::Display;
    use std::str::FromStr;

    use rockfall::consts::*;
    use rockfall::heading_to_dir;
    use rockfall::sim::{GameState, SpawnTimer, TickInput, tick, try_spawn_opportunity};
    use rockfall::Settings;

    /// One minute of play at the fixed timestep
    const MAX_TICKS: u64 = 6_000;

    /// Aim every living ship at its nearest asteroid and keep firing
    fn autopilot(state: &GameState) -> TickInput {
        let mut input = TickInput::default();

        for ship in state.ships().iter().filter(|s| s.exists) {
            let controls = ship.controls();
            input.set(controls.shoot, true);

            let center = ship.center();
            let nearest = state
                .asteroids()
                .iter()
                .filter(|a| a.exists)
                .map(|a| a.center() - center)
                .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));

            let Some(to_target) = nearest else {
                // Nothing to shoot at: keep some way on
                input.set(controls.forward, ship.vel.length() < 0.5);
                continue;
            };

            let facing = heading_to_dir(ship.heading);
            let diff = facing.angle_to(to_target);
            if diff > ship.turn_rate / 2.0 {
                input.set(controls.right, true);
            } else if diff < -ship.turn_rate / 2.0 {
                input.set(controls.left, true);
            }

            // Back off when a rock gets close, but never while facing it
            if to_target.length() < 200.0 && diff.abs() > PI / 2.0 {
                input.set(controls.forward, true);
            }
        }

        input
    }

    /// Parse a positional argument, falling back to `default` only when it is absent
    pub(crate) fn parse_arg<T>(name: &str, value: Option<String>, default: T) -> Result<T, String>
    where
        T: FromStr,
        T::Err: Display,
    {
        match value {
            None => Ok(default),
            Some(raw) => raw
                .parse()
                .map_err(|e| format!("invalid {} `{}`: {}", name, raw, e)),
        }
    }

    pub fn run() -> Result<(), Box<dyn std::error::Error>> {
        let mut args = std::env::args().skip(1);

        let settings = match args.next() {
            Some(path) if path != "-" => {
                let json = std::fs::read_to_string(&path)?;
                log::info!("Reading settings from {}", path);
                Settings::from_json(&json)?
            }
            _ => Settings::default(),
        };
        let difficulty: u32 = parse_arg("difficulty", args.next(), 1)?;
        let players: usize = parse_arg("player count", args.next(), 1)?;

        let seed: u64 = rand::random();
        let mut state = GameState::with_seed(settings, seed, difficulty, players)?;
        log::info!("Game initialized with seed: {}", seed);

        let mut spawn_timer = SpawnTimer::new();
        let mut spawned = 0u32;

        for _ in 0..MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input);
            if state.has_game_ended() {
                break;
            }

            if spawn_timer.advance(TICK_MS, state.spawn_delay_ms()) && try_spawn_opportunity(&mut state) {
                spawned += 1;
            }

            if state.time_ticks() % 1_000 == 0 {
                log::debug!(
                    "t={} score={} weight={}/{} asteroids={} bullets={}",
                    state.time_ticks(),
                    state.score(),
                    state.world_weight(),
                    state.max_weight(),
                    state.asteroids().len(),
                    state.bullets().len()
                );
            }
        }

        let seconds = state.time_ticks() as f32 * TICK_MS as f32 / 1000.0;
        log::info!(
            "Finished after {:.1}s: score {}, {} spawned, {} ship(s) left{}",
            seconds,
            state.score(),
            spawned,
            state.active_players(),
            if state.has_game_ended() { " (game over)" } else { "" }
        );

        log::debug!("Final state: {}", serde_json::to_string(&state)?);
        Ok(())
    }
}

fn main() {
    env_logger::init();
    log::info!("Rockfall (headless) starting...");

    if let Err(e) = headless::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
