//! Fixed timestep simulation tick
//!
//! One call advances the world by one step: input, kinematics, collisions,
//! then the reap pass that turns destroyed entities into score and fragments.

use super::detect::detect_and_resolve;
use super::spawn::spawn_delay_ms;
use super::state::GameState;
use super::ship::TickInput;

/// What one reap pass removed and added
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReapSummary {
    pub asteroids_destroyed: usize,
    /// Children inserted in place of destroyed asteroids
    pub fragments: usize,
    pub score_awarded: u64,
    pub ships_lost: usize,
    pub bullets_expired: usize,
}

impl ReapSummary {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Nothing moves once every ship is gone
    if state.ships.is_empty() {
        return;
    }
    state.time_ticks += 1;

    // Ships read their keys, fire, then move
    for ship in state.ships.iter_mut().filter(|s| s.exists) {
        ship.accelerate(input);
        if let Some(bullet) = ship.shoot(input) {
            state.bullets.push(bullet);
        }
        ship.advance();
    }

    for bullet in state.bullets.iter_mut().filter(|b| b.exists) {
        bullet.advance();
    }

    for asteroid in state.asteroids.iter_mut().filter(|a| a.exists) {
        asteroid.advance(&mut state.rng);
    }

    let contacts = detect_and_resolve(
        &mut state.asteroids,
        &mut state.ships,
        &mut state.bullets,
        &state.walls,
    );
    if contacts.total() > 0 {
        log::trace!("Tick {}: {:?}", state.time_ticks, contacts);
    }

    let summary = reap(state);

    // Re-budget the spawn cadence against the new weight
    state.spawn_delay_ms = spawn_delay_ms(state.world_weight(), state.max_weight, &state.settings);

    if summary.ships_lost > 0 && state.ships.is_empty() {
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }
}

/// Remove destroyed entities, awarding score and inserting fragments
pub fn reap(state: &mut GameState) -> ReapSummary {
    let mut summary = ReapSummary::default();
    let mut fragments = Vec::new();

    for asteroid in state.asteroids.iter().filter(|a| !a.exists) {
        summary.asteroids_destroyed += 1;
        summary.score_awarded += asteroid.size.score();
        fragments.extend(asteroid.shatter(&mut state.rng));
    }
    state.asteroids.retain(|a| a.exists);
    summary.fragments = fragments.len();
    state.asteroids.extend(fragments);
    state.score += summary.score_awarded;

    let ships_before = state.ships.len();
    state.ships.retain(|s| s.exists);
    summary.ships_lost = ships_before - state.ships.len();

    let bullets_before = state.bullets.len();
    state.bullets.retain(|b| b.exists);
    summary.bullets_expired = bullets_before - state.bullets.len();

    if summary.asteroids_destroyed > 0 || summary.ships_lost > 0 {
        log::debug!(
            "Reaped {} asteroid(s) into {} fragment(s), +{} score, {} ship(s) lost",
            summary.asteroids_destroyed,
            summary.fragments,
            summary.score_awarded,
            summary.ships_lost
        );
    }

    summary
}
