//! Asteroid spawning and the weight budget
//!
//! New rocks enter from a band just inside one of the four edges. The world
//! weight gates whether a spawn is attempted at all, and also stretches the
//! delay between opportunities as the budget fills.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidSize};
use super::geometry::{Shape, intersects};
use super::state::GameState;
use crate::consts::*;
use crate::settings::Settings;

/// Playfield edge a candidate enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Top,
    Right,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Top, Edge::Right, Edge::Bottom];

    /// Unit vector pointing from this edge into the playfield
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Left => Vec2::X,
            Edge::Top => Vec2::Y,
            Edge::Right => Vec2::NEG_X,
            Edge::Bottom => Vec2::NEG_Y,
        }
    }
}

/// Delay until the next spawn opportunity for the given weight.
///
/// Grows linearly from `spawn_base_delay_ms` at an empty world to
/// `spawn_base_delay_ms + spawn_delay_gain_ms` at the ceiling, clamped there.
pub fn spawn_delay_ms(weight: u32, max_weight: u32, settings: &Settings) -> u32 {
    let fill = if max_weight == 0 {
        1.0
    } else {
        (weight as f32 / max_weight as f32).min(1.0)
    };
    settings
        .spawn_base_delay_ms
        .saturating_add((settings.spawn_delay_gain_ms as f32 * fill).round() as u32)
}

/// Sample a fresh asteroid entering from a random edge
pub fn spawn_candidate<R: Rng + ?Sized>(rng: &mut R, size: AsteroidSize) -> Asteroid {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    candidate_from_edge(rng, edge, size)
}

/// Sample an asteroid in the band inside `edge`, heading away from it
pub fn candidate_from_edge<R: Rng + ?Sized>(rng: &mut R, edge: Edge, size: AsteroidSize) -> Asteroid {
    let depth = rng.random_range(SPAWN_BAND_NEAR..SPAWN_BAND_FAR);
    let inward_speed = rng.random_range(0.5..2.5);
    let lateral_speed = rng.random_range(-1.5..1.5);

    let (pos, vel) = match edge {
        Edge::Left | Edge::Right => {
            let y = rng.random_range(SPAWN_BAND_NEAR..PLAYFIELD_HEIGHT - SPAWN_BAND_NEAR);
            let x = if edge == Edge::Left {
                depth
            } else {
                PLAYFIELD_WIDTH - depth
            };
            (Vec2::new(x, y), Vec2::new(0.0, lateral_speed))
        }
        Edge::Top | Edge::Bottom => {
            let x = rng.random_range(SPAWN_BAND_NEAR..PLAYFIELD_WIDTH - SPAWN_BAND_NEAR);
            let y = if edge == Edge::Top {
                depth
            } else {
                PLAYFIELD_HEIGHT - depth
            };
            (Vec2::new(x, y), Vec2::new(lateral_speed, 0.0))
        }
    };
    let vel = vel + edge.inward() * inward_speed;
    let rotation_vel = rng.random_range(0.0..0.01);

    Asteroid::new(size, pos, vel, rotation_vel, rng)
}

/// Insert `candidate` unless it overlaps a live asteroid, ship or bullet
pub fn commit_if_clear(state: &mut GameState, candidate: Asteroid) -> bool {
    let shape = candidate.shape();
    let blocked = |other: Shape| intersects(&shape, &other);

    let blocker = if state.asteroids.iter().any(|a| a.exists && blocked(a.shape())) {
        Some("asteroid")
    } else if state.ships.iter().any(|s| s.exists && blocked(s.shape())) {
        Some("ship")
    } else if state.bullets.iter().any(|b| b.exists && blocked(b.shape())) {
        Some("bullet")
    } else {
        None
    };

    if let Some(kind) = blocker {
        log::trace!(
            "Spawn rejected at ({:.0}, {:.0}): overlaps {}",
            candidate.pos.x,
            candidate.pos.y,
            kind
        );
        return false;
    }

    log::debug!(
        "Spawned {:?} asteroid at ({:.0}, {:.0})",
        candidate.size,
        candidate.pos.x,
        candidate.pos.y
    );
    state.asteroids.push(candidate);
    true
}

/// One spawn opportunity: attempt a single placement if the budget allows
pub fn try_spawn_opportunity(state: &mut GameState) -> bool {
    if state.world_weight() >= state.max_weight {
        return false;
    }
    let size = state.settings.spawn_size;
    let candidate = spawn_candidate(&mut state.rng, size);
    commit_if_clear(state, candidate)
}

/// Wall-clock accumulator telling the host when a spawn opportunity is due
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnTimer {
    pub elapsed_ms: u32,
}

impl SpawnTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt_ms`; returns true (and restarts) once `delay_ms` has passed
    pub fn advance(&mut self, dt_ms: u32, delay_ms: u32) -> bool {
        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms >= delay_ms {
            self.elapsed_ms = 0;
            true
        } else {
            false
        }
    }
}
