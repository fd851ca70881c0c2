//! Game state and the entities it owns
//!
//! `GameState` is the only place entities are added to or removed from the
//! live collections. Everything else mutates entity fields in place.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::Asteroid;
use super::geometry::{Rect, Shape};
use super::ship::{Bullet, Ship};
use super::spawn::spawn_delay_ms;
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// A static, axis-aligned barrier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
}

impl Wall {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
        }
    }

    pub fn shape(&self) -> Shape {
        Shape::Rect(self.rect)
    }

    /// Wider than tall: bounces flip vertical velocity
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.rect.width() > self.rect.height()
    }
}

/// The four walls framing the playfield, each hanging partly off-screen
pub fn boundary_walls() -> Vec<Wall> {
    let (w, h) = (PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
    let inset = WALL_THICKNESS - WALL_OVERHANG;
    vec![
        Wall::new(-WALL_OVERHANG, 0.0, WALL_THICKNESS, h),
        Wall::new(w - inset, 0.0, WALL_THICKNESS, h),
        Wall::new(0.0, -WALL_OVERHANG, w, WALL_THICKNESS),
        Wall::new(0.0, h - inset, w, WALL_THICKNESS),
    ]
}

/// Complete world state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub(crate) settings: Settings,
    pub(crate) difficulty: u32,
    pub(crate) score: u64,
    /// World weight ceiling for this difficulty
    pub(crate) max_weight: u32,
    /// Current gap between spawn opportunities
    pub(crate) spawn_delay_ms: u32,
    /// Simulation tick counter
    pub(crate) time_ticks: u64,
    pub(crate) ships: Vec<Ship>,
    pub(crate) asteroids: Vec<Asteroid>,
    pub(crate) bullets: Vec<Bullet>,
    pub(crate) walls: Vec<Wall>,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// New game with default settings and an entropy-seeded RNG
    pub fn new(difficulty: u32, player_count: usize) -> Result<Self, SimError> {
        Self::with_settings(Settings::default(), difficulty, player_count)
    }

    /// New game with custom tuning
    pub fn with_settings(
        settings: Settings,
        difficulty: u32,
        player_count: usize,
    ) -> Result<Self, SimError> {
        Self::with_seed(settings, rand::random(), difficulty, player_count)
    }

    /// New game with a fixed RNG seed
    pub fn with_seed(
        settings: Settings,
        seed: u64,
        difficulty: u32,
        player_count: usize,
    ) -> Result<Self, SimError> {
        settings.validate()?;
        let mut state = Self {
            settings,
            difficulty: 1,
            score: 0,
            max_weight: 0,
            spawn_delay_ms: 0,
            time_ticks: 0,
            ships: Vec::new(),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            walls: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.initialize(difficulty, player_count)?;
        Ok(state)
    }

    /// Reset score, budget and every collection, then place ships and walls
    pub fn initialize(&mut self, difficulty: u32, player_count: usize) -> Result<(), SimError> {
        if difficulty < 1 {
            return Err(SimError::InvalidDifficulty(difficulty));
        }
        if player_count < 1 || player_count > MAX_PLAYERS {
            return Err(SimError::InvalidPlayerCount {
                got: player_count,
                max: MAX_PLAYERS,
            });
        }

        let ships = (0..player_count)
            .map(|player| {
                let pos = Vec2::new(
                    SHIP_START_X,
                    SHIP_START_Y + player as f32 * SHIP_START_SPACING,
                );
                Ship::new(player, pos, &self.settings)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let max_weight = self.settings.max_weight(difficulty)?;

        self.difficulty = difficulty;
        self.score = 0;
        self.time_ticks = 0;
        self.max_weight = max_weight;
        self.ships = ships;
        self.asteroids.clear();
        self.bullets.clear();
        self.walls = boundary_walls();
        self.spawn_delay_ms = spawn_delay_ms(0, self.max_weight, &self.settings);

        log::info!(
            "Initialized: difficulty {}, {} player(s), weight ceiling {}",
            difficulty,
            player_count,
            self.max_weight
        );
        Ok(())
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// True once no ship is left alive
    pub fn has_game_ended(&self) -> bool {
        self.active_players() == 0
    }

    /// Ships still alive
    pub fn active_players(&self) -> usize {
        self.ships.iter().filter(|s| s.exists).count()
    }

    /// Σ 3^size over living asteroids, recomputed from the live set
    pub fn world_weight(&self) -> u32 {
        self.asteroids
            .iter()
            .filter(|a| a.exists)
            .map(Asteroid::weight)
            .sum()
    }

    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// How long the driver should wait before the next spawn opportunity
    pub fn spawn_delay_ms(&self) -> u32 {
        self.spawn_delay_ms
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_places_ships_and_walls() {
        let state = GameState::with_seed(Settings::default(), 1, 1, 2).expect("valid setup");
        assert_eq!(state.ships().len(), 2);
        assert_eq!(state.ships()[0].pos, Vec2::new(620.0, 260.0));
        assert_eq!(state.ships()[1].pos, Vec2::new(620.0, 360.0));
        assert_eq!(state.ships()[1].variant(), 1);
        assert_eq!(state.walls().len(), 4);
        assert!(state.asteroids().is_empty());
        assert!(state.bullets().is_empty());
        assert_eq!(state.score(), 0);
        assert_eq!(state.max_weight(), 30);
        assert_eq!(state.world_weight(), 0);
        assert_eq!(state.spawn_delay_ms(), SPAWN_BASE_DELAY_MS);
        assert!(!state.has_game_ended());
    }

    #[test]
    fn test_boundary_wall_geometry() {
        let walls = boundary_walls();
        assert_eq!(walls[0].rect, Rect::new(-20.0, 0.0, 30.0, 720.0));
        assert_eq!(walls[1].rect, Rect::new(1270.0, 0.0, 30.0, 720.0));
        assert_eq!(walls[2].rect, Rect::new(0.0, -20.0, 1280.0, 30.0));
        assert_eq!(walls[3].rect, Rect::new(0.0, 710.0, 1280.0, 30.0));
        assert!(!walls[0].is_horizontal());
        assert!(walls[2].is_horizontal());
    }

    #[test]
    fn test_weight_ceiling_from_difficulty() {
        let state = GameState::with_seed(Settings::default(), 1, 3, 1).expect("valid setup");
        assert_eq!(state.max_weight(), 30 + 18 * 2);
    }

    #[test]
    fn test_invalid_parameters_fail_fast() {
        assert_eq!(
            GameState::new(0, 1).err(),
            Some(SimError::InvalidDifficulty(0))
        );
        assert_eq!(
            GameState::new(1, 0).err(),
            Some(SimError::InvalidPlayerCount { got: 0, max: 2 })
        );
        assert_eq!(
            GameState::new(1, 3).err(),
            Some(SimError::InvalidPlayerCount { got: 3, max: 2 })
        );
    }

    #[test]
    fn test_huge_difficulty_fails_instead_of_overflowing() {
        assert_eq!(
            GameState::new(300_000_000, 1).err(),
            Some(SimError::InvalidDifficulty(300_000_000))
        );

        let mut state = GameState::with_seed(Settings::default(), 5, 2, 1).expect("valid setup");
        assert!(state.initialize(u32::MAX, 1).is_err());
        assert_eq!(state.difficulty(), 2);
        assert_eq!(state.max_weight(), 48);
    }

    #[test]
    fn test_reinitialize_resets_world() {
        let mut state = GameState::with_seed(Settings::default(), 5, 1, 2).expect("valid setup");
        state.score = 900;
        state.ships[0].exists = false;
        state.initialize(2, 1).expect("valid setup");
        assert_eq!(state.score(), 0);
        assert_eq!(state.ships().len(), 1);
        assert_eq!(state.max_weight(), 48);
        assert!(!state.has_game_ended());
    }

    #[test]
    fn test_failed_initialize_leaves_state_untouched() {
        let mut state = GameState::with_seed(Settings::default(), 5, 1, 2).expect("valid setup");
        state.score = 400;
        assert!(state.initialize(1, 7).is_err());
        assert_eq!(state.score(), 400);
        assert_eq!(state.ships().len(), 2);
    }
}
