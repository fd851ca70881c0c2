//! Rockfall - asteroid-shooting arcade simulation core
//!
//! Core modules:
//! - `sim`: Simulation (kinematics, collisions, lifecycle, spawning)
//! - `settings`: Data-driven game balance
//! - `error`: Precondition violations
//!
//! Rendering, input capture and frame pacing live outside this crate. A driver
//! calls [`sim::tick`] and [`sim::try_spawn_opportunity`] on its own timers and
//! reads the entity sets back out of [`sim::GameState`] to draw them.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (source units)
    pub const PLAYFIELD_WIDTH: f32 = 1280.0;
    pub const PLAYFIELD_HEIGHT: f32 = 720.0;

    /// Boundary wall thickness and how far it hangs off-screen
    pub const WALL_THICKNESS: f32 = 30.0;
    pub const WALL_OVERHANG: f32 = 20.0;

    /// Main simulation tick period (ms)
    pub const TICK_MS: u32 = 10;

    /// Ship defaults
    pub const SHIP_WIDTH: f32 = 20.0;
    pub const SHIP_HEIGHT: f32 = 30.0;
    pub const SHIP_ACCEL: f32 = 0.05;
    pub const SHIP_DRAG: f32 = 0.995;
    pub const SHIP_TURN_RATE: f32 = 0.1;
    /// Ticks between shots
    pub const SHIP_ATTACK_RATE: u32 = 20;
    /// First ship spawns here, each further player 100 units lower
    pub const SHIP_START_X: f32 = 620.0;
    pub const SHIP_START_Y: f32 = 260.0;
    pub const SHIP_START_SPACING: f32 = 100.0;
    /// Number of distinct key bindings
    pub const MAX_PLAYERS: usize = 2;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 8.0;
    pub const BULLET_DAMAGE: i32 = 3;
    pub const BULLET_DURABILITY: u8 = 3;
    /// Hitbox half-extent (hitbox is a 2r square)
    pub const BULLET_RADIUS: f32 = 3.0;

    /// Asteroid defaults
    pub const ASTEROID_DRAG: f32 = 0.99;
    pub const ASTEROID_JITTER: f32 = 0.1;
    /// Impulse gain for asteroid-on-asteroid pushes
    pub const ASTEROID_PUSH: f32 = 0.01;
    /// Bullet momentum divisor per asteroid size step
    pub const BULLET_NUDGE_DIVISOR: f32 = 25.0;
    pub const SCORE_PER_SIZE_STEP: u64 = 100;

    /// World weight ceiling: base + scale * (difficulty - 1)
    pub const WEIGHT_BASE: u32 = 30;
    pub const WEIGHT_SCALE: u32 = 18;

    /// Spawn throttle: delay = base + gain * (weight / ceiling)
    pub const SPAWN_BASE_DELAY_MS: u32 = 500;
    pub const SPAWN_DELAY_GAIN_MS: u32 = 500;
    /// Spawn band measured inward from each playfield edge
    pub const SPAWN_BAND_NEAR: f32 = 150.0;
    pub const SPAWN_BAND_FAR: f32 = 300.0;
}

/// Wrap a coordinate into `[0, extent)`
#[inline]
pub fn wrap(value: f32, extent: f32) -> f32 {
    value.rem_euclid(extent)
}

/// Wrap a coordinate into `[-margin, extent)` so an object of size `margin`
/// is fully off-screen before it reappears on the other side
#[inline]
pub fn wrap_with_margin(value: f32, extent: f32, margin: f32) -> f32 {
    (value + margin).rem_euclid(extent + margin) - margin
}

/// Unit vector for a heading where 0 points up the screen (negative y)
#[inline]
pub fn heading_to_dir(heading: f32) -> Vec2 {
    let theta = heading - std::f32::consts::FRAC_PI_2;
    Vec2::new(theta.cos(), theta.sin())
}

/// Rotate `point` around `pivot` by `angle` radians
#[inline]
pub fn rotate_about(point: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    pivot + Vec2::from_angle(angle).rotate(point - pivot)
}
