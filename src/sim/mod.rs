//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay headless:
//! - Fixed timestep only
//! - All randomness comes from the state's seeded RNG
//! - Stable iteration order (insertion order of each collection)
//! - No rendering, audio or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod detect;
pub mod geometry;
pub mod ship;
pub mod spawn;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize};
pub use collision::{Contact, resolve};
pub use detect::{ContactStats, detect_and_resolve};
pub use geometry::{Polygon, Rect, Shape, intersects};
pub use ship::{Bullet, Key, Ship, TickInput};
pub use spawn::{SpawnTimer, try_spawn_opportunity};
pub use state::{GameState, Wall};
pub use tick::{ReapSummary, reap, tick};
