//! Game balance settings
//!
//! Every tunable in the simulation lives here. Defaults come from
//! [`crate::consts`]; a JSON document can override any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;
use crate::sim::AsteroidSize;

/// Tuning values for ships, bullets and the spawn budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ships ===
    /// Thrust added along the heading per tick
    pub ship_accel: f32,
    /// Velocity multiplier applied every tick (< 1)
    pub ship_drag: f32,
    /// Heading change per tick while turning (radians)
    pub ship_turn_rate: f32,
    /// Ticks between shots
    pub attack_rate: u32,

    // === Bullets ===
    pub bullet_speed: f32,
    pub bullet_damage: i32,
    pub bullet_durability: u8,

    // === Spawning ===
    /// Weight ceiling at difficulty 1
    pub weight_base: u32,
    /// Extra weight ceiling per difficulty level above 1
    pub weight_scale: u32,
    /// Spawn delay with an empty budget (ms)
    pub spawn_base_delay_ms: u32,
    /// Extra spawn delay with a full budget (ms)
    pub spawn_delay_gain_ms: u32,
    /// Size of every spawned asteroid
    pub spawn_size: AsteroidSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ship_accel: SHIP_ACCEL,
            ship_drag: SHIP_DRAG,
            ship_turn_rate: SHIP_TURN_RATE,
            attack_rate: SHIP_ATTACK_RATE,

            bullet_speed: BULLET_SPEED,
            bullet_damage: BULLET_DAMAGE,
            bullet_durability: BULLET_DURABILITY,

            weight_base: WEIGHT_BASE,
            weight_scale: WEIGHT_SCALE,
            spawn_base_delay_ms: SPAWN_BASE_DELAY_MS,
            spawn_delay_gain_ms: SPAWN_DELAY_GAIN_MS,
            spawn_size: AsteroidSize::Medium,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling unspecified fields with defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (weight base {})", settings.weight_base);
        Ok(settings)
    }

    /// Reject values that would make the simulation degenerate
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.ship_drag > 0.0 && self.ship_drag <= 1.0) {
            return Err(SimError::InvalidSetting {
                name: "ship_drag",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.ship_accel.is_finite() && self.ship_accel >= 0.0) {
            return Err(SimError::InvalidSetting {
                name: "ship_accel",
                reason: "must be finite and not negative",
            });
        }
        if !self.ship_turn_rate.is_finite() {
            return Err(SimError::InvalidSetting {
                name: "ship_turn_rate",
                reason: "must be finite",
            });
        }
        if !(self.bullet_speed.is_finite() && self.bullet_speed > 0.0) {
            return Err(SimError::InvalidSetting {
                name: "bullet_speed",
                reason: "must be finite and positive",
            });
        }
        if self.bullet_damage <= 0 {
            return Err(SimError::InvalidSetting {
                name: "bullet_damage",
                reason: "must be positive",
            });
        }
        if self.bullet_durability == 0 {
            return Err(SimError::InvalidSetting {
                name: "bullet_durability",
                reason: "must be at least 1",
            });
        }
        if self.weight_base == 0 {
            return Err(SimError::InvalidSetting {
                name: "weight_base",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// World weight ceiling for a difficulty level (difficulty >= 1).
    ///
    /// Fails when the ceiling does not fit in a `u32`.
    pub fn max_weight(&self, difficulty: u32) -> Result<u32, SimError> {
        self.weight_scale
            .checked_mul(difficulty.saturating_sub(1))
            .and_then(|extra| extra.checked_add(self.weight_base))
            .ok_or(SimError::InvalidDifficulty(difficulty))
    }
}
