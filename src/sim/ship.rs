//! Player ships, their bullets, and the key state they read

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Polygon, Rect, Shape};
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;
use crate::{heading_to_dir, rotate_about, wrap};

/// Keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Right,
    Down,
    Left,
    Space,
    W,
    D,
    S,
    A,
    R,
}

impl Key {
    pub const COUNT: usize = 10;
}

/// Key/button state for one tick, indexed by [`Key`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub keys: [bool; Key::COUNT],
}

impl TickInput {
    /// Input with the given keys held
    pub fn pressed(keys: &[Key]) -> Self {
        let mut input = Self::default();
        for &key in keys {
            input.set(key, true);
        }
        input
    }

    pub fn set(&mut self, key: Key, down: bool) {
        self.keys[key as usize] = down;
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.keys[key as usize]
    }
}

/// Which keys drive one ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlScheme {
    pub forward: Key,
    pub right: Key,
    pub back: Key,
    pub left: Key,
    pub shoot: Key,
}

/// Bindings per player index
pub const PLAYER_CONTROLS: [ControlScheme; MAX_PLAYERS] = [
    ControlScheme {
        forward: Key::Up,
        right: Key::Right,
        back: Key::Down,
        left: Key::Left,
        shoot: Key::Space,
    },
    ControlScheme {
        forward: Key::W,
        right: Key::D,
        back: Key::S,
        left: Key::A,
        shoot: Key::R,
    },
];

/// Triangle outline relative to the ship's top-left, nose up
const SHIP_OUTLINE: [(f32, f32); 3] = [(10.0, 0.0), (20.0, 30.0), (0.0, 30.0)];

/// A player-controlled ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    /// Player index; selects key binding and sprite variant
    pub player: usize,
    /// Top-left of the sprite box
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians, 0 = nose up
    pub heading: f32,
    pub accel: f32,
    pub drag: f32,
    pub turn_rate: f32,
    pub attack_rate: u32,
    /// Ticks until the next shot is allowed
    pub cooldown: u32,
    /// Thrust was applied this tick (exhaust flame)
    pub thrusting: bool,
    pub exists: bool,
    muzzle_speed: f32,
    bullet_damage: i32,
    bullet_durability: u8,
}

impl Ship {
    pub fn new(player: usize, pos: Vec2, settings: &Settings) -> Result<Self, SimError> {
        if player >= MAX_PLAYERS {
            return Err(SimError::InvalidPlayerIndex(player));
        }
        Ok(Self {
            player,
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            accel: settings.ship_accel,
            drag: settings.ship_drag,
            turn_rate: settings.ship_turn_rate,
            attack_rate: settings.attack_rate,
            cooldown: 0,
            thrusting: false,
            exists: true,
            muzzle_speed: settings.bullet_speed,
            bullet_damage: settings.bullet_damage,
            bullet_durability: settings.bullet_durability,
        })
    }

    #[inline]
    pub fn controls(&self) -> &'static ControlScheme {
        &PLAYER_CONTROLS[self.player]
    }

    /// Sprite variant for the renderer
    #[inline]
    pub fn variant(&self) -> usize {
        self.player
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(SHIP_WIDTH, SHIP_HEIGHT) / 2.0
    }

    /// Hull triangle rotated to the current heading
    pub fn shape(&self) -> Shape {
        let pivot = self.center();
        let points = SHIP_OUTLINE
            .iter()
            .map(|&(x, y)| rotate_about(self.pos + Vec2::new(x, y), pivot, self.heading))
            .collect();
        Shape::Polygon(Polygon::new(points))
    }

    /// Apply thrust and turning from the held keys, then drag
    pub fn accelerate(&mut self, input: &TickInput) {
        let controls = self.controls();
        self.thrusting = false;

        if input.is_down(controls.forward) {
            self.vel += heading_to_dir(self.heading) * self.accel;
            self.thrusting = true;
        }
        if input.is_down(controls.right) {
            self.heading += self.turn_rate;
        }
        if input.is_down(controls.left) {
            self.heading -= self.turn_rate;
        }

        // Drag every tick caps the top speed
        self.vel *= self.drag;
    }

    /// Integrate velocity, wrapping at the playfield edges
    pub fn advance(&mut self) {
        let next = self.pos + self.vel;
        self.pos = Vec2::new(wrap(next.x, PLAYFIELD_WIDTH), wrap(next.y, PLAYFIELD_HEIGHT));
    }

    /// Fire if the shoot key is held and the cooldown has run out, otherwise
    /// count the cooldown down. A held key fires every `attack_rate + 1` ticks.
    pub fn shoot(&mut self, input: &TickInput) -> Option<Bullet> {
        if self.cooldown == 0 && input.is_down(self.controls().shoot) {
            self.cooldown = self.attack_rate;
            return Some(self.fire());
        }
        self.cooldown = self.cooldown.saturating_sub(1);
        None
    }

    /// A bullet leaving the ship's centre along its heading
    pub fn fire(&self) -> Bullet {
        Bullet {
            owner: self.player,
            pos: self.center(),
            vel: heading_to_dir(self.heading) * self.muzzle_speed,
            damage: self.bullet_damage,
            durability: self.bullet_durability,
            exists: true,
        }
    }
}

/// A projectile fired by a ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Player index of the ship that fired it
    pub owner: usize,
    /// Top-left of the hitbox
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: i32,
    /// Wall impacts left before the bullet breaks
    pub durability: u8,
    pub exists: bool,
}

impl Bullet {
    pub fn hitbox(&self) -> Rect {
        let side = BULLET_RADIUS * 2.0;
        Rect::new(self.pos.x, self.pos.y, side, side)
    }

    pub fn shape(&self) -> Shape {
        Shape::Rect(self.hitbox())
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.hitbox().center()
    }

    /// Integrate; leaving the playfield destroys the bullet
    pub fn advance(&mut self) {
        self.pos += self.vel;
        let in_x = (0.0..=PLAYFIELD_WIDTH).contains(&self.pos.x);
        let in_y = (0.0..=PLAYFIELD_HEIGHT).contains(&self.pos.y);
        if !(in_x && in_y) {
            self.exists = false;
        }
    }

    /// One wall impact
    pub fn wear(&mut self) {
        self.durability = self.durability.saturating_sub(1);
        if self.durability == 0 {
            self.exists = false;
        }
    }
}
