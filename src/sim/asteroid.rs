//! Asteroids: sizes, body catalog, kinematics and fragmentation

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::{Polygon, Shape};
use crate::consts::*;
use crate::error::SimError;
use crate::{rotate_about, wrap_with_margin};

/// Asteroid size class (ordinal 0..=2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 3] = [AsteroidSize::Small, AsteroidSize::Medium, AsteroidSize::Large];

    pub fn from_index(index: u8) -> Result<Self, SimError> {
        match index {
            0 => Ok(AsteroidSize::Small),
            1 => Ok(AsteroidSize::Medium),
            2 => Ok(AsteroidSize::Large),
            _ => Err(SimError::InvalidSize(index)),
        }
    }

    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Side of the bounding square the body is drawn in
    pub fn extent(self) -> f32 {
        match self {
            AsteroidSize::Small => 30.0,
            AsteroidSize::Medium => 80.0,
            AsteroidSize::Large => 200.0,
        }
    }

    pub fn hit_points(self) -> i32 {
        match self {
            AsteroidSize::Small => 3,
            AsteroidSize::Medium => 10,
            AsteroidSize::Large => 30,
        }
    }

    /// Contribution to world weight: 3^size
    pub fn weight(self) -> u32 {
        3u32.pow(u32::from(self.index()))
    }

    /// Points for destroying one
    pub fn score(self) -> u64 {
        SCORE_PER_SIZE_STEP * (u64::from(self.index()) + 1)
    }

    /// Size of the fragments this one breaks into
    pub fn fragment(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Small => None,
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Large => Some(AsteroidSize::Medium),
        }
    }
}

/// Body variants per size
pub const BODY_VARIANTS: usize = 3;

/// Irregular outlines, indexed by (size, variant), relative to the top-left
/// of the bounding square
const BODY_CATALOG: [[&[(f32, f32)]; BODY_VARIANTS]; 3] = [
    [
        &[(10.0, 0.0), (30.0, 25.0), (25.0, 30.0), (0.0, 20.0)],
        &[(15.0, 30.0), (30.0, 30.0), (10.0, 0.0), (0.0, 5.0)],
        &[(15.0, 0.0), (30.0, 30.0), (0.0, 30.0)],
    ],
    [
        &[(40.0, 0.0), (55.0, 0.0), (80.0, 60.0), (35.0, 80.0), (0.0, 50.0)],
        &[(0.0, 50.0), (0.0, 30.0), (65.0, 0.0), (80.0, 40.0), (45.0, 80.0)],
        &[(0.0, 45.0), (15.0, 15.0), (50.0, 0.0), (80.0, 40.0), (25.0, 80.0)],
    ],
    [
        &[(65.0, 0.0), (200.0, 35.0), (170.0, 170.0), (80.0, 200.0), (0.0, 160.0), (0.0, 30.0)],
        &[
            (0.0, 150.0),
            (0.0, 40.0),
            (160.0, 0.0),
            (200.0, 130.0),
            (175.0, 200.0),
            (120.0, 180.0),
            (40.0, 200.0),
        ],
        &[(0.0, 120.0), (0.0, 60.0), (70.0, 0.0), (200.0, 20.0), (170.0, 200.0)],
    ],
];

/// Outline for a (size, variant) pair
pub fn body_outline(size: AsteroidSize, variant: usize) -> &'static [(f32, f32)] {
    BODY_CATALOG[size.index() as usize][variant % BODY_VARIANTS]
}

/// A drifting, spinning rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    /// Top-left of the bounding square
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_vel: f32,
    pub size: AsteroidSize,
    pub hp: i32,
    /// Index into the body catalog for this size
    pub body: usize,
    pub exists: bool,
}

impl Asteroid {
    /// Create an asteroid with a randomly chosen body
    pub fn new<R: Rng + ?Sized>(
        size: AsteroidSize,
        pos: Vec2,
        vel: Vec2,
        rotation_vel: f32,
        rng: &mut R,
    ) -> Self {
        let body = rng.random_range(0..BODY_VARIANTS);
        Self {
            pos,
            vel,
            rotation: 0.0,
            rotation_vel,
            size,
            hp: size.hit_points(),
            body,
            exists: true,
        }
    }

    /// Create an asteroid with a specific body variant
    pub fn with_body(
        size: AsteroidSize,
        body: usize,
        pos: Vec2,
        vel: Vec2,
        rotation_vel: f32,
    ) -> Result<Self, SimError> {
        if body >= BODY_VARIANTS {
            return Err(SimError::InvalidBody(body));
        }
        Ok(Self {
            pos,
            vel,
            rotation: 0.0,
            rotation_vel,
            size,
            hp: size.hit_points(),
            body,
            exists: true,
        })
    }

    #[inline]
    pub fn extent(&self) -> f32 {
        self.size.extent()
    }

    /// Rotation pivot (centre of the bounding square)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.extent() / 2.0)
    }

    #[inline]
    pub fn weight(&self) -> u32 {
        self.size.weight()
    }

    /// Current body outline, rotated about the centre
    pub fn shape(&self) -> Shape {
        let pivot = self.center();
        let points = body_outline(self.size, self.body)
            .iter()
            .map(|&(x, y)| rotate_about(self.pos + Vec2::new(x, y), pivot, self.rotation))
            .collect();
        Shape::Polygon(Polygon::new(points))
    }

    /// Jitter, drag, integrate, wrap and spin
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let jitter = Vec2::new(
            rng.random_range(-ASTEROID_JITTER..=ASTEROID_JITTER),
            rng.random_range(-ASTEROID_JITTER..=ASTEROID_JITTER),
        );
        self.vel = (self.vel + jitter) * ASTEROID_DRAG;

        let extent = self.extent();
        let next = self.pos + self.vel;
        self.pos = Vec2::new(
            wrap_with_margin(next.x, PLAYFIELD_WIDTH, extent),
            wrap_with_margin(next.y, PLAYFIELD_HEIGHT, extent),
        );
        self.rotation += self.rotation_vel;
    }

    /// Lose hit points; at zero or below the asteroid is destroyed
    pub fn take_damage(&mut self, damage: i32) {
        self.hp -= damage;
        if self.hp <= 0 {
            self.exists = false;
        }
    }

    /// Break into three smaller pieces. Small asteroids leave nothing.
    pub fn shatter<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Asteroid> {
        let Some(child_size) = self.size.fragment() else {
            return Vec::new();
        };

        let s = self.extent();
        let offsets = [
            (Vec2::ZERO, Vec2::new(-1.0, -1.0)),
            (Vec2::new(s / 2.0, 0.0), Vec2::new(1.0, -1.0)),
            (Vec2::new(s / 3.0, s / 2.0), Vec2::new(1.0, 1.0)),
        ];

        offsets
            .iter()
            .map(|&(offset, kick)| {
                let spin = 0.02 - rng.random::<f32>() * 0.05;
                Asteroid::new(child_size, self.pos + offset, self.vel + kick, spin, &mut *rng)
            })
            .collect()
    }
}
