//! Pairwise collision detection over the live entity sets
//!
//! Shapes are derived once at the start of the pass: resolution only changes
//! velocities and existence, never positions, so they stay valid for every
//! pair tested in the same pass. Entities already flagged as destroyed are
//! skipped.

use super::asteroid::Asteroid;
use super::collision::{Contact, resolve};
use super::geometry::{Shape, intersects};
use super::ship::{Bullet, Ship};
use super::state::Wall;

/// How many contacts of each kind a pass resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactStats {
    pub asteroid_pairs: usize,
    pub ship_hits: usize,
    pub bullet_hits: usize,
    pub wall_bounces: usize,
}

impl ContactStats {
    pub fn total(&self) -> usize {
        self.asteroid_pairs + self.ship_hits + self.bullet_hits + self.wall_bounces
    }
}

/// Test every interacting pair and resolve each overlap as it is found
pub fn detect_and_resolve(
    asteroids: &mut [Asteroid],
    ships: &mut [Ship],
    bullets: &mut [Bullet],
    walls: &[Wall],
) -> ContactStats {
    let asteroid_shapes: Vec<Shape> = asteroids.iter().map(Asteroid::shape).collect();
    let ship_shapes: Vec<Shape> = ships.iter().map(Ship::shape).collect();
    let bullet_shapes: Vec<Shape> = bullets.iter().map(Bullet::shape).collect();
    let wall_shapes: Vec<Shape> = walls.iter().map(Wall::shape).collect();

    let mut stats = ContactStats::default();

    // Asteroid x asteroid, each unordered pair once
    for j in 1..asteroids.len() {
        let (head, tail) = asteroids.split_at_mut(j);
        let b = &mut tail[0];
        for (i, a) in head.iter_mut().enumerate() {
            if a.exists && b.exists && intersects(&asteroid_shapes[i], &asteroid_shapes[j]) {
                resolve(Contact::AsteroidAsteroid(a, b));
                stats.asteroid_pairs += 1;
            }
        }
    }

    // Asteroid x ship
    for (a, asteroid) in asteroids.iter().enumerate() {
        for (s, ship) in ships.iter_mut().enumerate() {
            if asteroid.exists && ship.exists && intersects(&asteroid_shapes[a], &ship_shapes[s]) {
                resolve(Contact::ShipAsteroid(ship, asteroid));
                stats.ship_hits += 1;
            }
        }
    }

    // Asteroid x bullet
    for (a, asteroid) in asteroids.iter_mut().enumerate() {
        for (b, bullet) in bullets.iter_mut().enumerate() {
            if asteroid.exists && bullet.exists && intersects(&asteroid_shapes[a], &bullet_shapes[b]) {
                resolve(Contact::AsteroidBullet(asteroid, bullet));
                stats.bullet_hits += 1;
            }
        }
    }

    // Bullet x wall
    for (b, bullet) in bullets.iter_mut().enumerate() {
        for (w, wall) in walls.iter().enumerate() {
            if bullet.exists && intersects(&bullet_shapes[b], &wall_shapes[w]) {
                resolve(Contact::BulletWall(bullet, wall));
                stats.wall_bounces += 1;
            }
        }
    }

    // Asteroid x wall
    for (a, asteroid) in asteroids.iter_mut().enumerate() {
        for (w, wall) in walls.iter().enumerate() {
            if asteroid.exists && intersects(&asteroid_shapes[a], &wall_shapes[w]) {
                resolve(Contact::AsteroidWall(asteroid, wall));
                stats.wall_bounces += 1;
            }
        }
    }

    // Ship x wall
    for (s, ship) in ships.iter_mut().enumerate() {
        for (w, wall) in walls.iter().enumerate() {
            if ship.exists && intersects(&ship_shapes[s], &wall_shapes[w]) {
                resolve(Contact::ShipWall(ship, wall));
                stats.wall_bounces += 1;
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::asteroid::AsteroidSize;
    use crate::sim::state::boundary_walls;
    use glam::Vec2;

    fn rock(size: AsteroidSize, x: f32, y: f32) -> Asteroid {
        Asteroid::with_body(size, 2, Vec2::new(x, y), Vec2::ZERO, 0.0).expect("valid body")
    }

    fn ship_at(x: f32, y: f32) -> Ship {
        Ship::new(0, Vec2::new(x, y), &Settings::default()).expect("valid player")
    }

    #[test]
    fn test_overlapping_asteroids_resolved_once() {
        let mut asteroids = vec![
            rock(AsteroidSize::Medium, 400.0, 300.0),
            rock(AsteroidSize::Medium, 420.0, 300.0),
            rock(AsteroidSize::Medium, 900.0, 300.0),
        ];
        let stats = detect_and_resolve(&mut asteroids, &mut [], &mut [], &[]);
        assert_eq!(stats.asteroid_pairs, 1);
        assert!(asteroids[0].vel.x < 0.0);
        assert!(asteroids[1].vel.x > 0.0);
        assert_eq!(asteroids[2].vel, Vec2::ZERO);
    }

    #[test]
    fn test_ship_inside_asteroid_destroyed() {
        let mut asteroids = vec![rock(AsteroidSize::Large, 500.0, 200.0)];
        let mut ships = vec![ship_at(590.0, 290.0), ship_at(100.0, 100.0)];
        let stats = detect_and_resolve(&mut asteroids, &mut ships, &mut [], &[]);
        assert_eq!(stats.ship_hits, 1);
        assert!(!ships[0].exists);
        assert!(ships[1].exists);
    }

    #[test]
    fn test_spent_bullet_hits_only_once() {
        // Two overlapping rocks, one bullet in the overlap
        let mut asteroids = vec![
            rock(AsteroidSize::Large, 500.0, 200.0),
            rock(AsteroidSize::Large, 520.0, 200.0),
        ];
        let mut bullets = vec![ship_at(0.0, 0.0).fire()];
        bullets[0].pos = Vec2::new(600.0, 300.0);
        let stats = detect_and_resolve(&mut asteroids, &mut [], &mut bullets, &[]);
        assert_eq!(stats.bullet_hits, 1);
        assert!(!bullets[0].exists);
        let total_hp: i32 = asteroids.iter().map(|a| a.hp).sum();
        assert_eq!(total_hp, 60 - bullets[0].damage);
    }

    #[test]
    fn test_bullet_bounces_off_boundary() {
        let walls = boundary_walls();
        let mut bullets = vec![ship_at(0.0, 0.0).fire()];
        bullets[0].pos = Vec2::new(640.0, 712.0);
        bullets[0].vel = Vec2::new(5.0, 3.0);
        let stats = detect_and_resolve(&mut [], &mut [], &mut bullets, &walls);
        assert_eq!(stats.wall_bounces, 1);
        assert_eq!(bullets[0].vel, Vec2::new(5.0, -3.0));
        assert!(bullets[0].exists);
    }

    #[test]
    fn test_asteroid_and_ship_wired_to_walls() {
        let walls = boundary_walls();
        let mut asteroids = vec![rock(AsteroidSize::Medium, -10.0, 300.0)];
        asteroids[0].vel = Vec2::new(-1.0, 0.0);
        let mut ships = vec![ship_at(1262.0, 400.0)];
        ships[0].vel = Vec2::new(2.0, 0.0);
        let stats = detect_and_resolve(&mut asteroids, &mut ships, &mut [], &walls);
        assert_eq!(stats.wall_bounces, 2);
        assert_eq!(asteroids[0].vel, Vec2::new(1.0, 0.0));
        assert_eq!(ships[0].vel, Vec2::new(-2.0, 0.0));
    }

    #[test]
    fn test_dead_entities_ignored() {
        let mut asteroids = vec![rock(AsteroidSize::Large, 500.0, 200.0)];
        let mut ships = vec![ship_at(590.0, 290.0)];
        ships[0].exists = false;
        let stats = detect_and_resolve(&mut asteroids, &mut ships, &mut [], &[]);
        assert_eq!(stats.total(), 0);
    }
}
