//! Collision response rules
//!
//! Every kind of contact the world can produce is one variant of [`Contact`];
//! [`resolve`] is the rule table. Rules only touch the entities they are
//! handed. Destroyed entities are flagged, never removed here.

use glam::Vec2;

use super::asteroid::Asteroid;
use super::ship::{Bullet, Ship};
use super::state::Wall;
use crate::consts::*;

/// A detected overlap, keyed by the ordered pair of entity kinds
#[derive(Debug)]
pub enum Contact<'a> {
    AsteroidAsteroid(&'a mut Asteroid, &'a mut Asteroid),
    ShipAsteroid(&'a mut Ship, &'a Asteroid),
    AsteroidBullet(&'a mut Asteroid, &'a mut Bullet),
    BulletWall(&'a mut Bullet, &'a Wall),
    AsteroidWall(&'a mut Asteroid, &'a Wall),
    ShipWall(&'a mut Ship, &'a Wall),
}

/// Apply the response rule for one contact
pub fn resolve(contact: Contact<'_>) {
    match contact {
        Contact::AsteroidAsteroid(a, b) => {
            // Both impulses come from the pre-collision state
            let push_a = separation_impulse(a, b);
            let push_b = separation_impulse(b, a);
            a.vel += push_a;
            b.vel += push_b;
        }
        Contact::ShipAsteroid(ship, _asteroid) => {
            ship.exists = false;
        }
        Contact::AsteroidBullet(asteroid, bullet) => {
            bullet.exists = false;
            asteroid.take_damage(bullet.damage);
            // Bigger rocks soak up more of the bullet's momentum
            let resistance = BULLET_NUDGE_DIVISOR * f32::from(asteroid.size.index().max(1));
            asteroid.vel += bullet.vel / resistance;
        }
        Contact::BulletWall(bullet, wall) => {
            let center = bullet.center();
            if bounce(wall, center, &mut bullet.vel) {
                bullet.wear();
            }
        }
        Contact::AsteroidWall(asteroid, wall) => {
            let center = asteroid.center();
            bounce(wall, center, &mut asteroid.vel);
        }
        Contact::ShipWall(ship, wall) => {
            let center = ship.center();
            bounce(wall, center, &mut ship.vel);
        }
    }
}

/// Push on `this` away from `other`; smaller rocks are pushed harder
pub fn separation_impulse(this: &Asteroid, other: &Asteroid) -> Vec2 {
    let this_size = f32::from(this.size.index());
    let other_size = f32::from(other.size.index());
    let scale = ASTEROID_PUSH * (1.0 + other_size) / (1.0 + this_size);
    (this.center() - other.center()) * scale
}

/// Reflect the velocity component across the wall's long axis.
///
/// Horizontal walls flip `vel.y`, vertical walls flip `vel.x`. Only a
/// component heading into the wall is flipped, so an entity still
/// overlapping after it has turned around is not sent back in. Returns
/// whether a reflection happened.
pub fn bounce(wall: &Wall, center: Vec2, vel: &mut Vec2) -> bool {
    let to_wall = wall.rect.center() - center;
    if wall.is_horizontal() {
        if vel.y * to_wall.y > 0.0 {
            vel.y = -vel.y;
            return true;
        }
    } else if vel.x * to_wall.x > 0.0 {
        vel.x = -vel.x;
        return true;
    }
    false
}
