//! Transient spawned entities: skeletons and fireballs
//!
//! Both collections are plain vectors in spawn order. Removal compacts the
//! vector, so callers that remove while scanning walk indices from last to
//! first.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// A skeleton walking toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec3,
    /// Facing yaw; +Z of the enemy points along `facing_from_yaw(yaw)`
    pub yaw: f32,
}

impl Enemy {
    pub fn new(pos: Vec3) -> Self {
        Self { pos, yaw: 0.0 }
    }
}

/// A fireball in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Remaining ticks before the fireball fizzles
    pub life: u32,
}

impl Projectile {
    pub fn expired(&self) -> bool {
        self.life == 0
    }
}

/// Owner of every live skeleton and fireball
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityPool {
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Optional cap on concurrent skeletons (None = unbounded)
    #[serde(default)]
    pub max_enemies: Option<usize>,
}

impl EntityPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_enemies(max_enemies: Option<usize>) -> Self {
        Self {
            max_enemies,
            ..Self::default()
        }
    }

    /// Place a skeleton on a ring around `origin`.
    ///
    /// `angle_t` and `radius_t` are unit draws in [0, 1): the angle covers the
    /// full circle and the radius covers [40, 50). Returns `None` only when a
    /// cap is configured and already reached.
    pub fn spawn_enemy(&mut self, angle_t: f32, radius_t: f32, origin: Vec3) -> Option<&Enemy> {
        if let Some(cap) = self.max_enemies {
            if self.enemies.len() >= cap {
                log::warn!("Enemy cap {} reached, skipping spawn", cap);
                return None;
            }
        }

        let theta = angle_t * std::f32::consts::TAU;
        let r = SPAWN_RADIUS_MIN + radius_t * SPAWN_RADIUS_SPAN;
        let pos = Vec3::new(
            origin.x + theta.cos() * r,
            0.0,
            origin.z + theta.sin() * r,
        );

        log::debug!("Skeleton spawned at ({:.1}, {:.1})", pos.x, pos.z);
        self.enemies.push(Enemy::new(pos));
        self.enemies.last()
    }

    /// Launch a fireball from `origin` along `direction`
    pub fn spawn_projectile(&mut self, origin: Vec3, direction: Vec3, speed: f32) -> &Projectile {
        self.projectiles.push(Projectile {
            pos: origin,
            vel: direction.normalize_or_zero() * speed,
            life: PROJECTILE_LIFETIME,
        });
        &self.projectiles[self.projectiles.len() - 1]
    }

    /// Move every fireball and age it by `elapsed` ticks. Fireballs that run
    /// out of life stay in place (expired) until `sweep_expired`.
    pub fn tick_projectiles(&mut self, elapsed: u32) {
        let steps = elapsed as f32;
        for projectile in &mut self.projectiles {
            projectile.pos += projectile.vel * steps;
            projectile.life = projectile.life.saturating_sub(elapsed);
        }
    }

    /// Drop expired fireballs, keeping the others in order
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| !p.expired());
        before - self.projectiles.len()
    }

    pub fn remove_enemy(&mut self, index: usize) -> Enemy {
        self.enemies.remove(index)
    }

    pub fn remove_projectile(&mut self, index: usize) -> Projectile {
        self.projectiles.remove(index)
    }

    /// Index of the first skeleton within `radius` of `point`, scanning from
    /// the newest to the oldest
    pub fn enemy_hit_by(&self, point: Vec3, radius: f32) -> Option<usize> {
        (0..self.enemies.len())
            .rev()
            .find(|&j| self.enemies[j].pos.distance(point) < radius)
    }

    pub fn clear(&mut self) {
        self.enemies.clear();
        self.projectiles.clear();
    }
}
