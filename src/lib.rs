//! Math Mage - answer arithmetic problems to cast fireballs at skeletons
//!
//! Core modules:
//! - `sim`: Deterministic simulation (math challenge, entities, gameplay tick)
//! - `platform`: Browser/native platform abstraction (key mapping, wasm bridge)
//! - `settings`: Player preferences (character, enemy cap)

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::{Quat, Vec3};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Player translation per tick while forward/backward is held
    pub const MOVE_SPEED: f32 = 0.2;
    /// Player yaw change per tick while a turn key is held (radians)
    pub const ROT_SPEED: f32 = 0.05;

    /// Fireball speed (units per tick)
    pub const FIREBALL_SPEED: f32 = 1.2;
    /// Fireball lifetime in ticks
    pub const PROJECTILE_LIFETIME: u32 = 100;
    /// Fireball vs skeleton hit distance
    pub const PROJECTILE_HIT_RADIUS: f32 = 3.0;
    /// Extra push along forward when a fireball leaves the caster
    pub const CAST_FORWARD_PUSH: f32 = 1.5;

    /// Skeleton walk speed (units per tick)
    pub const ENEMY_SPEED: f32 = 0.075;
    /// Skeleton vs player contact distance
    pub const ENEMY_HIT_RADIUS: f32 = 1.5;
    /// Distance a skeleton is shoved back after landing a hit
    pub const ENEMY_KNOCKBACK: f32 = 0.5;
    /// Ticks between skeleton spawns
    pub const SPAWN_INTERVAL: u64 = 150;
    /// Spawn ring around the player: [min, min + span)
    pub const SPAWN_RADIUS_MIN: f32 = 40.0;
    pub const SPAWN_RADIUS_SPAN: f32 = 10.0;

    pub const SCORE_PER_KILL: u64 = 100;
    pub const MAX_HEALTH: u32 = 100;

    /// Longest answer the player can type
    pub const INPUT_MAX_DIGITS: usize = 4;
    /// Wrong-answer flash on the math HUD (presentation timing)
    pub const ERROR_FLASH_MS: f64 = 200.0;

    /// Walk cycle phase advance per moving tick
    pub const WALK_CYCLE_STEP: f32 = 0.2;
    /// Peak limb swing (radians)
    pub const WALK_SWING_AMPLITUDE: f32 = 0.6;
    /// Per-tick decay of limb swing while standing still
    pub const LIMB_DAMPING: f32 = 0.9;

    /// Camera sits behind and above the player, in the player's local frame
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 8.0, 10.0);
    /// Camera looks slightly above the player's feet
    pub const CAMERA_LOOK_HEIGHT: f32 = 1.0;
    /// Per-frame interpolation toward the ideal camera point
    pub const CAMERA_LERP: f32 = 0.08;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Rotation for a yaw angle (radians about +Y)
#[inline]
pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Forward direction for a yaw angle. Zero yaw faces -Z.
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    yaw_rotation(yaw) * Vec3::NEG_Z
}

/// Yaw that turns an object's +Z axis toward `target`, ignoring height
#[inline]
pub fn yaw_toward(from: Vec3, target: Vec3) -> f32 {
    let d = target - from;
    d.x.atan2(d.z)
}

/// Unit direction an object with `yaw` walks along when it translates on +Z
#[inline]
pub fn facing_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, yaw.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_forward_at_zero_yaw_is_neg_z() {
        let f = forward_from_yaw(0.0);
        assert!((f - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_turning_left_faces_neg_x() {
        // Positive yaw is a counter-clockwise turn seen from above
        let f = forward_from_yaw(FRAC_PI_2);
        assert!((f - Vec3::NEG_X).length() < 1e-6);
    }

    #[test]
    fn test_normalize_angle() {
        use std::f32::consts::PI;
        assert!((normalize_angle(2.5 * PI) - 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-2.5 * PI) + 0.5 * PI).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0) + PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_yaw_toward_points_facing_at_target() {
        let from = Vec3::new(3.0, 0.0, -4.0);
        let target = Vec3::new(-2.0, 0.0, 7.0);
        let facing = facing_from_yaw(yaw_toward(from, target));
        let expected = (target - from).normalize();
        assert!((facing - expected).length() < 1e-5);
    }
}
