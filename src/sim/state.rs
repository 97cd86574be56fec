//! Game state and core simulation types
//!
//! One `GameState` owns everything a run needs: the player, both entity
//! collections, the math challenge and the seeded RNG.

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::challenge::{MathChallenge, MathProblem};
use super::entities::EntityPool;
use super::rig::{CharacterKind, Rig};
use crate::consts::*;
use crate::{forward_from_yaw, yaw_rotation};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Health ran out; frozen until restart
    GameOver,
}

/// The player's character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Yaw about +Y (radians); zero faces -Z
    pub yaw: f32,
    pub health: u32,
    pub rig: Rig,
}

impl Player {
    pub fn new(kind: CharacterKind) -> Self {
        Self {
            pos: Vec3::ZERO,
            yaw: 0.0,
            health: MAX_HEALTH,
            rig: Rig::new(kind),
        }
    }

    pub fn rotation(&self) -> Quat {
        yaw_rotation(self.yaw)
    }

    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    /// Spell origin in world space
    pub fn spell_origin_world(&self) -> Vec3 {
        self.pos + self.rotation() * self.rig.spell_origin()
    }

    /// Take one point of damage. Returns true when this drops health to zero.
    pub fn take_hit(&mut self) -> bool {
        if self.health == 0 {
            return false;
        }
        self.health -= 1;
        self.health == 0
    }

    fn reset(&mut self) {
        self.pos = Vec3::ZERO;
        self.yaw = 0.0;
        self.health = MAX_HEALTH;
        self.rig.reset();
    }
}

/// Complete game state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    /// Simulation tick counter (drives spawn cadence)
    pub frame_count: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub entities: EntityPool,
    pub challenge: MathChallenge,
}

impl GameState {
    /// Create a new game state with the given seed and character
    pub fn new(seed: u64, character: CharacterKind) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let challenge = MathChallenge::new(0, &mut rng);
        Self {
            seed,
            rng,
            score: 0,
            frame_count: 0,
            phase: GamePhase::Playing,
            player: Player::new(character),
            entities: EntityPool::new(),
            challenge,
        }
    }

    /// Cap concurrent skeletons (None keeps spawning forever)
    pub fn with_max_enemies(mut self, max_enemies: Option<usize>) -> Self {
        self.entities.max_enemies = max_enemies;
        self
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Health as a percentage of the maximum
    pub fn health_percent(&self) -> f32 {
        self.player.health as f32 * 100.0 / MAX_HEALTH as f32
    }

    /// Draw the next problem at the current difficulty
    pub fn next_problem(&mut self) -> &MathProblem {
        self.challenge.generate_problem(self.score, &mut self.rng)
    }

    /// Spawn one skeleton around the player using the run RNG
    pub fn spawn_enemy(&mut self) {
        let angle_t: f32 = self.rng.random();
        let radius_t: f32 = self.rng.random();
        self.entities.spawn_enemy(angle_t, radius_t, self.player.pos);
    }

    /// Start a fresh run in place, keeping the character, cap and RNG stream
    pub fn reset(&mut self) {
        self.score = 0;
        self.frame_count = 0;
        self.phase = GamePhase::Playing;
        self.player.reset();
        self.entities.clear();
        self.challenge.clear_input();
        self.next_problem();
        log::info!("Game reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new(42, CharacterKind::Wizard);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.player.health, MAX_HEALTH);
        assert_eq!(state.score, 0);
        assert!(state.entities.enemies.is_empty());
        assert_eq!(state.challenge.input(), "");
        assert_eq!(state.player.rig.kind, CharacterKind::Wizard);
    }

    #[test]
    fn test_same_seed_same_problems() {
        let mut a = GameState::new(99999, CharacterKind::Chicken);
        let mut b = GameState::new(99999, CharacterKind::Chicken);
        for _ in 0..10 {
            assert_eq!(a.next_problem(), b.next_problem());
        }
    }

    #[test]
    fn test_take_hit_saturates() {
        let mut player = Player::new(CharacterKind::Warrior);
        player.health = 2;
        assert!(!player.take_hit());
        assert!(player.take_hit());
        assert!(!player.take_hit());
        assert_eq!(player.health, 0);
    }

    #[test]
    fn test_spell_origin_follows_yaw() {
        let mut player = Player::new(CharacterKind::Wizard);
        player.pos = Vec3::new(1.0, 0.0, 1.0);
        // Wizard's orb sits at +X; half a turn puts it at -X
        player.yaw = std::f32::consts::PI;
        let p = player.spell_origin_world();
        assert!((p - Vec3::new(0.5, 3.2, 1.0)).length() < 1e-5);
    }

    #[test]
    fn test_health_percent() {
        let mut state = GameState::new(1, CharacterKind::Chicken);
        state.player.health = 37;
        assert!((state.health_percent() - 37.0).abs() < 1e-6);
    }
}
