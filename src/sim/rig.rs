//! Character rigs
//!
//! Every playable character exposes the same attachment set: four limb
//! pivots swung by the walk cycle and a spell origin in the character's
//! local frame. Geometry belongs to the presentation layer.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Playable characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CharacterKind {
    #[default]
    Chicken,
    Warrior,
    Wizard,
}

impl CharacterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterKind::Chicken => "chicken",
            CharacterKind::Warrior => "warrior",
            CharacterKind::Wizard => "wizard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "chicken" => Some(CharacterKind::Chicken),
            "warrior" => Some(CharacterKind::Warrior),
            "wizard" => Some(CharacterKind::Wizard),
            _ => None,
        }
    }

    /// Parse a character name, falling back to the warrior
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            log::error!("Character type \"{}\" not found. Using warrior.", s);
            CharacterKind::Warrior
        })
    }

    /// Where fireballs leave the character, in its local frame
    pub fn spell_origin(&self) -> Vec3 {
        match self {
            // Beak
            CharacterKind::Chicken => Vec3::new(0.0, 2.0, 1.2),
            // Hand
            CharacterKind::Warrior => Vec3::new(0.0, 2.5, 0.0),
            // Staff orb
            CharacterKind::Wizard => Vec3::new(0.5, 3.2, 0.0),
        }
    }
}

/// Rotations (about local X, radians) of the four animated limbs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LimbPivots {
    pub left_leg: f32,
    pub right_leg: f32,
    pub left_arm: f32,
    pub right_arm: f32,
}

impl LimbPivots {
    /// Gait pose for swing `angle`: legs opposite each other, each arm
    /// opposite its leg
    pub fn stride(angle: f32) -> Self {
        Self {
            left_leg: angle,
            right_leg: -angle,
            left_arm: -angle,
            right_arm: angle,
        }
    }

    /// Ease every limb toward rest
    pub fn damp(&mut self, factor: f32) {
        self.left_leg *= factor;
        self.right_leg *= factor;
        self.left_arm *= factor;
        self.right_arm *= factor;
    }
}

/// The selected character plus its animated state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rig {
    pub kind: CharacterKind,
    pub pivots: LimbPivots,
    /// Walk cycle phase, kept in [0, 2π)
    pub walk_phase: f32,
}

impl Rig {
    pub fn new(kind: CharacterKind) -> Self {
        Self {
            kind,
            pivots: LimbPivots::default(),
            walk_phase: 0.0,
        }
    }

    pub fn spell_origin(&self) -> Vec3 {
        self.kind.spell_origin()
    }

    /// Advance the walk animation by one tick
    pub fn animate(&mut self, moving: bool) {
        if moving {
            self.walk_phase = (self.walk_phase + WALK_CYCLE_STEP) % TAU;
            self.pivots = LimbPivots::stride(self.walk_phase.sin() * WALK_SWING_AMPLITUDE);
        } else {
            self.pivots.damp(LIMB_DAMPING);
        }
    }

    /// Back to a standing pose
    pub fn reset(&mut self) {
        self.pivots = LimbPivots::default();
        self.walk_phase = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(CharacterKind::from_str("Wizard"), Some(CharacterKind::Wizard));
        assert_eq!(CharacterKind::from_str("dragon"), None);
        assert_eq!(CharacterKind::from_str_or_default("dragon"), CharacterKind::Warrior);
        for kind in [CharacterKind::Chicken, CharacterKind::Warrior, CharacterKind::Wizard] {
            assert_eq!(CharacterKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_walk_cycle_swings_opposite() {
        let mut rig = Rig::new(CharacterKind::Warrior);
        rig.animate(true);
        let a = (0.2f32).sin() * 0.6;
        assert!((rig.pivots.left_leg - a).abs() < 1e-6);
        assert!((rig.pivots.right_leg + a).abs() < 1e-6);
        assert!((rig.pivots.left_arm + a).abs() < 1e-6);
        assert!((rig.pivots.right_arm - a).abs() < 1e-6);
    }

    #[test]
    fn test_idle_decays_instead_of_snapping() {
        let mut rig = Rig::new(CharacterKind::Chicken);
        for _ in 0..5 {
            rig.animate(true);
        }
        let swing = rig.pivots.left_leg;
        assert!(swing.abs() > 0.1);

        rig.animate(false);
        assert!((rig.pivots.left_leg - swing * 0.9).abs() < 1e-6);
        assert!(rig.pivots.left_leg != 0.0);

        for _ in 0..200 {
            rig.animate(false);
        }
        assert!(rig.pivots.left_leg.abs() < 1e-6);
    }

    #[test]
    fn test_walk_phase_wraps() {
        let mut rig = Rig::new(CharacterKind::Wizard);
        for _ in 0..10_000 {
            rig.animate(true);
            assert!((0.0..TAU).contains(&rig.walk_phase));
        }

        // A long-lived phase still advances the gait
        rig.walk_phase = 5_000_000.0;
        rig.animate(true);
        assert!(rig.walk_phase < TAU);
        let phase = rig.walk_phase;
        rig.animate(true);
        assert!(rig.walk_phase != phase);
    }
}
