//! Render feed: a per-frame snapshot for the presentation layer
//!
//! The renderer owns the scene graph; it only needs transforms, limb
//! rotations and HUD values, all plain data.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::challenge::AnswerOutcome;
use super::rig::{CharacterKind, LimbPivots};
use super::state::GameState;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub pos: Vec3,
    pub yaw: f32,
}

/// Where the camera wants to be; the renderer eases toward it by
/// `CAMERA_LERP` each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraTarget {
    pub fn follow(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            position: player.pos + player.rotation() * CAMERA_OFFSET,
            look_at: player.pos + Vec3::Y * CAMERA_LOOK_HEIGHT,
        }
    }
}

/// Everything the presentation layer draws for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub character: CharacterKind,
    pub player: Transform,
    pub pivots: LimbPivots,
    pub spell_origin: Vec3,
    pub camera: CameraTarget,
    pub enemies: Vec<Transform>,
    pub projectiles: Vec<Vec3>,
    pub problem_text: String,
    pub input_text: String,
    pub last_outcome: Option<AnswerOutcome>,
    pub health_percent: f32,
    pub score: u64,
    pub game_over: bool,
}

impl RenderFrame {
    pub fn capture(state: &GameState) -> Self {
        let player = &state.player;
        Self {
            character: player.rig.kind,
            player: Transform {
                pos: player.pos,
                yaw: player.yaw,
            },
            pivots: player.rig.pivots,
            spell_origin: player.spell_origin_world(),
            camera: CameraTarget::follow(state),
            enemies: state
                .entities
                .enemies
                .iter()
                .map(|e| Transform {
                    pos: e.pos,
                    yaw: e.yaw,
                })
                .collect(),
            projectiles: state.entities.projectiles.iter().map(|p| p.pos).collect(),
            problem_text: state.challenge.problem().text(),
            input_text: state.challenge.input().to_string(),
            last_outcome: state.challenge.last_outcome(),
            health_percent: state.health_percent(),
            score: state.score,
            game_over: state.is_game_over(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tick::cast_fireball;

    #[test]
    fn test_camera_behind_player() {
        let mut state = GameState::new(3, CharacterKind::Warrior);
        let cam = CameraTarget::follow(&state);
        assert!((cam.position - Vec3::new(0.0, 8.0, 10.0)).length() < 1e-6);
        assert!((cam.look_at - Vec3::new(0.0, 1.0, 0.0)).length() < 1e-6);

        // Facing +X (yaw -90deg), the camera sits on -X
        state.player.yaw = -std::f32::consts::FRAC_PI_2;
        let cam = CameraTarget::follow(&state);
        assert!((cam.position - Vec3::new(-10.0, 8.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_capture_mirrors_state() {
        let mut state = GameState::new(3, CharacterKind::Chicken);
        cast_fireball(&mut state);
        state.player.health = 40;
        state.score = 300;

        let frame = RenderFrame::capture(&state);
        assert_eq!(frame.projectiles.len(), 1);
        assert!(frame.enemies.is_empty());
        assert_eq!(frame.score, 300);
        assert!((frame.health_percent - 40.0).abs() < 1e-6);
        assert!(!frame.game_over);
        assert_eq!(frame.problem_text, state.challenge.problem().text());
        assert_eq!(frame.character, CharacterKind::Chicken);
    }

    #[test]
    fn test_frame_serializes() {
        let state = GameState::new(3, CharacterKind::Wizard);
        let json = serde_json::to_string(&RenderFrame::capture(&state)).unwrap();
        assert!(json.contains("\"character\":\"Wizard\""));
        assert!(json.contains("\"game_over\":false"));
    }
}
