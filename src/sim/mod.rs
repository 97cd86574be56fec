//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per rendered frame
//! - Seeded RNG only
//! - Stable iteration order (reverse index scans during removal)
//! - No rendering or platform dependencies

pub mod challenge;
pub mod entities;
pub mod rig;
pub mod state;
pub mod tick;
pub mod view;

pub use challenge::{AnswerOutcome, MathChallenge, MathProblem, Operator, difficulty_range};
pub use entities::{Enemy, EntityPool, Projectile};
pub use rig::{CharacterKind, LimbPivots, Rig};
pub use state::{GamePhase, GameState, Player};
pub use tick::{InputEvent, TickInput, TickReport, apply_event, cast_fireball, submit_answer, tick};
pub use view::{CameraTarget, RenderFrame, Transform};
