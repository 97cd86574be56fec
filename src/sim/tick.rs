//! Per-frame simulation tick
//!
//! Core game loop that advances the run by one rendered frame. Discrete
//! input (digits, submit, restart) arrives through `apply_event`.

use glam::Vec3;

use super::challenge::AnswerOutcome;
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::{facing_from_yaw, normalize_angle, yaw_toward};

/// Held movement keys, sampled once at the top of each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl TickInput {
    pub fn moving(&self) -> bool {
        self.forward || self.backward
    }
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A typed digit, '0'..='9'
    Digit(char),
    Backspace,
    Submit,
    Restart,
}

/// What a single tick changed, for logging and HUD effects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: bool,
    pub kills: u32,
    pub damage_taken: u32,
    pub game_over: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickReport {
    let mut report = TickReport::default();

    // Frozen until restart
    if state.phase == GamePhase::GameOver {
        return report;
    }

    state.frame_count += 1;
    if state.frame_count.is_multiple_of(SPAWN_INTERVAL) {
        let before = state.entities.enemies.len();
        state.spawn_enemy();
        report.spawned = state.entities.enemies.len() > before;
    }

    move_player(state, input);
    state.player.rig.animate(input.moving());

    resolve_projectiles(state, &mut report);
    advance_enemies(state, &mut report);

    report
}

/// Apply held movement keys. Opposing keys cancel because each is applied
/// on its own.
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let forward = player.forward();

    if input.forward {
        player.pos += forward * MOVE_SPEED;
    }
    if input.backward {
        player.pos -= forward * MOVE_SPEED;
    }
    if input.turn_left {
        player.yaw += ROT_SPEED;
    }
    if input.turn_right {
        player.yaw -= ROT_SPEED;
    }
    player.yaw = normalize_angle(player.yaw);
}

/// Fly fireballs and resolve hits. Both collections are walked from the end
/// so removals never disturb entries still to be visited.
fn resolve_projectiles(state: &mut GameState, report: &mut TickReport) {
    state.entities.tick_projectiles(1);

    for i in (0..state.entities.projectiles.len()).rev() {
        let pos = state.entities.projectiles[i].pos;
        if let Some(j) = state.entities.enemy_hit_by(pos, PROJECTILE_HIT_RADIUS) {
            state.entities.remove_enemy(j);
            state.entities.remove_projectile(i);
            state.score += SCORE_PER_KILL;
            report.kills += 1;
        }
    }

    // Fireballs that hit on their last tick were already removed above
    state.entities.sweep_expired();
}

/// Walk skeletons toward the player and apply contact damage
fn advance_enemies(state: &mut GameState, report: &mut TickReport) {
    let target = state.player.pos;

    for enemy in &mut state.entities.enemies {
        enemy.yaw = yaw_toward(enemy.pos, target);
        let facing = facing_from_yaw(enemy.yaw);
        enemy.pos += facing * ENEMY_SPEED;

        if enemy.pos.distance(target) < ENEMY_HIT_RADIUS {
            let died = state.player.take_hit();
            report.damage_taken += 1;
            enemy.pos -= facing * ENEMY_KNOCKBACK;

            if died {
                state.phase = GamePhase::GameOver;
                report.game_over = true;
                log::info!("Game over! Final score: {}", state.score);
                break;
            }
        }
    }
}

/// Launch a fireball from the character's spell origin along its facing
pub fn cast_fireball(state: &mut GameState) {
    let forward = state.player.forward();
    let origin: Vec3 = state.player.spell_origin_world() + forward * CAST_FORWARD_PUSH;
    state
        .entities
        .spawn_projectile(origin, forward, FIREBALL_SPEED);
}

/// Check the typed answer; a correct one casts and draws the next problem
pub fn submit_answer(state: &mut GameState) -> AnswerOutcome {
    let outcome = state.challenge.submit();
    if outcome == AnswerOutcome::Correct {
        cast_fireball(state);
        state.next_problem();
    }
    outcome
}

/// Handle one discrete input event. Everything except restart is ignored
/// once the run is over.
pub fn apply_event(state: &mut GameState, event: InputEvent) -> Option<AnswerOutcome> {
    if state.phase == GamePhase::GameOver && event != InputEvent::Restart {
        return None;
    }

    match event {
        InputEvent::Digit(d) => {
            state.challenge.append_digit(d);
            None
        }
        InputEvent::Backspace => {
            state.challenge.backspace();
            None
        }
        InputEvent::Submit => Some(submit_answer(state)),
        InputEvent::Restart => {
            state.reset();
            None
        }
    }
}
