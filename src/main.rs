//! Math Mage entry point
//!
//! The browser build is driven from JavaScript through `platform::web`.
//! Natively this plays a scripted headless session and logs how it went.
//!
//! Usage: `math-mage [frames] [character]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use math_mage::consts::*;
    use math_mage::sim::{AnswerOutcome, GameState, InputEvent, TickInput, apply_event, tick};
    use math_mage::{Settings, forward_from_yaw, normalize_angle};

    /// Frames between casts (the autopilot "thinks" this long per answer)
    const ANSWER_DELAY: u64 = 45;
    /// Aim tolerance before the autopilot bothers answering
    const AIM_TOLERANCE: f32 = 0.1;

    /// Turn toward the nearest skeleton; stand still
    fn steer(state: &GameState) -> (TickInput, bool) {
        let player = &state.player;
        let nearest = state.entities.enemies.iter().min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .partial_cmp(&b.pos.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let Some(enemy) = nearest else {
            return (TickInput::default(), false);
        };

        let to_enemy = enemy.pos - player.pos;
        let desired = (-to_enemy.x).atan2(-to_enemy.z);
        let diff = normalize_angle(desired - player.yaw);

        let input = TickInput {
            turn_left: diff > ROT_SPEED,
            turn_right: diff < -ROT_SPEED,
            ..Default::default()
        };
        let aimed = forward_from_yaw(player.yaw)
            .dot(to_enemy.normalize_or_zero())
            .clamp(-1.0, 1.0)
            .acos()
            < AIM_TOLERANCE;
        (input, aimed)
    }

    fn answer(state: &mut GameState) -> Option<AnswerOutcome> {
        let text = state.challenge.problem().answer.to_string();
        for d in text.chars() {
            apply_event(state, InputEvent::Digit(d));
        }
        apply_event(state, InputEvent::Submit)
    }

    pub fn run(frames: u64, settings: &Settings) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut state =
            GameState::new(seed, settings.character).with_max_enemies(settings.max_enemies);
        log::info!(
            "Headless run: {} frames as {} (seed {})",
            frames,
            settings.character.as_str(),
            seed
        );

        let mut last_cast = 0u64;
        let mut casts = 0u32;
        let mut kills = 0u32;

        for frame in 0..frames {
            let (input, aimed) = steer(&state);
            if aimed && frame - last_cast >= ANSWER_DELAY {
                log::debug!("Answering {}", state.challenge.problem());
                if answer(&mut state) == Some(AnswerOutcome::Correct) {
                    casts += 1;
                    last_cast = frame;
                }
            }

            let report = tick(&mut state, &input);
            kills += report.kills;
            if report.spawned {
                log::debug!(
                    "Frame {}: skeleton spawned ({} alive)",
                    state.frame_count,
                    state.entities.enemies.len()
                );
            }
            if report.game_over {
                break;
            }
        }

        log::info!(
            "Finished at frame {}: score {}, health {}/{}, {} casts, {} kills, {} skeletons left",
            state.frame_count,
            state.score,
            state.player.health,
            MAX_HEALTH,
            casts,
            kills,
            state.entities.enemies.len()
        );
        println!(
            "score={} health={} kills={} game_over={}",
            state.score,
            state.player.health,
            kills,
            state.is_game_over()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Math Mage (native) starting...");

    let mut args = std::env::args().skip(1);
    let frames = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(60 * 60 * 3);
    let settings = match args.next() {
        Some(name) => math_mage::Settings::with_character_name(&name),
        None => math_mage::Settings::load(),
    };

    headless::run(frames, &settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
