//! Fixed timestep simulation step
//!
//! Per frame, in order: input, gravity, collision, enemy patrol, coin and
//! enemy interactions, attack timer, fall-off, camera, then phase
//! transitions. Nothing re-enters an earlier stage within the same frame.

use serde::{Deserialize, Serialize};

use super::collision::{clamp_to_world, move_and_collide};
use super::enemy::advance_enemies;
use super::interact::{
    HitContext, apply_fall, collect_coins, fell_off, resolve_enemy_contacts,
};
use super::state::{Facing, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single frame (already sampled by the host)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
    pub attack: bool,
    /// Only honoured in GameOver / GameWon
    pub restart: bool,
}

/// Session values for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Telemetry {
    pub score: u32,
    pub lives: u32,
    pub level_index: u32,
    pub phase: GamePhase,
}

impl Telemetry {
    pub fn of(state: &GameState) -> Self {
        Self {
            score: state.player.score,
            lives: state.player.lives,
            level_index: state.level_index,
            phase: state.phase,
        }
    }
}

/// Everything a host needs after one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub telemetry: Telemetry,
    /// World x at the viewport's left edge
    pub camera_offset: f32,
    /// Raised this frame, in order
    pub events: Vec<GameEvent>,
}

impl FrameResult {
    pub fn phase(&self) -> GamePhase {
        self.telemetry.phase
    }
}

/// Advance the session by one frame
///
/// `dt` is the host's fixed step; motion scales by `dt / SIM_DT`, with `dt`
/// capped at `MAX_FRAME_DT`. A non-finite or non-positive `dt` freezes
/// motion for the frame.
pub fn step(state: &mut GameState, input: &FrameInput, dt: f32) -> FrameResult {
    let scale = if dt.is_finite() && dt > 0.0 {
        dt.min(MAX_FRAME_DT) / SIM_DT
    } else {
        0.0
    };
    let mut events = Vec::new();

    if state.phase.is_terminal() {
        if input.restart {
            state.restart();
            events.push(GameEvent::Restarted);
            events.push(GameEvent::LevelLoaded { level: 0 });
        }
    } else if let GamePhase::LevelTransition { ticks } = state.phase {
        let ticks = ticks.saturating_sub(1);
        if ticks == 0 {
            let next = state.level_index;
            state.load_level(next);
            state.phase = GamePhase::Playing;
            events.push(GameEvent::LevelLoaded { level: next });
        } else {
            state.phase = GamePhase::LevelTransition { ticks };
        }
        state.time_ticks += 1;
    } else if state.phase.is_simulating() {
        simulate(state, input, scale, &mut events);
    }

    // Ensure deterministic ordering
    state.normalize_order();

    FrameResult {
        telemetry: Telemetry::of(state),
        camera_offset: state.camera.offset_x,
        events,
    }
}

fn simulate(state: &mut GameState, input: &FrameInput, scale: f32, events: &mut Vec<GameEvent>) {
    let player = &mut state.player;
    let level = &mut state.level;

    // An attack started this frame already pins the player
    if input.attack && player.attack.trigger() {
        events.push(GameEvent::AttackStarted);
    }

    if player.attack.is_active() {
        player.body.set_intent(0.0);
    } else {
        // Right wins when both are held
        let intent = if input.move_right {
            Some(Facing::Right)
        } else if input.move_left {
            Some(Facing::Left)
        } else {
            None
        };
        match intent {
            Some(facing) => {
                player.facing = facing;
                player.body.set_intent(facing.sign() * PLAYER_SPEED);
            }
            None => player.body.set_intent(0.0),
        }
        if input.jump && player.body.try_jump() {
            events.push(GameEvent::Jumped);
        }
    }

    player.body.apply_gravity(scale);
    move_and_collide(&mut player.body, &level.platforms, scale);
    clamp_to_world(&mut player.body, level.length);

    advance_enemies(&mut level.enemies, scale);

    let coins_before = level.coins.len();
    for id in collect_coins(player, &mut level.coins) {
        events.push(GameEvent::CoinCollected { id });
    }
    for coin in &mut level.coins {
        coin.animate();
    }

    let vulnerable = !matches!(state.phase, GamePhase::PlayerHit { .. });
    let hit = HitContext {
        policy: state.settings.hit_policy,
        spawn: level.spawn,
        platforms: &level.platforms,
        world_width: level.length,
    };
    let contact = resolve_enemy_contacts(player, &mut level.enemies, vulnerable, &hit);
    for id in contact.defeated {
        events.push(GameEvent::EnemyDefeated { id });
    }
    let hurt = contact.hit_by.is_some();
    if hurt {
        log::debug!("Player hit, {} lives left", player.lives);
        events.push(GameEvent::PlayerHurt {
            lives_left: player.lives,
        });
    }

    player.attack.tick();

    if fell_off(player, state.settings.fall_limit()) {
        apply_fall(player, level.spawn);
        log::debug!("Player fell off, {} lives left", player.lives);
        events.push(GameEvent::FellOff {
            lives_left: player.lives,
        });
    }

    state.camera.follow(player.rect(), level.length);

    let level_cleared = coins_before > 0 && level.is_complete();
    let lives = player.lives;
    update_phase(state, lives, level_cleared, hurt, events);

    state.player.update_pose();
    state.time_ticks += 1;
}

/// Phase transitions, evaluated once at the end of a simulated frame
///
/// Running out of lives wins over clearing the level in the same frame.
fn update_phase(
    state: &mut GameState,
    lives: u32,
    level_cleared: bool,
    hurt: bool,
    events: &mut Vec<GameEvent>,
) {
    if lives == 0 {
        log::info!(
            "Game over on level {} with score {}",
            state.level_index + 1,
            state.player.score
        );
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver);
        return;
    }

    if level_cleared {
        let completed = state.level_index;
        state.level_index += 1;
        events.push(GameEvent::LevelComplete { level: completed });
        if state.level_index >= state.settings.level_count {
            log::info!("All {} levels cleared", state.settings.level_count);
            state.phase = GamePhase::GameWon;
            events.push(GameEvent::GameWon);
        } else {
            log::info!("Level {} complete", completed + 1);
            state.phase = GamePhase::LevelTransition {
                ticks: state.settings.level_transition_frames,
            };
        }
        return;
    }

    if hurt && state.settings.hit_invulnerability_frames > 0 {
        state.phase = GamePhase::PlayerHit {
            ticks: state.settings.hit_invulnerability_frames,
        };
        return;
    }

    if let GamePhase::PlayerHit { ticks } = state.phase {
        let ticks = ticks.saturating_sub(1);
        state.phase = if ticks == 0 {
            GamePhase::Playing
        } else {
            GamePhase::PlayerHit { ticks }
        };
    }
}
