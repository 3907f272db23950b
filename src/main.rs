//! Sidescroller headless runner
//!
//! Plays the simulation with a simple autopilot and logs what happens.
//! Usage: `sidescroller [settings.json] [host_frames]`
//! (set `RUST_LOG=info` or `debug` to see output).

use sidescroller::Settings;
use sidescroller::SettingsError;
use sidescroller::consts::SIM_DT;
use sidescroller::sim::{FrameClock, FrameInput, GameEvent, GameState, Telemetry, step};

/// Host frame rate the runner pretends to have
const HOST_DT: f32 = 1.0 / 30.0;
const DEFAULT_HOST_FRAMES: u32 = 30 * 120;
/// Attack when an enemy is this close ahead
const ATTACK_RANGE: f32 = 48.0;
/// Jump when this close to the end of the platform underfoot
const EDGE_MARGIN: f32 = 12.0;

fn main() -> Result<(), SettingsError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) if path != "-" => Settings::load(&path)?,
        _ => Settings::default(),
    };
    let host_frames = match args.next().map(|s| s.parse::<u32>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Bad frame count ({e}), using {DEFAULT_HOST_FRAMES}");
            DEFAULT_HOST_FRAMES
        }
        None => DEFAULT_HOST_FRAMES,
    };

    log::info!(
        "Sidescroller starting: {} levels, {} lives, hit policy {}, stats reset {}",
        settings.level_count,
        settings.starting_lives,
        settings.hit_policy.as_str(),
        settings.stats_reset.as_str()
    );

    let mut state = GameState::new(settings);
    let mut clock = FrameClock::new();

    'host: for frame in 0..host_frames {
        let steps = clock.advance(HOST_DT);
        for _ in 0..steps {
            let input = autopilot(&state);
            let result = step(&mut state, &input, SIM_DT);
            for event in &result.events {
                log_event(event);
            }
            if result.phase().is_terminal() {
                break 'host;
            }
        }

        if frame % 30 == 0 {
            let t = Telemetry::of(&state);
            log::debug!(
                "t={} level={} score={} lives={} phase={:?} camera={:.0}",
                state.time_ticks,
                t.level_index + 1,
                t.score,
                t.lives,
                t.phase,
                state.camera.offset_x
            );
        }
    }

    log::info!(
        "Finished after {} ticks: level {}, score {}, lives {}, {:?}",
        state.time_ticks,
        state.level_index + 1,
        state.player.score,
        state.player.lives,
        state.phase
    );
    Ok(())
}

/// Run right, jump at edges and walls, swing at nearby enemies
fn autopilot(state: &GameState) -> FrameInput {
    let player = state.player.rect();
    let platforms = &state.level.platforms;

    let underfoot = platforms
        .iter()
        .find(|p| p.rect.overlaps_x(player) && p.rect.top() == player.bottom());
    let near_edge = underfoot.is_some_and(|p| player.right() + EDGE_MARGIN >= p.rect.right());
    let wall_ahead = platforms.iter().any(|p| {
        p.rect.left() >= player.right()
            && p.rect.left() - player.right() < EDGE_MARGIN
            && p.rect.top() < player.bottom()
            && p.rect.bottom() > player.top()
    });
    let enemy_ahead = state.level.enemies.iter().any(|e| {
        let dx = e.rect().left() - player.right();
        (-player.width()..ATTACK_RANGE).contains(&dx)
            && e.rect().top() < player.bottom()
            && e.rect().bottom() > player.top()
    });

    FrameInput {
        move_right: true,
        jump: near_edge || wall_ahead,
        attack: enemy_ahead,
        ..Default::default()
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::CoinCollected { id } => log::debug!("Coin {id} collected"),
        GameEvent::EnemyDefeated { id } => log::info!("Enemy {id} defeated"),
        GameEvent::PlayerHurt { lives_left } => log::info!("Hurt, {lives_left} lives left"),
        GameEvent::FellOff { lives_left } => log::info!("Fell off, {lives_left} lives left"),
        GameEvent::LevelLoaded { level } => log::info!("Entered level {}", level + 1),
        GameEvent::Jumped | GameEvent::AttackStarted => log::trace!("{event:?}"),
        other => log::info!("{other:?}"),
    }
}
