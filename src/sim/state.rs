//! Game state and core simulation types
//!
//! The session owns the player, the current level and the camera. A level's
//! entities are dropped wholesale when the next one loads; the player is
//! reset, never recreated.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;
use super::camera::Camera;
use super::enemy::Enemy;
use super::interact::AttackWindow;
use super::level::{Level, generate_level};
use super::rect::{Aabb, Bounded};
use crate::consts::*;
use crate::settings::{Settings, StatsReset};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Level cleared, next one loads when the timer runs out
    LevelTransition { ticks: u32 },
    /// Took a non-lethal hit; enemy contact is ignored until the timer runs out
    PlayerHit { ticks: u32 },
    /// Out of lives
    GameOver,
    /// Every level cleared
    GameWon,
}

impl GamePhase {
    /// Whether physics and interactions run this frame
    pub fn is_simulating(&self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::PlayerHit { .. })
    }

    /// GameOver and GameWon only respond to restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::GameWon)
    }
}

/// Horizontal facing / patrol direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Player animation pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerPose {
    #[default]
    Idle,
    /// Run cycle frame, 1..=3
    Run(u8),
    Jump,
    Attack,
}

/// Frames between run-cycle advances
const RUN_FRAME_TICKS: u32 = 8;
/// Frames between coin animation advances
const COIN_FRAME_TICKS: u32 = 10;
pub const COIN_FRAMES: u8 = 4;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: PhysicsBody,
    pub facing: Facing,
    pub lives: u32,
    pub score: u32,
    pub attack: AttackWindow,
    /// Presentation only
    pub pose: PlayerPose,
    pub frame_timer: u32,
}

impl Player {
    pub fn new(lives: u32) -> Self {
        Self {
            body: PhysicsBody::new(Aabb::new(0.0, 0.0, PLAYER_WIDTH, PLAYER_HEIGHT)),
            facing: Facing::Right,
            lives,
            score: 0,
            attack: AttackWindow::default(),
            pose: PlayerPose::Idle,
            frame_timer: 0,
        }
    }

    pub fn rect(&self) -> &Aabb {
        &self.body.rect
    }

    /// Put the player at `pos` (top-left) with no motion and no active attack
    pub fn respawn(&mut self, pos: Vec2) {
        self.body.reset_to(pos);
        self.attack = AttackWindow::default();
    }

    /// Pick the pose for this frame
    pub fn update_pose(&mut self) {
        self.pose = if self.attack.is_active() {
            self.frame_timer = 0;
            PlayerPose::Attack
        } else if !self.body.on_ground {
            self.frame_timer = 0;
            PlayerPose::Jump
        } else if self.body.vel.x != 0.0 {
            let frame = match self.pose {
                PlayerPose::Run(frame) => frame,
                _ => 1,
            };
            self.frame_timer += 1;
            if self.frame_timer >= RUN_FRAME_TICKS {
                self.frame_timer = 0;
                PlayerPose::Run(frame % 3 + 1)
            } else {
                PlayerPose::Run(frame)
            }
        } else {
            self.frame_timer = 0;
            PlayerPose::Idle
        };
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub rect: Aabb,
    pub frame: u8,
    pub frame_timer: u32,
}

impl Coin {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            rect: Aabb::new(pos.x, pos.y, COIN_SIZE, COIN_SIZE),
            frame: 0,
            frame_timer: 0,
        }
    }

    pub fn animate(&mut self) {
        self.frame_timer += 1;
        if self.frame_timer >= COIN_FRAME_TICKS {
            self.frame_timer = 0;
            self.frame = (self.frame + 1) % COIN_FRAMES;
        }
    }
}

/// A static platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub rect: Aabb,
}

impl Bounded for Player {
    fn aabb(&self) -> Aabb {
        self.body.rect
    }
}

impl Bounded for Coin {
    fn aabb(&self) -> Aabb {
        self.rect
    }
}

impl Bounded for Platform {
    fn aabb(&self) -> Aabb {
        self.rect
    }
}

/// Events raised during a frame, for audio and HUD collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    AttackStarted,
    CoinCollected { id: u32 },
    EnemyDefeated { id: u32 },
    PlayerHurt { lives_left: u32 },
    FellOff { lives_left: u32 },
    LevelComplete { level: u32 },
    LevelLoaded { level: u32 },
    GameOver,
    GameWon,
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub settings: Settings,
    /// Current level index (0-based)
    pub level_index: u32,
    pub phase: GamePhase,
    pub player: Player,
    pub level: Level,
    pub camera: Camera,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session and load the first level
    pub fn new(settings: Settings) -> Self {
        let mut state = Self {
            player: Player::new(settings.starting_lives),
            camera: Camera::new(settings.viewport_width),
            settings,
            level_index: 0,
            phase: GamePhase::Playing,
            level: Level::default(),
            time_ticks: 0,
            next_id: 1,
        };
        state.load_level(0);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Replace the current level with a freshly generated one
    ///
    /// The player is moved to the spawn point; score and lives reset only
    /// under [`StatsReset::OnLevelLoad`].
    pub fn load_level(&mut self, index: u32) {
        let data = generate_level(index);
        let mut level = Level {
            index,
            length: data.length,
            spawn: data.spawn,
            ..Level::default()
        };
        for &origin in &data.platforms {
            let id = self.next_entity_id();
            level.platforms.push(Platform {
                id,
                rect: Aabb::new(origin.x, origin.y, PLATFORM_WIDTH, PLATFORM_HEIGHT),
            });
        }
        for &origin in &data.coins {
            let id = self.next_entity_id();
            level.coins.push(Coin::new(id, origin));
        }
        for spawn in &data.enemies {
            let id = self.next_entity_id();
            level.enemies.push(Enemy::from_spawn(id, spawn));
        }

        log::info!(
            "Level {}: length={}, platforms={}, coins={}, enemies={}",
            index + 1,
            level.length,
            level.platforms.len(),
            level.coins.len(),
            level.enemies.len()
        );

        self.level = level;
        self.level_index = index;
        if self.settings.stats_reset == StatsReset::OnLevelLoad {
            self.reset_stats();
        }
        self.player.respawn(self.level.spawn);
        self.camera.reset();
        self.camera.follow(self.player.rect(), self.level.length);
    }

    /// Back to level 0 with fresh lives and score
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        self.reset_stats();
        self.load_level(0);
        self.phase = GamePhase::Playing;
    }

    fn reset_stats(&mut self) {
        self.player.lives = self.settings.starting_lives;
        self.player.score = 0;
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.level.platforms.sort_by_key(|p| p.id);
        self.level.coins.sort_by_key(|c| c.id);
        self.level.enemies.sort_by_key(|e| e.id);
    }
}
