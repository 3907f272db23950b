//! Player interactions with coins and enemies
//!
//! Coins disappear on first contact. Enemy contact defeats the enemy while
//! the attack window is open and costs a life otherwise.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{clamp_to_world, resolve_horizontal};
use super::enemy::Enemy;
use super::rect::Aabb;
use super::state::{Coin, Platform, Player};
use crate::consts::ATTACK_DURATION;
use crate::settings::HitPolicy;

/// Attack gating: a fixed number of frames, not refreshed by re-triggering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttackWindow {
    /// Frames remaining; the attack is active while non-zero
    pub timer: u32,
}

impl AttackWindow {
    pub fn is_active(&self) -> bool {
        self.timer > 0
    }

    /// Open the window. No-op (returns false) if already open.
    pub fn trigger(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.timer = ATTACK_DURATION;
        true
    }

    /// Count down one frame
    pub fn tick(&mut self) {
        self.timer = self.timer.saturating_sub(1);
    }
}

/// Remove every coin touching the player, adding one point each
///
/// Returns the IDs collected this frame.
pub fn collect_coins(player: &mut Player, coins: &mut Vec<Coin>) -> Vec<u32> {
    let hitbox = *player.rect();
    let mut collected = Vec::new();
    coins.retain(|coin| {
        if hitbox.overlaps(&coin.rect) {
            collected.push(coin.id);
            false
        } else {
            true
        }
    });
    player.score += collected.len() as u32;
    collected
}

/// Outcome of touching enemies this frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnemyContact {
    /// Enemies destroyed by the attack
    pub defeated: Vec<u32>,
    /// The enemy that hurt the player, if any
    pub hit_by: Option<u32>,
}

/// Level geometry and rules a hit is resolved against
#[derive(Debug, Clone, Copy)]
pub struct HitContext<'a> {
    pub policy: HitPolicy,
    pub spawn: Vec2,
    pub platforms: &'a [Platform],
    pub world_width: f32,
}

/// Resolve contact between the player and live enemies
///
/// While attacking, every touched enemy is removed and the player is
/// unaffected. Otherwise the first touched enemy (in ID order) hurts the
/// player, unless `vulnerable` is false.
pub fn resolve_enemy_contacts(
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    vulnerable: bool,
    ctx: &HitContext<'_>,
) -> EnemyContact {
    let hitbox = *player.rect();
    let mut contact = EnemyContact::default();

    if player.attack.is_active() {
        enemies.retain(|enemy| {
            if hitbox.overlaps(enemy.rect()) {
                contact.defeated.push(enemy.id);
                false
            } else {
                true
            }
        });
        return contact;
    }

    if !vulnerable {
        return contact;
    }

    if let Some(enemy) = enemies.iter().find(|e| hitbox.overlaps(e.rect())) {
        contact.hit_by = Some(enemy.id);
        apply_hit(player, enemy.rect(), ctx);
    }
    contact
}

/// Take a life and move the player according to the hit policy
///
/// Knockback is a horizontal move through the platform resolver, so the
/// player stops at walls and world edges instead of entering them.
pub fn apply_hit(player: &mut Player, enemy: &Aabb, ctx: &HitContext<'_>) {
    player.lives = player.lives.saturating_sub(1);
    match ctx.policy {
        HitPolicy::Respawn => player.respawn(ctx.spawn),
        HitPolicy::Knockback { distance } => {
            let away = if player.rect().center().x < enemy.center().x {
                -1.0
            } else {
                1.0
            };
            let body = &mut player.body;
            body.vel = Vec2::new(away * distance, 0.0);
            resolve_horizontal(body, ctx.platforms, 1.0);
            clamp_to_world(body, ctx.world_width);
            body.vel = Vec2::ZERO;
            body.on_ground = false;
        }
    }
}

/// Has the player dropped below the fall limit (world space)?
pub fn fell_off(player: &Player, fall_limit: f32) -> bool {
    player.rect().top() > fall_limit
}

/// Take a life for falling and put the player back at the spawn point
pub fn apply_fall(player: &mut Player, spawn: Vec2) {
    player.lives = player.lives.saturating_sub(1);
    player.respawn(spawn);
}
