//! Per-frame simulation tick
//!
//! Advances every collection once, resolves collisions and handles phase
//! changes. Entities that end during a tick are only marked while the
//! collections are being walked; each collection is compacted once after
//! all reads are done.

use glam::Vec2;

use super::collision::{circle_overlap, circle_rect_overlap};
use super::entity::{Entity, FrameContext};
use super::particles::spawn_burst;
use super::state::{Direction, GameEvent, GamePhase, GameState};
use crate::consts::SCORE_PER_HIT;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position in playfield coordinates
    pub aim: Vec2,
    /// Most recent still-held movement key
    pub held: Option<Direction>,
    /// Click points to fire at, in arrival order
    pub fire: Vec<Vec2>,
    /// Start a new session if the current one is over
    pub restart: bool,
}

/// Advance the game state by one frame, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::Over {
        if !(input.restart || state.settings.auto_restart) {
            return events;
        }
        state.reset();
        log::info!("New session started");
        events.push(GameEvent::Restarted);
        events.push(GameEvent::ScoreChanged(state.score));
    }

    // Nothing moves while paused
    if state.phase == GamePhase::Paused {
        return events;
    }

    for &target in &input.fire {
        state.fire_at(target);
    }

    let mut ctx = FrameContext {
        held: input.held,
        aim: input.aim,
        player_center: state.player.center(),
        playfield: state.playfield,
    };

    // Projectiles: move, then mark anything that left through the top
    let mut spent_projectiles = vec![false; state.projectiles.len()];
    for (projectile, spent) in state.projectiles.iter_mut().zip(&mut spent_projectiles) {
        projectile.update(&ctx);
        *spent = projectile.is_offscreen();
    }

    for particle in &mut state.particles {
        particle.update(&ctx);
    }

    // Enemies: move, take hits from live projectiles, then check the player
    let player_rect = state.player.as_rect();
    let mut dead_enemies = vec![false; state.enemies.len()];
    let mut player_hit = false;

    for (enemy, dead) in state.enemies.iter_mut().zip(&mut dead_enemies) {
        enemy.update(&ctx);

        for (projectile, spent) in state.projectiles.iter().zip(&mut spent_projectiles) {
            if *spent || !circle_overlap(&projectile.as_circle(), &enemy.as_circle()) {
                continue;
            }

            *spent = true;
            state.score += SCORE_PER_HIT;
            events.push(GameEvent::ScoreChanged(state.score));
            spawn_burst(
                &mut state.particles,
                &mut state.rng,
                enemy.pos,
                Some(enemy.color),
                true,
            );

            let survived = enemy.take_hit();
            events.push(GameEvent::EnemyHit {
                pos: enemy.pos,
                destroyed: !survived,
            });
            if !survived {
                *dead = true;
                break;
            }
        }

        if !*dead && circle_rect_overlap(&enemy.as_circle(), &player_rect) {
            player_hit = true;
        }
    }

    compact(&mut state.projectiles, &spent_projectiles);
    compact(&mut state.enemies, &dead_enemies);
    state.particles.retain(|p| !p.is_spent());

    // Player, then the gun that rides on it
    state.player.update(&ctx);
    state.player.clamp_to(state.playfield);
    ctx.player_center = state.player.center();
    state.gun.update(&ctx);

    let interval = u64::from(state.settings.spawn_interval.max(1));
    if state.frames % interval == 0 {
        state.spawn_enemy();
    }
    state.frames += 1;

    if player_hit {
        state.phase = GamePhase::Over;
        log::info!("Game over at frame {} with score {}", state.frames, state.score);
        events.push(GameEvent::GameOver { score: state.score });
    }

    events
}

/// Drop every item whose flag is set, preserving the order of the rest
fn compact<T>(items: &mut Vec<T>, removed: &[bool]) {
    debug_assert_eq!(items.len(), removed.len());
    let mut flags = removed.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
