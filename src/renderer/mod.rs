//! Rendering
//!
//! The simulation draws through the `Canvas` trait; the browser build plugs
//! in a 2D canvas context, tests and the native runner record commands.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::{Canvas2d, DomScore};

use glam::Vec2;
use serde::Serialize;

use crate::sim::{Entity, GameEvent, GameState};
use crate::{Color, colors};

/// Primitive draw operations the game needs
pub trait Canvas {
    /// Cover the whole canvas with `color` at `alpha` (motion-trail clear)
    fn fade(&mut self, color: Color, alpha: f32);
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32);
    /// Rectangle at `offset` in a frame translated to `origin` and rotated by `angle`
    fn fill_rect_rotated(&mut self, origin: Vec2, angle: f32, offset: Vec2, size: Vec2, color: Color);
}

/// Receives score display updates
pub trait ScoreSink {
    fn set_score(&mut self, score: u64);
}

impl ScoreSink for Vec<u64> {
    fn set_score(&mut self, score: u64) {
        self.push(score);
    }
}

/// A recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawCommand {
    Fade {
        color: Color,
        alpha: f32,
    },
    Rect {
        pos: Vec2,
        size: Vec2,
        color: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        opacity: f32,
    },
    RotatedRect {
        origin: Vec2,
        angle: f32,
        offset: Vec2,
        size: Vec2,
        color: Color,
    },
}

/// Canvas that records every call
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Canvas for CommandBuffer {
    fn fade(&mut self, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Fade { color, alpha });
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::Rect { pos, size, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            opacity,
        });
    }

    fn fill_rect_rotated(&mut self, origin: Vec2, angle: f32, offset: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::RotatedRect {
            origin,
            angle,
            offset,
            size,
            color,
        });
    }
}

/// Draw one frame: trail fade, then every entity
pub fn render(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.fade(colors::BACKGROUND, state.settings.trail_alpha);

    for projectile in &state.projectiles {
        projectile.render(canvas);
    }
    for particle in &state.particles {
        particle.render(canvas);
    }
    for enemy in &state.enemies {
        enemy.render(canvas);
    }
    state.player.render(canvas);
    state.gun.render(canvas);
}

/// Forward score changes from a tick's events to the score display
pub fn publish_score(events: &[GameEvent], sink: &mut dyn ScoreSink) {
    for event in events {
        if let GameEvent::ScoreChanged(score) = event {
            sink.set_score(*score);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Projectile, TickInput, tick};

    #[test]
    fn test_render_fresh_state() {
        let state = GameState::new(1);
        let mut buf = CommandBuffer::default();
        render(&state, &mut buf);

        assert_eq!(buf.commands.len(), 3);
        assert_eq!(
            buf.commands[0],
            DrawCommand::Fade {
                color: colors::BACKGROUND,
                alpha: 0.4
            }
        );
        assert_eq!(
            buf.commands[1],
            DrawCommand::Rect {
                pos: Vec2::new(492.0, 526.0),
                size: Vec2::new(40.0, 40.0),
                color: colors::PLAYER,
            }
        );
        assert!(matches!(buf.commands[2], DrawCommand::RotatedRect { .. }));
    }

    #[test]
    fn test_render_draws_every_entity_once() {
        let mut state = GameState::new(2);
        state.frames = 1;
        state.projectiles.push(Projectile::new(Vec2::new(10.0, 10.0), Vec2::ZERO));
        state.spawn_enemy();
        state.spawn_enemy();
        crate::sim::spawn_burst(&mut state.particles, &mut state.rng, Vec2::ZERO, None, true);

        let mut buf = CommandBuffer::default();
        render(&state, &mut buf);

        let circles = buf
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count();
        assert_eq!(circles, 1 + 2 + 10);
        assert!(matches!(buf.commands[0], DrawCommand::Fade { .. }));
    }

    #[test]
    fn test_publish_score_forwards_changes_only() {
        let events = [
            GameEvent::ScoreChanged(10),
            GameEvent::EnemyHit {
                pos: Vec2::ZERO,
                destroyed: false,
            },
            GameEvent::ScoreChanged(20),
            GameEvent::GameOver { score: 20 },
        ];
        let mut scores: Vec<u64> = Vec::new();
        publish_score(&events, &mut scores);
        assert_eq!(scores, vec![10, 20]);
    }

    #[test]
    fn test_hit_reaches_score_sink() {
        let mut state = GameState::new(3);
        state.frames = 1;
        let at = Vec2::new(250.0, 250.0);
        state.enemies.push(crate::sim::Enemy {
            pos: at,
            vel: Vec2::ZERO,
            radius: 40.0,
            color: colors::PALETTE[0],
        });
        state.projectiles.push(Projectile::new(at, Vec2::ZERO));

        let mut scores: Vec<u64> = Vec::new();
        let events = tick(&mut state, &TickInput::default());
        publish_score(&events, &mut scores);
        assert_eq!(scores, vec![10]);
    }
}
