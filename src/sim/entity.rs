//! Per-frame update/render contract shared by every entity kind

use glam::Vec2;

use super::state::{Direction, Enemy, Gun, Particle, Playfield, Player, Projectile};
use crate::colors;
use crate::consts::{PARTICLE_FADE_STEP, PLAYER_SPEED};
use crate::renderer::Canvas;

/// Read-only view of the frame an entity updates in
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Most recent still-held movement key
    pub held: Option<Direction>,
    /// Cursor position in playfield coordinates
    pub aim: Vec2,
    /// Center of the player after this frame's movement
    pub player_center: Vec2,
    pub playfield: Playfield,
}

/// Something that advances once per tick and can draw itself
pub trait Entity {
    fn update(&mut self, ctx: &FrameContext);
    fn render(&self, canvas: &mut dyn Canvas);
}

impl Entity for Player {
    /// Velocity is re-derived every tick; nothing held means standing still.
    /// Clamping is left to the caller.
    fn update(&mut self, ctx: &FrameContext) {
        self.vel = ctx
            .held
            .map(|dir| dir.velocity(PLAYER_SPEED))
            .unwrap_or(Vec2::ZERO);
        self.pos += self.vel;
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.pos, self.size, colors::PLAYER);
    }
}

impl Entity for Gun {
    fn update(&mut self, ctx: &FrameContext) {
        self.angle = self.aim_angle(ctx.aim);
        self.pos = ctx.player_center;
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        // Barrel extends from the pivot along the angle, centered vertically
        let offset = Vec2::new(0.0, -self.size.y / 2.0);
        canvas.fill_rect_rotated(self.pos, self.angle, offset, self.size, colors::GUN);
    }
}

impl Entity for Projectile {
    fn update(&mut self, _ctx: &FrameContext) {
        self.pos += self.vel;
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.pos, self.radius, colors::PROJECTILE, 1.0);
    }
}

impl Entity for Enemy {
    /// Move, then bounce off any wall the circle's edge has reached.
    /// Each axis flips at most once per tick.
    fn update(&mut self, ctx: &FrameContext) {
        self.pos += self.vel;

        let field = ctx.playfield;
        if self.pos.x + self.radius >= field.width || self.pos.x - self.radius <= 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + self.radius >= field.height || self.pos.y - self.radius <= 0.0 {
            self.vel.y = -self.vel.y;
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.pos, self.radius, self.color, 1.0);
    }
}

impl Entity for Particle {
    fn update(&mut self, _ctx: &FrameContext) {
        self.pos += self.vel;
        if self.fades {
            self.opacity -= PARTICLE_FADE_STEP;
        }
    }

    fn render(&self, canvas: &mut dyn Canvas) {
        canvas.fill_circle(self.pos, self.radius, self.color, self.opacity.max(0.0));
    }
}
