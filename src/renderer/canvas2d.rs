//! Browser sinks: a 2D canvas context and the DOM score label

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, Element};

use super::{Canvas, ScoreSink};
use crate::Color;

/// `Canvas` backed by a `CanvasRenderingContext2d`
pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Canvas2d {
    pub fn new(ctx: CanvasRenderingContext2d, width: f32, height: f32) -> Self {
        Self {
            ctx,
            width: width.into(),
            height: height.into(),
        }
    }
}

impl Canvas for Canvas2d {
    fn fade(&mut self, color: Color, alpha: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(alpha.into());
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        self.ctx.restore();
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(pos.x.into(), pos.y.into(), size.x.into(), size.y.into());
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, opacity: f32) {
        self.ctx.save();
        self.ctx.set_global_alpha(opacity.into());
        self.ctx.begin_path();
        if let Err(e) = self.ctx.arc(
            center.x.into(),
            center.y.into(),
            radius.max(0.0).into(),
            0.0,
            std::f64::consts::TAU,
        ) {
            log::warn!("arc failed: {e:?}");
        }
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        self.ctx.close_path();
        self.ctx.restore();
    }

    fn fill_rect_rotated(&mut self, origin: Vec2, angle: f32, offset: Vec2, size: Vec2, color: Color) {
        self.ctx.save();
        let placed = self
            .ctx
            .translate(origin.x.into(), origin.y.into())
            .and_then(|_| self.ctx.rotate(angle.into()));
        match placed {
            Ok(()) => {
                self.ctx.set_fill_style_str(color);
                self.ctx.fill_rect(
                    offset.x.into(),
                    offset.y.into(),
                    size.x.into(),
                    size.y.into(),
                );
            }
            Err(e) => log::warn!("transform failed: {e:?}"),
        }
        self.ctx.restore();
    }
}

/// Score label in the page
pub struct DomScore {
    el: Element,
}

impl DomScore {
    pub fn new(el: Element) -> Self {
        Self { el }
    }
}

impl ScoreSink for DomScore {
    fn set_score(&mut self, score: u64) {
        self.el.set_text_content(Some(&score.to_string()));
    }
}
