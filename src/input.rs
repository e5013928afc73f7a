//! Input adapter
//!
//! Turns discrete browser-style events into the persistent aim/held-key
//! state and the one-shot commands the next tick consumes.

use glam::Vec2;

use crate::sim::{Direction, TickInput};

/// A recognized key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Move(Direction),
    Pause,
    Restart,
}

impl Key {
    /// Map a `KeyboardEvent.code` string to a key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" | "ArrowUp" => Some(Key::Move(Direction::Up)),
            "KeyS" | "ArrowDown" => Some(Key::Move(Direction::Down)),
            "KeyA" | "ArrowLeft" => Some(Key::Move(Direction::Left)),
            "KeyD" | "ArrowRight" => Some(Key::Move(Direction::Right)),
            "Space" => Some(Key::Pause),
            "Enter" => Some(Key::Restart),
            _ => None,
        }
    }
}

/// Input events in canvas-local coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove(Vec2),
    Click(Vec2),
    KeyDown(Key),
    KeyUp(Key),
}

/// Currently held movement keys, most recently pressed first
#[derive(Debug, Clone, Default)]
pub struct HeldDirections {
    stack: Vec<Direction>,
}

impl HeldDirections {
    /// Record a press; repeats of an already-held key are ignored
    pub fn press(&mut self, dir: Direction) {
        if !self.stack.contains(&dir) {
            self.stack.insert(0, dir);
        }
    }

    pub fn release(&mut self, dir: Direction) {
        self.stack.retain(|&d| d != dir);
    }

    /// The direction that wins this tick, if any
    pub fn current(&self) -> Option<Direction> {
        self.stack.first().copied()
    }
}

/// Accumulated input between ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub aim: Vec2,
    pub held: HeldDirections,
    fire: Vec<Vec2>,
    restart: bool,
}

impl InputState {
    /// Apply one event. Returns true for a pause toggle, which the caller
    /// handles right away because a paused game schedules no ticks.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::PointerMove(pos) => self.aim = pos,
            InputEvent::Click(pos) => self.fire.push(pos),
            InputEvent::KeyDown(Key::Move(dir)) => self.held.press(dir),
            InputEvent::KeyUp(Key::Move(dir)) => self.held.release(dir),
            InputEvent::KeyDown(Key::Pause) => return true,
            InputEvent::KeyDown(Key::Restart) => self.restart = true,
            InputEvent::KeyUp(_) => {}
        }
        false
    }

    /// Forget clicks and restart requests queued while no ticks were running
    pub fn discard_pending(&mut self) {
        self.fire.clear();
        self.restart = false;
    }

    /// Build the next tick's input, draining one-shot commands
    pub fn take_tick_input(&mut self) -> TickInput {
        TickInput {
            aim: self.aim,
            held: self.held.current(),
            fire: std::mem::take(&mut self.fire),
            restart: std::mem::take(&mut self.restart),
        }
    }
}
