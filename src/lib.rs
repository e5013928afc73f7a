//! Orb Shooter - a canvas arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `input`: Translates discrete input events into per-tick commands
//! - `renderer`: Render/score sink contracts and the frame renderer
//! - `settings`: Typed configuration

pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1024.0;
    pub const PLAYFIELD_HEIGHT: f32 = 576.0;

    /// Player rectangle
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Gap between the player's bottom edge and the playfield floor at spawn
    pub const PLAYER_FLOOR_GAP: f32 = 10.0;
    /// Per-tick movement while a direction is held
    pub const PLAYER_SPEED: f32 = 3.0;

    /// Gun barrel
    pub const GUN_WIDTH: f32 = 35.0;
    pub const GUN_HEIGHT: f32 = 15.0;

    /// Projectiles
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;

    /// Enemy radius range (inclusive)
    pub const ENEMY_MIN_SPAWN_RADIUS: i32 = 10;
    pub const ENEMY_MAX_SPAWN_RADIUS: i32 = 50;
    /// Maximum horizontal spawn speed (symmetric)
    pub const ENEMY_MAX_SPAWN_VX: i32 = 2;
    /// Radius lost per projectile hit
    pub const ENEMY_SHRINK: f32 = 10.0;
    /// Enemies at or below this radius after a hit are destroyed
    pub const ENEMY_MIN_RADIUS: f32 = 10.0;
    /// Horizontal clearance between the player and a freshly spawned enemy
    pub const ENEMY_SPAWN_GAP: f32 = 2.0;

    /// Particle burst
    pub const BURST_PARTICLES: usize = 10;
    pub const PARTICLE_MAX_RADIUS: f32 = 3.0;
    pub const PARTICLE_MAX_SPEED: f32 = 1.0;
    /// Opacity lost per tick by fading particles
    pub const PARTICLE_FADE_STEP: f32 = 0.01;

    /// Frames between enemy spawns
    pub const SPAWN_INTERVAL: u32 = 100;
    /// Points per projectile hit
    pub const SCORE_PER_HIT: u64 = 10;
    /// Alpha of the black full-canvas fill that produces motion trails
    pub const TRAIL_ALPHA: f32 = 0.4;
}

/// Colors are CSS color strings handed straight to the render sink
pub type Color = &'static str;

/// Entity colors
pub mod colors {
    use super::Color;

    /// Enemy palette, picked uniformly at spawn
    pub const PALETTE: [Color; 5] = ["#845EC2", "#00C9A7", "#C4FCEF", "#93F8B3", "#FF8066"];
    pub const PLAYER: Color = "whitesmoke";
    pub const PROJECTILE: Color = "whitesmoke";
    pub const GUN: Color = "grey";
    /// Particle color when the caller has none
    pub const PARTICLE_DEFAULT: Color = "#BAA0DE";
    pub const BACKGROUND: Color = "black";
}

/// Uniform integer in `[min, max]` (both inclusive)
#[inline]
pub fn random_int<R: Rng>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

/// Uniform float in `[-half_span, half_span)`
#[inline]
pub fn random_symmetric<R: Rng>(rng: &mut R, half_span: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * 2.0 * half_span
}
