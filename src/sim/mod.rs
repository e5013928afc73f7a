//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One tick per displayed frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond the `Canvas` sink

pub mod collision;
pub mod entity;
pub mod particles;
pub mod state;
pub mod tick;

pub use collision::{Circle, Rect, circle_overlap, circle_rect_overlap};
pub use entity::{Entity, FrameContext};
pub use particles::spawn_burst;
pub use state::{
    Direction, Enemy, EnemySpawn, GameEvent, GamePhase, GameState, Gun, Particle, ParticleSpec,
    Playfield, Player, Projectile, speed_for_radius,
};
pub use tick::{TickInput, tick};
