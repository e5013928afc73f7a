//! Game state and core simulation types
//!
//! Everything the loop mutates lives in one owned `GameState`, so tests can
//! run as many independent sessions as they like.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{Circle, Rect};
use crate::consts::*;
use crate::settings::Settings;
use crate::{Color, colors, random_int};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Simulation advances every tick
    Active,
    /// Simulation frozen until the pause key is pressed again
    Paused,
    /// An enemy touched the player
    Over,
}

/// Things that happened during a tick, for sinks outside the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    /// Score changed (also emitted when a session starts)
    ScoreChanged(u64),
    /// A projectile struck an enemy
    EnemyHit { pos: Vec2, destroyed: bool },
    /// Session ended
    GameOver { score: u64 },
    /// Session reinitialized after game over
    Restarted,
}

/// Playfield bounds, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Movement intent from one held key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Velocity for moving in this direction at `speed` (y grows downward)
    pub fn velocity(self, speed: f32) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -speed),
            Direction::Down => Vec2::new(0.0, speed),
            Direction::Left => Vec2::new(-speed, 0.0),
            Direction::Right => Vec2::new(speed, 0.0),
        }
    }
}

/// The player's square
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
}

impl Player {
    /// Player centered horizontally, resting just above the floor
    pub fn new(playfield: Playfield) -> Self {
        let size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
        Self {
            pos: Vec2::new(
                playfield.width / 2.0 - size.x / 2.0,
                playfield.height - size.y - PLAYER_FLOOR_GAP,
            ),
            vel: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Keep the whole square inside the playfield
    pub fn clamp_to(&mut self, playfield: Playfield) {
        let max = Vec2::new(playfield.width - self.size.x, playfield.height - self.size.y);
        self.pos = self.pos.clamp(Vec2::ZERO, max.max(Vec2::ZERO));
    }
}

/// Cosmetic barrel that follows the player and points at the cursor
#[derive(Debug, Clone, Serialize)]
pub struct Gun {
    /// Pivot point (the player's center)
    pub pos: Vec2,
    /// Radians, 0 = pointing right
    pub angle: f32,
    pub size: Vec2,
}

impl Gun {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            size: Vec2::new(GUN_WIDTH, GUN_HEIGHT),
        }
    }

    /// Angle from the pivot toward `target` (atan2 gives 0 when they coincide)
    pub fn aim_angle(&self, target: Vec2) -> f32 {
        let d = target - self.pos;
        d.y.atan2(d.x)
    }
}

/// A bullet fired toward a click point
#[derive(Debug, Clone, Serialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn new(origin: Vec2, vel: Vec2) -> Self {
        Self {
            pos: origin,
            vel,
            radius: PROJECTILE_RADIUS,
        }
    }

    /// Projectile leaving `origin` toward `target` at the fixed speed
    pub fn aimed(origin: Vec2, target: Vec2) -> Self {
        let d = target - origin;
        let angle = d.y.atan2(d.x);
        Self::new(
            origin,
            Vec2::new(angle.cos(), angle.sin()) * PROJECTILE_SPEED,
        )
    }

    pub fn as_circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Left through the top of the playfield
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.y <= 0.0
    }
}

/// Enemy speed band: smaller orbs fall faster
pub fn speed_for_radius(radius: f32) -> f32 {
    if radius < 20.0 {
        10.0
    } else if radius < 30.0 {
        8.0
    } else if radius < 40.0 {
        6.0
    } else {
        4.0
    }
}

/// Randomly rolled traits of a new enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemySpawn {
    pub radius: f32,
    pub vel_x: f32,
    pub color: Color,
}

impl EnemySpawn {
    pub fn roll(rng: &mut Pcg32) -> Self {
        let radius = random_int(rng, ENEMY_MIN_SPAWN_RADIUS, ENEMY_MAX_SPAWN_RADIUS) as f32;
        let vel_x = random_int(rng, -ENEMY_MAX_SPAWN_VX, ENEMY_MAX_SPAWN_VX) as f32;
        let color = colors::PALETTE[random_int(rng, 0, colors::PALETTE.len() as i32 - 1) as usize];
        Self {
            radius,
            vel_x,
            color,
        }
    }
}

/// A bouncing orb
#[derive(Debug, Clone, Serialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Enemy {
    /// Place a new enemy just right of the player, tangent to the ceiling
    pub fn spawn(spawn: EnemySpawn, player: &Player, playfield: Playfield) -> Self {
        let radius = spawn.radius;
        let rightmost = playfield.width - radius - ENEMY_SPAWN_GAP;
        let x = if player.pos.x + player.size.x >= playfield.width {
            rightmost
        } else {
            (player.pos.x + player.size.x / 2.0 + radius + ENEMY_SPAWN_GAP).min(rightmost)
        };

        Self {
            pos: Vec2::new(x, radius),
            vel: Vec2::new(spawn.vel_x, speed_for_radius(radius)),
            radius,
            color: spawn.color,
        }
    }

    pub fn as_circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    /// Apply one projectile hit. Returns true if the enemy survives.
    pub fn take_hit(&mut self) -> bool {
        if self.radius - ENEMY_SHRINK > ENEMY_MIN_RADIUS {
            self.radius -= ENEMY_SHRINK;
            true
        } else {
            false
        }
    }
}

/// Construction parameters for a particle
#[derive(Debug, Clone, Copy)]
pub struct ParticleSpec {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub fades: bool,
}

/// A spark of hit feedback
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    /// 1.0 when spawned; fading particles lose `PARTICLE_FADE_STEP` per tick
    pub opacity: f32,
    pub fades: bool,
}

impl Particle {
    pub fn new(spec: ParticleSpec) -> Self {
        Self {
            pos: spec.pos,
            vel: spec.vel,
            radius: spec.radius,
            color: spec.color,
            opacity: 1.0,
            fades: spec.fades,
        }
    }

    #[inline]
    pub fn is_spent(&self) -> bool {
        self.opacity <= 0.0
    }
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the session RNG was created from
    pub seed: u64,
    /// Spawn/particle randomness
    #[serde(skip)]
    pub rng: Pcg32,
    #[serde(skip)]
    pub settings: Settings,
    pub playfield: Playfield,
    pub phase: GamePhase,
    pub score: u64,
    /// Ticks since the session (re)started
    pub frames: u64,
    pub player: Player,
    pub gun: Gun,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub particles: Vec<Particle>,
}

impl GameState {
    /// New session with default settings
    pub fn new(seed: u64) -> Self {
        Self::with_settings(Settings::default(), seed)
    }

    pub fn with_settings(settings: Settings, seed: u64) -> Self {
        let playfield = settings.playfield();
        let player = Player::new(playfield);
        let gun = Gun::new(player.center());
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            playfield,
            phase: GamePhase::Active,
            score: 0,
            frames: 0,
            player,
            gun,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            particles: Vec::new(),
        }
    }

    /// Start a fresh session in place. The RNG keeps its stream so
    /// consecutive sessions differ.
    pub fn reset(&mut self) {
        self.player = Player::new(self.playfield);
        self.gun = Gun::new(self.player.center());
        self.projectiles.clear();
        self.enemies.clear();
        self.particles.clear();
        self.score = 0;
        self.frames = 0;
        self.phase = GamePhase::Active;
    }

    /// Flip between Active and Paused; returns the resulting phase
    pub fn toggle_pause(&mut self) -> GamePhase {
        self.phase = match self.phase {
            GamePhase::Active => {
                log::info!("Paused at frame {}", self.frames);
                GamePhase::Paused
            }
            GamePhase::Paused => {
                log::info!("Resumed at frame {}", self.frames);
                GamePhase::Active
            }
            GamePhase::Over => GamePhase::Over,
        };
        self.phase
    }

    /// Spawn one enemy next to the player
    pub fn spawn_enemy(&mut self) {
        let spawn = EnemySpawn::roll(&mut self.rng);
        let enemy = Enemy::spawn(spawn, &self.player, self.playfield);
        log::debug!(
            "Enemy spawned: r={} at x={} vel=({}, {})",
            enemy.radius,
            enemy.pos.x,
            enemy.vel.x,
            enemy.vel.y
        );
        self.enemies.push(enemy);
    }

    /// Fire one projectile from the player's center toward `target`
    pub fn fire_at(&mut self, target: Vec2) {
        self.projectiles
            .push(Projectile::aimed(self.player.center(), target));
    }
}
