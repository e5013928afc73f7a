//! Hit feedback particles

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleSpec};
use crate::consts::{BURST_PARTICLES, PARTICLE_MAX_RADIUS, PARTICLE_MAX_SPEED};
use crate::{Color, colors, random_symmetric};

/// Append a burst of `BURST_PARTICLES` sparks at `origin`.
///
/// Each spark gets its own radius in `[0, PARTICLE_MAX_RADIUS)` and velocity
/// in `[-PARTICLE_MAX_SPEED, PARTICLE_MAX_SPEED)` per axis; position, color
/// and fading are shared.
pub fn spawn_burst<R: Rng>(
    particles: &mut Vec<Particle>,
    rng: &mut R,
    origin: Vec2,
    color: Option<Color>,
    fades: bool,
) {
    let color = color.unwrap_or(colors::PARTICLE_DEFAULT);
    particles.reserve(BURST_PARTICLES);
    for _ in 0..BURST_PARTICLES {
        let vel = Vec2::new(
            random_symmetric(rng, PARTICLE_MAX_SPEED),
            random_symmetric(rng, PARTICLE_MAX_SPEED),
        );
        let radius = rng.random::<f32>() * PARTICLE_MAX_RADIUS;
        particles.push(Particle::new(ParticleSpec {
            pos: origin,
            vel,
            radius,
            color,
            fades,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_burst_adds_exactly_ten() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::new(5.0, 6.0), None, true);
        assert_eq!(particles.len(), 10);
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, Some("#FF8066"), false);
        assert_eq!(particles.len(), 20);
    }

    #[test]
    fn test_burst_shares_origin_color_and_fade() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut particles = Vec::new();
        let origin = Vec2::new(300.0, 120.0);
        spawn_burst(&mut particles, &mut rng, origin, Some("#00C9A7"), true);

        for p in &particles {
            assert_eq!(p.pos, origin);
            assert_eq!(p.color, "#00C9A7");
            assert!(p.fades);
            assert_eq!(p.opacity, 1.0);
            assert!((0.0..3.0).contains(&p.radius));
            assert!((-1.0..1.0).contains(&p.vel.x));
            assert!((-1.0..1.0).contains(&p.vel.y));
        }
    }

    #[test]
    fn test_burst_default_color() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = Vec::new();
        spawn_burst(&mut particles, &mut rng, Vec2::ZERO, None, false);
        assert!(particles.iter().all(|p| p.color == colors::PARTICLE_DEFAULT));
        assert!(particles.iter().all(|p| !p.fades));
    }
}
