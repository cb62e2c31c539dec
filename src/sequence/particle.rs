use crate::content::IconType;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::Rng64;

/// One scattering icon at the finale.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    /// 0-based position in the card list.
    pub id: usize,
    /// Spawn point; every particle starts at the emission origin.
    pub origin: Point,
    pub velocity: Vec2,
    pub icon: IconType,
}

impl Particle {
    /// Offset from the origin once fully scattered, with `scale` pixels per velocity unit.
    pub fn displacement(&self, scale: f64) -> Vec2 {
        self.velocity * scale
    }
}

/// Supplies the velocity of the `index`-th particle of a batch.
pub trait VelocitySource {
    fn velocity(&mut self, index: usize) -> Vec2;
}

/// Uniform random velocities: `vx` in `[-50, 50)`, `vy` in `[-100, 0)` (biased upward).
#[derive(Clone, Debug)]
pub struct SeededVelocities {
    rng: Rng64,
}

impl SeededVelocities {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Rng64::new(seed),
        }
    }
}

impl VelocitySource for SeededVelocities {
    fn velocity(&mut self, _index: usize) -> Vec2 {
        let vx = (self.rng.next_f64_01() - 0.5) * 100.0;
        let vy = (self.rng.next_f64_01() - 0.5) * 100.0 - 50.0;
        Vec2::new(vx, vy)
    }
}

/// Pre-supplied velocities by index; zero past the end of the list.
#[derive(Clone, Debug, Default)]
pub struct FixedVelocities {
    values: Vec<Vec2>,
}

impl FixedVelocities {
    pub fn new(values: Vec<Vec2>) -> Self {
        Self { values }
    }
}

impl VelocitySource for FixedVelocities {
    fn velocity(&mut self, index: usize) -> Vec2 {
        self.values.get(index).copied().unwrap_or(Vec2::ZERO)
    }
}

impl<V: VelocitySource + ?Sized> VelocitySource for Box<V> {
    fn velocity(&mut self, index: usize) -> Vec2 {
        (**self).velocity(index)
    }
}

/// Build one particle per icon, in order.
pub fn spawn_particles(icons: &[IconType], source: &mut impl VelocitySource) -> Vec<Particle> {
    icons
        .iter()
        .enumerate()
        .map(|(id, &icon)| Particle {
            id,
            origin: Point::ORIGIN,
            velocity: source.velocity(id),
            icon,
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/particle.rs"]
mod tests;
