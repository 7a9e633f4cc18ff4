use cgmath::{Point3, Vector3};

use crate::constants::{DENSITY, SIZE_RATIO};

pub mod accel;
pub mod collision;
pub mod impulse;

/// A single massive body. Plain data, owned by the world's arena and
/// addressed by index everywhere else.
#[derive(Debug, Clone)]
pub struct Body {
    pub pos: Point3<f32>,
    pub vel: Vector3<f32>,
    mass: f32,
    density: f32,
    radius: f32,
    held: bool,
}

impl Body {
    pub fn new(pos: Point3<f32>, vel: Vector3<f32>, mass: f32) -> Self {
        Self::with_density(pos, vel, mass, DENSITY)
    }

    pub fn with_density(pos: Point3<f32>, vel: Vector3<f32>, mass: f32, density: f32) -> Self {
        assert!(mass > 0.0, "body mass must be positive, got {mass}");
        assert!(density > 0.0, "body density must be positive, got {density}");
        Self {
            pos,
            vel,
            mass,
            density,
            radius: derived_radius(mass, density),
            held: false,
        }
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Radius in grid units, derived from mass at the body's density.
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn set_mass(&mut self, mass: f32) {
        assert!(mass > 0.0, "body mass must be positive, got {mass}");
        self.mass = mass;
        self.radius = derived_radius(mass, self.density);
    }

    pub fn scale_mass(&mut self, factor: f32) {
        self.set_mass(self.mass * factor);
    }

    /// A held body is parked for interactive placement: it neither exerts nor
    /// receives forces until released.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn set_held(&mut self, held: bool) {
        self.held = held;
    }

    /// Impulse from an accumulated force over `dt`.
    pub(crate) fn apply_force(&mut self, force: Vector3<f32>, dt: f32) {
        self.vel += force * (dt / self.mass);
    }

    /// Forward-Euler position update.
    pub(crate) fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

fn derived_radius(mass: f32, density: f32) -> f32 {
    (3.0 * mass / (4.0 * std::f32::consts::PI * density)).cbrt() / SIZE_RATIO
}

/// One strategy for advancing the body set by a time step. Implementations
/// must fully resolve interactions for the step before the next one begins;
/// callers treat `step` as atomic.
pub trait Integrator: Send {
    fn step(&mut self, bodies: &mut [Body], dt: f32);
}
