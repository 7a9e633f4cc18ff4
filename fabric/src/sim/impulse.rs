use cgmath::{InnerSpace, Vector3, Zero};

use crate::{
    constants::{DISTANCE_EPSILON, G_SIM},
    sim::{Body, Integrator, collision},
    vec::normalize_or_zero,
};

/// Impulse-based integrator: inverse-square forces accumulated once per
/// unordered pair into a force ledger, then applied as `force * dt / mass`
/// followed by a forward-Euler position update.
pub struct ImpulseIntegrator {
    forces: Vec<Vector3<f32>>,
}

impl ImpulseIntegrator {
    pub fn new() -> Self {
        Self { forces: Vec::new() }
    }
}

impl Default for ImpulseIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

/// Pairwise force pass. Each unordered pair is computed once and applied
/// symmetrically, so the accumulated result is independent of iteration
/// order up to floating-point rounding.
pub fn accumulate_forces(bodies: &[Body], forces: &mut [Vector3<f32>]) {
    debug_assert_eq!(bodies.len(), forces.len());
    for i in 0..bodies.len() {
        if bodies[i].is_held() {
            continue;
        }
        for j in (i + 1)..bodies.len() {
            if bodies[j].is_held() {
                continue;
            }
            let dir = bodies[j].pos - bodies[i].pos;
            let distance = dir.magnitude() + DISTANCE_EPSILON;
            let fmag = G_SIM * bodies[i].mass() * bodies[j].mass() / (distance * distance);
            let force = normalize_or_zero(dir) * fmag;
            forces[i] += force;
            forces[j] -= force;
        }
    }
}

impl Integrator for ImpulseIntegrator {
    fn step(&mut self, bodies: &mut [Body], dt: f32) {
        self.forces.resize(bodies.len(), Vector3::zero());
        accumulate_forces(bodies, &mut self.forces);

        for (body, force) in bodies.iter_mut().zip(self.forces.iter_mut()) {
            if !body.is_held() {
                body.apply_force(*force, dt);
                body.integrate(dt);
            }
            // The ledger is kept for the next step, but has to start from zero.
            *force = Vector3::zero();
        }

        collision::damp_overlaps(bodies);
    }
}
