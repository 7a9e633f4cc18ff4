use cgmath::InnerSpace;

use crate::{
    constants::{G_SI, METERS_PER_UNIT},
    sim::{Body, Integrator, collision},
};

/// Acceleration-based integrator for star-dominated scenes: separations are
/// converted to meters, the SI-like force is divided back out by the body's
/// own mass, and the resulting acceleration goes straight onto the velocity.
/// Collision damping runs inline, per ordered pair.
pub struct AccelIntegrator;

impl Integrator for AccelIntegrator {
    fn step(&mut self, bodies: &mut [Body], dt: f32) {
        for i in 0..bodies.len() {
            if bodies[i].is_held() {
                continue;
            }
            bodies[i].integrate(dt);

            for j in 0..bodies.len() {
                if j == i || bodies[j].is_held() {
                    continue;
                }
                let dir = bodies[j].pos - bodies[i].pos;
                let distance = dir.magnitude();
                if distance > 0.0 {
                    let dir = dir / distance;
                    let distance_m = (distance * METERS_PER_UNIT) as f64;
                    // Mass products overflow f32, so the force itself is f64.
                    let force = G_SI * bodies[i].mass() as f64 * bodies[j].mass() as f64
                        / (distance_m * distance_m);
                    let acceleration = (force / bodies[i].mass() as f64) as f32;
                    bodies[i].vel += dir * (acceleration * dt);
                }

                let factor = collision::collision_factor(&bodies[i], &bodies[j]);
                if factor < 1.0 {
                    bodies[i].vel *= factor;
                }
            }
        }
    }
}
