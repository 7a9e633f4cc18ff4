use cgmath::{Point3, Vector3};

use crate::{
    field::Fabric,
    sim::{Body, Integrator},
};

/// Owner of all simulation state: the body arena, the fabric (history +
/// field), the simulation clock, and the integration strategy. Bodies are
/// addressed by stable index; nothing outside the world holds a reference
/// to one.
pub struct World<R> {
    bodies: Vec<Body>,
    fabric: Fabric,
    integrator: R,
    now: f32,
}

impl<R: Integrator> World<R> {
    pub fn new(bodies: Vec<Body>, integrator: R) -> Self {
        let fabric = Fabric::new(bodies.len());
        Self::with_fabric(bodies, integrator, fabric)
    }

    pub fn with_fabric(bodies: Vec<Body>, integrator: R, fabric: Fabric) -> Self {
        assert_eq!(
            fabric.history().num_bodies(),
            bodies.len(),
            "fabric must be sized for the body arena"
        );
        let mut world = Self {
            bodies,
            fabric,
            integrator,
            now: 0.0,
        };
        // Seed history so field queries are valid from the first frame.
        world.fabric.record(0.0, &world.bodies);
        world
    }

    /// Advance one frame: integrate forces and collisions, bump the clock,
    /// record history. Callers never observe a half-applied step.
    pub fn step_physics(&mut self, dt: f32) {
        self.integrator.step(&mut self.bodies, dt);
        self.now += dt;
        self.fabric.record(self.now, &self.bodies);
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn fabric(&self) -> &Fabric {
        &self.fabric
    }

    /// Vertical fabric displacement at a field point.
    pub fn sample_fabric_height(&self, point: Point3<f32>, now: f32) -> f32 {
        self.fabric.potential_at(&self.bodies, point, now)
    }

    /// Displacements for a whole batch of field points, sampled in parallel
    /// against this frame's (immutable) state.
    pub fn sample_heights(&self, points: &[Point3<f32>], now: f32) -> Vec<f32> {
        self.fabric.sample_heights(&self.bodies, points, now)
    }

    pub fn spawn_body(&mut self, pos: Point3<f32>, vel: Vector3<f32>, mass: f32) -> usize {
        self.bodies.push(Body::new(pos, vel, mass));
        let index = self.bodies.len() - 1;
        self.fabric.record_spawned(self.now, &self.bodies[index]);
        index
    }

    /// Spawn a body parked for interactive placement; it stays out of the
    /// physics pass until [`World::release_body`].
    pub fn spawn_held(&mut self, pos: Point3<f32>, vel: Vector3<f32>, mass: f32) -> usize {
        let index = self.spawn_body(pos, vel, mass);
        self.bodies[index].set_held(true);
        index
    }

    pub fn release_body(&mut self, index: usize) {
        self.bodies[index].set_held(false);
    }

    pub fn set_body_position(&mut self, index: usize, pos: Point3<f32>) {
        self.bodies[index].pos = pos;
    }

    pub fn set_body_velocity(&mut self, index: usize, vel: Vector3<f32>) {
        self.bodies[index].vel = vel;
    }

    pub fn scale_body_mass(&mut self, index: usize, factor: f32) {
        self.bodies[index].scale_mass(factor);
    }
}
