use cgmath::{EuclideanSpace, InnerSpace, Point3};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    constants::{DEPTH_SCALE, HISTORY_CAPACITY, SIGNAL_SPEED, SMOOTHING_RADIUS},
    sim::Body,
};

pub mod grid;
pub mod history;

use history::{HistoryBuffer, HistorySample};

/// Tunables for the deformation field.
#[derive(Debug, Clone, Copy)]
pub struct FabricParams {
    /// Propagation speed of gravitational influence.
    pub signal_speed: f32,
    /// Kernel support radius.
    pub smoothing_radius: f32,
    /// Scale from kernel-weighted mass to vertical displacement.
    pub depth_scale: f32,
}

impl Default for FabricParams {
    fn default() -> Self {
        Self {
            signal_speed: SIGNAL_SPEED,
            smoothing_radius: SMOOTHING_RADIUS,
            depth_scale: DEPTH_SCALE,
        }
    }
}

/// The space-time fabric: per-body motion history plus the retarded-time
/// potential field sampled over it. Holds no body state of its own; every
/// query takes the current body arena by reference and only reads it.
#[derive(Debug)]
pub struct Fabric {
    history: HistoryBuffer,
    params: FabricParams,
}

impl Fabric {
    pub fn new(num_bodies: usize) -> Self {
        Self::with_params(num_bodies, FabricParams::default())
    }

    pub fn with_params(num_bodies: usize, params: FabricParams) -> Self {
        Self {
            history: HistoryBuffer::new(num_bodies, HISTORY_CAPACITY),
            params,
        }
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Record one sample per body; call right after each integration step.
    pub fn record(&mut self, now: f32, bodies: &[Body]) {
        self.history.record(now, bodies);
    }

    /// Register and seed history for a body just pushed onto the arena, so
    /// queries never observe an empty sequence.
    pub fn record_spawned(&mut self, now: f32, body: &Body) {
        self.history.push_body();
        self.history.record_one(self.history.num_bodies() - 1, now, body);
    }

    /// Where the field point "sees" body `index` at time `now`, given that
    /// influence travels at the configured signal speed. The light-travel
    /// distance is estimated from the body's current position rather than
    /// solved self-consistently; a first-order approximation, kept as is.
    pub fn retarded_position(
        &self,
        bodies: &[Body],
        index: usize,
        field_point: Point3<f32>,
        now: f32,
    ) -> Point3<f32> {
        let buf = self.history.samples(index);
        assert!(
            !buf.is_empty(),
            "history for body {index} queried before the first record"
        );
        if buf.len() < 2 {
            return buf.back().expect("non-empty").pos;
        }

        let approx_r = (bodies[index].pos - field_point).magnitude();
        let t_ret = now - approx_r / self.params.signal_speed;

        // Bracket t_ret between consecutive samples; past the newest sample
        // the last two are reused, extrapolating forward.
        let mut idx = 0;
        while idx + 1 < buf.len() && buf[idx + 1].t < t_ret {
            idx += 1;
        }
        let s0 = &buf[idx];
        let s1 = &buf[(idx + 1).min(buf.len() - 1)];

        let dt = s1.t - s0.t;
        // Duplicate-timestamp guard.
        let u = if dt > 1e-6 { (t_ret - s0.t) / dt } else { 0.0 };
        hermite(s0, s1, u)
    }

    /// Compactly supported smoothstep-shaped kernel: 1 at r = 0, 0 at and
    /// beyond the smoothing radius, with a continuous first derivative at
    /// both ends.
    pub fn kernel(&self, r: f32) -> f32 {
        let q = r / self.params.smoothing_radius;
        if q >= 1.0 {
            return 0.0;
        }
        1.0 - 3.0 * q * q + 2.0 * q * q * q
    }

    /// Scalar deformation at a field point: kernel-weighted mass of every
    /// body at its retarded position, negated and scaled for display.
    pub fn potential_at(&self, bodies: &[Body], point: Point3<f32>, now: f32) -> f32 {
        assert!(!bodies.is_empty(), "field sampled before any body exists");
        let mut pot = 0.0;
        for (index, body) in bodies.iter().enumerate() {
            let apparent = self.retarded_position(bodies, index, point, now);
            let r = (apparent - point).magnitude();
            pot += body.mass() * self.kernel(r);
        }
        -pot * self.params.depth_scale
    }

    /// Sample the field at many points at once. Reads body and history state
    /// only, so the points are processed in parallel.
    pub fn sample_heights(&self, bodies: &[Body], points: &[Point3<f32>], now: f32) -> Vec<f32> {
        points
            .par_iter()
            .map(|point| self.potential_at(bodies, *point, now))
            .collect()
    }
}

/// Cubic Hermite between two samples, with tangents taken from the recorded
/// velocities scaled by the sample spacing. Exact at both endpoints.
fn hermite(s0: &HistorySample, s1: &HistorySample, u: f32) -> Point3<f32> {
    let dt = s1.t - s0.t;
    let u2 = u * u;
    let u3 = u2 * u;

    let h00 = 2.0 * u3 - 3.0 * u2 + 1.0;
    let h10 = u3 - 2.0 * u2 + u;
    let h01 = -2.0 * u3 + 3.0 * u2;
    let h11 = u3 - u2;

    let m0 = s0.vel * dt;
    let m1 = s1.vel * dt;

    Point3::from_vec(s0.pos.to_vec() * h00 + m0 * h10 + s1.pos.to_vec() * h01 + m1 * h11)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cgmath::{Point3, Vector3};

    use super::{Fabric, FabricParams, hermite};
    use crate::field::history::HistorySample;

    fn test_fabric(num_bodies: usize) -> Fabric {
        Fabric::with_params(
            num_bodies,
            FabricParams {
                signal_speed: 1.0,
                smoothing_radius: 1.5,
                depth_scale: 0.02,
            },
        )
    }

    #[test]
    fn kernel_endpoints_and_support() {
        let fabric = test_fabric(0);
        assert_eq!(fabric.kernel(0.0), 1.0);
        assert_eq!(fabric.kernel(1.5), 0.0);
        assert_eq!(fabric.kernel(2.0), 0.0);
        assert_eq!(fabric.kernel(100.0), 0.0);
    }

    #[test]
    fn kernel_is_monotone_on_support() {
        let fabric = test_fabric(0);
        let mut prev = fabric.kernel(0.0);
        for step in 1..=100 {
            let r = 1.5 * step as f32 / 100.0;
            let k = fabric.kernel(r);
            assert!(
                k <= prev + 1e-6,
                "kernel must not increase: k({r}) = {k} > {prev}"
            );
            assert!((0.0..=1.0).contains(&k));
            prev = k;
        }
    }

    #[test]
    fn hermite_hits_endpoints_exactly() {
        let s0 = HistorySample {
            t: 0.0,
            pos: Point3::new(-2.0, 1.0, 3.0),
            vel: Vector3::new(5.0, -1.0, 0.5),
        };
        let s1 = HistorySample {
            t: 1.0,
            pos: Point3::new(4.0, 0.0, -1.0),
            vel: Vector3::new(-2.0, 2.0, 1.0),
        };
        assert_eq!(hermite(&s0, &s1, 0.0), s0.pos);
        assert_eq!(hermite(&s0, &s1, 1.0), s1.pos);
    }

    #[test]
    fn hermite_reproduces_linear_motion() {
        // Constant velocity: the cubic degenerates to the straight line.
        let s0 = HistorySample {
            t: 0.0,
            pos: Point3::new(0.0, 0.0, 0.0),
            vel: Vector3::new(1.0, 0.0, 0.0),
        };
        let s1 = HistorySample {
            t: 1.0,
            pos: Point3::new(1.0, 0.0, 0.0),
            vel: Vector3::new(1.0, 0.0, 0.0),
        };
        let mid = hermite(&s0, &s1, 0.5);
        assert_relative_eq!(mid.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(mid.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(mid.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn duplicate_timestamps_collapse_to_first_sample() {
        let s0 = HistorySample {
            t: 2.0,
            pos: Point3::new(1.0, 0.0, 0.0),
            vel: Vector3::new(9.0, 9.0, 9.0),
        };
        let s1 = HistorySample { t: 2.0, ..s0 };
        // u = 0 is forced by the caller when dt < 1e-6; with u = 0 the result
        // is s0.pos regardless of the degenerate tangents.
        assert_eq!(hermite(&s0, &s1, 0.0), s0.pos);
    }
}
