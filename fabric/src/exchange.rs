use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use crate::sim::Body;

/// What the renderer needs to know about one body for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodySnapshot {
    pub pos: [f32; 3],
    pub radius: f32,
    pub held: bool,
}

/// One published frame: body snapshots, fabric heights in grid order, and
/// the simulation clock they were sampled at.
#[derive(Debug, Clone)]
pub struct FrameSample {
    pub bodies: Vec<BodySnapshot>,
    pub heights: Vec<f32>,
    pub now: f32,
}

impl FrameSample {
    pub fn new(num_bodies: usize, num_points: usize) -> Self {
        Self {
            bodies: vec![BodySnapshot::default(); num_bodies],
            heights: vec![0.0; num_points],
            now: 0.0,
        }
    }
}

/// Primitive for communicating between simulation and graphics threads.
/// The simulation publishes at most one frame per render request; shared
/// tunables (step delta, pause) live here as atomics.
pub struct FrameExchange {
    sample: Mutex<FrameSample>,
    should_sample: AtomicBool,
    simulation_tick: AtomicU64,
    delta: AtomicU32,
    paused: AtomicBool,
}

impl FrameExchange {
    pub fn new(num_bodies: usize, num_points: usize, delta: f32) -> Self {
        Self {
            sample: Mutex::new(FrameSample::new(num_bodies, num_points)),
            should_sample: AtomicBool::new(true),
            simulation_tick: AtomicU64::new(0),
            delta: AtomicU32::new(delta.to_bits()),
            paused: AtomicBool::new(true),
        }
    }

    pub fn delta(&self) -> f32 {
        f32::from_bits(self.delta.load(Ordering::Relaxed))
    }

    pub fn set_delta(&self, delta: f32) {
        self.delta.store(delta.to_bits(), Ordering::Relaxed);
    }

    pub fn paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    pub fn set_paused(&self, paused: bool) {
        self.paused.store(paused, Ordering::Relaxed);
    }

    /// Whether the renderer has consumed the last frame and wants a new one.
    pub fn should_store(&self) -> bool {
        self.should_sample
            .compare_exchange_weak(true, false, Ordering::Relaxed, Ordering::Relaxed)
            .is_ok()
    }

    /// Publish one frame of body state and fabric heights.
    pub fn store(&self, bodies: &[Body], heights: &[f32], now: f32, tick: u64) {
        self.simulation_tick.store(tick, Ordering::Relaxed);
        let mut data = self.sample.lock().unwrap();
        data.now = now;
        data.bodies.resize(bodies.len(), BodySnapshot::default());
        for (snap, body) in data.bodies.iter_mut().zip(bodies) {
            snap.pos = [body.pos.x, body.pos.y, body.pos.z];
            snap.radius = body.radius();
            snap.held = body.is_held();
        }
        data.heights.clear();
        data.heights.extend_from_slice(heights);
    }

    /// Retrieve the latest frame and request a new one from the simulation.
    pub fn sample(&self, out: &mut FrameSample) {
        let data = self.sample.lock().unwrap();
        out.clone_from(&data);
        self.should_sample.store(true, Ordering::Relaxed);
    }

    pub fn current_ticks(&self) -> u64 {
        self.simulation_tick.load(Ordering::Relaxed)
    }
}
