use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::Receiver,
    },
    time::{Duration, Instant},
};

use cgmath::{Point3, Vector3, Zero};
use log::info;

use crate::{
    constants::STEPS_PER_SECOND, exchange::FrameExchange, sim::Integrator, world::World,
};

/// Requests from the input layer to the simulation thread. Placement
/// commands target the most recently spawned held body.
#[derive(Debug, Clone)]
pub enum SimCommand {
    SpawnHeld { pos: Point3<f32>, mass: f32 },
    NudgeHeld(Vector3<f32>),
    GrowHeld(f32),
    Launch(Vector3<f32>),
}

#[derive(Debug, Default, Clone)]
pub struct KeyTrigger {
    pressed: bool,
    trigger: bool,
}

impl KeyTrigger {
    pub fn event(&mut self, is_pressed: bool) {
        match (self.pressed, is_pressed) {
            (true, true) => (),
            (true, false) => self.pressed = false,
            (false, true) => {
                self.pressed = true;
                self.trigger = true;
            }
            (false, false) => (),
        }
    }

    pub fn get_trigger(&mut self) -> bool {
        let t = self.trigger;
        self.trigger = false;
        t
    }
}

#[derive(Default, Clone)]
pub struct KeyboardState {
    pub w: bool,
    pub a: bool,
    pub s: bool,
    pub d: bool,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub plus: bool,
    pub minus: bool,
    pub shift: bool,
    pub grow: bool,
    pub speed_up: bool,
    pub slow_down: bool,
    pub pause: KeyTrigger,
    pub spawn: KeyTrigger,
    pub launch: KeyTrigger,
}

impl KeyboardState {
    pub fn any_dir(&self) -> bool {
        self.w || self.a || self.s || self.d
    }

    pub fn any_zoom(&self) -> bool {
        self.plus || self.minus
    }

    pub fn any_rot(&self) -> bool {
        self.up || self.down || self.right || self.left
    }
}

/// Body of the simulation thread: drain input commands, advance the world at
/// a fixed real-time tick rate, and publish a frame whenever the renderer
/// asks for one. Field sampling happens here, against the frame's settled
/// state, before the next step begins.
pub fn run_sim_loop<R: Integrator>(
    mut world: World<R>,
    points: Vec<Point3<f32>>,
    exchange: Arc<FrameExchange>,
    commands: Receiver<SimCommand>,
    token: Arc<AtomicBool>,
) {
    let mut held: Option<usize> = None;
    let mut tick = 0u64;
    let step = Duration::from_secs_f64(1.0 / STEPS_PER_SECOND as f64);
    let mut next_tick = Instant::now();

    info!("simulation loop started with {} bodies", world.bodies().len());

    loop {
        if token.load(Ordering::Relaxed) {
            break;
        }

        for cmd in commands.try_iter() {
            match cmd {
                SimCommand::SpawnHeld { pos, mass } => {
                    held = Some(world.spawn_held(pos, Vector3::zero(), mass));
                }
                SimCommand::NudgeHeld(delta) => {
                    if let Some(index) = held {
                        let pos = world.bodies()[index].pos + delta;
                        world.set_body_position(index, pos);
                    }
                }
                SimCommand::GrowHeld(factor) => {
                    if let Some(index) = held {
                        world.scale_body_mass(index, factor);
                    }
                }
                SimCommand::Launch(vel) => {
                    if let Some(index) = held.take() {
                        world.set_body_velocity(index, vel);
                        world.release_body(index);
                    }
                }
            }
        }

        if !exchange.paused() {
            world.step_physics(exchange.delta());
            tick += 1;
        }

        if exchange.should_store() {
            let heights = world.sample_heights(&points, world.now());
            exchange.store(world.bodies(), &heights, world.now(), tick);
        }

        next_tick += step;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else {
            // Fell behind; don't try to catch up.
            next_tick = now;
        }
    }

    info!("simulation loop terminated after {tick} ticks");
}
