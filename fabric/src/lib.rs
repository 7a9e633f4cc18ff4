pub mod camera;
pub mod constants;
pub mod event_loop;
pub mod exchange;
pub mod field;
pub mod presets;
pub mod sim;
pub mod ui;
pub mod vec;
pub mod world;

pub use event_loop::{SimCommand, run_sim_loop};
pub use exchange::{FrameExchange, FrameSample};
pub use field::{Fabric, FabricParams, grid::Grid};
pub use sim::{Body, Integrator, accel::AccelIntegrator, impulse::ImpulseIntegrator};
pub use world::World;

/// A body together with its rendering description. The simulation core only
/// ever sees the `body` part; color and glow are consumed by the UI layer,
/// keyed by arena index.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub body: Body,
    pub color: [f32; 3],
    pub glow: bool,
}
