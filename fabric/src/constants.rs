// PHYSICAL
/// Gravitational constant for the impulse integrator. Not SI; scaled so that
/// unit-sized orbits stay visually stable.
pub const G_SIM: f32 = 6.6743e-2;
/// SI-like gravitational constant for the acceleration integrator, applied
/// after converting separations to meters.
pub const G_SI: f64 = 6.6743e-10;
/// One grid unit in meters, for the acceleration integrator.
pub const METERS_PER_UNIT: f32 = 1000.0;
/// Padding added to pair distances to avoid division by zero for coincident
/// bodies.
pub const DISTANCE_EPSILON: f32 = 1e-10;
/// Mass density used to derive body radii, in kg/m^3.
pub const DENSITY: f32 = 3344.0;
/// Divisor mapping a physical radius to grid units.
pub const SIZE_RATIO: f32 = 30000.0;
/// Velocity factor applied to a body on overlap: reverses direction and
/// scales speed down to a fifth.
pub const COLLISION_DAMPING: f32 = -0.2;
/// Mass given to interactively spawned bodies before the user grows them.
pub const DEFAULT_MASS: f32 = 1e22;

// FABRIC
/// Propagation speed of gravitational influence across the fabric. A tunable,
/// not the physical speed of light.
pub const SIGNAL_SPEED: f32 = 0.1;
/// Support radius of the smoothing kernel.
pub const SMOOTHING_RADIUS: f32 = 1.5;
/// Samples of (time, position, velocity) retained per body.
pub const HISTORY_CAPACITY: usize = 5;
/// Scale from summed kernel-weighted mass to vertical grid displacement.
pub const DEPTH_SCALE: f32 = 0.02;
/// Grid extends this many cells from the origin along +x/-x and +z/-z.
pub const GRID_HALF_EXTENT: i32 = 20;
/// Distance between neighboring grid points.
pub const GRID_SPACING: f32 = 1.0;

// SIMULATION
/// Simulation time advanced per tick, in seconds.
pub const DEFAULT_DELTA: f32 = 1.0 / 60.0;
/// Real-time tick rate of the simulation thread.
pub const STEPS_PER_SECOND: u32 = 240;
/// Fractional mass growth per second while a held body is being inflated.
pub const MASS_GROWTH_RATE: f32 = 1.0;
