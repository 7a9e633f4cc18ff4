use cgmath::{Point3, Vector3, Zero};

use crate::{
    SceneObject,
    constants::{DEFAULT_DELTA, DEFAULT_MASS, GRID_HALF_EXTENT, GRID_SPACING},
    field::{FabricParams, grid::Grid},
    sim::Body,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegratorKind {
    /// Pairwise force ledger, mass-normalized impulses.
    Impulse,
    /// Star-dominated variant: direct accelerations with SI-like G.
    Accel,
}

/// Everything needed to start a run: initial bodies, the integrator flavor,
/// the per-tick time step, the fabric mesh, and the field tunables.
pub struct Scene {
    pub objects: Vec<SceneObject>,
    pub integrator: IntegratorKind,
    pub delta: f32,
    pub grid: Grid,
    pub fabric: FabricParams,
    /// Mass given to interactively spawned bodies.
    pub spawn_mass: f32,
}

/// Three equal bodies on a loose mutual orbit. The default scene.
pub fn three_body_dance() -> Scene {
    let objects = vec![
        SceneObject {
            name: "alpha".to_owned(),
            body: Body::new(
                Point3::new(-1.0, 0.0, 0.0),
                Vector3::new(0.0, 0.02, 0.0),
                20.0,
            ),
            color: [0.9, 0.3, 0.2],
            glow: false,
        },
        SceneObject {
            name: "beta".to_owned(),
            body: Body::new(
                Point3::new(1.0, 0.0, 0.0),
                Vector3::new(0.0, -0.02, 0.0),
                20.0,
            ),
            color: [0.2, 0.5, 0.9],
            glow: false,
        },
        SceneObject {
            name: "gamma".to_owned(),
            body: Body::new(
                Point3::new(0.0, 1.0, 0.0),
                Vector3::new(-0.02, 0.0, 0.0),
                20.0,
            ),
            color: [0.9, 0.8, 0.3],
            glow: false,
        },
    ];

    Scene {
        objects,
        integrator: IntegratorKind::Impulse,
        delta: DEFAULT_DELTA,
        grid: Grid::new(GRID_HALF_EXTENT, GRID_SPACING),
        fabric: FabricParams::default(),
        spawn_mass: 20.0,
    }
}

/// A glowing star and two planets on crossing tracks, run through the
/// acceleration-based integrator at planetary masses.
pub fn star_system() -> Scene {
    let objects = vec![
        SceneObject {
            name: "inner".to_owned(),
            body: Body::with_density(
                Point3::new(-5000.0, 650.0, -350.0),
                Vector3::new(30000.0, 15000.0, 0.0),
                5.97219e22,
                5515.0,
            ),
            color: [0.0, 1.0, 1.0],
            glow: false,
        },
        SceneObject {
            name: "outer".to_owned(),
            body: Body::with_density(
                Point3::new(5000.0, 650.0, -350.0),
                Vector3::new(15000.0, 30000.0, 0.0),
                5.97219e22,
                5515.0,
            ),
            color: [0.0, 1.0, 1.0],
            glow: false,
        },
        SceneObject {
            name: "star".to_owned(),
            body: Body::with_density(
                Point3::new(0.0, 0.0, -350.0),
                Vector3::zero(),
                1.989e25,
                8000.0,
            ),
            color: [1.0, 0.929, 0.176],
            glow: true,
        },
    ];

    Scene {
        objects,
        integrator: IntegratorKind::Accel,
        // Velocities are in grid units per raw second; the small step keeps
        // per-tick motion at a few units, like the original frame pacing.
        delta: DEFAULT_DELTA / 94.0,
        grid: Grid::new(GRID_HALF_EXTENT, 500.0),
        fabric: FabricParams {
            // Retardation delay across the scene must stay within the short
            // history span this scene's tiny step produces.
            signal_speed: 1.5e7,
            smoothing_radius: 1500.0,
            depth_scale: 5e-23,
        },
        spawn_mass: DEFAULT_MASS,
    }
}

/// A random cloud of light bodies slowly swirling around the origin.
pub fn random_debris(count: usize) -> Scene {
    assert!(count > 0, "debris scene needs at least one body");
    let mut objects = Vec::with_capacity(count);
    for i in 0..count {
        let pos = Point3::new(
            rand::random_range(-10.0..10.0),
            rand::random_range(-1.0..1.0),
            rand::random_range(-10.0..10.0),
        );
        // Roughly tangential, for a loose swirl rather than a collapse.
        let vel = Vector3::new(-pos.z, 0.0, pos.x) * 0.002
            + Vector3::new(
                rand::random_range(-0.005..0.005),
                rand::random_range(-0.005..0.005),
                rand::random_range(-0.005..0.005),
            );
        objects.push(SceneObject {
            name: format!("debris-{i}"),
            body: Body::new(pos, vel, rand::random_range(5.0..50.0)),
            color: [
                rand::random_range(0.3..1.0),
                rand::random_range(0.3..1.0),
                rand::random_range(0.3..1.0),
            ],
            glow: false,
        });
    }

    Scene {
        objects,
        integrator: IntegratorKind::Impulse,
        delta: DEFAULT_DELTA,
        grid: Grid::new(GRID_HALF_EXTENT, GRID_SPACING),
        fabric: FabricParams::default(),
        spawn_mass: 20.0,
    }
}
