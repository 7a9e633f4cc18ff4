use cgmath::InnerSpace;

use crate::{constants::COLLISION_DAMPING, sim::Body};

/// Overlap test: the damping factor when the spheres intersect, `1.0`
/// otherwise.
pub fn collision_factor(a: &Body, b: &Body) -> f32 {
    let distance = (b.pos - a.pos).magnitude();
    if a.radius() + b.radius() > distance {
        COLLISION_DAMPING
    } else {
        1.0
    }
}

/// Ordered-pair collision scan: body i is damped once for every body it
/// currently overlaps, so a body touching two others in one step is damped
/// twice. Do not collapse this to unordered pairs.
pub fn damp_overlaps(bodies: &mut [Body]) {
    for i in 0..bodies.len() {
        if bodies[i].is_held() {
            continue;
        }
        for j in 0..bodies.len() {
            if j == i || bodies[j].is_held() {
                continue;
            }
            let factor = collision_factor(&bodies[i], &bodies[j]);
            if factor < 1.0 {
                bodies[i].vel *= factor;
            }
        }
    }
}
