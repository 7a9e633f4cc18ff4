use cgmath::{InnerSpace, Vector3};

/// Like [`InnerSpace::normalize`], but maps the zero vector to itself
/// instead of producing NaN.
pub fn normalize_or_zero(v: Vector3<f32>) -> Vector3<f32> {
    let len = v.magnitude();
    if len > 0.0 { v / len } else { v }
}
