use cgmath::{Deg, InnerSpace, Matrix3, Matrix4, Point3, Rad, Vector3, Zero, perspective};

use crate::event_loop::KeyboardState;

/// CPU-side camera: look-at view plus perspective projection, rebuilt lazily
/// when navigation changes it. Movement speed scales with the scene extent so
/// the same keys work for unit-sized and planetary scenes.
pub struct Camera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: f32,
    speed: f32,
    matrix: Matrix4<f32>,
    changed: bool,
}

impl Camera {
    /// `extent` is the scene half-width the camera should frame initially.
    pub fn new(extent: f32) -> Self {
        Self {
            eye: Point3::new(0.0, extent * 0.9, extent * 1.5),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::unit_y(),
            aspect: 1.0,
            fovy: 45.0,
            speed: extent * 0.01,
            matrix: Matrix4::from_scale(1.0),
            changed: true,
        }
    }

    pub fn resize(&mut self, aspect: f32) {
        if self.aspect != aspect {
            self.aspect = aspect;
            self.changed = true;
        }
    }

    pub fn view_proj(&mut self) -> Matrix4<f32> {
        if self.changed {
            self.matrix = perspective(Deg(self.fovy), self.aspect, self.speed, self.speed * 1e6)
                * Matrix4::look_at_rh(self.eye, self.target, self.up);
            self.changed = false;
        }
        self.matrix
    }

    /// Apparent pixel size of a world-space radius at clip depth `w`.
    pub fn screen_radius(&self, radius: f32, w: f32, viewport_height: f32) -> f32 {
        let e = 1.0 / (Rad::from(Deg(self.fovy)).0 * 0.5).tan();
        radius * e / w * viewport_height * 0.5
    }

    pub fn move_relative(&mut self, keys: &KeyboardState) {
        if !keys.any_dir() {
            return;
        }

        let look_dir = (self.target - self.eye).normalize();
        let look_lr = self.up.cross(look_dir);

        let mut rel = Vector3::zero();
        if keys.a {
            rel += look_lr * self.speed;
        }
        if keys.w {
            rel += self.up * self.speed;
        }
        if keys.s {
            rel -= self.up * self.speed;
        }
        if keys.d {
            rel -= look_lr * self.speed;
        }
        self.target += rel;
        self.eye += rel;

        self.changed = true;
    }

    pub fn zoom(&mut self, keys: &KeyboardState) {
        if !keys.any_zoom() {
            return;
        }

        let look_dir = (self.target - self.eye).normalize();

        let mut rel = Vector3::zero();
        if keys.plus {
            rel += look_dir * self.speed * 3.0;
        }
        if keys.minus {
            rel -= look_dir * self.speed * 3.0;
        }
        self.target += rel;
        self.eye += rel;

        self.changed = true;
    }

    /// Orbit the eye around the target: left/right yaw about `up`, up/down
    /// pitch about the screen-horizontal axis.
    pub fn rot(&mut self, keys: &KeyboardState) {
        if !keys.any_rot() {
            return;
        }

        const ROT_STEP: Rad<f32> = Rad(0.02);

        let mut rel = self.eye - self.target;
        if keys.left {
            rel = Matrix3::from_axis_angle(self.up, ROT_STEP) * rel;
        }
        if keys.right {
            rel = Matrix3::from_axis_angle(self.up, -ROT_STEP) * rel;
        }
        if keys.up || keys.down {
            let right = rel.cross(self.up);
            if right.magnitude() > 0.0 {
                let right = right.normalize();
                let angle = if keys.up { ROT_STEP } else { -ROT_STEP };
                rel = Matrix3::from_axis_angle(right, angle) * rel;
            }
        }
        self.eye = self.target + rel;

        self.changed = true;
    }
}

/// Project a world point into a viewport of the given size. Returns pixel
/// coordinates plus the clip-space depth, or `None` for points at or behind
/// the eye plane.
pub fn project(
    view_proj: &Matrix4<f32>,
    point: Point3<f32>,
    width: f32,
    height: f32,
) -> Option<(f32, f32, f32)> {
    let clip = view_proj * point.to_homogeneous();
    if clip.w <= 0.0 {
        return None;
    }
    let x = (clip.x / clip.w * 0.5 + 0.5) * width;
    let y = (0.5 - clip.y / clip.w * 0.5) * height;
    Some((x, y, clip.w))
}
