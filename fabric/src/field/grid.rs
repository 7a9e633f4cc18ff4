use cgmath::Point3;

/// Fixed fabric mesh: a square lattice of sample points in the y = 0 plane,
/// `2 * half_extent + 1` points per side, row-major over (i, j) cell
/// coordinates in `-half_extent..=half_extent`.
#[derive(Debug, Clone)]
pub struct Grid {
    half_extent: i32,
    spacing: f32,
}

impl Grid {
    pub fn new(half_extent: i32, spacing: f32) -> Self {
        assert!(half_extent > 0, "grid needs at least one cell per side");
        assert!(spacing > 0.0, "grid spacing must be positive");
        Self {
            half_extent,
            spacing,
        }
    }

    pub fn half_extent(&self) -> i32 {
        self.half_extent
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Points per side.
    pub fn side(&self) -> usize {
        (2 * self.half_extent + 1) as usize
    }

    pub fn num_points(&self) -> usize {
        self.side() * self.side()
    }

    /// Flat index of cell coordinate (i, j).
    pub fn index(&self, i: i32, j: i32) -> usize {
        debug_assert!(i.abs() <= self.half_extent && j.abs() <= self.half_extent);
        let side = self.side();
        let row = (i + self.half_extent) as usize;
        let col = (j + self.half_extent) as usize;
        row * side + col
    }

    pub fn point(&self, i: i32, j: i32) -> Point3<f32> {
        Point3::new(i as f32 * self.spacing, 0.0, j as f32 * self.spacing)
    }

    /// All sample points, in `index` order.
    pub fn points(&self) -> Vec<Point3<f32>> {
        let mut points = Vec::with_capacity(self.num_points());
        for i in -self.half_extent..=self.half_extent {
            for j in -self.half_extent..=self.half_extent {
                points.push(self.point(i, j));
            }
        }
        points
    }
}
