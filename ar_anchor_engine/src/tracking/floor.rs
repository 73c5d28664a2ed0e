use glam::Mat4;

/// Lowest horizontal-plane height observed this session.
///
/// Absent until the first plane event, then only ever moves down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FloorReference {
    lowest_y: Option<f32>,
}

impl FloorReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current floor height, if any plane has been seen
    pub fn height(&self) -> Option<f32> {
        self.lowest_y
    }

    /// Record a plane height. Returns true when the floor moved down.
    pub fn observe_height(&mut self, y: f32) -> bool {
        match self.lowest_y {
            Some(current) if y >= current => false,
            _ => {
                self.lowest_y = Some(y);
                true
            }
        }
    }

    /// Record a detected plane by its world transform
    pub fn observe_plane(&mut self, plane_transform: &Mat4) -> bool {
        self.observe_height(plane_transform.w_axis.y)
    }

    pub fn clear(&mut self) {
        self.lowest_y = None;
    }
}
