//! Axis-aligned rectangle math — the one collision primitive every other
//! module builds on.  No state lives here.

/// World-space tile edge in pixels.  Levels are authored on this grid.
pub const TILE: f32 = 64.0;

/// Bounding-box edge shared by the player, enemies and pickups
/// (slightly smaller than a tile so entities fit through doorways).
pub const ENTITY_SIZE: f32 = TILE - 20.0;

/// Axis-aligned rectangle in continuous world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Rect { x, y, w, h }
    }

    /// Two rectangles intersect iff their projections overlap on both axes.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Euclidean distance between two points.
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = bx - ax;
    let dy = by - ay;
    (dx * dx + dy * dy).sqrt()
}

/// The bounding box used by the player and enemies at position `(x, y)`.
pub fn entity_rect(x: f32, y: f32) -> Rect {
    Rect::new(x, y, ENTITY_SIZE, ENTITY_SIZE)
}
