/// Axis-aligned geometry in world pixels.
///
/// The whole game runs on integer pixel coordinates in a fixed 800x600
/// world; the renderer scales down to terminal cells at draw time.

pub const WORLD_W: i32 = 800;
pub const WORLD_H: i32 = 600;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn at(pos: Point, w: i32, h: i32) -> Self {
        Rect { x: pos.x, y: pos.y, w, h }
    }

    /// Half-open interval overlap on both axes.
    /// Rectangles that merely touch along an edge do NOT intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_detected() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn disjoint_rects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(20, 0, 10, 10);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        // b starts exactly where a ends on X
        let b = Rect::new(10, 0, 10, 10);
        assert!(!a.intersects(&b));
        // Same for Y
        let c = Rect::new(0, 10, 10, 10);
        assert!(!a.intersects(&c));
        // Corner touch
        let d = Rect::new(10, 10, 10, 10);
        assert!(!a.intersects(&d));
    }

    #[test]
    fn containment_intersects() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(40, 40, 10, 10);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn overlap_on_one_axis_only_is_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 30, 10, 10); // X overlaps, Y far away
        assert!(!a.intersects(&b));
    }
}
