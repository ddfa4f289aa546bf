/// Maze model: the fixed wall layout for every level.
///
/// A single hardcoded set of 40 rectangles (an enclosing border plus
/// internal corridors, symmetric left-right) in the 800x600 world.
/// The layout never changes between levels; only the pickups and the
/// pursuers are reset on level advance.

use super::geom::Rect;

pub struct Maze {
    walls: Vec<Rect>,
}

impl Maze {
    /// The classic layout. Immutable for the lifetime of the maze.
    pub fn classic() -> Self {
        Maze { walls: classic_walls() }
    }

    /// Build a maze from an explicit wall list.
    pub fn from_walls(walls: Vec<Rect>) -> Self {
        Maze { walls }
    }

    pub fn walls(&self) -> &[Rect] {
        &self.walls
    }

    /// Does any wall intersect the candidate rectangle?
    pub fn blocks(&self, rect: &Rect) -> bool {
        self.walls.iter().any(|w| rect.intersects(w))
    }
}

fn classic_walls() -> Vec<Rect> {
    let w = |x, y, w, h| Rect::new(x, y, w, h);
    vec![
        // Enclosing border
        w(0, 0, 800, 20),
        w(0, 0, 20, 600),
        w(780, 0, 20, 600),
        w(0, 580, 800, 20),
        // Upper corridors
        w(560, 40, 160, 20),
        w(320, 40, 160, 20),
        w(80, 80, 20, 100),
        w(700, 80, 20, 100),
        w(200, 80, 160, 20),
        w(440, 80, 160, 20),
        w(320, 100, 160, 20),
        // Mid band
        w(120, 200, 80, 20),
        w(600, 200, 80, 20),
        w(320, 200, 160, 20),
        w(400, 240, 20, 60),
        w(200, 260, 160, 20),
        w(440, 260, 160, 20),
        w(320, 300, 160, 20),
        w(80, 300, 20, 100),
        w(700, 300, 20, 100),
        w(400, 320, 20, 80),
        // Lower band
        w(320, 400, 160, 20),
        w(80, 480, 160, 20),
        w(560, 480, 160, 20),
        w(200, 400, 20, 80),
        w(580, 400, 20, 80),
        w(120, 520, 80, 20),
        w(600, 520, 80, 20),
        w(320, 480, 160, 20),
        w(400, 520, 20, 40),
        w(120, 360, 40, 20),
        w(640, 360, 40, 20),
        w(200, 360, 20, 80),
        w(580, 360, 20, 80),
        // Side pillars
        w(80, 160, 20, 60),
        w(700, 160, 20, 60),
        w(320, 360, 160, 20),
        // Center box
        w(320, 260, 20, 60),
        w(460, 260, 20, 60),
        w(340, 300, 120, 20),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geom::{WORLD_H, WORLD_W};

    #[test]
    fn forty_walls() {
        assert_eq!(Maze::classic().walls().len(), 40);
    }

    #[test]
    fn walls_inside_world() {
        for w in Maze::classic().walls() {
            assert!(w.x >= 0 && w.y >= 0, "wall origin out of world: {w:?}");
            assert!(w.x + w.w <= WORLD_W, "wall past right edge: {w:?}");
            assert!(w.y + w.h <= WORLD_H, "wall past bottom edge: {w:?}");
        }
    }

    #[test]
    fn border_blocks_outside_spawn_is_free() {
        let maze = Maze::classic();
        // A rect poking into the top border wall
        assert!(maze.blocks(&Rect::new(100, 10, 30, 30)));
        // The player spawn is open
        assert!(!maze.blocks(&Rect::new(50, 50, 30, 30)));
    }

    #[test]
    fn pursuer_spawns_are_free() {
        let maze = Maze::classic();
        for (x, y) in [(300, 150), (500, 400), (200, 300), (600, 300)] {
            assert!(!maze.blocks(&Rect::new(x, y, 30, 30)), "spawn ({x},{y}) blocked");
        }
    }
}
