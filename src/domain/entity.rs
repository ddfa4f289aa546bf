/// Entities: Player, Pursuer, Pickup.
///
/// Nothing here is ever destroyed during a game — pursuers and the player
/// are only repositioned, pickups are only marked invisible. The pickup
/// set is recreated wholesale on game/level reset.

use super::geom::{Point, Rect};

pub const PLAYER_SIZE: i32 = 30;
pub const PURSUER_SIZE: i32 = 30;
pub const PICKUP_SIZE: i32 = 15;

pub const PLAYER_SPAWN: Point = Point { x: 50, y: 50 };

/// Fixed pursuer roster: each pursuer has its own spawn point.
pub const PURSUER_SPAWNS: [Point; 4] = [
    Point { x: 300, y: 150 },
    Point { x: 500, y: 400 },
    Point { x: 200, y: 300 },
    Point { x: 600, y: 300 },
];

/// Movement intent, one flag per direction. Key-down sets a flag,
/// key-up clears it; several may be active at once (diagonal movement
/// is intentional). Read by the step function every tick.
#[derive(Clone, Copy, Default, Debug)]
pub struct IntentFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl IntentFlags {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Point,
    pub speed: i32,
}

impl Player {
    pub fn new(speed: i32) -> Self {
        Player { pos: PLAYER_SPAWN, speed }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub fn respawn(&mut self) {
        self.pos = PLAYER_SPAWN;
    }
}

#[derive(Clone, Debug)]
pub struct Pursuer {
    pub pos: Point,
    pub spawn: Point,
    pub speed: i32,
}

impl Pursuer {
    pub fn new(spawn: Point, speed: i32) -> Self {
        Pursuer { pos: spawn, spawn, speed }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, PURSUER_SIZE, PURSUER_SIZE)
    }

    pub fn respawn(&mut self) {
        self.pos = self.spawn;
    }
}

#[derive(Clone, Debug)]
pub struct Pickup {
    pub pos: Point,
    pub visible: bool,
}

impl Pickup {
    pub fn new(pos: Point) -> Self {
        Pickup { pos, visible: true }
    }

    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, PICKUP_SIZE, PICKUP_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intent_flags_default_idle() {
        let flags = IntentFlags::default();
        assert!(!flags.any());
    }

    #[test]
    fn pursuer_respawn_returns_to_own_spawn() {
        let mut p = Pursuer::new(PURSUER_SPAWNS[1], 4);
        p.pos = Point::new(123, 456);
        p.respawn();
        assert_eq!(p.pos, PURSUER_SPAWNS[1]);
    }

    #[test]
    fn pursuer_speed_is_half_player_speed() {
        // Speed ratio 1:2 by design
        let player = Player::new(8);
        let pursuer = Pursuer::new(PURSUER_SPAWNS[0], 4);
        assert_eq!(player.speed, pursuer.speed * 2);
    }
}
