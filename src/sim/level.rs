/// Game/level construction: pickup scatter and game start.
///
/// The maze geometry is identical for every level; what a "level" resets
/// is the entity positions and (by default) the pickup set.

use rand::Rng;

use super::world::{Phase, WorldState};
use crate::domain::entity::{Pickup, PICKUP_SIZE};
use crate::domain::geom::{Point, Rect};
use crate::domain::maze::Maze;

/// Playable scatter bounds: just inside the 20px border walls.
const SCATTER_MIN_X: i32 = 30;
const SCATTER_MAX_X: i32 = 770;
const SCATTER_MIN_Y: i32 = 30;
const SCATTER_MAX_Y: i32 = 570;

/// Give up on a pickup after this many rejected placements.
/// With 40 walls in an 800x600 world this is never reached in practice.
const MAX_PLACEMENT_TRIES: u32 = 1000;

/// Scatter `count` pickups uniformly inside the playable bounds,
/// rejecting positions that land inside a wall (a pickup buried in a
/// wall could never be collected and would make the level unclearable).
pub fn scatter_pickups<R: Rng>(maze: &Maze, count: usize, rng: &mut R) -> Vec<Pickup> {
    let mut pickups = Vec::with_capacity(count);
    for _ in 0..count {
        for _ in 0..MAX_PLACEMENT_TRIES {
            let x = rng.gen_range(SCATTER_MIN_X..SCATTER_MAX_X);
            let y = rng.gen_range(SCATTER_MIN_Y..SCATTER_MAX_Y);
            if !maze.blocks(&Rect::new(x, y, PICKUP_SIZE, PICKUP_SIZE)) {
                pickups.push(Pickup::new(Point::new(x, y)));
                break;
            }
        }
    }
    pickups
}

/// Start a fresh game: counters back to their initial values, everyone
/// at spawn, a brand-new pickup set, and the simulation live.
pub fn start_game(world: &mut WorldState) {
    world.score = 0;
    world.lives = world.rules.lives;
    world.level = 1;
    world.tick = 0;
    world.message.clear();
    world.message_timer = 0;
    world.reset_positions();
    world.pickups = scatter_pickups(&world.maze, world.rules.pickup_count, &mut rand::thread_rng());
    world.phase = Phase::Playing;
}

/// Recreate the pickup set for the next level.
pub fn regenerate_pickups(world: &mut WorldState) {
    world.pickups = scatter_pickups(&world.maze, world.rules.pickup_count, &mut rand::thread_rng());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scatter_produces_requested_count() {
        let maze = Maze::classic();
        let mut rng = StdRng::seed_from_u64(7);
        let pickups = scatter_pickups(&maze, 50, &mut rng);
        assert_eq!(pickups.len(), 50);
    }

    #[test]
    fn scattered_pickups_avoid_walls_and_start_visible() {
        let maze = Maze::classic();
        let mut rng = StdRng::seed_from_u64(42);
        for p in scatter_pickups(&maze, 50, &mut rng) {
            assert!(p.visible);
            assert!(!maze.blocks(&p.rect()), "pickup inside wall at {:?}", p.pos);
            assert!(p.pos.x >= SCATTER_MIN_X && p.pos.x < SCATTER_MAX_X);
            assert!(p.pos.y >= SCATTER_MIN_Y && p.pos.y < SCATTER_MAX_Y);
        }
    }

    #[test]
    fn start_game_resets_counters_and_goes_live() {
        let cfg = GameConfig::default();
        let mut world = WorldState::new(cfg.speed, cfg.rules);
        world.score = 99;
        world.lives = 1;
        world.level = 5;
        start_game(&mut world);
        assert_eq!(world.score, 0);
        assert_eq!(world.lives, 3);
        assert_eq!(world.level, 1);
        assert_eq!(world.pickups.len(), 50);
        assert_eq!(world.phase, Phase::Playing);
    }
}
