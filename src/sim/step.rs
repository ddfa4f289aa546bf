/// The step function: advances the world by one tick.
///
/// Processing order, fixed:
///   1. Player movement (intent flags, wall-validated)
///   2. Pursuer movement (sign-chase heuristic, wall-validated)
///   3. Pickup collection
///   4. Pursuer contact (life loss / game over)
///   5. Level-clear check
///
/// Movement is all-or-nothing: a candidate position that clips any wall
/// is rejected wholesale and the entity stays put for the tick. No
/// sliding, no sub-stepping, no pathfinding: a pursuer blocked by a
/// wall simply stops until the player's position unblocks it.

use super::event::GameEvent;
use super::level;
use super::world::{Phase, WorldState};
use crate::domain::entity::{IntentFlags, PLAYER_SIZE, PURSUER_SIZE};
use crate::domain::geom::{Point, Rect};

pub fn step(world: &mut WorldState, input: IntentFlags) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return vec![];
    }

    let mut events: Vec<GameEvent> = Vec::new();
    world.tick += 1;

    if world.message_timer > 0 {
        world.message_timer -= 1;
        if world.message_timer == 0 {
            world.message.clear();
        }
    }

    resolve_player_movement(world, input);
    resolve_pursuer_movement(world);
    resolve_pickups(world, &mut events);
    if resolve_pursuer_contact(world, &mut events) {
        return events; // game over: terminal, skip level check
    }
    resolve_level_clear(world, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Movement
// ══════════════════════════════════════════════════════════════

fn resolve_player_movement(world: &mut WorldState, input: IntentFlags) {
    if !input.any() {
        return;
    }

    // Each active direction contributes independently; up+left gives
    // a full-speed diagonal. Intended, not a bug.
    let mut candidate = world.player.pos;
    if input.up {
        candidate.y -= world.player.speed;
    }
    if input.down {
        candidate.y += world.player.speed;
    }
    if input.left {
        candidate.x -= world.player.speed;
    }
    if input.right {
        candidate.x += world.player.speed;
    }

    if !world.maze.blocks(&Rect::at(candidate, PLAYER_SIZE, PLAYER_SIZE)) {
        world.player.pos = candidate;
    }
}

/// Per-axis chase sign. Never returns 0: a pursuer exactly aligned with
/// the player on one axis still jitters ±speed on that axis.
fn chase_sign(delta: i32) -> i32 {
    if delta > 0 {
        1
    } else {
        -1
    }
}

fn resolve_pursuer_movement(world: &mut WorldState) {
    let target = world.player.pos;
    for pursuer in &mut world.pursuers {
        let candidate = Point::new(
            pursuer.pos.x + chase_sign(target.x - pursuer.pos.x) * pursuer.speed,
            pursuer.pos.y + chase_sign(target.y - pursuer.pos.y) * pursuer.speed,
        );
        if !world.maze.blocks(&Rect::at(candidate, PURSUER_SIZE, PURSUER_SIZE)) {
            pursuer.pos = candidate;
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Collision & progression
// ══════════════════════════════════════════════════════════════

fn resolve_pickups(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let player_rect = world.player.rect();
    for pickup in &mut world.pickups {
        if pickup.visible && player_rect.intersects(&pickup.rect()) {
            pickup.visible = false;
            world.score += 1;
            events.push(GameEvent::PickupCollected { x: pickup.pos.x, y: pickup.pos.y });
        }
    }
}

/// Check every pursuer against the player. Each overlap costs one life;
/// two pursuers overlapping in the same tick cost two lives, since
/// contacts are not deduplicated. A non-fatal contact repositions the
/// player, so later pursuers in the roster are checked against the
/// post-reset position. Returns true on game over.
fn resolve_pursuer_contact(world: &mut WorldState, events: &mut Vec<GameEvent>) -> bool {
    for i in 0..world.pursuers.len() {
        if !world.player.rect().intersects(&world.pursuers[i].rect()) {
            continue;
        }

        world.lives = world.lives.saturating_sub(1);
        if world.lives == 0 {
            world.phase = Phase::GameOver;
            world.set_message(&format!("GAME OVER! Final score: {}", world.score), 0);
            events.push(GameEvent::GameOver { score: world.score });
            return true;
        }

        events.push(GameEvent::LifeLost { remaining: world.lives });
        world.reset_positions();
        world.set_message(&format!("Life lost! {} remaining", world.lives), 60);
    }
    false
}

fn resolve_level_clear(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if !world.all_pickups_collected() {
        return;
    }

    world.level += 1;
    world.reset_positions();
    if world.rules.regenerate_pickups {
        level::regenerate_pickups(world);
    }
    events.push(GameEvent::LevelCleared { level: world.level });
    world.set_message(&format!("Level {}!", world.level), 60);
}

// ══════════════════════════════════════════════════════════════
// Tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::domain::entity::{Pickup, PLAYER_SPAWN, PURSUER_SPAWNS};
    use crate::domain::maze::Maze;

    /// A live world with the classic maze and no pickups.
    fn world() -> WorldState {
        let cfg = GameConfig::default();
        let mut w = WorldState::new(cfg.speed, cfg.rules);
        w.phase = Phase::Playing;
        w
    }

    /// A live world with no walls at all and the pursuers parked far away.
    fn open_world() -> WorldState {
        let mut w = world();
        w.maze = Maze::from_walls(vec![]);
        for p in &mut w.pursuers {
            p.pos = Point::new(5000, 5000);
        }
        w
    }

    /// One visible pickup so the level-clear check stays quiet.
    fn sentinel_pickup() -> Pickup {
        Pickup::new(Point::new(4000, 4000))
    }

    fn idle() -> IntentFlags {
        IntentFlags::default()
    }

    // ── Movement ──

    #[test]
    fn move_into_wall_is_rejected() {
        let mut w = open_world();
        w.maze = Maze::from_walls(vec![Rect::new(0, 0, 800, 20)]);
        w.pickups = vec![sentinel_pickup()];
        w.player.pos = Point::new(50, 22); // 2px below the top wall

        let up = IntentFlags { up: true, ..Default::default() };
        step(&mut w, up);
        assert_eq!(w.player.pos, Point::new(50, 22), "blocked move must leave player in place");

        // Same tick count, moving parallel to the wall is fine
        let right = IntentFlags { right: true, ..Default::default() };
        step(&mut w, right);
        assert_eq!(w.player.pos, Point::new(58, 22));
    }

    #[test]
    fn diagonal_movement_applies_both_axes() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        w.player.pos = Point::new(100, 100);

        let input = IntentFlags { up: true, left: true, ..Default::default() };
        step(&mut w, input);
        assert_eq!(w.player.pos, Point::new(92, 92));
    }

    #[test]
    fn no_input_means_no_movement() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        let before = w.player.pos;
        step(&mut w, idle());
        assert_eq!(w.player.pos, before);
    }

    #[test]
    fn opposed_intents_cancel_out() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        let before = w.player.pos;
        let input = IntentFlags { left: true, right: true, ..Default::default() };
        step(&mut w, input);
        assert_eq!(w.player.pos, before);
    }

    #[test]
    fn pursuer_chases_toward_player() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        w.player.pos = Point::new(100, 100);
        w.pursuers.truncate(1);
        w.pursuers[0].pos = Point::new(200, 300);

        step(&mut w, idle());
        // Player is up-left of the pursuer: both axes move toward it
        assert_eq!(w.pursuers[0].pos, Point::new(196, 296));
    }

    #[test]
    fn aligned_pursuer_still_jitters_on_that_axis() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        w.player.pos = Point::new(100, 100);
        w.pursuers.truncate(1);
        w.pursuers[0].pos = Point::new(100, 50); // same X as the player

        step(&mut w, idle());
        // delta.x == 0 resolves to -1 (the sign test never yields 0)
        assert_eq!(w.pursuers[0].pos.x, 96);
        // and Y still closes on the player
        assert_eq!(w.pursuers[0].pos.y, 54);
    }

    #[test]
    fn blocked_pursuer_stays_put() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        // A wall box around the pursuer's path: any diagonal candidate clips it
        w.maze = Maze::from_walls(vec![Rect::new(100, 100, 200, 200)]);
        w.player.pos = Point::new(700, 500);
        w.pursuers.truncate(1);
        w.pursuers[0].pos = Point::new(68, 98); // diagonal step lands inside the box

        step(&mut w, idle());
        assert_eq!(w.pursuers[0].pos, Point::new(68, 98));
    }

    // ── Pickups ──

    #[test]
    fn overlapping_pickup_is_collected_once() {
        let mut w = open_world();
        w.player.pos = Point::new(50, 50);
        w.pickups = vec![Pickup::new(Point::new(50, 50)), sentinel_pickup()];

        step(&mut w, idle());
        assert_eq!(w.score, 1);
        assert!(!w.pickups[0].visible);

        // Still overlapping on later ticks: no double count
        for _ in 0..5 {
            step(&mut w, idle());
        }
        assert_eq!(w.score, 1);
    }

    #[test]
    fn collection_emits_event() {
        let mut w = open_world();
        w.player.pos = Point::new(50, 50);
        w.pickups = vec![Pickup::new(Point::new(55, 55)), sentinel_pickup()];

        let events = step(&mut w, idle());
        assert!(events.contains(&GameEvent::PickupCollected { x: 55, y: 55 }));
    }

    #[test]
    fn score_is_monotone_across_ticks() {
        let mut w = world();
        w.pickups = level::scatter_pickups(&w.maze, 50, &mut rand::thread_rng());
        let mut last = 0;
        let input = IntentFlags { right: true, down: true, ..Default::default() };
        for _ in 0..200 {
            step(&mut w, input);
            assert!(w.score >= last, "score decreased: {} -> {}", last, w.score);
            last = w.score;
            if w.phase != Phase::Playing {
                break;
            }
        }
    }

    // ── Pursuer contact ──

    #[test]
    fn contact_with_lives_left_resets_positions() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        w.player.pos = Point::new(400, 400);
        w.pursuers[0].pos = Point::new(400, 400);

        let events = step(&mut w, idle());
        assert_eq!(w.lives, 2);
        assert_eq!(w.phase, Phase::Playing);
        assert_eq!(w.player.pos, PLAYER_SPAWN);
        for (p, &spawn) in w.pursuers.iter().zip(PURSUER_SPAWNS.iter()) {
            assert_eq!(p.pos, spawn);
        }
        assert!(events.contains(&GameEvent::LifeLost { remaining: 2 }));
    }

    #[test]
    fn life_loss_keeps_score_and_pickups() {
        let mut w = open_world();
        w.score = 7;
        let mut collected = sentinel_pickup();
        collected.visible = false;
        w.pickups = vec![collected, sentinel_pickup()];
        w.player.pos = Point::new(400, 400);
        w.pursuers[0].pos = Point::new(400, 400);

        step(&mut w, idle());
        assert_eq!(w.score, 7);
        assert!(!w.pickups[0].visible);
        assert!(w.pickups[1].visible);
    }

    #[test]
    fn last_life_contact_is_game_over() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        w.lives = 1;
        w.player.pos = Point::new(400, 400);
        w.pursuers[0].pos = Point::new(400, 400);

        let events = step(&mut w, idle());
        assert_eq!(w.lives, 0);
        assert_eq!(w.phase, Phase::GameOver);
        assert!(events.contains(&GameEvent::GameOver { score: 0 }));

        // Terminal: further ticks are not processed
        let tick = w.tick;
        assert!(step(&mut w, idle()).is_empty());
        assert_eq!(w.tick, tick);
        assert_eq!(w.lives, 0, "lives never go negative");
    }

    #[test]
    fn two_overlapping_pursuers_cost_two_lives() {
        let mut w = open_world();
        w.pickups = vec![sentinel_pickup()];
        // Both pursuers spawn on top of the player spawn, so the check
        // against the post-reset position still overlaps.
        w.pursuers.truncate(2);
        for p in &mut w.pursuers {
            p.spawn = PLAYER_SPAWN;
            p.pos = PLAYER_SPAWN;
        }
        w.player.pos = PLAYER_SPAWN;

        step(&mut w, idle());
        assert_eq!(w.lives, 1, "each overlap decrements independently in one tick");
    }

    // ── Level progression ──

    #[test]
    fn clearing_all_pickups_advances_level_and_resets_positions() {
        let mut w = open_world();
        w.player.pos = Point::new(300, 300);
        w.pickups = vec![Pickup::new(Point::new(300, 300))]; // last one

        step(&mut w, idle());
        assert_eq!(w.level, 2);
        assert_eq!(w.player.pos, PLAYER_SPAWN);
        for (p, &spawn) in w.pursuers.iter().zip(PURSUER_SPAWNS.iter()) {
            assert_eq!(p.pos, spawn);
        }
    }

    #[test]
    fn level_up_regenerates_pickups_by_default() {
        let mut w = world();
        w.player.pos = Point::new(700, 500);
        w.pickups = vec![Pickup::new(Point::new(700, 500))];

        step(&mut w, idle());
        assert_eq!(w.level, 2);
        assert_eq!(w.pickups.len(), 50);
        assert!(w.pickups.iter().all(|p| p.visible));
    }

    #[test]
    fn no_regeneration_mode_retriggers_level_clear_every_tick() {
        // With regeneration off the cleared set stays all-invisible, so
        // every subsequent tick "completes" the level again.
        let mut w = open_world();
        w.rules.regenerate_pickups = false;
        w.pickups = vec![Pickup::new(Point::new(50, 50))];
        w.player.pos = Point::new(50, 50);

        step(&mut w, idle());
        assert_eq!(w.level, 2);
        step(&mut w, idle());
        assert_eq!(w.level, 3, "empty pickup set re-triggers level clear each tick");
    }

    #[test]
    fn pickup_and_contact_in_same_tick_both_apply() {
        let mut w = open_world();
        w.player.pos = Point::new(400, 400);
        w.pickups = vec![Pickup::new(Point::new(400, 400)), sentinel_pickup()];
        w.pursuers[0].pos = Point::new(400, 400);

        let events = step(&mut w, idle());
        assert_eq!(w.score, 1);
        assert_eq!(w.lives, 2);
        assert!(events.contains(&GameEvent::PickupCollected { x: 400, y: 400 }));
        assert!(events.contains(&GameEvent::LifeLost { remaining: 2 }));
    }
}
