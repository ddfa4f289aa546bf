/// WorldState: the complete snapshot of a running game.
///
/// One explicit struct owned by the game loop driver and passed by
/// reference into the step function and the renderer; there is no
/// ambient global state. Walls live in `maze` and are immutable for
/// the whole game; pickups are only ever toggled invisible or recreated
/// wholesale; the player and pursuers are only repositioned.

use crate::config::{RulesConfig, SpeedConfig};
use crate::domain::entity::{Pickup, Player, Pursuer, PURSUER_SPAWNS};
use crate::domain::maze::Maze;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    Playing,
    /// Terminal for the simulation: no further ticks are stepped.
    GameOver,
}

pub struct WorldState {
    // ── Static geometry ──
    pub maze: Maze,

    // ── Entities ──
    pub player: Player,
    pub pursuers: Vec<Pursuer>,
    pub pickups: Vec<Pickup>,

    // ── Game tracking ──
    pub phase: Phase,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub tick: u64,

    // ── Config ──
    pub speed: SpeedConfig,
    pub rules: RulesConfig,

    // ── UI ──
    pub message: String,
    pub message_timer: u32,
}

impl WorldState {
    pub fn new(speed: SpeedConfig, rules: RulesConfig) -> Self {
        let pursuers: Vec<Pursuer> = PURSUER_SPAWNS
            .iter()
            .map(|&spawn| Pursuer::new(spawn, speed.pursuer_speed))
            .collect();
        WorldState {
            maze: Maze::classic(),
            player: Player::new(speed.player_speed),
            pursuers,
            pickups: vec![],
            phase: Phase::Title,
            score: 0,
            lives: rules.lives,
            level: 1,
            tick: 0,
            speed,
            rules,
            message: String::new(),
            message_timer: 0,
        }
    }

    /// Player and every pursuer back to their fixed spawns.
    /// Pickups and score are untouched.
    pub fn reset_positions(&mut self) {
        self.player.respawn();
        for p in &mut self.pursuers {
            p.respawn();
        }
    }

    pub fn all_pickups_collected(&self) -> bool {
        self.pickups.iter().all(|p| !p.visible)
    }

    pub fn pickups_remaining(&self) -> usize {
        self.pickups.iter().filter(|p| p.visible).count()
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}
