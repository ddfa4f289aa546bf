/// Events emitted during a simulation step.
/// The presentation layer consumes these for sound and status messages.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted,
    PickupCollected { x: i32, y: i32 },
    LifeLost { remaining: u32 },
    LevelCleared { level: u32 },
    GameOver { score: u32 },
}
