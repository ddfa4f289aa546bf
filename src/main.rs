/// Entry point and game loop driver.
///
/// Single-threaded cooperative model: every pass drains terminal input,
/// then, if the fixed tick period has elapsed, runs one simulation
/// step (movement, then collision resolution) to completion before
/// rendering. The tick gate is reset to `now` after the step, so a
/// handler that overruns the period drops the backlog instead of
/// queueing ticks; re-entrancy is impossible by construction. Input and
/// simulation share a thread, so the intent flags read by a tick are
/// always the ones set by the events drained just before it.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use sim::event::GameEvent;
use sim::level;
use sim::step;
use sim::world::{Phase, WorldState};
use ui::input::InputState;
use ui::renderer::Renderer;
use ui::sound::SoundEngine;

const FRAME_SLEEP: Duration = Duration::from_millis(5);

const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q')];

fn main() {
    let config = GameConfig::load();
    let mut world = WorldState::new(config.speed.clone(), config.rules.clone());

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let sound = SoundEngine::new();

    let result = game_loop(&mut world, &mut renderer, sound.as_ref());

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Chomper!");
    println!("Final Score: {}", world.score);
}

fn game_loop(
    world: &mut WorldState,
    renderer: &mut Renderer,
    sound: Option<&SoundEngine>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut kb = InputState::new();
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(world.speed.tick_rate_ms);

    loop {
        kb.drain_events();

        if kb.ctrl_c_pressed() {
            break;
        }
        if handle_meta(world, sound, &kb) {
            break;
        }

        if last_tick.elapsed() >= tick_rate {
            if world.phase == Phase::Playing {
                let events = step::step(world, kb.intent_flags());
                process_sound_events(sound, &events);
            }
            // One step per gate; a slow step coalesces rather than queues
            last_tick = Instant::now();
        }

        renderer.render(world)?;
        std::thread::sleep(FRAME_SLEEP);
    }

    Ok(())
}

fn process_sound_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let sfx = match sound {
        Some(s) => s,
        None => return,
    };
    for event in events {
        match event {
            GameEvent::GameStarted => sfx.start_theme(),
            GameEvent::PickupCollected { .. } => sfx.play_pickup(),
            GameEvent::LifeLost { .. } => sfx.play_life_lost(),
            GameEvent::LevelCleared { .. } => sfx.play_level_clear(),
            GameEvent::GameOver { .. } => {
                sfx.stop_theme();
                sfx.play_game_over();
            }
        }
    }
}

fn start_new_game(world: &mut WorldState, sound: Option<&SoundEngine>) {
    level::start_game(world);
    process_sound_events(sound, &[GameEvent::GameStarted]);
}

/// Phase-dependent meta keys. Returns true to exit the program.
fn handle_meta(world: &mut WorldState, sound: Option<&SoundEngine>, kb: &InputState) -> bool {
    let confirm = kb.any_pressed(KEYS_CONFIRM);
    let esc = kb.any_pressed(&[KeyCode::Esc]);
    let quit = kb.any_pressed(KEYS_QUIT);

    match world.phase {
        Phase::Title => {
            if confirm {
                start_new_game(world, sound);
            } else if esc || quit {
                return true;
            }
        }

        Phase::Playing => {
            if esc {
                // Abandon the run and return to the title screen
                if let Some(sfx) = sound {
                    sfx.stop_theme();
                }
                world.phase = Phase::Title;
                world.set_message("Run abandoned", 0);
            }
        }

        Phase::GameOver => {
            if confirm {
                start_new_game(world, sound);
            } else if esc || quit {
                return true;
            }
        }
    }

    false
}
