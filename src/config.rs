/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub rules: RulesConfig,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
    pub player_speed: i32,   // pixels per tick
    pub pursuer_speed: i32,  // pixels per tick; half the player's by default
}

#[derive(Clone, Debug)]
pub struct RulesConfig {
    pub lives: u32,
    pub pickup_count: usize,
    /// Scatter a fresh pickup set when a level is cleared. With this
    /// off, the cleared set stays empty and every following level
    /// completes instantly.
    pub regenerate_pickups: bool,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    game: TomlGame,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_player_speed")]
    player_speed: i32,
    #[serde(default = "default_pursuer_speed")]
    pursuer_speed: i32,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_lives")]
    lives: u32,
    #[serde(default = "default_pickup_count")]
    pickup_count: usize,
    #[serde(default = "default_regenerate")]
    regenerate_pickups: bool,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 20 }
fn default_player_speed() -> i32 { 8 }
fn default_pursuer_speed() -> i32 { 4 }
fn default_lives() -> u32 { 3 }
fn default_pickup_count() -> usize { 50 }
fn default_regenerate() -> bool { true }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            tick_rate_ms: default_tick_rate(),
            player_speed: default_player_speed(),
            pursuer_speed: default_pursuer_speed(),
        }
    }
}

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            lives: default_lives(),
            pickup_count: default_pickup_count(),
            regenerate_pickups: default_regenerate(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default())
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        GameConfig::from_toml(load_toml(&candidate_dirs()))
    }

    fn from_toml(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig {
                tick_rate_ms: toml_cfg.speed.tick_rate_ms,
                player_speed: toml_cfg.speed.player_speed,
                pursuer_speed: toml_cfg.speed.pursuer_speed,
            },
            rules: RulesConfig {
                lives: toml_cfg.game.lives,
                pickup_count: toml_cfg.game.pickup_count,
                regenerate_pickups: toml_cfg.game.regenerate_pickups,
            },
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.speed.tick_rate_ms, 20);
        assert_eq!(cfg.speed.player_speed, 8);
        assert_eq!(cfg.speed.pursuer_speed, 4);
        assert_eq!(cfg.rules.lives, 3);
        assert_eq!(cfg.rules.pickup_count, 50);
        assert!(cfg.rules.regenerate_pickups);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: TomlConfig = toml::from_str("[speed]\ntick_rate_ms = 40\n").unwrap();
        assert_eq!(cfg.speed.tick_rate_ms, 40);
        assert_eq!(cfg.speed.player_speed, 8);
        assert_eq!(cfg.game.lives, 3);
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.speed.pursuer_speed, 4);
        assert!(cfg.game.regenerate_pickups);
    }
}
