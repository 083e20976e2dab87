//! # Demo
//!
//! A game-events walkthrough of [`beacon_emitter`]: one typed key per game
//! event, a logging listener for player moves, a once-listener for game over,
//! and the clear operations.
//!
//! Configuration is layered with [`config::load_config`]: built-in defaults,
//! then an optional TOML file, then `BEACON__`-prefixed environment variables.

pub mod config;
pub mod game;
