//! Falling-block simulation with a player actor that shares the grid with the pieces.

#![allow(clippy::new_without_default)]

#[macro_use]
extern crate tracing;

pub mod input;
pub use input::{Intent, Intents};

pub mod actor;
pub use actor::{Actor, Motion};

pub mod script;
pub use script::{ScriptEntry, Sequence, Spawn, OPENING};

pub mod dropper;
pub use dropper::{Cadence, Dropper, Phase, Tick};

pub mod config;
pub use config::{Config, ConfigError};

pub mod game;
pub use game::{Game, GameEvent, GameRng, Stats};

pub mod snapshot;
pub use snapshot::{ActorView, BlockView, Snapshot};
