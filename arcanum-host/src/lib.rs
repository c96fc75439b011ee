//! # Arcanum Host Integration
//!
//! The server-facing half of the Arcanum plugin. `arcanum-core` decides
//! what a cast costs; this crate wires those decisions to a game server:
//!
//! - [`host`] — the [`GameHost`](host::GameHost) trait, the single seam
//!   between the rules and the engine.
//! - [`events`] — enchanting-table and held-item event handlers
//!   (spellbook grants, wand fashioning, wand activation).
//! - [`commands`] — slash-command parsing and handling.
//! - [`wand`] — ability dispatch and the tick-driven repeat scheduler.
//! - [`spellbook`] — written-book composition from the catalog.
//!
//! The host loop owns one [`WandScheduler`](wand::WandScheduler) and one
//! [`WandDispatcher`](wand::WandDispatcher), calls
//! [`WandScheduler::tick`](wand::WandScheduler::tick) once per simulation
//! tick, and forwards engine events and commands to the handlers here.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod events;
pub mod host;
pub mod spellbook;
pub mod wand;

pub use commands::{Command, CommandContext};
pub use events::{InteractAction, PlayerInteractEvent, PrepareEnchantEvent};
pub use host::{BlockKind, GameHost};
pub use spellbook::BookSpec;
pub use wand::{Activation, WandDispatcher, WandScheduler};
