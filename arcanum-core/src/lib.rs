//! # Arcanum Core Library
//!
//! Host-agnostic rules for a crafting-magic plugin: cast specific
//! enchantments at specific levels, cast wizard spells whose power is
//! derived from the reagents at hand, and fashion spell-casting wands.
//!
//! Everything here is deterministic arithmetic over inventory snapshots —
//! no engine calls, no scheduling, no I/O except the grant store. The
//! host-facing half (events, commands, wand dispatch) lives in
//! `arcanum-host`.
//!
//! ## The cost model in one paragraph
//!
//! Enchantments are cast at a *requested* level L (1..=5): lapis `L`,
//! reagent `amount × L`, and a secondary cost of `2L − 1` paid in redstone
//! blocks first and experience levels for any shortfall. Wizard spells are
//! cast at a *derived* level — the weakest of XP budget, lapis, redstone
//! dust, and reagent — with flat 1-per-level debits; duration scales with
//! level forever while the amplifier saturates at a per-spell cap. Wands
//! cost a flat 64/64/32 and the reagent kind picks the wand.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod grants;
pub mod persistence;
pub mod resolver;
pub mod types;

pub use catalog::Catalog;
pub use config::ArcanumConfig;
pub use error::ArcanumError;
pub use grants::{BookKind, GrantTracker};
pub use persistence::GrantStore;
pub use types::*;
