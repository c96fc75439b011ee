//! Error types for the Arcanum rules system.
//!
//! Every gameplay failure here is a recoverable input rejection — the
//! player fixes their inventory and tries again. The `Display` strings are
//! written to be sent to the player as chat feedback verbatim, so they are
//! phrased as instructions, not diagnostics.

use thiserror::Error;

/// Top-level error type for all Arcanum operations.
#[derive(Error, Debug)]
pub enum ArcanumError {
    /// The named enchantment does not exist in the catalog.
    #[error("there is no enchantment called '{0}'")]
    UnknownEnchantment(String),

    /// The named wizard spell does not exist in the catalog.
    #[error("there is no wizard spell called '{0}'")]
    UnknownSpell(String),

    /// A fashioned wand's identity tag no longer matches the catalog.
    #[error("this wand has lost its enchantment")]
    UnknownWand(String),

    /// A command was issued without a required argument.
    #[error("{0}")]
    MissingArgument(&'static str),

    /// Requested level is outside 1..=5 (or unparseable).
    #[error("the level of enchantment must be between 1 and 5")]
    LevelOutOfRange,

    /// Requested level exceeds the engine's cap for that enchantment.
    #[error("the enchantment {name} has a maximum level of {max}")]
    MaxLevelExceeded {
        /// Display name of the enchantment.
        name: String,
        /// Engine-defined level cap.
        max: u8,
    },

    /// Player's experience level is below `10 × cast level`.
    #[error("you must be at least {required}th level to cast a spell of that level")]
    InsufficientExperience {
        /// Required experience level.
        required: u32,
    },

    /// The caster is not looking at an enchanting table.
    #[error("you must be looking at your enchanting table")]
    NotAtEnchantingTable,

    /// A required slot is empty or holds the wrong item.
    #[error("{0}")]
    SlotContents(String),

    /// A slot holds the right item but not enough of it.
    #[error("{0}")]
    InsufficientQuantity(String),

    /// No spell-casting resources at all for a derived-level cast.
    #[error("you are not properly prepared to cast {spell}")]
    NotPrepared {
        /// Display name of the spell.
        spell: String,
    },

    /// No wand definition matches the supplied reagent.
    #[error("fashioning a wand requires an appropriate reagent in your 3rd inventory slot")]
    NoMatchingWand,

    /// Two wand definitions share a reagent kind — the catalog is invalid.
    #[error("catalog error: wands '{first}' and '{second}' share the reagent {reagent}")]
    DuplicateWandReagent {
        /// First wand id claiming the reagent.
        first: String,
        /// Second wand id claiming the reagent.
        second: String,
        /// The contested reagent kind.
        reagent: String,
    },

    /// SQLite persistence error.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArcanumError {
    /// Whether this rejection should be echoed to the player as chat
    /// feedback (as opposed to logged as an operational fault).
    #[must_use]
    pub fn is_player_facing(&self) -> bool {
        !matches!(
            self,
            Self::Database(_)
                | Self::Serialization(_)
                | Self::Config(_)
                | Self::Io(_)
                | Self::DuplicateWandReagent { .. }
        )
    }
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, ArcanumError>;
