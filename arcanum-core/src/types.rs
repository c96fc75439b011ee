//! Core type vocabulary for the Arcanum rules system.
//!
//! Everything here is plain data: the closed set of item kinds, engine
//! enchantments, status effects, and hostile entity kinds the plugin
//! consumes, plus the identity and inventory-snapshot types the resolver
//! operates on. The host engine owns the full registries; this is only
//! the slice the rules reference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ArcanumError;

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Unique identifier for a player, as assigned by the host server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Create a new random player ID (tests and tooling).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to a world entity (a nearby mob, usually).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef(pub Uuid);

// ---------------------------------------------------------------------------
// Item Vocabulary
// ---------------------------------------------------------------------------

/// The item kinds this plugin cares about — currencies, reagents, target
/// gear, and the items that trigger crafting events.
#[allow(missing_docs)] // self-describing vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    // Currencies
    LapisLazuli,
    RedstoneDust,
    RedstoneBlock,
    // Trigger items
    BlazeRod,
    BookAndQuill,
    WrittenBook,
    // Enchantment reagents
    RawFish,
    InkSac,
    PackedIce,
    String,
    RabbitFoot,
    Quartz,
    Feather,
    GhastTear,
    PrismarineShard,
    Gunpowder,
    EnderPearl,
    MagmaCream,
    GlowstoneDust,
    Obsidian,
    // Wizard-spell reagents
    RabbitHide,
    Sugar,
    BlazePowder,
    GoldenCarrot,
    FermentedSpiderEye,
    Mycelium,
    GlisteringMelon,
    GoldenApple,
    // Wand reagents
    Flint,
    MagmaBlock,
    // Enchantable gear
    IronHelmet,
    LeatherBoots,
    DiamondPickaxe,
    DiamondSword,
    Bow,
    IronLeggings,
    IronChestplate,
}

impl ItemKind {
    /// Human-readable name used in player-facing feedback.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::LapisLazuli => "Lapis Lazuli",
            Self::RedstoneDust => "Redstone Dust",
            Self::RedstoneBlock => "Redstone Block",
            Self::BlazeRod => "Blaze Rod",
            Self::BookAndQuill => "Book And Quill",
            Self::WrittenBook => "Written Book",
            Self::RawFish => "Raw Fish",
            Self::InkSac => "Ink Sac",
            Self::PackedIce => "Packed Ice",
            Self::String => "String",
            Self::RabbitFoot => "Rabbit Foot",
            Self::Quartz => "Quartz",
            Self::Feather => "Feather",
            Self::GhastTear => "Ghast Tear",
            Self::PrismarineShard => "Prismarine Shard",
            Self::Gunpowder => "Gunpowder",
            Self::EnderPearl => "Ender Pearl",
            Self::MagmaCream => "Magma Cream",
            Self::GlowstoneDust => "Glowstone Dust",
            Self::Obsidian => "Obsidian",
            Self::RabbitHide => "Rabbit Hide",
            Self::Sugar => "Sugar",
            Self::BlazePowder => "Blaze Powder",
            Self::GoldenCarrot => "Golden Carrot",
            Self::FermentedSpiderEye => "Fermented Spider Eye",
            Self::Mycelium => "Mycelium",
            Self::GlisteringMelon => "Glistering Melon",
            Self::GoldenApple => "Golden Apple",
            Self::Flint => "Flint",
            Self::MagmaBlock => "Magma Block",
            Self::IronHelmet => "Iron Helmet",
            Self::LeatherBoots => "Leather Boots",
            Self::DiamondPickaxe => "Diamond Pickaxe",
            Self::DiamondSword => "Diamond Sword",
            Self::Bow => "Bow",
            Self::IronLeggings => "Iron Leggings",
            Self::IronChestplate => "Iron Chestplate",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A stack of items in an inventory slot.
///
/// Wand identity travels as structured metadata (`wand`), not as a display
/// name — renaming an item cannot silently change what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// What the stack holds.
    pub kind: ItemKind,
    /// How many items are in the stack.
    pub amount: u32,
    /// Structured wand identity, present only on fashioned wands.
    pub wand: Option<WandKind>,
    /// Cosmetic display name, if the item has been named.
    pub display_name: Option<std::string::String>,
}

impl ItemStack {
    /// A plain stack with no metadata.
    #[must_use]
    pub fn new(kind: ItemKind, amount: u32) -> Self {
        Self {
            kind,
            amount,
            wand: None,
            display_name: None,
        }
    }

    /// A fashioned wand: a blaze rod tagged with its wand identity and
    /// bearing the wand's display name.
    #[must_use]
    pub fn wand(kind: WandKind, display_name: &str) -> Self {
        Self {
            kind: ItemKind::BlazeRod,
            amount: 1,
            wand: Some(kind),
            display_name: Some(display_name.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Engine Enchantments & Effects
// ---------------------------------------------------------------------------

/// Engine-defined enchantment kinds, with their engine-defined level caps.
#[allow(missing_docs)] // self-describing vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnchantKind {
    Respiration,
    DepthStrider,
    FrostWalker,
    Mending,
    SilkTouch,
    Fortune,
    Efficiency,
    FeatherFalling,
    Protection,
    Sharpness,
    FireAspect,
    Power,
    Flame,
    Infinity,
    Unbreaking,
}

impl EnchantKind {
    /// The maximum level the engine allows for this enchantment.
    #[must_use]
    pub fn max_level(self) -> u8 {
        match self {
            Self::Mending | Self::SilkTouch | Self::Flame | Self::Infinity => 1,
            Self::FrostWalker | Self::FireAspect => 2,
            Self::Respiration | Self::DepthStrider | Self::Fortune | Self::Unbreaking => 3,
            Self::FeatherFalling | Self::Protection => 4,
            Self::Efficiency | Self::Sharpness | Self::Power => 5,
        }
    }
}

/// Engine-defined status-effect kinds applied by wizard spells.
#[allow(missing_docs)] // self-describing vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    JumpBoost,
    Speed,
    Strength,
    WaterBreathing,
    NightVision,
    Invisibility,
    Saturation,
    Absorption,
    InstantHealth,
    Regeneration,
}

/// Hostile entity kinds targeted by area wand abilities.
#[allow(missing_docs)] // self-describing vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobKind {
    CaveSpider,
    Creeper,
    Evoker,
    Giant,
    Husk,
    Illusioner,
    Skeleton,
    SkeletonHorse,
    Slime,
    Spider,
    Stray,
    Vex,
    Vindicator,
    Witch,
    Zombie,
    ZombieHorse,
    ZombieVillager,
    // Non-hostiles that can appear in a nearby-entity scan
    Villager,
    Cow,
    Sheep,
    Wolf,
}

impl MobKind {
    /// Whether area wand abilities may target this kind.
    #[must_use]
    pub fn is_hostile(self) -> bool {
        !matches!(
            self,
            Self::Villager | Self::Cow | Self::Sheep | Self::Wolf
        )
    }
}

// ---------------------------------------------------------------------------
// Wand Identity
// ---------------------------------------------------------------------------

/// Structured wand identity carried on fashioned wand items.
#[allow(missing_docs)] // self-describing vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WandKind {
    Arrowfall,
    Fireball,
    Firestorm,
    Firestrike,
    Lightning,
}

impl WandKind {
    /// Stable identifier used in logs and the catalog.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Arrowfall => "arrowfall",
            Self::Fireball => "fireball",
            Self::Firestorm => "firestorm",
            Self::Firestrike => "firestrike",
            Self::Lightning => "lightningstrike",
        }
    }
}

impl fmt::Display for WandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

// ---------------------------------------------------------------------------
// Cast Level
// ---------------------------------------------------------------------------

/// A requested enchantment level in 1..=5.
///
/// Parses from both integer (`"2"`) and Roman-numeral (`"II"`) forms, as
/// players see the latter in their spellbooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CastLevel(u8);

impl CastLevel {
    /// Construct from a raw integer, rejecting values outside 1..=5.
    ///
    /// # Errors
    /// Returns [`ArcanumError::LevelOutOfRange`] for anything outside 1..=5.
    pub fn new(level: u8) -> Result<Self, ArcanumError> {
        if (1..=5).contains(&level) {
            Ok(Self(level))
        } else {
            Err(ArcanumError::LevelOutOfRange)
        }
    }

    /// The raw level value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }

    /// Roman-numeral rendering, as shown in spellbooks.
    #[must_use]
    pub fn roman(self) -> &'static str {
        match self.0 {
            1 => "I",
            2 => "II",
            3 => "III",
            4 => "IV",
            _ => "V",
        }
    }
}

impl FromStr for CastLevel {
    type Err = ArcanumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level = match s {
            "I" => 1,
            "II" => 2,
            "III" => 3,
            "IV" => 4,
            "V" => 5,
            other => other
                .parse::<u8>()
                .map_err(|_| ArcanumError::LevelOutOfRange)?,
        };
        Self::new(level)
    }
}

impl fmt::Display for CastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Resource Bundle
// ---------------------------------------------------------------------------

/// Snapshot of the resources available for one wizard-spell cast attempt.
///
/// Constructed fresh from a hotbar scan; carries no persistent identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceBundle {
    /// Experience-derived level budget: `floor(xp_level / 10)`.
    pub xp_budget: u32,
    /// Lapis lazuli count.
    pub lapis: u32,
    /// Redstone dust count.
    pub dust: u32,
    /// Matching-reagent count.
    pub reagent: u32,
}

impl ResourceBundle {
    /// The affordable cast level: the weakest of the four resources.
    #[must_use]
    pub fn cast_level(&self) -> u32 {
        self.xp_budget
            .min(self.lapis)
            .min(self.dust)
            .min(self.reagent)
    }
}
