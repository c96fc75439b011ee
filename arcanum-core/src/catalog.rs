//! Static rule catalogs: enchantments, wizard spells, and wands.
//!
//! Definitions are immutable and built once at plugin start. Lookups by
//! identifier return a typed rejection for unknown ids rather than
//! panicking — a typo'd spell name is a player mistake, not a crash.
//!
//! Wand reagent kinds must be unique across the wand catalog: the reagent
//! alone selects which wand is fashioned, so a shared reagent would make
//! catalog order load-bearing. Construction fails on a collision.

use crate::config::WandConfig;
use crate::error::{ArcanumError, Result};
use crate::types::{EffectKind, EnchantKind, ItemKind, WandKind};

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// The reagent consumed by an enchantment cast: an item kind and the
/// quantity consumed per cast level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reagent {
    /// Which item kind the cast consumes.
    pub item: ItemKind,
    /// Quantity consumed per cast level.
    pub amount_per_level: u32,
}

/// A castable enchantment: what it applies, what it costs, what it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnchantmentDefinition {
    /// Catalog identifier, as used in commands and spellbook click regions.
    pub id: &'static str,
    /// Display name shown to players.
    pub name: &'static str,
    /// The engine enchantment this casts.
    pub enchantment: EnchantKind,
    /// The flavor ingredient, scaled per level.
    pub reagent: Reagent,
    /// The only item kind this enchantment may be applied to.
    pub target_item: ItemKind,
}

/// A wizard spell: a timed status effect cast at a derived level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellDefinition {
    /// Catalog identifier.
    pub id: &'static str,
    /// Display name shown to players.
    pub name: &'static str,
    /// The engine status effect this applies.
    pub effect: EffectKind,
    /// Intensity ceiling — duration keeps scaling past it, amplifier does not.
    pub max_amplifier: u32,
    /// The flavor ingredient, always 1 per cast level.
    pub reagent: ItemKind,
}

/// A spell-casting wand and the ability it triggers.
#[derive(Debug, Clone, PartialEq)]
pub struct WandDefinition {
    /// Structured wand identity, carried on the fashioned item.
    pub kind: WandKind,
    /// Display name stamped on the fashioned item.
    pub name: &'static str,
    /// The reagent that selects this wand during fashioning.
    pub reagent: ItemKind,
    /// What the wand does when triggered.
    pub ability: WandAbility,
}

// ---------------------------------------------------------------------------
// Wand Abilities
// ---------------------------------------------------------------------------

/// A world mutation a wand can perform once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WandAction {
    /// Launch an arrow ahead of the caster.
    SpawnArrow,
    /// Spawn a large fireball ahead of the caster.
    SpawnFireball,
    /// Spawn a small fireball ahead of the caster.
    SpawnSmallFireball,
}

/// What an area ability does to each matched hostile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AreaAction {
    /// Set the ground at the mob's feet on fire.
    Ignite,
    /// Strike the mob with lightning.
    Lightning,
}

/// The behavior a wand triggers, over the capability set
/// {single-target, area, timed-repeat}.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WandAbility {
    /// Fires once, immediately.
    Single(WandAction),
    /// Applies an action to every hostile within `radius` per axis.
    Area {
        /// What happens to each matched mob.
        action: AreaAction,
        /// Scan radius per axis, in blocks.
        radius: f64,
    },
    /// Fires `repeats` times at `interval_ticks` spacing, first firing
    /// immediate.
    Repeat {
        /// The per-firing action.
        action: WandAction,
        /// Tick spacing between firings.
        interval_ticks: u32,
        /// Total number of firings.
        repeats: u32,
    },
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The three immutable rule tables, built once at plugin start.
#[derive(Debug, Clone)]
pub struct Catalog {
    enchantments: Vec<EnchantmentDefinition>,
    spells: Vec<SpellDefinition>,
    wands: Vec<WandDefinition>,
}

impl Catalog {
    /// Build a catalog from explicit tables, enforcing wand-reagent
    /// uniqueness.
    ///
    /// # Errors
    /// Returns [`ArcanumError::DuplicateWandReagent`] if two wand
    /// definitions claim the same reagent kind.
    pub fn new(
        enchantments: Vec<EnchantmentDefinition>,
        spells: Vec<SpellDefinition>,
        wands: Vec<WandDefinition>,
    ) -> Result<Self> {
        for (i, wand) in wands.iter().enumerate() {
            if let Some(other) = wands[..i].iter().find(|w| w.reagent == wand.reagent) {
                return Err(ArcanumError::DuplicateWandReagent {
                    first: other.kind.id().to_string(),
                    second: wand.kind.id().to_string(),
                    reagent: wand.reagent.display_name().to_string(),
                });
            }
        }
        Ok(Self {
            enchantments,
            spells,
            wands,
        })
    }

    /// The standard catalog shipped with the plugin.
    ///
    /// Timed-repeat and area parameters come from `config` so server
    /// operators can retune ability pacing without touching the tables.
    ///
    /// # Errors
    /// Propagates the uniqueness check from [`Catalog::new`]; the standard
    /// tables always pass it.
    pub fn standard(config: &WandConfig) -> Result<Self> {
        Self::new(
            standard_enchantments(),
            standard_spells(),
            standard_wands(config),
        )
    }

    /// Look up an enchantment definition by catalog id.
    ///
    /// # Errors
    /// Returns [`ArcanumError::UnknownEnchantment`] for an unknown id.
    pub fn enchantment(&self, id: &str) -> Result<&EnchantmentDefinition> {
        self.enchantments
            .iter()
            .find(|def| def.id == id)
            .ok_or_else(|| ArcanumError::UnknownEnchantment(id.to_string()))
    }

    /// Look up a wizard-spell definition by catalog id.
    ///
    /// # Errors
    /// Returns [`ArcanumError::UnknownSpell`] for an unknown id.
    pub fn spell(&self, id: &str) -> Result<&SpellDefinition> {
        self.spells
            .iter()
            .find(|def| def.id == id)
            .ok_or_else(|| ArcanumError::UnknownSpell(id.to_string()))
    }

    /// Look up a wand definition by its structured identity.
    ///
    /// # Errors
    /// Returns [`ArcanumError::UnknownWand`] if the tag has no catalog
    /// entry (a wand from a removed definition, for instance).
    pub fn wand(&self, kind: WandKind) -> Result<&WandDefinition> {
        self.wands
            .iter()
            .find(|def| def.kind == kind)
            .ok_or_else(|| ArcanumError::UnknownWand(kind.id().to_string()))
    }

    /// Find the wand selected by a fashioning reagent, if any.
    #[must_use]
    pub fn wand_for_reagent(&self, reagent: ItemKind) -> Option<&WandDefinition> {
        self.wands.iter().find(|def| def.reagent == reagent)
    }

    /// All enchantment definitions, in catalog order.
    #[must_use]
    pub fn enchantments(&self) -> &[EnchantmentDefinition] {
        &self.enchantments
    }

    /// All wizard-spell definitions, in catalog order.
    #[must_use]
    pub fn spells(&self) -> &[SpellDefinition] {
        &self.spells
    }

    /// All wand definitions, in catalog order.
    #[must_use]
    pub fn wands(&self) -> &[WandDefinition] {
        &self.wands
    }
}

// ---------------------------------------------------------------------------
// Standard tables
// ---------------------------------------------------------------------------

fn standard_enchantments() -> Vec<EnchantmentDefinition> {
    use EnchantKind as E;
    use ItemKind as I;

    let def = |id, name, enchantment, item, amount_per_level, target_item| EnchantmentDefinition {
        id,
        name,
        enchantment,
        reagent: Reagent {
            item,
            amount_per_level,
        },
        target_item,
    };

    vec![
        // Helm and boots
        def("respiration", "Respiration", E::Respiration, I::RawFish, 8, I::IronHelmet),
        def("depthstrider", "Depth Strider", E::DepthStrider, I::InkSac, 8, I::LeatherBoots),
        def("frostwalker", "Frost Walker", E::FrostWalker, I::PackedIce, 8, I::LeatherBoots),
        // Pickaxe
        def("mendingpickaxe", "Mending Pickaxe", E::Mending, I::BlazeRod, 8, I::DiamondPickaxe),
        def("silktouch", "Silk Touch", E::SilkTouch, I::String, 32, I::DiamondPickaxe),
        def("fortune", "Fortune", E::Fortune, I::RabbitFoot, 16, I::DiamondPickaxe),
        def("efficiency", "Efficiency", E::Efficiency, I::Quartz, 8, I::DiamondPickaxe),
        // Armor
        def("featherfalling", "Feather Falling", E::FeatherFalling, I::Feather, 16, I::IronLeggings),
        def("protection", "Protection", E::Protection, I::GhastTear, 2, I::IronChestplate),
        // Sword
        def("mendingsword", "Mending Sword", E::Mending, I::BlazeRod, 8, I::DiamondSword),
        def("vorpalblade", "Vorpal Blade", E::Sharpness, I::PrismarineShard, 12, I::DiamondSword),
        def("flamingsword", "Flaming Sword", E::FireAspect, I::Gunpowder, 4, I::DiamondSword),
        // Bow
        def("power", "Power", E::Power, I::EnderPearl, 4, I::Bow),
        def("flamingarrows", "Flaming Arrows", E::Flame, I::MagmaCream, 16, I::Bow),
        def("infinitybow", "Infinity Bow", E::Infinity, I::GlowstoneDust, 64, I::Bow),
        // Unbreaking
        def("unbreakingpickaxe", "Unbreaking Pickaxe", E::Unbreaking, I::Obsidian, 8, I::DiamondPickaxe),
        def("unbreakingsword", "Unbreaking Sword", E::Unbreaking, I::Obsidian, 8, I::DiamondSword),
    ]
}

fn standard_spells() -> Vec<SpellDefinition> {
    use EffectKind as F;
    use ItemKind as I;

    let def = |id, name, effect, max_amplifier, reagent| SpellDefinition {
        id,
        name,
        effect,
        max_amplifier,
        reagent,
    };

    vec![
        def("jump", "Jump", F::JumpBoost, 15, I::RabbitHide),
        def("speed", "Speed", F::Speed, 15, I::Sugar),
        def("strength", "Strength", F::Strength, 15, I::BlazePowder),
        def("waterbreathing", "Water Breathing", F::WaterBreathing, 15, I::RawFish),
        def("nightvision", "Night Vision", F::NightVision, 1, I::GoldenCarrot),
        def("invisibility", "Invisibility", F::Invisibility, 1, I::FermentedSpiderEye),
        def("sustenance", "Sustenance", F::Saturation, 30, I::Mycelium),
        def("protection", "Protection", F::Absorption, 5, I::BlazePowder),
        def("healing", "Healing", F::InstantHealth, 30, I::GlisteringMelon),
        def("healingaura", "Healing Aura", F::InstantHealth, 15, I::GoldenApple),
        def("regeneration", "Regeneration", F::Regeneration, 5, I::GhastTear),
    ]
}

fn standard_wands(config: &WandConfig) -> Vec<WandDefinition> {
    use ItemKind as I;

    let repeat = |action| WandAbility::Repeat {
        action,
        interval_ticks: config.repeat_interval_ticks,
        repeats: config.repeat_count,
    };
    let area = |action| WandAbility::Area {
        action,
        radius: config.area_radius,
    };

    vec![
        WandDefinition {
            kind: WandKind::Arrowfall,
            name: "Wand of Arrowfall",
            reagent: I::Flint,
            ability: repeat(WandAction::SpawnArrow),
        },
        WandDefinition {
            kind: WandKind::Fireball,
            name: "Fireball Wand",
            reagent: I::MagmaCream,
            ability: WandAbility::Single(WandAction::SpawnFireball),
        },
        WandDefinition {
            kind: WandKind::Firestorm,
            name: "Firestorm Wand",
            reagent: I::Gunpowder,
            ability: repeat(WandAction::SpawnSmallFireball),
        },
        WandDefinition {
            kind: WandKind::Firestrike,
            name: "Firestrike Wand",
            reagent: I::MagmaBlock,
            ability: area(AreaAction::Ignite),
        },
        WandDefinition {
            kind: WandKind::Lightning,
            name: "Wand of Lightning",
            reagent: I::BlazeRod,
            ability: area(AreaAction::Lightning),
        },
    ]
}
