//! Cost resolution — the decision logic behind every cast.
//!
//! Three variants share one shape: look at what the player has, compute
//! what the cast costs, and either produce a debit plan or reject with a
//! player-facing message. Resolution never mutates anything; handlers
//! apply the returned plan in one step, so a cast is all-or-nothing.
//!
//! Cost rules:
//!
//! - **Enchantments** (level L requested, 1..=5): lapis `L`, reagent
//!   `amount × L`, secondary `2L − 1` drawn from redstone blocks first and
//!   experience levels for the shortfall. Player must be at least level
//!   `10·L`.
//! - **Wizard spells** (level derived): `min(floor(xp/10), lapis, dust,
//!   reagent)`; each resource debited by exactly the cast level.
//! - **Wand fashioning** (flat): 64 lapis, 64 dust, 32 reagent; the reagent
//!   kind selects the wand.

use crate::catalog::{Catalog, EnchantmentDefinition, SpellDefinition, WandDefinition};
use crate::config::{CostConfig, EffectConfig};
use crate::error::{ArcanumError, Result};
use crate::types::{CastLevel, ItemKind, ItemStack, ResourceBundle};

/// Inventory slot indices with fixed roles during an enchantment cast.
pub mod enchant_slots {
    /// The item receiving the enchantment.
    pub const TARGET: usize = 0;
    /// Lapis lazuli.
    pub const LAPIS: usize = 1;
    /// Redstone blocks (optional — XP levels cover any shortfall).
    pub const REDSTONE_BLOCKS: usize = 2;
    /// The spell reagent.
    pub const REAGENT: usize = 3;
}

/// Inventory slot indices with fixed roles during wand fashioning.
pub mod wand_slots {
    /// Lapis lazuli.
    pub const LAPIS: usize = 0;
    /// Redstone dust.
    pub const DUST: usize = 1;
    /// The wand-selecting reagent.
    pub const REAGENT: usize = 2;
}

/// Number of hotbar slots scanned for wizard-spell resources.
pub const HOTBAR_SLOTS: usize = 9;

// ---------------------------------------------------------------------------
// Enchantment casts
// ---------------------------------------------------------------------------

/// A validated enchantment cast: the enchantment to apply and the exact
/// debits to take. Nothing has been consumed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnchantmentPlan {
    /// Cast level.
    pub level: CastLevel,
    /// Lapis lazuli to debit from the lapis slot.
    pub lapis_cost: u32,
    /// Redstone blocks to debit from the redstone slot.
    pub block_cost: u32,
    /// Experience levels to debit from the player.
    pub xp_level_cost: u32,
    /// Reagent quantity to debit from the reagent slot.
    pub reagent_cost: u32,
}

/// Resolve an enchantment cast against a fixed-role slot snapshot.
///
/// `slots` is the player's inventory snapshot; only slots 0–3 are
/// consulted (see [`enchant_slots`]). `xp_level` is the player's current
/// experience level.
///
/// # Errors
/// Rejects — without planning any debit — when the level exceeds the
/// engine cap, the player's experience is under `10 × L`, or any required
/// slot is empty, holds the wrong item, or is short of the computed cost.
pub fn resolve_enchantment(
    def: &EnchantmentDefinition,
    level: CastLevel,
    xp_level: u32,
    slots: &[Option<ItemStack>],
    costs: &CostConfig,
) -> Result<EnchantmentPlan> {
    let cast = u32::from(level.get());

    let required_xp = costs.xp_levels_per_cast_level * cast;
    if xp_level < required_xp {
        return Err(ArcanumError::InsufficientExperience {
            required: required_xp,
        });
    }

    if level.get() > def.enchantment.max_level() {
        return Err(ArcanumError::MaxLevelExceeded {
            name: def.name.to_string(),
            max: def.enchantment.max_level(),
        });
    }

    // Target item, 1st slot.
    let target = slot(slots, enchant_slots::TARGET).ok_or_else(|| {
        ArcanumError::SlotContents(
            "place the item to be enchanted in your 1st inventory slot".to_string(),
        )
    })?;
    if target.kind != def.target_item {
        return Err(ArcanumError::SlotContents(format!(
            "the enchantment {} must be performed on {}",
            def.name, def.target_item
        )));
    }

    // Lapis lazuli, 2nd slot.
    let lapis_cost = cast;
    let lapis = slot(slots, enchant_slots::LAPIS)
        .filter(|stack| stack.kind == ItemKind::LapisLazuli)
        .ok_or_else(|| {
            ArcanumError::SlotContents(
                "place some lapis lazuli in your 2nd inventory slot".to_string(),
            )
        })?;
    if lapis.amount < lapis_cost {
        return Err(ArcanumError::InsufficientQuantity(format!(
            "the enchantment {} {} requires at least {} lapis lazuli",
            def.name,
            level.roman(),
            lapis_cost
        )));
    }

    // Redstone blocks, 3rd slot — optional; XP levels cover the shortfall.
    let secondary_total = 2 * cast - 1;
    let available_blocks = slot(slots, enchant_slots::REDSTONE_BLOCKS)
        .filter(|stack| stack.kind == ItemKind::RedstoneBlock)
        .map_or(0, |stack| stack.amount);
    let block_cost = available_blocks.min(secondary_total);
    let xp_level_cost = secondary_total - block_cost;
    // With a retuned gate the secondary cost can outgrow the gate itself;
    // the planned debit must still be payable.
    if xp_level < xp_level_cost {
        return Err(ArcanumError::InsufficientExperience {
            required: xp_level_cost,
        });
    }

    // Reagent, 4th slot.
    let reagent_cost = def.reagent.amount_per_level * cast;
    let reagent = slot(slots, enchant_slots::REAGENT).ok_or_else(|| {
        ArcanumError::SlotContents("place the spell reagents in your 4th inventory slot".to_string())
    })?;
    if reagent.kind != def.reagent.item {
        return Err(ArcanumError::SlotContents(format!(
            "the enchantment {} must be performed with {}",
            def.name, def.reagent.item
        )));
    }
    if reagent.amount < reagent_cost {
        return Err(ArcanumError::InsufficientQuantity(format!(
            "the enchantment {} {} must be performed with at least {} {}",
            def.name,
            level.roman(),
            reagent_cost,
            def.reagent.item
        )));
    }

    Ok(EnchantmentPlan {
        level,
        lapis_cost,
        block_cost,
        xp_level_cost,
        reagent_cost,
    })
}

// ---------------------------------------------------------------------------
// Wizard-spell casts
// ---------------------------------------------------------------------------

/// Where each wizard-spell resource was found during the hotbar scan, so
/// the handler can debit the exact slots that were counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceScan {
    /// Hotbar slot holding lapis lazuli, with its count.
    pub lapis: Option<(usize, u32)>,
    /// Hotbar slot holding redstone dust, with its count.
    pub dust: Option<(usize, u32)>,
    /// Hotbar slot holding the matching reagent, with its count.
    pub reagent: Option<(usize, u32)>,
}

impl ResourceScan {
    /// Collapse the scan into per-resource counts, with a given XP budget.
    #[must_use]
    pub fn bundle(&self, xp_level: u32, costs: &CostConfig) -> ResourceBundle {
        ResourceBundle {
            xp_budget: xp_level / costs.xp_levels_per_cast_level,
            lapis: self.lapis.map_or(0, |(_, count)| count),
            dust: self.dust.map_or(0, |(_, count)| count),
            reagent: self.reagent.map_or(0, |(_, count)| count),
        }
    }
}

/// Scan the hotbar (slots 0..9 only — the rest of the inventory is
/// deliberately ignored, so players can bank surplus reagents to cap their
/// own cast level) for the three spell-casting resources.
///
/// If a resource appears in several hotbar slots the last one wins, as it
/// did in the original rules.
#[must_use]
pub fn scan_hotbar(slots: &[Option<ItemStack>], reagent: ItemKind) -> ResourceScan {
    let mut scan = ResourceScan::default();
    for (index, stack) in slots.iter().take(HOTBAR_SLOTS).enumerate() {
        let Some(stack) = stack else { continue };
        if stack.kind == ItemKind::LapisLazuli {
            scan.lapis = Some((index, stack.amount));
        }
        if stack.kind == ItemKind::RedstoneDust {
            scan.dust = Some((index, stack.amount));
        }
        if stack.kind == reagent {
            scan.reagent = Some((index, stack.amount));
        }
    }
    scan
}

/// A validated wizard-spell cast: derived level, effect parameters, and
/// the per-resource debit (equal to the level for all three resources).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpellPlan {
    /// Derived cast level (≥ 1).
    pub cast_level: u32,
    /// Effect duration in simulation ticks.
    pub duration_ticks: u32,
    /// Effect amplifier, saturated at the definition's cap.
    pub amplifier: u32,
}

/// Resolve a wizard-spell cast from an available-resource bundle.
///
/// The cast level is the weakest resource; duration scales with the level
/// unboundedly while the amplifier saturates at `def.max_amplifier` — a
/// level 7 Water Breathing cast grants Water Breathing III for 14 minutes.
///
/// # Errors
/// Returns [`ArcanumError::NotPrepared`] when any resource is zero.
pub fn resolve_spell(
    def: &SpellDefinition,
    bundle: ResourceBundle,
    effects: &EffectConfig,
) -> Result<SpellPlan> {
    let cast_level = bundle.cast_level();
    if cast_level == 0 {
        return Err(ArcanumError::NotPrepared {
            spell: def.name.to_string(),
        });
    }

    Ok(SpellPlan {
        cast_level,
        duration_ticks: effects.duration_ticks(cast_level),
        amplifier: cast_level.min(def.max_amplifier),
    })
}

// ---------------------------------------------------------------------------
// Wand fashioning
// ---------------------------------------------------------------------------

/// A validated wand fashioning: which wand, and the three flat debits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WandPlan<'a> {
    /// The wand the reagent selected.
    pub wand: &'a WandDefinition,
    /// Lapis lazuli to debit from the 1st slot.
    pub lapis_cost: u32,
    /// Redstone dust to debit from the 2nd slot.
    pub dust_cost: u32,
    /// Reagent to debit from the 3rd slot.
    pub reagent_cost: u32,
}

/// Resolve wand fashioning against the fixed-role slots (see
/// [`wand_slots`]). Costs are flat and level-free; the reagent kind picks
/// the wand.
///
/// # Errors
/// Rejects when a slot is empty, mismatched, or short, or when no wand
/// definition claims the supplied reagent. The caller owns the
/// refund-the-trigger-item policy on rejection.
pub fn resolve_wand<'a>(
    catalog: &'a Catalog,
    slots: &[Option<ItemStack>],
    costs: &CostConfig,
) -> Result<WandPlan<'a>> {
    let lapis = slot(slots, wand_slots::LAPIS)
        .filter(|stack| stack.kind == ItemKind::LapisLazuli)
        .ok_or_else(|| wand_ingredient_error("lapis lazuli", costs.wand_lapis, "1st"))?;
    if lapis.amount < costs.wand_lapis {
        return Err(wand_ingredient_error("lapis lazuli", costs.wand_lapis, "1st"));
    }

    let dust = slot(slots, wand_slots::DUST)
        .filter(|stack| stack.kind == ItemKind::RedstoneDust)
        .ok_or_else(|| wand_ingredient_error("redstone dust", costs.wand_dust, "2nd"))?;
    if dust.amount < costs.wand_dust {
        return Err(wand_ingredient_error("redstone dust", costs.wand_dust, "2nd"));
    }

    let reagent = slot(slots, wand_slots::REAGENT).ok_or_else(|| {
        wand_ingredient_error("reagent", costs.wand_reagent, "3rd")
    })?;
    let wand = catalog
        .wand_for_reagent(reagent.kind)
        .ok_or(ArcanumError::NoMatchingWand)?;
    if reagent.amount < costs.wand_reagent {
        return Err(wand_ingredient_error("reagent", costs.wand_reagent, "3rd"));
    }

    Ok(WandPlan {
        wand,
        lapis_cost: costs.wand_lapis,
        dust_cost: costs.wand_dust,
        reagent_cost: costs.wand_reagent,
    })
}

fn wand_ingredient_error(what: &str, required: u32, slot_name: &str) -> ArcanumError {
    ArcanumError::SlotContents(format!(
        "fashioning a wand requires {required} {what} in your {slot_name} inventory slot"
    ))
}

fn slot(slots: &[Option<ItemStack>], index: usize) -> Option<&ItemStack> {
    slots.get(index).and_then(Option::as_ref)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
