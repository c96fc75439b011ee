//! Slash-command parsing and handling.
//!
//! Five commands: `/enchantitem`, `/wizardspell`, `/enchantmentsbook`,
//! `/wizardrybook`, and `/clearspellbooks`. Parsing is separated from
//! handling so the spellbook click regions (which run the same commands)
//! share one code path with typed chat.
//!
//! Every gameplay rejection surfaces as chat feedback through
//! [`dispatch`]; operational faults are logged instead.

use tracing::{error, info};

use arcanum_core::error::{ArcanumError, Result};
use arcanum_core::resolver::{enchant_slots, resolve_enchantment, resolve_spell, scan_hotbar};
use arcanum_core::types::{CastLevel, PlayerId};
use arcanum_core::{ArcanumConfig, BookKind, Catalog, GrantTracker};

use crate::host::{BlockKind, GameHost};
use crate::spellbook;

/// A parsed Arcanum command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Cast an enchantment at a requested level.
    EnchantItem {
        /// Catalog id of the enchantment.
        enchantment: String,
        /// Requested cast level.
        level: CastLevel,
    },
    /// Cast a wizard spell at a derived level.
    WizardSpell {
        /// Catalog id of the spell.
        spell: String,
    },
    /// Hand the caller the enchantments spellbook.
    EnchantmentsBook,
    /// Hand the caller the wizardry spellbook.
    WizardryBook,
    /// Administrative: reset the caller's spellbook grants.
    ClearSpellbooks,
}

impl Command {
    /// Parse a command by name and argument list. Returns `None` for
    /// command names this plugin does not own.
    ///
    /// # Errors
    /// Returns [`ArcanumError::MissingArgument`] for an owned command with
    /// a missing argument, or [`ArcanumError::LevelOutOfRange`] for a bad
    /// level.
    pub fn parse(name: &str, args: &[&str]) -> Option<Result<Self>> {
        let parsed = match name {
            "enchantitem" => Self::parse_enchant_item(args),
            "wizardspell" => Self::parse_wizard_spell(args),
            "enchantmentsbook" => Ok(Self::EnchantmentsBook),
            "wizardrybook" => Ok(Self::WizardryBook),
            "clearspellbooks" => Ok(Self::ClearSpellbooks),
            _ => return None,
        };
        Some(parsed)
    }

    fn parse_enchant_item(args: &[&str]) -> Result<Self> {
        let enchantment = args.first().ok_or(ArcanumError::MissingArgument(
            "you must state what enchantment you are performing",
        ))?;
        let level = args.get(1).ok_or(ArcanumError::MissingArgument(
            "you must state the level of enchantment you desire",
        ))?;
        Ok(Self::EnchantItem {
            enchantment: (*enchantment).to_string(),
            level: level.parse()?,
        })
    }

    fn parse_wizard_spell(args: &[&str]) -> Result<Self> {
        let spell = args.first().ok_or(ArcanumError::MissingArgument(
            "you must state what wizard spell you are casting",
        ))?;
        Ok(Self::WizardSpell {
            spell: (*spell).to_string(),
        })
    }
}

/// Shared services the command handlers draw on.
#[derive(Debug)]
pub struct CommandContext<'a> {
    /// The rule tables.
    pub catalog: &'a Catalog,
    /// Spellbook grant state.
    pub grants: &'a GrantTracker,
    /// Cost and effect tuning.
    pub config: &'a ArcanumConfig,
}

/// Run a parsed command for `player`, echoing player-facing rejections as
/// chat and logging operational faults.
pub fn dispatch<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    player: PlayerId,
    command: &Command,
) {
    let outcome = match command {
        Command::EnchantItem { enchantment, level } => {
            enchant_item(ctx, host, player, enchantment, *level)
        }
        Command::WizardSpell { spell } => wizard_spell(ctx, host, player, spell),
        Command::EnchantmentsBook => enchantments_book(ctx, host, player),
        Command::WizardryBook => wizardry_book(ctx, host, player),
        Command::ClearSpellbooks => clear_spellbooks(ctx, host, player),
    };

    if let Err(err) = outcome {
        if err.is_player_facing() {
            host.send_message(player, &err.to_string());
        } else {
            error!(%player, ?command, %err, "command failed");
        }
    }
}

/// Cast an enchantment onto the item in the player's 1st slot.
///
/// The player must be looking at an enchanting table. On success the
/// enchantment is applied and every planned debit is taken in one pass.
///
/// # Errors
/// Any rejection from the cost resolver, plus
/// [`ArcanumError::NotAtEnchantingTable`].
pub fn enchant_item<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    player: PlayerId,
    enchantment: &str,
    level: CastLevel,
) -> Result<()> {
    if host.gaze_block(player) != Some(BlockKind::EnchantingTable) {
        return Err(ArcanumError::NotAtEnchantingTable);
    }

    let def = ctx.catalog.enchantment(enchantment)?;
    let xp = host.xp_level(player);
    let slots = host.inventory(player);
    let plan = resolve_enchantment(def, level, xp, &slots, &ctx.config.costs)?;

    host.enchant_item(player, enchant_slots::TARGET, def.enchantment, level.get());
    debit_slot(host, player, &slots, enchant_slots::LAPIS, plan.lapis_cost);
    if plan.block_cost > 0 {
        debit_slot(host, player, &slots, enchant_slots::REDSTONE_BLOCKS, plan.block_cost);
    }
    if plan.xp_level_cost > 0 {
        host.set_xp_level(player, xp - plan.xp_level_cost);
    }
    debit_slot(host, player, &slots, enchant_slots::REAGENT, plan.reagent_cost);

    info!(%player, enchantment = def.id, level = %level, "enchantment cast");
    host.send_message(
        player,
        &format!(
            "your {} has been enchanted with {} {}",
            def.target_item,
            def.name,
            level.roman()
        ),
    );
    Ok(())
}

/// Cast a wizard spell at the level the hotbar affords.
///
/// # Errors
/// [`ArcanumError::UnknownSpell`] or [`ArcanumError::NotPrepared`].
pub fn wizard_spell<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    player: PlayerId,
    spell: &str,
) -> Result<()> {
    let def = ctx.catalog.spell(spell)?;
    let slots = host.inventory(player);
    let scan = scan_hotbar(&slots, def.reagent);
    let bundle = scan.bundle(host.xp_level(player), &ctx.config.costs);
    let plan = resolve_spell(def, bundle, &ctx.config.effects)?;

    // A positive cast level guarantees all three scan slots are present.
    for found in [scan.lapis, scan.dust, scan.reagent] {
        if let Some((slot, count)) = found {
            host.set_slot_amount(player, slot, count - plan.cast_level);
        }
    }

    host.apply_effect(player, def.effect, plan.duration_ticks, plan.amplifier);
    info!(%player, spell = def.id, level = plan.cast_level, "wizard spell cast");
    host.send_message(
        player,
        &format!("you have cast {} at level {}", def.name, plan.cast_level),
    );
    Ok(())
}

/// Hand the player the enchantments spellbook.
///
/// The gate is marked before the book is given: if the write-through
/// fails, no book leaves the catalog and the one-shot invariant holds.
///
/// # Errors
/// Database errors from the grant write-through.
pub fn enchantments_book<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    player: PlayerId,
) -> Result<()> {
    ctx.grants.mark_granted(player, BookKind::Enchantments)?;
    host.give_book(player, spellbook::enchantments_book(ctx.catalog));
    Ok(())
}

/// Hand the player the wizardry spellbook.
///
/// The gate is marked before the book is given, as in
/// [`enchantments_book`].
///
/// # Errors
/// Database errors from the grant write-through.
pub fn wizardry_book<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    player: PlayerId,
) -> Result<()> {
    ctx.grants.mark_granted(player, BookKind::Wizardry)?;
    host.give_book(player, spellbook::wizardry_book(ctx.catalog));
    Ok(())
}

/// Reset the player's grants so both books can be earned again.
///
/// # Errors
/// Database errors from the grant write-through.
pub fn clear_spellbooks<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    player: PlayerId,
) -> Result<()> {
    ctx.grants.reset(player)?;
    host.send_message(player, "your spellbook grants have been cleared");
    Ok(())
}

// Debit a fixed-role slot against the snapshot count taken at resolve
// time. The resolver guarantees the slot was present and sufficient.
// Also used by the fashioning flow in `events`.
pub(crate) fn debit_slot<H: GameHost>(
    host: &mut H,
    player: PlayerId,
    snapshot: &[Option<arcanum_core::types::ItemStack>],
    slot: usize,
    cost: u32,
) {
    if let Some(stack) = snapshot.get(slot).and_then(Option::as_ref) {
        host.set_slot_amount(player, slot, stack.amount.saturating_sub(cost));
    }
}
