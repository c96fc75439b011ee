//! Engine event handlers.
//!
//! Two event surfaces drive everything that is not a typed command: the
//! enchanting table (spellbook grants, wand fashioning) and the held-item
//! swing (wand activation). Handlers take every collaborator by reference
//! so tests can run them against a fake host.

use tracing::{error, info, warn};

use arcanum_core::error::Result;
use arcanum_core::resolver::{resolve_wand, wand_slots};
use arcanum_core::types::{ItemKind, ItemStack, PlayerId};
use arcanum_core::BookKind;

use crate::commands::{self, CommandContext};
use crate::host::GameHost;
use crate::wand::{Activation, WandDispatcher, WandScheduler};

/// Fired when a player places an item into the enchanting slot of an
/// enchanting table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrepareEnchantEvent {
    /// The player at the table.
    pub enchanter: PlayerId,
    /// The item placed in the enchanting slot.
    pub item: ItemStack,
}

/// What the player did with their held item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractAction {
    /// Swung at the air.
    LeftClickAir,
    /// Swung at a block.
    LeftClickBlock,
    /// Used on the air.
    RightClickAir,
    /// Used on a block.
    RightClickBlock,
}

/// Fired when a player interacts with their held item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInteractEvent {
    /// The interacting player.
    pub player: PlayerId,
    /// What they did.
    pub action: InteractAction,
    /// What they held while doing it, if anything.
    pub item: Option<ItemStack>,
}

/// Route an enchanting-table event: a book and quill earns spellbooks, a
/// plain blaze rod starts wand fashioning. Everything else belongs to the
/// vanilla table.
pub fn on_prepare_enchant<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    event: &PrepareEnchantEvent,
) {
    match event.item.kind {
        ItemKind::BookAndQuill => grant_spellbook(ctx, host, event.enchanter),
        // A tagged rod is a finished wand, not fashioning stock.
        ItemKind::BlazeRod if event.item.wand.is_none() => {
            fashion_wand(ctx, host, event.enchanter);
        }
        _ => {}
    }
}

/// Route a held-item interaction: a left-click on air with a fashioned
/// wand triggers its ability.
pub fn on_player_interact<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    dispatcher: &mut WandDispatcher,
    scheduler: &mut WandScheduler,
    event: &PlayerInteractEvent,
) {
    if event.action != InteractAction::LeftClickAir {
        return;
    }
    let Some(held) = &event.item else { return };

    match dispatcher.activate(host, scheduler, ctx.catalog, event.player, held) {
        Ok(Activation::Fired | Activation::Busy | Activation::NotAWand) => {}
        Err(err) if err.is_player_facing() => {
            host.send_message(event.player, &err.to_string());
        }
        Err(err) => error!(player = %event.player, %err, "wand activation failed"),
    }
}

// Sacrificing a book and quill earns each spellbook once, in a fixed
// order: enchantments first, wizardry second, nothing thereafter. The
// book and quill is only consumed once the grant has been recorded.
fn grant_spellbook<H: GameHost>(ctx: &CommandContext<'_>, host: &mut H, player: PlayerId) {
    let outcome = if !ctx.grants.is_granted(player, BookKind::Enchantments) {
        commands::enchantments_book(ctx, host, player)
    } else if !ctx.grants.is_granted(player, BookKind::Wizardry) {
        commands::wizardry_book(ctx, host, player)
    } else {
        // Both earned already; the book and quill stays on the table.
        return;
    };

    match outcome {
        Ok(()) => host.consume_trigger_item(player),
        Err(err) => error!(%player, %err, "spellbook grant failed"),
    }
}

// Fashion a wand from the blaze rod on the table. The rod is consumed up
// front; every failure path refunds a fresh one at the player's feet.
fn fashion_wand<H: GameHost>(ctx: &CommandContext<'_>, host: &mut H, player: PlayerId) {
    host.consume_trigger_item(player);

    match try_fashion(ctx, host, player) {
        Ok(name) => {
            info!(%player, wand = name, "wand fashioned");
            host.send_message(player, &format!("you have fashioned a {name}"));
        }
        Err(err) => {
            host.drop_item_at(player, ItemStack::new(ItemKind::BlazeRod, 1));
            if err.is_player_facing() {
                host.send_message(player, &err.to_string());
            } else {
                warn!(%player, %err, "wand fashioning failed");
            }
        }
    }
}

fn try_fashion<H: GameHost>(
    ctx: &CommandContext<'_>,
    host: &mut H,
    player: PlayerId,
) -> Result<&'static str> {
    let slots = host.inventory(player);
    let plan = resolve_wand(ctx.catalog, &slots, &ctx.config.costs)?;

    commands::debit_slot(host, player, &slots, wand_slots::LAPIS, plan.lapis_cost);
    commands::debit_slot(host, player, &slots, wand_slots::DUST, plan.dust_cost);
    commands::debit_slot(host, player, &slots, wand_slots::REAGENT, plan.reagent_cost);
    host.drop_item_at(player, ItemStack::wand(plan.wand.kind, plan.wand.name));

    Ok(plan.wand.name)
}
