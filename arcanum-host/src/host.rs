//! The host-engine boundary.
//!
//! [`GameHost`] is the one seam between the rules and the server engine:
//! every read of player state and every world mutation the handlers
//! perform goes through it. Production code implements it over the real
//! server API; tests implement it over plain maps and vectors, which is
//! what makes every handler path exercisable without an engine.
//!
//! The trait deliberately exposes inventory *snapshots* for reading and
//! per-slot writes for mutation. Handlers resolve against the snapshot
//! and then apply the returned plan slot by slot, so a cast is
//! all-or-nothing from the rules' point of view.

use arcanum_core::catalog::WandAction;
use arcanum_core::types::{EffectKind, EnchantKind, EntityRef, ItemStack, MobKind, PlayerId};

use crate::spellbook::BookSpec;

/// What the player is looking at, as far as the rules care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// An enchanting table.
    EnchantingTable,
    /// Anything else.
    Other,
}

/// Engine services the handlers need.
///
/// Implementations are expected to be cheap to call on the simulation
/// thread; none of these methods should block.
pub trait GameHost {
    /// Whether the player is still connected to the server.
    fn is_online(&self, player: PlayerId) -> bool;

    /// The player's current experience level.
    fn xp_level(&self, player: PlayerId) -> u32;

    /// Set the player's experience level.
    fn set_xp_level(&mut self, player: PlayerId, level: u32);

    /// The block the player's crosshair rests on, if any.
    fn gaze_block(&self, player: PlayerId) -> Option<BlockKind>;

    /// Snapshot of the player's inventory, slot 0 first.
    fn inventory(&self, player: PlayerId) -> Vec<Option<ItemStack>>;

    /// Set the stack count in one inventory slot; a count of zero clears
    /// the slot.
    fn set_slot_amount(&mut self, player: PlayerId, slot: usize, amount: u32);

    /// Remove the item a table-trigger event was fired for (the book and
    /// quill or blaze rod sitting in the enchanting slot).
    fn consume_trigger_item(&mut self, player: PlayerId);

    /// Apply an enchantment to the item in the given slot.
    fn enchant_item(
        &mut self,
        player: PlayerId,
        slot: usize,
        enchantment: EnchantKind,
        level: u8,
    );

    /// Apply a timed status effect to the player.
    fn apply_effect(&mut self, player: PlayerId, effect: EffectKind, duration_ticks: u32, amplifier: u32);

    /// Drop an item stack into the world at the player's feet.
    fn drop_item_at(&mut self, player: PlayerId, stack: ItemStack);

    /// Hand the player a written book.
    fn give_book(&mut self, player: PlayerId, book: BookSpec);

    /// Entities within `radius` blocks of the player, per axis.
    fn nearby_entities(&self, player: PlayerId, radius: f64) -> Vec<(EntityRef, MobKind)>;

    /// Set the ground at the entity's feet on fire.
    fn ignite(&mut self, target: EntityRef);

    /// Strike the entity with lightning.
    fn strike_lightning(&mut self, target: EntityRef);

    /// Launch a projectile ahead of the caster.
    fn launch(&mut self, caster: PlayerId, action: WandAction);

    /// Send a chat message to the player.
    fn send_message(&mut self, player: PlayerId, message: &str);
}
