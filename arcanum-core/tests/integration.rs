//! Integration tests — end-to-end casting and grant flows.
//!
//! These tests run the catalog, the cost resolver, configuration, and the
//! persistent grant store together, the way a host plugin would during a
//! play session.

use arcanum_core::catalog::Catalog;
use arcanum_core::config::ArcanumConfig;
use arcanum_core::grants::{BookKind, GrantTracker};
use arcanum_core::persistence::GrantStore;
use arcanum_core::resolver::{
    enchant_slots, resolve_enchantment, resolve_spell, resolve_wand, scan_hotbar,
};
use arcanum_core::types::{CastLevel, ItemKind, ItemStack, PlayerId, WandKind};

fn stack(kind: ItemKind, amount: u32) -> Option<ItemStack> {
    Some(ItemStack::new(kind, amount))
}

// ---------------------------------------------------------------------------
// Enchantment: spellbook click → catalog → plan
// ---------------------------------------------------------------------------

#[test]
fn spellbook_click_resolves_to_a_full_plan() {
    let config = ArcanumConfig::default();
    let catalog = Catalog::standard(&config.wands).expect("standard catalog");

    // The book renders "Efficiency III"; the click runs `/enchantitem
    // efficiency 3`. Walk the same path.
    let level: CastLevel = "III".parse().expect("numeral parses");
    let def = catalog.enchantment("efficiency").expect("in catalog");

    let slots = vec![
        stack(ItemKind::DiamondPickaxe, 1),
        stack(ItemKind::LapisLazuli, 16),
        stack(ItemKind::RedstoneBlock, 2),
        stack(ItemKind::Quartz, 64),
    ];
    let plan = resolve_enchantment(def, level, 30, &slots, &config.costs).expect("casts");

    assert_eq!(plan.lapis_cost, 3);
    assert_eq!(plan.reagent_cost, 24); // 8 quartz per level
    assert_eq!(plan.block_cost, 2);
    assert_eq!(plan.xp_level_cost, 3); // 2·3−1 = 5, two paid in blocks
}

#[test]
fn retuned_experience_gate_applies_everywhere() {
    let config =
        ArcanumConfig::from_toml("[costs]\nxp_levels_per_cast_level = 5\n").expect("valid");
    let catalog = Catalog::standard(&config.wands).expect("standard catalog");
    let def = catalog.enchantment("respiration").expect("in catalog");

    let slots = vec![
        stack(ItemKind::IronHelmet, 1),
        stack(ItemKind::LapisLazuli, 10),
        None,
        stack(ItemKind::RawFish, 64),
    ];

    // Level 2 now gates at experience level 10 instead of 20.
    let level = CastLevel::new(2).expect("valid");
    assert!(resolve_enchantment(def, level, 10, &slots, &config.costs).is_ok());
    assert!(resolve_enchantment(def, level, 9, &slots, &config.costs).is_err());

    // And the derived spell budget doubles.
    let mut hotbar: Vec<Option<ItemStack>> = vec![None; 9];
    hotbar[0] = stack(ItemKind::LapisLazuli, 64);
    hotbar[1] = stack(ItemKind::RedstoneDust, 64);
    hotbar[2] = stack(ItemKind::Sugar, 64);
    let scan = scan_hotbar(&hotbar, ItemKind::Sugar);
    assert_eq!(scan.bundle(30, &config.costs).xp_budget, 6);
}

// ---------------------------------------------------------------------------
// Wizard spell: hotbar snapshot → scan → plan
// ---------------------------------------------------------------------------

#[test]
fn hotbar_snapshot_drives_the_whole_spell_cast() {
    let config = ArcanumConfig::default();
    let catalog = Catalog::standard(&config.wands).expect("standard catalog");
    let def = catalog.spell("regeneration").expect("in catalog");

    let mut hotbar: Vec<Option<ItemStack>> = vec![None; 9];
    hotbar[0] = stack(ItemKind::LapisLazuli, 6);
    hotbar[3] = stack(ItemKind::RedstoneDust, 4);
    hotbar[7] = stack(ItemKind::GhastTear, 9);

    let scan = scan_hotbar(&hotbar, def.reagent);
    let bundle = scan.bundle(52, &config.costs); // budget 5
    let plan = resolve_spell(def, bundle, &config.effects).expect("casts");

    assert_eq!(plan.cast_level, 4); // dust binds
    assert_eq!(plan.duration_ticks, 4 * 2400);
    assert_eq!(plan.amplifier, 4); // regeneration caps at 5

    // The scan remembers where each resource sits so the handler can
    // debit exactly those slots.
    assert_eq!(scan.lapis, Some((0, 6)));
    assert_eq!(scan.dust, Some((3, 4)));
    assert_eq!(scan.reagent, Some((7, 9)));
}

// ---------------------------------------------------------------------------
// Wand fashioning under retuned costs
// ---------------------------------------------------------------------------

#[test]
fn cheap_server_fashioning_costs_come_from_config() {
    let config = ArcanumConfig::from_toml(
        "[costs]\nwand_lapis = 8\nwand_dust = 8\nwand_reagent = 4\n",
    )
    .expect("valid");
    let catalog = Catalog::standard(&config.wands).expect("standard catalog");

    let slots = vec![
        stack(ItemKind::LapisLazuli, 8),
        stack(ItemKind::RedstoneDust, 8),
        stack(ItemKind::MagmaBlock, 4),
    ];
    let plan = resolve_wand(&catalog, &slots, &config.costs).expect("fashions");
    assert_eq!(plan.wand.kind, WandKind::Firestrike);
    assert_eq!(plan.lapis_cost, 8);
    assert_eq!(plan.reagent_cost, 4);
}

// ---------------------------------------------------------------------------
// Grant lifecycle: grant → persist → restart → restore
// ---------------------------------------------------------------------------

#[test]
fn grants_survive_a_server_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("grants.db");
    let veteran = PlayerId::new();
    let newcomer = PlayerId::new();

    // First session: the veteran earns both books.
    {
        let store = GrantStore::open(&path).expect("open");
        let tracker = GrantTracker::with_store(store).expect("load");
        tracker
            .mark_granted(veteran, BookKind::Enchantments)
            .expect("grant");
        tracker
            .mark_granted(veteran, BookKind::Wizardry)
            .expect("grant");
    }

    // Second session: state is restored from disk.
    let store = GrantStore::open(&path).expect("reopen");
    let tracker = GrantTracker::with_store(store).expect("load");

    assert!(tracker.is_granted(veteran, BookKind::Enchantments));
    assert!(tracker.is_granted(veteran, BookKind::Wizardry));
    assert!(!tracker.is_granted(newcomer, BookKind::Enchantments));

    // An admin reset persists too.
    tracker.reset(veteran).expect("reset");
    drop(tracker);

    let store = GrantStore::open(&path).expect("reopen again");
    let tracker = GrantTracker::with_store(store).expect("load");
    assert!(!tracker.is_granted(veteran, BookKind::Enchantments));
}

// ---------------------------------------------------------------------------
// Rejections never consume anything
// ---------------------------------------------------------------------------

#[test]
fn a_rejected_cast_plans_no_debit() {
    let config = ArcanumConfig::default();
    let catalog = Catalog::standard(&config.wands).expect("standard catalog");
    let def = catalog.enchantment("protection").expect("in catalog");

    // Ghast tears are one short of the level 4 cost (2 per level).
    let slots = vec![
        stack(ItemKind::IronChestplate, 1),
        stack(ItemKind::LapisLazuli, 64),
        stack(ItemKind::RedstoneBlock, 64),
        stack(ItemKind::GhastTear, 7),
    ];
    let level = CastLevel::new(4).expect("valid");
    let before = slots.clone();

    assert!(resolve_enchantment(def, level, 40, &slots, &config.costs).is_err());
    // The snapshot is untouched; resolution is read-only by construction.
    assert_eq!(slots, before);
    assert_eq!(slots[enchant_slots::REAGENT].as_ref().map(|s| s.amount), Some(7));
}
