//! Written-book composition for the two spellbooks.
//!
//! Books are generated from the catalog rather than hand-maintained, so a
//! new enchantment or spell shows up in the book the moment it enters the
//! tables. Each castable line carries the command the host should run
//! when the player clicks it.

use arcanum_core::types::{CastLevel, ItemKind};
use arcanum_core::Catalog;

/// A written book ready to be handed to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSpec {
    /// Title shown on the item.
    pub title: String,
    /// Author shown on the item.
    pub author: String,
    /// Pages in reading order.
    pub pages: Vec<BookPage>,
}

/// One page of a written book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPage {
    /// Heading rendered at the top of the page.
    pub heading: String,
    /// Lines below the heading.
    pub lines: Vec<BookLine>,
}

/// One line of book text, optionally clickable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLine {
    /// The visible text.
    pub text: String,
    /// Command run when the player clicks the line, if any.
    pub click_command: Option<String>,
}

impl BookLine {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            click_command: None,
        }
    }

    fn click(text: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            click_command: Some(command.into()),
        }
    }
}

const AUTHOR: &str = "The Crimson Mage";

/// Compose the enchantments spellbook: one page per target item, one
/// clickable line per castable level.
#[must_use]
pub fn enchantments_book(catalog: &Catalog) -> BookSpec {
    let mut pages = vec![BookPage {
        heading: "Enchantments".to_string(),
        lines: vec![
            BookLine::text("Stand before your enchanting table with the item to be enchanted in your 1st slot,"),
            BookLine::text("lapis lazuli in your 2nd, redstone blocks in your 3rd,"),
            BookLine::text("and the reagents of the enchantment in your 4th."),
            BookLine::text("Then turn the page and click your desire."),
        ],
    }];

    let mut targets: Vec<ItemKind> = Vec::new();
    for def in catalog.enchantments() {
        if !targets.contains(&def.target_item) {
            targets.push(def.target_item);
        }
    }

    for target in targets {
        let mut lines = Vec::new();
        for def in catalog.enchantments().iter().filter(|d| d.target_item == target) {
            for level in 1..=def.enchantment.max_level() {
                let level = CastLevel::new(level).unwrap_or_else(|_| unreachable!("caps are 1..=5"));
                lines.push(BookLine::click(
                    format!("{} {}", def.name, level.roman()),
                    format!("/enchantitem {} {}", def.id, level.get()),
                ));
            }
        }
        pages.push(BookPage {
            heading: target.display_name().to_string(),
            lines,
        });
    }

    BookSpec {
        title: "Book of Enchantments".to_string(),
        author: AUTHOR.to_string(),
        pages,
    }
}

// Book pages hold about a dozen lines before the engine clips them.
const SPELLS_PER_PAGE: usize = 7;

/// Compose the wizardry spellbook: clickable spell lines, chunked to fit
/// on engine-sized pages.
#[must_use]
pub fn wizardry_book(catalog: &Catalog) -> BookSpec {
    let mut pages = vec![BookPage {
        heading: "Wizardry".to_string(),
        lines: vec![
            BookLine::text("Carry lapis lazuli, redstone dust, and the spell's reagent on your hotbar."),
            BookLine::text("The weakest of your experience and your reagents sets the power of the casting."),
            BookLine::text("Turn the page and click your desire."),
        ],
    }];

    for (index, chunk) in catalog.spells().chunks(SPELLS_PER_PAGE).enumerate() {
        let heading = if index == 0 {
            "Spells".to_string()
        } else {
            "Spells, continued".to_string()
        };
        pages.push(BookPage {
            heading,
            lines: chunk
                .iter()
                .map(|def| BookLine::click(def.name, format!("/wizardspell {}", def.id)))
                .collect(),
        });
    }

    BookSpec {
        title: "Book of Wizardry".to_string(),
        author: AUTHOR.to_string(),
        pages,
    }
}
