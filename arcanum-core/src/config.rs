//! Configuration for the Arcanum rules system.
//!
//! Maps directly to `arcanum.toml`. Every knob has a default matching the
//! original game balance, so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};

/// Top-level Arcanum configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArcanumConfig {
    /// Spell- and enchantment-cost tuning.
    #[serde(default)]
    pub costs: CostConfig,
    /// Status-effect duration tuning.
    #[serde(default)]
    pub effects: EffectConfig,
    /// Wand ability tuning.
    #[serde(default)]
    pub wands: WandConfig,
}

impl ArcanumConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `ArcanumError::Config` if the TOML is invalid or the values
    /// fail [`ArcanumConfig::validate`].
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| crate::ArcanumError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the cost arithmetic relies on.
    ///
    /// # Errors
    /// Returns `ArcanumError::Config` if `xp_levels_per_cast_level` is
    /// zero — it divides the experience level into a cast budget.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.costs.xp_levels_per_cast_level == 0 {
            return Err(crate::ArcanumError::Config(
                "costs.xp_levels_per_cast_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Resource-cost tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostConfig {
    /// Experience levels required per cast level (enchantments and spells).
    #[serde(default = "default_10")]
    pub xp_levels_per_cast_level: u32,
    /// Lapis lazuli consumed to fashion a wand.
    #[serde(default = "default_64")]
    pub wand_lapis: u32,
    /// Redstone dust consumed to fashion a wand.
    #[serde(default = "default_64")]
    pub wand_dust: u32,
    /// Reagent consumed to fashion a wand.
    #[serde(default = "default_32")]
    pub wand_reagent: u32,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            xp_levels_per_cast_level: 10,
            wand_lapis: 64,
            wand_dust: 64,
            wand_reagent: 32,
        }
    }
}

/// Status-effect application tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectConfig {
    /// Real effect duration granted per cast level, in seconds.
    #[serde(default = "default_120")]
    pub seconds_per_cast_level: u32,
    /// Simulation ticks per second (20 on stock servers).
    #[serde(default = "default_20")]
    pub ticks_per_second: u32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            seconds_per_cast_level: 120,
            ticks_per_second: 20,
        }
    }
}

impl EffectConfig {
    /// Effect duration in ticks for a given cast level.
    #[must_use]
    pub fn duration_ticks(&self, cast_level: u32) -> u32 {
        self.ticks_per_second * self.seconds_per_cast_level * cast_level
    }
}

/// Wand ability tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WandConfig {
    /// Scan radius for area abilities, per axis, in blocks.
    #[serde(default = "default_8_0")]
    pub area_radius: f64,
    /// Tick spacing between firings of a timed-repeat ability.
    #[serde(default = "default_10")]
    pub repeat_interval_ticks: u32,
    /// Number of firings in a timed-repeat ability.
    #[serde(default = "default_8")]
    pub repeat_count: u32,
}

impl Default for WandConfig {
    fn default() -> Self {
        Self {
            area_radius: 8.0,
            repeat_interval_ticks: 10,
            repeat_count: 8,
        }
    }
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_8() -> u32 {
    8
}
fn default_10() -> u32 {
    10
}
fn default_20() -> u32 {
    20
}
fn default_32() -> u32 {
    32
}
fn default_64() -> u32 {
    64
}
fn default_120() -> u32 {
    120
}
fn default_8_0() -> f64 {
    8.0
}
