//! Data models and structures for Craftpath.
//!
//! This module contains the core data structures used throughout the
//! calculator: recipes and professions, market prices, XP bonuses, and the
//! result types produced by the planners.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// A named item quantity.
///
/// Item names are the unique key across the whole system; there are no
/// separate numeric item ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// The item name (e.g., "Oak Wood").
    pub name: String,
    /// How many units of the item.
    pub quantity: u64,
}

impl Material {
    pub fn new(name: impl Into<String>, quantity: u64) -> Self {
        Material {
            name: name.into(),
            quantity,
        }
    }
}

/// A crafting recipe belonging to a profession.
///
/// # Example
///
/// ```
/// use craftpath::models::{Material, Recipe};
///
/// let plank = Recipe {
///     id: "oak_plank".to_string(),
///     name: "Oak Plank".to_string(),
///     output_item: "Oak Plank".to_string(),
///     output_quantity: 1,
///     xp: 10,
///     required_level: 1,
///     materials: vec![Material::new("Oak Wood", 5)],
/// };
/// assert_eq!(plank.materials[0].quantity, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Stable identifier (e.g., "oak_plank").
    pub id: String,
    /// Display name shown in results.
    pub name: String,
    /// Item produced by one craft.
    pub output_item: String,
    /// Units produced per craft (>= 1).
    pub output_quantity: u64,
    /// Base XP granted per craft, before bonuses.
    pub xp: u32,
    /// Minimum profession level to craft this recipe.
    pub required_level: u32,
    /// Input materials consumed per craft, in dataset order.
    pub materials: Vec<Material>,
}

/// A profession: the player's level/XP position plus its recipe book.
///
/// The calculators treat this as read-only input; only the surrounding
/// application mutates the level and XP fields.
#[derive(Debug, Clone)]
pub struct Profession {
    pub id: String,
    pub name: String,
    /// Current level (>= 1).
    pub level: u32,
    /// XP earned within the current level (0 <= current_xp < xp_to_next_level).
    pub current_xp: u64,
    /// XP required to complete the current level.
    pub xp_to_next_level: u64,
    /// All recipes of this profession, learned or not.
    pub recipes: Vec<Recipe>,
}

/// One row of the level table: the XP required to complete `level`.
///
/// The table is ordered and strictly increasing by level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct XpTableRow {
    pub level: u32,
    pub xp: u64,
}

/// Market prices keyed by item name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Prices(pub HashMap<String, u64>);

impl Prices {
    /// Unit price for an item; items without an entry are priced at 0.
    pub fn price_of(&self, item: &str) -> u64 {
        self.0.get(item).copied().unwrap_or(0)
    }
}

/// The mutually-exclusive premium subscription kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PremiumKind {
    #[default]
    None,
    Craft,
    Farm,
    Exp,
}

impl FromStr for PremiumKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(PremiumKind::None),
            "craft" => Ok(PremiumKind::Craft),
            "farm" => Ok(PremiumKind::Farm),
            "exp" => Ok(PremiumKind::Exp),
            other => Err(format!(
                "unknown premium kind '{}' (expected none, craft, farm or exp)",
                other
            )),
        }
    }
}

/// Active XP bonuses: four independent flags plus the premium kind.
///
/// Each flag contributes +10%; premium contributes {none: 0, craft: 30,
/// farm: 10, exp: 10}. All contributions are additive.
///
/// # Example
///
/// ```
/// use craftpath::models::{PremiumKind, XpBonuses};
///
/// let bonuses = XpBonuses {
///     gatherer_title: true,
///     premium: PremiumKind::Craft,
///     ..XpBonuses::default()
/// };
/// assert_eq!(bonuses.total_bonus_percentage(), 40);
/// assert_eq!(bonuses.multiplier(), 1.40);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct XpBonuses {
    pub gatherer_title: bool,
    pub egg_stuffed_peppers: bool,
    pub server_exp_event: bool,
    pub king_exp_event: bool,
    pub premium: PremiumKind,
}

impl XpBonuses {
    /// Total additive bonus, in percent.
    pub fn total_bonus_percentage(&self) -> u32 {
        let mut total = 0;
        if self.gatherer_title {
            total += 10;
        }
        if self.egg_stuffed_peppers {
            total += 10;
        }
        if self.server_exp_event {
            total += 10;
        }
        if self.king_exp_event {
            total += 10;
        }
        total += match self.premium {
            PremiumKind::None => 0,
            PremiumKind::Craft => 30,
            PremiumKind::Farm => 10,
            PremiumKind::Exp => 10,
        };
        total
    }

    /// Multiplicative factor applied to base recipe XP.
    pub fn multiplier(&self) -> f64 {
        1.0 + self.total_bonus_percentage() as f64 / 100.0
    }
}

/// A linear production chain discovered for a profession.
///
/// Chains are recomputed on every calculation and never cached.
#[derive(Debug, Clone)]
pub struct DiscoveredChain {
    /// The raw (non-craftable) material the chain starts from.
    pub start_material: String,
    /// The recipe consuming the raw material.
    pub start_recipe: Recipe,
    /// The full ordered chain, starting with `start_recipe`.
    pub steps: Vec<Recipe>,
    /// Base XP from one probe run of the chain, before bonuses.
    pub total_base_xp: f64,
    /// Highest required level across the chain's steps.
    pub required_level: u32,
    /// `total_base_xp` divided by the start recipe's per-craft raw input.
    pub xp_per_raw_material: f64,
    /// The last step's output item and the quantity the probe produced.
    pub final_output: Material,
}

/// One simulated crafting step in a calculation path.
#[derive(Debug, Clone, PartialEq)]
pub struct CraftingStep {
    pub recipe_name: String,
    /// Times the recipe is crafted (floor-divided).
    pub crafts: u64,
    /// XP gained by this step, bonuses applied.
    pub xp_gained: f64,
    /// Input material consumed by this step in total.
    pub input: Material,
    /// Output material produced by this step in total.
    pub output: Material,
    /// Set on the first step of each level block in a leveling roadmap.
    pub block_title: Option<String>,
}

/// Final result of an efficiency calculation, in either mode.
#[derive(Debug, Clone)]
pub struct CalculationPath {
    pub path_title: String,
    /// Total XP gained across all steps, bonuses applied.
    pub total_xp: f64,
    /// Cost of the purchased raw materials.
    pub total_cost: u64,
    /// The seed material in material mode; `None` for leveling roadmaps.
    pub starting_material: Option<Material>,
    /// Raw materials required, aggregated per item (leveling roadmaps).
    pub base_materials: Vec<Material>,
    pub steps: Vec<CraftingStep>,
    /// Items left over once the chain has run.
    pub final_products: Vec<Material>,
    /// Market value of the final products.
    pub final_product_value: u64,
    /// `total_cost - final_product_value`; negative means the run profits.
    pub net_cost: i64,
    /// Distinguishes leveling roadmaps from single-material runs.
    pub is_leveling_path: bool,
}

/// Result of the single-recipe crafting calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanResult {
    /// XP required to reach the target level from the current position.
    pub xp_to_gain: u64,
    /// Crafts of the selected recipe needed to earn that XP.
    pub crafts_needed: u64,
    /// Input materials for all crafts, per item.
    pub materials: Vec<Material>,
    pub total_cost: u64,
    pub total_revenue: u64,
    /// `total_revenue - total_cost`.
    pub profit: i64,
    /// The bonus percentage that was applied, echoed for display.
    pub total_bonus_percentage: u32,
}

// ============================================================================
// CSV Row Structures
// ============================================================================

/// CSV row structure for `recipes.csv`.
///
/// The `materials` column holds `Name:quantity` pairs separated by `;`,
/// e.g. `"Oak Board:4;Iron Nail:8"`.
#[derive(Debug, Deserialize)]
pub struct RecipeRow {
    /// Profession id this recipe belongs to.
    pub profession: String,
    pub id: String,
    pub name: String,
    pub output_item: String,
    pub output_quantity: u64,
    pub xp: u32,
    pub required_level: u32,
    pub materials: String,
}

/// CSV row structure for `prices.csv`.
#[derive(Debug, Deserialize)]
pub struct PriceRow {
    pub item: String,
    pub price: u64,
}
