//! The single-recipe crafting calculator.
//!
//! Answers "how many crafts of this recipe to reach my target level, what
//! will the materials cost, and what is the profit if I sell the crafts".

use crate::error::CalcError;
use crate::models::{Material, PlanResult, Prices, Profession, Recipe, XpBonuses, XpTableRow};
use crate::xp;

/// Computes crafts needed, materials, cost, revenue and profit for
/// leveling with one recipe.
///
/// Revenue is priced by the recipe's display name, matching how the price
/// list keys crafted goods. Errors are user-correctable validation
/// failures; see [`CalcError`].
pub fn compute_single_recipe_plan(
    profession: &Profession,
    recipe: Option<&Recipe>,
    target_level: u32,
    xp_table: &[XpTableRow],
    prices: &Prices,
    bonuses: &XpBonuses,
) -> Result<PlanResult, CalcError> {
    let recipe = recipe.ok_or(CalcError::NoRecipeSelected)?;
    let total_bonus_percentage = bonuses.total_bonus_percentage();

    let xp_needed = xp::xp_to_reach(profession, target_level, xp_table)?;
    if xp_needed == 0 {
        return Ok(PlanResult {
            xp_to_gain: 0,
            crafts_needed: 0,
            materials: Vec::new(),
            total_cost: 0,
            total_revenue: 0,
            profit: 0,
            total_bonus_percentage,
        });
    }

    let xp_per_craft = recipe.xp as f64 * bonuses.multiplier();
    if xp_per_craft <= 0.0 {
        return Err(CalcError::ZeroOrNegativeXpYield);
    }

    let crafts_needed = (xp_needed as f64 / xp_per_craft).ceil() as u64;
    let materials: Vec<Material> = recipe
        .materials
        .iter()
        .map(|m| Material::new(m.name.clone(), m.quantity * crafts_needed))
        .collect();
    let total_cost: u64 = materials
        .iter()
        .map(|m| m.quantity * prices.price_of(&m.name))
        .sum();
    let total_revenue = crafts_needed * prices.price_of(&recipe.name);

    Ok(PlanResult {
        xp_to_gain: xp_needed,
        crafts_needed,
        materials,
        total_cost,
        total_revenue,
        profit: total_revenue as i64 - total_cost as i64,
        total_bonus_percentage,
    })
}
