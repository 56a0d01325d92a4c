//! WebAssembly bindings for Craftpath.
//!
//! This module provides JavaScript-accessible functions for the browser
//! frontend. Every function takes a JSON string input and returns a JSON
//! string result; the recipe dataset and level table are embedded into the
//! wasm binary.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::calculator::compute_single_recipe_plan;
use crate::data::recipe_from_row;
use crate::models::{Material, Prices, Profession, Recipe, RecipeRow, XpBonuses, XpTableRow};
use crate::planner::{compute_efficiency_plan, EfficiencyGoal};
use crate::xp;

fn default_level() -> u32 {
    1
}

/// JavaScript-friendly input for the single-recipe calculator.
#[derive(Debug, Clone, Deserialize)]
pub struct JsRecipePlanInput {
    pub profession: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub current_xp: u64,
    pub recipe_id: String,
    pub target_level: u32,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub bonuses: XpBonuses,
}

/// JavaScript-friendly input for the efficiency calculator.
///
/// Setting `target_level` switches to level mode; otherwise `material`
/// and `quantity` select material mode, mirroring the form behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct JsEfficiencyInput {
    pub profession: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub current_xp: u64,
    #[serde(default)]
    pub material: String,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default)]
    pub target_level: Option<u32>,
    #[serde(default)]
    pub prices: Prices,
    #[serde(default)]
    pub bonuses: XpBonuses,
}

/// JavaScript-friendly crafting step output.
#[derive(Debug, Clone, Serialize)]
pub struct JsCraftingStep {
    pub recipe_name: String,
    pub crafts: u64,
    pub xp_gained: f64,
    pub input: Material,
    pub output: Material,
    pub block_title: Option<String>,
}

/// JavaScript-friendly calculation path output.
#[derive(Debug, Clone, Serialize)]
pub struct JsCalculationPath {
    pub path_title: String,
    pub total_xp: f64,
    pub total_cost: u64,
    pub starting_material: Option<Material>,
    pub base_materials: Vec<Material>,
    pub steps: Vec<JsCraftingStep>,
    pub final_products: Vec<Material>,
    pub final_product_value: u64,
    pub net_cost: i64,
    pub is_leveling_path: bool,
}

/// JavaScript-friendly efficiency calculation result.
#[derive(Debug, Clone, Serialize)]
pub struct JsEfficiencyResult {
    pub success: bool,
    pub error: Option<String>,
    pub total_bonus_percentage: u32,
    pub path: Option<JsCalculationPath>,
}

/// JavaScript-friendly single-recipe calculator result.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JsRecipePlanResult {
    pub success: bool,
    pub error: Option<String>,
    pub xp_to_gain: u64,
    pub crafts_needed: u64,
    pub materials: Vec<Material>,
    pub total_cost: u64,
    pub total_revenue: u64,
    pub profit: i64,
    pub total_bonus_percentage: u32,
}

/// Parses the embedded recipe dataset for one profession.
fn embedded_recipes(profession: &str) -> Vec<Recipe> {
    let data = include_str!("../data/recipes.csv");
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut recipes = Vec::new();
    for result in rdr.deserialize::<RecipeRow>() {
        if let Ok(row) = result {
            if row.profession == profession {
                recipes.push(recipe_from_row(row));
            }
        }
    }
    recipes
}

/// Parses the embedded level table.
fn embedded_xp_table() -> Vec<XpTableRow> {
    let data = include_str!("../data/xp_table.csv");
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut table = Vec::new();
    for result in rdr.deserialize::<XpTableRow>() {
        if let Ok(row) = result {
            table.push(row);
        }
    }
    table
}

/// Assembles a profession from the embedded dataset, or `None` when the
/// id has no recipes.
fn embedded_profession(
    id: &str,
    level: u32,
    current_xp: u64,
    table: &[XpTableRow],
) -> Option<Profession> {
    let recipes = embedded_recipes(id);
    if recipes.is_empty() {
        return None;
    }
    let xp_to_next_level = xp::level_xp(table, level)
        .or_else(|| table.last().map(|row| row.xp))
        .unwrap_or(0);
    Some(Profession {
        id: id.to_string(),
        name: id.to_string(),
        level,
        current_xp,
        xp_to_next_level,
        recipes,
    })
}

fn recipe_plan_failure(error: String, total_bonus_percentage: u32) -> String {
    serde_json::to_string(&JsRecipePlanResult {
        success: false,
        error: Some(error),
        total_bonus_percentage,
        ..JsRecipePlanResult::default()
    })
    .unwrap_or_default()
}

fn efficiency_failure(error: String, total_bonus_percentage: u32) -> String {
    serde_json::to_string(&JsEfficiencyResult {
        success: false,
        error: Some(error),
        total_bonus_percentage,
        path: None,
    })
    .unwrap_or_default()
}

/// Runs the single-recipe crafting calculator.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn calculate_recipe_plan(input_json: &str) -> String {
    let input: JsRecipePlanInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => return recipe_plan_failure(format!("Invalid input: {}", e), 0),
    };
    let bonus_pct = input.bonuses.total_bonus_percentage();

    let table = embedded_xp_table();
    let profession = match embedded_profession(&input.profession, input.level, input.current_xp, &table)
    {
        Some(p) => p,
        None => {
            return recipe_plan_failure(
                format!("unknown profession '{}'", input.profession),
                bonus_pct,
            )
        }
    };

    let recipe = profession.recipes.iter().find(|r| r.id == input.recipe_id);
    match compute_single_recipe_plan(
        &profession,
        recipe,
        input.target_level,
        &table,
        &input.prices,
        &input.bonuses,
    ) {
        Ok(plan) => serde_json::to_string(&JsRecipePlanResult {
            success: true,
            error: None,
            xp_to_gain: plan.xp_to_gain,
            crafts_needed: plan.crafts_needed,
            materials: plan.materials,
            total_cost: plan.total_cost,
            total_revenue: plan.total_revenue,
            profit: plan.profit,
            total_bonus_percentage: plan.total_bonus_percentage,
        })
        .unwrap_or_default(),
        Err(err) => recipe_plan_failure(err.to_string(), bonus_pct),
    }
}

/// Runs the efficiency calculator in material or level mode.
///
/// Takes a JSON string input and returns a JSON string result.
#[wasm_bindgen]
pub fn calculate_efficiency(input_json: &str) -> String {
    let input: JsEfficiencyInput = match serde_json::from_str(input_json) {
        Ok(i) => i,
        Err(e) => return efficiency_failure(format!("Invalid input: {}", e), 0),
    };
    let bonus_pct = input.bonuses.total_bonus_percentage();

    let table = embedded_xp_table();
    let profession = match embedded_profession(&input.profession, input.level, input.current_xp, &table)
    {
        Some(p) => p,
        None => {
            return efficiency_failure(
                format!("unknown profession '{}'", input.profession),
                bonus_pct,
            )
        }
    };

    let goal = match input.target_level {
        Some(target) => EfficiencyGoal::TargetLevel(target),
        None => EfficiencyGoal::Material {
            name: input.material.clone(),
            quantity: input.quantity,
        },
    };

    match compute_efficiency_plan(&profession, &table, &input.prices, &input.bonuses, &goal) {
        Ok(path) => {
            let steps: Vec<JsCraftingStep> = path
                .steps
                .iter()
                .map(|s| JsCraftingStep {
                    recipe_name: s.recipe_name.clone(),
                    crafts: s.crafts,
                    xp_gained: s.xp_gained,
                    input: s.input.clone(),
                    output: s.output.clone(),
                    block_title: s.block_title.clone(),
                })
                .collect();

            serde_json::to_string(&JsEfficiencyResult {
                success: true,
                error: None,
                total_bonus_percentage: bonus_pct,
                path: Some(JsCalculationPath {
                    path_title: path.path_title,
                    total_xp: path.total_xp,
                    total_cost: path.total_cost,
                    starting_material: path.starting_material,
                    base_materials: path.base_materials,
                    steps,
                    final_products: path.final_products,
                    final_product_value: path.final_product_value,
                    net_cost: path.net_cost,
                    is_leveling_path: path.is_leveling_path,
                }),
            })
            .unwrap_or_default()
        }
        Err(err) => efficiency_failure(err.to_string(), bonus_pct),
    }
}

/// Get the list of professions in the embedded dataset.
/// Returns a JSON array of profession ids.
#[wasm_bindgen]
pub fn get_professions() -> String {
    let data = include_str!("../data/recipes.csv");
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(data.as_bytes());

    let mut professions: Vec<String> = Vec::new();
    for result in rdr.deserialize::<RecipeRow>() {
        if let Ok(row) = result {
            if !professions.contains(&row.profession) {
                professions.push(row.profession);
            }
        }
    }
    serde_json::to_string(&professions).unwrap_or_default()
}

/// Get the version of the calculator.
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
