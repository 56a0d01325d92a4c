//! Data loading functionality for Craftpath.
//!
//! This module loads the recipe dataset, the level table and the market
//! prices from CSV files in the `data/` directory.

use csv::ReaderBuilder;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use crate::models::{Material, PriceRow, Prices, Profession, Recipe, RecipeRow, XpTableRow};
use crate::xp;

/// Parses the compound `materials` CSV field.
///
/// The field holds `Name:quantity` pairs separated by `;`, e.g.
/// `"Oak Board:4;Iron Nail:8"`. Malformed pairs are dropped.
fn parse_materials(field: &str) -> Vec<Material> {
    field
        .split(';')
        .filter_map(|part| {
            let part = part.trim();
            if part.is_empty() {
                return None;
            }
            let (name, quantity) = part.rsplit_once(':')?;
            let quantity = quantity.trim().parse().ok()?;
            Some(Material::new(name.trim(), quantity))
        })
        .collect()
}

pub(crate) fn recipe_from_row(row: RecipeRow) -> Recipe {
    Recipe {
        id: row.id,
        name: row.name,
        output_item: row.output_item,
        output_quantity: row.output_quantity,
        xp: row.xp,
        required_level: row.required_level,
        materials: parse_materials(&row.materials),
    }
}

/// Loads all recipes belonging to one profession from `recipes.csv`.
///
/// Rows keep their file order, which also fixes the order chains are
/// discovered in.
pub fn load_recipes(path: &Path, profession_id: &str) -> Result<Vec<Recipe>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut recipes = Vec::new();
    for result in rdr.deserialize() {
        let row: RecipeRow = result?;
        if row.profession == profession_id {
            recipes.push(recipe_from_row(row));
        }
    }
    Ok(recipes)
}

/// Lists the distinct profession ids present in `recipes.csv`, in first
/// appearance order.
pub fn list_professions(path: &Path) -> Result<Vec<String>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut professions: Vec<String> = Vec::new();
    for result in rdr.deserialize() {
        let row: RecipeRow = result?;
        if !professions.contains(&row.profession) {
            professions.push(row.profession);
        }
    }
    Ok(professions)
}

/// Loads the level table from `xp_table.csv`.
pub fn load_xp_table(path: &Path) -> Result<Vec<XpTableRow>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut table = Vec::new();
    for result in rdr.deserialize() {
        let row: XpTableRow = result?;
        table.push(row);
    }
    Ok(table)
}

/// Loads market prices from `prices.csv`.
///
/// A missing file is not an error; it yields empty prices, so every item
/// is priced at 0.
pub fn load_prices(path: &Path) -> Result<Prices, Box<dyn Error>> {
    if !path.exists() {
        return Ok(Prices::default());
    }
    let file = File::open(path)?;
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

    let mut prices = Prices::default();
    for result in rdr.deserialize() {
        let row: PriceRow = result?;
        prices.0.insert(row.item, row.price);
    }
    Ok(prices)
}

/// Assembles a [`Profession`] from the dataset plus the player's position.
///
/// `xp_to_next_level` is resolved from the level table; beyond the
/// tabulated range the last row's value is carried.
pub fn load_profession(
    data_dir: &Path,
    id: &str,
    level: u32,
    current_xp: u64,
    xp_table: &[XpTableRow],
) -> Result<Profession, Box<dyn Error>> {
    let recipes = load_recipes(&data_dir.join("recipes.csv"), id)?;
    if recipes.is_empty() {
        return Err(format!("no recipes found for profession '{}'", id).into());
    }

    let xp_to_next_level = xp::level_xp(xp_table, level)
        .or_else(|| xp_table.last().map(|row| row.xp))
        .unwrap_or(0);

    Ok(Profession {
        id: id.to_string(),
        name: display_name(id),
        level,
        current_xp,
        xp_to_next_level,
        recipes,
    })
}

/// Derives a display name from a profession id ("carpentry" -> "Carpentry").
fn display_name(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
