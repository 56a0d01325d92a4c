//! # Craftpath
//!
//! A library and command-line tool for planning crafting-profession
//! leveling in games with tiered production recipes.
//!
//! The calculator answers three questions:
//!
//! - How many crafts of a chosen recipe are needed to reach a target
//!   level, what do the materials cost, and is the crafting profitable?
//! - Given a stock of one raw material, how much XP and which products
//!   does its production chain yield?
//! - What is the cheapest sequence of production chains to level from the
//!   current level to a target level (a leveling roadmap)?
//!
//! Production chains are discovered automatically from the recipe list:
//! a chain starts at a recipe consuming a single raw material and follows
//! unambiguous consumer links (exactly one recipe consuming the output)
//! until the trail forks or ends.
//!
//! ## Modules
//!
//! - [`models`] - Core data structures for recipes, professions, bonuses
//!   and results
//! - [`data`] - CSV dataset loading
//! - [`xp`] - XP requirement accumulation over the level table
//! - [`chains`] - Recipe graph, chain discovery and chain simulation
//! - [`planner`] - The efficiency calculator (material and level modes)
//! - [`calculator`] - The single-recipe crafting calculator
//! - [`display`] - Output formatting for the CLI
//! - [`error`] - The calculation error taxonomy
//! - [`wasm`] - WebAssembly bindings for the browser frontend
//!
//! ## Example Usage
//!
//! ```
//! use craftpath::models::{Material, Prices, Profession, Recipe, XpBonuses, XpTableRow};
//! use craftpath::planner::{compute_efficiency_plan, EfficiencyGoal};
//!
//! let plank = Recipe {
//!     id: "oak_plank".to_string(),
//!     name: "Oak Plank".to_string(),
//!     output_item: "Oak Plank".to_string(),
//!     output_quantity: 1,
//!     xp: 10,
//!     required_level: 1,
//!     materials: vec![Material::new("Oak Wood", 1)],
//! };
//! let profession = Profession {
//!     id: "carpentry".to_string(),
//!     name: "Carpentry".to_string(),
//!     level: 1,
//!     current_xp: 0,
//!     xp_to_next_level: 250,
//!     recipes: vec![plank],
//! };
//! let xp_table = vec![XpTableRow { level: 1, xp: 250 }];
//!
//! // Convert 100 Oak Wood through the discovered chain.
//! let goal = EfficiencyGoal::Material {
//!     name: "oak wood".to_string(),
//!     quantity: 100,
//! };
//! let path = compute_efficiency_plan(
//!     &profession,
//!     &xp_table,
//!     &Prices::default(),
//!     &XpBonuses::default(),
//!     &goal,
//! )
//! .unwrap();
//! assert_eq!(path.total_xp, 1000.0);
//! ```

pub mod calculator;
pub mod chains;
pub mod data;
pub mod display;
pub mod error;
pub mod models;
pub mod planner;
pub mod wasm;
pub mod xp;
