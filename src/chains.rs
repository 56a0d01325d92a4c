//! Recipe graph construction, chain discovery, and chain simulation.
//!
//! A chain is an ordered sequence of recipes where each recipe's output
//! feeds the next recipe's input, starting from a raw (non-craftable)
//! material. Discovery only follows unambiguous links: an item consumed by
//! zero or several recipes ends the chain at that point, so no general
//! path search is ever needed.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{CraftingStep, DiscoveredChain, Material, Recipe};

/// Index answering "which recipes consume item X" for one recipe list.
pub struct RecipeIndex<'a> {
    consumers: HashMap<String, Vec<&'a Recipe>>,
    craftable: HashSet<&'a str>,
}

impl<'a> RecipeIndex<'a> {
    /// Builds the index. An empty recipe list yields empty structures.
    pub fn build(recipes: &'a [Recipe]) -> Self {
        let craftable = recipes.iter().map(|r| r.output_item.as_str()).collect();
        let mut consumers: HashMap<String, Vec<&Recipe>> = HashMap::new();
        for recipe in recipes {
            for material in &recipe.materials {
                consumers
                    .entry(material.name.clone())
                    .or_default()
                    .push(recipe);
            }
        }
        RecipeIndex {
            consumers,
            craftable,
        }
    }

    /// Recipes listing `item` as an input, in recipe-list order.
    pub fn consumers_of(&self, item: &str) -> &[&'a Recipe] {
        self.consumers.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether some recipe produces `item`.
    pub fn is_craftable(&self, item: &str) -> bool {
        self.craftable.contains(item)
    }
}

/// What the simulator does when a step's crafts floor to zero.
///
/// Material mode stops: the chain ran out of input, so later steps cannot
/// produce anything the user asked about. The probe and leveling-block
/// simulations skip the step and keep going instead. The two behaviors
/// are intentionally kept as distinct paths rather than unified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortfall {
    Stop,
    Skip,
}

/// Outcome of one chain simulation run.
#[derive(Debug, Clone)]
pub struct Simulation {
    /// One entry per step that actually crafted something.
    pub steps: Vec<CraftingStep>,
    /// Total XP gained, bonuses applied.
    pub total_xp: f64,
    /// Remaining item quantities: leftovers plus produced outputs.
    pub inventory: BTreeMap<String, u64>,
}

/// Forward-simulates `chain` from a starting stock of `seed`.
///
/// Per step: `crafts = floor(available / input_quantity)`; the step then
/// consumes `crafts * input_quantity` and produces `crafts *
/// output_quantity`, earning `crafts * xp * multiplier` XP. Fractional
/// leftovers are never convertible and stay in the inventory. Each chain
/// step reads only its first material entry.
pub fn simulate_chain(
    chain: &[Recipe],
    seed: &Material,
    multiplier: f64,
    on_shortfall: Shortfall,
) -> Simulation {
    let mut inventory: BTreeMap<String, u64> = BTreeMap::new();
    inventory.insert(seed.name.clone(), seed.quantity);
    let mut steps = Vec::new();
    let mut total_xp = 0.0;

    for recipe in chain {
        let Some(input) = recipe.materials.first().filter(|m| m.quantity > 0) else {
            match on_shortfall {
                Shortfall::Stop => break,
                Shortfall::Skip => continue,
            }
        };
        let available = inventory.get(&input.name).copied().unwrap_or(0);
        let crafts = available / input.quantity;
        if crafts == 0 {
            match on_shortfall {
                Shortfall::Stop => break,
                Shortfall::Skip => continue,
            }
        }

        let xp_gained = crafts as f64 * recipe.xp as f64 * multiplier;
        total_xp += xp_gained;

        let consumed = crafts * input.quantity;
        let produced = crafts * recipe.output_quantity;
        *inventory.entry(input.name.clone()).or_insert(0) -= consumed;
        *inventory.entry(recipe.output_item.clone()).or_insert(0) += produced;

        steps.push(CraftingStep {
            recipe_name: recipe.name.clone(),
            crafts,
            xp_gained,
            input: Material::new(input.name.clone(), consumed),
            output: Material::new(recipe.output_item.clone(), produced),
            block_title: None,
        });
    }

    Simulation {
        steps,
        total_xp,
        inventory,
    }
}

/// Discovers every maximal unambiguous chain in `recipes`.
///
/// A chain starts at a recipe with exactly one input material whose name
/// no recipe produces. From there the chain grows while the current
/// output has exactly one consuming recipe that is not already part of
/// the chain. Each chain is then probed once with a single batch of its
/// raw material to derive its base XP yield and final output.
pub fn discover_chains(recipes: &[Recipe]) -> Vec<DiscoveredChain> {
    let index = RecipeIndex::build(recipes);
    let mut chains = Vec::new();

    for start in recipes {
        let raw = match start.materials.as_slice() {
            [only] if !index.is_craftable(&only.name) => only,
            _ => continue,
        };

        let mut steps = vec![start.clone()];
        let mut current_output = start.output_item.clone();
        loop {
            let next = match index.consumers_of(&current_output) {
                [single] => *single,
                _ => break,
            };
            if steps.iter().any(|s| s.id == next.id) {
                break; // avoid loops
            }
            current_output = next.output_item.clone();
            steps.push(next.clone());
        }

        // One-batch probe: seeding exactly one craft's worth of the raw
        // material runs the start step once and the rest under skip
        // semantics, yielding the chain's base XP and final output.
        let probe_seed = Material::new(raw.name.clone(), raw.quantity);
        let probe = simulate_chain(&steps, &probe_seed, 1.0, Shortfall::Skip);

        let final_step = &steps[steps.len() - 1];
        let final_output = Material::new(
            final_step.output_item.clone(),
            probe
                .inventory
                .get(&final_step.output_item)
                .copied()
                .unwrap_or(0),
        );

        chains.push(DiscoveredChain {
            start_material: raw.name.clone(),
            start_recipe: start.clone(),
            required_level: steps.iter().map(|s| s.required_level).max().unwrap_or(0),
            total_base_xp: probe.total_xp,
            xp_per_raw_material: probe.total_xp / raw.quantity as f64,
            final_output,
            steps,
        });
    }

    chains
}
