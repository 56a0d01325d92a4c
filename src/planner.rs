//! Path planning for the efficiency calculator.
//!
//! Two modes share the discovered chains: material mode converts a given
//! stock of one raw material through its best chain, and level mode
//! partitions a level range into blocks, each served by the best chain the
//! player qualifies for, producing a full leveling roadmap.

use std::collections::BTreeMap;

use crate::chains::{discover_chains, simulate_chain, Shortfall};
use crate::error::CalcError;
use crate::models::{
    CalculationPath, CraftingStep, DiscoveredChain, Material, Prices, Profession, XpBonuses,
    XpTableRow,
};
use crate::xp;

/// What an efficiency calculation is asked to achieve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EfficiencyGoal {
    /// Convert `quantity` units of the named raw material.
    Material { name: String, quantity: u64 },
    /// Produce a leveling roadmap up to the target level.
    TargetLevel(u32),
}

/// Entry point for both efficiency modes.
///
/// Chains are rediscovered from the profession's recipe list on every
/// call; nothing is cached between invocations.
pub fn compute_efficiency_plan(
    profession: &Profession,
    xp_table: &[XpTableRow],
    prices: &Prices,
    bonuses: &XpBonuses,
    goal: &EfficiencyGoal,
) -> Result<CalculationPath, CalcError> {
    let multiplier = bonuses.multiplier();
    let chains = discover_chains(&profession.recipes);

    match goal {
        EfficiencyGoal::Material { name, quantity } => {
            material_plan(&chains, name, *quantity, prices, multiplier)
        }
        EfficiencyGoal::TargetLevel(target) => {
            leveling_plan(profession, &chains, *target, xp_table, prices, multiplier)
        }
    }
}

/// Runs the best chain for one raw material once, with stop-on-shortfall
/// semantics.
///
/// The material name is matched case-insensitively; among several chains
/// starting from the same material the one with the most steps wins (a
/// policy choice favoring deeper production, not a correctness rule).
fn material_plan(
    chains: &[DiscoveredChain],
    material: &str,
    quantity: u64,
    prices: &Prices,
    multiplier: f64,
) -> Result<CalculationPath, CalcError> {
    let material = material.trim();
    if material.is_empty() || quantity == 0 {
        return Err(CalcError::InvalidQuantityOrMaterial);
    }

    let wanted = material.to_lowercase();
    let mut candidates: Vec<&DiscoveredChain> = chains
        .iter()
        .filter(|c| c.start_material.to_lowercase() == wanted)
        .collect();
    if candidates.is_empty() {
        return Err(CalcError::NoChainFound {
            material: material.to_string(),
        });
    }
    candidates.sort_by(|a, b| b.steps.len().cmp(&a.steps.len()));
    let best = candidates[0];

    // Seed with the chain's canonical material name so a case-mismatched
    // query still reaches the first step.
    let seed = Material::new(best.start_material.clone(), quantity);
    let run = simulate_chain(&best.steps, &seed, multiplier, Shortfall::Stop);

    let final_products: Vec<Material> = run
        .inventory
        .iter()
        .filter(|(name, qty)| name.as_str() != best.start_material && **qty > 0)
        .map(|(name, qty)| Material::new(name.clone(), *qty))
        .collect();
    let final_product_value = market_value(&final_products, prices);
    let total_cost = quantity * prices.price_of(&best.start_material);

    let step_names: Vec<&str> = best.steps.iter().map(|r| r.name.as_str()).collect();

    Ok(CalculationPath {
        path_title: format!("Optimal Path: {}", step_names.join(" → ")),
        total_xp: run.total_xp,
        total_cost,
        starting_material: Some(seed),
        base_materials: Vec::new(),
        steps: run.steps,
        final_products,
        final_product_value,
        net_cost: total_cost as i64 - final_product_value as i64,
        is_leveling_path: false,
    })
}

/// A contiguous run of levels served by the same chain.
struct LevelBlock<'a> {
    from: u32,
    to: u32,
    chain: &'a DiscoveredChain,
}

/// Assigns each level in `[current, target)` the highest-requirement chain
/// the player qualifies for at that level, merging consecutive levels with
/// the same start material into blocks.
///
/// `sorted` must be ordered by required level, descending. A level no
/// chain qualifies for is left unassigned.
fn assign_level_blocks<'a>(
    sorted: &[&'a DiscoveredChain],
    current: u32,
    target: u32,
) -> Vec<LevelBlock<'a>> {
    let mut blocks: Vec<LevelBlock> = Vec::new();
    for level in current..target {
        let Some(chain) = sorted.iter().find(|c| c.required_level <= level).copied() else {
            continue;
        };
        match blocks.last_mut() {
            Some(last) if last.chain.start_material == chain.start_material => last.to = level,
            _ => blocks.push(LevelBlock {
                from: level,
                to: level,
                chain,
            }),
        }
    }
    blocks
}

/// Builds the leveling roadmap: per block, the XP need determines how many
/// chain runs to buy raw material for, and one skip-on-shortfall
/// simulation produces the block's steps.
fn leveling_plan(
    profession: &Profession,
    chains: &[DiscoveredChain],
    target_level: u32,
    xp_table: &[XpTableRow],
    prices: &Prices,
    multiplier: f64,
) -> Result<CalculationPath, CalcError> {
    let max = xp::max_level(xp_table) + 1;
    if target_level <= profession.level || target_level > max {
        return Err(CalcError::InvalidTargetLevel {
            target: target_level,
            max,
        });
    }
    if chains.is_empty() {
        return Err(CalcError::NoChains);
    }

    let mut sorted: Vec<&DiscoveredChain> = chains.iter().collect();
    sorted.sort_by(|a, b| b.required_level.cmp(&a.required_level));
    let blocks = assign_level_blocks(&sorted, profession.level, target_level);

    let mut steps: Vec<CraftingStep> = Vec::new();
    let mut base_materials: BTreeMap<String, u64> = BTreeMap::new();
    let mut total_xp = 0.0;

    for block in &blocks {
        let block_xp = xp::xp_for_level_span(profession, block.from, block.to, xp_table)?;
        if block_xp == 0 {
            continue;
        }

        let xp_per_run = block.chain.total_base_xp * multiplier;
        if xp_per_run <= 0.0 {
            return Err(CalcError::ZeroOrNegativeXpYield);
        }
        let runs_needed = (block_xp as f64 / xp_per_run).ceil() as u64;
        if runs_needed == 0 {
            continue;
        }

        let per_run = block
            .chain
            .start_recipe
            .materials
            .first()
            .map(|m| m.quantity)
            .unwrap_or(0);
        let raw_needed = runs_needed * per_run;
        *base_materials
            .entry(block.chain.start_material.clone())
            .or_insert(0) += raw_needed;

        let seed = Material::new(block.chain.start_material.clone(), raw_needed);
        let run = simulate_chain(&block.chain.steps, &seed, multiplier, Shortfall::Skip);
        total_xp += run.total_xp;

        let block_title = if block.from == block.to {
            format!("Level {}", block.from)
        } else {
            format!("Level {} - {}", block.from, block.to)
        };
        for (i, mut step) in run.steps.into_iter().enumerate() {
            if i == 0 {
                step.block_title = Some(block_title.clone());
            }
            steps.push(step);
        }
    }

    let total_cost: u64 = base_materials
        .iter()
        .map(|(name, qty)| qty * prices.price_of(name))
        .sum();
    let final_products = reconcile_final_products(&steps);
    let final_product_value = market_value(&final_products, prices);

    Ok(CalculationPath {
        path_title: format!(
            "Leveling Roadmap: Level {} → {}",
            profession.level, target_level
        ),
        total_xp,
        total_cost,
        starting_material: None,
        base_materials: base_materials
            .into_iter()
            .map(|(name, quantity)| Material { name, quantity })
            .collect(),
        steps,
        final_products,
        final_product_value,
        net_cost: total_cost as i64 - final_product_value as i64,
        is_leveling_path: true,
    })
}

/// Collapses step outputs into the roadmap's final product list.
///
/// An output no step consumes accumulates in full; each step's input is
/// then subtracted from any bucket of the same name, dropping buckets that
/// reach zero. This reconciles intermediates carried across blocks.
fn reconcile_final_products(steps: &[CraftingStep]) -> Vec<Material> {
    let mut buckets: BTreeMap<String, i64> = BTreeMap::new();
    for step in steps {
        let consumed_elsewhere = steps.iter().any(|s| s.input.name == step.output.name);
        if !consumed_elsewhere {
            *buckets.entry(step.output.name.clone()).or_insert(0) += step.output.quantity as i64;
        }
        if let Some(bucket) = buckets.get_mut(&step.input.name) {
            *bucket -= step.input.quantity as i64;
            if *bucket <= 0 {
                buckets.remove(&step.input.name);
            }
        }
    }
    buckets
        .into_iter()
        .map(|(name, quantity)| Material::new(name, quantity as u64))
        .collect()
}

fn market_value(products: &[Material], prices: &Prices) -> u64 {
    products
        .iter()
        .map(|m| m.quantity * prices.price_of(&m.name))
        .sum()
}
