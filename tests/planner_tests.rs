//! Tests for the efficiency planner (material and level modes).

use craftpath::error::CalcError;
use craftpath::models::{Material, Prices, Profession, Recipe, XpBonuses, XpTableRow};
use craftpath::planner::{compute_efficiency_plan, EfficiencyGoal};

fn recipe(
    name: &str,
    output: (&str, u64),
    xp: u32,
    required_level: u32,
    materials: &[(&str, u64)],
) -> Recipe {
    Recipe {
        id: name.to_lowercase().replace(' ', "_"),
        name: name.to_string(),
        output_item: output.0.to_string(),
        output_quantity: output.1,
        xp,
        required_level,
        materials: materials
            .iter()
            .map(|&(name, quantity)| Material::new(name, quantity))
            .collect(),
    }
}

fn profession(level: u32, current_xp: u64, recipes: Vec<Recipe>) -> Profession {
    Profession {
        id: "carpentry".to_string(),
        name: "Carpentry".to_string(),
        level,
        current_xp,
        xp_to_next_level: 250,
        recipes,
    }
}

fn table(rows: &[(u32, u64)]) -> Vec<XpTableRow> {
    rows.iter()
        .map(|&(level, xp)| XpTableRow { level, xp })
        .collect()
}

fn prices(entries: &[(&str, u64)]) -> Prices {
    let mut prices = Prices::default();
    for &(item, price) in entries {
        prices.0.insert(item.to_string(), price);
    }
    prices
}

/// Wood -> Plank (1:1, 10 XP), 2 Plank -> Board (20 XP).
fn wood_chain_recipes() -> Vec<Recipe> {
    vec![
        recipe("Plank", ("Plank", 1), 10, 1, &[("Wood", 1)]),
        recipe("Board", ("Board", 1), 20, 3, &[("Plank", 2)]),
    ]
}

fn material_goal(name: &str, quantity: u64) -> EfficiencyGoal {
    EfficiencyGoal::Material {
        name: name.to_string(),
        quantity,
    }
}

#[test]
fn test_material_mode_converts_the_stock() {
    let prof = profession(1, 0, wood_chain_recipes());
    let prices = prices(&[("Wood", 5), ("Plank", 7), ("Board", 100)]);
    let table = table(&[(1, 250)]);

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &prices,
        &XpBonuses::default(),
        &material_goal("Wood", 10),
    )
    .expect("chain starting from Wood should exist");

    assert!(!path.is_leveling_path);
    assert_eq!(path.path_title, "Optimal Path: Plank → Board");
    assert_eq!(path.starting_material, Some(Material::new("Wood", 10)));
    assert!((path.total_xp - 200.0).abs() < 1e-9);
    assert_eq!(path.total_cost, 50);
    // All ten Planks were consumed; only the Boards remain.
    assert_eq!(path.final_products, vec![Material::new("Board", 5)]);
    assert_eq!(path.final_product_value, 500);
    assert_eq!(path.net_cost, -450);
}

#[test]
fn test_material_mode_net_cost_identity() {
    let prof = profession(1, 0, wood_chain_recipes());
    let prices = prices(&[("Wood", 9), ("Board", 31)]);
    let table = table(&[(1, 250)]);

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &prices,
        &XpBonuses::default(),
        &material_goal("Wood", 7),
    )
    .unwrap();

    assert_eq!(
        path.net_cost,
        path.total_cost as i64 - path.final_product_value as i64
    );
    // 1 leftover Plank is reported alongside the Boards.
    assert_eq!(
        path.final_products,
        vec![Material::new("Board", 3), Material::new("Plank", 1)]
    );
}

#[test]
fn test_material_name_matching_is_case_insensitive() {
    let prof = profession(1, 0, wood_chain_recipes());
    let table = table(&[(1, 250)]);

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &material_goal("wOoD", 4),
    )
    .unwrap();

    // The canonical dataset name is used for the seed and the report.
    assert_eq!(path.starting_material, Some(Material::new("Wood", 4)));
    assert!(path.total_xp > 0.0);
}

#[test]
fn test_material_mode_unknown_material_is_reported() {
    let prof = profession(1, 0, wood_chain_recipes());
    let table = table(&[(1, 250)]);

    let result = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &material_goal("Granite", 10),
    );
    assert_eq!(
        result.err(),
        Some(CalcError::NoChainFound {
            material: "Granite".to_string()
        })
    );
}

#[test]
fn test_material_mode_rejects_blank_input() {
    let prof = profession(1, 0, wood_chain_recipes());
    let table = table(&[(1, 250)]);
    let bonuses = XpBonuses::default();

    let zero = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &bonuses,
        &material_goal("Wood", 0),
    );
    assert_eq!(zero.err(), Some(CalcError::InvalidQuantityOrMaterial));

    let blank = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &bonuses,
        &material_goal("   ", 10),
    );
    assert_eq!(blank.err(), Some(CalcError::InvalidQuantityOrMaterial));
}

#[test]
fn test_material_mode_prefers_the_longest_chain() {
    // Two chains start from Wood; the deeper one wins.
    let mut recipes = wood_chain_recipes();
    recipes.push(recipe("Pole", ("Pole", 1), 8, 1, &[("Wood", 2)]));
    let prof = profession(1, 0, recipes);
    let table = table(&[(1, 250)]);

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &material_goal("Wood", 4),
    )
    .unwrap();

    assert_eq!(path.path_title, "Optimal Path: Plank → Board");
    assert_eq!(path.steps.len(), 2);
}

#[test]
fn test_level_mode_partitions_levels_into_blocks() {
    // A level-1 chain and a level-3 chain split the range 1..5 in two.
    let recipes = vec![
        recipe("Birch Plank", ("Birch Plank", 1), 6, 1, &[("Birch Wood", 4)]),
        recipe("Oak Plank", ("Oak Plank", 1), 10, 3, &[("Oak Wood", 5)]),
    ];
    let prof = profession(1, 0, recipes);
    let table = table(&[(1, 100), (2, 200), (3, 300), (4, 400)]);

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &EfficiencyGoal::TargetLevel(5),
    )
    .unwrap();

    assert!(path.is_leveling_path);
    assert_eq!(path.path_title, "Leveling Roadmap: Level 1 → 5");
    assert_eq!(path.starting_material, None);

    // Block 1 covers levels 1-2 (300 XP): ceil(300 / 6) = 50 Birch Plank
    // crafts from 200 Birch Wood. Block 2 covers levels 3-4 (700 XP):
    // ceil(700 / 10) = 70 Oak Plank crafts from 350 Oak Wood.
    assert_eq!(
        path.base_materials,
        vec![
            Material::new("Birch Wood", 200),
            Material::new("Oak Wood", 350),
        ]
    );
    assert_eq!(path.steps.len(), 2);
    assert_eq!(path.steps[0].block_title.as_deref(), Some("Level 1 - 2"));
    assert_eq!(path.steps[0].crafts, 50);
    assert_eq!(path.steps[1].block_title.as_deref(), Some("Level 3 - 4"));
    assert_eq!(path.steps[1].crafts, 70);
    assert!((path.total_xp - 1000.0).abs() < 1e-9);
    assert_eq!(
        path.final_products,
        vec![
            Material::new("Birch Plank", 50),
            Material::new("Oak Plank", 70),
        ]
    );
}

#[test]
fn test_level_mode_credits_current_xp() {
    let recipes = vec![recipe(
        "Birch Plank",
        ("Birch Plank", 1),
        6,
        1,
        &[("Birch Wood", 4)],
    )];
    // 40 XP already earned: the first level only needs 60 more.
    let prof = profession(1, 40, recipes);
    let table = table(&[(1, 100), (2, 200)]);

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &EfficiencyGoal::TargetLevel(3),
    )
    .unwrap();

    // ceil(260 / 6) = 44 crafts from 176 Birch Wood.
    assert_eq!(path.base_materials, vec![Material::new("Birch Wood", 176)]);
    assert_eq!(path.steps[0].crafts, 44);
}

/// The wood chain with every step available from level 1.
fn flat_wood_chain_recipes() -> Vec<Recipe> {
    vec![
        recipe("Plank", ("Plank", 1), 10, 1, &[("Wood", 1)]),
        recipe("Board", ("Board", 1), 20, 1, &[("Plank", 2)]),
    ]
}

#[test]
fn test_level_mode_consumed_intermediates_are_reconciled() {
    let prof = profession(1, 0, flat_wood_chain_recipes());
    let prices = prices(&[("Wood", 2), ("Board", 50)]);
    let table = table(&[(1, 100), (2, 200)]);

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &prices,
        &XpBonuses::default(),
        &EfficiencyGoal::TargetLevel(3),
    )
    .unwrap();

    // One block, 300 XP. The probe yields 10 XP per Wood, so 30 Wood:
    // 30 Plank crafts (300 XP) and 15 Board crafts (300 XP).
    assert_eq!(path.base_materials, vec![Material::new("Wood", 30)]);
    assert!((path.total_xp - 600.0).abs() < 1e-9);
    // Planks are consumed by the Board step and drop out of the products.
    assert_eq!(path.final_products, vec![Material::new("Board", 15)]);
    assert_eq!(path.total_cost, 60);
    assert_eq!(path.final_product_value, 750);
    assert_eq!(path.net_cost, 60 - 750);
}

#[test]
fn test_level_mode_rejects_bad_targets() {
    let prof = profession(3, 0, wood_chain_recipes());
    let table = table(&[(1, 100), (2, 200), (3, 300), (4, 400)]);
    let bonuses = XpBonuses::default();

    let not_above = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &bonuses,
        &EfficiencyGoal::TargetLevel(3),
    );
    assert_eq!(
        not_above.err(),
        Some(CalcError::InvalidTargetLevel { target: 3, max: 5 })
    );

    let beyond_table = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &bonuses,
        &EfficiencyGoal::TargetLevel(6),
    );
    assert_eq!(
        beyond_table.err(),
        Some(CalcError::InvalidTargetLevel { target: 6, max: 5 })
    );
}

#[test]
fn test_level_mode_requires_a_discoverable_chain() {
    // Every recipe has two inputs, so no chain can start.
    let recipes = vec![recipe(
        "Table",
        ("Table", 1),
        50,
        1,
        &[("Wood", 2), ("Stone", 1)],
    )];
    let prof = profession(1, 0, recipes);
    let table = table(&[(1, 100), (2, 200)]);

    let result = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &EfficiencyGoal::TargetLevel(3),
    );
    assert_eq!(result.err(), Some(CalcError::NoChains));
}

#[test]
fn test_level_mode_rejects_zero_xp_chains() {
    let recipes = vec![recipe("Plank", ("Plank", 1), 0, 1, &[("Wood", 1)])];
    let prof = profession(1, 0, recipes);
    let table = table(&[(1, 100), (2, 200)]);

    let result = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &EfficiencyGoal::TargetLevel(3),
    );
    assert_eq!(result.err(), Some(CalcError::ZeroOrNegativeXpYield));
}

#[test]
fn test_level_mode_reports_missing_table_rows() {
    let prof = profession(1, 0, flat_wood_chain_recipes());
    let table = table(&[(1, 100), (3, 300)]);

    let result = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &XpBonuses::default(),
        &EfficiencyGoal::TargetLevel(4),
    );
    assert_eq!(
        result.err(),
        Some(CalcError::MissingXpTableEntry { level: 2 })
    );
}

#[test]
fn test_level_mode_applies_the_bonus_multiplier() {
    let recipes = vec![recipe(
        "Birch Plank",
        ("Birch Plank", 1),
        6,
        1,
        &[("Birch Wood", 4)],
    )];
    let prof = profession(1, 0, recipes);
    let table = table(&[(1, 100), (2, 200)]);
    // +50%: each craft yields 9 XP, so 300 XP needs ceil(300 / 9) = 34.
    let bonuses = XpBonuses {
        gatherer_title: true,
        egg_stuffed_peppers: true,
        server_exp_event: true,
        king_exp_event: true,
        premium: craftpath::models::PremiumKind::Farm,
    };

    let path = compute_efficiency_plan(
        &prof,
        &table,
        &Prices::default(),
        &bonuses,
        &EfficiencyGoal::TargetLevel(3),
    )
    .unwrap();

    assert_eq!(path.base_materials, vec![Material::new("Birch Wood", 136)]);
    assert_eq!(path.steps[0].crafts, 34);
    assert!((path.total_xp - 34.0 * 9.0).abs() < 1e-9);
}
