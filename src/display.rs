//! Display and formatting utilities for Craftpath.
//!
//! This module renders calculator results to stdout in a readable format
//! for the command-line interface.

use crate::models::{CalculationPath, Material, PlanResult};

/// Formats an amount with thousands separators.
///
/// # Example
///
/// ```
/// use craftpath::display::format_amount;
///
/// assert_eq!(format_amount(1234567), "1,234,567");
/// assert_eq!(format_amount(-950), "-950");
/// assert_eq!(format_amount(0), "0");
/// ```
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if amount < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

fn format_materials(materials: &[Material]) -> String {
    materials
        .iter()
        .map(|m| format!("{}x {}", format_amount(m.quantity as i64), m.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Prints the single-recipe calculator result.
pub fn display_plan_result(plan: &PlanResult, recipe_name: &str) {
    println!();
    println!("+================================================================+");
    println!("|                  CRAFTING CALCULATOR RESULTS                   |");
    println!("+================================================================+");
    println!();
    println!("  XP to gain:      {}", format_amount(plan.xp_to_gain as i64));
    println!(
        "  Crafts needed:   {}x {}",
        format_amount(plan.crafts_needed as i64),
        recipe_name
    );
    println!("  Total XP bonus:  +{}%", plan.total_bonus_percentage);
    println!(
        "  Total cost:      {} gold",
        format_amount(plan.total_cost as i64)
    );
    println!(
        "  Total revenue:   {} gold",
        format_amount(plan.total_revenue as i64)
    );
    println!("  Profit / loss:   {} gold", format_amount(plan.profit));

    if !plan.materials.is_empty() {
        println!();
        println!("Required materials:");
        for material in &plan.materials {
            println!(
                "  {}x {}",
                format_amount(material.quantity as i64),
                material.name
            );
        }
    }
}

/// Prints an efficiency calculation path, in either mode.
pub fn display_calculation_path(path: &CalculationPath, bonus_percentage: u32) {
    println!();
    println!("+================================================================+");
    println!("|                 EFFICIENCY CALCULATOR RESULTS                  |");
    println!("+================================================================+");
    println!();
    println!("{}", path.path_title);
    if bonus_percentage > 0 {
        println!("Active bonus: +{}%", bonus_percentage);
    }
    println!();

    if path.is_leveling_path {
        println!(
            "  Base materials:      {}",
            format_materials(&path.base_materials)
        );
    } else if let Some(start) = &path.starting_material {
        println!(
            "  Starting material:   {}x {}",
            format_amount(start.quantity as i64),
            start.name
        );
    }
    println!(
        "  Total cost:          {} gold",
        format_amount(path.total_cost as i64)
    );
    println!(
        "  Final products:      {}",
        format_materials(&path.final_products)
    );
    println!(
        "  Final product value: {} gold",
        format_amount(path.final_product_value as i64)
    );
    println!(
        "  Net cost:            {} gold",
        format_amount(path.net_cost)
    );
    println!(
        "  Total XP gained:     {} XP",
        format_amount(path.total_xp.round() as i64)
    );

    println!();
    println!("Production steps:");
    for step in &path.steps {
        if let Some(title) = &step.block_title {
            println!("  [{}]", title);
        }
        println!(
            "    {}x {} -> {}x {} -> {}x {}   +{} XP",
            format_amount(step.input.quantity as i64),
            step.input.name,
            format_amount(step.crafts as i64),
            step.recipe_name,
            format_amount(step.output.quantity as i64),
            step.output.name,
            format_amount(step.xp_gained.round() as i64),
        );
    }
}
