//! Craftpath - Command Line Interface
//!
//! This is the main entry point for the crafting calculator.
//! Run with `--help` to see all available options.

use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::process;

use craftpath::{
    calculator::compute_single_recipe_plan,
    data::{load_prices, load_profession, load_xp_table},
    display::{display_calculation_path, display_plan_result},
    error::CalcError,
    models::{PremiumKind, XpBonuses},
    planner::{compute_efficiency_plan, EfficiencyGoal},
};

/// Command-line arguments for Craftpath.
#[derive(Parser, Debug)]
#[command(name = "craftpath")]
#[command(author, version, about = "Crafting profession leveling and production chain calculator", long_about = None)]
struct Cli {
    /// Directory containing recipes.csv, xp_table.csv and prices.csv
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Profession id to calculate for (e.g. carpentry)
    #[arg(short, long)]
    profession: String,

    /// Current profession level
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// XP already earned within the current level
    #[arg(long, default_value_t = 0)]
    current_xp: u64,

    /// Gatherer title bonus (+10% XP)
    #[arg(long)]
    gatherer_title: bool,

    /// Egg stuffed peppers food bonus (+10% XP)
    #[arg(long)]
    egg_stuffed_peppers: bool,

    /// Server EXP event bonus (+10% XP)
    #[arg(long)]
    server_exp_event: bool,

    /// King EXP event bonus (+10% XP)
    #[arg(long)]
    king_exp_event: bool,

    /// Premium subscription kind (none, craft, farm or exp)
    #[arg(long, default_value = "none")]
    premium: PremiumKind,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// How many crafts of one recipe to reach a target level
    Recipe {
        /// Recipe id to craft (e.g. oak_plank)
        #[arg(long)]
        id: String,

        /// Level to reach
        #[arg(long)]
        target_level: u32,
    },

    /// Run a stock of raw material through its best production chain
    Material {
        /// Raw material name (matched case-insensitively)
        #[arg(long)]
        name: String,

        /// Units of the raw material available
        #[arg(long, default_value_t = 100)]
        quantity: u64,
    },

    /// Build a leveling roadmap up to a target level
    Level {
        /// Level to reach
        #[arg(long)]
        target: u32,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !cli.data_dir.exists() {
        eprintln!(
            "Error: data directory '{}' not found. Please run from the project root.",
            cli.data_dir.display()
        );
        process::exit(1);
    }

    let xp_table = load_xp_table(&cli.data_dir.join("xp_table.csv"))?;
    let prices = load_prices(&cli.data_dir.join("prices.csv"))?;
    let profession = load_profession(
        &cli.data_dir,
        &cli.profession,
        cli.level,
        cli.current_xp,
        &xp_table,
    )?;

    let bonuses = XpBonuses {
        gatherer_title: cli.gatherer_title,
        egg_stuffed_peppers: cli.egg_stuffed_peppers,
        server_exp_event: cli.server_exp_event,
        king_exp_event: cli.king_exp_event,
        premium: cli.premium,
    };

    println!("Craftpath - Profession Calculator");
    println!("================================================================");
    println!();
    println!("Configuration:");
    println!(
        "  Profession:  {} (level {}, {} XP into the level)",
        profession.name, profession.level, profession.current_xp
    );
    println!("  Recipes:     {}", profession.recipes.len());
    println!("  XP bonus:    +{}%", bonuses.total_bonus_percentage());

    let result: Result<(), CalcError> = match &cli.command {
        Command::Recipe { id, target_level } => {
            match profession.recipes.iter().find(|r| r.id == *id) {
                Some(recipe) => compute_single_recipe_plan(
                    &profession,
                    Some(recipe),
                    *target_level,
                    &xp_table,
                    &prices,
                    &bonuses,
                )
                .map(|plan| display_plan_result(&plan, &recipe.name)),
                None => {
                    eprintln!(
                        "Error: no recipe with id '{}' in profession '{}'.",
                        id, profession.id
                    );
                    process::exit(1);
                }
            }
        }
        Command::Material { name, quantity } => {
            let goal = EfficiencyGoal::Material {
                name: name.clone(),
                quantity: *quantity,
            };
            compute_efficiency_plan(&profession, &xp_table, &prices, &bonuses, &goal)
                .map(|path| display_calculation_path(&path, bonuses.total_bonus_percentage()))
        }
        Command::Level { target } => {
            let goal = EfficiencyGoal::TargetLevel(*target);
            compute_efficiency_plan(&profession, &xp_table, &prices, &bonuses, &goal)
                .map(|path| display_calculation_path(&path, bonuses.total_bonus_percentage()))
        }
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("Error: {}", err);
        process::exit(1);
    }

    Ok(())
}
