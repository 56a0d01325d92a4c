//! Calculation error taxonomy.
//!
//! Every variant is a user-correctable validation failure. The calculators
//! return these as values; nothing here is ever raised as a panic, and the
//! messages are written to be shown to the end user verbatim.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("please select a recipe to use for the calculation")]
    NoRecipeSelected,

    #[error("no production chain starting from '{material}' was found for this profession")]
    NoChainFound { material: String },

    #[error("no leveling path could be calculated for this profession; use material mode instead")]
    NoChains,

    #[error("target level {target} must be higher than the current level and at most {max}")]
    InvalidTargetLevel { target: u32, max: u32 },

    #[error("XP data for level {level} is missing")]
    MissingXpTableEntry { level: u32 },

    #[error("the selected recipe provides no XP, so the calculation is not possible")]
    ZeroOrNegativeXpYield,

    #[error("please enter a valid raw material and a quantity greater than zero")]
    InvalidQuantityOrMaterial,
}
