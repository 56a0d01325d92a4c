//! XP requirement accumulation over the level table.
//!
//! The level table maps each level to the XP needed to complete it. The
//! accumulator sums those rows across a level range, crediting the XP the
//! player has already earned within their current level.

use crate::error::CalcError;
use crate::models::{Profession, XpTableRow};

/// XP required to complete `level`, if the table has a row for it.
pub fn level_xp(table: &[XpTableRow], level: u32) -> Option<u64> {
    table.iter().find(|row| row.level == level).map(|row| row.xp)
}

/// Highest tabulated level, or 0 for an empty table.
///
/// The table is ordered by level, so the last row carries the maximum.
pub fn max_level(table: &[XpTableRow]) -> u32 {
    table.last().map(|row| row.level).unwrap_or(0)
}

/// Sums the XP needed to finish every level in `[from, to]` inclusive.
///
/// The profession's current level contributes only its remaining XP
/// (`table[level] - current_xp`); every other level contributes its full
/// table value. Any level without a table row is an error.
pub fn xp_for_level_span(
    profession: &Profession,
    from: u32,
    to: u32,
    table: &[XpTableRow],
) -> Result<u64, CalcError> {
    let mut total = 0u64;
    for level in from..=to {
        let xp = level_xp(table, level).ok_or(CalcError::MissingXpTableEntry { level })?;
        if level == profession.level {
            total += xp.saturating_sub(profession.current_xp);
        } else {
            total += xp;
        }
    }
    Ok(total)
}

/// Total additional XP required to advance from the profession's current
/// position to `target_level`.
///
/// The target must be above the current level and no higher than one past
/// the last tabulated level (the level reached by completing the final
/// table row).
pub fn xp_to_reach(
    profession: &Profession,
    target_level: u32,
    table: &[XpTableRow],
) -> Result<u64, CalcError> {
    let max = max_level(table) + 1;
    if target_level <= profession.level || target_level > max {
        return Err(CalcError::InvalidTargetLevel {
            target: target_level,
            max,
        });
    }
    xp_for_level_span(profession, profession.level, target_level - 1, table)
}
