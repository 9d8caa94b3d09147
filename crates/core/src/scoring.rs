//! Scoring module - line clears, T-spins, combos, back-to-back and speed
//!
//! Rules in brief:
//! - Line clears and T-spin clears use separate tables, both multiplied by level.
//! - A "difficult" clear (Tetris or any T-spin clear) following another
//!   difficult clear earns a back-to-back bonus of half the base points.
//! - Combo bonus is `COMBO_BASE * combo * level` from the second clear in a chain.
//! - Level is `1 + lines / 10`, capped at [`MAX_LEVEL`].

use crate::types::{
    Mode, SpinKind, BASE_RANK, COMBO_BASE, EMPIRE_MIN_INTERVAL_MS, EMPIRE_SPEED_PERCENT,
    FORCE_BLAST_BASE, FORCE_BLAST_PER_LEVEL, LINES_PER_LEVEL, LINE_SCORES, LINE_SCORE_FALLBACK,
    MAX_LEVEL, RANKS, SPEED_CURVE, START_LEVEL, TSPIN_NO_LINE_SCORE, TSPIN_SCORES,
    TSPIN_SCORE_FALLBACK,
};

/// Score calculation result for a lock that cleared at least one line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Table points for the clear (line or spin table), level applied
    pub base: u32,
    /// Back-to-back bonus added on top of `base`
    pub back_to_back_bonus: u32,
    /// Combo bonus added on top of `base`
    pub combo_bonus: u32,
    pub total: u32,
    /// Whether this clear counts as difficult (feeds the next clear's B2B)
    pub difficult: bool,
}

/// Classic line clear points
/// lines: number of lines cleared
/// level: current level (1-based)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(lines as u32 * LINE_SCORE_FALLBACK);
    base * level
}

/// T-spin clear points (at least one line)
pub fn calculate_tspin_score(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    let base = TSPIN_SCORES
        .get(lines)
        .copied()
        .unwrap_or(lines as u32 * TSPIN_SCORE_FALLBACK);
    base * level
}

/// Points for a T-spin that cleared nothing
pub fn calculate_tspin_no_line_score(level: u32) -> u32 {
    TSPIN_NO_LINE_SCORE * level
}

/// Combo bonus.
///
/// `combo` semantics:
/// - `-1`: no combo chain
/// - `0`: first clear in chain (no bonus)
/// - `1+`: `COMBO_BASE * combo * level`
pub fn calculate_combo_bonus(combo: i32, level: u32) -> u32 {
    if combo <= 0 {
        return 0;
    }
    COMBO_BASE * combo as u32 * level
}

/// Half of the base points, rounded half up
pub fn calculate_back_to_back_bonus(base: u32) -> u32 {
    base.div_ceil(2)
}

/// A clear is difficult when it is a Tetris or any T-spin clear
pub fn is_difficult(lines: usize, spin: Option<SpinKind>) -> bool {
    lines > 0 && (lines == 4 || spin.is_some())
}

/// Full score for a clear of `lines >= 1`.
///
/// `combo` is the chain index *after* counting this clear; `previous_b2b`
/// is whether the previous clear was difficult.
pub fn calculate_score(
    lines: usize,
    level: u32,
    spin: Option<SpinKind>,
    combo: i32,
    previous_b2b: bool,
) -> ScoreResult {
    let difficult = is_difficult(lines, spin);

    let base = match spin {
        Some(_) => calculate_tspin_score(lines, level),
        None => calculate_line_score(lines, level),
    };

    let back_to_back_bonus = if difficult && previous_b2b {
        calculate_back_to_back_bonus(base)
    } else {
        0
    };

    let combo_bonus = calculate_combo_bonus(combo, level);

    ScoreResult {
        base,
        back_to_back_bonus,
        combo_bonus,
        total: base
            .saturating_add(back_to_back_bonus)
            .saturating_add(combo_bonus),
        difficult,
    }
}

/// Drop score
/// soft drop: +1 per cell
/// hard drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells * crate::types::HARD_DROP_POINTS
    } else {
        cells * crate::types::SOFT_DROP_POINTS
    }
}

/// Level for a cumulative line count: `min(MAX_LEVEL, 1 + lines / 10)`
pub fn calculate_level(total_lines: u32) -> u32 {
    (START_LEVEL + total_lines / LINES_PER_LEVEL).min(MAX_LEVEL)
}

/// Gravity interval for a level (in milliseconds)
///
/// Empire mode runs 18% faster, never below 28ms.
pub fn get_drop_interval_ms(level: u32, mode: Mode) -> u32 {
    let idx = (level.clamp(1, SPEED_CURVE.len() as u32) - 1) as usize;
    let base = SPEED_CURVE[idx];
    match mode {
        Mode::Standard => base,
        // round(base * 0.82)
        Mode::Empire => ((base * EMPIRE_SPEED_PERCENT + 50) / 100).max(EMPIRE_MIN_INTERVAL_MS),
    }
}

/// Force gained from a clear: rewards line count, Tetrises, spins and combo depth
pub fn calculate_clear_charge(lines: usize, spin: Option<SpinKind>, combo: i32) -> f64 {
    if lines == 0 {
        return 0.0;
    }
    let mut charge = 12.0 + 16.0 * lines as f64 + 4.0 * combo.max(0) as f64;
    if lines == 4 {
        charge += 10.0;
    }
    if spin.is_some() {
        charge += 8.0;
    }
    charge
}

/// Score bonus for a successful force blast
pub fn calculate_force_blast_bonus(level: u32) -> u32 {
    FORCE_BLAST_BASE + FORCE_BLAST_PER_LEVEL * level
}

/// Rank label: the best rank whose score *or* lines threshold is met
pub fn rank_for(score: u32, lines: u32) -> &'static str {
    RANKS
        .iter()
        .find(|&&(_, min_score, min_lines)| score >= min_score || lines >= min_lines)
        .map_or(BASE_RANK, |&(label, _, _)| label)
}
