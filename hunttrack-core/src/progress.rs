//! Real-money goal progress derived from accumulated in-game currency.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_FINAL_GOAL, DEFAULT_INITIAL_INVESTMENT, GP_PER_TC, VALUE_PER_TC};
use crate::drops::BossDropRecord;
use crate::hunt::HuntRecord;

/// Fixed real-money goal parameters for the tracked character project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    /// Real currency already invested.
    pub initial_investment: f64,
    /// Real currency target for the project.
    pub final_goal: f64,
    /// In-game currency units per tradeable token.
    pub units_per_token: i64,
    /// Real currency value of one tradeable token.
    pub value_per_token: f64,
}

impl Default for GoalConfig {
    fn default() -> Self {
        Self {
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            final_goal: DEFAULT_FINAL_GOAL,
            units_per_token: GP_PER_TC,
            value_per_token: VALUE_PER_TC,
        }
    }
}

/// Currency totals across both ledgers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub hunt_total: i64,
    pub drop_total: i64,
    pub grand_total: i64,
}

/// Sum the profit and drop-value columns; empty inputs yield zeros.
#[must_use]
pub fn compute_totals(hunts: &[HuntRecord], drops: &[BossDropRecord]) -> Totals {
    let hunt_total: i64 = hunts.iter().map(|r| r.profit).sum();
    let drop_total: i64 = drops.iter().map(|r| r.value).sum();
    Totals {
        hunt_total,
        drop_total,
        grand_total: hunt_total + drop_total,
    }
}

/// Errors raised when the goal conversion configuration is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("units-per-token conversion rate must be non-zero")]
    ZeroUnitsPerToken,
}

/// Estimated real-currency value of `grand_total` in-game units.
///
/// # Errors
///
/// Returns `ConversionError::ZeroUnitsPerToken` when `units_per_token` is
/// zero; the conversion never silently produces infinity or NaN.
#[allow(clippy::cast_precision_loss)]
pub fn estimate_real_value(
    grand_total: i64,
    units_per_token: i64,
    value_per_token: f64,
) -> Result<f64, ConversionError> {
    if units_per_token == 0 {
        return Err(ConversionError::ZeroUnitsPerToken);
    }
    Ok(grand_total as f64 / units_per_token as f64 * value_per_token)
}

/// Raw goal percentage; exceeds 100 once the goal is passed.
#[must_use]
pub fn progress_percent(estimated_value: f64, goal: f64) -> f64 {
    estimated_value / goal * 100.0
}

/// Goal percentage clamped to `[0, 100]` for progress-bar rendering. The
/// raw value from `progress_percent` is still what reports print as text;
/// the two are distinct outputs.
#[must_use]
pub fn progress_percent_clamped(estimated_value: f64, goal: f64) -> f64 {
    progress_percent(estimated_value, goal).clamp(0.0, 100.0)
}

/// Complete goal snapshot for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgress {
    pub totals: Totals,
    pub estimated_value: f64,
    pub percent: f64,
    pub percent_clamped: f64,
}

/// Build the full goal snapshot from both ledgers' collections.
///
/// # Errors
///
/// Returns `ConversionError::ZeroUnitsPerToken` when the configured
/// conversion rate is zero.
pub fn goal_progress(
    hunts: &[HuntRecord],
    drops: &[BossDropRecord],
    cfg: &GoalConfig,
) -> Result<GoalProgress, ConversionError> {
    let totals = compute_totals(hunts, drops);
    let estimated_value =
        estimate_real_value(totals.grand_total, cfg.units_per_token, cfg.value_per_token)?;
    Ok(GoalProgress {
        totals,
        estimated_value,
        percent: progress_percent(estimated_value, cfg.final_goal),
        percent_clamped: progress_percent_clamped(estimated_value, cfg.final_goal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const EPSILON: f64 = 1e-9;

    fn hunt(profit: i64) -> HuntRecord {
        HuntRecord {
            date: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            location: "Pits".to_string(),
            duration_minutes: 60,
            profit,
            levels_gained: 0,
            notes: String::new(),
        }
    }

    fn drop_worth(value: i64) -> BossDropRecord {
        BossDropRecord {
            date: NaiveDate::from_ymd_opt(2025, 8, 3).unwrap(),
            boss: "Ferumbras".to_string(),
            item: "Hat".to_string(),
            value,
            notes: String::new(),
        }
    }

    #[test]
    fn totals_sum_both_ledgers() {
        let totals = compute_totals(&[hunt(100), hunt(250)], &[drop_worth(1_000)]);
        assert_eq!(totals.hunt_total, 350);
        assert_eq!(totals.drop_total, 1_000);
        assert_eq!(totals.grand_total, 1_350);
    }

    #[test]
    fn totals_of_empty_inputs_are_zero() {
        assert_eq!(compute_totals(&[], &[]), Totals::default());
    }

    #[test]
    fn one_token_worth_of_units_converts_to_the_token_value() {
        let value = estimate_real_value(36_500, 36_500, 0.224).unwrap();
        assert!((value - 0.224).abs() < EPSILON);
    }

    #[test]
    fn zero_conversion_rate_fails_fast() {
        assert_eq!(
            estimate_real_value(1_000, 0, 0.224),
            Err(ConversionError::ZeroUnitsPerToken)
        );
    }

    #[test]
    fn percent_is_unclamped_as_text_and_clamped_for_bars() {
        assert!((progress_percent(224.0, 10_000.0) - 2.24).abs() < EPSILON);
        assert!((progress_percent_clamped(224.0, 10_000.0) - 2.24).abs() < EPSILON);

        assert!((progress_percent(20_000.0, 10_000.0) - 200.0).abs() < EPSILON);
        assert!((progress_percent_clamped(20_000.0, 10_000.0) - 100.0).abs() < EPSILON);
    }

    #[test]
    fn goal_progress_combines_totals_and_conversion() {
        let hunts = vec![hunt(30_000)];
        let drops = vec![drop_worth(6_500)];
        let progress = goal_progress(&hunts, &drops, &GoalConfig::default()).unwrap();

        assert_eq!(progress.totals.grand_total, 36_500);
        assert!((progress.estimated_value - 0.224).abs() < EPSILON);
        assert!((progress.percent - 0.002_24).abs() < EPSILON);
        assert!((progress.percent_clamped - progress.percent).abs() < EPSILON);
    }
}
