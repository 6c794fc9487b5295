//! Goal arithmetic: completion, remaining balance, surplus and growth projections.
//!
//! Every function here is pure and total and none returns an error. Goal
//! metrics stay finite for any finite input; a compound projection can
//! overflow, and the calculator handler rejects that case.

use serde::{Deserialize, Serialize};

use crate::planning::models::GoalMetrics;

/// Decimal places used for percentages.
pub const PERCENT_PLACES: u32 = 1;
/// Decimal places used for currency amounts.
pub const AMOUNT_PLACES: u32 = 2;

/// Rounds half away from zero to `places` decimal places.
///
/// Values too large to scale have no fraction digits left and come back unchanged.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(places as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Share of the target already saved, in percent, clamped to `[0, 100]`.
///
/// A goal with no positive target counts as complete as soon as anything is saved.
pub fn compute_completion_percentage(current_amount: f64, target_amount: f64) -> f64 {
    let pct = if target_amount > 0.0 {
        (current_amount / target_amount * 100.0).clamp(0.0, 100.0)
    } else if current_amount > 0.0 {
        100.0
    } else {
        0.0
    };

    if pct.is_nan() {
        return 0.0;
    }
    round_to(pct, PERCENT_PLACES)
}

/// Amount still missing to reach the target. Never negative.
pub fn compute_remaining_amount(current_amount: f64, target_amount: f64) -> f64 {
    // target - current can overflow when an unmatched entry carries extreme amounts
    let remaining = (target_amount - current_amount).max(0.0).min(f64::MAX);
    if remaining.is_nan() {
        return 0.0;
    }
    round_to(remaining, AMOUNT_PLACES)
}

/// Income left after expenses. Negative when expenses exceed income.
pub fn compute_monthly_surplus(monthly_income: f64, monthly_expenses: f64) -> f64 {
    monthly_income - monthly_expenses
}

pub fn compute_goal_metrics(current_amount: f64, target_amount: f64) -> GoalMetrics {
    GoalMetrics {
        completion_percentage: compute_completion_percentage(current_amount, target_amount),
        remaining_amount: compute_remaining_amount(current_amount, target_amount),
    }
}

/// Result of a compound-interest projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundProjection {
    pub final_amount: f64,
    pub interest_earned: f64,
}

/// Projects `principal` forward with `A = P(1 + r/n)^(nt)`.
///
/// `compounds_per_year == 0` is treated as annual compounding.
pub fn project_compound_growth(
    principal: f64,
    annual_rate_percent: f64,
    years: f64,
    compounds_per_year: u32,
) -> CompoundProjection {
    let n = compounds_per_year.max(1) as f64;
    let rate = annual_rate_percent / 100.0;

    let final_amount = if rate == 0.0 || years <= 0.0 {
        principal
    } else {
        principal * (1.0 + rate / n).powf(n * years)
    };

    CompoundProjection {
        final_amount: round_to(final_amount, AMOUNT_PLACES),
        interest_earned: round_to(final_amount - principal, AMOUNT_PLACES),
    }
}

/// Whole months needed to cover `remaining_amount` at `monthly_contribution`.
///
/// `Some(0)` when nothing is left; `None` when the contribution can never get there.
pub fn months_to_goal(remaining_amount: f64, monthly_contribution: f64) -> Option<u32> {
    if remaining_amount <= 0.0 {
        return Some(0);
    }
    if monthly_contribution <= 0.0
        || !monthly_contribution.is_finite()
        || !remaining_amount.is_finite()
    {
        return None;
    }
    // `as` saturates at u32::MAX for absurdly long horizons
    Some((remaining_amount / monthly_contribution).ceil() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_basic_quarter() {
        assert_eq!(compute_completion_percentage(12_500.0, 50_000.0), 25.0);
    }

    #[test]
    fn test_completion_rounds_to_one_decimal() {
        // 1/3 = 33.333...
        assert_eq!(compute_completion_percentage(1.0, 3.0), 33.3);
        // 2/3 = 66.666...
        assert_eq!(compute_completion_percentage(2.0, 3.0), 66.7);
    }

    #[test]
    fn test_completion_matches_rounded_ratio_over_range() {
        let target = 7_919.0;
        let mut current = 0.0;
        while current <= target {
            let pct = compute_completion_percentage(current, target);
            assert!((0.0..=100.0).contains(&pct));
            assert_eq!(pct, round_to(current / target * 100.0, 1));
            current += 137.5;
        }
    }

    #[test]
    fn test_completion_over_target_is_exactly_100() {
        assert_eq!(compute_completion_percentage(12_000.0, 10_000.0), 100.0);
        assert_eq!(compute_completion_percentage(1e12, 1.0), 100.0);
    }

    #[test]
    fn test_completion_zero_target() {
        assert_eq!(compute_completion_percentage(500.0, 0.0), 100.0);
        assert_eq!(compute_completion_percentage(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_completion_negative_current_is_zero() {
        assert_eq!(compute_completion_percentage(-250.0, 1_000.0), 0.0);
        assert_eq!(compute_completion_percentage(-250.0, 0.0), 0.0);
    }

    #[test]
    fn test_completion_negative_target_behaves_like_zero_target() {
        assert_eq!(compute_completion_percentage(10.0, -100.0), 100.0);
        assert_eq!(compute_completion_percentage(0.0, -100.0), 0.0);
    }

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(compute_remaining_amount(12_000.0, 10_000.0), 0.0);
        assert_eq!(compute_remaining_amount(0.0, -5.0), 0.0);
    }

    #[test]
    fn test_remaining_basic_and_rounded() {
        assert_eq!(compute_remaining_amount(12_500.0, 50_000.0), 37_500.0);
        assert_eq!(compute_remaining_amount(0.333, 1.0), 0.67);
    }

    #[test]
    fn test_remaining_stays_finite_for_huge_targets() {
        assert_eq!(compute_remaining_amount(0.0, 1e307), 1e307);
        assert_eq!(compute_remaining_amount(-f64::MAX, f64::MAX), f64::MAX);
        assert_eq!(round_to(1e307, AMOUNT_PLACES), 1e307);
        assert_eq!(round_to(-1e307, PERCENT_PLACES), -1e307);
    }

    #[test]
    fn test_remaining_with_negative_current_grows() {
        assert_eq!(compute_remaining_amount(-100.0, 1_000.0), 1_100.0);
    }

    #[test]
    fn test_surplus_may_be_negative() {
        assert_eq!(compute_monthly_surplus(30_000.0, 45_000.0), -15_000.0);
        assert_eq!(compute_monthly_surplus(50_000.0, 30_000.0), 20_000.0);
    }

    #[test]
    fn test_goal_metrics_combines_both() {
        let metrics = compute_goal_metrics(12_500.0, 50_000.0);
        assert_eq!(metrics.completion_percentage, 25.0);
        assert_eq!(metrics.remaining_amount, 37_500.0);
    }

    #[test]
    fn test_compound_monthly_one_year() {
        let p = project_compound_growth(1_000.0, 12.0, 1.0, 12);
        assert_eq!(p.final_amount, 1_126.83);
        assert_eq!(p.interest_earned, 126.83);
    }

    #[test]
    fn test_compound_zero_rate_keeps_principal() {
        let p = project_compound_growth(2_500.0, 0.0, 10.0, 4);
        assert_eq!(p.final_amount, 2_500.0);
        assert_eq!(p.interest_earned, 0.0);
    }

    #[test]
    fn test_compound_zero_frequency_is_annual() {
        let annual = project_compound_growth(1_000.0, 10.0, 2.0, 1);
        let zero = project_compound_growth(1_000.0, 10.0, 2.0, 0);
        assert_eq!(annual, zero);
        assert_eq!(annual.final_amount, 1_210.0);
    }

    #[test]
    fn test_months_to_goal() {
        assert_eq!(months_to_goal(1_000.0, 300.0), Some(4));
        assert_eq!(months_to_goal(900.0, 300.0), Some(3));
        assert_eq!(months_to_goal(0.0, 300.0), Some(0));
    }

    #[test]
    fn test_months_to_goal_unreachable() {
        assert_eq!(months_to_goal(1_000.0, 0.0), None);
        assert_eq!(months_to_goal(1_000.0, -50.0), None);
    }
}
