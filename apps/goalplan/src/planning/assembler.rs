//! Plan assembly: the deterministic stages around the narrative generator.
//!
//! `prepare` validates a request and attaches locally computed metrics plus a
//! synthetic goal id. `reconcile` takes whatever the generator produced and
//! rewrites every number in it from authoritative values, so the generator's
//! arithmetic never reaches the user.

use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::planning::goal_math::{compute_goal_metrics, compute_monthly_surplus};
use crate::planning::models::{
    EnrichedGoal, EnrichedPlanRequest, GoalPlanEntry, PlanRequest, PlanResponse,
};

/// Substituted when the generator leaves the disclaimer empty.
pub const FALLBACK_DISCLAIMER: &str = "This plan is an educational simulation generated \
    from the figures you entered. It is not financial advice. Consult a qualified \
    financial professional before making decisions about your money.";

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    /// Input violates a structural rule. `field` is a path such as `goals[1].targetAmount`.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// The generator produced no structured output at all.
    #[error("narrative generator returned no plan")]
    Upstream,
}

impl PlanError {
    fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        PlanError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// prepare
// ────────────────────────────────────────────────────────────────────────────

/// Validates `request` and returns a new enriched copy with ids and metrics.
pub fn prepare(request: &PlanRequest) -> Result<EnrichedPlanRequest, PlanError> {
    validate_request(request)?;

    let goals = request
        .goals
        .iter()
        .map(|goal| EnrichedGoal {
            goal_id: Uuid::new_v4(),
            goal: goal.clone(),
            metrics: compute_goal_metrics(goal.current_amount, goal.target_amount),
        })
        .collect();

    Ok(EnrichedPlanRequest {
        monthly_income: request.monthly_income,
        monthly_expenses: request.monthly_expenses,
        monthly_surplus: compute_monthly_surplus(request.monthly_income, request.monthly_expenses),
        goals,
    })
}

fn validate_request(request: &PlanRequest) -> Result<(), PlanError> {
    if !request.monthly_income.is_finite() || request.monthly_income <= 0.0 {
        return Err(PlanError::validation(
            "monthlyIncome",
            "Monthly income must be greater than zero",
        ));
    }
    if !request.monthly_expenses.is_finite() || request.monthly_expenses < 0.0 {
        return Err(PlanError::validation(
            "monthlyExpenses",
            "Monthly expenses cannot be negative",
        ));
    }
    if request.goals.is_empty() {
        return Err(PlanError::validation(
            "goals",
            "Add at least one savings goal",
        ));
    }

    for (i, goal) in request.goals.iter().enumerate() {
        if goal.name.trim().is_empty() {
            return Err(PlanError::validation(
                format!("goals[{i}].name"),
                "Goal name cannot be empty",
            ));
        }
        if !goal.target_amount.is_finite() || goal.target_amount <= 0.0 {
            return Err(PlanError::validation(
                format!("goals[{i}].targetAmount"),
                format!("Target amount for '{}' must be greater than zero", goal.name),
            ));
        }
        if !goal.current_amount.is_finite() || goal.current_amount < 0.0 {
            return Err(PlanError::validation(
                format!("goals[{i}].currentAmount"),
                format!("Current amount for '{}' cannot be negative", goal.name),
            ));
        }
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// reconcile
// ────────────────────────────────────────────────────────────────────────────

/// Normalizes a generated plan against the request it was generated for.
///
/// Only an absent response is an error. Every entry is matched to its goal by
/// `goalId`, or by name when that name is unique in the request. Matched entries
/// take the request's id, name and amounts; unmatched ones keep their own
/// amounts. Metrics are recomputed for all entries.
pub fn reconcile(
    raw: Option<PlanResponse>,
    request: &EnrichedPlanRequest,
) -> Result<PlanResponse, PlanError> {
    let raw = raw.ok_or(PlanError::Upstream)?;

    let goal_plans = raw
        .goal_plans
        .into_iter()
        .map(|entry| reconcile_entry(entry, request))
        .collect();

    let disclaimer = if raw.disclaimer.trim().is_empty() {
        FALLBACK_DISCLAIMER.to_string()
    } else {
        raw.disclaimer
    };

    Ok(PlanResponse {
        overall_summary: raw.overall_summary,
        goal_plans,
        disclaimer,
    })
}

fn reconcile_entry(mut entry: GoalPlanEntry, request: &EnrichedPlanRequest) -> GoalPlanEntry {
    match find_goal(&entry, request) {
        Some(goal) => {
            if entry.current_amount != goal.goal.current_amount
                || entry.target_amount != goal.goal.target_amount
            {
                debug!(
                    "Overwriting drifted amounts for goal {}: generator said {}/{}, request says {}/{}",
                    goal.goal_id,
                    entry.current_amount,
                    entry.target_amount,
                    goal.goal.current_amount,
                    goal.goal.target_amount
                );
            }
            entry.goal_id = Some(goal.goal_id);
            entry.name = goal.goal.name.clone();
            entry.current_amount = goal.goal.current_amount;
            entry.target_amount = goal.goal.target_amount;
        }
        None => {
            warn!(
                "Generated plan entry {:?} matches no requested goal, keeping its amounts",
                entry.name
            );
        }
    }

    let metrics = compute_goal_metrics(entry.current_amount, entry.target_amount);
    entry.completion_percentage = metrics.completion_percentage;
    entry.remaining_amount = metrics.remaining_amount;
    entry
}

fn find_goal<'a>(entry: &GoalPlanEntry, request: &'a EnrichedPlanRequest) -> Option<&'a EnrichedGoal> {
    entry
        .goal_id
        .and_then(|id| request.goal_by_id(id))
        .or_else(|| request.goal_by_unique_name(&entry.name))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
