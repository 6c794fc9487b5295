//! Axum route handlers for the planning and calculator API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::planning::assembler::prepare;
use crate::planning::goal_math::{
    compute_completion_percentage, compute_monthly_surplus, compute_remaining_amount,
    months_to_goal, project_compound_growth, CompoundProjection,
};
use crate::planning::models::{EnrichedPlanRequest, PlanRequest};
use crate::planning::pipeline::{build_savings_plan, SavingsPlan};
use crate::state::AppState;

/// Upper bound on projection horizons accepted by the calculator.
const MAX_PROJECTION_YEARS: f64 = 100.0;
/// Upper bound on the annual rate, in percent.
const MAX_ANNUAL_RATE_PERCENT: f64 = 1_000.0;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressRequest {
    pub current_amount: f64,
    pub target_amount: f64,
    pub monthly_contribution: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressResponse {
    pub completion_percentage: f64,
    pub remaining_amount: f64,
    /// `null` when no contribution was given or it can never reach the target.
    pub months_to_goal: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestRequest {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub years: f64,
    #[serde(default = "default_compounds_per_year")]
    pub compounds_per_year: u32,
}

fn default_compounds_per_year() -> u32 {
    12
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurplusRequest {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurplusResponse {
    pub monthly_surplus: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/plans/savings
///
/// Full pipeline: prepare → narrative generator → reconcile.
pub async fn handle_generate_plan(
    State(state): State<AppState>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<SavingsPlan>, AppError> {
    let plan = build_savings_plan(state.narrator.as_ref(), &request).await?;
    Ok(Json(plan))
}

/// POST /api/v1/plans/savings/preview
///
/// Validates and enriches a request without calling the generator.
pub async fn handle_preview_plan(
    Json(request): Json<PlanRequest>,
) -> Result<Json<EnrichedPlanRequest>, AppError> {
    Ok(Json(prepare(&request)?))
}

/// POST /api/v1/calculators/goal-progress
pub async fn handle_goal_progress(
    Json(request): Json<GoalProgressRequest>,
) -> Result<Json<GoalProgressResponse>, AppError> {
    require_finite("currentAmount", request.current_amount)?;
    require_finite("targetAmount", request.target_amount)?;

    let remaining_amount = compute_remaining_amount(request.current_amount, request.target_amount);
    Ok(Json(GoalProgressResponse {
        completion_percentage: compute_completion_percentage(
            request.current_amount,
            request.target_amount,
        ),
        remaining_amount,
        months_to_goal: request
            .monthly_contribution
            .and_then(|c| months_to_goal(remaining_amount, c)),
    }))
}

/// POST /api/v1/calculators/compound-interest
pub async fn handle_compound_interest(
    Json(request): Json<CompoundInterestRequest>,
) -> Result<Json<CompoundProjection>, AppError> {
    require_finite("principal", request.principal)?;
    require_finite("annualRatePercent", request.annual_rate_percent)?;
    if request.principal < 0.0 {
        return Err(AppError::BadRequest(
            "principal cannot be negative".to_string(),
        ));
    }
    if request.annual_rate_percent <= -100.0
        || request.annual_rate_percent > MAX_ANNUAL_RATE_PERCENT
    {
        return Err(AppError::BadRequest(format!(
            "annualRatePercent must be greater than -100 and at most {MAX_ANNUAL_RATE_PERCENT}"
        )));
    }
    if !(0.0..=MAX_PROJECTION_YEARS).contains(&request.years) {
        return Err(AppError::BadRequest(format!(
            "years must be between 0 and {MAX_PROJECTION_YEARS}"
        )));
    }

    let projection = project_compound_growth(
        request.principal,
        request.annual_rate_percent,
        request.years,
        request.compounds_per_year,
    );
    if !projection.final_amount.is_finite() || !projection.interest_earned.is_finite() {
        return Err(AppError::BadRequest(
            "projection is too large to represent".to_string(),
        ));
    }

    Ok(Json(projection))
}

/// POST /api/v1/calculators/surplus
pub async fn handle_surplus(
    Json(request): Json<SurplusRequest>,
) -> Result<Json<SurplusResponse>, AppError> {
    require_finite("monthlyIncome", request.monthly_income)?;
    require_finite("monthlyExpenses", request.monthly_expenses)?;

    Ok(Json(SurplusResponse {
        monthly_surplus: compute_monthly_surplus(request.monthly_income, request.monthly_expenses),
    }))
}

fn require_finite(field: &str, value: f64) -> Result<(), AppError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("{field} must be a finite number")))
    }
}
