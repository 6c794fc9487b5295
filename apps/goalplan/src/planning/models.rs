//! Wire and domain types for savings plans.
//!
//! Request types are strict. `PlanResponse` and `GoalPlanEntry` are also what the
//! narrative generator returns, so their deserialization is lenient: a missing or
//! garbled field falls back to a default instead of failing the whole plan.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// User input
// ────────────────────────────────────────────────────────────────────────────

/// A user-defined savings target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub goals: Vec<Goal>,
}

// ────────────────────────────────────────────────────────────────────────────
// Derived
// ────────────────────────────────────────────────────────────────────────────

/// Metrics derived from a goal's amounts. Always recomputed, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalMetrics {
    pub completion_percentage: f64,
    pub remaining_amount: f64,
}

/// A goal with its synthetic id and precomputed metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedGoal {
    /// Generated per request; threaded through the generator so entries can be
    /// matched back even when names repeat or get rewritten.
    pub goal_id: Uuid,
    #[serde(flatten)]
    pub goal: Goal,
    #[serde(flatten)]
    pub metrics: GoalMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPlanRequest {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub monthly_surplus: f64,
    pub goals: Vec<EnrichedGoal>,
}

impl EnrichedPlanRequest {
    pub fn goal_by_id(&self, goal_id: Uuid) -> Option<&EnrichedGoal> {
        self.goals.iter().find(|g| g.goal_id == goal_id)
    }

    /// The goal carrying `name`, only if no other goal shares it.
    pub fn goal_by_unique_name(&self, name: &str) -> Option<&EnrichedGoal> {
        let mut matches = self.goals.iter().filter(|g| g.goal.name == name);
        match (matches.next(), matches.next()) {
            (Some(goal), None) => Some(goal),
            _ => None,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generated plan
// ────────────────────────────────────────────────────────────────────────────

/// One goal's section of a plan.
///
/// The numeric fields are advisory when they come from the generator; reconciliation
/// overwrites or recomputes all of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalPlanEntry {
    #[serde(deserialize_with = "lenient_uuid")]
    pub goal_id: Option<Uuid>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub target_amount: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub current_amount: f64,
    #[serde(deserialize_with = "lenient_string")]
    pub strategy: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub completion_percentage: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub remaining_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanResponse {
    #[serde(deserialize_with = "lenient_string")]
    pub overall_summary: String,
    #[serde(deserialize_with = "lenient_entries")]
    pub goal_plans: Vec<GoalPlanEntry>,
    #[serde(deserialize_with = "lenient_string")]
    pub disclaimer: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field parsers
// ────────────────────────────────────────────────────────────────────────────

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s
            .trim()
            .trim_start_matches(|c: char| matches!(c, '$' | '₹' | '€' | '£'))
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    };
    Ok(parsed.filter(|v| v.is_finite()).unwrap_or(0.0))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_uuid<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Uuid>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s.trim()).ok()))
}

/// Drops list items that are not objects instead of rejecting the whole plan.
fn lenient_entries<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<GoalPlanEntry>, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
