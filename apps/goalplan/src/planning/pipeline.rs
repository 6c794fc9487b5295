//! Savings plan pipeline.
//!
//! Flow: prepare (validate + metrics + goal ids) → narrative generator →
//!       reconcile (authoritative numbers, disclaimer) → SavingsPlan.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::planning::assembler::{prepare, reconcile};
use crate::planning::models::{PlanRequest, PlanResponse};
use crate::planning::narrator::NarrativeGenerator;

/// A reconciled plan as returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsPlan {
    pub plan_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub monthly_surplus: f64,
    pub plan: PlanResponse,
}

/// Runs the full pipeline for one submission.
///
/// A generator failure is logged and treated as "no output", which `reconcile`
/// turns into the single upstream error.
pub async fn build_savings_plan(
    generator: &dyn NarrativeGenerator,
    request: &PlanRequest,
) -> Result<SavingsPlan, AppError> {
    let enriched = prepare(request)?;
    info!(
        "Prepared plan request: {} goals, surplus {:.2}",
        enriched.goals.len(),
        enriched.monthly_surplus
    );

    let raw = match generator.generate(&enriched).await {
        Ok(raw) => Some(raw),
        Err(e) => {
            warn!("Narrative generation failed: {e}");
            None
        }
    };

    let plan = reconcile(raw, &enriched)?;

    let missing = enriched
        .goals
        .iter()
        .filter(|g| !plan.goal_plans.iter().any(|e| e.goal_id == Some(g.goal_id)))
        .count();
    if missing > 0 {
        warn!("Generated plan has no section for {missing} of the requested goals");
    }

    let savings_plan = SavingsPlan {
        plan_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        monthly_surplus: enriched.monthly_surplus,
        plan,
    };
    info!(
        "Built savings plan {} with {} goal sections",
        savings_plan.plan_id,
        savings_plan.plan.goal_plans.len()
    );

    Ok(savings_plan)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::planning::assembler::FALLBACK_DISCLAIMER;
    use crate::planning::models::{EnrichedPlanRequest, Goal, GoalPlanEntry};

    /// Test generator that answers with a canned plan built from the request.
    pub(crate) struct ScriptedGenerator {
        pub respond: fn(&EnrichedPlanRequest) -> Result<PlanResponse, LlmError>,
        pub seen: Mutex<Vec<EnrichedPlanRequest>>,
    }

    impl ScriptedGenerator {
        pub(crate) fn new(respond: fn(&EnrichedPlanRequest) -> Result<PlanResponse, LlmError>) -> Self {
            Self {
                respond,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl NarrativeGenerator for ScriptedGenerator {
        async fn generate(&self, request: &EnrichedPlanRequest) -> Result<PlanResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            (self.respond)(request)
        }
    }

    /// Echoes every goal back by name with drifted numbers.
    pub(crate) fn drifting_response(request: &EnrichedPlanRequest) -> Result<PlanResponse, LlmError> {
        Ok(PlanResponse {
            overall_summary: "Put most of your surplus toward the emergency fund.".to_string(),
            goal_plans: request
                .goals
                .iter()
                .map(|g| GoalPlanEntry {
                    goal_id: None,
                    name: g.goal.name.clone(),
                    target_amount: g.goal.target_amount,
                    current_amount: g.goal.current_amount + 500.0,
                    strategy: "Save 10,000 a month.".to_string(),
                    completion_percentage: 99.0,
                    remaining_amount: 1.0,
                })
                .collect(),
            disclaimer: String::new(),
        })
    }

    pub(crate) fn failing_response(_: &EnrichedPlanRequest) -> Result<PlanResponse, LlmError> {
        Err(LlmError::EmptyContent)
    }

    pub(crate) fn emergency_fund_request() -> PlanRequest {
        PlanRequest {
            monthly_income: 50_000.0,
            monthly_expenses: 30_000.0,
            goals: vec![Goal {
                name: "Emergency Fund".to_string(),
                target_amount: 50_000.0,
                current_amount: 12_500.0,
            }],
        }
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end_request_values_win() {
        let generator = ScriptedGenerator::new(drifting_response);
        let plan = build_savings_plan(&generator, &emergency_fund_request())
            .await
            .unwrap();

        let seen = generator.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].goals[0].metrics.completion_percentage, 25.0);
        assert_eq!(seen[0].goals[0].metrics.remaining_amount, 37_500.0);

        let entry = &plan.plan.goal_plans[0];
        assert_eq!(entry.current_amount, 12_500.0);
        assert_eq!(entry.completion_percentage, 25.0);
        assert_eq!(entry.remaining_amount, 37_500.0);
        assert_eq!(entry.goal_id, Some(seen[0].goals[0].goal_id));
        assert_eq!(plan.plan.disclaimer, FALLBACK_DISCLAIMER);
        assert_eq!(plan.monthly_surplus, 20_000.0);
    }

    #[tokio::test]
    async fn test_pipeline_generator_failure_is_upstream_error() {
        let generator = ScriptedGenerator::new(failing_response);
        let err = build_savings_plan(&generator, &emergency_fund_request())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream));
    }

    #[tokio::test]
    async fn test_pipeline_validation_skips_generator() {
        let generator = ScriptedGenerator::new(drifting_response);
        let request = PlanRequest {
            goals: vec![],
            ..emergency_fund_request()
        };

        let err = build_savings_plan(&generator, &request).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { ref field, .. } if field == "goals"));
        assert!(generator.seen.lock().unwrap().is_empty());
    }
}
