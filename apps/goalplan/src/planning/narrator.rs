//! Narrative generation: the boundary to the LLM that writes the plan prose.
//!
//! `AppState` holds an `Arc<dyn NarrativeGenerator>`. Production uses
//! `LlmNarrativeGenerator`; tests swap in a scripted generator.

use async_trait::async_trait;
use serde_json::json;

use crate::llm_client::prompts::{EDUCATIONAL_INSTRUCTION, NUMERIC_AUTHORITY_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};
use crate::planning::models::{EnrichedPlanRequest, PlanResponse};
use crate::planning::prompts::{
    savings_plan_system, surplus_framing, SAVINGS_PLAN_PROMPT_TEMPLATE,
};

/// Produces a structured plan for an enriched request.
///
/// Numbers in the returned plan are advisory; callers must pass it through
/// `assembler::reconcile` before showing it.
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    async fn generate(&self, request: &EnrichedPlanRequest) -> Result<PlanResponse, LlmError>;
}

/// Claude-backed generator. Retries live in `LlmClient`.
pub struct LlmNarrativeGenerator(pub LlmClient);

#[async_trait]
impl NarrativeGenerator for LlmNarrativeGenerator {
    async fn generate(&self, request: &EnrichedPlanRequest) -> Result<PlanResponse, LlmError> {
        let prompt = build_plan_prompt(request)?;
        self.0.call_json(&prompt, &savings_plan_system()).await
    }
}

/// Fills the savings plan template with the request's cash flow and goals.
pub fn build_plan_prompt(request: &EnrichedPlanRequest) -> Result<String, serde_json::Error> {
    let goals_json = serde_json::to_string_pretty(
        &request
            .goals
            .iter()
            .map(|g| {
                json!({
                    "goalId": g.goal_id,
                    "name": g.goal.name,
                    "targetAmount": g.goal.target_amount,
                    "currentAmount": g.goal.current_amount,
                    "completionPercentage": g.metrics.completion_percentage,
                    "remainingAmount": g.metrics.remaining_amount,
                })
            })
            .collect::<Vec<_>>(),
    )?;

    Ok(SAVINGS_PLAN_PROMPT_TEMPLATE
        .replace("{numeric_instruction}", NUMERIC_AUTHORITY_INSTRUCTION)
        .replace("{educational_instruction}", EDUCATIONAL_INSTRUCTION)
        .replace("{monthly_income}", &format!("{:.2}", request.monthly_income))
        .replace("{monthly_expenses}", &format!("{:.2}", request.monthly_expenses))
        .replace("{monthly_surplus}", &format!("{:.2}", request.monthly_surplus))
        .replace("{surplus_framing}", surplus_framing(request.monthly_surplus))
        .replace("{goals_json}", &goals_json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::assembler::prepare;
    use crate::planning::models::{Goal, PlanRequest};

    fn enriched(income: f64, expenses: f64) -> EnrichedPlanRequest {
        prepare(&PlanRequest {
            monthly_income: income,
            monthly_expenses: expenses,
            goals: vec![
                Goal {
                    name: "Emergency Fund".to_string(),
                    target_amount: 50_000.0,
                    current_amount: 12_500.0,
                },
                Goal {
                    name: "Bike".to_string(),
                    target_amount: 800.0,
                    current_amount: 0.0,
                },
            ],
        })
        .unwrap()
    }

    #[test]
    fn test_prompt_contains_goal_ids_and_metrics() {
        let request = enriched(50_000.0, 30_000.0);
        let prompt = build_plan_prompt(&request).unwrap();

        for goal in &request.goals {
            assert!(prompt.contains(&goal.goal_id.to_string()));
        }
        assert!(prompt.contains("\"completionPercentage\": 25.0"));
        assert!(prompt.contains("\"remainingAmount\": 37500.0"));
        assert!(prompt.contains("Surplus: 20000.00"));
    }

    #[test]
    fn test_prompt_has_no_unfilled_placeholders() {
        let prompt = build_plan_prompt(&enriched(50_000.0, 30_000.0)).unwrap();
        assert!(!prompt.contains("{goals_json}"));
        assert!(!prompt.contains("{monthly_surplus}"));
        assert!(!prompt.contains("{numeric_instruction}"));
    }

    #[test]
    fn test_prompt_frames_negative_surplus() {
        let prompt = build_plan_prompt(&enriched(30_000.0, 45_000.0)).unwrap();
        assert!(prompt.contains("Surplus: -15000.00"));
        assert!(prompt.contains("spends more than they earn"));
    }
}
