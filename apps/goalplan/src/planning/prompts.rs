// Prompt constants for the savings plan narrative.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Role line prepended to the shared JSON-only system prompt.
pub const SAVINGS_PLAN_ROLE: &str = "You are a patient personal-finance educator who writes \
    clear, encouraging savings plans for people learning to manage money.";

pub fn savings_plan_system() -> String {
    format!("{SAVINGS_PLAN_ROLE} {JSON_ONLY_SYSTEM}")
}

/// Savings plan prompt template.
/// Replace: {numeric_instruction}, {educational_instruction}, {monthly_income},
///          {monthly_expenses}, {monthly_surplus}, {surplus_framing}, {goals_json}
pub const SAVINGS_PLAN_PROMPT_TEMPLATE: &str = r#"{numeric_instruction}

{educational_instruction}

MONTHLY CASH FLOW:
- Income: {monthly_income}
- Expenses: {monthly_expenses}
- Surplus: {monthly_surplus}

{surplus_framing}

SAVINGS GOALS (amounts and metrics are final; copy them verbatim):
{goals_json}

Write a savings plan covering EVERY goal above. Return a JSON object with this EXACT schema:
{
  "overallSummary": "Two to four sentences on how the surplus can be split across the goals.",
  "goalPlans": [
    {
      "goalId": "the-exact-goalId-from-the-input",
      "name": "Emergency Fund",
      "targetAmount": 50000,
      "currentAmount": 12500,
      "strategy": "Concrete monthly steps for this goal, referencing the remaining amount.",
      "completionPercentage": 25.0,
      "remainingAmount": 37500
    }
  ],
  "disclaimer": "One sentence stating this is an educational simulation, not financial advice."
}

HARD RULES:
1. One goalPlans entry per input goal, with its exact goalId
2. Never change targetAmount, currentAmount, completionPercentage or remainingAmount
3. Suggested monthly contributions must not add up to more than the surplus
4. Plain language, no jargon, no product names"#;

/// Framing line chosen by the sign of the surplus.
pub fn surplus_framing(monthly_surplus: f64) -> &'static str {
    if monthly_surplus < 0.0 {
        "The user currently spends more than they earn. Start with ways to close the gap \
        before any goal contributions, and keep goal timelines realistic."
    } else if monthly_surplus == 0.0 {
        "The user breaks even each month. Focus on small expense cuts that free up room to save."
    } else {
        "The user has a positive surplus. Suggest how to allocate it across the goals by priority."
    }
}
