// Cross-cutting prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs next to it and pulls shared pieces from here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Numbers supplied in the prompt are computed by the service and must be echoed, not redone.
pub const NUMERIC_AUTHORITY_INSTRUCTION: &str = "\
    CRITICAL: All amounts, percentages and remaining balances in the input were computed \
    by the application. Copy them exactly as given. Do NOT recompute, round, or adjust \
    any number. Refer to every goal by its exact goalId.";

/// Keeps the output in educational territory.
pub const EDUCATIONAL_INSTRUCTION: &str = "\
    This is a financial-literacy simulation, not regulated financial advice. \
    Do not recommend specific securities, lenders, or products by name.";
