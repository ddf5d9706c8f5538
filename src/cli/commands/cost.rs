//! Cost command handler

use chat_viz::core::pricing::{calculate_token_cost, ModelChoice};
use chat_viz::debug;

/// Print the cost of one chat turn
///
/// # Errors
/// Returns a user-facing message when the model is unknown.
pub fn run(model: &str, input_tokens: u64, output_tokens: u64) -> Result<(), String> {
    let choice: ModelChoice = model.parse().map_err(|e| format!("✗ {e}"))?;
    let cost = calculate_token_cost(model, input_tokens, output_tokens)
        .map_err(|e| format!("✗ {e}"))?;
    debug!("Pricing {input_tokens}/{output_tokens} tokens with {}", choice.model_id());

    println!("Model: {choice} ({})", choice.model_id());
    println!(
        "Tokens: prompt:({input_tokens}/{:.6}), completion:({output_tokens}/{:.6}), total:({}/{:.6})",
        cost.input_cost,
        cost.output_cost,
        input_tokens + output_tokens,
        cost.total_cost
    );
    Ok(())
}
