//! Per-model token pricing

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Pricing lookup failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Name is neither a display name nor a model id
    #[error("Unknown model: '{0}' (expected one of: Sonnet 3, Sonnet 3.5, Haiku 3)")]
    UnknownModel(String),
}

/// Selectable chat model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelChoice {
    /// Claude 3 Sonnet
    Sonnet3,
    /// Claude 3.5 Sonnet
    Sonnet35,
    /// Claude 3 Haiku
    Haiku3,
}

/// Rates in dollars per 1K tokens
struct Rates {
    input: f64,
    output: f64,
}

const SONNET_RATES: Rates = Rates {
    input: 0.003,
    output: 0.015,
};

const HAIKU_RATES: Rates = Rates {
    input: 0.000_25,
    output: 0.001_25,
};

impl ModelChoice {
    /// Every model, in selection order
    pub const ALL: [Self; 3] = [Self::Sonnet35, Self::Sonnet3, Self::Haiku3];

    /// Display name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sonnet3 => "Sonnet 3",
            Self::Sonnet35 => "Sonnet 3.5",
            Self::Haiku3 => "Haiku 3",
        }
    }

    /// Bedrock model identifier
    #[must_use]
    pub const fn model_id(self) -> &'static str {
        match self {
            Self::Sonnet3 => "anthropic.claude-3-sonnet-20240229-v1:0",
            Self::Sonnet35 => "anthropic.claude-3-5-sonnet-20240620-v1:0",
            Self::Haiku3 => "anthropic.claude-3-haiku-20240307-v1:0",
        }
    }

    const fn rates(self) -> Rates {
        match self {
            Self::Sonnet3 | Self::Sonnet35 => SONNET_RATES,
            Self::Haiku3 => HAIKU_RATES,
        }
    }
}

impl fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelChoice {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|model| model.name().eq_ignore_ascii_case(wanted) || model.model_id() == wanted)
            .ok_or_else(|| PricingError::UnknownModel(s.to_string()))
    }
}

/// Cost of one turn, in dollars
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TokenCost {
    /// Prompt side
    pub input_cost: f64,
    /// Completion side
    pub output_cost: f64,
    /// Sum of both
    pub total_cost: f64,
}

/// Cost of a turn for a model given by display name or model id
///
/// # Errors
/// [`PricingError::UnknownModel`] when the name does not match any model.
pub fn calculate_token_cost(
    model: &str,
    input_tokens: u64,
    output_tokens: u64,
) -> Result<TokenCost, PricingError> {
    Ok(token_cost(model.parse()?, input_tokens, output_tokens))
}

/// Cost of a turn for a known model
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn token_cost(model: ModelChoice, input_tokens: u64, output_tokens: u64) -> TokenCost {
    let rates = model.rates();
    let input_cost = input_tokens as f64 / 1000.0 * rates.input;
    let output_cost = output_tokens as f64 / 1000.0 * rates.output;
    TokenCost {
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn test_sonnet_rates() {
        let cost = calculate_token_cost("Sonnet 3.5", 1000, 1000).unwrap();
        assert!(close(cost.input_cost, 0.003));
        assert!(close(cost.output_cost, 0.015));
        assert!(close(cost.total_cost, 0.018));

        let same = calculate_token_cost("Sonnet 3", 1000, 1000).unwrap();
        assert_eq!(cost, same);
    }

    #[test]
    fn test_haiku_rates() {
        let cost = calculate_token_cost("Haiku 3", 2000, 4000).unwrap();
        assert!(close(cost.input_cost, 0.0005));
        assert!(close(cost.output_cost, 0.005));
    }

    #[test]
    fn test_zero_tokens_cost_nothing() {
        let cost = token_cost(ModelChoice::Haiku3, 0, 0);
        assert!(close(cost.total_cost, 0.0));
    }

    #[test]
    fn test_parse_by_name_or_id() {
        assert_eq!("sonnet 3.5".parse(), Ok(ModelChoice::Sonnet35));
        assert_eq!(
            "anthropic.claude-3-haiku-20240307-v1:0".parse(),
            Ok(ModelChoice::Haiku3)
        );
        assert_eq!(
            "Opus".parse::<ModelChoice>(),
            Err(PricingError::UnknownModel("Opus".to_string()))
        );
    }

    #[test]
    fn test_unknown_model() {
        assert!(calculate_token_cost("Sonnet 4", 1, 1).is_err());
    }
}
