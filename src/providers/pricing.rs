use crate::providers::transcript::{TranscriptEntry, UsageInfo};
use std::collections::HashMap;

/// Claude API pricing per million tokens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
    pub cache_write: f64,
    pub cache_read: f64,
}

// Cache writes bill at 1.25x input, cache reads at 0.1x.
const OPUS: ModelPricing = ModelPricing {
    input: 15.0,
    output: 75.0,
    cache_write: 18.75,
    cache_read: 1.5,
};
const SONNET: ModelPricing = ModelPricing {
    input: 3.0,
    output: 15.0,
    cache_write: 3.75,
    cache_read: 0.3,
};
const HAIKU_35: ModelPricing = ModelPricing {
    input: 0.8,
    output: 4.0,
    cache_write: 1.0,
    cache_read: 0.08,
};
const HAIKU_3: ModelPricing = ModelPricing {
    input: 0.25,
    output: 1.25,
    cache_write: 0.3125,
    cache_read: 0.025,
};

/// Opus requests count five times against the rolling rate limit.
pub const OPUS_RATE_LIMIT_WEIGHT: u64 = 5;

pub struct PricingService {
    pricing_table: HashMap<&'static str, ModelPricing>,
}

impl PricingService {
    pub fn new() -> Self {
        let pricing_table = HashMap::from([
            ("claude-opus-4", OPUS),
            ("claude-3-opus", OPUS),
            ("claude-sonnet-4", SONNET),
            ("claude-3-7-sonnet", SONNET),
            ("claude-3-5-sonnet", SONNET),
            ("claude-3-sonnet", SONNET),
            ("claude-3-5-haiku", HAIKU_35),
            ("claude-3-haiku", HAIKU_3),
        ]);
        Self { pricing_table }
    }

    /// Exact prefix match first, then the model family, then Sonnet.
    pub fn model_pricing(&self, model_id: &str) -> ModelPricing {
        let lower = model_id.to_lowercase();

        if let Some(pricing) = self
            .pricing_table
            .iter()
            .filter(|(key, _)| lower.starts_with(**key))
            .max_by_key(|(key, _)| key.len())
            .map(|(_, pricing)| *pricing)
        {
            return pricing;
        }

        if lower.contains("opus") {
            OPUS
        } else if lower.contains("haiku") {
            HAIKU_35
        } else {
            SONNET
        }
    }

    pub fn cost_for_usage(&self, model_id: &str, usage: &UsageInfo) -> f64 {
        let pricing = self.model_pricing(model_id);
        let per_million = |tokens: Option<u64>, price: f64| {
            tokens.unwrap_or(0) as f64 / 1_000_000.0 * price
        };

        per_million(usage.input_tokens, pricing.input)
            + per_million(usage.output_tokens, pricing.output)
            + per_million(usage.cache_creation_input_tokens, pricing.cache_write)
            + per_million(usage.cache_read_input_tokens, pricing.cache_read)
    }

    /// Recorded `costUSD` wins over a price computed from usage.
    pub fn cost_for_entry(&self, entry: &TranscriptEntry) -> Option<f64> {
        if let Some(cost) = entry.cost_usd {
            return Some(cost);
        }
        let message = entry.message.as_ref()?;
        let usage = message.usage.as_ref()?;
        let model = message.model.as_deref()?;
        Some(self.cost_for_usage(model, usage))
    }

    pub fn total_cost(&self, entries: &[TranscriptEntry]) -> f64 {
        entries.iter().filter_map(|e| self.cost_for_entry(e)).sum()
    }

    pub fn token_breakdown(&self, entries: &[TranscriptEntry]) -> TokenBreakdown {
        entries
            .iter()
            .filter_map(|e| e.usage())
            .fold(TokenBreakdown::default(), |mut acc, usage| {
                acc.add(usage);
                acc
            })
    }

    pub fn rate_limit_weight(&self, model_id: &str) -> u64 {
        if model_id.to_lowercase().contains("opus") {
            OPUS_RATE_LIMIT_WEIGHT
        } else {
            1
        }
    }

    pub fn weighted_tokens(&self, entries: &[TranscriptEntry]) -> u64 {
        entries
            .iter()
            .filter_map(|e| {
                let message = e.message.as_ref()?;
                let usage = message.usage.as_ref()?;
                let weight = message
                    .model
                    .as_deref()
                    .map(|m| self.rate_limit_weight(m))
                    .unwrap_or(1);
                Some(usage.total_tokens() * weight)
            })
            .sum()
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}

/// Token usage breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenBreakdown {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_input_tokens: u64,
    pub cache_read_input_tokens: u64,
}

impl TokenBreakdown {
    pub fn add(&mut self, usage: &UsageInfo) {
        self.input_tokens += usage.input_tokens.unwrap_or(0);
        self.output_tokens += usage.output_tokens.unwrap_or(0);
        self.cache_creation_input_tokens += usage.cache_creation_input_tokens.unwrap_or(0);
        self.cache_read_input_tokens += usage.cache_read_input_tokens.unwrap_or(0);
    }

    pub fn total_tokens(&self) -> u64 {
        self.input_tokens
            + self.output_tokens
            + self.cache_creation_input_tokens
            + self.cache_read_input_tokens
    }
}
