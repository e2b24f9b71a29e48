use serde::Deserialize;

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Batch processing settings for the quote orchestrator, wired from the
/// surrounding application's configuration files.
#[derive(Debug, Deserialize, Clone)]
pub struct QuoteConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_defaults_when_absent() {
        let config: QuoteConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);

        let config: QuoteConfig = serde_json::from_str(r#"{"batch_size": 8}"#).unwrap();
        assert_eq!(config.batch_size, 8);
    }
}
