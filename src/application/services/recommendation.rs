//! Recommendation lookup
//!
//! Turns the final value of one configured variable into a label.

use tracing::debug;

use crate::config::RecommendationConfig;
use crate::domain::VariableStore;

/// Service mapping a run's final store to a recommendation label.
pub struct RecommendationService {
    config: Option<RecommendationConfig>,
}

impl RecommendationService {
    pub fn new(config: Option<RecommendationConfig>) -> Self {
        Self { config }
    }

    /// Variable the table is keyed by, if a table is configured.
    pub fn variable(&self) -> Option<&str> {
        self.config.as_ref().map(|c| c.variable.as_str())
    }

    /// Look up the label for the watched variable's final value.
    ///
    /// Returns the configured default when the variable is missing or no rule
    /// matches, and `None` when no table is configured.
    pub fn recommend(&self, variables: &VariableStore) -> Option<String> {
        let config = self.config.as_ref()?;
        let value = variables.get(&config.variable);
        debug!("recommend: {}={:?}", config.variable, value);

        value
            .and_then(|v| config.rules.iter().find(|rule| rule.value == *v))
            .map(|rule| rule.label.clone())
            .or_else(|| config.default.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecommendationRule;

    fn service() -> RecommendationService {
        RecommendationService::new(Some(RecommendationConfig {
            variable: "b".into(),
            default: Some("unknown".into()),
            rules: vec![
                RecommendationRule {
                    value: 0.0,
                    label: "reject".into(),
                },
                RecommendationRule {
                    value: 1.0,
                    label: "accept".into(),
                },
            ],
        }))
    }

    #[test]
    fn given_matching_value_when_recommending_then_returns_label() {
        let vars = VariableStore::from([("b".to_string(), 1.0)]);
        assert_eq!(service().recommend(&vars).as_deref(), Some("accept"));
    }

    #[test]
    fn given_unmatched_or_missing_value_when_recommending_then_returns_default() {
        let vars = VariableStore::from([("b".to_string(), 7.0)]);
        assert_eq!(service().recommend(&vars).as_deref(), Some("unknown"));
        assert_eq!(
            service().recommend(&VariableStore::new()).as_deref(),
            Some("unknown")
        );
    }

    #[test]
    fn given_no_table_when_recommending_then_none() {
        let vars = VariableStore::from([("b".to_string(), 1.0)]);
        assert_eq!(RecommendationService::new(None).recommend(&vars), None);
    }
}
