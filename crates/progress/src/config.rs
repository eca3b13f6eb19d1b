//! Store configuration.

use std::str::FromStr;

/// Key the progress document is stored under by default.
pub const DEFAULT_STORAGE_KEY: &str = "nine_experiments_progress";

/// How `complete_day` treats day numbers outside 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayPolicy {
    /// Ignore out-of-range days
    #[default]
    Strict,
    /// Insert any day unchecked (legacy behaviour). Three garbage days
    /// are enough to complete an experiment.
    Lenient,
}

impl DayPolicy {
    /// Whether `day` may be recorded under this policy.
    pub fn accepts(self, day: u32) -> bool {
        match self {
            DayPolicy::Strict => (1..=ninex_core::DAYS_PER_EXPERIMENT as u32).contains(&day),
            DayPolicy::Lenient => true,
        }
    }
}

/// Error returned when parsing an unknown day policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown day policy {0:?} (expected \"strict\" or \"lenient\")")]
pub struct ParseDayPolicyError(String);

impl FromStr for DayPolicy {
    type Err = ParseDayPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(DayPolicy::Strict),
            "lenient" => Ok(DayPolicy::Lenient),
            _ => Err(ParseDayPolicyError(s.to_string())),
        }
    }
}

/// Progress store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Storage key of the progress document
    pub storage_key: String,

    /// Day validation for `complete_day`
    pub day_policy: DayPolicy,
}

impl StoreConfig {
    /// Use a different storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Use a different day policy.
    pub fn with_day_policy(mut self, policy: DayPolicy) -> Self {
        self.day_policy = policy;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            day_policy: DayPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_policy() {
        assert_eq!("strict".parse::<DayPolicy>().unwrap(), DayPolicy::Strict);
        assert_eq!("Lenient".parse::<DayPolicy>().unwrap(), DayPolicy::Lenient);
        assert!("loose".parse::<DayPolicy>().is_err());
    }

    #[test]
    fn test_policy_accepts() {
        assert!(DayPolicy::Strict.accepts(1));
        assert!(DayPolicy::Strict.accepts(3));
        assert!(!DayPolicy::Strict.accepts(0));
        assert!(!DayPolicy::Strict.accepts(4));
        assert!(DayPolicy::Lenient.accepts(42));
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::default()
            .with_storage_key("profile_b")
            .with_day_policy(DayPolicy::Lenient);

        assert_eq!(config.storage_key, "profile_b");
        assert_eq!(config.day_policy, DayPolicy::Lenient);
        assert_eq!(StoreConfig::default().storage_key, DEFAULT_STORAGE_KEY);
    }
}
