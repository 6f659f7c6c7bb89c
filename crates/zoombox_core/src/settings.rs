//! Coordinator settings
//!
//! Settings can be built in code or loaded from TOML:
//!
//! ```toml
//! settle_delay_ms = 150
//! default_policy = "shortest"
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::debounce::{saturating_millis, DEFAULT_SETTLE_DELAY};
use crate::error::Result;
use crate::policy::FitPolicy;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CoordinatorSettings {
    /// Quiet period before a burst of resizes settles
    pub settle_delay_ms: u64,
    /// Fit policy for zooms that don't pick one
    pub default_policy: FitPolicy,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            default_policy: FitPolicy::default(),
        }
    }
}

impl CoordinatorSettings {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay_ms = saturating_millis(delay);
        self
    }

    pub fn with_default_policy(mut self, policy: FitPolicy) -> Self {
        self.default_policy = policy;
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ZoomError;

    #[test]
    fn test_defaults() {
        let settings = CoordinatorSettings::default();
        assert_eq!(settings.settle_delay(), Duration::from_millis(100));
        assert_eq!(settings.default_policy, FitPolicy::Longest);
    }

    #[test]
    fn test_parse_partial_toml() {
        let settings = CoordinatorSettings::from_toml_str("default_policy = \"height\"").unwrap();
        assert_eq!(settings.default_policy, FitPolicy::Height);
        assert_eq!(settings.settle_delay_ms, 100);

        let settings = CoordinatorSettings::from_toml_str("settle_delay_ms = 40").unwrap();
        assert_eq!(settings.settle_delay(), Duration::from_millis(40));
    }

    #[test]
    fn test_parse_errors() {
        let err = CoordinatorSettings::from_toml_str("default_policy = \"diagonal\"").unwrap_err();
        assert!(matches!(err, ZoomError::Settings(_)));

        let err = CoordinatorSettings::load("/nonexistent/zoombox.toml").unwrap_err();
        assert!(matches!(err, ZoomError::Io(_)));
    }

    #[test]
    fn test_builder() {
        let settings = CoordinatorSettings::default()
            .with_settle_delay(Duration::from_millis(250))
            .with_default_policy(FitPolicy::Width);
        assert_eq!(settings.settle_delay_ms, 250);
        assert_eq!(settings.default_policy, FitPolicy::Width);
    }

    #[test]
    fn test_oversized_delay_saturates() {
        let delay = Duration::from_millis(u64::MAX) + Duration::from_secs(1_000_000_000);
        let settings = CoordinatorSettings::default().with_settle_delay(delay);
        assert_eq!(settings.settle_delay_ms, u64::MAX);
        assert_eq!(settings.settle_delay(), Duration::from_millis(u64::MAX));
    }
}
