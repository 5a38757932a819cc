//! # Facility Configuration
//!
//! Tunables for one facility session, loaded from YAML. Every field has a
//! default, so an empty document (or no document at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use locker_core::FacilityError;
use locker_state::TransitionPolicy;

/// Label placed on a locker when a delivery arrives without one.
pub const DEFAULT_DELIVERY_LABEL: &str = "New Amazon Parcel";

/// Seconds a notice stays visible.
pub const DEFAULT_NOTIFICATION_TTL_SECS: i64 = 5;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FacilityConfig {
    /// Which parcel status changes are admitted.
    pub transition_policy: TransitionPolicy,
    /// Lifetime of the transient notice.
    pub notification_ttl_secs: i64,
    /// Label for deliveries received without one.
    pub delivery_label: String,
    /// Seed document; `None` selects the built-in fixtures.
    pub seed: Option<PathBuf>,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            transition_policy: TransitionPolicy::default(),
            notification_ttl_secs: DEFAULT_NOTIFICATION_TTL_SECS,
            delivery_label: DEFAULT_DELIVERY_LABEL.to_string(),
            seed: None,
        }
    }
}

impl FacilityConfig {
    /// Parse a YAML document.
    pub fn from_yaml(content: &str) -> Result<Self, FacilityError> {
        let config: FacilityConfig = serde_yaml::from_str(content)
            .map_err(|e| FacilityError::Config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. A relative `seed` path is resolved against the
    /// directory holding the config file.
    pub fn load(path: &Path) -> Result<Self, FacilityError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            FacilityError::Config(format!("{}: cannot read file: {e}", path.display()))
        })?;
        let mut config = Self::from_yaml(&content).map_err(|e| match e {
            FacilityError::Config(msg) => {
                FacilityError::Config(format!("{}: {msg}", path.display()))
            }
            other => other,
        })?;
        if let (Some(seed), Some(dir)) = (config.seed.as_ref(), path.parent()) {
            if seed.is_relative() {
                config.seed = Some(dir.join(seed));
            }
        }
        Ok(config)
    }

    fn validate(&self) -> Result<(), FacilityError> {
        if self.notification_ttl_secs <= 0 {
            return Err(FacilityError::Config(format!(
                "notification_ttl_secs must be positive, got {}",
                self.notification_ttl_secs
            )));
        }
        if self.delivery_label.trim().is_empty() {
            return Err(FacilityError::Config(
                "delivery_label must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = FacilityConfig::from_yaml("{}").unwrap();
        assert_eq!(config, FacilityConfig::default());
        assert_eq!(config.transition_policy, TransitionPolicy::Permissive);
        assert_eq!(config.notification_ttl_secs, 5);
        assert_eq!(config.delivery_label, "New Amazon Parcel");
    }

    #[test]
    fn test_strict_policy() {
        let config = FacilityConfig::from_yaml("transition_policy: strict\n").unwrap();
        assert_eq!(config.transition_policy, TransitionPolicy::Strict);
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = FacilityConfig::from_yaml("ttl: 5\n").unwrap_err();
        assert!(matches!(err, FacilityError::Config(_)));
    }

    #[test]
    fn test_rejects_non_positive_ttl() {
        assert!(FacilityConfig::from_yaml("notification_ttl_secs: 0\n").is_err());
    }

    #[test]
    fn test_rejects_blank_label() {
        assert!(FacilityConfig::from_yaml("delivery_label: '  '\n").is_err());
    }

    #[test]
    fn test_load_resolves_seed_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facility.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "seed: fixtures/seed.yaml").unwrap();
        writeln!(file, "notification_ttl_secs: 10").unwrap();

        let config = FacilityConfig::load(&path).unwrap();
        assert_eq!(config.seed, Some(dir.path().join("fixtures/seed.yaml")));
        assert_eq!(config.notification_ttl_secs, 10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FacilityConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(err.to_string().contains("cannot read file"));
    }
}
