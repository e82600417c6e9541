#![forbid(unsafe_code)]

//! Policy-as-data configuration for dsviz pages.
//!
//! Every tunable a page uses (step pacing, capacity, seed contents, history
//! depth, autoplay cadence and race parameters) lives in a single
//! [`PolicyConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # dsviz.toml
//! history_depth = 20
//!
//! [stack]
//! tick_interval_ms = 600
//! capacity = 8
//!
//! [race]
//! speed = 80
//! ```
//!
//! ```rust,ignore
//! let policy = PolicyConfig::from_toml_file("dsviz.toml")?;
//! let page = policy.page(Structure::Stack);
//! ```
//!
//! # Defaults
//!
//! Per-structure sections only override what they name. Anything left out
//! falls back to the pacing and capacity each page ships with, so
//! `PolicyConfig::default()` reproduces the stock pages exactly.

#[cfg(feature = "policy-config")]
use std::path::Path;

use dsviz_core::Structure;
use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::timing::TimingProfile;

/// Undo entries kept per page.
pub const DEFAULT_HISTORY_DEPTH: usize = 10;
/// Elements a stack page holds before refusing pushes.
pub const DEFAULT_STACK_CAPACITY: usize = 10;

// ---------------------------------------------------------------------------
// Top-level PolicyConfig
// ---------------------------------------------------------------------------

/// Top-level configuration for all pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub array: StructurePolicy,
    pub linked_list: StructurePolicy,
    pub stack: StructurePolicy,
    pub queue: StructurePolicy,

    /// Undo entries kept per page. `None` uses [`DEFAULT_HISTORY_DEPTH`].
    pub history_depth: Option<usize>,

    pub autoplay: AutoplayPolicy,

    pub race: RacePolicy,
}

impl PolicyConfig {
    /// Load from a TOML string.
    ///
    /// # Errors
    ///
    /// Parse failures, or [`PolicyConfigError::Validation`] when the parsed
    /// config fails [`validate`](Self::validate).
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyConfigError> {
        let policy: Self = toml::from_str(s)?;
        policy.into_validated()
    }

    /// Load from a TOML file on disk.
    ///
    /// # Errors
    ///
    /// As [`from_toml_str`](Self::from_toml_str), plus I/O failures.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    ///
    /// # Errors
    ///
    /// Parse failures or validation problems.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PolicyConfigError> {
        let policy: Self = serde_json::from_str(s)?;
        policy.into_validated()
    }

    /// Load from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// As [`from_json_str`](Self::from_json_str), plus I/O failures.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Load from `path`, picking the format from its extension
    /// (`.json` is JSON, anything else TOML).
    ///
    /// # Errors
    ///
    /// As the format-specific loaders.
    #[cfg(feature = "policy-config")]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PolicyConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_file(path)
        } else {
            Self::from_toml_file(path)
        }
    }

    fn into_validated(self) -> Result<Self, PolicyConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PolicyConfigError::Validation(errors))
        }
    }

    /// Check every parameter is within range.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for structure in Structure::ALL {
            let section = self.section(structure);
            let name = structure.name();
            if section.tick_interval_ms == Some(0) {
                errors.push(format!("{name}.tick_interval_ms must be > 0"));
            }
            if section.capacity == Some(0) {
                errors.push(format!("{name}.capacity must be > 0"));
            }
            if let (Some(capacity), Some(seed)) = (self.page(structure).capacity, &section.seed)
                && seed.len() > capacity
            {
                errors.push(format!(
                    "{name}.seed has {} values but capacity is {capacity}",
                    seed.len()
                ));
            }
        }

        if self.history_depth == Some(0) {
            errors.push("history_depth must be > 0".into());
        }
        if self.autoplay.interval_ms == 0 {
            errors.push("autoplay.interval_ms must be > 0".into());
        }
        if self.autoplay.min_value > self.autoplay.max_value {
            errors.push("autoplay.min_value must be <= autoplay.max_value".into());
        }

        let race = &self.race;
        if race.tick_ms == 0 {
            errors.push("race.tick_ms must be > 0".into());
        }
        if race.size == 0 {
            errors.push("race.size must be > 0".into());
        }
        if !(1..=100).contains(&race.speed) {
            errors.push(format!("race.speed must be in 1..=100, got {}", race.speed));
        }
        if race.min_value > race.max_value {
            errors.push("race.min_value must be <= race.max_value".into());
        }

        errors
    }

    /// Raw overrides for one structure.
    #[must_use]
    pub fn section(&self, structure: Structure) -> &StructurePolicy {
        match structure {
            Structure::Array => &self.array,
            Structure::LinkedList => &self.linked_list,
            Structure::Stack => &self.stack,
            Structure::Queue => &self.queue,
        }
    }

    /// Effective settings for a page, with defaults filled in.
    #[must_use]
    pub fn page(&self, structure: Structure) -> PagePolicy {
        let section = self.section(structure);
        let base = TimingProfile::for_structure(structure);
        let timing = TimingProfile::new(
            section.tick_interval_ms.unwrap_or(base.tick_interval_ms),
            section.settle_delay_ms.unwrap_or(base.settle_delay_ms),
            section.peek_linger_ms.unwrap_or(base.peek_linger_ms),
        );
        let default_capacity = match structure {
            Structure::Stack => Some(DEFAULT_STACK_CAPACITY),
            _ => None,
        };
        PagePolicy {
            structure,
            timing,
            capacity: section.capacity.or(default_capacity),
            seed: section
                .seed
                .clone()
                .unwrap_or_else(|| structure.seed_values().to_vec()),
            history_depth: self.history_depth.unwrap_or(DEFAULT_HISTORY_DEPTH),
        }
    }

    /// Serialize to a single JSON line.
    #[cfg(feature = "policy-config")]
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Overrides for one structure's page. Unset fields keep the page default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructurePolicy {
    pub tick_interval_ms: Option<u64>,
    pub settle_delay_ms: Option<u64>,
    pub peek_linger_ms: Option<u64>,
    /// Maximum element count. Stacks default to [`DEFAULT_STACK_CAPACITY`].
    pub capacity: Option<usize>,
    /// Initial contents. Each structure has its own stock seed.
    pub seed: Option<Vec<i64>>,
}

/// Automatic random operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoplayPolicy {
    /// Idle time before the next random operation.
    pub interval_ms: u64,
    /// Smallest value a random push/enqueue/add carries.
    pub min_value: i64,
    /// Largest value a random push/enqueue/add carries.
    pub max_value: i64,
}

impl Default for AutoplayPolicy {
    fn default() -> Self {
        Self {
            interval_ms: 2000,
            min_value: 1,
            max_value: 100,
        }
    }
}

impl AutoplayPolicy {
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Algorithm race parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RacePolicy {
    /// Simulation tick.
    pub tick_ms: u64,
    /// Default input length.
    pub size: usize,
    /// Default speed, 1..=100 with 50 as nominal.
    pub speed: u32,
    /// Smallest generated input value.
    pub min_value: i64,
    /// Largest generated input value.
    pub max_value: i64,
}

impl Default for RacePolicy {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            size: 30,
            speed: 50,
            min_value: 5,
            max_value: 100,
        }
    }
}

impl RacePolicy {
    #[must_use]
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

/// Fully resolved settings for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagePolicy {
    pub structure: Structure,
    pub timing: TimingProfile,
    pub capacity: Option<usize>,
    pub seed: Vec<i64>,
    pub history_depth: usize,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a policy configuration.
#[derive(Debug, thiserror::Error)]
pub enum PolicyConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(feature = "policy-config")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[cfg(feature = "policy-config")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_stock_pages() {
        let policy = PolicyConfig::default();
        let stack = policy.page(Structure::Stack);
        assert_eq!(stack.timing, TimingProfile::new(1000, 800, 1500));
        assert_eq!(stack.capacity, Some(10));
        assert_eq!(stack.seed, vec![10, 20, 30, 40, 50]);
        assert_eq!(stack.history_depth, 10);

        let array = policy.page(Structure::Array);
        assert_eq!(array.timing, TimingProfile::new(1200, 1000, 0));
        assert_eq!(array.capacity, None);
        assert_eq!(array.seed, vec![10, 25, 100, 42, 999]);

        assert_eq!(policy.autoplay.interval(), Duration::from_secs(2));
        assert_eq!(policy.race.tick(), Duration::from_millis(100));
    }

    #[test]
    fn default_validates_clean() {
        assert!(PolicyConfig::default().validate().is_empty());
    }

    #[test]
    fn partial_override_preserves_defaults() {
        let mut policy = PolicyConfig::default();
        policy.queue.tick_interval_ms = Some(300);
        let queue = policy.page(Structure::Queue);
        assert_eq!(queue.timing.tick_interval_ms, 300);
        assert_eq!(queue.timing.settle_delay_ms, 1500);
        assert_eq!(queue.timing.peek_linger_ms, 2000);
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut policy = PolicyConfig::default();
        policy.array.tick_interval_ms = Some(0);
        policy.stack.capacity = Some(0);
        policy.history_depth = Some(0);
        policy.race.speed = 0;
        let errors = policy.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors.iter().any(|e| e.contains("array.tick_interval_ms")));
    }

    #[test]
    fn seed_larger_than_capacity_is_flagged() {
        let mut policy = PolicyConfig::default();
        policy.stack.seed = Some((0..11).collect());
        assert_eq!(policy.validate().len(), 1);
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn toml_sections_override_selectively() {
        let policy = PolicyConfig::from_toml_str(
            "history_depth = 3\n[linked_list]\nsettle_delay_ms = 10\nseed = [1, 2]\n",
        )
        .unwrap();
        let list = policy.page(Structure::LinkedList);
        assert_eq!(list.timing, TimingProfile::new(1500, 10, 0));
        assert_eq!(list.seed, vec![1, 2]);
        assert_eq!(list.history_depth, 3);
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn invalid_toml_is_rejected() {
        let err = PolicyConfig::from_toml_str("[race]\nspeed = 500\n").unwrap_err();
        assert!(matches!(err, PolicyConfigError::Validation(_)));
        assert!(err.to_string().contains("race.speed"));
    }

    #[cfg(feature = "policy-config")]
    #[test]
    fn json_round_trip() {
        let mut policy = PolicyConfig::default();
        policy.stack.capacity = Some(4);
        let back = PolicyConfig::from_json_str(&policy.to_jsonl()).unwrap();
        assert_eq!(back, policy);
    }
}
