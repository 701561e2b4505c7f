//! Motion tokens: the small shared vocabulary every section draws from
//!
//! - `easing` - named cubic-bezier curves and their evaluation
//! - `timing` - duration, stagger and distance tiers
//! - `viewport` - scroll trigger presets

pub mod easing;
pub mod timing;
pub mod viewport;

use std::collections::BTreeMap;

use serde::Serialize;

pub use easing::{Easing, EasingCurve};
pub use timing::{DistanceTier, DurationTier, StaggerTier};
pub use viewport::{ViewportPreset, ViewportTrigger};

use crate::{Error, Result};

/// Every token table, keyed by name
#[derive(Debug, Clone, Serialize)]
pub struct TokenSet {
    pub easings: BTreeMap<String, EasingCurve>,
    pub durations: BTreeMap<String, f64>,
    pub staggers: BTreeMap<String, f64>,
    pub distances: BTreeMap<String, f64>,
    pub viewport: BTreeMap<String, ViewportTrigger>,
}

impl TokenSet {
    /// The site's token tables
    pub fn standard() -> Self {
        Self {
            easings: Easing::ALL
                .iter()
                .map(|e| (e.name().to_string(), e.curve()))
                .collect(),
            durations: DurationTier::ALL
                .iter()
                .map(|d| (d.name().to_string(), d.secs()))
                .collect(),
            staggers: StaggerTier::ALL
                .iter()
                .map(|s| (s.name().to_string(), s.secs()))
                .collect(),
            distances: DistanceTier::ALL
                .iter()
                .map(|d| (d.name().to_string(), d.px()))
                .collect(),
            viewport: ViewportPreset::ALL
                .iter()
                .map(|p| (p.name().to_string(), p.trigger()))
                .collect(),
        }
    }

    /// Check the invariants of every table, returning the first violation
    pub fn validate(&self) -> Result<()> {
        for (name, curve) in &self.easings {
            curve.validate(name)?;
        }
        for (name, &value) in &self.durations {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::InvalidDuration { name: name.clone(), value });
            }
        }
        let mut prev = 0.0;
        for tier in DurationTier::ALL {
            let value = self.durations.get(tier.name()).copied().unwrap_or(tier.secs());
            if value <= prev {
                return Err(Error::InvalidDuration {
                    name: tier.name().to_string(),
                    value,
                });
            }
            prev = value;
        }
        for (name, &value) in &self.staggers {
            if value.is_nan() || value <= 0.0 {
                return Err(Error::InvalidStagger { name: name.clone(), value });
            }
        }
        for (name, trigger) in &self.viewport {
            trigger.validate(name)?;
        }
        Ok(())
    }
}
