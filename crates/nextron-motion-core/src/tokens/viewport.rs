//! Scroll trigger presets

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// When a scroll-into-view observer fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportTrigger {
    /// Fire once per element lifetime, never re-hide on scroll-away
    pub once: bool,
    /// Fraction of the element that must be inside the viewport, in (0, 1]
    pub amount: f64,
}

impl ViewportTrigger {
    pub const STANDARD: ViewportTrigger = ViewportTrigger { once: true, amount: 0.2 };
    /// Large sections start earlier
    pub const EARLY: ViewportTrigger = ViewportTrigger { once: true, amount: 0.1 };
    pub const LATE: ViewportTrigger = ViewportTrigger { once: true, amount: 0.3 };

    /// Whether `visible_fraction` reaches the threshold
    #[inline]
    pub fn is_crossed(&self, visible_fraction: f64) -> bool {
        visible_fraction >= self.amount
    }

    /// Whether a repeatable trigger should re-arm; only on full exit
    #[inline]
    pub fn should_rearm(&self, visible_fraction: f64) -> bool {
        !self.once && visible_fraction <= 0.0
    }

    pub fn validate(&self, name: &str) -> Result<()> {
        if self.amount.is_nan() || self.amount <= 0.0 || self.amount > 1.0 {
            return Err(Error::InvalidViewport {
                name: name.to_string(),
                value: self.amount,
            });
        }
        Ok(())
    }
}

impl Default for ViewportTrigger {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Named viewport presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportPreset {
    #[default]
    Standard,
    Early,
    Late,
}

impl ViewportPreset {
    pub const ALL: [ViewportPreset; 3] = [
        ViewportPreset::Standard,
        ViewportPreset::Early,
        ViewportPreset::Late,
    ];

    pub const fn trigger(self) -> ViewportTrigger {
        match self {
            ViewportPreset::Standard => ViewportTrigger::STANDARD,
            ViewportPreset::Early => ViewportTrigger::EARLY,
            ViewportPreset::Late => ViewportTrigger::LATE,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ViewportPreset::Standard => "standard",
            ViewportPreset::Early => "early",
            ViewportPreset::Late => "late",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_fire_once_within_range() {
        for preset in ViewportPreset::ALL {
            let trigger = preset.trigger();
            assert!(trigger.once, "{:?}", preset);
            assert!(trigger.amount > 0.0 && trigger.amount <= 1.0, "{:?}", preset);
            assert!(trigger.validate(preset.name()).is_ok());
        }
    }

    #[test]
    fn test_threshold_crossing() {
        let trigger = ViewportTrigger::STANDARD;
        assert!(!trigger.is_crossed(0.19));
        assert!(trigger.is_crossed(0.2));
        assert!(trigger.is_crossed(1.0));
    }

    #[test]
    fn test_rearm_only_when_repeatable() {
        assert!(!ViewportTrigger::STANDARD.should_rearm(0.0));
        let repeatable = ViewportTrigger { once: false, amount: 0.2 };
        assert!(repeatable.should_rearm(0.0));
        assert!(!repeatable.should_rearm(0.05));
    }

    #[test]
    fn test_invalid_amount() {
        let zero = ViewportTrigger { once: true, amount: 0.0 };
        assert!(zero.validate("zero").is_err());
        let over = ViewportTrigger { once: true, amount: 1.5 };
        assert!(over.validate("over").is_err());
    }
}
