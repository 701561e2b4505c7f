//! Duration, stagger and distance tiers
//!
//! Sections pick a tier by name; the numeric values only live here.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Standardized animation durations, in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationTier {
    Instant,
    Fast,
    Normal,
    Slow,
    VerySlow,
    Deliberate,
}

impl DurationTier {
    pub const ALL: [DurationTier; 6] = [
        DurationTier::Instant,
        DurationTier::Fast,
        DurationTier::Normal,
        DurationTier::Slow,
        DurationTier::VerySlow,
        DurationTier::Deliberate,
    ];

    /// Length in seconds
    pub const fn secs(self) -> f64 {
        match self {
            DurationTier::Instant => 0.2,
            DurationTier::Fast => 0.3,
            DurationTier::Normal => 0.5,
            DurationTier::Slow => 0.7,
            DurationTier::VerySlow => 0.9,
            DurationTier::Deliberate => 1.2,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::from_secs_f64(self.secs())
    }

    pub const fn name(self) -> &'static str {
        match self {
            DurationTier::Instant => "instant",
            DurationTier::Fast => "fast",
            DurationTier::Normal => "normal",
            DurationTier::Slow => "slow",
            DurationTier::VerySlow => "very_slow",
            DurationTier::Deliberate => "deliberate",
        }
    }
}

/// Per-child delay offsets for staggered groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerTier {
    Tight,
    Compact,
    Normal,
    Comfortable,
    Relaxed,
    Loose,
}

impl StaggerTier {
    pub const ALL: [StaggerTier; 6] = [
        StaggerTier::Tight,
        StaggerTier::Compact,
        StaggerTier::Normal,
        StaggerTier::Comfortable,
        StaggerTier::Relaxed,
        StaggerTier::Loose,
    ];

    pub const fn secs(self) -> f64 {
        match self {
            StaggerTier::Tight => 0.05,
            StaggerTier::Compact => 0.08,
            StaggerTier::Normal => 0.1,
            StaggerTier::Comfortable => 0.12,
            StaggerTier::Relaxed => 0.15,
            StaggerTier::Loose => 0.2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            StaggerTier::Tight => "tight",
            StaggerTier::Compact => "compact",
            StaggerTier::Normal => "normal",
            StaggerTier::Comfortable => "comfortable",
            StaggerTier::Relaxed => "relaxed",
            StaggerTier::Loose => "loose",
        }
    }

    /// Parse a tier from its name (as used on the command line)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tier| tier.name() == name)
    }
}

/// Translation distances for entrances, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceTier {
    Minimal,
    Subtle,
    Normal,
    Prominent,
    Dramatic,
}

impl DistanceTier {
    pub const ALL: [DistanceTier; 5] = [
        DistanceTier::Minimal,
        DistanceTier::Subtle,
        DistanceTier::Normal,
        DistanceTier::Prominent,
        DistanceTier::Dramatic,
    ];

    pub const fn px(self) -> f64 {
        match self {
            DistanceTier::Minimal => 6.0,
            DistanceTier::Subtle => 12.0,
            DistanceTier::Normal => 18.0,
            DistanceTier::Prominent => 24.0,
            DistanceTier::Dramatic => 32.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DistanceTier::Minimal => "minimal",
            DistanceTier::Subtle => "subtle",
            DistanceTier::Normal => "normal",
            DistanceTier::Prominent => "prominent",
            DistanceTier::Dramatic => "dramatic",
        }
    }
}

impl fmt::Display for DurationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.name(), self.secs())
    }
}

impl fmt::Display for StaggerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}s)", self.name(), self.secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durations_increase() {
        let mut prev = 0.0;
        for tier in DurationTier::ALL {
            assert!(tier.secs() > prev, "{:?} not increasing", tier);
            prev = tier.secs();
        }
        assert_eq!(DurationTier::Instant.secs(), 0.2);
        assert_eq!(DurationTier::Deliberate.secs(), 1.2);
    }

    #[test]
    fn test_stagger_bounds() {
        assert_eq!(StaggerTier::Tight.secs(), 0.05);
        assert_eq!(StaggerTier::Loose.secs(), 0.2);
        assert!(StaggerTier::ALL.iter().all(|tier| tier.secs() > 0.0));
    }

    #[test]
    fn test_stagger_from_name() {
        assert_eq!(StaggerTier::from_name("comfortable"), Some(StaggerTier::Comfortable));
        assert_eq!(StaggerTier::from_name("frantic"), None);
    }

    #[test]
    fn test_distance_bounds() {
        assert_eq!(DistanceTier::Minimal.px(), 6.0);
        assert_eq!(DistanceTier::Dramatic.px(), 32.0);
    }

    #[test]
    fn test_duration_conversion() {
        assert_eq!(DurationTier::Normal.duration(), Duration::from_millis(500));
    }
}
