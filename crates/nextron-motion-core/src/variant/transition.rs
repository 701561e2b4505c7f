use serde::{Deserialize, Serialize};

use crate::tokens::{DurationTier, Easing, StaggerTier};

/// How often a transition plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Repeat {
    #[default]
    Once,
    Infinite,
}

/// Timing of a move between two visual states. All times in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub duration: f64,
    pub ease: Easing,
    #[serde(default)]
    pub delay: f64,
    /// Offset between consecutive children of a stagger container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stagger_children: Option<f64>,
    /// Offset of the first child from the container's own start
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_children: Option<f64>,
    #[serde(default)]
    pub repeat: Repeat,
    #[serde(default)]
    pub repeat_delay: f64,
}

impl Transition {
    pub const fn new(duration: DurationTier, ease: Easing) -> Self {
        Self::secs(duration.secs(), ease)
    }

    /// A transition with a duration outside the tier table (hero copy, ambient loops)
    pub const fn secs(duration: f64, ease: Easing) -> Self {
        Self {
            duration,
            ease,
            delay: 0.0,
            stagger_children: None,
            delay_children: None,
            repeat: Repeat::Once,
            repeat_delay: 0.0,
        }
    }

    /// Zero-length transition: the target is applied on the next frame
    pub const fn instant() -> Self {
        Self::secs(0.0, Easing::Linear)
    }

    pub const fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub const fn staggered(mut self, stagger: StaggerTier, delay_children: f64) -> Self {
        self.stagger_children = Some(stagger.secs());
        self.delay_children = Some(delay_children);
        self
    }

    pub const fn repeating(mut self, repeat_delay: f64) -> Self {
        self.repeat = Repeat::Infinite;
        self.repeat_delay = repeat_delay;
        self
    }

    pub fn is_instant(&self) -> bool {
        self.duration <= 0.0 && self.delay <= 0.0
    }

    pub fn is_staggered(&self) -> bool {
        self.stagger_children.is_some() || self.delay_children.is_some()
    }

    /// Start offset of the `index`-th child (0-based) from the container's start.
    ///
    /// Offsets come from the common container start, never from the previous
    /// child's completion, so declaration order is start order.
    pub fn child_offset(&self, index: usize) -> f64 {
        self.delay_children.unwrap_or(0.0) + index as f64 * self.stagger_children.unwrap_or(0.0)
    }

    /// Delay plus duration
    pub fn total(&self) -> f64 {
        self.delay + self.duration
    }
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(DurationTier::Normal, Easing::Industrial)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_offsets() {
        let transition = Transition::new(DurationTier::Normal, Easing::Smooth)
            .staggered(StaggerTier::Normal, 0.1);
        let offsets: Vec<f64> = (0..3).map(|i| transition.child_offset(i)).collect();
        for (got, want) in offsets.iter().zip([0.1, 0.2, 0.3]) {
            assert!((got - want).abs() < 1e-9, "{} != {}", got, want);
        }
    }

    #[test]
    fn test_unstaggered_offsets_are_zero() {
        let transition = Transition::default();
        assert_eq!(transition.child_offset(5), 0.0);
        assert!(!transition.is_staggered());
    }

    #[test]
    fn test_instant() {
        assert!(Transition::instant().is_instant());
        assert!(!Transition::instant().with_delay(0.1).is_instant());
        assert_eq!(Transition::new(DurationTier::Slow, Easing::Enter).with_delay(0.2).total(), 0.7 + 0.2);
    }
}
