//! Visibility observation
//!
//! Sections subscribe to boundary-crossing events instead of polling their
//! own position. A trigger-once subscription delivers a single `Entered` and
//! then goes quiet; a repeatable one re-arms after a full exit.

use nextron_motion_core::ViewportTrigger;

/// Whether the platform can report element visibility at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Observation {
    #[default]
    Supported,
    /// No intersection observation: sections reveal on mount
    Unavailable,
}

/// Vertical placement of an element on the page, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Fraction of the element inside a viewport scrolled to `scroll_top`
    pub fn visible_fraction(&self, scroll_top: f64, viewport_height: f64) -> f64 {
        let view_bottom = scroll_top + viewport_height;
        if self.height <= 0.0 {
            let inside = self.top >= scroll_top && self.top <= view_bottom;
            return if inside { 1.0 } else { 0.0 };
        }
        let overlap = (self.bottom().min(view_bottom) - self.top.max(scroll_top)).max(0.0);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Visible fraction reached the trigger threshold
    Entered,
    /// Element left the viewport entirely and the trigger re-armed
    Exited,
}

/// One element's subscription to visibility crossings
#[derive(Debug, Clone)]
pub struct VisibilitySubscription {
    trigger: ViewportTrigger,
    armed: bool,
    active: bool,
}

impl VisibilitySubscription {
    pub fn new(trigger: ViewportTrigger) -> Self {
        Self {
            trigger,
            armed: true,
            active: true,
        }
    }

    pub fn trigger(&self) -> ViewportTrigger {
        self.trigger
    }

    /// Still listening for crossings
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Feed the latest visible fraction; returns a crossing if one happened
    pub fn observe(&mut self, visible_fraction: f64) -> Option<Crossing> {
        if !self.active {
            return None;
        }
        if self.armed && self.trigger.is_crossed(visible_fraction) {
            self.armed = false;
            if self.trigger.once {
                self.active = false;
            }
            return Some(Crossing::Entered);
        }
        if !self.armed && self.trigger.should_rearm(visible_fraction) {
            self.armed = true;
            return Some(Crossing::Exited);
        }
        None
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_fraction() {
        let bounds = Bounds::new(1000.0, 400.0);
        assert_eq!(bounds.visible_fraction(0.0, 800.0), 0.0);
        assert!((bounds.visible_fraction(300.0, 800.0) - 0.25).abs() < 1e-9);
        assert_eq!(bounds.visible_fraction(1000.0, 800.0), 1.0);
        assert_eq!(bounds.visible_fraction(2000.0, 800.0), 0.0);
    }

    #[test]
    fn test_tall_element_partial() {
        // Taller than the viewport: never fully visible
        let bounds = Bounds::new(0.0, 2000.0);
        assert!((bounds.visible_fraction(0.0, 800.0) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_once_fires_single_time() {
        let mut sub = VisibilitySubscription::new(ViewportTrigger::STANDARD);
        assert_eq!(sub.observe(0.1), None);
        assert_eq!(sub.observe(0.25), Some(Crossing::Entered));
        assert!(!sub.is_active());
        assert_eq!(sub.observe(0.0), None);
        assert_eq!(sub.observe(0.9), None);
    }

    #[test]
    fn test_repeatable_rearms_on_full_exit() {
        let mut sub = VisibilitySubscription::new(ViewportTrigger { once: false, amount: 0.3 });
        assert_eq!(sub.observe(0.5), Some(Crossing::Entered));
        assert_eq!(sub.observe(0.1), None);
        assert_eq!(sub.observe(0.0), Some(Crossing::Exited));
        assert_eq!(sub.observe(0.3), Some(Crossing::Entered));
    }

    #[test]
    fn test_cancelled_is_silent() {
        let mut sub = VisibilitySubscription::new(ViewportTrigger::EARLY);
        sub.cancel();
        assert_eq!(sub.observe(1.0), None);
    }
}
