//! Section reveal protocol
//!
//! Every content section runs the same state machine:
//!
//! ```text
//! Unobserved --mount--> Hidden --threshold crossed--> Revealing --duration elapsed--> Visible
//! ```
//!
//! `Visible` is terminal for trigger-once presets. A repeatable trigger goes
//! back to `Hidden` once the section has fully left the viewport. With
//! reduced motion the whole sequence collapses to the settled visible style,
//! and a section without visibility observation reveals as soon as it mounts.

use tokio::time::Instant;
use tracing::debug;

use nextron_motion_core::{reduced_motion_safe, ResolvedStyle, StateName, Variant, ViewportTrigger};

use super::timing::{elapsed_secs, progress};
use super::viewport::{Crossing, Observation, VisibilitySubscription};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    /// Not mounted, or unmounted
    Unobserved,
    Hidden,
    Revealing,
    Visible,
}

/// Styles for one frame of a section and its children, in declared order
#[derive(Debug, Clone, PartialEq)]
pub struct RevealFrame {
    pub container: ResolvedStyle,
    pub children: Vec<ResolvedStyle>,
}

/// Reveal controller for one section
#[derive(Debug, Clone)]
pub struct SectionReveal {
    container: Variant,
    children: Vec<Variant>,
    trigger: ViewportTrigger,
    phase: RevealPhase,
    /// Start of the current Revealing phase
    started: Option<Instant>,
    subscription: Option<VisibilitySubscription>,
    reduced: bool,
}

fn terminal_pair(variant: &Variant) -> (StateName, StateName) {
    variant
        .terminal_pair()
        .unwrap_or((StateName::Hidden, StateName::Visible))
}

impl SectionReveal {
    pub fn new(container: Variant) -> Self {
        Self {
            container,
            children: Vec::new(),
            trigger: ViewportTrigger::STANDARD,
            phase: RevealPhase::Unobserved,
            started: None,
            subscription: None,
            reduced: false,
        }
    }

    pub fn with_trigger(mut self, trigger: ViewportTrigger) -> Self {
        self.trigger = trigger;
        self
    }

    pub fn child(mut self, variant: Variant) -> Self {
        self.children.push(variant);
        self
    }

    pub fn children(mut self, variants: impl IntoIterator<Item = Variant>) -> Self {
        self.children.extend(variants);
        self
    }

    #[inline]
    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn trigger(&self) -> ViewportTrigger {
        self.trigger
    }

    /// Still waiting on visibility crossings
    pub fn is_observing(&self) -> bool {
        self.subscription.as_ref().is_some_and(|s| s.is_active())
    }

    /// Check if there's work for the next frame
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.phase == RevealPhase::Revealing
    }

    /// Mount with the hidden style applied immediately.
    ///
    /// Without visibility observation the trigger fires right away so the
    /// content can never stay hidden.
    pub fn mount(&mut self, observation: Observation, reduced: bool, now: Instant) {
        self.reduced = reduced;
        self.phase = RevealPhase::Hidden;
        self.started = None;
        match observation {
            Observation::Supported => {
                self.subscription = Some(VisibilitySubscription::new(self.trigger));
            }
            Observation::Unavailable => {
                debug!("Visibility observation unavailable, revealing on mount");
                self.subscription = None;
                self.begin(now);
            }
        }
    }

    /// Cancel the transition and the visibility subscription
    pub fn unmount(&mut self) {
        if let Some(sub) = self.subscription.as_mut() {
            sub.cancel();
        }
        self.subscription = None;
        self.started = None;
        self.phase = RevealPhase::Unobserved;
    }

    /// Feed the section's current visible fraction
    pub fn observe(&mut self, visible_fraction: f64, now: Instant) {
        let Some(sub) = self.subscription.as_mut() else {
            return;
        };
        match sub.observe(visible_fraction) {
            Some(Crossing::Entered) if self.phase == RevealPhase::Hidden => self.begin(now),
            Some(Crossing::Exited) => {
                self.phase = RevealPhase::Hidden;
                self.started = None;
            }
            _ => {}
        }
    }

    fn begin(&mut self, now: Instant) {
        if self.reduced {
            self.phase = RevealPhase::Visible;
            self.started = None;
        } else {
            self.phase = RevealPhase::Revealing;
            self.started = Some(now);
        }
    }

    /// Apply a new reduced-motion preference; an in-flight reveal is superseded
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced = reduced;
        if reduced && self.phase == RevealPhase::Revealing {
            self.phase = RevealPhase::Visible;
            self.started = None;
        }
    }

    /// Start offset of each child from the start of the reveal.
    ///
    /// Child `n` starts at `delay_children + n * stagger_children`, always in
    /// declared order. Reduced motion removes the staggering.
    pub fn child_start_offsets(&self) -> Vec<f64> {
        let stagger = reduced_motion_safe(&self.container, self.reduced).stagger();
        (0..self.children.len())
            .map(|i| stagger.map(|t| t.child_offset(i)).unwrap_or(0.0))
            .collect()
    }

    /// Time from the start of Revealing until the last child settles
    pub fn total_duration(&self) -> f64 {
        let container = reduced_motion_safe(&self.container, self.reduced);
        let (_, target) = terminal_pair(&container);
        let own = container.transition_to(target).total();

        self.children
            .iter()
            .zip(self.child_start_offsets())
            .map(|(child, offset)| {
                let child = reduced_motion_safe(child, self.reduced);
                let (_, target) = terminal_pair(&child);
                offset + child.transition_to(target).total()
            })
            .fold(own, f64::max)
    }

    /// Advance Revealing to Visible once everything has played, then render
    pub fn update(&mut self, now: Instant) -> Option<RevealFrame> {
        if let (RevealPhase::Revealing, Some(start)) = (self.phase, self.started) {
            if elapsed_secs(start, now) >= self.total_duration() {
                self.phase = RevealPhase::Visible;
                self.started = None;
            }
        }
        self.frame(now)
    }

    /// Styles at `now` without advancing the state machine; `None` when unmounted
    pub fn frame(&self, now: Instant) -> Option<RevealFrame> {
        if self.phase == RevealPhase::Unobserved {
            return None;
        }
        let elapsed = self.started.map(|s| elapsed_secs(s, now)).unwrap_or(0.0);
        let container = self.style_of(&self.container, elapsed, 0.0);
        let children = self
            .children
            .iter()
            .zip(self.child_start_offsets())
            .map(|(child, offset)| self.style_of(child, elapsed, offset))
            .collect();
        Some(RevealFrame { container, children })
    }

    fn style_of(&self, variant: &Variant, elapsed: f64, offset: f64) -> ResolvedStyle {
        let variant = reduced_motion_safe(variant, self.reduced);
        let (initial, target) = terminal_pair(&variant);
        let from = variant.style(initial);
        let to = variant.style(target);
        match self.phase {
            RevealPhase::Unobserved | RevealPhase::Hidden => from,
            RevealPhase::Visible => to,
            RevealPhase::Revealing => {
                let transition = variant.transition_to(target);
                let p = progress(elapsed - offset, transition.delay, transition.duration);
                ResolvedStyle::lerp(&from, &to, transition.ease.apply(p), 0.0)
            }
        }
    }
}
