//! Hover, press and focus animation controller
//!
//! Each pointer or focus event retargets the element's transform from
//! wherever it currently is, so an interrupted hover never snaps. Call the
//! event methods as input arrives, then `update()` each frame to read the
//! interpolated transform.

use tokio::time::Instant;

use nextron_motion_core::variant::{Interaction, InteractionState, Transform};
use nextron_motion_core::{reduced_motion_safe, Transition};

use super::timing::{elapsed_secs, progress};

/// Active gesture transition
#[derive(Debug, Clone)]
struct ActiveTransition {
    start: Instant,
    from: Transform,
    to: Transform,
    transition: Transition,
}

#[derive(Debug, Clone)]
pub struct InteractionAnimator {
    interaction: Interaction,
    state: InteractionState,
    /// Transform as of the last update
    current: Transform,
    animation: Option<ActiveTransition>,
    reduced: bool,
}

impl InteractionAnimator {
    pub fn new(interaction: Interaction) -> Self {
        Self {
            interaction,
            state: InteractionState::REST,
            current: Transform::IDENTITY,
            animation: None,
            reduced: false,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Final transform once the running transition settles
    pub fn target(&self) -> Transform {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    pub fn pointer_enter(&mut self, now: Instant) {
        let next = InteractionState {
            hovered: true,
            ..self.state
        };
        self.set_state(next, now);
    }

    /// Leaving also releases a held press
    pub fn pointer_leave(&mut self, now: Instant) {
        let next = InteractionState {
            hovered: false,
            pressed: false,
            ..self.state
        };
        self.set_state(next, now);
    }

    pub fn press(&mut self, now: Instant) {
        let next = InteractionState {
            pressed: true,
            ..self.state
        };
        self.set_state(next, now);
    }

    pub fn release(&mut self, now: Instant) {
        let next = InteractionState {
            pressed: false,
            ..self.state
        };
        self.set_state(next, now);
    }

    pub fn focus(&mut self, now: Instant) {
        let next = InteractionState {
            focused: true,
            ..self.state
        };
        self.set_state(next, now);
    }

    pub fn blur(&mut self, now: Instant) {
        let next = InteractionState {
            focused: false,
            ..self.state
        };
        self.set_state(next, now);
    }

    /// Reduced motion drops every gesture and snaps back to rest
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced = reduced;
        if reduced {
            self.animation = None;
            self.current = Transform::IDENTITY;
        }
    }

    fn set_state(&mut self, next: InteractionState, now: Instant) {
        if next == self.state {
            return;
        }
        let from = self.update(now);
        let interaction = reduced_motion_safe(&self.interaction, self.reduced);
        let to = interaction.transform_for(next);
        let transition = interaction.transition_between(self.state, next);
        self.state = next;

        match transition {
            Some(transition) if !transition.is_instant() && !from.approx_eq(&to) => {
                self.animation = Some(ActiveTransition {
                    start: now,
                    from,
                    to,
                    transition,
                });
            }
            _ => {
                self.animation = None;
                self.current = to;
            }
        }
    }

    /// Advance the running transition and return the current transform
    pub fn update(&mut self, now: Instant) -> Transform {
        if let Some(anim) = &self.animation {
            let t = &anim.transition;
            let p = progress(elapsed_secs(anim.start, now), t.delay, t.duration);
            if p >= 1.0 {
                self.current = anim.to;
                self.animation = None;
            } else {
                self.current = Transform::lerp(anim.from, anim.to, t.ease.apply(p));
            }
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use nextron_motion_core::library;

    fn at(start: Instant, secs: f64) -> Instant {
        start + Duration::from_secs_f64(secs)
    }

    #[test]
    fn test_hover_lifts_and_returns_to_rest() {
        let t0 = Instant::now();
        let mut anim = InteractionAnimator::new(library::button());
        anim.pointer_enter(t0);
        assert!(anim.is_animating());

        let mid = anim.update(at(t0, 0.15));
        assert!(mid.y < 0.0 && mid.y > -2.0);

        anim.pointer_leave(at(t0, 0.15));
        let end = anim.update(at(t0, 1.0));
        assert!(!anim.is_animating());
        assert_eq!(end, Transform::IDENTITY);
    }

    #[test]
    fn test_press_composes_with_hover() {
        let t0 = Instant::now();
        let mut anim = InteractionAnimator::new(library::button());
        anim.pointer_enter(t0);
        anim.update(at(t0, 1.0));
        anim.press(at(t0, 1.0));

        let pressed = anim.update(at(t0, 2.0));
        let expected = Transform::scaled(1.02).with_y(-2.0).then(Transform::scaled(0.98));
        assert!(pressed.approx_eq(&expected));
        assert!(anim.state().hovered && anim.state().pressed);

        anim.release(at(t0, 2.0));
        let hovered = anim.update(at(t0, 3.0));
        assert!(hovered.approx_eq(&Transform::scaled(1.02).with_y(-2.0)));
    }

    #[test]
    fn test_press_from_rest() {
        let t0 = Instant::now();
        let mut anim = InteractionAnimator::new(library::button());
        anim.press(t0);
        // instant tier is still animated, 0.2s
        let pressed = anim.update(at(t0, 0.5));
        assert!(pressed.approx_eq(&Transform::scaled(0.98)));
    }

    #[test]
    fn test_leave_releases_press() {
        let t0 = Instant::now();
        let mut anim = InteractionAnimator::new(library::card_hover());
        anim.pointer_enter(t0);
        anim.press(t0);
        anim.pointer_leave(at(t0, 0.1));
        assert_eq!(anim.state(), InteractionState::REST);
        assert_eq!(anim.target(), Transform::IDENTITY);
    }

    #[test]
    fn test_reduced_motion_is_inert() {
        let t0 = Instant::now();
        let mut anim = InteractionAnimator::new(library::card_hover());
        anim.set_reduced_motion(true);
        anim.pointer_enter(t0);
        assert!(!anim.is_animating());
        assert_eq!(anim.update(at(t0, 0.2)), Transform::IDENTITY);
    }

    #[test]
    fn test_reduced_motion_snaps_mid_hover() {
        let t0 = Instant::now();
        let mut anim = InteractionAnimator::new(library::card_hover());
        anim.pointer_enter(t0);
        anim.update(at(t0, 0.1));
        anim.set_reduced_motion(true);
        assert!(!anim.is_animating());
        assert_eq!(anim.update(at(t0, 0.2)), Transform::IDENTITY);
    }
}
