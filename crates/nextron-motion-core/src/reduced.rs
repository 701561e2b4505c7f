//! Reduced-motion collapse
//!
//! One rule for every consumer: when the user asks for reduced motion,
//! transitions become instant, staggering disappears, entrances start at
//! their visible end-state with no translation or scale, and gestures and
//! ambient loops stop moving.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::variant::{
    AmbientLoop, Interaction, StateName, Target, Track, Transition, Variant, VariantKind, VisualState,
};

/// A motion description that has a reduced-motion equivalent
pub trait ReduceMotion: Clone {
    fn reduced(&self) -> Self;
}

/// Return `value` unchanged, or its reduced form when `reduced` is set
pub fn reduced_motion_safe<T: ReduceMotion>(value: &T, reduced: bool) -> Cow<'_, T> {
    if reduced {
        Cow::Owned(value.reduced())
    } else {
        Cow::Borrowed(value)
    }
}

/// Visible end-state with opacity forced on and every offset at rest
fn settled(state: &VisualState) -> VisualState {
    VisualState {
        opacity: Some(1.0),
        x: state.x.map(|_| 0.0),
        y: state.y.map(|_| 0.0),
        scale: state.scale.map(|_| 1.0),
        rotate: state.rotate.map(|_| 0.0),
        ..state.clone()
    }
}

impl ReduceMotion for Variant {
    fn reduced(&self) -> Self {
        let instant = |target: &Target| Target {
            state: target.state.clone(),
            transition: Some(Transition::instant()),
        };

        let mut states: BTreeMap<StateName, Target> =
            self.states.iter().map(|(name, target)| (*name, instant(target))).collect();

        let is_entrance = matches!(self.kind, VariantKind::Entrance | VariantKind::StaggerContainer);
        if let (true, Some(visible)) = (is_entrance, self.get(StateName::Visible)) {
            let end = Target {
                state: settled(&visible.state),
                transition: Some(Transition::instant()),
            };
            states.insert(StateName::Hidden, end.clone());
            states.insert(StateName::Visible, end);
        }

        Variant {
            name: self.name.clone(),
            kind: self.kind,
            states,
        }
    }
}

impl ReduceMotion for Interaction {
    fn reduced(&self) -> Self {
        Interaction::new(self.name.clone())
    }
}

impl ReduceMotion for AmbientLoop {
    fn reduced(&self) -> Self {
        AmbientLoop {
            name: self.name.clone(),
            tracks: self
                .tracks
                .iter()
                .map(|t| Track::new(t.property, t.keyframes.iter().take(1).copied().collect::<Vec<_>>()))
                .collect(),
            transition: Transition::instant(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library;

    #[test]
    fn test_entrance_collapses_to_rest() {
        for variant in library::entrances() {
            let reduced = reduced_motion_safe(&variant, true);
            let hidden = reduced.style(StateName::Hidden);
            let visible = reduced.style(StateName::Visible);
            assert!(hidden.is_at_rest(), "{} hidden not at rest", variant.name);
            assert!(visible.is_at_rest(), "{} visible not at rest", variant.name);
            assert!(reduced.transition_to(StateName::Visible).is_instant());
            assert!(reduced.stagger().is_none());
        }
    }

    #[test]
    fn test_not_reduced_is_borrowed() {
        let variant = library::fade_up();
        assert!(matches!(reduced_motion_safe(&variant, false), Cow::Borrowed(_)));
    }

    #[test]
    fn test_accordion_keeps_states_but_instant() {
        let accordion = library::accordion();
        let reduced = accordion.reduced();
        assert_eq!(reduced.style(StateName::Collapsed).opacity, 0.0);
        assert!(reduced.transition_to(StateName::Expanded).is_instant());
    }

    #[test]
    fn test_gestures_removed() {
        assert!(library::button().reduced().is_inert());
    }

    #[test]
    fn test_ambient_frozen() {
        let drift = library::slow_drift().reduced();
        assert_eq!(drift.sample(3.0), drift.resting());
    }
}
