//! Animation variants
//!
//! A [`Variant`] maps named states to a [`VisualState`] plus the
//! [`Transition`] used when moving into that state. Variants are plain data;
//! the runtime crate decides when to move between states.
//!
//! - `style` - visual state records and resolved styles
//! - `transition` - timing of a move between states
//! - `gesture` - hover/press/focus micro-interactions
//! - `ambient` - looping background keyframes

pub mod ambient;
pub mod gesture;
pub mod style;
pub mod transition;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use ambient::{AmbientLoop, AmbientProperty, Track};
pub use gesture::{Gesture, Interaction, InteractionState, Shadow, Transform};
pub use style::{Color, Height, Property, ResolvedStyle, VisualState};
pub use transition::{Repeat, Transition};

use crate::{Error, Result};

/// Named states a variant can define
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateName {
    Hidden,
    Visible,
    Collapsed,
    Expanded,
    Rest,
    Focused,
}

impl StateName {
    /// Terminal pairs in lookup order: (initial, target)
    pub const PAIRS: [(StateName, StateName); 3] = [
        (StateName::Hidden, StateName::Visible),
        (StateName::Collapsed, StateName::Expanded),
        (StateName::Rest, StateName::Focused),
    ];

    pub const fn name(self) -> &'static str {
        match self {
            StateName::Hidden => "hidden",
            StateName::Visible => "visible",
            StateName::Collapsed => "collapsed",
            StateName::Expanded => "expanded",
            StateName::Rest => "rest",
            StateName::Focused => "focused",
        }
    }

    /// The other half of this state's terminal pair
    pub fn complement(self) -> StateName {
        match self {
            StateName::Hidden => StateName::Visible,
            StateName::Visible => StateName::Hidden,
            StateName::Collapsed => StateName::Expanded,
            StateName::Expanded => StateName::Collapsed,
            StateName::Rest => StateName::Focused,
            StateName::Focused => StateName::Rest,
        }
    }
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a variant is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
    /// Scroll-triggered entrance of a single element
    Entrance,
    /// Parent whose visible transition staggers its children
    StaggerContainer,
    /// Height-animated expand/collapse
    Accordion,
    /// Two-state form decoration (floating label, error message)
    FormState,
}

/// One state's target and the transition used to reach it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    #[serde(flatten)]
    pub state: VisualState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<Transition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub kind: VariantKind,
    pub states: BTreeMap<StateName, Target>,
}

impl Variant {
    pub fn new(name: impl Into<String>, kind: VariantKind) -> Self {
        Self {
            name: name.into(),
            kind,
            states: BTreeMap::new(),
        }
    }

    /// Add a state reached without a declared transition
    pub fn state(mut self, name: StateName, state: VisualState) -> Self {
        self.states.insert(name, Target { state, transition: None });
        self
    }

    /// Add a state together with the transition used to reach it
    pub fn state_with(mut self, name: StateName, state: VisualState, transition: Transition) -> Self {
        self.states.insert(
            name,
            Target {
                state,
                transition: Some(transition),
            },
        );
        self
    }

    pub fn get(&self, name: StateName) -> Option<&Target> {
        self.states.get(&name)
    }

    /// The first complete (initial, target) pair this variant defines
    pub fn terminal_pair(&self) -> Option<(StateName, StateName)> {
        StateName::PAIRS
            .into_iter()
            .find(|(a, b)| self.states.contains_key(a) && self.states.contains_key(b))
    }

    /// Resolved style of an element resting in `name`
    pub fn style(&self, name: StateName) -> ResolvedStyle {
        match self.get(name) {
            Some(target) => ResolvedStyle::default().apply(&target.state),
            None => ResolvedStyle::default(),
        }
    }

    /// Transition used to enter `name`.
    ///
    /// A state without its own transition reverses with its complement's,
    /// so leaving and entering use the same duration and easing family.
    pub fn transition_to(&self, name: StateName) -> Transition {
        if let Some(own) = self.get(name).and_then(|t| t.transition) {
            return own;
        }
        match self.get(name.complement()).and_then(|t| t.transition) {
            Some(reverse) => Transition {
                delay: 0.0,
                stagger_children: None,
                delay_children: None,
                ..reverse
            },
            None => Transition::default(),
        }
    }

    /// Staggering declared on the target state of the terminal pair
    pub fn stagger(&self) -> Option<Transition> {
        let (_, target) = self.terminal_pair()?;
        self.get(target)
            .and_then(|t| t.transition)
            .filter(Transition::is_staggered)
    }

    /// Check the terminal pair exists and both halves animate the same properties
    pub fn validate(&self) -> Result<()> {
        let Some((initial, target)) = self.terminal_pair() else {
            let missing = match self.states.keys().next() {
                Some(state) => state.complement(),
                None => StateName::Visible,
            };
            return Err(Error::MissingState {
                variant: self.name.clone(),
                state: missing.to_string(),
            });
        };

        let a = &self.states[&initial].state;
        let b = &self.states[&target].state;
        for property in Property::ALL {
            if a.has(property) != b.has(property) {
                return Err(Error::AsymmetricVariant {
                    variant: self.name.clone(),
                    property: property.name().to_string(),
                });
            }
        }
        Ok(())
    }
}
