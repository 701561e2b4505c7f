//! Pointer and focus micro-interactions
//!
//! Gestures are not state machines; each one is a transform delta applied
//! while the pointer hovers, presses or the element has focus, and removed
//! when that ends. Deltas compose against the resting baseline, so pressing
//! while hovered stacks the press on top of the hover lift instead of
//! replacing it.

use serde::{Deserialize, Serialize};

use super::style::Color;
use super::transition::Transition;

/// Translation in pixels, uniform scale, rotation in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        rotate: 0.0,
    };

    pub const fn lift(y: f64) -> Self {
        Transform { y, ..Self::IDENTITY }
    }

    pub const fn scaled(scale: f64) -> Self {
        Transform { scale, ..Self::IDENTITY }
    }

    pub const fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }

    /// Stack `other` on top of `self`
    pub fn then(self, other: Transform) -> Transform {
        Transform {
            x: self.x + other.x,
            y: self.y + other.y,
            scale: self.scale * other.scale,
            rotate: self.rotate + other.rotate,
        }
    }

    pub fn lerp(from: Transform, to: Transform, t: f64) -> Transform {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Transform {
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            scale: mix(from.scale, to.scale),
            rotate: mix(from.rotate, to.rotate),
        }
    }

    pub fn approx_eq(&self, other: &Transform) -> bool {
        const EPS: f64 = 1e-9;
        (self.x - other.x).abs() < EPS
            && (self.y - other.y).abs() < EPS
            && (self.scale - other.scale).abs() < EPS
            && (self.rotate - other.rotate).abs() < EPS
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Box shadow used for focus rings and glows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub blur: f64,
    pub spread: f64,
    pub color: Color,
}

/// A one-shot interaction target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gesture {
    pub transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    /// Used both when the gesture starts and when it ends
    pub transition: Transition,
}

impl Gesture {
    pub fn new(transform: Transform, transition: Transition) -> Self {
        Self {
            transform,
            border_color: None,
            shadow: None,
            transition,
        }
    }

    pub fn border(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn glow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Which gestures are currently active on an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub hovered: bool,
    pub pressed: bool,
    pub focused: bool,
}

impl InteractionState {
    pub const REST: InteractionState = InteractionState {
        hovered: false,
        pressed: false,
        focused: false,
    };
}

/// The gestures an element responds to
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<Gesture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press: Option<Gesture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<Gesture>,
}

impl Interaction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn on_hover(mut self, gesture: Gesture) -> Self {
        self.hover = Some(gesture);
        self
    }

    pub fn on_press(mut self, gesture: Gesture) -> Self {
        self.press = Some(gesture);
        self
    }

    pub fn on_focus(mut self, gesture: Gesture) -> Self {
        self.focus = Some(gesture);
        self
    }

    pub fn is_inert(&self) -> bool {
        self.hover.is_none() && self.press.is_none() && self.focus.is_none()
    }

    /// Transform for a gesture state, composed from the resting baseline
    pub fn transform_for(&self, state: InteractionState) -> Transform {
        let layers = [
            (state.hovered, &self.hover),
            (state.pressed, &self.press),
            (state.focused, &self.focus),
        ];
        layers
            .into_iter()
            .filter(|(active, _)| *active)
            .filter_map(|(_, gesture)| gesture.as_ref())
            .fold(Transform::IDENTITY, |acc, g| acc.then(g.transform))
    }

    /// Transition for moving between two gesture states.
    ///
    /// The gesture that changed supplies the timing whichever direction it
    /// changed in; press wins over hover, hover over focus.
    pub fn transition_between(&self, from: InteractionState, to: InteractionState) -> Option<Transition> {
        let changed = [
            (from.pressed != to.pressed, &self.press),
            (from.hovered != to.hovered, &self.hover),
            (from.focused != to.focused, &self.focus),
        ];
        changed
            .into_iter()
            .filter(|(changed, _)| *changed)
            .find_map(|(_, gesture)| gesture.as_ref().map(|g| g.transition))
    }
}
