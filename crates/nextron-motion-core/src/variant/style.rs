//! Visual state records
//!
//! A [`VisualState`] lists only the properties a state sets. A
//! [`ResolvedStyle`] is the concrete style of an element after one or more
//! states have been applied on top of the resting baseline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Element height: a pixel value or the content's natural height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Height {
    Px(f64),
    Auto(AutoKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoKeyword {
    Auto,
}

impl Height {
    pub const AUTO: Height = Height::Auto(AutoKeyword::Auto);

    /// Pixel height given the measured natural height of the content
    pub fn px(self, content_height: f64) -> f64 {
        match self {
            Height::Px(px) => px,
            Height::Auto(_) => content_height,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Height::Auto(_))
    }
}

/// An sRGB color with alpha, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` / `rrggbb` with an optional trailing alpha byte
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        let byte = |i: usize| {
            digits
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(|| Error::Other(format!("invalid color: {}", hex)))
        };
        match digits.len() {
            6 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, 1.0)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f64 / 255.0)),
            _ => Err(Error::Other(format!("invalid color: {}", hex))),
        }
    }

    pub fn lerp(from: Color, to: Color, t: f64) -> Color {
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: channel(from.r, to.r),
            g: channel(from.g, to.g),
            b: channel(from.b, to.b),
            a: from.a + (to.a - from.a) * t,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (self.a - 1.0).abs() < f64::EPSILON {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.r,
                self.g,
                self.b,
                (self.a * 255.0).round() as u8
            )
        }
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The animatable properties of a visual state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Opacity,
    X,
    Y,
    Scale,
    Rotate,
    Height,
    MarginTop,
    Color,
}

impl Property {
    pub const ALL: [Property; 8] = [
        Property::Opacity,
        Property::X,
        Property::Y,
        Property::Scale,
        Property::Rotate,
        Property::Height,
        Property::MarginTop,
        Property::Color,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Property::Opacity => "opacity",
            Property::X => "x",
            Property::Y => "y",
            Property::Scale => "scale",
            Property::Rotate => "rotate",
            Property::Height => "height",
            Property::MarginTop => "margin_top",
            Property::Color => "color",
        }
    }
}

/// Target values of one named state; unset properties are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VisualState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Height>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl VisualState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, value: f64) -> Self {
        self.opacity = Some(value);
        self
    }

    pub fn x(mut self, value: f64) -> Self {
        self.x = Some(value);
        self
    }

    pub fn y(mut self, value: f64) -> Self {
        self.y = Some(value);
        self
    }

    pub fn scale(mut self, value: f64) -> Self {
        self.scale = Some(value);
        self
    }

    pub fn rotate(mut self, value: f64) -> Self {
        self.rotate = Some(value);
        self
    }

    pub fn height(mut self, value: Height) -> Self {
        self.height = Some(value);
        self
    }

    pub fn margin_top(mut self, value: f64) -> Self {
        self.margin_top = Some(value);
        self
    }

    pub fn color(mut self, value: Color) -> Self {
        self.color = Some(value);
        self
    }

    pub fn has(&self, property: Property) -> bool {
        match property {
            Property::Opacity => self.opacity.is_some(),
            Property::X => self.x.is_some(),
            Property::Y => self.y.is_some(),
            Property::Scale => self.scale.is_some(),
            Property::Rotate => self.rotate.is_some(),
            Property::Height => self.height.is_some(),
            Property::MarginTop => self.margin_top.is_some(),
            Property::Color => self.color.is_some(),
        }
    }

    /// Properties this state sets
    pub fn properties(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL.into_iter().filter(move |p| self.has(*p))
    }

    /// Whether the state moves the element away from its resting position
    pub fn has_offset(&self) -> bool {
        let rest = ResolvedStyle::default();
        self.x.is_some_and(|x| x != rest.x)
            || self.y.is_some_and(|y| y != rest.y)
            || self.scale.is_some_and(|s| s != rest.scale)
            || self.rotate.is_some_and(|r| r != rest.rotate)
    }
}

/// Concrete style of an element; `Default` is the resting baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedStyle {
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotate: f64,
    pub height: Height,
    pub margin_top: f64,
    pub color: Option<Color>,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            x: 0.0,
            y: 0.0,
            scale: 1.0,
            rotate: 0.0,
            height: Height::AUTO,
            margin_top: 0.0,
            color: None,
        }
    }
}

impl ResolvedStyle {
    /// Apply the properties a state sets, keeping the rest
    pub fn apply(mut self, state: &VisualState) -> Self {
        if let Some(v) = state.opacity {
            self.opacity = v;
        }
        if let Some(v) = state.x {
            self.x = v;
        }
        if let Some(v) = state.y {
            self.y = v;
        }
        if let Some(v) = state.scale {
            self.scale = v;
        }
        if let Some(v) = state.rotate {
            self.rotate = v;
        }
        if let Some(v) = state.height {
            self.height = v;
        }
        if let Some(v) = state.margin_top {
            self.margin_top = v;
        }
        if let Some(v) = state.color {
            self.color = Some(v);
        }
        self
    }

    /// Interpolate between two styles at eased progress `t`.
    ///
    /// `content_height` resolves `auto` heights while in flight; the end
    /// points keep their declared height so `auto` survives a full transition.
    pub fn lerp(from: &ResolvedStyle, to: &ResolvedStyle, t: f64, content_height: f64) -> Self {
        if t <= 0.0 {
            return *from;
        }
        if t >= 1.0 {
            return *to;
        }
        let mix = |a: f64, b: f64| a + (b - a) * t;
        let color = match (from.color, to.color) {
            (Some(a), Some(b)) => Some(Color::lerp(a, b, t)),
            (_, b) => b,
        };
        Self {
            opacity: mix(from.opacity, to.opacity),
            x: mix(from.x, to.x),
            y: mix(from.y, to.y),
            scale: mix(from.scale, to.scale),
            rotate: mix(from.rotate, to.rotate),
            height: Height::Px(mix(from.height.px(content_height), to.height.px(content_height))),
            margin_top: mix(from.margin_top, to.margin_top),
            color,
        }
    }

    /// Fully opaque with no translation, scale or rotation
    pub fn is_at_rest(&self) -> bool {
        let rest = ResolvedStyle::default();
        self.opacity == 1.0
            && self.x == rest.x
            && self.y == rest.y
            && self.scale == rest.scale
            && self.rotate == rest.rotate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_unset_properties() {
        let style = ResolvedStyle::default().apply(&VisualState::new().opacity(0.0).y(18.0));
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.y, 18.0);
        assert_eq!(style.scale, 1.0);
        assert!(style.height.is_auto());
    }

    #[test]
    fn test_lerp_midpoint() {
        let from = ResolvedStyle::default().apply(&VisualState::new().opacity(0.0).x(-24.0));
        let to = ResolvedStyle::default();
        let mid = ResolvedStyle::lerp(&from, &to, 0.5, 0.0);
        assert!((mid.opacity - 0.5).abs() < 1e-9);
        assert!((mid.x + 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_lerp_auto_height() {
        let collapsed = ResolvedStyle::default().apply(&VisualState::new().height(Height::Px(0.0)));
        let expanded = ResolvedStyle::default();
        let mid = ResolvedStyle::lerp(&collapsed, &expanded, 0.25, 200.0);
        assert_eq!(mid.height, Height::Px(50.0));
        assert!(ResolvedStyle::lerp(&collapsed, &expanded, 1.0, 200.0).height.is_auto());
    }

    #[test]
    fn test_color_hex() {
        let color = Color::from_hex("#2563eb").unwrap();
        assert_eq!(color, Color::rgba(0x25, 0x63, 0xeb, 1.0));
        assert_eq!(color.to_string(), "#2563eb");
        assert!(Color::from_hex("#xyz").is_err());
    }

    #[test]
    fn test_height_serde() {
        assert_eq!(serde_json::to_string(&Height::AUTO).unwrap(), "\"auto\"");
        assert_eq!(serde_json::to_string(&Height::Px(0.0)).unwrap(), "0.0");
        let h: Height = serde_json::from_str("\"auto\"").unwrap();
        assert!(h.is_auto());
    }

    #[test]
    fn test_has_offset() {
        assert!(VisualState::new().opacity(0.0).y(18.0).has_offset());
        assert!(VisualState::new().scale(0.96).has_offset());
        assert!(!VisualState::new().opacity(0.0).has_offset());
        assert!(!VisualState::new().opacity(1.0).y(0.0).has_offset());
    }
}
