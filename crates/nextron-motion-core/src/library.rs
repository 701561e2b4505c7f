//! The named motion vocabulary
//!
//! Every variant, interaction and ambient loop the site uses, built only
//! from the token tables. Sections look these up by name; nothing here
//! carries a numeric duration or easing that is not a token, apart from the
//! hero copy timings and the ambient loop lengths which have no tier.

use serde::Serialize;

use crate::tokens::{DistanceTier, DurationTier, Easing, StaggerTier, TokenSet};
use crate::variant::{
    AmbientLoop, AmbientProperty, Color, Gesture, Height, Interaction, Shadow, StateName, Transform,
    Transition, Variant, VariantKind, VisualState,
};
use crate::{Error, Result};

/// Brand accent, `#2563eb`
pub const ACCENT: Color = Color::rgba(0x25, 0x63, 0xeb, 1.0);
/// Muted label grey, `#9ca3af`
pub const MUTED: Color = Color::rgba(0x9c, 0xa3, 0xaf, 1.0);

fn accent(alpha: f64) -> Color {
    Color { a: alpha, ..ACCENT }
}

/// Entrance that fades in while travelling from `hidden` to rest
fn entrance(name: &str, hidden: VisualState, transition: Transition) -> Variant {
    let visible = VisualState {
        opacity: Some(1.0),
        x: hidden.x.map(|_| 0.0),
        y: hidden.y.map(|_| 0.0),
        scale: hidden.scale.map(|_| 1.0),
        ..VisualState::default()
    };
    Variant::new(name, VariantKind::Entrance)
        .state(StateName::Hidden, hidden)
        .state_with(StateName::Visible, visible, transition)
}

// ---------------------------------------------------------------------------
// Entrances
// ---------------------------------------------------------------------------

/// Primary entrance: subtle upward travel with a fade
pub fn fade_up() -> Variant {
    entrance(
        "fade_up",
        VisualState::new().opacity(0.0).y(DistanceTier::Normal.px()),
        Transition::new(DurationTier::Slow, Easing::Enter),
    )
}

/// Opacity only, for elements that should not move
pub fn fade_in() -> Variant {
    entrance(
        "fade_in",
        VisualState::new().opacity(0.0),
        Transition::new(DurationTier::Normal, Easing::Smooth),
    )
}

/// Downward entrance for dropdowns and notices
pub fn fade_down() -> Variant {
    entrance(
        "fade_down",
        VisualState::new().opacity(0.0).y(-DistanceTier::Subtle.px()),
        Transition::new(DurationTier::Normal, Easing::Enter),
    )
}

/// Cards and contained elements
pub fn scale_in() -> Variant {
    entrance(
        "scale_in",
        VisualState::new().opacity(0.0).scale(0.96),
        Transition::new(DurationTier::Slow, Easing::Industrial),
    )
}

pub fn slide_in_left() -> Variant {
    entrance(
        "slide_in_left",
        VisualState::new().opacity(0.0).x(-DistanceTier::Prominent.px()),
        Transition::new(DurationTier::Slow, Easing::Enter),
    )
}

pub fn slide_in_right() -> Variant {
    entrance(
        "slide_in_right",
        VisualState::new().opacity(0.0).x(DistanceTier::Prominent.px()),
        Transition::new(DurationTier::Slow, Easing::Enter),
    )
}

/// Items inside a stagger container
pub fn stagger_item() -> Variant {
    entrance(
        "stagger_item",
        VisualState::new().opacity(0.0).y(DistanceTier::Normal.px()),
        Transition::new(DurationTier::Normal, Easing::Enter),
    )
}

pub fn hero_title() -> Variant {
    entrance(
        "hero_title",
        VisualState::new().opacity(0.0).y(DistanceTier::Normal.px()),
        Transition::secs(0.8, Easing::Enter),
    )
}

pub fn hero_subtitle() -> Variant {
    entrance(
        "hero_subtitle",
        VisualState::new().opacity(0.0).y(DistanceTier::Subtle.px()),
        Transition::new(DurationTier::Slow, Easing::Enter),
    )
}

pub fn hero_cta() -> Variant {
    entrance(
        "hero_cta",
        VisualState::new().opacity(0.0).y(DistanceTier::Subtle.px()),
        Transition::secs(0.6, Easing::Enter),
    )
}

/// Icon, then title, then description inside a feature card
pub fn progressive_icon() -> Variant {
    entrance(
        "progressive_icon",
        VisualState::new().opacity(0.0).scale(0.8),
        Transition::new(DurationTier::Fast, Easing::Mechanical),
    )
}

pub fn progressive_title() -> Variant {
    entrance(
        "progressive_title",
        VisualState::new().opacity(0.0).y(DistanceTier::Subtle.px()),
        Transition::new(DurationTier::Normal, Easing::Enter).with_delay(StaggerTier::Normal.secs()),
    )
}

pub fn progressive_description() -> Variant {
    entrance(
        "progressive_description",
        VisualState::new().opacity(0.0).y(DistanceTier::Subtle.px()),
        Transition::new(DurationTier::Normal, Easing::Enter).with_delay(StaggerTier::Loose.secs()),
    )
}

// ---------------------------------------------------------------------------
// Stagger containers
// ---------------------------------------------------------------------------

/// Parent that fades in and starts child `n` at `delay_children + n * stagger`
pub fn stagger_container(stagger: StaggerTier, delay_children: f64) -> Variant {
    Variant::new(
        format!("stagger_container_{}", stagger.name()),
        VariantKind::StaggerContainer,
    )
    .state(StateName::Hidden, VisualState::new().opacity(0.0))
    .state_with(
        StateName::Visible,
        VisualState::new().opacity(1.0),
        Transition::new(DurationTier::Normal, Easing::Smooth).staggered(stagger, delay_children),
    )
}

pub fn stagger_container_default() -> Variant {
    named(stagger_container(StaggerTier::Normal, 0.1), "stagger_container")
}

pub fn stagger_container_fast() -> Variant {
    named(stagger_container(StaggerTier::Compact, 0.05), "stagger_container_fast")
}

pub fn stagger_container_relaxed() -> Variant {
    named(stagger_container(StaggerTier::Comfortable, 0.15), "stagger_container_relaxed")
}

pub fn hero_stagger() -> Variant {
    named(stagger_container(StaggerTier::Relaxed, 0.2), "hero_stagger")
}

fn named(mut variant: Variant, name: &str) -> Variant {
    variant.name = name.to_string();
    variant
}

// ---------------------------------------------------------------------------
// Accordion and form states
// ---------------------------------------------------------------------------

/// Service card detail panel. Collapsed resets its margin so nothing leaks
/// into the layout while closed.
pub fn accordion() -> Variant {
    let transition = Transition::new(DurationTier::Normal, Easing::Industrial);
    Variant::new("accordion", VariantKind::Accordion)
        .state_with(
            StateName::Collapsed,
            VisualState::new().height(Height::Px(0.0)).opacity(0.0).margin_top(0.0),
            transition,
        )
        .state_with(
            StateName::Expanded,
            VisualState::new().height(Height::AUTO).opacity(1.0).margin_top(0.0),
            transition,
        )
}

pub fn label_float() -> Variant {
    Variant::new("label_float", VariantKind::FormState)
        .state(StateName::Rest, VisualState::new().y(0.0).scale(1.0).color(MUTED))
        .state_with(
            StateName::Focused,
            VisualState::new().y(-24.0).scale(0.85).color(ACCENT),
            Transition::new(DurationTier::Normal, Easing::Industrial),
        )
}

pub fn error_message() -> Variant {
    Variant::new("error_message", VariantKind::FormState)
        .state(
            StateName::Hidden,
            VisualState::new().opacity(0.0).height(Height::Px(0.0)).margin_top(0.0),
        )
        .state_with(
            StateName::Visible,
            VisualState::new().opacity(1.0).height(Height::AUTO).margin_top(4.0),
            Transition::new(DurationTier::Normal, Easing::Smooth),
        )
}

// ---------------------------------------------------------------------------
// Micro-interactions
// ---------------------------------------------------------------------------

pub fn card_hover() -> Interaction {
    Interaction::new("card_hover").on_hover(Gesture::new(
        Transform::lift(-DistanceTier::Minimal.px()),
        Transition::new(DurationTier::Fast, Easing::Mechanical),
    ))
}

pub fn card_hover_subtle() -> Interaction {
    Interaction::new("card_hover_subtle").on_hover(Gesture::new(
        Transform::lift(-3.0),
        Transition::new(DurationTier::Fast, Easing::Mechanical),
    ))
}

pub fn icon_scale() -> Interaction {
    Interaction::new("icon_scale").on_hover(Gesture::new(
        Transform::scaled(1.05),
        Transition::new(DurationTier::Fast, Easing::Sharp),
    ))
}

/// Primary button: hover lift plus tactile press
pub fn button() -> Interaction {
    Interaction::new("button")
        .on_hover(Gesture::new(
            Transform::scaled(1.02).with_y(-2.0),
            Transition::new(DurationTier::Fast, Easing::Mechanical),
        ))
        .on_press(Gesture::new(
            Transform::scaled(0.98),
            Transition::new(DurationTier::Instant, Easing::Sharp),
        ))
}

pub fn input_focus() -> Interaction {
    Interaction::new("input_focus").on_focus(
        Gesture::new(
            Transform::scaled(1.005),
            Transition::new(DurationTier::Fast, Easing::Smooth),
        )
        .border(accent(0.8))
        .glow(Shadow {
            blur: 0.0,
            spread: 3.0,
            color: accent(0.1),
        }),
    )
}

pub fn border_glow() -> Interaction {
    Interaction::new("border_glow").on_hover(
        Gesture::new(
            Transform::IDENTITY,
            Transition::new(DurationTier::Normal, Easing::Smooth),
        )
        .border(accent(0.5))
        .glow(Shadow {
            blur: 20.0,
            spread: 0.0,
            color: accent(0.1),
        }),
    )
}

// ---------------------------------------------------------------------------
// Ambient background loops
// ---------------------------------------------------------------------------

pub fn slow_drift() -> AmbientLoop {
    AmbientLoop::new("slow_drift", Transition::secs(25.0, Easing::Smooth).repeating(0.0))
        .track(AmbientProperty::X, [0.0, 10.0, 0.0])
        .track(AmbientProperty::Y, [0.0, 15.0, 0.0])
}

/// Breathing opacity, also used for the radial gradient behind sections
pub fn pulse_opacity() -> AmbientLoop {
    AmbientLoop::new("pulse_opacity", Transition::secs(4.0, Easing::Smooth).repeating(0.0))
        .track(AmbientProperty::Opacity, [0.3, 0.5, 0.3])
}

pub fn rotate_slow() -> AmbientLoop {
    AmbientLoop::new("rotate_slow", Transition::secs(30.0, Easing::Linear).repeating(0.0))
        .track(AmbientProperty::Rotate, [0.0, 360.0])
}

pub fn glow_pulse() -> AmbientLoop {
    AmbientLoop::new(
        "glow_pulse",
        Transition::new(DurationTier::Deliberate, Easing::Smooth).repeating(0.0),
    )
    .track(AmbientProperty::ShadowBlur, [20.0, 30.0, 20.0])
    .track(AmbientProperty::ShadowAlpha, [0.2, 0.3, 0.2])
}

/// Vertical line `index` of the industrial grid
pub fn grid_line(index: usize) -> AmbientLoop {
    AmbientLoop::new(
        format!("grid_line_{}", index),
        Transition::secs(3.0, Easing::Industrial)
            .with_delay(index as f64 * 0.4)
            .repeating(2.0),
    )
    .track(AmbientProperty::Opacity, [0.0, 1.0, 0.0])
    .track(AmbientProperty::ScaleY, [0.0, 1.0, 0.0])
}

/// Light beam sweeping across the hero
pub fn light_beam() -> AmbientLoop {
    AmbientLoop::new(
        "light_beam",
        Transition::secs(4.0, Easing::Linear).with_delay(0.5).repeating(3.0),
    )
    .track(AmbientProperty::XPercent, [-100.0, 200.0])
}

/// Horizontal light streak `index`; later streaks are slower and start later
pub fn light_streak(index: usize) -> AmbientLoop {
    AmbientLoop::new(
        format!("light_streak_{}", index),
        Transition::secs(5.0 + index as f64 * 0.5, Easing::Linear)
            .with_delay(index as f64 * 0.8)
            .repeating(0.0),
    )
    .track(AmbientProperty::XPercent, [-100.0, 100.0])
    .track(AmbientProperty::Opacity, [0.0, 0.8, 0.0])
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Every scroll-triggered variant (single elements and stagger containers)
pub fn entrances() -> Vec<Variant> {
    vec![
        fade_up(),
        fade_in(),
        fade_down(),
        scale_in(),
        slide_in_left(),
        slide_in_right(),
        stagger_item(),
        hero_title(),
        hero_subtitle(),
        hero_cta(),
        progressive_icon(),
        progressive_title(),
        progressive_description(),
        stagger_container_default(),
        stagger_container_fast(),
        stagger_container_relaxed(),
        hero_stagger(),
    ]
}

/// The full named vocabulary plus the token tables it is built from
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub tokens: TokenSet,
    pub variants: Vec<Variant>,
    pub interactions: Vec<Interaction>,
    pub ambient: Vec<AmbientLoop>,
}

impl Catalog {
    pub fn standard() -> Self {
        let mut variants = entrances();
        variants.extend([accordion(), label_float(), error_message()]);

        let mut ambient = vec![slow_drift(), pulse_opacity(), rotate_slow(), glow_pulse(), light_beam()];
        ambient.extend((0..3).map(grid_line));
        ambient.extend((0..5).map(light_streak));

        Self {
            tokens: TokenSet::standard(),
            variants,
            interactions: vec![
                card_hover(),
                card_hover_subtle(),
                icon_scale(),
                button(),
                input_focus(),
                border_glow(),
            ],
            ambient,
        }
    }

    pub fn variant(&self, name: &str) -> Result<&Variant> {
        self.variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }

    pub fn interaction(&self, name: &str) -> Result<&Interaction> {
        self.interactions
            .iter()
            .find(|i| i.name == name)
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }

    pub fn ambient(&self, name: &str) -> Result<&AmbientLoop> {
        self.ambient
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| Error::UnknownName(name.to_string()))
    }

    /// Validate the token tables and every variant
    pub fn validate(&self) -> Result<()> {
        self.tokens.validate()?;
        for variant in &self.variants {
            variant.validate()?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::ResolvedStyle;

    #[test]
    fn test_catalog_valid() {
        assert!(Catalog::standard().validate().is_ok());
    }

    #[test]
    fn test_names_unique() {
        let catalog = Catalog::standard();
        let mut names: Vec<&str> = catalog.variants.iter().map(|v| v.name.as_str()).collect();
        names.extend(catalog.interactions.iter().map(|i| i.name.as_str()));
        names.extend(catalog.ambient.iter().map(|a| a.name.as_str()));
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
    }

    #[test]
    fn test_moving_entrances_contract() {
        for variant in entrances().iter().filter(|v| v.kind == VariantKind::Entrance) {
            let hidden = &variant.get(StateName::Hidden).unwrap().state;
            assert_eq!(hidden.opacity, Some(0.0), "{}", variant.name);
            if variant.name != "fade_in" {
                assert!(hidden.has_offset(), "{} hidden has no offset", variant.name);
            }
            assert!(variant.style(StateName::Visible).is_at_rest(), "{}", variant.name);
        }
    }

    #[test]
    fn test_round_trip_idempotent() {
        let catalog = Catalog::standard();
        for variant in &catalog.variants {
            let (initial, target) = variant.terminal_pair().unwrap();
            let a = &variant.get(initial).unwrap().state;
            let b = &variant.get(target).unwrap().state;
            let start = ResolvedStyle::default().apply(a);
            let there = start.apply(b);
            let back = there.apply(a);
            assert_eq!(start, back, "{} not idempotent", variant.name);
        }
    }

    #[test]
    fn test_accordion_collapsed_contract() {
        let collapsed = accordion().style(StateName::Collapsed);
        assert_eq!(collapsed.height, Height::Px(0.0));
        assert_eq!(collapsed.opacity, 0.0);
        assert_eq!(collapsed.margin_top, 0.0);
        assert!(accordion().style(StateName::Expanded).height.is_auto());
    }

    #[test]
    fn test_default_stagger_offsets() {
        let stagger = stagger_container_default().stagger().unwrap();
        let offsets: Vec<f64> = (0..3).map(|i| stagger.child_offset(i)).collect();
        for (got, want) in offsets.iter().zip([0.1, 0.2, 0.3]) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = Catalog::standard();
        assert!(catalog.variant("fade_up").is_ok());
        assert!(catalog.interaction("button").is_ok());
        assert!(catalog.ambient("grid_line_2").is_ok());
        assert!(matches!(catalog.variant("wobble"), Err(Error::UnknownName(_))));
    }

    #[test]
    fn test_json_export() {
        let json = Catalog::standard().to_json().unwrap();
        assert!(json.contains("\"fade_up\""));
        assert!(json.contains("\"mechanical\""));
    }
}
