pub mod config;
pub mod error;
pub mod library;
pub mod reduced;
pub mod tokens;
pub mod variant;

pub use config::{MotionConfig, ReducedMotionMode};
pub use error::{Error, Result};
pub use library::Catalog;
pub use reduced::{reduced_motion_safe, ReduceMotion};
pub use tokens::{
    DistanceTier, DurationTier, Easing, EasingCurve, StaggerTier, TokenSet, ViewportPreset,
    ViewportTrigger,
};
pub use variant::{ResolvedStyle, StateName, Transition, Variant, VariantKind};
