//! Time-driven side of the Nextron motion system
//!
//! ## Primitives
//! - `timing` - progress and interpolation over explicit instants
//! - `reduced_motion` - platform preference bridged into a watch cell
//! - `viewport` - visible fractions and crossing subscriptions
//!
//! ## Controllers
//! - `reveal` - per-section reveal state machine
//! - `interaction` - hover/press/focus animator
//! - `ambient` - background loop player
//! - `stage` - page of sections driven by scroll and frame ticks

pub mod timing;
pub mod reduced_motion;
pub mod viewport;

pub mod ambient;
pub mod interaction;
pub mod reveal;
pub mod stage;

pub use ambient::{backdrop, AmbientPlayer};
pub use interaction::InteractionAnimator;
pub use reduced_motion::{ManualMediaQuery, MediaQuery, ReducedMotion, ReducedMotionDetector};
pub use reveal::{RevealFrame, RevealPhase, SectionReveal};
pub use stage::{SectionId, Stage, StageCommand, StageEvent};
pub use viewport::{Bounds, Crossing, Observation, VisibilitySubscription};
