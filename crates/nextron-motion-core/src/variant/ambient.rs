//! Ambient background loops
//!
//! Decorative motion behind the content (drifting glows, pulsing gradients,
//! sweeping light lines). Each loop is a set of keyframe tracks sharing one
//! transition; keyframes are spaced evenly and the easing applies per segment.

use serde::{Deserialize, Serialize};

use super::transition::{Repeat, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbientProperty {
    Opacity,
    X,
    Y,
    /// Horizontal offset as a percentage of the element's own width
    XPercent,
    ScaleY,
    Rotate,
    ShadowBlur,
    ShadowAlpha,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub property: AmbientProperty,
    pub keyframes: Vec<f64>,
}

impl Track {
    pub fn new(property: AmbientProperty, keyframes: impl Into<Vec<f64>>) -> Self {
        Self {
            property,
            keyframes: keyframes.into(),
        }
    }

    fn first(&self) -> f64 {
        self.keyframes.first().copied().unwrap_or_default()
    }

    fn last(&self) -> f64 {
        self.keyframes.last().copied().unwrap_or_default()
    }

    /// Value at linear progress `p` through the keyframes
    fn at(&self, p: f64, transition: &Transition) -> f64 {
        let n = self.keyframes.len();
        if n < 2 {
            return self.first();
        }
        if p >= 1.0 {
            return self.last();
        }
        let scaled = p.max(0.0) * (n - 1) as f64;
        let segment = (scaled.floor() as usize).min(n - 2);
        let local = transition.ease.apply(scaled - segment as f64);
        let (a, b) = (self.keyframes[segment], self.keyframes[segment + 1]);
        a + (b - a) * local
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmbientLoop {
    pub name: String,
    pub tracks: Vec<Track>,
    pub transition: Transition,
}

impl AmbientLoop {
    pub fn new(name: impl Into<String>, transition: Transition) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
            transition,
        }
    }

    pub fn track(mut self, property: AmbientProperty, keyframes: impl Into<Vec<f64>>) -> Self {
        self.tracks.push(Track::new(property, keyframes));
        self
    }

    /// Values before the loop starts
    pub fn resting(&self) -> Vec<(AmbientProperty, f64)> {
        self.tracks.iter().map(|t| (t.property, t.first())).collect()
    }

    /// Sample every track `elapsed` seconds after the loop was mounted.
    ///
    /// During `repeat_delay` the last keyframe holds; a one-shot loop holds its
    /// last keyframe forever once finished.
    pub fn sample(&self, elapsed: f64) -> Vec<(AmbientProperty, f64)> {
        let t = &self.transition;
        let local = elapsed - t.delay;
        if local < 0.0 {
            return self.resting();
        }
        if t.duration <= 0.0 {
            return self.tracks.iter().map(|tr| (tr.property, tr.last())).collect();
        }

        let progress = match t.repeat {
            Repeat::Once => (local / t.duration).min(1.0),
            Repeat::Infinite => {
                let cycle = t.duration + t.repeat_delay.max(0.0);
                let phase = local % cycle;
                (phase / t.duration).min(1.0)
            }
        };

        self.tracks
            .iter()
            .map(|track| (track.property, track.at(progress, t)))
            .collect()
    }

    /// Value of one property at `elapsed`, if the loop animates it
    pub fn sample_property(&self, property: AmbientProperty, elapsed: f64) -> Option<f64> {
        self.sample(elapsed)
            .into_iter()
            .find(|(p, _)| *p == property)
            .map(|(_, v)| v)
    }
}
