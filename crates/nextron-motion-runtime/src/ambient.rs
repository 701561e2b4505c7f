//! Ambient background loop player

use tokio::time::Instant;

use nextron_motion_core::config::AmbientConfig;
use nextron_motion_core::library;
use nextron_motion_core::reduced_motion_safe;
use nextron_motion_core::variant::{AmbientLoop, AmbientProperty};

use super::timing::elapsed_secs;

/// Plays one loop relative to the moment it was mounted
#[derive(Debug, Clone)]
pub struct AmbientPlayer {
    ambient: AmbientLoop,
    mounted: Instant,
    enabled: bool,
    reduced: bool,
}

impl AmbientPlayer {
    pub fn new(ambient: AmbientLoop, now: Instant) -> Self {
        Self {
            ambient,
            mounted: now,
            enabled: true,
            reduced: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.ambient.name
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced = reduced;
    }

    /// Whether the loop moves at all
    pub fn is_playing(&self) -> bool {
        self.enabled && !self.reduced
    }

    /// Property values at `now`; held at the first keyframe when not playing
    pub fn sample(&self, now: Instant) -> Vec<(AmbientProperty, f64)> {
        if !self.is_playing() {
            return reduced_motion_safe(&self.ambient, true).resting();
        }
        self.ambient.sample(elapsed_secs(self.mounted, now))
    }
}

/// Background loops for the hero: drift, pulse, beam sweep, grid and streaks
pub fn backdrop(config: &AmbientConfig, now: Instant) -> Vec<AmbientPlayer> {
    let mut loops = vec![library::slow_drift(), library::pulse_opacity(), library::light_beam()];
    loops.extend((0..config.grid_lines).map(library::grid_line));
    loops.extend((0..config.light_streaks).map(library::light_streak));

    loops
        .into_iter()
        .map(|ambient| {
            let mut player = AmbientPlayer::new(ambient, now);
            player.set_enabled(config.enabled);
            player
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn opacity(values: &[(AmbientProperty, f64)]) -> Option<f64> {
        values
            .iter()
            .find(|(p, _)| *p == AmbientProperty::Opacity)
            .map(|(_, v)| *v)
    }

    #[test]
    fn test_pulse_moves_over_time() {
        let t0 = Instant::now();
        let player = AmbientPlayer::new(library::pulse_opacity(), t0);
        assert_eq!(opacity(&player.sample(t0)), Some(0.3));
        let peak = opacity(&player.sample(t0 + Duration::from_secs(2))).unwrap();
        assert!((peak - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reduced_motion_freezes() {
        let t0 = Instant::now();
        let mut player = AmbientPlayer::new(library::pulse_opacity(), t0);
        player.set_reduced_motion(true);
        assert!(!player.is_playing());
        assert_eq!(opacity(&player.sample(t0 + Duration::from_secs(2))), Some(0.3));
    }

    #[test]
    fn test_backdrop_follows_config() {
        let t0 = Instant::now();
        let config = AmbientConfig::default();
        let players = backdrop(&config, t0);
        assert_eq!(players.len(), 3 + config.grid_lines + config.light_streaks);
        assert!(players.iter().all(AmbientPlayer::is_playing));

        let disabled = AmbientConfig {
            enabled: false,
            ..AmbientConfig::default()
        };
        assert!(backdrop(&disabled, t0).iter().all(|p| !p.is_playing()));
    }

    #[test]
    fn test_grid_line_waits_for_delay() {
        let t0 = Instant::now();
        let player = AmbientPlayer::new(library::grid_line(2), t0);
        // third line starts 0.8s in
        assert_eq!(opacity(&player.sample(t0 + Duration::from_millis(500))), Some(0.0));
        assert!(opacity(&player.sample(t0 + Duration::from_millis(2000))).unwrap() > 0.0);
    }
}
