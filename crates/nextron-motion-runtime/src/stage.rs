//! Page stage
//!
//! Owns the scroll position and viewport size, turns them into per-section
//! visible fractions, and forwards reduced-motion changes to every mounted
//! section. `run()` drives it as a background task at the configured frame
//! rate until shutdown.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};
use uuid::Uuid;

use nextron_motion_core::variant::AmbientProperty;

use super::ambient::AmbientPlayer;
use super::reduced_motion::ReducedMotion;
use super::reveal::{RevealFrame, RevealPhase, SectionReveal};
use super::viewport::{Bounds, Observation};

pub type SectionId = Uuid;

const MIN_TICK: Duration = Duration::from_millis(1);

/// Events emitted by the stage as sections change phase
#[derive(Debug, Clone, PartialEq)]
pub enum StageEvent {
    /// A section moved between reveal phases
    PhaseChanged {
        id: SectionId,
        name: String,
        from: RevealPhase,
        to: RevealPhase,
    },
    /// The reduced-motion preference changed and was applied to every section
    ReducedMotionChanged { reduced: bool },
    /// A section was removed from the page
    Unmounted { id: SectionId, name: String },
}

/// Input for a running stage
#[derive(Debug, Clone, PartialEq)]
pub enum StageCommand {
    ScrollTo(f64),
    ScrollBy(f64),
    /// Anchor navigation to a section by name
    ScrollToSection(String),
    Resize { viewport_height: f64 },
    Unmount(SectionId),
}

#[derive(Debug)]
struct Section {
    id: SectionId,
    name: String,
    bounds: Bounds,
    reveal: SectionReveal,
}

pub struct Stage {
    sections: Vec<Section>,
    scroll_top: f64,
    viewport_height: f64,
    observation: Observation,
    reduced_motion: ReducedMotion,
    reduced: bool,
    ambient: Vec<AmbientPlayer>,
    event_tx: Option<mpsc::UnboundedSender<StageEvent>>,
}

impl Stage {
    pub fn new(viewport_height: f64, reduced_motion: ReducedMotion) -> Self {
        let reduced = reduced_motion.get();
        Self {
            sections: Vec::new(),
            scroll_top: 0.0,
            viewport_height: viewport_height.max(0.0),
            observation: Observation::Supported,
            reduced_motion,
            reduced,
            ambient: Vec::new(),
            event_tx: None,
        }
    }

    /// Set how sections learn about visibility
    pub fn with_observation(mut self, observation: Observation) -> Self {
        self.observation = observation;
        self
    }

    /// Set the event sender for phase notifications
    pub fn with_event_sender(mut self, tx: mpsc::UnboundedSender<StageEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn with_ambient(mut self, players: Vec<AmbientPlayer>) -> Self {
        self.ambient = players;
        let reduced = self.reduced;
        for player in &mut self.ambient {
            player.set_reduced_motion(reduced);
        }
        self
    }

    fn send_event(&self, event: StageEvent) {
        if let Some(ref tx) = self.event_tx {
            if tx.send(event).is_err() {
                warn!("Failed to send stage event: receiver dropped");
            }
        }
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn is_reduced_motion(&self) -> bool {
        self.reduced
    }

    /// Bottom edge of the lowest section
    pub fn page_height(&self) -> f64 {
        self.sections
            .iter()
            .map(|s| s.bounds.bottom())
            .fold(0.0, f64::max)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.page_height() - self.viewport_height).max(0.0)
    }

    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id).collect()
    }

    pub fn find(&self, name: &str) -> Option<SectionId> {
        self.sections.iter().find(|s| s.name == name).map(|s| s.id)
    }

    pub fn phase(&self, id: SectionId) -> Option<RevealPhase> {
        self.section(id).map(|s| s.reveal.phase())
    }

    pub fn visible_fraction(&self, id: SectionId) -> Option<f64> {
        self.section(id)
            .map(|s| s.bounds.visible_fraction(self.scroll_top, self.viewport_height))
    }

    pub fn frame(&self, id: SectionId, now: Instant) -> Option<RevealFrame> {
        self.section(id).and_then(|s| s.reveal.frame(now))
    }

    /// Current values of every ambient loop
    pub fn ambient_samples(&self, now: Instant) -> Vec<(&str, Vec<(AmbientProperty, f64)>)> {
        self.ambient.iter().map(|p| (p.name(), p.sample(now))).collect()
    }

    fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Mount a section; one already in view starts revealing right away
    pub fn mount(&mut self, name: impl Into<String>, bounds: Bounds, mut reveal: SectionReveal, now: Instant) -> SectionId {
        let changes = self.sync_reduced_motion();
        self.emit_changes(changes);
        let id = Uuid::new_v4();
        let name = name.into();
        debug!("Mounting section {} ({})", name, id);

        reveal.mount(self.observation, self.reduced, now);
        reveal.observe(bounds.visible_fraction(self.scroll_top, self.viewport_height), now);
        let phase = reveal.phase();

        self.sections.push(Section {
            id,
            name: name.clone(),
            bounds,
            reveal,
        });
        self.send_event(StageEvent::PhaseChanged {
            id,
            name,
            from: RevealPhase::Unobserved,
            to: phase,
        });
        id
    }

    /// Remove a section, cancelling its reveal; false if it wasn't mounted
    pub fn unmount(&mut self, id: SectionId) -> bool {
        let Some(pos) = self.sections.iter().position(|s| s.id == id) else {
            return false;
        };
        let mut section = self.sections.remove(pos);
        section.reveal.unmount();
        debug!("Unmounted section {}", section.name);
        self.send_event(StageEvent::Unmounted {
            id,
            name: section.name,
        });
        true
    }

    pub fn scroll_to(&mut self, top: f64, now: Instant) {
        self.scroll_top = top.clamp(0.0, self.max_scroll());
        self.observe_all(now);
    }

    pub fn scroll_by(&mut self, delta: f64, now: Instant) {
        self.scroll_to(self.scroll_top + delta, now);
    }

    /// Jump to a section's top edge; false if no section has that name
    pub fn scroll_to_section(&mut self, name: &str, now: Instant) -> bool {
        let Some(top) = self.sections.iter().find(|s| s.name == name).map(|s| s.bounds.top) else {
            return false;
        };
        self.scroll_to(top, now);
        true
    }

    pub fn resize(&mut self, viewport_height: f64, now: Instant) {
        self.viewport_height = viewport_height.max(0.0);
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
        self.observe_all(now);
    }

    fn observe_all(&mut self, now: Instant) {
        let mut changes = self.sync_reduced_motion();
        let (scroll_top, viewport_height) = (self.scroll_top, self.viewport_height);
        for section in &mut self.sections {
            let before = section.reveal.phase();
            let fraction = section.bounds.visible_fraction(scroll_top, viewport_height);
            section.reveal.observe(fraction, now);
            let after = section.reveal.phase();
            if before != after {
                changes.push((section.id, section.name.clone(), before, after));
            }
        }
        self.emit_changes(changes);
    }

    /// Pick up a reduced-motion change and apply it everywhere
    fn sync_reduced_motion(&mut self) -> Vec<(SectionId, String, RevealPhase, RevealPhase)> {
        let mut changes = Vec::new();
        let Some(reduced) = self.reduced_motion.take_change() else {
            return changes;
        };
        if reduced == self.reduced {
            return changes;
        }
        info!("Applying reduced motion = {} to {} sections", reduced, self.sections.len());
        self.reduced = reduced;
        for section in &mut self.sections {
            let before = section.reveal.phase();
            section.reveal.set_reduced_motion(reduced);
            let after = section.reveal.phase();
            if before != after {
                changes.push((section.id, section.name.clone(), before, after));
            }
        }
        for player in &mut self.ambient {
            player.set_reduced_motion(reduced);
        }
        self.send_event(StageEvent::ReducedMotionChanged { reduced });
        changes
    }

    fn emit_changes(&self, changes: Vec<(SectionId, String, RevealPhase, RevealPhase)>) {
        for (id, name, from, to) in changes {
            debug!("Section {} {:?} -> {:?}", name, from, to);
            self.send_event(StageEvent::PhaseChanged { id, name, from, to });
        }
    }

    /// Advance one frame; returns true while any section is still revealing
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changes = self.sync_reduced_motion();
        for section in &mut self.sections {
            let before = section.reveal.phase();
            section.reveal.update(now);
            let after = section.reveal.phase();
            if before != after {
                changes.push((section.id, section.name.clone(), before, after));
            }
        }
        self.emit_changes(changes);
        self.sections.iter().any(|s| s.reveal.needs_update())
    }

    /// Apply one command
    pub fn handle(&mut self, command: StageCommand, now: Instant) {
        match command {
            StageCommand::ScrollTo(top) => self.scroll_to(top, now),
            StageCommand::ScrollBy(delta) => self.scroll_by(delta, now),
            StageCommand::ScrollToSection(name) => {
                if !self.scroll_to_section(&name, now) {
                    warn!("No section named {}", name);
                }
            }
            StageCommand::Resize { viewport_height } => self.resize(viewport_height, now),
            StageCommand::Unmount(id) => {
                self.unmount(id);
            }
        }
    }

    /// Tick and apply commands until shutdown, then hand the stage back
    pub async fn run(
        mut self,
        tick: Duration,
        mut commands: mpsc::UnboundedReceiver<StageCommand>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Self {
        info!(
            "Stage started: {} sections, tick={}ms",
            self.sections.len(),
            tick.as_millis()
        );

        // interval() panics on a zero period
        let tick = tick.max(MIN_TICK);
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        info!("Stage received shutdown signal");
                        break;
                    }
                }

                Some(command) = commands.recv() => {
                    self.handle(command, Instant::now());
                }

                _ = interval.tick() => {
                    self.tick(Instant::now());
                }
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::reduced_motion::{ManualMediaQuery, ReducedMotionDetector};
    use nextron_motion_core::{library, ReducedMotionMode};

    fn about() -> SectionReveal {
        SectionReveal::new(library::stagger_container_default())
            .children([library::fade_up(), library::fade_up()])
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<StageEvent>) -> Vec<StageEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_crosses_threshold() {
        let now = Instant::now();
        let mut stage = Stage::new(800.0, ReducedMotion::fixed(false));
        let hero = stage.mount("hero", Bounds::new(0.0, 800.0), SectionReveal::new(library::fade_in()), now);
        let section = stage.mount("about", Bounds::new(1000.0, 400.0), about(), now);

        assert_eq!(stage.phase(hero), Some(RevealPhase::Revealing));
        assert_eq!(stage.phase(section), Some(RevealPhase::Hidden));

        stage.scroll_to(250.0, now);
        assert!((stage.visible_fraction(section).unwrap() - 0.125).abs() < 1e-9);
        assert_eq!(stage.phase(section), Some(RevealPhase::Hidden));

        stage.scroll_to(300.0, now);
        assert_eq!(stage.phase(section), Some(RevealPhase::Revealing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tick_completes_reveal() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        let mut stage = Stage::new(800.0, ReducedMotion::fixed(false)).with_event_sender(tx);
        let id = stage.mount("hero", Bounds::new(0.0, 600.0), about(), now);

        assert!(stage.tick(now + Duration::from_millis(100)));
        assert!(!stage.tick(now + Duration::from_secs(2)));
        assert_eq!(stage.phase(id), Some(RevealPhase::Visible));

        let events = drain(&mut rx);
        assert!(events.contains(&StageEvent::PhaseChanged {
            id,
            name: "hero".to_string(),
            from: RevealPhase::Revealing,
            to: RevealPhase::Visible,
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_is_clamped() {
        let now = Instant::now();
        let mut stage = Stage::new(800.0, ReducedMotion::fixed(false));
        stage.mount("contact", Bounds::new(0.0, 2000.0), SectionReveal::new(library::fade_up()), now);
        stage.scroll_to(5000.0, now);
        assert_eq!(stage.scroll_top(), 1200.0);
        stage.scroll_by(-5000.0, now);
        assert_eq!(stage.scroll_top(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_anchor_scroll() {
        let now = Instant::now();
        let mut stage = Stage::new(800.0, ReducedMotion::fixed(false));
        stage.mount("hero", Bounds::new(0.0, 800.0), SectionReveal::new(library::fade_in()), now);
        let contact = stage.mount("contact", Bounds::new(3000.0, 900.0), about(), now);

        assert!(stage.scroll_to_section("contact", now));
        assert_eq!(stage.scroll_top(), 3000.0);
        assert_eq!(stage.phase(contact), Some(RevealPhase::Revealing));
        assert!(!stage.scroll_to_section("pricing", now));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reduced_motion_change_reaches_sections() {
        let query = Arc::new(ManualMediaQuery::new(false));
        let detector = ReducedMotionDetector::new(Some(query.clone()), ReducedMotionMode::System);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        let mut stage = Stage::new(800.0, detector.subscribe()).with_event_sender(tx);
        let id = stage.mount("services", Bounds::new(0.0, 600.0), about(), now);
        stage.tick(now + Duration::from_millis(200));
        assert_eq!(stage.phase(id), Some(RevealPhase::Revealing));

        query.set(true);
        stage.tick(now + Duration::from_millis(216));
        assert!(stage.is_reduced_motion());
        assert_eq!(stage.phase(id), Some(RevealPhase::Visible));

        let frame = stage.frame(id, now + Duration::from_millis(216)).unwrap();
        assert!(frame.children.iter().all(|c| c.is_at_rest()));
        assert!(drain(&mut rx).contains(&StageEvent::ReducedMotionChanged { reduced: true }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_stops_section() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        let mut stage = Stage::new(800.0, ReducedMotion::fixed(false)).with_event_sender(tx);
        let id = stage.mount("industries", Bounds::new(0.0, 600.0), about(), now);

        assert!(stage.unmount(id));
        assert!(!stage.unmount(id));
        assert_eq!(stage.phase(id), None);
        assert!(!stage.tick(now + Duration::from_secs(1)));
        assert!(drain(&mut rx).contains(&StageEvent::Unmounted {
            id,
            name: "industries".to_string(),
        }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_observation_reveals_everything() {
        let now = Instant::now();
        let mut stage =
            Stage::new(800.0, ReducedMotion::fixed(false)).with_observation(Observation::Unavailable);
        let id = stage.mount("why_choose", Bounds::new(5000.0, 600.0), about(), now);
        assert_eq!(stage.phase(id), Some(RevealPhase::Revealing));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_shutdown() {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let now = Instant::now();

        let mut stage = Stage::new(800.0, ReducedMotion::fixed(false));
        let id = stage.mount("services", Bounds::new(1500.0, 600.0), about(), now);
        let handle = tokio::spawn(stage.run(Duration::from_millis(16), cmd_rx, shutdown_rx));

        cmd_tx.send(StageCommand::ScrollToSection("services".to_string())).unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        shutdown_tx.send(true).unwrap();

        let stage = handle.await.unwrap();
        assert_eq!(stage.phase(id), Some(RevealPhase::Visible));
        assert_eq!(stage.scroll_top(), 1300.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_with_zero_tick() {
        let (_cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let now = Instant::now();

        let mut stage = Stage::new(800.0, ReducedMotion::fixed(false));
        let id = stage.mount("hero", Bounds::new(0.0, 800.0), about(), now);
        let handle = tokio::spawn(stage.run(Duration::ZERO, cmd_rx, shutdown_rx));

        tokio::time::sleep(Duration::from_secs(2)).await;
        shutdown_tx.send(true).unwrap();

        let stage = handle.await.unwrap();
        assert_eq!(stage.phase(id), Some(RevealPhase::Visible));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scroll_applies_pending_reduced_motion() {
        let query = Arc::new(ManualMediaQuery::new(false));
        let detector = ReducedMotionDetector::new(Some(query.clone()), ReducedMotionMode::System);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        let mut stage = Stage::new(800.0, detector.subscribe()).with_event_sender(tx);
        let id = stage.mount("contact", Bounds::new(1000.0, 400.0), about(), now);
        drain(&mut rx);

        // no tick between the preference flip and the scroll
        query.set(true);
        stage.scroll_to(600.0, now);
        assert!(stage.is_reduced_motion());
        assert_eq!(stage.phase(id), Some(RevealPhase::Visible));

        let events = drain(&mut rx);
        assert!(events.contains(&StageEvent::ReducedMotionChanged { reduced: true }));
        assert!(!events.iter().any(|e| matches!(
            e,
            StageEvent::PhaseChanged { to: RevealPhase::Revealing, .. }
        )));
    }
}
