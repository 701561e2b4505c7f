use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tracing::info;

use nextron_motion_core::{library, MotionConfig, ViewportTrigger};
use nextron_motion_runtime::timing::{elapsed_secs, secs};
use nextron_motion_runtime::{
    backdrop, Bounds, ManualMediaQuery, Observation, ReducedMotionDetector, SectionReveal, Stage,
    StageCommand, StageEvent,
};

const VIEWPORT_HEIGHT: f64 = 900.0;
const SCROLL_STEP: Duration = Duration::from_millis(100);
/// Time left after the last scroll step for reveals to settle
const SETTLE: Duration = Duration::from_millis(1500);

/// The landing page, top to bottom
fn sections(trigger: ViewportTrigger) -> Vec<(&'static str, Bounds, SectionReveal)> {
    vec![
        (
            "hero",
            Bounds::new(0.0, 900.0),
            SectionReveal::new(library::hero_stagger())
                .with_trigger(ViewportTrigger::EARLY)
                .children([library::hero_title(), library::hero_subtitle(), library::hero_cta()]),
        ),
        (
            "about",
            Bounds::new(900.0, 800.0),
            SectionReveal::new(library::stagger_container_default())
                .with_trigger(trigger)
                .children([library::slide_in_left(), library::fade_up(), library::fade_up()]),
        ),
        (
            "services",
            Bounds::new(1700.0, 1100.0),
            SectionReveal::new(library::stagger_container_fast())
                .with_trigger(ViewportTrigger::EARLY)
                .children(std::iter::repeat_with(library::stagger_item).take(6)),
        ),
        (
            "industries",
            Bounds::new(2800.0, 900.0),
            SectionReveal::new(library::stagger_container_relaxed())
                .with_trigger(trigger)
                .children(std::iter::repeat_with(library::scale_in).take(4)),
        ),
        (
            "why_choose",
            Bounds::new(3700.0, 800.0),
            SectionReveal::new(library::stagger_container_default())
                .with_trigger(trigger)
                .children([
                    library::progressive_icon(),
                    library::progressive_title(),
                    library::progressive_description(),
                ]),
        ),
        (
            "contact",
            Bounds::new(4500.0, 900.0),
            SectionReveal::new(library::stagger_container_default())
                .with_trigger(trigger)
                .children([library::fade_up(), library::slide_in_right()]),
        ),
    ]
}

fn log_event(event: &StageEvent) {
    match event {
        StageEvent::PhaseChanged { name, from, to, .. } => {
            info!("{:<11} {:?} -> {:?}", name, from, to);
        }
        StageEvent::ReducedMotionChanged { reduced } => {
            info!("Reduced motion is now {}", if *reduced { "on" } else { "off" });
        }
        StageEvent::Unmounted { name, .. } => info!("{} unmounted", name),
    }
}

pub async fn run(config: &MotionConfig, reduced: bool, toggle_at: Option<f64>, speed: f64) -> Result<()> {
    config.validate().context("Invalid motion config")?;

    let query = Arc::new(ManualMediaQuery::new(reduced));
    let detector = ReducedMotionDetector::new(Some(query.clone()), config.motion.reduced_motion);

    let observation = if config.motion.observe_visibility {
        Observation::Supported
    } else {
        Observation::Unavailable
    };

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let start = Instant::now();
    let mut stage = Stage::new(VIEWPORT_HEIGHT, detector.subscribe())
        .with_observation(observation)
        .with_event_sender(event_tx)
        .with_ambient(backdrop(&config.ambient, start));

    let trigger = config.motion.viewport.trigger();
    let mut mounted = Vec::new();
    for (name, bounds, reveal) in sections(trigger) {
        mounted.push((name, stage.mount(name, bounds, reveal, start)));
    }
    let max_scroll = stage.max_scroll();

    println!(
        "Simulating {} sections over {}px at {}px/s (reduced motion: {})\n",
        mounted.len(),
        max_scroll,
        speed,
        detector.get()
    );

    let logger = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            log_event(&event);
        }
    });

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let runner = tokio::spawn(stage.run(config.motion.tick_duration(), cmd_rx, shutdown_rx));

    let step = speed.max(1.0) * SCROLL_STEP.as_secs_f64();
    let mut scrolled = 0.0;
    let mut toggle = toggle_at;
    let mut ticker = tokio::time::interval(SCROLL_STEP);

    while scrolled < max_scroll {
        ticker.tick().await;
        if let Some(at) = toggle {
            if elapsed_secs(start, Instant::now()) >= at {
                query.set(!reduced);
                toggle = None;
            }
        }
        cmd_tx.send(StageCommand::ScrollBy(step))?;
        scrolled += step;
    }

    // a toggle scheduled past the end of the scroll still happens
    if let Some(at) = toggle {
        tokio::time::sleep(secs(at - elapsed_secs(start, Instant::now()))).await;
        query.set(!reduced);
    }
    tokio::time::sleep(SETTLE).await;

    shutdown_tx.send(true)?;
    let stage = runner.await.context("Stage task failed")?;

    println!("\nFinal phases:");
    let now = Instant::now();
    for (name, id) in &mounted {
        let phase = stage
            .phase(*id)
            .map(|p| format!("{:?}", p))
            .unwrap_or_else(|| "unmounted".to_string());
        let settled = stage
            .frame(*id, now)
            .map(|f| f.container.is_at_rest() && f.children.iter().all(|c| c.is_at_rest()))
            .unwrap_or(false);
        println!(
            "  {:<11} {}{}",
            name,
            phase,
            if settled { "" } else { " (not at rest)" }
        );
    }

    println!("\nAmbient loops:");
    for (name, values) in stage.ambient_samples(now) {
        let values: Vec<String> = values.iter().map(|(p, v)| format!("{:?}={:.2}", p, v)).collect();
        println!("  {:<15} {}", name, values.join(" "));
    }

    drop(stage);
    logger.await.context("Event logger failed")?;

    Ok(())
}
