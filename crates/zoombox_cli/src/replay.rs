//! Replay a scripted resize timeline against headless regions

use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use zoombox_core::{CoordinatorSettings, Phase, ResizeCoordinator, ZoomHandle, ZoomOptions};
use zoombox_platform::{HeadlessRegion, RegionRef, ResizeEvent, ResizeSource};

use crate::config::ReplayScript;

/// One dispatch observed during a replay
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayLine {
    /// Time since the replay started
    pub at: Duration,
    pub phase: Phase,
    pub factor: f64,
    /// Raw resizes coalesced into a settle
    pub burst_len: Option<u32>,
    pub failed: usize,
}

impl fmt::Display for ReplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>6}ms  {:<13} factor={:.4}",
            self.at.as_millis(),
            self.phase.to_string(),
            self.factor
        )?;
        if let Some(burst_len) = self.burst_len {
            write!(f, "  burst={}", burst_len)?;
        }
        if self.failed > 0 {
            write!(f, "  failed={}", self.failed)?;
        }
        Ok(())
    }
}

struct Replay {
    coordinator: ResizeCoordinator,
    zoom: ZoomHandle,
    start: Instant,
    lines: Vec<ReplayLine>,
}

impl Replay {
    fn at(&self, now: Instant) -> Duration {
        now.duration_since(self.start)
    }

    /// Fire every settle due by `until`, at its own deadline
    fn settle_until(&mut self, until: Instant) {
        while let Some(deadline) = self.coordinator.next_deadline() {
            if deadline > until {
                break;
            }
            let Some((event, summary)) = self.coordinator.poll_at(deadline) else {
                break;
            };
            self.lines.push(ReplayLine {
                at: self.at(event.fired_at),
                phase: summary.phase,
                factor: self.zoom.zoomfactor(),
                burst_len: Some(event.burst_len),
                failed: summary.failed,
            });
        }
    }
}

/// Run `script` and collect one line per resize and settle dispatch
///
/// Time is synthetic: the replay never sleeps.
pub fn run(script: &ReplayScript, settings: &CoordinatorSettings) -> Vec<ReplayLine> {
    let coordinator = ResizeCoordinator::new(settings);

    let boundary = HeadlessRegion::new(script.boundary.0.width, script.boundary.0.height).shared();
    let guide = HeadlessRegion::new(script.guide.0.width, script.guide.0.height).shared();
    coordinator.set_viewport(boundary.clone());

    let mut selection: Vec<RegionRef> = vec![guide.clone() as RegionRef];
    selection.extend(script.elements.iter().map(|dims| {
        Rc::new(HeadlessRegion::new(dims.0.width, dims.0.height)) as RegionRef
    }));

    let mut options = ZoomOptions::new();
    if let Some(policy) = script.policy {
        options = options.dimension(policy);
    }

    let Some(zoom) = coordinator.create_zoom(selection, options) else {
        tracing::warn!("replay selection is degenerate, nothing to scale");
        return Vec::new();
    };
    tracing::debug!(zoom = %zoom.id(), dimension = %zoom.dimension(), "replay zoom registered");

    let mut replay = Replay {
        coordinator,
        zoom,
        start: Instant::now(),
        lines: Vec::new(),
    };

    for step in &script.steps {
        let now = replay.start + Duration::from_millis(step.at_ms);
        replay.settle_until(now);

        if let Some(dims) = step.boundary {
            boundary.set_size(dims.0.width, dims.0.height);
        }
        if let Some(dims) = step.guide {
            guide.set_size(dims.0.width, dims.0.height);
        }

        let event = if step.ready {
            ResizeEvent::ready(ResizeSource::Document)
        } else {
            ResizeEvent::resize(ResizeSource::Viewport)
        };
        let summary = replay.coordinator.resize_at(event, now);
        replay.lines.push(ReplayLine {
            at: replay.at(now),
            phase: summary.phase,
            factor: replay.zoom.zoomfactor(),
            burst_len: None,
            failed: summary.failed,
        });
    }

    if let Some(deadline) = replay.coordinator.next_deadline() {
        replay.settle_until(deadline);
    }

    replay.coordinator.dispose();
    replay.lines
}
