//! Resize coordinator
//!
//! Owns the zoom registry and the debounced resize signal, and fans both
//! the raw-resize and settled signals out to every registered zoom.
//!
//! ```text
//! raw resize ──► every zoom: recompute + on_resize ──► re-arm settle deadline
//!                                                            │ quiet period
//! poll ◄─────────────────────────────────────────────────────┘
//!   └──► every zoom: recompute + on_resize_finish
//! ```
//!
//! [`ResizeCoordinator`] is a cheap-clone handle. No internal borrow is held
//! while zooms are dispatched, so observers may call back into the
//! coordinator (register zooms, read the deadline, even dispose it).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use zoombox_platform::{RegionRef, ResizeEvent};

use crate::debounce::{saturating_millis, DebouncedResize, SettleEvent};
use crate::settings::CoordinatorSettings;
use crate::zoom::{Phase, Selection, ZoomDefaults, ZoomHandle, ZoomId, ZoomInstance, ZoomOptions};

type Targets = SmallVec<[ZoomHandle; 4]>;

struct CoordinatorInner {
    signal: DebouncedResize,
    /// Registered zooms in registration order
    zooms: IndexMap<ZoomId, ZoomHandle, FxBuildHasher>,
    defaults: ZoomDefaults,
    raw_resizes: u64,
    disposed: bool,
}

/// Result of fanning one signal out to the registry
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DispatchSummary {
    pub phase: Phase,
    /// Zooms whose observer ran
    pub notified: usize,
    /// Zooms whose recompute was skipped
    pub failed: usize,
}

impl DispatchSummary {
    fn empty(phase: Phase) -> Self {
        Self {
            phase,
            notified: 0,
            failed: 0,
        }
    }
}

/// Statistics about the coordinator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinatorStats {
    pub zoom_count: usize,
    pub raw_resizes: u64,
    pub settles: u64,
    pub settle_pending: bool,
}

/// Registry of zooms plus the debounced resize signal they share
///
/// A cheap-clone handle: clones refer to the same registry. Feed it raw
/// resizes with [`resize`](Self::resize) and call [`poll`](Self::poll) from
/// the host's event loop, or hand it to a
/// [`ResizeDriver`](crate::driver::ResizeDriver).
///
/// ```
/// use std::time::{Duration, Instant};
/// use zoombox_core::{ResizeCoordinator, ZoomOptions};
/// use zoombox_platform::{HeadlessRegion, RegionRef, ResizeEvent, ResizeSource};
///
/// let coordinator = ResizeCoordinator::default();
/// let viewport = HeadlessRegion::new(800.0, 600.0).shared();
/// coordinator.set_viewport(viewport.clone());
///
/// let guide: RegionRef = HeadlessRegion::new(400.0, 300.0).shared();
/// let zoom = coordinator.create_zoom(vec![guide], ZoomOptions::new()).unwrap();
///
/// let start = Instant::now();
/// coordinator.resize_at(ResizeEvent::resize(ResizeSource::Viewport), start);
/// assert_eq!(zoom.zoomfactor(), 2.0);
///
/// viewport.set_size(1200.0, 900.0);
/// coordinator.poll_at(start + Duration::from_millis(100)).unwrap();
/// assert_eq!(zoom.zoomfactor(), 3.0);
///
/// coordinator.dispose();
/// ```
#[derive(Clone)]
pub struct ResizeCoordinator {
    inner: Rc<RefCell<CoordinatorInner>>,
}

impl ResizeCoordinator {
    pub fn new(settings: &CoordinatorSettings) -> Self {
        let defaults = ZoomDefaults {
            dimension: settings.default_policy,
            ..Default::default()
        };
        Self {
            inner: Rc::new(RefCell::new(CoordinatorInner {
                signal: DebouncedResize::new(settings.settle_delay()),
                zooms: IndexMap::default(),
                defaults,
                raw_resizes: 0,
                disposed: false,
            })),
        }
    }

    /// Use `viewport` as the boundary for zooms that don't name one
    pub fn set_viewport(&self, viewport: RegionRef) {
        self.inner.borrow_mut().defaults.boundary = Some(viewport);
    }

    /// Change the defaults applied to zooms registered from now on
    pub fn update_defaults(&self, f: impl FnOnce(&mut ZoomDefaults)) {
        f(&mut self.inner.borrow_mut().defaults);
    }

    pub fn defaults(&self) -> ZoomDefaults {
        self.inner.borrow().defaults.clone()
    }

    /// Register a new zoom over `selection`
    ///
    /// Returns `None` without registering anything when `selection` is a
    /// single already-resolved region with a nonzero size, or when the
    /// coordinator has been disposed. An empty collection still creates a
    /// zoom; its recomputes fail until it has a guide.
    pub fn create_zoom(
        &self,
        selection: impl Into<Selection>,
        options: ZoomOptions,
    ) -> Option<ZoomHandle> {
        let selection = selection.into();
        if selection.is_degenerate() {
            tracing::debug!("ignoring registration of an already-resolved region");
            return None;
        }

        let defaults = {
            let inner = self.inner.borrow();
            if inner.disposed {
                tracing::warn!("zoom registration on a disposed coordinator");
                return None;
            }
            inner.defaults.clone()
        };

        let config = defaults.merge(options);
        let handle = ZoomHandle::new(ZoomInstance::register(config, selection.into_regions()));
        self.inner
            .borrow_mut()
            .zooms
            .insert(handle.id(), handle.clone());

        tracing::debug!(
            zoom = %handle.id(),
            elements = handle.element_count(),
            dimension = %handle.dimension(),
            "zoom registered"
        );
        Some(handle)
    }

    /// Handle a raw resize (or ready) occurrence now
    pub fn resize(&self, event: ResizeEvent) -> DispatchSummary {
        self.resize_at(event, Instant::now())
    }

    /// Handle a raw resize observed at `now`
    ///
    /// Every zoom recomputes and runs `on_resize` before the settle deadline
    /// is re-armed.
    pub fn resize_at(&self, event: ResizeEvent, now: Instant) -> DispatchSummary {
        let Some(targets) = self.targets() else {
            return DispatchSummary::empty(Phase::Resize);
        };

        tracing::trace!(%event, zooms = targets.len(), "raw resize");
        let summary = self.dispatch_all(&targets, Phase::Resize);

        let mut inner = self.inner.borrow_mut();
        if !inner.disposed {
            inner.raw_resizes += 1;
            inner.signal.trigger(now);
        }
        summary
    }

    /// Fire the settled signal if it is due
    pub fn poll(&self) -> Option<(SettleEvent, DispatchSummary)> {
        self.poll_at(Instant::now())
    }

    /// Fire the settled signal if it is due at `now`
    ///
    /// Every zoom recomputes from live dimensions and runs
    /// `on_resize_finish`.
    pub fn poll_at(&self, now: Instant) -> Option<(SettleEvent, DispatchSummary)> {
        let (event, targets) = {
            let mut inner = self.inner.borrow_mut();
            if inner.disposed {
                return None;
            }
            let event = inner.signal.poll(now)?;
            let targets: Targets = inner.zooms.values().cloned().collect();
            (event, targets)
        };

        tracing::debug!(
            burst_len = event.burst_len,
            quiet_ms = saturating_millis(event.quiet_period()),
            "resize settled"
        );
        Some((event, self.dispatch_all(&targets, Phase::Settled)))
    }

    /// When the pending settle is due, if one is armed
    pub fn next_deadline(&self) -> Option<Instant> {
        self.inner.borrow().signal.deadline()
    }

    pub fn settle_delay(&self) -> Duration {
        self.inner.borrow().signal.delay()
    }

    /// Change the settle delay; applies from the next raw resize
    pub fn set_settle_delay(&self, delay: Duration) {
        self.inner.borrow_mut().signal.set_delay(delay);
    }

    /// Look up a registered zoom
    pub fn zoom(&self, id: ZoomId) -> Option<ZoomHandle> {
        self.inner.borrow().zooms.get(&id).cloned()
    }

    /// All registered zooms in registration order
    pub fn zooms(&self) -> Vec<ZoomHandle> {
        self.inner.borrow().zooms.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().zooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().zooms.is_empty()
    }

    /// Drop every zoom and the pending settle
    ///
    /// Existing [`ZoomHandle`]s stay readable but no longer receive
    /// signals, including the rest of a dispatch already in progress when
    /// an observer disposes the coordinator. Further registrations return
    /// `None`.
    pub fn dispose(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.signal.cancel();
        let count = inner.zooms.len();
        inner.zooms.clear();
        tracing::info!(zooms = count, "resize coordinator disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.borrow().disposed
    }

    pub fn stats(&self) -> CoordinatorStats {
        let inner = self.inner.borrow();
        CoordinatorStats {
            zoom_count: inner.zooms.len(),
            raw_resizes: inner.raw_resizes,
            settles: inner.signal.settled_count(),
            settle_pending: inner.signal.is_pending(),
        }
    }

    /// Recompute and notify `targets` in order
    ///
    /// Stops at the first target reached after the coordinator was disposed,
    /// so an observer that disposes it ends the dispatch.
    fn dispatch_all(&self, targets: &[ZoomHandle], phase: Phase) -> DispatchSummary {
        let mut summary = DispatchSummary::empty(phase);
        for zoom in targets {
            if self.is_disposed() {
                tracing::debug!(
                    %phase,
                    remaining = targets.len() - summary.notified,
                    "dispatch cut short by dispose"
                );
                break;
            }
            summary.notified += 1;
            if let Err(err) = zoom.dispatch(phase) {
                summary.failed += 1;
                tracing::warn!(zoom = %zoom.id(), %phase, error = %err, "recompute skipped");
            }
        }

        tracing::debug!(
            %phase,
            notified = summary.notified,
            failed = summary.failed,
            "dispatch complete"
        );
        summary
    }

    fn targets(&self) -> Option<Targets> {
        let inner = self.inner.borrow();
        if inner.disposed {
            return None;
        }
        Some(inner.zooms.values().cloned().collect())
    }
}

impl Default for ResizeCoordinator {
    fn default() -> Self {
        Self::new(&CoordinatorSettings::default())
    }
}
