//! Global resize coordinator
//!
//! Hosts with a single document/viewport pair usually want one coordinator
//! shared by every zoom, without threading a handle through their code.
//! The free functions here operate on a coordinator created on first use.
//!
//! Regions and observers are `Rc`-based, so the global coordinator belongs
//! to the thread that drives the host's events. The settle delay is
//! process-wide.
//!
//! ```
//! use zoombox_core::{global, ZoomOptions};
//! use zoombox_platform::{HeadlessRegion, RegionRef, ResizeEvent, ResizeSource};
//!
//! global::set_viewport(HeadlessRegion::new(800.0, 600.0).shared());
//!
//! let guide: RegionRef = HeadlessRegion::new(400.0, 300.0).shared();
//! let zoom = global::create_zoom(vec![guide], ZoomOptions::new()).unwrap();
//!
//! global::resize(ResizeEvent::resize(ResizeSource::Viewport));
//! assert_eq!(zoom.zoomfactor(), 2.0);
//!
//! global::dispose();
//! ```

use std::cell::RefCell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use zoombox_platform::{RegionRef, ResizeEvent};

use crate::coordinator::{DispatchSummary, ResizeCoordinator};
use crate::debounce::{saturating_millis, SettleEvent, DEFAULT_SETTLE_DELAY};
use crate::settings::CoordinatorSettings;
use crate::zoom::{Selection, ZoomHandle, ZoomId, ZoomOptions};

static SETTLE_DELAY_MS: AtomicU64 = AtomicU64::new(DEFAULT_SETTLE_DELAY.as_millis() as u64);

thread_local! {
    static COORDINATOR: RefCell<Option<ResizeCoordinator>> = const { RefCell::new(None) };
}

/// The process-wide settle delay
pub fn settle_delay() -> Duration {
    Duration::from_millis(SETTLE_DELAY_MS.load(Ordering::Relaxed))
}

/// Change the process-wide settle delay
///
/// Applies to coordinators created afterwards and, if this thread's global
/// coordinator already exists, to its next raw resize.
pub fn set_settle_delay(delay: Duration) {
    SETTLE_DELAY_MS.store(saturating_millis(delay), Ordering::Relaxed);
    if let Some(coordinator) = try_coordinator() {
        coordinator.set_settle_delay(delay);
    }
}

/// Get this thread's coordinator, creating it on first use
pub fn coordinator() -> ResizeCoordinator {
    COORDINATOR.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(|| {
                let settings = CoordinatorSettings::default().with_settle_delay(settle_delay());
                tracing::info!(
                    settle_delay_ms = settings.settle_delay_ms,
                    "global resize coordinator created"
                );
                ResizeCoordinator::new(&settings)
            })
            .clone()
    })
}

/// Get this thread's coordinator if it has been created
pub fn try_coordinator() -> Option<ResizeCoordinator> {
    COORDINATOR.with(|slot| slot.borrow().clone())
}

/// Check if this thread's coordinator has been created
pub fn is_initialized() -> bool {
    COORDINATOR.with(|slot| slot.borrow().is_some())
}

/// Use `viewport` as the default boundary
pub fn set_viewport(viewport: RegionRef) {
    coordinator().set_viewport(viewport);
}

/// Register a zoom on the global coordinator
///
/// See [`ResizeCoordinator::create_zoom`].
pub fn create_zoom(selection: impl Into<Selection>, options: ZoomOptions) -> Option<ZoomHandle> {
    coordinator().create_zoom(selection, options)
}

/// Feed a raw resize to the global coordinator
pub fn resize(event: ResizeEvent) -> DispatchSummary {
    coordinator().resize(event)
}

/// Fire the global settled signal if it is due
pub fn poll() -> Option<(SettleEvent, DispatchSummary)> {
    try_coordinator()?.poll()
}

/// Look up a zoom registered on the global coordinator
pub fn zoom(id: ZoomId) -> Option<ZoomHandle> {
    try_coordinator()?.zoom(id)
}

/// Dispose of this thread's coordinator
///
/// Returns `false` if none existed. The next global call creates a fresh
/// coordinator.
pub fn dispose() -> bool {
    let taken = COORDINATOR.with(|slot| slot.borrow_mut().take());
    match taken {
        Some(coordinator) => {
            coordinator.dispose();
            true
        }
        None => false,
    }
}
