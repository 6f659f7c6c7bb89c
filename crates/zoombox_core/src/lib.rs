//! Zoombox Core
//!
//! Scales groups of elements so a guide region fits inside a boundary region,
//! and keeps the scale current while the host resizes.
//!
//! # Features
//!
//! - **Fit Policies**: longest, width, height or shortest side ratio
//! - **Zoom Instances**: a selection of elements, a guide, a boundary and
//!   two observers, scaled together
//! - **Debounced Resize**: a settled signal fired once per burst of raw
//!   resizes, after a quiet period
//! - **Coordinator**: one registry per host; every raw resize recomputes
//!   every zoom, every settle recomputes again from live dimensions
//! - **Driver**: a tokio task that feeds a coordinator from a channel
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use zoombox_core::{FitPolicy, ResizeCoordinator, ZoomOptions};
//! use zoombox_platform::{HeadlessRegion, RegionRef, ResizeEvent, ResizeSource};
//!
//! let coordinator = ResizeCoordinator::default();
//! coordinator.set_viewport(HeadlessRegion::new(800.0, 600.0).shared());
//!
//! let guide: RegionRef = HeadlessRegion::new(400.0, 400.0).shared();
//! let zoom = coordinator
//!     .create_zoom(vec![guide], ZoomOptions::new().dimension(FitPolicy::Shortest))
//!     .unwrap();
//!
//! let start = Instant::now();
//! coordinator.resize_at(ResizeEvent::resize(ResizeSource::Viewport), start);
//! assert_eq!(zoom.zoomfactor(), 1.5);
//!
//! let (settled, _) = coordinator
//!     .poll_at(start + Duration::from_millis(100))
//!     .unwrap();
//! assert_eq!(settled.burst_len, 1);
//! ```

pub mod coordinator;
pub mod debounce;
pub mod driver;
pub mod error;
pub mod global;
pub mod policy;
pub mod settings;
pub mod zoom;

pub use coordinator::{CoordinatorStats, DispatchSummary, ResizeCoordinator};
pub use debounce::{DebouncedResize, SettleEvent, DEFAULT_SETTLE_DELAY};
pub use driver::{DriverStats, ResizeDriver, ResizeSender};
pub use error::{Result, ZoomError};
pub use policy::{compute_scale, constants, FitPolicy, ScaleRatios};
pub use settings::CoordinatorSettings;
pub use zoom::{
    Guide, Phase, RegisteredElement, ScaleReport, Selection, ZoomConfig, ZoomDefaults, ZoomHandle,
    ZoomId, ZoomInstance, ZoomObserver, ZoomOptions,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coordinator::ResizeCoordinator;
    pub use crate::error::{Result, ZoomError};
    pub use crate::policy::FitPolicy;
    pub use crate::zoom::{Phase, Selection, ZoomHandle, ZoomOptions};
    pub use zoombox_platform::prelude::*;
}
