//! Zoombox Platform Abstraction Layer
//!
//! This crate provides the host-facing types the scaler is built on:
//!
//! - [`Region`] - a measurable, stylable rectangle (boundary, guide, or
//!   scaled element)
//! - [`ResizeEvent`] - a raw resize occurrence from the document or viewport
//! - [`ScaleTransform`] - the style output written to every scaled element
//!
//! Hosts implement [`Region`] for whatever their surface offers (DOM nodes,
//! native views, terminal panes). [`HeadlessRegion`] is an in-memory
//! implementation for replays and tests.
//!
//! # Example
//!
//! ```
//! use zoombox_platform::*;
//!
//! let region = HeadlessRegion::new(400.0, 300.0);
//! region.apply_scale(&ScaleTransform::new(2.0)).unwrap();
//!
//! assert_eq!(region.size(), Size::new(400.0, 300.0));
//! assert_eq!(region.last_transform().unwrap().css_transform(), "scale(2)");
//! ```

mod error;
mod event;
mod region;
mod style;

// Re-export all public types
pub use error::{RegionError, Result};
pub use event::{ResizeEvent, ResizeKind, ResizeSource};
pub use region::{HeadlessRegion, Offset, Region, RegionRef, Size};
pub use style::{ScaleTransform, StyleDeclaration, TransformOrigin, VENDOR_PREFIXES};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{RegionError, Result};
    pub use crate::event::{ResizeEvent, ResizeKind, ResizeSource};
    pub use crate::region::{HeadlessRegion, Offset, Region, RegionRef, Size};
    pub use crate::style::{ScaleTransform, TransformOrigin};
}
