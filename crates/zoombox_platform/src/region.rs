//! Measurable regions and the host capability trait

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::ops::Sub;
use std::rc::Rc;

use crate::error::{RegionError, Result};
use crate::style::ScaleTransform;

/// Width and height in host units
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when neither dimension is positive
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 || self.height > 0.0)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Document-relative position of a region's top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Offset {
    pub top: f64,
    pub left: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { top: 0.0, left: 0.0 };

    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

impl Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset {
            top: self.top - rhs.top,
            left: self.left - rhs.left,
        }
    }
}

/// Capability interface for anything the scaler measures or styles
///
/// Implemented by the host for boundaries (usually the viewport), guides,
/// and scaled elements. Dimensions are read on every call and must reflect
/// the region's current, unscaled size.
pub trait Region {
    /// Current width
    fn width(&self) -> f64;

    /// Current height
    fn height(&self) -> f64;

    /// Current width and height
    fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Document-relative offset
    fn offset(&self) -> Offset;

    /// Offset relative to the region's positioning parent
    ///
    /// Hosts without a parent notion can rely on the default, which reports
    /// the document offset.
    fn position(&self) -> Offset {
        self.offset()
    }

    /// Apply a uniform scale transform
    fn apply_scale(&self, transform: &ScaleTransform) -> Result<()>;
}

/// Shared handle to a host region
pub type RegionRef = Rc<dyn Region>;

/// An in-memory region with settable geometry
///
/// Counts every transform applied to it and keeps the most recent
/// [`HeadlessRegion::HISTORY_LIMIT`] of them. Used by rendering-free hosts
/// such as replays and tests.
#[derive(Debug, Default)]
pub struct HeadlessRegion {
    size: Cell<Size>,
    offset: Cell<Offset>,
    position: Cell<Option<Offset>>,
    history: RefCell<VecDeque<ScaleTransform>>,
    applied_count: Cell<usize>,
    rejecting: Cell<bool>,
}

impl HeadlessRegion {
    /// Transforms kept by [`HeadlessRegion::applied`]
    pub const HISTORY_LIMIT: usize = 64;

    /// Create a region of the given size at the document origin
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Cell::new(Size::new(width, height)),
            ..Default::default()
        }
    }

    /// Place the region at a document offset
    pub fn at(self, top: f64, left: f64) -> Self {
        self.offset.set(Offset::new(top, left));
        self
    }

    /// Wrap the region in an `Rc` so it can be shared with a zoom
    pub fn shared(self) -> Rc<Self> {
        Rc::new(self)
    }

    pub fn set_size(&self, width: f64, height: f64) {
        self.size.set(Size::new(width, height));
    }

    pub fn set_offset(&self, top: f64, left: f64) {
        self.offset.set(Offset::new(top, left));
    }

    /// Override the parent-relative position
    pub fn set_position(&self, top: f64, left: f64) {
        self.position.set(Some(Offset::new(top, left)));
    }

    /// Make subsequent `apply_scale` calls fail
    pub fn reject_styles(&self, rejecting: bool) {
        self.rejecting.set(rejecting);
    }

    /// The most recently applied transform
    pub fn last_transform(&self) -> Option<ScaleTransform> {
        self.history.borrow().back().copied()
    }

    /// The most recent transforms, oldest first
    pub fn applied(&self) -> Vec<ScaleTransform> {
        self.history.borrow().iter().copied().collect()
    }

    /// Number of transforms applied over the region's lifetime
    pub fn applied_count(&self) -> usize {
        self.applied_count.get()
    }
}

impl Region for HeadlessRegion {
    fn width(&self) -> f64 {
        self.size.get().width
    }

    fn height(&self) -> f64 {
        self.size.get().height
    }

    fn offset(&self) -> Offset {
        self.offset.get()
    }

    fn position(&self) -> Offset {
        self.position.get().unwrap_or_else(|| self.offset.get())
    }

    fn apply_scale(&self, transform: &ScaleTransform) -> Result<()> {
        if self.rejecting.get() {
            return Err(RegionError::StyleRejected(transform.css_transform()));
        }
        let mut history = self.history.borrow_mut();
        if history.len() == Self::HISTORY_LIMIT {
            history.pop_front();
        }
        history.push_back(*transform);
        self.applied_count.set(self.applied_count.get().saturating_add(1));
        Ok(())
    }
}
