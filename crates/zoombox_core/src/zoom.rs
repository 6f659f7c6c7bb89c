//! Zoom instances
//!
//! A zoom instance owns one scaling configuration: a fit policy, a boundary,
//! a guide, the registered elements, and the last computed zoomfactor. On
//! every dispatch it re-reads the boundary and guide, recomputes the factor,
//! writes it to every element, and notifies the observer for that phase.
//!
//! Instances are created through
//! [`ResizeCoordinator::create_zoom`](crate::ResizeCoordinator::create_zoom)
//! and shared as [`ZoomHandle`]s.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use zoombox_platform::{Offset, RegionRef, ScaleTransform, Size};

use crate::error::{Result, ZoomError};
use crate::policy::{compute_scale, FitPolicy};

static NEXT_ZOOM_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique zoom identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoomId(u64);

impl ZoomId {
    fn next() -> Self {
        ZoomId(NEXT_ZOOM_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ZoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zoombox-id-{}", self.0)
    }
}

/// Which signal a dispatch answers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// A raw resize (or ready) occurrence
    Resize,
    /// The debounced settle after a burst
    Settled,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Resize => f.write_str("resize"),
            Phase::Settled => f.write_str("resize-finish"),
        }
    }
}

/// Callback invoked after a recompute
///
/// Receives the live handle, so the observer can read the new zoomfactor,
/// inspect elements, or adjust the configuration.
#[derive(Clone)]
pub struct ZoomObserver {
    callback: Option<Rc<dyn Fn(&ZoomHandle)>>,
}

impl ZoomObserver {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&ZoomHandle) + 'static,
    {
        Self {
            callback: Some(Rc::new(callback)),
        }
    }

    /// The explicit do-nothing observer used when none is supplied
    pub fn noop() -> Self {
        Self { callback: None }
    }

    pub fn is_noop(&self) -> bool {
        self.callback.is_none()
    }

    pub fn notify(&self, zoom: &ZoomHandle) {
        if let Some(callback) = &self.callback {
            callback(zoom);
        }
    }
}

impl Default for ZoomObserver {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for ZoomObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_noop() {
            f.write_str("ZoomObserver(noop)")
        } else {
            f.write_str("ZoomObserver(fn)")
        }
    }
}

/// The region whose size is the denominator of the scale ratio
///
/// Offset and position are captured once, when the guide is assigned.
#[derive(Clone)]
pub struct Guide {
    region: RegionRef,
    offset: Offset,
    position: Offset,
}

impl Guide {
    fn capture(region: RegionRef) -> Self {
        let offset = region.offset();
        let position = region.position();
        Self {
            region,
            offset,
            position,
        }
    }

    pub fn region(&self) -> &RegionRef {
        &self.region
    }

    /// Current (live) size
    pub fn size(&self) -> Size {
        self.region.size()
    }

    /// Document offset at assignment time
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Parent-relative position at assignment time
    pub fn position(&self) -> Offset {
        self.position
    }
}

impl fmt::Debug for Guide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guide")
            .field("size", &self.size())
            .field("offset", &self.offset)
            .field("position", &self.position)
            .finish()
    }
}

/// Coordinator-wide defaults that every new zoom starts from
#[derive(Clone, Default)]
pub struct ZoomDefaults {
    pub dimension: FitPolicy,
    /// Usually the viewport
    pub boundary: Option<RegionRef>,
    pub on_resize: ZoomObserver,
    pub on_resize_finish: ZoomObserver,
}

impl ZoomDefaults {
    /// Build a fresh configuration with `options` layered over the defaults
    ///
    /// The result shares nothing mutable with `self`.
    pub fn merge(&self, options: ZoomOptions) -> ZoomConfig {
        ZoomConfig {
            dimension: options.dimension.unwrap_or(self.dimension),
            boundary: options.boundary.or_else(|| self.boundary.clone()),
            guide: options.guide.map(Guide::capture),
            on_resize: options
                .on_resize
                .unwrap_or_else(|| self.on_resize.clone()),
            on_resize_finish: options
                .on_resize_finish
                .unwrap_or_else(|| self.on_resize_finish.clone()),
        }
    }
}

impl fmt::Debug for ZoomDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomDefaults")
            .field("dimension", &self.dimension)
            .field("boundary", &self.boundary.as_ref().map(|b| b.size()))
            .field("on_resize", &self.on_resize)
            .field("on_resize_finish", &self.on_resize_finish)
            .finish()
    }
}

/// Per-zoom options; unset fields fall back to [`ZoomDefaults`]
#[derive(Clone, Default)]
pub struct ZoomOptions {
    pub dimension: Option<FitPolicy>,
    pub boundary: Option<RegionRef>,
    /// Defaults to the first registered element
    pub guide: Option<RegionRef>,
    pub on_resize: Option<ZoomObserver>,
    pub on_resize_finish: Option<ZoomObserver>,
}

impl ZoomOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimension(mut self, dimension: FitPolicy) -> Self {
        self.dimension = Some(dimension);
        self
    }

    pub fn boundary(mut self, boundary: RegionRef) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn guide(mut self, guide: RegionRef) -> Self {
        self.guide = Some(guide);
        self
    }

    /// Observer for every raw resize
    pub fn on_resize<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ZoomHandle) + 'static,
    {
        self.on_resize = Some(ZoomObserver::new(callback));
        self
    }

    /// Observer for the settle after a burst
    pub fn on_resize_finish<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ZoomHandle) + 'static,
    {
        self.on_resize_finish = Some(ZoomObserver::new(callback));
        self
    }
}

/// A zoom's private configuration
#[derive(Clone)]
pub struct ZoomConfig {
    pub dimension: FitPolicy,
    pub boundary: Option<RegionRef>,
    guide: Option<Guide>,
    pub on_resize: ZoomObserver,
    pub on_resize_finish: ZoomObserver,
}

impl ZoomConfig {
    /// The guide, once assigned
    ///
    /// There is no setter: the guide is fixed at registration.
    pub fn guide(&self) -> Option<&Guide> {
        self.guide.as_ref()
    }

    fn observer(&self, phase: Phase) -> &ZoomObserver {
        match phase {
            Phase::Resize => &self.on_resize,
            Phase::Settled => &self.on_resize_finish,
        }
    }
}

impl fmt::Debug for ZoomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZoomConfig")
            .field("dimension", &self.dimension)
            .field("boundary", &self.boundary.as_ref().map(|b| b.size()))
            .field("guide", &self.guide)
            .field("on_resize", &self.on_resize)
            .field("on_resize_finish", &self.on_resize_finish)
            .finish()
    }
}

/// What the caller handed to registration
pub enum Selection {
    /// Zero or more matched regions
    Collection(Vec<RegionRef>),
    /// A single handle that was already resolved
    Resolved(RegionRef),
}

impl Selection {
    /// A resolved handle with a nonzero size registers nothing
    pub fn is_degenerate(&self) -> bool {
        match self {
            Selection::Resolved(region) => !region.size().is_empty(),
            Selection::Collection(_) => false,
        }
    }

    pub(crate) fn into_regions(self) -> Vec<RegionRef> {
        match self {
            Selection::Collection(regions) => regions,
            Selection::Resolved(region) => vec![region],
        }
    }
}

impl From<Vec<RegionRef>> for Selection {
    fn from(regions: Vec<RegionRef>) -> Self {
        Selection::Collection(regions)
    }
}

impl From<RegionRef> for Selection {
    fn from(region: RegionRef) -> Self {
        Selection::Resolved(region)
    }
}

impl FromIterator<RegionRef> for Selection {
    fn from_iter<I: IntoIterator<Item = RegionRef>>(iter: I) -> Self {
        Selection::Collection(iter.into_iter().collect())
    }
}

/// A region receiving the zoom's transform
#[derive(Clone)]
pub struct RegisteredElement {
    region: RegionRef,
    origin: Offset,
}

impl RegisteredElement {
    pub fn region(&self) -> &RegionRef {
        &self.region
    }

    /// Guide offset minus this element's offset, at registration time
    ///
    /// Useful for keeping elements that are not children of the boundary
    /// aligned with the guide as they scale.
    pub fn origin(&self) -> Offset {
        self.origin
    }
}

impl fmt::Debug for RegisteredElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredElement")
            .field("size", &self.region.size())
            .field("origin", &self.origin)
            .finish()
    }
}

/// Outcome of a successful recompute
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleReport {
    pub factor: f64,
    /// Elements that accepted the transform
    pub styled: usize,
    /// Elements whose styling failed
    pub failed: usize,
}

/// One scaling configuration and the elements it styles
///
/// Owned by a [`ZoomHandle`]; reach it through [`ZoomHandle::instance`] or
/// [`ZoomHandle::with`].
#[derive(Debug)]
pub struct ZoomInstance {
    id: ZoomId,
    config: ZoomConfig,
    elements: Vec<RegisteredElement>,
    zoomfactor: f64,
}

impl ZoomInstance {
    /// Register `regions` under `config`
    ///
    /// Without a configured guide the first region becomes the guide. Each
    /// element's origin is measured against the guide's offset.
    pub(crate) fn register(mut config: ZoomConfig, regions: Vec<RegionRef>) -> Self {
        let mut elements = Vec::with_capacity(regions.len());
        for region in regions {
            let guide = config
                .guide
                .get_or_insert_with(|| Guide::capture(region.clone()));
            let origin = guide.offset - region.offset();
            elements.push(RegisteredElement { region, origin });
        }

        Self {
            id: ZoomId::next(),
            config,
            elements,
            zoomfactor: 1.0,
        }
    }

    pub fn id(&self) -> ZoomId {
        self.id
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ZoomConfig {
        &mut self.config
    }

    pub fn elements(&self) -> &[RegisteredElement] {
        &self.elements
    }

    /// Last successfully computed factor (1.0 before the first recompute)
    pub fn zoomfactor(&self) -> f64 {
        self.zoomfactor
    }

    /// Re-read boundary and guide, store the new factor, and style every
    /// element
    ///
    /// On error nothing is written and the previous factor is kept. Styling
    /// failures on individual elements are logged and counted, never
    /// returned.
    pub fn recompute(&mut self) -> Result<ScaleReport> {
        let boundary = self
            .config
            .boundary
            .as_ref()
            .ok_or(ZoomError::MissingBoundary(self.id))?;
        let guide = self
            .config
            .guide
            .as_ref()
            .ok_or(ZoomError::MissingGuide(self.id))?;

        let factor = compute_scale(self.config.dimension, boundary.size(), guide.size())?;
        self.zoomfactor = factor;

        let transform = ScaleTransform::new(factor);
        let mut failed = 0;
        for (index, element) in self.elements.iter().enumerate() {
            if let Err(err) = element.region.apply_scale(&transform) {
                failed += 1;
                tracing::warn!(zoom = %self.id, index, error = %err, "failed to style element");
            }
        }

        Ok(ScaleReport {
            factor,
            styled: self.elements.len() - failed,
            failed,
        })
    }
}

/// Shared handle to a registered zoom
#[derive(Clone)]
pub struct ZoomHandle {
    id: ZoomId,
    inner: Rc<RefCell<ZoomInstance>>,
}

impl ZoomHandle {
    pub(crate) fn new(instance: ZoomInstance) -> Self {
        Self {
            id: instance.id,
            inner: Rc::new(RefCell::new(instance)),
        }
    }

    pub fn id(&self) -> ZoomId {
        self.id
    }

    pub fn zoomfactor(&self) -> f64 {
        self.inner.borrow().zoomfactor
    }

    pub fn dimension(&self) -> FitPolicy {
        self.inner.borrow().config.dimension
    }

    pub fn element_count(&self) -> usize {
        self.inner.borrow().elements.len()
    }

    /// Borrow the instance
    ///
    /// The borrow must end before the zoom is dispatched again.
    pub fn instance(&self) -> Ref<'_, ZoomInstance> {
        self.inner.borrow()
    }

    /// Read the instance through a closure
    pub fn with<R>(&self, f: impl FnOnce(&ZoomInstance) -> R) -> R {
        f(&self.inner.borrow())
    }

    /// Modify this zoom's configuration
    ///
    /// Only this zoom is affected; coordinator defaults and other zooms keep
    /// their own configuration.
    pub fn update_config(&self, f: impl FnOnce(&mut ZoomConfig)) {
        f(self.inner.borrow_mut().config_mut());
    }

    /// Recompute and restyle without notifying observers
    pub fn recompute(&self) -> Result<ScaleReport> {
        self.inner.borrow_mut().recompute()
    }

    /// Recompute, then notify the observer for `phase`
    ///
    /// The observer runs even when the recompute failed, and sees the last
    /// valid zoomfactor. No borrow of the instance is held while it runs.
    pub(crate) fn dispatch(&self, phase: Phase) -> Result<ScaleReport> {
        let result = self.recompute();
        let observer = self.inner.borrow().config.observer(phase).clone();
        observer.notify(self);
        result
    }

    /// True if both handles refer to the same zoom
    pub fn ptr_eq(&self, other: &ZoomHandle) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for ZoomHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(instance) => fmt::Debug::fmt(&*instance, f),
            Err(_) => f.debug_tuple("ZoomHandle").field(&self.id).finish(),
        }
    }
}
