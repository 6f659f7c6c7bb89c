//! Replay scripts and settings files
//!
//! A replay script describes a boundary, a guide and the timed changes fed
//! to the coordinator:
//!
//! ```toml
//! boundary = "800x600"
//! guide = "400x300"
//! policy = "longest"
//! elements = ["200x100"]
//!
//! [[step]]
//! at_ms = 0
//! ready = true
//!
//! [[step]]
//! at_ms = 40
//! boundary = "1024x768"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use zoombox_core::{CoordinatorSettings, FitPolicy};
use zoombox_platform::Size;

/// Parse a `WIDTHxHEIGHT` pair such as `800x600` or `12.5X40`
pub fn parse_size(value: &str) -> Result<Size> {
    let (width, height) = value
        .trim()
        .split_once(['x', 'X'])
        .with_context(|| format!("Expected WIDTHxHEIGHT, got '{}'", value))?;
    let width: f64 = width
        .trim()
        .parse()
        .with_context(|| format!("Invalid width in '{}'", value))?;
    let height: f64 = height
        .trim()
        .parse()
        .with_context(|| format!("Invalid height in '{}'", value))?;
    Ok(Size::new(width, height))
}

/// A `WxH` string in a replay script
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Dimensions(pub Size);

impl TryFrom<String> for Dimensions {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        parse_size(&value).map(Dimensions)
    }
}

/// A scripted resize timeline
#[derive(Debug, Deserialize)]
pub struct ReplayScript {
    /// Initial boundary size
    pub boundary: Dimensions,
    /// Initial guide size; the guide is also the first scaled element
    pub guide: Dimensions,
    /// Fit policy, falling back to the settings' default
    #[serde(default)]
    pub policy: Option<FitPolicy>,
    /// Extra scaled elements
    #[serde(default)]
    pub elements: Vec<Dimensions>,
    #[serde(default, rename = "step")]
    pub steps: Vec<ReplayStep>,
}

/// A raw resize at `at_ms` after the replay starts
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayStep {
    pub at_ms: u64,
    /// New boundary size, applied before the resize is dispatched
    #[serde(default)]
    pub boundary: Option<Dimensions>,
    /// New guide size
    #[serde(default)]
    pub guide: Option<Dimensions>,
    /// Report the step as a ready event instead of a resize
    #[serde(default)]
    pub ready: bool,
}

impl ReplayScript {
    pub fn parse(source: &str) -> Result<Self> {
        let mut script: ReplayScript =
            toml::from_str(source).context("Failed to parse replay script")?;
        script.steps.sort_by_key(|step| step.at_ms);
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Failed to load {}", path.display()))
    }
}

/// Load coordinator settings, or the defaults when no file is given
pub fn load_settings(path: Option<&Path>) -> Result<CoordinatorSettings> {
    match path {
        Some(path) => CoordinatorSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display())),
        None => Ok(CoordinatorSettings::default()),
    }
}
