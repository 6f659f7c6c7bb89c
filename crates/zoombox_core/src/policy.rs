//! Fit policies and scale-factor computation

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zoombox_platform::Size;

use crate::error::{Result, ZoomError};

/// Raw policy values
///
/// These integers are part of the public contract and never change.
pub mod constants {
    use super::FitPolicy;

    pub const SCALE_DIM_LONGEST: u8 = FitPolicy::Longest as u8;
    pub const SCALE_DIM_WIDTH: u8 = FitPolicy::Width as u8;
    pub const SCALE_DIM_HEIGHT: u8 = FitPolicy::Height as u8;
    pub const SCALE_DIM_SHORTEST: u8 = FitPolicy::Shortest as u8;
}

/// Which dimension ratio becomes the zoomfactor
///
/// Scaling by anything other than [`FitPolicy::Longest`] may clip content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum FitPolicy {
    /// Larger of the two ratios
    #[default]
    Longest = 0,
    /// Boundary width over guide width
    Width = 1,
    /// Boundary height over guide height
    Height = 2,
    /// Smaller of the two ratios
    Shortest = 3,
}

impl FitPolicy {
    pub const ALL: [FitPolicy; 4] = [
        FitPolicy::Longest,
        FitPolicy::Width,
        FitPolicy::Height,
        FitPolicy::Shortest,
    ];

    /// Decode a raw value; anything unrecognized falls back to `Longest`
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => FitPolicy::Width,
            2 => FitPolicy::Height,
            3 => FitPolicy::Shortest,
            _ => FitPolicy::Longest,
        }
    }

    pub fn as_raw(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            FitPolicy::Longest => "longest",
            FitPolicy::Width => "width",
            FitPolicy::Height => "height",
            FitPolicy::Shortest => "shortest",
        }
    }

    /// Pick the zoomfactor out of a pair of ratios
    pub fn select(self, ratios: ScaleRatios) -> f64 {
        match self {
            FitPolicy::Width => ratios.width,
            FitPolicy::Height => ratios.height,
            FitPolicy::Shortest => ratios.height.min(ratios.width),
            FitPolicy::Longest => ratios.height.max(ratios.width),
        }
    }

    fn inputs_usable(self, ratios: ScaleRatios) -> bool {
        match self {
            FitPolicy::Width => usable(ratios.width),
            FitPolicy::Height => usable(ratios.height),
            FitPolicy::Shortest | FitPolicy::Longest => {
                usable(ratios.width) && usable(ratios.height)
            }
        }
    }
}

impl From<u8> for FitPolicy {
    fn from(raw: u8) -> Self {
        FitPolicy::from_raw(raw)
    }
}

impl fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FitPolicy {
    type Err = ZoomError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<u8>() {
            return match raw {
                0..=3 => Ok(FitPolicy::from_raw(raw)),
                _ => Err(ZoomError::UnknownPolicy(s.to_string())),
            };
        }
        FitPolicy::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ZoomError::UnknownPolicy(s.to_string()))
    }
}

/// Boundary-over-guide ratio for each dimension
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRatios {
    pub height: f64,
    pub width: f64,
}

impl ScaleRatios {
    pub fn between(boundary: Size, guide: Size) -> Self {
        Self {
            height: boundary.height / guide.height,
            width: boundary.width / guide.width,
        }
    }
}

fn usable(ratio: f64) -> bool {
    ratio.is_finite() && ratio > 0.0
}

/// Compute the zoomfactor that fits `guide` into `boundary`
///
/// Fails with [`ZoomError::InvalidRatio`] when a ratio the policy depends on
/// is zero, negative, infinite, or NaN (for example a zero-height guide).
pub fn compute_scale(policy: FitPolicy, boundary: Size, guide: Size) -> Result<f64> {
    let ratios = ScaleRatios::between(boundary, guide);
    let factor = policy.select(ratios);
    if !policy.inputs_usable(ratios) {
        return Err(ZoomError::InvalidRatio {
            policy,
            boundary,
            guide,
            factor,
        });
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(policy: FitPolicy, boundary: (f64, f64), guide: (f64, f64)) -> f64 {
        compute_scale(
            policy,
            Size::new(boundary.0, boundary.1),
            Size::new(guide.0, guide.1),
        )
        .unwrap()
    }

    #[test]
    fn test_raw_values_are_stable() {
        assert_eq!(constants::SCALE_DIM_LONGEST, 0);
        assert_eq!(constants::SCALE_DIM_WIDTH, 1);
        assert_eq!(constants::SCALE_DIM_HEIGHT, 2);
        assert_eq!(constants::SCALE_DIM_SHORTEST, 3);
        for policy in FitPolicy::ALL {
            assert_eq!(FitPolicy::from_raw(policy.as_raw()), policy);
        }
    }

    #[test]
    fn test_unknown_raw_falls_back_to_longest() {
        assert_eq!(FitPolicy::from_raw(4), FitPolicy::Longest);
        assert_eq!(FitPolicy::from(255), FitPolicy::Longest);
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("width".parse::<FitPolicy>().unwrap(), FitPolicy::Width);
        assert_eq!("HEIGHT".parse::<FitPolicy>().unwrap(), FitPolicy::Height);
        assert_eq!(" 3 ".parse::<FitPolicy>().unwrap(), FitPolicy::Shortest);
        assert!(matches!(
            "7".parse::<FitPolicy>(),
            Err(ZoomError::UnknownPolicy(_))
        ));
        assert!(matches!(
            "diagonal".parse::<FitPolicy>(),
            Err(ZoomError::UnknownPolicy(_))
        ));
    }

    #[test]
    fn test_each_policy_selects_its_ratio() {
        // height ratio 6.0, width ratio 2.0
        let boundary = (800.0, 600.0);
        let guide = (400.0, 100.0);
        assert_eq!(scale(FitPolicy::Width, boundary, guide), 2.0);
        assert_eq!(scale(FitPolicy::Height, boundary, guide), 6.0);
        assert_eq!(scale(FitPolicy::Shortest, boundary, guide), 2.0);
        assert_eq!(scale(FitPolicy::Longest, boundary, guide), 6.0);
    }

    #[test]
    fn test_matching_aspect_longest() {
        assert_eq!(scale(FitPolicy::Longest, (800.0, 600.0), (400.0, 300.0)), 2.0);
    }

    #[test]
    fn test_policies_over_positive_grid() {
        let values = [0.5, 1.0, 3.0, 250.0, 1920.0];
        for &hb in &values {
            for &wb in &values {
                for &hg in &values {
                    for &wg in &values {
                        let (h, w) = (hb / hg, wb / wg);
                        let b = (wb, hb);
                        let g = (wg, hg);
                        assert_eq!(scale(FitPolicy::Longest, b, g), h.max(w));
                        assert_eq!(scale(FitPolicy::Shortest, b, g), h.min(w));
                        assert_eq!(scale(FitPolicy::Width, b, g), w);
                        assert_eq!(scale(FitPolicy::Height, b, g), h);
                    }
                }
            }
        }
    }

    #[test]
    fn test_zero_guide_height_is_rejected() {
        let err = compute_scale(
            FitPolicy::Longest,
            Size::new(800.0, 600.0),
            Size::new(400.0, 0.0),
        )
        .unwrap_err();
        match err {
            ZoomError::InvalidRatio { factor, .. } => assert!(factor.is_infinite()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_width_policy_ignores_unused_height_ratio() {
        let factor = compute_scale(
            FitPolicy::Width,
            Size::new(800.0, 600.0),
            Size::new(400.0, 0.0),
        )
        .unwrap();
        assert_eq!(factor, 2.0);
    }

    #[test]
    fn test_zero_boundary_is_rejected() {
        let flat = Size::new(800.0, 0.0);
        assert!(compute_scale(FitPolicy::Height, flat, Size::new(4.0, 3.0)).is_err());

        let empty = Size::new(0.0, 0.0);
        assert!(compute_scale(FitPolicy::Shortest, empty, empty).is_err());
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Doc {
            policy: FitPolicy,
        }
        let doc: Doc = toml::from_str("policy = \"shortest\"").unwrap();
        assert_eq!(doc.policy, FitPolicy::Shortest);
    }
}
