//! Scale transform style output

use std::fmt;

/// Vendor prefixes written alongside the standard properties when a host
/// asks for prefixed output
pub const VENDOR_PREFIXES: [&str; 4] = ["-o-", "-moz-", "-webkit-", "-ms-"];

/// Transform origin as fractions of the element box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformOrigin {
    /// Horizontal fraction (0.0 = left edge)
    pub x: f64,
    /// Vertical fraction (0.0 = top edge)
    pub y: f64,
}

impl TransformOrigin {
    /// The top-left corner
    pub const TOP_LEFT: TransformOrigin = TransformOrigin { x: 0.0, y: 0.0 };

    /// Create an origin from box fractions
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// CSS value for `transform-origin`
    pub fn css_value(&self) -> String {
        if *self == Self::TOP_LEFT {
            "top left".to_string()
        } else {
            format!("{}% {}%", self.x * 100.0, self.y * 100.0)
        }
    }
}

impl Default for TransformOrigin {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

/// A uniform 2-D scale applied to a region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTransform {
    /// Uniform scale factor
    pub factor: f64,
    /// Transform origin
    pub origin: TransformOrigin,
}

impl ScaleTransform {
    /// Scale by `factor` around the top-left corner
    pub fn new(factor: f64) -> Self {
        Self {
            factor,
            origin: TransformOrigin::TOP_LEFT,
        }
    }

    /// Set the transform origin
    pub fn with_origin(mut self, origin: TransformOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// CSS value for `transform`
    pub fn css_transform(&self) -> String {
        format!("scale({})", self.factor)
    }

    /// Render the transform as CSS declarations
    ///
    /// With `prefixed` set, each property is preceded by its vendor variants
    /// in [`VENDOR_PREFIXES`] order.
    pub fn declarations(&self, prefixed: bool) -> Vec<StyleDeclaration> {
        let origin = self.origin.css_value();
        let transform = self.css_transform();
        let prefixes: &[&str] = if prefixed { &VENDOR_PREFIXES } else { &[] };

        let mut out = Vec::with_capacity((prefixes.len() + 1) * 2);
        for (property, value) in [("transform-origin", &origin), ("transform", &transform)] {
            for prefix in prefixes {
                out.push(StyleDeclaration::new(format!("{prefix}{property}"), value));
            }
            out.push(StyleDeclaration::new(property, value));
        }
        out
    }
}

/// A single `property: value` pair
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
}

impl StyleDeclaration {
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for StyleDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.property, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_css() {
        assert_eq!(TransformOrigin::TOP_LEFT.css_value(), "top left");
        assert_eq!(TransformOrigin::new(0.5, 0.5).css_value(), "50% 50%");
    }

    #[test]
    fn test_transform_css() {
        assert_eq!(ScaleTransform::new(2.0).css_transform(), "scale(2)");
        assert_eq!(ScaleTransform::new(1.5).css_transform(), "scale(1.5)");
    }

    #[test]
    fn test_unprefixed_declarations() {
        let decls = ScaleTransform::new(2.0).declarations(false);
        let rendered: Vec<String> = decls.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["transform-origin: top left;", "transform: scale(2);"]
        );
    }

    #[test]
    fn test_prefixed_declarations() {
        let decls = ScaleTransform::new(0.5).declarations(true);
        assert_eq!(decls.len(), 10);
        assert_eq!(decls[0].property, "-o-transform-origin");
        assert_eq!(decls[4].property, "transform-origin");
        assert_eq!(decls[5].property, "-o-transform");
        assert_eq!(decls[9], StyleDeclaration::new("transform", "scale(0.5)"));
    }
}
